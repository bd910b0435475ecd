use console::Style;
use noduleview_core::client::ServiceInfo;
use noduleview_core::result::InferenceResult;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    nodule: Style,
    clear: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            nodule: Style::new().red().bold(),
            clear: Style::new().green().bold(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

pub fn print_classification_summary(
    source: &str,
    result: &InferenceResult,
    displayed: Option<&str>,
) {
    let s = Styles::new();
    print_title(&s, "Classification");

    println!("  {:<14}{}", s.label.apply_to("Source"), s.path.apply_to(source));

    let badge = if result.indicates_nodule() { &s.nodule } else { &s.clear };
    println!("  {:<14}{}", s.label.apply_to("Prediction"), badge.apply_to(&result.label));

    let confidence = result.confidence_text();
    if result.confidence.and_then(|c| c.percent()).is_some() {
        println!("  {:<14}{}", s.label.apply_to("Confidence"), s.value.apply_to(confidence));
    } else {
        println!("  {:<14}{}", s.label.apply_to("Confidence"), s.disabled.apply_to(confidence));
    }

    let heatmap = if result.has_heatmap_pair() {
        s.value.apply_to("heatmap + original")
    } else if result.images().next().is_some() {
        s.value.apply_to("single image")
    } else {
        s.disabled.apply_to("none")
    };
    println!("  {:<14}{}", s.label.apply_to("Images"), heatmap);

    if let Some(layer) = displayed {
        println!("  {:<14}{}", s.label.apply_to("Displayed"), s.value.apply_to(layer));
    }
    println!();
}

pub fn print_preview_summary(source: &str, server_generated: bool, dimensions: (u32, u32)) {
    let s = Styles::new();
    print_title(&s, "Preview");

    println!("  {:<14}{}", s.label.apply_to("Source"), s.path.apply_to(source));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Origin"),
        s.value
            .apply_to(if server_generated { "inference service" } else { "local decode" })
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Dimensions"),
        s.value.apply_to(format!("{}x{}", dimensions.0, dimensions.1))
    );
    println!();
}

pub fn print_service_summary(base_url: &str, info: &ServiceInfo) {
    let s = Styles::new();
    print_title(&s, "Inference Service");

    println!("  {:<14}{}", s.label.apply_to("URL"), s.path.apply_to(base_url));
    match info.message {
        Some(ref message) => {
            println!("  {:<14}{}", s.label.apply_to("Status"), s.value.apply_to(message))
        }
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Status"),
            s.disabled.apply_to("no message")
        ),
    }
    match info.active_predictor {
        Some(ref predictor) => println!(
            "  {:<14}{}",
            s.label.apply_to("Predictor"),
            s.clear.apply_to(predictor)
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Predictor"),
            s.disabled.apply_to("unknown")
        ),
    }
    println!();
}
