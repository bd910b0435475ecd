use crate::app::ViewerApp;
use crate::messages::WorkerCommand;
use crate::states::RATING_SCALE;

pub fn show(ctx: &egui::Context, app: &mut ViewerApp) {
    if !app.ui_state.rating.open {
        return;
    }

    let mut open = true;
    let mut submitted = None;

    egui::Window::new("Post-Evaluation Review")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let rating = &mut app.ui_state.rating;
            ui.label(format!(
                "{}: {} ({})",
                rating.context.source, rating.context.label, rating.context.confidence
            ));
            ui.add_space(8.0);

            egui::Grid::new("rating_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    let scores = &mut rating.ratings;
                    score_row(ui, "Classification Accuracy", &mut scores.classification_accuracy);
                    score_row(ui, "Localization Accuracy", &mut scores.localization_accuracy);
                    score_row(ui, "Ease of Use", &mut scores.ease_of_use);
                });

            ui.add_space(8.0);
            ui.label("Suggestions/Feedback");
            ui.add(
                egui::TextEdit::multiline(&mut rating.ratings.feedback)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY),
            );

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(rating.ratings.is_complete(), egui::Button::new("Submit"))
                    .clicked()
                {
                    submitted = rating.submit();
                }
                if ui.button("Skip").clicked() {
                    rating.dismiss();
                }
            });
        });

    if !open {
        app.ui_state.rating.dismiss();
    }
    if let Some(record) = submitted {
        app.ui_state.add_log("Feedback submitted".into());
        app.send_command(WorkerCommand::SubmitFeedback { record });
    }
}

fn score_row(ui: &mut egui::Ui, label: &str, value: &mut Option<u8>) {
    ui.label(label);
    ui.horizontal(|ui| {
        for score in 1..=RATING_SCALE {
            ui.selectable_value(value, Some(score), score.to_string());
        }
    });
    ui.end_row();
}
