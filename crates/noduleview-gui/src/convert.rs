use image::DynamicImage;

/// Longest edge uploaded as a texture; larger images are downscaled first.
pub const MAX_TEXTURE_EDGE: u32 = 4096;

/// Convert a decoded image to an egui ColorImage (RGBA, unmultiplied alpha).
pub fn dynamic_to_color_image(image: &DynamicImage) -> egui::ColorImage {
    let image = if image.width().max(image.height()) > MAX_TEXTURE_EDGE {
        image.resize(
            MAX_TEXTURE_EDGE,
            MAX_TEXTURE_EDGE,
            image::imageops::FilterType::Triangle,
        )
    } else {
        image.clone()
    };
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())
}
