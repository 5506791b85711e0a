//! Shared UI components.

use eframe::egui::{self, Button, Color32, Response, RichText, Ui};

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const PRIMARY: Color32 = Color32::from_rgb(29, 78, 216);
    pub const DANGER: Color32 = Color32::from_rgb(185, 28, 28);
}

/// Filled primary button with a leading icon.
pub fn primary_button(ui: &mut Ui, icon: &str, label: &str) -> Response {
    ui.add(Button::new(RichText::new(format!("{icon} {label}")).color(Color32::WHITE)).fill(colors::PRIMARY))
}

/// Filled destructive button with a leading icon.
pub fn danger_button(ui: &mut Ui, icon: &str, label: &str) -> Response {
    ui.add(Button::new(RichText::new(format!("{icon} {label}")).color(Color32::WHITE)).fill(colors::DANGER))
}

/// Small icon-only row action.
pub fn action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.add(Button::new(icon).frame(false)).on_hover_text(tooltip)
}

/// Red field-level validation message.
pub fn field_error(ui: &mut Ui, message: &str) {
    ui.colored_label(colors::ERROR, RichText::new(message).size(11.0));
}

/// Centered spinner with a caption, used while the course list loads.
pub fn loading_indicator(ui: &mut Ui, caption: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.spinner();
        ui.add_space(10.0);
        ui.label(caption);
    });
}

/// Centered error banner, used when the course load fails.
pub fn error_banner(ui: &mut Ui, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.colored_label(colors::ERROR, message);
    });
}

/// Avatar image loaded from a URL, clipped to a circle.
pub fn avatar(ui: &mut Ui, url: &str, size: f32) {
    ui.add(
        egui::Image::new(url)
            .fit_to_exact_size(egui::vec2(size, size))
            .corner_radius(size / 2.0),
    );
}
