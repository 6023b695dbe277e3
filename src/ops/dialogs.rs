// ============================================================================
// DIALOG STYLING — shared chrome for ShaderTune's modal dialogs
// ============================================================================
//
//   - Accent-colored header strip with icon + title
//   - Small-caps section labels
//   - Reset / OK / Cancel footer
//   - Theme-aware colors throughout
// ============================================================================

use eframe::egui;
use egui::{Color32, Pos2, Rect, Rounding, Sense, Vec2};

/// Result returned by each dialog's `show()` method every frame.
#[derive(Debug, PartialEq)]
pub enum DialogResult<T> {
    /// Dialog is still open, no action needed this frame.
    Open,
    /// A parameter changed this frame.
    Changed,
    /// User clicked OK - contains the final values.
    Ok(T),
    /// User clicked Cancel, or the dialog closed itself.
    Cancel,
}

/// Colors extracted from the current egui visuals for dialog rendering.
pub(crate) struct DialogColors {
    pub accent: Color32,
    pub accent_faint: Color32,
    pub text_muted: Color32,
}

impl DialogColors {
    pub(crate) fn from_ctx(ctx: &egui::Context) -> Self {
        let v = ctx.style().visuals.clone();
        let accent = v.selection.stroke.color;
        let alpha = if v.dark_mode { 35 } else { 25 };
        let accent_faint = Color32::from_rgba_unmultiplied(accent.r(), accent.g(), accent.b(), alpha);
        // In dark mode, boost muted text so labels stay readable
        let text_muted = if v.dark_mode {
            Color32::from_gray(160)
        } else {
            v.weak_text_color()
        };
        Self {
            accent,
            accent_faint,
            text_muted,
        }
    }
}

/// Paint the accent header bar with icon + title.
pub(crate) fn paint_dialog_header(ui: &mut egui::Ui, colors: &DialogColors, icon: &str, title: &str) {
    let available_width = ui.available_width();
    let header_height = 32.0;
    let (rect, _) = ui.allocate_exact_size(Vec2::new(available_width, header_height), Sense::hover());

    let painter = ui.painter();
    painter.rect_filled(rect, Rounding::ZERO, colors.accent_faint);
    // Left accent bar
    painter.rect_filled(
        Rect::from_min_size(rect.min, Vec2::new(3.0, header_height)),
        Rounding::ZERO,
        colors.accent,
    );

    let text_pos = Pos2::new(rect.min.x + 12.0, rect.center().y);
    painter.text(
        text_pos,
        egui::Align2::LEFT_CENTER,
        format!("{} {}", icon, title),
        egui::FontId::proportional(14.0),
        colors.accent,
    );
}

/// Styled section label (small caps feel).
pub(crate) fn section_label(ui: &mut egui::Ui, colors: &DialogColors, text: &str) {
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.add_space(2.0);
        ui.label(egui::RichText::new(text).size(11.0).color(colors.text_muted).strong());
    });
    ui.add_space(2.0);
}

/// Thin separator line using accent color (very faint).
pub(crate) fn accent_separator(ui: &mut egui::Ui, colors: &DialogColors) {
    let available_width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(Vec2::new(available_width, 1.0), Sense::hover());
    ui.painter().rect_filled(rect, 0.0, colors.accent_faint);
}

/// Footer flags for one frame.
#[derive(Default)]
pub(crate) struct FooterActions {
    pub ok: bool,
    pub cancel: bool,
    pub reset: bool,
}

/// Styled Reset / OK / Cancel footer.
pub(crate) fn dialog_footer_with_reset(ui: &mut egui::Ui, colors: &DialogColors) -> FooterActions {
    let mut actions = FooterActions::default();
    ui.add_space(4.0);
    accent_separator(ui, colors);
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        if ui.button(t!("common.reset")).clicked() {
            actions.reset = true;
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button(t!("common.cancel")).clicked() {
                actions.cancel = true;
            }
            let ok_label = format!("  {}  ", t!("common.ok"));
            let ok_btn = egui::Button::new(egui::RichText::new(ok_label).color(Color32::WHITE).strong())
                .fill(colors.accent);
            if ui.add(ok_btn).clicked() {
                actions.ok = true;
            }
        });
    });
    actions
}
