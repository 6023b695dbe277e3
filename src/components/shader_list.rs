use eframe::egui;

use crate::format::format_value;
use crate::ops::shader_tune::SliderMapping;
use crate::shader::{SLOT_COUNT, ShaderDescriptor};

/// What the user asked for this frame.
#[derive(Debug, PartialEq, Eq)]
pub enum ShaderListAction {
    None,
    Tune(usize),
    /// Open the dialog with no shader at all (exercises the error path).
    TuneWithoutShader,
}

#[derive(Default)]
pub struct ShaderListPanel {
    pub selected: Option<usize>,
}

impl ShaderListPanel {
    pub fn show(&mut self, ui: &mut egui::Ui, shaders: &[ShaderDescriptor]) -> ShaderListAction {
        let mut action = ShaderListAction::None;

        ui.heading(t!("app.shaders"));
        ui.separator();

        if shaders.is_empty() {
            ui.label(egui::RichText::new(t!("app.no_shaders")).italics());
        }

        egui::ScrollArea::vertical().max_height((ui.available_height() - 80.0).max(120.0)).show(ui, |ui| {
            for (i, shader) in shaders.iter().enumerate() {
                let selected = self.selected == Some(i);
                let r = ui.selectable_label(selected, &shader.name);
                if r.clicked() {
                    self.selected = Some(i);
                }
                if r.double_clicked() {
                    action = ShaderListAction::Tune(i);
                }
            }
        });

        ui.separator();
        let can_tune = self.selected.is_some_and(|i| i < shaders.len());
        if ui.add_enabled(can_tune, egui::Button::new(t!("app.tune"))).clicked()
            && let Some(i) = self.selected
        {
            action = ShaderListAction::Tune(i);
        }
        if ui.small_button(t!("app.tune_without_shader")).clicked() {
            action = ShaderListAction::TuneWithoutShader;
        }
        action
    }
}

/// Settings table for one shader: range, step, default and current value per slot.
pub fn show_details(ui: &mut egui::Ui, shader: &ShaderDescriptor) {
    ui.heading(&shader.name);
    ui.add_space(6.0);

    egui::Grid::new("shader_details")
        .num_columns(6)
        .striped(true)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            for header in [
                "app.col.slot",
                "app.col.name",
                "app.col.range",
                "app.col.step",
                "app.col.default",
                "app.col.current",
            ] {
                ui.label(egui::RichText::new(t!(header)).strong());
            }
            ui.end_row();

            for slot in 0..SLOT_COUNT {
                ui.label(slot.to_string());
                let Some(setting) = shader.setting(slot) else {
                    ui.label(egui::RichText::new(t!("app.empty_slot")).weak());
                    ui.end_row();
                    continue;
                };
                let mapping = SliderMapping::from_setting(setting);
                let current = shader.values.map_or(setting.default, |v| v[slot]);
                ui.label(&setting.name);
                ui.label(format!("{} … {}", format_value(setting.min), format_value(setting.max)));
                ui.label(format_value(mapping.step));
                ui.label(format_value(setting.default));
                ui.label(format_value(current));
                ui.end_row();
            }
        });
}
