// ============================================================================
// SHADERTUNE APP — host screen that lists shaders and opens the tune dialog
// ============================================================================

use std::sync::mpsc;

use eframe::egui;

use crate::components::notifications::NotificationHandler;
use crate::components::shader_list::{self, ShaderListAction, ShaderListPanel};
use crate::error::TuneError;
use crate::i18n;
use crate::ops::{DialogResult, ShaderTuneDialog, TuneResult};
use crate::shader::{self, ShaderDescriptor};

pub struct ShaderTuneApp {
    shaders: Vec<ShaderDescriptor>,
    shader_list: ShaderListPanel,

    // Modal dialog (at most one open at a time)
    active_dialog: Option<ShaderTuneDialog>,
    /// Index into `shaders` the open dialog was started for.
    tuning_index: Option<usize>,

    // Dialog listener channel: the dialog owns a Sender, we poll the Receiver
    tune_sender: mpsc::Sender<TuneResult>,
    tune_receiver: mpsc::Receiver<TuneResult>,
    last_result: Option<(String, TuneResult)>,

    notifications: NotificationHandler,
}

impl ShaderTuneApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, shaders: Vec<ShaderDescriptor>, load_errors: Vec<TuneError>) -> Self {
        let mut app = Self::with_shaders(shaders);
        for e in load_errors {
            app.notifications.show_info(&t!("app.load_failed"), &e.to_string());
        }
        app
    }

    fn with_shaders(shaders: Vec<ShaderDescriptor>) -> Self {
        let (tune_sender, tune_receiver) = mpsc::channel();
        let selected = if shaders.is_empty() { None } else { Some(0) };
        Self {
            shaders,
            shader_list: ShaderListPanel { selected },
            active_dialog: None,
            tuning_index: None,
            tune_sender,
            tune_receiver,
            last_result: None,
            notifications: NotificationHandler::new(),
        }
    }

    /// Open the tune dialog for `index`, or with no shader when `None`.
    fn open_tune_dialog(&mut self, index: Option<usize>) {
        if self.active_dialog.is_some() {
            return;
        }
        let shader = index.and_then(|i| self.shaders.get(i)).cloned();
        let mut dialog = ShaderTuneDialog::new(shader, Some(Box::new(self.tune_sender.clone())));
        match dialog.attach() {
            Ok(()) => {
                self.active_dialog = Some(dialog);
                self.tuning_index = index;
            }
            Err(e) => {
                log_warn!("Tune dialog closed: {}", e);
                self.notifications.show_info(&t!("shader_tune.error"), "");
            }
        }
    }

    fn show_active_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.active_dialog.as_mut() else {
            return;
        };
        match dialog.show(ctx) {
            DialogResult::Open | DialogResult::Changed => {}
            DialogResult::Ok(_) | DialogResult::Cancel => {
                // Dropping the dialog releases its session data
                self.active_dialog = None;
            }
        }
    }

    /// Apply results the dialog delivered through its listener.
    fn poll_tune_results(&mut self) {
        while let Ok(values) = self.tune_receiver.try_recv() {
            let Some(index) = self.tuning_index.take() else {
                continue;
            };
            if let Some(shader) = self.shaders.get_mut(index) {
                shader.values = Some(values);
                self.last_result = Some((shader.name.clone(), values));
            }
        }
    }

    fn open_descriptor_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter(t!("app.descriptor_filter"), &["toml"])
            .pick_file()
        else {
            return;
        };
        match shader::load_file(&path) {
            Ok(found) => {
                log_info!("Loaded {} shader(s) from {}", found.len(), path.display());
                if self.shader_list.selected.is_none() && !found.is_empty() {
                    self.shader_list.selected = Some(self.shaders.len());
                }
                self.shaders.extend(found);
            }
            Err(e) => {
                log_err!("{}", e);
                self.notifications.show_info(&t!("app.load_failed"), &e.to_string());
            }
        }
    }

    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        let no_dialog = self.active_dialog.is_none();
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button(t!("menu.file"), |ui| {
                    if ui.add_enabled(no_dialog, egui::Button::new(t!("menu.file.open"))).clicked() {
                        ui.close_menu();
                        self.open_descriptor_file();
                    }
                    if ui.button(t!("menu.file.quit")).clicked() {
                        ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button(t!("menu.language"), |ui| {
                    let current = i18n::current_language();
                    for &(code, native) in i18n::LANGUAGES {
                        if ui.selectable_label(current == code, native).clicked() {
                            i18n::set_language(code);
                            log_info!("Language set to {}", code);
                            ui.close_menu();
                        }
                    }
                });
            });
        });
    }
}

impl eframe::App for ShaderTuneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show_menu_bar(ctx);

        let no_dialog = self.active_dialog.is_none();
        let mut action = ShaderListAction::None;
        egui::SidePanel::left("shader_list")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.add_enabled_ui(no_dialog, |ui| {
                    action = self.shader_list.show(ui, &self.shaders);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            match self.shader_list.selected.and_then(|i| self.shaders.get(i)) {
                Some(shader) => shader_list::show_details(ui, shader),
                None => {
                    ui.label(t!("app.select_shader"));
                }
            }

            if let Some((name, values)) = &self.last_result {
                ui.add_space(12.0);
                ui.separator();
                let text = values
                    .iter()
                    .map(|v| crate::format::format_value(*v))
                    .collect::<Vec<_>>()
                    .join(", ");
                ui.label(t!("app.last_result", name = name, values = text));
            }
        });

        match action {
            ShaderListAction::None => {}
            ShaderListAction::Tune(i) => self.open_tune_dialog(Some(i)),
            ShaderListAction::TuneWithoutShader => self.open_tune_dialog(None),
        }

        self.show_active_dialog(ctx);
        self.poll_tune_results();
        self.notifications.render(ctx);
    }
}
