// ============================================================================
// SHADER TUNE DIALOG — sliders for a shader's tunable settings
// ============================================================================
//
// Lifecycle:
//   Created → attach() → Attached → build() → Built → {set_position}*
//     → cancel()  → Dismissed
//     → reset()   → Built
//     → confirm() → Dismissed (listener called once)
//   attach() without a shader → Dismissed, nothing built.
//
// State is held in two resources with separate lifetimes:
//   TuneSession  — per-slot mappings + initial values, lives as long as the dialog
//   SliderPanel  — per-slot slider positions + labels, only while the view exists
//
// Value ↔ position is one affine map (SliderMapping) shared by build, reset,
// live label updates and confirm. Positions are truncated, not rounded.
// ============================================================================

use std::sync::mpsc;

use eframe::egui;

use super::dialogs::{
    DialogColors, DialogResult, FooterActions, dialog_footer_with_reset, paint_dialog_header,
    section_label,
};
use crate::error::TuneError;
use crate::format::format_value;
use crate::shader::{SLOT_COUNT, SettingDescriptor, ShaderDescriptor};

/// Four values, one per slot. Slots without a setting hold `0.0`.
pub type TuneResult = [f32; SLOT_COUNT];

/// Slider positions per step that float error may fall short of the next
/// integer position before truncation.
const POSITION_EPSILON: f64 = 1e-3;

/// Receives the confirmed values of a tuning session.
pub trait TuneListener {
    fn on_tune_complete(&mut self, values: TuneResult);
}

impl TuneListener for mpsc::Sender<TuneResult> {
    fn on_tune_complete(&mut self, values: TuneResult) {
        if self.send(values).is_err() {
            log_warn!("Tune result dropped: receiver is gone");
        }
    }
}

// ============================================================================
// SLIDER MAPPING
// ============================================================================

/// Affine map between a setting's value range and integer slider positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderMapping {
    pub min: f32,
    /// Effective step. Derived as `(max - min) / 100` when the setting's own
    /// step is not positive.
    pub step: f32,
    pub max_position: u32,
}

impl SliderMapping {
    pub fn from_setting(setting: &SettingDescriptor) -> Self {
        let step = if setting.step > 0.0 {
            setting.step
        } else {
            (setting.max - setting.min) / 100.0
        };
        let max_position = truncate_position((setting.max as f64 - setting.min as f64) / step as f64);
        Self {
            min: setting.min,
            step,
            max_position,
        }
    }

    pub fn value_from_position(&self, position: u32) -> f32 {
        self.min + position as f32 * self.step
    }

    /// Truncating inverse of `value_from_position`, clamped to the slider range.
    pub fn position_from_value(&self, value: f32) -> u32 {
        truncate_position((value as f64 - self.min as f64) / self.step as f64).min(self.max_position)
    }
}

fn truncate_position(ratio: f64) -> u32 {
    if !ratio.is_finite() || ratio <= 0.0 {
        return 0;
    }
    // `as` saturates at u32::MAX
    (ratio + POSITION_EPSILON).trunc() as u32
}

// ============================================================================
// SESSION DATA + PRESENTATION SURFACE
// ============================================================================

#[derive(Clone, Debug)]
struct SlotState {
    name: String,
    default: f32,
    mapping: SliderMapping,
}

/// Session data: what the dialog was opened with. Never touched by slider moves.
#[derive(Debug)]
pub struct TuneSession {
    shader_name: String,
    slots: [Option<SlotState>; SLOT_COUNT],
    values: [f32; SLOT_COUNT],
}

impl TuneSession {
    pub fn new(shader: &ShaderDescriptor) -> Self {
        let mut slots: [Option<SlotState>; SLOT_COUNT] = Default::default();
        let mut values = [0.0; SLOT_COUNT];
        for (i, slot) in slots.iter_mut().enumerate() {
            let Some(setting) = shader.setting(i) else {
                continue;
            };
            values[i] = match &shader.values {
                Some(overrides) => overrides[i],
                None => setting.default,
            };
            *slot = Some(SlotState {
                name: setting.name.clone(),
                default: setting.default,
                mapping: SliderMapping::from_setting(setting),
            });
        }
        Self {
            shader_name: shader.name.clone(),
            slots,
            values,
        }
    }

    pub fn shader_name(&self) -> &str {
        &self.shader_name
    }

    /// Initial values, one per slot.
    pub fn values(&self) -> &[f32; SLOT_COUNT] {
        &self.values
    }

    pub fn mapping(&self, slot: usize) -> Option<&SliderMapping> {
        self.slots.get(slot)?.as_ref().map(|s| &s.mapping)
    }

    fn build_panel(&self) -> SliderPanel {
        let mut rows: [Option<SliderRow>; SLOT_COUNT] = Default::default();
        for (i, slot) in self.slots.iter().enumerate() {
            let Some(slot) = slot else { continue };
            let value = self.values[i];
            rows[i] = Some(SliderRow {
                position: slot.mapping.position_from_value(value),
                max_position: slot.mapping.max_position,
                label: setting_label(&slot.name, value),
            });
        }
        SliderPanel { rows }
    }
}

fn setting_label(name: &str, value: f32) -> String {
    t!("shader_tune.setting", name = name, value = format_value(value))
}

#[derive(Clone, Debug)]
struct SliderRow {
    position: u32,
    max_position: u32,
    label: String,
}

/// Presentation surface: one optional slider row per slot.
#[derive(Debug)]
struct SliderPanel {
    rows: [Option<SliderRow>; SLOT_COUNT],
}

// ============================================================================
// DIALOG
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogPhase {
    Created,
    Attached,
    Built,
    Dismissed,
}

pub struct ShaderTuneDialog {
    shader: Option<ShaderDescriptor>,
    listener: Option<Box<dyn TuneListener>>,
    session: Option<TuneSession>,
    panel: Option<SliderPanel>,
    phase: DialogPhase,
}

impl ShaderTuneDialog {
    pub fn new(shader: Option<ShaderDescriptor>, listener: Option<Box<dyn TuneListener>>) -> Self {
        Self {
            shader,
            listener,
            session: None,
            panel: None,
            phase: DialogPhase::Created,
        }
    }

    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    pub fn is_dismissed(&self) -> bool {
        self.phase == DialogPhase::Dismissed
    }

    pub fn session(&self) -> Option<&TuneSession> {
        self.session.as_ref()
    }

    /// Take ownership of the shader and start the session.
    /// Without a shader the dialog dismisses itself and reports why.
    pub fn attach(&mut self) -> Result<(), TuneError> {
        if self.phase != DialogPhase::Created {
            log_warn!("Shader tune: attach ignored in phase {:?}", self.phase);
            return Ok(());
        }
        let Some(shader) = self.shader.take() else {
            log_err!("Shader tune: opened without a shader descriptor");
            self.dismiss();
            return Err(TuneError::MissingDescriptor);
        };
        log_info!(
            "Shader tune: attached to '{}' ({} settings)",
            shader.name,
            shader.setting_count()
        );
        self.session = Some(TuneSession::new(&shader));
        self.phase = DialogPhase::Attached;
        Ok(())
    }

    /// Build the slider rows. Runs once, on the first frame the dialog is shown.
    pub fn build(&mut self) {
        if self.phase != DialogPhase::Attached {
            log_warn!("Shader tune: build ignored in phase {:?}", self.phase);
            return;
        }
        if let Some(session) = &self.session {
            self.panel = Some(session.build_panel());
            self.phase = DialogPhase::Built;
        }
    }

    /// Number of slider rows currently on screen.
    pub fn row_count(&self) -> usize {
        self.panel
            .as_ref()
            .map_or(0, |p| p.rows.iter().filter(|r| r.is_some()).count())
    }

    pub fn position(&self, slot: usize) -> Option<u32> {
        self.row(slot).map(|r| r.position)
    }

    pub fn max_position(&self, slot: usize) -> Option<u32> {
        self.row(slot).map(|r| r.max_position)
    }

    pub fn label(&self, slot: usize) -> Option<&str> {
        self.row(slot).map(|r| r.label.as_str())
    }

    fn row(&self, slot: usize) -> Option<&SliderRow> {
        self.panel.as_ref()?.rows.get(slot)?.as_ref()
    }

    /// Move a slider and refresh its label. Returns `false` when the slot has
    /// no slider. Positions beyond the range are clamped.
    pub fn set_position(&mut self, slot: usize, position: u32) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        let Some(state) = session.slots.get(slot).and_then(|s| s.as_ref()) else {
            return false;
        };
        let Some(row) = self
            .panel
            .as_mut()
            .and_then(|p| p.rows.get_mut(slot))
            .and_then(|r| r.as_mut())
        else {
            return false;
        };
        row.position = position.min(row.max_position);
        row.label = setting_label(&state.name, state.mapping.value_from_position(row.position));
        true
    }

    /// Move every slider back to its setting's default. Stays open.
    pub fn reset(&mut self) {
        if self.phase != DialogPhase::Built {
            log_warn!("Shader tune: reset ignored in phase {:?}", self.phase);
            return;
        }
        let defaults: Vec<(usize, u32)> = match &self.session {
            Some(session) => session
                .slots
                .iter()
                .enumerate()
                .filter_map(|(i, s)| s.as_ref().map(|s| (i, s.mapping.position_from_value(s.default))))
                .collect(),
            None => return,
        };
        for (slot, position) in defaults {
            self.set_position(slot, position);
        }
    }

    /// Read every slider back into values, hand them to the listener and close.
    /// Returns `None` if the dialog is not showing sliders.
    pub fn confirm(&mut self) -> Option<TuneResult> {
        if self.phase != DialogPhase::Built {
            log_warn!("Shader tune: confirm ignored in phase {:?}", self.phase);
            return None;
        }
        let (session, panel) = match (&self.session, &self.panel) {
            (Some(session), Some(panel)) => (session, panel),
            _ => {
                self.dismiss();
                return None;
            }
        };

        let mut values = [0.0; SLOT_COUNT];
        for (i, (slot, row)) in session.slots.iter().zip(panel.rows.iter()).enumerate() {
            if let (Some(slot), Some(row)) = (slot, row) {
                values[i] = slot.mapping.value_from_position(row.position);
            }
        }
        log_info!("Shader tune: '{}' confirmed {:?}", session.shader_name, values);

        if let Some(mut listener) = self.listener.take() {
            listener.on_tune_complete(values);
        }
        self.dismiss();
        Some(values)
    }

    pub fn cancel(&mut self) {
        if self.phase != DialogPhase::Dismissed {
            log_info!("Shader tune: cancelled");
        }
        self.dismiss();
    }

    /// Release the slider rows. Session data stays until the dialog is dropped.
    pub fn destroy_view(&mut self) {
        self.panel = None;
    }

    fn dismiss(&mut self) {
        self.destroy_view();
        self.listener = None;
        self.phase = DialogPhase::Dismissed;
    }

    pub fn show(&mut self, ctx: &egui::Context) -> DialogResult<TuneResult> {
        if self.phase == DialogPhase::Attached {
            self.build();
        }
        if self.phase != DialogPhase::Built {
            return DialogResult::Cancel;
        }

        let mut result = DialogResult::Open;
        let colors = DialogColors::from_ctx(ctx);
        let shader_name = self
            .session
            .as_ref()
            .map(|s| s.shader_name.to_uppercase())
            .unwrap_or_default();
        let mut moved: Vec<(usize, u32)> = Vec::new();
        let mut actions = FooterActions::default();

        egui::Window::new("dialog_shader_tune")
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .default_pos(egui::pos2(ctx.screen_rect().center().x - 180.0, 80.0))
            .show(ctx, |ui| {
                ui.set_min_width(360.0);
                paint_dialog_header(ui, &colors, "\u{1F39A}", &t!("shader_tune.title"));
                ui.add_space(4.0);
                section_label(ui, &colors, &shader_name);

                if let Some(panel) = &self.panel {
                    ui.spacing_mut().slider_width = 320.0;
                    for (slot, row) in panel.rows.iter().enumerate() {
                        let Some(row) = row else { continue };
                        ui.label(&row.label);
                        let mut position = row.position;
                        let r = ui.add(egui::Slider::new(&mut position, 0..=row.max_position).show_value(false));
                        if r.changed() {
                            moved.push((slot, position));
                        }
                        ui.add_space(4.0);
                    }
                }

                actions = dialog_footer_with_reset(ui, &colors);
            });

        for (slot, position) in moved {
            if self.set_position(slot, position) {
                result = DialogResult::Changed;
            }
        }
        if actions.reset {
            self.reset();
            result = DialogResult::Changed;
        }
        if actions.ok
            && let Some(values) = self.confirm()
        {
            result = DialogResult::Ok(values);
        }
        if actions.cancel {
            self.cancel();
            result = DialogResult::Cancel;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<TuneResult>>>);

    impl TuneListener for Recorder {
        fn on_tune_complete(&mut self, values: TuneResult) {
            self.0.borrow_mut().push(values);
        }
    }

    fn gamma() -> SettingDescriptor {
        SettingDescriptor::new("Gamma", 0.0, 2.0, 0.0, 1.0)
    }

    fn open(shader: ShaderDescriptor) -> (ShaderTuneDialog, Recorder) {
        crate::i18n::init();
        let recorder = Recorder::default();
        let mut dialog = ShaderTuneDialog::new(Some(shader), Some(Box::new(recorder.clone())));
        dialog.attach().unwrap();
        dialog.build();
        (dialog, recorder)
    }

    #[test]
    fn derives_step_when_not_positive() {
        let mapping = SliderMapping::from_setting(&gamma());
        assert_eq!(mapping.step, 0.02);
        assert_eq!(mapping.max_position, 100);
        assert_eq!(mapping.position_from_value(1.0), 50);
    }

    #[test]
    fn keeps_explicit_step() {
        let mapping = SliderMapping::from_setting(&SettingDescriptor::new("S", 0.0, 1.0, 0.05, 0.3));
        assert_eq!(mapping.step, 0.05);
        assert_eq!(mapping.max_position, 20);
        assert_eq!(mapping.position_from_value(0.3), 6);
    }

    #[test]
    fn position_round_trips_over_whole_range() {
        let settings = [
            SettingDescriptor::new("a", 0.0, 2.0, 0.0, 1.0),
            SettingDescriptor::new("b", -0.5, 0.5, 0.01, 0.0),
            SettingDescriptor::new("c", 0.5, 1.5, 0.01, 1.0),
            SettingDescriptor::new("d", 0.0, 3.0, 0.1, 1.0),
            SettingDescriptor::new("e", 10.0, 20.0, 0.25, 12.0),
        ];
        for setting in &settings {
            let m = SliderMapping::from_setting(setting);
            for p in 0..=m.max_position {
                assert_eq!(m.position_from_value(m.value_from_position(p)), p, "{} at {}", setting.name, p);
            }
        }
    }

    #[test]
    fn truncates_between_steps() {
        let m = SliderMapping::from_setting(&SettingDescriptor::new("S", 0.0, 1.0, 0.1, 0.0));
        assert_eq!(m.position_from_value(0.19), 1);
        assert_eq!(m.position_from_value(0.25), 2);
    }

    #[test]
    fn values_just_below_a_position_snap_up_within_tolerance() {
        let m = SliderMapping::from_setting(&SettingDescriptor::new("S", 0.0, 1.0, 0.1, 0.0));
        // 1.9995 steps: within 1e-3 of position 2
        assert_eq!(m.position_from_value(0.19995), 2);
        // 1.985 steps: outside the tolerance, truncates
        assert_eq!(m.position_from_value(0.1985), 1);
    }

    #[test]
    fn clamps_out_of_range_values() {
        let m = SliderMapping::from_setting(&SettingDescriptor::new("S", 0.0, 1.0, 0.1, 0.0));
        assert_eq!(m.position_from_value(-3.0), 0);
        assert_eq!(m.position_from_value(7.0), 10);
    }

    #[test]
    fn inverted_range_with_explicit_step_collapses() {
        let m = SliderMapping::from_setting(&SettingDescriptor::new("S", 1.0, 0.0, 0.1, 0.5));
        assert_eq!(m.max_position, 0);
    }

    #[test]
    fn zero_span_has_single_position() {
        let m = SliderMapping::from_setting(&SettingDescriptor::new("S", 1.0, 1.0, 0.0, 1.0));
        assert_eq!(m.max_position, 0);
        assert_eq!(m.position_from_value(1.0), 0);
        assert_eq!(m.value_from_position(0), 1.0);
    }

    #[test]
    fn gamma_scenario() {
        let (mut dialog, recorder) = open(ShaderDescriptor::new("CRT").with_setting(0, gamma()));
        assert_eq!(dialog.session().unwrap().mapping(0).unwrap().step, 0.02);
        assert_eq!(dialog.position(0), Some(50));
        assert_eq!(dialog.label(0), Some("Gamma: 1"));

        assert!(dialog.set_position(0, 25));
        assert_eq!(dialog.label(0), Some("Gamma: 0.5"));

        let values = dialog.confirm().unwrap();
        assert_eq!(values, [0.5, 0.0, 0.0, 0.0]);
        assert_eq!(recorder.0.borrow().as_slice(), &[[0.5, 0.0, 0.0, 0.0]]);
        assert!(dialog.is_dismissed());
    }

    #[test]
    fn live_update_leaves_session_values_alone() {
        let (mut dialog, _) = open(ShaderDescriptor::new("CRT").with_setting(0, gamma()));
        dialog.set_position(0, 10);
        assert_eq!(dialog.session().unwrap().values()[0], 1.0);
    }

    #[test]
    fn overrides_take_precedence_over_defaults() {
        let shader = ShaderDescriptor::new("CRT")
            .with_setting(0, gamma())
            .with_values([1.5, 0.0, 0.0, 0.0]);
        let (dialog, _) = open(shader);
        assert_eq!(dialog.position(0), Some(75));
        assert_eq!(dialog.label(0), Some("Gamma: 1.5"));
    }

    #[test]
    fn initial_label_shows_value_not_snapped_position() {
        let shader = ShaderDescriptor::new("S")
            .with_setting(0, SettingDescriptor::new("Amount", 0.0, 1.0, 0.1, 0.0))
            .with_values([0.25, 0.0, 0.0, 0.0]);
        let (dialog, _) = open(shader);
        assert_eq!(dialog.position(0), Some(2));
        assert_eq!(dialog.label(0), Some("Amount: 0.25"));
    }

    #[test]
    fn reset_restores_defaults_and_stays_open() {
        let shader = ShaderDescriptor::new("Grade")
            .with_setting(0, gamma())
            .with_setting(1, SettingDescriptor::new("Saturation", 0.0, 1.0, 0.05, 0.3))
            .with_values([2.0, 1.0, 0.0, 0.0]);
        let (mut dialog, recorder) = open(shader);
        assert_eq!(dialog.position(0), Some(100));
        dialog.set_position(1, 3);

        dialog.reset();
        assert_eq!(dialog.position(0), Some(50));
        assert_eq!(dialog.position(1), Some(6));
        assert_eq!(dialog.label(0), Some("Gamma: 1"));
        assert_eq!(dialog.label(1), Some("Saturation: 0.3"));
        assert_eq!(dialog.phase(), DialogPhase::Built);
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn empty_slots_build_no_rows_and_confirm_to_zero() {
        let shader = ShaderDescriptor::new("Sharpen")
            .with_setting(0, SettingDescriptor::new("Amount", 0.0, 3.0, 0.1, 1.0))
            .with_setting(2, SettingDescriptor::new("Radius", 0.5, 4.0, 0.25, 1.0));
        let (mut dialog, _) = open(shader);
        assert_eq!(dialog.row_count(), 2);
        assert!(dialog.position(1).is_none());
        assert!(!dialog.set_position(3, 1));

        let values = dialog.confirm().unwrap();
        assert_eq!(values[1], 0.0);
        assert_eq!(values[3], 0.0);
        assert_eq!(values[2], 1.0);
    }

    #[test]
    fn cancel_never_calls_listener() {
        let (mut dialog, recorder) = open(ShaderDescriptor::new("CRT").with_setting(0, gamma()));
        dialog.set_position(0, 80);
        dialog.cancel();
        assert!(dialog.is_dismissed());
        assert!(dialog.confirm().is_none());
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn confirm_delivers_only_once() {
        let (mut dialog, recorder) = open(ShaderDescriptor::new("CRT").with_setting(0, gamma()));
        assert!(dialog.confirm().is_some());
        assert!(dialog.confirm().is_none());
        dialog.reset();
        assert_eq!(recorder.0.borrow().len(), 1);
    }

    #[test]
    fn missing_shader_dismisses_without_building() {
        let recorder = Recorder::default();
        let mut dialog = ShaderTuneDialog::new(None, Some(Box::new(recorder.clone())));
        assert!(matches!(dialog.attach(), Err(TuneError::MissingDescriptor)));
        assert!(dialog.is_dismissed());

        dialog.build();
        assert_eq!(dialog.row_count(), 0);
        assert!(dialog.confirm().is_none());
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn destroyed_view_keeps_session() {
        let (mut dialog, _) = open(ShaderDescriptor::new("CRT").with_setting(0, gamma()));
        dialog.destroy_view();
        assert_eq!(dialog.row_count(), 0);
        assert!(dialog.session().is_some());
        assert!(!dialog.set_position(0, 10));
    }

    #[test]
    fn clamps_positions_past_the_end() {
        let (mut dialog, _) = open(ShaderDescriptor::new("CRT").with_setting(0, gamma()));
        dialog.set_position(0, 500);
        assert_eq!(dialog.position(0), Some(100));
        assert_eq!(dialog.label(0), Some("Gamma: 2"));
    }

    #[test]
    fn sender_listener_forwards_results() {
        let (tx, rx) = mpsc::channel();
        let mut listener: Box<dyn TuneListener> = Box::new(tx);
        listener.on_tune_complete([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(rx.try_recv().unwrap(), [1.0, 2.0, 3.0, 4.0]);
    }

    fn run_frame(ctx: &egui::Context, dialog: &mut ShaderTuneDialog) -> DialogResult<TuneResult> {
        let mut result = DialogResult::Open;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            result = dialog.show(ctx);
        });
        result
    }

    #[test]
    fn first_frame_builds_rows_and_stays_open() {
        crate::i18n::init();
        let recorder = Recorder::default();
        let shader = ShaderDescriptor::new("CRT")
            .with_setting(0, gamma())
            .with_setting(3, SettingDescriptor::new("Contrast", 0.0, 2.0, 0.25, 1.25));
        let mut dialog = ShaderTuneDialog::new(Some(shader), Some(Box::new(recorder.clone())));
        dialog.attach().unwrap();
        assert_eq!(dialog.phase(), DialogPhase::Attached);

        let ctx = egui::Context::default();
        assert_eq!(run_frame(&ctx, &mut dialog), DialogResult::Open);
        assert_eq!(dialog.phase(), DialogPhase::Built);
        assert_eq!(dialog.row_count(), 2);
        assert_eq!(dialog.position(0), Some(50));
        assert_eq!(run_frame(&ctx, &mut dialog), DialogResult::Open);

        dialog.cancel();
        assert_eq!(run_frame(&ctx, &mut dialog), DialogResult::Cancel);
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn unattached_dialog_reports_cancel() {
        crate::i18n::init();
        let mut dialog = ShaderTuneDialog::new(Some(ShaderDescriptor::new("CRT").with_setting(0, gamma())), None);
        let ctx = egui::Context::default();
        assert_eq!(run_frame(&ctx, &mut dialog), DialogResult::Cancel);
        assert_eq!(dialog.phase(), DialogPhase::Created);
        assert_eq!(dialog.row_count(), 0);
    }
}
