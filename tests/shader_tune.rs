use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use shadertune::ops::shader_tune::DialogPhase;
use shadertune::shader::parse_str;
use shadertune::{SettingDescriptor, ShaderDescriptor, ShaderTuneDialog, TuneError, TuneListener, TuneResult};

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<TuneResult>>>);

impl TuneListener for Recorder {
    fn on_tune_complete(&mut self, values: TuneResult) {
        self.0.borrow_mut().push(values);
    }
}

fn bundled_shaders() -> Vec<ShaderDescriptor> {
    parse_str(include_str!("../shaders/crt.toml"), Path::new("shaders/crt.toml")).unwrap()
}

#[test]
fn bundled_descriptor_loads() {
    let shaders = bundled_shaders();
    assert_eq!(shaders.len(), 2);
    assert_eq!(shaders[0].setting_count(), 4);
    assert_eq!(shaders[1].setting_count(), 2);
    assert!(shaders[1].setting(1).is_none());
}

#[test]
fn full_session_with_overrides_and_empty_slots() {
    shadertune::i18n::init();
    let bloom = bundled_shaders().remove(1);
    let recorder = Recorder::default();
    let mut dialog = ShaderTuneDialog::new(Some(bloom), Some(Box::new(recorder.clone())));
    assert_eq!(dialog.phase(), DialogPhase::Created);

    dialog.attach().unwrap();
    dialog.build();
    assert_eq!(dialog.phase(), DialogPhase::Built);
    assert_eq!(dialog.row_count(), 2);

    // Overrides: 0.6 on a 0.05 grid, 2.5 on a derived 0.04 grid
    assert_eq!(dialog.position(0), Some(12));
    assert_eq!(dialog.max_position(2), Some(100));
    assert_eq!(dialog.label(0), Some("Threshold: 0.6"));
    assert_eq!(dialog.label(2), Some("Intensity: 2.5"));

    dialog.set_position(2, 10);
    assert_eq!(dialog.label(2), Some("Intensity: 0.4"));

    dialog.reset();
    assert_eq!(dialog.position(0), Some(16));
    assert_eq!(dialog.position(2), Some(25));
    assert_eq!(dialog.label(2), Some("Intensity: 1"));

    let values = dialog.confirm().unwrap();
    assert_eq!(values[1], 0.0);
    assert_eq!(values[3], 0.0);
    assert_eq!(values[2], 1.0);
    assert!((values[0] - 0.8).abs() < 1e-6);
    assert_eq!(recorder.0.borrow().len(), 1);
    assert_eq!(dialog.phase(), DialogPhase::Dismissed);
}

#[test]
fn missing_descriptor_never_reaches_listener() {
    let recorder = Recorder::default();
    let mut dialog = ShaderTuneDialog::new(None, Some(Box::new(recorder.clone())));
    assert!(matches!(dialog.attach(), Err(TuneError::MissingDescriptor)));
    dialog.reset();
    assert!(dialog.confirm().is_none());
    assert_eq!(dialog.row_count(), 0);
    assert!(recorder.0.borrow().is_empty());
}

#[test]
fn caller_descriptor_is_not_mutated() {
    shadertune::i18n::init();
    let shader = ShaderDescriptor::new("Gamma").with_setting(0, SettingDescriptor::new("Gamma", 0.0, 2.0, 0.0, 1.0));
    let mut dialog = ShaderTuneDialog::new(Some(shader.clone()), None);
    dialog.attach().unwrap();
    dialog.build();
    assert_eq!(dialog.session().unwrap().mapping(0).unwrap().step, 0.02);
    dialog.set_position(0, 25);

    // No listener injected: confirm still returns the values
    assert_eq!(dialog.confirm(), Some([0.5, 0.0, 0.0, 0.0]));
    assert_eq!(shader.setting(0).unwrap().step, 0.0);
}
