// ============================================================================
// SHADER DESCRIPTORS — tunable settings a post-process shader exposes
// ============================================================================
//
// A shader exposes up to SLOT_COUNT settings, each bound to a fixed slot.
// Descriptors are read-only inputs for the tuning dialog; derived values
// (such as an effective slider step) are computed by the dialog itself.
//
// File format (TOML), either one shader per file:
//
//   name = "CRT"
//   values = [1.0, 0.3, 0.0, 0.0]      # optional override values
//   [[settings]]
//   slot = 0                            # optional, defaults to order
//   name = "Gamma"
//   min = 0.0
//   max = 2.0
//   step = 0.0                          # optional, <= 0 derives one
//   default = 1.0
//
// or several under a `[[shaders]]` array with the same fields.
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::TuneError;

/// Number of fixed parameter slots a shader may populate.
pub const SLOT_COUNT: usize = 4;

/// One tunable parameter: name plus numeric range, step and default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SettingDescriptor {
    pub name: String,
    pub min: f32,
    pub max: f32,
    /// Slider increment. Values `<= 0` ask the dialog to derive one.
    #[serde(default)]
    pub step: f32,
    pub default: f32,
}

impl SettingDescriptor {
    pub fn new(name: impl Into<String>, min: f32, max: f32, step: f32, default: f32) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            step,
            default,
        }
    }
}

/// A shader's tunable surface: slot-aligned settings plus optional
/// caller-supplied current values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShaderDescriptor {
    pub name: String,
    pub settings: [Option<SettingDescriptor>; SLOT_COUNT],
    /// Current override values. When `None`, each slot starts at its default.
    pub values: Option<[f32; SLOT_COUNT]>,
}

impl ShaderDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Place `setting` in `slot`. Out-of-range slots are ignored.
    pub fn with_setting(mut self, slot: usize, setting: SettingDescriptor) -> Self {
        if let Some(entry) = self.settings.get_mut(slot) {
            *entry = Some(setting);
        }
        self
    }

    pub fn with_values(mut self, values: [f32; SLOT_COUNT]) -> Self {
        self.values = Some(values);
        self
    }

    pub fn setting(&self, slot: usize) -> Option<&SettingDescriptor> {
        self.settings.get(slot).and_then(|s| s.as_ref())
    }

    /// Number of populated slots.
    pub fn setting_count(&self) -> usize {
        self.settings.iter().filter(|s| s.is_some()).count()
    }
}

// ============================================================================
// FILE LOADING
// ============================================================================

#[derive(Deserialize)]
struct SettingEntry {
    slot: Option<usize>,
    #[serde(flatten)]
    setting: SettingDescriptor,
}

#[derive(Deserialize)]
struct ShaderEntry {
    name: String,
    #[serde(default)]
    settings: Vec<SettingEntry>,
    values: Option<Vec<f32>>,
}

/// Top-level file layout. A file may describe one shader inline, a list of
/// shaders, or both.
#[derive(Deserialize)]
struct DescriptorFile {
    name: Option<String>,
    #[serde(default)]
    settings: Vec<SettingEntry>,
    values: Option<Vec<f32>>,
    #[serde(default)]
    shaders: Vec<ShaderEntry>,
}

impl TryFrom<ShaderEntry> for ShaderDescriptor {
    type Error = TuneError;

    fn try_from(entry: ShaderEntry) -> Result<Self, Self::Error> {
        let ShaderEntry { name, settings, values } = entry;
        if settings.len() > SLOT_COUNT {
            return Err(TuneError::TooManySettings { shader: name, count: settings.len() });
        }

        let mut shader = ShaderDescriptor::new(name);
        for (order, entry) in settings.into_iter().enumerate() {
            let slot = entry.slot.unwrap_or(order);
            if slot >= SLOT_COUNT {
                return Err(TuneError::InvalidSlot { shader: shader.name, slot });
            }
            if shader.settings[slot].is_some() {
                return Err(TuneError::DuplicateSlot { shader: shader.name, slot });
            }
            shader.settings[slot] = Some(entry.setting);
        }

        if let Some(values) = values {
            let count = values.len();
            let values: [f32; SLOT_COUNT] = values
                .try_into()
                .map_err(|_| TuneError::InvalidValues { shader: shader.name.clone(), count })?;
            shader.values = Some(values);
        }
        Ok(shader)
    }
}

/// Parse descriptor text. `origin` is only used in error messages.
pub fn parse_str(text: &str, origin: &Path) -> Result<Vec<ShaderDescriptor>, TuneError> {
    let file: DescriptorFile = toml::from_str(text).map_err(|source| TuneError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::with_capacity(file.shaders.len() + 1);
    if let Some(name) = file.name {
        entries.push(ShaderEntry {
            name,
            settings: file.settings,
            values: file.values,
        });
    }
    entries.extend(file.shaders);

    entries.into_iter().map(ShaderDescriptor::try_from).collect()
}

/// Load every shader declared in a descriptor file.
pub fn load_file(path: &Path) -> Result<Vec<ShaderDescriptor>, TuneError> {
    let text = fs::read_to_string(path).map_err(|source| TuneError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&text, path)
}

/// Load every `*.toml` descriptor in `dir`, sorted by file name.
/// Files that fail to load are logged and skipped.
pub fn load_dir(dir: &Path) -> Result<Vec<ShaderDescriptor>, TuneError> {
    let read = fs::read_dir(dir).map_err(|source| TuneError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = read
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml")))
        .collect();
    paths.sort();

    let mut shaders = Vec::new();
    for path in paths {
        match load_file(&path) {
            Ok(mut found) => shaders.append(&mut found),
            Err(e) => { log_warn!("Skipping shader descriptor: {}", e); }
        }
    }
    Ok(shaders)
}

/// Small embedded catalogue so the host has something to tune without files.
pub fn builtin_shaders() -> Vec<ShaderDescriptor> {
    vec![
        ShaderDescriptor::new("CRT Scanlines")
            .with_setting(0, SettingDescriptor::new("Gamma", 0.0, 2.0, 0.0, 1.0))
            .with_setting(1, SettingDescriptor::new("Scanline strength", 0.0, 1.0, 0.05, 0.3))
            .with_setting(2, SettingDescriptor::new("Curvature", 0.0, 0.5, 0.0, 0.1))
            .with_setting(3, SettingDescriptor::new("Mask brightness", 0.5, 1.5, 0.01, 1.0)),
        ShaderDescriptor::new("Sharpen")
            .with_setting(0, SettingDescriptor::new("Amount", 0.0, 3.0, 0.1, 1.0))
            .with_setting(2, SettingDescriptor::new("Radius", 0.5, 4.0, 0.25, 1.0)),
        ShaderDescriptor::new("Color Grade")
            .with_setting(0, SettingDescriptor::new("Contrast", 0.5, 2.0, 0.05, 1.0))
            .with_setting(1, SettingDescriptor::new("Saturation", 0.0, 2.0, 0.0, 1.0))
            .with_setting(2, SettingDescriptor::new("Brightness", -0.5, 0.5, 0.01, 0.0))
            .with_values([1.25, 0.8, 0.05, 0.0]),
    ]
}
