#[macro_use]
pub mod logger;
#[macro_use]
pub mod i18n;
pub mod app;
pub mod cli;
pub mod components;
pub mod error;
pub mod format;
pub mod ops;
pub mod shader;

pub use error::TuneError;
pub use ops::{DialogResult, ShaderTuneDialog, TuneListener, TuneResult};
pub use shader::{SLOT_COUNT, SettingDescriptor, ShaderDescriptor};
