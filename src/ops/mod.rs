// ============================================================================
// OPS — modal dialogs
// ============================================================================
//
//   dialogs.rs     — shared dialog chrome (header, sections, footer, DialogResult)
//   shader_tune.rs — shader parameter tuning dialog
// ============================================================================

pub mod dialogs;
pub mod shader_tune;

pub use dialogs::DialogResult;
pub use shader_tune::{ShaderTuneDialog, TuneListener, TuneResult};
