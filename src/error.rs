//! Error type shared by the dialog and the descriptor loader.

use std::path::PathBuf;

use thiserror::Error;

use crate::shader::SLOT_COUNT;

#[derive(Debug, Error)]
pub enum TuneError {
    /// The dialog was attached without a shader to tune.
    #[error("no shader descriptor was supplied")]
    MissingDescriptor,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("shader '{shader}': slot {slot} is out of range (0..{max})", max = SLOT_COUNT)]
    InvalidSlot { shader: String, slot: usize },

    #[error("shader '{shader}': slot {slot} is declared more than once")]
    DuplicateSlot { shader: String, slot: usize },

    #[error("shader '{shader}': {count} settings declared, at most {max} allowed", max = SLOT_COUNT)]
    TooManySettings { shader: String, count: usize },

    #[error("shader '{shader}': expected {max} override values, found {count}", max = SLOT_COUNT)]
    InvalidValues { shader: String, count: usize },
}
