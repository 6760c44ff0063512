//! Errors raised while preparing and submitting the Q-Chem jobs behind a
//! piezoelectric-matrix calculation.

use std::path::PathBuf;

use thiserror::Error;

use crate::qchem::ParseInputError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("malformed qchem input {}: {source}", .path.display())]
    Input {
        path: PathBuf,
        source: ParseInputError,
    },

    /// The base input reads its geometry from elsewhere, so there are no atoms
    /// to index.
    #[error("{} does not contain an explicit geometry", .path.display())]
    NoGeometry { path: PathBuf },

    #[error(
        "atom index {index} in atom list {list} is out of range for a \
         molecule with {natoms} atoms"
    )]
    AtomIndex {
        list: usize,
        index: usize,
        natoms: usize,
    },

    #[error("failed to submit {}: {msg}", .script.display())]
    Submit { script: PathBuf, msg: String },
}
