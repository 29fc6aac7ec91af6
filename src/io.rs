use crate::raw::RawMagnetism;
use anyhow::Result;
use std::path::Path;

pub mod npz;
pub mod outcar;
pub mod output;
pub mod poscar;

/// The supported file types of local moments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileType {
    /// The OUTCAR text output of VASP.
    Outcar,
    /// A NumPy archive containing the raw arrays.
    Npz,
}

impl FileType {
    /// Guesses the file type from the name of the file, anything that is not
    /// a NumPy archive is read as OUTCAR.
    pub fn infer(filename: &str) -> Self {
        if filename.to_lowercase().ends_with(".npz") {
            Self::Npz
        } else {
            Self::Outcar
        }
    }

    /// The reader for this file type.
    pub fn format(&self) -> Box<dyn FileFormat> {
        match self {
            Self::Outcar => Box::new(outcar::Outcar {}),
            Self::Npz => Box::new(npz::Npz {}),
        }
    }
}

/// Implemented by the modules reading a specific file format.
pub trait FileFormat {
    /// Read the local moments of every step in the file.
    fn read(&self, filename: &Path, visible_pbar: bool) -> Result<RawMagnetism>;
}
