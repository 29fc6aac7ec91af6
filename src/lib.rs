//! Analysis of the local magnetic moments of [VASP] calculations. VASP
//! projects the charge and magnetization onto the atoms and their angular
//! momenta when [LORBIT] is set, and with [LORBMOM] = T it also computes the
//! orbital moments of noncollinear calculations. This binary and library read
//! these local moments from the OUTCAR, or a NumPy archive of the raw arrays,
//! and derive the charges, the magnetic moments and their totals per atom.
//!
//! ## Installing the binary
//! ### From Source
//! ```sh
//! $ cargo build --verbose --release
//! $ mv ./target/release/magmom ~/bin
//! ```
//!
//! ## Usage
//! The program takes an OUTCAR as input and prints the MAGMOM line of the
//! last ionic step together with the total charge of every atom.
//! ```sh
//! $ magmom OUTCAR
//! ```
//! Other steps are selected in slice notation, counting from zero.
//! ```sh
//! $ magmom OUTCAR --steps 0:3
//! ```
//! The charges and moments can be written as JSON. Passing the structure
//! of the calculation also allows to write a view of the structure with an
//! arrow for the moment of every atom.
//! ```sh
//! $ magmom OUTCAR --dict moments.json -p POSCAR --view view.json -c 2,2,1
//! ```
//! For a detailed list of usage options run
//! ```sh
//! $ magmom --help
//! ```
//!
//! ## Using the library
//! ```no_run
//! use magmom::io::{FileType, FileFormat};
//! use magmom::magnetism::{Magnetism, Selection};
//! use magmom::steps::Steps;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let raw = FileType::Outcar.format().read(Path::new("OUTCAR"), false)?;
//! let magnetism = Magnetism::from_data(&raw).steps(Steps::all());
//! let moments = magnetism.total_moments(Selection::Total)?;
//! println!("{}", magnetism);
//! # Ok(())
//! # }
//! ```
//! ## License
//! MIT
//!
//! [VASP]: <https://www.vasp.at/>
//! [LORBIT]: <https://www.vasp.at/wiki/index.php/LORBIT>
//! [LORBMOM]: <https://www.vasp.at/wiki/index.php/LORBMOM>

/// For parsing command-line arguments.
pub mod arguments;
/// Contains [Atoms](atoms::Atoms) for storing the structure the moments
/// belong to. Also contains [Lattice](atoms::Lattice) for storing
/// information about the cell.
pub mod atoms;
/// Provides custom errors types.
pub mod errors;
/// Handles the File I/O for the local moments, the structure and the result
/// files. Provides a [FileFormat](io::FileFormat) trait to be implemented by
/// modules designed to cover a specific file format of the local moments.
pub mod io;
/// The [Magnetism](magnetism::Magnetism) view deriving charges and moments
/// from the raw local moments.
pub mod magnetism;
/// Provides a [visible](progress::Bar) and [hidden](progress::HiddenBar) implementation of the
/// trait [ProgressBar](progress::ProgressBar).
pub mod progress;
/// The [RawMagnetism](raw::RawMagnetism) container of the arrays read from
/// VASP.
pub mod raw;
/// Selection of ionic steps.
pub mod steps;
/// Misc functions for vector and matrix manipulation.
pub mod utils;
/// The serializable [View](view::View) of a structure with moment arrows.
pub mod view;
