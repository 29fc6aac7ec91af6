use crate::atoms::{Atoms, Lattice};
use anyhow::{anyhow, bail, Context, Result};
use log::info;
use std::fs;
use std::path::Path;

/// The coordinate system.
enum Coord {
    /// Fractional coordinates.
    Fractional,
    /// Cartesian coordinates.
    Cartesian,
}

/// Read the structure from a POSCAR or CONTCAR file.
pub fn read_poscar(filename: &Path) -> Result<Atoms> {
    info!("Reading structure from {}", filename.display());
    let text = fs::read_to_string(filename)
        .with_context(|| format!("Opening {}", filename.display()))?;
    parse_poscar(&text).with_context(|| format!("Parsing {}", filename.display()))
}

fn numbers(line: Option<&str>) -> Result<Vec<f64>> {
    let line = line.ok_or_else(|| anyhow!("The POSCAR ended unexpectedly."))?;
    line.split_whitespace()
        .map(|x| x.parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()
        .with_context(|| format!("Unparsable line: {}", line))
}

/// The first three values of the line, positions with selective dynamics
/// carry flags after them.
fn vector(line: Option<&str>) -> Result<[f64; 3]> {
    let line = line.ok_or_else(|| anyhow!("The POSCAR ended unexpectedly."))?;
    let values = line.split_whitespace()
                     .take(3)
                     .map(|x| x.parse::<f64>())
                     .collect::<Result<Vec<f64>, _>>()
                     .with_context(|| format!("Unparsable line: {}", line))?;
    match values.as_slice() {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => bail!("Expected three coordinates in the line: {}", line),
    }
}

/// Read the structure from the text of a POSCAR. The elements have to be
/// given in the line above the number of atoms.
pub fn parse_poscar(text: &str) -> Result<Atoms> {
    let mut lines = text.lines();
    // skip the comment line and then read the lattice information
    let _ = lines.next();
    let scale = numbers(lines.next())?;
    let mut vectors = [vector(lines.next())?,
                       vector(lines.next())?,
                       vector(lines.next())?];
    // the scale can be negative and this means that it is the volume of the
    // cell, it can also be 3 values which is a multiplier for each direction
    let scale = match scale.as_slice() {
        [s] if *s < 0. => {
            let volume = Lattice::new(vectors).map_err(|e| anyhow!(e))?.volume;
            [(-s / volume).cbrt(); 3]
        }
        [s] => [*s; 3],
        [a, b, c] => [*a, *b, *c],
        _ => bail!("Expected one or three values for the scaling factor."),
    };
    for vector in vectors.iter_mut() {
        for (v, s) in vector.iter_mut().zip(scale) {
            *v *= s;
        }
    }
    let lattice = Lattice::new(vectors).map_err(|e| anyhow!(e))?;
    let ion_types = lines.next()
                         .context("The POSCAR ended before the elements.")?
                         .split_whitespace()
                         .map(String::from)
                         .collect::<Vec<String>>();
    if ion_types.iter().any(|t| t.parse::<usize>().is_ok()) {
        bail!("The POSCAR does not specify the elements needed to plot the \
               structure, please add them above the number of atoms.");
    }
    let counts_line = lines.next()
                           .context("The POSCAR ended before the number of atoms.")?;
    let counts = counts_line.split_whitespace()
                            .map(|n| n.parse::<usize>())
                            .collect::<Result<Vec<usize>, _>>()
                            .map_err(|_| {
                                anyhow!("The numbers of atoms {} are not \
                                         non-negative integers.",
                                        counts_line.trim())
                            })?;
    if counts.len() != ion_types.len() {
        bail!("Found {} elements but {} numbers of atoms.",
              ion_types.len(),
              counts.len());
    }
    let elements = ion_types.iter()
                            .zip(&counts)
                            .flat_map(|(t, n)| vec![t.clone(); *n])
                            .collect::<Vec<String>>();
    let mut dubious = lines.next()
                           .context("The POSCAR ended before the positions.")?
                           .trim_start()
                           .to_lowercase();
    if dubious.starts_with('s') {
        dubious = lines.next()
                       .context("The POSCAR ended before the positions.")?
                       .trim_start()
                       .to_lowercase();
    }
    let coord = if dubious.starts_with('c') || dubious.starts_with('k') {
        Coord::Cartesian
    } else {
        Coord::Fractional
    };
    let positions = (0..elements.len()).map(|_| vector(lines.next()))
                                       .collect::<Result<Vec<[f64; 3]>>>()?;
    Ok(match coord {
        Coord::Fractional => Atoms::new(lattice, positions, elements),
        Coord::Cartesian => {
            let positions = positions.into_iter()
                                     .map(|p| {
                                         [p[0] * scale[0],
                                          p[1] * scale[1],
                                          p[2] * scale[2]]
                                     })
                                     .collect();
            Atoms::from_cartesian(lattice, positions, elements)
        }
    })
}
