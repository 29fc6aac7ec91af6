use crate::io::FileFormat;
use crate::raw::RawMagnetism;
use anyhow::{bail, Context, Result};
use log::info;
use ndarray::{Array4, ShapeBuilder};
use npyz::npz::NpzArchive;
use npyz::Order;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A NumPy archive holding the raw arrays "spin_moments" and, optionally,
/// "orbital_moments", both shaped [step, component, atom, orbital].
pub struct Npz {}

impl FileFormat for Npz {
    fn read(&self, filename: &Path, _visible_pbar: bool) -> Result<RawMagnetism> {
        info!("Reading local moments from {}", filename.display());
        let mut npz = NpzArchive::open(filename)
            .with_context(|| format!("Opening {}", filename.display()))?;
        let spin_moments = read_array(&mut npz, "spin_moments")?
            .with_context(|| {
                format!("{} does not contain spin_moments", filename.display())
            })?;
        let orbital_moments = read_array(&mut npz, "orbital_moments")?;
        Ok(RawMagnetism::new(spin_moments, orbital_moments)?)
    }
}

/// Reads an array from the archive, None if the archive does not contain it.
fn read_array(npz: &mut NpzArchive<BufReader<File>>,
              name: &str)
              -> Result<Option<Array4<f64>>> {
    let npy = match npz.by_name(name)? {
        Some(npy) => npy,
        None => return Ok(None),
    };
    let shape = npy.shape().iter().map(|n| *n as usize).collect::<Vec<_>>();
    let fortran = matches!(npy.order(), Order::Fortran);
    let data = npy.into_vec::<f64>()
                  .with_context(|| format!("Reading the data of {}", name))?;
    to_array4(&shape, fortran, data).with_context(|| format!("Reshaping {}", name))
                                    .map(Some)
}

/// Brings the flat data of an npy file into the shape it was saved with.
pub fn to_array4(shape: &[usize],
                 fortran: bool,
                 data: Vec<f64>)
                 -> Result<Array4<f64>> {
    let shape = match *shape {
        [a, b, c, d] => (a, b, c, d),
        _ => bail!("Expected an array with 4 axes, found the shape {:?}",
                   shape),
    };
    let array = if fortran {
        Array4::from_shape_vec(shape.f(), data)?
    } else {
        Array4::from_shape_vec(shape, data)?
    };
    Ok(array)
}
