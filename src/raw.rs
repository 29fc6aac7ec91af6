use crate::atoms::Atoms;
use crate::errors::{MagnetismError, Result};
use log::debug;
use ndarray::{Array4, Axis};

/// Which kind of calculation produced the local moments, decided by the
/// length of the component axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Regime {
    /// No spin polarization, only the charge is available.
    ChargeOnly,
    /// Charge and a scalar magnetic moment.
    Collinear,
    /// Charge and a magnetic moment vector.
    Noncollinear,
}

impl Regime {
    /// Classifies the number of components of the spin moments.
    pub fn from_components(components: usize) -> Result<Self> {
        match components {
            1 => Ok(Self::ChargeOnly),
            2 => Ok(Self::Collinear),
            4 => Ok(Self::Noncollinear),
            n => Err(MagnetismError::InvalidData(format!(
                "The local moments contain {} components, expected 1 (charge \
                 only), 2 (collinear), or 4 (noncollinear).",
                n
            ))),
        }
    }
}

/// The local moments as written by VASP.
///
/// > spin_moments: [step, component, atom, orbital] where the components are
/// >               the charge followed by the total moment (collinear) or the
/// >               x, y and z moments (noncollinear)
/// > orbital_moments: same layout as the spin moments, None if VASP did not
/// >                  compute them
/// > structure: the atoms the moments belong to, needed for plotting
pub struct RawMagnetism {
    spin_moments: Array4<f64>,
    orbital_moments: Option<Array4<f64>>,
    structure: Option<Atoms>,
    regime: Regime,
}

impl RawMagnetism {
    /// Checks the layout of the moments and classifies the calculation.
    pub fn new(spin_moments: Array4<f64>,
               orbital_moments: Option<Array4<f64>>)
               -> Result<Self> {
        let regime = Regime::from_components(spin_moments.len_of(Axis(1)))?;
        if let Some(orbital) = &orbital_moments {
            if orbital.shape() != spin_moments.shape() {
                return Err(MagnetismError::InvalidData(format!(
                    "The orbital moments have the shape {:?} which differs \
                     from the shape {:?} of the spin moments.",
                    orbital.shape(),
                    spin_moments.shape()
                )));
            }
        }
        debug!("Local moments of shape {:?} classified as {:?}",
               spin_moments.shape(),
               regime);
        Ok(Self { spin_moments,
                  orbital_moments,
                  structure: None,
                  regime })
    }

    /// Attaches the structure used when plotting the moments.
    pub fn with_structure(mut self, structure: Atoms) -> Self {
        self.structure = Some(structure);
        self
    }

    pub fn spin_moments(&self) -> &Array4<f64> {
        &self.spin_moments
    }

    pub fn orbital_moments(&self) -> Option<&Array4<f64>> {
        self.orbital_moments.as_ref()
    }

    pub fn structure(&self) -> Option<&Atoms> {
        self.structure.as_ref()
    }

    pub fn regime(&self) -> Regime {
        self.regime
    }

    /// Length of the step axis.
    pub fn number_steps(&self) -> usize {
        self.spin_moments.len_of(Axis(0))
    }

    /// Length of the atom axis.
    pub fn number_atoms(&self) -> usize {
        self.spin_moments.len_of(Axis(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regime_from_components() {
        assert_eq!(Regime::from_components(1).unwrap(), Regime::ChargeOnly);
        assert_eq!(Regime::from_components(2).unwrap(), Regime::Collinear);
        assert_eq!(Regime::from_components(4).unwrap(), Regime::Noncollinear);
        for n in [0, 3, 5] {
            assert!(matches!(Regime::from_components(n),
                             Err(MagnetismError::InvalidData(_))))
        }
    }

    #[test]
    fn raw_new_rejects_mismatched_orbital_moments() {
        let spin = Array4::<f64>::zeros((2, 4, 3, 4));
        let orbital = Array4::<f64>::zeros((2, 4, 3, 3));
        assert!(RawMagnetism::new(spin, Some(orbital)).is_err())
    }

    #[test]
    fn raw_new_rejects_three_components() {
        let spin = Array4::<f64>::zeros((2, 3, 3, 4));
        assert!(RawMagnetism::new(spin, None).is_err())
    }

    #[test]
    fn raw_new_sizes() {
        let raw = RawMagnetism::new(Array4::zeros((5, 2, 7, 3)), None).unwrap();
        assert_eq!(raw.regime(), Regime::Collinear);
        assert_eq!(raw.number_steps(), 5);
        assert_eq!(raw.number_atoms(), 7);
        assert!(raw.orbital_moments().is_none());
        assert!(raw.structure().is_none());
    }
}
