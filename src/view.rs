use crate::atoms::Atoms;
use crate::errors::{MagnetismError, Result};
use ndarray::Array3;
use serde::Serialize;
use std::str::FromStr;

/// Color of the arrows showing magnetic moments.
pub const VASP_BLUE: &str = "#4C265F";

/// How often the cell is repeated along each lattice vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Supercell(pub [i64; 3]);

impl Default for Supercell {
    fn default() -> Self {
        Self([1; 3])
    }
}

impl FromStr for Supercell {
    type Err = MagnetismError;

    /// Reads a single repetition for all directions, "2", or one per
    /// direction, "2,3,1" or "2 3 1".
    fn from_str(s: &str) -> Result<Self> {
        let unparsable = || {
            MagnetismError::IncorrectUsage(format!(
                "Could not convert supercell='{}' to an integer array.",
                s
            ))
        };
        let values = s.split(|c: char| c == ',' || c.is_whitespace())
                      .filter(|v| !v.is_empty())
                      .map(|v| v.parse::<f64>().map_err(|_| unparsable()))
                      .collect::<Result<Vec<f64>>>()?;
        if values.iter().any(|v| v.fract() != 0.) {
            return Err(MagnetismError::IncorrectUsage(format!(
                "supercell='{}' contains noninteger values.",
                s
            )));
        }
        let values = values.into_iter().map(|v| v as i64).collect::<Vec<_>>();
        match values.as_slice() {
            [n] => Ok(Self([*n; 3])),
            [a, b, c] => Ok(Self([*a, *b, *c])),
            _ => Err(MagnetismError::IncorrectUsage(format!(
                "supercell='{}' is not a scalar or a three component vector.",
                s
            ))),
        }
    }
}

/// Arrows drawn at the position of every atom.
///
/// > quantity: [step, atom, direction] - the vector at each atom
#[derive(Debug, Serialize)]
pub struct IonArrow {
    pub quantity: Array3<f64>,
    pub label: String,
    pub color: String,
    pub radius: f64,
}

/// Description of a 3d scene of the structure, one entry per step.
#[derive(Debug, Serialize)]
pub struct View {
    pub elements: Vec<Vec<String>>,
    pub lattice_vectors: Vec<[[f64; 3]; 3]>,
    pub positions: Vec<Vec<[f64; 3]>>,
    pub supercell: Supercell,
    pub ion_arrows: Vec<IonArrow>,
}

impl View {
    /// Shows the same structure for each of the steps.
    pub fn from_structure(atoms: &Atoms,
                          number_steps: usize,
                          supercell: Supercell)
                          -> Self {
        Self { elements: vec![atoms.elements.clone(); number_steps],
               lattice_vectors: vec![atoms.lattice.vectors; number_steps],
               positions: vec![atoms.positions.clone(); number_steps],
               supercell,
               ion_arrows: Vec::new() }
    }

    /// Number of steps in the scene.
    pub fn number_steps(&self) -> usize {
        self.positions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::Lattice;

    #[test]
    fn supercell_default() {
        assert_eq!(Supercell::default(), Supercell([1, 1, 1]))
    }

    #[test]
    fn supercell_scalar() {
        assert_eq!("2".parse::<Supercell>().unwrap(), Supercell([2, 2, 2]))
    }

    #[test]
    fn supercell_vector() {
        assert_eq!("2,3,1".parse::<Supercell>().unwrap(), Supercell([2, 3, 1]));
        assert_eq!("2 3 1".parse::<Supercell>().unwrap(), Supercell([2, 3, 1]));
        assert_eq!("2.0".parse::<Supercell>().unwrap(), Supercell([2, 2, 2]));
    }

    #[test]
    fn supercell_errors() {
        for (s, reason) in [("a", "Could not convert"),
                            ("1.5", "noninteger"),
                            ("1,2", "not a scalar"),
                            ("", "not a scalar")]
        {
            match s.parse::<Supercell>() {
                Err(MagnetismError::IncorrectUsage(message)) => {
                    assert!(message.contains(reason), "{}", message)
                }
                _ => panic!("supercell {} should not parse", s),
            }
        }
    }

    #[test]
    fn view_from_structure() {
        let lattice =
            Lattice::new([[1., 0., 0.], [0., 1., 0.], [0., 0., 1.]]).unwrap();
        let atoms = Atoms::new(lattice,
                               vec![[0., 0., 0.], [0.5, 0.5, 0.5]],
                               vec![String::from("Fe"), String::from("O")]);
        let view = View::from_structure(&atoms, 3, Supercell([2, 1, 1]));
        assert_eq!(view.number_steps(), 3);
        assert_eq!(view.elements[2], vec!["Fe", "O"]);
        assert_eq!(view.positions[1][1], [0.5, 0.5, 0.5]);
        assert!(view.ion_arrows.is_empty());
    }
}
