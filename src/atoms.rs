use crate::utils;

/// struct for containing the information about the atoms
///
/// > lattice: Lattice - the lattice of the structure
/// > positions: Vec<[f64; 3]> - the positions of the atoms in fractional coordinates
/// > elements: Vec<String> - the element of each atom
pub struct Atoms {
    pub lattice: Lattice,
    pub positions: Vec<[f64; 3]>,
    pub elements: Vec<String>,
}

impl Atoms {
    /// initialises the structure from fractional positions
    pub fn new(lattice: Lattice,
               positions: Vec<[f64; 3]>,
               elements: Vec<String>)
               -> Self {
        Self { lattice,
               positions,
               elements }
    }

    /// initialises the structure from cartesian positions
    pub fn from_cartesian(lattice: Lattice,
                          positions: Vec<[f64; 3]>,
                          elements: Vec<String>)
                          -> Self {
        let positions = positions.into_iter()
                                 .map(|p| lattice.to_fractional(p))
                                 .collect();
        Self::new(lattice, positions, elements)
    }

    /// number of atoms in the structure
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Lattice - structure for containing information on the cell
///
/// > vectors: [[f64; 3]; 3] - the lattice vectors as rows
/// > to_fractional: [[f64; 3]; 3] - transformation matrix for converting to fractional
/// >                                coordinates
/// > volume: f64 - volume of the cell
pub struct Lattice {
    pub vectors: [[f64; 3]; 3],
    pub to_fractional: [[f64; 3]; 3],
    pub volume: f64,
}

impl Lattice {
    /// Initialises the structure from the lattice vectors, fails if the
    /// vectors do not span 3D space.
    pub fn new(vectors: [[f64; 3]; 3]) -> Result<Self, String> {
        let to_fractional = utils::invert_lattice(&vectors)?;
        let volume = utils::triple_product(vectors).abs();
        Ok(Self { vectors,
                  to_fractional,
                  volume })
    }

    /// convert a cartesian position into fractional coordinates
    pub fn to_fractional(&self, position: [f64; 3]) -> [f64; 3] {
        utils::dot(position, self.to_fractional)
    }

    /// convert fractional coordinates into a cartesian position
    pub fn to_cartesian(&self, position: [f64; 3]) -> [f64; 3] {
        utils::dot(position, self.vectors)
    }
}
