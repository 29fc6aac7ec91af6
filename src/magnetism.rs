use crate::errors::{MagnetismError, Result};
use crate::raw::{RawMagnetism, Regime};
use crate::steps::{Selected, Steps};
use crate::view::{IonArrow, Supercell, View, VASP_BLUE};
use log::debug;
use ndarray::{s, Array2, Array3, Array4, ArrayD, ArrayViewD, Axis, Ix2, Ix3,
              Slice};
use serde::Serialize;
use std::fmt::{self, Display};
use std::str::FromStr;

/// Length in Å of the largest magnetic moment when plotted.
pub const LENGTH_MOMENTS: f64 = 1.5;
/// Moments with a norm below this are not plotted.
pub const ZERO_MOMENT: f64 = 1e-15;

/// Which contribution of the magnetic moments to read.
///
/// If VASP was run with LORBMOM = T the orbital moments are computed as well
/// and the total moment is the sum of spin and orbital moment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Total,
    Spin,
    Orbital,
}

impl FromStr for Selection {
    type Err = MagnetismError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "total" => Ok(Self::Total),
            "spin" => Ok(Self::Spin),
            "orbital" => Ok(Self::Orbital),
            _ => Err(MagnetismError::unknown_selection(s)),
        }
    }
}

impl Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Total => "total",
            Self::Spin => "spin",
            Self::Orbital => "orbital",
        };
        write!(f, "{}", name)
    }
}

/// Charges and moments of the selected steps.
///
/// The spin and orbital moments are only present if VASP computed the
/// orbital moments.
#[derive(Debug, Serialize)]
pub struct MagnetismDict {
    pub charges: ArrayD<f64>,
    pub moments: Option<ArrayD<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spin_moments: Option<ArrayD<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orbital_moments: Option<ArrayD<f64>>,
}

/// The local moments describe the charge and magnetization near an atom.
///
/// VASP projects the electronic states onto the PAW projectors of every atom
/// (LORBIT). Without spin polarization only the charges resolved by angular
/// momentum exist, collinear calculations add a scalar magnetic moment and
/// noncollinear calculations a moment vector.
///
/// Arrays are returned as [step, atom, orbital] for the charges and
/// [step, atom, orbital, direction] for noncollinear moments. Selecting a
/// single step removes the step axis.
pub struct Magnetism<'a> {
    raw: &'a RawMagnetism,
    steps: Steps,
}

impl<'a> Magnetism<'a> {
    /// Reads the last step of the raw data.
    pub fn from_data(raw: &'a RawMagnetism) -> Self {
        Self { raw,
               steps: Steps::default() }
    }

    /// Reads the given steps instead.
    pub fn steps(self, steps: Steps) -> Self {
        Self { steps, ..self }
    }

    /// Number of steps read by the other routines.
    pub fn number_steps(&self) -> Result<usize> {
        Ok(self.selected_steps()?.len())
    }

    /// The charges of the selected steps projected on atoms and orbitals.
    pub fn charges(&self) -> Result<ArrayD<f64>> {
        let selected = self.selected_steps()?;
        Ok(component(&selected, self.raw.spin_moments(), 0))
    }

    /// The charges summed over the orbitals.
    pub fn total_charges(&self) -> Result<ArrayD<f64>> {
        Ok(sum_over_orbitals(self.charges()?, false))
    }

    /// The magnetic moments of the selected steps projected on atoms and
    /// orbitals, None if the calculation is not spin polarized.
    ///
    /// The selection only matters for noncollinear calculations, collinear
    /// moments contain the spin by construction. Orbital moments fail with
    /// NoData for spin polarized runs without them.
    pub fn moments(&self, selection: Selection) -> Result<Option<ArrayD<f64>>> {
        let selected = self.selected_steps()?;
        match self.raw.regime() {
            Regime::ChargeOnly => Ok(None),
            Regime::Collinear => {
                self.check_selection_available(selection)?;
                Ok(Some(component(&selected, self.raw.spin_moments(), 1)))
            }
            Regime::Noncollinear => {
                self.check_selection_available(selection)?;
                Ok(Some(self.noncollinear_moments(&selected, selection)))
            }
        }
    }

    /// The magnetic moments summed over the orbitals.
    pub fn total_moments(&self,
                         selection: Selection)
                         -> Result<Option<ArrayD<f64>>> {
        let is_vector = self.raw.regime() == Regime::Noncollinear;
        Ok(self.moments(selection)?
               .map(|moments| sum_over_orbitals(moments, is_vector)))
    }

    /// Charges and moments in a serializable form.
    pub fn to_dict(&self) -> Result<MagnetismDict> {
        let selected = self.selected_steps()?;
        let (spin_moments, orbital_moments) = match self.raw.orbital_moments() {
            Some(orbital) => {
                (Some(directions(&selected, self.raw.spin_moments())),
                 Some(directions(&selected, orbital)))
            }
            None => (None, None),
        };
        Ok(MagnetismDict { charges: self.charges()?,
                           moments: self.moments(Selection::Total)?,
                           spin_moments,
                           orbital_moments })
    }

    /// Shows the structure with an arrow at every atom for its magnetic
    /// moment. Collinear moments point along z by convention.
    pub fn to_view(&self,
                   selection: Selection,
                   supercell: Option<Supercell>)
                   -> Result<View> {
        let structure = self.raw.structure().ok_or_else(|| {
            MagnetismError::NoData(String::from(
                "The structure is required to plot the magnetic moments. \
                 Please provide the POSCAR of the calculation.",
            ))
        })?;
        if structure.len() != self.raw.number_atoms() {
            return Err(MagnetismError::InvalidData(format!(
                "The structure contains {} atoms but the local moments are \
                 given for {} atoms.",
                structure.len(),
                self.raw.number_atoms()
            )));
        }
        let selected = self.selected_steps()?;
        let mut view = View::from_structure(structure,
                                            selected.len(),
                                            supercell.unwrap_or_default());
        if let Some(moments) = self.prepare_moments_for_plotting(selection)? {
            view.ion_arrows = vec![IonArrow { quantity: moments,
                                              label: format!("{} moments",
                                                             selection),
                                              color: String::from(VASP_BLUE),
                                              radius: 0.2 }];
        }
        Ok(view)
    }

    /// The total moments as [step, atom, direction] vectors rescaled so the
    /// largest one has the length LENGTH_MOMENTS. None if there is nothing
    /// to draw.
    pub fn prepare_moments_for_plotting(&self,
                                        selection: Selection)
                                        -> Result<Option<Array3<f64>>> {
        let selected = self.selected_steps()?;
        let moments = match self.total_moments(selection)? {
            Some(moments) => moments,
            None => return Ok(None),
        };
        let moments = match selected {
            Selected::Single(_) => moments.insert_axis(Axis(0)),
            Selected::Range(_) => moments,
        };
        let moments = if moments.ndim() == 2 {
            convert_to_3d_vector(moments.into_dimensionality::<Ix2>()?)
        } else {
            moments.into_dimensionality::<Ix3>()?
        };
        let max_length = max_length_moments(&moments);
        if max_length > ZERO_MOMENT {
            Ok(Some(moments * (LENGTH_MOMENTS / max_length)))
        } else {
            debug!("All magnetic moments vanish, nothing to plot");
            Ok(None)
        }
    }

    /// The MAGMOM line of the total moments of the selected steps.
    pub fn report(&self) -> Result<String> {
        let moments = match self.total_moments(Selection::Total)? {
            Some(moments) => moments,
            None => return Ok(String::from("not spin polarized")),
        };
        let to_string = |values: ArrayViewD<f64>| {
            values.iter()
                  .map(|moment| format!("{:.2}", moment))
                  .collect::<Vec<String>>()
                  .join(" ")
        };
        let body = if moments.ndim() == 1 {
            to_string(moments.view())
        } else {
            moments.outer_iter()
                   .map(to_string)
                   .collect::<Vec<String>>()
                   .join(" \\\n         ")
        };
        Ok(format!("MAGMOM = {}", body))
    }

    fn selected_steps(&self) -> Result<Selected> {
        let selected = self.steps.select(self.raw.number_steps())?;
        debug!("Steps {} select {:?}", self.steps, selected);
        Ok(selected)
    }

    fn check_selection_available(&self, selection: Selection) -> Result<()> {
        match (selection, self.raw.orbital_moments()) {
            (Selection::Orbital, None) => {
                Err(MagnetismError::missing_orbital_moments())
            }
            _ => Ok(()),
        }
    }

    fn noncollinear_moments(&self,
                            selected: &Selected,
                            selection: Selection)
                            -> ArrayD<f64> {
        let spin = directions(selected, self.raw.spin_moments());
        let orbital = match self.raw.orbital_moments() {
            Some(orbital) => directions(selected, orbital),
            None => ArrayD::zeros(spin.raw_dim()),
        };
        match selection {
            Selection::Orbital => orbital,
            Selection::Spin => spin,
            Selection::Total => spin + orbital,
        }
    }
}

/// Writes the report, or the reason why it could not be generated.
impl Display for Magnetism<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.report() {
            Ok(report) => write!(f, "{}", report),
            Err(e) => write!(f, "{}", e),
        }
    }
}

/// A single component of the selected steps.
fn component(selected: &Selected,
             array: &Array4<f64>,
             index: usize)
             -> ArrayD<f64> {
    selected.view(array)
            .index_axis_move(selected.first_inner_axis(), index)
            .to_owned()
}

/// All but the charge component of the selected steps. The components
/// become the last axis.
fn directions(selected: &Selected, array: &Array4<f64>) -> ArrayD<f64> {
    let axis = selected.first_inner_axis();
    let mut moments = selected.view(array);
    moments.slice_axis_inplace(axis, Slice::from(1..));
    move_axis_to_last(moments, axis)
}

fn move_axis_to_last(array: ArrayViewD<f64>, axis: Axis) -> ArrayD<f64> {
    let mut order = (0..array.ndim()).filter(|i| *i != axis.index())
                                     .collect::<Vec<usize>>();
    order.push(axis.index());
    array.permuted_axes(order).as_standard_layout().into_owned()
}

/// Vector quantities keep the direction as the last axis so the orbitals
/// are the second to last.
fn sum_over_orbitals(quantity: ArrayD<f64>, is_vector: bool) -> ArrayD<f64> {
    let last = quantity.ndim() - 1;
    let axis = if is_vector { last - 1 } else { last };
    quantity.sum_axis(Axis(axis))
}

/// Collinear moments are drawn along the z axis.
fn convert_to_3d_vector(moments: Array2<f64>) -> Array3<f64> {
    let (steps, atoms) = moments.dim();
    let mut vectors = Array3::zeros((steps, atoms, 3));
    vectors.slice_mut(s![.., .., 2]).assign(&moments);
    vectors
}

fn max_length_moments(moments: &Array3<f64>) -> f64 {
    moments.map_axis(Axis(2), |vector| vector.dot(&vector).sqrt())
           .fold(0f64, |max, length| max.max(*length))
}
