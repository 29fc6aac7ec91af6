use crate::errors::{MagnetismError, Result};
use ndarray::{Array1, Array4, ArrayViewD, Axis, Slice};
use std::fmt::{self, Display};
use std::ops::Range;
use std::str::FromStr;

/// The steps of the trajectory a routine should read.
///
/// Indices follow the Python convention, negative values count from the end
/// of the trajectory and the bounds of a slice are clamped to the available
/// steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Steps {
    /// A single step.
    Single(isize),
    /// The steps from start up to (not including) stop.
    Slice(Option<isize>, Option<isize>),
}

/// The last step of the trajectory.
impl Default for Steps {
    fn default() -> Self {
        Self::Single(-1)
    }
}

impl Steps {
    /// Every step of the trajectory.
    pub fn all() -> Self {
        Self::Slice(None, None)
    }

    /// Resolves the steps against a trajectory of the given length.
    ///
    /// A single step is probed on a zero array of the trajectory length, any
    /// failure of that lookup is reported as incorrect usage.
    pub fn select(&self, length: usize) -> Result<Selected> {
        match *self {
            Self::Single(index) => {
                let probe = Array1::<f64>::zeros(length);
                let position = if index < 0 {
                    length as isize + index
                } else {
                    index
                };
                usize::try_from(position).ok()
                                         .filter(|p| probe.get(*p).is_some())
                                         .map(Selected::Single)
                                         .ok_or_else(|| {
                                             MagnetismError::steps_out_of_bounds(self)
                                         })
            }
            Self::Slice(start, stop) => {
                let start = clamp(start, length, 0);
                let stop = clamp(stop, length, length).max(start);
                Ok(Selected::Range(start..stop))
            }
        }
    }
}

/// Converts a possibly negative slice bound into an index within 0..=length.
fn clamp(bound: Option<isize>, length: usize, default: usize) -> usize {
    match bound {
        None => default,
        Some(b) if b < 0 => (length as isize + b).max(0) as usize,
        Some(b) => (b as usize).min(length),
    }
}

impl Display for Steps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |b: Option<isize>| b.map(|b| b.to_string()).unwrap_or_default();
        match self {
            Self::Single(index) => write!(f, "{}", index),
            Self::Slice(start, stop) => {
                write!(f, "{}:{}", bound(*start), bound(*stop))
            }
        }
    }
}

impl FromStr for Steps {
    type Err = MagnetismError;

    /// Reads "3", "-1", "0:3", ":" or "2:".
    fn from_str(s: &str) -> Result<Self> {
        let error = || {
            MagnetismError::IncorrectUsage(format!(
                "Could not interpret the steps `{}`. Please pass a single index \
                 like `-1` or a slice like `0:3`.",
                s
            ))
        };
        let bound = |b: &str| -> Result<Option<isize>> {
            match b.trim() {
                "" => Ok(None),
                b => b.parse::<isize>().map(Some).map_err(|_| error()),
            }
        };
        match s.trim().split_once(':') {
            Some((start, stop)) => Ok(Self::Slice(bound(start)?, bound(stop)?)),
            None => match bound(s)? {
                Some(index) => Ok(Self::Single(index)),
                None => Err(error()),
            },
        }
    }
}

/// Steps resolved against a trajectory. The variant records whether the
/// step axis survives when an array is indexed with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selected {
    /// One step, the step axis is removed.
    Single(usize),
    /// A range of steps, the step axis is kept.
    Range(Range<usize>),
}

impl Selected {
    /// Number of selected steps.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Range(range) => range.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The axis directly following the steps after the selection is applied.
    pub fn first_inner_axis(&self) -> Axis {
        match self {
            Self::Single(_) => Axis(0),
            Self::Range(_) => Axis(1),
        }
    }

    /// Applies the selection to the leading axis of the array.
    pub fn view<'a>(&self, array: &'a Array4<f64>) -> ArrayViewD<'a, f64> {
        match self {
            Self::Single(index) => array.index_axis(Axis(0), *index).into_dyn(),
            Self::Range(range) => array.slice_axis(Axis(0),
                                                   Slice::from(range.clone()))
                                       .into_dyn(),
        }
    }
}
