use thiserror::Error;

/// Errors raised while reading derived quantities from the local moments.
#[derive(Error, Debug)]
pub enum MagnetismError {
    /// The caller passed a malformed request, ie. steps outside of the
    /// trajectory or an unknown selection.
    #[error("{0}")]
    IncorrectUsage(String),
    /// The request is well formed but the calculation did not produce the
    /// data, ie. orbital moments without LORBMOM.
    #[error("{0}")]
    NoData(String),
    /// The raw data does not follow the expected layout.
    #[error("{0}")]
    InvalidData(String),
    /// An array could not be brought into the expected dimensionality.
    #[error("Unexpected shape of the magnetic moments: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

impl MagnetismError {
    /// Error for a step selector that does not fit the trajectory.
    pub fn steps_out_of_bounds(steps: impl std::fmt::Display) -> Self {
        Self::IncorrectUsage(format!(
            "Error reading the magnetic moments. Please check if the steps \
             `{}` are properly formatted and within the boundaries.",
            steps
        ))
    }

    /// Error for a selection that is not one of total, spin, or orbital.
    pub fn unknown_selection(selection: &str) -> Self {
        Self::IncorrectUsage(format!(
            "The selection {} is incorrect. Please check if it is spelled \
             correctly. Possible choices are total, spin, or orbital.",
            selection
        ))
    }

    /// Error for requesting orbital moments of a run without them.
    pub fn missing_orbital_moments() -> Self {
        Self::NoData(String::from(
            "There are no orbital moments in the VASP output. Please make sure \
             that you run the calculation with LORBMOM = T and LSORBIT = T.",
        ))
    }
}

/// Shorthand for results of the magnetism routines.
pub type Result<T> = std::result::Result<T, MagnetismError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_steps_out_of_bounds_names_steps() {
        let error = MagnetismError::steps_out_of_bounds("7");
        assert!(matches!(error, MagnetismError::IncorrectUsage(_)));
        assert!(error.to_string().contains("`7`"));
    }

    #[test]
    fn errors_unknown_selection_lists_choices() {
        let message = MagnetismError::unknown_selection("bogus").to_string();
        assert!(message.contains("bogus"));
        assert!(message.contains("total, spin, or orbital"));
    }

    #[test]
    fn errors_missing_orbital_moments_gives_flags() {
        let error = MagnetismError::missing_orbital_moments();
        assert!(matches!(error, MagnetismError::NoData(_)));
        assert!(error.to_string().contains("LORBMOM = T"));
        assert!(error.to_string().contains("LSORBIT = T"));
    }
}
