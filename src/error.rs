use std::fmt::{self, Debug, Display};
use std::io;

/// Provides `EpiError` and maps other errors to convert to an `EpiError`.
///
/// The two `Illegal*Input` variants are fatal configuration errors raised by
/// [`TransmissionProfile::new`](crate::transmission::TransmissionProfile::new);
/// there is no partial or degraded profile. All per-day queries are total and
/// never produce an error.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum EpiError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    /// Transmission setup rejected its inputs: the R0 regression has no real,
    /// meaningful root, required coefficients are missing, or the gamma
    /// overdispersion is absent or degenerate.
    IllegalTransmissionInput(String),
    /// The age-breakpoint and susceptibility-value lists disagree in length,
    /// or an entry failed to parse.
    IllegalSusceptibilityInput(String),
    EpiError(String),
}

impl From<io::Error> for EpiError {
    fn from(error: io::Error) -> Self {
        EpiError::IoError(error)
    }
}

impl From<serde_json::Error> for EpiError {
    fn from(error: serde_json::Error) -> Self {
        EpiError::JsonError(error)
    }
}

impl From<String> for EpiError {
    fn from(error: String) -> Self {
        EpiError::EpiError(error)
    }
}

impl From<&str> for EpiError {
    fn from(error: &str) -> Self {
        EpiError::EpiError(error.to_string())
    }
}

impl std::error::Error for EpiError {}

impl Display for EpiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Error: {self:?}")?;
        Ok(())
    }
}
