//! Configuration inputs for the transmission engine.
//!
//! Parameters arrive as JSON (the same serde-based loading used for the rest
//! of a model's global configuration). Optional inputs stay `Option` so the
//! profile constructor can tell "absent" from "supplied"; the fixed
//! multipliers default to 1.0, meaning no adjustment.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::EpiError;

/// Raw configuration consumed by
/// [`TransmissionProfile::new`](crate::transmission::TransmissionProfile::new).
///
/// Either `transmission_probability` is supplied directly, or it is derived
/// from `r0` and the fitted regression coefficients `b0`, `b1`, `b2`
/// (`R0 = b0 + b1*p + b2*p^2`). A direct probability dominates R0 when both
/// are present.
#[derive(Debug, Clone, Deserialize)]
pub struct TransmissionParameters {
    /// Population-mean transmission probability; dominates `r0` if present.
    pub transmission_probability: Option<f64>,
    /// Basic reproduction number; used only if no direct probability is given.
    pub r0: Option<f64>,
    pub b0: Option<f64>,
    pub b1: Option<f64>,
    pub b2: Option<f64>,
    /// "Constant" or "Gamma"; unrecognized or absent names mean constant.
    pub transmission_probability_distribution: Option<String>,
    /// Gamma shape parameter; required when the distribution is "Gamma".
    pub transmission_probability_distribution_overdispersion: Option<f64>,
    /// Comma-separated susceptibility factors, one per age category.
    pub susceptibility_values: Option<String>,
    /// Comma-separated starting ages of the categories in
    /// `susceptibility_values`; must have the same number of entries.
    pub susceptibility_age_breakpoints: Option<String>,
    /// Relative transmission of asymptomatic cases.
    #[serde(default = "default_adjustment")]
    pub rel_transmission_asymptomatic: f64,
    /// Relative susceptibility of children versus adults.
    #[serde(default = "default_adjustment")]
    pub rel_susceptibility_children: f64,
}

fn default_adjustment() -> f64 {
    1.0
}

impl Default for TransmissionParameters {
    fn default() -> Self {
        Self {
            transmission_probability: None,
            r0: None,
            b0: None,
            b1: None,
            b2: None,
            transmission_probability_distribution: None,
            transmission_probability_distribution_overdispersion: None,
            susceptibility_values: None,
            susceptibility_age_breakpoints: None,
            rel_transmission_asymptomatic: default_adjustment(),
            rel_susceptibility_children: default_adjustment(),
        }
    }
}

impl TransmissionParameters {
    /// Loads parameters from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EpiError> {
        let file = File::open(path)?;
        let parameters = serde_json::from_reader(BufReader::new(file))?;
        Ok(parameters)
    }
}

/// Splits a comma-separated numeric list. Errors carry the offending entry so
/// configuration mistakes are reported verbatim.
pub(crate) fn parse_numeric_list(input: &str) -> Result<Vec<f64>, String> {
    input
        .split(',')
        .map(|entry| {
            let entry = entry.trim();
            entry
                .parse::<f64>()
                .map_err(|_| format!("could not parse '{entry}' as a number"))
        })
        .collect()
}
