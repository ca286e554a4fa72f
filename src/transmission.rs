//! Transmission probability from disease data.
//!
//! A [`TransmissionProfile`] is built once per simulation run from
//! [`TransmissionParameters`] and is immutable afterwards; all queries take
//! `&self` and are safe for unsynchronized concurrent reads from worker
//! threads. Configuration problems (no meaningful root for the R0
//! regression, mismatched susceptibility lists, a missing or degenerate
//! overdispersion) are fatal at construction; the per-day queries are total.

use log::{debug, trace};
use statrs::distribution::{ContinuousCDF, Gamma};

use rand::Rng;

use crate::error::EpiError;
use crate::parameters::{parse_numeric_list, TransmissionParameters};
use crate::people::{Health, Person, MIN_ADULT_AGE};
use crate::random::RandomTrial;

/// Number of integer ages the susceptibility table tracks; lookups for older
/// ages clamp to the last entry.
pub const TRACKED_AGES: usize = 100;

/// How an individual infectiousness level is drawn from the population mean.
#[derive(Debug, Clone)]
enum InfectiousnessDistribution {
    /// Every individual gets the population-mean probability.
    Constant,
    /// Individual draws follow the gamma distribution truncated and
    /// renormalized to the unit interval. The distribution and its CDF at
    /// the truncation bounds are fixed at construction.
    TruncatedGamma {
        gamma: Gamma,
        cdf_at_zero: f64,
        cdf_at_one: f64,
    },
}

/// Transmission probability engine: population-mean probability (direct or
/// derived from R0), age-dependent susceptibility, and the per-contact
/// infectiousness draw.
#[derive(Debug, Clone)]
pub struct TransmissionProfile {
    transmission_probability: f64,
    infectiousness: InfectiousnessDistribution,
    susceptibility_by_age: Vec<f64>,
    rel_transmission_asymptomatic: f64,
    rel_susceptibility_children: f64,
}

impl TransmissionProfile {
    /// Builds a profile from configuration. Fails with
    /// [`EpiError::IllegalTransmissionInput`] or
    /// [`EpiError::IllegalSusceptibilityInput`] on invalid inputs; there is
    /// no partially initialized profile.
    pub fn new(parameters: &TransmissionParameters) -> Result<Self, EpiError> {
        trace!("initializing transmission profile");

        // A directly supplied mean transmission probability dominates R0.
        let transmission_probability = match parameters.transmission_probability {
            Some(probability) => probability,
            None => {
                let r0 = parameters.r0.unwrap_or(0.0);
                let (b0, b1, b2) = match (parameters.b0, parameters.b1, parameters.b2) {
                    (Some(b0), Some(b1), Some(b2)) => (b0, b1, b2),
                    _ => {
                        return Err(EpiError::IllegalTransmissionInput(
                            "deriving the transmission probability from r0 requires the \
                             regression coefficients b0, b1 and b2"
                                .to_string(),
                        ))
                    }
                };
                mean_probability_from_r0(r0, b0, b1, b2)?
            }
        };
        debug!("mean transmission probability {transmission_probability}");

        let infectiousness =
            match parameters.transmission_probability_distribution.as_deref() {
                Some("Gamma") => {
                    let overdispersion = parameters
                        .transmission_probability_distribution_overdispersion
                        .ok_or_else(|| {
                            EpiError::IllegalTransmissionInput(
                                "gamma-distributed infectiousness requires an overdispersion \
                                 parameter"
                                    .to_string(),
                            )
                        })?;
                    // A zero shape divides by zero in the scale; reject it
                    // here instead of at draw time.
                    if overdispersion <= 0.0 || !overdispersion.is_finite() {
                        return Err(EpiError::IllegalTransmissionInput(format!(
                            "overdispersion must be positive and finite, got {overdispersion}"
                        )));
                    }

                    if transmission_probability > 0.0 {
                        let shape = overdispersion;
                        let scale = transmission_probability / shape;
                        let gamma = Gamma::new(shape, 1.0 / scale).map_err(|e| {
                            EpiError::IllegalTransmissionInput(format!(
                                "invalid gamma parameters: {e}"
                            ))
                        })?;
                        InfectiousnessDistribution::TruncatedGamma {
                            cdf_at_zero: gamma.cdf(0.0),
                            cdf_at_one: gamma.cdf(1.0),
                            gamma,
                        }
                    } else {
                        // A zero mean short-circuits every draw, so there is
                        // no distribution to construct.
                        InfectiousnessDistribution::Constant
                    }
                }
                // "Constant", unrecognized or absent names all mean a
                // constant individual probability.
                _ => InfectiousnessDistribution::Constant,
            };

        let susceptibility_by_age = match (
            &parameters.susceptibility_values,
            &parameters.susceptibility_age_breakpoints,
        ) {
            (Some(values), Some(breakpoints)) => build_susceptibility_table(values, breakpoints)?,
            // No adjustment by age.
            _ => vec![1.0; TRACKED_AGES],
        };

        Ok(Self {
            transmission_probability,
            infectiousness,
            susceptibility_by_age,
            rel_transmission_asymptomatic: parameters.rel_transmission_asymptomatic,
            rel_susceptibility_children: parameters.rel_susceptibility_children,
        })
    }

    /// Returns the population-mean transmission probability.
    pub fn homogeneous_probability(&self) -> f64 {
        self.transmission_probability
    }

    /// Returns the arithmetic mean of the age-specific susceptibility
    /// factors; used for aggregate reporting, not per-person decisions.
    pub fn susceptibility_factor(&self) -> f64 {
        self.susceptibility_by_age.iter().sum::<f64>() / self.susceptibility_by_age.len() as f64
    }

    /// Returns the age-specific susceptibility factor, clamping ages beyond
    /// the table to its last entry.
    pub fn individual_susceptibility(&self, age: u32) -> f64 {
        let index = (age as usize).min(self.susceptibility_by_age.len() - 1);
        self.susceptibility_by_age[index]
    }

    /// Returns the pairwise transmission probability for a contact between
    /// an infectious and a susceptible person. Pure composition of
    /// per-person attributes; consumes no randomness.
    pub fn probability<HI: Health, HS: Health>(
        &self,
        infector: &Person<HI>,
        susceptible: &Person<HS>,
    ) -> f64 {
        let infectiousness = infector.health().relative_infectiousness();

        let asymptomatic_adjustment = if infector.health().is_symptomatic() {
            1.0
        } else {
            self.rel_transmission_asymptomatic
        };

        let child_adjustment = if susceptible.age() < MIN_ADULT_AGE {
            self.rel_susceptibility_children
        } else {
            1.0
        };

        infectiousness
            * asymptomatic_adjustment
            * child_adjustment
            * susceptible.health().relative_susceptibility()
    }

    /// Draws one individual infectiousness level.
    ///
    /// A zero mean probability returns 0 without consuming a draw; the
    /// constant distribution returns the mean unchanged; the gamma
    /// distribution consumes exactly one uniform draw `u` and inverts the
    /// CDF at `cdf(0) + u * (cdf(1) - cdf(0))`, which samples the gamma
    /// truncated and renormalized to [0, 1].
    pub fn individual_infectiousness<R: Rng>(&self, trial: &mut RandomTrial<R>) -> f64 {
        if self.transmission_probability == 0.0 {
            return 0.0;
        }

        match &self.infectiousness {
            InfectiousnessDistribution::Constant => self.transmission_probability,
            InfectiousnessDistribution::TruncatedGamma {
                gamma,
                cdf_at_zero,
                cdf_at_one,
            } => {
                let u = trial.draw();
                gamma.inverse_cdf(cdf_at_zero + u * (cdf_at_one - cdf_at_zero))
            }
        }
    }
}

/// Solves `r0 = b0 + b1*p + b2*p^2` for the mean transmission probability.
fn mean_probability_from_r0(r0: f64, b0: f64, b1: f64, b2: f64) -> Result<f64, EpiError> {
    // Linear fit.
    if b2 == 0.0 {
        return Ok((r0 - b0) / b1);
    }

    // Quadratic fit; only an r0 below the parabola's extremum yields a real,
    // meaningful root.
    let a = b2;
    let b = b1;
    let c = b0 - r0;

    if r0 < -(b * b) / (4.0 * a) {
        let discriminant = b * b - 4.0 * a * c;
        Ok((-b + discriminant.sqrt()) / (2.0 * a))
    } else {
        Err(EpiError::IllegalTransmissionInput(format!(
            "no real root relates r0 = {r0} to a mean transmission probability under the \
             fitted quadratic model"
        )))
    }
}

/// Fills the piecewise susceptibility table: each breakpoint's value applies
/// from that age (inclusive) up to the next breakpoint (exclusive); the last
/// value extends to the end of the table.
fn build_susceptibility_table(values: &str, breakpoints: &str) -> Result<Vec<f64>, EpiError> {
    let values = parse_numeric_list(values).map_err(EpiError::IllegalSusceptibilityInput)?;
    let breakpoints = parse_numeric_list(breakpoints).map_err(EpiError::IllegalSusceptibilityInput)?;

    if values.len() != breakpoints.len() {
        return Err(EpiError::IllegalSusceptibilityInput(format!(
            "{} susceptibility values for {} age breakpoints; the lists must have equal length",
            values.len(),
            breakpoints.len()
        )));
    }

    let mut table = vec![1.0; TRACKED_AGES];
    for (index, value) in values.iter().enumerate() {
        let age_min = (breakpoints[index] as usize).min(table.len());
        let age_max = if index == breakpoints.len() - 1 {
            table.len()
        } else {
            (breakpoints[index + 1] as usize).min(table.len())
        };

        if age_min < age_max {
            for entry in &mut table[age_min..age_max] {
                *entry = *value;
            }
        }
    }
    Ok(table)
}
