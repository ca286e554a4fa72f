//! Stochastic core for individual-based epidemic simulation.
//!
//! For every simulated day this crate decides which social contact contexts
//! each person participates in and with what probability disease
//! transmission occurs between an infectious and a susceptible person. It is
//! a library of three tightly coupled pieces consumed by an external
//! simulation loop:
//!
//! * A [`TransmissionProfile`] derives a population-level transmission
//!   probability (directly configured, or solved from a basic reproduction
//!   number through a fitted regression), carries an age-dependent
//!   susceptibility table, and draws per-contact infectiousness levels from
//!   a gamma distribution truncated to the unit interval.
//! * [`Person::update`] recomputes a person's presence in the contact-pool
//!   categories each day from the calendar's day-type flags, the person's
//!   own attributes, and Bernoulli draws.
//! * [`RandomTrial`] backs both with uniform draws and weighted trial
//!   primitives over independently seeded, named streams.
//!
//! Calendar data, population storage, disease progression and output writers
//! live outside the crate and are reached through the [`Calendar`],
//! [`DaysOffPolicy`] and [`Health`] traits.

pub mod calendar;
pub mod error;
pub mod hashing;
pub mod log;
pub mod parameters;
pub mod people;
pub mod random;
pub mod transmission;

pub use calendar::{Calendar, DayTypes, DaysOffPolicy, StandardDaysOff};
pub use error::EpiError;
pub use parameters::TransmissionParameters;
pub use people::{ContactPoolCategory, Health, Person, PoolPresence, MIN_ADULT_AGE};
pub use random::RandomTrial;
pub use transmission::{TransmissionProfile, TRACKED_AGES};
