//! People and their daily contact-pool presence.
//!
//! Once per simulated day the scheduler calls [`Person::update`] for every
//! person: the disease course advances one day, then pool membership is
//! recomputed from scratch out of today's [`DayTypes`] flags, the person's
//! own attributes, and at most two Bernoulli draws. No presence state
//! carries over from the previous day.

use rand::Rng;

use crate::calendar::DayTypes;
use crate::random::RandomTrial;

/// Oldest age at which someone still counts as a minor for school
/// attendance.
pub const MIN_ADULT_AGE: u32 = 18;

/// Symptomatic people stay home from school and work with this probability
/// (10% chance of still going).
const STAY_HOME_PROBABILITY: f64 = 0.9;

/// Symptomatic people drop their community contacts with this probability
/// (20% chance of still having them).
const DROP_COMMUNITY_PROBABILITY: f64 = 0.8;

/// The closed set of contact-pool categories a person can be present in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactPoolCategory {
    K12School,
    College,
    Workplace,
    PrimaryCommunity,
    SecondaryCommunity,
}

impl ContactPoolCategory {
    pub const ALL: [ContactPoolCategory; 5] = [
        ContactPoolCategory::K12School,
        ContactPoolCategory::College,
        ContactPoolCategory::Workplace,
        ContactPoolCategory::PrimaryCommunity,
        ContactPoolCategory::SecondaryCommunity,
    ];
}

/// Per-category presence flags, stored as a fixed table indexed by
/// [`ContactPoolCategory`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolPresence {
    present: [bool; ContactPoolCategory::ALL.len()],
}

impl std::ops::Index<ContactPoolCategory> for PoolPresence {
    type Output = bool;

    fn index(&self, category: ContactPoolCategory) -> &bool {
        &self.present[category as usize]
    }
}

impl std::ops::IndexMut<ContactPoolCategory> for PoolPresence {
    fn index_mut(&mut self, category: ContactPoolCategory) -> &mut bool {
        &mut self.present[category as usize]
    }
}

/// A person's disease-health state, owned by an external health module. The
/// presence update advances it one day and reads the post-advance
/// symptomatic status; the transmission engine reads the relative
/// infectiousness and susceptibility when composing pairwise probabilities.
pub trait Health {
    /// Advances the disease course by one simulated day.
    fn advance(&mut self);

    fn is_symptomatic(&self) -> bool;

    /// Individual infectiousness level relative to the population mean.
    fn relative_infectiousness(&self) -> f64;

    /// Individual susceptibility relative to the population mean.
    fn relative_susceptibility(&self) -> f64;
}

/// One tracked individual: fixed attributes, a disease course, and today's
/// contact-pool presence.
pub struct Person<H> {
    age: u32,
    teleworking: bool,
    health: H,
    in_pools: PoolPresence,
}

impl<H: Health> Person<H> {
    pub fn new(age: u32, teleworking: bool, health: H) -> Self {
        Self {
            age,
            teleworking,
            health,
            in_pools: PoolPresence::default(),
        }
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn is_teleworking(&self) -> bool {
        self.teleworking
    }

    pub fn set_teleworking(&mut self, teleworking: bool) {
        self.teleworking = teleworking;
    }

    pub fn health(&self) -> &H {
        &self.health
    }

    pub fn health_mut(&mut self) -> &mut H {
        &mut self.health
    }

    pub fn is_in_pool(&self, category: ContactPoolCategory) -> bool {
        self.in_pools[category]
    }

    pub fn pool_presence(&self) -> &PoolPresence {
        &self.in_pools
    }

    /// Runs one simulated day for this person: advance the disease course,
    /// then recompute pool presence from today's inputs.
    ///
    /// The two adaptive trials consume draws in a fixed order, school/work
    /// first and community second; reproducibility of a run depends on it.
    pub fn update<R: Rng>(
        &mut self,
        day: &DayTypes,
        adaptive_symptomatic_behavior: bool,
        trial: &mut RandomTrial<R>,
    ) {
        use ContactPoolCategory::*;

        // The adaptive branch below reads today's symptomatic status, so the
        // disease course must advance before presence is computed.
        self.health.advance();

        // Presence baseline by type of day.
        if day.work_off || (self.age <= MIN_ADULT_AGE && day.school_off) {
            self.in_pools[K12School] = false;
            self.in_pools[College] = false;
            self.in_pools[Workplace] = false;
            self.in_pools[PrimaryCommunity] = true;
            self.in_pools[SecondaryCommunity] = false;
        } else {
            self.in_pools[K12School] = true;
            self.in_pools[College] = true;
            self.in_pools[Workplace] = true;
            self.in_pools[PrimaryCommunity] = false;
            self.in_pools[SecondaryCommunity] = true;
        }

        // Symptomatic people mostly keep to themselves.
        if self.health.is_symptomatic() && adaptive_symptomatic_behavior {
            // 10% chance of still going to school or work.
            if trial.bernoulli(STAY_HOME_PROBABILITY) {
                self.in_pools[K12School] = false;
                self.in_pools[College] = false;
                self.in_pools[Workplace] = false;
            }

            // 20% chance of still having community contacts.
            if trial.bernoulli(DROP_COMMUNITY_PROBABILITY) {
                self.in_pools[PrimaryCommunity] = false;
                self.in_pools[SecondaryCommunity] = false;
            }
        }

        // Soft lockdown closes schools outright; workplaces only for those
        // who can telework.
        if day.soft_lockdown {
            self.in_pools[K12School] = false;
            self.in_pools[College] = false;

            if self.teleworking {
                self.in_pools[Workplace] = false;
            }
        }
    }
}
