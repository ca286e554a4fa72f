//! Day-type policy: which obligations (work, school, college) are suspended
//! today, and whether a soft lockdown is in force.
//!
//! Calendar data itself (weekends, public holidays, closures) lives outside
//! this crate; it is reached through the [`Calendar`] trait. The scheduler
//! queries a [`DaysOffPolicy`] once per simulated day and hands the cached
//! [`DayTypes`] snapshot to every person update.

/// Boolean day-type queries supplied to the daily presence update. All
/// queries are pure; implementations must answer consistently for the
/// duration of a simulated day.
pub trait DaysOffPolicy {
    /// Is today a day off from work?
    fn is_work_off(&self) -> bool;

    /// Is today a day off from K-12 school?
    fn is_school_off(&self) -> bool;

    /// Is today a day off from college?
    fn is_college_off(&self) -> bool;

    /// Is a soft lockdown in force today?
    fn is_soft_lockdown(&self) -> bool;
}

/// One day's worth of day-type flags, queried once and cached for the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTypes {
    pub work_off: bool,
    pub school_off: bool,
    pub college_off: bool,
    pub soft_lockdown: bool,
}

impl DayTypes {
    /// Queries each policy flag exactly once for today's snapshot.
    pub fn for_today(policy: &impl DaysOffPolicy) -> Self {
        Self {
            work_off: policy.is_work_off(),
            school_off: policy.is_school_off(),
            college_off: policy.is_college_off(),
            soft_lockdown: policy.is_soft_lockdown(),
        }
    }
}

/// Calendar facts the standard days-off policy composes. Provided by an
/// external calendar/holiday service.
pub trait Calendar {
    fn is_weekend(&self) -> bool;
    fn is_public_holiday(&self) -> bool;
    fn is_k12_school_closed(&self) -> bool;
    fn is_college_closed(&self) -> bool;
    fn is_soft_lockdown(&self) -> bool;
}

/// Standard situation for days off from work and school: weekends and public
/// holidays suspend everything, school and college closures suspend only
/// their own pool.
pub struct StandardDaysOff<C> {
    calendar: C,
}

impl<C: Calendar> StandardDaysOff<C> {
    pub fn new(calendar: C) -> Self {
        Self { calendar }
    }
}

impl<C: Calendar> DaysOffPolicy for StandardDaysOff<C> {
    fn is_work_off(&self) -> bool {
        self.calendar.is_weekend() || self.calendar.is_public_holiday()
    }

    fn is_school_off(&self) -> bool {
        self.calendar.is_weekend()
            || self.calendar.is_public_holiday()
            || self.calendar.is_k12_school_closed()
    }

    fn is_college_off(&self) -> bool {
        self.calendar.is_weekend()
            || self.calendar.is_public_holiday()
            || self.calendar.is_college_closed()
    }

    fn is_soft_lockdown(&self) -> bool {
        self.calendar.is_soft_lockdown()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Default)]
    struct StubCalendar {
        weekend: bool,
        public_holiday: bool,
        k12_school_closed: bool,
        college_closed: bool,
        soft_lockdown: bool,
    }

    impl Calendar for StubCalendar {
        fn is_weekend(&self) -> bool {
            self.weekend
        }
        fn is_public_holiday(&self) -> bool {
            self.public_holiday
        }
        fn is_k12_school_closed(&self) -> bool {
            self.k12_school_closed
        }
        fn is_college_closed(&self) -> bool {
            self.college_closed
        }
        fn is_soft_lockdown(&self) -> bool {
            self.soft_lockdown
        }
    }

    #[test]
    fn regular_weekday_has_nothing_off() {
        let policy = StandardDaysOff::new(StubCalendar::default());
        let day = DayTypes::for_today(&policy);
        assert!(!day.work_off);
        assert!(!day.school_off);
        assert!(!day.college_off);
        assert!(!day.soft_lockdown);
    }

    #[test]
    fn weekend_suspends_work_and_school() {
        let policy = StandardDaysOff::new(StubCalendar {
            weekend: true,
            ..StubCalendar::default()
        });
        let day = DayTypes::for_today(&policy);
        assert!(day.work_off);
        assert!(day.school_off);
        assert!(day.college_off);
    }

    #[test]
    fn public_holiday_suspends_work_and_school() {
        let policy = StandardDaysOff::new(StubCalendar {
            public_holiday: true,
            ..StubCalendar::default()
        });
        let day = DayTypes::for_today(&policy);
        assert!(day.work_off);
        assert!(day.school_off);
        assert!(day.college_off);
    }

    #[test]
    fn school_closure_suspends_only_school() {
        let policy = StandardDaysOff::new(StubCalendar {
            k12_school_closed: true,
            ..StubCalendar::default()
        });
        let day = DayTypes::for_today(&policy);
        assert!(!day.work_off);
        assert!(day.school_off);
        assert!(!day.college_off);
    }

    #[test]
    fn college_closure_suspends_only_college() {
        let policy = StandardDaysOff::new(StubCalendar {
            college_closed: true,
            ..StubCalendar::default()
        });
        let day = DayTypes::for_today(&policy);
        assert!(!day.work_off);
        assert!(!day.school_off);
        assert!(day.college_off);
    }

    #[test]
    fn soft_lockdown_passes_through() {
        let policy = StandardDaysOff::new(StubCalendar {
            soft_lockdown: true,
            ..StubCalendar::default()
        });
        let day = DayTypes::for_today(&policy);
        assert!(day.soft_lockdown);
        assert!(!day.work_off);
    }
}
