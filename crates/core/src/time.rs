use chrono::{DateTime, Duration, Utc};

/// Where `submitted_at` comes from when a survey is appended to the history.
///
/// `Fixed` pins every submission to one instant so stored records compare equal in tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Stamps submissions with the wall clock.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Stamps every submission with `at`.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Spaces out submissions recorded on a fixed clock. The wall clock ignores this.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// Submission instant used across the test suites (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// [`FIXED_TEST_TIMESTAMP`] as a `DateTime<Utc>`.
///
/// # Panics
///
/// Panics if the timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
