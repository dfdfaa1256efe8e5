use anchor_lang::prelude::*;

/// Source of the unix timestamp every time window is measured against.
///
/// State methods read it exactly once per call so a single instruction
/// observes one consistent `now`.
pub trait TimeSource {
    fn unix_timestamp(&self) -> Result<i64>;
}

/// Reads the `Clock` sysvar of the executing transaction.
pub struct SysvarClock;

impl TimeSource for SysvarClock {
    fn unix_timestamp(&self) -> Result<i64> {
        Ok(Clock::get()?.unix_timestamp)
    }
}

#[cfg(test)]
pub(crate) use manual::ManualClock;

#[cfg(test)]
mod manual {
    use super::*;
    use std::cell::Cell;

    /// Test clock that only moves when told to.
    pub(crate) struct ManualClock {
        now: Cell<i64>,
    }

    impl ManualClock {
        pub(crate) fn at(now: i64) -> Self {
            Self { now: Cell::new(now) }
        }

        pub(crate) fn advance(&self, seconds: i64) {
            self.now.set(self.now.get() + seconds);
        }

        pub(crate) fn now(&self) -> i64 {
            self.now.get()
        }
    }

    impl TimeSource for ManualClock {
        fn unix_timestamp(&self) -> Result<i64> {
            Ok(self.now.get())
        }
    }
}
