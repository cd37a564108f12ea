//! Random "since" cursors.
//!
//! A cursor is the first day of a month. Sampling picks a month uniformly
//! between a fixed epoch and the current month, both inclusive.

use chrono::{Datelike, Local};
use rand::Rng;
use std::fmt;

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a new [`YearMonth`]. `month` is clamped to `1..=12`.
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
        }
    }

    /// The current month in local time.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self::new(today.year(), today.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    fn from_ordinal(ordinal: i64) -> Self {
        let year = ordinal.div_euclid(12) as i32;
        let month = ordinal.rem_euclid(12) as u32 + 1;
        Self { year, month }
    }
}

/// A `since` query parameter, rendered as `YYYY-MM-01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinceCursor(YearMonth);

impl SinceCursor {
    pub fn month(&self) -> YearMonth {
        self.0
    }
}

impl From<YearMonth> for SinceCursor {
    fn from(value: YearMonth) -> Self {
        Self(value)
    }
}

impl fmt::Display for SinceCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-01", self.0.year, self.0.month)
    }
}

/// Sample a cursor uniformly over the months in `[epoch, now]`.
///
/// When `now` precedes `epoch` the epoch itself is returned.
pub fn random_since<R: Rng + ?Sized>(rng: &mut R, epoch: YearMonth, now: YearMonth) -> SinceCursor {
    let low = epoch.ordinal();
    let high = now.ordinal();
    if high <= low {
        return SinceCursor(epoch);
    }
    SinceCursor(YearMonth::from_ordinal(rng.random_range(low..=high)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_display_pads_month() {
        assert_eq!(SinceCursor::from(YearMonth::new(2010, 1)).to_string(), "2010-01-01");
        assert_eq!(SinceCursor::from(YearMonth::new(2023, 11)).to_string(), "2023-11-01");
    }

    #[test]
    fn test_month_is_clamped() {
        assert_eq!(YearMonth::new(2020, 0).month(), 1);
        assert_eq!(YearMonth::new(2020, 13).month(), 12);
    }

    #[test]
    fn test_samples_stay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let epoch = YearMonth::new(2010, 1);
        let now = YearMonth::new(2012, 6);
        for _ in 0..500 {
            let cursor = random_since(&mut rng, epoch, now);
            assert!(cursor.month() >= epoch);
            assert!(cursor.month() <= now);
        }
    }

    #[test]
    fn test_samples_cover_every_month() {
        let mut rng = StdRng::seed_from_u64(42);
        let epoch = YearMonth::new(2019, 11);
        let now = YearMonth::new(2020, 2);
        let seen: HashSet<_> = (0..400)
            .map(|_| random_since(&mut rng, epoch, now).to_string())
            .collect();
        let expected: HashSet<_> = ["2019-11-01", "2019-12-01", "2020-01-01", "2020-02-01"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_inverted_range_returns_epoch() {
        let mut rng = StdRng::seed_from_u64(1);
        let epoch = YearMonth::new(2015, 5);
        let cursor = random_since(&mut rng, epoch, YearMonth::new(2011, 1));
        assert_eq!(cursor.month(), epoch);
    }
}
