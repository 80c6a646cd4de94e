//! Ride counts per hour of day.

use serde::Serialize;

use dashboard_core::models::{Ride, HOURS_PER_DAY};

/// Number of rides starting in each hour, index 0 = midnight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HourHistogram {
    counts: [u64; HOURS_PER_DAY],
}

impl HourHistogram {
    /// Count `rides` by their `hour` field.
    ///
    /// Rides are validated at load time, so every hour is in range; an
    /// out-of-range hour is ignored rather than panicking.
    pub fn from_rides<'a>(rides: impl IntoIterator<Item = &'a Ride>) -> Self {
        let mut counts = [0u64; HOURS_PER_DAY];
        for ride in rides {
            if let Some(slot) = counts.get_mut(usize::from(ride.hour)) {
                *slot += 1;
            }
        }
        Self { counts }
    }

    /// Count for one hour; `0` for hours outside the day.
    pub fn count(&self, hour: u8) -> u64 {
        self.counts.get(usize::from(hour)).copied().unwrap_or(0)
    }

    /// All 24 counters.
    pub fn counts(&self) -> &[u64; HOURS_PER_DAY] {
        &self.counts
    }

    /// `(hour, count)` for every hour with at least one ride, by hour.
    pub fn bars(&self) -> Vec<(u8, u64)> {
        (0u8..)
            .zip(self.counts.iter().copied())
            .filter(|&(_, c)| c > 0)
            .collect()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Top of the y axis: the tallest bar plus a quarter, never below 1.
    pub fn axis_max(&self) -> u64 {
        let max = self.max_count();
        (max + max / 4).max(1)
    }

    /// The hour with the most rides, earliest hour on ties.
    pub fn peak_hour(&self) -> Option<u8> {
        let max = self.max_count();
        if max == 0 {
            return None;
        }
        (0u8..)
            .zip(self.counts.iter())
            .find(|&(_, &c)| c == max)
            .map(|(h, _)| h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ride_at(hour: u8) -> Ride {
        Ride {
            year: 2019,
            month: 6,
            hour,
            begin_address: String::new(),
            lat_begin: -3.74,
            lng_begin: -38.49,
            pedido: String::new(),
        }
    }

    fn histogram(hours: &[u8]) -> HourHistogram {
        let rides: Vec<Ride> = hours.iter().map(|&h| ride_at(h)).collect();
        HourHistogram::from_rides(&rides)
    }

    #[test]
    fn test_counts_by_hour() {
        let h = histogram(&[8, 8, 8, 18, 18, 23]);
        assert_eq!(h.count(8), 3);
        assert_eq!(h.count(18), 2);
        assert_eq!(h.count(23), 1);
        assert_eq!(h.count(0), 0);
        assert_eq!(h.total(), 6);
    }

    #[test]
    fn test_bars_only_nonzero_hours_in_order() {
        let h = histogram(&[23, 8, 18, 8]);
        assert_eq!(h.bars(), vec![(8, 2), (18, 1), (23, 1)]);
    }

    #[test]
    fn test_axis_max_has_quarter_headroom() {
        let h = histogram(&[7; 8]);
        assert_eq!(h.max_count(), 8);
        assert_eq!(h.axis_max(), 10);
    }

    #[test]
    fn test_axis_max_integer_division() {
        // 3 + 3/4 = 3 with integer arithmetic.
        let h = histogram(&[7, 7, 7]);
        assert_eq!(h.axis_max(), 3);
    }

    #[test]
    fn test_empty_histogram() {
        let h = HourHistogram::from_rides(Vec::<Ride>::new().iter());
        assert_eq!(h.total(), 0);
        assert!(h.bars().is_empty());
        assert_eq!(h.max_count(), 0);
        assert_eq!(h.axis_max(), 1);
        assert_eq!(h.peak_hour(), None);
    }

    #[test]
    fn test_out_of_range_hour_ignored() {
        let h = histogram(&[5, 30]);
        assert_eq!(h.total(), 1);
        assert_eq!(h.count(30), 0);
    }

    #[test]
    fn test_peak_hour_earliest_on_tie() {
        let h = histogram(&[9, 17, 17, 9, 12]);
        assert_eq!(h.peak_hour(), Some(9));
    }
}
