//! Data model for the ride dashboard.
//!
//! A [`Ride`] is one row of the source CSV. A [`Selection`] is the state of
//! the year and month pickers; every view is a pure function of the loaded
//! rides and the current selection.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Number of hour buckets in a day.
pub const HOURS_PER_DAY: usize = 24;

/// Month numbers offered by the month picker.
pub const MONTHS: std::ops::RangeInclusive<u8> = 1..=12;

// ── Ride ──────────────────────────────────────────────────────────────────────

/// A single ride record.
///
/// Field names on the wire follow the CSV headers exactly; unknown columns
/// are ignored by the reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    #[serde(rename = "Year")]
    pub year: u16,
    #[serde(rename = "Month")]
    pub month: u8,
    #[serde(rename = "Hour")]
    pub hour: u8,
    /// Pickup address as free text.
    #[serde(rename = "BeginAddress", default)]
    pub begin_address: String,
    #[serde(rename = "LatBegin")]
    pub lat_begin: f64,
    #[serde(rename = "LngBegin")]
    pub lng_begin: f64,
    /// Ride identifier.
    #[serde(rename = "pedido", default)]
    pub pedido: String,
}

impl Ride {
    /// Reject records whose month, hour or coordinates cannot be plotted.
    pub fn validate(&self) -> Result<()> {
        if !MONTHS.contains(&self.month) {
            return Err(DashboardError::InvalidRecord(format!(
                "month {} out of range 1-12",
                self.month
            )));
        }
        if usize::from(self.hour) >= HOURS_PER_DAY {
            return Err(DashboardError::InvalidRecord(format!(
                "hour {} out of range 0-23",
                self.hour
            )));
        }
        if !self.lat_begin.is_finite() || !self.lng_begin.is_finite() {
            return Err(DashboardError::InvalidRecord(format!(
                "non-finite coordinates ({}, {})",
                self.lat_begin, self.lng_begin
            )));
        }
        if !(-90.0..=90.0).contains(&self.lat_begin) || !(-180.0..=180.0).contains(&self.lng_begin)
        {
            return Err(DashboardError::InvalidRecord(format!(
                "coordinates ({}, {}) outside the globe",
                self.lat_begin, self.lng_begin
            )));
        }
        Ok(())
    }

    /// Label shown for this ride's point on the map.
    pub fn hover_text(&self) -> String {
        format!("End: {} | Data: {}", self.begin_address, self.pedido)
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// Current state of the year and month pickers.
///
/// An empty set means "no constraint" on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub years: BTreeSet<u16>,
    pub months: BTreeSet<u8>,
}

impl Selection {
    pub fn new(
        years: impl IntoIterator<Item = u16>,
        months: impl IntoIterator<Item = u8>,
    ) -> Self {
        Self {
            years: years.into_iter().collect(),
            months: months.into_iter().collect(),
        }
    }

    /// A selection that matches every ride.
    pub fn all() -> Self {
        Self::default()
    }

    /// `true` when neither picker constrains the result.
    pub fn is_unfiltered(&self) -> bool {
        self.years.is_empty() && self.months.is_empty()
    }

    /// Add `year` if absent, remove it otherwise.
    pub fn toggle_year(&mut self, year: u16) {
        if !self.years.remove(&year) {
            self.years.insert(year);
        }
    }

    /// Add `month` if absent, remove it otherwise.
    pub fn toggle_month(&mut self, month: u8) {
        if !self.months.remove(&month) {
            self.months.insert(month);
        }
    }

    pub fn clear(&mut self) {
        self.years.clear();
        self.months.clear();
    }

    /// Whether `ride` passes this selection.
    ///
    /// A dimension with an empty set accepts every value, so the four cases
    /// (nothing selected, only months, only years, both) reduce to one rule.
    pub fn matches(&self, ride: &Ride) -> bool {
        (self.years.is_empty() || self.years.contains(&ride.year))
            && (self.months.is_empty() || self.months.contains(&ride.month))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ride(year: u16, month: u8, hour: u8) -> Ride {
        Ride {
            year,
            month,
            hour,
            begin_address: "Av. Beira Mar, 100".to_string(),
            lat_begin: -3.72,
            lng_begin: -38.50,
            pedido: "2019-06-01 08:15".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_ride() {
        assert!(ride(2019, 6, 8).validate().is_ok());
        assert!(ride(2019, 1, 0).validate().is_ok());
        assert!(ride(2019, 12, 23).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_month_out_of_range() {
        let err = ride(2019, 13, 8).validate().unwrap_err();
        assert!(err.to_string().contains("month 13"));
        assert!(ride(2019, 0, 8).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_hour_out_of_range() {
        let err = ride(2019, 6, 24).validate().unwrap_err();
        assert!(err.to_string().contains("hour 24"));
    }

    #[test]
    fn test_validate_rejects_bad_coordinates() {
        let mut r = ride(2019, 6, 8);
        r.lat_begin = f64::NAN;
        assert!(r.validate().is_err());

        let mut r = ride(2019, 6, 8);
        r.lng_begin = 200.0;
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_hover_text_format() {
        let r = ride(2019, 6, 8);
        assert_eq!(
            r.hover_text(),
            "End: Av. Beira Mar, 100 | Data: 2019-06-01 08:15"
        );
    }

    #[test]
    fn test_selection_all_is_unfiltered() {
        let sel = Selection::all();
        assert!(sel.is_unfiltered());
        assert!(sel.matches(&ride(2017, 3, 1)));
    }

    #[test]
    fn test_selection_months_only() {
        let sel = Selection::new([], [6, 7]);
        assert!(sel.matches(&ride(2017, 6, 1)));
        assert!(sel.matches(&ride(2019, 7, 1)));
        assert!(!sel.matches(&ride(2019, 8, 1)));
    }

    #[test]
    fn test_selection_years_only() {
        let sel = Selection::new([2018], []);
        assert!(sel.matches(&ride(2018, 1, 1)));
        assert!(!sel.matches(&ride(2019, 1, 1)));
    }

    #[test]
    fn test_selection_years_and_months() {
        let sel = Selection::new([2018, 2019], [6, 7, 8]);
        assert!(sel.matches(&ride(2018, 6, 1)));
        assert!(sel.matches(&ride(2019, 8, 1)));
        assert!(!sel.matches(&ride(2019, 9, 1)));
        assert!(!sel.matches(&ride(2017, 6, 1)));
    }

    #[test]
    fn test_selection_toggle() {
        let mut sel = Selection::all();
        sel.toggle_year(2019);
        sel.toggle_month(6);
        assert!(sel.years.contains(&2019));
        assert!(sel.months.contains(&6));

        sel.toggle_year(2019);
        sel.toggle_month(6);
        assert!(sel.is_unfiltered());
    }

    #[test]
    fn test_selection_clear() {
        let mut sel = Selection::new([2018, 2019], [6]);
        sel.clear();
        assert!(sel.is_unfiltered());
    }

    #[test]
    fn test_ride_deserializes_from_csv_headers() {
        let data = "Year,Month,Hour,BeginAddress,LatBegin,LngBegin,pedido,Extra\n\
                    2019,6,8,\"Rua A, 1\",-3.73,-38.52,P-001,ignored\n";
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        let rides: Vec<Ride> = rdr
            .deserialize()
            .collect::<std::result::Result<_, _>>()
            .expect("parse");
        assert_eq!(rides.len(), 1);
        assert_eq!(rides[0].year, 2019);
        assert_eq!(rides[0].hour, 8);
        assert_eq!(rides[0].begin_address, "Rua A, 1");
        assert_eq!(rides[0].pedido, "P-001");
    }
}
