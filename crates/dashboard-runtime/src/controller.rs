//! Selection → snapshot controller.
//!
//! Every output of the dashboard depends on the same two inputs, the year
//! and month pickers. [`DashboardController::update`] recomputes all three
//! outputs for a selection and memoises the last result so redraws that do
//! not change the selection cost nothing.

use std::sync::Arc;

use serde::Serialize;

use dashboard_core::error::Result;
use dashboard_core::formatting::format_count;
use dashboard_core::models::Selection;
use dashboard_data::histogram::HourHistogram;
use dashboard_data::map::MapLayer;
use dashboard_data::Dataset;

// ── DashboardSnapshot ─────────────────────────────────────────────────────────

/// The derived views for one selection.
///
/// This is the data contract between the runtime and the presentation
/// layer, and the document printed by the JSON view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub selection: Selection,
    pub total_rides: usize,
    pub histogram: HourHistogram,
    pub map: MapLayer,
}

impl DashboardSnapshot {
    /// Compute every view for `selection` over `dataset`.
    pub fn compute(dataset: &Dataset, selection: &Selection) -> Self {
        let rides = dataset.select(selection);
        Self {
            selection: selection.clone(),
            total_rides: rides.len(),
            histogram: HourHistogram::from_rides(rides.iter().copied()),
            map: MapLayer::from_rides(rides.iter().copied()),
        }
    }

    /// Text of the ride-count line, e.g. `"Total rides: 1,234"`.
    pub fn total_label(&self) -> String {
        format!("Total rides: {}", format_count(self.total_rides as u64))
    }

    /// Pretty-printed JSON document for this snapshot.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ── DashboardController ───────────────────────────────────────────────────────

/// Owns the dataset and the last computed snapshot.
pub struct DashboardController {
    dataset: Arc<Dataset>,
    current: Option<DashboardSnapshot>,
    recomputations: usize,
}

impl DashboardController {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            current: None,
            recomputations: 0,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Return the snapshot for `selection`, recomputing only when it differs
    /// from the previous call.
    pub fn update(&mut self, selection: &Selection) -> &DashboardSnapshot {
        let stale = self
            .current
            .as_ref()
            .map_or(true, |s| &s.selection != selection);

        if stale {
            let snapshot = DashboardSnapshot::compute(&self.dataset, selection);
            self.recomputations += 1;
            tracing::debug!(
                years = ?selection.years,
                months = ?selection.months,
                rides = snapshot.total_rides,
                "dashboard views recomputed"
            );
            self.current = Some(snapshot);
        }

        // Populated above whenever it was empty.
        self.current
            .get_or_insert_with(|| DashboardSnapshot::compute(&self.dataset, selection))
    }

    /// The last computed snapshot, `None` before the first [`update`](Self::update).
    pub fn current(&self) -> Option<&DashboardSnapshot> {
        self.current.as_ref()
    }

    /// How many times views were actually recomputed.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::models::Ride;

    fn ride(year: u16, month: u8, hour: u8, pedido: &str) -> Ride {
        Ride {
            year,
            month,
            hour,
            begin_address: "Av. Dom Luis".to_string(),
            lat_begin: -3.73,
            lng_begin: -38.49,
            pedido: pedido.to_string(),
        }
    }

    fn dataset() -> Arc<Dataset> {
        Arc::new(Dataset::new(vec![
            ride(2018, 6, 8, "a"),
            ride(2018, 7, 8, "b"),
            ride(2019, 8, 18, "c"),
            ride(2019, 9, 22, "d"),
            ride(2017, 6, 8, "e"),
        ]))
    }

    #[test]
    fn test_snapshot_views_agree() {
        let ds = dataset();
        let snap = DashboardSnapshot::compute(&ds, &Selection::new([2018, 2019], [6, 7, 8]));
        assert_eq!(snap.total_rides, 3);
        assert_eq!(snap.histogram.total(), 3);
        assert_eq!(snap.map.len(), 3);
        assert_eq!(snap.histogram.bars(), vec![(8, 2), (18, 1)]);
    }

    #[test]
    fn test_snapshot_unfiltered() {
        let ds = dataset();
        let snap = DashboardSnapshot::compute(&ds, &Selection::all());
        assert_eq!(snap.total_rides, ds.len());
    }

    #[test]
    fn test_total_label() {
        let ds = dataset();
        let snap = DashboardSnapshot::compute(&ds, &Selection::new([2019], []));
        assert_eq!(snap.total_label(), "Total rides: 2");
    }

    #[test]
    fn test_snapshot_json_shape() {
        let ds = dataset();
        let snap = DashboardSnapshot::compute(&ds, &Selection::new([2019], [8]));
        let json = snap.to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_rides"], 1);
        assert_eq!(value["selection"]["years"][0], 2019);
        assert_eq!(value["histogram"]["counts"][18], 1);
        assert_eq!(value["map"]["points"][0]["hour"], 18);
    }

    #[test]
    fn test_controller_memoises_same_selection() {
        let mut ctl = DashboardController::new(dataset());
        let sel = Selection::new([2018], []);

        assert_eq!(ctl.update(&sel).total_rides, 2);
        assert_eq!(ctl.update(&sel).total_rides, 2);
        assert_eq!(ctl.recomputations(), 1);
    }

    #[test]
    fn test_controller_recomputes_on_change() {
        let mut ctl = DashboardController::new(dataset());
        let mut sel = Selection::new([2018], []);
        ctl.update(&sel);

        sel.toggle_month(7);
        let snap = ctl.update(&sel);
        assert_eq!(snap.total_rides, 1);
        assert_eq!(ctl.recomputations(), 2);
        assert_eq!(ctl.current().map(|s| s.selection.clone()), Some(sel));
    }

    #[test]
    fn test_controller_current_none_before_update() {
        let ctl = DashboardController::new(dataset());
        assert!(ctl.current().is_none());
    }
}
