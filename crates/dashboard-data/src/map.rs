//! Pickup locations for the map view and the map viewport geometry.

use serde::Serialize;

use dashboard_core::models::{Ride, HOURS_PER_DAY};
use dashboard_core::settings::{DEFAULT_CENTER_LAT, DEFAULT_CENTER_LON, DEFAULT_ZOOM};

/// Centre latitude restored by the reset action.
pub const RESET_CENTER_LAT: f64 = -3.749_125_1;
/// Centre longitude restored by the reset action.
pub const RESET_CENTER_LON: f64 = -38.4972;
/// Zoom restored by the reset action.
pub const RESET_ZOOM: f64 = 12.0;

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 20.0;

/// Width of the viewport in 256-px map tiles; sets degrees visible per zoom.
const TILES_ACROSS: f64 = 2.0;
/// Fraction of the visible span moved by one pan step.
const PAN_FRACTION: f64 = 0.1;
const ZOOM_STEP: f64 = 0.5;

// ── MapPoint / MapLayer ───────────────────────────────────────────────────────

/// One plotted pickup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lng: f64,
    pub hour: u8,
    pub label: String,
}

/// The scatter layer of the map: one point per selected ride.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapLayer {
    points: Vec<MapPoint>,
}

impl MapLayer {
    pub fn from_rides<'a>(rides: impl IntoIterator<Item = &'a Ride>) -> Self {
        let points = rides
            .into_iter()
            .map(|r| MapPoint {
                lat: r.lat_begin,
                lng: r.lng_begin,
                hour: r.hour,
                label: r.hover_text(),
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[MapPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Canvas coordinates `(lng, lat)` grouped by hour, so each hour can be
    /// drawn in its own colour.
    pub fn coords_by_hour(&self) -> [Vec<(f64, f64)>; HOURS_PER_DAY] {
        let mut buckets: [Vec<(f64, f64)>; HOURS_PER_DAY] = std::array::from_fn(|_| Vec::new());
        for p in &self.points {
            if let Some(bucket) = buckets.get_mut(usize::from(p.hour)) {
                bucket.push((p.lng, p.lat));
            }
        }
        buckets
    }

    /// Bounding box of every point, `None` when the layer is empty.
    pub fn bounds(&self) -> Option<GeoBounds> {
        let first = self.points.first()?;
        let init = GeoBounds {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lng: first.lng,
            max_lng: first.lng,
        };
        Some(self.points.iter().fold(init, |b, p| GeoBounds {
            min_lat: b.min_lat.min(p.lat),
            max_lat: b.max_lat.max(p.lat),
            min_lng: b.min_lng.min(p.lng),
            max_lng: b.max_lng.max(p.lng),
        }))
    }
}

// ── GeoBounds ─────────────────────────────────────────────────────────────────

/// Axis-aligned latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lng..=self.max_lng).contains(&lng)
    }
}

// ── MapView ───────────────────────────────────────────────────────────────────

/// Centre and zoom of the map viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: f64,
}

impl Default for MapView {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER_LAT, DEFAULT_CENTER_LON, DEFAULT_ZOOM)
    }
}

impl MapView {
    pub fn new(center_lat: f64, center_lon: f64, zoom: f64) -> Self {
        Self {
            center_lat,
            center_lon,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    /// Degrees of longitude visible across the viewport.
    pub fn lon_span(&self) -> f64 {
        360.0 / 2f64.powf(self.zoom) * TILES_ACROSS
    }

    /// Visible rectangle for a viewport whose height/width ratio is `aspect`.
    ///
    /// Latitude span is scaled by `cos(lat)` so distances look the same in
    /// both directions near the centre.
    pub fn extent(&self, aspect: f64) -> GeoBounds {
        let lon_span = self.lon_span();
        let lat_span = lon_span * aspect.max(0.01) * self.center_lat.to_radians().cos();
        GeoBounds {
            min_lat: self.center_lat - lat_span / 2.0,
            max_lat: self.center_lat + lat_span / 2.0,
            min_lng: self.center_lon - lon_span / 2.0,
            max_lng: self.center_lon + lon_span / 2.0,
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Move the centre by a tenth of the visible span in each direction.
    ///
    /// `east` and `north` are step counts; negative values move west/south.
    pub fn pan(&mut self, east: i32, north: i32) {
        let step = self.lon_span() * PAN_FRACTION;
        self.center_lon = (self.center_lon + f64::from(east) * step).clamp(-180.0, 180.0);
        self.center_lat = (self.center_lat + f64::from(north) * step).clamp(-85.0, 85.0);
    }

    /// Restore the reset-zoom viewport.
    pub fn reset(&mut self) {
        *self = Self::new(RESET_CENTER_LAT, RESET_CENTER_LON, RESET_ZOOM);
    }

    /// Centre the viewport on `bounds` without changing the zoom.
    pub fn center_on(&mut self, bounds: &GeoBounds) {
        let (lat, lng) = bounds.center();
        self.center_lat = lat;
        self.center_lon = lng;
    }
}
