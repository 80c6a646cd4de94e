//! Map of pickup locations coloured by hour.
//!
//! Points are plotted on a braille [`Canvas`] whose bounds come from the
//! current [`MapView`]. A colour bar on the right maps colours back to
//! hours of the day.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders,
    },
    Frame,
};

use dashboard_data::map::{GeoBounds, MapLayer, MapPoint, MapView};

use crate::components::colorbar::{render_colorbar, COLORBAR_WIDTH};
use crate::themes::{hour_color, Theme};

/// Height/width ratio of a canvas area in braille dots.
///
/// A terminal cell is roughly twice as tall as it is wide, and braille
/// packs 2×4 dots per cell, so dots come out close to square.
pub fn canvas_aspect(area: Rect) -> f64 {
    if area.width == 0 {
        return 1.0;
    }
    f64::from(area.height) * 2.0 / f64::from(area.width)
}

/// Render the map and its colour bar into `area`.
///
/// The title counts the pickups inside the viewport against all pickups.
pub fn render_map(
    frame: &mut Frame,
    area: Rect,
    layer: &MapLayer,
    view: &MapView,
    highlight: Option<&MapPoint>,
    focused: bool,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(COLORBAR_WIDTH)])
        .split(area);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border(focused));
    let extent = view.extent(canvas_aspect(block.inner(chunks[0])));
    block = block.title(format!(
        " Pickups: {}/{} | zoom {:.1} ",
        visible_points(layer, &extent),
        layer.len(),
        view.zoom
    ));

    let buckets = layer.coords_by_hour();
    let highlight_coords: Vec<(f64, f64)> = highlight.map(|p| (p.lng, p.lat)).into_iter().collect();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .background_color(theme.chart_background)
        .x_bounds([extent.min_lng, extent.max_lng])
        .y_bounds([extent.min_lat, extent.max_lat])
        .paint(|ctx| {
            for (hour, coords) in (0u8..).zip(buckets.iter()) {
                if coords.is_empty() {
                    continue;
                }
                ctx.draw(&Points {
                    coords,
                    color: hour_color(hour),
                });
            }
            if !highlight_coords.is_empty() {
                ctx.layer();
                ctx.draw(&Points {
                    coords: &highlight_coords,
                    color: theme.highlight_point,
                });
            }
        });

    frame.render_widget(canvas, chunks[0]);
    render_colorbar(frame, chunks[1], theme);
}

/// Number of `layer` points inside `extent`.
pub fn visible_points(layer: &MapLayer, extent: &GeoBounds) -> usize {
    layer
        .points()
        .iter()
        .filter(|p| extent.contains(p.lat, p.lng))
        .count()
}
