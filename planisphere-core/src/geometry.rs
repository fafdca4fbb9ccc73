//! Units, planar points and the radii of the star wheel
//!
//! All lengths are in millimetres on the printed page; angles are radians
//! unless a name says otherwise.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const UNIT_MM: f64 = 1.0;
pub const UNIT_CM: f64 = 10.0 * UNIT_MM;
pub const UNIT_DEG: f64 = PI / 180.0;
/// One full turn
pub const UNIT_REV: f64 = 2.0 * PI;

/// A point on the page, centred on the wheel axis, y pointing down
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Position of a sky coordinate at radius `r` and right ascension `ra_deg`
    pub fn on_sky(r: f64, ra_deg: f64) -> Self {
        let ra = ra_deg * UNIT_DEG;
        Self::new(-r * ra.cos(), -r * ra.sin())
    }

    /// Position on the date scale at radius `r` and rotation angle `theta`
    pub fn on_dial(r: f64, theta: f64) -> Self {
        Self::new(r * theta.cos(), -r * theta.sin())
    }
}

/// Axis-aligned extent of a drawn component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Radii of the star wheel.
///
/// Only the outer radius, the width of the date scale and the central hole
/// are free; every other radius is derived from them so the layers stay in
/// proportion when the wheel is resized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartGeometry {
    /// Radius of the outer edge of the wheel
    pub outer_radius: f64,
    /// Radial width of the date scale between the star chart and the edge
    pub date_scale_width: f64,
    /// Radius of the mounting hole in the middle
    pub central_hole_radius: f64,
    /// Margin added around the wheel for the canvas
    pub margin: f64,
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self {
            outer_radius: 100.0 * UNIT_MM,
            date_scale_width: 12.0 * UNIT_MM,
            central_hole_radius: 1.5 * UNIT_MM,
            margin: 4.0 * UNIT_MM,
        }
    }
}

impl ChartGeometry {
    /// Radius of the outer edge of the star chart; the observer's horizon
    /// limit projects onto this circle
    pub fn chart_radius(&self) -> f64 {
        self.outer_radius - self.date_scale_width
    }

    /// Radius `share` of the way from the chart edge out to the wheel edge
    fn date_scale(&self, share: f64) -> f64 {
        self.outer_radius * share + self.chart_radius() * (1.0 - share)
    }

    /// Outer end of an ordinary day tick
    pub fn short_tick_radius(&self) -> f64 {
        self.date_scale(0.1)
    }

    /// Outer end of the tick on every fifth day
    pub fn medium_tick_radius(&self) -> f64 {
        self.date_scale(0.2)
    }

    /// Outer end of the line dividing two months
    pub fn divider_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn numeral_radius(&self) -> f64 {
        self.date_scale(0.4)
    }

    pub fn month_label_radius(&self) -> f64 {
        self.date_scale(0.65)
    }

    /// Inner edge of the shaded band behind the month names
    pub fn shading_inner_radius(&self) -> f64 {
        self.date_scale(0.55)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let half = self.outer_radius + self.margin;
        BoundingBox {
            x_min: -half,
            x_max: half,
            y_min: -half,
            y_max: half,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_radii_are_ordered() {
        let g = ChartGeometry::default();
        let r2 = g.chart_radius();
        assert!(g.central_hole_radius < r2);
        assert!(r2 < g.short_tick_radius());
        assert!(g.short_tick_radius() < g.medium_tick_radius());
        assert!(g.medium_tick_radius() < g.numeral_radius());
        assert!(g.numeral_radius() < g.shading_inner_radius());
        assert!(g.shading_inner_radius() < g.month_label_radius());
        assert!(g.month_label_radius() < g.divider_radius());
        assert_eq!(g.divider_radius(), g.outer_radius);
    }

    #[test]
    fn test_bounding_box() {
        let g = ChartGeometry::default();
        let bb = g.bounding_box();
        assert_eq!(bb.x_min, -104.0);
        assert_eq!(bb.y_max, 104.0);
        assert_eq!(bb.width(), 208.0);
    }

    #[test]
    fn test_sky_and_dial_points() {
        let p = Point::on_sky(10.0, 0.0);
        assert!((p.x + 10.0).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);

        let q = Point::on_sky(10.0, 90.0);
        assert!(q.x.abs() < 1e-9);
        assert!((q.y + 10.0).abs() < 1e-9);

        let d = Point::on_dial(5.0, PI / 2.0);
        assert!(d.x.abs() < 1e-12);
        assert!((d.y + 5.0).abs() < 1e-12);

        assert!((p.distance_to(&Point::new(-10.0, 3.0)) - 3.0).abs() < 1e-12);
    }
}
