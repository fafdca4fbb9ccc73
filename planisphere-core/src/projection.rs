//! Planispheric projection of declination onto the star chart
//!
//! A stereographic projection from the pole opposite the one the observer
//! sees: the visible celestial pole lands on the axis of the wheel, and the
//! most southerly declination that ever rises (`latitude - 90`) lands on the
//! edge of the star chart. Circles of constant declination stay circles.

use crate::geometry::{Point, UNIT_DEG};

/// Radius at which declination `dec` is drawn for an observer at absolute
/// latitude `latitude`, on a chart whose horizon limit has radius
/// `chart_radius`.
///
/// The result is not range checked. Declinations below the horizon limit
/// come out larger than `chart_radius` and callers drop them.
pub fn radius(dec: f64, latitude: f64, chart_radius: f64) -> f64 {
    let dec_horizon = latitude - 90.0;
    let scale = ((90.0 - dec_horizon) / 2.0 * UNIT_DEG).tan();
    chart_radius * ((90.0 - dec) / 2.0 * UNIT_DEG).tan() / scale
}

/// The projection for one observer latitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    latitude: f64,
    chart_radius: f64,
}

impl Projection {
    /// `latitude` may be signed; only its magnitude matters here since the
    /// southern sky is flipped before it is projected.
    pub fn new(latitude: f64, chart_radius: f64) -> Self {
        Self {
            latitude: latitude.abs(),
            chart_radius,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn chart_radius(&self) -> f64 {
        self.chart_radius
    }

    /// Declination of the observer's horizon limit
    pub fn horizon_declination(&self) -> f64 {
        self.latitude - 90.0
    }

    pub fn radius(&self, dec: f64) -> f64 {
        radius(dec, self.latitude, self.chart_radius)
    }

    /// Whether a projected radius lies on the star chart
    pub fn on_chart(&self, r: f64) -> bool {
        r <= self.chart_radius
    }

    /// Page position of an (already hemisphere-oriented) sky coordinate,
    /// or `None` if it falls outside the star chart.
    pub fn project(&self, ra: f64, dec: f64) -> Option<Point> {
        let r = self.radius(dec);
        if !self.on_chart(r) {
            return None;
        }
        Some(Point::on_sky(r, ra))
    }
}
