//! Per-render settings

use serde::{Deserialize, Serialize};

use crate::error::{PlanisphereError, Result};

/// Which celestial pole sits at the centre of the wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// Negative latitudes are southern
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude < 0.0 {
            Self::South
        } else {
            Self::North
        }
    }

    pub fn is_southern(&self) -> bool {
        matches!(self, Self::South)
    }

    /// Turn a sky position so the visible pole is at the centre. The
    /// southern sky is drawn upside down, negating both coordinates.
    pub fn orient(&self, ra: f64, dec: f64) -> (f64, f64) {
        match self {
            Self::North => (ra, dec),
            Self::South => (-ra, -dec),
        }
    }

    /// `N` or `S`
    pub fn suffix(&self) -> char {
        match self {
            Self::North => 'N',
            Self::South => 'S',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Observer latitude in degrees, negative in the south
    pub latitude: f64,
    /// Language code, e.g. `en`
    pub language: String,
    /// Theme name, e.g. `default`
    pub theme: String,
}

impl Settings {
    /// Closest a wheel may get to the equator; at 0 every radius collapses
    pub const MIN_ABS_LATITUDE: f64 = 1.0;

    pub fn new(latitude: f64, language: impl Into<String>, theme: impl Into<String>) -> Self {
        Self {
            latitude,
            language: language.into(),
            theme: theme.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite()
            || !(-90.0..=90.0).contains(&self.latitude)
            || self.latitude.abs() < Self::MIN_ABS_LATITUDE
        {
            return Err(PlanisphereError::InvalidLatitude(self.latitude));
        }
        Ok(())
    }

    pub fn hemisphere(&self) -> Hemisphere {
        Hemisphere::from_latitude(self.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hemisphere_from_latitude() {
        assert_eq!(Hemisphere::from_latitude(52.0), Hemisphere::North);
        assert_eq!(Hemisphere::from_latitude(0.0), Hemisphere::North);
        assert_eq!(Hemisphere::from_latitude(-0.5), Hemisphere::South);
        assert!(Hemisphere::South.is_southern());
        assert_eq!(Hemisphere::South.suffix(), 'S');
    }

    #[test]
    fn test_orient() {
        assert_eq!(Hemisphere::North.orient(10.0, 20.0), (10.0, 20.0));
        assert_eq!(Hemisphere::South.orient(10.0, 20.0), (-10.0, -20.0));
    }

    #[test]
    fn test_validate_latitude() {
        assert!(Settings::new(52.0, "en", "default").validate().is_ok());
        assert!(Settings::new(-90.0, "en", "default").validate().is_ok());
        assert!(Settings::new(90.0, "en", "default").validate().is_ok());
        assert!(Settings::new(1.0, "en", "default").validate().is_ok());
        assert!(Settings::new(-1.0, "en", "default").validate().is_ok());
        for bad in [90.5, -91.0, f64::NAN, f64::INFINITY, 0.0, -0.0, 0.5, -0.99] {
            assert!(matches!(
                Settings::new(bad, "en", "default").validate(),
                Err(PlanisphereError::InvalidLatitude(_))
            ));
        }
    }
}
