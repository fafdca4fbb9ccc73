//! Colour themes
//!
//! A theme assigns an RGBA colour to each of the nine drawing roles. Two
//! themes are built in; more can be registered from TOML:
//!
//! ```toml
//! background = [1.0, 1.0, 1.0, 0.0]
//! date = [0.0, 0.0, 0.0, 1.0]
//! # ... every role is required
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{PlanisphereError, Result};

/// RGBA colour with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Whether every component lies in [0, 1]
    pub fn is_valid(&self) -> bool {
        [self.r, self.g, self.b, self.a]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    /// `#rrggbb` form of the colour, ignoring alpha
    pub fn to_hex(&self) -> String {
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

impl From<[f64; 4]> for Color {
    fn from([r, g, b, a]: [f64; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for [f64; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// What a colour is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeRole {
    Background,
    Date,
    Edge,
    Shading,
    Grid,
    Stick,
    Star,
    Constellation,
    Dso,
}

impl ThemeRole {
    pub const ALL: [ThemeRole; 9] = [
        Self::Background,
        Self::Date,
        Self::Edge,
        Self::Shading,
        Self::Grid,
        Self::Stick,
        Self::Star,
        Self::Constellation,
        Self::Dso,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub background: Color,
    pub date: Color,
    pub edge: Color,
    pub shading: Color,
    pub grid: Color,
    pub stick: Color,
    pub star: Color,
    pub constellation: Color,
    /// Deep sky objects, used for custom object markers
    #[serde(alias = "DSO")]
    pub dso: Color,
}

impl Theme {
    pub fn color(&self, role: ThemeRole) -> Color {
        match role {
            ThemeRole::Background => self.background,
            ThemeRole::Date => self.date,
            ThemeRole::Edge => self.edge,
            ThemeRole::Shading => self.shading,
            ThemeRole::Grid => self.grid,
            ThemeRole::Stick => self.stick,
            ThemeRole::Star => self.star,
            ThemeRole::Constellation => self.constellation,
            ThemeRole::Dso => self.dso,
        }
    }

    /// Black on white, transparent outside the wheel
    pub fn light() -> Self {
        Self {
            background: Color::rgba(1.0, 1.0, 1.0, 0.0),
            date: Color::rgba(0.0, 0.0, 0.0, 1.0),
            edge: Color::rgba(0.0, 0.0, 0.0, 1.0),
            shading: Color::rgba(0.9, 0.9, 0.9, 1.0),
            grid: Color::rgba(0.75, 0.75, 0.75, 1.0),
            stick: Color::rgba(0.25, 0.25, 0.25, 1.0),
            star: Color::rgba(0.0, 0.0, 0.0, 1.0),
            constellation: Color::rgba(0.0, 0.0, 0.0, 1.0),
            dso: Color::rgba(0.0, 0.0, 1.0, 1.0),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::rgba(0.2, 0.25, 0.45, 1.0),
            date: Color::rgba(1.0, 1.0, 1.0, 1.0),
            edge: Color::rgba(0.45, 0.45, 0.45, 1.0),
            shading: Color::rgba(0.1, 0.1, 0.1, 1.0),
            grid: Color::rgba(0.3, 0.3, 0.3, 1.0),
            stick: Color::rgba(0.28, 0.35, 0.55, 1.0),
            star: Color::rgba(1.0, 1.0, 1.0, 1.0),
            constellation: Color::rgba(0.6, 0.5, 0.65, 1.0),
            dso: Color::rgba(0.0, 0.0, 1.0, 1.0),
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        for role in ThemeRole::ALL {
            if !self.color(role).is_valid() {
                return Err(PlanisphereError::invalid_table(
                    name,
                    format!("{:?} colour has a component outside [0, 1]", role),
                ));
            }
        }
        Ok(())
    }
}

/// Themes available by name
#[derive(Debug, Clone)]
pub struct ThemeSet {
    themes: BTreeMap<String, Theme>,
}

impl Default for ThemeSet {
    fn default() -> Self {
        let mut themes = BTreeMap::new();
        themes.insert("default".to_string(), Theme::light());
        themes.insert("dark".to_string(), Theme::dark());
        Self { themes }
    }
}

impl ThemeSet {
    pub fn get(&self, name: &str) -> Result<&Theme> {
        self.themes
            .get(name)
            .ok_or_else(|| PlanisphereError::UnknownTheme(name.to_string()))
    }

    /// Register a theme, replacing any theme of the same name
    pub fn insert(&mut self, name: impl Into<String>, theme: Theme) -> Result<()> {
        let name = name.into();
        theme.validate(&name)?;
        self.themes.insert(name, theme);
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }
}
