//! Projection and composition engine for the rotating star wheel of a
//! printable planisphere.
//!
//! [`StarWheel`] draws the wheel for one [`Settings`] value onto any
//! [`DrawingSurface`], using [`SkyData`] read from the static tables and a
//! [`StarCatalog`].

pub mod calendar;
pub mod catalog;
pub mod custom_objects;
pub mod error;
pub mod geometry;
pub mod language;
pub mod projection;
pub mod settings;
pub mod sexagesimal;
pub mod sky;
pub mod starwheel;
pub mod surface;
pub mod theme;

pub use catalog::{JsonStarCatalog, Magnitude, Star, StarCatalog};
pub use error::{PlanisphereError, Result};
pub use geometry::{BoundingBox, ChartGeometry, Point};
pub use language::{LanguageSet, LanguageTable};
pub use settings::{Hemisphere, Settings};
pub use sky::{DataFiles, SkyData};
pub use starwheel::{RenderSummary, StarWheel};
pub use surface::{DrawingSurface, RecordingSurface};
pub use theme::{Color, Theme, ThemeSet};
