//! The star wheel renderer
//!
//! Draws every layer of the wheel onto a [`DrawingSurface`] in a fixed
//! back-to-front order:
//!
//! 1. shading band behind the month names
//! 2. background disc, central hole, and the annular clip
//! 3. declination grid
//! 4. constellation stick figures
//! 5. catalog stars
//! 6. custom objects
//! 7. constellation names
//! 8. month names
//! 9. day ticks
//! 10. day numerals
//! 11. circle dividing the date scale from the star chart
//!
//! Anything whose projected radius falls outside the star chart is skipped.

use std::f64::consts::PI;

use crate::calendar::CalendarAngle;
use crate::catalog::Magnitude;
use crate::error::Result;
use crate::geometry::{ChartGeometry, Point, UNIT_CM, UNIT_DEG, UNIT_MM};
use crate::language::{LanguageSet, LanguageTable};
use crate::projection::Projection;
use crate::settings::{Hemisphere, Settings};
use crate::sky::SkyData;
use crate::surface::{CircularText, DrawingSurface, HAlign, StrokeStyle, TextSpec};
use crate::theme::{Theme, ThemeSet};

/// How far a day tick reaches into the date scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    Short,
    /// Every fifth day
    Medium,
    /// Last day of the month, drawn out to the wheel edge
    Divider,
}

/// Tick length rule for day `day` of a month with `month_len` days
pub fn tick_kind(day: u32, month_len: u32) -> TickKind {
    if day == month_len {
        TickKind::Divider
    } else if day % 5 == 0 {
        TickKind::Medium
    } else {
        TickKind::Short
    }
}

/// Items drawn and skipped in one layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerCount {
    pub drawn: usize,
    pub omitted: usize,
}

impl LayerCount {
    fn record(&mut self, drawn: bool) {
        if drawn {
            self.drawn += 1;
        } else {
            self.omitted += 1;
        }
    }
}

/// What a render put on the wheel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub grid_circles: LayerCount,
    pub stick_segments: LayerCount,
    pub stars: LayerCount,
    pub custom_objects: LayerCount,
    pub constellation_labels: LayerCount,
}

/// A star wheel for one latitude, language and theme
#[derive(Debug, Clone)]
pub struct StarWheel<'a> {
    geometry: ChartGeometry,
    hemisphere: Hemisphere,
    projection: Projection,
    calendar: CalendarAngle,
    theme: &'a Theme,
    language: &'a LanguageTable,
}

impl<'a> StarWheel<'a> {
    /// Longest stick figure segment drawn
    pub const STICK_LENGTH_CAP: f64 = 4.0 * UNIT_CM;
    /// Star disc radius per magnitude step brighter than 5
    pub const STAR_SIZE: f64 = 0.18 * UNIT_MM;
    /// Arm length of a custom object cross
    pub const CROSS_SIZE: f64 = 1.0 * UNIT_MM;
    /// Angular offset of each day digit from its tick
    pub const DIGIT_GAP: f64 = 0.15 * UNIT_DEG;
    /// Declinations of the grid circles, every 15 degrees
    pub const GRID_DECLINATIONS: [f64; 11] = [
        -80.0, -65.0, -50.0, -35.0, -20.0, -5.0, 10.0, 25.0, 40.0, 55.0, 70.0,
    ];

    const INITIAL_FONT_SIZE: f64 = 1.2;
    const LABEL_FONT_SIZE: f64 = 0.5;
    const MONTH_FONT_SIZE: f64 = 2.3;
    const NUMERAL_FONT_SIZE: f64 = 1.2;

    /// Resolve the theme and language named in `settings`
    pub fn new(
        geometry: &ChartGeometry,
        settings: &Settings,
        themes: &'a ThemeSet,
        languages: &'a LanguageSet,
    ) -> Result<Self> {
        settings.validate()?;
        let theme = themes.get(&settings.theme)?;
        let language = languages.get(&settings.language)?;
        let hemisphere = settings.hemisphere();

        Ok(Self {
            geometry: *geometry,
            hemisphere,
            projection: Projection::new(settings.latitude, geometry.chart_radius()),
            calendar: CalendarAngle::new(hemisphere.is_southern()),
            theme,
            language,
        })
    }

    pub fn geometry(&self) -> &ChartGeometry {
        &self.geometry
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    /// Draw the whole wheel
    pub fn render<S: DrawingSurface + ?Sized>(
        &self,
        sky: &SkyData,
        surface: &mut S,
    ) -> RenderSummary {
        let mut summary = RenderSummary::default();

        surface.set_font_size(Self::INITIAL_FONT_SIZE);
        self.draw_background(surface);
        summary.grid_circles = self.draw_grid(surface);
        summary.stick_segments = self.draw_stick_figures(sky, surface);
        summary.stars = self.draw_stars(sky, surface);
        summary.custom_objects = self.draw_custom_objects(sky, surface);
        summary.constellation_labels = self.draw_constellation_names(sky, surface);
        self.draw_month_names(surface);
        self.draw_day_ticks(surface);
        self.draw_day_numerals(surface);

        surface.begin_path();
        surface.circle(Point::default(), self.geometry.chart_radius());
        surface.stroke(StrokeStyle::solid(self.theme.date));

        tracing::debug!(
            "Star wheel at {:.1}°{}: {:?}",
            self.projection.latitude(),
            self.hemisphere.suffix(),
            summary
        );
        summary
    }

    /// Project a sky position, flipping it for the south. `None` when it
    /// falls outside the star chart.
    fn project(&self, ra: f64, dec: f64) -> Option<Point> {
        let (ra, dec) = self.hemisphere.orient(ra, dec);
        self.projection.project(ra, dec)
    }

    fn draw_background<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        let centre = Point::default();
        let outer = self.geometry.outer_radius;

        surface.begin_path();
        surface.circle(centre, outer);
        surface.circle(centre, self.geometry.shading_inner_radius());
        surface.fill(self.theme.shading);

        surface.begin_path();
        surface.circle(centre, outer);
        surface.fill(self.theme.background);

        surface.begin_sub_path();
        surface.circle(centre, self.geometry.central_hole_radius);
        surface.stroke(StrokeStyle::solid(self.theme.edge));

        surface.clip();
    }

    fn draw_grid<S: DrawingSurface + ?Sized>(&self, surface: &mut S) -> LayerCount {
        let mut count = LayerCount::default();
        for dec in Self::GRID_DECLINATIONS {
            let r = self.projection.radius(dec);
            let visible = self.projection.on_chart(r);
            count.record(visible);
            if !visible {
                continue;
            }
            surface.begin_path();
            surface.circle(Point::default(), r);
            surface.stroke(StrokeStyle::solid(self.theme.grid));
        }
        count
    }

    fn draw_stick_figures<S: DrawingSurface + ?Sized>(
        &self,
        sky: &SkyData,
        surface: &mut S,
    ) -> LayerCount {
        let mut count = LayerCount::default();
        for segment in &sky.stick_figures {
            let ends = self
                .project(segment.ra1, segment.dec1)
                .zip(self.project(segment.ra2, segment.dec2))
                .filter(|(p1, p2)| p1.distance_to(p2) <= Self::STICK_LENGTH_CAP);
            count.record(ends.is_some());
            let Some((p1, p2)) = ends else {
                continue;
            };
            surface.begin_path();
            surface.move_to(p1);
            surface.line_to(p2);
            surface.stroke(StrokeStyle::solid(self.theme.stick).dotted());
        }
        count
    }

    fn draw_stars<S: DrawingSurface + ?Sized>(
        &self,
        sky: &SkyData,
        surface: &mut S,
    ) -> LayerCount {
        let mut count = LayerCount::default();
        for star in &sky.stars {
            let placed = self.place(star.ra, star.dec, star.magnitude);
            count.record(placed.is_some());
            let Some((p, mag)) = placed else {
                continue;
            };
            surface.begin_path();
            surface.circle(p, Self::STAR_SIZE * (5.0 - mag));
            surface.fill(self.theme.star);
        }
        count
    }

    fn draw_custom_objects<S: DrawingSurface + ?Sized>(
        &self,
        sky: &SkyData,
        surface: &mut S,
    ) -> LayerCount {
        let mut count = LayerCount::default();
        let half = Self::CROSS_SIZE / 2.0;
        for object in &sky.custom_objects {
            let placed = self.place(object.ra, object.dec, object.magnitude);
            count.record(placed.is_some());
            let Some((p, _)) = placed else {
                continue;
            };
            surface.begin_path();
            surface.move_to(Point::new(p.x - half, p.y));
            surface.line_to(Point::new(p.x + half, p.y));
            surface.stroke(StrokeStyle::solid(self.theme.dso).width(0.3));

            surface.begin_path();
            surface.move_to(Point::new(p.x, p.y - half));
            surface.line_to(Point::new(p.x, p.y + half));
            surface.stroke(StrokeStyle::solid(self.theme.dso).width(0.6));
        }
        count
    }

    /// Position and magnitude of a point source bright enough to draw
    fn place(&self, ra: f64, dec: f64, magnitude: Magnitude) -> Option<(Point, f64)> {
        if !magnitude.is_visible() {
            return None;
        }
        let mag = magnitude.value()?;
        Some((self.project(ra, dec)?, mag))
    }

    fn draw_constellation_names<S: DrawingSurface + ?Sized>(
        &self,
        sky: &SkyData,
        surface: &mut S,
    ) -> LayerCount {
        let mut count = LayerCount::default();
        surface.set_font_size(Self::LABEL_FONT_SIZE);
        surface.set_color(self.theme.constellation);

        for label in &sky.constellation_labels {
            let name = self.language.translate(&label.name).replace('_', " ");
            let placed = self.project(label.ra_degrees(), label.dec);
            count.record(placed.is_some());
            let Some(p) = placed else {
                continue;
            };
            let rotation = PI - p.x.atan2(p.y);
            surface.text(TextSpec::centred(name, p, rotation));
        }
        count
    }

    /// Rotation of `day` of `month` (1-based) at `hour`, or `None` if the
    /// date does not exist in 2014
    fn day_angle(&self, month: usize, day: u32, hour: u32) -> Option<f64> {
        self.calendar.day_angle(month as u32 + 1, day, hour)
    }

    fn draw_month_names<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        surface.set_font_size(Self::MONTH_FONT_SIZE);
        surface.set_color(self.theme.date);

        for (index, month) in self.language.months.iter().enumerate() {
            let Some(theta) = self.day_angle(index, month.days / 2, 12) else {
                continue;
            };
            surface.circular_text(CircularText {
                text: month.name.clone(),
                centre: Point::default(),
                radius: self.geometry.month_label_radius(),
                azimuth: theta,
                spacing: 1.0,
                size: 1.0,
            });
        }
    }

    fn draw_day_ticks<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        let r_inner = self.geometry.chart_radius();
        for (index, month) in self.language.months.iter().enumerate() {
            for day in 1..=month.days {
                let Some(theta) = self.day_angle(index, day, 0) else {
                    continue;
                };
                let r_outer = match tick_kind(day, month.days) {
                    TickKind::Short => self.geometry.short_tick_radius(),
                    TickKind::Medium => self.geometry.medium_tick_radius(),
                    TickKind::Divider => self.geometry.divider_radius(),
                };
                surface.begin_path();
                surface.move_to(Point::on_dial(r_inner, theta));
                surface.line_to(Point::on_dial(r_outer, theta));
                surface.stroke(StrokeStyle::current(1.0));
            }
        }
    }

    fn draw_day_numerals<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        let r = self.geometry.numeral_radius();
        surface.set_font_size(Self::NUMERAL_FONT_SIZE);

        for (index, month) in self.language.months.iter().enumerate() {
            for day in [10, 20, month.days] {
                let Some(theta) = self.day_angle(index, day, 0) else {
                    continue;
                };
                let rotation = PI / 2.0 - theta;

                let tens = theta + Self::DIGIT_GAP;
                surface.text(
                    TextSpec::centred((day / 10).to_string(), Point::on_dial(r, tens), rotation)
                        .h_align(HAlign::Right),
                );

                let units = theta - Self::DIGIT_GAP;
                surface.text(
                    TextSpec::centred((day % 10).to_string(), Point::on_dial(r, units), rotation)
                        .h_align(HAlign::Left),
                );
            }
        }
    }
}
