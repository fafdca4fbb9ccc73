//! Drawing surface abstraction
//!
//! The renderer draws through [`DrawingSurface`] and never sees the output
//! format. Paths follow the usual vector graphics model: `begin_path`
//! discards the current path, `fill` and `stroke` paint it without clearing
//! it, and `clip` intersects the clip region with it using the even-odd
//! rule. Text colour comes from `set_color`; stroke colour falls back to it
//! when a stroke does not name one.

use crate::geometry::Point;
use crate::theme::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Centre,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Centre,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// `None` strokes in the current text colour
    pub color: Option<Color>,
    /// Width in points
    pub width: f64,
    pub dotted: bool,
}

impl StrokeStyle {
    pub fn solid(color: Color) -> Self {
        Self {
            color: Some(color),
            width: 1.0,
            dotted: false,
        }
    }

    pub fn current(width: f64) -> Self {
        Self {
            color: None,
            width,
            dotted: false,
        }
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn dotted(mut self) -> Self {
        self.dotted = true;
        self
    }
}

/// A line of text anchored at a point
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    pub text: String,
    pub position: Point,
    pub h_align: HAlign,
    pub v_align: VAlign,
    /// Distance kept between the anchor and the aligned edge
    pub gap: f64,
    /// Clockwise rotation about the anchor, radians
    pub rotation: f64,
}

impl TextSpec {
    pub fn centred(text: impl Into<String>, position: Point, rotation: f64) -> Self {
        Self {
            text: text.into(),
            position,
            h_align: HAlign::Centre,
            v_align: VAlign::Centre,
            gap: 0.0,
            rotation,
        }
    }

    pub fn h_align(mut self, h_align: HAlign) -> Self {
        self.h_align = h_align;
        self
    }
}

/// Text set along a circle, centred on an azimuth, bottoms towards the
/// centre of the circle
#[derive(Debug, Clone, PartialEq)]
pub struct CircularText {
    pub text: String,
    pub centre: Point,
    pub radius: f64,
    /// Angle of the middle of the text, measured like dial angles
    pub azimuth: f64,
    /// Letter spacing multiplier
    pub spacing: f64,
    /// Size multiplier on the current font size
    pub size: f64,
}

pub trait DrawingSurface {
    fn begin_path(&mut self);
    /// Start a new closed figure in the current path
    fn begin_sub_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    /// Add a full circle to the current path
    fn circle(&mut self, centre: Point, radius: f64);
    fn clip(&mut self);
    fn stroke(&mut self, style: StrokeStyle);
    fn fill(&mut self, color: Color);
    fn set_font_size(&mut self, size: f64);
    fn set_color(&mut self, color: Color);
    fn text(&mut self, text: TextSpec);
    fn circular_text(&mut self, text: CircularText);
}

/// Everything a surface was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginPath,
    BeginSubPath,
    MoveTo(Point),
    LineTo(Point),
    Circle { centre: Point, radius: f64 },
    Clip,
    Stroke(StrokeStyle),
    Fill(Color),
    SetFontSize(f64),
    SetColor(Color),
    Text(TextSpec),
    CircularText(CircularText),
}

/// A surface that records commands in order, for inspection
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl DrawingSurface for RecordingSurface {
    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn begin_sub_path(&mut self) {
        self.commands.push(DrawCommand::BeginSubPath);
    }

    fn move_to(&mut self, p: Point) {
        self.commands.push(DrawCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.commands.push(DrawCommand::LineTo(p));
    }

    fn circle(&mut self, centre: Point, radius: f64) {
        self.commands.push(DrawCommand::Circle { centre, radius });
    }

    fn clip(&mut self) {
        self.commands.push(DrawCommand::Clip);
    }

    fn stroke(&mut self, style: StrokeStyle) {
        self.commands.push(DrawCommand::Stroke(style));
    }

    fn fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn set_font_size(&mut self, size: f64) {
        self.commands.push(DrawCommand::SetFontSize(size));
    }

    fn set_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetColor(color));
    }

    fn text(&mut self, text: TextSpec) {
        self.commands.push(DrawCommand::Text(text));
    }

    fn circular_text(&mut self, text: CircularText) {
        self.commands.push(DrawCommand::CircularText(text));
    }
}
