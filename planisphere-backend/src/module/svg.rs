//! SVG drawing surface
//!
//! Builds an SVG document from the star wheel drawing commands. Page units
//! are millimetres; the viewBox is the component's bounding box.

use planisphere_core::geometry::{BoundingBox, Point};
use planisphere_core::surface::{
    CircularText, DrawingSurface, HAlign, StrokeStyle, TextSpec, VAlign,
};
use planisphere_core::theme::Color;
use std::f64::consts::PI;
use std::fmt::Write;

/// Length of a typographic point in millimetres
const UNIT_PT: f64 = 25.4 / 72.0;

/// Millimetres of text height per unit of font size
const FONT_SCALE: f64 = 1.75;

pub struct SvgSurface {
    bbox: BoundingBox,
    defs: String,
    body: String,
    path: String,
    font_size: f64,
    color: Color,
    open_groups: usize,
    next_id: usize,
}

impl SvgSurface {
    pub fn new(bbox: BoundingBox) -> Self {
        Self {
            bbox,
            defs: String::new(),
            body: String::new(),
            path: String::new(),
            font_size: 1.0,
            color: Color::rgba(0.0, 0.0, 0.0, 1.0),
            open_groups: 0,
            next_id: 0,
        }
    }

    /// Close any clip groups and return the finished document
    pub fn finish(mut self) -> String {
        for _ in 0..self.open_groups {
            self.body.push_str("</g>\n");
        }
        let b = self.bbox;
        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8"?>"#,
                "\n",
                r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" "#,
                r#"width="{w}mm" height="{h}mm" viewBox="{x} {y} {w} {h}">"#,
                "\n<defs>\n{defs}</defs>\n{body}</svg>\n"
            ),
            x = num(b.x_min),
            y = num(b.y_min),
            w = num(b.width()),
            h = num(b.height()),
            defs = self.defs,
            body = self.body,
        )
    }

    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{}", prefix, self.next_id)
    }

    fn font_size_mm(&self) -> f64 {
        self.font_size * FONT_SCALE
    }

    /// Current path with the trailing separator removed
    fn path_data(&self) -> String {
        self.path.trim_end().to_string()
    }
}

/// Fixed precision keeps the output stable and compact
fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn paint(color: Color) -> String {
    format!("{}\" fill-opacity=\"{}", color.to_hex(), num(color.a))
}

fn stroke_paint(color: Color) -> String {
    format!("{}\" stroke-opacity=\"{}", color.to_hex(), num(color.a))
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn text_anchor(align: HAlign) -> &'static str {
    match align {
        HAlign::Left => "start",
        HAlign::Centre => "middle",
        HAlign::Right => "end",
    }
}

fn baseline(align: VAlign) -> &'static str {
    match align {
        VAlign::Top => "hanging",
        VAlign::Centre => "central",
        VAlign::Bottom => "alphabetic",
    }
}

impl DrawingSurface for SvgSurface {
    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn begin_sub_path(&mut self) {}

    fn move_to(&mut self, p: Point) {
        let _ = write!(self.path, "M{} {} ", num(p.x), num(p.y));
    }

    fn line_to(&mut self, p: Point) {
        let _ = write!(self.path, "L{} {} ", num(p.x), num(p.y));
    }

    fn circle(&mut self, centre: Point, radius: f64) {
        let r = num(radius);
        let _ = write!(
            self.path,
            "M{} {} A{r} {r} 0 1 0 {} {} A{r} {r} 0 1 0 {} {} Z ",
            num(centre.x + radius),
            num(centre.y),
            num(centre.x - radius),
            num(centre.y),
            num(centre.x + radius),
            num(centre.y),
            r = r,
        );
    }

    fn clip(&mut self) {
        let id = self.id("clip");
        let d = self.path_data();
        let _ = writeln!(
            self.defs,
            r#"<clipPath id="{}"><path d="{}" clip-rule="evenodd"/></clipPath>"#,
            id, d
        );
        let _ = writeln!(self.body, r#"<g clip-path="url(#{})">"#, id);
        self.open_groups += 1;
    }

    fn stroke(&mut self, style: StrokeStyle) {
        let color = style.color.unwrap_or(self.color);
        let width = style.width * UNIT_PT;
        let dash = if style.dotted {
            format!(r#" stroke-dasharray="{} {}""#, num(width), num(width * 2.0))
        } else {
            String::new()
        };
        let d = self.path_data();
        let _ = writeln!(
            self.body,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}"{}/>"#,
            d,
            stroke_paint(color),
            num(width),
            dash
        );
    }

    fn fill(&mut self, color: Color) {
        let d = self.path_data();
        let _ = writeln!(
            self.body,
            r#"<path d="{}" fill="{}" fill-rule="evenodd"/>"#,
            d,
            paint(color)
        );
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn text(&mut self, text: TextSpec) {
        let dx = match text.h_align {
            HAlign::Left => text.gap,
            HAlign::Centre => 0.0,
            HAlign::Right => -text.gap,
        };
        let _ = writeln!(
            self.body,
            r#"<text transform="translate({} {}) rotate({})" x="{}" font-size="{}" text-anchor="{}" dominant-baseline="{}" fill="{}">{}</text>"#,
            num(text.position.x),
            num(text.position.y),
            num(text.rotation.to_degrees()),
            num(dx),
            num(self.font_size_mm()),
            text_anchor(text.h_align),
            baseline(text.v_align),
            paint(self.color),
            escape_xml(&text.text)
        );
    }

    fn circular_text(&mut self, text: CircularText) {
        // A full clockwise turn starting opposite the azimuth, so the middle
        // of the path lies on it and glyph tops point outward
        let id = self.id("arc");
        let at = |angle: f64| {
            Point::new(
                text.centre.x + text.radius * angle.cos(),
                text.centre.y - text.radius * angle.sin(),
            )
        };
        let start = at(text.azimuth + PI);
        let middle = at(text.azimuth);
        let r = num(text.radius);
        let _ = writeln!(
            self.defs,
            r#"<path id="{id}" d="M{} {} A{r} {r} 0 1 1 {} {} A{r} {r} 0 1 1 {} {}"/>"#,
            num(start.x),
            num(start.y),
            num(middle.x),
            num(middle.y),
            num(start.x),
            num(start.y),
            id = id,
            r = r,
        );

        let font_size = self.font_size_mm() * text.size;
        let spacing = (text.spacing - 1.0) * font_size;
        let _ = writeln!(
            self.body,
            r##"<text font-size="{}" letter-spacing="{}" fill="{}"><textPath xlink:href="#{}" startOffset="50%" text-anchor="middle">{}</textPath></text>"##,
            num(font_size),
            num(spacing),
            paint(self.color),
            id,
            escape_xml(&text.text)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planisphere_core::geometry::ChartGeometry;

    fn surface() -> SvgSurface {
        SvgSurface::new(ChartGeometry::default().bounding_box())
    }

    #[test]
    fn test_num() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(-104.0), "-104");
        assert_eq!(num(0.1234), "0.123");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(2.5), "2.5");
    }

    #[test]
    fn test_document_frame() {
        let svg = surface().finish();
        assert!(svg.contains(r#"width="208mm" height="208mm" viewBox="-104 -104 208 208""#));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_fill_uses_even_odd_ring() {
        let mut s = surface();
        s.begin_path();
        s.circle(Point::default(), 100.0);
        s.circle(Point::default(), 95.0);
        s.fill(Color::rgba(0.9, 0.9, 0.9, 1.0));
        let svg = s.finish();
        assert!(svg.contains(
            r##"<path d="M100 0 A100 100 0 1 0 -100 0 A100 100 0 1 0 100 0 Z M95 0 A95 95 0 1 0 -95 0 A95 95 0 1 0 95 0 Z" fill="#e6e6e6" fill-opacity="1" fill-rule="evenodd"/>"##
        ));
    }

    #[test]
    fn test_clip_wraps_later_drawing() {
        let mut s = surface();
        s.begin_path();
        s.circle(Point::default(), 100.0);
        s.begin_sub_path();
        s.circle(Point::default(), 1.5);
        s.clip();
        s.begin_path();
        s.move_to(Point::new(0.0, 0.0));
        s.line_to(Point::new(10.0, 0.0));
        s.stroke(StrokeStyle::solid(Color::rgba(0.0, 0.0, 0.0, 1.0)).dotted());
        let svg = s.finish();

        assert!(svg.contains(r#"<clipPath id="clip1"><path d="M100 0"#));
        assert!(svg.contains(r#"clip-rule="evenodd""#));
        let group = svg.find(r#"<g clip-path="url(#clip1)">"#).unwrap();
        let line = svg.find(r#"<path d="M0 0 L10 0""#).unwrap();
        let close = svg.rfind("</g>").unwrap();
        assert!(group < line && line < close);
        assert!(svg.contains("stroke-dasharray"));
    }

    #[test]
    fn test_stroke_falls_back_to_current_color() {
        let mut s = surface();
        s.set_color(Color::rgba(1.0, 0.0, 0.0, 1.0));
        s.begin_path();
        s.move_to(Point::new(0.0, 0.0));
        s.line_to(Point::new(1.0, 1.0));
        s.stroke(StrokeStyle::current(1.0));
        let svg = s.finish();
        assert!(svg.contains(r##"stroke="#ff0000" stroke-opacity="1""##));
        assert!(!svg.contains("stroke-dasharray"));
    }

    #[test]
    fn test_text_is_escaped_and_placed() {
        let mut s = surface();
        s.set_font_size(2.0);
        s.text(TextSpec::centred("A & <B>", Point::new(10.0, -5.0), PI / 2.0));
        let svg = s.finish();
        assert!(svg.contains(r#"transform="translate(10 -5) rotate(90)""#));
        assert!(svg.contains(r#"font-size="3.5""#));
        assert!(svg.contains(r#"text-anchor="middle" dominant-baseline="central""#));
        assert!(svg.contains("A &amp; &lt;B&gt;"));
    }

    #[test]
    fn test_circular_text_uses_text_path() {
        let mut s = surface();
        s.circular_text(CircularText {
            text: "MARCH".to_string(),
            centre: Point::default(),
            radius: 50.0,
            azimuth: PI / 2.0,
            spacing: 1.0,
            size: 1.0,
        });
        let svg = s.finish();
        // Starts at the bottom, passes the top half way round
        assert!(svg.contains(r#"<path id="arc1" d="M0 50 A50 50 0 1 1 0 -50 A50 50 0 1 1 0 50"/>"#));
        assert!(svg.contains(r##"xlink:href="#arc1" startOffset="50%""##));
        assert!(svg.contains(">MARCH</textPath>"));
    }
}
