//! Styling helpers shared by all figures.
//!
//! A [`Sheet`] bundles the stroke styles and sizing constants derived from
//! [`RenderOptions`] and is passed explicitly to every figure; nothing here
//! computes curve geometry, it only dresses it.

use std::f64::consts::TAU;

use svg::node::element::{path::Data, Circle, Group, Line, Path};
use svg::Document;
use svg::Node;

use crate::geometry::{to_cartesian, Point};
use crate::options::{FigureParams, RenderOptions};

/// The three stroke styles used across the figures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pen {
    /// Solid and thick: resolved curves and vectors.
    Primary,
    /// Dashed and medium: control polygons and handles.
    Secondary,
    /// Thin and solid: auxiliary construction lines in dense diagrams.
    Thin,
}

/// Immutable bundle of stroke styles and sizing constants.
#[derive(Clone, Debug)]
pub struct Sheet {
    /// Drawable canvas width; figure heights are fractions of it.
    pub width: f64,
    /// Parameter samples per curve trace.
    pub curve_steps: usize,
    /// Per-figure construction parameters.
    pub params: FigureParams,
    main_stroke_width: f64,
    secondary_stroke_width: f64,
    dash_pattern: String,
    point_radius: f64,
    arrow_head_factor: f64,
}

impl Sheet {
    /// Derive a sheet from the loaded options.
    pub fn new(options: &RenderOptions) -> Self {
        Sheet {
            width: options.width(),
            curve_steps: options.curve_steps,
            params: options.params,
            main_stroke_width: options.main_stroke_width,
            secondary_stroke_width: options.secondary_stroke_width,
            dash_pattern: options.dash_pattern.clone(),
            point_radius: options.point_radius,
            arrow_head_factor: options.arrow_head_factor,
        }
    }

    fn stroke_width(&self, pen: Pen) -> f64 {
        match pen {
            Pen::Primary => self.main_stroke_width,
            Pen::Secondary => self.secondary_stroke_width,
            Pen::Thin => self.secondary_stroke_width / 3.0,
        }
    }

    fn dash(&self, pen: Pen) -> Option<&str> {
        match pen {
            Pen::Secondary => Some(&self.dash_pattern),
            Pen::Primary | Pen::Thin => None,
        }
    }

    /// An empty canvas of the sheet's width and the given height.
    pub fn canvas(&self, height: f64) -> Document {
        Document::new().set("viewBox", (0.0, 0.0, self.width, height))
    }

    /// A straight stroked line.
    pub fn line(&self, from: Point, to: Point, pen: Pen) -> Line {
        let mut line = Line::new()
            .set("x1", from.x)
            .set("y1", from.y)
            .set("x2", to.x)
            .set("y2", to.y)
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", self.stroke_width(pen));
        if let Some(dash) = self.dash(pen) {
            line = line.set("stroke-dasharray", dash);
        }
        line
    }

    /// A stroked, unfilled path around prepared path data.
    pub fn path(&self, data: Data, pen: Pen) -> Path {
        let mut path = Path::new()
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", self.stroke_width(pen))
            .set("d", data);
        if let Some(dash) = self.dash(pen) {
            path = path.set("stroke-dasharray", dash);
        }
        path
    }

    /// A marker disc.
    ///
    /// Filled marks a value the construction resolves to, hollow an input or
    /// intermediate value.
    pub fn marker(&self, at: Point, filled: bool) -> Circle {
        Circle::new()
            .set("cx", at.x)
            .set("cy", at.y)
            .set("r", self.point_radius)
            .set("fill", if filled { "black" } else { "white" })
            .set("stroke", "black")
            .set("stroke-width", self.secondary_stroke_width)
    }

    /// A closed, filled regular polygon with vertex 0 at angle `rotation`.
    pub fn regular_polygon(&self, center: Point, sides: usize, radius: f64, rotation: f64) -> Path {
        assert!(sides >= 3, "a polygon needs at least three vertices");
        assert!(radius > 0.0, "a polygon needs a positive radius");
        let start = center + to_cartesian(radius, rotation);
        let mut data = Data::new().move_to((start.x, start.y));
        for i in 1..sides {
            let vertex = center + to_cartesian(radius, rotation + TAU * i as f64 / sides as f64);
            data = data.line_to((vertex.x, vertex.y));
        }
        Path::new().set("fill", "black").set("d", data.close())
    }

    /// An arrow from `from` to `to`.
    ///
    /// The shaft is pulled back from the tip by one and a half head radii so
    /// the triangular head does not overlap it; the head is a 3-gon rotated
    /// along the direction of travel. Coincident endpoints leave that
    /// direction undefined, callers must not pass them.
    pub fn arrow(&self, from: Point, to: Point, dashed: bool) -> Group {
        let width = self.main_stroke_width / 2.0;
        let head_radius = width * self.arrow_head_factor;
        let angle = (to.y - from.y).atan2(to.x - from.x);
        let offset = to_cartesian(head_radius, angle);

        let mut shaft = Line::new()
            .set("x1", from.x)
            .set("y1", from.y)
            .set("x2", to.x - offset.x * 1.5)
            .set("y2", to.y - offset.y * 1.5)
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", width);
        if dashed {
            shaft = shaft.set("stroke-dasharray", self.dash_pattern.as_str());
        }

        let head = self.regular_polygon(to - offset, 3, head_radius, angle);

        let mut group = Group::new();
        group.append(shaft);
        group.append(head);
        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RenderOptions;

    fn sheet() -> Sheet {
        Sheet::new(&RenderOptions::default())
    }

    #[test]
    fn pens_map_to_the_three_styles() {
        let sheet = sheet();
        let primary = sheet.line(Point::new(0.0, 0.0), Point::new(1.0, 0.0), Pen::Primary);
        let secondary = sheet.line(Point::new(0.0, 0.0), Point::new(1.0, 0.0), Pen::Secondary);
        let thin = sheet.line(Point::new(0.0, 0.0), Point::new(1.0, 0.0), Pen::Thin);
        assert!(primary.to_string().contains("stroke-width=\"5\""));
        assert!(!primary.to_string().contains("stroke-dasharray"));
        assert!(secondary.to_string().contains("stroke-dasharray=\"20 10\""));
        assert!(thin.to_string().contains("stroke-width=\"1\""));
    }

    #[test]
    fn markers_signal_resolved_versus_control() {
        let sheet = sheet();
        let resolved = sheet.marker(Point::new(1.0, 2.0), true);
        let control = sheet.marker(Point::new(1.0, 2.0), false);
        assert!(resolved.to_string().contains("fill=\"black\""));
        assert!(control.to_string().contains("fill=\"white\""));
    }

    #[test]
    fn regular_polygon_places_the_first_vertex_at_the_rotation() {
        let sheet = sheet();
        let triangle = sheet.regular_polygon(Point::new(10.0, 10.0), 3, 2.0, 0.0);
        // vertex 0 sits at center + (radius, 0)
        assert!(triangle.to_string().contains("M12,10"));
    }

    #[test]
    #[should_panic(expected = "at least three vertices")]
    fn degenerate_polygon_is_a_caller_error() {
        sheet().regular_polygon(Point::new(0.0, 0.0), 2, 1.0, 0.0);
    }

    #[test]
    fn arrow_pulls_the_shaft_back_from_the_tip() {
        let sheet = sheet();
        let arrow = sheet.arrow(Point::new(0.0, 0.0), Point::new(100.0, 0.0), false);
        let rendered = arrow.to_string();
        // head radius is 12.5, so the shaft stops 18.75 short of the tip
        assert!(rendered.contains("x2=\"81.25\""));
        assert!(rendered.contains("<path"));
    }
}
