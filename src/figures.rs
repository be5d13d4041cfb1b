//! The figure catalog.
//!
//! Every figure is a pure function from a [`Sheet`] to one finished canvas;
//! all geometry is hand-chosen constants scaled to the canvas size. The
//! rebuild pipeline discovers figures through [`CATALOG`], so a new figure
//! only needs an entry there to be picked up.

use anyhow::Result;
use smallvec::smallvec;
use svg::node::element::path::Data;
use svg::node::element::Group;
use svg::Document;
use svg::Node;

use crate::casteljau::ControlPolygon;
use crate::geometry::{lerp, Point};
use crate::sheet::{Pen, Sheet};

/// Height over width of the square-ish construction figures.
const TALL_ASPECT: f64 = 3.0 / 4.0;
/// Height over width of the wide overview figures.
const WIDE_ASPECT: f64 = 9.0 / 16.0;

/// A figure-producing function.
///
/// Failures are contained per figure by the rebuild pipeline; one broken
/// figure never aborts its siblings.
pub type FigureFn = fn(&Sheet) -> Result<Document>;

/// Every figure the rebuild pipeline renders, in report order.
pub const CATALOG: &[(&str, FigureFn)] = &[
    ("continuous_bezier", continuous_bezier),
    ("cubic", cubic),
    ("general", general),
    ("linear", linear),
    ("quadratic", quadratic),
];

/// Two points and the interpolated value between them.
pub fn linear(sheet: &Sheet) -> Result<Document> {
    let s = sheet.params.linear;
    let width = sheet.width;
    let height = width * 0.25;
    let ends = [
        Point::new(width * 0.15, height * 0.92),
        Point::new(width * 0.85, height * 0.08),
    ];
    let reached = lerp(ends[0], ends[1], s);

    let mut img = sheet.canvas(height);
    img.append(sheet.line(ends[0], ends[1], Pen::Secondary));
    img.append(sheet.line(ends[0], reached, Pen::Primary));
    img.append(sheet.marker(ends[0], false));
    img.append(sheet.marker(ends[1], false));
    img.append(sheet.marker(reached, true));
    Ok(img)
}

/// Three control points, one visible reduction level down to the resolved
/// point, with the exact quadratic overlaid for comparison.
pub fn quadratic(sheet: &Sheet) -> Result<Document> {
    let s = sheet.params.quadratic;
    let width = sheet.width;
    let height = width * TALL_ASPECT;
    let controls = ControlPolygon(smallvec![
        Point::new(width * 0.2, height * 0.8),
        Point::new(width * 0.45, height * 0.2),
        Point::new(width * 0.8, height * 0.8),
    ]);

    let mut img = sheet.canvas(height);

    // the full curve through the native quadratic primitive
    let full = Data::new()
        .move_to((controls[0].x, controls[0].y))
        .quadratic_curve_to((controls[1].x, controls[1].y, controls[2].x, controls[2].y));
    img.append(sheet.path(full, Pen::Secondary));
    img.append(sheet.line(controls[0], controls[1], Pen::Thin));
    img.append(sheet.line(controls[1], controls[2], Pen::Thin));

    let level = controls.reduce_once(s);
    let reached = controls.eval(s);
    img.append(sheet.line(level[0], level[1], Pen::Thin));

    // the part already resolved is itself a quadratic: the lower half of the
    // de Casteljau split at s
    let resolved = Data::new()
        .move_to((controls[0].x, controls[0].y))
        .quadratic_curve_to((level[0].x, level[0].y, reached.x, reached.y));
    img.append(sheet.path(resolved, Pen::Primary));

    for &p in controls.iter() {
        img.append(sheet.marker(p, false));
    }
    for &p in level.iter() {
        img.append(sheet.marker(p, false));
    }
    img.append(sheet.marker(reached, true));
    Ok(img)
}

/// Four control points reduced across two levels down to the resolved point,
/// with the exact cubic overlaid.
pub fn cubic(sheet: &Sheet) -> Result<Document> {
    let s = sheet.params.cubic;
    let width = sheet.width;
    let height = width * TALL_ASPECT;
    let controls = ControlPolygon(smallvec![
        Point::new(width * 0.2, height * 0.8),
        Point::new(width * 0.35, height * 0.2),
        Point::new(width * 0.7, height * 0.25),
        Point::new(width * 0.8, height * 0.8),
    ]);

    let mut img = sheet.canvas(height);

    let full = Data::new().move_to((controls[0].x, controls[0].y)).cubic_curve_to((
        controls[1].x,
        controls[1].y,
        controls[2].x,
        controls[2].y,
        controls[3].x,
        controls[3].y,
    ));
    img.append(sheet.path(full, Pen::Secondary));
    for pair in controls.windows(2) {
        img.append(sheet.line(pair[0], pair[1], Pen::Thin));
    }

    let first = controls.reduce_once(s);
    let second = first.reduce_once(s);
    let reached = controls.eval(s);
    for pair in first.windows(2) {
        img.append(sheet.line(pair[0], pair[1], Pen::Thin));
    }
    img.append(sheet.line(second[0], second[1], Pen::Thin));

    for &p in controls.iter().chain(first.iter()).chain(second.iter()) {
        img.append(sheet.marker(p, false));
    }
    img.append(sheet.marker(reached, true));

    // lower half of the split at s, drawn last so it sits on top
    let resolved = Data::new().move_to((controls[0].x, controls[0].y)).cubic_curve_to((
        first[0].x, first[0].y, second[0].x, second[0].y, reached.x, reached.y,
    ));
    img.append(sheet.path(resolved, Pen::Primary));
    Ok(img)
}

/// Six control points: the whole reduction pyramid frozen at one parameter,
/// plus the sampled full curve split into its already-resolved and remaining
/// portions.
pub fn general(sheet: &Sheet) -> Result<Document> {
    let s = sheet.params.general;
    let width = sheet.width;
    let height = width * WIDE_ASPECT;
    let controls: ControlPolygon = [
        (0.07, 0.85),
        (0.17, 0.29),
        (0.4, 0.38),
        (0.65, 0.79),
        (0.83, 0.57),
        (0.93, 0.14),
    ]
    .iter()
    .map(|&(x, y)| Point::new(x * width, y * height))
    .collect();

    let mut lines = Group::new();
    let mut points = Group::new();
    for level in controls.levels(s) {
        if level.len() == 1 {
            points.append(sheet.marker(level[0], true));
            continue;
        }
        for pair in level.windows(2) {
            lines.append(sheet.line(pair[0], pair[1], Pen::Secondary));
        }
        for &p in level.iter() {
            points.append(sheet.marker(p, false));
        }
    }

    let mut full = Data::new().move_to((controls[0].x, controls[0].y));
    let mut traced = Data::new().move_to((controls[0].x, controls[0].y));
    for (t, p) in controls.sample(sheet.curve_steps).skip(1) {
        full = full.line_to((p.x, p.y));
        if t <= s {
            traced = traced.line_to((p.x, p.y));
        }
    }

    let mut img = sheet.canvas(height);
    img.append(sheet.path(full, Pen::Primary));
    img.append(sheet.path(traced, Pen::Thin));
    img.append(lines);
    img.append(points);
    Ok(img)
}

/// A chain of cubic segments sharing direction continuity at the joins; the
/// control handles are drawn as arrows to show tangent direction and
/// magnitude.
pub fn continuous_bezier(sheet: &Sheet) -> Result<Document> {
    let width = sheet.width;
    let height = width * WIDE_ASPECT;
    let at = |x: f64, y: f64| Point::new(x * width, y * height);
    let joins = [at(0.1, 0.9), at(0.3, 0.32), at(0.6, 0.45), at(0.9, 0.9)];
    let handles = [at(0.2, -0.2), at(0.1, -0.08), at(0.07, 0.1), at(0.15, 0.1)];

    let mut data = Data::new().move_to((joins[0].x, joins[0].y));
    let mut overlay = Group::new();
    overlay.append(sheet.marker(joins[0], true));
    for i in 0..joins.len() - 1 {
        // the outgoing handle of one join and the mirrored incoming handle of
        // the next share the same direction, which keeps the chain smooth
        let outgoing = joins[i] + handles[i];
        let incoming = joins[i + 1] - handles[i + 1];
        data = data.cubic_curve_to((
            outgoing.x,
            outgoing.y,
            incoming.x,
            incoming.y,
            joins[i + 1].x,
            joins[i + 1].y,
        ));
        overlay.append(sheet.arrow(joins[i], outgoing, false));
        overlay.append(sheet.arrow(joins[i + 1], incoming, true));
        overlay.append(sheet.marker(joins[i + 1], true));
    }

    let mut img = sheet.canvas(height);
    img.append(sheet.path(data, Pen::Primary));
    img.append(overlay);
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RenderOptions;

    #[test]
    fn every_catalog_figure_renders() {
        let sheet = Sheet::new(&RenderOptions::default());
        for &(name, figure) in CATALOG {
            let img = figure(&sheet).unwrap_or_else(|e| panic!("{name} failed: {e}"));
            let rendered = img.to_string();
            assert!(rendered.starts_with("<svg"), "{name} is not a canvas");
            assert!(rendered.contains("stroke"), "{name} drew nothing");
        }
    }

    #[test]
    fn catalog_names_are_unique_and_sorted() {
        let names: Vec<&str> = CATALOG.iter().map(|&(name, _)| name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn general_traces_with_fewer_samples_too() {
        // the sample count is configurable; the figure must not depend on it
        let mut options = RenderOptions::default();
        options.curve_steps = 16;
        let sheet = Sheet::new(&options);
        general(&sheet).unwrap();
    }
}
