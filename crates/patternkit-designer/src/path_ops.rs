//! Pure geometry on contours, guides and mirrors used by the reducer.
//!
//! A contour is an `origin` followed by [`Segment`]s, each continuing from the
//! previous endpoint. Orientation is measured in screen coordinates (y grows
//! downward), so a positive shoelace area is clockwise as drawn.

use std::f64::consts::TAU;

use patternkit_core::{apply_matrices, chain_is_reflection, Coord, Matrix, Mirror, MirrorParent};

use crate::model::{Clip, Guide, GuideGeom, GuideKind, Path, Segment};

/// Transforms one segment. `reflected` swaps arc direction.
pub fn transform_segment(segment: &Segment, chain: &[Matrix], reflected: bool) -> Segment {
    match *segment {
        Segment::Line { to } => Segment::Line {
            to: apply_matrices(to, chain),
        },
        Segment::Arc {
            center,
            to,
            clockwise,
        } => Segment::Arc {
            center: apply_matrices(center, chain),
            to: apply_matrices(to, chain),
            clockwise: clockwise != reflected,
        },
        Segment::Quad { control, to } => Segment::Quad {
            control: apply_matrices(control, chain),
            to: apply_matrices(to, chain),
        },
    }
}

pub fn transform_contour(
    origin: Coord,
    segments: &[Segment],
    chain: &[Matrix],
) -> (Coord, Vec<Segment>) {
    let reflected = chain_is_reflection(chain);
    (
        apply_matrices(origin, chain),
        segments
            .iter()
            .map(|segment| transform_segment(segment, chain, reflected))
            .collect(),
    )
}

pub fn transform_path(path: &Path, chain: &[Matrix]) -> Path {
    let (origin, segments) = transform_contour(path.origin, &path.segments, chain);
    Path {
        origin,
        segments,
        ..path.clone()
    }
}

pub fn transform_clip(clip: &Clip, chain: &[Matrix]) -> Clip {
    let (origin, segments) = transform_contour(clip.origin, &clip.segments, chain);
    Clip {
        origin,
        segments,
        ..clip.clone()
    }
}

pub fn transform_guide(guide: &Guide, chain: &[Matrix]) -> Guide {
    Guide {
        geom: guide.geom.map_points(|p| apply_matrices(p, chain)),
        ..guide.clone()
    }
}

/// Moves a mirror's defining points; an embedded parent moves with it.
pub fn transform_mirror(mirror: &Mirror, chain: &[Matrix]) -> Mirror {
    let parent = match &mirror.parent {
        Some(MirrorParent::Reified(parent)) => {
            Some(MirrorParent::Reified(Box::new(transform_mirror(parent, chain))))
        }
        other => other.clone(),
    };
    Mirror {
        origin: apply_matrices(mirror.origin, chain),
        point: apply_matrices(mirror.point, chain),
        parent,
        ..mirror.clone()
    }
}

/// Midpoint of an arc from `from` to `to` around `center`.
pub fn arc_midpoint(from: Coord, center: Coord, to: Coord, clockwise: bool) -> Coord {
    let radius = center.distance_to(&from);
    let start = center.angle_to(&from);
    let end = center.angle_to(&to);
    // Screen coordinates: clockwise sweeps toward increasing angle.
    let mut sweep = if clockwise { end - start } else { start - end };
    sweep = sweep.rem_euclid(TAU);
    if sweep == 0.0 {
        sweep = TAU;
    }
    let mid = if clockwise {
        start + sweep / 2.0
    } else {
        start - sweep / 2.0
    };
    center.push(mid, radius)
}

/// Endpoints of the contour, with each curve also sampled at its middle.
pub fn contour_points(origin: Coord, segments: &[Segment]) -> Vec<Coord> {
    let mut points = vec![origin];
    let mut prev = origin;
    for segment in segments {
        match *segment {
            Segment::Line { .. } => {}
            Segment::Arc {
                center,
                to,
                clockwise,
            } => points.push(arc_midpoint(prev, center, to, clockwise)),
            Segment::Quad { control, to } => {
                let mid = prev.midpoint(&to).midpoint(&control);
                points.push(mid);
            }
        }
        prev = segment.to();
        points.push(prev);
    }
    points
}

/// Shoelace area over [`contour_points`]; positive when clockwise on screen.
pub fn signed_area(origin: Coord, segments: &[Segment]) -> f64 {
    let points = contour_points(origin, segments);
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        / 2.0
}

/// The same contour traversed backwards.
pub fn reverse_segments(origin: Coord, segments: &[Segment]) -> (Coord, Vec<Segment>) {
    let mut starts = Vec::with_capacity(segments.len());
    let mut prev = origin;
    for segment in segments {
        starts.push(prev);
        prev = segment.to();
    }

    let reversed = segments
        .iter()
        .zip(starts)
        .rev()
        .map(|(segment, start)| match *segment {
            Segment::Line { .. } => Segment::Line { to: start },
            Segment::Arc {
                center, clockwise, ..
            } => Segment::Arc {
                center,
                to: start,
                clockwise: !clockwise,
            },
            Segment::Quad { control, .. } => Segment::Quad { control, to: start },
        })
        .collect();
    (prev, reversed)
}

/// Reverses counter-clockwise contours so every closed shape winds clockwise.
pub fn ensure_clockwise(origin: Coord, segments: Vec<Segment>) -> (Coord, Vec<Segment>) {
    if signed_area(origin, &segments) < 0.0 {
        reverse_segments(origin, &segments)
    } else {
        (origin, segments)
    }
}

fn collinear_same_direction(a: Coord, b: Coord, c: Coord) -> bool {
    let ab = b - a;
    let bc = c - b;
    let cross = ab.x * bc.y - ab.y * bc.x;
    let dot = ab.x * bc.x + ab.y * bc.y;
    cross.abs() <= 1e-9 * (ab.x.abs() + ab.y.abs() + bc.x.abs() + bc.y.abs()) && dot > 0.0
}

/// Drops zero-length lines and merges consecutive collinear lines.
pub fn simplify_path(origin: Coord, segments: Vec<Segment>) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::with_capacity(segments.len());
    // Pen position, and where the last kept segment began.
    let mut prev = origin;
    let mut last_start = origin;

    for segment in segments {
        if let Segment::Line { to } = segment {
            if to == prev {
                continue;
            }
            if let Some(Segment::Line { to: last_to }) = out.last_mut() {
                if collinear_same_direction(last_start, *last_to, to) {
                    *last_to = to;
                    prev = to;
                    continue;
                }
            }
        }
        last_start = prev;
        prev = segment.to();
        out.push(segment);
    }
    out
}

fn coord_key(coord: Coord, precision: u32) -> String {
    let factor = 10f64.powi(precision as i32);
    let round = |v: f64| {
        let r = (v * factor).round() / factor;
        // Collapse -0 so mirrored copies on an axis share keys.
        if r == 0.0 {
            0.0
        } else {
            r
        }
    };
    let p = precision as usize;
    format!("{:.p$},{:.p$}", round(coord.x), round(coord.y))
}

/// One key per segment, each naming its start point, so equal contours
/// produce equal key sets regardless of where they begin.
pub fn path_to_segment_keys(origin: Coord, segments: &[Segment], precision: u32) -> Vec<String> {
    let mut prev = origin;
    segments
        .iter()
        .map(|segment| {
            let key = match *segment {
                Segment::Line { to } => format!(
                    "L {} {}",
                    coord_key(prev, precision),
                    coord_key(to, precision)
                ),
                Segment::Arc {
                    center,
                    to,
                    clockwise,
                } => format!(
                    "A {} {} {} {}",
                    coord_key(prev, precision),
                    coord_key(center, precision),
                    coord_key(to, precision),
                    clockwise
                ),
                Segment::Quad { control, to } => format!(
                    "Q {} {} {}",
                    coord_key(prev, precision),
                    coord_key(control, precision),
                    coord_key(to, precision)
                ),
            };
            prev = segment.to();
            key
        })
        .collect()
}

pub fn path_to_reversed_segment_keys(
    origin: Coord,
    segments: &[Segment],
    precision: u32,
) -> Vec<String> {
    let (origin, reversed) = reverse_segments(origin, segments);
    path_to_segment_keys(origin, &reversed, precision)
}

/// Order-independent key for a whole contour.
pub fn canonical_key(mut keys: Vec<String>) -> String {
    keys.sort();
    keys.join(";")
}

/// Number of points a pending guide of `kind` collects.
pub fn guide_points(kind: GuideKind) -> usize {
    kind.points()
}

/// Builds the guide for a finished pending construction. `None` when the
/// point count does not match the kind.
pub fn pending_guide(
    kind: GuideKind,
    points: &[Coord],
    shift: bool,
    extent: Option<u32>,
) -> Option<GuideGeom> {
    if points.len() != kind.points() {
        return None;
    }
    let geom = match (kind, points) {
        (GuideKind::Line, &[p1, p2]) => GuideGeom::Line {
            p1,
            p2,
            limit: shift,
        },
        (GuideKind::Circle, &[center, radius]) => GuideGeom::Circle {
            center,
            radius,
            half: shift,
            multiples: extent.unwrap_or(0),
        },
        (GuideKind::PerpendicularBisector, &[p1, p2]) => {
            GuideGeom::PerpendicularBisector { p1, p2 }
        }
        (GuideKind::Perpendicular, &[p1, p2]) => GuideGeom::Perpendicular { p1, p2 },
        (GuideKind::Split, &[p1, p2]) => GuideGeom::Split {
            p1,
            p2,
            count: extent.unwrap_or(2),
        },
        (GuideKind::Polygon, &[p1, p2]) => GuideGeom::Polygon {
            p1,
            p2,
            sides: extent.unwrap_or(6),
            to_center: shift,
        },
        (GuideKind::AngleBisector, &[p0, p1, p2]) => GuideGeom::AngleBisector { p0, p1, p2 },
        (GuideKind::InCircle, &[p1, p2, p3]) => GuideGeom::InCircle { p1, p2, p3 },
        (GuideKind::CircumCircle, &[p1, p2, p3]) => GuideGeom::CircumCircle { p1, p2, p3 },
        _ => return None,
    };
    Some(geom)
}
