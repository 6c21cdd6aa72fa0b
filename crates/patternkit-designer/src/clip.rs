//! Clipping paths against a clip contour.
//!
//! Real boolean clipping lives outside this crate; the reducer only needs a
//! [`PathClipper`] to tell it what each path becomes. [`ContainmentClipper`]
//! is the built-in fallback: it keeps or drops whole paths by where their
//! points lie and never splits them.

use patternkit_core::Coord;

use crate::model::{Clip, Path};
use crate::path_ops::contour_points;

/// Which side of the clip contour survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipMode {
    Inside,
    Outside,
}

impl ClipMode {
    pub fn for_clip(clip: &Clip) -> Self {
        if clip.outside {
            ClipMode::Outside
        } else {
            ClipMode::Inside
        }
    }
}

/// Computes the pieces of `path` that survive clipping.
///
/// Returning exactly `[path.clone()]` means "unchanged"; the reducer leaves
/// such paths alone. Any other result replaces the path, and an empty result
/// removes it.
pub trait PathClipper: Send + Sync {
    fn clip_path(&self, path: &Path, clip: &Clip, mode: ClipMode) -> Vec<Path>;
}

/// Keeps paths with at least one point on the surviving side.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainmentClipper;

impl PathClipper for ContainmentClipper {
    fn clip_path(&self, path: &Path, clip: &Clip, mode: ClipMode) -> Vec<Path> {
        let polygon = contour_points(clip.origin, &clip.segments);
        let points = contour_points(path.origin, &path.segments);
        let inside = points
            .iter()
            .filter(|p| point_in_polygon(**p, &polygon))
            .count();

        let survives = match mode {
            ClipMode::Inside => inside > 0,
            ClipMode::Outside => inside < points.len(),
        };
        if survives {
            vec![path.clone()]
        } else {
            vec![]
        }
    }
}

/// Even-odd ray casting test.
pub fn point_in_polygon(point: Coord, polygon: &[Coord]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
