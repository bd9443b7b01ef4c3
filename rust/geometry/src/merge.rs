// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Overlap merging - reduce split edges to the outline of the wall union
//!
//! Rectangle boundaries are counter-clockwise, so each split edge has solid
//! wall on its left. An edge is part of the union outline only if its right
//! side is empty:
//! - an edge whose reverse also exists has wall on both sides
//! - an edge running through the interior of another rectangle has wall on both sides
//!
//! Identical directed duplicates come from collinear overlapping walls and are
//! kept once.

use crate::edge::Edge;
use crate::rectangle::Rectangle;
use crate::tolerance::{PointKey, Tolerance};
use rustc_hash::FxHashSet;
use tracing::debug;

/// Counts of edges removed while merging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub duplicates: usize,
    pub back_to_back: usize,
    pub interior: usize,
}

/// Keep only the edges that bound the union of `rectangles`
///
/// Input order is preserved for the surviving edges.
pub fn merge_overlapping(
    edges: &[Edge],
    rectangles: &[Rectangle],
    tol: &Tolerance,
) -> (Vec<Edge>, MergeStats) {
    let present: FxHashSet<(PointKey, PointKey)> = edges.iter().map(|e| e.key(tol)).collect();
    let mut emitted: FxHashSet<(PointKey, PointKey)> = FxHashSet::default();
    let mut stats = MergeStats::default();
    let mut result = Vec::with_capacity(edges.len());

    for edge in edges {
        let (start, end) = edge.key(tol);

        if !emitted.insert((start, end)) {
            stats.duplicates += 1;
            continue;
        }

        if present.contains(&(end, start)) {
            stats.back_to_back += 1;
            continue;
        }

        let mid = edge.midpoint();
        if rectangles
            .iter()
            .any(|r| r.contains_strictly(&mid, tol.bounds_tolerance))
        {
            stats.interior += 1;
            continue;
        }

        result.push(*edge);
    }

    debug!(
        kept = result.len(),
        duplicates = stats.duplicates,
        back_to_back = stats.back_to_back,
        interior = stats.interior,
        "merged overlapping wall edges"
    );

    (result, stats)
}
