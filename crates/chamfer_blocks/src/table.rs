//! The octant decision table.
//!
//! [`classify_octant`] maps the seven neighbours of one octant to a topology
//! category. Everything is expressed in the octant's own frame, so the same
//! table serves all eight octants; the caller turns the result into a
//! positioned descriptor.
//!
//! ## Cases by axis neighbour count
//!
//! | count | outcome |
//! |-------|---------|
//! | 0 | Corner, plus break points on diagonals when merging |
//! | 1 | Edge along the present axis, or EdgeToEdge / SideToPositiveEdge / BreakPoint |
//! | 2 | Side facing the absent axis, or SideToNegativeEdge / NegativeEdge / NegativeCorner |
//! | 3 | Cross, NegativeCorner, NegativeEdge, or nothing when fully enclosed |

use chamfer_core::Axis;

use crate::descriptor::BlockType;
use crate::sample::OctantSample;

/// Flags the table reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableFlags {
    /// Replace diagonal-touching edges with break points.
    pub merge_close_edges: bool,
}

/// Outcome for one octant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OctantClass {
    /// Hidden; nothing to emit.
    Interior,
    /// Convex corner. `break_points[a]` marks a diagonal neighbour touching
    /// the cell edge that runs along axis `a`.
    Corner {
        /// Break-point edges, indexed by edge axis.
        break_points: [bool; 3],
    },
    /// All three axis neighbours, no diagonals.
    Cross,
    /// Concave corner.
    NegativeCorner,
    /// Concave edge running along the axis.
    NegativeEdge(Axis),
    /// Flat face with this normal axis.
    Side(Axis),
    /// Face with this normal axis running into a concave edge.
    SideToNegativeEdge(Axis),
    /// Convex edge running along the axis.
    Edge(Axis),
    /// Convex edge bending toward the given axis.
    EdgeToEdge(Axis),
    /// Convex edge along the axis rising out of a face.
    SideToPositiveEdge(Axis),
    /// Edge along the axis merged with a diagonal neighbour.
    BreakPoint(Axis),
}

impl OctantClass {
    /// Block type and axis of the primary block, if any.
    #[must_use]
    pub const fn block(self) -> Option<(BlockType, Option<Axis>)> {
        match self {
            Self::Interior => None,
            Self::Corner { .. } => Some((BlockType::Corner, None)),
            Self::Cross => Some((BlockType::Cross, None)),
            Self::NegativeCorner => Some((BlockType::NegativeCorner, None)),
            Self::NegativeEdge(a) => Some((BlockType::NegativeEdge, Some(a))),
            Self::Side(a) => Some((BlockType::Side, Some(a))),
            Self::SideToNegativeEdge(a) => Some((BlockType::SideToNegativeEdge, Some(a))),
            Self::Edge(a) => Some((BlockType::Edge, Some(a))),
            Self::EdgeToEdge(a) => Some((BlockType::EdgeToEdge, Some(a))),
            Self::SideToPositiveEdge(a) => Some((BlockType::SideToPositiveEdge, Some(a))),
            Self::BreakPoint(a) => Some((BlockType::BreakPoint, Some(a))),
        }
    }
}

/// Classifies one octant.
#[must_use]
pub fn classify_octant(o: &OctantSample, flags: TableFlags) -> OctantClass {
    match o.neighbour_count() {
        0 => corner(o, flags),
        1 => one_neighbour(o, flags),
        2 => two_neighbours(o),
        _ => three_neighbours(o),
    }
}

fn corner(o: &OctantSample, flags: TableFlags) -> OctantClass {
    let break_points = if flags.merge_close_edges {
        o.cross
    } else {
        [false; 3]
    };
    OctantClass::Corner { break_points }
}

/// One axis neighbour `a`: an edge running along `a`.
fn one_neighbour(o: &OctantSample, flags: TableFlags) -> OctantClass {
    let Some(a) = Axis::ALL.into_iter().find(|a| o.axis[a.index()]) else {
        return OctantClass::Interior;
    };
    let (b, c) = (a.next(), a.prev());
    let across = o.cross_of(b, c);
    let toward_b = o.cross_of(a, b);
    let toward_c = o.cross_of(a, c);

    if across {
        return if flags.merge_close_edges {
            OctantClass::BreakPoint(a)
        } else {
            OctantClass::Edge(a)
        };
    }
    match (toward_b, toward_c, o.corner) {
        (true, true, true) => OctantClass::SideToPositiveEdge(a),
        // One diagonal beside the edge: bend toward it.
        (true, false, true) => OctantClass::EdgeToEdge(b),
        (false, true, true) => OctantClass::EdgeToEdge(c),
        _ => OctantClass::Edge(a),
    }
}

/// Two axis neighbours `a`, `b`: a face whose normal is the absent axis `c`.
fn two_neighbours(o: &OctantSample) -> OctantClass {
    let Some(c) = Axis::ALL.into_iter().find(|c| !o.axis[c.index()]) else {
        return OctantClass::Interior;
    };
    let (a, b) = (c.next(), c.prev());
    if !o.cross_of(a, b) {
        return OctantClass::SideToNegativeEdge(c);
    }
    match (o.cross_of(a, c), o.cross_of(b, c)) {
        (false, false) => OctantClass::Side(c),
        // A wall rising on the `a` side meets the face along `b`.
        (true, false) => OctantClass::NegativeEdge(b),
        (false, true) => OctantClass::NegativeEdge(a),
        (true, true) => OctantClass::NegativeCorner,
    }
}

fn three_neighbours(o: &OctantSample) -> OctantClass {
    match o.cross_count() {
        0 => OctantClass::Cross,
        1 => OctantClass::NegativeCorner,
        2 => match Axis::ALL.into_iter().find(|r| !o.cross[r.index()]) {
            Some(r) => OctantClass::NegativeEdge(r),
            None => OctantClass::Interior,
        },
        _ => OctantClass::Interior,
    }
}
