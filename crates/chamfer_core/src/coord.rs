//! Grid coordinates and volume extents.

use std::fmt;
use std::ops::{Add, Sub};

use crate::direction::{Axis, Direction};

/// A cell position. Components are signed so that neighbour offsets and
/// out-of-range positions are representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl Coord {
    /// The origin.
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Creates a new coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Component along `axis`.
    #[inline]
    #[must_use]
    pub const fn get(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Copy with the component along `axis` replaced.
    #[inline]
    #[must_use]
    pub const fn with(self, axis: Axis, value: i32) -> Self {
        match axis {
            Axis::X => Self::new(value, self.y, self.z),
            Axis::Y => Self::new(self.x, value, self.z),
            Axis::Z => Self::new(self.x, self.y, value),
        }
    }

    /// One step along `direction`.
    #[inline]
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let o = direction.offset();
        Self::new(self.x + o[0], self.y + o[1], self.z + o[2])
    }

    /// Component-wise minimum.
    #[inline]
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum.
    #[inline]
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// As `[x, y, z]`.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[i32; 3]> for Coord {
    fn from(v: [i32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl Add for Coord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Coord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Size of a volume along each axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Extents {
    /// Cells along X.
    pub width: u32,
    /// Cells along Y.
    pub height: u32,
    /// Cells along Z.
    pub depth: u32,
}

impl Extents {
    /// Zero in every axis.
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Creates new extents.
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Extents from signed sizes. Any non-positive size collapses all three
    /// to zero.
    #[must_use]
    pub fn from_signed(width: i32, height: i32, depth: i32) -> Self {
        if width <= 0 || height <= 0 || depth <= 0 {
            Self::ZERO
        } else {
            Self::new(width as u32, height as u32, depth as u32)
        }
    }

    /// Size along `axis`.
    #[inline]
    #[must_use]
    pub const fn get(self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
            Axis::Z => self.depth,
        }
    }

    /// Copy with the size along `axis` replaced.
    #[inline]
    #[must_use]
    pub const fn with(self, axis: Axis, value: u32) -> Self {
        match axis {
            Axis::X => Self::new(value, self.height, self.depth),
            Axis::Y => Self::new(self.width, value, self.depth),
            Axis::Z => Self::new(self.width, self.height, value),
        }
    }

    /// Total cell count.
    #[inline]
    #[must_use]
    pub const fn volume(self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    /// True if any axis is zero.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.volume() == 0
    }

    /// True if `coord` lies inside `[0, extent)` on every axis.
    #[inline]
    #[must_use]
    pub const fn contains(self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.z >= 0
            && (coord.x as u32) < self.width
            && (coord.y as u32) < self.height
            && (coord.z as u32) < self.depth
    }

    /// Flat index `x + y * width + z * width * height`, or `None` outside.
    #[inline]
    #[must_use]
    pub const fn index_of(self, coord: Coord) -> Option<usize> {
        if self.contains(coord) {
            let w = self.width as usize;
            let h = self.height as usize;
            Some(coord.x as usize + coord.y as usize * w + coord.z as usize * w * h)
        } else {
            None
        }
    }

    /// Inverse of [`Self::index_of`]. `index` must be below [`Self::volume`].
    #[inline]
    #[must_use]
    pub const fn coord_of(self, index: usize) -> Coord {
        let w = self.width as usize;
        let h = self.height as usize;
        Coord::new(
            (index % w) as i32,
            ((index / w) % h) as i32,
            (index / (w * h)) as i32,
        )
    }

    /// Clamps `coord` to the nearest in-bounds cell. Meaningless on empty
    /// extents.
    #[inline]
    #[must_use]
    pub fn clamp(self, coord: Coord) -> Coord {
        let c = |v: i32, e: u32| v.clamp(0, e.saturating_sub(1) as i32);
        Coord::new(
            c(coord.x, self.width),
            c(coord.y, self.height),
            c(coord.z, self.depth),
        )
    }

    /// The largest in-bounds coordinate.
    #[inline]
    #[must_use]
    pub const fn max_coord(self) -> Coord {
        Coord::new(
            self.width as i32 - 1,
            self.height as i32 - 1,
            self.depth as i32 - 1,
        )
    }
}

impl fmt::Display for Extents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}
