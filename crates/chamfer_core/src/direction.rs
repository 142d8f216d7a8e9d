//! Axes and the six axis-aligned directions.
//!
//! Coordinates are right-handed: +X right, +Y up, +Z forward.
//! `Axis::next` walks X -> Y -> Z -> X and is the cyclic order every
//! tie-break in the workspace follows.

use std::fmt;

/// One of the three grid axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axis {
    /// Width axis.
    X,
    /// Height axis.
    Y,
    /// Depth axis.
    Z,
}

impl Axis {
    /// All axes in cyclic order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Axis from an integer, reduced modulo 3.
    #[inline]
    #[must_use]
    pub const fn from_index(index: i32) -> Self {
        match index.rem_euclid(3) {
            0 => Self::X,
            1 => Self::Y,
            _ => Self::Z,
        }
    }

    /// Position of the axis in `[x, y, z]` arrays.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// The cyclically following axis (X -> Y -> Z -> X).
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::Z,
            Self::Z => Self::X,
        }
    }

    /// The cyclically preceding axis.
    #[inline]
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::X => Self::Z,
            Self::Y => Self::X,
            Self::Z => Self::Y,
        }
    }

    /// The axis that is neither `self` nor `other`.
    ///
    /// Returns `self.next()` when both arguments are the same axis.
    #[inline]
    #[must_use]
    pub const fn third(self, other: Self) -> Self {
        match (self, other) {
            (Self::X, Self::Y) | (Self::Y, Self::X) => Self::Z,
            (Self::Y, Self::Z) | (Self::Z, Self::Y) => Self::X,
            (Self::X, Self::Z) | (Self::Z, Self::X) => Self::Y,
            _ => self.next(),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        };
        f.write_str(name)
    }
}

/// One of the six axis-aligned unit directions.
///
/// The discriminant is `axis * 2 + negative`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Direction {
    /// +X.
    Right = 0,
    /// -X.
    Left = 1,
    /// +Y.
    Up = 2,
    /// -Y.
    Down = 3,
    /// +Z.
    Forward = 4,
    /// -Z.
    Back = 5,
}

impl Direction {
    /// All directions in discriminant order.
    pub const ALL: [Self; 6] = [
        Self::Right,
        Self::Left,
        Self::Up,
        Self::Down,
        Self::Forward,
        Self::Back,
    ];

    /// Direction from its discriminant, reduced modulo 6.
    #[inline]
    #[must_use]
    pub const fn from_index(index: i32) -> Self {
        match index.rem_euclid(6) {
            0 => Self::Right,
            1 => Self::Left,
            2 => Self::Up,
            3 => Self::Down,
            4 => Self::Forward,
            _ => Self::Back,
        }
    }

    /// Direction along `axis`, positive or negative.
    #[inline]
    #[must_use]
    pub const fn from_axis(axis: Axis, positive: bool) -> Self {
        match (axis, positive) {
            (Axis::X, true) => Self::Right,
            (Axis::X, false) => Self::Left,
            (Axis::Y, true) => Self::Up,
            (Axis::Y, false) => Self::Down,
            (Axis::Z, true) => Self::Forward,
            (Axis::Z, false) => Self::Back,
        }
    }

    /// Discriminant as an array index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The axis this direction runs along.
    #[inline]
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Right | Self::Left => Axis::X,
            Self::Up | Self::Down => Axis::Y,
            Self::Forward | Self::Back => Axis::Z,
        }
    }

    /// True for +X, +Y and +Z.
    #[inline]
    #[must_use]
    pub const fn is_positive(self) -> bool {
        (self as u8) & 1 == 0
    }

    /// `1` or `-1`.
    #[inline]
    #[must_use]
    pub const fn sign(self) -> i32 {
        if self.is_positive() {
            1
        } else {
            -1
        }
    }

    /// The reversed direction.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::from_axis(self.axis(), !self.is_positive())
    }

    /// Unit offset as `[x, y, z]`.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> [i32; 3] {
        let mut v = [0; 3];
        v[self.axis().index()] = self.sign();
        v
    }

    /// Right-handed cross product of two directions.
    ///
    /// Returns `None` for parallel directions.
    #[must_use]
    pub const fn cross(self, other: Self) -> Option<Self> {
        let a = self.axis();
        let b = other.axis();
        if a.index() == b.index() {
            return None;
        }
        let c = a.third(b);
        // X x Y = Z and cyclic; the anti-cyclic order flips the sign.
        let cyclic = b.index() == a.next().index();
        let positive = (self.is_positive() == other.is_positive()) == cyclic;
        Some(Self::from_axis(c, positive))
    }

    /// This direction after a quarter turn about `axis`.
    ///
    /// A right-handed turn about X carries Y onto Z; `left_handed` turns the
    /// other way. Directions along `axis` are unchanged.
    #[must_use]
    pub const fn rotated(self, axis: Axis, left_handed: bool) -> Self {
        let own = self.axis();
        if own.index() == axis.index() {
            return self;
        }
        let u = axis.next();
        // right-handed: u -> v, v -> -u
        let (target, flips) = if own.index() == u.index() {
            (axis.prev(), left_handed)
        } else {
            (u, !left_handed)
        };
        let positive = self.is_positive() != flips;
        Self::from_axis(target, positive)
    }

    /// This direction reflected through the plane normal to `axis`.
    #[inline]
    #[must_use]
    pub const fn mirrored(self, axis: Axis) -> Self {
        if self.axis().index() == axis.index() {
            self.opposite()
        } else {
            self
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_positive() { '+' } else { '-' };
        write!(f, "{sign}{}", self.axis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_products() {
        use Direction::*;
        assert_eq!(Right.cross(Up), Some(Forward));
        assert_eq!(Up.cross(Forward), Some(Right));
        assert_eq!(Forward.cross(Right), Some(Up));
        assert_eq!(Up.cross(Right), Some(Back));
        assert_eq!(Down.cross(Back), Some(Right));
        assert_eq!(Left.cross(Up), Some(Back));
        assert_eq!(Up.cross(Down), None);
    }

    #[test]
    fn test_rotation_matches_cross_product() {
        // A right-handed quarter turn about n carries d onto n x d.
        for axis in Axis::ALL {
            let n = Direction::from_axis(axis, true);
            for d in Direction::ALL {
                let expected = n.cross(d).unwrap_or(d);
                assert_eq!(d.rotated(axis, false), expected, "{d} about {axis}");
            }
        }
    }

    #[test]
    fn test_rotation_inverse_and_cycle() {
        for axis in Axis::ALL {
            for d in Direction::ALL {
                assert_eq!(d.rotated(axis, false).rotated(axis, true), d);
                let mut r = d;
                for _ in 0..4 {
                    r = r.rotated(axis, false);
                }
                assert_eq!(r, d);
            }
        }
    }

    #[test]
    fn test_axis_cycle() {
        assert_eq!(Axis::X.next(), Axis::Y);
        assert_eq!(Axis::Z.next(), Axis::X);
        assert_eq!(Axis::X.prev(), Axis::Z);
        assert_eq!(Axis::X.third(Axis::Z), Axis::Y);
        assert_eq!(Axis::from_index(-1), Axis::Z);
    }

    #[test]
    fn test_direction_index_roundtrip() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_index(d.index() as i32), d);
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.mirrored(d.axis()), d.opposite());
        }
    }
}
