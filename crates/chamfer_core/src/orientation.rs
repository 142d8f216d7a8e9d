//! The 48 rigid symmetries of the cube.
//!
//! An [`Orientation`] is stored as a single index `up * 8 + turn * 2 + flip`
//! (fits the 6-bit orientation field of a [`crate::Voxel`]) and carries the
//! decomposed `(up, turn, flip)` triple alongside it:
//!
//! - `up`: where local +Y ends up, one of six directions (ordered
//!   +Y, -Y, +X, -X, +Z, -Z so that index 0 is the identity)
//! - `turn`: quarter turns of the forward/right basis about `up`
//! - `flip`: local up/down map to the opposite of `up`, which makes the
//!   transform a reflection (determinant -1)
//!
//! Direction mapping goes through two 48-entry tables built at compile time,
//! so per-voxel loops never redo the decomposition.

use std::fmt;

use crate::direction::{Axis, Direction};

/// Number of distinct orientations.
pub const ORIENTATION_COUNT: usize = 48;

/// `up` component order. Index 0 is +Y so that orientation 0 is the identity.
const UP_ORDER: [Direction; 6] = [
    Direction::Up,
    Direction::Down,
    Direction::Right,
    Direction::Left,
    Direction::Forward,
    Direction::Back,
];

/// Where local +Z lands for each `up` at turn 0.
const BASE_FORWARD: [Direction; 6] = [
    Direction::Forward,
    Direction::Back,
    Direction::Forward,
    Direction::Forward,
    Direction::Down,
    Direction::Up,
];

/// `TRANSFORM[i][local]` is the world direction of `local` under orientation `i`.
const TRANSFORM: [[Direction; 6]; ORIENTATION_COUNT] = build_transform_table();

/// `INVERSE[i][world]` is the local direction that maps onto `world`.
const INVERSE: [[Direction; 6]; ORIENTATION_COUNT] = build_inverse_table();

const fn build_transform_table() -> [[Direction; 6]; ORIENTATION_COUNT] {
    let mut table = [[Direction::Right; 6]; ORIENTATION_COUNT];
    let mut i = 0;
    while i < ORIENTATION_COUNT {
        let up = UP_ORDER[i / 8];
        let turn = (i / 2) % 4;
        let flip = i % 2 == 1;

        let mut forward = BASE_FORWARD[i / 8];
        // R(X) = R(Y) x R(Z) keeps the unflipped transform a proper rotation.
        let mut right = match up.cross(forward) {
            Some(d) => d,
            None => up,
        };
        let mut t = 0;
        while t < turn {
            let next_forward = right;
            right = forward.opposite();
            forward = next_forward;
            t += 1;
        }
        let world_up = if flip { up.opposite() } else { up };

        table[i][Direction::Right.index()] = right;
        table[i][Direction::Left.index()] = right.opposite();
        table[i][Direction::Up.index()] = world_up;
        table[i][Direction::Down.index()] = world_up.opposite();
        table[i][Direction::Forward.index()] = forward;
        table[i][Direction::Back.index()] = forward.opposite();
        i += 1;
    }
    table
}

const fn build_inverse_table() -> [[Direction; 6]; ORIENTATION_COUNT] {
    let forward = build_transform_table();
    let mut table = [[Direction::Right; 6]; ORIENTATION_COUNT];
    let mut i = 0;
    while i < ORIENTATION_COUNT {
        let mut local = 0;
        while local < 6 {
            table[i][forward[i][local].index()] = Direction::ALL[local];
            local += 1;
        }
        i += 1;
    }
    table
}

/// One of the 48 cubic symmetries (24 rotations, 24 reflections).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation {
    index: u8,
    up: Direction,
    turn: u8,
    flip: bool,
}

impl Orientation {
    /// The identity transform (index 0).
    pub const IDENTITY: Self = Self::from_index(0);

    /// Orientation from an integer, reduced modulo 48.
    #[must_use]
    pub const fn from_index(index: i32) -> Self {
        let index = index.rem_euclid(ORIENTATION_COUNT as i32) as usize;
        Self {
            index: index as u8,
            up: UP_ORDER[index / 8],
            turn: ((index / 2) % 4) as u8,
            flip: index % 2 == 1,
        }
    }

    /// Orientation from its triple. `turn` is reduced modulo 4.
    #[must_use]
    pub const fn new(up: Direction, turn: i32, flip: bool) -> Self {
        let mut up_index = 0;
        while up_index < 5 && UP_ORDER[up_index] as u8 != up as u8 {
            up_index += 1;
        }
        Self::from_parts(up_index as i32, turn, flip)
    }

    /// Orientation from raw triple components, each reduced modulo its range
    /// (`up` modulo 6 in +Y, -Y, +X, -X, +Z, -Z order, `turn` modulo 4).
    #[must_use]
    pub const fn from_parts(up: i32, turn: i32, flip: bool) -> Self {
        let up = up.rem_euclid(6);
        let turn = turn.rem_euclid(4);
        Self::from_index(up * 8 + turn * 2 + flip as i32)
    }

    /// Iterates all 48 orientations in index order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ORIENTATION_COUNT as i32).map(Self::from_index)
    }

    /// Packed index in `0..48`.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self.index
    }

    /// Where local +Y points before `flip` is applied.
    #[inline]
    #[must_use]
    pub const fn up(self) -> Direction {
        self.up
    }

    /// Quarter turns about `up`, `0..4`.
    #[inline]
    #[must_use]
    pub const fn turn(self) -> u8 {
        self.turn
    }

    /// True for the reflecting half of the group.
    #[inline]
    #[must_use]
    pub const fn flip(self) -> bool {
        self.flip
    }

    /// Maps a local direction to world space.
    #[inline]
    #[must_use]
    pub const fn transform_direction(self, local: Direction) -> Direction {
        TRANSFORM[self.index as usize][local.index()]
    }

    /// Maps a world direction back to local space.
    #[inline]
    #[must_use]
    pub const fn inverse_transform_direction(self, world: Direction) -> Direction {
        INVERSE[self.index as usize][world.index()]
    }

    /// Row-major integer matrix `m` with `world = m * local`.
    ///
    /// Columns are the images of +X, +Y and +Z. Every entry is -1, 0 or 1 and
    /// each row and column holds exactly one non-zero.
    #[must_use]
    pub const fn to_matrix(self) -> [[i32; 3]; 3] {
        let mut m = [[0; 3]; 3];
        let basis = [Direction::Right, Direction::Up, Direction::Forward];
        let mut col = 0;
        while col < 3 {
            let image = self.transform_direction(basis[col]);
            m[image.axis().index()][col] = image.sign();
            col += 1;
        }
        m
    }

    /// `1` for rotations, `-1` for reflections.
    #[must_use]
    pub const fn determinant(self) -> i32 {
        let m = self.to_matrix();
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Transforms a point in unit-cell coordinates about the cell centre
    /// `(0.5, 0.5, 0.5)`, so `[0, 1]^3` maps onto itself.
    #[must_use]
    pub fn transform_point(self, point: [f32; 3]) -> [f32; 3] {
        let m = self.to_matrix();
        let local = [point[0] - 0.5, point[1] - 0.5, point[2] - 0.5];
        let mut out = [0.5; 3];
        for (row, value) in out.iter_mut().enumerate() {
            for (col, l) in local.iter().enumerate() {
                *value += m[row][col] as f32 * l;
            }
        }
        out
    }

    /// The orientation whose images of +X, +Y and +Z are the given world
    /// directions, if that triple is a signed permutation.
    #[must_use]
    pub fn from_basis(x: Direction, y: Direction, z: Direction) -> Option<Self> {
        Self::all().find(|o| {
            o.transform_direction(Direction::Right) == x
                && o.transform_direction(Direction::Up) == y
                && o.transform_direction(Direction::Forward) == z
        })
    }

    /// This orientation followed by a quarter turn of the world about `axis`.
    #[must_use]
    pub fn rotated(self, axis: Axis, left_handed: bool) -> Self {
        self.then(|d| d.rotated(axis, left_handed))
    }

    /// This orientation followed by a reflection of the world along `axis`.
    #[must_use]
    pub fn mirrored(self, axis: Axis) -> Self {
        self.then(|d| d.mirrored(axis))
    }

    fn then(self, world_map: impl Fn(Direction) -> Direction) -> Self {
        let image = |local| world_map(self.transform_direction(local));
        // Signed permutations compose to signed permutations, and all 48 are
        // represented, so the lookup cannot miss.
        Self::from_basis(
            image(Direction::Right),
            image(Direction::Up),
            image(Direction::Forward),
        )
        .unwrap_or(self)
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Debug for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orientation")
            .field("index", &self.index)
            .field("up", &self.up)
            .field("turn", &self.turn)
            .field("flip", &self.flip)
            .finish()
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} (up {}, turn {}", self.index, self.up, self.turn)?;
        if self.flip {
            f.write_str(", flipped")?;
        }
        f.write_str(")")
    }
}
