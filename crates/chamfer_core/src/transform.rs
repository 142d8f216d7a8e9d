//! Whole-volume transforms: quarter turns, reflections and resizes.
//!
//! Turns and resizes build a new backing array and swap it in; mirror works
//! in place. Filled voxels carrying a valid orientation (< 48) are
//! re-oriented by turn and mirror so oriented shapes follow the volume.
//! Each call fires exactly one change notification.

use crate::coord::Extents;
use crate::direction::{Axis, Direction};
use crate::notify::ChangeKind;
use crate::orientation::{Orientation, ORIENTATION_COUNT};
use crate::volume::Volume;
use crate::voxel::Voxel;

/// How `resize` fills the cells it adds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeMode {
    /// New cells are empty; removed cells are cropped.
    Resize,
    /// Existing content tiles periodically into the new extent.
    Repeat,
    /// Existing content is nearest-sampled to span the new extent.
    Rescale,
}

/// Orientation index table for one world transform.
struct OrientationRemap([u8; ORIENTATION_COUNT]);

impl OrientationRemap {
    fn new(f: impl Fn(Orientation) -> Orientation) -> Self {
        let mut table = [0u8; ORIENTATION_COUNT];
        for (o, slot) in Orientation::all().zip(table.iter_mut()) {
            *slot = f(o).index();
        }
        Self(table)
    }

    #[inline]
    fn apply(&self, voxel: Voxel) -> Voxel {
        let o = voxel.orientation() as usize;
        if voxel.is_filled() && o < ORIENTATION_COUNT {
            voxel.with_orientation(self.0[o])
        } else {
            voxel
        }
    }
}

impl Volume {
    /// Rotates the whole volume a quarter turn about `axis`.
    ///
    /// The right-handed turn (`left_handed == false`) about X carries +Y onto
    /// +Z; about Y, +Z onto +X; about Z, +X onto +Y. The two extents
    /// perpendicular to `axis` swap. Four same-handed turns are the identity
    /// and opposite hands cancel.
    pub fn turn(&mut self, axis: Axis, left_handed: bool) {
        let old = self.extents();
        if self.is_usable() {
            let u = axis.next();
            let v = axis.prev();
            let eu = old.get(u) as i32;
            let ev = old.get(v) as i32;
            let new_extents = old.with(u, ev as u32).with(v, eu as u32);
            let remap = OrientationRemap::new(|o| o.rotated(axis, left_handed));

            let mut out = vec![Voxel::EMPTY; old.volume()];
            for (i, &voxel) in self.voxels().iter().enumerate() {
                let c = old.coord_of(i);
                let (cu, cv) = (c.get(u), c.get(v));
                let (nu, nv) = if left_handed {
                    (cv, eu - 1 - cu)
                } else {
                    (ev - 1 - cv, cu)
                };
                if let Some(j) = new_extents.index_of(c.with(u, nu).with(v, nv)) {
                    out[j] = remap.apply(voxel);
                }
            }
            self.replace_storage(new_extents, out);
        }
        tracing::trace!(%axis, left_handed, extents = %self.extents(), "volume turned");
        self.commit(ChangeKind::Turn { axis, left_handed });
    }

    /// Reflects the volume along `axis` in place. Applying it twice restores
    /// the original.
    pub fn mirror(&mut self, axis: Axis) {
        let extents = self.extents();
        if self.is_usable() {
            let last = extents.get(axis) as i32 - 1;
            let remap = OrientationRemap::new(|o| o.mirrored(axis));
            let voxels = self.voxels_mut();
            for i in 0..voxels.len() {
                let c = extents.coord_of(i);
                let partner = c.with(axis, last - c.get(axis));
                if let Some(j) = extents.index_of(partner) {
                    if i < j {
                        voxels.swap(i, j);
                    }
                }
            }
            for voxel in voxels.iter_mut() {
                *voxel = remap.apply(*voxel);
            }
        }
        tracing::trace!(%axis, "volume mirrored");
        self.commit(ChangeKind::Mirror(axis));
    }

    /// Grows (positive `steps`) or shrinks (negative) the volume along
    /// `direction`'s axis. The resulting extent is at least 1.
    ///
    /// For a positive direction the existing content stays anchored at the
    /// low end and cells are added or cropped at the high end; a negative
    /// direction adds or crops at the low end instead, shifting the content.
    /// `mode` decides what the added cells hold. The empty volume stays empty.
    pub fn resize(&mut self, direction: Direction, steps: i32, mode: ResizeMode) {
        let axis = direction.axis();
        let old = self.extents();
        if self.is_usable() {
            let old_len = i64::from(old.get(axis));
            let new_len = (old_len + i64::from(steps)).max(1);
            let new_extents = old.with(axis, new_len as u32);
            let shift = if direction.is_positive() {
                0
            } else {
                new_len - old_len
            };

            let mut out = vec![Voxel::EMPTY; new_extents.volume()];
            for (j, slot) in out.iter_mut().enumerate() {
                let n = new_extents.coord_of(j);
                let c = i64::from(n.get(axis));
                let source = match mode {
                    ResizeMode::Resize => {
                        let s = c - shift;
                        (0..old_len).contains(&s).then_some(s)
                    }
                    ResizeMode::Repeat => Some((c - shift).rem_euclid(old_len)),
                    ResizeMode::Rescale => Some(((2 * c + 1) * old_len) / (2 * new_len)),
                };
                if let Some(s) = source {
                    *slot = self.try_get(n.with(axis, s as i32)).unwrap_or(Voxel::EMPTY);
                }
            }
            self.replace_storage(new_extents, out);
        }
        let extents = self.extents();
        tracing::trace!(%direction, steps, ?mode, %extents, "volume resized");
        self.commit(ChangeKind::Resize { direction, extents });
    }
}

/// Extents a resize would produce, without touching any volume.
#[must_use]
pub fn resized_extents(extents: Extents, direction: Direction, steps: i32) -> Extents {
    if extents.is_empty() {
        return Extents::ZERO;
    }
    let axis = direction.axis();
    let len = (i64::from(extents.get(axis)) + i64::from(steps)).max(1);
    extents.with(axis, len as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coord;
    use crate::edit::EditAction;

    fn marked(width: i32, height: i32, depth: i32) -> Volume {
        let mut v = Volume::new(width, height, depth);
        for (i, c) in [
            Coord::new(0, 0, 0),
            Coord::new(1, 0, 0),
            Coord::new(0, 1, 1),
            Coord::new(width - 1, height - 1, depth - 1),
        ]
        .into_iter()
        .enumerate()
        {
            v.set(c, EditAction::Overwrite, Voxel::filled(i as u8 + 1));
        }
        v
    }

    #[test]
    fn test_turn_about_y_moves_cells() {
        // Right-handed about Y: +Z -> +X, +X -> -Z.
        let mut v = Volume::new(3, 1, 2);
        v.set(Coord::new(2, 0, 0), EditAction::Overwrite, Voxel::filled(1));
        v.turn(Axis::Y, false);
        assert_eq!(v.extents(), Extents::new(2, 1, 3));
        // x' = z, z' = (width - 1) - x.
        assert!(v.get(0, 0, 0).is_filled());
        assert_eq!(v.filled_count(), 1);
    }

    #[test]
    fn test_turn_cycle_restores() {
        for axis in Axis::ALL {
            for left in [false, true] {
                let original = marked(4, 3, 2);
                let mut v = original.clone();
                for _ in 0..4 {
                    v.turn(axis, left);
                }
                assert_eq!(v, original, "axis {axis} left {left}");
            }
        }
    }

    #[test]
    fn test_turn_opposite_hand_is_inverse() {
        for axis in Axis::ALL {
            let original = marked(4, 3, 2);
            let mut v = original.clone();
            v.turn(axis, true);
            assert_ne!(v.extents(), original.extents());
            v.turn(axis, false);
            assert_eq!(v, original);
        }
    }

    #[test]
    fn test_turn_reorients_voxels() {
        let mut v = Volume::new(1, 1, 1);
        let o = Orientation::from_index(5);
        v.set(
            Coord::ZERO,
            EditAction::Overwrite,
            Voxel::filled(1).with_orientation(o.index()),
        );
        v.turn(Axis::X, false);
        assert_eq!(v.get(0, 0, 0).orientation(), o.rotated(Axis::X, false).index());

        // Invalid orientation values are left alone.
        let mut w = Volume::new(1, 1, 1);
        w.set(
            Coord::ZERO,
            EditAction::Overwrite,
            Voxel::filled(1).with_orientation(60),
        );
        w.turn(Axis::Z, true);
        assert_eq!(w.get(0, 0, 0).orientation(), 60);
    }

    #[test]
    fn test_mirror_involution() {
        for axis in Axis::ALL {
            let original = marked(4, 3, 5);
            let mut v = original.clone();
            v.mirror(axis);
            assert_ne!(v, original);
            assert_eq!(v.extents(), original.extents());
            v.mirror(axis);
            assert_eq!(v, original);
        }
    }

    #[test]
    fn test_mirror_moves_cell() {
        let mut v = Volume::new(5, 1, 1);
        v.set(Coord::new(1, 0, 0), EditAction::Overwrite, Voxel::filled(1));
        v.mirror(Axis::X);
        assert!(v.get(3, 0, 0).is_filled());
        assert!(v.get(1, 0, 0).is_empty());
    }

    #[test]
    fn test_resize_grow_right_anchors_content() {
        let mut v = Volume::new(3, 2, 2);
        for x in 0..3 {
            v.set(Coord::new(x, 1, 1), EditAction::Overwrite, Voxel::filled(x as u8 + 1));
        }
        v.resize(Direction::Right, 2, ResizeMode::Resize);
        assert_eq!(v.extents(), Extents::new(5, 2, 2));
        for x in 0..3 {
            assert_eq!(v.get(x, 1, 1).material(), x as u8 + 1);
        }
        for x in 3..5 {
            for y in 0..2 {
                for z in 0..2 {
                    assert!(v.get(x, y, z).is_empty());
                }
            }
        }
    }

    #[test]
    fn test_resize_grow_left_shifts_content() {
        let mut v = Volume::new(3, 1, 1);
        v.set(Coord::new(0, 0, 0), EditAction::Overwrite, Voxel::filled(1));
        v.resize(Direction::Left, 2, ResizeMode::Resize);
        assert_eq!(v.width(), 5);
        assert!(v.get(0, 0, 0).is_empty());
        assert_eq!(v.get(2, 0, 0).material(), 1);
    }

    #[test]
    fn test_resize_shrink_crops_and_clamps() {
        let mut v = Volume::new(4, 1, 1);
        for x in 0..4 {
            v.set(Coord::new(x, 0, 0), EditAction::Overwrite, Voxel::filled(x as u8));
        }
        v.resize(Direction::Left, -1, ResizeMode::Resize);
        assert_eq!(v.width(), 3);
        assert_eq!(v.get(0, 0, 0).material(), 1);

        v.resize(Direction::Right, -10, ResizeMode::Resize);
        assert_eq!(v.width(), 1);
        assert_eq!(v.get(0, 0, 0).material(), 1);
    }

    #[test]
    fn test_resize_repeat_tiles() {
        let mut v = Volume::new(1, 2, 1);
        v.set(Coord::new(0, 0, 0), EditAction::Overwrite, Voxel::filled(1));
        v.resize(Direction::Up, 3, ResizeMode::Repeat);
        assert_eq!(v.height(), 5);
        let pattern: Vec<bool> = (0..5).map(|y| v.get(0, y, 0).is_filled()).collect();
        assert_eq!(pattern, vec![true, false, true, false, true]);

        let mut w = Volume::new(1, 2, 1);
        w.set(Coord::new(0, 0, 0), EditAction::Overwrite, Voxel::filled(1));
        w.resize(Direction::Down, 1, ResizeMode::Repeat);
        let pattern: Vec<bool> = (0..3).map(|y| w.get(0, y, 0).is_filled()).collect();
        assert_eq!(pattern, vec![false, true, false]);
    }

    #[test]
    fn test_resize_rescale_nearest() {
        let mut v = Volume::new(1, 1, 2);
        v.set(Coord::new(0, 0, 0), EditAction::Overwrite, Voxel::filled(1));
        v.set(Coord::new(0, 0, 1), EditAction::Overwrite, Voxel::filled(2));
        v.resize(Direction::Forward, 2, ResizeMode::Rescale);
        let materials: Vec<u8> = (0..4).map(|z| v.get(0, 0, z).material()).collect();
        assert_eq!(materials, vec![1, 1, 2, 2]);

        v.resize(Direction::Back, -2, ResizeMode::Rescale);
        let materials: Vec<u8> = (0..2).map(|z| v.get(0, 0, z).material()).collect();
        assert_eq!(materials, vec![1, 2]);
    }

    #[test]
    fn test_transforms_notify_once_even_when_empty() {
        let mut v = Volume::new(0, 0, 0);
        let rx = v.subscribe();
        v.turn(Axis::X, false);
        v.mirror(Axis::Y);
        v.resize(Direction::Up, 3, ResizeMode::Resize);
        assert_eq!(rx.try_iter().count(), 3);
        assert!(!v.is_usable());
        assert_eq!(resized_extents(Extents::new(3, 4, 5), Direction::Down, -9), Extents::new(3, 1, 5));
    }
}
