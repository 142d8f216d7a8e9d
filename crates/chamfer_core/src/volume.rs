//! Dense voxel volume.
//!
//! Storage is a flat `Vec<Voxel>` indexed `x + y * width + z * width * height`;
//! its length always equals the extent product. Zero or negative extents
//! collapse to the explicit empty volume (all extents zero) instead of failing,
//! so callers check [`Volume::is_usable`] rather than handling an error.
//!
//! Out-of-range reads return [`Voxel::EMPTY`] (or `None` from
//! [`Volume::try_get`]); out-of-range writes are silent no-ops that report
//! "unchanged". Whole-volume transforms live in `transform.rs`.
//!
//! Every operation that completes a mutation sends one change notification
//! (see `notify.rs`). Single-cell `set` only notifies when the value differs;
//! ranged, copy and transform operations notify once per call even when the
//! net per-cell effect is nothing.

use crossbeam_channel::Receiver;

use crate::coord::{Coord, Extents};
use crate::edit::EditAction;
use crate::notify::{ChangeKind, Notifier, VolumeChange};
use crate::voxel::Voxel;

/// A dense, editable 3D grid of voxels.
#[derive(Debug, Default)]
pub struct Volume {
    extents: Extents,
    voxels: Vec<Voxel>,
    revision: u64,
    notifier: Notifier,
}

impl Clone for Volume {
    /// Deep copy of extents and contents. Subscribers stay with the original.
    fn clone(&self) -> Self {
        Self {
            extents: self.extents,
            voxels: self.voxels.clone(),
            revision: self.revision,
            notifier: Notifier::default(),
        }
    }
}

impl PartialEq for Volume {
    /// Volumes are equal when extents and contents match.
    fn eq(&self, other: &Self) -> bool {
        self.extents == other.extents && self.voxels == other.voxels
    }
}

impl Eq for Volume {}

impl Volume {
    /// Creates an all-empty volume. Any non-positive size yields the empty
    /// volume.
    #[must_use]
    pub fn new(width: i32, height: i32, depth: i32) -> Self {
        Self::with_extents(Extents::from_signed(width, height, depth))
    }

    /// Creates an all-empty volume of `extents`. Extents with a zero axis
    /// collapse to the empty volume.
    #[must_use]
    pub fn with_extents(extents: Extents) -> Self {
        let extents = if extents.is_empty() {
            Extents::ZERO
        } else {
            extents
        };
        Self {
            extents,
            voxels: vec![Voxel::EMPTY; extents.volume()],
            revision: 0,
            notifier: Notifier::default(),
        }
    }

    /// Builds a volume from raw cells in storage order. Returns `None` when
    /// the cell count does not match the extents.
    #[must_use]
    pub fn from_voxels(extents: Extents, voxels: Vec<Voxel>) -> Option<Self> {
        if voxels.len() != extents.volume() {
            return None;
        }
        let mut volume = Self::with_extents(extents);
        if !volume.extents.is_empty() {
            volume.voxels = voxels;
        }
        Some(volume)
    }

    /// Current extents.
    #[inline]
    #[must_use]
    pub const fn extents(&self) -> Extents {
        self.extents
    }

    /// Cells along X.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.extents.width
    }

    /// Cells along Y.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.extents.height
    }

    /// Cells along Z.
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.extents.depth
    }

    /// False for the empty (zero-extent) volume.
    #[inline]
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        !self.extents.is_empty()
    }

    /// Raw cells in storage order.
    #[inline]
    #[must_use]
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Number of completed mutating operations.
    #[inline]
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// True if `coord` is inside the volume.
    #[inline]
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        self.extents.contains(coord)
    }

    /// Reads a cell. Out-of-range reads return [`Voxel::EMPTY`].
    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Voxel {
        self.try_get(Coord::new(x, y, z)).unwrap_or(Voxel::EMPTY)
    }

    /// Reads a cell, or `None` outside the volume.
    #[inline]
    #[must_use]
    pub fn try_get(&self, coord: Coord) -> Option<Voxel> {
        self.extents.index_of(coord).map(|i| self.voxels[i])
    }

    /// Subscribes to change notifications.
    ///
    /// The channel is unbounded and the volume never blocks on it: a
    /// receiver that is kept alive but never drained holds one
    /// [`VolumeChange`] per operation until it is read or dropped. Drain it
    /// with `try_iter` before each rebuild, as `Pipeline::refresh` does, or
    /// drop it when no longer interested.
    pub fn subscribe(&mut self) -> Receiver<VolumeChange> {
        self.notifier.subscribe()
    }

    /// Number of live subscribers as of the last notification.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.notifier.subscriber_count()
    }

    /// Applies `action` to one cell. Returns whether the stored value changed;
    /// out-of-range coordinates return `false`.
    pub fn set(&mut self, coord: Coord, action: EditAction, payload: Voxel) -> bool {
        let changed = self.apply_at(coord, action, payload);
        if changed {
            self.commit(ChangeKind::Cell(coord));
        }
        changed
    }

    /// Applies `action` to every cell of the inclusive box spanned by `a` and
    /// `b`, clipped to the volume. Corners may be given in either order.
    ///
    /// Returns the number of cells whose value changed. Notifies once.
    pub fn set_range(&mut self, a: Coord, b: Coord, action: EditAction, payload: Voxel) -> usize {
        let min = a.min(b);
        let max = a.max(b);
        let mut changed = 0;
        if self.is_usable() {
            let lo = min.max(Coord::ZERO);
            let hi = max.min(self.extents.max_coord());
            for z in lo.z..=hi.z {
                for y in lo.y..=hi.y {
                    for x in lo.x..=hi.x {
                        if self.apply_at(Coord::new(x, y, z), action, payload) {
                            changed += 1;
                        }
                    }
                }
            }
        }
        self.commit(ChangeKind::Range { min, max });
        changed
    }

    /// Copies a `size` box from `source` at `source_origin` into this volume at
    /// `dest_origin`, combining each cell with `action`.
    ///
    /// Cells outside either volume are skipped. Returns the number of changed
    /// cells. Notifies once.
    pub fn copy_from(
        &mut self,
        source: &Volume,
        source_origin: Coord,
        dest_origin: Coord,
        size: Extents,
        action: EditAction,
    ) -> usize {
        let mut changed = 0;
        for dz in 0..size.depth as i32 {
            for dy in 0..size.height as i32 {
                for dx in 0..size.width as i32 {
                    let offset = Coord::new(dx, dy, dz);
                    let Some(payload) = source.try_get(source_origin + offset) else {
                        continue;
                    };
                    if self.apply_at(dest_origin + offset, action, payload) {
                        changed += 1;
                    }
                }
            }
        }
        self.commit(ChangeKind::Copy);
        changed
    }

    /// Sets every cell to `payload`. Notifies once.
    pub fn fill(&mut self, payload: Voxel) {
        self.voxels.fill(payload);
        self.commit(ChangeKind::Fill);
    }

    /// Empties every cell. Notifies once.
    pub fn clear(&mut self) {
        self.fill(Voxel::EMPTY);
    }

    /// Takes over the extents and contents of `source`, keeping this volume's
    /// subscribers. Notifies once.
    pub fn replace_with(&mut self, source: Volume) {
        self.replace_storage(source.extents, source.voxels);
        self.commit(ChangeKind::Replaced);
    }

    /// Number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.voxels.iter().filter(|v| v.is_filled()).count()
    }

    /// Iterates filled cells with their coordinates, in storage order.
    pub fn iter_filled(&self) -> impl Iterator<Item = (Coord, Voxel)> + '_ {
        let extents = self.extents;
        self.voxels
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_filled())
            .map(move |(i, v)| (extents.coord_of(i), *v))
    }

    /// Writes one cell without notifying.
    fn apply_at(&mut self, coord: Coord, action: EditAction, payload: Voxel) -> bool {
        let Some(i) = self.extents.index_of(coord) else {
            return false;
        };
        let current = self.voxels[i];
        let next = action.apply(current, payload);
        self.voxels[i] = next;
        next != current
    }

    /// Swaps in new storage wholesale. Used by the transforms.
    pub(crate) fn replace_storage(&mut self, extents: Extents, voxels: Vec<Voxel>) {
        debug_assert_eq!(voxels.len(), extents.volume());
        self.extents = extents;
        self.voxels = voxels;
    }

    pub(crate) fn voxels_mut(&mut self) -> &mut [Voxel] {
        &mut self.voxels
    }

    /// Bumps the revision and fires the notification for one operation.
    pub(crate) fn commit(&mut self, kind: ChangeKind) {
        self.revision += 1;
        self.notifier.notify(VolumeChange {
            kind,
            revision: self.revision,
        });
    }
}
