//! Change notifications.
//!
//! Every mutating volume operation that completes sends one [`VolumeChange`]
//! to each subscriber. Delivery is fire-and-forget over unbounded channels:
//! the volume never waits on a receiver, and receivers that have been dropped
//! are pruned on the next send.

use crossbeam_channel::{Receiver, Sender};

use crate::coord::{Coord, Extents};
use crate::direction::{Axis, Direction};

/// What kind of operation changed the volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A single cell changed.
    Cell(Coord),
    /// A ranged set over the box `min..=max` completed.
    Range {
        /// Minimum corner before clipping.
        min: Coord,
        /// Maximum corner before clipping.
        max: Coord,
    },
    /// A region copy completed.
    Copy,
    /// Every cell was rewritten by `fill` or `clear`.
    Fill,
    /// A quarter turn completed.
    Turn {
        /// Rotation axis.
        axis: Axis,
        /// Rotation hand.
        left_handed: bool,
    },
    /// A reflection completed.
    Mirror(Axis),
    /// A resize completed; the volume now has `extents`.
    Resize {
        /// Grow/shrink side.
        direction: Direction,
        /// New extents.
        extents: Extents,
    },
    /// The contents were replaced wholesale.
    Replaced,
}

/// A "recompute" signal for downstream consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeChange {
    /// The operation that produced this change.
    pub kind: ChangeKind,
    /// Volume revision after the operation.
    pub revision: u64,
}

/// Subscriber list owned by a volume.
#[derive(Debug, Default)]
pub(crate) struct Notifier {
    subscribers: Vec<Sender<VolumeChange>>,
}

impl Notifier {
    pub(crate) fn subscribe(&mut self) -> Receiver<VolumeChange> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub(crate) fn notify(&mut self, change: VolumeChange) {
        self.subscribers.retain(|tx| tx.send(change).is_ok());
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
