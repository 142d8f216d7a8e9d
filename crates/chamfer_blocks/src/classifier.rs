//! # Block Classifier
//!
//! Walks every filled cell of a volume in storage order, samples its
//! neighbourhood once, runs the decision table for each of the eight octants
//! and files the resulting descriptors by material.
//!
//! The classifier owns only scratch: the 256 material buckets, cleared at the
//! start of each pass. Output therefore depends on nothing but the volume and
//! the config, and two passes over the same input are identical.

use chamfer_core::{Axis, Coord, Volume};

use crate::config::ClassifierConfig;
use crate::descriptor::{edge_anchor, octant_anchor, BlockDescriptor, BlockType, MaterialBuckets};
use crate::sample::NeighbourSample;
use crate::table::{classify_octant, OctantClass, TableFlags};

/// The eight octant sign vectors, in X-fastest order.
pub const OCTANTS: [[i8; 3]; 8] = [
    [-1, -1, -1],
    [1, -1, -1],
    [-1, 1, -1],
    [1, 1, -1],
    [-1, -1, 1],
    [1, -1, 1],
    [-1, 1, 1],
    [1, 1, 1],
];

/// Summary of one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyStats {
    /// Filled cells visited.
    pub cells: usize,
    /// Cells skipped outright because all 26 neighbours were present.
    pub enclosed: usize,
    /// Descriptors emitted.
    pub blocks: usize,
}

/// Reusable classifier.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
    buckets: MaterialBuckets,
    stats: ClassifyStats,
}

impl Classifier {
    /// Creates a classifier with the given flags.
    #[must_use]
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            buckets: MaterialBuckets::new(),
            stats: ClassifyStats::default(),
        }
    }

    /// Current flags.
    #[must_use]
    pub const fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Replaces the flags used by later passes.
    pub fn set_config(&mut self, config: ClassifierConfig) {
        self.config = config;
    }

    /// Output of the last pass.
    #[must_use]
    pub const fn buckets(&self) -> &MaterialBuckets {
        &self.buckets
    }

    /// Summary of the last pass.
    #[must_use]
    pub const fn stats(&self) -> ClassifyStats {
        self.stats
    }

    /// Classifies the whole volume, replacing the previous output.
    pub fn classify(&mut self, volume: &Volume) -> &MaterialBuckets {
        self.buckets.clear();
        let mut stats = ClassifyStats::default();
        let flags = TableFlags {
            merge_close_edges: self.config.merge_close_edges,
        };

        for (cell, voxel) in volume.iter_filled() {
            stats.cells += 1;
            let sample = NeighbourSample::gather(volume, cell, &self.config);
            if sample.is_enclosed() {
                stats.enclosed += 1;
                continue;
            }
            for sign in OCTANTS {
                let class = classify_octant(&sample.octant(sign), flags);
                stats.blocks += emit(&mut self.buckets, class, cell, sign, voxel.material());
            }
        }

        self.stats = stats;
        tracing::debug!(
            extents = %volume.extents(),
            cells = stats.cells,
            enclosed = stats.enclosed,
            blocks = stats.blocks,
            "classification pass complete"
        );
        &self.buckets
    }
}

/// One-shot classification with a fresh classifier.
#[must_use]
pub fn classify(volume: &Volume, config: ClassifierConfig) -> MaterialBuckets {
    let mut classifier = Classifier::new(config);
    classifier.classify(volume);
    classifier.buckets
}

fn emit(
    buckets: &mut MaterialBuckets,
    class: OctantClass,
    cell: Coord,
    sign: [i8; 3],
    material: u8,
) -> usize {
    let mut emitted = 0;
    let mut push = |block_type, axis: Option<Axis>, anchor| {
        buckets.push(BlockDescriptor {
            block_type,
            sign,
            axis,
            anchor,
            material,
        });
        emitted += 1;
    };

    match class {
        OctantClass::Corner { break_points } => {
            push(BlockType::Corner, None, octant_anchor(cell, sign));
            for axis in Axis::ALL {
                if break_points[axis.index()] {
                    push(BlockType::BreakPoint, Some(axis), edge_anchor(cell, sign, axis));
                }
            }
        }
        OctantClass::BreakPoint(axis) => {
            push(BlockType::BreakPoint, Some(axis), edge_anchor(cell, sign, axis));
        }
        other => {
            if let Some((block_type, axis)) = other.block() {
                push(block_type, axis, octant_anchor(cell, sign));
            }
        }
    }
    emitted
}
