//! Edit-to-blocks pipeline.
//!
//! Owns a volume, listens to its change notifications and reclassifies only
//! when asked. Any number of edits between two [`Pipeline::refresh`] calls
//! cost one classification pass.

use crossbeam_channel::Receiver;

use chamfer_blocks::{
    assemble, AssemblyOutput, Classifier, ClassifierConfig, FragmentLibrary, MaterialBuckets,
};
use chamfer_core::{Volume, VolumeChange};

/// A volume plus its classifier, kept in sync on demand.
#[derive(Debug)]
pub struct Pipeline {
    volume: Volume,
    changes: Receiver<VolumeChange>,
    classifier: Classifier,
    dirty: bool,
    passes: u64,
}

impl Pipeline {
    /// Wraps `volume`. The first refresh always classifies.
    #[must_use]
    pub fn new(mut volume: Volume, config: ClassifierConfig) -> Self {
        let changes = volume.subscribe();
        Self {
            volume,
            changes,
            classifier: Classifier::new(config),
            dirty: true,
            passes: 0,
        }
    }

    /// The volume.
    #[must_use]
    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// Mutable access for edits. Changes are picked up by the next refresh.
    pub fn volume_mut(&mut self) -> &mut Volume {
        &mut self.volume
    }

    /// Current classifier flags.
    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        self.classifier.config()
    }

    /// Changes the flags; the next refresh reclassifies.
    pub fn set_config(&mut self, config: ClassifierConfig) {
        if *self.classifier.config() != config {
            self.classifier.set_config(config);
            self.dirty = true;
        }
    }

    /// True if the blocks no longer reflect the volume.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.dirty || !self.changes.is_empty()
    }

    /// Number of classification passes run so far.
    #[must_use]
    pub const fn passes(&self) -> u64 {
        self.passes
    }

    /// Blocks from the most recent pass.
    #[must_use]
    pub fn blocks(&self) -> &MaterialBuckets {
        self.classifier.buckets()
    }

    /// Reclassifies if anything changed since the last pass. Returns the
    /// fresh blocks, or `None` when nothing needed doing.
    pub fn refresh(&mut self) -> Option<&MaterialBuckets> {
        let pending: Vec<VolumeChange> = self.changes.try_iter().collect();
        if pending.is_empty() && !self.dirty {
            return None;
        }
        self.dirty = false;
        self.passes += 1;
        tracing::debug!(
            changes = pending.len(),
            revision = self.volume.revision(),
            pass = self.passes,
            "reclassifying volume"
        );
        Some(self.classifier.classify(&self.volume))
    }

    /// Refreshes if needed, then assembles the current blocks.
    pub fn build_mesh(&mut self, library: &impl FragmentLibrary) -> AssemblyOutput {
        self.refresh();
        assemble(self.classifier.buckets(), library)
    }
}
