//! Options and pose table management for AvatarEngine.

use std::path::Path;

use super::AvatarEngine;
use crate::error::SignposeError;
use crate::options::Options;
use crate::pose::{PoseTable, PoseTableConfig};

impl AvatarEngine {
    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace options.
    ///
    /// Timing applies to requests made afterwards. The rig naming is only
    /// read when a rig is attached, so changing it here affects the next
    /// [`attach_rig`](Self::attach_rig) or
    /// [`with_preset_rig`](Self::with_preset_rig).
    pub fn set_options(&mut self, new: Options) {
        self.sequencer.set_options(new.animation.clone());
        self.options = new;
    }

    /// Load options from a TOML preset and apply them.
    ///
    /// # Errors
    ///
    /// Returns [`SignposeError`] if the file can't be read or parsed.
    pub fn load_options(&mut self, path: &Path) -> Result<(), SignposeError> {
        let options = Options::load(path)?;
        log::info!("loaded options from {}", path.display());
        self.set_options(options);
        Ok(())
    }

    /// Replace the pose table. Ignored while a performance is running.
    ///
    /// Returns whether the table was replaced.
    pub fn set_pose_table(&mut self, table: PoseTable) -> bool {
        if self.is_busy() {
            log::debug!("busy, keeping the current pose table");
            return false;
        }
        self.table = table;
        true
    }

    /// Load a pose table from TOML and install it.
    ///
    /// # Errors
    ///
    /// Returns [`SignposeError`] if the file can't be read or parsed.
    pub fn load_pose_table(&mut self, path: &Path) -> Result<bool, SignposeError> {
        let config = PoseTableConfig::load(path)?;
        log::info!("loaded pose table from {}", path.display());
        Ok(self.set_pose_table(PoseTable::from_config(config)))
    }
}
