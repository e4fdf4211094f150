//! crates/logging/src/levels.rs
//! Flag enums and level structures for info and debug verbosity.

/// Info flags for diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfoFlag {
    /// Computed digests and comparison results.
    Digest,
    /// Diagnostics without a more specific category.
    Misc,
    /// Periodic streaming progress.
    Progress,
    /// Self-test results.
    Selftest,
}

/// Debug flags for diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebugFlag {
    /// Context duplication points.
    Fork,
    /// Test vector loading and lookup.
    Vector,
}

/// Info verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfoLevels {
    /// Digest reporting level.
    pub digest: u8,
    /// Miscellaneous diagnostics level.
    pub misc: u8,
    /// Progress reporting level.
    pub progress: u8,
    /// Self-test reporting level.
    pub selftest: u8,
}

impl InfoLevels {
    /// Get the level for a specific flag.
    #[must_use]
    pub const fn get(&self, flag: InfoFlag) -> u8 {
        match flag {
            InfoFlag::Digest => self.digest,
            InfoFlag::Misc => self.misc,
            InfoFlag::Progress => self.progress,
            InfoFlag::Selftest => self.selftest,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: InfoFlag, level: u8) {
        match flag {
            InfoFlag::Digest => self.digest = level,
            InfoFlag::Misc => self.misc = level,
            InfoFlag::Progress => self.progress = level,
            InfoFlag::Selftest => self.selftest = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        self.digest = level;
        self.misc = level;
        self.progress = level;
        self.selftest = level;
    }
}

/// Debug verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugLevels {
    /// Fork point tracing level.
    pub fork: u8,
    /// Vector table tracing level.
    pub vector: u8,
}

impl DebugLevels {
    /// Get the level for a specific flag.
    #[must_use]
    pub const fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Fork => self.fork,
            DebugFlag::Vector => self.vector,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Fork => self.fork = level,
            DebugFlag::Vector => self.vector = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        self.fork = level;
        self.vector = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_set_and_get_round_trip() {
        let mut levels = InfoLevels::default();
        for (flag, level) in [
            (InfoFlag::Digest, 1),
            (InfoFlag::Misc, 2),
            (InfoFlag::Progress, 3),
            (InfoFlag::Selftest, 4),
        ] {
            levels.set(flag, level);
            assert_eq!(levels.get(flag), level);
        }
    }

    #[test]
    fn debug_set_all_touches_every_flag() {
        let mut levels = DebugLevels::default();
        levels.set_all(2);
        assert_eq!(levels.get(DebugFlag::Fork), 2);
        assert_eq!(levels.get(DebugFlag::Vector), 2);
        levels.set(DebugFlag::Vector, 0);
        assert_eq!(levels.get(DebugFlag::Vector), 0);
        assert_eq!(levels.get(DebugFlag::Fork), 2);
    }

    #[test]
    fn defaults_are_silent() {
        let info = InfoLevels::default();
        assert_eq!(info.get(InfoFlag::Progress), 0);
        assert_eq!(DebugLevels::default().get(DebugFlag::Fork), 0);
    }
}
