//! crates/logging/src/config.rs
//! Verbosity configuration combining info and debug levels.

use super::levels::{DebugLevels, InfoLevels};

/// Combined verbosity configuration for info and debug flags.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Info flag levels.
    pub info: InfoLevels,
    /// Debug flag levels.
    pub debug: DebugLevels,
}

impl VerbosityConfig {
    /// Create a configuration from the number of `--verbose` flags.
    ///
    /// Level 0 only lets warnings and errors through. Level 1 enables every
    /// informational note. Level 2 adds fork and vector debugging, and level
    /// 3 and above raise debugging to its most detailed setting.
    #[must_use]
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();

        match level {
            0 => {}
            1 => {
                config.info.set_all(1);
            }
            2 => {
                config.info.set_all(2);
                config.debug.set_all(1);
            }
            _ => {
                config.info.set_all(2);
                config.debug.set_all(2);
            }
        }

        config
    }

    /// Returns the configuration with every debug flag raised to at least
    /// level 1.
    #[must_use]
    pub fn with_debug(mut self) -> Self {
        self.debug.fork = self.debug.fork.max(1);
        self.debug.vector = self.debug.vector.max(1);
        self
    }

    /// Reports whether any informational output is enabled.
    #[must_use]
    pub const fn is_verbose(&self) -> bool {
        self.info.digest > 0
            || self.info.misc > 0
            || self.info.progress > 0
            || self.info.selftest > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DebugFlag, InfoFlag};

    #[test]
    fn level_zero_is_quiet() {
        let config = VerbosityConfig::from_verbose_level(0);
        assert_eq!(config, VerbosityConfig::default());
        assert!(!config.is_verbose());
    }

    #[test]
    fn level_one_enables_notes_only() {
        let config = VerbosityConfig::from_verbose_level(1);
        assert_eq!(config.info.get(InfoFlag::Progress), 1);
        assert_eq!(config.info.get(InfoFlag::Selftest), 1);
        assert_eq!(config.debug.get(DebugFlag::Fork), 0);
        assert!(config.is_verbose());
    }

    #[test]
    fn higher_levels_saturate() {
        assert_eq!(
            VerbosityConfig::from_verbose_level(3),
            VerbosityConfig::from_verbose_level(u8::MAX)
        );
        assert_eq!(VerbosityConfig::from_verbose_level(3).debug.fork, 2);
    }

    #[test]
    fn with_debug_never_lowers_levels() {
        let config = VerbosityConfig::from_verbose_level(3).with_debug();
        assert_eq!(config.debug.fork, 2);

        let config = VerbosityConfig::from_verbose_level(0).with_debug();
        assert_eq!(config.debug.vector, 1);
        assert!(!config.is_verbose());
    }
}
