//! crates/engine/src/checkpoint/plan.rs
//!
//! Static description of where the stream is forked and how far each fork
//! is extended.
//!
//! The stream is `units` repetitions of a unit of pattern bytes. The *mark*
//! is the end of the last unit. Two forks are taken one margin before the
//! mark, the original context reaches the mark exactly, and two more forks
//! are taken at the mark. Each fork is then extended by a short tail so that
//! it ends at `mark + offset` for one of the five [`Offset`]s.

use std::fmt;
use std::num::NonZeroU32;

/// Length of the repeating pattern block.
pub const PATTERN_LEN: usize = 1024;

/// Byte value the pattern is made of.
pub const PATTERN_BYTE: u8 = b'a';

/// Distance from the mark at which a checkpoint digest is taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Offset {
    /// 64 bytes before the mark.
    Minus64,
    /// One byte before the mark.
    Minus1,
    /// Exactly at the mark.
    Zero,
    /// One byte past the mark.
    Plus1,
    /// 64 bytes past the mark.
    Plus64,
}

impl Offset {
    /// Every offset in processing order.
    pub const ALL: [Self; 5] = [
        Self::Minus64,
        Self::Minus1,
        Self::Zero,
        Self::Plus1,
        Self::Plus64,
    ];

    /// Signed distance from the mark in bytes.
    #[must_use]
    pub const fn bytes(self) -> i64 {
        match self {
            Self::Minus64 => -64,
            Self::Minus1 => -1,
            Self::Zero => 0,
            Self::Plus1 => 1,
            Self::Plus64 => 64,
        }
    }

    /// Maps a signed distance back to an offset.
    #[must_use]
    pub const fn from_bytes(bytes: i64) -> Option<Self> {
        match bytes {
            -64 => Some(Self::Minus64),
            -1 => Some(Self::Minus1),
            0 => Some(Self::Zero),
            1 => Some(Self::Plus1),
            64 => Some(Self::Plus64),
            _ => None,
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Forward so that width and sign flags apply to the number.
        fmt::Display::fmt(&self.bytes(), f)
    }
}

/// Where in the stream a checkpoint's context is taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForkPoint {
    /// Duplicated one margin before the mark.
    BeforeMark,
    /// The original context, which reaches the mark itself.
    Origin,
    /// Duplicated at the mark.
    AtMark,
}

/// One row of [`CHECKPOINTS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    /// Offset this checkpoint's digest belongs to.
    pub offset: Offset,
    /// Context the digest is read from.
    pub fork: ForkPoint,
    /// Pattern bytes written to the context after the fork.
    pub tail: u64,
}

/// The five checkpoints, in the order their digests are read.
pub const CHECKPOINTS: [Checkpoint; 5] = [
    Checkpoint {
        offset: Offset::Minus64,
        fork: ForkPoint::BeforeMark,
        tail: PATTERN_LEN as u64 - 64,
    },
    Checkpoint {
        offset: Offset::Minus1,
        fork: ForkPoint::BeforeMark,
        tail: PATTERN_LEN as u64 - 1,
    },
    Checkpoint {
        offset: Offset::Zero,
        fork: ForkPoint::Origin,
        tail: 0,
    },
    Checkpoint {
        offset: Offset::Plus1,
        fork: ForkPoint::AtMark,
        tail: 1,
    },
    Checkpoint {
        offset: Offset::Plus64,
        fork: ForkPoint::AtMark,
        tail: 64,
    },
];

/// Unit and margin sizes of a checkpoint stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    unit_len: u64,
    margin: u64,
}

impl Geometry {
    /// One GiB units with a one-block margin.
    pub const GIB: Self = Self {
        unit_len: 1 << 30,
        margin: PATTERN_LEN as u64,
    };

    /// Builds a geometry with a custom unit length.
    ///
    /// The unit must be a whole number of pattern blocks and at least one
    /// margin long.
    #[must_use]
    pub const fn with_unit(unit_len: u64) -> Option<Self> {
        let margin = PATTERN_LEN as u64;
        if unit_len < margin || unit_len % margin != 0 {
            return None;
        }
        Some(Self { unit_len, margin })
    }

    /// Length of one unit in bytes.
    #[must_use]
    pub const fn unit_len(self) -> u64 {
        self.unit_len
    }

    /// Distance before the mark at which the early forks are taken.
    #[must_use]
    pub const fn margin(self) -> u64 {
        self.margin
    }

    /// Stream position at the end of `units` units.
    #[must_use]
    pub fn mark(self, units: NonZeroU32) -> u64 {
        u64::from(units.get()) * self.unit_len
    }

    /// Stream position at which contexts for `fork` are taken.
    #[must_use]
    pub fn fork_position(self, units: NonZeroU32, fork: ForkPoint) -> u64 {
        match fork {
            ForkPoint::BeforeMark => self.mark(units) - self.margin,
            ForkPoint::Origin | ForkPoint::AtMark => self.mark(units),
        }
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::GIB
    }
}

/// Progress of a checkpoint stream. Phases only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Streaming whole units; no forks yet.
    Streaming,
    /// The before-mark forks exist.
    ForkedPre,
    /// The at-mark forks exist.
    ForkedPost,
    /// Tails are written and digests read.
    Finalized,
}

impl Phase {
    /// Fork taken when leaving this phase, if any.
    #[must_use]
    pub const fn pending_fork(self) -> Option<ForkPoint> {
        match self {
            Self::Streaming => Some(ForkPoint::BeforeMark),
            Self::ForkedPre => Some(ForkPoint::AtMark),
            Self::ForkedPost | Self::Finalized => None,
        }
    }

    /// The following phase. `Finalized` is terminal.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Streaming => Self::ForkedPre,
            Self::ForkedPre => Self::ForkedPost,
            Self::ForkedPost | Self::Finalized => Self::Finalized,
        }
    }
}
