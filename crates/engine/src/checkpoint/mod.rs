//! crates/engine/src/checkpoint/mod.rs
//!
//! Single-pass checkpoint streaming.
//!
//! [`stream_checkpoints`] feeds `units` units of the pattern through one
//! context and returns the digests at the five [`Offset`]s around the end of
//! the stream. The stream is never re-read: contexts are duplicated at the
//! fork points listed in [`CHECKPOINTS`] and each duplicate is extended by
//! its tail. [`verify_longtest`] drives that against a provider and checks
//! every digest with [`compare`](crate::compare()).

mod plan;

pub use plan::{
    CHECKPOINTS, Checkpoint, ForkPoint, Geometry, Offset, PATTERN_BYTE, PATTERN_LEN, Phase,
};

use std::num::NonZeroU32;

use checksums::{AlgorithmId, Digest, DigestError, DigestProvider, StreamingDigest};
use logging::{trace_fork, trace_progress};

use crate::{EngineError, EngineResult, RunContext, VectorTable, compare};

/// Units between progress notes.
pub const PROGRESS_INTERVAL: u32 = 16;

const PATTERN: [u8; PATTERN_LEN] = [PATTERN_BYTE; PATTERN_LEN];

/// Writes `len` pattern bytes in block-sized pieces.
fn write_pattern<C: StreamingDigest>(ctx: &mut C, len: u64) {
    let block = PATTERN_LEN as u64;
    let mut remaining = len;
    while remaining >= block {
        ctx.write(&PATTERN);
        remaining -= block;
    }
    if remaining > 0 {
        // remaining < PATTERN_LEN here
        ctx.write(&PATTERN[..remaining as usize]);
    }
}

/// Duplicated contexts, one slot per row of [`CHECKPOINTS`].
///
/// The slot for [`ForkPoint::Origin`] stays empty; that digest is read from
/// the original context.
struct Forks<C> {
    phase: Phase,
    slots: [Option<C>; 5],
}

impl<C: StreamingDigest> Forks<C> {
    fn new() -> Self {
        Self {
            phase: Phase::Streaming,
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Takes the fork the current phase is waiting for and advances.
    fn fork(&mut self, origin: &C, position: u64) -> Result<(), DigestError> {
        let Some(point) = self.phase.pending_fork() else {
            return Ok(());
        };
        for (checkpoint, slot) in CHECKPOINTS.iter().zip(self.slots.iter_mut()) {
            if checkpoint.fork == point {
                *slot = Some(origin.duplicate()?);
            }
        }
        trace_fork!("{point:?} forks taken at byte {position}");
        self.phase = self.phase.next();
        Ok(())
    }

    /// Writes every tail and reads the five digests in offset order.
    fn finish(mut self, origin: &C) -> [(Offset, Digest); 5] {
        debug_assert_eq!(self.phase, Phase::ForkedPost);
        for (checkpoint, slot) in CHECKPOINTS.iter().zip(self.slots.iter_mut()) {
            if let Some(ctx) = slot {
                write_pattern(ctx, checkpoint.tail);
            }
        }
        self.phase = self.phase.next();

        std::array::from_fn(|i| {
            let ctx = self.slots[i].as_ref().unwrap_or(origin);
            (CHECKPOINTS[i].offset, ctx.read())
        })
    }
}

/// Streams `units` units through `ctx` and returns the checkpoint digests.
///
/// `progress` is called with the unit index after every
/// [`PROGRESS_INTERVAL`]th unit. Every context, including `ctx`, is dropped
/// before this returns.
///
/// # Errors
///
/// Fails when duplicating the context fails.
pub fn stream_checkpoints<C, F>(
    mut ctx: C,
    units: NonZeroU32,
    geometry: Geometry,
    mut progress: F,
) -> Result<[(Offset, Digest); 5], DigestError>
where
    C: StreamingDigest,
    F: FnMut(u32),
{
    let mut forks = Forks::new();
    let last = units.get() - 1;

    for unit in 0..units.get() {
        if unit == last {
            write_pattern(&mut ctx, geometry.unit_len() - geometry.margin());
            forks.fork(&ctx, geometry.fork_position(units, ForkPoint::BeforeMark))?;
            write_pattern(&mut ctx, geometry.margin());
        } else {
            write_pattern(&mut ctx, geometry.unit_len());
        }
        if unit > 0 && unit % PROGRESS_INTERVAL == 0 {
            progress(unit);
        }
    }

    forks.fork(&ctx, geometry.fork_position(units, ForkPoint::AtMark))?;
    Ok(forks.finish(&ctx))
}

/// Streams `gigs` GiB for `algorithm` and compares all five checkpoints.
///
/// # Errors
///
/// Opening or duplicating a context is fatal, as is exhausting the run's
/// error budget. Digest mismatches are only counted.
pub fn verify_longtest<P: DigestProvider>(
    provider: &P,
    algorithm: AlgorithmId,
    gigs: NonZeroU32,
    table: &VectorTable,
    run: &mut RunContext,
) -> EngineResult<()> {
    verify_with_geometry(provider, algorithm, gigs, Geometry::GIB, table, run)
}

/// [`verify_longtest`] with an explicit unit size.
///
/// Digests are looked up under the unit count, whatever the unit size.
pub fn verify_with_geometry<P: DigestProvider>(
    provider: &P,
    algorithm: AlgorithmId,
    gigs: NonZeroU32,
    geometry: Geometry,
    table: &VectorTable,
    run: &mut RunContext,
) -> EngineResult<()> {
    let name = provider
        .name(algorithm)
        .ok_or(EngineError::UnknownAlgorithm { id: algorithm })?;
    let digest_len = provider
        .digest_len(algorithm)
        .ok_or(EngineError::UnknownAlgorithm { id: algorithm })?;

    let ctx = provider.open(algorithm).map_err(|source| EngineError::Open {
        name: name.to_owned(),
        id: algorithm,
        source,
    })?;

    let digests = stream_checkpoints(ctx, gigs, geometry, |unit| {
        trace_progress!("{unit} GiB so far hashed with {name}");
    })
    .map_err(|source| EngineError::Duplicate {
        name: name.to_owned(),
        id: algorithm,
        source,
    })?;
    if gigs.get() >= PROGRESS_INTERVAL {
        trace_progress!("{gigs} GiB hashed with {name}");
    }

    for (offset, digest) in &digests {
        let bytes = digest.as_bytes();
        let bytes = &bytes[..digest_len.min(bytes.len())];
        compare(bytes, algorithm, name, gigs.get(), *offset, table, run)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Digest is the big-endian count of bytes written.
    #[derive(Debug, Default)]
    struct Counter(u64);

    impl StreamingDigest for Counter {
        fn write(&mut self, data: &[u8]) {
            self.0 += data.len() as u64;
        }

        fn duplicate(&self) -> Result<Self, DigestError> {
            Ok(Self(self.0))
        }

        fn read(&self) -> Digest {
            Digest::from_slice(&self.0.to_be_bytes())
        }
    }

    fn count(digest: &Digest) -> u64 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(digest.as_bytes());
        u64::from_be_bytes(bytes)
    }

    fn units(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).expect("non-zero")
    }

    #[test]
    fn write_pattern_splits_into_blocks() {
        let mut ctx = Counter::default();
        write_pattern(&mut ctx, 0);
        assert_eq!(ctx.0, 0);
        write_pattern(&mut ctx, 3 * PATTERN_LEN as u64 + 17);
        assert_eq!(ctx.0, 3 * 1024 + 17);
    }

    #[test]
    fn one_gib_stream_lengths_are_exact() {
        let digests = stream_checkpoints(Counter::default(), units(1), Geometry::GIB, |_| {})
            .expect("counter never fails");
        let mark: i64 = 1 << 30;
        for (offset, digest) in &digests {
            assert_eq!(count(digest) as i64, mark + offset.bytes());
        }
        let offsets: Vec<Offset> = digests.iter().map(|(o, _)| *o).collect();
        assert_eq!(offsets, Offset::ALL);
    }

    #[test]
    fn progress_fires_every_sixteen_units() {
        let geometry = Geometry::with_unit(1024).expect("geometry");
        let mut seen = Vec::new();
        stream_checkpoints(Counter::default(), units(40), geometry, |n| seen.push(n))
            .expect("counter never fails");
        assert_eq!(seen, [16, 32]);

        seen.clear();
        stream_checkpoints(Counter::default(), units(15), geometry, |n| seen.push(n))
            .expect("counter never fails");
        assert!(seen.is_empty());
    }

    #[test]
    fn smallest_geometry_hits_every_offset() {
        let geometry = Geometry::with_unit(1024).expect("geometry");
        for n in [1, 2, 3] {
            let digests = stream_checkpoints(Counter::default(), units(n), geometry, |_| {})
                .expect("counter never fails");
            let mark = i64::from(n) * 1024;
            for (offset, digest) in &digests {
                assert_eq!(count(digest) as i64, mark + offset.bytes());
            }
        }
    }

    #[derive(Debug)]
    struct Refuses;

    impl StreamingDigest for Refuses {
        fn write(&mut self, _data: &[u8]) {}

        fn duplicate(&self) -> Result<Self, DigestError> {
            Err(DigestError::Backend {
                reason: "copy refused".to_owned(),
            })
        }

        fn read(&self) -> Digest {
            Digest::from_slice(&[])
        }
    }

    #[test]
    fn duplicate_failure_is_reported() {
        let geometry = Geometry::with_unit(1024).expect("geometry");
        let err = stream_checkpoints(Refuses, units(2), geometry, |_| {})
            .expect_err("duplicate refused");
        assert!(matches!(err, DigestError::Backend { .. }));
    }
}
