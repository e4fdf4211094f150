//! crates/checksums/src/selftest.rs
//!
//! Extended self-tests for the built-in algorithms.
//!
//! Each known-answer input is fed through a [`DigestContext`] in uneven
//! chunks, duplicated halfway through, and finished on both copies. The
//! test fails when either copy disagrees with the published digest or when
//! the copies disagree with each other. XXHash variants have no published
//! answers here and report [`SelfTestError::NotImplemented`].

use crate::{Algorithm, DigestContext, SelfTestError, StreamingDigest};

/// Input fed to a known-answer test.
#[derive(Clone, Copy, Debug)]
enum Input {
    Bytes(&'static [u8]),
    Repeat { byte: u8, count: usize },
}

impl Input {
    const fn len(self) -> usize {
        match self {
            Self::Bytes(bytes) => bytes.len(),
            Self::Repeat { count, .. } => count,
        }
    }

    /// Writes bytes `start..end` of the input into `ctx`.
    fn feed<D: StreamingDigest>(self, ctx: &mut D, start: usize, end: usize) {
        match self {
            Self::Bytes(bytes) => ctx.write(&bytes[start..end]),
            Self::Repeat { byte, .. } => {
                let block = [byte; 1000];
                let mut remaining = end - start;
                while remaining > 0 {
                    let step = remaining.min(block.len());
                    ctx.write(&block[..step]);
                    remaining -= step;
                }
            }
        }
    }
}

struct KnownAnswer {
    label: &'static str,
    input: Input,
    hex: &'static str,
}

const EMPTY: Input = Input::Bytes(b"");
const ABC: Input = Input::Bytes(b"abc");
const MILLION_A: Input = Input::Repeat {
    byte: b'a',
    count: 1_000_000,
};

const fn kat(label: &'static str, input: Input, hex: &'static str) -> KnownAnswer {
    KnownAnswer { label, input, hex }
}

const MD4: &[KnownAnswer] = &[
    kat("empty", EMPTY, "31d6cfe0d16ae931b73c59d7e0c089c0"),
    kat("abc", ABC, "a448017aaf21d8525fc10ae87aa6729d"),
];

const MD5: &[KnownAnswer] = &[
    kat("empty", EMPTY, "d41d8cd98f00b204e9800998ecf8427e"),
    kat("abc", ABC, "900150983cd24fb0d6963f7d28e17f72"),
    kat("1M x 'a'", MILLION_A, "7707d6ae4e027c70eea2a935c2296f21"),
];

const SHA1: &[KnownAnswer] = &[
    kat("empty", EMPTY, "da39a3ee5e6b4b0d3255bfef95601890afd80709"),
    kat("abc", ABC, "a9993e364706816aba3e25717850c26c9cd0d89d"),
    kat("1M x 'a'", MILLION_A, "34aa973cd4c4daa4f61eeb2bdbad27316534016f"),
];

const SHA224: &[KnownAnswer] = &[
    kat(
        "empty",
        EMPTY,
        "d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f",
    ),
    kat(
        "abc",
        ABC,
        "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7",
    ),
];

const SHA256: &[KnownAnswer] = &[
    kat(
        "empty",
        EMPTY,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
    ),
    kat(
        "abc",
        ABC,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
    ),
    kat(
        "1M x 'a'",
        MILLION_A,
        "cdc76e5c9914fb9281a1c7e284d73e67f1809a48a497200e046d39ccc7112cd0",
    ),
];

const SHA384: &[KnownAnswer] = &[
    kat(
        "empty",
        EMPTY,
        "38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da274edebfe76f65fbd51ad2f14898b95b",
    ),
    kat(
        "abc",
        ABC,
        "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7",
    ),
];

const SHA512: &[KnownAnswer] = &[
    kat(
        "empty",
        EMPTY,
        "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e",
    ),
    kat(
        "abc",
        ABC,
        "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
    ),
    kat(
        "1M x 'a'",
        MILLION_A,
        "e718483d0ce769644e2e42c7bc15b4638e1f98b13b2044285632a803afa973ebde0ff244877ea60a4cb0432ce577c31beb009c5c2c49aa2e4eadb217ad8cc09b",
    ),
];

const SHA512_224: &[KnownAnswer] = &[kat(
    "abc",
    ABC,
    "4634270f707b6a54daae7530460842e20e37ed265ceee9a43e8924aa",
)];

const SHA512_256: &[KnownAnswer] = &[kat(
    "abc",
    ABC,
    "53048e2681941ef99b2e29b76b4c7dabe4c2d0c634fc6d46e0e2f13107e7af23",
)];

const fn known_answers(algorithm: Algorithm) -> Option<&'static [KnownAnswer]> {
    match algorithm {
        Algorithm::Md4 => Some(MD4),
        Algorithm::Md5 => Some(MD5),
        Algorithm::Sha1 => Some(SHA1),
        Algorithm::Sha224 => Some(SHA224),
        Algorithm::Sha256 => Some(SHA256),
        Algorithm::Sha384 => Some(SHA384),
        Algorithm::Sha512 => Some(SHA512),
        Algorithm::Sha512_224 => Some(SHA512_224),
        Algorithm::Sha512_256 => Some(SHA512_256),
        Algorithm::Xxh64 | Algorithm::Xxh3 | Algorithm::Xxh3_128 => None,
    }
}

/// Chunk sizes cycled while feeding an input; chosen to straddle the 64- and
/// 128-byte block sizes of the MD and SHA families.
const CHUNK_SIZES: [usize; 6] = [1, 63, 64, 65, 127, 1000];

/// Runs the extended self-test for `algorithm`.
pub fn run(algorithm: Algorithm) -> Result<(), SelfTestError> {
    let answers = known_answers(algorithm).ok_or(SelfTestError::NotImplemented)?;
    answers.iter().try_for_each(|answer| check(algorithm, answer))
}

fn check(algorithm: Algorithm, answer: &KnownAnswer) -> Result<(), SelfTestError> {
    let len = answer.input.len();
    let half = len / 2;

    let mut ctx = DigestContext::new(algorithm);
    let mut position = 0;
    let mut sizes = CHUNK_SIZES.iter().cycle();
    let mut fork = None;
    while position < len || fork.is_none() {
        if fork.is_none() && position >= half {
            fork = Some(
                ctx.duplicate()
                    .map_err(|_| SelfTestError::DuplicateDiverged {
                        label: answer.label,
                    })?,
            );
            continue;
        }
        let limit = if fork.is_none() { half } else { len };
        let step = sizes.next().copied().unwrap_or(1);
        let end = (position + step).min(limit);
        answer.input.feed(&mut ctx, position, end);
        position = end;
    }

    let mut fork = fork.ok_or(SelfTestError::DuplicateDiverged {
        label: answer.label,
    })?;
    answer.input.feed(&mut fork, half, len);

    let actual = ctx.read();
    if actual.to_string() != answer.hex {
        return Err(SelfTestError::KnownAnswer {
            label: answer.label,
            expected: answer.hex.to_owned(),
            actual: actual.to_string(),
        });
    }
    if fork.read() != actual {
        return Err(SelfTestError::DuplicateDiverged {
            label: answer.label,
        });
    }
    Ok(())
}
