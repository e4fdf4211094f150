//! crates/logging/src/writer.rs
//! Shared, lockable output handle usable as a tracing writer.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;

/// Cloneable handle to a writer guarded by a mutex.
///
/// The CLI hands its standard error stream to the diagnostic layer through
/// this handle while keeping a clone for usage errors and summaries, so both
/// paths interleave on the same stream in order.
#[derive(Debug)]
pub struct SharedWriter<W> {
    inner: Arc<Mutex<W>>,
}

impl<W> Clone for SharedWriter<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W> SharedWriter<W> {
    /// Wraps `writer`.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    /// Locks the writer, recovering from a poisoned lock.
    pub fn lock(&self) -> SharedWriterGuard<'_, W> {
        SharedWriterGuard(
            self.inner
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner),
        )
    }
}

impl SharedWriter<Vec<u8>> {
    /// Returns everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock().0).into_owned()
    }
}

/// Exclusive access to a [`SharedWriter`] for the duration of one write.
#[derive(Debug)]
pub struct SharedWriterGuard<'a, W>(MutexGuard<'a, W>);

impl<W: Write> Write for SharedWriterGuard<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<W: Write> Write for SharedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flush()
    }
}

impl<'a, W: Write + 'a> MakeWriter<'a> for SharedWriter<W> {
    type Writer = SharedWriterGuard<'a, W>;

    fn make_writer(&'a self) -> Self::Writer {
        self.lock()
    }
}
