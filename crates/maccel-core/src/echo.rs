//! Publication of the most recent input speed.
//!
//! A [`SpeedEcho`] is a cheap clonable handle: the accelerator writes the
//! speed once per processed sample and any number of readers, possibly on
//! other threads, take snapshots as the big-endian bytes of the raw
//! fixed-point integer (four bytes for [`Fixed32`](crate::Fixed32), eight
//! for [`Fixed64`](crate::Fixed64)).

use crate::fixed::FixedPoint;
use std::{
    io,
    marker::PhantomData,
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
};

pub struct SpeedEcho<F> {
    raw: Arc<AtomicI64>,
    _format: PhantomData<fn() -> F>,
}

impl<F> Clone for SpeedEcho<F> {
    fn clone(&self) -> Self {
        Self {
            raw: Arc::clone(&self.raw),
            _format: PhantomData,
        }
    }
}

impl<F: FixedPoint> Default for SpeedEcho<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FixedPoint> std::fmt::Debug for SpeedEcho<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeedEcho")
            .field("speed", &self.speed())
            .finish()
    }
}

impl<F: FixedPoint> SpeedEcho<F> {
    pub fn new() -> Self {
        Self {
            raw: Arc::new(AtomicI64::new(0)),
            _format: PhantomData,
        }
    }

    pub fn publish(&self, speed: F) {
        // Storage is at most 64 bits wide, so the raw value always fits.
        self.raw.store(speed.raw() as i64, Ordering::Release);
    }

    pub fn speed(&self) -> F {
        F::from_raw_wrapping(self.raw.load(Ordering::Acquire) as i128)
    }

    /// Big-endian bytes of the last published speed.
    pub fn snapshot(&self) -> F::Bytes {
        self.speed().to_be_bytes()
    }

    /// Number of bytes in a snapshot.
    pub fn width(&self) -> usize {
        self.snapshot().as_ref().len()
    }
}

/// Every read returns one complete snapshot.
impl<F: FixedPoint> io::Read for SpeedEcho<F> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let snapshot = self.snapshot();
        let bytes = snapshot.as_ref();
        if buf.len() < bytes.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("speed snapshot needs {} bytes", bytes.len()),
            ));
        }
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(bytes.len())
    }
}
