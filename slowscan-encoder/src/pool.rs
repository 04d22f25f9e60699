// Slowscan
// Copyright (c) 2026 The Project Slowscan Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `pool` module provides a bounded pool of encoder sessions for callers that want a fixed
//! number of live sessions instead of ad-hoc construction.

use slowscan_core::errors::{Error, Result};
use slowscan_core::image::Image;
use slowscan_core::mode::Mode;

use crate::encoder::Encoder;

/// Number of sessions an [`EncoderPool`] holds by default.
pub const DEFAULT_ENCODER_SLOTS: usize = 4;

/// A handle to a session held by an [`EncoderPool`].
///
/// Handles are invalidated when their session is released; a stale handle is rejected with
/// `BadParameter` rather than reaching whichever session reused the slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EncoderHandle {
    index: usize,
    generation: u64,
}

struct Slot {
    encoder: Option<Encoder>,
    generation: u64,
}

/// A fixed-size pool of encoder sessions.
///
/// Slot occupancy is tracked in a bitmask, which bounds a pool at 64 slots. Creating a session
/// when every slot is taken fails with `NoDefaultEncoders`; releasing a session frees its slot
/// for reuse.
pub struct EncoderPool {
    slots: Vec<Slot>,
    usage: u64,
}

impl EncoderPool {
    /// Instantiates a pool with [`DEFAULT_ENCODER_SLOTS`] slots.
    pub fn new() -> EncoderPool {
        EncoderPool::with_slots(DEFAULT_ENCODER_SLOTS)
    }

    /// Instantiates a pool with `count` slots. Panics if `count` is 0 or exceeds 64.
    pub fn with_slots(count: usize) -> EncoderPool {
        assert!(count > 0 && count <= 64, "pool size must be within 1..=64");

        let slots =
            (0..count).map(|_| Slot { encoder: None, generation: 0 }).collect();

        EncoderPool { slots, usage: 0 }
    }

    /// Creates a session in a free slot.
    ///
    /// Argument validation happens before a slot is claimed, so a rejected image never consumes
    /// pool capacity.
    pub fn create(&mut self, image: Image, mode: Mode, sample_rate: u32) -> Result<EncoderHandle> {
        let encoder = Encoder::new(image, mode, sample_rate)?;

        let index = (0..self.slots.len())
            .find(|i| self.usage & (1 << i) == 0)
            .ok_or(Error::NoDefaultEncoders)?;

        self.usage |= 1 << index;

        let slot = &mut self.slots[index];
        slot.generation += 1;
        slot.encoder = Some(encoder);

        Ok(EncoderHandle { index, generation: slot.generation })
    }

    /// Gets the session a handle refers to.
    pub fn get_mut(&mut self, handle: EncoderHandle) -> Result<&mut Encoder> {
        match self.slots.get_mut(handle.index) {
            Some(slot) if slot.generation == handle.generation => {
                slot.encoder.as_mut().ok_or(Error::BadParameter)
            }
            _ => Err(Error::BadParameter),
        }
    }

    /// Releases a session, freeing its slot for reuse.
    pub fn release(&mut self, handle: EncoderHandle) -> Result<()> {
        let slot = self.slots.get_mut(handle.index).ok_or(Error::BadParameter)?;

        if slot.generation != handle.generation || slot.encoder.is_none() {
            return Err(Error::BadParameter);
        }

        slot.encoder = None;
        self.usage &= !(1 << handle.index);

        Ok(())
    }

    /// Gets the number of slots currently in use.
    pub fn in_use(&self) -> usize {
        self.usage.count_ones() as usize
    }

    /// Gets the total number of slots.
    pub fn slots(&self) -> usize {
        self.slots.len()
    }
}

impl Default for EncoderPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{EncoderPool, DEFAULT_ENCODER_SLOTS};
    use slowscan_core::errors::Error;
    use slowscan_core::image::Image;
    use slowscan_core::mode::Mode;

    #[test]
    fn verify_exhaustion_and_reuse() {
        let mut pool = EncoderPool::new();

        let mut handles = Vec::new();
        for _ in 0..DEFAULT_ENCODER_SLOTS {
            handles.push(pool.create(Image::for_mode(Mode::Pd90), Mode::Pd90, 48000).unwrap());
        }
        assert_eq!(pool.in_use(), DEFAULT_ENCODER_SLOTS);

        // One session too many.
        assert_eq!(
            pool.create(Image::for_mode(Mode::Pd90), Mode::Pd90, 48000).unwrap_err(),
            Error::NoDefaultEncoders
        );

        // Releasing any session frees its slot for a fresh create.
        pool.release(handles[1]).unwrap();
        let fresh = pool.create(Image::for_mode(Mode::MartinM2), Mode::MartinM2, 48000).unwrap();
        assert_eq!(pool.in_use(), DEFAULT_ENCODER_SLOTS);
        assert_eq!(pool.get_mut(fresh).unwrap().mode(), Mode::MartinM2);
    }

    #[test]
    fn verify_rejected_create_consumes_no_slot() {
        let mut pool = EncoderPool::new();

        let img = Image::for_mode(Mode::ScottieS1);
        assert_eq!(pool.create(img, Mode::Pd120, 48000).unwrap_err(), Error::BadResolution);
        assert_eq!(pool.in_use(), 0);
    }

    #[test]
    fn verify_stale_handles_rejected() {
        let mut pool = EncoderPool::new();

        let handle = pool.create(Image::for_mode(Mode::Pd90), Mode::Pd90, 48000).unwrap();
        pool.release(handle).unwrap();

        assert_eq!(pool.get_mut(handle).unwrap_err(), Error::BadParameter);
        assert_eq!(pool.release(handle).unwrap_err(), Error::BadParameter);

        // A reused slot does not resurrect the released handle.
        let _fresh = pool.create(Image::for_mode(Mode::Pd90), Mode::Pd90, 48000).unwrap();
        assert_eq!(pool.get_mut(handle).unwrap_err(), Error::BadParameter);
    }
}
