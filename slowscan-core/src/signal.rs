// Slowscan
// Copyright (c) 2026 The Project Slowscan Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `signal` module provides the sample container an encoder drains into.

use crate::sample::Sample;

/// `SignalBuffer` is a fixed-capacity container for contiguous mono audio samples.
///
/// An encoder fills the buffer from the front on each call and reports how many samples were
/// written; the running count never exceeds the capacity. The capacity is fixed at construction
/// so that a caller can hand the same buffer to many consecutive fill calls without
/// reallocation.
pub struct SignalBuffer<S: Sample> {
    buf: Vec<S>,
    count: usize,
}

impl<S: Sample> SignalBuffer<S> {
    /// Instantiates a new `SignalBuffer` with a capacity of `capacity` samples, all initialised
    /// to silence.
    pub fn new(capacity: usize) -> SignalBuffer<S> {
        SignalBuffer { buf: vec![S::MID; capacity], count: 0 }
    }

    /// Instantiates a `SignalBuffer` that adopts `buf` as its storage. The buffer's length
    /// becomes the capacity.
    pub fn from_vec(buf: Vec<S>) -> SignalBuffer<S> {
        SignalBuffer { buf, count: 0 }
    }

    /// Gets the number of samples written since the last clear.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if no samples have been written since the last clear.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `true` if the buffer cannot accept another sample.
    pub fn is_full(&self) -> bool {
        self.count == self.buf.len()
    }

    /// Gets the buffer's capacity in samples.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Gets an immutable slice of the samples written since the last clear.
    pub fn samples(&self) -> &[S] {
        &self.buf[..self.count]
    }

    /// Resets the sample count to zero. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Appends one sample. Returns `false`, leaving the buffer untouched, if it is full.
    pub fn push(&mut self, sample: S) -> bool {
        if self.count == self.buf.len() {
            return false;
        }

        self.buf[self.count] = sample;
        self.count += 1;
        true
    }

    /// Consumes the buffer and returns the underlying storage. Samples beyond the written count
    /// hold whatever the previous fills left there.
    pub fn into_inner(self) -> Vec<S> {
        self.buf
    }
}
