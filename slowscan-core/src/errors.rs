// Slowscan
// Copyright (c) 2026 The Project Slowscan Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type and its wire-level status codes.

use std::error;
use std::fmt;
use std::result;

/// `Error` provides an enumeration of all possible errors reported by Slowscan.
///
/// Each variant's discriminant is the library's wire-level numeric status code. The codes are
/// stable and survive a round-trip through [`Error::code`] and [`Error::from_code`]. Status code
/// `0` (ok) is expressed as `Result::Ok`, and the two streaming codes (buffer full, end of
/// stream) are not errors; they are carried by the encoder's status type.
///
/// The allocator-hook codes (100..=102 and 200) are retained for ABI parity with implementations
/// that accept user allocation routines. Sessions here are plain owned values, so the library
/// itself never produces them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Error {
    /// An internal invariant was violated. Fatal for the session that reported it.
    Internal = 1,
    /// An allocator was registered without a deallocator, or vice versa.
    BadInitializers = 100,
    /// The operation requires a user allocation routine and none was registered.
    BadUserAlloc = 101,
    /// The operation requires a user deallocation routine and none was registered.
    BadUserDealloc = 102,
    /// An argument violated the operation's contract.
    BadParameter = 103,
    /// The value does not identify a supported SSTV mode.
    BadMode = 104,
    /// The pixel format is not the one the operation requires.
    BadFormat = 105,
    /// The image dimensions are not the ones the mode prescribes.
    BadResolution = 106,
    /// The sample type is not one of the supported output types.
    BadSampleType = 107,
    /// The requested colour conversion cannot be performed.
    UnsupportedConversion = 108,
    /// A dynamic allocation failed.
    AllocFail = 200,
    /// All preallocated encoder slots are in use.
    NoDefaultEncoders = 1100,
}

impl Error {
    /// Returns the numeric status code of this error.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Looks up the error corresponding to a numeric status code.
    pub fn from_code(code: u32) -> Option<Error> {
        match code {
            1 => Some(Error::Internal),
            100 => Some(Error::BadInitializers),
            101 => Some(Error::BadUserAlloc),
            102 => Some(Error::BadUserDealloc),
            103 => Some(Error::BadParameter),
            104 => Some(Error::BadMode),
            105 => Some(Error::BadFormat),
            106 => Some(Error::BadResolution),
            107 => Some(Error::BadSampleType),
            108 => Some(Error::UnsupportedConversion),
            200 => Some(Error::AllocFail),
            1100 => Some(Error::NoDefaultEncoders),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match *self {
            Error::Internal => "internal error",
            Error::BadInitializers => "allocation routines must be registered in pairs",
            Error::BadUserAlloc => "no user allocation routine registered",
            Error::BadUserDealloc => "no user deallocation routine registered",
            Error::BadParameter => "bad parameter",
            Error::BadMode => "unknown SSTV mode",
            Error::BadFormat => "image pixel format does not match the mode",
            Error::BadResolution => "image dimensions do not match the mode",
            Error::BadSampleType => "unsupported sample type",
            Error::UnsupportedConversion => "unsupported colour conversion",
            Error::AllocFail => "allocation failed",
            Error::NoDefaultEncoders => "no free encoder slots",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.code())
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;
