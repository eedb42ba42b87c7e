// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::borrow::Cow;

use thiserror::Error;

/// Compile-time flag: set `SPOOL_PANIC_ON_ERROR=1` when building to make
/// every error constructor panic at its creation site instead of returning.
/// Combined with `RUST_BACKTRACE=1` this pinpoints the exact origin of an
/// error during debugging.
pub const PANIC_ON_ERROR: bool = option_env!("SPOOL_PANIC_ON_ERROR").is_some();

/// Error type for all factory, pool, and engine operations.
///
/// Construct variants through the static constructor functions
/// ([`Error::unknown_type`], [`Error::pool_exhausted`], ...) rather than the
/// enum syntax: the constructors handle `Into<Cow<'static, str>>` conversion
/// and honor the `SPOOL_PANIC_ON_ERROR` debug switch.
///
/// Every error is local to the failing `register`/`acquire`/`encode`/`decode`
/// call; none leaves the pool or the registry in a state the caller has to
/// repair.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// `register` was called after the first engine instance was built.
    /// Caller bug, not retried.
    #[error("{0}")]
    RegistrationAfterUse(Cow<'static, str>),

    /// A strict-mode engine was asked to handle a type with no registration
    /// and no codec-table match. Recoverable only by reconfiguration.
    #[error("{0}")]
    UnknownType(Cow<'static, str>),

    /// `acquire` timed out (or failed fast) on an exhausted, capped pool.
    #[error("{0}")]
    PoolExhausted(Cow<'static, str>),

    /// `acquire` after `close`.
    #[error("{0}")]
    PoolClosed(Cow<'static, str>),

    /// Wire type id does not match the expected type.
    #[error("type id mismatch: expected {0}, found {1}")]
    TypeMismatch(u32, u32),

    /// Read past the end of the input buffer.
    #[error("buffer out of bound: {0} + {1} > {2}")]
    BufferOutOfBound(usize, usize, usize),

    /// Corrupted or malformed input data.
    #[error("{0}")]
    InvalidData(Cow<'static, str>),

    /// A codec failed to encode or re-materialize a value.
    #[error("{0}")]
    EncodingError(Cow<'static, str>),
}

impl Error {
    /// Creates a new [`Error::RegistrationAfterUse`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn registration_after_use<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::RegistrationAfterUse(s.into());
        if PANIC_ON_ERROR {
            panic!("SPOOL_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::UnknownType`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unknown_type<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::UnknownType(s.into());
        if PANIC_ON_ERROR {
            panic!("SPOOL_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::PoolExhausted`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn pool_exhausted<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::PoolExhausted(s.into());
        if PANIC_ON_ERROR {
            panic!("SPOOL_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::PoolClosed`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn pool_closed<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::PoolClosed(s.into());
        if PANIC_ON_ERROR {
            panic!("SPOOL_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::TypeMismatch`] with the expected and actual
    /// wire type ids.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn type_mismatch(expected: u32, actual: u32) -> Self {
        let err = Error::TypeMismatch(expected, actual);
        if PANIC_ON_ERROR {
            panic!("SPOOL_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::BufferOutOfBound`] with the given bounds.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn buffer_out_of_bound(offset: usize, length: usize, capacity: usize) -> Self {
        let err = Error::BufferOutOfBound(offset, length, capacity);
        if PANIC_ON_ERROR {
            panic!("SPOOL_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::InvalidData`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_data<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::InvalidData(s.into());
        if PANIC_ON_ERROR {
            panic!("SPOOL_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::EncodingError`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn encoding_error<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::EncodingError(s.into());
        if PANIC_ON_ERROR {
            panic!("SPOOL_PANIC_ON_ERROR: {}", err);
        }
        err
    }
}

/// Ensures a condition is true; otherwise returns an [`enum@Error`].
///
/// # Examples
/// ```
/// use spool_core::ensure;
/// use spool_core::error::Error;
///
/// fn check_len(n: usize) -> Result<(), Error> {
///     ensure!(n < 16, Error::invalid_data(format!("length {} too large", n)));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

/// Returns early with an [`Error::InvalidData`].
#[macro_export]
macro_rules! bail {
    ($msg:expr) => {
        return Err($crate::error::Error::invalid_data($msg))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::invalid_data(format!($fmt, $($arg)*)))
    };
}
