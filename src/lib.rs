// Copyright 2019 Romain Failla
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! One-time password generation.
//!
//! Implements HOTP ([RFC 4226](https://tools.ietf.org/html/rfc4226)) and
//! TOTP ([RFC 6238](https://tools.ietf.org/html/rfc6238)) on top of a single
//! engine, [`OtpGenerator`], parameterized by its [`CounterSource`].
//!
//! ```
//! use otpgen::{Generator, HotpGenerator};
//!
//! let mut hotp = HotpGenerator::new(b"12345678901234567890", 0, 6).unwrap();
//! assert_eq!(hotp.generate(), "755224");
//! assert_eq!(hotp.generate(), "287082");
//! assert_eq!(hotp.next_counter(), 2);
//! ```

mod crypto;
mod error;
mod generator;
mod hotp;
mod secret;
mod totp;

pub use crate::crypto::CryptoError;
pub use crate::error::{OtpError, OtpResult};
pub use crate::generator::{CounterSource, Generator, GeneratorAlgorithm, OtpGenerator};
pub use crate::hotp::{HotpGenerator, IncrementingCounter, DEFAULT_ALGORITHM, DEFAULT_DIGITS};
pub use crate::secret::{Secret, SecretEncoding};
pub use crate::totp::{
    Clock, SystemClock, TimeStepCounter, TotpGenerator, DEFAULT_INIT_SECONDS, DEFAULT_TIME_STEP,
};
