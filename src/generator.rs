// Copyright 2019 Romain Failla
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::crypto::KeyedMac;
use crate::error::{OtpError, OtpResult};
use log::{debug, trace};
use std::fmt;
use std::str::FromStr;

const DYNAMIC_TRUNCATE_OFFSET_MASK: u8 = 0x0f;
const DYNAMIC_TRUNCATE_31_BIT_MASK: u32 = 0x7fff_ffff;
const MIN_DIGEST_LENGTH: usize = 20;
const MAX_DIGITS: u32 = 9;

/// One-time password generator.
pub trait Generator {
    /// Computes the next password, advancing the underlying counter source
    /// exactly once.
    fn generate(&mut self) -> String;
}

/// Produces the moving factor hashed by an [`OtpGenerator`].
pub trait CounterSource {
    fn next(&mut self) -> u64;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorAlgorithm {
    HmacSha1,
    HmacSha256,
    HmacSha512,
}

impl fmt::Display for GeneratorAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorAlgorithm::HmacSha1 => write!(f, "SHA1"),
            GeneratorAlgorithm::HmacSha256 => write!(f, "SHA256"),
            GeneratorAlgorithm::HmacSha512 => write!(f, "SHA512"),
        }
    }
}

impl FromStr for GeneratorAlgorithm {
    type Err = OtpError;

    fn from_str(s: &str) -> OtpResult<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SHA1" | "SHA-1" => Ok(GeneratorAlgorithm::HmacSha1),
            "SHA256" | "SHA-256" => Ok(GeneratorAlgorithm::HmacSha256),
            "SHA512" | "SHA-512" => Ok(GeneratorAlgorithm::HmacSha512),
            _ => Err(OtpError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// HMAC-based password engine driven by a [`CounterSource`].
///
/// Each call to [`Generator::generate`] pulls one value from the counter
/// source, signs it as an 8 byte big-endian message, applies the dynamic
/// truncation of RFC 4226 and renders the result with exactly `digits`
/// decimal characters.
///
/// The counter source is the only mutable part of a generator. Sharing an
/// HOTP generator between threads therefore requires external locking, which
/// the `&mut self` receiver of `generate` already enforces.
pub struct OtpGenerator<C> {
    mac: KeyedMac,
    counter: C,
    digits: u32,
}

impl<C: CounterSource> OtpGenerator<C> {
    pub fn with_counter(
        secret: &[u8],
        algorithm: GeneratorAlgorithm,
        counter: C,
        digits: u32,
    ) -> OtpResult<Self> {
        if digits == 0 || digits > MAX_DIGITS {
            return Err(OtpError::InvalidDigits(digits));
        }

        let mac = KeyedMac::new(algorithm, secret)?;
        debug!("Created {} generator with {} digits", algorithm, digits);

        Ok(OtpGenerator {
            mac,
            counter,
            digits,
        })
    }

    /// Computes the password for an explicit counter value, leaving the
    /// counter source untouched.
    pub fn value_at(&self, counter: u64) -> String {
        let digest = self.mac.sign(&counter.to_be_bytes());
        let truncated = dynamic_truncate(&digest);

        format_value(truncated % 10u32.pow(self.digits), self.digits)
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    pub fn algorithm(&self) -> GeneratorAlgorithm {
        self.mac.algorithm()
    }

    pub fn counter(&self) -> &C {
        &self.counter
    }
}

impl<C: CounterSource> Generator for OtpGenerator<C> {
    fn generate(&mut self) -> String {
        let counter = self.counter.next();
        trace!("Generating password for counter {}", counter);

        self.value_at(counter)
    }
}

impl<C: fmt::Debug> fmt::Debug for OtpGenerator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtpGenerator")
            .field("algorithm", &self.mac.algorithm())
            .field("counter", &self.counter)
            .field("digits", &self.digits)
            .finish()
    }
}

/// RFC 4226 dynamic truncation.
///
/// # Panics
///
/// When `digest` is shorter than 20 bytes, which no supported HMAC can
/// produce.
pub(crate) fn dynamic_truncate(digest: &[u8]) -> u32 {
    assert!(
        digest.len() >= MIN_DIGEST_LENGTH,
        "HMAC digest is too short: {} bytes",
        digest.len()
    );

    // 0 <= offset <= 15
    let offset = (digest[digest.len() - 1] & DYNAMIC_TRUNCATE_OFFSET_MASK) as usize;
    let mut window = [0u8; 4];
    window.copy_from_slice(&digest[offset..offset + 4]);

    u32::from_be_bytes(window) & DYNAMIC_TRUNCATE_31_BIT_MASK
}

fn format_value(value: u32, digits: u32) -> String {
    format!("{:01$}", value, digits as usize)
}
