// Copyright 2019 Romain Failla
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::error::{OtpError, OtpResult};
use data_encoding::{BASE32_NOPAD, HEXLOWER_PERMISSIVE};
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecretEncoding {
    Raw,
    Base32,
    Hex,
}

impl fmt::Display for SecretEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretEncoding::Raw => write!(f, "raw"),
            SecretEncoding::Base32 => write!(f, "base32"),
            SecretEncoding::Hex => write!(f, "hex"),
        }
    }
}

impl FromStr for SecretEncoding {
    type Err = OtpError;

    fn from_str(s: &str) -> OtpResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(SecretEncoding::Raw),
            "base32" => Ok(SecretEncoding::Base32),
            "hex" => Ok(SecretEncoding::Hex),
            _ => Err(OtpError::UnknownEncoding(s.to_string())),
        }
    }
}

/// Shared secret bytes, wiped from memory when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret(Vec<u8>);

impl Secret {
    /// Decodes secret material as read from a key file.
    ///
    /// Raw material is taken verbatim. Base32 (RFC 4648) and hex material
    /// may contain whitespace; base32 is case insensitive and its padding is
    /// optional.
    pub fn decode(material: &[u8], encoding: SecretEncoding) -> OtpResult<Self> {
        let decoded = match encoding {
            SecretEncoding::Raw => Ok(material.to_vec()),
            SecretEncoding::Base32 => {
                let mut cleaned: Vec<u8> = material
                    .iter()
                    .filter(|b| !b.is_ascii_whitespace() && **b != b'=')
                    .map(u8::to_ascii_uppercase)
                    .collect();
                let decoded = BASE32_NOPAD.decode(&cleaned);
                cleaned.zeroize();
                decoded
            }
            SecretEncoding::Hex => {
                let mut cleaned: Vec<u8> = material
                    .iter()
                    .filter(|b| !b.is_ascii_whitespace())
                    .cloned()
                    .collect();
                let decoded = HEXLOWER_PERMISSIVE.decode(&cleaned);
                cleaned.zeroize();
                decoded
            }
        };

        decoded
            .map(Secret)
            .map_err(|source| OtpError::InvalidSecret { encoding, source })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Secret {
    fn from(bytes: Vec<u8>) -> Self {
        Secret(bytes)
    }
}

impl AsRef<[u8]> for Secret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({} bytes)", self.0.len())
    }
}
