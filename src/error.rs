// Copyright 2019 Romain Failla
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::crypto::CryptoError;
use crate::secret::SecretEncoding;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OtpError {
    #[error("Wrong number of digits: {0} (expected a value between 1 and 9)")]
    InvalidDigits(u32),

    #[error("TOTP time step cannot be null!")]
    NullTimeStep,

    #[error("Unknown HMAC algorithm: {0}. Expected one of: SHA1, SHA256 or SHA512")]
    UnknownAlgorithm(String),

    #[error("Unknown secret encoding: {0}. Expected one of: raw, base32 or hex")]
    UnknownEncoding(String),

    #[error("Invalid {encoding} secret: {source}")]
    InvalidSecret {
        encoding: SecretEncoding,
        source: data_encoding::DecodeError,
    },

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

pub type OtpResult<T> = Result<T, OtpError>;
