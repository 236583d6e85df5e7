// Copyright 2019 Romain Failla
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::generator::GeneratorAlgorithm;
use hmac::{Hmac, Mac};
use sha1::Sha1;
#[cfg(feature = "sha256")]
use sha2::Sha256;
#[cfg(feature = "sha512")]
use sha2::Sha512;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Error occurred during crypto process: {kind}")]
pub struct CryptoError {
    kind: String,
}

impl CryptoError {
    fn new(kind: &str) -> Self {
        CryptoError {
            kind: String::from(kind),
        }
    }
}

/// HMAC state keyed once with the shared secret.
///
/// Every signature starts from a clone of the keyed state, so the secret is
/// only ever fed to the hash primitive at construction.
#[derive(Clone)]
pub(crate) enum KeyedMac {
    Sha1(Hmac<Sha1>),
    #[cfg(feature = "sha256")]
    Sha256(Hmac<Sha256>),
    #[cfg(feature = "sha512")]
    Sha512(Hmac<Sha512>),
}

impl KeyedMac {
    pub fn new(algorithm: GeneratorAlgorithm, secret: &[u8]) -> Result<Self, CryptoError> {
        match algorithm {
            GeneratorAlgorithm::HmacSha1 => Ok(KeyedMac::Sha1(keyed(secret)?)),
            #[cfg(feature = "sha256")]
            GeneratorAlgorithm::HmacSha256 => Ok(KeyedMac::Sha256(keyed(secret)?)),
            #[cfg(not(feature = "sha256"))]
            GeneratorAlgorithm::HmacSha256 => Err(CryptoError::new(
                "HMAC-SHA-256 is not enabled with your features",
            )),
            #[cfg(feature = "sha512")]
            GeneratorAlgorithm::HmacSha512 => Ok(KeyedMac::Sha512(keyed(secret)?)),
            #[cfg(not(feature = "sha512"))]
            GeneratorAlgorithm::HmacSha512 => Err(CryptoError::new(
                "HMAC-SHA-512 is not enabled with your features",
            )),
        }
    }

    pub fn algorithm(&self) -> GeneratorAlgorithm {
        match self {
            KeyedMac::Sha1(_) => GeneratorAlgorithm::HmacSha1,
            #[cfg(feature = "sha256")]
            KeyedMac::Sha256(_) => GeneratorAlgorithm::HmacSha256,
            #[cfg(feature = "sha512")]
            KeyedMac::Sha512(_) => GeneratorAlgorithm::HmacSha512,
        }
    }

    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        match self {
            KeyedMac::Sha1(mac) => sign(mac, message),
            #[cfg(feature = "sha256")]
            KeyedMac::Sha256(mac) => sign(mac, message),
            #[cfg(feature = "sha512")]
            KeyedMac::Sha512(mac) => sign(mac, message),
        }
    }
}

fn keyed<M: Mac>(secret: &[u8]) -> Result<M, CryptoError> {
    M::new_varkey(secret).map_err(|_| CryptoError::new("Invalid secret length"))
}

fn sign<M: Mac>(mac: &M, message: &[u8]) -> Vec<u8> {
    let mut digest = mac.clone();
    digest.input(message);

    digest.result().code().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_encoding::HEXLOWER;

    #[test]
    fn should_compute_hmac_sha1() {
        let mac = KeyedMac::new(GeneratorAlgorithm::HmacSha1, b"tacocat");
        let expected = vec![
            0x81, 0x8d, 0xe8, 0x9f, 0x4b, 0xa5, 0xdd, 0x1d, 0x89, 0xd8, 0xa8, 0x1c, 0xdb, 0x7c,
            0x88, 0x4d, 0x44, 0x04, 0xee, 0xd9,
        ];

        assert!(mac.is_ok());
        assert_eq!(expected, mac.unwrap().sign(b"hello"));
    }

    #[cfg(feature = "sha256")]
    #[test]
    fn should_compute_hmac_sha256() {
        let mac = KeyedMac::new(GeneratorAlgorithm::HmacSha256, b"tacocat");
        let expected = vec![
            0xd8, 0xd6, 0x62, 0xc5, 0xa5, 0xfd, 0xd8, 0xc5, 0xe8, 0x50, 0x77, 0x02, 0xf7, 0x69,
            0x93, 0x45, 0xeb, 0x42, 0x56, 0xd4, 0xeb, 0x0d, 0xeb, 0xe1, 0x26, 0x71, 0x86, 0xb4,
            0x2c, 0xe4, 0xb1, 0xb0,
        ];

        assert!(mac.is_ok());
        assert_eq!(expected, mac.unwrap().sign(b"hello"));
    }

    #[cfg(feature = "sha512")]
    #[test]
    fn should_compute_hmac_sha512() {
        let mac = KeyedMac::new(GeneratorAlgorithm::HmacSha512, b"tacocat");
        let expected = vec![
            0x9f, 0xa8, 0xc8, 0x98, 0xf0, 0xc2, 0x3b, 0x7d, 0xdb, 0xd1, 0x0e, 0xc3, 0x07, 0x7a,
            0x53, 0xc4, 0x92, 0x14, 0xb4, 0x09, 0xe9, 0x7f, 0xd2, 0x27, 0xf0, 0x2f, 0xae, 0x8c,
            0x74, 0x8d, 0xce, 0xf5, 0xd3, 0x7a, 0x8b, 0x4d, 0x7d, 0x6a, 0xd0, 0x63, 0x00, 0x51,
            0x33, 0x70, 0x17, 0x21, 0x9c, 0x72, 0x60, 0xf1, 0x9b, 0x5c, 0x63, 0xa0, 0xc9, 0xe4,
            0xf7, 0xf5, 0x1d, 0x3f, 0xaa, 0x13, 0x34, 0x4f,
        ];

        assert!(mac.is_ok());
        assert_eq!(expected, mac.unwrap().sign(b"hello"));
    }

    #[test]
    fn should_match_rfc4226_intermediate_digests() {
        let mac = KeyedMac::new(GeneratorAlgorithm::HmacSha1, b"12345678901234567890").unwrap();
        let expected = [
            "cc93cf18508d94934c64b65d8ba7667fb7cde4b0",
            "75a48a19d4cbe100644e8ac1397eea747a2d33ab",
            "0bacb7fa082fef30782211938bc1c5e70416ff44",
            "66c28227d03a2d5529262ff016a1e6ef76557ece",
            "a904c900a64b35909874b33e61c5938a8e15ed1c",
            "a37e783d7b7233c083d4f62926c7a25f238d0316",
            "bc9cd28561042c83f219324d3c607256c03272ae",
            "a4fb960c0bc06e1eabb804e5b397cdc4b45596fa",
            "1b3c89f65e6c9e883012052823443f048b4332db",
            "1637409809a679dc698207310c8c7fc07290d9e5",
        ];

        for (counter, digest) in expected.iter().enumerate() {
            let signed = mac.sign(&(counter as u64).to_be_bytes());
            assert_eq!(HEXLOWER.encode(&signed), *digest);
        }
    }

    #[test]
    fn should_reuse_keyed_state() {
        let mac = KeyedMac::new(GeneratorAlgorithm::HmacSha1, b"tacocat").unwrap();

        assert_eq!(mac.sign(b"hello"), mac.sign(b"hello"));
        assert_eq!(mac.algorithm(), GeneratorAlgorithm::HmacSha1);
    }

    #[test]
    fn should_accept_empty_secret() {
        assert!(KeyedMac::new(GeneratorAlgorithm::HmacSha1, b"").is_ok());
    }
}
