// Copyright 2019 Romain Failla
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::error::OtpResult;
use crate::generator::*;

pub const DEFAULT_ALGORITHM: GeneratorAlgorithm = GeneratorAlgorithm::HmacSha1;
pub const DEFAULT_DIGITS: u32 = 6;

/// Counter incremented after each read.
///
/// The first call to `next` returns the initial value. The counter wraps on
/// overflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IncrementingCounter {
    next: u64,
}

impl IncrementingCounter {
    pub fn new(initial: u64) -> Self {
        IncrementingCounter { next: initial }
    }

    /// The value the next call to `next` will return.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl CounterSource for IncrementingCounter {
    fn next(&mut self) -> u64 {
        let counter = self.next;
        self.next = self.next.wrapping_add(1);
        counter
    }
}

/// HMAC-based one-time password generator (RFC 4226).
pub type HotpGenerator = OtpGenerator<IncrementingCounter>;

impl OtpGenerator<IncrementingCounter> {
    pub fn new(secret: &[u8], init_counter: u64, digits: u32) -> OtpResult<Self> {
        Self::with_counter(
            secret,
            DEFAULT_ALGORITHM,
            IncrementingCounter::new(init_counter),
            digits,
        )
    }

    /// The counter the next generated password will use.
    pub fn next_counter(&self) -> u64 {
        self.counter().peek()
    }
}
