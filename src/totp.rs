// Copyright 2019 Romain Failla
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::error::{OtpError, OtpResult};
use crate::generator::*;
use crate::hotp::DEFAULT_ALGORITHM;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

pub const DEFAULT_INIT_SECONDS: i64 = 0;
pub const DEFAULT_TIME_STEP: u64 = 30;

/// Source of the current Unix time, in whole seconds.
pub trait Clock {
    fn unix_seconds(&self) -> i64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_secs() as i64,
            Err(before) => -(before.duration().as_secs() as i64),
        }
    }
}

impl<F: Fn() -> i64> Clock for F {
    fn unix_seconds(&self) -> i64 {
        self()
    }
}

/// Counter derived from the number of time steps elapsed since
/// `init_seconds`.
///
/// Nothing is stored between reads: every call to `next` recomputes the
/// counter from the clock, so reads within the same step always agree.
#[derive(Clone)]
pub struct TimeStepCounter<K = SystemClock> {
    init_seconds: i64,
    time_step: u64,
    clock: K,
}

impl<K: Clock> TimeStepCounter<K> {
    pub fn new(init_seconds: i64, time_step: u64, clock: K) -> OtpResult<Self> {
        if time_step == 0 {
            return Err(OtpError::NullTimeStep);
        }

        Ok(TimeStepCounter {
            init_seconds,
            time_step,
            clock,
        })
    }

    pub fn init_seconds(&self) -> i64 {
        self.init_seconds
    }

    pub fn time_step(&self) -> u64 {
        self.time_step
    }

    /// Counter for the given Unix time. Times earlier than `init_seconds`
    /// map to counter 0.
    pub fn counter_at(&self, unix_seconds: i64) -> u64 {
        self.elapsed_seconds(unix_seconds) / self.time_step
    }

    pub fn current(&self) -> u64 {
        self.counter_at(self.clock.unix_seconds())
    }

    /// Seconds left before the counter moves to the next step.
    pub fn remaining_seconds(&self) -> u64 {
        let elapsed = self.elapsed_seconds(self.clock.unix_seconds());
        self.time_step - elapsed % self.time_step
    }

    fn elapsed_seconds(&self, unix_seconds: i64) -> u64 {
        let elapsed = unix_seconds.saturating_sub(self.init_seconds);
        if elapsed < 0 {
            0
        } else {
            elapsed as u64
        }
    }
}

impl<K: Clock> CounterSource for TimeStepCounter<K> {
    fn next(&mut self) -> u64 {
        self.current()
    }
}

impl<K> fmt::Debug for TimeStepCounter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeStepCounter")
            .field("init_seconds", &self.init_seconds)
            .field("time_step", &self.time_step)
            .finish()
    }
}

/// Time-based one-time password generator (RFC 6238) reading the system
/// clock.
pub type TotpGenerator = OtpGenerator<TimeStepCounter<SystemClock>>;

impl OtpGenerator<TimeStepCounter<SystemClock>> {
    pub fn new(secret: &[u8], init_seconds: i64, time_step: u64, digits: u32) -> OtpResult<Self> {
        Self::with_clock(secret, init_seconds, time_step, digits, SystemClock)
    }

    pub fn with_defaults(secret: &[u8], digits: u32) -> OtpResult<Self> {
        Self::new(secret, DEFAULT_INIT_SECONDS, DEFAULT_TIME_STEP, digits)
    }
}

impl<K: Clock> OtpGenerator<TimeStepCounter<K>> {
    pub fn with_clock(
        secret: &[u8],
        init_seconds: i64,
        time_step: u64,
        digits: u32,
        clock: K,
    ) -> OtpResult<Self> {
        let counter = TimeStepCounter::new(init_seconds, time_step, clock)?;
        Self::with_counter(secret, DEFAULT_ALGORITHM, counter, digits)
    }

    /// Computes the password for the given Unix time without reading the
    /// clock.
    pub fn value_at_time(&self, unix_seconds: i64) -> String {
        self.value_at(self.counter().counter_at(unix_seconds))
    }
}
