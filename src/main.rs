// Copyright 2019 Romain Failla
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use clap::Parser;
use log::{debug, error};
use otpgen::{
    Generator, GeneratorAlgorithm, IncrementingCounter, OtpGenerator, OtpResult, Secret,
    SecretEncoding, SystemClock, TimeStepCounter, DEFAULT_ALGORITHM, DEFAULT_DIGITS,
    DEFAULT_INIT_SECONDS, DEFAULT_TIME_STEP,
};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::process;
use zeroize::Zeroize;

#[derive(Debug, Parser)]
#[command(name = "otpgen", about = "Generates HOTP and TOTP one-time passwords", version)]
struct Args {
    #[arg(short, long, help = "Enable debug logs")]
    debug: bool,

    #[arg(short, long, help = "Key file with shared secret data")]
    key_file: PathBuf,

    #[arg(short, long, default_value_t = 1, help = "Number of passwords to generate")]
    num_entries: usize,

    #[arg(short = 't', long, help = "Use time-based OTP instead of HMAC OTP")]
    use_time: bool,

    #[arg(long, default_value_t = DEFAULT_DIGITS, help = "Number of digits per password")]
    digits: u32,

    #[arg(short, long, default_value_t = 0, help = "Initial HOTP counter")]
    counter: u64,

    #[arg(
        long,
        default_value_t = DEFAULT_INIT_SECONDS,
        allow_hyphen_values = true,
        help = "Unix time the TOTP steps are counted from"
    )]
    init_seconds: i64,

    #[arg(long, default_value_t = DEFAULT_TIME_STEP, help = "TOTP time step in seconds")]
    time_step: u64,

    #[arg(short, long, default_value_t = DEFAULT_ALGORITHM, help = "HMAC algorithm: SHA1, SHA256 or SHA512")]
    algorithm: GeneratorAlgorithm,

    #[arg(short, long, default_value_t = SecretEncoding::Raw, help = "Key file encoding: raw, base32 or hex")]
    encoding: SecretEncoding,
}

trait ExtResult<T> {
    fn ok_or_exit<S: AsRef<str>>(self, prefix: S) -> T;
}

impl<T, E: fmt::Display> ExtResult<T> for Result<T, E> {
    fn ok_or_exit<S: AsRef<str>>(self, prefix: S) -> T {
        match self {
            Ok(result) => result,
            Err(err) => {
                error!("{}: {}", prefix.as_ref(), err);
                process::exit(1)
            }
        }
    }
}

fn create_generator(args: &Args, secret: &Secret) -> OtpResult<Box<dyn Generator>> {
    if args.use_time {
        let counter = TimeStepCounter::new(args.init_seconds, args.time_step, SystemClock)?;
        debug!("Using time-based counter {:?}", counter);
        Ok(Box::new(OtpGenerator::with_counter(
            secret.as_ref(),
            args.algorithm,
            counter,
            args.digits,
        )?))
    } else {
        debug!("Using counter starting at {}", args.counter);
        Ok(Box::new(OtpGenerator::with_counter(
            secret.as_ref(),
            args.algorithm,
            IncrementingCounter::new(args.counter),
            args.digits,
        )?))
    }
}

fn main() {
    let args = Args::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    if args.debug {
        log_builder.filter(None, log::LevelFilter::Debug);
    } else {
        log_builder.filter(None, log::LevelFilter::Warn);
    }
    log_builder.target(env_logger::Target::Stderr);
    log_builder.init();

    let mut material = fs::read(&args.key_file).ok_or_exit(format!(
        "Could not read key file {}",
        args.key_file.display()
    ));
    let secret = Secret::decode(&material, args.encoding).ok_or_exit("Could not decode key file");
    material.zeroize();
    debug!("Loaded {:?}", secret);

    let mut generator = create_generator(&args, &secret).ok_or_exit("Invalid configuration");
    drop(secret);

    for _ in 0..args.num_entries {
        println!("{}", generator.generate());
    }
}
