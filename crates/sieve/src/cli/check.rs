use std::process::ExitCode;

use anyhow::Result;
use sieve_core::ingest::{sanitize, FieldValidators};
use sieve_core::{CanonicalField, Settings};

pub fn run(field: CanonicalField, value: &str, settings: &Settings) -> Result<ExitCode> {
    let validators = FieldValidators::from_config(&settings.pipeline)?;
    let sanitized = sanitize(value);

    println!("field: {field}");
    println!("sanitized: {sanitized}");

    match validators.validate(field, &sanitized) {
        Ok(accepted) => {
            println!("accepted: {accepted}");
            Ok(ExitCode::SUCCESS)
        }
        Err(reason) => {
            println!("rejected: {reason}");
            Ok(ExitCode::FAILURE)
        }
    }
}
