#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

use std::io::BufRead;
use std::process::ExitCode;

use anyhow::Context;
use firebase_token_validator::{TokenValidator, ValidatorSettings, VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load configuration from Settings.toml and environment variables
    // This also initializes the logger
    let settings = ValidatorSettings::load().context("Failed to load settings")?;
    let validator =
        TokenValidator::from_settings(&settings).context("Failed to build token validator")?;

    log::info!(
        "🚀 firebase-token-validator v{VERSION} for project '{}'",
        validator.project_id()
    );

    let tokens = read_tokens()?;
    if tokens.is_empty() {
        eprintln!("Usage: firebase-token-validator [TOKEN...] (or one token per line on stdin)");
        return Ok(ExitCode::FAILURE);
    }

    let mut rejected = 0usize;
    for token in &tokens {
        match validator.validate(token).await {
            Ok(()) => println!("valid"),
            Err(e) => {
                rejected += 1;
                println!("invalid: {e}");
            }
        }
    }

    log::debug!("Validated {} tokens, {rejected} rejected", tokens.len());
    Ok(if rejected == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Tokens from the command line, or one per non-empty stdin line if none were given
fn read_tokens() -> anyhow::Result<Vec<String>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return Ok(args);
    }

    let mut tokens = Vec::new();
    for line in std::io::stdin().lock().lines() {
        let line = line.context("Failed to read tokens from stdin")?;
        let token = line.trim();
        if !token.is_empty() {
            tokens.push(token.to_string());
        }
    }
    Ok(tokens)
}
