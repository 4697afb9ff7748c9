// Password hashing console driver
// Registers one user, then checks one authentication attempt

use std::io::{BufRead, Write};

use anyhow::bail;
use rand::{CryptoRng, RngCore};

use crate::password::CredentialStore;

pub const VALIDATED: &str = "Validated user ID and password pair";
pub const NOT_VALIDATED: &str = "Failed to validate this user ID and password pair.";

/// Prompt on `out` and read one line from `input`, without the line ending.
pub fn prompt<I, W>(input: &mut I, out: &mut W, question: &str) -> anyhow::Result<String>
where
    I: BufRead,
    W: Write,
{
    writeln!(out, "{}", question)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("unexpected end of input while waiting for: {}", question);
    }

    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

/// Returns whether the authentication attempt was accepted.
pub fn run_password_demo<I, W, R>(
    store: &mut CredentialStore,
    input: &mut I,
    out: &mut W,
    rng: &mut R,
) -> anyhow::Result<bool>
where
    I: BufRead,
    W: Write,
    R: CryptoRng + RngCore,
{
    let user_id = prompt(input, out, "Enter user ID:")?;
    let password = prompt(input, out, "Enter password:")?;

    let credential = store.register(&user_id, &password, rng)?;

    writeln!(out, "The following could be stored on a file:")?;
    writeln!(out, "user ID = {}", user_id)?;
    writeln!(out, "{}", credential)?;

    let auth_user_id = prompt(input, out, "Enter user ID for authentication test:")?;
    let auth_password = prompt(input, out, "Enter password for authentication test:")?;

    // unknown user and wrong password print the same message
    let validated = store.verify(&auth_user_id, &auth_password);
    writeln!(out, "{}", if validated { VALIDATED } else { NOT_VALIDATED })?;

    Ok(validated)
}
