// Console application
// Wires the demos to stdin/stdout, the OS entropy source and the loaded configuration

use std::io;

use rand::rngs::OsRng;

use super::password_demo::run_password_demo;
use super::rsa_demo::run_rsa_demo;
use crate::config::AppConfig;
use crate::password::{CredentialStore, PasswordHasher};

/// Which demo to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Demo {
    Rsa { message: String },
    Password,
}

pub fn create_app(demo: &Demo, config: &AppConfig) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match demo {
        Demo::Rsa { message } => {
            log::debug!(
                "running RSA demo with {}-bit primes, {} primality rounds",
                config.rsa.prime_bits,
                config.rsa.primality_rounds
            );
            run_rsa_demo(&config.rsa, message, &mut OsRng, &mut out)?;
        }
        Demo::Password => {
            let hasher = PasswordHasher::new(&config.password.digest)?;
            // lives for this session only
            let mut store = CredentialStore::new(hasher);
            let stdin = io::stdin();
            let mut input = stdin.lock();
            run_password_demo(&mut store, &mut input, &mut out, &mut OsRng)?;
        }
    }

    Ok(())
}
