// Runtime configuration
// Defaults, optionally overridden by a JSON file and RSA_DEMO_* environment variables

use std::path::Path;

use anyhow::Context;
use config::Config;
use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, Result};
use crate::rsa::bigint::MAX_PRIME_BITS;

/// Key generation parameters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RsaConfig {
    /// Bit length of each prime. 128 is far too small for real use; production keys need
    /// at least 1024 bits per prime.
    pub prime_bits: u64,

    /// Miller-Rabin rounds per candidate
    pub primality_rounds: u32,

    // bounds candidate draws per prime and whole-key retries
    pub max_attempts: usize,

    pub public_exponent: u64,
}

impl Default for RsaConfig {
    fn default() -> Self {
        Self {
            prime_bits: 128,
            primality_rounds: 100,
            max_attempts: 10_000,
            public_exponent: 65537,
        }
    }
}

impl RsaConfig {
    pub fn validate(&self) -> Result<()> {
        if !(2..=MAX_PRIME_BITS).contains(&self.prime_bits) {
            return Err(CryptoError::InvalidParameter(format!(
                "prime_bits must be between 2 and {}, got {}",
                MAX_PRIME_BITS, self.prime_bits
            )));
        }
        if self.primality_rounds == 0 {
            return Err(CryptoError::InvalidParameter(
                "primality_rounds must be positive".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(CryptoError::InvalidParameter(
                "max_attempts must be positive".to_string(),
            ));
        }
        if self.public_exponent < 3 || self.public_exponent % 2 == 0 {
            return Err(CryptoError::InvalidParameter(format!(
                "public_exponent must be odd and at least 3, got {}",
                self.public_exponent
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PasswordConfig {
    pub digest: String,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            digest: "SHA-256".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub rsa: RsaConfig,
    pub password: PasswordConfig,
}

impl AppConfig {
    /// Layer defaults, the optional file and `RSA_DEMO_*` environment variables
    /// (`RSA_DEMO_RSA__PRIME_BITS=512`), in that order.
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        let default_config = Config::try_from(&AppConfig::default())
            .context("failed to serialize default configuration")?;

        let mut builder = Config::builder().add_source(default_config);

        if let Some(f) = file {
            builder = builder.add_source(config::File::from(f).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("RSA_DEMO")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        );

        let config = builder.build().context("failed to load configuration")?;
        let app_config: AppConfig = config
            .try_deserialize()
            .context("invalid configuration")?;

        app_config.rsa.validate()?;
        log::trace!("{:?}", app_config);

        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert_eq!(config.rsa.prime_bits, 128);
        assert_eq!(config.rsa.public_exponent, 65537);
        assert_eq!(config.password.digest, "SHA-256");
        assert!(config.rsa.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let cases = [
            RsaConfig {
                prime_bits: 1,
                ..RsaConfig::default()
            },
            RsaConfig {
                prime_bits: MAX_PRIME_BITS + 1,
                ..RsaConfig::default()
            },
            RsaConfig {
                prime_bits: u64::MAX,
                ..RsaConfig::default()
            },
            RsaConfig {
                primality_rounds: 0,
                ..RsaConfig::default()
            },
            RsaConfig {
                max_attempts: 0,
                ..RsaConfig::default()
            },
            RsaConfig {
                public_exponent: 65536,
                ..RsaConfig::default()
            },
            RsaConfig {
                public_exponent: 1,
                ..RsaConfig::default()
            },
        ];
        for case in cases {
            assert!(
                matches!(case.validate(), Err(CryptoError::InvalidParameter(_))),
                "{case:?}"
            );
        }
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir()
            .join(format!("rsa_demo_config_{}.json", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{ "rsa": {{ "prime_bits": 256, "primality_rounds": 40 }} }}"#).unwrap();
        drop(file);

        let config = AppConfig::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.rsa.prime_bits, 256);
        assert_eq!(config.rsa.primality_rounds, 40);
        assert_eq!(config.rsa.public_exponent, 65537);
        assert_eq!(config.password, PasswordConfig::default());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let path = std::env::temp_dir().join("rsa_demo_config_does_not_exist.json");
        assert!(AppConfig::load(Some(&path)).is_err());
    }
}
