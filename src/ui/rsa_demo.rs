// RSA demo print-out
// Generates a key pair, encrypts a message and decrypts it again

use std::io::Write;

use anyhow::Context;
use rand::{CryptoRng, RngCore};

use crate::config::RsaConfig;
use crate::rsa::{
    bigint::from_bytes, decrypt_bytes, encrypt_bytes, generate_keypair, RsaKeyPair,
};

pub const DEFAULT_MESSAGE: &str = "RSA is very cool!";

/// Print the key and the encrypt/decrypt round trip of `message` to `out`.
pub fn run_rsa_demo<R, W>(
    config: &RsaConfig,
    message: &str,
    rng: &mut R,
    out: &mut W,
) -> anyhow::Result<RsaKeyPair>
where
    R: CryptoRng + RngCore,
    W: Write,
{
    let keypair = generate_keypair(config, rng).context("key generation failed")?;

    writeln!(out, "e = {}", keypair.e())?; // (e, n) is the public key
    writeln!(out, "d = {}", keypair.d())?; // (d, n) is the private key
    writeln!(out, "n = {}", keypair.n())?;

    let ciphertext = encrypt_bytes(message.as_bytes(), &keypair.public_key)
        .context("encryption failed")?;
    let cleartext = decrypt_bytes(&ciphertext, &keypair.private_key)
        .context("decryption failed")?;

    writeln!(out, "Cipher text = {}", from_bytes(&ciphertext))?;
    writeln!(out, "Cipher text (hex) = {}", hex::encode(&ciphertext))?;
    writeln!(out, "Clear text = {}", String::from_utf8_lossy(&cleartext))?;

    Ok(keypair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_demo_output() {
        let config = RsaConfig {
            primality_rounds: 20,
            ..RsaConfig::default()
        };
        let mut out = Vec::new();
        let keypair =
            run_rsa_demo(&config, DEFAULT_MESSAGE, &mut StdRng::seed_from_u64(1), &mut out)
                .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!("e = {}\n", keypair.e())));
        assert!(text.contains(&format!("n = {}\n", keypair.n())));
        assert!(text.ends_with("Clear text = RSA is very cool!\n"));
    }

    #[test]
    fn test_demo_message_too_large() {
        let config = RsaConfig {
            prime_bits: 16,
            primality_rounds: 20,
            ..RsaConfig::default()
        };
        let mut out = Vec::new();
        let err = run_rsa_demo(&config, DEFAULT_MESSAGE, &mut StdRng::seed_from_u64(2), &mut out)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("message too large"));
    }
}
