// RSA Decryption Implementation
// Raw single-block decryption: M = C^d mod n

use super::bigint::{from_bytes, mod_pow, to_bytes, RsaBigInt};
use super::keygen::RsaPrivateKey;
use crate::error::{CryptoError, Result};

/// Decrypt an integer ciphertext. Values not below the modulus are rejected.
pub fn decrypt_biguint(c: &RsaBigInt, private_key: &RsaPrivateKey) -> Result<RsaBigInt> {
    if c >= &private_key.n {
        return Err(CryptoError::CiphertextOutOfRange);
    }

    // Compute m = c^d mod n
    Ok(mod_pow(c, &private_key.d, &private_key.n))
}

/// Decrypt ciphertext bytes using RSA private key
/// Returns plaintext as minimal-length big-endian bytes
pub fn decrypt_bytes(ciphertext: &[u8], private_key: &RsaPrivateKey) -> Result<Vec<u8>> {
    let c = from_bytes(ciphertext);
    let m = decrypt_biguint(&c, private_key)?;
    Ok(to_bytes(&m))
}

/// Decrypt ciphertext to a string
pub fn decrypt_to_string(ciphertext: &[u8], private_key: &RsaPrivateKey) -> Result<String> {
    let plaintext = decrypt_bytes(ciphertext, private_key)?;
    String::from_utf8(plaintext)
        .map_err(|e| CryptoError::InvalidEncoding(format!("invalid UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;
    use crate::rsa::keygen::{generate_keypair, RsaKeyPair};
    use crate::config::RsaConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn textbook_key() -> RsaPrivateKey {
        RsaPrivateKey::new(from_u64(3233), from_u64(2753))
    }

    fn test_keypair(seed: u64) -> RsaKeyPair {
        let config = RsaConfig {
            primality_rounds: 20,
            ..RsaConfig::default()
        };
        generate_keypair(&config, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_decrypt_textbook() {
        let m = decrypt_biguint(&from_u64(2790), &textbook_key()).unwrap();
        assert_eq!(m, from_u64(65));
        assert_eq!(decrypt_bytes(&[0x0a, 0xe6], &textbook_key()).unwrap(), vec![65]);
    }

    #[test]
    fn test_decrypt_out_of_range() {
        let result = decrypt_biguint(&from_u64(3233), &textbook_key());
        assert_eq!(result, Err(CryptoError::CiphertextOutOfRange));
    }

    #[test]
    fn test_decrypt_string() {
        let keypair = test_keypair(21);
        let message = "RSA is very cool!";

        let ciphertext = keypair.public_key.encrypt(message.as_bytes()).unwrap();
        let decrypted = decrypt_to_string(&ciphertext, &keypair.private_key).unwrap();

        assert_eq!(message, decrypted);
    }

    #[test]
    fn test_decrypt_invalid_utf8() {
        let keypair = test_keypair(22);
        let ciphertext = keypair.public_key.encrypt(&[0xff, 0xfe, 0xfd]).unwrap();
        assert!(matches!(
            decrypt_to_string(&ciphertext, &keypair.private_key),
            Err(CryptoError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_decrypt_wrong_key() {
        let keypair1 = test_keypair(23);
        let keypair2 = test_keypair(24);

        let message = b"Test";
        let ciphertext = keypair1.public_key.encrypt(message).unwrap();

        // Either out of range for the other modulus or garbage
        match keypair2.private_key.decrypt(&ciphertext) {
            Ok(plaintext) => assert_ne!(plaintext, message.to_vec()),
            Err(e) => assert_eq!(e, CryptoError::CiphertextOutOfRange),
        }
    }
}
