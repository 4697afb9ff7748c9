// RSA Encryption Implementation
// Raw single-block encryption: C = M^e mod n, no padding

use super::bigint::{from_bytes, mod_pow, to_bytes, RsaBigInt};
use super::keygen::RsaPublicKey;
use crate::error::{CryptoError, Result};

/// Encrypt an integer message. The message must be smaller than the modulus.
pub fn encrypt_biguint(m: &RsaBigInt, public_key: &RsaPublicKey) -> Result<RsaBigInt> {
    if m >= &public_key.n {
        return Err(CryptoError::MessageTooLarge {
            message_bits: m.bits(),
            modulus_bits: public_key.bit_length(),
        });
    }

    // Compute c = m^e mod n
    Ok(mod_pow(m, &public_key.e, &public_key.n))
}

/// Encrypt bytes using RSA public key
///
/// The bytes are read as an unsigned big-endian integer and the ciphertext is
/// returned in minimal-length big-endian form.
pub fn encrypt_bytes(plaintext: &[u8], public_key: &RsaPublicKey) -> Result<Vec<u8>> {
    let m = from_bytes(plaintext);
    let c = encrypt_biguint(&m, public_key)?;
    Ok(to_bytes(&c))
}

/// Encrypt a string using RSA public key
pub fn encrypt_string(plaintext: &str, public_key: &RsaPublicKey) -> Result<Vec<u8>> {
    encrypt_bytes(plaintext.as_bytes(), public_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;

    fn textbook_key() -> RsaPublicKey {
        RsaPublicKey::new(from_u64(3233), from_u64(17))
    }

    #[test]
    fn test_encrypt_textbook() {
        let c = encrypt_biguint(&from_u64(65), &textbook_key()).unwrap();
        assert_eq!(c, from_u64(2790));
    }

    #[test]
    fn test_encrypt_bytes() {
        // 2790 = 0x0AE6
        let ciphertext = encrypt_bytes(&[65], &textbook_key()).unwrap();
        assert_eq!(ciphertext, vec![0x0a, 0xe6]);
    }

    #[test]
    fn test_encrypt_fixed_points() {
        let key = textbook_key();
        assert_eq!(encrypt_biguint(&from_u64(0), &key).unwrap(), from_u64(0));
        assert_eq!(encrypt_biguint(&from_u64(1), &key).unwrap(), from_u64(1));
        // (n-1)^e ≡ (-1)^e ≡ n-1 for odd e
        assert_eq!(encrypt_biguint(&from_u64(3232), &key).unwrap(), from_u64(3232));
    }

    #[test]
    fn test_encrypt_too_large() {
        let key = textbook_key();
        let result = encrypt_biguint(&from_u64(3233), &key);
        assert_eq!(
            result,
            Err(CryptoError::MessageTooLarge {
                message_bits: 12,
                modulus_bits: 12,
            })
        );

        // "RSA" does not fit a 12-bit modulus
        assert!(matches!(
            encrypt_string("RSA", &key),
            Err(CryptoError::MessageTooLarge { .. })
        ));
    }

    #[test]
    fn test_encrypt_empty() {
        // An empty message is the integer zero
        let ciphertext = encrypt_bytes(b"", &textbook_key()).unwrap();
        assert_eq!(ciphertext, vec![0]);
    }
}
