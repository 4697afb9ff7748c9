// RSA Big Integer Operations
// Wrapper around num-bigint for RSA-specific operations

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::RngCore;

use crate::error::{CryptoError, Result};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Primes used for trial division before Miller-Rabin
const SMALL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97,
];

/// Largest prime size accepted by [`random_prime`]
pub const MAX_PRIME_BITS: u64 = 8192;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Create a big integer from bytes (unsigned, big-endian)
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Convert big integer to minimal-length bytes (big-endian). Zero becomes `[0]`.
pub fn to_bytes(n: &RsaBigInt) -> Vec<u8> {
    n.to_bytes_be()
}

/// Modular exponentiation: base^exp mod modulus
/// Uses square-and-multiply algorithm
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    debug_assert!(!modulus.is_zero(), "modulus must be non-zero");
    if modulus.is_one() {
        return RsaBigInt::zero();
    }

    let mut result = RsaBigInt::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) such that a*x + b*y = gcd(a, b)
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;

        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);

        let next_t = &old_t - &q * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }

    (old_r, old_s, old_t)
}

/// Compute modular inverse: a^(-1) mod m
/// Returns None if inverse doesn't exist
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> Option<RsaBigInt> {
    if m.is_zero() {
        return None;
    }

    let modulus = BigInt::from(m.clone());
    let (gcd, x, _) = extended_gcd(&BigInt::from(a.clone()), &modulus);

    if !gcd.is_one() {
        // Inverse doesn't exist
        return None;
    }

    // x may be negative; mod_floor maps it into [0, m)
    x.mod_floor(&modulus).to_biguint()
}

/// Draw a uniformly random integer of at most `bits` bits.
///
/// Fails with [`CryptoError::RandomnessUnavailable`] when the source cannot
/// produce bytes.
pub fn random_bits<R: RngCore + ?Sized>(bits: u64, rng: &mut R) -> Result<RsaBigInt> {
    let len = bits.div_ceil(8) as usize;
    let mut buf = vec![0u8; len];
    rng.try_fill_bytes(&mut buf)?;

    let excess = (len as u64) * 8 - bits;
    if excess > 0 {
        buf[0] &= 0xff >> excess;
    }

    Ok(from_bytes(&buf))
}

/// Generate a random big integer in range [0, bound)
pub fn random_below<R: RngCore + ?Sized>(bound: &RsaBigInt, rng: &mut R) -> Result<RsaBigInt> {
    if bound.is_zero() {
        return Err(CryptoError::InvalidParameter(
            "random bound must be positive".to_string(),
        ));
    }

    let bits = bound.bits();
    loop {
        let candidate = random_bits(bits, rng)?;
        if &candidate < bound {
            return Ok(candidate);
        }
    }
}

/// Miller-Rabin primality test
/// Returns true if n is probably prime. Each round cuts the false-positive
/// probability by at least a factor of four.
pub fn is_probable_prime<R: RngCore + ?Sized>(
    n: &RsaBigInt,
    rounds: u32,
    rng: &mut R,
) -> Result<bool> {
    if n < &from_u64(2) {
        return Ok(false);
    }

    for p in SMALL_PRIMES {
        let p = RsaBigInt::from(p);
        if n == &p {
            return Ok(true);
        }
        if (n % &p).is_zero() {
            return Ok(false);
        }
    }

    // Write n-1 as d * 2^s with d odd
    let n_minus_one = n - 1u8;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    // Witnesses are drawn from [2, n-2]
    let witness_span = n - 3u8;

    'witness: for _ in 0..rounds {
        let a = random_below(&witness_span, rng)? + 2u8;

        let mut x = mod_pow(&a, &d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }

        // Composite
        return Ok(false);
    }

    // Probably prime
    Ok(true)
}

/// Generate a random prime of exactly `bit_length` bits.
///
/// Gives up with [`CryptoError::KeyGenerationFailed`] after `max_attempts`
/// candidates.
pub fn random_prime<R: RngCore + ?Sized>(
    bit_length: u64,
    rounds: u32,
    max_attempts: usize,
    rng: &mut R,
) -> Result<RsaBigInt> {
    if !(2..=MAX_PRIME_BITS).contains(&bit_length) {
        return Err(CryptoError::InvalidParameter(format!(
            "prime bit length must be between 2 and {}, got {}",
            MAX_PRIME_BITS, bit_length
        )));
    }

    let top_bit = RsaBigInt::one() << (bit_length - 1);

    for attempt in 1..=max_attempts {
        // Force the exact bit length and make it odd
        let mut candidate = random_bits(bit_length, rng)?;
        candidate |= &top_bit;
        candidate |= RsaBigInt::one();

        if is_probable_prime(&candidate, rounds, rng)? {
            log::trace!("found {}-bit prime after {} candidates", bit_length, attempt);
            return Ok(candidate);
        }
    }

    Err(CryptoError::KeyGenerationFailed {
        attempts: max_attempts,
    })
}

/// Greatest common divisor
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    a.gcd(b)
}
