//! # Password Hashing
//!
//! PBKDF2-HMAC-SHA256 with a random 16-byte salt and a 64-byte derived key, encoded as
//!
//! ```text
//! pbkdf2$<iterations>$<salt hex>$<key hex>
//! ```
//!
//! Verification re-derives with the stored iteration count and salt and compares in
//! constant time (`ring::pbkdf2::verify`). A hash that does not parse verifies as `false`.

use crate::admin_actor::AuthError;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use std::num::NonZeroU32;

const SCHEME: &str = "pbkdf2";
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 64;

static ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

pub const DEFAULT_ITERATIONS: u32 = 310_000;

pub fn hash_password(password: &str, iterations: u32) -> Result<String, AuthError> {
    let rounds = NonZeroU32::new(iterations)
        .ok_or_else(|| AuthError::Hashing("iteration count must be positive".into()))?;

    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| AuthError::Hashing("random generator unavailable".into()))?;

    let mut key = [0u8; KEY_LEN];
    pbkdf2::derive(ALGORITHM, rounds, &salt, password.as_bytes(), &mut key);

    Ok(format!(
        "{SCHEME}${iterations}${}${}",
        hex::encode(salt),
        hex::encode(key)
    ))
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((rounds, salt, key)) = parse(stored) else {
        return false;
    };
    pbkdf2::verify(ALGORITHM, rounds, &salt, password.as_bytes(), &key).is_ok()
}

fn parse(stored: &str) -> Option<(NonZeroU32, Vec<u8>, Vec<u8>)> {
    let mut parts = stored.split('$');
    let (scheme, iterations, salt, key) =
        (parts.next()?, parts.next()?, parts.next()?, parts.next()?);
    if scheme != SCHEME || parts.next().is_some() {
        return None;
    }
    let rounds = NonZeroU32::new(iterations.parse().ok()?)?;
    let salt = hex::decode(salt).ok()?;
    let key = hex::decode(key).ok()?;
    if salt.is_empty() || key.is_empty() {
        return None;
    }
    Some((rounds, salt, key))
}
