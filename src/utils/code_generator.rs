//! Short code generation.
//!
//! Codes are 7 characters drawn independently and uniformly from the 62
//! alphanumeric symbols, giving 62^7 ≈ 3.5 × 10^12 possible codes. Uniqueness is
//! not checked here; the database constraint enforces it and
//! [`crate::application::services::LinkService`] retries on conflict.

use rand::Rng;

/// Length of every generated short code.
pub const CODE_LENGTH: usize = 7;

/// Symbols a short code is drawn from.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Codes that would be shadowed by a fixed route of the same length.
const RESERVED_CODES: &[&str] = &["shorten", "metrics"];

/// Source of candidate short codes.
///
/// Injected into the shortening service so tests can script collisions.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces a candidate code. Never fails.
    fn generate(&self) -> String;
}

/// Generator backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl RandomCodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();

        loop {
            let code: String = (0..CODE_LENGTH)
                .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
                .collect();

            if !RESERVED_CODES.contains(&code.as_str()) {
                return code;
            }
        }
    }
}

/// Returns `true` if `code` has the shape of a generated short code.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| ALPHABET.contains(&b))
}
