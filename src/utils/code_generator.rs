//! Short code generation.
//!
//! Codes are drawn from the operating system CSPRNG and mapped onto a
//! 62-symbol alphabet by modulo reduction. 62 does not divide 256, so the first
//! eight symbols (`a`..=`h`) are very slightly more likely than the rest. The
//! bias is accepted: codes only need to be unpredictable and rarely colliding,
//! and collisions are handled by the retry loop in
//! [`crate::application::services::LinkService`].

use crate::error::AppError;

/// Symbols a short code may contain.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Code length used when none is configured.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Shortest code length accepted from configuration.
pub const MIN_CODE_LENGTH: usize = 4;

/// Longest code length accepted from configuration.
pub const MAX_CODE_LENGTH: usize = 32;

/// Source of candidate short codes.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces a code of exactly `length` symbols from [`ALPHABET`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RandomSource`] if no entropy is available.
    fn generate(&self, length: usize) -> Result<String, AppError>;
}

/// [`CodeGenerator`] backed by the operating system random source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, length: usize) -> Result<String, AppError> {
        generate_code(length)
    }
}

/// Generates a cryptographically random short code of `length` symbols.
///
/// # Errors
///
/// Returns [`AppError::RandomSource`] if `getrandom` cannot fill the buffer.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6)?;
/// assert_eq!(code.len(), 6);
/// assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
/// ```
pub fn generate_code(length: usize) -> Result<String, AppError> {
    let mut buffer = vec![0u8; length];

    getrandom::fill(&mut buffer).map_err(|e| AppError::RandomSource(e.to_string()))?;

    Ok(encode(&buffer))
}

fn encode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| ALPHABET[usize::from(b) % ALPHABET.len()] as char)
        .collect()
}
