//! Short code generation.
//!
//! Codes are drawn from the operating system CSPRNG so they cannot be
//! predicted or enumerated.

use thiserror::Error;

use crate::error::AppError;

/// Length used when the caller asks for a zero-length code.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Symbols a generated code is made of: `[a-zA-Z0-9]`.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Largest multiple of the alphabet size that fits in a byte. Bytes at or
/// above it are discarded so every symbol stays equally likely.
const REJECTION_BOUND: u8 = (256 - 256 % ALPHABET.len()) as u8;

#[derive(Debug, Error)]
pub enum CodeGenError {
    #[error("random source failure: {0}")]
    RandomSource(getrandom::Error),
}

impl From<CodeGenError> for AppError {
    fn from(e: CodeGenError) -> Self {
        AppError::internal(format!("Failed to generate code: {e}"))
    }
}

/// Generates a random short code of `length` symbols.
///
/// A `length` of zero falls back to [`DEFAULT_CODE_LENGTH`].
///
/// # Errors
///
/// Returns [`CodeGenError::RandomSource`] if the system random number
/// generator fails. There is no fallback to a weaker source.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(8)?;
/// assert_eq!(code.len(), 8);
/// assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
/// ```
pub fn generate_code(length: usize) -> Result<String, CodeGenError> {
    let length = if length == 0 {
        DEFAULT_CODE_LENGTH
    } else {
        length
    };

    let mut code = String::with_capacity(length);
    let mut buffer = vec![0u8; length * 2];

    while code.len() < length {
        getrandom::fill(&mut buffer).map_err(CodeGenError::RandomSource)?;

        for &byte in &buffer {
            if byte >= REJECTION_BOUND {
                continue;
            }
            code.push(ALPHABET[usize::from(byte) % ALPHABET.len()] as char);
            if code.len() == length {
                break;
            }
        }
    }

    Ok(code)
}
