//! Random directory token generation.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Length of production working directory tokens.
pub const DEFAULT_TOKEN_LENGTH: usize = 16;

/// Supplies the random component of working directory names.
pub trait RandomTokenSource: Send + Sync + std::fmt::Debug + 'static {
    /// Produce the next token. Tokens must be valid single path segments.
    fn next_token(&self) -> String;
}

/// Alphanumeric tokens drawn from the thread-local RNG.
#[derive(Debug, Clone)]
pub struct AlphanumericTokenSource {
    length: usize,
}

impl AlphanumericTokenSource {
    /// Create a source producing tokens of `length` characters.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
        }
    }
}

impl Default for AlphanumericTokenSource {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_LENGTH)
    }
}

impl RandomTokenSource for AlphanumericTokenSource {
    fn next_token(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

/// Deterministic `<prefix><n>` tokens, for tests.
#[derive(Debug)]
pub struct SequenceTokenSource {
    prefix: String,
    next: AtomicU64,
}

impl SequenceTokenSource {
    /// Create a sequence starting at `<prefix>1`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl RandomTokenSource for SequenceTokenSource {
    fn next_token(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{n}", self.prefix)
    }
}
