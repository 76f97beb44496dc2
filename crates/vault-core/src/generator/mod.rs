//! Secure password generation with character-class constraints

mod charset;
mod password;

pub use charset::{
    CharClass, CharsetSpec, SimilarPolicy, DEFAULT_LENGTH, DEFAULT_SIMILAR, DEFAULT_SYMBOLS,
    DIGITS, LOWERCASE_LETTERS, MAX_LENGTH, MIN_LENGTH, UPPERCASE_LETTERS,
};
pub use password::{SecureGenerator, DEFAULT_MAX_ATTEMPTS};
