//! Cryptographically secure password generation
//!
//! Each call builds the charset for the request, draws every position
//! uniformly from it, and redraws the whole password until every enabled
//! class is represented. The redraw loop is bounded.

use rand::{
    distributions::{Distribution, Uniform},
    rngs::{OsRng, StdRng},
    CryptoRng, RngCore, SeedableRng,
};
use tracing::debug;

use super::charset::{CharsetSpec, SimilarPolicy, DEFAULT_SIMILAR, DEFAULT_SYMBOLS};
use crate::error::{Result, VaultError};

/// Default number of full redraws before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Alphabet of one enabled class after exclusions
struct ClassSet {
    chars: Vec<char>,
}

/// Password generator with character-class constraints.
///
/// Immutable after construction, so one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct SecureGenerator {
    symbols: String,
    similar: String,
    policy: SimilarPolicy,
    max_attempts: u32,
}

impl Default for SecureGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SecureGenerator {
    /// Create a generator with the standard symbol and similar-glyph sets
    pub fn new() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.to_string(),
            similar: DEFAULT_SIMILAR.to_string(),
            policy: SimilarPolicy::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Replace the symbol alphabet
    pub fn with_symbols(mut self, symbols: &str) -> Self {
        self.symbols = symbols.to_string();
        self
    }

    /// Replace the set of glyphs removed by exclude-similar
    pub fn with_similar(mut self, similar: &str) -> Self {
        self.similar = similar.to_string();
        self
    }

    pub fn with_policy(mut self, policy: SimilarPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bound the number of full redraws (at least one draw is always made)
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn policy(&self) -> SimilarPolicy {
        self.policy
    }

    /// Generate a password seeded from the operating system's CSPRNG
    pub fn generate(&self, spec: &CharsetSpec) -> Result<String> {
        self.generate_with_entropy(spec, &mut OsRng)
    }

    /// Generate a password from a CSPRNG seeded by `entropy`.
    ///
    /// Fails with [`VaultError::RandomnessUnavailable`] if the entropy source
    /// cannot provide a seed.
    pub fn generate_with_entropy<E>(&self, spec: &CharsetSpec, entropy: &mut E) -> Result<String>
    where
        E: RngCore + CryptoRng,
    {
        let classes = self.build_class_sets(spec)?;
        let length = spec.effective_length();

        if length < classes.len() {
            return Err(VaultError::UnsatisfiableCharsetSpec(format!(
                "length {} cannot hold {} required classes",
                length,
                classes.len()
            )));
        }

        let charset: Vec<char> = classes.iter().flat_map(|set| set.chars.iter().copied()).collect();
        let index = Uniform::new(0, charset.len());
        let mut rng = StdRng::from_rng(entropy).map_err(|_| VaultError::RandomnessUnavailable)?;

        for attempt in 1..=self.max_attempts {
            let password: String = (0..length).map(|_| charset[index.sample(&mut rng)]).collect();

            if satisfies(&password, &classes) {
                debug!(length, attempt, "Generated password");
                return Ok(password);
            }
        }

        Err(VaultError::UnsatisfiableCharsetSpec(format!(
            "no password met the class requirements after {} attempts",
            self.max_attempts
        )))
    }

    /// Resolve each enabled class to its alphabet after exclusions
    fn build_class_sets(&self, spec: &CharsetSpec) -> Result<Vec<ClassSet>> {
        spec.enabled_classes()
            .into_iter()
            .map(|class| {
                let alphabet: Vec<char> = class.alphabet(&self.symbols).chars().collect();
                let chars = if spec.exclude_similar {
                    let filtered: Vec<char> = alphabet
                        .iter()
                        .copied()
                        .filter(|c| !self.similar.contains(*c))
                        .collect();

                    match self.policy {
                        SimilarPolicy::KeepRequired if filtered.is_empty() => alphabet,
                        _ => filtered,
                    }
                } else {
                    alphabet
                };

                if chars.is_empty() {
                    return Err(VaultError::UnsatisfiableCharsetSpec(format!(
                        "no {} characters remain in the charset",
                        class
                    )));
                }

                Ok(ClassSet { chars })
            })
            .collect()
    }
}

/// Every enabled class must appear at least once
fn satisfies(password: &str, classes: &[ClassSet]) -> bool {
    classes
        .iter()
        .all(|set| password.chars().any(|c| set.chars.contains(&c)))
}
