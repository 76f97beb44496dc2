//! Credential records and the sealing layer used by persistence

mod sealer;
mod types;

pub use sealer::CredentialSealer;
pub use types::*;
