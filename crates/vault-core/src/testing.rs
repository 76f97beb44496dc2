//! Shared test doubles

use rand::{CryptoRng, RngCore};

/// CSPRNG stand-in whose entropy source is always down
pub(crate) struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        panic!("entropy source offline")
    }

    fn next_u64(&mut self) -> u64 {
        panic!("entropy source offline")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("entropy source offline")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new("entropy source offline"))
    }
}

impl CryptoRng for FailingRng {}
