use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use rand::{rngs::StdRng, Rng, SeedableRng};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Random alias source shared by every request handler.
///
/// Seeded once from the wall clock when constructed and reused for the
/// lifetime of the process. Aliases are not checked for uniqueness here;
/// the `links.alias` unique index rejects collisions on insert.
#[derive(Debug)]
pub struct AliasGenerator {
    rng: Mutex<StdRng>,
}

impl AliasGenerator {
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(seed)
    }

    /// Deterministic generator, useful in tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Produce `len` characters drawn uniformly from `[A-Za-z0-9]`.
    pub fn generate(&self, len: usize) -> String {
        let mut rng = self.rng.lock();
        (0..len)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for AliasGenerator {
    fn default() -> Self {
        Self::new()
    }
}
