// Result Source Port - the opaque "processed value" generator

use rand::Rng;

/// Value used when the content pool is empty at claim time.
///
/// Startup validation rejects an empty pool, so this only shows up when a
/// caller builds a `WordPool` by hand.
pub const FALLBACK_VALUE: &str = "unavailable";

/// Produces the result value a worker commits for a claimed event.
pub trait ResultSource: Send + Sync {
    fn next_value(&self) -> String;
}

/// Uniform random pick from a fixed content pool.
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl ResultSource for WordPool {
    fn next_value(&self) -> String {
        if self.words.is_empty() {
            return FALLBACK_VALUE.to_string();
        }
        let index = rand::thread_rng().gen_range(0..self.words.len());
        self.words[index].clone()
    }
}

/// Deterministic source for tests.
pub mod mocks {
    use super::ResultSource;

    pub struct FixedResultSource(pub &'static str);

    impl ResultSource for FixedResultSource {
        fn next_value(&self) -> String {
            self.0.to_string()
        }
    }
}
