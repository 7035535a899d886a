//! Stemmers and the pool that lends them out.
//!
//! Stemmers keep a private cache, so they are not shared between threads.
//! A [`StemmerPool`] hands out exclusive instances instead: a clustering
//! run checks one out, stems every word it needs, and the instance goes back
//! to the pool when the [`PooledStemmer`] guard is dropped.
//!
//! # Examples
//!
//! ```
//! use sheaf::analysis::stemmer::{PorterStemmer, Stemmer, StemmerPool};
//!
//! let pool = StemmerPool::new(|| Box::new(PorterStemmer::new()));
//! {
//!     let mut stemmer = pool.checkout();
//!     assert_eq!(stemmer.stem("mining"), "mine");
//! }
//! assert_eq!(pool.idle_count(), 1);
//! ```

use parking_lot::Mutex;

pub mod porter;

pub use porter::PorterStemmer;

/// Trait for stemming algorithms.
pub trait Stemmer: Send {
    /// Reduce a lowercase word to its stem.
    fn stem(&mut self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

/// Stemmer for languages without a stemming algorithm.
///
/// Every word is its own stem, lowercased.
#[derive(Debug, Clone, Default)]
pub struct IdentityStemmer;

impl IdentityStemmer {
    pub fn new() -> Self {
        IdentityStemmer
    }
}

impl Stemmer for IdentityStemmer {
    fn stem(&mut self, word: &str) -> String {
        word.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Constructor used by a pool when no idle stemmer is available.
pub type StemmerFactory = fn() -> Box<dyn Stemmer>;

/// A pool of stemmers of one kind.
pub struct StemmerPool {
    factory: StemmerFactory,
    idle: Mutex<Vec<Box<dyn Stemmer>>>,
}

impl std::fmt::Debug for StemmerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StemmerPool")
            .field("idle", &self.idle_count())
            .finish()
    }
}

impl StemmerPool {
    /// Create an empty pool; stemmers are built on first checkout.
    pub fn new(factory: StemmerFactory) -> Self {
        StemmerPool {
            factory,
            idle: Mutex::new(Vec::new()),
        }
    }

    /// Borrow a stemmer for exclusive use.
    pub fn checkout(&self) -> PooledStemmer<'_> {
        let stemmer = self.idle.lock().pop().unwrap_or_else(|| (self.factory)());
        PooledStemmer {
            pool: self,
            stemmer: Some(stemmer),
        }
    }

    /// Number of stemmers currently waiting in the pool.
    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }

    fn release(&self, stemmer: Box<dyn Stemmer>) {
        self.idle.lock().push(stemmer);
    }
}

/// A stemmer checked out of a [`StemmerPool`], returned on drop.
pub struct PooledStemmer<'a> {
    pool: &'a StemmerPool,
    stemmer: Option<Box<dyn Stemmer>>,
}

impl PooledStemmer<'_> {
    /// Stem a lowercase word.
    pub fn stem(&mut self, word: &str) -> String {
        match self.stemmer.as_mut() {
            Some(stemmer) => stemmer.stem(word),
            None => word.to_lowercase(),
        }
    }

    /// Name of the underlying stemmer.
    pub fn name(&self) -> &'static str {
        self.stemmer.as_ref().map_or("identity", |stemmer| stemmer.name())
    }
}

impl Drop for PooledStemmer<'_> {
    fn drop(&mut self) {
        if let Some(stemmer) = self.stemmer.take() {
            self.pool.release(stemmer);
        }
    }
}
