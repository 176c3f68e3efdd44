//! Environment seams: the browser surfaces a live page would provide.
//!
//! Each seam is a trait with an in-memory implementation, so session logic
//! can be exercised by feeding synthetic events instead of simulating a
//! live UI. Production code plugs in the real implementations (currently
//! `HttpFetcher`; history and storage stay in-process).

pub mod fetcher;
pub mod history;
pub mod storage;

pub use fetcher::{FragmentFetcher, FragmentResponse, StaticFetcher};
#[cfg(feature = "http")]
pub use fetcher::HttpFetcher;
pub use history::{HistorySink, MemoryHistory};
pub use storage::{JsonFileStore, MemoryStore, PreferenceStore};

use std::sync::Arc;

/// The full set of seams a session runs against.
///
/// Handles are shared so a test can keep its own reference to, say, a
/// `MemoryHistory` and drive back/forward while the session holds the same
/// instance.
#[derive(Clone)]
pub struct Environment {
    pub fetcher: Arc<dyn FragmentFetcher>,
    pub history: Arc<dyn HistorySink>,
    pub store: Arc<dyn PreferenceStore>,
}

impl Environment {
    /// An all-in-memory environment starting at `initial_path`, convenient
    /// for tests and benches.
    pub fn in_memory(fetcher: StaticFetcher, initial_path: &str) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            history: Arc::new(MemoryHistory::new(initial_path)),
            store: Arc::new(MemoryStore::new()),
        }
    }
}
