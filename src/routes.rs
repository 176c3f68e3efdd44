//! Route table: a static mapping from logical paths to fragment resources.
//!
//! The table is a fixed, finite set of exact-match entries known at build
//! time. Any path outside the set resolves to the root entry, so the engine
//! always has something to show. No parameters, wildcards, or partial
//! matching.

use std::collections::HashMap;

use crate::{Error, Result};

/// The logical path every unknown path falls back to
pub const ROOT_PATH: &str = "/";

/// Immutable path-to-resource mapping
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: HashMap<String, String>,
}

impl RouteTable {
    /// Build a table from explicit entries.
    ///
    /// A `/` entry is required since it doubles as the fallback target.
    pub fn new(routes: HashMap<String, String>) -> Result<Self> {
        if !routes.contains_key(ROOT_PATH) {
            return Err(Error::Config(
                "route table requires a \"/\" entry to serve as the fallback".to_string(),
            ));
        }
        Ok(Self { routes })
    }

    /// The three-page table of the personal site this engine was built for.
    pub fn personal_site() -> Self {
        let mut routes = HashMap::new();
        routes.insert("/".to_string(), "pages/home.html".to_string());
        routes.insert("/projects".to_string(), "pages/projects.html".to_string());
        routes.insert(
            "/certifications".to_string(),
            "pages/certifications.html".to_string(),
        );
        Self { routes }
    }

    /// Exact-match lookup; any miss resolves to the root resource.
    pub fn resolve(&self, path: &str) -> &str {
        self.routes
            .get(path)
            .unwrap_or_else(|| &self.routes[ROOT_PATH])
            .as_str()
    }

    /// Whether `path` has its own entry (as opposed to falling back to `/`)
    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    /// All mapped logical paths, in no particular order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::personal_site()
    }
}
