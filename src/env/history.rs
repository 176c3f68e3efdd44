//! Address bar and history seam.

use std::sync::Mutex;

/// The session's view of the address bar and history stack.
///
/// `push` is the history-push half of intercepting a link click: it makes
/// `path` current without any page reload. Back/forward movement happens on
/// the concrete implementation; the session only observes the result via
/// `current_path` when told an entry change occurred.
pub trait HistorySink: Send + Sync {
    /// Path currently shown in the address bar
    fn current_path(&self) -> String;

    /// Push a new entry, making `path` current. Any forward tail beyond the
    /// current entry is dropped, as a browser would.
    fn push(&self, path: &str);
}

#[derive(Debug)]
struct Entries {
    stack: Vec<String>,
    index: usize,
}

/// In-memory history with browser back/forward semantics
#[derive(Debug)]
pub struct MemoryHistory {
    inner: Mutex<Entries>,
}

impl MemoryHistory {
    /// A history holding one entry for the page load itself.
    pub fn new(initial_path: &str) -> Self {
        Self {
            inner: Mutex::new(Entries {
                stack: vec![initial_path.to_string()],
                index: 0,
            }),
        }
    }

    /// Move back one entry, returning the new current path. Emulates the
    /// browser back button; feed the result to `Session::pop_state`.
    pub fn back(&self) -> Option<String> {
        let mut inner = self.inner.lock().unwrap();
        if inner.index == 0 {
            return None;
        }
        inner.index -= 1;
        Some(inner.stack[inner.index].clone())
    }

    /// Move forward one entry, returning the new current path.
    pub fn forward(&self) -> Option<String> {
        let mut inner = self.inner.lock().unwrap();
        if inner.index + 1 >= inner.stack.len() {
            return None;
        }
        inner.index += 1;
        Some(inner.stack[inner.index].clone())
    }

    /// Total number of entries on the stack
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().stack.len()
    }

    pub fn is_empty(&self) -> bool {
        // The stack always holds at least the initial entry
        false
    }
}

impl HistorySink for MemoryHistory {
    fn current_path(&self) -> String {
        let inner = self.inner.lock().unwrap();
        inner.stack[inner.index].clone()
    }

    fn push(&self, path: &str) {
        let mut inner = self.inner.lock().unwrap();
        let cut = inner.index + 1;
        inner.stack.truncate(cut);
        inner.stack.push(path.to_string());
        inner.index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_makes_path_current() {
        let history = MemoryHistory::new("/");
        history.push("/projects");
        assert_eq!(history.current_path(), "/projects");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn back_and_forward_move_without_adding_entries() {
        let history = MemoryHistory::new("/");
        history.push("/projects");
        history.push("/certifications");

        assert_eq!(history.back().as_deref(), Some("/projects"));
        assert_eq!(history.back().as_deref(), Some("/"));
        assert_eq!(history.back(), None);
        assert_eq!(history.forward().as_deref(), Some("/projects"));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn push_after_back_drops_forward_tail() {
        let history = MemoryHistory::new("/");
        history.push("/projects");
        history.back();
        history.push("/certifications");

        assert_eq!(history.len(), 2);
        assert_eq!(history.current_path(), "/certifications");
        assert_eq!(history.forward(), None);
    }
}
