//! Scroll-reveal animator: one-way hidden-to-shown transitions driven by
//! visibility reports.
//!
//! The animator stands in for an `IntersectionObserver`: it holds the set of
//! elements currently tagged as initially hidden and flips each one to shown
//! the first time it is reported at least 10% visible. Re-arming replaces
//! the whole watch list, which is how stale observers from a replaced
//! subtree are discarded.

/// Visible fraction at which a hidden element transitions to shown
pub const REVEAL_THRESHOLD: f64 = 0.1;

#[derive(Debug)]
struct RevealTarget {
    key: String,
    shown: bool,
}

/// Watches reveal candidates and applies the one-way shown transition
#[derive(Debug, Default)]
pub struct RevealAnimator {
    targets: Vec<RevealTarget>,
}

impl RevealAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the watch list with the candidates of the current subtree.
    ///
    /// Must be called once at startup and again after every successful
    /// content swap; the previous list is invalid once its subtree is gone.
    pub fn arm(&mut self, candidates: Vec<String>) {
        self.targets = candidates
            .into_iter()
            .map(|key| RevealTarget { key, shown: false })
            .collect();
    }

    /// Report a watched element's visible fraction.
    ///
    /// Returns `true` when this report caused the hidden-to-shown
    /// transition. Shown elements never revert, and unknown keys are
    /// ignored.
    pub fn report_visibility(&mut self, key: &str, visible_fraction: f64) -> bool {
        if let Some(target) = self.targets.iter_mut().find(|t| t.key == key) {
            if !target.shown && visible_fraction >= REVEAL_THRESHOLD {
                target.shown = true;
                return true;
            }
        }
        false
    }

    /// Whether the element is currently marked shown
    pub fn is_shown(&self, key: &str) -> bool {
        self.targets.iter().any(|t| t.key == key && t.shown)
    }

    /// Keys currently on the watch list, in registration order
    pub fn watched(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|t| t.key.as_str())
    }

    /// Number of watched elements still hidden
    pub fn pending(&self) -> usize {
        self.targets.iter().filter(|t| !t.shown).count()
    }
}
