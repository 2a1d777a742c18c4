//! Target URL matching.
//!
//! # Design Decisions
//! - Literal, case-sensitive prefix comparison on the raw target string
//! - No URL parsing before classification; a target only needs parsing once
//!   it is known which handler will use it

/// Trait for matching a raw request target against a condition.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the target matches this condition.
    fn matches(&self, target: &str) -> bool;
}

/// Matches when the target starts with any of the given scheme prefixes.
#[derive(Debug, Clone)]
pub struct SchemeMatcher {
    prefixes: Vec<&'static str>,
}

impl SchemeMatcher {
    /// Create a matcher for one or more prefixes such as `"http://"`.
    pub fn new(prefixes: &[&'static str]) -> Self {
        Self {
            prefixes: prefixes.to_vec(),
        }
    }
}

impl Matcher for SchemeMatcher {
    fn matches(&self, target: &str) -> bool {
        self.prefixes.iter().any(|p| target.starts_with(p))
    }
}
