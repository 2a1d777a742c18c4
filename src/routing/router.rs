//! Scheme lookup and dispatch.
//!
//! # Responsibilities
//! - Store the ordered scheme rules
//! - Look up the handler for a request target
//! - Return the matched route or an explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - First match wins, in insertion order
//! - Explicit NoMatch rather than silent default

use crate::routing::matcher::{Matcher, SchemeMatcher};

/// The handler a classified target is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Relay a GET to the origin and stream its bytes back.
    HttpRelay,
    /// Answer with the canned FTP acknowledgement.
    FtpStub,
}

/// Result of a route lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch {
    Matched(Route),
    NoMatch,
}

/// Ordered list of scheme rules.
#[derive(Debug)]
pub struct Router {
    routes: Vec<(Box<dyn Matcher>, Route)>,
}

impl Router {
    /// Create an empty router.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// The relay's fixed rules: `http://`/`https://` before `ftp://`.
    pub fn standard() -> Self {
        Self::new()
            .with_route(SchemeMatcher::new(&["http://", "https://"]), Route::HttpRelay)
            .with_route(SchemeMatcher::new(&["ftp://"]), Route::FtpStub)
    }

    /// Append a rule. Earlier rules take precedence.
    pub fn with_route(mut self, matcher: impl Matcher + 'static, route: Route) -> Self {
        self.routes.push((Box::new(matcher), route));
        self
    }

    /// Find the first route whose matcher accepts `target`.
    pub fn lookup(&self, target: &str) -> RouteMatch {
        self.routes
            .iter()
            .find(|(matcher, _)| matcher.matches(target))
            .map(|(_, route)| RouteMatch::Matched(*route))
            .unwrap_or(RouteMatch::NoMatch)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_and_https_relay() {
        let router = Router::standard();
        assert_eq!(router.lookup("http://a/b"), RouteMatch::Matched(Route::HttpRelay));
        assert_eq!(router.lookup("https://a/b"), RouteMatch::Matched(Route::HttpRelay));
    }

    #[test]
    fn ftp_is_stubbed() {
        let router = Router::standard();
        assert_eq!(router.lookup("ftp://host/file"), RouteMatch::Matched(Route::FtpStub));
    }

    #[test]
    fn anything_else_is_no_match() {
        let router = Router::standard();
        assert_eq!(router.lookup("gopher://x"), RouteMatch::NoMatch);
        assert_eq!(router.lookup("/index.html"), RouteMatch::NoMatch);
        assert_eq!(router.lookup(""), RouteMatch::NoMatch);
        assert_eq!(router.lookup("ftps://x"), RouteMatch::NoMatch);
    }

    #[test]
    fn first_match_wins() {
        let router = Router::new()
            .with_route(SchemeMatcher::new(&["http"]), Route::FtpStub)
            .with_route(SchemeMatcher::new(&["http://"]), Route::HttpRelay);
        assert_eq!(router.lookup("http://x"), RouteMatch::Matched(Route::FtpStub));
    }
}
