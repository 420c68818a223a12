//! Ordered route table with first-match-wins dispatch.

use std::sync::Arc;

use regex::Regex;

use crate::http::request::Request;
use crate::http::response::Response;

/// Application-supplied handler. Runs synchronously on the event loop and
/// must not block; the borrows prevent it from retaining the request or
/// response beyond the call.
pub type Handler = Arc<dyn Fn(&Request, &mut Response) + Send + Sync>;

/// Error type for route registration.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The pattern failed to compile.
    #[error("invalid route pattern {pattern:?}: {source}")]
    BadPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Ordered list of `(pattern, handler)` pairs.
///
/// Registration order is match priority: the first pattern whose match
/// covers the whole path wins, regardless of specificity. The table is not
/// deduplicated and is expected to be frozen (shared via `Arc`) before
/// serving starts.
#[derive(Default)]
pub struct Router {
    routes: Vec<(Regex, Handler)>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Compile `pattern` and append it to the end of the route table.
    ///
    /// Patterns are anchored on both ends, so a match must cover the entire
    /// request path. Malformed patterns fail here, never at match time.
    pub fn add_route<H>(&mut self, pattern: &str, handler: H) -> Result<(), RouteError>
    where
        H: Fn(&Request, &mut Response) + Send + Sync + 'static,
    {
        let regex =
            Regex::new(&format!("^(?:{pattern})$")).map_err(|source| RouteError::BadPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        self.routes.push((regex, Arc::new(handler)));
        Ok(())
    }

    /// Linear scan in registration order; returns the first matching handler.
    pub fn route(&self, path: &str) -> Option<Handler> {
        self.routes
            .iter()
            .find(|(pattern, _)| pattern.is_match(path))
            .map(|(_, handler)| Arc::clone(handler))
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::headers::HeaderMap;

    fn request(path: &str) -> Request {
        Request::new("GET", path, HeaderMap::new())
    }

    fn tag(id: &'static str) -> impl Fn(&Request, &mut Response) + Send + Sync {
        move |_req, resp| resp.append_chunk(id)
    }

    fn dispatch(router: &Router, path: &str) -> Option<Vec<u8>> {
        router.route(path).map(|handler| {
            let mut resp = Response::new();
            handler(&request(path), &mut resp);
            resp.chunks().concat()
        })
    }

    #[test]
    fn first_match_wins_over_specificity() {
        let mut router = Router::new();
        router.add_route("/a.*", tag("wide")).unwrap();
        router.add_route("/ab", tag("narrow")).unwrap();

        // `/ab` satisfies both patterns; registration order decides.
        assert_eq!(dispatch(&router, "/ab").unwrap(), b"wide");
    }

    #[test]
    fn registration_order_is_priority() {
        let mut router = Router::new();
        router.add_route("/ab", tag("narrow")).unwrap();
        router.add_route("/a.*", tag("wide")).unwrap();

        assert_eq!(dispatch(&router, "/ab").unwrap(), b"narrow");
        assert_eq!(dispatch(&router, "/ax").unwrap(), b"wide");
    }

    #[test]
    fn match_must_cover_whole_path() {
        let mut router = Router::new();
        router.add_route("/hello", tag("hello")).unwrap();

        assert!(dispatch(&router, "/hello").is_some());
        assert!(dispatch(&router, "/hello/world").is_none());
        assert!(dispatch(&router, "/prefix/hello").is_none());
    }

    #[test]
    fn no_match_returns_none() {
        let router = Router::new();
        assert!(router.route("/anything").is_none());
    }

    #[test]
    fn malformed_pattern_fails_at_registration() {
        let mut router = Router::new();
        let err = router.add_route("/(unclosed", tag("x")).unwrap_err();
        assert!(matches!(err, RouteError::BadPattern { .. }));
        assert!(router.is_empty());
    }

    #[test]
    fn duplicate_patterns_are_kept() {
        let mut router = Router::new();
        router.add_route("/dup", tag("one")).unwrap();
        router.add_route("/dup", tag("two")).unwrap();
        assert_eq!(router.len(), 2);
        assert_eq!(dispatch(&router, "/dup").unwrap(), b"one");
    }
}
