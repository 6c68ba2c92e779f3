//! Linear router: routes are tried in registration order; first method + full-path match wins.

use axum::http::Method;
use regex::Regex;

pub struct Route<H> {
    pub method: Method,
    pub pattern: Regex,
    pub handler: H,
}

/// A resolved route and the capture groups of its pattern.
#[derive(Debug)]
pub struct RouteMatch<'r, H> {
    pub handler: &'r H,
    pub params: Vec<String>,
}

impl<H> RouteMatch<'_, H> {
    /// Capture group `i` (0-based), or "" when the pattern has no such group.
    pub fn param(&self, i: usize) -> &str {
        self.params.get(i).map(String::as_str).unwrap_or("")
    }
}

pub struct Router<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Router { routes: Vec::new() }
    }
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route. The pattern is anchored at both ends.
    pub fn handle(&mut self, method: Method, pattern: &str, handler: H) -> Result<&mut Self, regex::Error> {
        let pattern = Regex::new(&format!("^(?:{})$", pattern))?;
        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
        Ok(self)
    }

    pub fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, H>> {
        for route in &self.routes {
            if route.method != *method {
                continue;
            }
            if let Some(caps) = route.pattern.captures(path) {
                let params = caps
                    .iter()
                    .skip(1)
                    .map(|m| m.map(|m| decode_segment(m.as_str())).unwrap_or_default())
                    .collect();
                return Some(RouteMatch {
                    handler: &route.handler,
                    params,
                });
            }
        }
        None
    }
}

/// Percent-decode a captured segment. Invalid UTF-8 after decoding keeps the raw text.
fn decode_segment(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_discriminates_same_path() {
        let mut router = Router::new();
        router.handle(Method::GET, "/(\\w+)", "get").unwrap();
        router.handle(Method::DELETE, "/(\\w+)", "delete").unwrap();
        assert_eq!(*router.resolve(&Method::GET, "/a").unwrap().handler, "get");
        assert_eq!(*router.resolve(&Method::DELETE, "/a").unwrap().handler, "delete");
        assert!(router.resolve(&Method::POST, "/a").is_none());
    }

    #[test]
    fn patterns_are_anchored() {
        let mut router = Router::new();
        router.handle(Method::GET, "/", "root").unwrap();
        assert!(router.resolve(&Method::GET, "/").is_some());
        assert!(router.resolve(&Method::GET, "/x").is_none());
        assert!(router.resolve(&Method::GET, "x/").is_none());
    }

    #[test]
    fn alternation_is_anchored_as_a_whole() {
        let mut router = Router::new();
        router.handle(Method::GET, "/a|/b", "ab").unwrap();
        assert!(router.resolve(&Method::GET, "/a").is_some());
        assert!(router.resolve(&Method::GET, "/b").is_some());
        assert!(router.resolve(&Method::GET, "/ab").is_none());
    }

    #[test]
    fn first_registered_wins() {
        let mut router = Router::new();
        router.handle(Method::GET, "/(.+)", "first").unwrap();
        router.handle(Method::GET, "/special", "second").unwrap();
        assert_eq!(*router.resolve(&Method::GET, "/special").unwrap().handler, "first");
    }

    #[test]
    fn captures_become_params() {
        let mut router = Router::new();
        router.handle(Method::GET, "/([^/]+)/([^/]+)", ()).unwrap();
        let m = router.resolve(&Method::GET, "/users/12").unwrap();
        assert_eq!(m.params, vec!["users", "12"]);
        assert_eq!(m.param(1), "12");
        assert_eq!(m.param(5), "");
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let mut router: Router<()> = Router::new();
        assert!(router.handle(Method::GET, "/(", ()).is_err());
        assert!(router.resolve(&Method::GET, "/(").is_none());
    }

    #[test]
    fn captures_are_percent_decoded() {
        let mut router = Router::new();
        router.handle(Method::GET, "/([^/]+)/([^/]+)", ()).unwrap();
        let m = router.resolve(&Method::GET, "/order%20lines/a%2Fb").unwrap();
        assert_eq!(m.params, vec!["order lines", "a/b"]);
        let m = router.resolve(&Method::GET, "/t/%FF").unwrap();
        assert_eq!(m.param(1), "%FF");
    }
}
