//! Path based request routing.
use crate::handler::{Handler, Res};
use crate::request::{Param, Request};
use crate::response::Response;

enum RoutePart {
    Exact(String),
    Capture(String),
}

impl RoutePart {
    fn from_str(s: &str) -> Self {
        if let Some(s) = s.strip_prefix('?') {
            Self::Capture(s.to_string())
        } else {
            Self::Exact(s.to_string())
        }
    }
    fn matches(&self, s: &str) -> Option<Option<(String, String)>> {
        match self {
            Self::Exact(p) => {
                if s == &p[..] {
                    Some(None)
                } else {
                    None
                }
            }
            Self::Capture(p) => Some(Some((p.clone(), s.to_string()))),
        }
    }
}

struct RoutePath {
    parts: Vec<RoutePart>,
}

impl RoutePath {
    fn from_str(s: &str) -> Self {
        Self {
            parts: s.split('/').map(RoutePart::from_str).collect(),
        }
    }
    /// Params captured by the pattern, or None if the path does not match.
    fn matches(&self, s: &str) -> Option<Vec<(String, String)>> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != self.parts.len() {
            return None;
        }
        let mut params = vec![];
        for (i, part) in parts.iter().enumerate() {
            match self.parts[i].matches(part)? {
                Some((name, val)) => params.push((name, val)),
                None => (),
            }
        }
        Some(params)
    }
}

struct Route<I, O, E, C> {
    path: RoutePath,
    // Routes hold heterogenous handler types, hence the boxdyn.
    handler: Box<dyn Handler<I, O, E, C>>,
}

/// Router is a Handler which dispatches requests to any number of other
/// Handlers based on the request path. The first matching route wins;
/// no match is a 404.
///
/// # Usage - route patterns
/// * `/foo`: matches exactly /foo
/// * `/foo/?name`: matches /foo/bar, adds name="bar" to request.params
///
/// # Example
/// ```
/// use tailspin_api::prelude::*;
/// use tailspin_api::router::Router;
///
/// fn handle_hello(req: RawRequest, _context: &mut ()) -> Res<Vec<u8>, Vec<u8>> {
///     Ok(Response::new(200).with_body(b"Hello!".to_vec()))
/// }
///
/// fn handle_bye(req: RawRequest, _context: &mut ()) -> Res<Vec<u8>, Vec<u8>> {
///     Ok(Response::new(200).with_body(b"Bye!".to_vec()))
/// }
///
/// let router = Router::new()
///    .with_route("/hello", handle_hello)
///    .with_route("/bye", handle_bye);
///
/// let mut req_hello = Request::default();
/// req_hello.path = "/hello".to_string();
/// let response_hello = router.handle(req_hello, &mut ()).unwrap();
/// # assert_eq!(response_hello.body, Some(b"Hello!".to_vec()));
///
/// let mut req_bye = Request::default();
/// req_bye.path = "/bye".to_string();
/// let response_bye = router.handle(req_bye, &mut ()).unwrap();
/// # assert_eq!(response_bye.body, Some(b"Bye!".to_vec()));
/// ```
pub struct Router<I, O, E, C> {
    routes: Vec<Route<I, O, E, C>>,
}

impl<I: 'static + Sync, O: 'static + Sync, E: 'static + Sync, C> Router<I, O, E, C> {
    pub fn new() -> Self {
        Self { routes: vec![] }
    }
    pub fn with_route<H>(mut self, path: &str, handler: H) -> Self
    where
        H: 'static + Handler<I, O, E, C>,
    {
        self.routes.push(Route {
            path: RoutePath::from_str(path),
            handler: Box::new(handler),
        });
        self
    }
}

impl<I: 'static + Sync, O: 'static + Sync, E: 'static + Sync, C> Default for Router<I, O, E, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: 'static + Sync, O: 'static + Sync, E: 'static + Sync, C> Handler<I, O, E, C>
    for Router<I, O, E, C>
{
    fn handle(&self, mut request: Request<I>, context: &mut C) -> Res<O, E> {
        for route in &self.routes {
            if let Some(params) = route.path.matches(&request.path) {
                for (name, val) in params {
                    request.params.add(Param::Path(name), val)
                }
                return route.handler.handle(request, context);
            }
        }
        Err(Response::new(404))
    }
}
