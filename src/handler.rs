//! Base for all request handlers.
use crate::content::{JsonCodec, JsonErrorCodec};
use crate::filter::ErrorFilter;
use crate::request::Request;
use crate::response::Response;

pub type Res<O, E> = std::result::Result<Response<O>, Response<E>>;

/// A Handler implements an HTTP endpoint: it takes an HTTP Request object
/// and returns an HTTP Response object. Handlers are used by Server
/// implementations to handle requests, and wrap each other to layer on
/// cross-cutting concerns.
pub trait Handler<I, O, E, C>: Sync + Send
where
    I: 'static + Sync,
    O: 'static + Sync,
    E: 'static + Sync,
{
    fn handle(&self, request: Request<I>, context: &mut C) -> Res<O, E>;

    /// Map error responses, e.g. to fill in a structured error body.
    fn error_filter<F, FE>(self, f: F) -> ErrorFilter<Self, F, E>
    where
        F: Fn(Response<E>, &mut C) -> Response<FE> + Send + Sync,
        Self: Sized,
    {
        ErrorFilter::new(f, self)
    }
    /// Decode JSON request bodies and encode JSON response bodies.
    fn json(self) -> JsonCodec<Self, O>
    where
        Self: Sized,
    {
        JsonCodec::new(self)
    }
    /// Encode error bodies as JSON.
    fn json_errors(self) -> JsonErrorCodec<Self, E>
    where
        Self: Sized,
    {
        JsonErrorCodec::new(self)
    }
}

pub type HandlerFunc<I, O, E, C> = Box<dyn Fn(Request<I>, &mut C) -> Res<O, E> + Send + Sync>;

pub struct FnHandler<I, O, E, C> {
    f: HandlerFunc<I, O, E, C>,
}

impl<I, O, E, C> FnHandler<I, O, E, C> {
    pub fn new(f: HandlerFunc<I, O, E, C>) -> Self {
        Self { f }
    }
}

impl<I, O, E, C> Handler<I, O, E, C> for FnHandler<I, O, E, C>
where
    I: 'static + Sync,
    O: 'static + Sync,
    E: 'static + Sync,
{
    fn handle(&self, request: Request<I>, context: &mut C) -> Res<O, E> {
        (self.f)(request, context)
    }
}

impl<F, I, O, E, C> Handler<I, O, E, C> for F
where
    F: Fn(Request<I>, &mut C) -> Res<O, E> + Send + Sync,
    I: Sync + 'static,
    O: Sync + 'static,
    E: Sync + 'static,
{
    fn handle(&self, request: Request<I>, context: &mut C) -> Res<O, E> {
        (self)(request, context)
    }
}
