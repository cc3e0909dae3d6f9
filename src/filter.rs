//! Handlers that rewrite the responses of an inner handler.
use std::marker::PhantomData;

use crate::handler::{Handler, Res};
use crate::request::Request;
use crate::response::Response;

/// Applies a function to error responses only; successes pass through.
pub struct ErrorFilter<H, F, E: 'static> {
    f: F,
    handler: H,
    phantom_e: PhantomData<&'static E>,
}

impl<H, F, E> ErrorFilter<H, F, E> {
    pub fn new(f: F, handler: H) -> Self {
        Self {
            f,
            handler,
            phantom_e: PhantomData,
        }
    }
}

impl<F, FE, H, I, O, E, C> Handler<I, O, E, C> for ErrorFilter<H, F, FE>
where
    H: Handler<I, O, FE, C>,
    F: Fn(Response<FE>, &mut C) -> Response<E> + Send + Sync,
    I: 'static + Sync,
    O: 'static + Sync,
    E: 'static + Sync,
    FE: 'static + Sync,
{
    fn handle(&self, request: Request<I>, context: &mut C) -> Res<O, E> {
        match self.handler.handle(request, context) {
            Err(r) => Err((self.f)(r, context)),
            Ok(r) => Ok(r),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::request::RawRequest;

    fn failing(_req: RawRequest, _ctx: &mut ()) -> Res<Vec<u8>, Vec<u8>> {
        Err(Response::new(404))
    }

    #[test]
    fn test_error_filter_rewrites_errors_only() {
        let handler = failing.error_filter(|response: Response<Vec<u8>>, _ctx: &mut ()| {
            response.with_body(b"filled".to_vec())
        });
        let response = handler.handle(Request::default(), &mut ()).unwrap_err();
        assert_eq!(response.status_code, 404);
        assert_eq!(response.body, Some(b"filled".to_vec()));
    }
}
