//! Route table, per-request context, and boundary filters for the product
//! API. [`app`] builds the full pipeline served by the binary and driven
//! directly by the tests.
use std::sync::atomic::{AtomicU64, Ordering};

use crate::api::Api;
use crate::handler::{Handler, Res};
use crate::products::{ApiError, ProductApi};
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

pub const WELCOME: &str = "Welcome to the Product API!";

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Per-request state threaded through the handler pipeline. The id shows up
/// in server logs, one fresh value per request.
#[derive(Debug)]
pub struct Context {
    pub request_id: u64,
}

impl Default for Context {
    fn default() -> Self {
        Context {
            request_id: REQUEST_COUNTER.fetch_add(1, Ordering::SeqCst),
        }
    }
}

struct WelcomeApi;

impl<C> Api<Vec<u8>, Vec<u8>, ApiError, C> for WelcomeApi {
    fn get(&self, _request: Request<Vec<u8>>, _context: &mut C) -> Res<Vec<u8>, ApiError> {
        Ok(Response::new(200)
            .with_body(WELCOME.as_bytes().to_vec())
            .with_header("Content-Type", "text/plain"))
    }
}

/// Give body-less error responses the structured envelope, using the reason
/// phrase as the message (404 -> "Not Found", 405 -> "Method Not Allowed").
fn fill_error(mut response: Response<ApiError>, _context: &mut Context) -> Response<ApiError> {
    if response.body.is_none() {
        response.body = Some(ApiError::new(&response.status));
    }
    response
}

// Both spellings of the products route share one handler stack; the capture
// form adds the id path param.
fn products_route() -> impl Handler<Vec<u8>, Vec<u8>, ApiError, Context> {
    ProductApi.handler().json()
}

/// The full request pipeline for the product API.
pub fn app() -> impl Handler<Vec<u8>, Vec<u8>, Vec<u8>, Context> {
    Router::new()
        .with_route("/", WelcomeApi.handler())
        .with_route("/api/products", products_route())
        .with_route("/api/products/?id", products_route())
        .error_filter(fill_error)
        .json_errors()
}
