//! JSON request/response codecs.
//!
//! The service speaks JSON only, so there is no Content-Type negotiation:
//! [`JsonCodec`] decodes request payloads into [`serde_json::Value`] and
//! serializes typed response payloads, and [`JsonErrorCodec`] serializes
//! typed error payloads so 4xx/5xx responses leave the service as JSON too.
use std::marker::PhantomData;

use log::error;
use serde::Serialize;
use serde_json::Value;

use crate::collector;
use crate::handler::{Handler, Res};
use crate::products::ApiError;
use crate::request::Request;
use crate::response::Response;

pub const APPLICATION_JSON: &str = "application/json";

fn to_json_bytes<T: Serialize>(body: T) -> Option<Vec<u8>> {
    match serde_json::to_vec(&body) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            error!("response serialization failed: {}", e);
            None
        }
    }
}

/// Decodes JSON request bodies and encodes JSON response bodies.
///
/// The body buffer handed over by the parser is already stream-complete;
/// this is where its decoding step happens. A malformed buffer yields a 400
/// with the structured error envelope, so the caller always gets a response.
pub struct JsonCodec<H, O>
where
    O: 'static,
{
    handler: H,
    phantom_o: PhantomData<&'static O>,
}

impl<H, O> JsonCodec<H, O>
where
    O: 'static,
{
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            phantom_o: PhantomData,
        }
    }
}

impl<H, O, C> Handler<Vec<u8>, Vec<u8>, ApiError, C> for JsonCodec<H, O>
where
    H: Handler<Value, O, ApiError, C>,
    O: 'static + Sync + Serialize,
{
    fn handle(&self, mut request: Request<Vec<u8>>, context: &mut C) -> Res<Vec<u8>, ApiError> {
        let decoded = match request.body.take() {
            Some(bytes) => match collector::decode_json(&bytes) {
                Ok(value) => Some(value),
                Err(e) => {
                    return Err(Response::new(400)
                        .with_body(ApiError::new(&format!("malformed JSON body: {}", e))))
                }
            },
            None => None,
        };
        let mut typed: Request<Value> = request.into_type();
        typed.body = decoded;
        match self.handler.handle(typed, context) {
            Ok(mut response) => {
                let body = response.body.take();
                let raw = response.into_raw();
                match body {
                    Some(body) => match to_json_bytes(body) {
                        Some(bytes) => Ok(raw
                            .with_body(bytes)
                            .with_header("Content-Type", APPLICATION_JSON)),
                        None => Err(Response::new(500)),
                    },
                    None => Ok(raw),
                }
            }
            Err(response) => Err(response),
        }
    }
}

/// Encodes typed error payloads as JSON.
pub struct JsonErrorCodec<H, E>
where
    E: 'static,
{
    handler: H,
    phantom_e: PhantomData<&'static E>,
}

impl<H, E> JsonErrorCodec<H, E>
where
    E: 'static,
{
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            phantom_e: PhantomData,
        }
    }
}

impl<H, I, O, E, C> Handler<I, O, Vec<u8>, C> for JsonErrorCodec<H, E>
where
    H: Handler<I, O, E, C>,
    I: 'static + Sync,
    O: 'static + Sync,
    E: 'static + Sync + Serialize,
{
    fn handle(&self, request: Request<I>, context: &mut C) -> Res<O, Vec<u8>> {
        match self.handler.handle(request, context) {
            Ok(response) => Ok(response),
            Err(mut response) => {
                let body = response.body.take();
                let raw = response.into_type::<Vec<u8>>();
                Err(match body {
                    Some(body) => match to_json_bytes(body) {
                        Some(bytes) => raw
                            .with_body(bytes)
                            .with_header("Content-Type", APPLICATION_JSON),
                        None => Response::new(500),
                    },
                    None => raw,
                })
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::request::RawRequest;

    fn echo(request: Request<Value>, _ctx: &mut ()) -> Res<Value, ApiError> {
        Ok(Response::new(200).with_body(request.body.unwrap_or(Value::Null)))
    }

    #[test]
    fn test_codec_decodes_and_reencodes() {
        let handler = JsonCodec::new(echo);
        let mut request = RawRequest::default();
        request.body = Some(b"{\"name\":\"test\"}".to_vec());
        let response = handler.handle(request, &mut ()).unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, Some(b"{\"name\":\"test\"}".to_vec()));
        assert_eq!(
            response.headers().get("Content-Type"),
            Some(&APPLICATION_JSON.to_string())
        );
    }

    #[test]
    fn test_codec_rejects_malformed_body() {
        let handler = JsonCodec::new(echo);
        let mut request = RawRequest::default();
        request.body = Some(b"{bad json".to_vec());
        let response = handler.handle(request, &mut ()).unwrap_err();
        assert_eq!(response.status_code, 400);
        let body = response.body.unwrap();
        assert!(body.error.starts_with("malformed JSON body"));
    }

    #[test]
    fn test_error_codec_serializes_error_body() {
        let failing = |_req: RawRequest, _ctx: &mut ()| -> Res<Vec<u8>, ApiError> {
            Err(Response::new(404).with_body(ApiError::new("Not Found")))
        };
        let handler = JsonErrorCodec::new(failing);
        let response = handler.handle(RawRequest::default(), &mut ()).unwrap_err();
        assert_eq!(response.status_code, 404);
        assert_eq!(response.body, Some(b"{\"error\":\"Not Found\"}".to_vec()));
    }
}
