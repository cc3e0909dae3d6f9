//! A mock product catalog HTTP API: hardcoded records, JSON echo endpoints,
//! no persistence. Built from a small set of composable server components:
//! * Request body [collection and JSON decoding](crate::collector)
//! * Byte-level [request parsing](crate::request::parser) over any stream
//! * Path-based [request routing](crate::router::Router)
//! * HTTP method handlers for [APIs](crate::api::Api)
//! * JSON request/response [codecs](crate::content) with `serde_json`
//! * Multi-threaded [TCP server](crate::server::tcp::TcpServer)
//!
//! # Example
//! ```
//! use tailspin_api::app::app;
//! use tailspin_api::io::ReadWriteAdapter;
//! use tailspin_api::prelude::*;
//! use tailspin_api::server::StreamServer;
//!
//! let request = b"GET /api/products/42 HTTP/1.1\r\nHost: localhost\r\n\r\n";
//! let mut write_buf = vec![];
//! let stream = ReadWriteAdapter::new(&request[..], &mut write_buf);
//! let mut server = StreamServer::new(stream, app());
//! server.serve_one().unwrap();
//! let response = String::from_utf8(write_buf).unwrap();
//! assert!(response.starts_with("HTTP/1.1 200 OK"));
//! assert!(response.contains(r#""id":"42""#));
//! ```
pub mod api;
pub mod app;
pub mod collector;
pub mod content;
pub mod filter;
pub mod handler;
pub mod io;
pub mod prelude;
pub mod products;
pub mod request;
pub mod response;
pub mod router;
pub mod runner;
pub mod server;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
