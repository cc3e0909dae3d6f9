pub use crate::api::Api;
pub use crate::collector::{BodyCollector, BodyDecodeError};
pub use crate::handler::{Handler, Res};
pub use crate::products::{ApiError, Envelope, Product};
pub use crate::request::{Header, Method, Param, RawRequest, Request};
pub use crate::response::{RawResponse, Response};
pub use crate::server::Server;
