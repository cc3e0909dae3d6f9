//! The mock product catalog: fixed records, response envelopes, and the
//! /api/products method handlers.
//!
//! There is no storage behind this API. Fetching by id returns the same
//! hardcoded record with only the id substituted, writes echo the caller's
//! payload back, and DELETE acknowledges without deleting anything.
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::Api;
use crate::handler::Res;
use crate::request::Request;
use crate::response::Response;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub brand: Brand,
    pub availability: String,
    pub condition: String,
    pub age_group: String,
    pub color: String,
    pub image_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

impl Brand {
    fn tailspin() -> Self {
        Self {
            kind: "Brand".to_string(),
            name: "Tailspin".to_string(),
        }
    }
}

/// The fixed record returned for any requested id; only the id varies.
pub fn product_with_id(id: &str) -> Product {
    Product {
        id: id.to_string(),
        name: "Charming sundress perfect for lunch out on the town.".to_string(),
        description:
            "A beautiful and lightweight sundress, ideal for warm weather. Made with durable fabric."
                .to_string(),
        brand: Brand::tailspin(),
        availability: "in stock".to_string(),
        condition: "new".to_string(),
        age_group: "adult".to_string(),
        color: "Blue".to_string(),
        image_link: "http://www.somebrand.com".to_string(),
    }
}

/// The full catalog, all two items of it.
pub fn all_products() -> Vec<Product> {
    vec![
        product_with_id("1"),
        Product {
            id: "2".to_string(),
            name: "Stylish sneakers for everyday wear.".to_string(),
            description:
                "Comfortable and trendy sneakers suitable for various occasions. Made with breathable materials."
                    .to_string(),
            brand: Brand::tailspin(),
            availability: "in stock".to_string(),
            condition: "new".to_string(),
            age_group: "adult".to_string(),
            color: "White".to_string(),
            image_link: "http://www.somebrand.com/sneakers".to_string(),
        },
    ]
}

/// Fixed JSON wrappers for every success response.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Product {
        product: Product,
    },
    Products {
        products: Vec<Product>,
    },
    Echo {
        #[serde(rename = "returnedData")]
        returned_data: Value,
    },
    Message {
        message: String,
    },
}

/// The error envelope: every 4xx/5xx body is `{"error": <message>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

pub struct ProductApi;

impl ProductApi {
    /// Write endpoints echo the decoded payload; an absent body echoes {}.
    fn echo(&self, request: Request<Value>) -> Res<Envelope, ApiError> {
        let data = request
            .body
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
        debug!("received body: {}", data);
        Ok(Response::new(200).with_body(Envelope::Echo {
            returned_data: data,
        }))
    }
}

impl<C> Api<Value, Envelope, ApiError, C> for ProductApi {
    fn get(&self, request: Request<Value>, _context: &mut C) -> Res<Envelope, ApiError> {
        let envelope = match request.params.get_any("id") {
            Some(id) => Envelope::Product {
                product: product_with_id(id),
            },
            None => Envelope::Products {
                products: all_products(),
            },
        };
        Ok(Response::new(200).with_body(envelope))
    }
    fn post(&self, request: Request<Value>, _context: &mut C) -> Res<Envelope, ApiError> {
        self.echo(request)
    }
    fn put(&self, request: Request<Value>, _context: &mut C) -> Res<Envelope, ApiError> {
        self.echo(request)
    }
    fn delete(&self, request: Request<Value>, _context: &mut C) -> Res<Envelope, ApiError> {
        // A delete needs an id segment; bare /api/products only takes reads
        // and writes.
        match request.params.get_any("id") {
            Some(id) => Ok(Response::new(200).with_body(Envelope::Message {
                message: format!(
                    "Product with ID {} has been deleted (not really, this is just a demo).",
                    id
                ),
            })),
            None => Err(Response::new(405)),
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_product_envelope_shape() {
        let envelope = Envelope::Product {
            product: product_with_id("42"),
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["product"]["id"], "42");
        assert_eq!(value["product"]["ageGroup"], "adult");
        assert_eq!(value["product"]["imageLink"], "http://www.somebrand.com");
        assert_eq!(value["product"]["brand"]["type"], "Brand");
        assert_eq!(value["product"]["brand"]["name"], "Tailspin");
    }

    #[test]
    fn test_catalog_has_two_fixed_records() {
        let products = all_products();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, "1");
        assert_eq!(products[1].id, "2");
        assert_eq!(products[1].color, "White");
    }

    #[test]
    fn test_echo_envelope_shape() {
        let envelope = Envelope::Echo {
            returned_data: json!({"name": "test"}),
        };
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"returnedData": {"name": "test"}})
        );
    }

    #[test]
    fn test_error_envelope_shape() {
        assert_eq!(
            serde_json::to_string(&ApiError::new("Not Found")).unwrap(),
            r#"{"error":"Not Found"}"#
        );
    }
}
