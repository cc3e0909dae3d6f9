//! HTTP request and parser.
use std::collections::HashMap;
use std::fmt;
use std::hash;

pub mod parser;

/// An HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request<T> {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub headers: HashMap<Header, String>,
    pub body: Option<T>,
    pub content_length: usize,
    pub params: Params,
}

pub type RawRequest = Request<Vec<u8>>;

impl<T> Default for Request<T> {
    fn default() -> Self {
        Self {
            method: Method::GET,
            path: "/".to_string(),
            query: "".to_string(),
            headers: vec![("Host".to_string().into(), "localhost".to_string())]
                .into_iter()
                .collect(),
            body: None,
            content_length: 0,
            params: Params::new(),
        }
    }
}

impl<T> Request<T> {
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(Header::new(name), value.to_string());
        self
    }
    /// Convert to a request of another payload type, dropping the body.
    pub fn into_type<S>(self) -> Request<S> {
        Request {
            method: self.method,
            path: self.path,
            query: self.query,
            headers: self.headers,
            body: None,
            content_length: self.content_length,
            params: self.params,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    PATCH,
    DELETE,
    CONNECT,
    OPTIONS,
    TRACE,
}

/// A header name, compared case-insensitively.
#[derive(Debug, Clone)]
pub struct Header(String);

impl Header {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq for Header {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl Eq for Header {}

impl hash::Hash for Header {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.0.to_lowercase().hash(state);
    }
}

impl From<String> for Header {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named request parameter, by where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Param {
    Path(String),
    Query(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Params(HashMap<Param, Vec<String>>);

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

impl Params {
    pub fn new() -> Self {
        Params(HashMap::new())
    }
    pub fn add(&mut self, p: Param, s: String) {
        self.0.entry(p).or_insert_with(Vec::new).push(s);
    }
    // Get first named param of specific type (path or query)
    pub fn get_first(&self, p: &Param) -> Option<&String> {
        match self.0.get(p).map(|v| &v[..]) {
            None => None,
            Some([]) => None,
            Some(ps) => Some(&ps[0]),
        }
    }
    // Get named param from anywhere, path before query
    pub fn get_any(&self, name: &str) -> Option<&String> {
        let try_params = [
            Param::Path(name.to_string()),
            Param::Query(name.to_string()),
        ];
        for p in try_params.iter() {
            if let Some(val) = self.get_first(p) {
                return Some(val);
            }
        }
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_header_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert(Header::new("Content-Length"), "12".to_string());
        assert_eq!(
            headers.get(&Header::new("content-length")),
            Some(&"12".to_string())
        );
    }

    #[test]
    fn test_params_path_wins_over_query() {
        let mut params = Params::new();
        params.add(Param::Query("id".to_string()), "9".to_string());
        params.add(Param::Path("id".to_string()), "3".to_string());
        assert_eq!(params.get_any("id"), Some(&"3".to_string()));
    }
}
