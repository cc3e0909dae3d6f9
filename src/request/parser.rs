use std::collections::HashMap;
use std::fmt;
use std::io::prelude::*;
use std::str::FromStr;
use std::str::Utf8Error;

use crate::collector::BodyCollector;
use crate::request::{Header, Method, Param, Params, Request};

impl FromStr for Method {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Method> {
        match s {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            "CONNECT" => Ok(Method::CONNECT),
            "OPTIONS" => Ok(Method::OPTIONS),
            "TRACE" => Ok(Method::TRACE),
            _ => Err(ParseError::new(0, "invalid HTTP method")),
        }
    }
}

const PARSER_BUFFER_SIZE: usize = 1024;

const WHITESPACE: [u8; 2] = *b" \t";
const PATH: [u8; 67] = *b"/ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";
const QUERY: [u8; 77] =
    *b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~!$&'()*+,;=";

fn one_of(chars: &'static [u8]) -> impl Fn(u8) -> bool {
    move |c: u8| chars.contains(&c)
}

fn whitespace() -> impl Fn(u8) -> bool {
    one_of(&WHITESPACE[..])
}

fn in_range(min: u8, max: u8) -> impl Fn(u8) -> bool {
    move |c: u8| c >= min && c <= max
}

/// An HTTP/1.x request parser over any byte stream.
///
/// The request line and headers are parsed byte-wise through a small
/// lookahead window; the body is read chunk-wise into a
/// [`BodyCollector`](crate::collector::BodyCollector) bounded by the
/// announced Content-Length.
pub struct RequestParser<R: Read> {
    buffer: [u8; PARSER_BUFFER_SIZE],
    pos: usize,
    len: usize,
    stream_position: usize,
    stream: R,
}

impl<R: Read> RequestParser<R> {
    pub fn new(stream: R) -> Self {
        Self {
            buffer: [0; PARSER_BUFFER_SIZE],
            pos: 0,
            len: 0,
            stream_position: 0,
            stream,
        }
    }
    fn error(&self, reason: &str) -> ParseError {
        ParseError::new(self.stream_position, reason)
    }
    /// Refill the window from the stream once it is exhausted.
    fn fill(&mut self) -> Result<()> {
        if self.pos == self.len {
            self.len = self.stream.read(&mut self.buffer)?;
            self.pos = 0;
        }
        Ok(())
    }
    /// Look at the next byte without consuming it; None at end of stream.
    /// Blocks until the stream has data, so callers must only peek where the
    /// request grammar expects more bytes.
    fn peek(&mut self) -> Result<Option<u8>> {
        self.fill()?;
        if self.pos < self.len {
            Ok(Some(self.buffer[self.pos]))
        } else {
            Ok(None)
        }
    }
    /// Consume the byte last returned by `peek`.
    fn bump(&mut self) -> u8 {
        let b = self.buffer[self.pos];
        self.pos += 1;
        self.stream_position += 1;
        b
    }
    fn expect(&mut self, b: u8) -> Result<()> {
        match self.peek()? {
            Some(c) if c == b => {
                self.bump();
                Ok(())
            }
            _ => Err(self.error(&format!("expected '{}'", b as char))),
        }
    }
    fn expects(&mut self, bs: &[u8]) -> Result<()> {
        for b in bs {
            self.expect(*b)?;
        }
        Ok(())
    }
    fn one<F>(&mut self, predicate: &F) -> Result<u8>
    where
        F: Fn(u8) -> bool,
    {
        match self.peek()? {
            Some(c) if predicate(c) => Ok(self.bump()),
            _ => Err(self.error("unexpected character")),
        }
    }
    fn star<F>(&mut self, predicate: &F) -> Result<Vec<u8>>
    where
        F: Fn(u8) -> bool,
    {
        let mut out = vec![];
        while let Some(c) = self.peek()? {
            if !predicate(c) {
                break;
            }
            out.push(self.bump());
        }
        Ok(out)
    }
    fn plus<F>(&mut self, predicate: &F) -> Result<Vec<u8>>
    where
        F: Fn(u8) -> bool,
    {
        let mut out = vec![self.one(predicate)?];
        out.extend(self.star(predicate)?);
        Ok(out)
    }
    fn until(&mut self, b: u8) -> Result<Vec<u8>> {
        let mut out = vec![];
        loop {
            match self.peek()? {
                Some(c) if c == b => return Ok(out),
                Some(_) => out.push(self.bump()),
                None => return Err(self.error("unexpected end of input")),
            }
        }
    }
    fn crlf(&mut self) -> Result<()> {
        self.expects(b"\r\n")
    }
    fn method(&mut self) -> Result<Method> {
        let method = self.plus(&in_range(b'A', b'Z'))?;
        let method = std::str::from_utf8(&method)?;
        Method::from_str(method)
    }
    fn path(&mut self) -> Result<String> {
        if self.peek()? != Some(b'/') {
            return Err(self.error("expected path starting with /"));
        }
        let path = self.plus(&one_of(&PATH[..]))?;
        Ok(std::str::from_utf8(&path)?.to_string())
    }
    fn query(&mut self) -> Result<String> {
        if self.peek()? == Some(b'?') {
            self.expect(b'?')?;
            let query = self.plus(&one_of(&QUERY[..]))?;
            Ok(std::str::from_utf8(&query)?.to_string())
        } else {
            Ok("".to_string())
        }
    }
    fn header(&mut self) -> Result<(Header, String)> {
        let header = self.until(b':')?;
        self.expects(b":")?;
        self.star(&whitespace())?;
        let value = self.until(b'\r')?;
        self.crlf()?;
        Ok((
            Header::new(std::str::from_utf8(&header)?),
            std::str::from_utf8(&value)?.to_string(),
        ))
    }
    fn headers(&mut self) -> Result<Vec<(Header, String)>> {
        let mut headers = vec![];
        while self.peek()? != Some(b'\r') {
            headers.push(self.header()?);
        }
        Ok(headers)
    }
    /// Read the body chunk-wise into a collector until the announced length
    /// has arrived. End of stream before that is an error; the partial
    /// buffer is discarded, never decoded.
    fn body(&mut self, content_length: usize) -> Result<Vec<u8>> {
        let mut collector = BodyCollector::new(content_length);
        while !collector.is_complete() {
            self.fill()?;
            if self.pos == self.len {
                return Err(self.error(&format!(
                    "expected {} more bytes",
                    collector.remaining()
                )));
            }
            let take = collector.remaining().min(self.len - self.pos);
            collector.push(&self.buffer[self.pos..self.pos + take]);
            self.pos += take;
            self.stream_position += take;
        }
        Ok(collector.into_bytes())
    }
    /// Parse the next HTTP request in the stream.
    pub fn parse(&mut self) -> Result<Request<Vec<u8>>> {
        let method = self.method()?;
        self.plus(&whitespace())?;
        let path = self.path()?;
        let query = self.query()?;
        self.plus(&whitespace())?;
        self.expects(b"HTTP/1.")?;
        self.one(&one_of(&b"01"[..]))?;
        self.crlf()?;
        let headers: HashMap<Header, String> = self.headers()?.into_iter().collect();
        self.crlf()?;

        let content_length = match headers.get(&Header::new("content-length")) {
            Some(cl_str) => match str::parse::<usize>(cl_str) {
                Ok(cl) => cl,
                Err(_) => return Err(self.error("invalid content-length")),
            },
            None => 0,
        };
        let body = if content_length == 0 {
            None
        } else {
            Some(self.body(content_length)?)
        };
        let mut request = Request {
            method,
            path,
            query,
            headers,
            body,
            content_length,
            params: Params::new(),
        };
        parse_query_params(&mut request);
        Ok(request)
    }
}

fn parse_query_params<T>(req: &mut Request<T>) {
    let pairs = req.query.split('&');
    let mut params = vec![];
    for pair in pairs {
        let parts: Vec<&str> = pair.splitn(2, '=').collect();
        if parts.len() == 2 {
            params.push((parts[0].to_string(), parts[1].to_string()));
        }
    }
    for (name, val) in params {
        req.params.add(Param::Query(name), val);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    position: usize,
    reason: String,
}

impl ParseError {
    pub fn new(position: usize, reason: &str) -> Self {
        Self {
            position,
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Error parsing request at position {}: {}",
            self.position, self.reason
        )
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::new(0, &err.to_string())
    }
}

impl From<Utf8Error> for ParseError {
    fn from(err: Utf8Error) -> Self {
        ParseError::new(0, &err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod test {
    use std::io;
    use std::str::FromStr;

    use super::*;

    pub fn make_request(
        method: &str,
        path: &str,
        query: &str,
        headers: &[(&str, &str)],
        body: Option<&[u8]>,
    ) -> Request<Vec<u8>> {
        let mut req = Request {
            method: Method::from_str(method).unwrap(),
            path: path.to_string(),
            query: query.to_string(),
            headers: headers
                .iter()
                .map(|(h, v)| (Header::new(h), v.to_string()))
                .collect(),
            content_length: body.map_or(0, |b| b.len()),
            body: body.map(|b| b.to_vec()),
            params: Params::new(),
        };
        parse_query_params(&mut req);
        req
    }

    fn test_parser(bytes: &[u8], expected: &Request<Vec<u8>>) {
        let mut parser = RequestParser::new(bytes);
        let actual = parser.parse().unwrap();
        assert_eq!(&actual, expected);
    }

    fn test_parser_error(bytes: &[u8], expected: &ParseError) {
        let mut parser = RequestParser::new(bytes);
        match parser.parse() {
            Ok(_) => panic!("should have errored"),
            Err(actual) => assert_eq!(&actual, expected),
        }
    }

    /// Read adapter delivering at most `chunk` bytes per call, so one body
    /// crosses several collector pushes.
    struct Trickle<'a> {
        data: &'a [u8],
        chunk: usize,
    }

    impl<'a> Read for Trickle<'a> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.chunk.min(self.data.len()).min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_parser_get() {
        test_parser(
            b"GET /path?p1=v1&p2=v2 HTTP/1.1\r\nHost: localhost\r\n\r\n",
            &make_request(
                "GET",
                "/path",
                "p1=v1&p2=v2",
                &[("host", "localhost")],
                None,
            ),
        )
    }

    #[test]
    fn test_parser_post() {
        test_parser(
            b"POST / HTTP/1.1\r\nHost: localhost\r\nContent-Length: 3\r\n\r\nfoo",
            &make_request(
                "POST",
                "/",
                "",
                &[("host", "localhost"), ("content-length", "3")],
                Some(&b"foo"[..]),
            ),
        )
    }

    #[test]
    fn test_parser_body_arrives_in_chunks() {
        let raw =
            b"POST /api/products HTTP/1.1\r\nHost: localhost\r\nContent-Length: 15\r\n\r\n{\"name\":\"test\"}";
        let stream = Trickle {
            data: &raw[..],
            chunk: 7,
        };
        let mut parser = RequestParser::new(stream);
        let request = parser.parse().unwrap();
        assert_eq!(request.body, Some(b"{\"name\":\"test\"}".to_vec()));
    }

    #[test]
    fn test_parser_nonsense() {
        test_parser_error(b"FOO", &ParseError::new(0, "invalid HTTP method"));
    }

    #[test]
    fn test_parser_content_length_too_long() {
        test_parser_error(
            b"GET / HTTP/1.1\r\nHost: localhost\r\nContent-Length: 10\r\n\r\nfoo",
            &ParseError::new(58, "expected 7 more bytes"),
        );
    }

    #[test]
    fn test_parser_invalid_content_length() {
        test_parser_error(
            b"GET / HTTP/1.1\r\nContent-Length: abc\r\n\r\n",
            &ParseError::new(39, "invalid content-length"),
        );
    }
}
