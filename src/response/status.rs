//! Default reason phrases for HTTP status codes.

/// Reason phrase for the codes this service emits, with a generic fallback.
pub fn default(status_code: u16) -> String {
    match status_code {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        _ => "Unknown",
    }
    .to_string()
}
