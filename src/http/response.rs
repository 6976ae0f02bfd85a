//! HTTP response building module
//!
//! Provides builders for each status code the server emits, decoupled from
//! the decision of which one is owed.

use hyper::header::{
    HeaderValue, ACCEPT_RANGES, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE,
};
use hyper::{Method, Response, StatusCode};

use super::body::{text_body, ResponseBody};
use super::mime::TEXT_PLAIN;
use super::range::ByteRange;

pub const NOT_FOUND_MESSAGE: &str = "File not found";
pub const NOT_SATISFIABLE_MESSAGE: &str = "Requested range not satisfiable";

/// Build a plain-text response with the given status
pub fn build_text_response(status: StatusCode, text: String) -> Response<ResponseBody> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, TEXT_PLAIN)
        .body(text_body(text.clone()))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            fallback(status, text)
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<ResponseBody> {
    build_text_response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string())
}

/// Build 405 Method Not Allowed response naming the rejected method
pub fn build_405_response(method: &Method) -> Response<ResponseBody> {
    build_text_response(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("Method {method} not allowed."),
    )
}

/// Build 500 Internal Server Error response carrying the error description
pub fn build_500_response(error: &impl std::fmt::Display) -> Response<ResponseBody> {
    build_text_response(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
}

/// Build 200 directory listing response, one entry name per line
pub fn build_listing_response(entries: &[String]) -> Response<ResponseBody> {
    build_text_response(StatusCode::OK, entries.join("\n"))
}

/// Build 416 Range Not Satisfiable response
pub fn build_416_response(file_size: u64) -> Response<ResponseBody> {
    let status = StatusCode::RANGE_NOT_SATISFIABLE;
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, TEXT_PLAIN)
        .header(CONTENT_RANGE, format!("bytes */{file_size}"))
        .body(text_body(NOT_SATISFIABLE_MESSAGE))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            fallback(status, NOT_SATISFIABLE_MESSAGE.to_string())
        })
}

/// Build 200 response streaming a whole file
pub fn build_file_response(
    body: ResponseBody,
    content_type: &str,
    file_size: u64,
) -> Response<ResponseBody> {
    let mut response = Response::new(body);
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, header_value(content_type));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(file_size));
    headers.insert(ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    response
}

/// Build 206 Partial Content response
///
/// `Content-Length` is always the range length; hyper frames the message by it.
pub fn build_partial_response(
    body: ResponseBody,
    content_type: &str,
    range: ByteRange,
    file_size: u64,
) -> Response<ResponseBody> {
    let mut response = Response::new(body);
    *response.status_mut() = StatusCode::PARTIAL_CONTENT;
    let headers = response.headers_mut();
    headers.insert(CONTENT_RANGE, header_value(&range.content_range(file_size)));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(range.length()));
    headers.insert(CONTENT_TYPE, header_value(content_type));
    headers.insert(ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response
}

fn header_value(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|e| {
        crate::logger::log_warning(&format!("Invalid header value '{value}': {e}"));
        HeaderValue::from_static("application/octet-stream")
    })
}

fn fallback(status: StatusCode, text: String) -> Response<ResponseBody> {
    let mut response = Response::new(text_body(text));
    *response.status_mut() = status;
    response
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
