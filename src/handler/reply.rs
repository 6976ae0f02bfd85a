//! Reply value
//!
//! A [`Reply`] is the decision a handler reaches for one request: which
//! status is owed and where the body comes from. Turning it into bytes on the
//! wire (opening the file, setting headers) happens in [`Reply::render`], so
//! the decision itself can be inspected without touching a socket.

use std::path::PathBuf;

use hyper::{Method, Response};

use crate::config::HttpConfig;
use crate::http::{self, ByteRange, FileRangeBody, ResponseBody};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// 405, no handler for the method
    MethodNotAllowed(Method),
    /// 404, path does not exist
    NotFound,
    /// 500, body is the error description
    Failed(String),
    /// 200, directory entry names in listing order
    Listing(Vec<String>),
    /// 200, whole file
    File {
        path: PathBuf,
        content_type: String,
        size: u64,
    },
    /// 206, bounded slice of a file
    Partial {
        path: PathBuf,
        content_type: String,
        range: ByteRange,
        size: u64,
    },
    /// 416, range falls outside the file
    NotSatisfiable { size: u64 },
}

impl Reply {
    #[cfg(test)]
    pub const fn status(&self) -> hyper::StatusCode {
        use hyper::StatusCode;

        match self {
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Listing(_) | Self::File { .. } => StatusCode::OK,
            Self::Partial { .. } => StatusCode::PARTIAL_CONTENT,
            Self::NotSatisfiable { .. } => StatusCode::RANGE_NOT_SATISFIABLE,
        }
    }

    /// Build the HTTP response, opening file streams as needed
    ///
    /// A file that can no longer be opened turns into a 500.
    pub async fn render(self, config: &HttpConfig) -> Response<ResponseBody> {
        match self {
            Self::MethodNotAllowed(method) => http::build_405_response(&method),
            Self::NotFound => http::build_404_response(),
            Self::Failed(message) => http::build_500_response(&message),
            Self::Listing(entries) => http::build_listing_response(&entries),
            Self::NotSatisfiable { size } => http::build_416_response(size),
            Self::File {
                path,
                content_type,
                size,
            } => match FileRangeBody::open(&path, 0, size, config.chunk_size).await {
                Ok(body) => http::build_file_response(body.boxed(), &content_type, size),
                Err(e) => open_failed(&path, &e),
            },
            Self::Partial {
                path,
                content_type,
                range,
                size,
            } => {
                let length = range.length();
                match FileRangeBody::open(&path, range.start, length, config.chunk_size).await {
                    Ok(body) => {
                        http::build_partial_response(body.boxed(), &content_type, range, size)
                    }
                    Err(e) => open_failed(&path, &e),
                }
            }
        }
    }
}

fn open_failed(path: &std::path::Path, error: &std::io::Error) -> Response<ResponseBody> {
    crate::logger::log_error(&format!("Failed to open '{}': {error}", path.display()));
    http::build_500_response(error)
}
