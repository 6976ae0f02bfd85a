//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: maps the URL onto a filesystem
//! path, looks the method up in the dispatch table and renders the reply.

use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use hyper::header::{HeaderValue, RANGE};
use hyper::{Request, Response};
use percent_encoding::percent_decode_str;

use super::dispatch::RequestContext;
use super::reply::Reply;
use crate::config::AppState;
use crate::http::ResponseBody;
use crate::logger;

/// Main entry point for HTTP request handling
///
/// Always produces exactly one response; failures become status codes.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<ResponseBody>, Infallible> {
    let started = Instant::now();
    let method = req.method();
    let decoded = decode_path(req.uri().path());

    let reply = match state.dispatch.get(method) {
        Some(handler) => {
            let ctx = RequestContext {
                path: resolve_fs_path(&state.config.server.root, &decoded),
                range_header: req.headers().get(RANGE).map(range_header_text),
            };
            handler.handle(&ctx).await
        }
        None => {
            logger::log_warning(&format!("Method {method} not allowed."));
            Reply::MethodNotAllowed(method.clone())
        }
    };

    let response = reply.render(&state.config.http).await;

    if state.config.logging.access_log {
        logger::log_access(method, &decoded, response.status(), started.elapsed());
    }

    Ok(response)
}

/// `Range` header value as text
///
/// Bytes outside visible ASCII are replaced rather than discarding the
/// header, so such a value still counts as present.
fn range_header_text(value: &HeaderValue) -> String {
    value.to_str().map_or_else(
        |_| String::from_utf8_lossy(value.as_bytes()).into_owned(),
        ToString::to_string,
    )
}

/// Percent-decode the path component of a request URL
///
/// The query string is never part of `uri.path()`. Invalid UTF-8 after
/// decoding is replaced rather than rejected.
pub fn decode_path(raw_path: &str) -> String {
    percent_decode_str(raw_path).decode_utf8_lossy().into_owned()
}

/// Join a decoded URL path onto the served root
///
/// The path is taken as relative to `root`; `..` segments are not filtered.
pub fn resolve_fs_path(root: &Path, decoded: &str) -> PathBuf {
    root.join(decoded.trim_start_matches('/'))
}
