//! Method dispatch table
//!
//! Maps an HTTP method onto the handler that answers it. The table is built
//! once at startup, shared read-only through `AppState`, and never mutated.
//! Methods without an entry are rejected with 405 by the router.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use hyper::Method;

use super::reply::Reply;
use super::static_files::StaticFiles;

/// Request context encapsulating information needed for request processing
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Filesystem path the request URL resolved to
    pub path: PathBuf,
    /// Raw `Range` header value, if any
    pub range_header: Option<String>,
}

/// Future returned by a [`MethodHandler`]
pub type ReplyFuture<'a> = Pin<Box<dyn Future<Output = Reply> + Send + 'a>>;

/// Handler for one HTTP method
///
/// Implementors decide the reply; they never write to the connection.
pub trait MethodHandler: Send + Sync {
    fn handle<'a>(&'a self, ctx: &'a RequestContext) -> ReplyFuture<'a>;
}

/// Immutable mapping from method to handler
#[derive(Clone, Default)]
pub struct DispatchTable {
    handlers: HashMap<Method, Arc<dyn MethodHandler>>,
}

impl DispatchTable {
    /// Create an empty table, every method is rejected
    pub fn new() -> Self {
        Self::default()
    }

    /// Table used by the server: `GET` serves files and directory listings
    pub fn standard() -> Self {
        Self::new().with(Method::GET, StaticFiles)
    }

    /// Add or replace the handler for `method`
    #[must_use]
    pub fn with(mut self, method: Method, handler: impl MethodHandler + 'static) -> Self {
        self.handlers.insert(method, Arc::new(handler));
        self
    }

    /// Look up the handler for `method`
    pub fn get(&self, method: &Method) -> Option<&dyn MethodHandler> {
        self.handlers.get(method).map(Arc::as_ref)
    }

    /// Methods that have a handler
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.handlers.keys()
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}
