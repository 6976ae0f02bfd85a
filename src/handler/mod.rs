//! Request handler module
//!
//! Responsible for method dispatch and for deciding which reply a request is
//! owed. Only `GET` is registered; it serves files and directory listings.

pub mod dispatch;
pub mod reply;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use dispatch::{DispatchTable, MethodHandler, RequestContext};
pub use reply::Reply;
pub use router::handle_request;
