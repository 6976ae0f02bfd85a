//! Read-only HTTP file server with directory listings and byte-range
//! (`206 Partial Content`) support.
//!
//! Request paths are mapped onto a directory tree; `GET` returns a file, a
//! slice of it selected by the `Range` header, or a newline-separated
//! directory listing. Every other method is answered with 405.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
