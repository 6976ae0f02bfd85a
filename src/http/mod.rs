//! HTTP protocol layer module
//!
//! Range resolution, MIME lookup, response bodies and response builders,
//! decoupled from how a request is mapped onto the filesystem.

pub mod body;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use body::{FileRangeBody, ResponseBody};
pub use range::{resolve_range, ByteRange};
pub use response::{
    build_404_response, build_405_response, build_416_response, build_500_response,
    build_file_response, build_listing_response, build_partial_response,
};
