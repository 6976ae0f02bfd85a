//! MIME type detection module
//!
//! Returns the Content-Type for a served file based on its extension.

use std::path::Path;

/// Fallback for text replies that are not files (errors, listings)
pub const TEXT_PLAIN: &str = "text/plain";

/// Get MIME Content-Type for a file path, keyed by extension
///
/// Unknown or missing extensions map to `application/octet-stream`.
///
/// # Examples
/// ```
/// use range_serve::http::mime::content_type_for;
/// assert_eq!(content_type_for("./video.mp4".as_ref()), "video/mp4");
/// assert_eq!(content_type_for("./LICENSE".as_ref()), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        assert_eq!(content_type_for(Path::new("index.html")), "text/html");
        assert_eq!(content_type_for(Path::new("style.css")), "text/css");
        assert_eq!(content_type_for(Path::new("a/b/data.json")), "application/json");
        assert_eq!(content_type_for(Path::new("image.png")), "image/png");
        assert_eq!(content_type_for(Path::new("video.mp4")), "video/mp4");
        assert_eq!(content_type_for(Path::new("file.txt")), "text/plain");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(
            content_type_for(Path::new("blob.xyzunknown")),
            "application/octet-stream"
        );
        assert_eq!(
            content_type_for(Path::new("Makefile")),
            "application/octet-stream"
        );
    }
}
