//! Static file serving module
//!
//! The `GET` handler: stats the resolved path and decides between a
//! directory listing, the whole file, a byte range of it, or an error.

use std::fs::Metadata;
use std::io;
use std::path::Path;

use tokio::fs;

use super::dispatch::{MethodHandler, ReplyFuture, RequestContext};
use super::reply::Reply;
use crate::http::{mime, resolve_range};
use crate::logger;

/// Snapshot of the metadata the decision depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceStat {
    pub is_directory: bool,
    pub size: u64,
}

impl From<&Metadata> for ResourceStat {
    fn from(metadata: &Metadata) -> Self {
        Self {
            is_directory: metadata.is_dir(),
            size: metadata.len(),
        }
    }
}

/// Serves files and directory listings below the configured root
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFiles;

impl MethodHandler for StaticFiles {
    fn handle<'a>(&'a self, ctx: &'a RequestContext) -> ReplyFuture<'a> {
        Box::pin(serve_path(&ctx.path, ctx.range_header.as_deref()))
    }
}

/// Stat `path` and decide the reply
pub async fn serve_path(path: &Path, range_header: Option<&str>) -> Reply {
    let stat = match fs::metadata(path).await {
        Ok(metadata) => ResourceStat::from(&metadata),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Reply::NotFound,
        Err(e) => {
            logger::log_error(&format!("Failed to stat '{}': {e}", path.display()));
            return Reply::Failed(e.to_string());
        }
    };

    if stat.is_directory {
        return list_directory(path).await;
    }

    decide_file_reply(path, stat.size, range_header)
}

/// Choose between 200, 206 and 416 for a regular file of `size` bytes
pub fn decide_file_reply(path: &Path, size: u64, range_header: Option<&str>) -> Reply {
    let content_type = mime::content_type_for(path);

    match resolve_range(range_header, size) {
        None => Reply::File {
            path: path.to_path_buf(),
            content_type,
            size,
        },
        Some(range) if !range.is_satisfiable(size) => Reply::NotSatisfiable { size },
        Some(range) => Reply::Partial {
            path: path.to_path_buf(),
            content_type,
            range,
            size,
        },
    }
}

/// Read entry names in the order the filesystem returns them
async fn list_directory(path: &Path) -> Reply {
    match read_entry_names(path).await {
        Ok(names) => Reply::Listing(names),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read directory '{}': {e}",
                path.display()
            ));
            Reply::Failed(e.to_string())
        }
    }
}

async fn read_entry_names(path: &Path) -> io::Result<Vec<String>> {
    let mut entries = fs::read_dir(path).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}
