//! Response body types
//!
//! Text replies are held in memory. File replies are pulled lazily from an
//! open file handle that is bounded to the requested byte interval and closed
//! as soon as the body is exhausted or dropped (e.g. on client disconnect).

use std::convert::Infallible;
use std::io::{self, SeekFrom};
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};

use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes, Frame, SizeHint};
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeekExt, ReadBuf, Take};

/// Type-erased body shared by every reply
pub type ResponseBody = UnsyncBoxBody<Bytes, io::Error>;

/// Create a [`ResponseBody`] from a string
pub fn text_body(text: impl Into<String>) -> ResponseBody {
    Full::new(Bytes::from(text.into()))
        .map_err(|never: Infallible| match never {})
        .boxed_unsync()
}

/// File content limited to `length` bytes starting at a byte offset
pub struct FileRangeBody {
    reader: Take<File>,
    buffer: Box<[u8]>,
    remaining: u64,
}

impl FileRangeBody {
    /// Open `path`, seek to `start` and prepare to stream `length` bytes
    pub async fn open(
        path: &Path,
        start: u64,
        length: u64,
        chunk_size: usize,
    ) -> io::Result<Self> {
        let mut file = File::open(path).await?;
        if start > 0 {
            file.seek(SeekFrom::Start(start)).await?;
        }

        Ok(Self {
            reader: file.take(length),
            buffer: vec![0; chunk_size.max(1)].into_boxed_slice(),
            remaining: length,
        })
    }

    /// Erase the concrete type
    pub fn boxed(self) -> ResponseBody {
        BodyExt::boxed_unsync(self)
    }
}

impl Body for FileRangeBody {
    type Data = Bytes;
    type Error = io::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Bytes>, io::Error>>> {
        let this = self.get_mut();
        if this.remaining == 0 {
            return Poll::Ready(None);
        }

        let mut read_buf = ReadBuf::new(&mut this.buffer);
        match Pin::new(&mut this.reader).poll_read(cx, &mut read_buf) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Err(e)) => Poll::Ready(Some(Err(e))),
            Poll::Ready(Ok(())) => {
                let filled = read_buf.filled();
                if filled.is_empty() {
                    // File shrank after it was stat'ed
                    this.remaining = 0;
                    return Poll::Ready(None);
                }
                let n = u64::try_from(filled.len()).unwrap_or(this.remaining);
                this.remaining = this.remaining.saturating_sub(n);
                Poll::Ready(Some(Ok(Frame::data(Bytes::copy_from_slice(filled)))))
            }
        }
    }

    fn is_end_stream(&self) -> bool {
        self.remaining == 0
    }

    // Upper bound only: the Content-Length header is authoritative on the wire
    fn size_hint(&self) -> SizeHint {
        let mut hint = SizeHint::new();
        hint.set_upper(self.remaining);
        hint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fixture(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    async fn collect(body: FileRangeBody) -> Bytes {
        body.collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_streams_requested_slice() {
        let file = fixture(b"0123456789");
        let body = FileRangeBody::open(file.path(), 3, 4, 2).await.unwrap();
        assert_eq!(collect(body).await, Bytes::from_static(b"3456"));
    }

    #[tokio::test]
    async fn test_single_byte() {
        let file = fixture(b"0123456789");
        let body = FileRangeBody::open(file.path(), 9, 1, 64).await.unwrap();
        assert_eq!(collect(body).await, Bytes::from_static(b"9"));
    }

    #[tokio::test]
    async fn test_stops_at_end_of_file() {
        let file = fixture(b"abc");
        let body = FileRangeBody::open(file.path(), 1, 100, 64).await.unwrap();
        assert_eq!(collect(body).await, Bytes::from_static(b"bc"));
    }

    #[tokio::test]
    async fn test_size_hint_is_upper_bound() {
        let file = fixture(b"abc");
        let body = FileRangeBody::open(file.path(), 0, 3, 64).await.unwrap();
        let hint = body.size_hint();
        assert_eq!(hint.lower(), 0);
        assert_eq!(hint.upper(), Some(3));
    }

    #[tokio::test]
    async fn test_dropped_before_exhaustion_releases_file() {
        // Close the fixture's own handle so only the body holds the file
        let path = fixture(&[7u8; 64]).into_temp_path();
        let mut body = FileRangeBody::open(&path, 0, 64, 8).await.unwrap();

        let frame = body.frame().await.unwrap().unwrap();
        assert_eq!(frame.into_data().unwrap().len(), 8);
        assert!(!body.is_end_stream());
        drop(body);

        #[cfg(target_os = "linux")]
        {
            let target = path.canonicalize().unwrap();
            let still_open = std::fs::read_dir("/proc/self/fd")
                .unwrap()
                .filter_map(|entry| std::fs::read_link(entry.ok()?.path()).ok())
                .any(|link| link == target);
            assert!(!still_open);
        }
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let err = FileRangeBody::open(Path::new("/definitely/not/here"), 0, 1, 64)
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_text_body() {
        let body = text_body("File not found");
        let bytes = body.collect().await.unwrap().to_bytes();
        assert_eq!(bytes, Bytes::from_static(b"File not found"));
    }
}
