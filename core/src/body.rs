use std::fmt::{Debug, Formatter};
use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};

use crate::Result;

/// Boxed stream of body chunks.
pub type BodyStream = Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send + 'static>>;

/// Body of a request sent through [`HttpSend`](crate::HttpSend).
///
/// Most API calls carry no body at all. Uploads use [`Body::Stream`] so that
/// the file never has to be held in memory as a whole.
#[derive(Default)]
pub enum Body {
    /// No body.
    #[default]
    Empty,
    /// A body produced chunk by chunk.
    Stream(BodyStream),
}

impl Body {
    /// Create an empty body.
    pub fn empty() -> Self {
        Body::Empty
    }

    /// Wrap a stream of chunks as body.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = std::io::Result<Bytes>> + Send + 'static,
    {
        Body::Stream(Box::pin(stream))
    }

    /// Returns true if this body is known to carry no content.
    pub fn is_empty(&self) -> bool {
        match self {
            Body::Empty => true,
            Body::Stream(_) => false,
        }
    }

    /// Drain the body into memory.
    ///
    /// Any error yielded by the underlying stream is returned as is.
    pub async fn collect(self) -> Result<Bytes> {
        match self {
            Body::Empty => Ok(Bytes::new()),
            Body::Stream(mut stream) => {
                let mut buf = BytesMut::new();
                while let Some(chunk) = stream.next().await {
                    buf.extend_from_slice(&chunk?);
                }
                Ok(buf.freeze())
            }
        }
    }
}

impl Debug for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Body::Empty => f.write_str("Body::Empty"),
            Body::Stream(_) => f.write_str("Body::Stream"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    #[tokio::test]
    async fn test_collect_stream() {
        let body = Body::from_stream(stream::iter(vec![
            Ok(Bytes::from_static(b"hello, ")),
            Ok(Bytes::from_static(b"panda")),
        ]));
        assert!(!body.is_empty());

        let bs = body.collect().await.unwrap();
        assert_eq!(&bs[..], b"hello, panda");
    }

    #[tokio::test]
    async fn test_collect_stream_error() {
        let body = Body::from_stream(stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "file truncated",
            )),
        ]));

        let err = body.collect().await.unwrap_err();
        assert!(err.to_string().contains("file truncated"));
    }

    #[tokio::test]
    async fn test_empty_body() {
        let body = Body::default();
        assert!(body.is_empty());
        assert!(body.collect().await.unwrap().is_empty());
        assert_eq!(format!("{:?}", Body::empty()), "Body::Empty");
    }
}
