//! Response body type.
//!
//! Every payload the mapping layer produces (JSON documents, error bodies,
//! downloaded attachments) is fully in memory, so [`TwinResponseBody`] is a
//! single buffered frame. An empty body is a zero-length buffer, which
//! reports end of stream immediately.

use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body::{Body, Frame, SizeHint};
use http_body_util::Full;

/// Fully buffered response body.
#[derive(Debug, Default)]
pub struct TwinResponseBody(Full<Bytes>);

impl TwinResponseBody {
    /// Create a body from bytes.
    #[must_use]
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Self(Full::new(data.into()))
    }

    /// Create an empty body for 204 responses and `OPTIONS`.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a body from a UTF-8 string.
    #[must_use]
    pub fn from_string(s: impl Into<String>) -> Self {
        Self::from_bytes(s.into())
    }
}

impl Body for TwinResponseBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Pin::new(&mut self.get_mut().0).poll_frame(cx)
    }

    fn is_end_stream(&self) -> bool {
        self.0.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.0.size_hint()
    }
}
