//! Pass-through response recorder.
//!
//! Wraps an outbound response so middleware can learn the final status code
//! and the number of body bytes actually handed to the connection. The
//! response itself is forwarded untouched: no buffering, no retries.
//!
//! The byte count is only final once the body has been streamed, so the
//! observation is delivered through a completion callback. It fires exactly
//! once, either at end of stream or when the body is dropped early (client
//! disconnect, handler abort).

use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::Response;
use hyper::body::{Body as HttpBody, Bytes, Frame, SizeHint};

/// Outcome of one request as seen on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedResponse {
    status: StatusCode,
    bytes_written: u64,
}

impl RecordedResponse {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            bytes_written: 0,
        }
    }

    /// Store the last status explicitly set.
    pub fn write_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Account for bytes accepted by the underlying channel.
    pub fn record_write(&mut self, accepted: usize) {
        self.bytes_written += accepted as u64;
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl Default for RecordedResponse {
    fn default() -> Self {
        Self::new()
    }
}

type OnComplete = Box<dyn FnOnce(RecordedResponse) + Send + 'static>;

/// A response body that counts the data frames passing through it.
pub struct RecordingBody<B> {
    inner: B,
    recorded: RecordedResponse,
    on_complete: Option<OnComplete>,
}

impl<B> RecordingBody<B> {
    pub fn new<F>(inner: B, recorded: RecordedResponse, on_complete: F) -> Self
    where
        F: FnOnce(RecordedResponse) + Send + 'static,
    {
        Self {
            inner,
            recorded,
            on_complete: Some(Box::new(on_complete)),
        }
    }

    fn complete(&mut self) {
        if let Some(on_complete) = self.on_complete.take() {
            on_complete(self.recorded);
        }
    }
}

impl<B> HttpBody for RecordingBody<B>
where
    B: HttpBody<Data = Bytes> + Unpin,
{
    type Data = Bytes;
    type Error = B::Error;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = &mut *self;
        match Pin::new(&mut this.inner).poll_frame(cx) {
            Poll::Ready(Some(Ok(frame))) => {
                if let Some(data) = frame.data_ref() {
                    this.recorded.record_write(data.len());
                }
                Poll::Ready(Some(Ok(frame)))
            }
            Poll::Ready(None) => {
                this.complete();
                Poll::Ready(None)
            }
            other => other,
        }
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

impl<B> Drop for RecordingBody<B> {
    fn drop(&mut self) {
        self.complete();
    }
}

/// Wrap `response` in a fresh recorder.
///
/// `on_complete` receives the final status and byte count once the body is
/// done. Headers, status and payload reach the client unchanged.
pub fn record<F>(response: Response, on_complete: F) -> Response
where
    F: FnOnce(RecordedResponse) + Send + 'static,
{
    let (parts, body) = response.into_parts();
    let mut recorded = RecordedResponse::new();
    recorded.write_status(parts.status);
    Response::from_parts(parts, Body::new(RecordingBody::new(body, recorded, on_complete)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use http_body_util::BodyExt;
    use std::convert::Infallible;
    use std::sync::{Arc, Mutex};

    type Slot = Arc<Mutex<Vec<RecordedResponse>>>;

    fn collector() -> (Slot, impl FnOnce(RecordedResponse) + Send + 'static) {
        let slot: Slot = Arc::default();
        let sink = slot.clone();
        (slot, move |recorded| sink.lock().unwrap().push(recorded))
    }

    #[test]
    fn test_defaults_to_ok() {
        let recorded = RecordedResponse::default();
        assert_eq!(recorded.status(), StatusCode::OK);
        assert_eq!(recorded.bytes_written(), 0);
    }

    #[test]
    fn test_last_status_wins() {
        let mut recorded = RecordedResponse::new();
        recorded.write_status(StatusCode::NOT_FOUND);
        recorded.write_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(recorded.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_counts_bytes_across_writes() {
        let chunks = ["hello", " ", "world", "", "!!"];
        let body = Body::from_stream(stream::iter(
            chunks.into_iter().map(|c| Ok::<_, Infallible>(Bytes::from(c))),
        ));
        let (slot, on_complete) = collector();

        let response = record(Response::new(body), on_complete);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        assert_eq!(&bytes[..], b"hello world!!");
        let recorded = slot.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].bytes_written(), 13);
        assert_eq!(recorded[0].status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_status_and_bytes() {
        let response = Response::builder()
            .status(StatusCode::CREATED)
            .body(Body::from("payload"))
            .unwrap();
        let (slot, on_complete) = collector();

        let response = record(response, on_complete);
        assert_eq!(response.status(), StatusCode::CREATED);
        response.into_body().collect().await.unwrap();

        let recorded = slot.lock().unwrap();
        assert_eq!(recorded[0].status(), StatusCode::CREATED);
        assert_eq!(recorded[0].bytes_written(), 7);
    }

    #[tokio::test]
    async fn test_completes_once_on_drop() {
        let (slot, on_complete) = collector();
        let response = record(Response::new(Body::from("unsent")), on_complete);
        drop(response);

        let recorded = slot.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].bytes_written(), 0);
    }

    #[tokio::test]
    async fn test_error_is_propagated() {
        let body = Body::from_stream(stream::iter(vec![
            Ok(Bytes::from_static(b"abc")),
            Err(std::io::Error::other("disk gone")),
        ]));
        let (slot, on_complete) = collector();

        let response = record(Response::new(body), on_complete);
        assert!(response.into_body().collect().await.is_err());

        let recorded = slot.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].bytes_written(), 3);
    }
}
