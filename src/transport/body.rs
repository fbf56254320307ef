//! Gzip-aware response body reader.

use crate::errors::{LensesError, LensesResult};
use crate::transport::http_transport::ByteStream;
use bytes::{Bytes, BytesMut};
use flate2::write::GzDecoder;
use futures::stream::{Stream, StreamExt};
use http::header::CONTENT_ENCODING;
use http::HeaderMap;
use std::io::Write;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A response body that transparently decompresses gzip payloads.
///
/// Yields decompressed chunks. Field order matters: the decoder is dropped
/// before the raw stream it reads from.
pub struct ResponseBody {
    decoder: Option<GzDecoder<Vec<u8>>>,
    inner: ByteStream,
    finished: bool,
}

impl ResponseBody {
    /// Wrap a raw body, installing a decoder when `Content-Encoding` says gzip
    pub fn new(headers: &HeaderMap, inner: ByteStream) -> Self {
        let gzip = headers
            .get_all(CONTENT_ENCODING)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .any(|v| v.trim().eq_ignore_ascii_case("gzip"));

        Self {
            decoder: gzip.then(|| GzDecoder::new(Vec::new())),
            inner,
            finished: false,
        }
    }

    /// Wrap a body that is known not to be compressed
    pub fn identity(inner: ByteStream) -> Self {
        Self {
            decoder: None,
            inner,
            finished: false,
        }
    }

    /// True when the body is being gunzipped
    pub fn is_gzip(&self) -> bool {
        self.decoder.is_some()
    }

    /// Read the whole body into memory, consuming (and so releasing) it
    pub async fn read_all(mut self) -> LensesResult<Bytes> {
        let mut buffer = BytesMut::new();
        while let Some(chunk) = self.next().await {
            buffer.extend_from_slice(&chunk?);
        }
        Ok(buffer.freeze())
    }

    fn decode(decoder: &mut GzDecoder<Vec<u8>>, chunk: &[u8]) -> LensesResult<Bytes> {
        decoder
            .write_all(chunk)
            .and_then(|_| decoder.flush())
            .map_err(LensesError::Decompression)?;
        Ok(Bytes::from(std::mem::take(decoder.get_mut())))
    }

    fn finish(decoder: &mut GzDecoder<Vec<u8>>) -> LensesResult<Bytes> {
        decoder.try_finish().map_err(LensesError::Decompression)?;
        Ok(Bytes::from(std::mem::take(decoder.get_mut())))
    }
}

impl Stream for ResponseBody {
    type Item = LensesResult<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if this.finished {
                return Poll::Ready(None);
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => match this.decoder.as_mut() {
                    None => return Poll::Ready(Some(Ok(chunk))),
                    Some(decoder) => match Self::decode(decoder, &chunk) {
                        // Gzip header bytes only; keep reading
                        Ok(out) if out.is_empty() => continue,
                        Ok(out) => return Poll::Ready(Some(Ok(out))),
                        Err(e) => {
                            this.finished = true;
                            return Poll::Ready(Some(Err(e)));
                        }
                    },
                },
                Poll::Ready(Some(Err(e))) => {
                    this.finished = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    this.finished = true;
                    if let Some(decoder) = this.decoder.as_mut() {
                        match Self::finish(decoder) {
                            Ok(out) if out.is_empty() => return Poll::Ready(None),
                            Ok(out) => return Poll::Ready(Some(Ok(out))),
                            Err(e) => return Poll::Ready(Some(Err(e))),
                        }
                    }
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

impl std::fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseBody")
            .field("gzip", &self.is_gzip())
            .field("finished", &self.finished)
            .finish()
    }
}
