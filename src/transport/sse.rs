//! Server-sent event frame reader.
//!
//! The Lenses live endpoints emit newline-delimited frames shaped
//! `data:<n><payload>`, where `<n>` is a single classification digit this
//! layer does not interpret. This is a minimal subset of SSE: no event ids,
//! no `event:` fields, no reconnection.

use crate::errors::{LensesError, LensesResult};
use bytes::BytesMut;
use futures::stream::{Stream, StreamExt};
use serde::de::DeserializeOwned;

/// Every frame starts with this prefix
pub const DATA_PREFIX: &[u8] = b"data";

/// `data:` plus the classification digit
pub const FRAME_HEADER_LEN: usize = DATA_PREFIX.len() + 2;

/// How to treat lines that do not carry the `data` prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameMode {
    /// A non-conforming line is a protocol violation
    Strict,
    /// Non-conforming lines are skipped (log tailing emits plain text lines)
    Lenient,
}

/// Extract the payload of one line, terminator already stripped.
///
/// Returns `Ok(None)` for lines that should be skipped.
pub fn frame_payload(line: &[u8], mode: FrameMode) -> LensesResult<Option<&[u8]>> {
    // Heartbeats and keep-alives
    if line.len() < FRAME_HEADER_LEN + 1 {
        return Ok(None);
    }

    if !line.starts_with(DATA_PREFIX) {
        return match mode {
            FrameMode::Strict => Err(LensesError::StreamProtocol {
                line: String::from_utf8_lossy(line).into_owned(),
            }),
            FrameMode::Lenient => Ok(None),
        };
    }

    let payload = &line[FRAME_HEADER_LEN..];
    if payload.len() < 2 {
        return Ok(None);
    }

    Ok(Some(payload))
}

/// Splits a byte stream into complete lines.
///
/// A fragment left without a terminating newline stays buffered and is
/// never returned.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buffer: BytesMut,
}

impl LineBuffer {
    /// Create an empty line buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw bytes
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Pop the next complete line without its `\n` / `\r\n` terminator
    pub fn next_line(&mut self) -> Option<BytesMut> {
        let pos = self.buffer.iter().position(|b| *b == b'\n')?;
        let mut line = self.buffer.split_to(pos + 1);
        line.truncate(pos);
        if line.last() == Some(&b'\r') {
            line.truncate(pos - 1);
        }
        Some(line)
    }

    /// Bytes of an incomplete trailing line
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

/// Read frames until the body ends, decoding each payload as `E` and handing
/// it to `handler` in arrival order.
///
/// Stops at clean end of stream (`Ok`), at the first read error, at the
/// first undecodable payload, or as soon as the handler fails.
pub async fn read_events<S, E, F>(mut body: S, mode: FrameMode, mut handler: F) -> LensesResult<()>
where
    S: Stream<Item = LensesResult<bytes::Bytes>> + Unpin,
    E: DeserializeOwned,
    F: FnMut(E) -> LensesResult<()>,
{
    let mut lines = LineBuffer::new();

    while let Some(chunk) = body.next().await {
        lines.extend(&chunk?);

        while let Some(line) = lines.next_line() {
            if let Some(payload) = frame_payload(&line, mode)? {
                let event: E = serde_json::from_slice(payload)?;
                handler(event)?;
            }
        }
    }

    if lines.pending() > 0 {
        tracing::debug!(
            pending_bytes = lines.pending(),
            "Discarding unterminated trailing line"
        );
    }

    Ok(())
}
