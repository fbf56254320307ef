//! HTTP transport layer for the Lenses API.
//!
//! - `http_transport`: the one-round-trip [`HttpTransport`] seam and its reqwest implementation
//! - `options`: ordered request transformations
//! - `response`: the success predicate and error-body interpretation
//! - `body`: gzip-transparent body reading
//! - `sse`: the `data:<n><payload>` frame reader used by live endpoints

mod body;
mod http_transport;
mod options;
mod response;
mod sse;

pub use body::ResponseBody;
pub use http_transport::{
    ByteStream, HttpTransport, ReqwestTransport, TransportResponse, TransportSettings,
};
pub use options::{HeaderOption, QueryOption, RequestOption};
pub use response::{
    content_type, is_html, is_json, is_success, unescape_uri, Response, CONTENT_TYPE_JSON,
    CONTENT_TYPE_SCHEMA_JSON,
};
pub use sse::{frame_payload, read_events, FrameMode, LineBuffer, DATA_PREFIX, FRAME_HEADER_LEN};

pub(crate) use options::apply_all;
pub(crate) use response::resource_error;
