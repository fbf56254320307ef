//! Request options: ordered transformations applied to an outgoing request.

use crate::errors::{LensesError, LensesResult};
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::Request;

/// A transformation applied to an outgoing request before it is sent.
///
/// Options run in order; the first one that fails aborts the send.
pub trait RequestOption: Send + Sync {
    /// Apply this option to the request
    fn apply(&self, request: &mut Request<Bytes>) -> LensesResult<()>;
}

impl<F> RequestOption for F
where
    F: Fn(&mut Request<Bytes>) -> LensesResult<()> + Send + Sync,
{
    fn apply(&self, request: &mut Request<Bytes>) -> LensesResult<()> {
        self(request)
    }
}

/// Sets (replacing) a single header
#[derive(Debug, Clone)]
pub struct HeaderOption {
    name: HeaderName,
    value: HeaderValue,
}

impl HeaderOption {
    /// Create a header option, validating name and value
    pub fn new(name: &str, value: &str) -> LensesResult<Self> {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            LensesError::Configuration {
                message: format!("Invalid header name {:?}: {}", name, e),
            }
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| LensesError::Configuration {
            message: format!("Invalid value for header {}: {}", name, e),
        })?;
        Ok(Self { name, value })
    }
}

impl RequestOption for HeaderOption {
    fn apply(&self, request: &mut Request<Bytes>) -> LensesResult<()> {
        request
            .headers_mut()
            .insert(self.name.clone(), self.value.clone());
        Ok(())
    }
}

/// Appends query parameters to the request URI
#[derive(Debug, Clone, Default)]
pub struct QueryOption {
    pairs: Vec<(String, String)>,
}

impl QueryOption {
    /// Create an empty query option
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// True when no parameter was added
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl RequestOption for QueryOption {
    fn apply(&self, request: &mut Request<Bytes>) -> LensesResult<()> {
        if self.pairs.is_empty() {
            return Ok(());
        }

        let mut url = url::Url::parse(&request.uri().to_string())?;
        url.query_pairs_mut()
            .extend_pairs(self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        *request.uri_mut() = url.as_str().parse().map_err(|e| LensesError::Configuration {
            message: format!("Invalid request URI {}: {}", url, e),
        })?;
        Ok(())
    }
}

/// Apply options in order, stopping at the first failure
pub(crate) fn apply_all<'a>(
    request: &mut Request<Bytes>,
    options: impl IntoIterator<Item = &'a dyn RequestOption>,
) -> LensesResult<()> {
    for option in options {
        option.apply(request)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request() -> Request<Bytes> {
        Request::builder()
            .uri("http://localhost:9991/api/topics")
            .body(Bytes::new())
            .unwrap()
    }

    #[test]
    fn test_header_option() {
        let mut req = request();
        HeaderOption::new("x-request-id", "abc")
            .unwrap()
            .apply(&mut req)
            .unwrap();
        assert_eq!(req.headers().get("x-request-id").unwrap(), "abc");
    }

    #[test]
    fn test_header_option_rejects_invalid_name() {
        assert!(HeaderOption::new("bad header", "x").is_err());
        assert!(HeaderOption::new("x-ok", "line\nbreak").is_err());
    }

    #[test]
    fn test_query_option() {
        let mut req = request();
        QueryOption::new()
            .param("pageSize", 10)
            .param("q", "a b")
            .apply(&mut req)
            .unwrap();
        assert_eq!(
            req.uri().to_string(),
            "http://localhost:9991/api/topics?pageSize=10&q=a+b"
        );
    }

    #[test]
    fn test_apply_all_is_ordered_and_fails_fast() {
        let calls = AtomicUsize::new(0);
        let first = |req: &mut Request<Bytes>| -> LensesResult<()> {
            req.headers_mut().insert("x-order", HeaderValue::from_static("first"));
            Ok(())
        };
        let failing = |_: &mut Request<Bytes>| -> LensesResult<()> {
            Err(LensesError::validation("rejected"))
        };
        let never = |_: &mut Request<Bytes>| -> LensesResult<()> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        };

        let mut req = request();
        let options: [&dyn RequestOption; 3] = [&first, &failing, &never];
        let result = apply_all(&mut req, options);

        assert!(matches!(result, Err(LensesError::Validation { .. })));
        assert_eq!(req.headers().get("x-order").unwrap(), "first");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
