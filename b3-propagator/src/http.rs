//! Carriers backed by [`http::HeaderMap`], for propagating span contexts over
//! HTTP requests.
//!
//! Pair these with [`Propagator::http_headers`] so header values are
//! percent-encoded on the way out and decoded on the way in.
//!
//! ```
//! use b3_propagator::{
//!     http::{HeaderExtractor, HeaderInjector},
//!     propagation::TextMapPropagator,
//!     Propagator, SpanContext, SpanId, TraceId,
//! };
//!
//! let propagator = Propagator::http_headers();
//! let cx = SpanContext::new(TraceId::from_u64(1), SpanId::from_u64(2), SpanId::INVALID, true);
//!
//! let mut headers = http::HeaderMap::new();
//! propagator.inject_context(&cx, &mut HeaderInjector(&mut headers));
//! assert_eq!(headers["x-b3-traceid"], "1");
//!
//! assert_eq!(propagator.extract(&HeaderExtractor(&headers)), Ok(cx));
//! ```
//!
//! [`http::HeaderMap`]: ::http::HeaderMap
//! [`Propagator::http_headers`]: crate::Propagator::http_headers
use crate::propagation::{Carrier, Extractor, Injector, Visitor};
use crate::PropagationResult;
use ::http::header::{HeaderMap, HeaderName, HeaderValue};

/// Helper for injecting headers into HTTP Requests.
#[derive(Debug)]
pub struct HeaderInjector<'a>(pub &'a mut HeaderMap);

impl Injector for HeaderInjector<'_> {
    /// Set a key and value in the HeaderMap. Does nothing if the key or value are not valid inputs.
    fn set(&mut self, key: &str, value: String) {
        if let Ok(name) = HeaderName::from_bytes(key.as_bytes()) {
            if let Ok(val) = HeaderValue::from_str(&value) {
                self.0.insert(name, val);
            }
        }
    }

    fn reserve(&mut self, additional: usize) {
        self.0.reserve(additional);
    }
}

impl Carrier for HeaderInjector<'_> {
    fn as_injector(&mut self) -> Option<&mut dyn Injector> {
        Some(self)
    }
}

/// Helper for extracting headers from HTTP Requests.
#[derive(Debug)]
pub struct HeaderExtractor<'a>(pub &'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    /// Visit every header. A name with several values is visited once per
    /// value. Bytes that are not UTF-8 are replaced with `U+FFFD`, so a
    /// mangled B3 value still reaches the propagator and fails to parse.
    fn for_each_key(&self, visitor: &mut Visitor<'_>) -> PropagationResult<()> {
        self.0.iter().try_for_each(|(name, value)| {
            visitor(name.as_str(), &*String::from_utf8_lossy(value.as_bytes()))
        })
    }
}

impl Carrier for HeaderExtractor<'_> {
    fn as_extractor(&self) -> Option<&dyn Extractor> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::TextMapPropagator;
    use crate::{PropagationError, Propagator};

    #[test]
    fn http_headers_get() {
        let mut carrier = HeaderMap::new();
        HeaderInjector(&mut carrier).set("headerName", "value".to_string());

        let mut seen = Vec::new();
        HeaderExtractor(&carrier)
            .for_each_key(&mut |k, v| {
                seen.push((k.to_string(), v.to_string()));
                Ok(())
            })
            .unwrap();

        assert_eq!(seen, vec![("headername".to_string(), "value".to_string())]);
    }

    #[test]
    fn invalid_values_are_dropped() {
        let mut carrier = HeaderMap::new();
        let mut injector = HeaderInjector(&mut carrier);
        injector.set("bad header", "value".to_string());
        injector.set("x-ok", "line\nbreak".to_string());

        assert!(carrier.is_empty());
    }

    #[test]
    fn non_ascii_values_fail_to_parse() {
        for bad_key in ["x-b3-traceid", "x-b3-spanid"] {
            let mut carrier = HeaderMap::new();
            carrier.insert("x-b3-traceid", HeaderValue::from_static("4bf92f3577b34da6"));
            carrier.insert(bad_key, HeaderValue::from_bytes(b"\xfa\xfb").unwrap());

            match Propagator::http_headers().extract(&HeaderExtractor(&carrier)) {
                Err(PropagationError::Parse { key, value, .. }) => {
                    assert_eq!(key, bad_key);
                    assert_eq!(value, "\u{fffd}\u{fffd}");
                }
                other => panic!("expected parse error for {}, got {:?}", bad_key, other),
            }
        }
    }

    #[test]
    fn obs_text_values_are_visited() {
        let mut carrier = HeaderMap::new();
        carrier.insert("x-note", HeaderValue::from_bytes("caf\u{e9}".as_bytes()).unwrap());

        let mut seen = Vec::new();
        HeaderExtractor(&carrier)
            .for_each_key(&mut |k, v| {
                seen.push((k.to_string(), v.to_string()));
                Ok(())
            })
            .unwrap();

        assert_eq!(seen, vec![("x-note".to_string(), "caf\u{e9}".to_string())]);
    }

    #[test]
    fn header_carriers_expose_one_capability_each() {
        let propagator = Propagator::http_headers();
        let mut headers = HeaderMap::new();

        assert_eq!(
            propagator.extract_carrier(&HeaderInjector(&mut headers)),
            Err(PropagationError::InvalidCarrier)
        );
        assert_eq!(
            propagator.inject_carrier(&crate::SpanContext::NONE, &mut HeaderExtractor(&headers)),
            Err(PropagationError::InvalidCarrier)
        );
        assert!(headers.is_empty());
    }
}
