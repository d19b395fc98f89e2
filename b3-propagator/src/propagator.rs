//! # B3 Propagator
//!
//! The `Propagator` moves a [`SpanContext`] across process boundaries using
//! the B3 multiple-header encoding:
//!
//! ```text
//! X-B3-TraceId: {trace_id}
//! X-B3-ParentSpanId: {parent_span_id}
//! X-B3-SpanId: {span_id}
//! X-B3-Sampled: 1
//! ```
//!
//! Headers are written lower case and matched case-insensitively on extract.
use crate::{
    config,
    propagation::{Extractor, FieldIter, Injector, TextMapPropagator, ValueEncoding},
    span_context::parse_hex_id,
    PropagationError, PropagationResult, SpanContext, SpanId, TraceId,
};

/// HTTP uses X-B3-$name while gRPC uses x-b3-$name. Headers are written lower
/// case since the propagator cannot tell which protocol the carrier is for.
const B3_TRACE_ID_HEADER: &str = "x-b3-traceid";
const B3_SPAN_ID_HEADER: &str = "x-b3-spanid";
const B3_PARENT_SPAN_ID_HEADER: &str = "x-b3-parentspanid";
const B3_SAMPLED_HEADER: &str = "x-b3-sampled";

const B3_SAMPLED_VALUE: &str = "1";

static B3_FIELDS: [&str; 4] = [
    B3_TRACE_ID_HEADER,
    B3_SPAN_ID_HEADER,
    B3_PARENT_SPAN_ID_HEADER,
    B3_SAMPLED_HEADER,
];

/// Extracts and injects `SpanContext`s into `Extractor`s or `Injector`s using
/// the B3 multiple-header format.
///
/// The propagator itself is stateless, so a single instance can be shared by
/// every request on every thread.
#[derive(Clone, Debug, Default)]
pub struct Propagator {
    value_encoding: ValueEncoding,
}

impl Propagator {
    /// Create a new `Propagator` that writes and reads header values verbatim.
    pub fn new() -> Self {
        Propagator::default()
    }

    /// Create a new `Propagator` that percent-encodes header values, for
    /// carriers backed by HTTP headers.
    pub fn http_headers() -> Self {
        Propagator::with_value_encoding(ValueEncoding::HttpHeader)
    }

    /// Create a new `Propagator` that uses `value_encoding` for header values.
    pub fn with_value_encoding(value_encoding: ValueEncoding) -> Self {
        Propagator { value_encoding }
    }

    /// Create a new `Propagator` configured from the environment.
    ///
    /// `OTEL_PROPAGATOR_B3_VALUE_ENCODING` selects the value encoding
    /// (`plain` or `http_headers`). Unset, empty or unknown values fall back
    /// to `plain`.
    pub fn from_env() -> Self {
        Propagator::with_value_encoding(config::value_encoding())
    }

    /// The encoding applied to header values.
    pub fn value_encoding(&self) -> ValueEncoding {
        self.value_encoding
    }

    fn encode_id(&self, id: u64) -> String {
        self.value_encoding.encode(&format!("{:x}", id)).into_owned()
    }

    /// Decode and parse a hex id header value.
    fn extract_id(&self, key: &str, value: &str) -> PropagationResult<u64> {
        parse_hex_id(&self.value_encoding.decode(value)).map_err(|source| {
            b3_debug!(
                name: "B3Propagator.Extract.InvalidValue",
                message = "B3 header value is not a 64-bit hex id",
                key = key,
                value = value,
            );
            PropagationError::Parse {
                key: key.to_string(),
                value: value.to_string(),
                source,
            }
        })
    }
}

impl TextMapPropagator for Propagator {
    /// Properly encodes the values of the `SpanContext` and injects them into
    /// the `Injector`. `x-b3-sampled` is left out for unsampled contexts.
    fn inject_context(&self, cx: &SpanContext, injector: &mut dyn Injector) {
        injector.reserve(B3_FIELDS.len());
        injector.set(B3_TRACE_ID_HEADER, self.encode_id(cx.trace_id().to_u64()));
        injector.set(
            B3_PARENT_SPAN_ID_HEADER,
            self.encode_id(cx.parent_span_id().to_u64()),
        );
        injector.set(B3_SPAN_ID_HEADER, self.encode_id(cx.span_id().to_u64()));
        if cx.is_sampled() {
            injector.set(
                B3_SAMPLED_HEADER,
                self.value_encoding.encode(B3_SAMPLED_VALUE).into_owned(),
            );
        }
    }

    /// Retrieves a `SpanContext` from the B3 headers of the `Extractor`.
    ///
    /// Unrelated keys are ignored. The first malformed id aborts extraction
    /// with [`PropagationError::Parse`]. A missing or zero trace id yields
    /// [`PropagationError::SpanContextNotFound`].
    fn extract(&self, extractor: &dyn Extractor) -> PropagationResult<SpanContext> {
        let mut trace_id = 0;
        let mut span_id = 0;
        let mut parent_span_id = 0;
        let mut sampled = false;

        extractor.for_each_key(&mut |raw_key: &str, value: &str| {
            let key = raw_key.to_ascii_lowercase();
            match key.as_str() {
                B3_TRACE_ID_HEADER => trace_id = self.extract_id(raw_key, value)?,
                B3_PARENT_SPAN_ID_HEADER => parent_span_id = self.extract_id(raw_key, value)?,
                B3_SPAN_ID_HEADER => span_id = self.extract_id(raw_key, value)?,
                // any value counts, only presence is checked
                B3_SAMPLED_HEADER => sampled = true,
                _ => {}
            }
            Ok(())
        })?;

        if trace_id == 0 {
            b3_debug!(name: "B3Propagator.Extract.NotFound");
            return Err(PropagationError::SpanContextNotFound);
        }

        Ok(SpanContext::new(
            TraceId::from_u64(trace_id),
            SpanId::from_u64(span_id),
            SpanId::from_u64(parent_span_id),
            sampled,
        ))
    }

    fn fields(&self) -> FieldIter<'_> {
        FieldIter::new(&B3_FIELDS)
    }
}
