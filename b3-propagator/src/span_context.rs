use crate::error::ParseIdError;
use std::fmt;

/// An 8-byte value which identifies a given trace.
///
/// The id is valid if it is non-zero.
#[derive(Clone, PartialEq, Eq, Copy, Hash, Default)]
pub struct TraceId(u64);

impl TraceId {
    /// Invalid trace id
    pub const INVALID: TraceId = TraceId(0);

    /// Create a trace id from its numeric value.
    pub const fn from_u64(id: u64) -> Self {
        TraceId(id)
    }

    /// Return the numeric value of this trace id.
    pub const fn to_u64(self) -> u64 {
        self.0
    }

    /// Converts a string in base 16 to a trace id.
    ///
    /// # Examples
    ///
    /// ```
    /// use b3_propagator::TraceId;
    ///
    /// assert!(TraceId::from_hex("42").is_ok());
    /// assert!(TraceId::from_hex("4bf92f3577b34da6").is_ok());
    ///
    /// assert!(TraceId::from_hex("not_hex").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ParseIdError> {
        parse_hex_id(hex).map(TraceId)
    }
}

impl From<u64> for TraceId {
    fn from(value: u64) -> Self {
        TraceId(value)
    }
}

impl fmt::Debug for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{:016x}", self.0))
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// An 8-byte value which identifies a given span.
///
/// The id is valid if it is non-zero. A zero parent span id marks a root span.
#[derive(Clone, PartialEq, Eq, Copy, Hash, Default)]
pub struct SpanId(u64);

impl SpanId {
    /// Invalid span id
    pub const INVALID: SpanId = SpanId(0);

    /// Create a span id from its numeric value.
    pub const fn from_u64(id: u64) -> Self {
        SpanId(id)
    }

    /// Return the numeric value of this span id.
    pub const fn to_u64(self) -> u64 {
        self.0
    }

    /// Converts a string in base 16 to a span id.
    ///
    /// # Examples
    ///
    /// ```
    /// use b3_propagator::SpanId;
    ///
    /// assert!(SpanId::from_hex("42").is_ok());
    /// assert!(SpanId::from_hex("00f067aa0ba902b7").is_ok());
    ///
    /// assert!(SpanId::from_hex("not_hex").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ParseIdError> {
        parse_hex_id(hex).map(SpanId)
    }
}

impl From<u64> for SpanId {
    fn from(value: u64) -> Self {
        SpanId(value)
    }
}

impl fmt::Debug for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{:016x}", self.0))
    }
}

impl fmt::Display for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// The part of a span that travels across a process boundary.
///
/// A `SpanContext` is an immutable value: the trace it belongs to, the span
/// itself, the caller's span and whether the trace is being recorded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SpanContext {
    trace_id: TraceId,
    span_id: SpanId,
    parent_span_id: SpanId,
    sampled: bool,
}

impl SpanContext {
    /// An invalid span context
    pub const NONE: SpanContext = SpanContext {
        trace_id: TraceId::INVALID,
        span_id: SpanId::INVALID,
        parent_span_id: SpanId::INVALID,
        sampled: false,
    };

    /// Create an invalid empty span context
    pub fn empty_context() -> Self {
        SpanContext::NONE
    }

    /// Construct a new `SpanContext`
    pub fn new(trace_id: TraceId, span_id: SpanId, parent_span_id: SpanId, sampled: bool) -> Self {
        SpanContext {
            trace_id,
            span_id,
            parent_span_id,
            sampled,
        }
    }

    /// The [`TraceId`] for this span context.
    pub fn trace_id(&self) -> TraceId {
        self.trace_id
    }

    /// The [`SpanId`] for this span context.
    pub fn span_id(&self) -> SpanId {
        self.span_id
    }

    /// The [`SpanId`] of the caller, [`SpanId::INVALID`] for a root span.
    pub fn parent_span_id(&self) -> SpanId {
        self.parent_span_id
    }

    /// Returns `true` if the trace should be recorded and exported.
    pub fn is_sampled(&self) -> bool {
        self.sampled
    }

    /// Returns `true` if the span context has a non-zero trace id.
    ///
    /// Only valid span contexts are ever produced by extraction.
    pub fn is_valid(&self) -> bool {
        self.trace_id != TraceId::INVALID
    }

    /// Returns `true` if the span has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_span_id == SpanId::INVALID
    }

    /// Returns a copy of this span context with the sampled flag set to `sampled`.
    pub fn with_sampled(&self, sampled: bool) -> Self {
        SpanContext { sampled, ..*self }
    }
}

/// Parse an unsigned base 16 id. Only hex digits are allowed, so signs and
/// `0x` prefixes are rejected.
pub(crate) fn parse_hex_id(hex: &str) -> Result<u64, ParseIdError> {
    if hex.is_empty() {
        return Err(ParseIdError::Empty);
    }
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseIdError::InvalidDigit);
    }
    u64::from_str_radix(hex, 16).map_err(|_| ParseIdError::Overflow)
}
