use thiserror::Error;

/// Why a header value could not be read as a 64-bit hex id.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseIdError {
    /// The value was empty.
    #[error("empty id")]
    Empty,
    /// The value holds something other than hex digits, including a sign.
    #[error("invalid hex digit in id")]
    InvalidDigit,
    /// The value does not fit in 64 bits.
    #[error("id does not fit in 64 bits")]
    Overflow,
}

/// Errors returned when injecting into or extracting from a carrier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PropagationError {
    /// The carrier does not support the operation that was requested of it,
    /// for example a read-only carrier passed to an inject call.
    ///
    /// This is a wiring bug in the caller and retrying will not help.
    #[error("carrier does not support the requested operation")]
    InvalidCarrier,

    /// The carrier holds no usable span context.
    ///
    /// This is the normal outcome for a request that starts a new trace.
    #[error("span context not found in carrier")]
    SpanContextNotFound,

    /// A B3 header was present but its value is not a 64-bit hex number.
    #[error("invalid value {value:?} for header {key:?}")]
    Parse {
        /// Header name as it appeared in the carrier.
        key: String,
        /// Header value as it appeared in the carrier, before decoding.
        value: String,
        /// What was wrong with the decoded value.
        #[source]
        source: ParseIdError,
    },
}

impl PropagationError {
    /// Returns `true` if the carrier simply held no span context.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PropagationError::SpanContextNotFound)
    }
}

/// Describes the result of a propagation operation.
pub type PropagationResult<T> = Result<T, PropagationError>;
