//! Propagates trace context across process boundaries using the [B3]
//! multiple-header format.
//!
//! A [`Propagator`] writes a [`SpanContext`] into an outgoing carrier (request
//! headers, RPC metadata, message headers) and reads one back out of an
//! incoming carrier so the receiving side can continue the trace. Four
//! headers are used:
//!
//! ```text
//! x-b3-traceid:      {trace_id}
//! x-b3-parentspanid: {parent_span_id}
//! x-b3-spanid:       {span_id}
//! x-b3-sampled:      1
//! ```
//!
//! Ids are 64-bit and written as lower-case hex. `x-b3-sampled` is only
//! written for sampled contexts; its absence means "not sampled".
//!
//! Two value profiles exist:
//!
//! * [`Propagator::new`] writes and reads values verbatim. Use it for plain
//!   key/value maps.
//! * [`Propagator::http_headers`] percent-encodes values on inject and
//!   decodes them on extract. Use it for HTTP headers.
//!
//! # Examples
//!
//! ```
//! use b3_propagator::{
//!     propagation::TextMapPropagator, Propagator, PropagationError, SpanContext, SpanId, TraceId,
//! };
//! use std::collections::HashMap;
//!
//! let propagator = Propagator::new();
//!
//! // outbound: attach the active context to the request
//! let cx = SpanContext::new(
//!     TraceId::from_u64(0x4bf9_2f35_77b3_4da6),
//!     SpanId::from_u64(0x00f0_67aa_0ba9_02b7),
//!     SpanId::INVALID,
//!     true,
//! );
//! let mut headers = HashMap::new();
//! propagator.inject_context(&cx, &mut headers);
//! assert_eq!(headers.get("x-b3-traceid").map(String::as_str), Some("4bf92f3577b34da6"));
//!
//! // inbound: continue the trace, or start a new root when nothing was sent
//! assert_eq!(propagator.extract(&headers), Ok(cx));
//! assert_eq!(
//!     propagator.extract(&HashMap::<String, String>::new()),
//!     Err(PropagationError::SpanContextNotFound)
//! );
//! ```
//!
//! # Crate Feature Flags
//!
//! * `internal-logs` (enabled by default): emit diagnostic events through
//!   [`tracing`](https://docs.rs/tracing).
//! * `http`: [`http::HeaderInjector`] and [`http::HeaderExtractor`] carriers
//!   over [`http::HeaderMap`](https://docs.rs/http/latest/http/header/struct.HeaderMap.html).
//!
//! [B3]: https://github.com/openzipkin/b3-propagation
#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![cfg_attr(
    docsrs,
    feature(doc_cfg, doc_auto_cfg),
    deny(rustdoc::broken_intra_doc_links)
)]
#![cfg_attr(test, deny(warnings))]

#[macro_use]
mod internal_logging;

mod config;
mod error;
#[cfg(feature = "http")]
#[cfg_attr(docsrs, doc(cfg(feature = "http")))]
pub mod http;
pub mod propagation;
mod propagator;
mod span_context;

pub use error::{ParseIdError, PropagationError, PropagationResult};
pub use propagation::ValueEncoding;
pub use propagator::Propagator;
pub use span_context::{SpanContext, SpanId, TraceId};
