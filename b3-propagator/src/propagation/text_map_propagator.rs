//! # Text Propagator
//!
//! `TextMapPropagator` is a formatter to serialize and deserialize a
//! [`SpanContext`] into a text format.
use crate::{
    propagation::{Carrier, Extractor, Injector},
    PropagationError, PropagationResult, SpanContext,
};
use std::fmt::Debug;
use std::slice;

/// Methods to inject and extract a span context as text into injectors and
/// extractors that travel in-band across process boundaries.
///
/// Implementations hold no per-call state and can be shared between threads.
pub trait TextMapPropagator: Debug + Send + Sync {
    /// Properly encodes the values of the [`SpanContext`] and injects them
    /// into the [`Injector`].
    fn inject_context(&self, cx: &SpanContext, injector: &mut dyn Injector);

    /// Retrieves encoded data using the provided [`Extractor`].
    ///
    /// Returns [`PropagationError::SpanContextNotFound`] if the extractor
    /// holds no span context, and [`PropagationError::Parse`] if it holds a
    /// malformed one.
    fn extract(&self, extractor: &dyn Extractor) -> PropagationResult<SpanContext>;

    /// Returns iter of fields used by [`TextMapPropagator`]
    fn fields(&self) -> FieldIter<'_>;

    /// Injects into a carrier whose capabilities are only known at runtime.
    ///
    /// Returns [`PropagationError::InvalidCarrier`] without writing anything
    /// if the carrier is not writable.
    fn inject_carrier(&self, cx: &SpanContext, carrier: &mut dyn Carrier) -> PropagationResult<()> {
        let injector = carrier
            .as_injector()
            .ok_or(PropagationError::InvalidCarrier)?;
        self.inject_context(cx, injector);
        Ok(())
    }

    /// Extracts from a carrier whose capabilities are only known at runtime.
    ///
    /// Returns [`PropagationError::InvalidCarrier`] if the carrier is not
    /// readable.
    fn extract_carrier(&self, carrier: &dyn Carrier) -> PropagationResult<SpanContext> {
        let extractor = carrier
            .as_extractor()
            .ok_or(PropagationError::InvalidCarrier)?;
        self.extract(extractor)
    }
}

/// An iterator over fields of a [`TextMapPropagator`]
#[derive(Debug)]
pub struct FieldIter<'a>(slice::Iter<'a, &'static str>);

impl<'a> FieldIter<'a> {
    /// Create a new `FieldIter` from a slice of propagator fields
    pub fn new(fields: &'a [&'static str]) -> Self {
        FieldIter(fields.iter())
    }
}

impl Iterator for FieldIter<'_> {
    type Item = &'static str;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().copied()
    }
}
