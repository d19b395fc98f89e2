//! # Carriers and propagators
//!
//! A carrier is whatever holds the headers of a message crossing a process
//! boundary. The propagator never owns one: it only needs to write pairs
//! into it ([`Injector`]) or walk the pairs already in it ([`Extractor`]).
//!
//! Callers that only hold an opaque carrier, for example a tracer handing a
//! `&mut dyn Carrier` through a format-agnostic API, use [`Carrier`] to ask
//! for a capability at runtime. A carrier without the needed capability
//! produces [`PropagationError::InvalidCarrier`].
//!
//! [`PropagationError::InvalidCarrier`]: crate::PropagationError::InvalidCarrier
use crate::PropagationResult;
use std::collections::{BTreeMap, HashMap};

pub mod text_map_propagator;
mod value_encoding;

pub use text_map_propagator::{FieldIter, TextMapPropagator};
pub use value_encoding::{ParseValueEncodingError, ValueEncoding};

/// Injector provides an interface for adding fields to an underlying struct like `HashMap`
pub trait Injector {
    /// Add a key and value to the underlying data. An existing value for the
    /// same key is overwritten.
    fn set(&mut self, key: &str, value: String);

    #[allow(unused_variables)]
    /// Hint to reserve capacity for at least `additional` more entries to be inserted.
    fn reserve(&mut self, additional: usize) {}
}

/// Visitor invoked by [`Extractor::for_each_key`] once per key/value pair.
pub type Visitor<'v> = dyn FnMut(&str, &str) -> PropagationResult<()> + 'v;

/// Extractor provides an interface for reading fields from an underlying struct like `HashMap`
pub trait Extractor {
    /// Call `visitor` once for every key/value pair in the underlying data,
    /// in whatever order the data keeps them.
    ///
    /// Iteration stops at the first error returned by `visitor`, and that
    /// error is returned.
    fn for_each_key(&self, visitor: &mut Visitor<'_>) -> PropagationResult<()>;
}

/// Runtime capability lookup for carriers passed around as trait objects.
///
/// Both methods default to `None`, so a carrier only needs to override the
/// capabilities it actually has.
pub trait Carrier {
    /// Returns the writable view of this carrier, if it has one.
    fn as_injector(&mut self) -> Option<&mut dyn Injector> {
        None
    }

    /// Returns the readable view of this carrier, if it has one.
    fn as_extractor(&self) -> Option<&dyn Extractor> {
        None
    }
}

impl<S: std::hash::BuildHasher> Injector for HashMap<String, String, S> {
    /// Set a key and value in the HashMap.
    fn set(&mut self, key: &str, value: String) {
        self.insert(key.to_lowercase(), value);
    }

    /// Reserves capacity for at least `additional` more entries to be inserted.
    fn reserve(&mut self, additional: usize) {
        self.reserve(additional);
    }
}

impl<S: std::hash::BuildHasher> Extractor for HashMap<String, String, S> {
    fn for_each_key(&self, visitor: &mut Visitor<'_>) -> PropagationResult<()> {
        self.iter()
            .try_for_each(|(k, v)| visitor(k.as_str(), v.as_str()))
    }
}

impl<S: std::hash::BuildHasher> Carrier for HashMap<String, String, S> {
    fn as_injector(&mut self) -> Option<&mut dyn Injector> {
        Some(self)
    }

    fn as_extractor(&self) -> Option<&dyn Extractor> {
        Some(self)
    }
}

impl Injector for BTreeMap<String, String> {
    /// Set a key and value in the BTreeMap.
    fn set(&mut self, key: &str, value: String) {
        self.insert(key.to_lowercase(), value);
    }
}

impl Extractor for BTreeMap<String, String> {
    fn for_each_key(&self, visitor: &mut Visitor<'_>) -> PropagationResult<()> {
        self.iter()
            .try_for_each(|(k, v)| visitor(k.as_str(), v.as_str()))
    }
}

impl Carrier for BTreeMap<String, String> {
    fn as_injector(&mut self) -> Option<&mut dyn Injector> {
        Some(self)
    }

    fn as_extractor(&self) -> Option<&dyn Extractor> {
        Some(self)
    }
}
