use b3_propagator::{
    propagation::{Carrier, Extractor, Injector, TextMapPropagator, Visitor},
    PropagationError, PropagationResult, Propagator, SpanContext, SpanId, TraceId,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

fn test_data() -> Vec<SpanContext> {
    vec![
        SpanContext::new(TraceId::from_u64(1), SpanId::from_u64(1), SpanId::INVALID, false),
        SpanContext::new(
            TraceId::from_u64(0x4bf9_2f35_77b3_4da6),
            SpanId::from_u64(0x00f0_67aa_0ba9_02b7),
            SpanId::from_u64(0xa3ce_929d_0e0e_4736),
            true,
        ),
        SpanContext::new(
            TraceId::from_u64(u64::MAX),
            SpanId::from_u64(u64::MAX),
            SpanId::from_u64(u64::MAX),
            true,
        ),
        // a zero span id still travels as long as the trace id is set
        SpanContext::new(TraceId::from_u64(7), SpanId::INVALID, SpanId::INVALID, true),
    ]
}

/// A header list that keeps insertion order and the exact key case it was
/// given, like the raw headers of an incoming request.
#[derive(Debug, Default)]
struct HeaderList(Vec<(String, String)>);

impl Injector for HeaderList {
    fn set(&mut self, key: &str, value: String) {
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key.to_string(), value)),
        }
    }
}

impl Extractor for HeaderList {
    fn for_each_key(&self, visitor: &mut Visitor<'_>) -> PropagationResult<()> {
        self.0
            .iter()
            .try_for_each(|(k, v)| visitor(k.as_str(), v.as_str()))
    }
}

impl Carrier for HeaderList {
    fn as_injector(&mut self) -> Option<&mut dyn Injector> {
        Some(self)
    }

    fn as_extractor(&self) -> Option<&dyn Extractor> {
        Some(self)
    }
}

/// Carrier that can only be read, e.g. the headers of a received response.
#[derive(Debug, Default)]
struct ReadOnly(HashMap<String, String>);

impl Carrier for ReadOnly {
    fn as_extractor(&self) -> Option<&dyn Extractor> {
        Some(&self.0)
    }
}

#[test]
fn round_trip_plain_and_http_headers() {
    for propagator in [Propagator::new(), Propagator::http_headers()] {
        for cx in test_data() {
            let mut carrier = HashMap::new();
            propagator.inject_context(&cx, &mut carrier);
            assert_eq!(propagator.extract(&carrier), Ok(cx));

            let mut carrier = HeaderList::default();
            propagator.inject_carrier(&cx, &mut carrier).unwrap();
            assert_eq!(propagator.extract_carrier(&carrier), Ok(cx));
        }
    }
}

#[test]
fn mixed_case_keys_extract_like_lower_case_keys() {
    let propagator = Propagator::new();
    let lower = HeaderList(vec![
        ("x-b3-traceid".to_string(), "a".to_string()),
        ("x-b3-spanid".to_string(), "b".to_string()),
        ("x-b3-parentspanid".to_string(), "c".to_string()),
        ("x-b3-sampled".to_string(), "1".to_string()),
    ]);
    let mixed = HeaderList(vec![
        ("X-B3-TraceId".to_string(), "a".to_string()),
        ("X-B3-SpanId".to_string(), "b".to_string()),
        ("X-B3-ParentSpanId".to_string(), "c".to_string()),
        ("X-B3-SAMPLED".to_string(), "1".to_string()),
    ]);

    let expected = SpanContext::new(
        TraceId::from_u64(0xa),
        SpanId::from_u64(0xb),
        SpanId::from_u64(0xc),
        true,
    );
    assert_eq!(propagator.extract(&lower), Ok(expected));
    assert_eq!(propagator.extract(&mixed), Ok(expected));
}

#[test]
fn extraction_does_not_depend_on_order() {
    let propagator = Propagator::new();
    let mut pairs = vec![
        ("x-b3-traceid".to_string(), "a".to_string()),
        ("x-b3-spanid".to_string(), "b".to_string()),
        ("x-b3-parentspanid".to_string(), "c".to_string()),
        ("x-b3-sampled".to_string(), "1".to_string()),
        ("x-request-id".to_string(), "abc".to_string()),
    ];
    let expected = propagator.extract(&HeaderList(pairs.clone()));
    assert!(expected.is_ok());

    for _ in 0..pairs.len() {
        pairs.rotate_left(1);
        assert_eq!(propagator.extract(&HeaderList(pairs.clone())), expected);
        pairs.reverse();
        assert_eq!(propagator.extract(&HeaderList(pairs.clone())), expected);
    }
}

#[test]
fn unknown_keys_are_ignored() {
    let propagator = Propagator::new();
    let cx = test_data()[1];

    let mut carrier = HashMap::new();
    propagator.inject_context(&cx, &mut carrier);
    let without = propagator.extract(&carrier);
    carrier.insert("x-request-id".to_string(), "abc".to_string());
    carrier.insert("uber-trace-id".to_string(), "zz".to_string());

    assert_eq!(propagator.extract(&carrier), without);
    assert_eq!(without, Ok(cx));
}

#[test]
fn not_found_is_distinct_from_parse_error() {
    let propagator = Propagator::new();

    let empty: HashMap<String, String> = HashMap::new();
    let not_found = propagator.extract(&empty).unwrap_err();
    assert!(not_found.is_not_found());

    let zero = HeaderList(vec![("x-b3-traceid".to_string(), "0".to_string())]);
    assert_eq!(
        propagator.extract(&zero),
        Err(PropagationError::SpanContextNotFound)
    );

    let bad = HeaderList(vec![("x-b3-traceid".to_string(), "zz".to_string())]);
    let err = propagator.extract(&bad).unwrap_err();
    assert!(!err.is_not_found());
    assert!(matches!(
        err,
        PropagationError::Parse { ref key, ref value, .. } if key == "x-b3-traceid" && value == "zz"
    ));
}

#[test]
fn read_only_carrier_rejects_inject_without_writing() {
    let propagator = Propagator::new();
    let mut carrier = ReadOnly::default();

    assert_eq!(
        propagator.inject_carrier(&test_data()[0], &mut carrier),
        Err(PropagationError::InvalidCarrier)
    );
    assert!(carrier.0.is_empty());
    assert_eq!(
        propagator.extract_carrier(&carrier),
        Err(PropagationError::SpanContextNotFound)
    );
}

#[test]
fn propagator_is_shared_across_threads() {
    let propagator: Arc<dyn TextMapPropagator> = Arc::new(Propagator::http_headers());

    let handles = test_data()
        .into_iter()
        .map(|cx| {
            let propagator = Arc::clone(&propagator);
            thread::spawn(move || {
                let mut carrier = HashMap::new();
                propagator.inject_context(&cx, &mut carrier);
                propagator.extract(&carrier) == Ok(cx)
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
