use crate::propagation::ValueEncoding;
use std::env;

/// Value encoding used by [`Propagator::from_env`].
/// e.g. "plain" or "http_headers"
///
/// [`Propagator::from_env`]: crate::Propagator::from_env
pub(crate) const ENV_VALUE_ENCODING: &str = "OTEL_PROPAGATOR_B3_VALUE_ENCODING";

pub(crate) fn value_encoding() -> ValueEncoding {
    match env::var(ENV_VALUE_ENCODING).ok().filter(|var| !var.is_empty()) {
        Some(encoding) => match encoding.parse::<ValueEncoding>() {
            Ok(encoding) => encoding,
            Err(err) => {
                let reason = err.to_string();
                b3_warn!(
                    name: "B3Propagator.Config.InvalidValueEncoding",
                    message = "malformed value encoding, defaulting to plain",
                    variable = ENV_VALUE_ENCODING,
                    error = reason.as_str(),
                );
                ValueEncoding::default()
            }
        },
        None => ValueEncoding::default(),
    }
}
