#![allow(unused_macros)]
//! Diagnostic events for the propagator itself.
//!
//! With the `internal-logs` feature events go to [`tracing`] under the crate
//! name as target, with `name` set to a stable `B3Propagator.*` event name.
//! Test builds also print them, which shows up with `--nocapture`.
//!
//! [`tracing`]: https://docs.rs/tracing

/// Something a deployer should fix, such as a malformed configuration value.
macro_rules! b3_warn {
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            ::tracing::warn!(name: $name, target: env!("CARGO_PKG_NAME"), $($key = $value),+);
        }

        #[cfg(test)]
        {
            print!("b3_warn {}", $name);
            $(print!(" {}={:?}", stringify!($key), $value);)+
            println!();
        }

        #[cfg(all(not(feature = "internal-logs"), not(test)))]
        {
            let _ = ($name, $($value),+);
        }
    };
}

/// Expected outcomes of handling input from peers: missing trace headers,
/// undecodable or unparsable values. Kept at debug since the caller gets the
/// result either way.
macro_rules! b3_debug {
    (name: $name:expr $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            ::tracing::debug!(name: $name, target: env!("CARGO_PKG_NAME"), "");
        }

        #[cfg(test)]
        {
            println!("b3_debug {}", $name);
        }

        #[cfg(all(not(feature = "internal-logs"), not(test)))]
        {
            let _ = $name;
        }
    };
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            ::tracing::debug!(name: $name, target: env!("CARGO_PKG_NAME"), $($key = $value),+);
        }

        #[cfg(test)]
        {
            print!("b3_debug {}", $name);
            $(print!(" {}={:?}", stringify!($key), $value);)+
            println!();
        }

        #[cfg(all(not(feature = "internal-logs"), not(test)))]
        {
            let _ = ($name, $($value),+);
        }
    };
}
