use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Everything except the URL unreserved characters is escaped in a query value.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// How header values are transformed on their way into and out of a carrier.
///
/// Keys are never transformed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ValueEncoding {
    /// Values are written and read verbatim. For carriers without character
    /// restrictions, such as a plain key/value map.
    #[default]
    Plain,
    /// Values are escaped the way a URL query value is: unreserved characters
    /// pass through, space becomes `+` and everything else becomes `%XX`.
    ///
    /// Decoding is best-effort: a value that is not a well-formed escape
    /// sequence is returned as is.
    HttpHeader,
}

impl ValueEncoding {
    /// Transform `value` before it is written into a carrier.
    ///
    /// # Examples
    ///
    /// ```
    /// use b3_propagator::ValueEncoding;
    ///
    /// assert_eq!(ValueEncoding::Plain.encode("a b"), "a b");
    /// assert_eq!(ValueEncoding::HttpHeader.encode("a b/c"), "a+b%2Fc");
    /// ```
    pub fn encode<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            ValueEncoding::Plain => Cow::Borrowed(value),
            ValueEncoding::HttpHeader => {
                let encoded: Cow<'a, str> = utf8_percent_encode(value, QUERY_VALUE).into();
                // every `%` in the output starts an escape, so this only hits spaces
                if encoded.contains("%20") {
                    Cow::Owned(encoded.replace("%20", "+"))
                } else {
                    encoded
                }
            }
        }
    }

    /// Transform a raw `value` read from a carrier.
    ///
    /// Never fails. If an [`HttpHeader`] value cannot be decoded the raw value
    /// is returned and left for the caller's own validation to reject.
    ///
    /// [`HttpHeader`]: ValueEncoding::HttpHeader
    pub fn decode<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            ValueEncoding::Plain => Cow::Borrowed(value),
            ValueEncoding::HttpHeader => query_unescape(value).unwrap_or_else(|| {
                b3_debug!(
                    name: "B3Propagator.Decode.Fallback",
                    message = "value is not a valid escape sequence, using it verbatim",
                    value = value,
                );
                Cow::Borrowed(value)
            }),
        }
    }
}

fn query_unescape(value: &str) -> Option<Cow<'_, str>> {
    if !value.contains(|c: char| c == '%' || c == '+') {
        return Some(Cow::Borrowed(value));
    }

    let well_formed = value.split('%').skip(1).all(|escape| {
        escape
            .as_bytes()
            .get(..2)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    });
    if !well_formed {
        return None;
    }

    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .ok()
        .map(|decoded| Cow::Owned(decoded.into_owned()))
}

impl fmt::Display for ValueEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueEncoding::Plain => write!(f, "plain"),
            ValueEncoding::HttpHeader => write!(f, "http_headers"),
        }
    }
}

/// Returned when parsing an unknown [`ValueEncoding`] name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown value encoding {0:?}, expected one of: plain, http_headers")]
pub struct ParseValueEncodingError(String);

impl FromStr for ValueEncoding {
    type Err = ParseValueEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "text_map" | "textmap" => Ok(ValueEncoding::Plain),
            "http" | "http_headers" | "http_header" => Ok(ValueEncoding::HttpHeader),
            _ => Err(ParseValueEncodingError(s.to_string())),
        }
    }
}
