//! The error taxonomy surfaced by every decoder in this crate.

use alloc::string::String;
use core::fmt;
use core::result;

/// Everything that can go wrong while decoding a Store, Set, or Record.
///
/// Every byte offset, size field, and value-type tag in a property store
/// originates in untrusted input, so every variant here is reachable from
/// a single malformed byte slice without panicking.
#[derive(Debug)]
pub enum Error {
    /// A caller-supplied argument is impossible to satisfy (e.g. a GUID
    /// output buffer smaller than 16 bytes).
    InvalidArgument(String),
    /// A size field claims more bytes than the input slice contains.
    InputTruncated,
    /// An offset or length would move the cursor past the end of its slice.
    ValueOutOfBounds,
    /// A Set's header did not begin with the `"1SPS"` signature.
    SignatureMismatch,
    /// The value-type tag is not recognised, or a fixed-width accessor was
    /// invoked against a payload of the wrong width, or the VT_ARRAY /
    /// VT_BYREF bits were set.
    UnsupportedValue,
    /// An accessor was invoked on a record whose value data is absent.
    ValueMissing,
    /// A size field exceeds the configured allocation ceiling.
    ValueExceedsMaximum,
    /// The text converter reported a malformed or untranslatable sequence.
    ConversionFailure,
    /// A structural violation not covered by a more specific variant above.
    Malformed(String),
    /// A lower-level bounds or parse failure from the byte reader.
    Scroll(ScrollError),
}

/// A minimal mirror of `scroll::Error`'s shape, kept independent of the
/// `scroll` crate's own error type so that `Error` stays `Send + Sync`
/// regardless of which scroll feature set is active.
#[derive(Debug)]
pub enum ScrollError {
    TooBig { size: usize, len: usize },
    BadOffset(usize),
    BadInput(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Error::InputTruncated => write!(f, "input truncated: a size field claims more bytes than are available"),
            Error::ValueOutOfBounds => write!(f, "value out of bounds: offset or length moves past the end of the slice"),
            Error::SignatureMismatch => write!(f, "set signature mismatch: expected \"1SPS\""),
            Error::UnsupportedValue => write!(f, "unsupported value type"),
            Error::ValueMissing => write!(f, "accessor invoked on a record with no value data"),
            Error::ValueExceedsMaximum => write!(f, "size field exceeds the configured allocation ceiling"),
            Error::ConversionFailure => write!(f, "text conversion failed"),
            Error::Malformed(msg) => write!(f, "malformed entity: {msg}"),
            Error::Scroll(err) => write!(f, "{err}"),
        }
    }
}

impl fmt::Display for ScrollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollError::TooBig { size, len } => {
                write!(f, "too big: requested {size} bytes, {len} available")
            }
            ScrollError::BadOffset(off) => write!(f, "bad offset: {off}"),
            ScrollError::BadInput(msg) => write!(f, "bad input: {msg}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ScrollError {}

#[cfg(feature = "alloc")]
impl From<scroll::Error> for Error {
    fn from(err: scroll::Error) -> Self {
        match err {
            scroll::Error::TooBig { size, len } => {
                Error::Scroll(ScrollError::TooBig { size, len })
            }
            scroll::Error::BadOffset(off) => Error::Scroll(ScrollError::BadOffset(off)),
            other => Error::Scroll(ScrollError::BadInput(alloc::format!("{other}"))),
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Malformed(alloc::format!("io error: {err}"))
    }
}

pub type Result<T> = result::Result<T, Error>;
