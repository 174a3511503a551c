//! A decoder for the Windows Serialized Property Store binary format.
//!
//! A property store is a flat byte blob embedded in jump lists
//! (`.automaticDestinations-ms`), `NTUSER.DAT` shell bags, and OLE
//! summary streams (`\005SummaryInformation`). It layers three decoders:
//!
//! - [`Store`] — the top-level sequence of [`Set`]s.
//! - [`Set`] — one `"1SPS"`-tagged collection of [`Record`]s sharing a
//!   format class identifier (FMTID).
//! - [`Record`] — one typed property value, keyed either by a numeric
//!   identifier or a UTF-16 name depending on the owning Set's FMTID.
//!
//! Every decoder here borrows from the caller's byte slice rather than
//! copying it; a successfully decoded [`Store`] is only as expensive as
//! its `Vec` spines (spec §2, "Dependency order").
//!
//! Decoding never panics on malformed input: every size field, offset,
//! and value-type tag is bounds-checked before use, and a structural
//! violation anywhere in a Store, Set, or Record fails that decode with
//! an [`Error`] rather than recovering partial data (spec §7,
//! "Propagation policy").

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate alloc;

pub mod codepage;
pub mod error;
pub mod guid;
pub mod options;
pub mod properties;
pub mod reader;
pub mod record;
pub mod set;
pub mod store;
pub mod value_type;

pub use error::{Error, Result};
pub use options::DecodeOptions;
pub use record::{Record, RecordKind};
pub use set::Set;
pub use store::Store;
