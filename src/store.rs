//! Store decoding: the top-level sequence of Sets (spec §4.4).

use crate::error::{Error, Result};
use crate::options::DecodeOptions;
use crate::reader::Reader;
use crate::set::Set;
use alloc::vec::Vec;

#[cfg(feature = "trace")]
use log::trace;

/// A decoded property store: zero or more Sets, back to back, terminated
/// by a zero-size marker. Unlike a Set or a Record, a Store carries no
/// size field of its own — the caller hands it exactly the bytes that
/// belong to the store (spec §4.4, "no outer length").
#[derive(Debug, Clone)]
pub struct Store<'a> {
    sets: Vec<Set<'a>>,
}

impl<'a> Store<'a> {
    pub fn decode(bytes: &'a [u8], ascii_codepage: u16) -> Result<Store<'a>> {
        let mut r = Reader::new(bytes);
        let mut sets = Vec::new();

        loop {
            // Unlike Set and Record, a Store carries no outer size field:
            // running out of input here signals the end of the store,
            // not truncation (spec §9, "Store size field absence").
            if r.remaining() == 0 {
                break;
            }
            if r.remaining() < 4 {
                return Err(Error::InputTruncated);
            }
            let set_size = r.peek_u32le()?;
            if set_size == 0 {
                r.advance(4)?;
                break;
            }
            let start = r.cursor();
            let remaining_slice = &bytes[start..];
            let set = Set::decode(remaining_slice, ascii_codepage)?;
            #[cfg(feature = "trace")]
            trace!("store: set #{} size=0x{:x}", sets.len(), set.size());
            r.advance(set.size() as usize)?;
            sets.push(set);
        }

        Ok(Store { sets })
    }

    /// Decode a Store from `bytes` using `options` for codepage
    /// resolution, rather than a bare `ascii_codepage` value.
    pub fn decode_with_options(bytes: &'a [u8], options: DecodeOptions) -> Result<Store<'a>> {
        Store::decode(bytes, options.ascii_codepage)
    }

    pub fn sets(&self) -> &[Set<'a>] {
        &self.sets
    }

    pub fn set_count(&self) -> usize {
        self.sets.len()
    }
}
