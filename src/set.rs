//! Set decoding: a `"1SPS"`-tagged collection of records sharing one FMTID.

use crate::error::{Error, Result};
use crate::guid::{self, Guid};
use crate::reader::Reader;
use crate::record::{Record, RecordKind};
use alloc::vec::Vec;

#[cfg(feature = "trace")]
use log::trace;

/// A decoded property set: one FMTID plus the records it owns.
///
/// Like [`Record`], a `Set` borrows from the original input — only the
/// `Vec<Record>` spine is an owned allocation.
#[derive(Debug, Clone)]
pub struct Set<'a> {
    size: u32,
    format_class_identifier: Guid,
    records: Vec<Record<'a>>,
}

impl<'a> Set<'a> {
    /// Decode one Set from `bytes`, which must begin with the Set's own
    /// `size` prefix (spec §4.3). As with [`Record::decode`], `bytes` may
    /// extend past the Set; everything from `size` onward is ignored.
    pub fn decode(bytes: &'a [u8], ascii_codepage: u16) -> Result<Set<'a>> {
        if bytes.len() < 24 {
            return Err(Error::InputTruncated);
        }
        let mut probe = Reader::new(bytes);
        let size = probe.u32le()?;
        if (size as usize) < 24 || size as usize > bytes.len() {
            return Err(Error::ValueOutOfBounds);
        }
        let payload = &bytes[..size as usize];

        let mut r = Reader::new(payload);
        let _size_again = r.u32le()?;

        let signature = r.bytes(4)?;
        if signature != b"1SPS" {
            return Err(Error::SignatureMismatch);
        }

        let fmtid_bytes = r.guid()?;
        let format_class_identifier: Guid = *fmtid_bytes;
        #[cfg(feature = "trace")]
        trace!("set: size=0x{size:x} fmtid={format_class_identifier:02x?}");

        let kind = if format_class_identifier == guid::NAMED_PROPERTIES {
            RecordKind::Named
        } else {
            RecordKind::Numeric
        };

        let mut records = Vec::new();
        loop {
            // A Set's records need not be followed by a 4-byte zero
            // terminator: running out of input exactly at `size` is a
            // valid end, not truncation (mirrors store.rs's identical
            // guard for the same reason).
            if r.remaining() == 0 {
                break;
            }
            if r.remaining() < 4 {
                return Err(Error::InputTruncated);
            }
            let record_size = r.peek_u32le()?;
            if record_size == 0 {
                r.advance(4)?;
                break;
            }
            let start = r.cursor();
            let remaining_slice = &payload[start..];
            let record = Record::decode(remaining_slice, kind, ascii_codepage)?;
            #[cfg(feature = "trace")]
            if let Some(id) = crate::properties::lookup(
                &format_class_identifier,
                record.entry_type(),
                record.value_type(),
            ) {
                trace!("set: record entry_type={} -> {}", record.entry_type(), id.name);
            }
            r.advance(record.size() as usize)?;
            records.push(record);
        }

        Ok(Set {
            size,
            format_class_identifier,
            records,
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn format_class_identifier(&self) -> &Guid {
        &self.format_class_identifier
    }

    pub fn is_named(&self) -> bool {
        self.format_class_identifier == guid::NAMED_PROPERTIES
    }

    pub fn records(&self) -> &[Record<'a>] {
        &self.records
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}
