//! Record decoding and the typed value accessor surface (spec §4.2, §4.5).

use crate::codepage::{self, SourceEncoding};
use crate::error::{Error, Result};
use crate::options::MAX_ALLOCATION_SIZE;
use crate::reader::Reader;
use crate::value_type::{self as vt, Shape};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "trace")]
use log::trace;

/// Whether a Set's records are keyed by a numeric property identifier or
/// a UTF-16 name, decided by the enclosing Set from its FMTID (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Numeric,
    Named,
}

/// The record's identity: either a numeric property identifier or a
/// borrowed UTF-16LE name, never both (spec §3, "Record").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Identity<'a> {
    Numeric(u32),
    Named(&'a [u8]),
}

/// One decoded property record.
///
/// Every borrowed field here ties back to the byte slice originally
/// handed to [`Record::decode`] — nothing is copied. A `Record` owns no
/// heap allocation of its own; the only owning containers in this crate
/// are the `Vec<Record>` / `Vec<Set>` arrays held by [`crate::set::Set`]
/// and [`crate::store::Store`].
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    identity: Identity<'a>,
    size: u32,
    value_type: u32,
    value_name: Option<&'a [u8]>,
    value_data: Option<&'a [u8]>,
    ascii_codepage: u16,
}

impl<'a> Record<'a> {
    /// Decode one record from `bytes`, which must begin with the record's
    /// own `size` prefix (spec §4.2). `bytes` may be longer than the
    /// record; everything from `size` onward is ignored, matching the
    /// Set decoder's contract of handing each record decode call a
    /// sub-slice that starts at the right offset but need not be
    /// pre-truncated to exactly `size`.
    pub fn decode(bytes: &'a [u8], kind: RecordKind, ascii_codepage: u16) -> Result<Record<'a>> {
        if bytes.len() < 13 {
            return Err(Error::InputTruncated);
        }
        let mut probe = Reader::new(bytes);
        let size = probe.u32le()?;
        if size < 13 || size as usize > bytes.len() {
            return Err(Error::ValueOutOfBounds);
        }
        let payload = &bytes[..size as usize];

        let mut r = Reader::new(payload);
        let _size_again = r.u32le()?;
        #[cfg(feature = "trace")]
        trace!("record: size=0x{size:x}");

        let identity = match kind {
            RecordKind::Numeric => {
                let entry_type = r.u32le()?;
                #[cfg(feature = "trace")]
                trace!("record: entry_type={entry_type}");
                Identity::Numeric(entry_type)
            }
            RecordKind::Named => {
                let name_size = r.u32le()?;
                Identity::Named(Self::read_named_identity(&mut r, name_size)?)
            }
        };

        // entry_type occupies offset 4..8; the reserved byte at offset 8
        // is skipped uniformly here for both kinds (spec §4.2 step 2).
        if matches!(identity, Identity::Numeric(_)) {
            let _reserved = r.u8()?;
        }

        let value_type = r.u32le()?;
        #[cfg(feature = "trace")]
        trace!("record: value_type=0x{value_type:x}");

        let shape = vt::shape_of(value_type & !vt::VT_BYREF).ok_or(Error::UnsupportedValue)?;

        let value_name = if value_type == vt::VT_STREAM {
            let name_size = r.u32le()? as usize;
            let name = r.bytes(name_size)?;
            let _reserved = r.u16le()?;
            Some(name)
        } else {
            None
        };

        let value_data = if vt::is_vector(value_type) {
            Some(Self::decode_vector(&mut r, shape)?)
        } else {
            Some(Self::decode_scalar(&mut r, shape)?)
        };

        Ok(Record {
            identity,
            size,
            value_type,
            value_name,
            value_data,
            ascii_codepage,
        })
    }

    fn read_named_identity(r: &mut Reader<'a>, name_size: u32) -> Result<&'a [u8]> {
        // name_size occupies offset 4..8; the reserved byte at offset 8
        // is consumed by the caller uniformly with the numeric path, so
        // here we only need to skip past it before the name bytes at 9.
        let _reserved = r.u8()?;
        r.bytes(name_size as usize)
    }

    fn decode_scalar(r: &mut Reader<'a>, shape: Shape) -> Result<&'a [u8]> {
        match shape {
            Shape::Empty => Ok(&[]),
            Shape::Fixed(width) => {
                let start = r.cursor();
                r.advance(width as usize)?;
                Ok(Self::slice_from(r, start))
            }
            Shape::Variable { double_for_char_count } => {
                let mut size = r.u32le()? as usize;
                if double_for_char_count {
                    size = size
                        .checked_mul(2)
                        .ok_or(Error::ValueOutOfBounds)?;
                }
                if size > r.remaining() {
                    return Err(Error::ValueOutOfBounds);
                }
                if size > MAX_ALLOCATION_SIZE {
                    return Err(Error::ValueExceedsMaximum);
                }
                let start = r.cursor();
                r.advance(size)?;
                Ok(Self::slice_from(r, start))
            }
        }
    }

    fn decode_vector(r: &mut Reader<'a>, shape: Shape) -> Result<&'a [u8]> {
        let number_of_values = r.u32le()?;
        match shape {
            Shape::Empty => Err(Error::UnsupportedValue),
            Shape::Fixed(width) => {
                if width > 0 && number_of_values as usize > usize::MAX / width as usize {
                    return Err(Error::ValueOutOfBounds);
                }
                let total = number_of_values as usize * width as usize;
                let start = r.cursor();
                r.advance(total)?;
                Ok(Self::slice_from(r, start))
            }
            Shape::Variable { double_for_char_count } => {
                if number_of_values == 0xFFFF_FFFF || number_of_values as usize > r.remaining() / 4 {
                    return Err(Error::ValueOutOfBounds);
                }
                let start = r.cursor();
                for _ in 0..number_of_values {
                    let mut elem_size = r.u32le()? as usize;
                    if double_for_char_count {
                        elem_size = elem_size.checked_mul(2).ok_or(Error::ValueOutOfBounds)?;
                    }
                    r.advance(elem_size)?;
                    // Alignment padding: consumed after every element,
                    // including the last, whenever 2 bytes remain and
                    // they are zero (see DESIGN.md — grounded on
                    // libfwps_record.c rather than the looser "not after
                    // the last element" prose in the distilled spec).
                    if r.remaining() >= 2 && r.peek_u16le()? == 0 {
                        r.advance(2)?;
                    }
                }
                Ok(Self::slice_from(r, start))
            }
        }
    }

    fn slice_from(r: &Reader<'a>, start: usize) -> &'a [u8] {
        r.span_from(start)
    }

    // -- structural accessors --------------------------------------------

    /// The raw `size` field, total record length including the header.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// The raw 32-bit value-type tag, unmodified (spec §4.5, "value type").
    pub fn value_type(&self) -> u32 {
        self.value_type
    }

    pub fn ascii_codepage(&self) -> u16 {
        self.ascii_codepage
    }

    pub fn is_named(&self) -> bool {
        matches!(self.identity, Identity::Named(_))
    }

    /// The numeric property identifier, or `0` ("not available") if this
    /// is a Named record — the accessor returns absent-as-a-value rather
    /// than an error, preserving the original's observable behaviour
    /// (spec §9, "Tagged records").
    pub fn entry_type(&self) -> u32 {
        match self.identity {
            Identity::Numeric(t) => t,
            Identity::Named(_) => 0,
        }
    }

    /// The raw UTF-16LE entry name bytes, present iff this is a Named
    /// record.
    pub fn entry_name(&self) -> Option<&'a [u8]> {
        match self.identity {
            Identity::Named(name) => Some(name),
            Identity::Numeric(_) => None,
        }
    }

    pub fn entry_name_utf8(&self) -> Result<Option<String>> {
        self.entry_name()
            .map(|bytes| Self::utf16le_name_to_utf8(bytes))
            .transpose()
    }

    pub fn entry_name_utf16(&self) -> Result<Option<Vec<u16>>> {
        self.entry_name()
            .map(|bytes| Self::utf16le_name_to_utf16(bytes))
            .transpose()
    }

    /// The raw value-name bytes, present iff `value_type == VT_STREAM`.
    pub fn value_name(&self) -> Option<&'a [u8]> {
        self.value_name
    }

    pub fn value_name_utf8(&self) -> Result<Option<String>> {
        self.value_name
            .map(|bytes| Self::utf16le_name_to_utf8(bytes))
            .transpose()
    }

    pub fn value_name_utf16(&self) -> Result<Option<Vec<u16>>> {
        self.value_name
            .map(|bytes| Self::utf16le_name_to_utf16(bytes))
            .transpose()
    }

    fn utf16le_name_to_utf8(bytes: &[u8]) -> Result<String> {
        if bytes.is_empty() {
            return Ok(String::new());
        }
        codepage::to_utf8(bytes, SourceEncoding::Utf16Le, false)
    }

    fn utf16le_name_to_utf16(bytes: &[u8]) -> Result<Vec<u16>> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }
        codepage::to_utf16(bytes, SourceEncoding::Utf16Le, false)
    }

    /// The raw, decoded payload bytes (spec §4.5, "raw data"). Unconditional
    /// on `value_type`; fails only when no value data was ever recorded.
    pub fn raw_data(&self) -> Result<&'a [u8]> {
        self.value_data.ok_or(Error::ValueMissing)
    }

    pub fn raw_data_size(&self) -> Result<usize> {
        self.raw_data().map(<[u8]>::len)
    }

    fn fixed(&self, accepted: &[u32], width: usize) -> Result<&'a [u8]> {
        if !accepted.contains(&self.value_type) {
            return Err(Error::UnsupportedValue);
        }
        let data = self.value_data.ok_or(Error::ValueMissing)?;
        if data.len() != width {
            return Err(Error::UnsupportedValue);
        }
        Ok(data)
    }

    pub fn as_bool(&self) -> Result<bool> {
        let data = self.fixed(&[vt::VT_BOOL], 1)?;
        Ok(data[0] != 0)
    }

    pub fn as_i8(&self) -> Result<i8> {
        let data = self.fixed(&[vt::VT_I1], 1)?;
        Ok(data[0] as i8)
    }

    pub fn as_u8(&self) -> Result<u8> {
        let data = self.fixed(&[vt::VT_UI1], 1)?;
        Ok(data[0])
    }

    pub fn as_i16(&self) -> Result<i16> {
        let data = self.fixed(&[vt::VT_I2], 2)?;
        Ok(i16::from_le_bytes([data[0], data[1]]))
    }

    pub fn as_u16(&self) -> Result<u16> {
        let data = self.fixed(&[vt::VT_UI2], 2)?;
        Ok(u16::from_le_bytes([data[0], data[1]]))
    }

    pub fn as_i32(&self) -> Result<i32> {
        let data = self.fixed(&[vt::VT_I4, vt::VT_UI4, vt::VT_ERROR], 4)?;
        Ok(i32::from_le_bytes(data.try_into().unwrap()))
    }

    pub fn as_u32(&self) -> Result<u32> {
        let data = self.fixed(&[vt::VT_I4, vt::VT_UI4, vt::VT_ERROR], 4)?;
        Ok(u32::from_le_bytes(data.try_into().unwrap()))
    }

    pub fn as_i64(&self) -> Result<i64> {
        let data = self.fixed(&[vt::VT_I8, vt::VT_UI8, vt::VT_CY, vt::VT_FILETIME], 8)?;
        Ok(i64::from_le_bytes(data.try_into().unwrap()))
    }

    pub fn as_u64(&self) -> Result<u64> {
        let data = self.fixed(&[vt::VT_I8, vt::VT_UI8, vt::VT_CY, vt::VT_FILETIME], 8)?;
        Ok(u64::from_le_bytes(data.try_into().unwrap()))
    }

    /// Windows FILETIME: 100ns ticks since 1601-01-01 UTC.
    pub fn as_filetime(&self) -> Result<u64> {
        let data = self.fixed(&[vt::VT_FILETIME], 8)?;
        Ok(u64::from_le_bytes(data.try_into().unwrap()))
    }

    pub fn as_f32(&self) -> Result<f32> {
        let data = self.fixed(&[vt::VT_R4], 4)?;
        Ok(f32::from_bits(u32::from_le_bytes(data.try_into().unwrap())))
    }

    pub fn as_f64(&self) -> Result<f64> {
        let data = self.fixed(&[vt::VT_R8], 8)?;
        Ok(f64::from_bits(u64::from_le_bytes(data.try_into().unwrap())))
    }

    pub fn as_guid(&self) -> Result<&'a [u8; 16]> {
        let data = self.fixed(&[vt::VT_CLSID], 16)?;
        Ok(data.try_into().expect("width already checked"))
    }

    fn string_source_encoding(&self) -> SourceEncoding {
        if self.value_type == vt::VT_LPWSTR {
            SourceEncoding::Utf16Le
        } else {
            codepage::source_encoding_for_codepage(self.ascii_codepage)
        }
    }

    fn string_data(&self) -> Result<&'a [u8]> {
        if !matches!(self.value_type, vt::VT_BSTR | vt::VT_LPSTR | vt::VT_LPWSTR) {
            return Err(Error::UnsupportedValue);
        }
        self.value_data.ok_or(Error::ValueMissing)
    }

    /// Strict UTF-8 string accessor. Accepts `VT_BSTR`/`VT_LPSTR`/`VT_LPWSTR`.
    pub fn as_utf8(&self) -> Result<String> {
        let data = self.string_data()?;
        if data.is_empty() {
            return Ok(String::new());
        }
        codepage::to_utf8(data, self.string_source_encoding(), false)
    }

    /// Strict UTF-16 string accessor.
    pub fn as_utf16(&self) -> Result<Vec<u16>> {
        let data = self.string_data()?;
        if data.is_empty() {
            return Ok(Vec::new());
        }
        codepage::to_utf16(data, self.string_source_encoding(), false)
    }

    /// Permissive ("path string") UTF-8 accessor: tolerates unpaired
    /// UTF-16 surrogates instead of failing (spec §4.5, "path string").
    pub fn as_path_utf8(&self) -> Result<String> {
        let data = self.string_data()?;
        if data.is_empty() {
            return Ok(String::new());
        }
        codepage::to_utf8(data, self.string_source_encoding(), true)
    }

    /// Permissive ("path string") UTF-16 accessor.
    pub fn as_path_utf16(&self) -> Result<Vec<u16>> {
        let data = self.string_data()?;
        if data.is_empty() {
            return Ok(Vec::new());
        }
        codepage::to_utf16(data, self.string_source_encoding(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn le32(v: u32) -> [u8; 4] {
        v.to_le_bytes()
    }

    fn numeric_record(entry_type: u32, value_type: u32, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&le32(0)); // size placeholder
        out.extend_from_slice(&le32(entry_type));
        out.push(0); // reserved
        out.extend_from_slice(&le32(value_type));
        out.extend_from_slice(payload);
        let size = out.len() as u32;
        out[0..4].copy_from_slice(&le32(size));
        out
    }

    #[test]
    fn decodes_fixed_width_i4() {
        let bytes = numeric_record(7, vt::VT_I4, &(-5i32).to_le_bytes());
        let rec = Record::decode(&bytes, RecordKind::Numeric, 1252).unwrap();
        assert_eq!(rec.entry_type(), 7);
        assert_eq!(rec.as_i32().unwrap(), -5);
        assert!(rec.as_u8().is_err());
    }

    #[test]
    fn entry_type_is_zero_for_named_record() {
        let mut out = Vec::new();
        out.extend_from_slice(&le32(0));
        let name = [0x41, 0x00, 0x42, 0x00]; // "AB" UTF-16LE
        out.extend_from_slice(&le32(name.len() as u32));
        out.push(0);
        out.extend_from_slice(&name);
        out.extend_from_slice(&le32(vt::VT_EMPTY));
        let size = out.len() as u32;
        out[0..4].copy_from_slice(&le32(size));

        let rec = Record::decode(&out, RecordKind::Named, 1252).unwrap();
        assert_eq!(rec.entry_type(), 0);
        assert!(rec.is_named());
        assert_eq!(rec.entry_name_utf8().unwrap().as_deref(), Some("AB"));
    }

    #[test]
    fn empty_value_rejects_typed_accessors_but_allows_raw() {
        let bytes = numeric_record(1, vt::VT_EMPTY, &[]);
        let rec = Record::decode(&bytes, RecordKind::Numeric, 1252).unwrap();
        assert!(rec.as_bool().is_err());
        assert_eq!(rec.raw_data().unwrap().len(), 0);
        assert_eq!(rec.value_type(), vt::VT_EMPTY);
    }

    #[test]
    fn truncated_record_is_rejected() {
        let bytes = numeric_record(1, vt::VT_I4, &1i32.to_le_bytes());
        for n in 0..bytes.len() {
            assert!(Record::decode(&bytes[..n], RecordKind::Numeric, 1252).is_err());
        }
    }

    #[test]
    fn unsupported_tag_is_rejected() {
        let bytes = numeric_record(1, 0x00ff, &[]);
        assert!(Record::decode(&bytes, RecordKind::Numeric, 1252).is_err());
    }

    #[test]
    fn array_bit_is_rejected() {
        let bytes = numeric_record(1, vt::VT_I4 | vt::VT_ARRAY, &1i32.to_le_bytes());
        assert!(Record::decode(&bytes, RecordKind::Numeric, 1252).is_err());
    }

    #[test]
    fn fixed_width_vector_round_trips() {
        let mut payload = le32(3).to_vec(); // number_of_values
        payload.extend_from_slice(&1i32.to_le_bytes());
        payload.extend_from_slice(&2i32.to_le_bytes());
        payload.extend_from_slice(&3i32.to_le_bytes());
        let bytes = numeric_record(1, vt::VT_I4 | vt::VT_VECTOR, &payload);
        let rec = Record::decode(&bytes, RecordKind::Numeric, 1252).unwrap();
        let data = rec.raw_data().unwrap();
        assert_eq!(data.len(), 12);
        assert_eq!(i32::from_le_bytes(data[0..4].try_into().unwrap()), 1);
        assert_eq!(i32::from_le_bytes(data[8..12].try_into().unwrap()), 3);
    }

    #[test]
    fn utf16_vector_with_padding_walks_back_to_original_strings() {
        let strings = ["ab", "c", "defg"];
        let mut payload = le32(strings.len() as u32).to_vec();
        for s in strings {
            let units: Vec<u8> = s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
            payload.extend_from_slice(&le32(units.len() as u32 / 2)); // character count
            payload.extend_from_slice(&units);
            if units.len() % 4 != 0 {
                // leave as-is; alignment is a stream property, not forced here
            }
        }
        let bytes = numeric_record(1, vt::VT_LPWSTR | vt::VT_VECTOR, &payload);
        let rec = Record::decode(&bytes, RecordKind::Numeric, 1252).unwrap();
        let data = rec.raw_data().unwrap();

        let mut offset = 0usize;
        let mut recovered = Vec::new();
        while offset < data.len() {
            let len = u32::from_le_bytes(data[offset..offset + 4].try_into().unwrap()) as usize;
            offset += 4;
            let units: Vec<u16> = data[offset..offset + len]
                .chunks_exact(2)
                .map(|c| u16::from_le_bytes([c[0], c[1]]))
                .collect();
            recovered.push(String::from_utf16(&units).unwrap());
            offset += len;
            if offset + 2 <= data.len() && data[offset] == 0 && data[offset + 1] == 0 {
                offset += 2;
            }
        }
        assert_eq!(recovered, strings);
    }

    #[test]
    fn path_string_permits_unpaired_surrogate() {
        let lone_high_surrogate: u16 = 0xD800;
        let bytes_payload = lone_high_surrogate.to_le_bytes();
        let bytes = numeric_record(1, vt::VT_LPWSTR, &bytes_payload);
        let rec = Record::decode(&bytes, RecordKind::Numeric, 1252).unwrap();
        assert!(rec.as_utf8().is_err());
        assert!(rec.as_path_utf8().is_ok());
    }
}
