//! The text-conversion collaborator (spec §6.4).
//!
//! This is the sole escape hatch out of pure byte manipulation: every
//! string-shaped accessor on [`crate::record::Record`] (`as_utf8`,
//! `as_utf16`, `as_path_utf8`, `as_path_utf16`) routes through [`to_utf8`]
//! / [`to_utf16`] with a single call that returns an owned `String` or
//! `Vec<u16>` — there is no size/copy split here.
//!
//! Codepage 65000 (UTF-7) and 65001 (UTF-8) are handled directly; every
//! other numeric codepage is resolved to an [`encoding_rs::Encoding`]
//! through the `codepage` crate. `VT_LPWSTR` payloads are passed as
//! [`SourceEncoding::Utf16Le`] rather than going through the codepage
//! branch at all.

use crate::error::{Error, Result};
use alloc::string::String;
use alloc::vec::Vec;
use core::char::REPLACEMENT_CHARACTER;

/// Which byte encoding the source bytes are in, per spec §4.5's dispatch
/// table (decided by the caller from `value_type` and `ascii_codepage`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf16Le,
    Utf7,
    Utf8,
    Codepage(u16),
}

/// Resolve an `ascii_codepage` value for a non-`VT_LPWSTR` string payload,
/// per spec §4.5: 65000 selects UTF-7, 65001 selects UTF-8, everything
/// else dispatches to the byte-stream-in-codepage-N converter.
pub fn source_encoding_for_codepage(ascii_codepage: u16) -> SourceEncoding {
    match ascii_codepage {
        65000 => SourceEncoding::Utf7,
        65001 => SourceEncoding::Utf8,
        cp => SourceEncoding::Codepage(cp),
    }
}

/// Decode `bytes` in `source` to a UTF-8 `String`.
///
/// When `permit_unpaired_surrogate` is set (the "path string" mode), a
/// lone UTF-16 surrogate is replaced with U+FFFD instead of failing the
/// whole conversion — this only changes behaviour for [`SourceEncoding::Utf16Le`].
pub fn to_utf8(bytes: &[u8], source: SourceEncoding, permit_unpaired_surrogate: bool) -> Result<String> {
    match source {
        SourceEncoding::Utf16Le => utf16le_bytes_to_utf8(bytes, permit_unpaired_surrogate),
        SourceEncoding::Utf7 => utf7_to_utf8(bytes),
        SourceEncoding::Utf8 => core::str::from_utf8(bytes)
            .map(|s| s.into())
            .map_err(|_| Error::ConversionFailure),
        SourceEncoding::Codepage(cp) => codepage_to_utf8(bytes, cp),
    }
}

/// Decode `bytes` in `source` to a sequence of UTF-16 code units.
pub fn to_utf16(bytes: &[u8], source: SourceEncoding, permit_unpaired_surrogate: bool) -> Result<Vec<u16>> {
    match source {
        SourceEncoding::Utf16Le => utf16le_bytes_to_utf16(bytes, permit_unpaired_surrogate),
        _ => {
            let s = to_utf8(bytes, source, permit_unpaired_surrogate)?;
            Ok(s.encode_utf16().collect())
        }
    }
}

fn utf16le_units(bytes: &[u8]) -> Result<Vec<u16>> {
    if bytes.len() % 2 != 0 {
        return Err(Error::ConversionFailure);
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect())
}

fn utf16le_bytes_to_utf8(bytes: &[u8], permit_unpaired_surrogate: bool) -> Result<String> {
    let units = utf16le_units(bytes)?;
    if permit_unpaired_surrogate {
        Ok(char::decode_utf16(units)
            .map(|r| r.unwrap_or(REPLACEMENT_CHARACTER))
            .collect())
    } else {
        char::decode_utf16(units)
            .collect::<core::result::Result<String, _>>()
            .map_err(|_| Error::ConversionFailure)
    }
}

fn utf16le_bytes_to_utf16(bytes: &[u8], permit_unpaired_surrogate: bool) -> Result<Vec<u16>> {
    let units = utf16le_units(bytes)?;
    if permit_unpaired_surrogate {
        return Ok(units);
    }
    // Strict mode: validate there is no unpaired surrogate, but return the
    // original code units (not a re-encoding) so positions stay exact.
    char::decode_utf16(units.iter().copied())
        .collect::<core::result::Result<Vec<char>, _>>()
        .map_err(|_| Error::ConversionFailure)?;
    Ok(units)
}

fn codepage_to_utf8(bytes: &[u8], cp: u16) -> Result<String> {
    let encoding = codepage::to_encoding(cp).ok_or(Error::ConversionFailure)?;
    let (decoded, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(Error::ConversionFailure);
    }
    Ok(decoded.into_owned())
}

/// A minimal modified-Base64 UTF-7 decoder (RFC 2152), used only for
/// `ascii_codepage == 65000`. `encoding_rs` does not implement UTF-7, so
/// this is hand-rolled against the spec for that one codepage value.
fn utf7_to_utf8(bytes: &[u8]) -> Result<String> {
    const B64_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

    fn b64_value(c: u8) -> Option<u8> {
        B64_ALPHABET.iter().position(|&b| b == c).map(|p| p as u8)
    }

    let mut out = String::new();
    let mut i = 0usize;
    while i < bytes.len() {
        let b = bytes[i];
        if b != b'+' {
            if b >= 0x80 {
                return Err(Error::ConversionFailure);
            }
            out.push(b as char);
            i += 1;
            continue;
        }
        // Shifted (base64) run starts after '+'.
        i += 1;
        if i < bytes.len() && bytes[i] == b'-' {
            out.push('+');
            i += 1;
            continue;
        }
        let mut bit_buffer: u32 = 0;
        let mut bits: u32 = 0;
        let mut units: Vec<u16> = Vec::new();
        while i < bytes.len() {
            match b64_value(bytes[i]) {
                Some(v) => {
                    bit_buffer = (bit_buffer << 6) | v as u32;
                    bits += 6;
                    i += 1;
                    if bits >= 16 {
                        bits -= 16;
                        units.push(((bit_buffer >> bits) & 0xFFFF) as u16);
                    }
                }
                None => break,
            }
        }
        if i < bytes.len() && bytes[i] == b'-' {
            i += 1;
        }
        let decoded = char::decode_utf16(units)
            .collect::<core::result::Result<String, _>>()
            .map_err(|_| Error::ConversionFailure)?;
        out.push_str(&decoded);
    }
    Ok(out)
}
