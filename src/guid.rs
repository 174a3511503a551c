//! Well-known format class identifiers (FMTIDs).
//!
//! GUID pretty-printing and a general-purpose GUID type are explicitly out
//! of scope for this crate (spec §1) — formatting is the debug-trace
//! collaborator's job. The core only ever needs byte-for-byte equality
//! against a handful of well-known values, so FMTIDs are plain `[u8; 16]`
//! little-endian byte arrays, exactly as they sit on the wire.

/// A 16-byte little-endian GUID, as stored on the wire.
pub type Guid = [u8; 16];

/// `{d5cdd505-2e9c-101b-9397-08002b2cf9ae}` — the "named properties" FMTID.
///
/// A Set whose `format_class_identifier` equals this value carries
/// UTF-16-named records; every other FMTID carries numeric records.
pub const NAMED_PROPERTIES: Guid = [
    0x05, 0xd5, 0xcd, 0xd5, 0x9c, 0x2e, 0x1b, 0x10, 0x93, 0x97, 0x08, 0x00, 0x2b, 0x2c, 0xf9, 0xae,
];

/// `{f29f85e0-4ff9-1068-ab91-08002b27b3d9}` — Summary Information.
pub const SUMMARY_INFORMATION: Guid = [
    0xe0, 0x85, 0x9f, 0xf2, 0xf9, 0x4f, 0x68, 0x10, 0xab, 0x91, 0x08, 0x00, 0x2b, 0x27, 0xb3, 0xd9,
];

/// `{d5cdd502-2e9c-101b-9397-08002b2cf9ae}` — Document Summary Information.
pub const DOCUMENT_SUMMARY_INFORMATION: Guid = [
    0x02, 0xd5, 0xcd, 0xd5, 0x9c, 0x2e, 0x1b, 0x10, 0x93, 0x97, 0x08, 0x00, 0x2b, 0x2c, 0xf9, 0xae,
];

/// Same byte value as [`NAMED_PROPERTIES`]; the wire format reuses one
/// FMTID for both the "named properties" marker and "user defined
/// properties" semantics (see spec §6.2).
pub const USER_DEFINED_PROPERTIES: Guid = NAMED_PROPERTIES;
