//! Property identifier name lookup, consulted only by the debug-trace
//! facility (spec §9, "PURPOSE & SCOPE": property-identifier lookup
//! tables are pure data, referenced by name only). This is a
//! representative subset of the Summary Information / Document Summary
//! Information tables from `libfwps_property_identifier.c`, not an
//! exhaustive reproduction.

use crate::guid::{self, Guid};
use crate::value_type;

/// One property identifier table entry: a symbolic name and a short
/// human-readable description, mirroring
/// `libfwps_property_identifiers_get_identifier`'s return shape.
pub struct PropertyIdentifier {
    pub name: &'static str,
    pub description: &'static str,
}

/// Look up a property identifier within the Set identified by `fmtid`,
/// for trace output only. `value_type` is normalised through
/// [`value_type::normalize_for_lookup`] before comparison, matching the
/// original's scoping of that aliasing to this lookup path alone —
/// [`crate::record::Record::value_type`] itself is never touched.
/// Returns `None` for any identifier this table does not carry; callers
/// must not treat that as a decode error.
pub fn lookup(fmtid: &Guid, entry_type: u32, value_type: u32) -> Option<PropertyIdentifier> {
    let value_type = value_type::normalize_for_lookup(value_type);
    if *fmtid == guid::SUMMARY_INFORMATION {
        summary_information_entry(entry_type, value_type)
    } else if *fmtid == guid::DOCUMENT_SUMMARY_INFORMATION {
        document_summary_information_entry(entry_type, value_type)
    } else {
        None
    }
}

macro_rules! table {
    ($fn_name:ident, $($id:literal, $vt:expr => $name:literal, $desc:literal;)+) => {
        fn $fn_name(entry_type: u32, value_type: u32) -> Option<PropertyIdentifier> {
            match (entry_type, value_type) {
                $(($id, v) if v == $vt => Some(PropertyIdentifier { name: $name, description: $desc }),)+
                _ => None,
            }
        }
    };
}

table!(summary_information_entry,
    0x01, value_type::VT_I2 => "codepage", "codepage used for 8-bit string properties in this set";
    0x02, value_type::VT_LPSTR => "title", "document title";
    0x03, value_type::VT_LPSTR => "subject", "document subject";
    0x04, value_type::VT_LPSTR => "author", "document author";
    0x05, value_type::VT_LPSTR => "keywords", "document keywords";
    0x06, value_type::VT_LPSTR => "comments", "document comments";
    0x07, value_type::VT_LPSTR => "template", "document template name";
    0x08, value_type::VT_LPSTR => "last_saved_by", "last user to save the document";
    0x09, value_type::VT_LPSTR => "revision_number", "document revision number";
    0x0a, value_type::VT_FILETIME => "total_editing_time", "cumulative editing time";
    0x0b, value_type::VT_FILETIME => "last_printed", "last-printed timestamp";
    0x0c, value_type::VT_FILETIME => "create_time", "creation timestamp";
    0x0d, value_type::VT_FILETIME => "last_saved_time", "last-saved timestamp";
    0x0e, value_type::VT_I4 => "number_of_pages", "page count";
    0x0f, value_type::VT_I4 => "number_of_words", "word count";
    0x10, value_type::VT_I4 => "number_of_characters", "character count";
    0x12, value_type::VT_LPSTR => "application_name", "authoring application name";
    0x13, value_type::VT_I4 => "security", "document security flags";
);

table!(document_summary_information_entry,
    0x01, value_type::VT_I2 => "codepage", "codepage used for 8-bit string properties in this set";
    0x02, value_type::VT_LPSTR => "category", "document category";
    0x03, value_type::VT_LPSTR => "presentation_target", "intended presentation format";
    0x04, value_type::VT_I4 => "bytes", "byte count";
    0x05, value_type::VT_I4 => "lines", "line count";
    0x06, value_type::VT_I4 => "paragraphs", "paragraph count";
    0x07, value_type::VT_I4 => "slides", "slide count";
    0x08, value_type::VT_I4 => "notes", "notes count";
    0x09, value_type::VT_I4 => "hidden_slides", "hidden slide count";
    0x0a, value_type::VT_I4 => "multimedia_clips", "embedded multimedia clip count";
    0x0b, value_type::VT_BOOL => "scale_crop", "thumbnail scale-crop flag";
    0x0e, value_type::VT_BOOL => "links_up_to_date", "linked object freshness flag";
    0x11, value_type::VT_BOOL => "shared_document", "shared-document flag";
    0x17, value_type::VT_LPSTR => "content_type", "document content type";
    0x18, value_type::VT_LPSTR => "content_status", "document content status";
    0x1a, value_type::VT_LPSTR => "version", "application version string";
);
