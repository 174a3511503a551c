//! End-to-end decode scenarios exercising the full Store -> Set -> Record
//! pipeline through the public API only.

use fwps::value_type as vt;
use fwps::{guid, Set, Store};

fn le32(v: u32) -> [u8; 4] {
    v.to_le_bytes()
}

fn utf16le(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

fn numeric_record(entry_type: u32, value_type: u32, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&le32(0));
    out.extend_from_slice(&le32(entry_type));
    out.push(0);
    out.extend_from_slice(&le32(value_type));
    out.extend_from_slice(payload);
    let size = out.len() as u32;
    out[0..4].copy_from_slice(&le32(size));
    out
}

fn named_record(name: &str, value_type: u32, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&le32(0));
    let name_bytes = utf16le(name);
    out.extend_from_slice(&le32(name_bytes.len() as u32));
    out.push(0);
    out.extend_from_slice(&name_bytes);
    out.extend_from_slice(&le32(value_type));
    out.extend_from_slice(payload);
    let size = out.len() as u32;
    out[0..4].copy_from_slice(&le32(size));
    out
}

fn lpwstr_payload(s: &str) -> Vec<u8> {
    let units = utf16le(s);
    let mut out = le32(units.len() as u32 / 2).to_vec();
    out.extend_from_slice(&units);
    out
}

fn wrap_set(fmtid: guid::Guid, records: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&le32(0));
    out.extend_from_slice(b"1SPS");
    out.extend_from_slice(&fmtid);
    for record in records {
        out.extend_from_slice(record);
    }
    out.extend_from_slice(&le32(0));
    let size = out.len() as u32;
    out[0..4].copy_from_slice(&le32(size));
    out
}

fn wrap_store(sets: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    for set in sets {
        out.extend_from_slice(set);
    }
    out.extend_from_slice(&le32(0));
    out
}

const SID: &str = "S-1-5-21-4060289323-1997010220-3924801681-1000";

/// E2E-1: a set with one numeric VT_LPWSTR SID record.
#[test]
fn e2e_1_numeric_sid_record() {
    let record = numeric_record(4, vt::VT_LPWSTR, &lpwstr_payload(SID));
    let arbitrary_fmtid: guid::Guid = [
        0xe2, 0x8a, 0x58, 0x46, 0xbc, 0x4c, 0x38, 0x43, 0xbb, 0xfc, 0x13, 0x93, 0x26, 0x98, 0x6d,
        0xce,
    ];
    let bytes = wrap_store(&[wrap_set(arbitrary_fmtid, &[record])]);

    let store = Store::decode(&bytes, 1252).unwrap();
    assert_eq!(store.set_count(), 1);
    let set = &store.sets()[0];
    assert!(!set.is_named());
    assert_eq!(set.record_count(), 1);
    let record = &set.records()[0];
    assert_eq!(record.entry_type(), 4);
    assert_eq!(record.value_type(), vt::VT_LPWSTR);
    assert_eq!(record.as_utf8().unwrap(), SID);
}

/// E2E-2: a named record with a single VT_LPWSTR value.
#[test]
fn e2e_2_named_record() {
    let record = named_record("A", vt::VT_LPWSTR, &lpwstr_payload(SID));
    let bytes = wrap_store(&[wrap_set(guid::NAMED_PROPERTIES, &[record])]);

    let store = Store::decode(&bytes, 1252).unwrap();
    let set = &store.sets()[0];
    assert!(set.is_named());
    let record = &set.records()[0];
    assert_eq!(record.entry_type(), 0);
    assert_eq!(record.entry_name_utf8().unwrap().as_deref(), Some("A"));
    assert_eq!(record.as_utf8().unwrap(), SID);
}

/// E2E-3: a VT_LPWSTR | VT_VECTOR of three GUID-shaped strings.
#[test]
fn e2e_3_vector_of_guid_strings() {
    let guids = [
        "{e2858046-4cbc-4338-bbfc-1393-2698-6dce}",
        "{05d5cdd5-9c2e-1b10-9397-0800-2b2c-f9ae}",
        "{e0859ff2-f94f-6810-ab91-0800-2b27-b3d9}",
    ];
    let mut payload = le32(guids.len() as u32).to_vec();
    for g in guids {
        let units = utf16le(g);
        payload.extend_from_slice(&le32(units.len() as u32 / 2));
        payload.extend_from_slice(&units);
        if (4 + units.len()) % 4 != 0 {
            payload.extend_from_slice(&[0, 0]);
        }
    }
    let record = numeric_record(5, vt::VT_LPWSTR | vt::VT_VECTOR, &payload);
    let bytes = wrap_store(&[wrap_set(guid::SUMMARY_INFORMATION, &[record])]);

    let store = Store::decode(&bytes, 1252).unwrap();
    let record = &store.sets()[0].records()[0];
    assert_eq!(record.value_type(), vt::VT_LPWSTR | vt::VT_VECTOR);
    let data = record.raw_data().unwrap();

    let mut offset = 0usize;
    let mut recovered = Vec::new();
    while offset < data.len() {
        let len_chars =
            u32::from_le_bytes(data[offset..offset + 4].try_into().unwrap()) as usize;
        offset += 4;
        let byte_len = len_chars * 2;
        let units: Vec<u16> = data[offset..offset + byte_len]
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        recovered.push(String::from_utf16(&units).unwrap());
        offset += byte_len;
        if offset + 2 <= data.len() && data[offset] == 0 && data[offset + 1] == 0 {
            offset += 2;
        }
    }
    assert_eq!(recovered, guids);
}

/// E2E-4: truncation at every boundary of a Set never succeeds and never
/// panics (a Set, unlike a Store, always carries its own size prefix, so
/// every strict prefix is truncated input rather than a valid shorter
/// store).
#[test]
fn e2e_4_truncation_at_every_boundary() {
    let record = numeric_record(4, vt::VT_LPWSTR, &lpwstr_payload(SID));
    let arbitrary_fmtid = guid::SUMMARY_INFORMATION;
    let bytes = wrap_set(arbitrary_fmtid, &[record]);

    for n in 0..bytes.len() {
        assert!(Set::decode(&bytes[..n], 1252).is_err());
    }
    assert!(Set::decode(&bytes, 1252).is_ok());
}

/// E2E-5: signature corruption yields SignatureMismatch.
#[test]
fn e2e_5_signature_corruption() {
    let record = numeric_record(4, vt::VT_LPWSTR, &lpwstr_payload(SID));
    let mut bytes = wrap_store(&[wrap_set(guid::SUMMARY_INFORMATION, &[record])]);
    bytes[4] = b'2';
    let err = Store::decode(&bytes, 1252).unwrap_err();
    assert!(matches!(err, fwps::Error::SignatureMismatch));
}

/// E2E-6: an empty store decodes to zero sets.
#[test]
fn e2e_6_empty_store() {
    let bytes = [0u8, 0, 0, 0];
    let store = Store::decode(&bytes, 1252).unwrap();
    assert_eq!(store.set_count(), 0);
}
