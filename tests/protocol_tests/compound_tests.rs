//! Compound Codec Tests
//!
//! Tests for QID and stat record encoding/decoding.

use p9wire::codec::{WireReader, WireWriter};
use p9wire::protocol::{
    read_qid, read_stat, read_stat_with_len, write_qid, write_stat, write_stat_with_len, Qid,
    Stat, DMDIR, QID_SIZE, QTDIR, STAT_FIXED_SIZE,
};
use p9wire::P9Error;

// =============================================================================
// Helper Functions
// =============================================================================

fn sample_stat() -> Stat {
    Stat {
        stype: 0x4D,
        dev: 7,
        qid: Qid::new(QTDIR, 3, 0x0102_0304_0506_0708),
        mode: DMDIR | 0o755,
        atime: 1_700_000_000,
        mtime: 1_700_000_123,
        length: 0,
        name: "lib".into(),
        uid: "glenda".into(),
        gid: "sys".into(),
        muid: "bootes".into(),
    }
}

fn encode_stat(stat: &Stat) -> Vec<u8> {
    let mut w = WireWriter::new();
    write_stat(&mut w, stat).unwrap();
    w.as_bytes().to_vec()
}

// =============================================================================
// QID Tests
// =============================================================================

#[test]
fn test_qid_wire_format() {
    let qid = Qid::new(0x80, 0x0403_0201, 0x0C0B_0A09_0807_0605);
    let mut w = WireWriter::new();
    write_qid(&mut w, &qid);

    // type(1) version(4) path(8)
    assert_eq!(w.len(), QID_SIZE);
    assert_eq!(
        w.as_bytes(),
        &[0x80, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C]
    );
}

#[test]
fn test_qid_decode() {
    let qid = Qid::new(QTDIR, u32::MAX, u64::MAX);
    let mut w = WireWriter::new();
    write_qid(&mut w, &qid);

    let mut r = WireReader::new(w.freeze());
    let decoded = read_qid(&mut r, "qid").unwrap();
    assert_eq!(decoded, qid);
    assert!(decoded.is_dir());
    assert_eq!(r.remaining(), 0);
}

#[test]
fn test_qid_truncated() {
    let mut r = WireReader::from_slice(&[0u8; 12]);
    match read_qid(&mut r, "aqid") {
        Err(P9Error::Truncated { field, .. }) => assert_eq!(field, "aqid"),
        other => panic!("Expected Truncated, got {:?}", other),
    }
}

#[test]
fn test_qid_display() {
    let qid = Qid::new(QTDIR, 2, 0x2a);
    assert_eq!(qid.to_string(), "(000000000000002a 2 d)");
}

// =============================================================================
// Stat Tests
// =============================================================================

#[test]
fn test_stat_size_prefix_is_accurate() {
    let stat = sample_stat();
    let bytes = encode_stat(&stat);

    let declared = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
    assert_eq!(declared, bytes.len() - 2);
    assert_eq!(declared, STAT_FIXED_SIZE + 3 + 6 + 3 + 6);
    assert_eq!(declared, stat.size());
}

#[test]
fn test_stat_field_order() {
    let bytes = encode_stat(&sample_stat());

    // size(2) type(2) dev(4) qid(13) mode(4) atime(4) mtime(4) length(8) = 41
    assert_eq!(&bytes[2..4], &0x4Du16.to_le_bytes());
    assert_eq!(&bytes[4..8], &7u32.to_le_bytes());
    assert_eq!(bytes[8], QTDIR);
    assert_eq!(&bytes[21..25], &(DMDIR | 0o755).to_le_bytes());
    assert_eq!(&bytes[41..43], &[0x03, 0x00]);
    assert_eq!(&bytes[43..46], b"lib");
    assert_eq!(&bytes[46..48], &[0x06, 0x00]);
    assert_eq!(&bytes[48..54], b"glenda");
}

#[test]
fn test_stat_decode() {
    let stat = sample_stat();
    let mut r = WireReader::from_slice(&encode_stat(&stat));
    assert_eq!(read_stat(&mut r, false).unwrap(), stat);
    assert_eq!(r.remaining(), 0);
}

#[test]
fn test_stat_prefix_ignored_by_default() {
    let mut bytes = encode_stat(&sample_stat());
    // Lie about the record size
    bytes[0] = 0x01;
    bytes[1] = 0x00;

    let mut r = WireReader::from_slice(&bytes);
    assert_eq!(read_stat(&mut r, false).unwrap(), sample_stat());
}

#[test]
fn test_stat_prefix_checked_when_strict() {
    let mut bytes = encode_stat(&sample_stat());
    let actual = bytes.len() - 2;
    bytes[0] = 0x01;
    bytes[1] = 0x00;

    let mut r = WireReader::from_slice(&bytes);
    match read_stat(&mut r, true) {
        Err(P9Error::StatLengthMismatch { declared, actual: used }) => {
            assert_eq!(declared, 1);
            assert_eq!(used, actual);
        }
        other => panic!("Expected StatLengthMismatch, got {:?}", other),
    }
}

#[test]
fn test_strict_accepts_accurate_prefixes() {
    let stat = sample_stat();
    let mut w = WireWriter::new();
    write_stat_with_len(&mut w, &stat).unwrap();

    let mut r = WireReader::new(w.freeze());
    assert_eq!(read_stat_with_len(&mut r, true).unwrap(), stat);
}

#[test]
fn test_stat_with_len_outer_prefix() {
    let stat = sample_stat();
    let mut w = WireWriter::new();
    write_stat_with_len(&mut w, &stat).unwrap();
    let bytes = w.as_bytes();

    let statlen = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
    let size = u16::from_le_bytes([bytes[2], bytes[3]]) as usize;
    assert_eq!(statlen, bytes.len() - 2);
    assert_eq!(size, statlen - 2);
}

#[test]
fn test_stat_outer_prefix_checked_when_strict() {
    let mut w = WireWriter::new();
    write_stat_with_len(&mut w, &sample_stat()).unwrap();
    let mut bytes = w.as_bytes().to_vec();
    bytes[0] = bytes[0].wrapping_add(1);

    let mut r = WireReader::from_slice(&bytes);
    assert!(matches!(
        read_stat_with_len(&mut r, true),
        Err(P9Error::StatLengthMismatch { .. })
    ));

    let mut r = WireReader::from_slice(&bytes);
    assert!(read_stat_with_len(&mut r, false).is_ok());
}

#[test]
fn test_stat_truncated_at_each_field() {
    let bytes = encode_stat(&sample_stat());

    for cut in 0..bytes.len() {
        let mut r = WireReader::from_slice(&bytes[..cut]);
        assert!(
            matches!(read_stat(&mut r, false), Err(P9Error::Truncated { .. })),
            "cut at {} should be Truncated",
            cut
        );
    }
}

#[test]
fn test_stat_truncation_names_field() {
    let bytes = encode_stat(&sample_stat());
    // Cut inside the uid string
    let mut r = WireReader::from_slice(&bytes[..50]);
    match read_stat(&mut r, false) {
        Err(P9Error::Truncated { field, offset, .. }) => {
            assert_eq!(field, "stat.uid");
            assert_eq!(offset, 46);
        }
        other => panic!("Expected Truncated, got {:?}", other),
    }
}

#[test]
fn test_stat_empty_strings() {
    let stat = Stat::default();
    let bytes = encode_stat(&stat);
    assert_eq!(bytes.len(), 2 + STAT_FIXED_SIZE);

    let mut r = WireReader::from_slice(&bytes);
    assert_eq!(read_stat(&mut r, true).unwrap(), stat);
}

#[test]
fn test_stat_too_large_for_prefix() {
    let big = "x".repeat(40_000);
    let stat = Stat {
        name: big.as_str().into(),
        uid: big.as_str().into(),
        ..Stat::default()
    };

    let mut w = WireWriter::new();
    assert!(matches!(
        write_stat(&mut w, &stat),
        Err(P9Error::Overflow { field: "stat.size", .. })
    ));
}

#[test]
fn test_statlen_overflow_writes_nothing() {
    // Record size 65534 fits its own prefix, but statlen = size + 2 does not
    let stat = Stat {
        name: vec![b'n'; 65534 - STAT_FIXED_SIZE].into(),
        ..Stat::default()
    };
    assert_eq!(stat.size(), 65534);

    let mut w = WireWriter::new();
    w.write_u32(0xFEED_F00D);
    match write_stat_with_len(&mut w, &stat) {
        Err(P9Error::Overflow { field, len }) => {
            assert_eq!(field, "statlen");
            assert_eq!(len, 65536);
        }
        other => panic!("Expected Overflow, got {:?}", other),
    }
    assert_eq!(w.len(), 4);

    // The bare record still fits
    write_stat(&mut w, &stat).unwrap();
    assert_eq!(w.len(), 4 + 2 + 65534);
}

#[test]
fn test_stat_size_overflow_writes_nothing() {
    let big = "x".repeat(40_000);
    let stat = Stat {
        name: big.as_str().into(),
        uid: big.as_str().into(),
        ..Stat::default()
    };

    let mut w = WireWriter::new();
    w.write_u8(1);
    assert!(write_stat(&mut w, &stat).is_err());
    assert!(matches!(
        write_stat_with_len(&mut w, &stat),
        Err(P9Error::Overflow { field: "stat.size", .. })
    ));
    assert_eq!(w.as_bytes(), &[1u8]);
}
