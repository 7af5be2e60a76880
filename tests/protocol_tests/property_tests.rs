//! Property Tests
//!
//! Randomised checks over the whole message set:
//! - decode(encode(m)) == m
//! - the size field always equals the encoded length
//! - any truncation fails cleanly instead of panicking

use bytes::Bytes;
use p9wire::protocol::{encode_message, HEADER_SIZE};
use p9wire::{Frame, Message, P9Error, Qid, Stat, WireString};
use proptest::collection::vec;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn wire_string() -> impl Strategy<Value = WireString> {
    prop_oneof![
        4 => "[a-zA-Z0-9._-]{0,24}".prop_map(WireString::from),
        1 => vec(any::<u8>(), 0..64).prop_map(WireString::from),
    ]
}

fn payload() -> impl Strategy<Value = Bytes> {
    vec(any::<u8>(), 0..512).prop_map(Bytes::from)
}

fn qid() -> impl Strategy<Value = Qid> {
    (any::<u8>(), any::<u32>(), any::<u64>()).prop_map(|(t, v, p)| Qid::new(t, v, p))
}

prop_compose! {
    fn stat()(
        stype in any::<u16>(),
        dev in any::<u32>(),
        qid in qid(),
        mode in any::<u32>(),
        atime in any::<u32>(),
        mtime in any::<u32>(),
        length in any::<u64>(),
        name in wire_string(),
        uid in wire_string(),
        gid in wire_string(),
        muid in wire_string(),
    ) -> Stat {
        Stat { stype, dev, qid, mode, atime, mtime, length, name, uid, gid, muid }
    }
}

fn session_message() -> impl Strategy<Value = Message> {
    prop_oneof![
        (any::<u32>(), wire_string())
            .prop_map(|(msize, version)| Message::Tversion { msize, version }),
        (any::<u32>(), wire_string())
            .prop_map(|(msize, version)| Message::Rversion { msize, version }),
        (any::<u32>(), wire_string(), wire_string())
            .prop_map(|(afid, uname, aname)| Message::Tauth { afid, uname, aname }),
        qid().prop_map(|aqid| Message::Rauth { aqid }),
        wire_string().prop_map(|ename| Message::Rerror { ename }),
        any::<u16>().prop_map(|oldtag| Message::Tflush { oldtag }),
        Just(Message::Rflush),
        (any::<u32>(), any::<u32>(), wire_string(), wire_string()).prop_map(
            |(fid, afid, uname, aname)| Message::Tattach {
                fid,
                afid,
                uname,
                aname
            }
        ),
        qid().prop_map(|qid| Message::Rattach { qid }),
    ]
}

fn file_message() -> impl Strategy<Value = Message> {
    prop_oneof![
        (any::<u32>(), any::<u32>(), vec(wire_string(), 0..16)).prop_map(
            |(fid, newfid, wnames)| Message::Twalk {
                fid,
                newfid,
                wnames
            }
        ),
        vec(qid(), 0..16).prop_map(|wqids| Message::Rwalk { wqids }),
        (any::<u32>(), any::<u8>()).prop_map(|(fid, mode)| Message::Topen { fid, mode }),
        (qid(), any::<u32>()).prop_map(|(qid, iounit)| Message::Ropen { qid, iounit }),
        (any::<u32>(), wire_string(), any::<u32>(), any::<u8>()).prop_map(
            |(fid, name, perm, mode)| Message::Tcreate {
                fid,
                name,
                perm,
                mode
            }
        ),
        (qid(), any::<u32>()).prop_map(|(qid, iounit)| Message::Rcreate { qid, iounit }),
        (any::<u32>(), any::<u64>(), any::<u32>())
            .prop_map(|(fid, offset, count)| Message::Tread { fid, offset, count }),
        payload().prop_map(|data| Message::Rread { data }),
        (any::<u32>(), any::<u64>(), payload())
            .prop_map(|(fid, offset, data)| Message::Twrite { fid, offset, data }),
        any::<u32>().prop_map(|count| Message::Rwrite { count }),
    ]
}

fn fid_message() -> impl Strategy<Value = Message> {
    prop_oneof![
        any::<u32>().prop_map(|fid| Message::Tclunk { fid }),
        Just(Message::Rclunk),
        any::<u32>().prop_map(|fid| Message::Tremove { fid }),
        Just(Message::Rremove),
        any::<u32>().prop_map(|fid| Message::Tstat { fid }),
        stat().prop_map(|stat| Message::Rstat { stat }),
        (any::<u32>(), stat()).prop_map(|(fid, stat)| Message::Twstat { fid, stat }),
        Just(Message::Rwstat),
    ]
}

fn message() -> impl Strategy<Value = Message> {
    prop_oneof![session_message(), file_message(), fid_message()]
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_roundtrip(tag in any::<u16>(), msg in message()) {
        let encoded = encode_message(tag, &msg).unwrap();
        let decoded = Frame::decode(&encoded).unwrap();
        prop_assert_eq!(decoded.header.tag, tag);
        prop_assert_eq!(decoded.message, msg);
    }

    #[test]
    fn prop_size_field_equals_frame_length(tag in any::<u16>(), msg in message()) {
        let encoded = encode_message(tag, &msg).unwrap();
        let size = u32::from_le_bytes([encoded[0], encoded[1], encoded[2], encoded[3]]);
        prop_assert_eq!(size as usize, encoded.len());
        prop_assert_eq!(msg.encoded_len(), encoded.len());
    }

    #[test]
    fn prop_truncated_stream_is_short_body(
        msg in message(),
        cut in any::<prop::sample::Index>(),
    ) {
        let encoded = encode_message(1, &msg).unwrap();
        prop_assume!(encoded.len() > HEADER_SIZE);

        // Drop 1..=body_len bytes from the end, keeping the header intact
        let body_len = encoded.len() - HEADER_SIZE;
        let drop = cut.index(body_len) + 1;
        let result = Frame::decode(&encoded[..encoded.len() - drop]);
        prop_assert!(matches!(result, Err(P9Error::ShortBody { .. })), "{:?}", result);
    }

    #[test]
    fn prop_shrunken_body_is_truncated(
        msg in message(),
        cut in any::<prop::sample::Index>(),
    ) {
        let encoded = encode_message(1, &msg).unwrap();
        prop_assume!(encoded.len() > HEADER_SIZE);

        // Cut the body and rewrite the size to match, so the body decoder
        // itself runs out of bytes
        let body_len = encoded.len() - HEADER_SIZE;
        let drop = cut.index(body_len) + 1;
        let mut shrunk = encoded[..encoded.len() - drop].to_vec();
        let size = shrunk.len() as u32;
        shrunk[0..4].copy_from_slice(&size.to_le_bytes());

        let result = Frame::decode(&shrunk);
        prop_assert!(matches!(result, Err(P9Error::Truncated { .. })), "{:?}", result);
    }

    #[test]
    fn prop_arbitrary_bytes_never_panic(bytes in vec(any::<u8>(), 0..256)) {
        let _ = Frame::decode(&bytes);
    }

    #[test]
    fn prop_walk_preserves_names(names in vec(wire_string(), 0..32)) {
        let msg = Message::Twalk { fid: 1, newfid: 2, wnames: names.clone() };
        let encoded = encode_message(0, &msg).unwrap();
        match Frame::decode(&encoded).unwrap().message {
            Message::Twalk { wnames, .. } => prop_assert_eq!(wnames, names),
            other => prop_assert!(false, "Expected Twalk, got {:?}", other),
        }
    }
}
