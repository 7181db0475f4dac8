//! Integration tests for streamwire.
//!
//! These tests exercise the codec through its public surface only:
//! round-trips across attribute subsets, wire-order guarantees, the
//! zero-copy payload contract, and registry routing of decoded
//! messages.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use streamwire::codec::{StreamMessageCodec, MAX_PART_VALUE_SIZE};
use streamwire::handler::MethodRegistry;
use streamwire::{DecodeError, EncodeError, StreamMessage};

/// Read one part's (name, type, value) from a raw wire view.
fn pull_part(view: &mut Bytes) -> (String, u8, Bytes) {
    let name_len = view.get_u32() as usize;
    let name = String::from_utf8(view.split_to(name_len).to_vec()).unwrap();
    let type_byte = view.get_u8();
    let value_len = view.get_u32() as usize;
    let value = view.split_to(value_len);
    (name, type_byte, value)
}

/// Append a raw part to a wire buffer.
fn push_part(buf: &mut BytesMut, name: &str, type_byte: u8, value: &[u8]) {
    buf.put_u32(name.len() as u32);
    buf.put_slice(name.as_bytes());
    buf.put_u8(type_byte);
    buf.put_u32(value.len() as u32);
    buf.put_slice(value);
}

#[test]
fn test_round_trip_full_message() {
    let message = StreamMessage::builder()
        .qualifier("svc/greeting")
        .sender_id("node-7")
        .stream_id("s-100")
        .data(Bytes::from_static(b"hello over the wire"))
        .build();

    let wire = StreamMessageCodec::encode(&message).unwrap();
    let decoded = StreamMessageCodec::decode(&wire).unwrap();

    assert_eq!(decoded, message);
}

#[test]
fn test_round_trip_attribute_subsets() {
    let qualifier = "svc/echo";
    let sender_id = "node-1";
    let stream_id = "s-9";
    let data = Bytes::from_static(&[0xCA, 0xFE]);

    // Every subset of the four attributes.
    for mask in 0u8..16 {
        let mut builder = StreamMessage::builder();
        if mask & 1 != 0 {
            builder = builder.qualifier(qualifier);
        }
        if mask & 2 != 0 {
            builder = builder.sender_id(sender_id);
        }
        if mask & 4 != 0 {
            builder = builder.stream_id(stream_id);
        }
        if mask & 8 != 0 {
            builder = builder.data(data.clone());
        }
        let message = builder.build();

        let wire = StreamMessageCodec::encode(&message).unwrap();
        let decoded = StreamMessageCodec::decode(&wire).unwrap();
        assert_eq!(decoded, message, "subset mask {mask:#06b}");
    }
}

#[test]
fn test_canonical_part_order() {
    // The spec scenario: three present attributes encode to exactly
    // three parts in flat-then-match order, no streamId part.
    let message = StreamMessage::builder()
        .qualifier("svc/echo")
        .sender_id("node-1")
        .data(Bytes::from_static(&[0x01, 0x02, 0x03]))
        .build();

    let wire = StreamMessageCodec::encode(&message).unwrap();
    let mut view = wire.clone();

    let (name, type_byte, value) = pull_part(&mut view);
    assert_eq!((name.as_str(), type_byte, &value[..]), ("qualifier", 0, &b"svc/echo"[..]));

    let (name, type_byte, value) = pull_part(&mut view);
    assert_eq!((name.as_str(), type_byte, &value[..]), ("senderId", 0, &b"node-1"[..]));

    let (name, type_byte, value) = pull_part(&mut view);
    assert_eq!((name.as_str(), type_byte, &value[..]), ("data", 1, &[0x01, 0x02, 0x03][..]));

    assert!(view.is_empty());

    let decoded = StreamMessageCodec::decode(&wire).unwrap();
    assert_eq!(decoded, message);
    assert!(!decoded.contains_stream_id());
}

#[test]
fn test_absence_symmetry_for_data() {
    let without_data = StreamMessage::builder().qualifier("svc/echo").build();
    let wire = StreamMessageCodec::encode(&without_data).unwrap();

    // No part named "data" anywhere on the wire.
    let mut view = wire.clone();
    while !view.is_empty() {
        let (name, _, _) = pull_part(&mut view);
        assert_ne!(name, "data");
    }

    let decoded = StreamMessageCodec::decode(&wire).unwrap();
    assert!(!decoded.contains_data());
    assert_eq!(decoded.data(), None);
}

#[test]
fn test_empty_data_stays_present() {
    let message = StreamMessage::builder().data(Bytes::new()).build();

    let wire = StreamMessageCodec::encode(&message).unwrap();
    let decoded = StreamMessageCodec::decode(&wire).unwrap();

    assert!(decoded.contains_data());
    assert!(decoded.data().unwrap().is_empty());
}

#[test]
fn test_empty_string_stays_present() {
    let message = StreamMessage::builder().qualifier("").build();

    let wire = StreamMessageCodec::encode(&message).unwrap();
    let decoded = StreamMessageCodec::decode(&wire).unwrap();

    assert!(decoded.contains_qualifier());
    assert_eq!(decoded.qualifier(), Some(""));
}

#[test]
fn test_decode_is_non_destructive() {
    let message = StreamMessage::builder()
        .qualifier("svc/echo")
        .data(Bytes::from_static(b"payload"))
        .build();
    let wire = StreamMessageCodec::encode(&message).unwrap();
    let snapshot = wire.clone();

    let first = StreamMessageCodec::decode(&wire).unwrap();

    // The buffer handle is untouched and can be read again.
    assert_eq!(wire, snapshot);
    assert_eq!(wire.len(), snapshot.len());
    let second = StreamMessageCodec::decode(&wire).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_decoded_payload_aliases_source_buffer() {
    let message = StreamMessage::builder()
        .data(Bytes::from_static(b"zero copy payload"))
        .build();
    let wire = StreamMessageCodec::encode(&message).unwrap();

    let decoded = StreamMessageCodec::decode(&wire).unwrap();
    let payload = decoded.data().unwrap();

    // The payload's bytes live inside the wire buffer's allocation.
    let start = wire.as_ptr() as usize;
    let end = start + wire.len();
    let payload_start = payload.as_ptr() as usize;
    assert!(payload_start >= start && payload_start + payload.len() <= end);
}

#[test]
fn test_payload_outlives_source_handle() {
    let wire = {
        let message = StreamMessage::builder()
            .data(Bytes::from_static(b"kept alive"))
            .build();
        StreamMessageCodec::encode(&message).unwrap()
    };

    let decoded = StreamMessageCodec::decode(&wire).unwrap();
    drop(wire);

    // The alias holds a reference on the backing allocation.
    assert_eq!(&decoded.data().unwrap()[..], b"kept alive");
}

#[test]
fn test_unknown_parts_tolerated() {
    let message = StreamMessage::builder().qualifier("svc/echo").build();
    let wire = StreamMessageCodec::encode(&message).unwrap();

    // Append parts from a hypothetical newer protocol revision.
    let mut extended = BytesMut::from(&wire[..]);
    push_part(&mut extended, "deadline", 0, b"2500ms");
    push_part(&mut extended, "checksum", 1, &[0xAB, 0xCD]);

    let decoded = StreamMessageCodec::decode(&extended.freeze()).unwrap();
    assert_eq!(decoded, message);
}

#[test]
fn test_truncated_buffer_rejected() {
    let message = StreamMessage::builder()
        .qualifier("svc/echo")
        .sender_id("node-1")
        .build();
    let wire = StreamMessageCodec::encode(&message).unwrap();

    // Every strict prefix that cuts into a part must fail; a prefix
    // ending exactly on a part boundary decodes to fewer fields.
    let truncated = wire.slice(..wire.len() - 1);
    let err = StreamMessageCodec::decode(&truncated).unwrap_err();
    assert!(matches!(err, DecodeError::Malformed(_)));
}

#[test]
fn test_encode_failure_leaves_nothing_behind() {
    let payload = Bytes::from_static(&[0x55; 64]);
    let message = StreamMessage::builder()
        .qualifier("svc/echo")
        .data(payload.clone())
        .build();

    let err = StreamMessageCodec::encode_with_limit(&message, 32).unwrap_err();
    assert!(matches!(err, EncodeError::PartTooLarge { .. }));

    // The failed call dropped its buffer: the payload handle the
    // message holds is the only remaining reference path, and the
    // codec still works.
    let wire = StreamMessageCodec::encode_with_limit(&message, MAX_PART_VALUE_SIZE).unwrap();
    let decoded = StreamMessageCodec::decode(&wire).unwrap();
    assert_eq!(decoded, message);
}

#[tokio::test]
async fn test_registry_routes_decoded_message() {
    let mut registry = MethodRegistry::new();
    registry.register_fn("svc/echo", |request: StreamMessage| async move {
        Ok(StreamMessage::from(&request).sender_id("server").build())
    });

    let request = StreamMessage::builder()
        .qualifier("svc/echo")
        .sender_id("node-1")
        .data(Bytes::from_static(b"ping"))
        .build();
    let wire = StreamMessageCodec::encode(&request).unwrap();

    let decoded = StreamMessageCodec::decode(&wire).unwrap();
    let qualifier = decoded.qualifier().unwrap();
    assert!(registry.contains_invoker(qualifier));

    let invoker = registry.invoker(qualifier).unwrap();
    let response = invoker.invoke(decoded).await.unwrap();

    assert_eq!(response.qualifier(), Some("svc/echo"));
    assert_eq!(response.sender_id(), Some("server"));
    assert_eq!(response.data().map(|d| &d[..]), Some(&b"ping"[..]));
}
