//! Encode a message, inspect the wire bytes, decode it back.
//!
//! Run with: `cargo run --example round_trip`

use bytes::Bytes;
use streamwire::{StreamMessage, StreamMessageCodec};

fn main() {
    let message = StreamMessage::builder()
        .qualifier("svc/echo")
        .sender_id("node-1")
        .data(Bytes::from_static(&[0x01, 0x02, 0x03]))
        .build();

    let wire = StreamMessageCodec::encode(&message).expect("encode");
    println!("encoded {} bytes:", wire.len());
    for chunk in wire.chunks(16) {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
        println!("  {}", hex.join(" "));
    }

    let decoded = StreamMessageCodec::decode(&wire).expect("decode");
    println!("qualifier: {:?}", decoded.qualifier());
    println!("senderId:  {:?}", decoded.sender_id());
    println!("streamId:  {:?}", decoded.stream_id());
    println!("data:      {:?}", decoded.data());

    // The payload is a view into the wire buffer, not a copy.
    let payload = decoded.data().expect("payload present");
    let aliased = wire.as_ptr() as usize <= payload.as_ptr() as usize
        && payload.as_ptr() as usize + payload.len()
            <= wire.as_ptr() as usize + wire.len();
    println!("payload aliases wire buffer: {aliased}");
}
