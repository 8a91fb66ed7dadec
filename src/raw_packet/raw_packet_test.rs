use super::*;

#[test]
fn test_raw_packet_roundtrip() {
    let tests = vec![
        (
            "valid",
            Bytes::from_static(&[
                0x81, 0xcb, 0x00, 0x02, // v=2, p=0, count=1, BYE, len=2
                0x90, 0x2f, 0x9e, 0x2e, // ssrc=0x902f9e2e
                0x03, 0x46, 0x4f, 0x4f, // len=3, text=FOO
            ]),
            Header {
                padding: false,
                count: 1,
                packet_type: PacketType::Goodbye,
                length: 2,
            },
            None,
        ),
        (
            "padding kept verbatim",
            Bytes::from_static(&[
                0xa9, 0xcd, 0x00, 0x02, // v=2, p=1, count=9, TSFB, len=2
                0x01, 0x02, 0x03, 0x04, // opaque
                0x05, 0x00, 0x00, 0x03, // opaque, padding
            ]),
            Header {
                padding: true,
                count: 9,
                packet_type: PacketType::TransportSpecificFeedback,
                length: 2,
            },
            None,
        ),
        (
            "unknown type",
            Bytes::from_static(&[
                0x80, 0xd0, 0x00, 0x01, // v=2, p=0, count=0, PT=208, len=1
                0xde, 0xad, 0xbe, 0xef,
            ]),
            Header {
                padding: false,
                count: 0,
                packet_type: PacketType::Unsupported,
                length: 1,
            },
            None,
        ),
        (
            "short header",
            Bytes::from_static(&[0x80]),
            Header::default(),
            Some(Error::PacketTooShort),
        ),
        (
            "invalid header",
            Bytes::from_static(&[
                // v=0, p=0, count=0, RR, len=4
                0x00, 0xc9, 0x00, 0x04,
            ]),
            Header::default(),
            Some(Error::BadVersion),
        ),
        (
            "length beyond buffer",
            Bytes::from_static(&[
                0x81, 0xcb, 0x00, 0x03, // v=2, p=0, count=1, BYE, len=3
                0x90, 0x2f, 0x9e, 0x2e,
            ]),
            Header::default(),
            Some(Error::PacketTooShort),
        ),
    ];

    for (name, data, want_header, want_error) in tests {
        let mut buf = data.clone();
        let result = RawPacket::unmarshal(&mut buf);

        match (result, want_error) {
            (Ok(pkt), None) => {
                assert_eq!(pkt.header(), want_header, "{name}: header");
                assert!(pkt.destination_ssrc().is_empty(), "{name}: destination");
                let out = pkt
                    .marshal()
                    .unwrap_or_else(|e| panic!("Marshal {name}: {e}"));
                assert_eq!(out, data, "{name} round trip");
            }
            (Err(got), Some(err)) => {
                assert_eq!(got, err, "Unmarshal {name}: err = {got:?}, want {err:?}")
            }
            (got, want_error) => panic!("Unmarshal {name}: got {got:?}, want {want_error:?}"),
        }
    }
}

#[test]
fn test_raw_packet_leaves_following_packets() {
    let mut data = Bytes::from_static(&[
        0x80, 0xd0, 0x00, 0x00, // v=2, p=0, count=0, PT=208, len=0
        0x81, 0xcb, 0x00, 0x01, // next packet
        0x90, 0x2f, 0x9e, 0x2e,
    ]);
    let pkt = RawPacket::unmarshal(&mut data).expect("unmarshal");
    assert_eq!(pkt.raw.len(), 4);
    assert_eq!(data.remaining(), 8);
}
