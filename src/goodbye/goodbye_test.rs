use super::*;

#[test]
fn test_goodbye_unmarshal() {
    let tests = vec![
        (
            "valid",
            Bytes::from_static(&[
                0x81, 0xcb, 0x00, 0x02, // v=2, p=0, count=1, BYE, len=2
                0x90, 0x2f, 0x9e, 0x2e, // ssrc=0x902f9e2e
                0x03, 0x46, 0x4f, 0x4f, // len=3, text=FOO
            ]),
            Goodbye {
                sources: vec![0x902f9e2e],
                reason: Bytes::from_static(b"FOO"),
            },
            None,
        ),
        (
            "no reason",
            Bytes::from_static(&[
                0x81, 0xcb, 0x00, 0x01, // v=2, p=0, count=1, BYE, len=1
                0x90, 0x2f, 0x9e, 0x2e, // source=0x902f9e2e
            ]),
            Goodbye {
                sources: vec![0x902f9e2e],
                reason: Bytes::new(),
            },
            None,
        ),
        (
            "invalid octet count",
            Bytes::from_static(&[
                0x81, 0xcb, 0x00, 0x02, // v=2, p=0, count=1, BYE, len=2
                0x90, 0x2f, 0x9e, 0x2e, // ssrc=0x902f9e2e
                0x04, 0x46, 0x4f, 0x4f, // len=4, text=FOO
            ]),
            Goodbye::default(),
            Some(Error::PacketTooShort),
        ),
        (
            "wrong type",
            Bytes::from_static(&[
                0x81, 0xca, 0x00, 0x02, // v=2, p=0, count=1, SDES, len=2
                0x90, 0x2f, 0x9e, 0x2e, // ssrc=0x902f9e2e
                0x03, 0x46, 0x4f, 0x4f, // len=3, text=FOO
            ]),
            Goodbye::default(),
            Some(Error::WrongType),
        ),
        (
            "short reason",
            Bytes::from_static(&[
                0x81, 0xcb, 0x00, 0x02, // v=2, p=0, count=1, BYE, len=2
                0x90, 0x2f, 0x9e, 0x2e, // ssrc=0x902f9e2e
                0x01, 0x46, 0x00, 0x00, // len=1, text=F + padding
            ]),
            Goodbye {
                sources: vec![0x902f9e2e],
                reason: Bytes::from_static(b"F"),
            },
            None,
        ),
        (
            "length beyond buffer",
            Bytes::from_static(&[
                0x81, 0xcb, 0x00, 0x03, // v=2, p=0, count=1, BYE, len=3
                0x90, 0x2f, 0x9e, 0x2e, // ssrc=0x902f9e2e
                0x01, 0x46, // len=1, text=F
            ]),
            Goodbye::default(),
            Some(Error::PacketTooShort),
        ),
        (
            "bad count in header",
            Bytes::from_static(&[
                0x82, 0xcb, 0x00, 0x01, // v=2, p=0, count=2, BYE, len=1
                0x90, 0x2f, 0x9e, 0x2e, // ssrc=0x902f9e2e
            ]),
            Goodbye::default(),
            Some(Error::PacketTooShort),
        ),
        (
            "empty packet",
            Bytes::from_static(&[
                // v=2, p=0, count=0, BYE, len=0
                0x80, 0xcb, 0x00, 0x00,
            ]),
            Goodbye::default(),
            None,
        ),
        (
            "nil",
            Bytes::from_static(&[]),
            Goodbye::default(),
            Some(Error::PacketTooShort),
        ),
    ];

    for (name, mut data, want, want_error) in tests {
        let got = Goodbye::unmarshal(&mut data);

        match (got, want_error) {
            (Ok(actual), None) => {
                assert_eq!(actual, want, "Unmarshal {name}: got {actual:?}, want {want:?}")
            }
            (Err(got_err), Some(err)) => {
                assert_eq!(got_err, err, "Unmarshal {name}: err = {got_err:?}, want {err:?}")
            }
            (got, want_error) => panic!("Unmarshal {name}: got {got:?}, want {want_error:?}"),
        }
    }
}

#[test]
fn test_goodbye_round_trip() {
    let too_many_sources = vec![0u32; COUNT_MAX + 1];
    let too_long_text = Bytes::from("x".repeat(SDES_MAX_OCTET_COUNT + 1));

    let tests = vec![
        ("empty", Goodbye::default(), None),
        (
            "valid",
            Goodbye {
                sources: vec![0x01020304, 0x05060708],
                reason: Bytes::from_static(b"because"),
            },
            None,
        ),
        (
            "empty reason",
            Goodbye {
                sources: vec![0x01020304],
                reason: Bytes::new(),
            },
            None,
        ),
        (
            "reason no source",
            Goodbye {
                sources: vec![],
                reason: Bytes::from_static(b"foo"),
            },
            None,
        ),
        (
            "short reason",
            Goodbye {
                sources: vec![],
                reason: Bytes::from_static(b"f"),
            },
            None,
        ),
        (
            "count overflow",
            Goodbye {
                sources: too_many_sources,
                reason: Bytes::new(),
            },
            Some(Error::TooManySources),
        ),
        (
            "reason too long",
            Goodbye {
                sources: vec![],
                reason: too_long_text,
            },
            Some(Error::ReasonTooLong),
        ),
    ];

    for (name, want, want_error) in tests {
        match (want.marshal(), want_error) {
            (Ok(mut data), None) => {
                assert_eq!(data.len() % 4, 0, "{name}: unaligned output");
                let actual =
                    Goodbye::unmarshal(&mut data).unwrap_or_else(|e| panic!("Unmarshal {name}: {e}"));
                assert_eq!(actual, want, "{name} round trip: got {actual:?}, want {want:?}");
            }
            (Err(got_err), Some(err)) => {
                assert_eq!(got_err, err, "Marshal {name}: err = {got_err:?}, want {err:?}")
            }
            (got, want_error) => panic!("Marshal {name}: got {got:?}, want {want_error:?}"),
        }
    }
}

#[test]
fn test_goodbye_marshal_bytes() {
    let bye = Goodbye {
        sources: vec![0x902f9e2e],
        reason: Bytes::from_static(b"FOOBAR"),
    };
    let data = bye.marshal().expect("marshal");
    assert_eq!(
        &data[..],
        &[
            0x81, 0xcb, 0x00, 0x03, // v=2, p=0, count=1, BYE, len=3
            0x90, 0x2f, 0x9e, 0x2e, // ssrc=0x902f9e2e
            0x06, 0x46, 0x4f, 0x4f, // len=6, text=FOOBAR
            0x42, 0x41, 0x52, 0x00, // zero padding
        ][..]
    );
}
