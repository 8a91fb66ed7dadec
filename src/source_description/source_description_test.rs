use super::*;

#[test]
fn test_source_description_unmarshal() {
    let tests = vec![
        (
            "nil",
            Bytes::from_static(&[]),
            SourceDescription::default(),
            Some(Error::PacketTooShort),
        ),
        (
            "no chunks",
            Bytes::from_static(&[
                // v=2, p=0, count=0, SDES, len=0
                0x80, 0xca, 0x00, 0x00,
            ]),
            SourceDescription::default(),
            None,
        ),
        (
            "missing type",
            Bytes::from_static(&[
                // v=2, p=0, count=1, SDES, len=1
                0x81, 0xca, 0x00, 0x01, // ssrc=0x00000000
                0x00, 0x00, 0x00, 0x00,
            ]),
            SourceDescription::default(),
            Some(Error::PacketTooShort),
        ),
        (
            "bad cname length",
            Bytes::from_static(&[
                // v=2, p=0, count=1, SDES, len=2
                0x81, 0xca, 0x00, 0x02, // ssrc=0x00000000
                0x00, 0x00, 0x00, 0x00, // CNAME, len=5, content=A
                0x01, 0x05, 0x41, 0x00,
            ]),
            SourceDescription::default(),
            Some(Error::PacketTooShort),
        ),
        (
            "no end",
            Bytes::from_static(&[
                // v=2, p=0, count=1, SDES, len=2
                0x81, 0xca, 0x00, 0x02, // ssrc=0x00000000
                0x00, 0x00, 0x00, 0x00, // CNAME, len=2, content=AB
                0x01, 0x02, 0x41, 0x42,
                // Missing END
            ]),
            SourceDescription::default(),
            Some(Error::PacketTooShort),
        ),
        (
            "zero item chunk",
            Bytes::from_static(&[
                // v=2, p=0, count=1, SDES, len=2
                0x81, 0xca, 0x00, 0x02, // ssrc=0x01020304
                0x01, 0x02, 0x03, 0x04, // END + padding
                0x00, 0x00, 0x00, 0x00,
            ]),
            SourceDescription {
                chunks: vec![SourceDescriptionChunk {
                    source: 0x01020304,
                    items: vec![],
                }],
            },
            None,
        ),
        (
            "wrong type",
            Bytes::from_static(&[
                // v=2, p=0, count=1, SR, len=2
                0x81, 0xc8, 0x00, 0x02, // ssrc=0x01020304
                0x01, 0x02, 0x03, 0x04, // END + padding
                0x00, 0x00, 0x00, 0x00,
            ]),
            SourceDescription::default(),
            Some(Error::WrongType),
        ),
        (
            "bad count in header",
            Bytes::from_static(&[
                // v=2, p=0, count=2, SDES, len=2
                0x82, 0xca, 0x00, 0x02, // ssrc=0x01020304
                0x01, 0x02, 0x03, 0x04, // END + padding
                0x00, 0x00, 0x00, 0x00,
            ]),
            SourceDescription::default(),
            Some(Error::InvalidHeader),
        ),
        (
            "empty string",
            Bytes::from_static(&[
                // v=2, p=0, count=1, SDES, len=2
                0x81, 0xca, 0x00, 0x02, // ssrc=0x01020304
                0x01, 0x02, 0x03, 0x04, // CNAME, len=0
                0x01, 0x00, // END + padding
                0x00, 0x00,
            ]),
            SourceDescription {
                chunks: vec![SourceDescriptionChunk {
                    source: 0x01020304,
                    items: vec![SourceDescriptionItem {
                        sdes_type: SdesType::SdesCname,
                        text: Bytes::from_static(b""),
                    }],
                }],
            },
            None,
        ),
        (
            "packet padding after chunk",
            Bytes::from_static(&[
                // v=2, p=1, count=1, SDES, len=3
                0xa1, 0xca, 0x00, 0x03, // ssrc=0x01020304
                0x01, 0x02, 0x03, 0x04, // CNAME, len=0
                0x01, 0x00, // END + padding
                0x00, 0x00, // packet padding
                0x00, 0x00, 0x00, 0x04,
            ]),
            SourceDescription {
                chunks: vec![SourceDescriptionChunk {
                    source: 0x01020304,
                    items: vec![SourceDescriptionItem {
                        sdes_type: SdesType::SdesCname,
                        text: Bytes::from_static(b""),
                    }],
                }],
            },
            None,
        ),
        (
            "two items",
            Bytes::from_static(&[
                // v=2, p=0, count=1, SDES, len=3
                0x81, 0xca, 0x00, 0x03, // ssrc=0x10000000
                0x10, 0x00, 0x00, 0x00, // CNAME, len=1, content=A
                0x01, 0x01, 0x41, // PHONE, len=1, content=B
                0x04, 0x01, 0x42, // END + padding
                0x00, 0x00,
            ]),
            SourceDescription {
                chunks: vec![SourceDescriptionChunk {
                    source: 0x10000000,
                    items: vec![
                        SourceDescriptionItem {
                            sdes_type: SdesType::SdesCname,
                            text: Bytes::from_static(b"A"),
                        },
                        SourceDescriptionItem {
                            sdes_type: SdesType::SdesPhone,
                            text: Bytes::from_static(b"B"),
                        },
                    ],
                }],
            },
            None,
        ),
        (
            "two chunks",
            Bytes::from_static(&[
                // v=2, p=0, count=2, SDES, len=5
                0x82, 0xca, 0x00, 0x05, // ssrc=0x01020304
                0x01, 0x02, 0x03, 0x04,
                // Chunk 1
                // CNAME, len=1, content=A
                0x01, 0x01, 0x41, // END
                0x00, // Chunk 2
                // SSRC 0x05060708
                0x05, 0x06, 0x07, 0x08, // CNAME, len=3, content=BCD
                0x01, 0x03, 0x42, 0x43, 0x44, // END
                0x00, 0x00, 0x00,
            ]),
            SourceDescription {
                chunks: vec![
                    SourceDescriptionChunk {
                        source: 0x01020304,
                        items: vec![SourceDescriptionItem {
                            sdes_type: SdesType::SdesCname,
                            text: Bytes::from_static(b"A"),
                        }],
                    },
                    SourceDescriptionChunk {
                        source: 0x05060708,
                        items: vec![SourceDescriptionItem {
                            sdes_type: SdesType::SdesCname,
                            text: Bytes::from_static(b"BCD"),
                        }],
                    },
                ],
            },
            None,
        ),
    ];

    for (name, mut data, want, want_error) in tests {
        let got = SourceDescription::unmarshal(&mut data);

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
fn test_source_description_roundtrip() {
    let too_long_text = "x".repeat(1 << 8);
    let too_many_chunks = vec![SourceDescriptionChunk::default(); COUNT_MAX + 1];

    let tests = vec![
        (
            "valid",
            SourceDescription {
                chunks: vec![
                    SourceDescriptionChunk {
                        source: 1,
                        items: vec![SourceDescriptionItem {
                            sdes_type: SdesType::SdesCname,
                            text: Bytes::from_static(b"test@example.com"),
                        }],
                    },
                    SourceDescriptionChunk {
                        source: 2,
                        items: vec![
                            SourceDescriptionItem {
                                sdes_type: SdesType::SdesNote,
                                text: Bytes::from_static(b"some note"),
                            },
                            SourceDescriptionItem {
                                sdes_type: SdesType::SdesNote,
                                text: Bytes::from_static(b"another note"),
                            },
                        ],
                    },
                ],
            },
            None,
        ),
        (
            "item without type",
            SourceDescription {
                chunks: vec![SourceDescriptionChunk {
                    source: 1,
                    items: vec![SourceDescriptionItem {
                        sdes_type: SdesType::SdesEnd,
                        text: Bytes::from_static(b"test@example.com"),
                    }],
                }],
            },
            Some(Error::SdesMissingType),
        ),
        (
            "zero items",
            SourceDescription {
                chunks: vec![SourceDescriptionChunk {
                    source: 1,
                    items: vec![],
                }],
            },
            None,
        ),
        (
            "tool item",
            SourceDescription {
                chunks: vec![SourceDescriptionChunk {
                    source: 1,
                    items: vec![SourceDescriptionItem {
                        sdes_type: SdesType::SdesTool,
                        text: Bytes::from_static(b"rtcp-codec"),
                    }],
                }],
            },
            None,
        ),
        (
            "text at the octet limit",
            SourceDescription {
                chunks: vec![SourceDescriptionChunk {
                    source: 1,
                    items: vec![SourceDescriptionItem {
                        sdes_type: SdesType::SdesCname,
                        text: Bytes::from("y".repeat(SDES_MAX_OCTET_COUNT)),
                    }],
                }],
            },
            None,
        ),
        (
            "text too long",
            SourceDescription {
                chunks: vec![SourceDescriptionChunk {
                    source: 1,
                    items: vec![SourceDescriptionItem {
                        sdes_type: SdesType::SdesCname,
                        text: Bytes::from(too_long_text),
                    }],
                }],
            },
            Some(Error::SdesTextTooLong),
        ),
        (
            "count overflow",
            SourceDescription {
                chunks: too_many_chunks,
            },
            Some(Error::TooManyChunks),
        ),
    ];

    for (name, want, want_error) in tests {
        match (want.marshal(), want_error) {
            (Ok(mut data), None) => {
                let actual = SourceDescription::unmarshal(&mut data)
                    .unwrap_or_else(|e| panic!("Unmarshal {name}: {e}"));
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
fn test_source_description_chunk_padding_is_null_octets() {
    let sd = SourceDescription {
        chunks: vec![SourceDescriptionChunk {
            source: 1,
            items: vec![SourceDescriptionItem {
                sdes_type: SdesType::SdesCname,
                text: Bytes::from_static(b"AB"),
            }],
        }],
    };

    let data = sd.marshal().expect("marshal");
    assert_eq!(
        &data[..],
        &[
            0x81, 0xca, 0x00, 0x03, // v=2, p=0, count=1, SDES, len=3
            0x00, 0x00, 0x00, 0x01, // ssrc=1
            0x01, 0x02, 0x41, 0x42, // CNAME, len=2, content=AB
            0x00, 0x00, 0x00, 0x00, // END + null padding
        ][..]
    );
    assert!(!sd.header().padding);
    assert_eq!(sd.destination_ssrc(), vec![1]);
    assert_eq!(sd.chunks[0].cname(), Some(&Bytes::from_static(b"AB")));
}
