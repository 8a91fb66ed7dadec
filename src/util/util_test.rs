use bytes::Bytes;

use super::*;
use crate::header::PacketType;

#[test]
fn test_get_padding_size() {
    let tests = vec![(0, 0), (1, 3), (2, 2), (3, 1), (4, 0), (100, 0), (500, 0)];

    for (n, p) in tests {
        assert_eq!(
            get_padding_size(n),
            p,
            "Test case returned wrong value for input {n}"
        );
    }
}

#[test]
fn test_set_nbits_of_uint16() {
    let tests = vec![
        ("setOneBit", 0, 1, 8, 1, 128, None),
        ("setStatusVectorBit", 0, 1, 0, 1, 32768, None),
        ("setStatusVectorSecondBit", 32768, 1, 1, 1, 49152, None),
        (
            "setStatusVectorInnerBitsAndCutValue",
            49152,
            2,
            6,
            11111,
            49920,
            None,
        ),
        ("setRunLengthSecondTwoBit", 32768, 2, 1, 1, 40960, None),
        (
            "setOneBitOutOfBounds",
            32768,
            2,
            15,
            1,
            0,
            Some(Error::InvalidSizeOrStartIndex),
        ),
        (
            "setZeroWidth",
            0,
            0,
            3,
            1,
            0,
            Some(Error::InvalidSizeOrStartIndex),
        ),
        ("setFullWord", 0, 16, 0, 0xBEEF, 0xBEEF, None),
    ];

    for (name, source, size, index, value, result, want_err) in tests {
        let res = set_nbits_of_uint16(source, size, index, value);
        if let Some(want_err) = want_err {
            assert_eq!(res, Err(want_err), "setNBitsOfUint16 {name}: should be error");
        } else {
            assert_eq!(res, Ok(result), "setNBitsOfUint16 {name}");
        }
    }
}

#[test]
fn test_get_nbits_from_byte() {
    let tests = vec![
        ("first bit", 0x80u8, 0, 1, 1),
        ("tag of run length", 0x7f, 0, 1, 0),
        ("two bit symbol", 0xcd, 2, 2, 0),
        ("second two bit symbol", 0xcd, 4, 2, 3),
        ("low five", 0x1f, 3, 5, 31),
    ];

    for (name, b, begin, n, want) in tests {
        assert_eq!(get_nbits_from_byte(b, begin, n), want, "{name}");
    }
}

#[test]
fn test_append_nbits_and_24bits() {
    let v = append_nbits_to_uint32(0, 24, 0x0102_0304);
    assert_eq!(v, 0x0002_0304);
    let v = append_nbits_to_uint32(v, 8, 0x1ff);
    assert_eq!(v, 0x0203_04ff);

    assert_eq!(get_24bits_from_bytes(&[0x12, 0x34, 0x56]), 0x123456);
}

#[test]
fn test_put_padding() {
    let mut buf = [0xffu8; 8];
    put_padding(&mut buf, 5);
    assert_eq!(buf, [0xff, 0xff, 0xff, 0xff, 0xff, 0, 0, 3]);

    let mut buf = [0xffu8; 8];
    put_zero_padding(&mut buf, 6);
    assert_eq!(buf, [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0, 0]);

    let mut buf = [0xffu8; 4];
    put_padding(&mut buf, 4);
    assert_eq!(buf, [0xff; 4]);
}

#[test]
fn test_read_packet_body() {
    let tests = vec![
        (
            "unpadded",
            Bytes::from_static(&[0x81, 0xcb, 0x00, 0x01, 0x90, 0x2f, 0x9e, 0x2e]),
            Some(Bytes::from_static(&[0x90, 0x2f, 0x9e, 0x2e])),
            None,
        ),
        (
            "padded",
            Bytes::from_static(&[
                0xa0, 0xcc, 0x00, 0x02, 0x01, 0x02, 0x03, 0x04, 0x05, 0x00, 0x00, 0x03,
            ]),
            Some(Bytes::from_static(&[0x01, 0x02, 0x03, 0x04, 0x05])),
            None,
        ),
        (
            "zero padding count",
            Bytes::from_static(&[0xa0, 0xcc, 0x00, 0x01, 0x01, 0x02, 0x03, 0x00]),
            None,
            Some(Error::WrongPadding),
        ),
        (
            "padding count beyond body",
            Bytes::from_static(&[0xa0, 0xcc, 0x00, 0x01, 0x01, 0x02, 0x03, 0x09]),
            None,
            Some(Error::WrongPadding),
        ),
        (
            "padding flag on empty body",
            Bytes::from_static(&[0xa0, 0xcc, 0x00, 0x00]),
            None,
            Some(Error::WrongPadding),
        ),
        (
            "length beyond buffer",
            Bytes::from_static(&[0x81, 0xcb, 0x00, 0x64]),
            None,
            Some(Error::PacketTooShort),
        ),
    ];

    for (name, data, want, want_err) in tests {
        let mut buf = data.clone();
        let got = read_packet_body(&mut buf);
        match (got, want, want_err) {
            (Ok((_, body)), Some(want), None) => {
                assert_eq!(body, want, "{name}: body mismatch");
                assert!(buf.is_empty(), "{name}: span not fully consumed");
            }
            (Err(err), None, Some(want_err)) => {
                assert_eq!(err, want_err, "{name}: unexpected error");
            }
            (got, _, _) => panic!("{name}: unexpected result {got:?}"),
        }
    }
}

#[test]
fn test_read_packet_body_leaves_trailing_packets() {
    let mut buf = Bytes::from_static(&[
        0x81, 0xcb, 0x00, 0x01, 0x90, 0x2f, 0x9e, 0x2e, // BYE
        0x81, 0xcb, 0x00, 0x01, 0x01, 0x02, 0x03, 0x04, // BYE
    ]);
    let (header, _) = read_packet_body(&mut buf).expect("first packet");
    assert_eq!(header.packet_type, PacketType::Goodbye);
    assert_eq!(buf.len(), 8);
}

#[test]
fn test_read_packet_span_keeps_padding() {
    let mut buf = Bytes::from_static(&[
        0xa0, 0xcc, 0x00, 0x02, 0x01, 0x02, 0x03, 0x04, 0x05, 0x00, 0x00, 0x03,
    ]);
    let (header, body) = read_packet_span(&mut buf).expect("span");
    assert!(header.padding);
    assert_eq!(body.len(), 8);
    assert!(buf.is_empty());

    let mut bad = Bytes::from_static(&[0xa0, 0xcc, 0x00, 0x01, 0x01, 0x02, 0x03, 0x00]);
    assert_eq!(read_packet_span(&mut bad), Err(Error::WrongPadding));
}

#[test]
fn test_ssrc_feedback() -> Result<()> {
    use crate::header::{FORMAT_PLI, FORMAT_RRR};

    let header = Header {
        padding: false,
        count: FORMAT_PLI,
        packet_type: PacketType::PayloadSpecificFeedback,
        length: (FEEDBACK_SSRCS_LENGTH / 4) as u16,
    };

    let mut short = [0u8; 11];
    assert_eq!(
        put_ssrc_feedback(&mut short, &header, 1, 2),
        Err(Error::BufferTooShort)
    );

    let mut buf = [0u8; 12];
    assert_eq!(put_ssrc_feedback(&mut buf, &header, 0x902f9e2e, 0x1)?, 12);
    assert_eq!(
        buf,
        [0x81, 0xce, 0x00, 0x02, 0x90, 0x2f, 0x9e, 0x2e, 0x00, 0x00, 0x00, 0x01]
    );

    let data = Bytes::copy_from_slice(&buf);
    assert_eq!(
        read_ssrc_feedback(
            &mut data.clone(),
            PacketType::PayloadSpecificFeedback,
            FORMAT_PLI
        )?,
        (0x902f9e2e, 0x1)
    );
    assert_eq!(
        read_ssrc_feedback(
            &mut data.clone(),
            PacketType::TransportSpecificFeedback,
            FORMAT_RRR
        ),
        Err(Error::WrongType)
    );

    Ok(())
}
