#[cfg(test)]
mod raw_packet_test;

use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use util::marshal::{Marshal, MarshalSize, Unmarshal};

use crate::error::Error;
use crate::header::*;
use crate::packet::{Packet, Reusable};

type Result<T> = std::result::Result<T, util::Error>;

/// RawPacket represents an unparsed RTCP packet. It's returned by Unmarshal when
/// a packet with an unknown type is encountered.
#[derive(Debug, PartialEq, Eq, Default, Clone)]
pub struct RawPacket {
    pub header: Header,
    /// The whole packet, header and padding included
    pub raw: Bytes,
}

impl fmt::Display for RawPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawPacket {}: {:?}", self.header.packet_type, self.raw)
    }
}

impl Packet for RawPacket {
    /// Header returns the Header associated with this packet.
    fn header(&self) -> Header {
        self.header.clone()
    }

    /// destination_ssrc returns an array of SSRC values that this packet refers to.
    fn destination_ssrc(&self) -> Vec<u32> {
        vec![]
    }

    fn raw_size(&self) -> usize {
        self.raw.len()
    }
}

impl MarshalSize for RawPacket {
    fn marshal_size(&self) -> usize {
        self.raw_size()
    }
}

impl Marshal for RawPacket {
    /// Marshal encodes the packet in binary.
    fn marshal_to(&self, mut buf: &mut [u8]) -> Result<usize> {
        if buf.remaining_mut() < self.raw.len() {
            return Err(Error::BufferTooShort.into());
        }
        buf.put_slice(&self.raw);
        Ok(self.raw.len())
    }
}

impl Unmarshal for RawPacket {
    /// Unmarshal takes one whole packet off `raw_packet`, keeping its bytes verbatim.
    fn unmarshal<B>(raw_packet: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        if raw_packet.remaining() < HEADER_LENGTH {
            return Err(Error::PacketTooShort.into());
        }

        // the type octet may be one PacketType does not model, so keep the header verbatim
        let raw_header = raw_packet.copy_to_bytes(HEADER_LENGTH);
        let header = Header::unmarshal(&mut raw_header.clone())?;
        let body_len = header.length as usize * 4;
        if raw_packet.remaining() < body_len {
            return Err(Error::PacketTooShort.into());
        }

        let mut raw = BytesMut::with_capacity(HEADER_LENGTH + body_len);
        raw.put(raw_header);
        raw.put(raw_packet.copy_to_bytes(body_len));

        Ok(RawPacket {
            header,
            raw: raw.freeze(),
        })
    }
}

impl Reusable for RawPacket {}
