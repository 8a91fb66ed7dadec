#[cfg(test)]
mod goodbye_test;

use std::fmt;

use bytes::{Buf, BufMut, Bytes};
use util::marshal::{Marshal, MarshalSize, Unmarshal};

use crate::error::Error;
use crate::header::*;
use crate::packet::{Packet, Reusable};
use crate::util::*;

type Result<T> = std::result::Result<T, util::Error>;

/// The Goodbye packet indicates that one or more sources are no longer active.
#[derive(Debug, PartialEq, Eq, Default, Clone)]
pub struct Goodbye {
    /// The SSRC/CSRC identifiers that are no longer active
    pub sources: Vec<u32>,
    /// Optional text indicating the reason for leaving, e.g., "camera malfunction" or "RTP loop detected"
    pub reason: Bytes,
}

impl fmt::Display for Goodbye {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = "Goodbye:\n\tSources:\n".to_string();
        for s in &self.sources {
            out += format!("\t{s}\n").as_str();
        }
        out += format!("\tReason: {:?}\n", self.reason).as_str();

        write!(f, "{out}")
    }
}

impl Goodbye {
    fn reason_size(&self) -> usize {
        if self.reason.is_empty() {
            0
        } else {
            let l = 1 + self.reason.len();
            l + get_padding_size(l)
        }
    }
}

impl Packet for Goodbye {
    /// Header returns the Header associated with this packet.
    fn header(&self) -> Header {
        Header {
            padding: false,
            count: self.sources.len() as u8,
            packet_type: PacketType::Goodbye,
            length: ((self.marshal_size() / 4) - 1) as u16,
        }
    }

    /// destination_ssrc returns an array of SSRC values that this packet refers to.
    fn destination_ssrc(&self) -> Vec<u32> {
        self.sources.to_vec()
    }

    fn raw_size(&self) -> usize {
        HEADER_LENGTH + self.sources.len() * SSRC_LENGTH + self.reason_size()
    }
}

impl MarshalSize for Goodbye {
    fn marshal_size(&self) -> usize {
        // the reason region is already aligned
        self.raw_size()
    }
}

impl Marshal for Goodbye {
    /// marshal_to encodes the packet in binary.
    fn marshal_to(&self, buf: &mut [u8]) -> Result<usize> {
        if self.sources.len() > COUNT_MAX {
            return Err(Error::TooManySources.into());
        }

        if self.reason.len() > SDES_MAX_OCTET_COUNT {
            return Err(Error::ReasonTooLong.into());
        }

        let size = self.marshal_size();
        if buf.len() < size {
            return Err(Error::BufferTooShort.into());
        }

        /*
         *        0                   1                   2                   3
         *        0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
         *       +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
         *       |V=2|P|    SC   |   PT=BYE=203  |             length            |
         *       +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
         *       |                           SSRC/CSRC                           |
         *       +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
         *       :                              ...                              :
         *       +=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+
         * (opt) |     length    |               reason for leaving            ...
         *       +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
         */
        let h = self.header();
        let mut writer = &mut buf[..];
        let n = h.marshal_to(writer)?;
        writer = &mut writer[n..];

        for source in &self.sources {
            writer.put_u32(*source);
        }

        if !self.reason.is_empty() {
            writer.put_u8(self.reason.len() as u8);
            writer.put_slice(&self.reason);
            let reason_end =
                HEADER_LENGTH + self.sources.len() * SSRC_LENGTH + 1 + self.reason.len();
            put_zero_padding(buf, reason_end);
        }

        Ok(size)
    }
}

impl Unmarshal for Goodbye {
    /// Unmarshal decodes the Goodbye packet from binary
    fn unmarshal<B>(raw_packet: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut bye = Goodbye::default();
        bye.unmarshal_into(raw_packet)?;
        Ok(bye)
    }
}

impl Reusable for Goodbye {
    fn clear(&mut self) {
        self.sources.clear();
        self.reason = Bytes::new();
    }

    fn unmarshal_into<B>(&mut self, raw_packet: &mut B) -> Result<()>
    where
        B: Buf,
    {
        let (header, mut body) = read_packet_body(raw_packet)?;
        if header.packet_type != PacketType::Goodbye {
            return Err(Error::WrongType.into());
        }

        let sources_len = header.count as usize * SSRC_LENGTH;
        if body.remaining() < sources_len {
            return Err(Error::PacketTooShort.into());
        }

        self.sources.clear();
        for _ in 0..header.count {
            self.sources.push(body.get_u32());
        }

        self.reason = if body.has_remaining() {
            let reason_len = body.get_u8() as usize;
            if reason_len > body.remaining() {
                return Err(Error::PacketTooShort.into());
            }
            body.split_to(reason_len)
        } else {
            Bytes::new()
        };

        Ok(())
    }
}
