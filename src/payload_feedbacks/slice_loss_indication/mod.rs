
use std::fmt;

use bytes::{Buf, BufMut};
use util::marshal::{Marshal, MarshalSize, Unmarshal};

use crate::error::Error;
use crate::header::*;
use crate::packet::{Packet, Reusable};
use crate::util::*;

type Result<T> = std::result::Result<T, util::Error>;

const SLI_LENGTH: usize = 2;
const SLI_OFFSET: usize = 8;
const SLI_ENTRY_LENGTH: usize = 4;

/// SliEntry represents a single entry to the SLI packet's
/// list of lost slices.
#[derive(Debug, PartialEq, Eq, Default, Clone)]
pub struct SliEntry {
    /// ID of first lost slice, 13 bits
    pub first: u16,
    /// Number of lost slices, 13 bits
    pub number: u16,
    /// ID of related picture, 6 bits
    pub picture: u8,
}

/// The SliceLossIndication packet informs the encoder about the loss of a picture slice
///
/// ## Specifications
///
/// * [RFC 4585 §6.3.2]
///
/// [RFC 4585 §6.3.2]: https://tools.ietf.org/html/rfc4585#section-6.3.2
#[derive(Debug, PartialEq, Eq, Default, Clone)]
pub struct SliceLossIndication {
    /// SSRC of sender
    pub sender_ssrc: u32,
    /// SSRC of the media source
    pub media_ssrc: u32,

    pub sli_entries: Vec<SliEntry>,
}

impl fmt::Display for SliceLossIndication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SliceLossIndication {:x} {:x} {:?}",
            self.sender_ssrc, self.media_ssrc, self.sli_entries,
        )
    }
}

impl Packet for SliceLossIndication {
    fn header(&self) -> Header {
        Header {
            padding: false,
            count: FORMAT_SLI,
            packet_type: PacketType::PayloadSpecificFeedback,
            length: ((self.marshal_size() / 4) - 1) as u16,
        }
    }

    fn destination_ssrc(&self) -> Vec<u32> {
        vec![self.media_ssrc]
    }

    fn raw_size(&self) -> usize {
        HEADER_LENGTH + SLI_OFFSET + self.sli_entries.len() * SLI_ENTRY_LENGTH
    }
}

impl MarshalSize for SliceLossIndication {
    fn marshal_size(&self) -> usize {
        self.raw_size()
    }
}

impl Marshal for SliceLossIndication {
    fn marshal_to(&self, mut buf: &mut [u8]) -> Result<usize> {
        if self.sli_entries.len() + SLI_LENGTH > u8::MAX as usize {
            return Err(Error::TooManyReports.into());
        }
        if buf.remaining_mut() < self.marshal_size() {
            return Err(Error::BufferTooShort.into());
        }

        let h = self.header();
        let n = h.marshal_to(buf)?;
        buf = &mut buf[n..];

        buf.put_u32(self.sender_ssrc);
        buf.put_u32(self.media_ssrc);

        for s in &self.sli_entries {
            let sli = ((s.first as u32 & 0x1FFF) << 19)
                | ((s.number as u32 & 0x1FFF) << 6)
                | (s.picture as u32 & 0x3F);

            buf.put_u32(sli);
        }

        Ok(self.marshal_size())
    }
}

impl Unmarshal for SliceLossIndication {
    fn unmarshal<B>(raw_packet: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut sli = SliceLossIndication::default();
        sli.unmarshal_into(raw_packet)?;
        Ok(sli)
    }
}

impl Reusable for SliceLossIndication {
    fn clear(&mut self) {
        let mut sli_entries = std::mem::take(&mut self.sli_entries);
        sli_entries.clear();
        *self = SliceLossIndication {
            sli_entries,
            ..Default::default()
        };
    }

    fn unmarshal_into<B>(&mut self, raw_packet: &mut B) -> Result<()>
    where
        B: Buf,
    {
        let (h, mut body) = read_packet_body(raw_packet)?;
        if h.packet_type != PacketType::PayloadSpecificFeedback || h.count != FORMAT_SLI {
            return Err(Error::WrongType.into());
        }
        if body.remaining() < SLI_OFFSET {
            return Err(Error::PacketTooShort.into());
        }

        self.sender_ssrc = body.get_u32();
        self.media_ssrc = body.get_u32();

        self.sli_entries.clear();
        while body.remaining() >= SLI_ENTRY_LENGTH {
            let sli = body.get_u32();
            self.sli_entries.push(SliEntry {
                first: ((sli >> 19) & 0x1FFF) as u16,
                number: ((sli >> 6) & 0x1FFF) as u16,
                picture: (sli & 0x3F) as u8,
            });
        }

        Ok(())
    }
}
