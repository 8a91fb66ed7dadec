
use std::fmt;

use bytes::{Buf, BufMut, Bytes};
use util::marshal::{Marshal, MarshalSize, Unmarshal};

use crate::error::Error;
use crate::header::*;
use crate::packet::{Packet, Reusable};
use crate::util::*;

type Result<T> = std::result::Result<T, util::Error>;

const XR_HEADER_LENGTH: usize = 4;
const DLRR_SUB_BLOCK_LENGTH: usize = 12;

/// BlockType specifies the type of report in a report block
/// Extended Report block types from RFC 3611.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BlockType {
    #[default]
    Unknown = 0,
    LossRLE = 1,               // RFC 3611, section 4.1
    DuplicateRLE = 2,          // RFC 3611, section 4.2
    PacketReceiptTimes = 3,    // RFC 3611, section 4.3
    ReceiverReferenceTime = 4, // RFC 3611, section 4.4
    DLRR = 5,                  // RFC 3611, section 4.5
    StatisticsSummary = 6,     // RFC 3611, section 4.6
    VoIPMetrics = 7,           // RFC 3611, section 4.7
}

impl From<u8> for BlockType {
    fn from(v: u8) -> Self {
        match v {
            1 => BlockType::LossRLE,
            2 => BlockType::DuplicateRLE,
            3 => BlockType::PacketReceiptTimes,
            4 => BlockType::ReceiverReferenceTime,
            5 => BlockType::DLRR,
            6 => BlockType::StatisticsSummary,
            7 => BlockType::VoIPMetrics,
            _ => BlockType::Unknown,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            BlockType::LossRLE => "LossRLE",
            BlockType::DuplicateRLE => "DuplicateRLE",
            BlockType::PacketReceiptTimes => "PacketReceiptTimes",
            BlockType::ReceiverReferenceTime => "ReceiverReferenceTime",
            BlockType::DLRR => "DLRR",
            BlockType::StatisticsSummary => "StatisticsSummary",
            BlockType::VoIPMetrics => "VoIPMetrics",
            BlockType::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}

/// ReportBlock is one RFC 3611 report block. The block contents are kept
/// opaque; only the common block header is interpreted.
///
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |      BT       | type-specific |         block length          |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// :             type-specific block contents                      :
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct ReportBlock {
    /// Raw block type octet, preserved even when it is not a known [`BlockType`]
    pub block_type: u8,
    pub type_specific: u8,
    /// Block contents after the 4-byte block header; a multiple of 4 bytes
    pub body: Bytes,
}

impl ReportBlock {
    pub fn kind(&self) -> BlockType {
        self.block_type.into()
    }

    /// SSRCs of the media sources this block reports on.
    pub fn destination_ssrc(&self) -> Vec<u32> {
        match self.kind() {
            BlockType::LossRLE
            | BlockType::DuplicateRLE
            | BlockType::PacketReceiptTimes
            | BlockType::StatisticsSummary
            | BlockType::VoIPMetrics => {
                if self.body.len() < SSRC_LENGTH {
                    vec![]
                } else {
                    vec![(&self.body[..SSRC_LENGTH]).get_u32()]
                }
            }
            BlockType::DLRR => self
                .body
                .chunks_exact(DLRR_SUB_BLOCK_LENGTH)
                .map(|mut sub_block| sub_block.get_u32())
                .collect(),
            _ => vec![],
        }
    }
}

impl MarshalSize for ReportBlock {
    fn marshal_size(&self) -> usize {
        XR_HEADER_LENGTH + self.body.len()
    }
}

impl Marshal for ReportBlock {
    fn marshal_to(&self, mut buf: &mut [u8]) -> Result<usize> {
        if self.body.len() % 4 != 0 || self.body.len() / 4 > u16::MAX as usize {
            return Err(Error::BadLength.into());
        }
        if buf.remaining_mut() < self.marshal_size() {
            return Err(Error::BufferTooShort.into());
        }

        buf.put_u8(self.block_type);
        buf.put_u8(self.type_specific);
        buf.put_u16((self.body.len() / 4) as u16);
        buf.put_slice(&self.body);

        Ok(self.marshal_size())
    }
}

impl Unmarshal for ReportBlock {
    fn unmarshal<B>(raw_packet: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        if raw_packet.remaining() < XR_HEADER_LENGTH {
            return Err(Error::PacketTooShort.into());
        }

        let block_type = raw_packet.get_u8();
        let type_specific = raw_packet.get_u8();
        let block_length = raw_packet.get_u16() as usize * 4;
        if raw_packet.remaining() < block_length {
            return Err(Error::PacketTooShort.into());
        }

        Ok(ReportBlock {
            block_type,
            type_specific,
            body: raw_packet.copy_to_bytes(block_length),
        })
    }
}

/// The ExtendedReport packet is an Implementation of RTCP Extended
/// reports defined in RFC 3611. It is used to convey detailed
/// information about an RTP stream. Each packet contains one or
/// more report blocks, each of which conveys a different kind of
/// information.
///
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |V=2|P|reserved |   PT=XR=207   |             length            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                              ssrc                             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// :                         report blocks                         :
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
#[derive(Debug, PartialEq, Eq, Default, Clone)]
pub struct ExtendedReport {
    pub sender_ssrc: u32,
    pub reports: Vec<ReportBlock>,
}

impl fmt::Display for ExtendedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = format!("ExtendedReport from {:x}\n", self.sender_ssrc);
        for r in &self.reports {
            out += format!("\t{} ({} bytes)\n", r.kind(), r.body.len()).as_str();
        }
        write!(f, "{out}")
    }
}

impl Packet for ExtendedReport {
    /// Header returns the Header associated with this packet.
    fn header(&self) -> Header {
        Header {
            padding: get_padding_size(self.raw_size()) != 0,
            count: 0,
            packet_type: PacketType::ExtendedReport,
            length: ((self.marshal_size() / 4) - 1) as u16,
        }
    }

    /// destination_ssrc returns an array of ssrc values that this packet refers to.
    fn destination_ssrc(&self) -> Vec<u32> {
        self.reports
            .iter()
            .flat_map(|r| r.destination_ssrc())
            .collect()
    }

    fn raw_size(&self) -> usize {
        let reps_length: usize = self.reports.iter().map(|r| r.marshal_size()).sum();
        HEADER_LENGTH + SSRC_LENGTH + reps_length
    }
}

impl MarshalSize for ExtendedReport {
    fn marshal_size(&self) -> usize {
        let l = self.raw_size();
        // align to 32-bit boundary
        l + get_padding_size(l)
    }
}

impl Marshal for ExtendedReport {
    /// marshal_to encodes the ExtendedReport in binary
    fn marshal_to(&self, buf: &mut [u8]) -> Result<usize> {
        let size = self.marshal_size();
        if size / 4 - 1 > u16::MAX as usize {
            return Err(Error::BadLength.into());
        }
        if buf.len() < size {
            return Err(Error::BufferTooShort.into());
        }

        let h = self.header();
        let mut writer = &mut buf[..];
        let n = h.marshal_to(writer)?;
        writer = &mut writer[n..];

        writer.put_u32(self.sender_ssrc);

        for report in &self.reports {
            let n = report.marshal_to(writer)?;
            writer = &mut writer[n..];
        }

        if h.padding {
            put_padding(buf, self.raw_size());
        }

        Ok(size)
    }
}

impl Unmarshal for ExtendedReport {
    /// Unmarshal decodes the ExtendedReport from binary
    fn unmarshal<B>(raw_packet: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut xr = ExtendedReport::default();
        xr.unmarshal_into(raw_packet)?;
        Ok(xr)
    }
}

impl Reusable for ExtendedReport {
    fn clear(&mut self) {
        self.sender_ssrc = 0;
        self.reports.clear();
    }

    fn unmarshal_into<B>(&mut self, raw_packet: &mut B) -> Result<()>
    where
        B: Buf,
    {
        let (header, mut body) = read_packet_body(raw_packet)?;
        if header.packet_type != PacketType::ExtendedReport {
            return Err(Error::WrongType.into());
        }
        if body.remaining() < SSRC_LENGTH {
            return Err(Error::PacketTooShort.into());
        }

        self.sender_ssrc = body.get_u32();

        self.reports.clear();
        while body.has_remaining() {
            self.reports.push(ReportBlock::unmarshal(&mut body)?);
        }

        Ok(())
    }
}
