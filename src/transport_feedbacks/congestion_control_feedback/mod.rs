
use std::fmt;

use bytes::{Buf, BufMut};
use util::marshal::{Marshal, MarshalSize, Unmarshal};

use crate::error::Error;
use crate::header::*;
use crate::packet::{Packet, Reusable};
use crate::util::*;

type Result<T> = std::result::Result<T, util::Error>;

const METRIC_BLOCK_LENGTH: usize = 2;
/// media ssrc, begin_seq and num_reports
const REPORT_BLOCK_HEADER_LENGTH: usize = 8;
const REPORT_TIMESTAMP_LENGTH: usize = 4;
/// Upper bound on metric blocks in one report block
pub const MAX_METRIC_BLOCKS: usize = 16384;

/// ECN codepoint as defined by RFC 3168.
#[derive(Default, Debug, PartialEq, Eq, Copy, Clone)]
#[repr(u8)]
pub enum Ecn {
    /// Non ECN-Capable Transport
    #[default]
    NonEct = 0,
    /// ECN Capable Transport, ECT(1)
    Ect1 = 1,
    /// ECN Capable Transport, ECT(0)
    Ect0 = 2,
    /// Congestion Experienced
    Ce = 3,
}

impl From<u16> for Ecn {
    fn from(val: u16) -> Self {
        match val & 0x3 {
            1 => Ecn::Ect1,
            2 => Ecn::Ect0,
            3 => Ecn::Ce,
            _ => Ecn::NonEct,
        }
    }
}

/// 0                   1
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |R|ECN|  Arrival time offset    |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///
/// When R is clear the packet was not received and the other 15 bits carry
/// no information.
#[derive(Default, Debug, PartialEq, Eq, Copy, Clone)]
pub struct CcFeedbackMetricBlock {
    pub received: bool,
    pub ecn: Ecn,
    /// 13 bits, in units of 1/1024 seconds before the report timestamp
    pub arrival_time_offset: u16,
}

impl MarshalSize for CcFeedbackMetricBlock {
    fn marshal_size(&self) -> usize {
        METRIC_BLOCK_LENGTH
    }
}

impl Marshal for CcFeedbackMetricBlock {
    fn marshal_to(&self, mut buf: &mut [u8]) -> Result<usize> {
        if buf.remaining_mut() < METRIC_BLOCK_LENGTH {
            return Err(Error::BufferTooShort.into());
        }

        let word = if self.received {
            let mut dst = set_nbits_of_uint16(0, 1, 0, 1)?;
            dst = set_nbits_of_uint16(dst, 2, 1, self.ecn as u16)?;
            set_nbits_of_uint16(dst, 13, 3, self.arrival_time_offset)?
        } else {
            0
        };
        buf.put_u16(word);

        Ok(METRIC_BLOCK_LENGTH)
    }
}

impl Unmarshal for CcFeedbackMetricBlock {
    /// Decodes a buffer holding exactly one metric block.
    fn unmarshal<B>(raw_packet: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        if raw_packet.remaining() != METRIC_BLOCK_LENGTH {
            return Err(Error::MetricBlockLength.into());
        }

        let word = raw_packet.get_u16();
        if word >> 15 == 0 {
            return Ok(CcFeedbackMetricBlock::default());
        }

        Ok(CcFeedbackMetricBlock {
            received: true,
            ecn: (word >> 13).into(),
            arrival_time_offset: word & 0x1FFF,
        })
    }
}

/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                   SSRC of 1st RTP Stream                      |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |          begin_seq            |          num_reports          |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |R|ECN|  Arrival time offset    | ...                           .
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct CcFeedbackReportBlock {
    pub media_ssrc: u32,
    pub begin_sequence: u16,
    /// One entry per sequence number starting at `begin_sequence`
    pub metric_blocks: Vec<CcFeedbackMetricBlock>,
}

impl CcFeedbackReportBlock {
    fn metric_padding(&self) -> usize {
        (self.metric_blocks.len() % 2) * METRIC_BLOCK_LENGTH
    }
}

impl MarshalSize for CcFeedbackReportBlock {
    fn marshal_size(&self) -> usize {
        REPORT_BLOCK_HEADER_LENGTH
            + self.metric_blocks.len() * METRIC_BLOCK_LENGTH
            + self.metric_padding()
    }
}

impl Marshal for CcFeedbackReportBlock {
    fn marshal_to(&self, mut buf: &mut [u8]) -> Result<usize> {
        if self.metric_blocks.len() > MAX_METRIC_BLOCKS {
            return Err(Error::TooManyReports.into());
        }
        let size = self.marshal_size();
        if buf.remaining_mut() < size {
            return Err(Error::BufferTooShort.into());
        }

        buf.put_u32(self.media_ssrc);
        buf.put_u16(self.begin_sequence);
        buf.put_u16(self.metric_blocks.len() as u16);

        for block in &self.metric_blocks {
            let n = block.marshal_to(buf)?;
            buf = &mut buf[n..];
        }

        if self.metric_padding() != 0 {
            buf.put_u16(0);
        }

        Ok(size)
    }
}

impl Unmarshal for CcFeedbackReportBlock {
    /// Reads one report block, including the 2 alignment bytes that follow an
    /// odd number of metric blocks.
    fn unmarshal<B>(raw_packet: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        if raw_packet.remaining() < REPORT_BLOCK_HEADER_LENGTH {
            return Err(Error::ReportBlockLength.into());
        }

        let media_ssrc = raw_packet.get_u32();
        let begin_sequence = raw_packet.get_u16();
        let num_reports = raw_packet.get_u16() as usize;

        let padding = (num_reports % 2) * METRIC_BLOCK_LENGTH;
        if num_reports * METRIC_BLOCK_LENGTH + padding > raw_packet.remaining() {
            return Err(Error::IncorrectNumReports.into());
        }

        let mut metric_blocks = Vec::with_capacity(num_reports);
        for _ in 0..num_reports {
            let mut block = raw_packet.copy_to_bytes(METRIC_BLOCK_LENGTH);
            metric_blocks.push(CcFeedbackMetricBlock::unmarshal(&mut block)?);
        }
        raw_packet.advance(padding);

        Ok(CcFeedbackReportBlock {
            media_ssrc,
            begin_sequence,
            metric_blocks,
        })
    }
}

/// CcFeedbackReport is the RTP Control Protocol feedback for congestion control
///
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |V=2|P| FMT=11  |   PT = 205    |          length               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                 SSRC of RTCP packet sender                    |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                   report blocks ...                           .
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                 Report Timestamp (32 bits)                    |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///
/// ## Specifications
///
/// * [RFC 8888 §3.1]
///
/// [RFC 8888 §3.1]: https://www.rfc-editor.org/rfc/rfc8888.html#section-3.1
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct CcFeedbackReport {
    pub sender_ssrc: u32,
    pub report_blocks: Vec<CcFeedbackReportBlock>,
    /// Middle 32 bits of the NTP timestamp the report was generated at
    pub report_timestamp: u32,
}

impl fmt::Display for CcFeedbackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = format!("CCFeedbackReport from {:x}\n", self.sender_ssrc);
        out += format!("\tReport Timestamp {}\n", self.report_timestamp).as_str();
        out += "\tSSRC    \tBegin Seq\tReports\n";
        for block in &self.report_blocks {
            out += format!(
                "\t{:x}\t{}\t{}\n",
                block.media_ssrc,
                block.begin_sequence,
                block.metric_blocks.len()
            )
            .as_str();
        }
        write!(f, "{out}")
    }
}

impl Packet for CcFeedbackReport {
    fn header(&self) -> Header {
        Header {
            padding: false,
            count: FORMAT_CCFB,
            packet_type: PacketType::TransportSpecificFeedback,
            length: ((self.marshal_size() / 4) - 1) as u16,
        }
    }

    fn destination_ssrc(&self) -> Vec<u32> {
        self.report_blocks.iter().map(|b| b.media_ssrc).collect()
    }

    fn raw_size(&self) -> usize {
        let blocks: usize = self.report_blocks.iter().map(|b| b.marshal_size()).sum();
        HEADER_LENGTH + SSRC_LENGTH + blocks + REPORT_TIMESTAMP_LENGTH
    }
}

impl MarshalSize for CcFeedbackReport {
    fn marshal_size(&self) -> usize {
        // report blocks are 32-bit aligned on their own
        self.raw_size()
    }
}

impl Marshal for CcFeedbackReport {
    fn marshal_to(&self, buf: &mut [u8]) -> Result<usize> {
        let size = self.marshal_size();
        check_packet_size(size)?;
        if buf.len() < size {
            return Err(Error::BufferTooShort.into());
        }

        let h = self.header();
        let mut writer = &mut buf[..];
        let n = h.marshal_to(writer)?;
        writer = &mut writer[n..];

        writer.put_u32(self.sender_ssrc);
        for block in &self.report_blocks {
            let n = block.marshal_to(writer)?;
            writer = &mut writer[n..];
        }
        writer.put_u32(self.report_timestamp);

        Ok(size)
    }
}

impl Unmarshal for CcFeedbackReport {
    fn unmarshal<B>(raw_packet: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut report = CcFeedbackReport::default();
        report.unmarshal_into(raw_packet)?;
        Ok(report)
    }
}

impl Reusable for CcFeedbackReport {
    fn clear(&mut self) {
        let mut report_blocks = std::mem::take(&mut self.report_blocks);
        report_blocks.clear();
        *self = CcFeedbackReport {
            report_blocks,
            ..Default::default()
        };
    }

    fn unmarshal_into<B>(&mut self, raw_packet: &mut B) -> Result<()>
    where
        B: Buf,
    {
        let (h, mut body) = read_packet_body(raw_packet)?;
        if h.packet_type != PacketType::TransportSpecificFeedback || h.count != FORMAT_CCFB {
            return Err(Error::WrongType.into());
        }
        if body.remaining() < SSRC_LENGTH + REPORT_TIMESTAMP_LENGTH {
            return Err(Error::PacketTooShort.into());
        }

        self.sender_ssrc = body.get_u32();
        let mut blocks = body.split_to(body.remaining() - REPORT_TIMESTAMP_LENGTH);
        self.report_timestamp = body.get_u32();

        self.report_blocks.clear();
        while blocks.has_remaining() {
            self.report_blocks
                .push(CcFeedbackReportBlock::unmarshal(&mut blocks)?);
        }

        Ok(())
    }
}
