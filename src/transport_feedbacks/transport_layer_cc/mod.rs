
use std::fmt;

use bytes::{Buf, BufMut};
use util::marshal::{Marshal, MarshalSize, Unmarshal};

use crate::error::Error;
use crate::header::*;
use crate::packet::{Packet, Reusable};
use crate::util::*;

type Result<T> = std::result::Result<T, util::Error>;

/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |V=2|P|  FMT=15 |    PT=205     |           length              |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                     SSRC of packet sender                     |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                      SSRC of media source                     |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |      base sequence number     |      packet status count      |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                 reference time                | fb pkt. count |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |          packet chunk         |         packet chunk          |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// .                                                               .
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |         packet chunk          |  recv delta   |  recv delta   |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// .                                                               .
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |           recv delta          |  recv delta   | zero padding  |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///
/// type of packet status chunk
///
/// ## Specifications
///
/// * [draft-holmer-rmcat-transport-wide-cc-extensions-01, page 5]
///
/// [draft-holmer-rmcat-transport-wide-cc-extensions-01, page 5]: https://tools.ietf.org/html/draft-holmer-rmcat-transport-wide-cc-extensions-01#page-5
#[derive(Default, PartialEq, Eq, Debug, Copy, Clone)]
#[repr(u16)]
pub enum StatusChunkTypeTcc {
    #[default]
    RunLengthChunk = 0,
    StatusVectorChunk = 1,
}

/// type of packet status symbol and recv delta
#[derive(Default, PartialEq, Eq, Debug, Copy, Clone)]
#[repr(u16)]
pub enum SymbolTypeTcc {
    /// https://tools.ietf.org/html/draft-holmer-rmcat-transport-wide-cc-extensions-01#section-3.1.1
    #[default]
    PacketNotReceived = 0,
    /// https://tools.ietf.org/html/draft-holmer-rmcat-transport-wide-cc-extensions-01#section-3.1.1
    PacketReceivedSmallDelta = 1,
    /// https://tools.ietf.org/html/draft-holmer-rmcat-transport-wide-cc-extensions-01#section-3.1.1
    PacketReceivedLargeDelta = 2,
    /// https://tools.ietf.org/html/draft-holmer-rmcat-transport-wide-cc-extensions-01#page-7
    /// see Example 2: "packet received, w/o recv delta"
    PacketReceivedWithoutDelta = 3,
}

impl SymbolTypeTcc {
    /// Number of recv delta bytes that follow the chunks for a packet with this status.
    pub fn delta_size(self) -> usize {
        match self {
            SymbolTypeTcc::PacketReceivedSmallDelta => 1,
            SymbolTypeTcc::PacketReceivedLargeDelta => 2,
            _ => 0,
        }
    }
}

/// for status vector chunk
#[derive(Default, PartialEq, Eq, Debug, Copy, Clone)]
#[repr(u16)]
pub enum SymbolSizeTypeTcc {
    /// https://tools.ietf.org/html/draft-holmer-rmcat-transport-wide-cc-extensions-01#section-3.1.4
    #[default]
    OneBit = 0,
    TwoBit = 1,
}

impl SymbolSizeTypeTcc {
    fn bits(self) -> u16 {
        match self {
            SymbolSizeTypeTcc::OneBit => 1,
            SymbolSizeTypeTcc::TwoBit => 2,
        }
    }

    /// Symbols carried by one status vector chunk of this size.
    pub fn capacity(self) -> usize {
        STATUS_VECTOR_SYMBOL_BITS / self.bits() as usize
    }
}

impl From<u16> for SymbolSizeTypeTcc {
    fn from(val: u16) -> Self {
        match val {
            0 => SymbolSizeTypeTcc::OneBit,
            _ => SymbolSizeTypeTcc::TwoBit,
        }
    }
}

impl From<u16> for StatusChunkTypeTcc {
    fn from(val: u16) -> Self {
        match val {
            0 => StatusChunkTypeTcc::RunLengthChunk,
            _ => StatusChunkTypeTcc::StatusVectorChunk,
        }
    }
}

impl From<u16> for SymbolTypeTcc {
    fn from(val: u16) -> Self {
        match val {
            0 => SymbolTypeTcc::PacketNotReceived,
            1 => SymbolTypeTcc::PacketReceivedSmallDelta,
            2 => SymbolTypeTcc::PacketReceivedLargeDelta,
            _ => SymbolTypeTcc::PacketReceivedWithoutDelta,
        }
    }
}

/// len of packet status chunk
const PACKET_STATUS_CHUNK_LENGTH: usize = 2;
/// bits left for symbols after the T and S bits of a status vector chunk
const STATUS_VECTOR_SYMBOL_BITS: usize = 14;

/// PacketStatusChunk has two kinds:
/// RunLengthChunk and StatusVectorChunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PacketStatusChunk {
    RunLengthChunk(RunLengthChunk),
    StatusVectorChunk(StatusVectorChunk),
}

impl PacketStatusChunk {
    pub fn chunk_type(&self) -> StatusChunkTypeTcc {
        match self {
            PacketStatusChunk::RunLengthChunk(_) => StatusChunkTypeTcc::RunLengthChunk,
            PacketStatusChunk::StatusVectorChunk(_) => StatusChunkTypeTcc::StatusVectorChunk,
        }
    }

    /// Number of packet statuses the chunk carries on the wire.
    pub fn symbol_count(&self) -> usize {
        match self {
            PacketStatusChunk::RunLengthChunk(c) => c.run_length as usize,
            PacketStatusChunk::StatusVectorChunk(c) => c.symbol_list.len(),
        }
    }

    /// Appends at most `limit` of the chunk's symbols to `out`, in order.
    fn expand_into(&self, out: &mut Vec<SymbolTypeTcc>, limit: usize) {
        match self {
            PacketStatusChunk::RunLengthChunk(c) => {
                let n = (c.run_length as usize).min(limit);
                out.extend(std::iter::repeat(c.packet_status_symbol).take(n));
            }
            PacketStatusChunk::StatusVectorChunk(c) => {
                out.extend(c.symbol_list.iter().copied().take(limit));
            }
        }
    }
}

impl MarshalSize for PacketStatusChunk {
    fn marshal_size(&self) -> usize {
        PACKET_STATUS_CHUNK_LENGTH
    }
}

impl Marshal for PacketStatusChunk {
    fn marshal_to(&self, buf: &mut [u8]) -> Result<usize> {
        match self {
            PacketStatusChunk::RunLengthChunk(c) => c.marshal_to(buf),
            PacketStatusChunk::StatusVectorChunk(c) => c.marshal_to(buf),
        }
    }
}

impl Unmarshal for PacketStatusChunk {
    /// Reads one chunk, choosing the kind from its T bit.
    fn unmarshal<B>(raw_packet: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        if raw_packet.remaining() < PACKET_STATUS_CHUNK_LENGTH {
            return Err(Error::PacketStatusChunkLength.into());
        }

        match get_nbits_from_byte(raw_packet.chunk()[0], 0, 1).into() {
            StatusChunkTypeTcc::RunLengthChunk => Ok(PacketStatusChunk::RunLengthChunk(
                RunLengthChunk::unmarshal(raw_packet)?,
            )),
            StatusChunkTypeTcc::StatusVectorChunk => Ok(PacketStatusChunk::StatusVectorChunk(
                StatusVectorChunk::unmarshal(raw_packet)?,
            )),
        }
    }
}

/// RunLengthChunk T=TypeTCCRunLengthChunk
/// 0                   1
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |T| S |       Run Length        |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunLengthChunk {
    /// S: status shared by every packet of the run
    pub packet_status_symbol: SymbolTypeTcc,
    /// run_length: count of S, 13 bits
    pub run_length: u16,
}

impl MarshalSize for RunLengthChunk {
    fn marshal_size(&self) -> usize {
        PACKET_STATUS_CHUNK_LENGTH
    }
}

impl Marshal for RunLengthChunk {
    fn marshal_to(&self, mut buf: &mut [u8]) -> Result<usize> {
        if buf.remaining_mut() < PACKET_STATUS_CHUNK_LENGTH {
            return Err(Error::BufferTooShort.into());
        }

        // T bit stays 0
        let mut dst = set_nbits_of_uint16(0, 2, 1, self.packet_status_symbol as u16)?;
        dst = set_nbits_of_uint16(dst, 13, 3, self.run_length)?;

        buf.put_u16(dst);

        Ok(PACKET_STATUS_CHUNK_LENGTH)
    }
}

impl Unmarshal for RunLengthChunk {
    fn unmarshal<B>(raw_packet: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        if raw_packet.remaining() < PACKET_STATUS_CHUNK_LENGTH {
            return Err(Error::PacketStatusChunkLength.into());
        }

        let b0 = raw_packet.get_u8();
        let b1 = raw_packet.get_u8();

        let packet_status_symbol = get_nbits_from_byte(b0, 1, 2).into();
        let run_length = (get_nbits_from_byte(b0, 3, 5) << 8) | b1 as u16;

        Ok(RunLengthChunk {
            packet_status_symbol,
            run_length,
        })
    }
}

/// StatusVectorChunk T=typeStatusVectorChunk
/// 0                   1
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |T|S|       symbol list         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusVectorChunk {
    /// OneBit or TwoBit
    pub symbol_size: SymbolSizeTypeTcc,

    /// With OneBit symbols the list holds up to 14 entries, each either
    /// PacketNotReceived or PacketReceivedSmallDelta. With TwoBit symbols it
    /// holds up to 7 entries from the full alphabet. Decoding always yields a
    /// full list.
    pub symbol_list: Vec<SymbolTypeTcc>,
}

impl MarshalSize for StatusVectorChunk {
    fn marshal_size(&self) -> usize {
        PACKET_STATUS_CHUNK_LENGTH
    }
}

impl Marshal for StatusVectorChunk {
    fn marshal_to(&self, mut buf: &mut [u8]) -> Result<usize> {
        if buf.remaining_mut() < PACKET_STATUS_CHUNK_LENGTH {
            return Err(Error::BufferTooShort.into());
        }

        let mut dst = set_nbits_of_uint16(0, 1, 0, 1)?;
        dst = set_nbits_of_uint16(dst, 1, 1, self.symbol_size as u16)?;

        let width = self.symbol_size.bits();
        for (i, s) in self.symbol_list.iter().enumerate() {
            // one-bit vectors only carry NotReceived and ReceivedSmallDelta
            if (*s as u16) >> width != 0 {
                return Err(Error::SymbolSizeMismatch.into());
            }
            // a list longer than the chunk holds runs past bit 15 and is rejected here
            let index = width * (i as u16) + 2;
            dst = set_nbits_of_uint16(dst, width, index, *s as u16)?;
        }

        buf.put_u16(dst);

        Ok(PACKET_STATUS_CHUNK_LENGTH)
    }
}

impl Unmarshal for StatusVectorChunk {
    fn unmarshal<B>(raw_packet: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        if raw_packet.remaining() < PACKET_STATUS_CHUNK_LENGTH {
            return Err(Error::PacketStatusChunkLength.into());
        }

        let word = raw_packet.get_u16();
        let symbol_size: SymbolSizeTypeTcc = ((word >> 14) & 0x1).into();

        let width = symbol_size.bits();
        let mask = (1u16 << width) - 1;
        let symbol_list = (0..symbol_size.capacity() as u16)
            .map(|i| {
                let shift = 16 - 2 - width * (i + 1);
                ((word >> shift) & mask).into()
            })
            .collect();

        Ok(StatusVectorChunk {
            symbol_size,
            symbol_list,
        })
    }
}

/// RecvDelta are represented as multiples of 250us
/// small delta is 1 byte: [0, 63.75]ms = [0, 63750]us = [0, 255]*250us
/// big delta is 2 bytes: [-8192.0, 8191.75]ms = [-8192000, 8191750]us = [-32768, 32767]*250us
/// https://tools.ietf.org/html/draft-holmer-rmcat-transport-wide-cc-extensions-01#section-3.1.5
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecvDelta {
    pub type_tcc_packet: SymbolTypeTcc,
    /// us
    pub delta: i64,
}

impl MarshalSize for RecvDelta {
    fn marshal_size(&self) -> usize {
        self.type_tcc_packet.delta_size()
    }
}

impl Marshal for RecvDelta {
    fn marshal_to(&self, mut buf: &mut [u8]) -> Result<usize> {
        let delta = self.delta / TYPE_TCC_DELTA_SCALE_FACTOR;

        match self.type_tcc_packet {
            SymbolTypeTcc::PacketReceivedSmallDelta => {
                let delta = u8::try_from(delta).map_err(|_| Error::DeltaExceedLimit)?;
                if buf.remaining_mut() < 1 {
                    return Err(Error::BufferTooShort.into());
                }
                buf.put_u8(delta);
                Ok(1)
            }
            SymbolTypeTcc::PacketReceivedLargeDelta => {
                let delta = i16::try_from(delta).map_err(|_| Error::DeltaExceedLimit)?;
                if buf.remaining_mut() < 2 {
                    return Err(Error::BufferTooShort.into());
                }
                buf.put_i16(delta);
                Ok(2)
            }
            // only received packets carry a delta
            _ => Err(Error::DeltaExceedLimit.into()),
        }
    }
}

impl Unmarshal for RecvDelta {
    /// Decodes a delta from a buffer holding exactly its 1 or 2 bytes; the
    /// size decides whether it is a small or a large delta.
    fn unmarshal<B>(raw_packet: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        match raw_packet.remaining() {
            1 => Ok(RecvDelta {
                type_tcc_packet: SymbolTypeTcc::PacketReceivedSmallDelta,
                delta: TYPE_TCC_DELTA_SCALE_FACTOR * raw_packet.get_u8() as i64,
            }),
            2 => Ok(RecvDelta {
                type_tcc_packet: SymbolTypeTcc::PacketReceivedLargeDelta,
                delta: TYPE_TCC_DELTA_SCALE_FACTOR * raw_packet.get_i16() as i64,
            }),
            _ => Err(Error::DeltaExceedLimit.into()),
        }
    }
}

/// sender ssrc, media ssrc, base sequence number, status count, reference time, fb pkt count
const PACKET_CHUNK_OFFSET: usize = 16;

/// https://tools.ietf.org/html/draft-holmer-rmcat-transport-wide-cc-extensions-01#section-3.1.5
pub const TYPE_TCC_DELTA_SCALE_FACTOR: i64 = 250;

/// TransportLayerCc for sender-BWE
/// https://tools.ietf.org/html/draft-holmer-rmcat-transport-wide-cc-extensions-01#page-5
///
/// `packet_chunks` are kept exactly as they appear on the wire, so the last
/// chunk may describe more packets than `packet_status_count`. The surplus is
/// not part of the feedback: [`TransportLayerCc::packet_status_symbols`] and
/// `recv_deltas` only cover the first `packet_status_count` packets.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct TransportLayerCc {
    /// SSRC of sender
    pub sender_ssrc: u32,
    /// SSRC of the media source
    pub media_ssrc: u32,
    /// Transport wide sequence of rtp extension
    pub base_sequence_number: u16,
    pub packet_status_count: u16,
    /// 24 bits, in multiples of 64ms
    pub reference_time: u32,
    pub fb_pkt_count: u8,
    pub packet_chunks: Vec<PacketStatusChunk>,
    /// One entry per packet whose status carries a delta, in sequence order
    pub recv_deltas: Vec<RecvDelta>,
}

impl TransportLayerCc {
    /// The per-packet statuses, starting at `base_sequence_number`, with the
    /// chunks expanded and cut at `packet_status_count`.
    pub fn packet_status_symbols(&self) -> Vec<SymbolTypeTcc> {
        let count = self.packet_status_count as usize;
        let mut symbols = Vec::with_capacity(count);
        for chunk in &self.packet_chunks {
            let remaining = count - symbols.len();
            if remaining == 0 {
                break;
            }
            chunk.expand_into(&mut symbols, remaining);
        }
        symbols
    }
}

impl fmt::Display for TransportLayerCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        out += format!("TransportLayerCC:\n\tSender Ssrc {}\n", self.sender_ssrc).as_str();
        out += format!("\tMedia Ssrc {}\n", self.media_ssrc).as_str();
        out += format!("\tBase Sequence Number {}\n", self.base_sequence_number).as_str();
        out += format!("\tStatus Count {}\n", self.packet_status_count).as_str();
        out += format!("\tReference Time {}\n", self.reference_time).as_str();
        out += format!("\tFeedback Packet Count {}\n", self.fb_pkt_count).as_str();
        out += "\tpacket_chunks ";
        for chunk in &self.packet_chunks {
            out += format!("{chunk:?} ").as_str();
        }
        out += "\n\trecv_deltas ";
        for delta in &self.recv_deltas {
            out += format!("{delta:?} ").as_str();
        }
        out += "\n";

        write!(f, "{out}")
    }
}

impl Packet for TransportLayerCc {
    /// The body is aligned with zero padding, so the padding bit stays clear.
    fn header(&self) -> Header {
        Header {
            padding: false,
            count: FORMAT_TCC,
            packet_type: PacketType::TransportSpecificFeedback,
            length: ((self.marshal_size() / 4) - 1) as u16,
        }
    }

    /// destination_ssrc returns an array of SSRC values that this packet refers to.
    fn destination_ssrc(&self) -> Vec<u32> {
        vec![self.media_ssrc]
    }

    fn raw_size(&self) -> usize {
        let deltas: usize = self.recv_deltas.iter().map(|d| d.marshal_size()).sum();
        HEADER_LENGTH
            + PACKET_CHUNK_OFFSET
            + self.packet_chunks.len() * PACKET_STATUS_CHUNK_LENGTH
            + deltas
    }
}

impl MarshalSize for TransportLayerCc {
    fn marshal_size(&self) -> usize {
        let l = self.raw_size();
        // align to 32-bit boundary
        l + get_padding_size(l)
    }
}

impl Marshal for TransportLayerCc {
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
        writer.put_u32(self.media_ssrc);
        writer.put_u16(self.base_sequence_number);
        writer.put_u16(self.packet_status_count);

        let reference_time_and_fb_pkt_count = append_nbits_to_uint32(0, 24, self.reference_time);
        let reference_time_and_fb_pkt_count =
            append_nbits_to_uint32(reference_time_and_fb_pkt_count, 8, self.fb_pkt_count as u32);
        writer.put_u32(reference_time_and_fb_pkt_count);

        for chunk in &self.packet_chunks {
            let n = chunk.marshal_to(writer)?;
            writer = &mut writer[n..];
        }

        for delta in &self.recv_deltas {
            let n = delta.marshal_to(writer)?;
            writer = &mut writer[n..];
        }

        put_zero_padding(buf, self.raw_size());

        Ok(size)
    }
}

impl Unmarshal for TransportLayerCc {
    fn unmarshal<B>(raw_packet: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let mut tcc = TransportLayerCc::default();
        tcc.unmarshal_into(raw_packet)?;
        Ok(tcc)
    }
}

impl Reusable for TransportLayerCc {
    fn clear(&mut self) {
        let mut packet_chunks = std::mem::take(&mut self.packet_chunks);
        let mut recv_deltas = std::mem::take(&mut self.recv_deltas);
        packet_chunks.clear();
        recv_deltas.clear();
        *self = TransportLayerCc {
            packet_chunks,
            recv_deltas,
            ..Default::default()
        };
    }

    fn unmarshal_into<B>(&mut self, raw_packet: &mut B) -> Result<()>
    where
        B: Buf,
    {
        // The delta stream is bounded by the declared length. Padding, when
        // flagged, is checked but not relied on to mark the end of the deltas.
        let (h, mut body) = read_packet_span(raw_packet)?;
        if h.packet_type != PacketType::TransportSpecificFeedback || h.count != FORMAT_TCC {
            return Err(Error::WrongType.into());
        }
        if body.remaining() < PACKET_CHUNK_OFFSET {
            return Err(Error::PacketTooShort.into());
        }

        self.sender_ssrc = body.get_u32();
        self.media_ssrc = body.get_u32();
        self.base_sequence_number = body.get_u16();
        self.packet_status_count = body.get_u16();
        self.reference_time = get_24bits_from_bytes(&body.split_to(3));
        self.fb_pkt_count = body.get_u8();

        // chunks are read until they describe packet_status_count packets;
        // the surplus of the last one is dropped from the symbol sequence
        let count = self.packet_status_count as usize;
        let mut symbols = Vec::with_capacity(count);
        self.packet_chunks.clear();
        while symbols.len() < count {
            if body.remaining() < PACKET_STATUS_CHUNK_LENGTH {
                return Err(Error::PacketTooShort.into());
            }
            let chunk = PacketStatusChunk::unmarshal(&mut body)?;
            let remaining = count - symbols.len();
            chunk.expand_into(&mut symbols, remaining);
            self.packet_chunks.push(chunk);
        }

        self.recv_deltas.clear();
        for symbol in symbols {
            let n = symbol.delta_size();
            if n == 0 {
                continue;
            }
            if body.remaining() < n {
                return Err(Error::PacketTooShort.into());
            }
            self.recv_deltas
                .push(RecvDelta::unmarshal(&mut body.split_to(n))?);
        }

        // whatever is left is alignment

        Ok(())
    }
}
