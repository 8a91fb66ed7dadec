
use std::fmt;

use bytes::buf::Chain;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use log::trace;
use util::marshal::{Marshal, MarshalSize, Unmarshal};

use crate::application_defined::ApplicationDefined;
use crate::error::{Error, Result};
use crate::extended_report::ExtendedReport;
use crate::goodbye::Goodbye;
use crate::header::*;
use crate::payload_feedbacks::full_intra_request::FullIntraRequest;
use crate::payload_feedbacks::picture_loss_indication::PictureLossIndication;
use crate::payload_feedbacks::receiver_estimated_maximum_bitrate::ReceiverEstimatedMaximumBitrate;
use crate::payload_feedbacks::slice_loss_indication::SliceLossIndication;
use crate::raw_packet::RawPacket;
use crate::receiver_report::ReceiverReport;
use crate::sender_report::SenderReport;
use crate::source_description::SourceDescription;
use crate::transport_feedbacks::congestion_control_feedback::CcFeedbackReport;
use crate::transport_feedbacks::rapid_resynchronization_request::RapidResynchronizationRequest;
use crate::transport_feedbacks::transport_layer_cc::TransportLayerCc;
use crate::transport_feedbacks::transport_layer_nack::TransportLayerNack;

/// Packet represents an RTCP packet, a protocol used for out-of-band statistics and control information for an RTP session
pub trait Packet: Marshal + fmt::Display + fmt::Debug {
    fn header(&self) -> Header;
    fn destination_ssrc(&self) -> Vec<u32>;
    /// Size of the packet before 32-bit alignment is applied.
    fn raw_size(&self) -> usize;
}

/// Reusable lets a decoded packet be overwritten in place, so buffers it owns
/// keep their capacity across decodes.
pub(crate) trait Reusable: Default + Unmarshal {
    /// Returns to the zero value.
    fn clear(&mut self) {
        *self = Self::default();
    }

    /// Decodes `raw_packet` over `self`. On error the contents are unspecified.
    fn unmarshal_into<B>(&mut self, raw_packet: &mut B) -> util::Result<()>
    where
        B: Buf,
    {
        *self = Self::unmarshal(raw_packet)?;
        Ok(())
    }
}

/// PacketKind names the message variants an [`RtcpPacket`] can hold.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum PacketKind {
    SenderReport,
    ReceiverReport,
    SourceDescription,
    Goodbye,
    ApplicationDefined,
    ExtendedReport,
    TransportLayerNack,
    RapidResynchronizationRequest,
    TransportLayerCc,
    CcFeedbackReport,
    PictureLossIndication,
    SliceLossIndication,
    ReceiverEstimatedMaximumBitrate,
    FullIntraRequest,
    RawPacket,
}

impl PacketKind {
    pub const ALL: [PacketKind; 15] = [
        PacketKind::SenderReport,
        PacketKind::ReceiverReport,
        PacketKind::SourceDescription,
        PacketKind::Goodbye,
        PacketKind::ApplicationDefined,
        PacketKind::ExtendedReport,
        PacketKind::TransportLayerNack,
        PacketKind::RapidResynchronizationRequest,
        PacketKind::TransportLayerCc,
        PacketKind::CcFeedbackReport,
        PacketKind::PictureLossIndication,
        PacketKind::SliceLossIndication,
        PacketKind::ReceiverEstimatedMaximumBitrate,
        PacketKind::FullIntraRequest,
        PacketKind::RawPacket,
    ];

    /// Selects the variant a packet with this header decodes to. The packet
    /// type decides on its own except for the two feedback types, where the
    /// count field carries the feedback format.
    pub fn from_header(h: &Header) -> Self {
        match h.packet_type {
            PacketType::SenderReport => PacketKind::SenderReport,
            PacketType::ReceiverReport => PacketKind::ReceiverReport,
            PacketType::SourceDescription => PacketKind::SourceDescription,
            PacketType::Goodbye => PacketKind::Goodbye,
            PacketType::ApplicationDefined => PacketKind::ApplicationDefined,
            PacketType::ExtendedReport => PacketKind::ExtendedReport,

            PacketType::TransportSpecificFeedback => match h.count {
                FORMAT_TLN => PacketKind::TransportLayerNack,
                FORMAT_RRR => PacketKind::RapidResynchronizationRequest,
                FORMAT_TCC => PacketKind::TransportLayerCc,
                FORMAT_CCFB => PacketKind::CcFeedbackReport,
                _ => PacketKind::RawPacket,
            },

            PacketType::PayloadSpecificFeedback => match h.count {
                FORMAT_PLI => PacketKind::PictureLossIndication,
                FORMAT_SLI => PacketKind::SliceLossIndication,
                FORMAT_REMB => PacketKind::ReceiverEstimatedMaximumBitrate,
                FORMAT_FIR => PacketKind::FullIntraRequest,
                _ => PacketKind::RawPacket,
            },

            PacketType::Unsupported => PacketKind::RawPacket,
        }
    }
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// RtcpPacket holds one decoded RTCP message of any supported kind.
#[derive(Debug, PartialEq, Clone)]
pub enum RtcpPacket {
    SenderReport(SenderReport),
    ReceiverReport(ReceiverReport),
    SourceDescription(SourceDescription),
    Goodbye(Goodbye),
    ApplicationDefined(ApplicationDefined),
    ExtendedReport(ExtendedReport),
    TransportLayerNack(TransportLayerNack),
    RapidResynchronizationRequest(RapidResynchronizationRequest),
    TransportLayerCc(TransportLayerCc),
    CcFeedbackReport(CcFeedbackReport),
    PictureLossIndication(PictureLossIndication),
    SliceLossIndication(SliceLossIndication),
    ReceiverEstimatedMaximumBitrate(ReceiverEstimatedMaximumBitrate),
    FullIntraRequest(FullIntraRequest),
    RawPacket(RawPacket),
}

macro_rules! impl_from_variant {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for RtcpPacket {
                fn from(p: $variant) -> Self {
                    RtcpPacket::$variant(p)
                }
            }
        )+
    };
}

impl_from_variant!(
    SenderReport,
    ReceiverReport,
    SourceDescription,
    Goodbye,
    ApplicationDefined,
    ExtendedReport,
    TransportLayerNack,
    RapidResynchronizationRequest,
    TransportLayerCc,
    CcFeedbackReport,
    PictureLossIndication,
    SliceLossIndication,
    ReceiverEstimatedMaximumBitrate,
    FullIntraRequest,
    RawPacket,
);

macro_rules! with_variant {
    ($packet:expr, $p:ident => $body:expr) => {
        match $packet {
            RtcpPacket::SenderReport($p) => $body,
            RtcpPacket::ReceiverReport($p) => $body,
            RtcpPacket::SourceDescription($p) => $body,
            RtcpPacket::Goodbye($p) => $body,
            RtcpPacket::ApplicationDefined($p) => $body,
            RtcpPacket::ExtendedReport($p) => $body,
            RtcpPacket::TransportLayerNack($p) => $body,
            RtcpPacket::RapidResynchronizationRequest($p) => $body,
            RtcpPacket::TransportLayerCc($p) => $body,
            RtcpPacket::CcFeedbackReport($p) => $body,
            RtcpPacket::PictureLossIndication($p) => $body,
            RtcpPacket::SliceLossIndication($p) => $body,
            RtcpPacket::ReceiverEstimatedMaximumBitrate($p) => $body,
            RtcpPacket::FullIntraRequest($p) => $body,
            RtcpPacket::RawPacket($p) => $body,
        }
    };
}

impl RtcpPacket {
    /// The zero value of the given kind.
    pub fn empty(kind: PacketKind) -> Self {
        match kind {
            PacketKind::SenderReport => SenderReport::default().into(),
            PacketKind::ReceiverReport => ReceiverReport::default().into(),
            PacketKind::SourceDescription => SourceDescription::default().into(),
            PacketKind::Goodbye => Goodbye::default().into(),
            PacketKind::ApplicationDefined => ApplicationDefined::default().into(),
            PacketKind::ExtendedReport => ExtendedReport::default().into(),
            PacketKind::TransportLayerNack => TransportLayerNack::default().into(),
            PacketKind::RapidResynchronizationRequest => {
                RapidResynchronizationRequest::default().into()
            }
            PacketKind::TransportLayerCc => TransportLayerCc::default().into(),
            PacketKind::CcFeedbackReport => CcFeedbackReport::default().into(),
            PacketKind::PictureLossIndication => PictureLossIndication::default().into(),
            PacketKind::SliceLossIndication => SliceLossIndication::default().into(),
            PacketKind::ReceiverEstimatedMaximumBitrate => {
                ReceiverEstimatedMaximumBitrate::default().into()
            }
            PacketKind::FullIntraRequest => FullIntraRequest::default().into(),
            PacketKind::RawPacket => RawPacket::default().into(),
        }
    }

    pub fn kind(&self) -> PacketKind {
        match self {
            RtcpPacket::SenderReport(_) => PacketKind::SenderReport,
            RtcpPacket::ReceiverReport(_) => PacketKind::ReceiverReport,
            RtcpPacket::SourceDescription(_) => PacketKind::SourceDescription,
            RtcpPacket::Goodbye(_) => PacketKind::Goodbye,
            RtcpPacket::ApplicationDefined(_) => PacketKind::ApplicationDefined,
            RtcpPacket::ExtendedReport(_) => PacketKind::ExtendedReport,
            RtcpPacket::TransportLayerNack(_) => PacketKind::TransportLayerNack,
            RtcpPacket::RapidResynchronizationRequest(_) => {
                PacketKind::RapidResynchronizationRequest
            }
            RtcpPacket::TransportLayerCc(_) => PacketKind::TransportLayerCc,
            RtcpPacket::CcFeedbackReport(_) => PacketKind::CcFeedbackReport,
            RtcpPacket::PictureLossIndication(_) => PacketKind::PictureLossIndication,
            RtcpPacket::SliceLossIndication(_) => PacketKind::SliceLossIndication,
            RtcpPacket::ReceiverEstimatedMaximumBitrate(_) => {
                PacketKind::ReceiverEstimatedMaximumBitrate
            }
            RtcpPacket::FullIntraRequest(_) => PacketKind::FullIntraRequest,
            RtcpPacket::RawPacket(_) => PacketKind::RawPacket,
        }
    }

    /// Returns the packet to the zero value of its kind. Lists the packet owns
    /// are emptied but keep their allocation.
    pub fn reset(&mut self) {
        with_variant!(self, p => p.clear())
    }

    /// Decodes one framed packet over `self`, which must already be of the
    /// frame's kind.
    pub(crate) fn unmarshal_into<B>(&mut self, in_packet: &mut B) -> Result<()>
    where
        B: Buf,
    {
        with_variant!(self, p => p.unmarshal_into(in_packet))?;
        Ok(())
    }

    fn as_packet(&self) -> &dyn Packet {
        with_variant!(self, p => p as &dyn Packet)
    }
}

impl fmt::Display for RtcpPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_packet(), f)
    }
}

impl Packet for RtcpPacket {
    fn header(&self) -> Header {
        self.as_packet().header()
    }

    fn destination_ssrc(&self) -> Vec<u32> {
        self.as_packet().destination_ssrc()
    }

    fn raw_size(&self) -> usize {
        self.as_packet().raw_size()
    }
}

impl MarshalSize for RtcpPacket {
    fn marshal_size(&self) -> usize {
        self.as_packet().marshal_size()
    }
}

impl Marshal for RtcpPacket {
    fn marshal_to(&self, buf: &mut [u8]) -> util::Result<usize> {
        self.as_packet().marshal_to(buf)
    }
}

impl Unmarshal for RtcpPacket {
    /// Decodes the first packet of `raw_packet`, whatever its kind.
    fn unmarshal<B>(raw_packet: &mut B) -> util::Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        Ok(unmarshaller(raw_packet)?)
    }
}

/// Unmarshal takes an entire udp datagram (which may consist of multiple RTCP packets) and
/// returns every packet it contains, in order.
///
/// The packets are not checked against the compound packet rules; use
/// [`unmarshal_compound`](crate::compound_packet::unmarshal_compound) for that.
/// An empty datagram is an [`Error::InvalidHeader`].
pub fn unmarshal<B>(raw_data: &mut B) -> Result<Vec<RtcpPacket>>
where
    B: Buf,
{
    let mut packets = vec![];

    while raw_data.has_remaining() {
        let p = unmarshaller(raw_data)?;
        packets.push(p);
    }

    match packets.len() {
        // Empty Packet
        0 => Err(Error::InvalidHeader),

        // Multiple Packets
        _ => Ok(packets),
    }
}

/// Marshal takes an array of Packets and serializes them to a single buffer
pub fn marshal(packets: &[RtcpPacket]) -> Result<Bytes> {
    let mut out = BytesMut::new();
    for p in packets {
        let data = p.marshal()?;
        out.put(data);
    }
    Ok(out.freeze())
}

/// Decodes the first packet of `raw_data` and reports how many bytes it spanned.
pub fn unmarshal_one<B>(raw_data: &mut B) -> Result<(RtcpPacket, usize)>
where
    B: Buf,
{
    let before = raw_data.remaining();
    let p = unmarshaller(raw_data)?;
    Ok((p, before - raw_data.remaining()))
}

/// Takes the next packet off `raw_data`, returning the kind it decodes to and
/// its exact span, header included.
pub(crate) fn next_frame<B>(raw_data: &mut B) -> Result<(PacketKind, Chain<Bytes, Bytes>)>
where
    B: Buf,
{
    if raw_data.remaining() < HEADER_LENGTH {
        return Err(Error::PacketTooShort);
    }
    let raw_header = raw_data.copy_to_bytes(HEADER_LENGTH);
    let h = Header::unmarshal(&mut raw_header.clone())?;

    let length = (h.length as usize) * 4;
    if length > raw_data.remaining() {
        return Err(Error::PacketTooShort);
    }

    let kind = PacketKind::from_header(&h);
    if kind == PacketKind::RawPacket {
        trace!(
            "no decoder for {} with count {}, keeping {} raw bytes",
            h.packet_type,
            h.count,
            length + HEADER_LENGTH
        );
    }

    Ok((kind, raw_header.chain(raw_data.copy_to_bytes(length))))
}

/// unmarshaller is a factory which pulls the first RTCP packet from a bytestream,
/// and returns it's parsed representation.
pub(crate) fn unmarshaller<B>(raw_data: &mut B) -> Result<RtcpPacket>
where
    B: Buf,
{
    let (kind, mut in_packet) = next_frame(raw_data)?;
    let mut p = RtcpPacket::empty(kind);
    p.unmarshal_into(&mut in_packet)?;
    Ok(p)
}
