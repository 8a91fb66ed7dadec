
use std::fmt;

use bytes::{Buf, Bytes};
use log::debug;
use util::marshal::{Marshal, MarshalSize};

use crate::error::{Error, Result};
use crate::packet::*;
use crate::source_description::*;

/// A CompoundPacket is a collection of RTCP packets transmitted as a single packet with
/// the underlying protocol (for example UDP).
///
/// To maximize the resolution of reception statistics, the first Packet in a CompoundPacket
/// must always be either a SenderReport or a ReceiverReport.  This is true even if no data
/// has been sent or received, in which case an empty ReceiverReport must be sent, and even
/// if the only other RTCP packet in the compound packet is a Goodbye.
///
/// Next, a SourceDescription containing a CNAME item must be included in each CompoundPacket
/// to identify the source and to begin associating media for purposes such as lip-sync.
///
/// Other RTCP packet types may follow in any order. Packet types may appear more than once.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct CompoundPacket(pub Vec<RtcpPacket>);

impl fmt::Display for CompoundPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompoundPacket [")?;
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, "]")
    }
}

impl From<Vec<RtcpPacket>> for CompoundPacket {
    fn from(packets: Vec<RtcpPacket>) -> Self {
        CompoundPacket(packets)
    }
}

impl IntoIterator for CompoundPacket {
    type Item = RtcpPacket;
    type IntoIter = std::vec::IntoIter<RtcpPacket>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CompoundPacket {
    type Item = &'a RtcpPacket;
    type IntoIter = std::slice::Iter<'a, RtcpPacket>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl CompoundPacket {
    pub fn iter(&self) -> std::slice::Iter<'_, RtcpPacket> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// destination_ssrc returns the synchronization sources associated with this
    /// CompoundPacket's reception report.
    pub fn destination_ssrc(&self) -> Vec<u32> {
        self.0
            .first()
            .map(|p| p.destination_ssrc())
            .unwrap_or_default()
    }

    /// CNAME returns the CNAME that *must* be present in every CompoundPacket
    pub fn cname(&self) -> Result<Bytes> {
        validate(&self.0)?;

        // validation guarantees a CNAME-bearing SDES before any other non-RR packet
        self.0[1..]
            .iter()
            .find_map(|p| match p {
                RtcpPacket::SourceDescription(sdes) => first_cname(sdes).cloned(),
                _ => None,
            })
            .ok_or(Error::MissingCname)
    }
}

impl MarshalSize for CompoundPacket {
    fn marshal_size(&self) -> usize {
        self.0.iter().map(|p| p.marshal_size()).sum()
    }
}

impl Marshal for CompoundPacket {
    /// Marshal encodes the CompoundPacket as binary, refusing a non-compliant ordering.
    fn marshal_to(&self, mut buf: &mut [u8]) -> util::Result<usize> {
        validate(&self.0)?;

        let mut written = 0;
        for packet in &self.0 {
            let n = packet.marshal_to(buf)?;
            buf = &mut buf[n..];
            written += n;
        }

        Ok(written)
    }
}

fn first_cname(sdes: &SourceDescription) -> Option<&Bytes> {
    sdes.chunks.iter().find_map(|c| c.cname())
}

/// Validate returns an error if `packets` is not an RFC-compliant compound packet.
pub fn validate(packets: &[RtcpPacket]) -> Result<()> {
    let first = packets.first().ok_or(Error::EmptyCompound)?;

    // SenderReport and ReceiverReport are the only types that
    // are allowed to be the first packet in a compound datagram
    match first {
        RtcpPacket::SenderReport(_) | RtcpPacket::ReceiverReport(_) => {}
        _ => return Err(Error::BadFirstPacket),
    }
    if first.header().padding {
        return Err(Error::BadFirstPacket);
    }

    for pkt in &packets[1..] {
        match pkt {
            // If the number of RecetpionReports exceeds 31 additional ReceiverReports
            // can be included here.
            RtcpPacket::ReceiverReport(_) => continue,

            // A SourceDescription containing a CNAME must be included in every
            // CompoundPacket.
            RtcpPacket::SourceDescription(sdes) => {
                if first_cname(sdes).is_none() {
                    return Err(Error::MissingCname);
                }
                return Ok(());
            }

            // Other packets are not permitted before the CNAME
            _ => return Err(Error::PacketBeforeCname),
        }
    }

    // CNAME never reached
    Err(Error::MissingCname)
}

/// CompoundError is returned when a datagram cannot be decoded as a compliant
/// compound packet. `packets` holds everything decoded before the failure, and
/// for an ordering violation that is the whole datagram.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{error}")]
pub struct CompoundError {
    pub packets: Vec<RtcpPacket>,
    #[source]
    pub error: Error,
}

impl CompoundError {
    /// Reports whether every packet was decoded and only the ordering failed.
    pub fn is_parseable(&self) -> bool {
        self.error.is_compound_violation()
    }
}

impl From<CompoundError> for Error {
    fn from(e: CompoundError) -> Self {
        e.error
    }
}

/// Decodes every packet in `raw_data` and checks compound ordering.
pub fn unmarshal_compound<B>(raw_data: &mut B) -> std::result::Result<CompoundPacket, CompoundError>
where
    B: Buf,
{
    unmarshal_compound_with(raw_data, unmarshaller)
}

pub(crate) fn unmarshal_compound_with<B, F>(
    raw_data: &mut B,
    mut next: F,
) -> std::result::Result<CompoundPacket, CompoundError>
where
    B: Buf,
    F: FnMut(&mut B) -> Result<RtcpPacket>,
{
    let mut packets = vec![];

    while raw_data.has_remaining() {
        match next(raw_data) {
            Ok(p) => packets.push(p),
            Err(error) => {
                debug!(
                    "compound decode stopped after {} packets: {}",
                    packets.len(),
                    error
                );
                return Err(CompoundError { packets, error });
            }
        }
    }

    if let Err(error) = validate(&packets) {
        debug!("compound packet of {} packets rejected: {}", packets.len(), error);
        return Err(CompoundError { packets, error });
    }

    Ok(CompoundPacket(packets))
}

/// Validates `packets` and concatenates their encodings.
pub fn marshal_compound(packets: &[RtcpPacket]) -> Result<Bytes> {
    validate(packets)?;
    marshal(packets)
}
