
use std::fmt;

use bytes::Buf;
use util::marshal::{Marshal, MarshalSize, Unmarshal};

use crate::header::*;
use crate::packet::{Packet, Reusable};
use crate::util::*;

type Result<T> = std::result::Result<T, util::Error>;

/// The RapidResynchronizationRequest packet asks the media sender to send a
/// full state refresh as soon as possible (RFC 6051). Like PLI it carries no
/// feedback control information.
#[derive(Debug, PartialEq, Eq, Default, Clone)]
pub struct RapidResynchronizationRequest {
    /// SSRC of sender
    pub sender_ssrc: u32,
    /// SSRC of the media source
    pub media_ssrc: u32,
}

impl fmt::Display for RapidResynchronizationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RapidResynchronizationRequest {:x} {:x}",
            self.sender_ssrc, self.media_ssrc
        )
    }
}

impl Packet for RapidResynchronizationRequest {
    fn header(&self) -> Header {
        Header {
            padding: false,
            count: FORMAT_RRR,
            packet_type: PacketType::TransportSpecificFeedback,
            length: (FEEDBACK_SSRCS_LENGTH / 4) as u16,
        }
    }

    fn destination_ssrc(&self) -> Vec<u32> {
        vec![self.media_ssrc]
    }

    fn raw_size(&self) -> usize {
        HEADER_LENGTH + FEEDBACK_SSRCS_LENGTH
    }
}

impl MarshalSize for RapidResynchronizationRequest {
    fn marshal_size(&self) -> usize {
        self.raw_size()
    }
}

impl Marshal for RapidResynchronizationRequest {
    fn marshal_to(&self, buf: &mut [u8]) -> Result<usize> {
        Ok(put_ssrc_feedback(
            buf,
            &self.header(),
            self.sender_ssrc,
            self.media_ssrc,
        )?)
    }
}

impl Unmarshal for RapidResynchronizationRequest {
    fn unmarshal<B>(raw_packet: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let (sender_ssrc, media_ssrc) =
            read_ssrc_feedback(raw_packet, PacketType::TransportSpecificFeedback, FORMAT_RRR)?;
        Ok(RapidResynchronizationRequest {
            sender_ssrc,
            media_ssrc,
        })
    }
}

impl Reusable for RapidResynchronizationRequest {}
