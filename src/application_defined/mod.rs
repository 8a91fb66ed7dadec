
use std::fmt;

use bytes::{Buf, BufMut, Bytes};
use util::marshal::{Marshal, MarshalSize, Unmarshal};

use crate::error::Error;
use crate::header::*;
use crate::packet::{Packet, Reusable};
use crate::util::*;

type Result<T> = std::result::Result<T, util::Error>;

const APP_NAME_LENGTH: usize = 4;
/// header, ssrc and name
const APP_FIXED_LENGTH: usize = HEADER_LENGTH + SSRC_LENGTH + APP_NAME_LENGTH;
const APP_MAX_PACKET_LENGTH: usize = 0xFFFF;

/// ApplicationDefined is an APP packet, carrying data whose meaning is agreed
/// out of band between the application and its peers.
///
/// ## Specifications
///
/// * [RFC 3550 §6.7]
///
/// [RFC 3550 §6.7]: https://tools.ietf.org/html/rfc3550#section-6.7
#[derive(Debug, PartialEq, Eq, Default, Clone)]
pub struct ApplicationDefined {
    /// 5-bit subtype, carried in the header count field
    pub sub_type: u8,
    pub ssrc: u32,
    /// Four ASCII characters
    pub name: String,
    pub data: Bytes,
}

impl fmt::Display for ApplicationDefined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ApplicationDefined {:x} subtype {} name {}: {} bytes of data",
            self.ssrc,
            self.sub_type,
            self.name,
            self.data.len()
        )
    }
}

impl Packet for ApplicationDefined {
    fn header(&self) -> Header {
        Header {
            padding: get_padding_size(self.raw_size()) != 0,
            count: self.sub_type,
            packet_type: PacketType::ApplicationDefined,
            length: ((self.marshal_size() / 4) - 1) as u16,
        }
    }

    fn destination_ssrc(&self) -> Vec<u32> {
        vec![self.ssrc]
    }

    fn raw_size(&self) -> usize {
        APP_FIXED_LENGTH + self.data.len()
    }
}

impl MarshalSize for ApplicationDefined {
    fn marshal_size(&self) -> usize {
        let l = self.raw_size();
        l + get_padding_size(l)
    }
}

impl Marshal for ApplicationDefined {
    fn marshal_to(&self, buf: &mut [u8]) -> Result<usize> {
        /*
         *  0                   1                   2                   3
         *  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
         * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
         * |V=2|P| subtype |   PT=APP=204  |             length            |
         * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
         * |                           SSRC/CSRC                           |
         * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
         * |                          name (ASCII)                         |
         * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
         * |                   application-dependent data                ...
         * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
         */
        if self.name.len() != APP_NAME_LENGTH || !self.name.is_ascii() {
            return Err(Error::AppDefinedInvalidName.into());
        }
        if self.raw_size() > APP_MAX_PACKET_LENGTH {
            return Err(Error::AppDefinedDataTooLarge.into());
        }

        let size = self.marshal_size();
        if buf.len() < size {
            return Err(Error::BufferTooShort.into());
        }

        let h = self.header();
        let mut writer = &mut buf[..];
        let n = h.marshal_to(writer)?;
        writer = &mut writer[n..];

        writer.put_u32(self.ssrc);
        writer.put_slice(self.name.as_bytes());
        writer.put_slice(&self.data);

        if h.padding {
            put_padding(buf, self.raw_size());
        }

        Ok(size)
    }
}

impl Unmarshal for ApplicationDefined {
    fn unmarshal<B>(raw_packet: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        if raw_packet.remaining() < APP_FIXED_LENGTH {
            return Err(Error::PacketTooShort.into());
        }

        let h = Header::unmarshal(raw_packet)?;
        if h.packet_type != PacketType::ApplicationDefined {
            return Err(Error::WrongType.into());
        }

        let length = h.length as usize * 4;
        if length + HEADER_LENGTH < APP_FIXED_LENGTH || length > raw_packet.remaining() {
            return Err(Error::AppDefinedInvalidLength.into());
        }

        let mut body = take_packet_body(&h, raw_packet)?;
        if body.remaining() < SSRC_LENGTH + APP_NAME_LENGTH {
            return Err(Error::WrongPadding.into());
        }

        let ssrc = body.get_u32();
        let name = body.split_to(APP_NAME_LENGTH);
        if !name.is_ascii() {
            return Err(Error::AppDefinedInvalidName.into());
        }
        let name = String::from_utf8_lossy(&name).into_owned();

        Ok(ApplicationDefined {
            sub_type: h.count,
            ssrc,
            name,
            data: body,
        })
    }
}

impl Reusable for ApplicationDefined {}
