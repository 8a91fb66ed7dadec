use std::io::{self, Read};

use bytes::{BufMut, BytesMut};
use util::marshal::Unmarshal;

use crate::error::Result;
use crate::header::*;
use crate::packet::{unmarshaller, RtcpPacket};

/// Decoder reads RTCP packets one at a time off a byte stream.
///
/// Each call reads the 4-byte header, then exactly the body its length field
/// declares, so the stream is left positioned at the next packet.
#[derive(Debug)]
pub struct Decoder<R> {
    reader: R,
    buf: BytesMut,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Decoder {
            reader,
            buf: BytesMut::new(),
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Reads the next packet. A stream that ends mid-packet fails with `Error::Io`.
    pub fn read_packet(&mut self) -> Result<RtcpPacket> {
        match self.next_packet()? {
            Some(p) => Ok(p),
            None => Err(io::Error::from(io::ErrorKind::UnexpectedEof).into()),
        }
    }

    /// Like [`read_packet`](Decoder::read_packet), but a stream that ends cleanly
    /// on a packet boundary yields `Ok(None)`.
    pub fn next_packet(&mut self) -> Result<Option<RtcpPacket>> {
        let mut header = [0u8; HEADER_LENGTH];
        if !self.read_header(&mut header)? {
            return Ok(None);
        }

        let h = Header::unmarshal(&mut &header[..])?;
        let body_len = h.length as usize * 4;

        self.buf.clear();
        self.buf.reserve(HEADER_LENGTH + body_len);
        self.buf.put_slice(&header);
        self.buf.resize(HEADER_LENGTH + body_len, 0);
        self.reader.read_exact(&mut self.buf[HEADER_LENGTH..])?;

        let mut packet = self.buf.split().freeze();
        unmarshaller(&mut packet).map(Some)
    }

    /// Fills `header`, returning false if the stream was already at its end.
    fn read_header(&mut self, header: &mut [u8; HEADER_LENGTH]) -> Result<bool> {
        let mut filled = 0;
        while filled < HEADER_LENGTH {
            match self.reader.read(&mut header[filled..]) {
                Ok(0) if filled == 0 => return Ok(false),
                Ok(0) => return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into()),
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(true)
    }
}

impl<R: Read> Iterator for Decoder<R> {
    type Item = Result<RtcpPacket>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_packet().transpose()
    }
}
