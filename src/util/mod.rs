#[cfg(test)]
mod util_test;

use bytes::{Buf, BufMut, Bytes};
use util::marshal::{Marshal, Unmarshal};

use crate::error::{Error, Result};
use crate::header::{Header, PacketType, HEADER_LENGTH, MAX_PACKET_SIZE, SSRC_LENGTH};

/// Returns the number of bytes needed to align `len` to a 32-bit boundary.
pub(crate) fn get_padding_size(len: usize) -> usize {
    if len % 4 == 0 {
        0
    } else {
        4 - (len % 4)
    }
}

/// Writes RTCP padding after `len` bytes of `buf`: zero octets, the last one
/// carrying the padding count.
pub(crate) fn put_padding(buf: &mut [u8], len: usize) {
    let padding_size = get_padding_size(len);
    if padding_size == 0 {
        return;
    }
    for b in &mut buf[len..len + padding_size] {
        *b = 0;
    }
    buf[len + padding_size - 1] = padding_size as u8;
}

/// Writes zero octets after `len` bytes of `buf` up to the next 32-bit boundary.
pub(crate) fn put_zero_padding(buf: &mut [u8], len: usize) {
    let padding_size = get_padding_size(len);
    for b in &mut buf[len..len + padding_size] {
        *b = 0;
    }
}

/// Fails when a packet of `size` bytes cannot be described by the header
/// length field.
pub(crate) fn check_packet_size(size: usize) -> Result<()> {
    if size > MAX_PACKET_SIZE {
        Err(Error::BadLength)
    } else {
        Ok(())
    }
}

/// Reads one packet's header and the `length * 4` bytes that follow it.
///
/// When the padding bit is set the trailing padding is checked against the
/// declared length and stripped, so the returned body holds only the packet's
/// own fields. Exactly `(length + 1) * 4` bytes are consumed from `raw_packet`.
pub(crate) fn read_packet_body<B>(raw_packet: &mut B) -> Result<(Header, Bytes)>
where
    B: Buf,
{
    let header = Header::unmarshal(raw_packet)?;
    let body = take_packet_body(&header, raw_packet)?;
    Ok((header, body))
}

/// Reads the body announced by an already decoded `header`, stripping padding.
pub(crate) fn take_packet_body<B>(header: &Header, raw_packet: &mut B) -> Result<Bytes>
where
    B: Buf,
{
    let mut body = take_packet_span(header, raw_packet)?;
    if header.padding {
        // checked by take_packet_span
        let padding_len = body[body.len() - 1] as usize;
        body.truncate(body.len() - padding_len);
    }

    Ok(body)
}

/// Like [`read_packet_body`], but the checked padding is left in the returned body.
pub(crate) fn read_packet_span<B>(raw_packet: &mut B) -> Result<(Header, Bytes)>
where
    B: Buf,
{
    let header = Header::unmarshal(raw_packet)?;
    let body = take_packet_span(&header, raw_packet)?;
    Ok((header, body))
}

fn take_packet_span<B>(header: &Header, raw_packet: &mut B) -> Result<Bytes>
where
    B: Buf,
{
    let length = header.length as usize * 4;
    if raw_packet.remaining() < length {
        return Err(Error::PacketTooShort);
    }

    let body = raw_packet.copy_to_bytes(length);
    if header.padding {
        let padding_len = match body.last() {
            Some(&n) => n as usize,
            None => return Err(Error::WrongPadding),
        };
        if padding_len == 0 || padding_len > body.len() {
            return Err(Error::WrongPadding);
        }
    }

    Ok(body)
}

/// Sender and media SSRC opening every RFC 4585 feedback message.
pub(crate) const FEEDBACK_SSRCS_LENGTH: usize = SSRC_LENGTH * 2;

/// Reads a feedback message without FCI and returns its sender and media SSRC.
pub(crate) fn read_ssrc_feedback<B>(
    raw_packet: &mut B,
    packet_type: PacketType,
    format: u8,
) -> Result<(u32, u32)>
where
    B: Buf,
{
    let (h, mut body) = read_packet_body(raw_packet)?;
    if h.packet_type != packet_type || h.count != format {
        return Err(Error::WrongType);
    }
    if body.remaining() < FEEDBACK_SSRCS_LENGTH {
        return Err(Error::PacketTooShort);
    }

    Ok((body.get_u32(), body.get_u32()))
}

/// Writes a feedback message without FCI: `header`, then the two SSRCs.
pub(crate) fn put_ssrc_feedback(
    buf: &mut [u8],
    header: &Header,
    sender_ssrc: u32,
    media_ssrc: u32,
) -> Result<usize> {
    let size = HEADER_LENGTH + FEEDBACK_SSRCS_LENGTH;
    if buf.len() < size {
        return Err(Error::BufferTooShort);
    }

    let n = header.marshal_to(buf)?;
    let mut writer = &mut buf[n..];
    writer.put_u32(sender_ssrc);
    writer.put_u32(media_ssrc);

    Ok(size)
}

/// set_nbits_of_uint16 truncates `val` to `size` bits, shifts it to `start_index`
/// (counted from the most significant bit) and ors it into `src`.
pub(crate) fn set_nbits_of_uint16(src: u16, size: u16, start_index: u16, val: u16) -> Result<u16> {
    if size == 0 || start_index + size > 16 {
        return Err(Error::InvalidSizeOrStartIndex);
    }

    // truncate val to size bits
    let val = val & ((1u32 << size) - 1) as u16;

    Ok(src | (val << (16 - size - start_index)))
}

/// get_nbits_from_byte returns `n` bits of `b` starting at bit `begin`
/// (counted from the most significant bit).
pub(crate) fn get_nbits_from_byte(b: u8, begin: u16, n: u16) -> u16 {
    let end_shift = 8 - (begin + n);
    let mask = (0xFF >> begin) & (0xFF << end_shift) as u8;
    (b & mask) as u16 >> end_shift
}

/// append_nbits_to_uint32 left-shifts `src` by `n` and appends the low `n` bits of `val`.
pub(crate) fn append_nbits_to_uint32(src: u32, n: u32, val: u32) -> u32 {
    (src << n) | (val & (0xFFFFFFFF >> (32 - n)))
}

/// get_24bits_from_bytes reads a big-endian 24-bit value.
pub(crate) fn get_24bits_from_bytes(b: &[u8]) -> u32 {
    ((b[0] as u32) << 16) + ((b[1] as u32) << 8) + (b[2] as u32)
}
