use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Packet lost exceeds maximum amount of packets
    /// that can possibly be lost.
    #[error("Invalid total lost count")]
    InvalidTotalLost,
    /// Packet contains an invalid header.
    #[error("Invalid header")]
    InvalidHeader,
    /// Packet contains empty compound.
    #[error("Empty compound packet")]
    EmptyCompound,
    /// Invalid first packet in compound packets. First packet
    /// should either be a SenderReport packet or ReceiverReport
    #[error("First packet in compound must be SR or RR")]
    BadFirstPacket,
    /// CNAME was not defined.
    #[error("Compound missing SourceDescription with CNAME")]
    MissingCname,
    /// Packet was defined before CNAME.
    #[error("Feedback packet seen before CNAME")]
    PacketBeforeCname,
    /// Too many reports.
    #[error("Too many reports")]
    TooManyReports,
    /// Too many chunks.
    #[error("Too many chunks")]
    TooManyChunks,
    /// Too many sources.
    #[error("too many sources")]
    TooManySources,
    /// Packet received is too short.
    #[error("Packet too short to be read")]
    PacketTooShort,
    /// Buffer is too short.
    #[error("Buffer too short to be written")]
    BufferTooShort,
    /// Wrong packet type.
    #[error("Wrong packet type")]
    WrongType,
    /// SDES received is too long.
    #[error("SDES must be < 255 octets long")]
    SdesTextTooLong,
    /// SDES type is missing.
    #[error("SDES item missing type")]
    SdesMissingType,
    /// Reason is too long.
    #[error("Reason must be < 255 octets long")]
    ReasonTooLong,
    /// Invalid packet version.
    #[error("Invalid packet version")]
    BadVersion,
    /// Length field disagrees with the packet body, or the packet is too
    /// large for the 16-bit length field.
    #[error("Invalid packet length")]
    BadLength,
    /// Invalid padding value.
    #[error("Invalid padding value")]
    WrongPadding,
    /// Media ssrc was defined as zero.
    #[error("Media SSRC must be 0")]
    SsrcMustBeZero,
    /// Missing REMB identifier.
    #[error("Missing REMB identifier")]
    MissingRembIdentifier,
    /// Invalid size or start index.
    #[error("Invalid size or startIndex")]
    InvalidSizeOrStartIndex,
    /// Delta exceeds limit.
    #[error("Delta exceed limit")]
    DeltaExceedLimit,
    /// Packet status chunk is not 2 bytes.
    #[error("Packet status chunk must be 2 bytes")]
    PacketStatusChunkLength,
    #[error("Invalid bitrate")]
    InvalidBitrate,
    /// Status symbol cannot be carried by the chunk's symbol size.
    #[error("Packet status symbol does not fit the symbol size")]
    SymbolSizeMismatch,
    /// RFC 8888 metric block is not 2 bytes.
    #[error("Metric block must be 2 bytes")]
    MetricBlockLength,
    /// RFC 8888 report block is shorter than its fixed part.
    #[error("Report block must be at least 8 bytes")]
    ReportBlockLength,
    /// RFC 8888 num_reports exceeds the metric blocks present.
    #[error("Incorrect number of reports in report block")]
    IncorrectNumReports,
    #[error("Application defined packet length is invalid")]
    AppDefinedInvalidLength,
    #[error("Application defined name must be 4 ASCII characters")]
    AppDefinedInvalidName,
    #[error("Application defined data is too large")]
    AppDefinedDataTooLarge,

    #[error("{0}")]
    Io(#[source] IoError),

    #[error("{0}")]
    Util(#[source] util::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Reports whether the error is a compound ordering violation rather than
    /// a framing or field error. A compound packet that fails only with one of
    /// these was still fully parsed.
    pub fn is_compound_violation(&self) -> bool {
        matches!(
            self,
            Error::EmptyCompound
                | Error::BadFirstPacket
                | Error::MissingCname
                | Error::PacketBeforeCname
        )
    }
}

#[derive(Debug, Error)]
#[error("io error: {0}")]
pub struct IoError(#[from] pub io::Error);

// Workaround for wanting PartialEq for io::Error.
impl PartialEq for IoError {
    fn eq(&self, other: &Self) -> bool {
        self.0.kind() == other.0.kind()
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(IoError(e))
    }
}

impl From<Error> for util::Error {
    fn from(e: Error) -> Self {
        util::Error::from_std(e)
    }
}

// Errors raised by this crate travel through the marshal traits boxed inside
// util::Error; unbox them so callers match on the original variant.
impl From<util::Error> for Error {
    fn from(e: util::Error) -> Self {
        match e {
            util::Error::Std(std_err) => match std_err.0.downcast::<Error>() {
                Ok(e) => *e,
                Err(other) => Error::Other(other.to_string()),
            },
            e => Error::Util(e),
        }
    }
}

impl PartialEq<util::Error> for Error {
    fn eq(&self, other: &util::Error) -> bool {
        if let Some(down) = other.downcast_ref::<Error>() {
            return self == down;
        }
        false
    }
}

impl PartialEq<Error> for util::Error {
    fn eq(&self, other: &Error) -> bool {
        other == self
    }
}
