#![warn(rust_2018_idioms)]
#![allow(dead_code)]

pub mod application_defined;
pub mod compound_packet;
pub mod error;
pub mod extended_report;
pub mod goodbye;
pub mod header;
pub mod packet;
pub mod payload_feedbacks;
pub mod pool;
pub mod raw_packet;
pub mod reader;
pub mod receiver_report;
pub mod reception_report;
pub mod sender_report;
pub mod source_description;
pub mod transport_feedbacks;
mod util;

pub use error::{Error, IoError, Result};
