//! Value markings printed on resistors: color bands and SMD codes.

pub mod color_code;
pub mod smd;

pub use color_code::{ColorCode, DecodedValue};
pub use smd::{decode_smd, SmdDecoded, SmdFormat};
