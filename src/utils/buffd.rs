pub use {
    formatter::MsgFormatter,
    parser::{MsgParser, MsgParserError},
};

mod formatter;
mod parser;

/// Size of the wire message header: object id followed by size and opcode.
pub const HEADER_SIZE: usize = 8;

pub fn read_header(data: &[u8]) -> Option<(u32, usize, u32)> {
    let hdr = data.get(..HEADER_SIZE)?;
    let obj = u32::from_ne_bytes([hdr[0], hdr[1], hdr[2], hdr[3]]);
    let word = u32::from_ne_bytes([hdr[4], hdr[5], hdr[6], hdr[7]]);
    Some((obj, (word >> 16) as usize, word & 0xffff))
}
