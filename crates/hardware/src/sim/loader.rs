//! Image and Trace Loading.
//!
//! This module provides utilities for feeding the simulator from files. It performs:
//! 1. **Image loading:** Reads a raw binary image for [`System::load_bytes`](crate::soc::System::load_bytes).
//! 2. **Trace parsing:** Turns a textual access trace into [`TraceOp`]s for replay.
//!
//! Trace format, one access per line:
//!
//! ```text
//! # comment
//! 0xCAFE          read (bare address)
//! R 0xCAFE        read
//! W 0x0010 0x41   write one byte
//! ```
//!
//! Numbers are hexadecimal with a `0x` prefix or decimal.

use std::fs;
use std::path::Path;

use crate::common::{AccessKind, SimError};

/// One access of a replayable trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceOp {
    /// Target address.
    pub addr: u16,
    /// Read, or write with its byte.
    pub kind: AccessKind,
}

impl TraceOp {
    /// A read of `addr`.
    pub const fn read(addr: u16) -> Self {
        Self {
            addr,
            kind: AccessKind::Read,
        }
    }

    /// A write of `value` to `addr`.
    pub const fn write(addr: u16, value: u8) -> Self {
        Self {
            addr,
            kind: AccessKind::Write(value),
        }
    }
}

/// Loads a binary file from disk into a byte vector.
///
/// # Errors
///
/// [`SimError::Io`] if the file cannot be read.
pub fn load_binary(path: impl AsRef<Path>) -> Result<Vec<u8>, SimError> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| SimError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Reads and parses a trace file.
///
/// # Errors
///
/// [`SimError::Io`] if the file cannot be read, otherwise whatever
/// [`parse_trace`] reports.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<TraceOp>, SimError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_trace(&text)
}

/// Parses a textual access trace.
///
/// Blank lines and `#` comments are skipped.
///
/// # Errors
///
/// [`SimError::Trace`] naming the 1-based line of the first malformed entry.
pub fn parse_trace(text: &str) -> Result<Vec<TraceOp>, SimError> {
    let mut ops = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let op = parse_line(content).map_err(|reason| SimError::Trace {
            line: idx + 1,
            reason,
        })?;
        ops.push(op);
    }
    Ok(ops)
}

fn parse_line(content: &str) -> Result<TraceOp, String> {
    let tokens: Vec<&str> = content.split_whitespace().collect();
    match tokens.as_slice() {
        [addr] => Ok(TraceOp::read(parse_addr(addr)?)),
        [op, addr] if op.eq_ignore_ascii_case("r") => Ok(TraceOp::read(parse_addr(addr)?)),
        [op, addr, value] if op.eq_ignore_ascii_case("w") => {
            Ok(TraceOp::write(parse_addr(addr)?, parse_byte(value)?))
        }
        [op, ..] if op.eq_ignore_ascii_case("w") => {
            Err("write needs an address and a byte".to_string())
        }
        _ => Err(format!("unrecognized access '{content}'")),
    }
}

fn parse_number(token: &str) -> Result<u32, String> {
    token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .map_or_else(|| token.parse(), |hex| u32::from_str_radix(hex, 16))
        .map_err(|e| format!("bad number '{token}': {e}"))
}

/// Parses a 16-bit address written as `0x`-prefixed hexadecimal or decimal.
///
/// Shared by the trace parser and the command line.
///
/// # Errors
///
/// A message naming `token` if it is not a number or does not fit in 16 bits.
pub fn parse_addr(token: &str) -> Result<u16, String> {
    let value = parse_number(token)?;
    u16::try_from(value).map_err(|_| format!("address {token} exceeds 16 bits"))
}

fn parse_byte(token: &str) -> Result<u8, String> {
    let value = parse_number(token)?;
    u8::try_from(value).map_err(|_| format!("value {token} exceeds 8 bits"))
}
