//! # Loader Tests
//!
//! Unit tests for image loading from disk and for the access-trace parser.

use std::io::Write;

use memsim_core::SimError;
use memsim_core::common::AccessKind;
use memsim_core::sim::loader::{self, TraceOp};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::NamedTempFile;

/// Helper function to create a temporary file with the given contents.
fn create_temp_file(data: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_binary_success() {
    let data = b"hello world\n\0".to_vec();
    let file = create_temp_file(&data);
    assert_eq!(loader::load_binary(file.path()).unwrap(), data);
}

#[test]
fn test_load_binary_empty_file() {
    let file = create_temp_file(&[]);
    assert!(loader::load_binary(file.path()).unwrap().is_empty());
}

#[test]
fn test_load_binary_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.bin");
    match loader::load_binary(&path) {
        Err(SimError::Io { path: reported, .. }) => assert!(reported.ends_with("missing.bin")),
        other => panic!("expected an i/o error, got {other:?}"),
    }
}

#[test]
fn test_parse_trace_forms() {
    let text = "\
# warm up
0xCAFE
R 0x0010
r 16
W 0x0010 0x41
w 0X20 255   # trailing comment

";
    let ops = loader::parse_trace(text).unwrap();
    assert_eq!(
        ops,
        vec![
            TraceOp::read(0xCAFE),
            TraceOp::read(0x0010),
            TraceOp::read(16),
            TraceOp::write(0x0010, 0x41),
            TraceOp::write(0x20, 0xFF),
        ]
    );
    assert_eq!(ops[3].kind, AccessKind::Write(b'A'));
    assert!(ops[3].kind.is_write());
}

#[test]
fn test_parse_trace_empty() {
    assert!(loader::parse_trace("").unwrap().is_empty());
    assert!(loader::parse_trace("# only comments\n\n   \n").unwrap().is_empty());
}

#[rstest]
#[case::address_too_wide("0x10000", 1)]
#[case::bad_number("R zz", 1)]
#[case::byte_too_wide("R 0\nW 0x10 256", 2)]
#[case::write_without_byte("\n\nW 0x10", 3)]
#[case::unknown_op("X 0x10", 1)]
#[case::read_with_extra("R 1 2", 1)]
fn test_parse_trace_errors_name_the_line(#[case] text: &str, #[case] line: usize) {
    match loader::parse_trace(text) {
        Err(SimError::Trace { line: reported, .. }) => assert_eq!(reported, line),
        other => panic!("expected a trace error, got {other:?}"),
    }
}

#[test]
fn test_write_without_byte_message() {
    let err = loader::parse_trace("W 0x10").unwrap_err();
    assert_eq!(
        err.to_string(),
        "trace line 1: write needs an address and a byte"
    );
}

#[test]
fn test_load_trace_from_file() {
    let file = create_temp_file(b"R 0x0000\nW 0x0001 7\n");
    let ops = loader::load_trace(file.path()).unwrap();
    assert_eq!(ops, vec![TraceOp::read(0), TraceOp::write(1, 7)]);
}

#[rstest]
#[case("0xCAFE", 0xCAFE)]
#[case("0X10", 0x10)]
#[case("42", 42)]
#[case("0xffff", 0xFFFF)]
fn test_parse_addr_accepts_hex_and_decimal(#[case] token: &str, #[case] expected: u16) {
    assert_eq!(loader::parse_addr(token), Ok(expected));
}

#[rstest]
#[case::too_wide("0x10000", "exceeds 16 bits")]
#[case::decimal_too_wide("65536", "exceeds 16 bits")]
#[case::not_a_number("zz", "bad number 'zz'")]
#[case::empty_hex("0x", "bad number '0x'")]
fn test_parse_addr_rejects(#[case] token: &str, #[case] needle: &str) {
    let err = loader::parse_addr(token).unwrap_err();
    assert!(err.contains(needle), "{err}");
}
