//! Stream Tests
//!
//! File-backed tests for the reader/writer helpers.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};

use bytes::Bytes;
use respwire::stream::{read_values, write_request, write_value, ValueReader};
use respwire::{Arg, BulkMode, Decoder, ErrorReply, RespError, SyntaxError, Value};
use tempfile::tempdir;

fn sample_values() -> Vec<Value> {
    vec![
        Value::simple("OK"),
        Value::Integer(42),
        Value::Error(ErrorReply::new("WRONGTYPE", "Operation against a key")),
        Value::Null,
        Value::Array(vec![Value::bulk("a"), Value::Array(vec![])]),
    ]
}

#[test]
fn test_write_then_read_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("values.resp");

    {
        let mut writer = BufWriter::new(File::create(&path).unwrap());
        for value in sample_values() {
            write_value(&mut writer, &value).unwrap();
        }
        write_request(&mut writer, &["get".into(), Arg::Raw(Bytes::from_static(b"\x00key"))])
            .unwrap();
    }

    let mut file = File::open(&path).unwrap();
    let mut decoder = Decoder::default();
    let values = read_values(&mut file, &mut decoder, 7).unwrap();

    let mut expected = sample_values();
    expected.push(Value::Array(vec![
        Value::bulk("get"),
        Value::raw(Bytes::from_static(b"\x00key")),
    ]));
    assert_eq!(values, expected);
}

#[test]
fn test_value_reader_over_file() {
    let mut file = tempfile::tempfile().unwrap();
    for value in sample_values() {
        write_value(&mut file, &value).unwrap();
    }
    file.seek(SeekFrom::Start(0)).unwrap();

    let reader = ValueReader::with_decoder(file, Decoder::with_mode(BulkMode::Raw), 1);
    let values: Vec<Value> = reader.collect::<respwire::Result<_>>().unwrap();
    assert_eq!(values, sample_values());
}

#[test]
fn test_truncated_file_reports_incomplete() {
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(b"+OK\r\n*2\r\n:1\r\n").unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let mut iter = ValueReader::new(file);
    assert_eq!(iter.next().unwrap().unwrap(), Value::simple("OK"));
    assert!(matches!(
        iter.next(),
        Some(Err(RespError::Syntax(SyntaxError::Incomplete)))
    ));
    assert!(iter.next().is_none());
}

#[test]
fn test_corrupt_file_reports_syntax_error() {
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(b":1\r\n$3\r\nabc!!").unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let err = read_values(&mut file, &mut Decoder::default(), 1024).unwrap_err();
    assert!(matches!(err, RespError::Syntax(SyntaxError::MissingCrlf)));
}
