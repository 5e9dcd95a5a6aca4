use std::io::{self, Read};

use microdata::{MicrodataError, Parser};
use url::Url;

fn parser() -> Parser {
    Parser::new(Url::parse("http://example.com/").unwrap())
}

/// Reader that yields part of a document and then fails
struct FailingReader {
    sent: bool,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.sent {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"));
        }
        self.sent = true;
        let chunk = b"<div itemscope><span itemprop=\"name\">";
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        Ok(n)
    }
}

#[test]
fn test_read_failure_aborts_extraction() {
    let result = parser().parse_reader(FailingReader { sent: false });

    match result {
        Err(MicrodataError::Read(e)) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
        other => panic!("Expected Read error, got {other:?}"),
    }
}

#[test]
fn test_invalid_utf8_is_a_read_error() {
    let bytes: &[u8] = &[0x3c, 0x64, 0x69, 0x76, 0xff, 0xfe];
    let result = parser().parse_reader(bytes);

    assert!(matches!(result, Err(MicrodataError::Read(_))));
}

#[test]
fn test_reader_success() {
    let html = r#"<div itemscope><span itemprop="name">Elizabeth</span></div>"#;
    let data = parser().parse_reader(html.as_bytes()).unwrap();

    assert_eq!(data.items[0].first_string("name"), Some("Elizabeth"));
}

#[test]
fn test_malformed_html_is_recovered() {
    let data = parser().parse_str(
        r#"<div itemscope><p><span itemprop="name">Unclosed <b>bold</div></i><span itemprop="age">26"#,
    );

    assert_eq!(data.len(), 1);
    assert_eq!(data.items[0].first_string("name"), Some("Unclosed bold"));
}

#[test]
fn test_empty_document() {
    assert!(parser().parse_str("").is_empty());
}
