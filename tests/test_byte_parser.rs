use hgtree::parser::ByteParser;
use hgtree::parser::byte_parser::ConsumeMode;
use hgtree::parser::parsing_error::ParsingErrorType;
use hgtree::parser::utils::{decode_entities, escape_label, is_newick_safe};

// --- TESTS BYTE PARSER ---
#[test]
fn test_peek_and_consume() {
    let mut parser = ByteParser::for_str("<N/>");
    assert_eq!(parser.peek(), Some(b'<'));
    assert!(parser.peek_is(b'<'));
    assert!(!parser.consume_if(b'>'));
    assert!(parser.consume_if(b'<'));
    assert_eq!(parser.position(), 1);
    assert_eq!(parser.next_byte(), Some(b'N'));
    assert!(parser.peek_is_sequence(b"/>"));
    assert!(parser.consume_if_sequence(b"/>"));
    assert!(parser.is_eof());
    assert_eq!(parser.peek(), None);
    assert_eq!(parser.next_byte(), None);
}

#[test]
fn test_skip_whitespace() {
    let mut parser = ByteParser::for_str(" \t\r\n x");
    assert!(parser.peek_is_whitespace());
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'x'));
    assert!(!parser.peek_is_whitespace());
}

#[test]
fn test_consume_until() {
    let mut parser = ByteParser::for_str("Id=\"L0\"");
    assert!(parser.consume_until(b'"', ConsumeMode::Inclusive));
    assert_eq!(parser.peek(), Some(b'L'));
    assert!(parser.consume_until(b'"', ConsumeMode::Exclusive));
    assert_eq!(parser.peek(), Some(b'"'));
    parser.next_byte();
    assert!(!parser.consume_until(b'"', ConsumeMode::Inclusive));
    assert!(parser.is_eof());
}

#[test]
fn test_consume_until_sequence() {
    let mut parser = ByteParser::for_str("a comment --><N/>");
    assert!(parser.consume_until_sequence(b"-->", ConsumeMode::Exclusive));
    assert!(parser.peek_is_sequence(b"-->"));
    assert!(parser.consume_until_sequence(b"-->", ConsumeMode::Inclusive));
    assert_eq!(parser.peek(), Some(b'<'));
    assert!(!parser.consume_until_sequence(b"-->", ConsumeMode::Inclusive));
}

#[test]
fn test_parse_name() {
    let mut parser = ByteParser::for_str("Haplogroup Id=\"H\"/>");
    assert_eq!(parser.parse_name(b"/><").unwrap(), "Haplogroup");
    parser.skip_whitespace();
    assert_eq!(parser.parse_name(b"=/><").unwrap(), "Id");
    assert_eq!(parser.peek(), Some(b'='));

    let mut parser = ByteParser::for_str("/>");
    assert_eq!(parser.parse_name(b"/><").unwrap(), "");
}

#[test]
fn test_parse_until_any() {
    let mut parser = ByteParser::for_str("L1'2'3 \u{e9}<rest");
    assert_eq!(
        parser.parse_until_any(b"<").unwrap(),
        Some("L1'2'3 \u{e9}".to_string())
    );
    assert!(parser.peek_is(b'<'));

    let mut parser = ByteParser::for_str("no delimiter");
    assert_eq!(parser.parse_until_any(b"<").unwrap(), None);
}

#[test]
fn test_parse_invalid_utf8() {
    let mut parser = ByteParser::for_bytes(b"ab\xc3(<");
    let err = parser.parse_until_any(b"<").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::InvalidEncoding);
}

#[test]
fn test_position_and_context() {
    let mut parser = ByteParser::for_str("<Haplogroup/>");
    parser.set_position(1);
    assert_eq!(parser.get_context_as_string(4), "Hapl");
    parser.consume_until(b'/', ConsumeMode::Exclusive);
    assert_eq!(parser.slice_from(1), b"Haplogroup");
}

// --- TESTS UTILS ---
#[test]
fn test_newick_label_escaping() {
    assert!(is_newick_safe("H2a2a1"));
    assert!(!is_newick_safe("L1'2'3'4'5'6"));
    assert!(!is_newick_safe("a b"));

    assert_eq!(escape_label("H2a2a1"), "H2a2a1");
    assert_eq!(escape_label("a b"), "a_b");
    assert_eq!(escape_label("a,b"), "'a,b'");
    assert_eq!(escape_label("it's"), "'it''s'");
}

#[test]
fn test_decode_entities() {
    assert_eq!(decode_entities("plain").unwrap(), "plain");
    assert_eq!(decode_entities("&lt;&gt;&amp;&quot;&apos;").unwrap(), "<>&\"'");
    assert_eq!(decode_entities("&#76;&#x30;a").unwrap(), "L0a");
    assert_eq!(decode_entities("&unknown;").unwrap_err(), "unknown");
    assert_eq!(decode_entities("a &amp b").unwrap_err(), "amp b");
    assert_eq!(decode_entities("&#xD800;").unwrap_err(), "#xD800");
    assert_eq!(decode_entities("&#+72;").unwrap_err(), "#+72");
    assert_eq!(decode_entities("&#x+48;").unwrap_err(), "#x+48");
    assert_eq!(decode_entities("&#;").unwrap_err(), "#");
    assert_eq!(decode_entities("&#x;").unwrap_err(), "#x");
}
