use hgtree::model::{ClassTreeBuilder, TreeBuilder};
use hgtree::parser::ByteParser;
use hgtree::parser::parsing_error::ParsingErrorType;
use hgtree::xml::{XmlParser, parse_file, parse_str};
use std::io::Write;

const SMALL_TREE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- mitochondrial tree excerpt -->
<Haplogroup Id="mt-MRCA" HG="mt-MRCA">
  <Haplogroup Id="L0" HG="L0">
    <Haplogroup Id="L0a" HG="L0a"/>
    <Haplogroup Id="L0b" HG="L0b"/>
  </Haplogroup>
  <Haplogroup Id="L1'2'3'4'5'6" HG="L1'2'3'4'5'6">
    <Haplogroup Id="L1" HG="L1"/>
  </Haplogroup>
</Haplogroup>
"#;

fn error_kind(xml: &str) -> ParsingErrorType {
    parse_str(xml).unwrap_err().kind().clone()
}

// --- TESTS STRUCTURE ---
#[test]
fn test_small_tree_structure() {
    let tree = parse_str(SMALL_TREE).unwrap();

    assert!(tree.is_valid());
    assert_eq!(tree.num_vertices(), 6);
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 3);
    assert_eq!(tree.depth(), 2);

    let root = tree.root();
    assert!(root.is_root());
    assert_eq!(root.id(), Some("mt-MRCA"));
    assert_eq!(root.tag(), "Haplogroup");
    assert_eq!(root.num_children(), 2);

    // Children in document order
    let l0 = &tree[root.children()[0]];
    let l1_6 = &tree[root.children()[1]];
    assert_eq!(l0.id(), Some("L0"));
    assert_eq!(l1_6.id(), Some("L1'2'3'4'5'6"));
    assert_eq!(l0.parent(), Some(root.index()));

    let l0_children: Vec<_> = l0.children().iter().map(|&c| tree[c].id()).collect();
    assert_eq!(l0_children, vec![Some("L0a"), Some("L0b")]);
}

#[test]
fn test_pre_order_is_document_order() {
    let tree = parse_str(SMALL_TREE).unwrap();
    let ids: Vec<_> = tree.pre_order_iter().filter_map(|v| v.id()).collect();
    assert_eq!(ids, vec!["mt-MRCA", "L0", "L0a", "L0b", "L1'2'3'4'5'6", "L1"]);
}

#[test]
fn test_every_element_is_a_vertex() {
    let tree = parse_str(r#"<Tree><Group Id="A"/><Note/><Group Id="B"></Group></Tree>"#).unwrap();

    assert_eq!(tree.num_vertices(), 4);
    assert_eq!(tree.root().id(), None);
    let tags: Vec<_> = tree.pre_order_iter().map(|v| v.tag()).collect();
    assert_eq!(tags, vec!["Tree", "Group", "Note", "Group"]);
}

#[test]
fn test_single_element_document() {
    let tree = parse_str(r#"<Haplogroup Id="H"/>"#).unwrap();
    assert_eq!(tree.num_vertices(), 1);
    assert!(tree.root().is_leaf());
}

// --- TESTS ATTRIBUTES ---
#[test]
fn test_attributes_kept_in_order() {
    let tree = parse_str(
        r#"<Haplogroup Id="H2a" HG="H2a" Motif="951A 4336C" Status='tentative'/>"#,
    )
    .unwrap();
    let root = tree.root();

    assert_eq!(root.id(), Some("H2a"));
    assert_eq!(root.secondary_label(), "H2a");
    let attributes: Vec<_> = root.attributes().iter().collect();
    assert_eq!(
        attributes,
        vec![
            ("Id", "H2a"),
            ("HG", "H2a"),
            ("Motif", "951A 4336C"),
            ("Status", "tentative"),
        ]
    );
}

#[test]
fn test_missing_and_empty_identifier() {
    let tree = parse_str(r#"<Root><Node HG="x"/><Node Id=""/></Root>"#).unwrap();
    let root = tree.root();

    assert_eq!(root.id(), None);
    assert_eq!(root.secondary_label(), "");
    assert_eq!(tree[root.children()[0]].id(), None);
    assert_eq!(tree[root.children()[0]].secondary_label(), "x");
    assert_eq!(tree[root.children()[1]].id(), None);
}

#[test]
fn test_attribute_entities_decoded() {
    let tree = parse_str(r#"<Node Id="A&amp;B" HG="&lt;&#72;&#x32;&gt;" Q="&quot;&apos;"/>"#)
        .unwrap();
    let root = tree.root();

    assert_eq!(root.id(), Some("A&B"));
    assert_eq!(root.secondary_label(), "<H2>");
    assert_eq!(root.attributes().get("Q"), Some("\"'"));
}

#[test]
fn test_attribute_whitespace_normalized() {
    let tree = parse_str("<Node Id=\"a\tb\nc\"/>").unwrap();
    assert_eq!(tree.root().id(), Some("a b c"));
}

#[test]
fn test_attribute_crlf_normalized_to_single_space() {
    let tree = parse_str("<Node Id=\"a\r\nb\" HG=\"c\rd\"/>").unwrap();
    assert_eq!(tree.root().id(), Some("a b"));
    assert_eq!(tree.root().secondary_label(), "c d");
}

#[test]
fn test_whitespace_around_equals_and_in_tags() {
    let tree = parse_str("<Node\n  Id = \"R0\"\n  HG='R0' >\n</Node >").unwrap();
    assert_eq!(tree.root().id(), Some("R0"));
    assert_eq!(tree.root().secondary_label(), "R0");
}

// --- TESTS SKIPPED CONTENT ---
#[test]
fn test_skips_text_comments_cdata_and_instructions() {
    let xml = r#"<?xml version="1.0"?>
<!DOCTYPE tree [ <!ELEMENT Node ANY> ]>
<Node Id="root">
  some text
  <!-- <Node Id="commented"/> -->
  <![CDATA[ <Node Id="cdata"/> ]]>
  <?render skip?>
  <Node Id="child"/>
</Node>
<!-- trailing comment -->
"#;
    let tree = parse_str(xml).unwrap();

    assert_eq!(tree.num_vertices(), 2);
    assert!(tree.find("commented").is_none());
    assert!(tree.find("cdata").is_none());
    assert!(tree.find("child").is_some());
}

#[test]
fn test_byte_order_mark_skipped() {
    let tree = parse_str("\u{feff}<Node Id=\"H\"/>").unwrap();
    assert_eq!(tree.root().id(), Some("H"));
}

// --- TESTS ERRORS ---
#[test]
fn test_error_missing_root() {
    assert_eq!(error_kind(""), ParsingErrorType::MissingRootElement);
    assert_eq!(
        error_kind("<?xml version=\"1.0\"?>\n<!-- only a comment -->"),
        ParsingErrorType::MissingRootElement
    );
}

#[test]
fn test_error_text_before_root() {
    assert!(matches!(
        error_kind("text <Node/>"),
        ParsingErrorType::InvalidMarkup(_)
    ));
}

#[test]
fn test_error_trailing_content() {
    assert_eq!(error_kind("<A/><B/>"), ParsingErrorType::TrailingContent);
    assert_eq!(error_kind("<A></A>text"), ParsingErrorType::TrailingContent);
}

#[test]
fn test_error_mismatched_closing_tag() {
    assert_eq!(
        error_kind("<A><B></A></B>"),
        ParsingErrorType::MismatchedClosingTag {
            expected: "B".to_string(),
            found: "A".to_string(),
        }
    );
}

#[test]
fn test_error_unexpected_eof() {
    assert_eq!(error_kind("<A><B/>"), ParsingErrorType::UnexpectedEOF);
    assert_eq!(error_kind("<A Id=\"x"), ParsingErrorType::UnexpectedEOF);
    assert_eq!(error_kind("<A Id=\"x\""), ParsingErrorType::UnexpectedEOF);
}

#[test]
fn test_error_duplicate_attribute() {
    assert_eq!(
        error_kind(r#"<A Id="x" Id="y"/>"#),
        ParsingErrorType::DuplicateAttribute("Id".to_string())
    );
}

#[test]
fn test_error_unknown_entity() {
    assert_eq!(
        error_kind(r#"<A Id="&nbsp;"/>"#),
        ParsingErrorType::UnknownEntity("nbsp".to_string())
    );
}

#[test]
fn test_error_signed_character_reference() {
    assert_eq!(
        error_kind(r#"<A Id="&#+72;"/>"#),
        ParsingErrorType::UnknownEntity("#+72".to_string())
    );
    assert_eq!(
        error_kind(r#"<A Id="&#x+48;"/>"#),
        ParsingErrorType::UnknownEntity("#x+48".to_string())
    );
}

#[test]
fn test_error_unclosed_comment() {
    assert_eq!(error_kind("<!-- never closed <A/>"), ParsingErrorType::UnclosedComment);
    assert_eq!(error_kind("<A><!-- never closed </A>"), ParsingErrorType::UnclosedComment);
}

#[test]
fn test_error_malformed_attributes() {
    for xml in [
        r#"<A Id=x/>"#,
        r#"<A Id"x"/>"#,
        r#"<A Id="x"HG="y"/>"#,
        r#"<A Id="a<b"/>"#,
        r#"<A ="x"/>"#,
        r#"< A/>"#,
    ] {
        assert!(
            matches!(error_kind(xml), ParsingErrorType::InvalidMarkup(_)),
            "expected malformed markup for {xml}"
        );
    }
}

#[test]
fn test_error_invalid_encoding() {
    let mut parser = ByteParser::for_bytes(b"<A Id=\"\xff\xfe\"/>");
    let err = XmlParser::new(ClassTreeBuilder::new())
        .parse(&mut parser)
        .unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::InvalidEncoding);
}

#[test]
fn test_error_reports_position() {
    let err = parse_str("<A><B></C></A>").unwrap_err();
    assert!(err.position() > 0);
    assert!(err.to_string().contains("C"));
}

// --- TESTS FILES ---
#[test]
fn test_parse_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SMALL_TREE.as_bytes()).unwrap();

    let tree = parse_file(file.path()).unwrap();
    assert_eq!(tree.num_vertices(), 6);
    assert_eq!(tree, parse_str(SMALL_TREE).unwrap());
}

#[test]
fn test_parse_missing_file() {
    let err = parse_file("does/not/exist.xml").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::IoError(_)));
}

#[test]
fn test_parser_reusable() {
    let mut xml_parser = XmlParser::new_class_tree_defaults();
    let first = xml_parser
        .parse(&mut ByteParser::for_str(r#"<A Id="1"/>"#))
        .unwrap();
    let second = xml_parser
        .parse(&mut ByteParser::for_str(r#"<A Id="2"><A Id="3"/></A>"#))
        .unwrap();

    assert_eq!(first.num_vertices(), 1);
    assert_eq!(second.num_vertices(), 2);
}

#[test]
fn test_parser_with_num_vertices_and_builder_handback() {
    // Hint smaller than the documents; the arena grows as needed
    let mut xml_parser = XmlParser::new(ClassTreeBuilder::new()).with_num_vertices(1);
    let first = xml_parser
        .parse(&mut ByteParser::for_str(r#"<A Id="1"><A Id="2"/><A Id="3"/></A>"#))
        .unwrap();
    let second = xml_parser
        .parse(&mut ByteParser::for_str(r#"<A Id="4"><A Id="5"><A Id="6"/></A></A>"#))
        .unwrap();

    assert!(first.is_valid());
    assert_eq!(first.num_vertices(), 3);
    assert!(second.is_valid());
    assert_eq!(second.num_vertices(), 3);
    assert_eq!(second.depth(), 2);

    // Finished trees were handed out, so the returned builder holds none
    let mut builder = xml_parser.into_tree_builder();
    assert!(builder.finish_tree().is_none());
}
