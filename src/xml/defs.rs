//! Constants for the markup parser.

/// UTF-8 byte order mark, skipped at the start of a document.
pub(crate) const BYTE_ORDER_MARK: &[u8] = b"\xEF\xBB\xBF";

pub(crate) const COMMENT_START: &[u8] = b"<!--";
pub(crate) const COMMENT_END: &[u8] = b"-->";
pub(crate) const CDATA_START: &[u8] = b"<![CDATA[";
pub(crate) const CDATA_END: &[u8] = b"]]>";
pub(crate) const PROCESSING_INSTRUCTION_START: &[u8] = b"<?";
pub(crate) const PROCESSING_INSTRUCTION_END: &[u8] = b"?>";
pub(crate) const DECLARATION_START: &[u8] = b"<!";
pub(crate) const CLOSING_TAG_START: &[u8] = b"</";
pub(crate) const EMPTY_ELEMENT_END: &[u8] = b"/>";

/// Delimiters ending an element name (besides whitespace)
pub(crate) const ELEMENT_NAME_DELIMITERS: &[u8] = b"/><";

/// Delimiters ending an attribute name (besides whitespace)
pub(crate) const ATTRIBUTE_NAME_DELIMITERS: &[u8] = b"=/><";

/// Default guess for number of vertices, when unknown
pub(crate) const DEFAULT_NUM_VERTICES_GUESS: usize = 64;
