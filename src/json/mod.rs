//! JSON projection of classification trees.
//!
//! [JsonProjection] renders a [`ClassTree`](crate::model::ClassTree) into a
//! nested [JsonVertex] structure, enriching each vertex with lookup table
//! data: resolved color, anchor flags, and profile accessions.
//!
//! # Output
//! ```text
//! {
//!     "name": "H2a2a1",
//!     "HG": "H2a2a1",
//!     "colorcode": "#5e4fa2",
//!     "is_superhaplo": true,
//!     "profiles": ["MW123456"],
//!     "children": []
//! }
//! ```
//! Optional fields are left out rather than written as `false` or empty,
//! see [JsonVertex] for the exact rules.
//!
//! # Writing
//! * [`write_json_file`] / [`write_json`] / [`to_json_string`] write any
//!   serializable value pretty-printed with four-space indentation.

mod projection;

pub use self::projection::{JsonProjection, JsonVertex};

use log::info;
use serde::Serialize;
use serde::ser::Error as _;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Indentation of pretty-printed JSON output
const JSON_INDENT: &[u8] = b"    ";

/// Writes `value` as pretty-printed JSON to `writer`.
///
/// # Errors
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: W, value: &T) -> serde_json::Result<()> {
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)
}

/// Returns `value` as pretty-printed JSON string.
///
/// # Example
/// ```
/// use hgtree::json::{JsonProjection, to_json_string};
///
/// let tree = hgtree::xml::parse_str(r#"<Haplogroup Id="H" HG="H"/>"#).unwrap();
/// let json = to_json_string(&JsonProjection::new().project(&tree)).unwrap();
/// assert_eq!(
///     json,
///     "{\n    \"name\": \"H\",\n    \"HG\": \"H\",\n    \"is_superhaplo\": true,\n    \"children\": []\n}"
/// );
/// ```
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    write_json(&mut buffer, value)?;
    String::from_utf8(buffer).map_err(serde_json::Error::custom)
}

/// Writes `value` as pretty-printed JSON into the file at `path`.
///
/// # Errors
/// Returns an I/O error if creating or writing the file, or serialization, fails.
pub fn write_json_file<P: AsRef<Path>, T: Serialize + ?Sized>(path: P, value: &T) -> io::Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(&mut writer, value)?;
    writer.flush()?;

    info!("Wrote JSON to {}", path.display());
    Ok(())
}
