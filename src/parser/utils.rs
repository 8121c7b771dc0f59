//! Utility functions for label escaping and entity decoding.
//!
//! Labels leave the crate through Newick strings, where some characters are
//! structural, and enter it through markup attributes, where some characters
//! are written as entity references.

/// Characters that cannot appear in an unquoted Newick label.
const NEWICK_SPECIAL_CHARS: &[char] = &[
    ',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\'',
];

/// Checks if a label can be written into a Newick string as is,
/// i.e. it contains neither spaces nor special characters.
///
/// # Examples
/// ```
/// # use hgtree::parser::utils::is_newick_safe;
/// assert!(is_newick_safe("H2a2a1"));
/// assert!(is_newick_safe("R0+16189"));
/// assert!(!is_newick_safe("L1'2'3'4'5'6"));
/// assert!(!is_newick_safe("mt MRCA"));
/// ```
pub fn is_newick_safe(label: &str) -> bool {
    !label.contains(' ') && !label.contains(NEWICK_SPECIAL_CHARS)
}

/// Escapes a label for safe use in Newick strings.
///
/// Labels containing special characters are wrapped in single quotes,
/// with internal single quotes doubled. Otherwise spaces are replaced
/// with underscores.
///
/// # Examples
/// ```
/// # use hgtree::parser::utils::escape_label;
/// assert_eq!(escape_label("H2a2a1"), "H2a2a1");
/// assert_eq!(escape_label("mt MRCA"), "mt_MRCA");
/// assert_eq!(escape_label("L1'2'3'4'5'6"), "'L1''2''3''4''5''6'");
/// assert_eq!(escape_label("H (tentative)"), "'H (tentative)'");
/// ```
pub fn escape_label(label: &str) -> String {
    if is_newick_safe(label) {
        label.to_string()
    } else if label.contains(NEWICK_SPECIAL_CHARS) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.replace(' ', "_")
    }
}

/// Decodes the predefined XML entities and numeric character references in `raw`.
///
/// # Returns
/// * `Ok(String)` - The decoded text
/// * `Err(String)` - The name of the first entity that could not be decoded
///   (unknown, unterminated, or an invalid code point)
///
/// # Examples
/// ```
/// # use hgtree::parser::utils::decode_entities;
/// assert_eq!(decode_entities("T&amp;C").unwrap(), "T&C");
/// assert_eq!(decode_entities("&#72;&#x32;").unwrap(), "H2");
/// assert_eq!(decode_entities("&nbsp;").unwrap_err(), "nbsp");
/// ```
pub fn decode_entities(raw: &str) -> Result<String, String> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }

    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let Some(semicolon) = after.find(';') else {
            return Err(after.to_string());
        };
        let entity = &after[..semicolon];
        decoded.push(decode_entity(entity).ok_or_else(|| entity.to_string())?);
        rest = &after[semicolon + 1..];
    }
    decoded.push_str(rest);

    Ok(decoded)
}

/// Decodes a single entity name (without `&` and `;`).
fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            // Digits only, no sign
            let code = if let Some(hex) = entity.strip_prefix("#x") {
                if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return None;
                }
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = entity.strip_prefix('#') {
                if dec.is_empty() || !dec.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                dec.parse::<u32>().ok()?
            } else {
                return None;
            };
            char::from_u32(code)
        }
    }
}
