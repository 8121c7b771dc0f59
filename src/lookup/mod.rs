//! Lookup tables keyed by vertex identifier.
//!
//! The tree operations treat these as opaque, read-only tables:
//! * [ColorTable] (a [KeyValueTable]) - identifier to color code
//! * [AnchorSet] - designated identifiers (superhaplogroups)
//! * [ProfileTable] - identifier to a list of profile accession numbers
//!
//! Every lookup is get-or-default. Looking up an identifier that is absent,
//! or a missing (`None`) identifier, yields "no value" and never fails.
//!
//! The [reader] and [accessions] submodules read these tables (and the
//! accession metadata tables) from delimited text files.

pub mod accessions;
pub mod reader;

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

// =#========================================================================#=
// LOOKUP ERROR
// =#========================================================================#=
/// Errors when reading lookup tables from files.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not process delimited file {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}, line {line}: expected {expected} fields, found {found}", .path.display())]
    MalformedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },
}

// =#========================================================================#=
// KEY VALUE TABLE
// =#========================================================================#=
/// Table mapping an identifier to a single string value.
///
/// Keeps keys in first-insertion order; inserting an existing key replaces
/// its value in place. Serializes as a JSON object in that order.
///
/// # Example
/// ```
/// use hgtree::lookup::ColorTable;
///
/// let colors: ColorTable = [("L0", "#9e0142"), ("H", "#5e4fa2")].into_iter().collect();
/// assert_eq!(colors.lookup(Some("H")), Some("#5e4fa2"));
/// assert_eq!(colors.lookup(Some("H2a")), None);
/// assert_eq!(colors.lookup(None), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyValueTable {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

/// Table mapping an identifier to a color code.
pub type ColorTable = KeyValueTable;

impl KeyValueTable {
    /// Creates a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, returning the previous value if any.
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        match self.positions.get(&key) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, value)),
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.positions
            .get(key)
            .map(|&position| self.entries[position].1.as_str())
    }

    /// Returns the value for an optional identifier; `None` never matches.
    pub fn lookup(&self, id: Option<&str>) -> Option<&str> {
        id.and_then(|id| self.get(id))
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeyValueTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = KeyValueTable::new();
        for (key, value) in iter {
            table.insert(key.into(), value.into());
        }
        table
    }
}

impl Serialize for KeyValueTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// =#========================================================================#=
// ANCHOR SET
// =#========================================================================#=
/// Set of designated identifiers.
///
/// # Example
/// ```
/// use hgtree::lookup::AnchorSet;
///
/// let anchors: AnchorSet = ["L0", "M", "N"].into_iter().collect();
/// assert!(anchors.contains(Some("M")));
/// assert!(!anchors.contains(Some("M7")));
/// assert!(!anchors.contains(None));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorSet {
    ids: HashSet<String>,
}

impl AnchorSet {
    /// Creates a new empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id`, returning whether it was newly inserted.
    pub fn insert(&mut self, id: String) -> bool {
        self.ids.insert(id)
    }

    /// Returns whether the optional identifier is in the set; `None` never is.
    pub fn contains(&self, id: Option<&str>) -> bool {
        id.is_some_and(|id| self.ids.contains(id))
    }

    /// Returns the number of identifiers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<T: Into<String>> FromIterator<T> for AnchorSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        AnchorSet {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// =#========================================================================#=
// PROFILE TABLE
// =#========================================================================#=
/// Table mapping an identifier to its ordered list of profile accession numbers.
///
/// # Example
/// ```
/// use hgtree::lookup::ProfileTable;
///
/// let mut profiles = ProfileTable::new();
/// profiles.insert("H2a2a1".to_string(), vec!["MW123456".to_string()]);
/// assert_eq!(profiles.lookup(Some("H2a2a1")), ["MW123456"]);
/// assert!(profiles.lookup(Some("X")).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileTable {
    profiles: HashMap<String, Vec<String>>,
}

impl ProfileTable {
    /// Creates a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the accession list of `id`, replacing any previous list.
    pub fn insert(&mut self, id: String, accessions: Vec<String>) {
        self.profiles.insert(id, accessions);
    }

    /// Returns the accession list of an optional identifier,
    /// empty if the identifier is `None` or absent.
    pub fn lookup(&self, id: Option<&str>) -> &[String] {
        id.and_then(|id| self.profiles.get(id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the number of identifiers with an entry.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
