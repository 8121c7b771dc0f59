//! Vertex attributes for classification trees.
//!
//! Provides the [Attributes] struct, an insertion-ordered map from attribute
//! name to value, as read from a markup element.

/// Name of the attribute holding a vertex identifier.
pub const ID_ATTRIBUTE: &str = "Id";

/// Name of the attribute holding the secondary (haplogroup) label.
pub const SECONDARY_LABEL_ATTRIBUTE: &str = "HG";

// =#========================================================================#=
// ATTRIBUTES
// =#========================================================================#=
/// Ordered set of `name = value` attributes of a single vertex.
///
/// Attribute sets are small (a handful of entries), so a vector with linear
/// lookup keeps document order at no real cost.
///
/// # Example
/// ```
/// use hgtree::model::Attributes;
///
/// let attributes: Attributes = [("Id", "H2a2a1"), ("HG", "H2a2a1")].into_iter().collect();
/// assert_eq!(attributes.id(), Some("H2a2a1"));
/// assert_eq!(attributes.get("HG"), Some("H2a2a1"));
/// assert_eq!(attributes.get("Motif"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Creates a new empty [Attributes].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of attribute `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns whether attribute `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sets attribute `name` to `value`.
    ///
    /// An existing attribute keeps its position and gets its value replaced.
    ///
    /// # Returns
    /// The previous value, if the attribute was already present.
    pub fn insert(&mut self, name: String, value: String) -> Option<String> {
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Returns the identifier, or `None` if it is absent or empty.
    ///
    /// A `None` identifier never matches any lookup table.
    pub fn id(&self) -> Option<&str> {
        self.get(ID_ATTRIBUTE).filter(|id| !id.is_empty())
    }

    /// Returns the secondary label, or the empty string if absent.
    pub fn secondary_label(&self) -> &str {
        self.get(SECONDARY_LABEL_ATTRIBUTE).unwrap_or("")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in iter {
            attributes.insert(key.into(), value.into());
        }
        attributes
    }
}
