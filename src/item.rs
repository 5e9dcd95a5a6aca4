//! Microdata data model
//!
//! A document yields a [`Microdata`] set of top-level [`Item`]s. Each item
//! carries its types, an optional global identifier and a map from property
//! names to ordered lists of [`PropertyValue`]s. Nested items are owned by
//! the property slot that holds them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Property values of an item, keyed by property name
///
/// Values for one name keep the order in which they were discovered. The
/// order of the names themselves follows first discovery as well, which keeps
/// the JSON output stable, but callers should not rely on it.
pub type PropertyMap = IndexMap<String, Vec<PropertyValue>>;

/// A single value of an item property
///
/// Serialized untagged: a string value encodes as a JSON string and a nested
/// item encodes as a JSON object of the same shape as a top-level item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// A scalar value taken from an attribute or the element text
    String(String),
    /// A nested item declared with `itemprop` and `itemscope`
    Item(Box<Item>),
}

impl PropertyValue {
    /// Get the string value, if this is a scalar
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(value) => Some(value),
            PropertyValue::Item(_) => None,
        }
    }

    /// Get the nested item, if this is one
    pub fn as_item(&self) -> Option<&Item> {
        match self {
            PropertyValue::String(_) => None,
            PropertyValue::Item(item) => Some(item),
        }
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<Item> for PropertyValue {
    fn from(item: Item) -> Self {
        PropertyValue::Item(Box::new(item))
    }
}

/// A microdata item
///
/// # Examples
///
/// ```
/// use microdata::Item;
///
/// let mut item = Item::new();
/// item.add_type("http://schema.org/Person");
/// item.add_string("name", "Elizabeth");
///
/// assert!(item.has_type("http://schema.org/Person"));
/// assert_eq!(item.first_string("name"), Some("Elizabeth"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub properties: PropertyMap,

    #[serde(rename = "type", default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Item {
    /// Create an empty item with no types, id or properties
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a type to the item
    pub fn add_type(&mut self, value: impl Into<String>) {
        self.types.push(value.into());
    }

    /// Append a string value to a property
    pub fn add_string(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.add_value(property, PropertyValue::String(value.into()));
    }

    /// Append a nested item to a property
    pub fn add_item(&mut self, property: impl Into<String>, value: Item) {
        self.add_value(property, PropertyValue::Item(Box::new(value)));
    }

    /// Append any value to a property
    pub fn add_value(&mut self, property: impl Into<String>, value: PropertyValue) {
        self.properties
            .entry(property.into())
            .or_default()
            .push(value);
    }

    /// Get all values of a property, in discovery order
    ///
    /// Returns an empty slice for properties the item does not have.
    pub fn get(&self, property: &str) -> &[PropertyValue] {
        self.properties
            .get(property)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Get the first string value of a property
    pub fn first_string(&self, property: &str) -> Option<&str> {
        self.get(property).iter().find_map(PropertyValue::as_str)
    }

    /// Get the first nested item value of a property
    pub fn first_item(&self, property: &str) -> Option<&Item> {
        self.get(property).iter().find_map(PropertyValue::as_item)
    }

    /// Check whether the item declares the given type
    pub fn has_type(&self, value: &str) -> bool {
        self.types.iter().any(|t| t == value)
    }
}

/// The set of top-level items found in a document, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Microdata {
    pub items: Vec<Item>,
}

impl Microdata {
    /// Create an empty microdata set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level item
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Number of top-level items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the document has no top-level items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the top-level items in document order
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Encode the set as a compact JSON document
    ///
    /// ```
    /// use microdata::{Item, Microdata};
    ///
    /// let mut item = Item::new();
    /// item.add_string("name", "Elizabeth");
    ///
    /// let mut data = Microdata::new();
    /// data.add_item(item);
    ///
    /// assert_eq!(
    ///     data.to_json().unwrap(),
    ///     r#"{"items":[{"properties":{"name":["Elizabeth"]}}]}"#
    /// );
    /// ```
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encode the set as an indented JSON document
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode a set previously encoded with [`Microdata::to_json`]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<'a> IntoIterator for &'a Microdata {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Microdata {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
