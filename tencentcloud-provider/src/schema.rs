//! Attribute schema of resources and data sources
//!
//! ```ignore
//! Schema::new()
//!     .attr("zone_id", Attribute::string().required().force_new().description("Private zone id."))
//!     .attr("ttl", Attribute::int().optional().default(600))
//! ```

use std::collections::BTreeMap;

use serde_json::Value;

/// Value type of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrType {
    String,
    Int,
    Bool,
    Float,
    /// Order-sensitive collection.
    List(Box<AttrType>),
    /// Order-insensitive collection; compared as a multiset.
    Set(Box<AttrType>),
    Map(Box<AttrType>),
    /// Nested block element.
    Object(Schema),
}

/// One attribute and its flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub ty: AttrType,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub force_new: bool,
    /// Value is masked in [`ResourceData::redacted_state`] and debug output.
    ///
    /// [`ResourceData::redacted_state`]: crate::resource_data::ResourceData::redacted_state
    pub sensitive: bool,
    pub default: Option<Value>,
    /// Upper bound on collection length, checked when configuration is attached.
    pub max_items: Option<usize>,
    pub description: &'static str,
}

impl Attribute {
    fn of(ty: AttrType) -> Self {
        Self {
            ty,
            required: false,
            optional: false,
            computed: false,
            force_new: false,
            sensitive: false,
            default: None,
            max_items: None,
            description: "",
        }
    }

    pub fn string() -> Self {
        Self::of(AttrType::String)
    }

    pub fn int() -> Self {
        Self::of(AttrType::Int)
    }

    pub fn bool() -> Self {
        Self::of(AttrType::Bool)
    }

    pub fn float() -> Self {
        Self::of(AttrType::Float)
    }

    pub fn list(elem: AttrType) -> Self {
        Self::of(AttrType::List(Box::new(elem)))
    }

    pub fn set(elem: AttrType) -> Self {
        Self::of(AttrType::Set(Box::new(elem)))
    }

    pub fn map(elem: AttrType) -> Self {
        Self::of(AttrType::Map(Box::new(elem)))
    }

    /// Single nested block (a list limited to one element).
    pub fn block(schema: Schema) -> Self {
        Self::list_of_blocks(schema).max_items(1)
    }

    pub fn list_of_blocks(schema: Schema) -> Self {
        Self::list(AttrType::Object(schema))
    }

    pub fn set_of_blocks(schema: Schema) -> Self {
        Self::set(AttrType::Object(schema))
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    #[must_use]
    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    #[must_use]
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Value used when the attribute is absent from configuration. Implies optional.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.optional = true;
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn max_items(mut self, n: usize) -> Self {
        self.max_items = Some(n);
        self
    }

    #[must_use]
    pub fn description(mut self, text: &'static str) -> Self {
        self.description = text;
        self
    }

    /// Set by the provider only, never by configuration.
    pub fn is_read_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }
}

/// Named attributes of one resource or data source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    attributes: BTreeMap<&'static str, Attribute>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn attr(mut self, name: &'static str, attribute: Attribute) -> Self {
        self.attributes.insert(name, attribute);
        self
    }

    /// Add the optional `result_output_file` attribute shared by data sources.
    #[must_use]
    pub fn with_result_output_file(self) -> Self {
        self.attr(
            "result_output_file",
            Attribute::string()
                .optional()
                .description("Used to save results."),
        )
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Attribute)> {
        self.attributes.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_implies_optional() {
        let attr = Attribute::string().default("GET");
        assert!(attr.optional);
        assert_eq!(attr.default, Some(Value::from("GET")));
    }

    #[test]
    fn block_is_single_element_list() {
        let attr = Attribute::block(Schema::new().attr("switch", Attribute::string().required()));
        assert_eq!(attr.max_items, Some(1));
        match attr.ty {
            AttrType::List(elem) => assert!(matches!(*elem, AttrType::Object(_))),
            other => panic!("unexpected type {other:?}"),
        }
    }

    #[test]
    fn read_only_detection() {
        assert!(Attribute::string().computed().is_read_only());
        assert!(!Attribute::string().optional().computed().is_read_only());
    }
}
