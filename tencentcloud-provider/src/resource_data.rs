//! Configuration and state of one resource instance
//!
//! [`ResourceData`] holds the prior state and, during create/update, the planned
//! configuration. Adapters decode it once into a typed config struct, push typed
//! state structs back, and ask which attributes changed.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tencentcloud_sdk::log_sanitizer::mask_secret;

use crate::error::{ProviderError, ProviderResult};
use crate::schema::{AttrType, Schema};

/// Attribute values of one resource instance.
#[derive(Clone)]
pub struct ResourceData {
    type_name: &'static str,
    schema: Schema,
    id: String,
    config: Option<Map<String, Value>>,
    state: Map<String, Value>,
}

fn as_object(type_name: &str, value: Value) -> ProviderResult<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(ProviderError::Decode {
            type_name: type_name.to_string(),
            detail: format!("expected an object, got {other}"),
        }),
    }
}

/// Reject collections holding more than their attribute's `max_items`, nested
/// blocks included.
fn check_max_items(type_name: &str, schema: &Schema, values: &Map<String, Value>) -> ProviderResult<()> {
    for (name, attr) in schema.iter() {
        let Some(Value::Array(items)) = values.get(name) else {
            continue;
        };
        if let Some(max) = attr.max_items {
            if items.len() > max {
                return Err(ProviderError::InvalidConfig(format!(
                    "{type_name}: '{name}' allows at most {max} item(s), got {}",
                    items.len()
                )));
            }
        }
        if let AttrType::List(elem) | AttrType::Set(elem) = &attr.ty {
            if let AttrType::Object(nested) = elem.as_ref() {
                for fields in items.iter().filter_map(Value::as_object) {
                    check_max_items(type_name, nested, fields)?;
                }
            }
        }
    }
    Ok(())
}

fn checked_config(type_name: &str, schema: &Schema, config: Value) -> ProviderResult<Map<String, Value>> {
    let config = as_object(type_name, config)?;
    check_max_items(type_name, schema, &config)?;
    Ok(config)
}

/// Copy of `values` with sensitive attributes masked.
fn redact(schema: &Schema, values: &Map<String, Value>) -> Map<String, Value> {
    values
        .iter()
        .map(|(key, value)| {
            let masked = match schema.get(key) {
                Some(attr) if attr.sensitive => match value {
                    Value::Null => Value::Null,
                    Value::String(s) => Value::String(mask_secret(s)),
                    other => Value::String(mask_secret(&other.to_string())),
                },
                Some(attr) => match (&attr.ty, value) {
                    (AttrType::List(elem) | AttrType::Set(elem), Value::Array(items)) => match elem.as_ref() {
                        AttrType::Object(nested) => Value::Array(
                            items
                                .iter()
                                .map(|item| match item {
                                    Value::Object(fields) => Value::Object(redact(nested, fields)),
                                    other => other.clone(),
                                })
                                .collect(),
                        ),
                        _ => value.clone(),
                    },
                    _ => value.clone(),
                },
                None => value.clone(),
            };
            (key.clone(), masked)
        })
        .collect()
}

impl ResourceData {
    /// A new instance about to be created from `config`.
    ///
    /// Fails with [`ProviderError::InvalidConfig`] when a collection exceeds its
    /// `max_items`.
    pub fn planned(type_name: &'static str, schema: Schema, config: Value) -> ProviderResult<Self> {
        let config = checked_config(type_name, &schema, config)?;
        Ok(Self {
            type_name,
            schema,
            id: String::new(),
            config: Some(config),
            state: Map::new(),
        })
    }

    /// An existing instance known only by its id and prior state (read, delete,
    /// import).
    pub fn from_state(
        type_name: &'static str,
        schema: Schema,
        id: impl Into<String>,
        state: Value,
    ) -> ProviderResult<Self> {
        Ok(Self {
            type_name,
            schema,
            id: id.into(),
            config: None,
            state: as_object(type_name, state)?,
        })
    }

    /// Attach the new configuration of an update.
    pub fn with_config(mut self, config: Value) -> ProviderResult<Self> {
        self.config = Some(checked_config(self.type_name, &self.schema, config)?);
        Ok(self)
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Forget the remote object: clears the id and all state.
    pub fn clear_id(&mut self) {
        self.id.clear();
        self.state.clear();
    }

    /// `true` once the id is cleared (or before create assigned one).
    pub fn is_gone(&self) -> bool {
        self.id.is_empty()
    }

    /// Effective value of `key`
    ///
    /// With configuration: the configured value, else the schema default, else the
    /// prior state for computed attributes. Without configuration: the prior state.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let Some(config) = &self.config else {
            return self.state.get(key).filter(|v| !v.is_null());
        };
        if let Some(v) = config.get(key).filter(|v| !v.is_null()) {
            return Some(v);
        }
        let attr = self.schema.get(key)?;
        if let Some(default) = &attr.default {
            return Some(default);
        }
        if attr.computed {
            return self.state.get(key).filter(|v| !v.is_null());
        }
        None
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Prior state value of `key`.
    pub fn old(&self, key: &str) -> Option<&Value> {
        self.state.get(key).filter(|v| !v.is_null())
    }

    /// Decode the effective values of every schema attribute into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> ProviderResult<T> {
        let values: Map<String, Value> = self
            .schema
            .iter()
            .filter_map(|(name, _)| self.get(name).map(|v| (name.to_string(), v.clone())))
            .collect();
        serde_json::from_value(Value::Object(values)).map_err(|e| ProviderError::Decode {
            type_name: self.type_name.to_string(),
            detail: e.to_string(),
        })
    }

    /// Copy every non-null field of `value` into state.
    ///
    /// Null fields leave the prior state untouched.
    pub fn set_state<T: Serialize>(&mut self, value: &T) -> ProviderResult<()> {
        let fields = as_object(self.type_name, serde_json::to_value(value)?)?;
        for (key, v) in fields {
            if !v.is_null() {
                self.state.insert(key, v);
            }
        }
        Ok(())
    }

    /// Set one state attribute.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.state.insert(key.to_string(), value.into());
    }

    pub fn state(&self) -> &Map<String, Value> {
        &self.state
    }

    /// State plus the `id` attribute, as reported back to the caller.
    pub fn to_state_value(&self) -> Value {
        let mut state = self.state.clone();
        if !self.id.is_empty() {
            state.insert("id".to_string(), Value::String(self.id.clone()));
        }
        Value::Object(state)
    }

    /// [`to_state_value`](Self::to_state_value) with sensitive attributes masked,
    /// for logs and plan output.
    pub fn redacted_state(&self) -> Value {
        let mut state = redact(&self.schema, &self.state);
        if !self.id.is_empty() {
            state.insert("id".to_string(), Value::String(self.id.clone()));
        }
        Value::Object(state)
    }

    /// Whether the effective value of `key` differs from prior state.
    ///
    /// Sets compare as multisets; null and empty collections are equal.
    pub fn has_change(&self, key: &str) -> bool {
        let ty = self.schema.get(key).map(|a| &a.ty);
        normalize(ty, self.old(key)) != normalize(ty, self.get(key))
    }

    /// `(old, new)` values of `key`.
    pub fn change(&self, key: &str) -> (Option<&Value>, Option<&Value>) {
        (self.old(key), self.get(key))
    }

    /// Changed attributes that are marked force-new.
    pub fn force_new_changes(&self) -> Vec<&'static str> {
        if self.id.is_empty() {
            return Vec::new();
        }
        self.schema
            .iter()
            .filter(|(name, attr)| attr.force_new && self.has_change(name))
            .map(|(name, _)| name)
            .collect()
    }
}

impl fmt::Debug for ResourceData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceData")
            .field("type_name", &self.type_name)
            .field("id", &self.id)
            .field("config", &self.config.as_ref().map(|c| redact(&self.schema, c)))
            .field("state", &redact(&self.schema, &self.state))
            .finish_non_exhaustive()
    }
}

/// Canonical form for comparison.
fn normalize(ty: Option<&AttrType>, value: Option<&Value>) -> Value {
    let Some(value) = value else {
        return Value::Null;
    };
    match (ty, value) {
        (_, Value::Array(items)) if items.is_empty() => Value::Null,
        (_, Value::Object(fields)) if fields.is_empty() => Value::Null,
        (Some(AttrType::Set(elem)), Value::Array(items)) => {
            let mut items: Vec<Value> = items
                .iter()
                .map(|v| normalize(Some(elem.as_ref()), Some(v)))
                .collect();
            items.sort_by_cached_key(Value::to_string);
            Value::Array(items)
        }
        (Some(AttrType::List(elem)), Value::Array(items)) => Value::Array(
            items
                .iter()
                .map(|v| normalize(Some(elem.as_ref()), Some(v)))
                .collect(),
        ),
        (Some(AttrType::Object(schema)), Value::Object(fields)) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), normalize(schema.get(k).map(|a| &a.ty), Some(v))))
                .filter(|(_, v)| !v.is_null())
                .collect(),
        ),
        (_, Value::Object(fields)) => Value::Object(
            fields
                .iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ),
        (_, other) => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::schema::Attribute;

    fn schema() -> Schema {
        Schema::new()
            .attr("name", Attribute::string().required())
            .attr("method", Attribute::string().default("GET"))
            .attr("desc", Attribute::string().optional())
            .attr("limit", Attribute::int().optional().computed())
            .attr("zone", Attribute::string().required().force_new())
            .attr(
                "targets",
                Attribute::set_of_blocks(
                    Schema::new()
                        .attr("instance_id", Attribute::string().required())
                        .attr("port", Attribute::int().required()),
                )
                .optional(),
            )
            .attr("create_time", Attribute::string().computed())
    }

    #[derive(Debug, Deserialize)]
    struct Config {
        name: String,
        method: String,
        desc: Option<String>,
        limit: Option<i64>,
    }

    #[test]
    fn decode_applies_defaults_and_keeps_absent_optional() {
        let d = ResourceData::planned("t", schema(), json!({"name": "hello", "zone": "z"})).unwrap();
        let cfg: Config = d.decode().unwrap();
        assert_eq!(cfg.name, "hello");
        assert_eq!(cfg.method, "GET");
        assert!(cfg.desc.is_none());
        assert!(cfg.limit.is_none());
    }

    #[test]
    fn decode_reports_missing_required() {
        let d = ResourceData::planned("t", schema(), json!({"zone": "z"})).unwrap();
        let err = d.decode::<Config>().unwrap_err();
        assert!(matches!(err, ProviderError::Decode { .. }));
    }

    #[test]
    fn computed_attribute_falls_back_to_state() {
        let d = ResourceData::from_state("t", schema(), "id-1", json!({"name": "a", "limit": 300}))
            .unwrap()
            .with_config(json!({"name": "a"}))
            .unwrap();
        assert_eq!(d.get("limit"), Some(&json!(300)));
        assert!(!d.has_change("limit"));
        // plain optional attributes do not fall back
        let d = d.with_config(json!({"name": "a"})).unwrap();
        assert!(d.get("desc").is_none());
    }

    #[test]
    fn set_state_skips_nulls() {
        let mut d = ResourceData::from_state("t", schema(), "id-1", json!({"desc": "old"})).unwrap();
        d.set_state(&json!({"desc": null, "create_time": "2024-01-15 08:00:00"}))
            .unwrap();
        assert_eq!(d.state()["desc"], "old");
        assert_eq!(d.state()["create_time"], "2024-01-15 08:00:00");
    }

    #[test]
    fn sets_compare_as_multisets() {
        let prior = json!({"targets": [
            {"instance_id": "ins-1", "port": 80},
            {"instance_id": "ins-2", "port": 80}
        ]});
        let d = ResourceData::from_state("t", schema(), "id-1", prior)
            .unwrap()
            .with_config(json!({"targets": [
                {"instance_id": "ins-2", "port": 80},
                {"instance_id": "ins-1", "port": 80}
            ]}))
            .unwrap();
        assert!(!d.has_change("targets"));

        let d = d
            .with_config(json!({"targets": [{"instance_id": "ins-1", "port": 80}]}))
            .unwrap();
        assert!(d.has_change("targets"));
    }

    #[test]
    fn empty_collection_equals_absent() {
        let d = ResourceData::from_state("t", schema(), "id-1", json!({}))
            .unwrap()
            .with_config(json!({"targets": []}))
            .unwrap();
        assert!(!d.has_change("targets"));
    }

    #[test]
    fn force_new_changes_listed() {
        let d = ResourceData::from_state("t", schema(), "id-1", json!({"name": "a", "zone": "z1"}))
            .unwrap()
            .with_config(json!({"name": "b", "zone": "z2"}))
            .unwrap();
        assert_eq!(d.force_new_changes(), vec!["zone"]);
    }

    fn review_schema() -> Schema {
        let info = Schema::new().attr("switch", Attribute::string().required());
        let configure = Schema::new()
            .attr("img_review_info", Attribute::block(info.clone()).optional())
            .attr("asr_review_info", Attribute::block(info).optional());
        Schema::new()
            .attr("name", Attribute::string().optional())
            .attr("porn_configure", Attribute::block(configure).optional())
            .attr("tags", Attribute::list(AttrType::String).optional().max_items(2))
    }

    #[test]
    fn planned_rejects_extra_blocks() {
        let config = json!({"porn_configure": [
            {"img_review_info": [{"switch": "ON"}]},
            {"asr_review_info": [{"switch": "ON"}]}
        ]});
        let err = ResourceData::planned("t", review_schema(), config).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidConfig(ref m) if m.contains("porn_configure")), "{err:?}");
    }

    #[test]
    fn nested_block_limit_is_enforced() {
        let config = json!({"porn_configure": [{"img_review_info": [{"switch": "ON"}, {"switch": "OFF"}]}]});
        let err = ResourceData::planned("t", review_schema(), config).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidConfig(ref m) if m.contains("img_review_info")), "{err:?}");
    }

    #[test]
    fn update_config_respects_max_items() {
        let d = ResourceData::from_state("t", review_schema(), "id-1", json!({"tags": ["a"]})).unwrap();
        assert!(d.clone().with_config(json!({"tags": ["a", "b"]})).is_ok());
        let err = d.with_config(json!({"tags": ["a", "b", "c"]})).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidConfig(_)));
    }

    #[test]
    fn sensitive_values_are_masked() {
        let schema = Schema::new()
            .attr("sign_name", Attribute::string().required())
            .attr("proof_image", Attribute::string().required().sensitive());
        let config = json!({"sign_name": "Acme", "proof_image": "aGVsbG8gd29ybGQ="});
        let mut d = ResourceData::planned("t", schema, config.clone()).unwrap();
        d.set_id("1234");
        d.set_state(&config).unwrap();

        let redacted = d.redacted_state();
        assert_eq!(redacted["sign_name"], "Acme");
        assert_eq!(redacted["proof_image"], "aGVs************");
        assert_eq!(redacted["id"], "1234");
        assert_eq!(d.state()["proof_image"], "aGVsbG8gd29ybGQ=");

        let debug = format!("{d:?}");
        assert!(!debug.contains("aGVsbG8gd29ybGQ="), "{debug}");
        assert!(debug.contains("Acme"));
    }

    #[test]
    fn clear_id_drops_state() {
        let mut d = ResourceData::from_state("t", schema(), "id-1", json!({"name": "a"})).unwrap();
        d.clear_id();
        assert!(d.is_gone());
        assert!(d.state().is_empty());
        assert_eq!(d.to_state_value(), json!({}));
    }
}
