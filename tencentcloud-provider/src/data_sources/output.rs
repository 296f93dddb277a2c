//! Shared tail of every data source read: id, result attribute, output file

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::{ProviderError, ProviderResult};
use crate::resource_data::ResourceData;

pub(crate) const RESULT_OUTPUT_FILE: &str = "result_output_file";

/// Hex SHA-256 over the effective inputs of a data source.
///
/// Computed outputs and `result_output_file` are left out, so the same query
/// yields the same id wherever its results are saved.
pub(crate) fn input_hash(d: &ResourceData) -> String {
    let inputs: BTreeMap<&str, Option<&Value>> = d
        .schema()
        .iter()
        .filter(|(name, attr)| !attr.is_read_only() && *name != RESULT_OUTPUT_FILE)
        .map(|(name, _)| (name, d.get(name)))
        .collect();
    let canonical = serde_json::to_string(&inputs).unwrap_or_default();
    let digest = Sha256::digest(format!("{}|{canonical}", d.type_name()).as_bytes());
    hex::encode(digest)
}

/// Write `value` as pretty JSON to `path`.
pub(crate) fn write_result_file(path: &str, value: &Value) -> ProviderResult<()> {
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content).map_err(|e| ProviderError::Io {
        path: path.to_string(),
        detail: e.to_string(),
    })
}

/// Store `items` under `key`, assign the input hash as id, and honor
/// `result_output_file`.
pub(crate) fn publish<T: Serialize>(d: &mut ResourceData, key: &str, items: &[T]) -> ProviderResult<()> {
    let value = serde_json::to_value(items)?;
    let id = input_hash(d);
    if let Some(path) = d.get_str(RESULT_OUTPUT_FILE).map(str::to_string) {
        write_result_file(&path, &value)?;
        log::debug!("[{}] Wrote {} results to {path}", d.type_name(), items.len());
    }
    d.set(key, value);
    d.set_id(id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schema::{AttrType, Attribute, Schema};

    fn schema() -> Schema {
        Schema::new()
            .attr("dcg_id", Attribute::string().required())
            .attr("instance_list", Attribute::list(AttrType::String).computed())
            .with_result_output_file()
    }

    fn data(config: Value) -> ResourceData {
        ResourceData::planned("tencentcloud_test_items", schema(), config).unwrap()
    }

    #[test]
    fn hash_ignores_output_file() {
        let a = data(json!({"dcg_id": "dcg-1"}));
        let b = data(json!({"dcg_id": "dcg-1", "result_output_file": "/tmp/x.json"}));
        let c = data(json!({"dcg_id": "dcg-2"}));
        assert_eq!(input_hash(&a), input_hash(&b));
        assert_ne!(input_hash(&a), input_hash(&c));
        assert_eq!(input_hash(&a).len(), 64);
    }

    #[test]
    fn publish_writes_file_and_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.json");
        let mut d = data(json!({"dcg_id": "dcg-1", "result_output_file": path.to_str().unwrap()}));

        publish(&mut d, "instance_list", &["ccnr-1", "ccnr-2"]).unwrap();

        assert!(!d.is_gone());
        assert_eq!(d.state()["instance_list"], json!(["ccnr-1", "ccnr-2"]));
        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, json!(["ccnr-1", "ccnr-2"]));
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");
        let err = write_result_file(path.to_str().unwrap(), &json!([])).unwrap_err();
        assert!(matches!(err, ProviderError::Io { .. }));
    }
}
