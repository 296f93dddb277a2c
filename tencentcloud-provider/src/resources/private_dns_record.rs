//! `tencentcloud_private_dns_record`
//!
//! Id: `zoneId#recordId`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tencentcloud_sdk::services::privatedns::{PrivateZoneRecord, RecordSpec};

use crate::context::ProviderContext;
use crate::error::{ProviderError, ProviderResult};
use crate::id;
use crate::logging::ElapsedGuard;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema};
use crate::services::PrivateDnsService;
use crate::traits::Resource;

pub const TYPE_NAME: &str = "tencentcloud_private_dns_record";

const RECORD_TYPES: [&str; 6] = ["A", "AAAA", "CNAME", "MX", "TXT", "PTR"];
const UPDATABLE: [&str; 6] = ["record_type", "sub_domain", "record_value", "weight", "mx", "ttl"];

#[derive(Debug, Deserialize)]
struct RecordConfig {
    zone_id: String,
    record_type: String,
    sub_domain: String,
    record_value: String,
    weight: Option<i64>,
    mx: Option<i64>,
    ttl: Option<i64>,
}

impl RecordConfig {
    fn to_spec(&self) -> ProviderResult<RecordSpec> {
        if !RECORD_TYPES.contains(&self.record_type.as_str()) {
            return Err(ProviderError::InvalidConfig(format!(
                "record_type must be one of {RECORD_TYPES:?}, got '{}'",
                self.record_type
            )));
        }
        if self.record_type == "MX" && self.mx.is_none() {
            return Err(ProviderError::InvalidConfig(
                "mx is required for MX records".to_string(),
            ));
        }
        Ok(RecordSpec {
            record_type: self.record_type.clone(),
            sub_domain: self.sub_domain.clone(),
            record_value: self.record_value.clone(),
            weight: self.weight,
            mx: self.mx,
            ttl: self.ttl,
        })
    }
}

#[derive(Debug, Serialize)]
struct RecordState {
    zone_id: String,
    record_type: Option<String>,
    sub_domain: Option<String>,
    record_value: Option<String>,
    weight: Option<i64>,
    mx: Option<i64>,
    ttl: Option<i64>,
    status: Option<String>,
}

impl RecordState {
    fn new(zone_id: String, r: PrivateZoneRecord) -> Self {
        Self {
            zone_id,
            record_type: r.record_type,
            sub_domain: r.sub_domain,
            record_value: r.record_value,
            weight: r.weight,
            mx: r.mx.filter(|mx| *mx != 0),
            ttl: r.ttl,
            status: r.status,
        }
    }
}

pub struct PrivateDnsRecord;

#[async_trait]
impl Resource for PrivateDnsRecord {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("zone_id", Attribute::string().required().force_new())
            .attr("record_type", Attribute::string().required().description("A, AAAA, CNAME, MX, TXT or PTR."))
            .attr("sub_domain", Attribute::string().required().description("Host record, e.g. `www`."))
            .attr("record_value", Attribute::string().required())
            .attr("weight", Attribute::int().optional().description("Weight 1-100."))
            .attr("mx", Attribute::int().optional().description("MX priority, required for MX records: 5-50 in steps of 5."))
            .attr("ttl", Attribute::int().optional().computed().description("Cache time in seconds."))
            .attr("status", Attribute::string().computed().description("enabled or disabled."))
    }

    async fn create(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "create");
        let config: RecordConfig = d.decode()?;
        let spec = config.to_spec()?;
        let record_id = PrivateDnsService::new(ctx)
            .create_record(&config.zone_id, &spec)
            .await?;
        d.set_id(id::join(&[&config.zone_id, &record_id]));
        self.read(ctx, d).await
    }

    async fn read(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "read");
        let [zone_id, record_id] = id::split::<2>(d.id(), &[])?;
        match PrivateDnsService::new(ctx).describe_record(&zone_id, &record_id).await? {
            Some(record) => d.set_state(&RecordState::new(zone_id, record)),
            None => {
                log::warn!("[{TYPE_NAME}] Record {record_id} not found, removing from state");
                d.clear_id();
                Ok(())
            }
        }
    }

    async fn update(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "update");
        if UPDATABLE.iter().any(|k| d.has_change(k)) {
            let [zone_id, record_id] = id::split::<2>(d.id(), &[])?;
            let config: RecordConfig = d.decode()?;
            PrivateDnsService::new(ctx)
                .modify_record(&zone_id, &record_id, &config.to_spec()?)
                .await?;
        }
        self.read(ctx, d).await
    }

    async fn delete(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "delete");
        let [zone_id, record_id] = id::split::<2>(d.id(), &[])?;
        PrivateDnsService::new(ctx).delete_record(&zone_id, &record_id).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn config(value: serde_json::Value) -> RecordConfig {
        ResourceData::planned(TYPE_NAME, PrivateDnsRecord.schema(), value)
            .unwrap()
            .decode()
            .unwrap()
    }

    #[test]
    fn mx_record_needs_priority() {
        let c = config(json!({
            "zone_id": "zone-1", "record_type": "MX", "sub_domain": "@", "record_value": "mail.example.com."
        }));
        assert!(c.to_spec().is_err());
        let c = config(json!({
            "zone_id": "zone-1", "record_type": "MX", "sub_domain": "@",
            "record_value": "mail.example.com.", "mx": 10
        }));
        assert_eq!(c.to_spec().unwrap().mx, Some(10));
    }

    #[test]
    fn zero_mx_is_not_stored() {
        let record = PrivateZoneRecord {
            record_type: Some("A".into()),
            mx: Some(0),
            ..Default::default()
        };
        let state = RecordState::new("zone-1".into(), record);
        assert_eq!(state.mx, None);
        assert_eq!(state.zone_id, "zone-1");
    }
}
