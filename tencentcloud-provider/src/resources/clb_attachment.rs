//! `tencentcloud_clb_attachment`
//!
//! Id: `ruleId#listenerId#clbId`, where the rule id is empty for layer-4 listeners.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tencentcloud_sdk::services::clb::{Backend, Target};

use crate::context::ProviderContext;
use crate::error::{ProviderError, ProviderResult};
use crate::id;
use crate::logging::ElapsedGuard;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema};
use crate::services::ClbService;
use crate::traits::Resource;

pub const TYPE_NAME: &str = "tencentcloud_clb_attachment";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
struct TargetSpec {
    instance_id: String,
    port: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weight: Option<i64>,
}

impl From<&TargetSpec> for Target {
    fn from(t: &TargetSpec) -> Self {
        Self {
            instance_id: Some(t.instance_id.clone()),
            port: t.port,
            weight: t.weight,
        }
    }
}

impl TargetSpec {
    fn from_backend(b: Backend) -> Option<Self> {
        Some(Self {
            instance_id: b.instance_id?,
            port: b.port?,
            weight: b.weight,
        })
    }
}

#[derive(Debug, Deserialize)]
struct AttachmentConfig {
    clb_id: String,
    listener_id: String,
    rule_id: Option<String>,
    targets: Vec<TargetSpec>,
}

#[derive(Debug, Serialize)]
struct AttachmentState {
    clb_id: String,
    listener_id: String,
    rule_id: Option<String>,
    protocol_type: Option<String>,
    targets: Vec<TargetSpec>,
}

struct AttachmentId {
    rule_id: Option<String>,
    listener_id: String,
    clb_id: String,
}

impl AttachmentId {
    fn parse(raw: &str) -> ProviderResult<Self> {
        let [rule_id, listener_id, clb_id] = id::split::<3>(raw, &[0])?;
        Ok(Self {
            rule_id: (!rule_id.is_empty()).then_some(rule_id),
            listener_id,
            clb_id,
        })
    }
}

fn decode_targets(value: Option<&Value>) -> ProviderResult<Vec<TargetSpec>> {
    match value {
        Some(v) => serde_json::from_value(v.clone()).map_err(|e| ProviderError::Decode {
            type_name: TYPE_NAME.to_string(),
            detail: format!("targets: {e}"),
        }),
        None => Ok(Vec::new()),
    }
}

/// Targets to deregister and to register to move from `old` to `new`.
///
/// Entries compare on every field, so a weight change shows up on both sides.
fn target_diff(old: &[TargetSpec], new: &[TargetSpec]) -> (Vec<Target>, Vec<Target>) {
    let old_set: HashSet<&TargetSpec> = old.iter().collect();
    let new_set: HashSet<&TargetSpec> = new.iter().collect();
    let removed = old_set.difference(&new_set).map(|t| Target::from(*t)).collect();
    let added = new_set.difference(&old_set).map(|t| Target::from(*t)).collect();
    (removed, added)
}

pub struct ClbAttachment;

#[async_trait]
impl Resource for ClbAttachment {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        let target = Schema::new()
            .attr("instance_id", Attribute::string().required().description("CVM instance id."))
            .attr("port", Attribute::int().required())
            .attr("weight", Attribute::int().optional().computed().description("Forwarding weight, 0-100."));
        Schema::new()
            .attr("clb_id", Attribute::string().required().force_new())
            .attr("listener_id", Attribute::string().required().force_new())
            .attr("rule_id", Attribute::string().optional().force_new().description("Forwarding rule of a layer-7 listener."))
            .attr("targets", Attribute::set_of_blocks(target).required().max_items(100))
            .attr("protocol_type", Attribute::string().computed())
    }

    async fn create(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "create");
        let config: AttachmentConfig = d.decode()?;
        let service = ClbService::new(ctx);

        if service.describe_listener(&config.clb_id, &config.listener_id).await?.is_none() {
            return Err(ProviderError::not_found("clb listener", config.listener_id.clone()));
        }

        let targets: Vec<Target> = config.targets.iter().map(Target::from).collect();
        service
            .register_targets(&config.clb_id, &config.listener_id, config.rule_id.as_deref(), &targets)
            .await?;

        let rule_id = config.rule_id.clone().unwrap_or_default();
        d.set_id(id::join(&[&rule_id, &config.listener_id, &config.clb_id]));
        self.read(ctx, d).await
    }

    async fn read(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "read");
        let key = AttachmentId::parse(d.id())?;
        let service = ClbService::new(ctx);

        let Some(listener) = service.describe_listener(&key.clb_id, &key.listener_id).await? else {
            log::warn!("[{TYPE_NAME}] Listener {} not found, removing from state", key.listener_id);
            d.clear_id();
            return Ok(());
        };

        let targets: Vec<TargetSpec> = service
            .describe_targets(&key.clb_id, &key.listener_id, key.rule_id.as_deref())
            .await?
            .into_iter()
            .filter_map(TargetSpec::from_backend)
            .collect();
        if targets.is_empty() {
            log::warn!("[{TYPE_NAME}] No targets bound to {}, removing from state", d.id());
            d.clear_id();
            return Ok(());
        }

        d.set_state(&AttachmentState {
            clb_id: key.clb_id,
            listener_id: key.listener_id,
            rule_id: key.rule_id,
            protocol_type: listener.protocol,
            targets,
        })
    }

    async fn update(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "update");
        if d.has_change("targets") {
            let key = AttachmentId::parse(d.id())?;
            let old = decode_targets(d.old("targets"))?;
            let new = decode_targets(d.get("targets"))?;
            let (removed, added) = target_diff(&old, &new);
            let service = ClbService::new(ctx);
            service
                .deregister_targets(&key.clb_id, &key.listener_id, key.rule_id.as_deref(), &removed)
                .await?;
            service
                .register_targets(&key.clb_id, &key.listener_id, key.rule_id.as_deref(), &added)
                .await?;
        }
        self.read(ctx, d).await
    }

    async fn delete(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "delete");
        let key = AttachmentId::parse(d.id())?;
        let targets: Vec<Target> = decode_targets(d.old("targets"))?
            .iter()
            .map(Target::from)
            .collect();
        ClbService::new(ctx)
            .deregister_targets(&key.clb_id, &key.listener_id, key.rule_id.as_deref(), &targets)
            .await
    }
}
