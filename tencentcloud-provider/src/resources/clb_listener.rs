//! `tencentcloud_clb_listener`
//!
//! Id: `clbId#listenerId`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tencentcloud_sdk::services::clb::{CreateListenerRequest, HealthCheck, Listener, ModifyListenerRequest};

use crate::context::ProviderContext;
use crate::error::{ProviderError, ProviderResult};
use crate::id;
use crate::logging::ElapsedGuard;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema};
use crate::services::ClbService;
use crate::traits::Resource;

pub const TYPE_NAME: &str = "tencentcloud_clb_listener";

const PROTOCOLS: [&str; 5] = ["TCP", "UDP", "TCP_SSL", "HTTP", "HTTPS"];
const HEALTH_CHECK_KEYS: [&str; 4] = [
    "health_check_switch",
    "health_check_interval_time",
    "health_check_health_num",
    "health_check_unhealth_num",
];

#[derive(Debug, Deserialize)]
struct ListenerConfig {
    clb_id: String,
    listener_name: Option<String>,
    port: i64,
    protocol: String,
    scheduler: Option<String>,
    session_expire_time: Option<i64>,
    health_check_switch: Option<bool>,
    health_check_interval_time: Option<i64>,
    health_check_health_num: Option<i64>,
    health_check_unhealth_num: Option<i64>,
}

impl ListenerConfig {
    fn validate(&self) -> ProviderResult<()> {
        if !PROTOCOLS.contains(&self.protocol.as_str()) {
            return Err(ProviderError::InvalidConfig(format!(
                "protocol must be one of {PROTOCOLS:?}, got '{}'",
                self.protocol
            )));
        }
        if !(1..=65535).contains(&self.port) {
            return Err(ProviderError::InvalidConfig(format!(
                "port {} is out of range",
                self.port
            )));
        }
        Ok(())
    }

    /// Health check block, or `None` when no health check attribute is set.
    fn health_check(&self) -> Option<HealthCheck> {
        let hc = HealthCheck {
            health_switch: self.health_check_switch.map(i64::from),
            interval_time: self.health_check_interval_time,
            health_num: self.health_check_health_num,
            un_health_num: self.health_check_unhealth_num,
        };
        (hc != HealthCheck::default()).then_some(hc)
    }
}

#[derive(Debug, Serialize)]
struct ListenerState {
    clb_id: String,
    listener_id: Option<String>,
    listener_name: Option<String>,
    port: Option<i64>,
    protocol: Option<String>,
    scheduler: Option<String>,
    session_expire_time: Option<i64>,
    health_check_switch: Option<bool>,
    health_check_interval_time: Option<i64>,
    health_check_health_num: Option<i64>,
    health_check_unhealth_num: Option<i64>,
}

impl ListenerState {
    fn new(clb_id: String, listener: Listener) -> Self {
        let hc = listener.health_check.unwrap_or_default();
        Self {
            clb_id,
            listener_id: listener.listener_id,
            listener_name: listener.listener_name,
            port: listener.port,
            protocol: listener.protocol,
            scheduler: listener.scheduler,
            session_expire_time: listener.session_expire_time,
            health_check_switch: hc.health_switch.map(|s| s == 1),
            health_check_interval_time: hc.interval_time,
            health_check_health_num: hc.health_num,
            health_check_unhealth_num: hc.un_health_num,
        }
    }
}

pub struct ClbListener;

#[async_trait]
impl Resource for ClbListener {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("clb_id", Attribute::string().required().force_new())
            .attr("listener_name", Attribute::string().optional())
            .attr("port", Attribute::int().required().force_new())
            .attr("protocol", Attribute::string().required().force_new().description("TCP, UDP, TCP_SSL, HTTP or HTTPS."))
            .attr("scheduler", Attribute::string().optional().computed().description("WRR or LEAST_CONN."))
            .attr("session_expire_time", Attribute::int().optional().computed().description("Session persistence in seconds; 0 disables it."))
            .attr("health_check_switch", Attribute::bool().optional().computed())
            .attr("health_check_interval_time", Attribute::int().optional().computed())
            .attr("health_check_health_num", Attribute::int().optional().computed())
            .attr("health_check_unhealth_num", Attribute::int().optional().computed())
            .attr("listener_id", Attribute::string().computed())
    }

    async fn create(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "create");
        let config: ListenerConfig = d.decode()?;
        config.validate()?;

        let request = CreateListenerRequest {
            load_balancer_id: config.clb_id.clone(),
            ports: vec![config.port],
            protocol: config.protocol.clone(),
            listener_names: config.listener_name.clone().map(|n| vec![n]),
            health_check: config.health_check(),
            session_expire_time: config.session_expire_time,
            scheduler: config.scheduler.clone(),
        };
        let listener_id = ClbService::new(ctx).create_listener(&request).await?;
        log::info!("[{TYPE_NAME}] Created listener {listener_id} on {}", config.clb_id);

        d.set_id(id::join(&[&config.clb_id, &listener_id]));
        self.read(ctx, d).await
    }

    async fn read(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "read");
        let [clb_id, listener_id] = id::split::<2>(d.id(), &[])?;
        match ClbService::new(ctx).describe_listener(&clb_id, &listener_id).await? {
            Some(listener) => d.set_state(&ListenerState::new(clb_id, listener)),
            None => {
                log::warn!("[{TYPE_NAME}] Listener {listener_id} not found, removing from state");
                d.clear_id();
                Ok(())
            }
        }
    }

    async fn update(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "update");
        let config: ListenerConfig = d.decode()?;
        let [clb_id, listener_id] = id::split::<2>(d.id(), &[])?;

        let changed = |key: &str| d.has_change(key);
        let health_changed = HEALTH_CHECK_KEYS.iter().any(|k| changed(*k));
        let request = ModifyListenerRequest {
            load_balancer_id: clb_id,
            listener_id,
            listener_name: config.listener_name.clone().filter(|_| changed("listener_name")),
            session_expire_time: config.session_expire_time.filter(|_| changed("session_expire_time")),
            health_check: config.health_check().filter(|_| health_changed),
            scheduler: config.scheduler.clone().filter(|_| changed("scheduler")),
        };
        let has_updates = request.listener_name.is_some()
            || request.session_expire_time.is_some()
            || request.health_check.is_some()
            || request.scheduler.is_some();
        if has_updates {
            ClbService::new(ctx).modify_listener(&request).await?;
        }
        self.read(ctx, d).await
    }

    async fn delete(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "delete");
        let [clb_id, listener_id] = id::split::<2>(d.id(), &[])?;
        ClbService::new(ctx).delete_listener(&clb_id, &listener_id).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn config(value: serde_json::Value) -> ListenerConfig {
        ResourceData::planned(TYPE_NAME, ClbListener.schema(), value)
            .unwrap()
            .decode()
            .unwrap()
    }

    #[test]
    fn health_check_is_omitted_when_unset() {
        let c = config(json!({"clb_id": "lb-1", "port": 80, "protocol": "TCP"}));
        assert!(c.health_check().is_none());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn health_switch_maps_to_integer() {
        let c = config(json!({
            "clb_id": "lb-1",
            "port": 443,
            "protocol": "TCP",
            "health_check_switch": true,
            "health_check_interval_time": 5
        }));
        let hc = c.health_check().unwrap();
        assert_eq!(hc.health_switch, Some(1));
        assert_eq!(hc.interval_time, Some(5));
    }

    #[test]
    fn rejects_unknown_protocol_and_port() {
        assert!(config(json!({"clb_id": "lb-1", "port": 80, "protocol": "QUIC"})).validate().is_err());
        assert!(config(json!({"clb_id": "lb-1", "port": 0, "protocol": "UDP"})).validate().is_err());
    }
}
