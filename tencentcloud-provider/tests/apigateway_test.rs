//! API Gateway adapters against a scripted cloud

mod common;

use common::{provider, state_of, FakeCloud};
use serde_json::{json, Value};
use tencentcloud_provider::ProviderError;

const API: &str = "tencentcloud_api_gateway_api";

fn api_config() -> Value {
    json!({
        "service_id": "service-1",
        "api_name": "hello",
        "request_config_path": "/hello",
        "service_config_url": "http://backend.example.com",
        "service_config_path": "/",
        "service_config_method": "GET",
    })
}

/// Prior state matching `api_config` with every default filled in.
fn api_state(limits: Value) -> Value {
    let mut state = api_config();
    let defaults = json!({
        "api_type": "NORMAL",
        "auth_type": "NONE",
        "protocol": "HTTP",
        "enable_cors": true,
        "request_config_method": "GET",
        "service_config_type": "HTTP",
        "service_config_timeout": 5,
    });
    for source in [defaults, limits] {
        if let (Value::Object(state), Value::Object(extra)) = (&mut state, source) {
            state.extend(extra);
        }
    }
    state
}

fn script_read(cloud: &FakeCloud, strategies: Value) {
    cloud.on(
        "DescribeApi",
        json!({"Result": {
            "ServiceId": "service-1",
            "ApiId": "api-1",
            "ApiName": "hello",
            "CreatedTime": "2024-05-01T08:00:00Z",
            "ModifiedTime": "2024-05-02T08:00:00Z",
        }}),
    );
    cloud.on(
        "DescribeApiEnvironmentStrategy",
        json!({"Result": {"TotalCount": 1, "ApiEnvironmentStrategySet": [
            {"ApiId": "api-1", "ApiName": "hello", "EnvironmentStrategySet": strategies}
        ]}}),
    );
}

#[tokio::test(start_paused = true)]
async fn create_pushes_only_configured_limits() {
    let cloud = FakeCloud::new();
    cloud.on("DescribeService", json!({"ServiceId": "service-1"}));
    cloud.on("CreateApi", json!({"Result": {"ApiId": "api-1"}}));
    cloud.on("ModifyApiEnvironmentStrategy", json!({"Result": true}));
    script_read(
        &cloud,
        json!([
            {"EnvironmentName": "test", "Quota": 100},
            {"EnvironmentName": "release", "Quota": -1},
        ]),
    );

    let mut config = api_config();
    config["test_limit"] = json!(100);
    let d = provider(&cloud).create(API, config).await.unwrap();

    assert_eq!(d.id(), "api-1");
    let pushed = cloud.bodies("ModifyApiEnvironmentStrategy");
    assert_eq!(pushed.len(), 1);
    assert_eq!(pushed[0]["EnvironmentName"], "test");
    assert_eq!(pushed[0]["Strategy"], 100);
    assert_eq!(pushed[0]["ApiIds"], json!(["api-1"]));

    assert_eq!(d.state()["test_limit"], 100);
    assert_eq!(d.state()["release_limit"], 2000);
    assert_eq!(d.state()["pre_limit"], 0);
    assert_eq!(d.state()["create_time"], "2024-05-01T08:00:00Z");
    assert_eq!(d.state()["modify_time"], "2024-05-02T08:00:00Z");
}

#[tokio::test(start_paused = true)]
async fn create_in_missing_service_fails_before_create() {
    let cloud = FakeCloud::new();
    cloud.fail("DescribeService", "ResourceNotFound.InvalidService");

    let err = provider(&cloud).create(API, api_config()).await.unwrap_err();

    assert!(matches!(err, ProviderError::NotFound { .. }), "{err:?}");
    assert_eq!(cloud.count("CreateApi"), 0);
}

#[tokio::test(start_paused = true)]
async fn need_convert_requires_converted_code() {
    let cloud = FakeCloud::new();
    let mut config = api_config();
    config["response_error_codes"] = json!([{"code": 100, "msg": "bad", "need_convert": true}]);

    let err = provider(&cloud).create(API, config).await.unwrap_err();

    assert!(matches!(err, ProviderError::InvalidConfig(_)), "{err:?}");
    assert!(cloud.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn rejected_strategy_is_business_failure() {
    let cloud = FakeCloud::new();
    cloud.on("DescribeService", json!({"ServiceId": "service-1"}));
    cloud.on("CreateApi", json!({"Result": {"ApiId": "api-1"}}));
    cloud.on("ModifyApiEnvironmentStrategy", json!({"Result": false}));

    let mut config = api_config();
    config["pre_limit"] = json!(10);
    let err = provider(&cloud).create(API, config).await.unwrap_err();

    assert!(matches!(err, ProviderError::BusinessFailure { .. }), "{err:?}");
}

#[tokio::test(start_paused = true)]
async fn update_pushes_each_changed_limit_with_its_own_value() {
    let cloud = FakeCloud::new();
    cloud.on("ModifyApiEnvironmentStrategy", json!({"Result": true}));
    script_read(&cloud, json!([]));

    let state = api_state(json!({"pre_limit": 10, "release_limit": 20, "test_limit": 30}));
    let mut config = api_config();
    config["pre_limit"] = json!(15);
    config["release_limit"] = json!(20);
    config["test_limit"] = json!(35);

    provider(&cloud)
        .update(API, "api-1", state, config)
        .await
        .unwrap();

    assert_eq!(cloud.count("ModifyApi"), 0);
    let pushed: Vec<(Value, Value)> = cloud
        .bodies("ModifyApiEnvironmentStrategy")
        .into_iter()
        .map(|b| (b["EnvironmentName"].clone(), b["Strategy"].clone()))
        .collect();
    assert_eq!(
        pushed,
        vec![(json!("prepub"), json!(15)), (json!("test"), json!(35))]
    );
}

#[tokio::test(start_paused = true)]
async fn update_skips_zero_limit() {
    let cloud = FakeCloud::new();
    cloud.on("ModifyApiEnvironmentStrategy", json!({"Result": true}));
    script_read(&cloud, json!([]));

    let state = api_state(json!({"pre_limit": 10, "release_limit": 20}));
    let mut config = api_config();
    config["pre_limit"] = json!(0);
    config["release_limit"] = json!(25);

    provider(&cloud)
        .update(API, "api-1", state, config)
        .await
        .unwrap();

    let pushed = cloud.bodies("ModifyApiEnvironmentStrategy");
    assert_eq!(pushed.len(), 1);
    assert_eq!(pushed[0]["EnvironmentName"], "release");
    assert_eq!(pushed[0]["Strategy"], 25);
}

#[tokio::test(start_paused = true)]
async fn read_without_strategy_keeps_stored_limits() {
    let cloud = FakeCloud::new();
    cloud.on("DescribeApi", json!({"Result": {"ServiceId": "service-1", "ApiId": "api-1"}}));
    cloud.on(
        "DescribeApiEnvironmentStrategy",
        json!({"Result": {"TotalCount": 0, "ApiEnvironmentStrategySet": []}}),
    );

    let state = api_state(json!({"pre_limit": 10, "test_limit": 30}));
    let d = provider(&cloud).read(API, "api-1", state).await.unwrap();

    assert_eq!(d.state()["pre_limit"], 10);
    assert_eq!(d.state()["test_limit"], 30);
}

#[tokio::test(start_paused = true)]
async fn read_resets_limits_of_unlisted_environments() {
    let cloud = FakeCloud::new();
    script_read(&cloud, json!([{"EnvironmentName": "prepub", "Quota": 50}]));

    let state = api_state(json!({"pre_limit": 10, "test_limit": 30, "release_limit": 20}));
    let d = provider(&cloud).read(API, "api-1", state).await.unwrap();

    assert_eq!(d.state()["pre_limit"], 50);
    assert_eq!(d.state()["test_limit"], 0);
    assert_eq!(d.state()["release_limit"], 0);
}

#[tokio::test(start_paused = true)]
async fn update_sends_modify_api_for_attribute_changes() {
    let cloud = FakeCloud::new();
    cloud.on("ModifyApi", json!({}));
    script_read(&cloud, json!([]));

    let mut config = api_config();
    config["api_desc"] = json!("greets");
    provider(&cloud)
        .update(API, "api-1", api_state(json!({})), config)
        .await
        .unwrap();

    let modified = cloud.bodies("ModifyApi");
    assert_eq!(modified.len(), 1);
    assert_eq!(modified[0]["ApiId"], "api-1");
    assert_eq!(modified[0]["ApiDesc"], "greets");
    assert_eq!(cloud.count("ModifyApiEnvironmentStrategy"), 0);
}

#[tokio::test(start_paused = true)]
async fn error_codes_cannot_be_emptied() {
    let cloud = FakeCloud::new();
    let state = api_state(json!({
        "response_error_codes": [{"code": 100, "msg": "bad"}]
    }));

    let err = provider(&cloud)
        .update(API, "api-1", state, api_config())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::InvalidConfig(_)), "{err:?}");
    assert!(cloud.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn delete_lifts_limits_then_deletes() {
    let cloud = FakeCloud::new();
    script_read(&cloud, json!([]));
    cloud.on("ModifyApiEnvironmentStrategy", json!({"Result": true}));
    cloud.on("DeleteApi", json!({"Result": true}));

    provider(&cloud)
        .delete(API, "api-1", api_state(json!({})))
        .await
        .unwrap();

    let strategies = cloud.bodies("ModifyApiEnvironmentStrategy");
    assert_eq!(strategies.len(), 3);
    assert!(strategies.iter().all(|b| b["Strategy"] == -1));
    assert_eq!(cloud.actions().last().map(String::as_str), Some("DeleteApi"));
}

#[tokio::test(start_paused = true)]
async fn read_of_deleted_api_clears_id() {
    let cloud = FakeCloud::new();
    cloud.fail("DescribeApi", "ResourceNotFound.InvalidApi");

    let d = provider(&cloud)
        .read(API, "api-1", api_state(json!({})))
        .await
        .unwrap();

    assert!(d.is_gone());
}

#[tokio::test(start_paused = true)]
async fn plugin_attachment_round_trip() {
    const ATTACHMENT: &str = "tencentcloud_api_gateway_plugin_attachment";
    let cloud = FakeCloud::new();
    cloud.on("AttachPlugin", json!({"Result": true}));
    cloud.on(
        "DescribePluginApis",
        json!({"Result": {"TotalCount": 2, "AttachedApis": [
            {"ServiceId": "service-1", "ApiId": "api-2", "Environment": "release"},
            {"ServiceId": "service-1", "ApiId": "api-1", "Environment": "release", "AttachedTime": "2024-05-01"},
        ]}}),
    );
    cloud.fail("DetachPlugin", "ResourceNotFound.InvalidPlugin");
    let provider = provider(&cloud);

    let d = provider
        .create(
            ATTACHMENT,
            json!({"plugin_id": "plugin-1", "service_id": "service-1", "environment_name": "release", "api_id": "api-1"}),
        )
        .await
        .unwrap();
    assert_eq!(d.id(), "plugin-1#service-1#release#api-1");

    let imported = provider.import(ATTACHMENT, d.id()).await.unwrap();
    assert_eq!(imported.state()["api_id"], "api-1");

    provider.delete(ATTACHMENT, d.id(), state_of(&d)).await.unwrap();
    assert_eq!(cloud.count("DetachPlugin"), 1);
}
