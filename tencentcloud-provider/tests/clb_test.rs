//! CLB instance, listener and attachment adapters against a scripted cloud

mod common;

use common::{provider, state_of, FakeCloud};
use serde_json::{json, Value};
use tencentcloud_provider::ProviderError;

const CLB: &str = "tencentcloud_clb_instance";
const LISTENER: &str = "tencentcloud_clb_listener";
const ATTACHMENT: &str = "tencentcloud_clb_attachment";

fn load_balancers(items: Value) -> Value {
    let total = items.as_array().map_or(0, Vec::len);
    json!({"TotalCount": total, "LoadBalancerSet": items})
}

fn load_balancer(id: &str, name: &str) -> Value {
    json!({
        "LoadBalancerId": id,
        "LoadBalancerName": name,
        "LoadBalancerType": "OPEN",
        "ProjectId": 0,
        "LoadBalancerVips": ["175.1.1.1"],
        "Status": 1,
        "CreateTime": "2024-03-01 10:00:00",
    })
}

fn listeners(port: i64) -> Value {
    json!({
        "TotalCount": 1,
        "Listeners": [{"ListenerId": "lbl-1", "Protocol": "TCP", "Port": port, "Scheduler": "WRR"}],
    })
}

fn bound(targets: Value) -> Value {
    json!({"Listeners": [{"ListenerId": "lbl-1", "Protocol": "TCP", "Port": 80, "Targets": targets}]})
}

#[tokio::test(start_paused = true)]
async fn create_waits_for_task_before_reading() {
    let cloud = FakeCloud::new();
    cloud.on("DescribeLoadBalancers", load_balancers(json!([])));
    cloud.on("DescribeLoadBalancers", load_balancers(json!([load_balancer("lb-1", "web")])));
    cloud.on("CreateLoadBalancer", json!({"LoadBalancerIds": ["lb-1"]}));
    cloud.on("DescribeTaskStatus", json!({"Status": 2}));
    cloud.on("DescribeTaskStatus", json!({"Status": 0}));

    let d = provider(&cloud)
        .create(CLB, json!({"network_type": "OPEN", "clb_name": "web"}))
        .await
        .unwrap();

    assert_eq!(d.id(), "lb-1");
    assert_eq!(d.state()["clb_vips"], json!(["175.1.1.1"]));
    assert_eq!(cloud.count("DescribeTaskStatus"), 2);
    assert_eq!(cloud.bodies("DescribeTaskStatus")[0]["TaskId"], "req-2");
    assert_eq!(cloud.bodies("CreateLoadBalancer")[0]["LoadBalancerName"], "web");
    assert_eq!(cloud.count("SetLoadBalancerSecurityGroups"), 0);
}

#[tokio::test(start_paused = true)]
async fn duplicate_name_is_rejected() {
    let cloud = FakeCloud::new();
    cloud.on(
        "DescribeLoadBalancers",
        load_balancers(json!([load_balancer("lb-9", "web-2"), load_balancer("lb-7", "web")])),
    );

    let err = provider(&cloud)
        .create(CLB, json!({"network_type": "OPEN", "clb_name": "web"}))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::InvalidConfig(_)));
    assert_eq!(cloud.count("CreateLoadBalancer"), 0);
}

#[tokio::test(start_paused = true)]
async fn failed_task_surfaces_as_task_failure() {
    let cloud = FakeCloud::new();
    cloud.on("ModifyLoadBalancerAttributes", json!({}));
    cloud.on("DescribeTaskStatus", json!({"Status": 1}));

    let err = provider(&cloud)
        .update(
            CLB,
            "lb-1",
            json!({"network_type": "OPEN", "clb_name": "web", "project_id": 0}),
            json!({"network_type": "OPEN", "clb_name": "api"}),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::TaskFailed { .. }));
    assert_eq!(cloud.bodies("ModifyLoadBalancerAttributes")[0]["LoadBalancerName"], "api");
}

#[tokio::test(start_paused = true)]
async fn delete_of_unknown_load_balancer_succeeds() {
    let cloud = FakeCloud::new();
    cloud.fail("DeleteLoadBalancer", "InvalidParameter.LBIdNotFound");

    provider(&cloud)
        .delete(CLB, "lb-1", json!({"network_type": "OPEN"}))
        .await
        .unwrap();

    assert_eq!(cloud.count("DescribeTaskStatus"), 0);
}

#[tokio::test(start_paused = true)]
async fn busy_load_balancer_is_retried() {
    let cloud = FakeCloud::new();
    cloud.fail("DeleteLoadBalancer", "FailedOperation.ResourceInOperating");
    cloud.on("DeleteLoadBalancer", json!({}));
    cloud.on("DescribeTaskStatus", json!({"Status": 0}));

    provider(&cloud)
        .delete(CLB, "lb-1", json!({"network_type": "OPEN"}))
        .await
        .unwrap();

    assert_eq!(cloud.count("DeleteLoadBalancer"), 2);
    assert_eq!(cloud.count("DescribeTaskStatus"), 1);
}

#[tokio::test(start_paused = true)]
async fn listener_create_then_health_check_update() {
    let cloud = FakeCloud::new();
    cloud.on("CreateListener", json!({"ListenerIds": ["lbl-1"]}));
    cloud.on("DescribeTaskStatus", json!({"Status": 0}));
    cloud.on("DescribeListeners", listeners(80));
    cloud.on("ModifyListener", json!({}));

    let provider = provider(&cloud);
    let config = json!({"clb_id": "lb-1", "port": 80, "protocol": "TCP"});
    let d = provider.create(LISTENER, config).await.unwrap();
    assert_eq!(d.id(), "lb-1#lbl-1");
    assert_eq!(d.state()["scheduler"], "WRR");
    let created = &cloud.bodies("CreateListener")[0];
    assert_eq!(created["Ports"], json!([80]));
    assert!(created.get("HealthCheck").is_none());

    let desired = json!({
        "clb_id": "lb-1",
        "port": 80,
        "protocol": "TCP",
        "health_check_switch": true,
        "health_check_interval_time": 10,
    });
    provider
        .update(LISTENER, d.id(), state_of(&d), desired)
        .await
        .unwrap();

    let modified = &cloud.bodies("ModifyListener")[0];
    assert_eq!(modified["HealthCheck"]["HealthSwitch"], 1);
    assert_eq!(modified["HealthCheck"]["IntervalTime"], 10);
    assert!(modified.get("Scheduler").is_none());
}

#[tokio::test(start_paused = true)]
async fn attachment_registers_targets_under_listener() {
    let cloud = FakeCloud::new();
    cloud.on("DescribeListeners", listeners(80));
    cloud.on("RegisterTargets", json!({}));
    cloud.on("DescribeTaskStatus", json!({"Status": 0}));
    cloud.on(
        "DescribeTargets",
        bound(json!([{"InstanceId": "ins-1", "Port": 80, "Weight": 10}])),
    );

    let d = provider(&cloud)
        .create(
            ATTACHMENT,
            json!({
                "clb_id": "lb-1",
                "listener_id": "lbl-1",
                "targets": [{"instance_id": "ins-1", "port": 80, "weight": 10}],
            }),
        )
        .await
        .unwrap();

    assert_eq!(d.id(), "#lbl-1#lb-1");
    assert_eq!(d.state()["protocol_type"], "TCP");
    let registered = &cloud.bodies("RegisterTargets")[0];
    assert_eq!(registered["Targets"], json!([{"InstanceId": "ins-1", "Port": 80, "Weight": 10}]));
    assert!(registered.get("LocationId").is_none());
}

#[tokio::test(start_paused = true)]
async fn attachment_update_moves_only_the_difference() {
    let cloud = FakeCloud::new();
    cloud.on("DeregisterTargets", json!({}));
    cloud.on("RegisterTargets", json!({}));
    cloud.on("DescribeTaskStatus", json!({"Status": 0}));
    cloud.on("DescribeListeners", listeners(80));
    cloud.on(
        "DescribeTargets",
        bound(json!([
            {"InstanceId": "ins-1", "Port": 80, "Weight": 10},
            {"InstanceId": "ins-3", "Port": 80, "Weight": 10},
        ])),
    );

    let state = json!({
        "clb_id": "lb-1",
        "listener_id": "lbl-1",
        "targets": [
            {"instance_id": "ins-1", "port": 80, "weight": 10},
            {"instance_id": "ins-2", "port": 80, "weight": 10},
        ],
    });
    let config = json!({
        "clb_id": "lb-1",
        "listener_id": "lbl-1",
        "targets": [
            {"instance_id": "ins-3", "port": 80, "weight": 10},
            {"instance_id": "ins-1", "port": 80, "weight": 10},
        ],
    });
    let d = provider(&cloud)
        .update(ATTACHMENT, "#lbl-1#lb-1", state, config)
        .await
        .unwrap();

    let mutations: Vec<String> = cloud
        .actions()
        .into_iter()
        .filter(|a| a.ends_with("Targets") && a != "DescribeTargets")
        .collect();
    assert_eq!(mutations, ["DeregisterTargets", "RegisterTargets"]);
    assert_eq!(cloud.bodies("DeregisterTargets")[0]["Targets"][0]["InstanceId"], "ins-2");
    assert_eq!(cloud.bodies("RegisterTargets")[0]["Targets"][0]["InstanceId"], "ins-3");
    assert_eq!(d.state()["targets"].as_array().map(Vec::len), Some(2));
}

#[tokio::test(start_paused = true)]
async fn attachment_of_deleted_listener_is_gone() {
    let cloud = FakeCloud::new();
    cloud.fail("DescribeListeners", "InvalidParameter.ListenerIdNotFound");

    let d = provider(&cloud)
        .read(ATTACHMENT, "#lbl-1#lb-1", json!({"clb_id": "lb-1", "listener_id": "lbl-1"}))
        .await
        .unwrap();

    assert!(d.is_gone());
    assert_eq!(cloud.count("DescribeTargets"), 0);
}

#[tokio::test(start_paused = true)]
async fn attachment_over_target_cap_is_rejected() {
    let cloud = FakeCloud::new();
    let targets: Vec<Value> = (0..101)
        .map(|i| json!({"instance_id": format!("ins-{i}"), "port": 80}))
        .collect();

    let err = provider(&cloud)
        .create(
            ATTACHMENT,
            json!({"clb_id": "lb-1", "listener_id": "lbl-1", "targets": targets}),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::InvalidConfig(_)), "{err:?}");
    assert!(cloud.calls().is_empty());
}
