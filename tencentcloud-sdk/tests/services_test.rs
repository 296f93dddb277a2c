//! Service accessors route each action to its own endpoint and version

mod common;

use common::{Recording, recorded_client};
use serde_json::json;
use tencentcloud_sdk::SdkError;
use tencentcloud_sdk::services::apigateway::DescribeServicesStatusRequest;
use tencentcloud_sdk::services::audit::ListCosEnableRegionRequest;
use tencentcloud_sdk::services::clb::{DescribeTaskStatusRequest, TASK_STATUS_RUNNING};
use tencentcloud_sdk::services::sms::DescribeSmsSignListRequest;

#[tokio::test]
async fn audit_request_targets_audit_endpoint() {
    let transport = Recording::new(json!({"Response": {
        "EnableRegions": [{"CosRegion": "ap-guangzhou", "CosRegionName": "Guangzhou"}],
        "RequestId": "req-1",
    }}));
    let client = recorded_client(&transport, "ap-shanghai");

    let response = client
        .audit()
        .list_cos_enable_region(&ListCosEnableRegionRequest {
            website_type: Some("zh".to_string()),
        })
        .await
        .unwrap();

    let regions = response.enable_regions.unwrap();
    assert_eq!(regions[0].cos_region.as_deref(), Some("ap-guangzhou"));
    let request = transport.last();
    assert_eq!(request.url, "https://audit.tencentcloudapi.com/");
    assert_eq!(request.header("X-TC-Action"), Some("ListCosEnableRegion"));
    assert_eq!(request.header("X-TC-Version"), Some("2019-03-19"));
    assert_eq!(request.header("X-TC-Region"), Some("ap-shanghai"));
    assert_eq!(request.header("X-TC-Token"), Some("session"));
    let authorization = request.header("Authorization").unwrap();
    assert!(authorization.starts_with("TC3-HMAC-SHA256 Credential=AKIDtest/"));
    assert!(authorization.contains("/audit/tc3_request"));
    assert_eq!(request.body, r#"{"WebsiteType":"zh"}"#);
}

#[tokio::test]
async fn paging_fields_are_always_sent() {
    let transport = Recording::new(json!({"Response": {
        "Result": {"TotalCount": 0, "ServiceSet": []},
        "RequestId": "req-2",
    }}));
    let client = recorded_client(&transport, "ap-guangzhou");

    let response = client
        .apigateway()
        .describe_services_status(&DescribeServicesStatusRequest {
            limit: 100,
            offset: 0,
            filters: None,
        })
        .await
        .unwrap();

    assert_eq!(response.result.unwrap().total_count, Some(0));
    let request = transport.last();
    assert_eq!(request.header("X-TC-Version"), Some("2018-08-08"));
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body, json!({"Limit": 100, "Offset": 0}));
}

#[tokio::test]
async fn running_task_status_decodes() {
    let transport = Recording::new(json!({"Response": {"Status": 2, "RequestId": "req-3"}}));
    let client = recorded_client(&transport, "ap-guangzhou");

    let response = client
        .clb()
        .describe_task_status(&DescribeTaskStatusRequest {
            task_id: "task-1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.status, Some(TASK_STATUS_RUNNING));
    assert_eq!(transport.last().header("X-TC-Version"), Some("2018-03-17"));
}

#[tokio::test]
async fn service_error_code_is_preserved() {
    let transport = Recording::new(json!({"Response": {
        "Error": {"Code": "FailedOperation.MissingSignature", "Message": "sign not found"},
        "RequestId": "req-4",
    }}));
    let client = recorded_client(&transport, "ap-guangzhou");

    let err = client
        .sms()
        .describe_sms_sign_list(&DescribeSmsSignListRequest {
            sign_id_set: vec![1234],
            international: 0,
        })
        .await
        .unwrap_err();

    assert_eq!(err.api_code(), Some("FailedOperation.MissingSignature"));
    assert_eq!(err.action(), Some("DescribeSmsSignList"));
    assert!(matches!(err, SdkError::Api { request_id: Some(ref id), .. } if id == "req-4"));
    assert_eq!(transport.requests().len(), 1);
}
