//! Private DNS (`privatedns`, 2020-10-28)

use serde::{Deserialize, Serialize};

use crate::client::Endpoint;
use crate::types::{ActionResponse, Filter};

pub const ENDPOINT: Endpoint = Endpoint {
    service: "privatedns",
    version: "2020-10-28",
};

service_client! {
    /// Private DNS actions.
    PrivateDns, privatedns, ENDPOINT, {
        create_private_zone_record(CreatePrivateZoneRecordRequest) -> CreatePrivateZoneRecordResponse = "CreatePrivateZoneRecord";
        describe_private_zone_record_list(DescribePrivateZoneRecordListRequest) -> DescribePrivateZoneRecordListResponse = "DescribePrivateZoneRecordList";
        modify_private_zone_record(ModifyPrivateZoneRecordRequest) -> ActionResponse = "ModifyPrivateZoneRecord";
        delete_private_zone_record(DeletePrivateZoneRecordRequest) -> ActionResponse = "DeletePrivateZoneRecord";
    }
}

/// Record body shared by create and modify.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordSpec {
    pub record_type: String,
    pub sub_domain: String,
    pub record_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(rename = "MX", skip_serializing_if = "Option::is_none")]
    pub mx: Option<i64>,
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatePrivateZoneRecordRequest {
    pub zone_id: String,
    #[serde(flatten)]
    pub record: RecordSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreatePrivateZoneRecordResponse {
    pub record_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyPrivateZoneRecordRequest {
    pub zone_id: String,
    pub record_id: String,
    #[serde(flatten)]
    pub record: RecordSpec,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeletePrivateZoneRecordRequest {
    pub zone_id: String,
    pub record_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribePrivateZoneRecordListRequest {
    pub zone_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<Filter>>,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribePrivateZoneRecordListResponse {
    pub total_count: Option<i64>,
    pub record_set: Option<Vec<PrivateZoneRecord>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PrivateZoneRecord {
    pub record_id: Option<String>,
    pub zone_id: Option<String>,
    pub sub_domain: Option<String>,
    pub record_type: Option<String>,
    pub record_value: Option<String>,
    #[serde(rename = "TTL")]
    pub ttl: Option<i64>,
    #[serde(rename = "MX")]
    pub mx: Option<i64>,
    pub status: Option<String>,
    pub weight: Option<i64>,
    pub created_on: Option<String>,
    pub updated_on: Option<String>,
}
