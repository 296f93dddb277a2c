//! Cloud Audit (`cloudaudit`, 2019-03-19)

use serde::{Deserialize, Serialize};

use crate::client::Endpoint;

pub const ENDPOINT: Endpoint = Endpoint {
    service: "cloudaudit",
    version: "2019-03-19",
};

service_client! {
    /// Cloud Audit actions.
    Audit, audit, ENDPOINT, {
        list_cos_enable_region(ListCosEnableRegionRequest) -> ListCosEnableRegionResponse = "ListCosEnableRegion";
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListCosEnableRegionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ListCosEnableRegionResponse {
    pub enable_regions: Option<Vec<CosRegionInfo>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CosRegionInfo {
    pub cos_region: Option<String>,
    pub cos_region_name: Option<String>,
}
