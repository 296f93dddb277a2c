//! SMS (`sms`, 2021-01-11): signatures and templates

use serde::{Deserialize, Serialize};

use crate::client::Endpoint;

pub const ENDPOINT: Endpoint = Endpoint {
    service: "sms",
    version: "2021-01-11",
};

service_client! {
    /// SMS actions.
    Sms, sms, ENDPOINT, {
        add_sms_sign(AddSmsSignRequest) -> AddSmsSignResponse = "AddSmsSign";
        describe_sms_sign_list(DescribeSmsSignListRequest) -> DescribeSmsSignListResponse = "DescribeSmsSignList";
        modify_sms_sign(ModifySmsSignRequest) -> ModifySmsSignResponse = "ModifySmsSign";
        delete_sms_sign(DeleteSmsSignRequest) -> DeleteSmsSignResponse = "DeleteSmsSign";
        add_sms_template(AddSmsTemplateRequest) -> AddSmsTemplateResponse = "AddSmsTemplate";
        describe_sms_template_list(DescribeSmsTemplateListRequest) -> DescribeSmsTemplateListResponse = "DescribeSmsTemplateList";
        modify_sms_template(ModifySmsTemplateRequest) -> ModifySmsTemplateResponse = "ModifySmsTemplate";
        delete_sms_template(DeleteSmsTemplateRequest) -> DeleteSmsTemplateResponse = "DeleteSmsTemplate";
    }
}

// ============ Signatures ============

/// Signature body shared by add and modify.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignSpec {
    pub sign_name: String,
    pub sign_type: i64,
    pub document_type: i64,
    pub international: i64,
    pub sign_purpose: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddSmsSignRequest {
    #[serde(flatten)]
    pub sign: SignSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AddSmsSignResponse {
    pub add_sign_status: Option<AddSignStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AddSignStatus {
    pub sign_id: Option<u64>,
    pub sign_apply_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifySmsSignRequest {
    pub sign_id: u64,
    #[serde(flatten)]
    pub sign: SignSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ModifySmsSignResponse {
    pub modify_sign_status: Option<AddSignStatus>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteSmsSignRequest {
    pub sign_id: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeleteSmsSignResponse {
    pub delete_sign_status: Option<DeleteStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeleteStatus {
    pub delete_status: Option<String>,
    pub delete_time: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeSmsSignListRequest {
    pub sign_id_set: Vec<u64>,
    pub international: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeSmsSignListResponse {
    pub describe_sign_list_status_set: Option<Vec<SignStatus>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SignStatus {
    pub sign_id: Option<u64>,
    pub international: Option<i64>,
    pub status_code: Option<i64>,
    pub review_reply: Option<String>,
    pub sign_name: Option<String>,
    pub create_time: Option<u64>,
}

// ============ Templates ============

/// Template body shared by add and modify.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateSpec {
    pub template_name: String,
    pub template_content: String,
    pub sms_type: i64,
    pub international: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddSmsTemplateRequest {
    #[serde(flatten)]
    pub template: TemplateSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AddSmsTemplateResponse {
    pub add_template_status: Option<AddTemplateStatus>,
}

/// The API reports template ids as strings on add, integers elsewhere.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AddTemplateStatus {
    pub template_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifySmsTemplateRequest {
    pub template_id: u64,
    #[serde(flatten)]
    pub template: TemplateSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ModifySmsTemplateResponse {
    pub modify_template_status: Option<ModifyTemplateStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ModifyTemplateStatus {
    pub template_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteSmsTemplateRequest {
    pub template_id: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeleteSmsTemplateResponse {
    pub delete_template_status: Option<DeleteStatus>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeSmsTemplateListRequest {
    pub template_id_set: Vec<u64>,
    pub international: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeSmsTemplateListResponse {
    pub describe_template_status_set: Option<Vec<TemplateStatus>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TemplateStatus {
    pub template_id: Option<u64>,
    pub international: Option<i64>,
    pub status_code: Option<i64>,
    pub review_reply: Option<String>,
    pub template_name: Option<String>,
    pub create_time: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modify_sign_flattens_spec() {
        let req = ModifySmsSignRequest {
            sign_id: 42,
            sign: SignSpec {
                sign_name: "Acme".to_string(),
                sign_type: 0,
                document_type: 0,
                international: 0,
                sign_purpose: 0,
                proof_image: Some("base64".to_string()),
                remark: None,
            },
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["SignId"], 42);
        assert_eq!(v["SignName"], "Acme");
        assert!(v.get("Remark").is_none());
    }

    #[test]
    fn template_list_decodes_status() {
        let resp: DescribeSmsTemplateListResponse = serde_json::from_str(
            r#"{"DescribeTemplateStatusSet":[{"TemplateId":1001,"International":0,
                "StatusCode":1,"ReviewReply":"pending","TemplateName":"otp","CreateTime":1705305600}]}"#,
        )
        .unwrap();
        let status = &resp.describe_template_status_set.unwrap()[0];
        assert_eq!(status.template_id, Some(1001));
        assert_eq!(status.status_code, Some(1));
    }
}
