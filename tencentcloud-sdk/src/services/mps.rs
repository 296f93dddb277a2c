//! Media Processing Service (`mps`, 2019-06-12): content review templates

use serde::{Deserialize, Serialize};

use crate::client::Endpoint;
use crate::types::ActionResponse;

pub const ENDPOINT: Endpoint = Endpoint {
    service: "mps",
    version: "2019-06-12",
};

service_client! {
    /// MPS actions.
    Mps, mps, ENDPOINT, {
        create_content_review_template(CreateContentReviewTemplateRequest) -> CreateContentReviewTemplateResponse = "CreateContentReviewTemplate";
        describe_content_review_templates(DescribeContentReviewTemplatesRequest) -> DescribeContentReviewTemplatesResponse = "DescribeContentReviewTemplates";
        modify_content_review_template(ModifyContentReviewTemplateRequest) -> ActionResponse = "ModifyContentReviewTemplate";
        delete_content_review_template(DeleteContentReviewTemplateRequest) -> ActionResponse = "DeleteContentReviewTemplate";
    }
}

/// One review channel (image, speech or text) of a category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ReviewInfo {
    pub switch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_set: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_confidence: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_confidence: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ReviewConfigure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_review_info: Option<ReviewInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asr_review_info: Option<ReviewInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_review_info: Option<ReviewInfo>,
}

/// Template body shared by create and modify.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub porn_configure: Option<ReviewConfigure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terrorism_configure: Option<ReviewConfigure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub political_configure: Option<ReviewConfigure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prohibited_configure: Option<ReviewConfigure>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateContentReviewTemplateRequest {
    #[serde(flatten)]
    pub template: TemplateSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateContentReviewTemplateResponse {
    pub definition: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyContentReviewTemplateRequest {
    pub definition: i64,
    #[serde(flatten)]
    pub template: TemplateSpec,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteContentReviewTemplateRequest {
    pub definition: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeContentReviewTemplatesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definitions: Option<Vec<i64>>,
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub template_type: Option<String>,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeContentReviewTemplatesResponse {
    pub total_count: Option<i64>,
    pub content_review_template_set: Option<Vec<ContentReviewTemplateItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContentReviewTemplateItem {
    pub definition: Option<i64>,
    pub name: Option<String>,
    pub comment: Option<String>,
    #[serde(rename = "Type")]
    pub template_type: Option<String>,
    pub porn_configure: Option<ReviewConfigure>,
    pub terrorism_configure: Option<ReviewConfigure>,
    pub political_configure: Option<ReviewConfigure>,
    pub prohibited_configure: Option<ReviewConfigure>,
    pub create_time: Option<String>,
    pub update_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_info_omits_unset_thresholds() {
        let configure = ReviewConfigure {
            img_review_info: Some(ReviewInfo {
                switch: "ON".to_string(),
                label_set: Some(vec!["porn".to_string()]),
                block_confidence: Some(90),
                review_confidence: None,
            }),
            ..Default::default()
        };
        let v = serde_json::to_value(&configure).unwrap();
        assert_eq!(v["ImgReviewInfo"]["Switch"], "ON");
        assert_eq!(v["ImgReviewInfo"]["BlockConfidence"], 90);
        assert!(v["ImgReviewInfo"].get("ReviewConfidence").is_none());
        assert!(v.get("AsrReviewInfo").is_none());
    }
}
