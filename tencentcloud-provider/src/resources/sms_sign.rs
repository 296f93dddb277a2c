//! `tencentcloud_sms_sign`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tencentcloud_sdk::services::sms::SignSpec;

use crate::context::ProviderContext;
use crate::error::{ProviderError, ProviderResult};
use crate::logging::ElapsedGuard;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema};
use crate::services::SmsService;
use crate::traits::Resource;

pub const TYPE_NAME: &str = "tencentcloud_sms_sign";

const UPDATABLE: [&str; 6] = [
    "sign_name",
    "sign_type",
    "document_type",
    "sign_purpose",
    "proof_image",
    "remark",
];

#[derive(Debug, Deserialize)]
struct SignConfig {
    sign_name: String,
    sign_type: i64,
    document_type: i64,
    international: i64,
    sign_purpose: i64,
    proof_image: Option<String>,
    remark: Option<String>,
}

impl From<SignConfig> for SignSpec {
    fn from(c: SignConfig) -> Self {
        Self {
            sign_name: c.sign_name,
            sign_type: c.sign_type,
            document_type: c.document_type,
            international: c.international,
            sign_purpose: c.sign_purpose,
            proof_image: c.proof_image,
            remark: c.remark,
        }
    }
}

#[derive(Debug, Serialize)]
struct SignState {
    sign_id: u64,
    sign_name: Option<String>,
    international: Option<i64>,
    status_code: Option<i64>,
    review_reply: Option<String>,
}

pub(crate) fn parse_numeric_id(raw: &str) -> ProviderResult<u64> {
    raw.parse()
        .map_err(|_| ProviderError::invalid_id(raw, "expected a numeric id"))
}

pub struct SmsSign;

#[async_trait]
impl Resource for SmsSign {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("sign_name", Attribute::string().required())
            .attr("sign_type", Attribute::int().required().description("0 company, 1 app, 2 website, 3 official account, 4 trademark, 5 government or institution."))
            .attr("document_type", Attribute::int().required().description("Type of the supporting document."))
            .attr("international", Attribute::int().required().force_new().description("0 for mainland China, 1 for international/HK/MO/TW."))
            .attr("sign_purpose", Attribute::int().required().description("0 own use, 1 on behalf of others."))
            .attr("proof_image", Attribute::string().required().sensitive().description("Base64 image of the supporting document."))
            .attr("remark", Attribute::string().optional())
            .attr("sign_id", Attribute::int().computed())
            .attr("status_code", Attribute::int().computed().description("0 approved, 1 pending, -1 rejected."))
            .attr("review_reply", Attribute::string().computed())
    }

    async fn create(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "create");
        let config: SignConfig = d.decode()?;
        let sign_id = SmsService::new(ctx).add_sign(&config.into()).await?;
        log::info!("[{TYPE_NAME}] Submitted sign {sign_id} for review");
        d.set_id(sign_id.to_string());
        self.read(ctx, d).await
    }

    async fn read(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "read");
        let sign_id = parse_numeric_id(d.id())?;
        let international = d.get("international").and_then(serde_json::Value::as_i64).unwrap_or(0);
        match SmsService::new(ctx).describe_sign(sign_id, international).await? {
            Some(status) => d.set_state(&SignState {
                sign_id,
                sign_name: status.sign_name,
                international: status.international,
                status_code: status.status_code,
                review_reply: status.review_reply,
            }),
            None => {
                log::warn!("[{TYPE_NAME}] Sign {sign_id} not found, removing from state");
                d.clear_id();
                Ok(())
            }
        }
    }

    async fn update(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "update");
        if UPDATABLE.iter().any(|k| d.has_change(k)) {
            let sign_id = parse_numeric_id(d.id())?;
            let config: SignConfig = d.decode()?;
            SmsService::new(ctx).modify_sign(sign_id, &config.into()).await?;
        }
        self.read(ctx, d).await
    }

    async fn delete(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        let _elapsed = ElapsedGuard::new(TYPE_NAME, "delete");
        SmsService::new(ctx).delete_sign(parse_numeric_id(d.id())?).await
    }

    fn importable(&self) -> bool {
        false
    }
}
