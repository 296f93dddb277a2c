//! SMS service: signatures and templates
//!
//! Both are looked up by numeric id together with the `international` flag they
//! were registered under.

use tencentcloud_sdk::services::sms::{
    AddSmsSignRequest, AddSmsTemplateRequest, DeleteSmsSignRequest, DeleteSmsTemplateRequest,
    DescribeSmsSignListRequest, DescribeSmsTemplateListRequest, ModifySmsSignRequest,
    ModifySmsTemplateRequest, SignSpec, SignStatus, Sms, TemplateSpec, TemplateStatus,
};

use crate::context::ProviderContext;
use crate::error::{ProviderError, ProviderResult};
use crate::retry::{retry_call, retry_lookup};

const SIGN_ABSENT: &[&str] = &[
    "FailedOperation.MissingSignature",
    "FailedOperation.SignIdNotExist",
    "InvalidParameterValue.MissingSignatureList",
];
const TEMPLATE_ABSENT: &[&str] = &[
    "FailedOperation.MissingTemplate",
    "FailedOperation.TemplateIdNotExist",
    "InvalidParameterValue.MissingTemplateList",
];

pub struct SmsService<'a> {
    ctx: &'a ProviderContext,
}

impl<'a> SmsService<'a> {
    #[must_use]
    pub fn new(ctx: &'a ProviderContext) -> Self {
        Self { ctx }
    }

    fn api(&self) -> Sms<'a> {
        self.ctx.client().sms()
    }

    // ============ Signatures ============

    pub async fn add_sign(&self, sign: &SignSpec) -> ProviderResult<u64> {
        let api = self.api();
        let request = AddSmsSignRequest { sign: sign.clone() };
        let response =
            retry_call(self.ctx.write_timeout(), &[], || api.add_sms_sign(&request)).await?;
        response
            .add_sign_status
            .and_then(|s| s.sign_id)
            .ok_or_else(|| ProviderError::BusinessFailure {
                action: "AddSmsSign".to_string(),
                detail: "response carries no SignId".to_string(),
            })
    }

    pub async fn describe_sign(
        &self,
        sign_id: u64,
        international: i64,
    ) -> ProviderResult<Option<SignStatus>> {
        let api = self.api();
        let request = DescribeSmsSignListRequest {
            sign_id_set: vec![sign_id],
            international,
        };
        let response = retry_lookup(self.ctx.read_timeout(), SIGN_ABSENT, &[], || {
            api.describe_sms_sign_list(&request)
        })
        .await?;
        Ok(response
            .and_then(|r| r.describe_sign_list_status_set)
            .unwrap_or_default()
            .into_iter()
            .find(|s| s.sign_id == Some(sign_id)))
    }

    pub async fn modify_sign(&self, sign_id: u64, sign: &SignSpec) -> ProviderResult<()> {
        let api = self.api();
        let request = ModifySmsSignRequest {
            sign_id,
            sign: sign.clone(),
        };
        retry_call(self.ctx.write_timeout(), &[], || api.modify_sms_sign(&request)).await?;
        Ok(())
    }

    pub async fn delete_sign(&self, sign_id: u64) -> ProviderResult<()> {
        let api = self.api();
        let request = DeleteSmsSignRequest { sign_id };
        retry_lookup(self.ctx.write_timeout(), SIGN_ABSENT, &[], || {
            api.delete_sms_sign(&request)
        })
        .await?;
        Ok(())
    }

    // ============ Templates ============

    pub async fn add_template(&self, template: &TemplateSpec) -> ProviderResult<u64> {
        let api = self.api();
        let request = AddSmsTemplateRequest {
            template: template.clone(),
        };
        let response =
            retry_call(self.ctx.write_timeout(), &[], || api.add_sms_template(&request)).await?;
        let id = response
            .add_template_status
            .and_then(|s| s.template_id)
            .ok_or_else(|| ProviderError::BusinessFailure {
                action: "AddSmsTemplate".to_string(),
                detail: "response carries no TemplateId".to_string(),
            })?;
        id.parse().map_err(|_| ProviderError::BusinessFailure {
            action: "AddSmsTemplate".to_string(),
            detail: format!("TemplateId '{id}' is not numeric"),
        })
    }

    pub async fn describe_template(
        &self,
        template_id: u64,
        international: i64,
    ) -> ProviderResult<Option<TemplateStatus>> {
        let api = self.api();
        let request = DescribeSmsTemplateListRequest {
            template_id_set: vec![template_id],
            international,
        };
        let response = retry_lookup(self.ctx.read_timeout(), TEMPLATE_ABSENT, &[], || {
            api.describe_sms_template_list(&request)
        })
        .await?;
        Ok(response
            .and_then(|r| r.describe_template_status_set)
            .unwrap_or_default()
            .into_iter()
            .find(|t| t.template_id == Some(template_id)))
    }

    pub async fn modify_template(&self, template_id: u64, template: &TemplateSpec) -> ProviderResult<()> {
        let api = self.api();
        let request = ModifySmsTemplateRequest {
            template_id,
            template: template.clone(),
        };
        retry_call(self.ctx.write_timeout(), &[], || api.modify_sms_template(&request)).await?;
        Ok(())
    }

    pub async fn delete_template(&self, template_id: u64) -> ProviderResult<()> {
        let api = self.api();
        let request = DeleteSmsTemplateRequest { template_id };
        retry_lookup(self.ctx.write_timeout(), TEMPLATE_ABSENT, &[], || {
            api.delete_sms_template(&request)
        })
        .await?;
        Ok(())
    }
}
