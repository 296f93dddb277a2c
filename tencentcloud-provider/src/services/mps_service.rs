//! MPS service: content review templates

use tencentcloud_sdk::services::mps::{
    ContentReviewTemplateItem, CreateContentReviewTemplateRequest,
    DeleteContentReviewTemplateRequest, DescribeContentReviewTemplatesRequest,
    ModifyContentReviewTemplateRequest, Mps, TemplateSpec,
};

use crate::context::ProviderContext;
use crate::error::{ProviderError, ProviderResult};
use crate::pagination::{paginate, Page, DEFAULT_PAGE_LIMIT};
use crate::retry::{retry_call, retry_lookup};

const NOT_FOUND: &[&str] = &["ResourceNotFound", "InvalidParameterValue.Definition"];

pub struct MpsService<'a> {
    ctx: &'a ProviderContext,
}

impl<'a> MpsService<'a> {
    #[must_use]
    pub fn new(ctx: &'a ProviderContext) -> Self {
        Self { ctx }
    }

    fn api(&self) -> Mps<'a> {
        self.ctx.client().mps()
    }

    pub async fn create_template(&self, template: &TemplateSpec) -> ProviderResult<i64> {
        let api = self.api();
        let request = CreateContentReviewTemplateRequest {
            template: template.clone(),
        };
        let response = retry_call(self.ctx.write_timeout(), &[], || {
            api.create_content_review_template(&request)
        })
        .await?;
        response.definition.ok_or_else(|| ProviderError::BusinessFailure {
            action: "CreateContentReviewTemplate".to_string(),
            detail: "response carries no Definition".to_string(),
        })
    }

    /// Templates filtered by definition and type; empty filters list everything.
    pub async fn describe_templates(
        &self,
        definitions: &[i64],
        template_type: Option<&str>,
    ) -> ProviderResult<Vec<ContentReviewTemplateItem>> {
        let api = self.api();
        let timeout = self.ctx.read_timeout();
        let definitions = (!definitions.is_empty()).then(|| definitions.to_vec());
        let definitions = &definitions;
        paginate(DEFAULT_PAGE_LIMIT, |offset, limit| async move {
            let request = DescribeContentReviewTemplatesRequest {
                definitions: definitions.clone(),
                template_type: template_type.map(str::to_string),
                offset,
                limit,
            };
            let response = retry_lookup(timeout, NOT_FOUND, &[], || {
                api.describe_content_review_templates(&request)
            })
            .await?
            .unwrap_or_default();
            Ok(Page::new(
                response.content_review_template_set.unwrap_or_default(),
                response.total_count,
            ))
        })
        .await
    }

    pub async fn describe_template(
        &self,
        definition: i64,
    ) -> ProviderResult<Option<ContentReviewTemplateItem>> {
        Ok(self
            .describe_templates(&[definition], None)
            .await?
            .into_iter()
            .find(|t| t.definition == Some(definition)))
    }

    pub async fn modify_template(&self, definition: i64, template: &TemplateSpec) -> ProviderResult<()> {
        let api = self.api();
        let request = ModifyContentReviewTemplateRequest {
            definition,
            template: template.clone(),
        };
        retry_call(self.ctx.write_timeout(), &[], || {
            api.modify_content_review_template(&request)
        })
        .await?;
        Ok(())
    }

    pub async fn delete_template(&self, definition: i64) -> ProviderResult<()> {
        let api = self.api();
        let request = DeleteContentReviewTemplateRequest { definition };
        retry_lookup(self.ctx.write_timeout(), NOT_FOUND, &[], || {
            api.delete_content_review_template(&request)
        })
        .await?;
        Ok(())
    }
}
