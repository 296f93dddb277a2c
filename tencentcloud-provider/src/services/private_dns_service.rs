//! Private DNS service

use tencentcloud_sdk::services::privatedns::{
    CreatePrivateZoneRecordRequest, DeletePrivateZoneRecordRequest,
    DescribePrivateZoneRecordListRequest, ModifyPrivateZoneRecordRequest, PrivateDns,
    PrivateZoneRecord, RecordSpec,
};
use tencentcloud_sdk::Filter;

use crate::context::ProviderContext;
use crate::error::{ProviderError, ProviderResult};
use crate::pagination::{paginate, Page, DEFAULT_PAGE_LIMIT};
use crate::retry::{retry_call, retry_lookup};

const NOT_FOUND: &[&str] = &[
    "ResourceNotFound",
    "InvalidParameter.ZoneNotExists",
    "InvalidParameter.RecordNotExist",
];

pub struct PrivateDnsService<'a> {
    ctx: &'a ProviderContext,
}

impl<'a> PrivateDnsService<'a> {
    #[must_use]
    pub fn new(ctx: &'a ProviderContext) -> Self {
        Self { ctx }
    }

    fn api(&self) -> PrivateDns<'a> {
        self.ctx.client().privatedns()
    }

    pub async fn create_record(&self, zone_id: &str, record: &RecordSpec) -> ProviderResult<String> {
        let api = self.api();
        let request = CreatePrivateZoneRecordRequest {
            zone_id: zone_id.to_string(),
            record: record.clone(),
        };
        let response = retry_call(self.ctx.write_timeout(), &[], || {
            api.create_private_zone_record(&request)
        })
        .await?;
        response.record_id.ok_or_else(|| ProviderError::BusinessFailure {
            action: "CreatePrivateZoneRecord".to_string(),
            detail: "response carries no RecordId".to_string(),
        })
    }

    /// The record, or `None` when it or its zone is gone.
    pub async fn describe_record(
        &self,
        zone_id: &str,
        record_id: &str,
    ) -> ProviderResult<Option<PrivateZoneRecord>> {
        let api = self.api();
        let timeout = self.ctx.read_timeout();
        let records = paginate(DEFAULT_PAGE_LIMIT, |offset, limit| async move {
            let request = DescribePrivateZoneRecordListRequest {
                zone_id: zone_id.to_string(),
                filters: Some(vec![Filter::new("RecordId", [record_id])]),
                offset,
                limit,
            };
            let response = retry_lookup(timeout, NOT_FOUND, &[], || {
                api.describe_private_zone_record_list(&request)
            })
            .await?
            .unwrap_or_default();
            Ok(Page::new(response.record_set.unwrap_or_default(), response.total_count))
        })
        .await?;
        Ok(records
            .into_iter()
            .find(|r| r.record_id.as_deref() == Some(record_id)))
    }

    pub async fn modify_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &RecordSpec,
    ) -> ProviderResult<()> {
        let api = self.api();
        let request = ModifyPrivateZoneRecordRequest {
            zone_id: zone_id.to_string(),
            record_id: record_id.to_string(),
            record: record.clone(),
        };
        retry_call(self.ctx.write_timeout(), &[], || {
            api.modify_private_zone_record(&request)
        })
        .await?;
        Ok(())
    }

    pub async fn delete_record(&self, zone_id: &str, record_id: &str) -> ProviderResult<()> {
        let api = self.api();
        let request = DeletePrivateZoneRecordRequest {
            zone_id: zone_id.to_string(),
            record_id: record_id.to_string(),
        };
        retry_lookup(self.ctx.write_timeout(), NOT_FOUND, &[], || {
            api.delete_private_zone_record(&request)
        })
        .await?;
        Ok(())
    }
}
