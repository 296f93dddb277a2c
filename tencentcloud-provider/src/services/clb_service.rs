//! CLB service
//!
//! Every mutation returns a task id that is polled through `DescribeTaskStatus`
//! before the call returns. Mutations hold the context's CLB lock for the whole
//! call and wait.

use std::time::Duration;

use tencentcloud_sdk::services::clb::{
    Backend, Clb, CreateListenerRequest, CreateLoadBalancerRequest, DeleteListenerRequest,
    DeleteLoadBalancerRequest, DescribeListenersRequest, DescribeLoadBalancersRequest,
    DescribeTargetsRequest, DescribeTaskStatusRequest, Listener, LoadBalancer,
    ModifyListenerRequest, ModifyLoadBalancerAttributesRequest, RegisterTargetsRequest,
    SetLoadBalancerSecurityGroupsRequest, Target, TASK_STATUS_FAILED, TASK_STATUS_SUCCESS,
};

use crate::context::ProviderContext;
use crate::error::{ProviderError, ProviderResult};
use crate::pagination::{paginate, Page, DEFAULT_PAGE_LIMIT};
use crate::retry::{classify, retry, retry_call, retry_lookup, RetryDecision};

/// Budget for one asynchronous CLB task.
pub const TASK_WAIT_TIMEOUT: Duration = Duration::from_secs(10 * 60);

const RESOURCE_IN_OPERATING: &str = "FailedOperation.ResourceInOperating";
const LB_NOT_FOUND: &str = "InvalidParameter.LBIdNotFound";
const LISTENER_NOT_FOUND: &str = "InvalidParameter.ListenerIdNotFound";

/// Load balancer lookup criteria for [`ClbService::describe_load_balancers`].
#[derive(Debug, Clone, Default)]
pub struct LoadBalancerQuery {
    pub id: Option<String>,
    pub name: Option<String>,
    pub network_type: Option<String>,
    pub project_id: Option<i64>,
}

fn task_id(action: &str, request_id: Option<&String>) -> ProviderResult<String> {
    request_id
        .cloned()
        .ok_or_else(|| ProviderError::BusinessFailure {
            action: action.to_string(),
            detail: "response carries no RequestId to wait on".to_string(),
        })
}

pub struct ClbService<'a> {
    ctx: &'a ProviderContext,
}

impl<'a> ClbService<'a> {
    #[must_use]
    pub fn new(ctx: &'a ProviderContext) -> Self {
        Self { ctx }
    }

    fn api(&self) -> Clb<'a> {
        self.ctx.client().clb()
    }

    /// Poll `task_id` until it leaves the running state.
    ///
    /// Returns the load balancer ids the task reports.
    pub async fn wait_for_task(&self, task_id: &str) -> ProviderResult<Vec<String>> {
        let api = self.api();
        let request = DescribeTaskStatusRequest {
            task_id: task_id.to_string(),
        };
        retry(TASK_WAIT_TIMEOUT, || async {
            let response = api
                .describe_task_status(&request)
                .await
                .map_err(|e| classify(e, &[]))?;
            match response.status {
                Some(TASK_STATUS_SUCCESS) => Ok(response.load_balancer_ids.unwrap_or_default()),
                Some(TASK_STATUS_FAILED) => Err(RetryDecision::fatal(ProviderError::TaskFailed {
                    task_id: task_id.to_string(),
                    detail: "DescribeTaskStatus reported failure".to_string(),
                })),
                status => Err(RetryDecision::Retry(ProviderError::BusinessFailure {
                    action: "DescribeTaskStatus".to_string(),
                    detail: format!("task {task_id} still running (status {status:?})"),
                })),
            }
        })
        .await
    }

    // ============ Load balancers ============

    /// Create a load balancer and return its id once the task completes.
    pub async fn create_load_balancer(
        &self,
        request: &CreateLoadBalancerRequest,
    ) -> ProviderResult<String> {
        let api = self.api();
        let _lock = self.ctx.lock_clb().await;
        let response = retry_call(self.ctx.write_timeout(), &[], || {
            api.create_load_balancer(request)
        })
        .await?;
        let task = task_id("CreateLoadBalancer", response.request_id.as_ref())?;
        let task_ids = self.wait_for_task(&task).await?;

        response
            .load_balancer_ids
            .unwrap_or_default()
            .into_iter()
            .chain(task_ids)
            .next()
            .ok_or_else(|| ProviderError::BusinessFailure {
                action: "CreateLoadBalancer".to_string(),
                detail: "no LoadBalancerIds returned".to_string(),
            })
    }

    /// Every load balancer matching `query`.
    ///
    /// `name` is matched fuzzily by the API.
    pub async fn describe_load_balancers(
        &self,
        query: &LoadBalancerQuery,
    ) -> ProviderResult<Vec<LoadBalancer>> {
        let api = self.api();
        let timeout = self.ctx.read_timeout();
        paginate(DEFAULT_PAGE_LIMIT, |offset, limit| async move {
            let request = DescribeLoadBalancersRequest {
                load_balancer_ids: query.id.clone().map(|id| vec![id]),
                load_balancer_type: query.network_type.clone(),
                load_balancer_name: query.name.clone(),
                project_id: query.project_id,
                offset,
                limit,
            };
            let response = retry_call(timeout, &[], || api.describe_load_balancers(&request)).await?;
            Ok(Page::new(
                response.load_balancer_set.unwrap_or_default(),
                response.total_count,
            ))
        })
        .await
    }

    pub async fn describe_load_balancer(&self, id: &str) -> ProviderResult<Option<LoadBalancer>> {
        let query = LoadBalancerQuery {
            id: Some(id.to_string()),
            ..Default::default()
        };
        let found = self.describe_load_balancers(&query).await?;
        Ok(found
            .into_iter()
            .find(|lb| lb.load_balancer_id.as_deref() == Some(id)))
    }

    pub async fn modify_load_balancer_name(&self, id: &str, name: &str) -> ProviderResult<()> {
        let api = self.api();
        let request = ModifyLoadBalancerAttributesRequest {
            load_balancer_id: id.to_string(),
            load_balancer_name: name.to_string(),
        };
        let _lock = self.ctx.lock_clb().await;
        let response = retry_call(self.ctx.write_timeout(), &[], || {
            api.modify_load_balancer_attributes(&request)
        })
        .await?;
        self.wait_for_task(&task_id("ModifyLoadBalancerAttributes", response.request_id.as_ref())?)
            .await?;
        Ok(())
    }

    /// Replace the security groups bound to a load balancer. Synchronous.
    pub async fn set_security_groups(&self, id: &str, groups: &[String]) -> ProviderResult<()> {
        let api = self.api();
        let request = SetLoadBalancerSecurityGroupsRequest {
            load_balancer_id: id.to_string(),
            security_groups: groups.to_vec(),
        };
        let _lock = self.ctx.lock_clb().await;
        retry_call(self.ctx.write_timeout(), &[], || {
            api.set_load_balancer_security_groups(&request)
        })
        .await?;
        Ok(())
    }

    /// Delete a load balancer; an unknown id counts as success.
    pub async fn delete_load_balancer(&self, id: &str) -> ProviderResult<()> {
        let api = self.api();
        let request = DeleteLoadBalancerRequest {
            load_balancer_ids: vec![id.to_string()],
        };
        let _lock = self.ctx.lock_clb().await;
        let response = retry_lookup(
            self.ctx.write_timeout(),
            &[LB_NOT_FOUND],
            &[RESOURCE_IN_OPERATING],
            || api.delete_load_balancer(&request),
        )
        .await?;
        if let Some(response) = response {
            self.wait_for_task(&task_id("DeleteLoadBalancer", response.request_id.as_ref())?)
                .await?;
        }
        Ok(())
    }

    // ============ Listeners ============

    /// Create one listener and return its id.
    pub async fn create_listener(&self, request: &CreateListenerRequest) -> ProviderResult<String> {
        let api = self.api();
        let _lock = self.ctx.lock_clb().await;
        let response = retry_call(self.ctx.write_timeout(), &[RESOURCE_IN_OPERATING], || {
            api.create_listener(request)
        })
        .await?;
        let task = task_id("CreateListener", response.request_id.as_ref())?;
        self.wait_for_task(&task).await?;
        response
            .listener_ids
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::BusinessFailure {
                action: "CreateListener".to_string(),
                detail: "no ListenerIds returned".to_string(),
            })
    }

    /// The listener, or `None` when it or its load balancer is gone.
    pub async fn describe_listener(
        &self,
        clb_id: &str,
        listener_id: &str,
    ) -> ProviderResult<Option<Listener>> {
        let api = self.api();
        let request = DescribeListenersRequest {
            load_balancer_id: clb_id.to_string(),
            listener_ids: Some(vec![listener_id.to_string()]),
            ..Default::default()
        };
        let response = retry_lookup(
            self.ctx.read_timeout(),
            &[LB_NOT_FOUND, LISTENER_NOT_FOUND],
            &[],
            || api.describe_listeners(&request),
        )
        .await?;
        Ok(response
            .and_then(|r| r.listeners)
            .unwrap_or_default()
            .into_iter()
            .find(|l| l.listener_id.as_deref() == Some(listener_id)))
    }

    pub async fn modify_listener(&self, request: &ModifyListenerRequest) -> ProviderResult<()> {
        let api = self.api();
        let _lock = self.ctx.lock_clb().await;
        let response = retry_call(self.ctx.write_timeout(), &[RESOURCE_IN_OPERATING], || {
            api.modify_listener(request)
        })
        .await?;
        self.wait_for_task(&task_id("ModifyListener", response.request_id.as_ref())?).await?;
        Ok(())
    }

    /// Delete a listener; one already gone counts as success.
    pub async fn delete_listener(&self, clb_id: &str, listener_id: &str) -> ProviderResult<()> {
        let api = self.api();
        let request = DeleteListenerRequest {
            load_balancer_id: clb_id.to_string(),
            listener_id: listener_id.to_string(),
        };
        let _lock = self.ctx.lock_clb().await;
        let response = retry_lookup(
            self.ctx.write_timeout(),
            &[LB_NOT_FOUND, LISTENER_NOT_FOUND],
            &[RESOURCE_IN_OPERATING],
            || api.delete_listener(&request),
        )
        .await?;
        if let Some(response) = response {
            self.wait_for_task(&task_id("DeleteListener", response.request_id.as_ref())?).await?;
        }
        Ok(())
    }

    // ============ Targets ============

    /// Targets bound to a listener, or to one of its rules when `location_id` is set.
    pub async fn describe_targets(
        &self,
        clb_id: &str,
        listener_id: &str,
        location_id: Option<&str>,
    ) -> ProviderResult<Vec<Backend>> {
        let api = self.api();
        let request = DescribeTargetsRequest {
            load_balancer_id: clb_id.to_string(),
            listener_ids: Some(vec![listener_id.to_string()]),
        };
        let response = retry_lookup(
            self.ctx.read_timeout(),
            &[LB_NOT_FOUND, LISTENER_NOT_FOUND],
            &[],
            || api.describe_targets(&request),
        )
        .await?;

        let listener = response
            .and_then(|r| r.listeners)
            .unwrap_or_default()
            .into_iter()
            .find(|l| l.listener_id.as_deref() == Some(listener_id));
        let Some(listener) = listener else {
            return Ok(Vec::new());
        };
        let targets = match location_id {
            Some(location) => listener
                .rules
                .unwrap_or_default()
                .into_iter()
                .find(|r| r.location_id.as_deref() == Some(location))
                .and_then(|r| r.targets),
            None => listener.targets,
        };
        Ok(targets.unwrap_or_default())
    }

    pub async fn register_targets(
        &self,
        clb_id: &str,
        listener_id: &str,
        location_id: Option<&str>,
        targets: &[Target],
    ) -> ProviderResult<()> {
        if targets.is_empty() {
            return Ok(());
        }
        let api = self.api();
        let request = RegisterTargetsRequest {
            load_balancer_id: clb_id.to_string(),
            listener_id: listener_id.to_string(),
            targets: targets.to_vec(),
            location_id: location_id.map(str::to_string),
        };
        let _lock = self.ctx.lock_clb().await;
        let response = retry_call(self.ctx.write_timeout(), &[RESOURCE_IN_OPERATING], || {
            api.register_targets(&request)
        })
        .await?;
        self.wait_for_task(&task_id("RegisterTargets", response.request_id.as_ref())?).await?;
        Ok(())
    }

    /// Unbind targets; a listener that is already gone counts as success.
    pub async fn deregister_targets(
        &self,
        clb_id: &str,
        listener_id: &str,
        location_id: Option<&str>,
        targets: &[Target],
    ) -> ProviderResult<()> {
        if targets.is_empty() {
            return Ok(());
        }
        let api = self.api();
        let request = RegisterTargetsRequest {
            load_balancer_id: clb_id.to_string(),
            listener_id: listener_id.to_string(),
            targets: targets.to_vec(),
            location_id: location_id.map(str::to_string),
        };
        let _lock = self.ctx.lock_clb().await;
        let response = retry_lookup(
            self.ctx.write_timeout(),
            &[LB_NOT_FOUND, LISTENER_NOT_FOUND],
            &[RESOURCE_IN_OPERATING],
            || api.deregister_targets(&request),
        )
        .await?;
        if let Some(response) = response {
            self.wait_for_task(&task_id("DeregisterTargets", response.request_id.as_ref())?)
                .await?;
        }
        Ok(())
    }
}
