//! Typed per-service API accessors
//!
//! Each service module declares its endpoint, its request/response models, and a
//! thin accessor struct whose methods map one-to-one onto API actions.

/// Declare a service accessor on [`TencentCloudClient`](crate::TencentCloudClient).
///
/// Accessors are `Copy` handles; their methods take `self` so the returned futures
/// borrow only the client.
///
/// ```ignore
/// service_client! {
///     /// docs
///     Clb, clb, ENDPOINT, {
///         describe_task_status(DescribeTaskStatusRequest) -> DescribeTaskStatusResponse = "DescribeTaskStatus";
///     }
/// }
/// ```
macro_rules! service_client {
    (
        $(#[$meta:meta])*
        $name:ident, $accessor:ident, $endpoint:expr, {
            $(
                $(#[$fmeta:meta])*
                $method:ident($req:ty) -> $resp:ty = $action:literal;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        pub struct $name<'a> {
            client: &'a $crate::client::TencentCloudClient,
        }

        impl $crate::client::TencentCloudClient {
            pub fn $accessor(&self) -> $name<'_> {
                $name { client: self }
            }
        }

        impl $name<'_> {
            $(
                $(#[$fmeta])*
                pub async fn $method(self, request: &$req) -> $crate::error::Result<$resp> {
                    self.client.call(&$endpoint, $action, request).await
                }
            )*
        }
    };
}

pub mod apigateway;
pub mod audit;
pub mod clb;
pub mod mps;
pub mod privatedns;
pub mod sms;
pub mod vpc;
