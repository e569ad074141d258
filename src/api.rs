use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{Plan, RouteRequest};
use crate::error::Error;

#[async_trait]
pub trait RouteAPI {
    async fn plan_route(&self, request: RouteRequest) -> Result<Plan, Error>;
}

pub trait API: RouteAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
