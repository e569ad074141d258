use axum::extract::{Extension, Json};

use crate::api::{DynAPI, RouteAPI};
use crate::entities::{Plan, RouteRequest};
use crate::error::Error;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<RouteRequest>,
) -> Result<Json<Plan>, Error> {
    let plan = api.plan_route(params).await?;

    Ok(plan.into())
}
