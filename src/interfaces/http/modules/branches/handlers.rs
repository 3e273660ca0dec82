//! Branch handlers

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    Json,
};

use super::dto::{BranchDetailsDto, BranchDto, BranchRequest, BranchStatsDto};
use crate::application::BranchService;
use crate::interfaces::http::common::{ApiError, ApiPath, ResponseContext, ValidatedJson, ValidatedQuery};
use crate::shared::pagination::{LinkError, Links, PagedResponse, PaginationParams, Resource};
use crate::shared::ErrorPayload;

/// Branch handler state
#[derive(Clone)]
pub struct BranchHandlerState {
    pub service: Arc<BranchService>,
    pub context: ResponseContext,
}

type BranchPage = Json<PagedResponse<Resource<BranchDto>>>;

/// Links attached to every branch representation.
pub fn branch_links(ctx: &ResponseContext, id: i32) -> Result<Links, LinkError> {
    let id = id.to_string();
    let this = ctx.api_url(&["branches", &id])?;
    Ok(Links::new()
        .with("self", this.clone())
        .with("update", this.clone())
        .with("delete", this)
        .with("details", ctx.api_url(&["branches", &id, "details"])?)
        .with("stats", ctx.api_url(&["branches", &id, "stats"])?)
        .with("employees", ctx.api_url(&["employees", "branch", &id])?)
        .with("vehicles", ctx.api_url(&["vehicles", "branch", &id])?))
}

fn resource(ctx: &ResponseContext, dto: BranchDto) -> Result<Json<Resource<BranchDto>>, ApiError> {
    let links = branch_links(ctx, dto.id)?;
    Ok(Json(Resource::new(dto, links)))
}

#[utoipa::path(
    get,
    path = "/api/v1/branches",
    tag = "Branches",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of branches", body = PagedResponse<Resource<BranchDto>>),
        (status = 400, description = "Invalid pagination parameters", body = ErrorPayload)
    )
)]
pub async fn list_branches(
    State(state): State<BranchHandlerState>,
    OriginalUri(uri): OriginalUri,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> Result<BranchPage, ApiError> {
    let ctx = &state.context;
    let request = ctx.page_request(&params)?;
    let page = state.service.list(&request).await?;
    let body = ctx.paged(page, &request, &ctx.absolute(uri.path()), BranchDto::from, |b| {
        branch_links(ctx, b.id)
    })?;
    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/api/v1/branches/{id}",
    tag = "Branches",
    params(("id" = i32, Path, description = "Branch id")),
    responses(
        (status = 200, description = "Branch", body = Resource<BranchDto>),
        (status = 404, description = "Branch not found", body = ErrorPayload)
    )
)]
pub async fn get_branch(
    State(state): State<BranchHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Resource<BranchDto>>, ApiError> {
    let branch = state.service.get(id).await?;
    resource(&state.context, branch.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/branches/{id}/details",
    tag = "Branches",
    params(("id" = i32, Path, description = "Branch id")),
    responses(
        (status = 200, description = "Branch with its employees and vehicles", body = Resource<BranchDetailsDto>),
        (status = 404, description = "Branch not found", body = ErrorPayload)
    )
)]
pub async fn get_branch_details(
    State(state): State<BranchHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Resource<BranchDetailsDto>>, ApiError> {
    let details = state.service.details(id).await?;
    let links = branch_links(&state.context, id)?;
    Ok(Json(Resource::new(details.into(), links)))
}

#[utoipa::path(
    get,
    path = "/api/v1/branches/{id}/stats",
    tag = "Branches",
    params(("id" = i32, Path, description = "Branch id")),
    responses(
        (status = 200, description = "Employee and vehicle counts", body = BranchStatsDto),
        (status = 404, description = "Branch not found", body = ErrorPayload)
    )
)]
pub async fn get_branch_stats(
    State(state): State<BranchHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<BranchStatsDto>, ApiError> {
    let stats = state.service.stats(id).await?;
    Ok(Json(stats.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/branches/city/{city}",
    tag = "Branches",
    params(
        ("city" = String, Path, description = "City, matched case-insensitively"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Page of branches in the city", body = PagedResponse<Resource<BranchDto>>),
        (status = 400, description = "Invalid parameters", body = ErrorPayload)
    )
)]
pub async fn list_branches_by_city(
    State(state): State<BranchHandlerState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(city): ApiPath<String>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> Result<BranchPage, ApiError> {
    let ctx = &state.context;
    let request = ctx.page_request(&params)?;
    let page = state.service.list_by_city(&city, &request).await?;
    let body = ctx.paged(page, &request, &ctx.absolute(uri.path()), BranchDto::from, |b| {
        branch_links(ctx, b.id)
    })?;
    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/api/v1/branches/state/{state}",
    tag = "Branches",
    params(
        ("state" = String, Path, description = "Two-letter state code"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Page of branches in the state", body = PagedResponse<Resource<BranchDto>>),
        (status = 400, description = "Invalid state or pagination parameters", body = ErrorPayload)
    )
)]
pub async fn list_branches_by_state(
    State(state): State<BranchHandlerState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(code): ApiPath<String>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> Result<BranchPage, ApiError> {
    let ctx = &state.context;
    let request = ctx.page_request(&params)?;
    let page = state.service.list_by_state(&code, &request).await?;
    let body = ctx.paged(page, &request, &ctx.absolute(uri.path()), BranchDto::from, |b| {
        branch_links(ctx, b.id)
    })?;
    Ok(Json(body))
}

#[utoipa::path(
    post,
    path = "/api/v1/branches",
    tag = "Branches",
    request_body = BranchRequest,
    responses(
        (status = 201, description = "Created", body = Resource<BranchDto>),
        (status = 400, description = "Validation error", body = ErrorPayload)
    )
)]
pub async fn create_branch(
    State(state): State<BranchHandlerState>,
    ValidatedJson(request): ValidatedJson<BranchRequest>,
) -> Result<(StatusCode, Json<Resource<BranchDto>>), ApiError> {
    let branch = state.service.create(request.into()).await?;
    Ok((StatusCode::CREATED, resource(&state.context, branch.into())?))
}

#[utoipa::path(
    put,
    path = "/api/v1/branches/{id}",
    tag = "Branches",
    params(("id" = i32, Path, description = "Branch id")),
    request_body = BranchRequest,
    responses(
        (status = 200, description = "Updated", body = Resource<BranchDto>),
        (status = 400, description = "Validation error", body = ErrorPayload),
        (status = 404, description = "Branch not found", body = ErrorPayload)
    )
)]
pub async fn update_branch(
    State(state): State<BranchHandlerState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<BranchRequest>,
) -> Result<Json<Resource<BranchDto>>, ApiError> {
    let branch = state.service.update(id, request.into()).await?;
    resource(&state.context, branch.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/branches/{id}",
    tag = "Branches",
    params(("id" = i32, Path, description = "Branch id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Branch not found", body = ErrorPayload),
        (status = 409, description = "Branch still has employees or vehicles", body = ErrorPayload)
    )
)]
pub async fn delete_branch(
    State(state): State<BranchHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
