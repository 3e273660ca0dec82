//! Vehicle handlers

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    Json,
};

use super::dto::{MileageParams, VehicleDto, VehicleRequest};
use crate::application::VehicleService;
use crate::domain::{MileageRange, Vehicle};
use crate::interfaces::http::common::{ApiError, ApiPath, ResponseContext, ValidatedJson, ValidatedQuery};
use crate::shared::pagination::{
    LinkError, Links, PageRequest, PageResult, PagedResponse, PaginationParams, Resource,
};
use crate::shared::ErrorPayload;

#[derive(Clone)]
pub struct VehicleHandlerState {
    pub service: Arc<VehicleService>,
    pub context: ResponseContext,
}

type VehiclePage = Json<PagedResponse<Resource<VehicleDto>>>;

pub fn vehicle_links(ctx: &ResponseContext, vehicle: &VehicleDto) -> Result<Links, LinkError> {
    let this = ctx.api_url(&["vehicles", &vehicle.id.to_string()])?;
    Ok(Links::new()
        .with("self", this.clone())
        .with("update", this.clone())
        .with("delete", this)
        .with("branch", ctx.api_url(&["branches", &vehicle.branch_id.to_string()])?))
}

fn resource(ctx: &ResponseContext, dto: VehicleDto) -> Result<Json<Resource<VehicleDto>>, ApiError> {
    let links = vehicle_links(ctx, &dto)?;
    Ok(Json(Resource::new(dto, links)))
}

fn page_body(
    ctx: &ResponseContext,
    page: PageResult<Vehicle>,
    request: &PageRequest,
    base_url: &str,
) -> Result<VehiclePage, ApiError> {
    let body = ctx.paged(page, request, base_url, VehicleDto::from, |v| vehicle_links(ctx, v))?;
    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of vehicles", body = PagedResponse<Resource<VehicleDto>>),
        (status = 400, description = "Invalid pagination parameters", body = ErrorPayload)
    )
)]
pub async fn list_vehicles(
    State(state): State<VehicleHandlerState>,
    OriginalUri(uri): OriginalUri,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> Result<VehiclePage, ApiError> {
    let ctx = &state.context;
    let request = ctx.page_request(&params)?;
    let page = state.service.list(&request).await?;
    page_body(ctx, page, &request, &ctx.absolute(uri.path()))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/branch/{branch_id}",
    tag = "Vehicles",
    params(
        ("branch_id" = i32, Path, description = "Branch id"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Page of the branch's vehicles", body = PagedResponse<Resource<VehicleDto>>),
        (status = 404, description = "Branch not found", body = ErrorPayload)
    )
)]
pub async fn list_vehicles_by_branch(
    State(state): State<VehicleHandlerState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(branch_id): ApiPath<i32>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> Result<VehiclePage, ApiError> {
    let ctx = &state.context;
    let request = ctx.page_request(&params)?;
    let page = state.service.list_by_branch(branch_id, &request).await?;
    page_body(ctx, page, &request, &ctx.absolute(uri.path()))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/brand/{brand}",
    tag = "Vehicles",
    params(
        ("brand" = String, Path, description = "Brand, matched case-insensitively"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Page of vehicles of the brand", body = PagedResponse<Resource<VehicleDto>>),
        (status = 400, description = "Invalid parameters", body = ErrorPayload)
    )
)]
pub async fn list_vehicles_by_brand(
    State(state): State<VehicleHandlerState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(brand): ApiPath<String>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> Result<VehiclePage, ApiError> {
    let ctx = &state.context;
    let request = ctx.page_request(&params)?;
    let page = state.service.list_by_brand(&brand, &request).await?;
    page_body(ctx, page, &request, &ctx.absolute(uri.path()))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/year/{year}",
    tag = "Vehicles",
    params(
        ("year" = i32, Path, description = "Model year"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Page of vehicles of the year", body = PagedResponse<Resource<VehicleDto>>),
        (status = 400, description = "Invalid parameters", body = ErrorPayload)
    )
)]
pub async fn list_vehicles_by_year(
    State(state): State<VehicleHandlerState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(year): ApiPath<i32>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> Result<VehiclePage, ApiError> {
    let ctx = &state.context;
    let request = ctx.page_request(&params)?;
    let page = state.service.list_by_year(year, &request).await?;
    page_body(ctx, page, &request, &ctx.absolute(uri.path()))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/mileage",
    tag = "Vehicles",
    params(MileageParams, PaginationParams),
    responses(
        (status = 200, description = "Page of vehicles within the mileage range", body = PagedResponse<Resource<VehicleDto>>),
        (status = 400, description = "Invalid range or pagination parameters", body = ErrorPayload)
    )
)]
pub async fn list_vehicles_by_mileage(
    State(state): State<VehicleHandlerState>,
    OriginalUri(uri): OriginalUri,
    ValidatedQuery(range): ValidatedQuery<MileageParams>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> Result<VehiclePage, ApiError> {
    let ctx = &state.context;
    let request = ctx.page_request(&params)?;
    let mileage = MileageRange::new(range.min, range.max)?;
    let page = state.service.list_by_mileage(mileage, &request).await?;

    // the range is part of the resource, so navigation links must keep it
    let base_url = format!(
        "{}?min={}&max={}",
        ctx.absolute(uri.path()),
        mileage.min(),
        mileage.max()
    );
    page_body(ctx, page, &request, &base_url)
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = i32, Path, description = "Vehicle id")),
    responses(
        (status = 200, description = "Vehicle", body = Resource<VehicleDto>),
        (status = 404, description = "Vehicle not found", body = ErrorPayload)
    )
)]
pub async fn get_vehicle(
    State(state): State<VehicleHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Resource<VehicleDto>>, ApiError> {
    let vehicle = state.service.get(id).await?;
    resource(&state.context, vehicle.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/plate/{plate}",
    tag = "Vehicles",
    params(("plate" = String, Path, description = "Plate, matched case-insensitively")),
    responses(
        (status = 200, description = "Vehicle", body = Resource<VehicleDto>),
        (status = 404, description = "Vehicle not found", body = ErrorPayload)
    )
)]
pub async fn get_vehicle_by_plate(
    State(state): State<VehicleHandlerState>,
    ApiPath(plate): ApiPath<String>,
) -> Result<Json<Resource<VehicleDto>>, ApiError> {
    let vehicle = state.service.get_by_plate(&plate).await?;
    resource(&state.context, vehicle.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    request_body = VehicleRequest,
    responses(
        (status = 201, description = "Created", body = Resource<VehicleDto>),
        (status = 400, description = "Validation error or unknown branch", body = ErrorPayload),
        (status = 409, description = "Plate already registered", body = ErrorPayload)
    )
)]
pub async fn create_vehicle(
    State(state): State<VehicleHandlerState>,
    ValidatedJson(request): ValidatedJson<VehicleRequest>,
) -> Result<(StatusCode, Json<Resource<VehicleDto>>), ApiError> {
    let vehicle = state.service.create(request.into()).await?;
    Ok((StatusCode::CREATED, resource(&state.context, vehicle.into())?))
}

#[utoipa::path(
    put,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = i32, Path, description = "Vehicle id")),
    request_body = VehicleRequest,
    responses(
        (status = 200, description = "Updated", body = Resource<VehicleDto>),
        (status = 400, description = "Validation error or unknown branch", body = ErrorPayload),
        (status = 404, description = "Vehicle not found", body = ErrorPayload),
        (status = 409, description = "Plate already registered", body = ErrorPayload)
    )
)]
pub async fn update_vehicle(
    State(state): State<VehicleHandlerState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<VehicleRequest>,
) -> Result<Json<Resource<VehicleDto>>, ApiError> {
    let vehicle = state.service.update(id, request.into()).await?;
    resource(&state.context, vehicle.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = i32, Path, description = "Vehicle id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Vehicle not found", body = ErrorPayload)
    )
)]
pub async fn delete_vehicle(
    State(state): State<VehicleHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
