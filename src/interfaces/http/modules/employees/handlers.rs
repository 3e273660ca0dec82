//! Employee handlers

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    Json,
};

use super::dto::{EmployeeDto, EmployeeRequest};
use crate::application::EmployeeService;
use crate::interfaces::http::common::{ApiError, ApiPath, ResponseContext, ValidatedJson, ValidatedQuery};
use crate::shared::pagination::{LinkError, Links, PagedResponse, PaginationParams, Resource};
use crate::shared::ErrorPayload;

#[derive(Clone)]
pub struct EmployeeHandlerState {
    pub service: Arc<EmployeeService>,
    pub context: ResponseContext,
}

type EmployeePage = Json<PagedResponse<Resource<EmployeeDto>>>;

pub fn employee_links(ctx: &ResponseContext, employee: &EmployeeDto) -> Result<Links, LinkError> {
    let this = ctx.api_url(&["employees", &employee.id.to_string()])?;
    Ok(Links::new()
        .with("self", this.clone())
        .with("update", this.clone())
        .with("delete", this)
        .with("branch", ctx.api_url(&["branches", &employee.branch_id.to_string()])?))
}

fn resource(ctx: &ResponseContext, dto: EmployeeDto) -> Result<Json<Resource<EmployeeDto>>, ApiError> {
    let links = employee_links(ctx, &dto)?;
    Ok(Json(Resource::new(dto, links)))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees",
    tag = "Employees",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of employees", body = PagedResponse<Resource<EmployeeDto>>),
        (status = 400, description = "Invalid pagination parameters", body = ErrorPayload)
    )
)]
pub async fn list_employees(
    State(state): State<EmployeeHandlerState>,
    OriginalUri(uri): OriginalUri,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> Result<EmployeePage, ApiError> {
    let ctx = &state.context;
    let request = ctx.page_request(&params)?;
    let page = state.service.list(&request).await?;
    let body = ctx.paged(page, &request, &ctx.absolute(uri.path()), EmployeeDto::from, |e| {
        employee_links(ctx, e)
    })?;
    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/branch/{branch_id}",
    tag = "Employees",
    params(
        ("branch_id" = i32, Path, description = "Branch id"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Page of the branch's employees", body = PagedResponse<Resource<EmployeeDto>>),
        (status = 404, description = "Branch not found", body = ErrorPayload)
    )
)]
pub async fn list_employees_by_branch(
    State(state): State<EmployeeHandlerState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(branch_id): ApiPath<i32>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> Result<EmployeePage, ApiError> {
    let ctx = &state.context;
    let request = ctx.page_request(&params)?;
    let page = state.service.list_by_branch(branch_id, &request).await?;
    let body = ctx.paged(page, &request, &ctx.absolute(uri.path()), EmployeeDto::from, |e| {
        employee_links(ctx, e)
    })?;
    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee", body = Resource<EmployeeDto>),
        (status = 404, description = "Employee not found", body = ErrorPayload)
    )
)]
pub async fn get_employee(
    State(state): State<EmployeeHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Resource<EmployeeDto>>, ApiError> {
    let employee = state.service.get(id).await?;
    resource(&state.context, employee.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/email/{email}",
    tag = "Employees",
    params(("email" = String, Path, description = "Email, matched case-insensitively")),
    responses(
        (status = 200, description = "Employee", body = Resource<EmployeeDto>),
        (status = 404, description = "Employee not found", body = ErrorPayload)
    )
)]
pub async fn get_employee_by_email(
    State(state): State<EmployeeHandlerState>,
    ApiPath(email): ApiPath<String>,
) -> Result<Json<Resource<EmployeeDto>>, ApiError> {
    let employee = state.service.get_by_email(&email).await?;
    resource(&state.context, employee.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/employees",
    tag = "Employees",
    request_body = EmployeeRequest,
    responses(
        (status = 201, description = "Created", body = Resource<EmployeeDto>),
        (status = 400, description = "Validation error or unknown branch", body = ErrorPayload),
        (status = 409, description = "Email already in use", body = ErrorPayload)
    )
)]
pub async fn create_employee(
    State(state): State<EmployeeHandlerState>,
    ValidatedJson(request): ValidatedJson<EmployeeRequest>,
) -> Result<(StatusCode, Json<Resource<EmployeeDto>>), ApiError> {
    let employee = state.service.create(request.into()).await?;
    Ok((StatusCode::CREATED, resource(&state.context, employee.into())?))
}

#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee id")),
    request_body = EmployeeRequest,
    responses(
        (status = 200, description = "Updated", body = Resource<EmployeeDto>),
        (status = 400, description = "Validation error or unknown branch", body = ErrorPayload),
        (status = 404, description = "Employee not found", body = ErrorPayload),
        (status = 409, description = "Email already in use", body = ErrorPayload)
    )
)]
pub async fn update_employee(
    State(state): State<EmployeeHandlerState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<EmployeeRequest>,
) -> Result<Json<Resource<EmployeeDto>>, ApiError> {
    let employee = state.service.update(id, request.into()).await?;
    resource(&state.context, employee.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Employee not found", body = ErrorPayload)
    )
)]
pub async fn delete_employee(
    State(state): State<EmployeeHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
