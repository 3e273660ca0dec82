//! API Router with Swagger UI

use std::sync::Arc;

use axum::{extract::FromRef, middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{BranchService, EmployeeService, VehicleService};
use crate::domain::RepositoryProvider;
use crate::shared::pagination::{Links, PageMeta, PagedResponse, Resource};
use crate::shared::{ErrorPayload, FieldIssue};

use super::common::ResponseContext;
use super::modules::branches::{self, BranchHandlerState};
use super::modules::employees::{self, EmployeeHandlerState};
use super::modules::health::{self, HealthState};
use super::modules::request_id::request_id_middleware;
use super::modules::vehicles::{self, VehicleHandlerState};

/// Unified state for every route. Handlers pick their own slice via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub branches: Arc<BranchService>,
    pub employees: Arc<EmployeeService>,
    pub vehicles: Arc<VehicleService>,
    pub context: ResponseContext,
    pub health: HealthState,
}

impl ApiState {
    pub fn new(repos: Arc<dyn RepositoryProvider>, context: ResponseContext, health: HealthState) -> Self {
        Self {
            branches: Arc::new(BranchService::new(repos.clone())),
            employees: Arc::new(EmployeeService::new(repos.clone())),
            vehicles: Arc::new(VehicleService::new(repos)),
            context,
            health,
        }
    }
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<ApiState> for BranchHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        BranchHandlerState {
            service: Arc::clone(&s.branches),
            context: s.context.clone(),
        }
    }
}

impl FromRef<ApiState> for EmployeeHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        EmployeeHandlerState {
            service: Arc::clone(&s.employees),
            context: s.context.clone(),
        }
    }
}

impl FromRef<ApiState> for VehicleHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        VehicleHandlerState {
            service: Arc::clone(&s.vehicles),
            context: s.context.clone(),
        }
    }
}

impl FromRef<ApiState> for HealthState {
    fn from_ref(s: &ApiState) -> Self {
        s.health.clone()
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Branches
        branches::list_branches,
        branches::get_branch,
        branches::get_branch_details,
        branches::get_branch_stats,
        branches::list_branches_by_city,
        branches::list_branches_by_state,
        branches::create_branch,
        branches::update_branch,
        branches::delete_branch,
        // Employees
        employees::list_employees,
        employees::list_employees_by_branch,
        employees::get_employee,
        employees::get_employee_by_email,
        employees::create_employee,
        employees::update_employee,
        employees::delete_employee,
        // Vehicles
        vehicles::list_vehicles,
        vehicles::list_vehicles_by_branch,
        vehicles::list_vehicles_by_brand,
        vehicles::list_vehicles_by_year,
        vehicles::list_vehicles_by_mileage,
        vehicles::get_vehicle,
        vehicles::get_vehicle_by_plate,
        vehicles::create_vehicle,
        vehicles::update_vehicle,
        vehicles::delete_vehicle,
    ),
    components(
        schemas(
            // Common
            ErrorPayload,
            FieldIssue,
            PageMeta,
            Links,
            // Branches
            branches::BranchDto,
            branches::BranchSummaryDto,
            branches::BranchStatsDto,
            branches::BranchDetailsDto,
            branches::BranchRequest,
            PagedResponse<Resource<branches::BranchDto>>,
            // Employees
            employees::EmployeeDto,
            employees::EmployeeRequest,
            PagedResponse<Resource<employees::EmployeeDto>>,
            // Vehicles
            vehicles::VehicleDto,
            vehicles::VehicleRequest,
            PagedResponse<Resource<vehicles::VehicleDto>>,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Branches", description = "Branch CRUD, lookups by city and state, details and statistics"),
        (name = "Employees", description = "Employee CRUD and lookups by branch and email"),
        (name = "Vehicles", description = "Vehicle CRUD and lookups by branch, plate, brand, year and mileage"),
    ),
    info(
        title = "Fleet Service API",
        version = "1.0.0",
        description = "REST API for branches, employees and vehicles with paginated, hypermedia-linked listings",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: ApiState) -> Router {
    let branch_routes = Router::new()
        .route("/", get(branches::list_branches).post(branches::create_branch))
        .route(
            "/{id}",
            get(branches::get_branch)
                .put(branches::update_branch)
                .delete(branches::delete_branch),
        )
        .route("/{id}/details", get(branches::get_branch_details))
        .route("/{id}/stats", get(branches::get_branch_stats))
        .route("/city/{city}", get(branches::list_branches_by_city))
        .route("/state/{state}", get(branches::list_branches_by_state));

    let employee_routes = Router::new()
        .route("/", get(employees::list_employees).post(employees::create_employee))
        .route(
            "/{id}",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
        .route("/branch/{branch_id}", get(employees::list_employees_by_branch))
        .route("/email/{email}", get(employees::get_employee_by_email));

    let vehicle_routes = Router::new()
        .route("/", get(vehicles::list_vehicles).post(vehicles::create_vehicle))
        .route(
            "/{id}",
            get(vehicles::get_vehicle)
                .put(vehicles::update_vehicle)
                .delete(vehicles::delete_vehicle),
        )
        .route("/branch/{branch_id}", get(vehicles::list_vehicles_by_branch))
        .route("/plate/{plate}", get(vehicles::get_vehicle_by_plate))
        .route("/brand/{brand}", get(vehicles::list_vehicles_by_brand))
        .route("/year/{year}", get(vehicles::list_vehicles_by_year))
        .route("/mileage", get(vehicles::list_vehicles_by_mileage));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1/branches", branch_routes)
        .nest("/api/v1/employees", employee_routes)
        .nest("/api/v1/vehicles", vehicle_routes)
        .with_state(state)
        // Swagger UI
        .merge(swagger_routes)
        // Middleware
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
