//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their utoipa specifications,
//! collected into a unified OpenAPI document. Swagger UI serves interactive
//! documentation at `/api/docs` and the raw document at
//! `/api/docs/openapi.json`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger
/// UI documentation.
///
/// # Returns
/// An Axum `Router<AppState>` configured with all routes, ready to have
/// state and the session layer applied.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Launchpad", description = "Launchpad API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Authentication routes"),
        (name = controller::user::USER_TAG, description = "User management routes"),
        (name = controller::project::PROJECT_TAG, description = "Project routes"),
        (name = controller::workstream::WORKSTREAM_TAG, description = "Workstream routes"),
        (name = controller::task::TASK_TAG, description = "Task routes"),
        (name = controller::milestone::MILESTONE_TAG, description = "Milestone routes"),
        (name = controller::risk::RISK_TAG, description = "Risk routes"),
        (name = controller::hardware::HARDWARE_TAG, description = "Hardware evaluation routes"),
        (name = controller::legal::LEGAL_TAG, description = "Legal document routes"),
        (name = controller::pricing::PRICING_TAG, description = "Pricing plan routes"),
        (name = controller::reward::REWARD_TAG, description = "Staff reward rule routes"),
        (name = controller::runbook::RUNBOOK_TAG, description = "Operational runbook routes"),
        (name = controller::content::CONTENT_TAG, description = "Marketing content routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::current_user))
        .routes(routes!(controller::user::list_users))
        .routes(routes!(controller::user::create_user))
        .routes(routes!(controller::user::update_user))
        .routes(routes!(controller::user::delete_user))
        .routes(routes!(controller::user::update_profile))
        .routes(routes!(controller::user::change_password))
        .routes(routes!(controller::project::list_projects))
        .routes(routes!(controller::project::create_project))
        .routes(routes!(controller::project::get_project))
        .routes(routes!(controller::project::update_project))
        .routes(routes!(controller::project::delete_project))
        .routes(routes!(controller::workstream::list_workstreams))
        .routes(routes!(controller::workstream::create_workstream))
        .routes(routes!(controller::workstream::get_workstream))
        .routes(routes!(controller::workstream::update_workstream))
        .routes(routes!(controller::workstream::delete_workstream))
        .routes(routes!(controller::task::list_tasks))
        .routes(routes!(controller::task::create_task))
        .routes(routes!(controller::task::get_task))
        .routes(routes!(controller::task::update_task))
        .routes(routes!(controller::task::update_task_status))
        .routes(routes!(controller::task::delete_task))
        .routes(routes!(controller::task::add_task_checklist_item))
        .routes(routes!(controller::task::update_task_checklist_item))
        .routes(routes!(controller::task::delete_task_checklist_item))
        .routes(routes!(controller::task::add_task_comment))
        .routes(routes!(controller::task::add_task_attachment))
        .routes(routes!(controller::milestone::list_milestones))
        .routes(routes!(controller::milestone::create_milestone))
        .routes(routes!(controller::milestone::get_milestone))
        .routes(routes!(controller::milestone::update_milestone))
        .routes(routes!(controller::milestone::toggle_milestone_complete))
        .routes(routes!(controller::milestone::delete_milestone))
        .routes(routes!(controller::milestone::add_milestone_dependency))
        .routes(routes!(controller::milestone::remove_milestone_dependency))
        .routes(routes!(controller::milestone::add_milestone_checklist_item))
        .routes(routes!(controller::milestone::update_milestone_checklist_item))
        .routes(routes!(controller::milestone::delete_milestone_checklist_item))
        .routes(routes!(controller::risk::list_risks))
        .routes(routes!(controller::risk::create_risk))
        .routes(routes!(controller::risk::risk_matrix))
        .routes(routes!(controller::risk::get_risk))
        .routes(routes!(controller::risk::update_risk))
        .routes(routes!(controller::risk::update_risk_status))
        .routes(routes!(controller::risk::delete_risk))
        .routes(routes!(controller::hardware::list_hardware))
        .routes(routes!(controller::hardware::create_hardware))
        .routes(routes!(controller::hardware::get_hardware))
        .routes(routes!(controller::hardware::update_hardware))
        .routes(routes!(controller::hardware::set_hardware_recommendation))
        .routes(routes!(controller::hardware::delete_hardware))
        .routes(routes!(controller::hardware::list_accessories))
        .routes(routes!(controller::hardware::create_accessory))
        .routes(routes!(controller::hardware::update_accessory))
        .routes(routes!(controller::hardware::delete_accessory))
        .routes(routes!(controller::hardware::list_bundles))
        .routes(routes!(controller::hardware::create_bundle))
        .routes(routes!(controller::hardware::update_bundle))
        .routes(routes!(controller::hardware::delete_bundle))
        .routes(routes!(controller::legal::list_legal_docs))
        .routes(routes!(controller::legal::create_legal_doc))
        .routes(routes!(controller::legal::get_legal_doc))
        .routes(routes!(controller::legal::update_legal_doc))
        .routes(routes!(controller::legal::update_legal_status))
        .routes(routes!(controller::legal::delete_legal_doc))
        .routes(routes!(controller::pricing::list_pricing_plans))
        .routes(routes!(controller::pricing::create_pricing_plan))
        .routes(routes!(controller::pricing::get_pricing_plan))
        .routes(routes!(controller::pricing::update_pricing_plan))
        .routes(routes!(controller::pricing::set_pricing_plan_active))
        .routes(routes!(controller::pricing::delete_pricing_plan))
        .routes(routes!(controller::reward::list_reward_rules))
        .routes(routes!(controller::reward::create_reward_rule))
        .routes(routes!(controller::reward::get_reward_rule))
        .routes(routes!(controller::reward::update_reward_rule))
        .routes(routes!(controller::reward::set_reward_rule_active))
        .routes(routes!(controller::reward::delete_reward_rule))
        .routes(routes!(controller::runbook::list_runbooks))
        .routes(routes!(controller::runbook::create_runbook))
        .routes(routes!(controller::runbook::get_runbook))
        .routes(routes!(controller::runbook::update_runbook))
        .routes(routes!(controller::runbook::set_runbook_active))
        .routes(routes!(controller::runbook::delete_runbook))
        .routes(routes!(controller::content::list_content_items))
        .routes(routes!(controller::content::create_content_item))
        .routes(routes!(controller::content::get_content_item))
        .routes(routes!(controller::content::delete_content_item))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
