//! OpenAPI document generation.
//!
//! Handler annotations produce paths relative to the API prefix; [`openapi_document`] prefixes
//! them with the configured value and fills in title, version, and description from
//! configuration. Swagger UI serves the result at `/docs`.

use utoipa::OpenApi;

use super::{health, items, schemas, users};
use crate::config::Config;

/// Static part of the OpenAPI document.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "BrowseMate API",
        contact(
            name = "BrowseMate API Support",
            url = "https://browsemate.dev/support",
            email = "support@browsemate.dev"
        ),
        license(name = "MIT License", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local Development Server"),
        (url = "https://api.browsemate.dev", description = "Production Server")
    ),
    paths(
        health::health_check,
        health::readiness_check,
        users::create_user,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        items::create_item,
        items::list_items,
        items::get_item,
        items::update_item,
        items::delete_item,
        items::archive_item,
    ),
    components(schemas(
        crate::users::User,
        crate::users::NewUser,
        crate::users::UserChanges,
        crate::items::Item,
        crate::items::ItemStatus,
        crate::items::NewItem,
        crate::items::ItemChanges,
        schemas::UserList,
        schemas::ItemList,
        schemas::MessageResponse,
        schemas::HealthStatus,
        schemas::ErrorMessage,
        schemas::ValidationErrorBody,
        schemas::FieldIssue,
    )),
    tags(
        (name = "Health", description = "Health check and monitoring endpoints for service status verification."),
        (name = "Users", description = "User management operations - create, read, update, and delete user accounts."),
        (name = "Items", description = "Item catalog operations - manage products and listings.")
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI document for the given configuration.
pub fn openapi_document(config: &Config) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = config.app_name.clone();
    doc.info.version = config.app_version.clone();
    doc.info.description = Some(config.app_description.clone());

    let paths = std::mem::take(&mut doc.paths.paths);
    doc.paths.paths = paths
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", config.api_prefix), item))
        .collect();
    doc
}
