use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::tag::TagBuilder;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::health::HealthResponse;
use crate::api::handlers::tools::ToolUploadForm;
use crate::application::dto::{
    AuthResponse, CatalogResponse, FilesResponse, HistoryResponse, LoginRequest,
    ProcessResponse, SignupRequest, ToolDto, UsageDto, UsageStatsDto, UserDto, UserFileDto,
};
use crate::catalog;
use crate::domain::validation::DocumentKind;
use crate::domain::value_objects::{OutputFormat, ToolCategory};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// OpenAPI specification for the Suntyn tools API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Suntyn Tools API",
        version = "1.0.0",
        description = "PDF, image, media, government and developer tools that return downloadable outputs"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::tools::list_tools_handler,
        crate::api::handlers::tools::get_tool_handler,
        crate::api::handlers::tools::process_tool_handler,
        crate::api::handlers::download::download_handler,
        crate::api::handlers::auth::signup_handler,
        crate::api::handlers::auth::login_handler,
        crate::api::handlers::auth::me_handler,
        crate::api::handlers::history::history_handler,
        crate::api::handlers::history::files_handler,
    ),
    components(
        schemas(
            HealthResponse,
            ToolUploadForm,
            ProcessResponse,
            ToolDto,
            CatalogResponse,
            ToolCategory,
            OutputFormat,
            DocumentKind,
            SignupRequest,
            LoginRequest,
            AuthResponse,
            UserDto,
            HistoryResponse,
            UsageDto,
            UsageStatsDto,
            FilesResponse,
            UserFileDto,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "tools", description = "Tool catalog, processing and downloads"),
        (name = "auth", description = "Accounts and bearer tokens"),
        (name = "history", description = "Per-user usage history and uploads")
    )
)]
pub struct ApiDoc;

/// Generated document plus one tag per category listing its tool ids
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let tags = doc.tags.get_or_insert_with(Vec::new);
    for category in ToolCategory::ALL {
        let ids: Vec<&str> = catalog::by_category(category).map(|t| t.id).collect();
        tags.push(
            TagBuilder::new()
                .name(format!("{} tools", category))
                .description(Some(ids.join(", ")))
                .build(),
        );
    }
    doc
}

/// Create the Swagger UI route
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/openapi.json", openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_tool_routes() {
        let doc = openapi();
        assert!(doc.paths.paths.contains_key("/api/tools/{tool_id}"));
        assert!(doc.paths.paths.contains_key("/api/download/{filename}"));
        assert!(doc.paths.paths.contains_key("/api/auth/signup"));
    }

    #[test]
    fn test_category_tags_name_every_tool() {
        let doc = openapi();
        let tags = doc.tags.unwrap();
        let government = tags
            .iter()
            .find(|t| t.name == "Government tools")
            .unwrap();
        assert!(government
            .description
            .as_deref()
            .unwrap()
            .contains("pan-validator"));
    }
}
