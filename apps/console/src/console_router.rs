use axum::Router;
use axum::routing::{delete, get, post, put};
use elysian_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let schema_routes = Router::new()
        .route(
            "/api/entity-types",
            get(handlers::entity_types::list_entity_types_handler)
                .post(handlers::entity_types::create_entity_type_handler),
        )
        .route(
            "/api/entity-types/{entity_id}",
            delete(handlers::entity_types::drop_entity_type_handler),
        )
        .route(
            "/api/schema-sessions",
            post(handlers::schema_sessions::open_schema_session_handler),
        )
        .route(
            "/api/schema-sessions/{session_id}",
            get(handlers::schema_sessions::schema_session_handler)
                .delete(handlers::schema_sessions::close_schema_session_handler),
        )
        .route(
            "/api/schema-sessions/{session_id}/fields/add",
            post(handlers::schema_sessions::add_field_handler),
        )
        .route(
            "/api/schema-sessions/{session_id}/fields/update",
            put(handlers::schema_sessions::update_field_handler),
        )
        .route(
            "/api/schema-sessions/{session_id}/fields/rename",
            put(handlers::schema_sessions::rename_field_handler),
        )
        .route(
            "/api/schema-sessions/{session_id}/fields/delete",
            post(handlers::schema_sessions::delete_field_handler),
        )
        .route(
            "/api/schema-sessions/{session_id}/commit",
            post(handlers::schema_sessions::commit_schema_session_handler),
        );

    let acl_routes = Router::new()
        .route(
            "/api/acl/entities",
            get(handlers::acl_sessions::list_acl_entities_handler),
        )
        .route(
            "/api/acl-sessions",
            post(handlers::acl_sessions::open_acl_session_handler),
        )
        .route(
            "/api/acl-sessions/{session_id}",
            get(handlers::acl_sessions::acl_session_handler)
                .delete(handlers::acl_sessions::close_acl_session_handler),
        )
        .route(
            "/api/acl-sessions/{session_id}/load",
            post(handlers::acl_sessions::load_acl_session_handler),
        )
        .route(
            "/api/acl-sessions/{session_id}/toggle",
            post(handlers::acl_sessions::toggle_permission_handler),
        )
        .route(
            "/api/acl-sessions/{session_id}/commit",
            post(handlers::acl_sessions::commit_acl_session_handler),
        )
        .route(
            "/api/acl-sessions/{session_id}/restore-defaults",
            post(handlers::acl_sessions::restore_defaults_handler),
        );

    let hook_routes = Router::new()
        .route(
            "/api/hooks/{entity}",
            get(handlers::hooks::list_hooks_handler).post(handlers::hooks::create_hook_handler),
        )
        .route(
            "/api/hooks/id/{hook_id}",
            delete(handlers::hooks::delete_hook_handler),
        )
        .route(
            "/api/hook-sessions",
            post(handlers::hook_sessions::open_hook_session_handler),
        )
        .route(
            "/api/hook-sessions/{session_id}",
            get(handlers::hook_sessions::hook_session_handler)
                .delete(handlers::hook_sessions::close_hook_session_handler),
        )
        .route(
            "/api/hook-sessions/{session_id}/fields",
            put(handlers::hook_sessions::update_hook_fields_handler),
        )
        .route(
            "/api/hook-sessions/{session_id}/save",
            post(handlers::hook_sessions::save_hook_session_handler),
        );

    let user_routes = Router::new()
        .route(
            "/api/users",
            get(handlers::users::list_users_handler).post(handlers::users::create_user_handler),
        )
        .route(
            "/api/users/{username}",
            delete(handlers::users::delete_user_handler),
        )
        .route(
            "/api/users/{username}/role",
            put(handlers::users::change_user_role_handler),
        )
        .route(
            "/api/users/{username}/password",
            put(handlers::users::change_user_password_handler),
        );

    let record_routes = Router::new()
        .route(
            "/api/records/query",
            post(handlers::records::query_records_handler),
        )
        .route(
            "/api/records/{entity}",
            get(handlers::records::list_records_handler),
        )
        .route(
            "/api/records/{entity}/{record_id}",
            delete(handlers::records::delete_record_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(schema_routes)
        .merge(acl_routes)
        .merge(hook_routes)
        .merge(user_routes)
        .merge(record_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
