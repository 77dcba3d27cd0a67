pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::settings::handlers as settings;
use crate::state::AppState;
use crate::store::handlers as resumes;
use crate::templates::handlers as templates;
use crate::transfer::handlers as transfer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Rendering
        .route("/api/v1/templates", get(templates::handle_list_templates))
        .route("/api/v1/render", post(templates::handle_render))
        // Workspace
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/active",
            get(resumes::handle_get_active).patch(resumes::handle_edit_active),
        )
        .route(
            "/api/v1/resumes/active/render",
            get(resumes::handle_render_active),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume).delete(resumes::handle_delete_resume),
        )
        .route("/api/v1/resumes/:id/name", put(resumes::handle_rename_resume))
        .route("/api/v1/resumes/:id/data", put(resumes::handle_replace_data))
        .route("/api/v1/resumes/:id/reset", post(resumes::handle_reset_data))
        .route(
            "/api/v1/resumes/:id/activate",
            post(resumes::handle_activate_resume),
        )
        .route(
            "/api/v1/resumes/:id/duplicate",
            post(resumes::handle_duplicate_resume),
        )
        // Import / export
        .route("/api/v1/resumes/export", post(transfer::handle_export))
        .route(
            "/api/v1/resumes/import/preview",
            post(transfer::handle_import_preview),
        )
        .route(
            "/api/v1/resumes/import/confirm",
            post(transfer::handle_import_confirm),
        )
        // Settings
        .route("/api/v1/settings", get(settings::handle_get_settings))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::issue_test_token;
    use crate::config::Config;
    use crate::errors::AppError;
    use crate::settings::InMemorySettingsRepository;
    use crate::store::repository::{InMemoryResumeRepository, ResumeRepository};
    use crate::store::Workspace;

    struct Harness {
        router: Router,
        repo: Arc<InMemoryResumeRepository>,
    }

    fn harness_with_settings(settings: Option<Arc<InMemorySettingsRepository>>) -> Harness {
        let repo = Arc::new(InMemoryResumeRepository::new());
        let mut workspace = Workspace::default();
        workspace.initialize();
        let state = AppState::new(
            Config::for_tests(),
            workspace,
            repo.clone(),
            settings.map(|s| s as Arc<dyn crate::settings::SettingsRepository>),
        );
        Harness {
            router: build_router(state),
            repo,
        }
    }

    fn harness() -> Harness {
        harness_with_settings(None)
    }

    /// Storage that is reachable for reads but rejects every write.
    struct UnwritableRepository;

    #[async_trait::async_trait]
    impl ResumeRepository for UnwritableRepository {
        async fn load(&self) -> Result<Workspace, AppError> {
            Ok(Workspace::default())
        }

        async fn save(&self, _workspace: &Workspace) -> Result<(), AppError> {
            Err(anyhow::anyhow!("disk full").into())
        }
    }

    fn unwritable_router() -> Router {
        let mut workspace = Workspace::default();
        workspace.initialize();
        let state = AppState::new(
            Config::for_tests(),
            workspace,
            Arc::new(UnwritableRepository),
            None,
        );
        build_router(state)
    }

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let h = harness();
        let (status, body) = send(&h.router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_templates() {
        let h = harness();
        let (status, body) = send(&h.router, Method::GET, "/api/v1/templates", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["templates"][0]["id"], "default");
        assert_eq!(body["templates"][1]["id"], "compact");
        assert_eq!(body["templates"][0]["layoutConfig"]["columns"]["layout"], "two-column");
        assert_eq!(body["defaults"]["selectedFont"], "Calibri");
    }

    #[tokio::test]
    async fn test_stateless_render() {
        let h = harness();
        let (status, body) = send(
            &h.router,
            Method::POST,
            "/api/v1/render",
            Some(json!({
                "data": {"firstName": "Ada", "lastName": "Lovelace", "sectionOrder": null},
                "templateId": "compact",
                "fontSize": 12
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["templateId"], "compact");
        let markup = body["markup"].as_str().unwrap();
        assert!(markup.contains("#set text(font: (\"Calibri\"), size: 12pt)"));
        assert!(markup.contains("[Ada Lovelace]"));
    }

    #[tokio::test]
    async fn test_render_rejects_bad_font_size() {
        let h = harness();
        let (status, body) = send(
            &h.router,
            Method::POST,
            "/api/v1/render",
            Some(json!({"data": {}, "fontSize": -1})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_resume_lifecycle_writes_through() {
        let h = harness();

        let (status, list) = send(&h.router, Method::GET, "/api/v1/resumes", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["resumes"][0]["name"], "My Resume");
        assert_eq!(list["activeResumeId"], "resume-1");

        let (status, created) = send(
            &h.router,
            Method::POST,
            "/api/v1/resumes",
            Some(json!({"name": "Backend"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], "resume-2");
        assert_eq!(h.repo.snapshot().unwrap().len(), 2);

        let uri = "/api/v1/resumes/resume-2/activate";
        let (status, _) = send(&h.router, Method::POST, uri, None).await;
        assert_eq!(status, StatusCode::OK);

        let uri = "/api/v1/resumes/resume-2/duplicate";
        let (status, copy) = send(&h.router, Method::POST, uri, None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(copy["name"], "Backend (Copy)");

        let (status, renamed) = send(
            &h.router,
            Method::PUT,
            "/api/v1/resumes/resume-3/name",
            Some(json!({"name": "Frontend"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(renamed["name"], "Frontend");

        let (status, _) = send(&h.router, Method::DELETE, "/api/v1/resumes/resume-2", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let saved = h.repo.snapshot().unwrap();
        assert_eq!(saved.active_resume_id(), Some("resume-1"));
        assert_eq!(saved.len(), 2);

        let (status, _) = send(&h.router, Method::GET, "/api/v1/resumes/resume-2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_edit_active_and_render() {
        let h = harness();
        let (status, body) = send(
            &h.router,
            Method::PATCH,
            "/api/v1/resumes/active",
            Some(json!({"type": "setField", "field": "firstName", "value": "Grace"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["changed"], true);
        assert_eq!(body["resume"]["data"]["firstName"], "Grace");

        let (_, body) = send(
            &h.router,
            Method::PATCH,
            "/api/v1/resumes/active",
            Some(json!({"type": "skills", "edit": {"op": "remove", "index": 3}})),
        )
        .await;
        assert_eq!(body["changed"], false);

        let (status, active) = send(&h.router, Method::GET, "/api/v1/resumes/active", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(active["fullName"], "Grace");
        assert_eq!(active["orderedSections"][0]["key"], "summary");

        let (status, rendered) = send(
            &h.router,
            Method::GET,
            "/api/v1/resumes/active/render?template=default&fontSize=10",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let markup = rendered["markup"].as_str().unwrap();
        assert!(markup.contains("= Grace"));
        assert!(markup.contains("size: 10pt)"));
    }

    #[tokio::test]
    async fn test_failed_save_leaves_workspace_unchanged() {
        let router = unwritable_router();

        let (status, _) = send(
            &router,
            Method::POST,
            "/api/v1/resumes",
            Some(json!({"name": "Backend"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let (_, list) = send(&router, Method::GET, "/api/v1/resumes", None).await;
        assert_eq!(list["resumes"].as_array().unwrap().len(), 1);

        let (status, _) = send(
            &router,
            Method::PATCH,
            "/api/v1/resumes/active",
            Some(json!({"type": "setField", "field": "firstName", "value": "Grace"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let (_, active) = send(&router, Method::GET, "/api/v1/resumes/active", None).await;
        assert_eq!(active["data"]["firstName"], "");

        let (status, _) = send(&router, Method::DELETE, "/api/v1/resumes/resume-1", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let (status, kept) = send(&router, Method::GET, "/api/v1/resumes/resume-1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(kept["name"], "My Resume");

        let (status, _) = send(
            &router,
            Method::POST,
            "/api/v1/resumes/import/confirm",
            Some(json!({"previews": [{"name": "Imported", "data": {}}], "selected": [0]})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let (_, list) = send(&router, Method::GET, "/api/v1/resumes", None).await;
        assert_eq!(list["resumes"].as_array().unwrap().len(), 1);
        assert_eq!(list["activeResumeId"], "resume-1");
    }

    #[tokio::test]
    async fn test_replace_and_reset_data() {
        let h = harness();
        let (status, body) = send(
            &h.router,
            Method::PUT,
            "/api/v1/resumes/resume-1/data",
            Some(json!({"firstName": "Ada", "languages": [{"name": "English"}]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["languages"][0]["name"], "English");

        let (_, body) = send(&h.router, Method::POST, "/api/v1/resumes/resume-1/reset", None).await;
        assert_eq!(body["data"]["firstName"], "");
    }

    #[tokio::test]
    async fn test_export_and_import_flow() {
        let h = harness();
        let (status, file) = send(
            &h.router,
            Method::POST,
            "/api/v1/resumes/export",
            Some(json!({"ids": ["resume-1"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(file["filename"].as_str().unwrap().starts_with("resume-my-resume-"));

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/resumes/import/preview")
            .body(Body::from(file["json"].as_str().unwrap().to_string()))
            .unwrap();
        let response = h.router.clone().oneshot(request).await.unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let outcome: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(outcome["success"], true);
        assert_eq!(outcome["previews"][0]["isDuplicate"], true);

        let (status, confirmed) = send(
            &h.router,
            Method::POST,
            "/api/v1/resumes/import/confirm",
            Some(json!({"previews": outcome["previews"], "selected": [0]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(confirmed["imported"], 1);
        assert_eq!(h.repo.snapshot().unwrap().len(), 2);

        let (status, _) = send(
            &h.router,
            Method::POST,
            "/api/v1/resumes/export",
            Some(json!({"ids": ["nope"]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_import_preview_reports_bad_file() {
        let h = harness();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/resumes/import/preview")
            .body(Body::from("{\"not\": \"an array\"}"))
            .unwrap();
        let response = h.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let outcome: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(outcome["success"], false);
        assert!(outcome.get("previews").is_none());
    }

    async fn get_settings(router: &Router, auth: Option<(&str, String)>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri("/api/v1/settings");
        if let Some((name, value)) = auth {
            builder = builder.header(name, value);
        }
        let response = router
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_settings_requires_token() {
        let h = harness();
        let (status, body) = get_settings(&h.router, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Authentication required");

        let forged = issue_test_token("wrong-secret", "u1", 600);
        let (status, body) =
            get_settings(&h.router, Some(("authorization", format!("Bearer {forged}")))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Invalid token");
    }

    #[tokio::test]
    async fn test_settings_without_store_is_empty() {
        let h = harness();
        let token = issue_test_token("test-secret", "u1", 600);
        let cookie = format!("auth-token={token}");
        let (status, body) = get_settings(&h.router, Some(("cookie", cookie))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"settings": {}}));
    }

    #[tokio::test]
    async fn test_settings_from_store() {
        let repo = Arc::new(InMemorySettingsRepository::with_row(
            "u1",
            json!({"selectedFont": "Roboto"}),
        ));
        let h = harness_with_settings(Some(repo));

        let token = issue_test_token("test-secret", "u1", 600);
        let bearer = format!("Bearer {token}");
        let (_, body) = get_settings(&h.router, Some(("authorization", bearer))).await;
        assert_eq!(body["settings"]["selectedFont"], "Roboto");

        let other = issue_test_token("test-secret", "u2", 600);
        let bearer = format!("Bearer {other}");
        let (_, body) = get_settings(&h.router, Some(("authorization", bearer))).await;
        assert_eq!(body["settings"], json!({}));
    }
}
