use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{careers, contact, hackathon, inquiry, jobs, media, probes, projects};
use super::middlewares::authn;
use super::state::AppState;
use crate::conf::Settings;

/// Multipart framing on top of the largest accepted file.
const BODY_OVERHEAD: usize = 64 * 1024;

fn cors(settings: &Settings) -> CorsLayer {
    let origins = settings
        .origins()
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect::<Vec<_>>();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(60 * 60))
}

pub fn build_routes(state: AppState) -> Router {
    let admin = Router::new()
        .route("/apply", get(careers::list))
        .route("/apply/{id}", delete(careers::delete))
        .route("/contact", get(contact::list))
        .route("/contact/{id}", delete(contact::delete))
        .route("/inquiry/admin", get(inquiry::list))
        .route("/inquiry/admin/{id}", delete(inquiry::delete))
        .route("/hackathon", get(hackathon::list))
        .route("/hackathon/{id}", delete(hackathon::delete))
        .route("/admin/jobs", get(jobs::list).post(jobs::create))
        .route("/admin/jobs/{id}", put(jobs::update).delete(jobs::delete))
        .route("/admin/projects", get(projects::list).post(projects::create))
        .route(
            "/admin/projects/{id}",
            put(projects::update).delete(projects::delete),
        )
        .route(
            "/admin/gallery",
            get(media::gallery).post(media::create_gallery),
        )
        .route(
            "/admin/gallery/{id}",
            put(media::update_gallery).delete(media::delete_gallery),
        )
        .route("/admin/mous", get(media::list_mous).post(media::create_mou))
        .route(
            "/admin/mous/{id}",
            put(media::update_mou).delete(media::delete_mou),
        )
        .route(
            "/admin/community",
            get(media::list_community).post(media::create_community),
        )
        .route(
            "/admin/community/{id}",
            put(media::update_community).delete(media::delete_community),
        )
        .route_layer(from_fn_with_state(state.clone(), authn::authenticate));

    let public = Router::new()
        .route("/apply", post(careers::apply))
        .route("/contact", post(contact::create))
        .route("/inquiry", post(inquiry::create))
        .route("/hackathon", post(hackathon::register))
        .route("/jobs", get(jobs::open))
        .route("/mous", get(media::mous))
        .route("/gallery", get(media::gallery))
        .route("/projects", get(projects::list))
        .route("/giveback", get(media::giveback))
        .route("/healthz", get(probes::healthz))
        .route("/livez", get(probes::livez));

    admin
        .merge(public)
        .layer(DefaultBodyLimit::max(
            state.settings.max_upload_bytes + BODY_OVERHEAD,
        ))
        .layer(cors(&state.settings))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header::COOKIE, Request, StatusCode},
        response::Response,
    };
    use chrono::Utc;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use tracing_test::traced_test;

    use super::*;
    use crate::pkg::{
        internal::{
            auth::Admin,
            careers::{create_job, JobInput},
        },
        server::state::testing::{test_app, TestApp},
    };
    use crate::prelude::Lenient;

    const BOUNDARY: &str = "formdesk-boundary";

    async fn admin_token(app: &TestApp) -> String {
        let admin = Admin::create(&app.state, "ops").await.unwrap();
        admin.issue_token(&app.state).await.unwrap().token
    }

    async fn send(app: &TestApp, request: Request<Body>) -> Response {
        build_routes(app.state.clone())
            .oneshot(request)
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn authed(method: &str, uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }

    /// Builds a multipart body from text parts and an optional file part.
    fn multipart(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                    BOUNDARY, name, value
                )
                .as_bytes(),
            );
        }
        if let Some((name, file_name, data)) = file {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    BOUNDARY, name, file_name
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn multipart_request(
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Vec<u8>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri).header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body)).unwrap()
    }

    fn contact_payload() -> Value {
        json!({
            "name": "Asha",
            "email": "asha@example.com",
            "subject": "Workshop",
            "message": "When is the next one?"
        })
    }

    #[tokio::test]
    #[traced_test]
    async fn test_probes() {
        let app = test_app().await;
        for uri in ["/livez", "/healthz"] {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            assert_eq!(send(&app, request).await.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn test_contact_round_trip_through_admin_routes() {
        let app = test_app().await;
        let response = send(&app, json_request("POST", "/contact", contact_payload())).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await, json!({"message": "Contact saved"}));

        let token = admin_token(&app).await;
        let response = send(&app, authed("GET", "/contact", &token)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        let id = listed[0]["id"].as_i64().unwrap();
        assert_eq!(listed[0]["subject"], "Workshop");

        let uri = format!("/contact/{}", id);
        let response = send(&app, authed("DELETE", &uri, &token)).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = send(&app, authed("DELETE", &uri, &token)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({"detail": "Not found."}));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_invalid_contact_reports_fields() {
        let app = test_app().await;
        let mut payload = contact_payload();
        payload["email"] = json!("nope");
        let response = send(&app, json_request("POST", "/contact", payload)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["email"], json!(["Enter a valid email address."]));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_admin_routes_require_token() {
        let app = test_app().await;
        for (method, uri) in [
            ("GET", "/apply"),
            ("GET", "/contact"),
            ("GET", "/inquiry/admin"),
            ("DELETE", "/hackathon/1"),
            ("GET", "/admin/jobs"),
        ] {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap();
            assert_eq!(
                send(&app, request).await.status(),
                StatusCode::UNAUTHORIZED,
                "{} {}",
                method,
                uri
            );
        }
        let response = send(&app, authed("GET", "/contact", "garbage")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_token_cookie_is_accepted() {
        let app = test_app().await;
        let token = admin_token(&app).await;
        let request = Request::builder()
            .uri("/inquiry/admin")
            .header(COOKIE, format!("{}={}", authn::TOKEN_COOKIE, token))
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(&app, request).await.status(), StatusCode::OK);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_hackathon_registration_survives_sheet_failure() {
        let app = test_app().await;
        app.sheets.set_failing(true);
        let payload = json!({
            "team_name": "Segfault",
            "total_participants": 2,
            "participants": [
                {"role": "LEADER", "full_name": "Asha", "email": "asha@example.com", "phone": "1"},
                {"role": "MEMBER", "full_name": "Ravi", "email": "ravi@example.com", "phone": "2"}
            ]
        });
        let response = send(&app, json_request("POST", "/hackathon", payload)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Hackathon registration successful");
        assert!(body["team_id"].as_i64().is_some());
        assert_eq!(app.notifier.sent().len(), 1);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_mistyped_hackathon_fields_are_field_errors() {
        let app = test_app().await;
        let payload = json!({
            "team_name": "Segfault",
            "participants": [
                {"full_name": "Asha", "email": "asha@example.com", "phone": "1"},
                {"role": "MEMBER", "full_name": "Ravi", "email": "", "phone": "2"}
            ]
        });
        let response = send(&app, json_request("POST", "/hackathon", payload)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({
                "total_participants": ["This field is required."],
                "participants[0].role": ["This field is required."],
                "participants[1].email": ["This field may not be blank."]
            })
        );

        let payload = json!({
            "team_name": "Segfault",
            "total_participants": "two",
            "participants": [
                {"role": 1, "full_name": "Asha", "email": "asha@example.com", "phone": "1"}
            ]
        });
        let response = send(&app, json_request("POST", "/hackathon", payload)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({
                "total_participants": ["A valid integer is required."],
                "participants[0].role": ["\"1\" is not a valid choice."]
            })
        );

        let payload = json!({
            "team_name": "Segfault",
            "total_participants": "1",
            "participants": [
                {"role": "LEADER", "full_name": "Asha", "email": "asha@example.com", "phone": "1"}
            ]
        });
        let response = send(&app, json_request("POST", "/hackathon", payload)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_inquiry_quantity_as_text() {
        let app = test_app().await;
        let payload = json!({
            "full_name": "Ravi Kumar",
            "email": "ravi@example.com",
            "phone": "9000000001",
            "cpu_model": "i5-12400",
            "quantity": "2"
        });
        let response = send(&app, json_request("POST", "/inquiry", payload.clone())).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let mut wrong = payload;
        wrong["quantity"] = json!({"count": 2});
        let response = send(&app, json_request("POST", "/inquiry", wrong)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"quantity": ["A valid integer is required."]})
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn test_apply_with_resume() {
        let app = test_app().await;
        let today = Utc::now().date_naive();
        let job = create_job(
            &app.state,
            &JobInput {
                title: "Backend Intern".into(),
                description: "".into(),
                location: "".into(),
                is_active: Lenient::new(true),
                application_start_date: Lenient::new((today - chrono::Duration::days(1)).to_string()),
                application_end_date: Lenient::new((today + chrono::Duration::days(1)).to_string()),
            },
        )
        .await
        .unwrap();

        let job_id = job.id.to_string();
        let fields = [
            ("job", job_id.as_str()),
            ("full_name", "Meena"),
            ("email", "meena@example.com"),
            ("phone", "9000000002"),
        ];
        let body = multipart(&fields, Some(("resume", "cv.pdf", &b"%PDF-1.4"[..])));
        let response = send(&app, multipart_request("POST", "/apply", None, body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            json!({"message": "Application submitted successfully"})
        );

        let request = Request::builder().uri("/jobs").body(Body::empty()).unwrap();
        let open = body_json(send(&app, request).await).await;
        assert_eq!(open[0]["title"], "Backend Intern");

        let body = multipart(&fields[1..], None);
        let response = send(&app, multipart_request("POST", "/apply", None, body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"job": "Job selection is required"})
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn test_gallery_admin_flow_releases_assets() {
        let app = test_app().await;
        let token = admin_token(&app).await;
        let body = multipart(&[("title", "Team")], Some(("image", "team.jpg", &b"jpeg"[..])));
        let response = send(
            &app,
            multipart_request("POST", "/admin/gallery", Some(&token), body),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        let id = created["id"].as_i64().unwrap();
        assert!(created.get("image_path").is_none());

        let body = multipart(&[("title", "Team")], Some(("image", "team-2.png", &b"png"[..])));
        let uri = format!("/admin/gallery/{}", id);
        let response = send(&app, multipart_request("PUT", &uri, Some(&token), body)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(app.assets.destroyed(), vec!["media/gallery/1_team".to_string()]);

        let response = send(&app, authed("DELETE", &uri, &token)).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            app.assets.destroyed(),
            vec![
                "media/gallery/1_team".to_string(),
                "media/gallery/2_team-2".to_string()
            ]
        );

        let request = Request::builder().uri("/gallery").body(Body::empty()).unwrap();
        assert_eq!(body_json(send(&app, request).await).await, json!([]));
    }
}
