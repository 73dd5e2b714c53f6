use axum::routing::{delete, get, patch, post, put};
use axum::Router;

use super::handlers::audit;
use super::handlers::postings;
use super::handlers::probes::{healthz, livez};
use super::state::AppState;

pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/job-postings", get(postings::list))
        .route("/job-postings", post(postings::create))
        .route("/job-postings/:id", put(postings::update))
        .route("/job-postings/:id", delete(postings::remove))
        .route("/job-postings/:id/duplicate", post(postings::duplicate))
        .route("/job-postings/:id/status", patch(postings::change_status))
        .route("/audit-trail/:job_id", get(audit::trail))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::pkg::internal::clock::ManualClock;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    fn app() -> Router {
        build_routes(AppState::with_clock(Arc::new(ManualClock::new(start()))))
    }

    fn posting_body() -> Value {
        json!({
            "jobTitle": "Backend Engineer",
            "jobType": ["Full-time"],
            "department": "Engineering",
            "jobLevel": "Senior",
            "salaryRange": { "currency": "EUR", "min": 60000.0, "max": 80000.0 },
            "technicalSkills": ["Rust"],
            "languagesRequired": ["English"],
            "applicationDeadline": (start() + Duration::days(14)).to_rfc3339(),
        })
    }

    fn request(method: Method, uri: &str, body: Option<&Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        match body {
            Some(body) => builder
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_and_list_postings() {
        let app = app();

        let response = app
            .clone()
            .oneshot(request(Method::POST, "/job-postings", Some(&posting_body())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        assert_eq!(created["status"], "active");
        assert!(!created["id"].as_str().unwrap().is_empty());

        let response = app
            .oneshot(request(Method::GET, "/job-postings", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_with_empty_skills_is_rejected() {
        let app = app();
        let mut body = posting_body();
        body["technicalSkills"] = json!([]);

        let response = app
            .clone()
            .oneshot(request(Method::POST, "/job-postings", Some(&body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(request(Method::GET, "/job-postings", None))
            .await
            .unwrap();
        let listed = body_json(response).await;
        assert!(listed.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_change_is_audited() {
        let app = app();
        let response = app
            .clone()
            .oneshot(request(Method::POST, "/job-postings", Some(&posting_body())))
            .await
            .unwrap();
        let id = body_json(response).await["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(request(
                Method::PATCH,
                &format!("/job-postings/{}/status", id),
                Some(&json!({ "status": "closed" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "closed");

        let response = app
            .oneshot(request(Method::GET, &format!("/audit-trail/{}", id), None))
            .await
            .unwrap();
        let trail = body_json(response).await;
        let trail = trail.as_array().unwrap();
        assert_eq!(trail.len(), 2);
        assert_eq!(trail[1]["action"], "Status Change");
        assert_eq!(trail[1]["jobId"], id.as_str());
    }

    #[tokio::test]
    async fn unknown_posting_is_not_found() {
        let app = app();
        let response = app
            .oneshot(request(
                Method::PATCH,
                "/job-postings/missing/status",
                Some(&json!({ "status": "closed" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn probes_respond() {
        let app = app();
        let response = app
            .clone()
            .oneshot(request(Method::GET, "/livez", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let response = app
            .oneshot(request(Method::GET, "/healthz", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
