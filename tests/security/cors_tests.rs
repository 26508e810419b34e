//! CORS allowlist for the read-only catalog API.

use actix_web::{http::header, http::StatusCode, test as actix_test, web, App, HttpResponse};
use storefront_backend::config::SecurityConfig;
use storefront_backend::security::cors_middleware;

fn test_config() -> SecurityConfig {
    SecurityConfig {
        cors_allowed_origins: vec![
            "http://localhost:3000".to_string(),
            "https://shop.example.com".to_string(),
        ],
        metrics_allow_private_only: true,
        metrics_admin_token: None,
    }
}

#[actix_rt::test]
async fn test_cors_allows_configured_origin() {
    let app = actix_test::init_service(
        App::new()
            .wrap(cors_middleware(&test_config()))
            .route("/", web::get().to(HttpResponse::Ok)),
    )
    .await;

    let req = actix_test::TestRequest::get()
        .uri("/")
        .insert_header((header::ORIGIN, "https://shop.example.com"))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "https://shop.example.com"
    );
}

#[actix_rt::test]
async fn test_cors_omits_header_for_unknown_origin() {
    let app = actix_test::init_service(
        App::new()
            .wrap(cors_middleware(&test_config()))
            .route("/", web::get().to(HttpResponse::Ok)),
    )
    .await;

    let req = actix_test::TestRequest::get()
        .uri("/")
        .insert_header((header::ORIGIN, "https://evil.example.com"))
        .to_request();
    let resp = actix_test::try_call_service(&app, req).await;

    if let Ok(resp) = resp {
        assert!(resp
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}

#[actix_rt::test]
async fn test_cors_preflight_rejects_write_methods() {
    let app = actix_test::init_service(
        App::new()
            .wrap(cors_middleware(&test_config()))
            .route("/", web::get().to(HttpResponse::Ok)),
    )
    .await;

    let req = actix_test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/")
        .insert_header((header::ORIGIN, "http://localhost:3000"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE"))
        .to_request();
    let resp = actix_test::try_call_service(&app, req).await;

    match resp {
        Ok(resp) => assert!(!resp.status().is_success()),
        Err(err) => assert!(!err.as_response_error().status_code().is_success()),
    }
}

#[actix_rt::test]
async fn test_cors_preflight_allows_get() {
    let app = actix_test::init_service(
        App::new()
            .wrap(cors_middleware(&test_config()))
            .route("/", web::get().to(HttpResponse::Ok)),
    )
    .await;

    let req = actix_test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/")
        .insert_header((header::ORIGIN, "http://localhost:3000"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let allowed = resp
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(allowed.contains("GET"));
    assert!(!allowed.contains("DELETE"));
}
