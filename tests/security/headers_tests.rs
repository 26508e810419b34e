//! Response headers added to every API response.

use actix_web::{test as actix_test, web, App, HttpResponse};
use storefront_backend::security::security_headers;

#[actix_rt::test]
async fn test_security_headers_are_added() {
    let app = actix_test::init_service(
        App::new()
            .wrap(security_headers())
            .route("/", web::get().to(HttpResponse::Ok)),
    )
    .await;

    let req = actix_test::TestRequest::get().uri("/").to_request();
    let resp = actix_test::call_service(&app, req).await;
    let headers = resp.headers();

    assert_eq!(
        headers.get("Strict-Transport-Security").unwrap(),
        "max-age=31536000; includeSubDomains"
    );
    assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
    assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
    assert_eq!(
        headers.get("Referrer-Policy").unwrap(),
        "strict-origin-when-cross-origin"
    );
    assert!(headers
        .get("Content-Security-Policy")
        .unwrap()
        .to_str()
        .unwrap()
        .contains("frame-ancestors 'none'"));
}

#[actix_rt::test]
async fn test_security_headers_on_not_found() {
    let app = actix_test::init_service(
        App::new()
            .wrap(security_headers())
            .route("/", web::get().to(HttpResponse::Ok)),
    )
    .await;

    let req = actix_test::TestRequest::get().uri("/missing").to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    assert_eq!(resp.headers().get("X-Frame-Options").unwrap(), "DENY");
}
