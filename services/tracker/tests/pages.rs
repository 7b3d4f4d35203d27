mod common;

use axum::http::StatusCode;
use common::{body_text, TestApp};
use study_core::tips::MOTIVATIONAL_TIPS;

#[tokio::test]
async fn index_links_to_every_entry_point() {
    let app = TestApp::new();
    let body = body_text(app.get("/", None).await).await;
    for link in ["/auth/login", "/auth/signup", "/auth/guest"] {
        assert!(body.contains(link), "{link}");
    }
}

#[tokio::test]
async fn tip_is_drawn_from_the_fixed_list() {
    let app = TestApp::new();

    let empty = body_text(app.get("/motivational-tips", None).await).await;
    assert!(!empty.contains(r#"class="tip""#));

    let response = app.post_form("/motivational-tips", "", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(MOTIVATIONAL_TIPS.iter().any(|tip| body.contains(tip)));
}

#[tokio::test]
async fn lookups_list_items_for_known_categories() {
    let app = TestApp::new();

    let cases = [
        ("/study-materials", "physics", "The Feynman Lectures on Physics"),
        ("/online-classes", "programming", "CS50"),
        ("/internships", "software", "Google Summer of Code"),
        ("/question-papers", "mathematics", "AP Calculus"),
    ];
    for (uri, category, expected) in cases {
        let response = app
            .post_form(uri, &format!("category={}", category), None)
            .await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert!(body_text(response).await.contains(expected), "{uri}");
    }
}

#[tokio::test]
async fn unknown_lookup_category_is_empty() {
    let app = TestApp::new();

    let response = app.post_form("/internships", "category=astrology", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Nothing listed for this category."));
    assert!(!body.contains(r#"class="results""#));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new();
    let response = app.get("/api-docs/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("/performance-input"));
    assert!(body.contains("/auth/login"));
}
