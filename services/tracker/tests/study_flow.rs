mod common;

use axum::http::StatusCode;
use common::{body_text, location, TestApp};
use study_core::advice::{advise, recommend};

const PLAN: &str = "subject=Physics&hours=3&start_date=2025-01-01&end_date=2025-03-01";

#[tokio::test]
async fn study_plan_recommends_for_corrected_subject() {
    let app = TestApp::new();
    let cookie = app.guest_cookie().await;

    let response = app
        .post_form("/study-plan", "subject=phisics&hours=3", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("<strong>physics</strong>"));
    assert!(body.contains(recommend(3)));
}

#[tokio::test]
async fn study_plan_rejects_non_numeric_hours() {
    let app = TestApp::new();
    let cookie = app.guest_cookie().await;

    let response = app
        .post_form("/study-plan", "subject=Math&hours=lots", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response).await;
    assert!(body.contains("Please enter a valid number for study hours."));
    assert!(!body.contains("we recommend"));
}

#[tokio::test]
async fn performance_preview_shows_advice_and_confirmation() {
    let app = TestApp::new();
    let cookie = app.registered_cookie("ada@example.com").await;

    let response = app.post_form("/performance-input", PLAN, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains(&advise("Physics", 3)));
    assert!(body.contains(r#"name="confirm" value="yes""#));
    assert_eq!(app.db.plan_count(), 0, "preview must not persist");
}

#[tokio::test]
async fn confirmed_plan_is_saved_for_registered_users() {
    let app = TestApp::new();
    let cookie = app.registered_cookie("ada@example.com").await;

    let body = format!("{}&confirm=yes", PLAN);
    let response = app.post_form("/performance-input", &body, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/dashboard?notice=plan-saved"));
    assert_eq!(app.db.plan_count(), 1);

    let dashboard = body_text(app.get("/dashboard?notice=plan-saved", Some(&cookie)).await).await;
    assert!(dashboard.contains("Your study plan has been saved."));
    assert!(dashboard.contains("<td>Physics</td>"));
    assert!(dashboard.contains("2025-03-01"));
}

#[tokio::test]
async fn oversized_hours_re_render_the_plan_form() {
    let app = TestApp::new();
    let cookie = app.registered_cookie("ada@example.com").await;

    let body = "subject=Physics&hours=3000000000&start_date=2025-03-01&confirm=yes";
    let response = app.post_form("/performance-input", body, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Please enter a valid number"));
    assert_eq!(app.db.plan_count(), 0);
}

#[tokio::test]
async fn guests_cannot_save_plans() {
    let app = TestApp::new();
    let cookie = app.guest_cookie().await;
    let before = app.db.plan_count();

    let body = format!("{}&confirm=yes", PLAN);
    let response = app.post_form("/performance-input", &body, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/dashboard?notice=guest-plan"));
    assert_eq!(app.db.plan_count(), before);

    let dashboard = body_text(app.get("/dashboard?notice=guest-plan", Some(&cookie)).await).await;
    assert!(dashboard.contains("Guests cannot save study plans."));
}

#[tokio::test]
async fn performance_input_requires_a_start_date() {
    let app = TestApp::new();
    let cookie = app.registered_cookie("ada@example.com").await;

    let response = app
        .post_form(
            "/performance-input",
            "subject=Physics&hours=2&confirm=yes",
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Start date is required."));
    assert_eq!(app.db.plan_count(), 0);
}
