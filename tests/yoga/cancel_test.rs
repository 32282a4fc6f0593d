use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;

use crate::common::{start_in_hours, test_email, unique_name, TestContext};

async fn book_schedule_starting_in(ctx: &TestContext, hours: i64) -> (String, i64) {
    let (_, teacher_token) = ctx.signup_teacher(&test_email()).await;
    let class_type_id = ctx
        .create_class_type(&teacher_token, &unique_name("Vinyasa"))
        .await;
    let (date, time) = start_in_hours(hours);
    let schedule_id = ctx
        .create_schedule(&teacher_token, class_type_id, date, time, 5)
        .await;

    let (_, student_token) = ctx.signup(&test_email()).await;
    let response = ctx
        .server
        .post("/yoga/bookings")
        .authorization_bearer(&student_token)
        .json(&json!({ "schedule_id": schedule_id }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let booking_id = response.json::<serde_json::Value>()["id"].as_i64().unwrap();

    (student_token, booking_id)
}

#[tokio::test]
#[serial]
async fn cancelling_more_than_two_hours_before_start_succeeds() {
    let ctx = TestContext::new().await;

    let (token, booking_id) = book_schedule_starting_in(&ctx, 3).await;

    let response = ctx
        .server
        .delete(&format!("/yoga/bookings/{}", booking_id))
        .authorization_bearer(&token)
        .await;
    response.assert_status(StatusCode::OK);

    // The row is gone
    ctx.server
        .get(&format!("/yoga/bookings/{}", booking_id))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn cancelling_within_two_hours_of_start_returns_bad_request() {
    let ctx = TestContext::new().await;

    let (token, booking_id) = book_schedule_starting_in(&ctx, 1).await;

    let response = ctx
        .server
        .delete(&format!("/yoga/bookings/{}", booking_id))
        .authorization_bearer(&token)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Booking still exists
    ctx.server
        .get(&format!("/yoga/bookings/{}", booking_id))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::OK);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn cancelling_missing_booking_returns_not_found() {
    let ctx = TestContext::new().await;

    let (_, token) = ctx.signup(&test_email()).await;

    ctx.server
        .delete("/yoga/bookings/999999")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    ctx.cleanup().await;
}
