use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;
use serial_test::serial;

use crate::common::{nine_am, test_email, tomorrow, unique_name, TestContext};

#[tokio::test]
#[serial]
async fn booking_an_open_schedule_succeeds_with_detail() {
    let ctx = TestContext::new().await;

    let (_, teacher_token) = ctx.signup_teacher(&test_email()).await;
    let class_type_id = ctx
        .create_class_type(&teacher_token, &unique_name("Vinyasa"))
        .await;
    let schedule_id = ctx
        .create_schedule(&teacher_token, class_type_id, tomorrow(), nine_am(), 5)
        .await;

    let (student_id, student_token) = ctx.signup(&test_email()).await;

    let response = ctx
        .server
        .post("/yoga/bookings")
        .authorization_bearer(&student_token)
        .json(&json!({ "schedule_id": schedule_id, "notes": "first time" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["user_id"].as_i64().unwrap(), student_id);
    assert_eq!(body["schedule_id"].as_i64().unwrap(), schedule_id);
    assert_eq!(body["notes"], "first time");
    assert!(body["schedule"]["class_type_name"].as_str().is_some());
    assert!(body["schedule"]["instructor_name"].as_str().is_some());

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn booking_missing_schedule_returns_not_found() {
    let ctx = TestContext::new().await;

    let (_, token) = ctx.signup(&test_email()).await;

    let response = ctx
        .server
        .post("/yoga/bookings")
        .authorization_bearer(&token)
        .json(&json!({ "schedule_id": 999999 }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn booking_a_past_schedule_returns_bad_request() {
    let ctx = TestContext::new().await;

    let (_, teacher_token) = ctx.signup_teacher(&test_email()).await;
    let class_type_id = ctx
        .create_class_type(&teacher_token, &unique_name("Hatha"))
        .await;
    let yesterday = Utc::now().date_naive() - Duration::days(1);
    let schedule_id = ctx
        .create_schedule(&teacher_token, class_type_id, yesterday, nine_am(), 5)
        .await;

    let (_, student_token) = ctx.signup(&test_email()).await;

    let response = ctx
        .server
        .post("/yoga/bookings")
        .authorization_bearer(&student_token)
        .json(&json!({ "schedule_id": schedule_id }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn double_booking_the_same_schedule_returns_bad_request() {
    let ctx = TestContext::new().await;

    let (_, teacher_token) = ctx.signup_teacher(&test_email()).await;
    let class_type_id = ctx
        .create_class_type(&teacher_token, &unique_name("Yin"))
        .await;
    let schedule_id = ctx
        .create_schedule(&teacher_token, class_type_id, tomorrow(), nine_am(), 5)
        .await;

    let (_, student_token) = ctx.signup(&test_email()).await;

    let first = ctx
        .server
        .post("/yoga/bookings")
        .authorization_bearer(&student_token)
        .json(&json!({ "schedule_id": schedule_id }))
        .await;
    first.assert_status(StatusCode::CREATED);

    let second = ctx
        .server
        .post("/yoga/bookings")
        .authorization_bearer(&student_token)
        .json(&json!({ "schedule_id": schedule_id }))
        .await;
    second.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = second.json();
    assert_eq!(body["error"], "You have already booked this schedule");

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn bookings_are_listed_newest_first() {
    let ctx = TestContext::new().await;

    let (_, teacher_token) = ctx.signup_teacher(&test_email()).await;
    let class_type_id = ctx
        .create_class_type(&teacher_token, &unique_name("Power"))
        .await;
    let first_schedule = ctx
        .create_schedule(&teacher_token, class_type_id, tomorrow(), nine_am(), 5)
        .await;
    let second_schedule = ctx
        .create_schedule(
            &teacher_token,
            class_type_id,
            tomorrow() + Duration::days(1),
            nine_am(),
            5,
        )
        .await;

    let (_, student_token) = ctx.signup(&test_email()).await;

    for schedule_id in [first_schedule, second_schedule] {
        ctx.server
            .post("/yoga/bookings")
            .authorization_bearer(&student_token)
            .json(&json!({ "schedule_id": schedule_id }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = ctx
        .server
        .get("/yoga/bookings")
        .authorization_bearer(&student_token)
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    let bookings = body.as_array().unwrap();
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0]["schedule_id"].as_i64().unwrap(), second_schedule);
    assert_eq!(bookings[1]["schedule_id"].as_i64().unwrap(), first_schedule);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn another_users_booking_is_not_visible() {
    let ctx = TestContext::new().await;

    let (_, teacher_token) = ctx.signup_teacher(&test_email()).await;
    let class_type_id = ctx
        .create_class_type(&teacher_token, &unique_name("Restorative"))
        .await;
    let schedule_id = ctx
        .create_schedule(&teacher_token, class_type_id, tomorrow(), nine_am(), 5)
        .await;

    let (_, owner_token) = ctx.signup(&test_email()).await;
    let response = ctx
        .server
        .post("/yoga/bookings")
        .authorization_bearer(&owner_token)
        .json(&json!({ "schedule_id": schedule_id }))
        .await;
    let booking_id = response.json::<serde_json::Value>()["id"].as_i64().unwrap();

    let (_, other_token) = ctx.signup(&test_email()).await;
    ctx.server
        .get(&format!("/yoga/bookings/{}", booking_id))
        .authorization_bearer(&other_token)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    ctx.server
        .delete(&format!("/yoga/bookings/{}", booking_id))
        .authorization_bearer(&other_token)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    ctx.cleanup().await;
}
