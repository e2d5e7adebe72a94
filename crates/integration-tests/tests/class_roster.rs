//! Integration tests for class, roster, and progress management.
//!
//! These tests require a running server with migrations applied and demo
//! accounts seeded (see tests/auth_flow.rs). They create their own
//! teacher/student/class fixtures with unique usernames and delete them
//! afterwards.
//!
//! Run with: cargo test -p hifz-integration-tests -- --ignored

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use hifz_integration_tests::{base_url, client, login, test_password};

/// A unique-enough suffix for fixture usernames.
fn unique_suffix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_secs()
}

/// Create a user via the API and return its JSON.
async fn create_user(client: &Client, token: &str, username: &str, role: &str) -> Value {
    let resp = client
        .post(format!("{}/api/users", base_url()))
        .bearer_auth(token)
        .json(&json!({
            "username": username,
            "name": format!("Fixture {role}"),
            "role": role,
            "password": test_password(),
        }))
        .send()
        .await
        .expect("Failed to create user");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse created user")
}

/// Delete a user via the API.
async fn delete_user(client: &Client, token: &str, id: i64) {
    let resp = client
        .delete(format!("{}/api/users/{id}", base_url()))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to delete user");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "Requires running server with seeded data"]
async fn test_class_lifecycle_with_roster_and_progress() {
    let client = client();
    let dev_token = login(&client, "developer1", &test_password()).await;
    let suffix = unique_suffix();

    // Fixtures: one teacher, one student
    let teacher = create_user(&client, &dev_token, &format!("it-teacher-{suffix}"), "teacher").await;
    let student = create_user(&client, &dev_token, &format!("it-student-{suffix}"), "student").await;
    let teacher_id = teacher["id"].as_i64().expect("teacher id");
    let student_id = student["id"].as_i64().expect("student id");

    // Create a class for the teacher
    let resp = client
        .post(format!("{}/api/classes", base_url()))
        .bearer_auth(&dev_token)
        .json(&json!({ "name": format!("Fixture Class {suffix}"), "teacher_id": teacher_id }))
        .send()
        .await
        .expect("Failed to create class");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let class: Value = resp.json().await.expect("Failed to parse class");
    let class_id = class["id"].as_i64().expect("class id");

    // The teacher logs in and sees their class
    let teacher_token = login(&client, &format!("it-teacher-{suffix}"), &test_password()).await;
    let resp = client
        .get(format!("{}/api/teachers/{teacher_id}/classes", base_url()))
        .bearer_auth(&teacher_token)
        .send()
        .await
        .expect("Failed to list teacher classes");
    assert_eq!(resp.status(), StatusCode::OK);
    let classes: Value = resp.json().await.expect("Failed to parse classes");
    assert!(
        classes
            .as_array()
            .is_some_and(|cs| cs.iter().any(|c| c["id"].as_i64() == Some(class_id)))
    );

    // Enroll the student (teacher may manage their own class)
    let resp = client
        .post(format!("{}/api/classes/{class_id}/students", base_url()))
        .bearer_auth(&teacher_token)
        .json(&json!({ "student_id": student_id }))
        .send()
        .await
        .expect("Failed to add student");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Record progress for the student
    let resp = client
        .post(format!("{}/api/classes/{class_id}/progress", base_url()))
        .bearer_auth(&teacher_token)
        .json(&json!({ "student_id": student_id, "surah": 2, "ayah": 25, "page": 4 }))
        .send()
        .await
        .expect("Failed to record progress");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Roster shows the student with their position
    let resp = client
        .get(format!("{}/api/classes/{class_id}/students", base_url()))
        .bearer_auth(&teacher_token)
        .send()
        .await
        .expect("Failed to list roster");
    assert_eq!(resp.status(), StatusCode::OK);
    let roster: Value = resp.json().await.expect("Failed to parse roster");
    let row = roster
        .as_array()
        .and_then(|rows| {
            rows.iter()
                .find(|r| r["id"].as_i64() == Some(student_id))
                .cloned()
        })
        .expect("student missing from roster");
    assert_eq!(row["progress"]["surah"], 2);
    assert_eq!(row["progress"]["ayah"], 25);
    assert_eq!(row["progress"]["page"], 4);

    // An out-of-range position is rejected before it reaches storage
    let resp = client
        .post(format!("{}/api/classes/{class_id}/progress", base_url()))
        .bearer_auth(&teacher_token)
        .json(&json!({ "student_id": student_id, "surah": 1, "ayah": 8, "page": 1 }))
        .send()
        .await
        .expect("Failed to send bad progress");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Cleanup (class and memberships cascade from the teacher)
    delete_user(&client, &dev_token, teacher_id).await;
    delete_user(&client, &dev_token, student_id).await;
}

#[tokio::test]
#[ignore = "Requires running server with seeded data"]
async fn test_teacher_cannot_touch_another_teachers_class() {
    let client = client();
    let dev_token = login(&client, "developer1", &test_password()).await;
    let suffix = unique_suffix();

    // Two teachers, a class owned by the first
    let owner = create_user(&client, &dev_token, &format!("it-owner-{suffix}"), "teacher").await;
    let other = create_user(&client, &dev_token, &format!("it-other-{suffix}"), "teacher").await;
    let owner_id = owner["id"].as_i64().expect("owner id");
    let other_id = other["id"].as_i64().expect("other id");

    let resp = client
        .post(format!("{}/api/classes", base_url()))
        .bearer_auth(&dev_token)
        .json(&json!({ "name": format!("Owned Class {suffix}"), "teacher_id": owner_id }))
        .send()
        .await
        .expect("Failed to create class");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let class: Value = resp.json().await.expect("Failed to parse class");
    let class_id = class["id"].as_i64().expect("class id");

    // The other teacher is authenticated but not the owner: 403
    let other_token = login(&client, &format!("it-other-{suffix}"), &test_password()).await;
    let resp = client
        .get(format!("{}/api/classes/{class_id}/students", base_url()))
        .bearer_auth(&other_token)
        .send()
        .await
        .expect("Failed to list roster");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // And may not list the owner's classes either
    let resp = client
        .get(format!("{}/api/teachers/{owner_id}/classes", base_url()))
        .bearer_auth(&other_token)
        .send()
        .await
        .expect("Failed to list classes");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    delete_user(&client, &dev_token, owner_id).await;
    delete_user(&client, &dev_token, other_id).await;
}
