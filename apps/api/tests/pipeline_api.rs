//! Integration tests for the recruiter pipeline endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, build_test_app};
use lead_capture::models::LeadStatus;
use serde_json::json;

#[tokio::test]
async fn listing_is_priority_then_recency_ordered() {
    let app = build_test_app().await;
    let token = app.recruiter().await;

    let response = app
        .send(Method::GET, "/api/v1/pipeline", Some(&token), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["loading"], false);
    assert_eq!(json["backend"], "in_memory");

    let ids: Vec<&str> = json["leads"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_str().unwrap())
        .collect();
    // High: Alexandre (2d), Elena (15d); Medium: Sarah; Low: Jean-Pierre (30m), Marc (5d)
    assert_eq!(ids, vec!["demo-1", "demo-4", "demo-2", "demo-3", "demo-5"]);
}

#[tokio::test]
async fn listing_filters_by_search_and_status() {
    let app = build_test_app().await;
    let token = app.recruiter().await;

    let response = app
        .send(Method::GET, "/api/v1/pipeline?search=WEBER", Some(&token), None)
        .await;
    let json = body_json(response).await;
    assert_eq!(json["leads"].as_array().unwrap().len(), 1);
    assert_eq!(json["leads"][0]["fullName"], "Marc Weber");

    let response = app
        .send(
            Method::GET,
            "/api/v1/pipeline?status=Rejected",
            Some(&token),
            None,
        )
        .await;
    let json = body_json(response).await;
    assert_eq!(json["leads"].as_array().unwrap().len(), 1);
    assert_eq!(json["leads"][0]["id"], "demo-3");
}

#[tokio::test]
async fn board_has_one_column_per_stage() {
    let app = build_test_app().await;
    let token = app.recruiter().await;

    let response = app
        .send(Method::GET, "/api/v1/pipeline/board", Some(&token), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let columns = body_json(response).await;
    let statuses: Vec<&str> = columns
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["status"].as_str().unwrap())
        .collect();
    assert_eq!(
        statuses,
        vec!["Lead", "Interviewing", "Formation", "Recruiter", "Rejected"]
    );
    for column in columns.as_array().unwrap() {
        assert_eq!(column["leads"].as_array().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn metrics_summarise_the_pipeline() {
    let app = build_test_app().await;
    let token = app.recruiter().await;

    let response = app
        .send(Method::GET, "/api/v1/pipeline/metrics", Some(&token), None)
        .await;
    let json = body_json(response).await;
    assert_eq!(json["totalApplicants"], 5);
    assert_eq!(json["conversionRate"], 20);
    assert_eq!(json["averageScore"], 70);
    assert_eq!(json["openTasks"], 1);
}

#[tokio::test]
async fn status_change_is_persisted() {
    let app = build_test_app().await;
    let token = app.recruiter().await;

    let response = app
        .send(
            Method::PATCH,
            "/api/v1/pipeline/leads/demo-2/status",
            Some(&token),
            Some(json!({ "status": "Interviewing" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["outcome"], "confirmed");
    assert_eq!(json["lead"]["status"], "Interviewing");

    let stored = app
        .store
        .snapshot()
        .into_iter()
        .find(|l| l.id == "demo-2")
        .unwrap();
    assert_eq!(stored.status, LeadStatus::Interviewing);
}

#[tokio::test]
async fn unknown_lead_is_not_found() {
    let app = build_test_app().await;
    let token = app.recruiter().await;

    let response = app
        .send(
            Method::PATCH,
            "/api/v1/pipeline/leads/missing/status",
            Some(&token),
            Some(json!({ "status": "Rejected" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .send(Method::GET, "/api/v1/pipeline/leads/missing", Some(&token), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn task_checklist_round_trip() {
    let app = build_test_app().await;
    let token = app.recruiter().await;

    let response = app
        .send(
            Method::POST,
            "/api/v1/pipeline/leads/demo-5/tasks",
            Some(&token),
            Some(json!({ "text": "Book training slot" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["outcome"], "confirmed");
    let task_id = json["lead"]["tasks"][0]["id"].as_str().unwrap().to_string();
    assert_eq!(json["lead"]["tasks"][0]["isCompleted"], false);

    let response = app
        .send(
            Method::PATCH,
            &format!("/api/v1/pipeline/leads/demo-5/tasks/{task_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["lead"]["tasks"][0]["isCompleted"], true);

    let response = app
        .send(
            Method::DELETE,
            &format!("/api/v1/pipeline/leads/demo-5/tasks/{task_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = app
        .store
        .snapshot()
        .into_iter()
        .find(|l| l.id == "demo-5")
        .unwrap();
    assert!(stored.tasks.is_empty());

    let response = app
        .send(
            Method::DELETE,
            &format!("/api/v1/pipeline/leads/demo-5/tasks/{task_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_task_is_rejected() {
    let app = build_test_app().await;
    let token = app.recruiter().await;

    let response = app
        .send(
            Method::POST,
            "/api/v1/pipeline/leads/demo-5/tasks",
            Some(&token),
            Some(json!({ "text": "   " })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn save_detail_overwrites_editable_fields() {
    let app = build_test_app().await;
    let token = app.recruiter().await;

    let response = app
        .send(Method::GET, "/api/v1/pipeline/leads/demo-2", Some(&token), None)
        .await;
    let mut lead = body_json(response).await;
    lead["score"] = 88.into();
    lead["priority"] = "High".into();
    lead["bio"] = "Called back, very motivated.".into();

    let response = app
        .send(
            Method::PUT,
            "/api/v1/pipeline/leads/demo-2",
            Some(&token),
            Some(lead.clone()),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["outcome"], "confirmed");
    assert_eq!(json["lead"]["score"], 88);

    let stored = app
        .store
        .snapshot()
        .into_iter()
        .find(|l| l.id == "demo-2")
        .unwrap();
    assert_eq!(stored.score, 88);
    assert_eq!(stored.bio, "Called back, very motivated.");

    let response = app
        .send(
            Method::PUT,
            "/api/v1/pipeline/leads/demo-3",
            Some(&token),
            Some(lead),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn save_detail_can_clear_the_follow_up() {
    let app = build_test_app().await;
    let token = app.recruiter().await;

    let response = app
        .send(Method::GET, "/api/v1/pipeline/leads/demo-1", Some(&token), None)
        .await;
    let mut lead = body_json(response).await;
    assert!(lead["nextFollowUp"].is_string());
    lead["nextFollowUp"] = serde_json::Value::Null;

    let response = app
        .send(
            Method::PUT,
            "/api/v1/pipeline/leads/demo-1",
            Some(&token),
            Some(lead),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["lead"].get("nextFollowUp").is_none());

    let stored = app
        .store
        .snapshot()
        .into_iter()
        .find(|l| l.id == "demo-1")
        .unwrap();
    assert_eq!(stored.next_follow_up, None);
}

#[tokio::test]
async fn batch_delete_removes_exactly_the_selection() {
    let app = build_test_app().await;
    let token = app.recruiter().await;

    let response = app
        .send(
            Method::POST,
            "/api/v1/pipeline/batch/delete",
            Some(&token),
            Some(json!({ "ids": ["demo-1", "demo-3", "demo-1"] })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["succeeded"], json!(["demo-1", "demo-3"]));
    assert_eq!(json["failed"], json!([]));

    let mut remaining: Vec<String> = app.store.snapshot().into_iter().map(|l| l.id).collect();
    remaining.sort();
    assert_eq!(remaining, vec!["demo-2", "demo-4", "demo-5"]);
    assert_eq!(app.state.pipeline.snapshot().len(), 3);
}

#[tokio::test]
async fn batch_status_moves_every_selected_lead() {
    let app = build_test_app().await;
    let token = app.recruiter().await;

    let response = app
        .send(
            Method::POST,
            "/api/v1/pipeline/batch/status",
            Some(&token),
            Some(json!({ "ids": ["demo-2", "demo-5"], "status": "Rejected" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let rejected: Vec<String> = app
        .store
        .snapshot()
        .into_iter()
        .filter(|l| l.status == LeadStatus::Rejected)
        .map(|l| l.id)
        .collect();
    assert_eq!(rejected.len(), 3);
    assert!(rejected.contains(&"demo-2".to_string()));
    assert!(rejected.contains(&"demo-5".to_string()));
}

#[tokio::test]
async fn manual_entry_and_reload() {
    let app = build_test_app().await;
    let token = app.recruiter().await;

    let response = app
        .send(
            Method::POST,
            "/api/v1/pipeline/leads",
            Some(&token),
            Some(json!({
                "fullName": "Tom Klein (Manual)",
                "email": "tom@example.lu",
                "phone": "+352 600",
                "postAppliedFor": "Promoter",
                "bio": "Walked into the office."
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["source"], "Manual Entry");

    let response = app
        .send(Method::POST, "/api/v1/pipeline/reload", Some(&token), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["count"], 6);
}
