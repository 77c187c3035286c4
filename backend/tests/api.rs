use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use backend::config::AppConfig;
use backend::db::Database;
use backend::error::json_config;
use backend::events::DataEvents;
use backend::job_controller::state::{start_job_updater, JobsState};
use serde_json::{json, Value};
use std::time::Duration;
use tempfile::TempDir;

struct TestState {
    _dir: TempDir,
    db: Database,
    jobs: JobsState,
    events: DataEvents,
    config: AppConfig,
}

fn test_state() -> TestState {
    let dir = tempfile::tempdir().expect("temp dir");
    let db = Database::new(dir.path().join("api.sqlite"));
    db.initialize().expect("initialize");
    let (jobs, rx) = JobsState::new();
    tokio::spawn(start_job_updater(jobs.clone(), rx));
    let config = AppConfig {
        database_path: db.path().to_path_buf(),
        demo_stage_delay: Duration::ZERO,
        ..Default::default()
    };
    TestState {
        _dir: dir,
        db,
        jobs,
        events: DataEvents::new(),
        config,
    }
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(json_config($state.config.json_limit))
                .app_data(web::Data::new($state.db.clone()))
                .app_data(web::Data::new($state.jobs.clone()))
                .app_data(web::Data::new($state.events.clone()))
                .app_data(web::Data::new($state.config.clone()))
                .configure(backend::configure_services),
        )
        .await
    };
}

macro_rules! get_json {
    ($app:expr, $uri:expr $(,)?) => {
        call_json!($app, test::TestRequest::get().uri($uri))
    };
}

macro_rules! send_json {
    ($app:expr, $req:expr, $body:expr $(,)?) => {
        call_json!($app, $req.set_json($body))
    };
}

macro_rules! delete_json {
    ($app:expr, $uri:expr $(,)?) => {
        call_json!($app, test::TestRequest::delete().uri($uri))
    };
}

/// Expands to a future yielding `(status, json body)`.
macro_rules! call_json {
    ($app:expr, $req:expr $(,)?) => {
        async {
            let resp = test::call_service(&$app, $req.to_request()).await;
            let status = resp.status();
            let body: Value = test::read_body_json(resp).await;
            (status, body)
        }
    };
}

#[actix_web::test]
async fn bulk_rejects_out_of_range_count_without_writing() {
    let state = test_state();
    let app = init_app!(state);

    for count in [0, 101] {
        let (status, body) = send_json!(
            app,
            test::TestRequest::post().uri("/api/sites/bulk"),
            json!({ "count": count, "naming_convention": "Site-{n}" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    let (_, sites) = get_json!(app, "/api/sites").await;
    assert_eq!(sites, json!([]));
}

#[actix_web::test]
async fn bulk_requires_placeholder() {
    let state = test_state();
    let app = init_app!(state);

    let (status, _) = send_json!(
        app,
        test::TestRequest::post().uri("/api/sites/bulk"),
        json!({ "count": 3, "naming_convention": "Site" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, sites) = get_json!(app, "/api/sites").await;
    assert_eq!(sites, json!([]));
}

#[actix_web::test]
async fn bulk_without_randomization_differs_only_in_name() {
    let state = test_state();
    let app = init_app!(state);

    let (status, created) = send_json!(
        app,
        test::TestRequest::post().uri("/api/sites/bulk"),
        json!({
            "count": 3,
            "naming_convention": "Site-{n}",
            "template": { "users": 40, "devices": 90, "region": "europe", "priority": "high" }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created = created.as_array().expect("array").clone();
    assert_eq!(created.len(), 3);

    let names: Vec<&str> = created.iter().map(|s| s["name"].as_str().expect("name")).collect();
    assert_eq!(names, ["Site-01", "Site-02", "Site-03"]);

    let strip = |site: &Value| {
        let mut site = site.clone();
        let obj = site.as_object_mut().expect("object");
        obj.remove("id");
        obj.remove("name");
        site
    };
    assert_eq!(strip(&created[0]), strip(&created[1]));
    assert_eq!(strip(&created[1]), strip(&created[2]));

    let (_, listed) = get_json!(app, "/api/sites").await;
    assert_eq!(listed.as_array().expect("array").len(), 3);
}

#[actix_web::test]
async fn bulk_with_oversized_template_answers_bad_request() {
    let state = test_state();
    let app = init_app!(state);

    let (status, body) = send_json!(
        app,
        test::TestRequest::post().uri("/api/sites/bulk"),
        json!({
            "count": 2,
            "naming_convention": "Site-{n}",
            "template": { "users": 2_000_000_000u32, "devices": 0 },
            "randomize": { "devices": true }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error").contains("users"));
    let (_, sites) = get_json!(app, "/api/sites").await;
    assert_eq!(sites, json!([]));
}

#[actix_web::test]
async fn site_crud_and_filters() {
    let state = test_state();
    let app = init_app!(state);

    let (status, site) = send_json!(
        app,
        test::TestRequest::post().uri("/api/sites"),
        json!({ "name": "Berlin Office", "region": "europe", "status": "active" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = site["id"].as_str().expect("id").to_string();

    let (status, updated) = send_json!(
        app,
        test::TestRequest::put().uri(&format!("/api/sites/{}", id)),
        json!({ "progress": 45, "id": "hijack" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["progress"], 45);
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["region"], "europe");

    let (_, filtered) = get_json!(app, "/api/sites?status=planning").await;
    assert_eq!(filtered, json!([]));
    let (_, filtered) = get_json!(app, "/api/sites?search=berlin").await;
    assert_eq!(filtered.as_array().expect("array").len(), 1);

    let (status, _) = send_json!(
        app,
        test::TestRequest::put().uri(&format!("/api/sites/{}", id)),
        json!({ "progress": 140 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = delete_json!(app, &format!("/api/sites/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = get_json!(app, &format!("/api/sites/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().expect("error").contains(&id));
}

#[actix_web::test]
async fn export_csv_is_an_attachment() {
    let state = test_state();
    let app = init_app!(state);
    send_json!(
        app,
        test::TestRequest::post().uri("/api/sites"),
        json!({ "name": "Austin" }),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/sites/export?format=csv").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .expect("content-disposition")
        .to_str()
        .expect("ascii")
        .to_string();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("sites.csv"));

    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).expect("utf8");
    let mut lines = text.lines();
    assert!(lines.next().expect("header").starts_with("id,name,region,country"));
    assert!(lines.next().expect("row").contains("Austin"));
    assert!(lines.next().is_none());
}

#[actix_web::test]
async fn created_library_rows_are_always_custom() {
    let state = test_state();
    let app = init_app!(state);

    let (status, item) = send_json!(
        app,
        test::TestRequest::post().uri("/api/library/network-vendors"),
        json!({ "name": "Arista", "is_custom": false }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["is_custom"], true);
    assert_eq!(item["name"], "Arista");

    let (status, body) = get_json!(app, "/api/library/spaceships").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn library_delete_protects_defaults_and_removes_custom_rows() {
    let state = test_state();
    let app = init_app!(state);

    let (_, before) = get_json!(app, "/api/library/device_types").await;
    let before = before.as_array().expect("array").clone();
    let default_id = before
        .iter()
        .find(|i| i["is_custom"] == false)
        .expect("default row")["id"]
        .as_i64()
        .expect("id");

    let (status, body) = delete_json!(app, &format!("/api/library/device_types/{}", default_id)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].is_string());
    let (_, after) = get_json!(app, "/api/library/device_types").await;
    assert_eq!(after.as_array().expect("array").len(), before.len());

    let (_, custom) = send_json!(
        app,
        test::TestRequest::post().uri("/api/library/device_types"),
        json!({ "name": "Badge reader", "device_category": "iot" }),
    )
    .await;
    let custom_id = custom["id"].as_i64().expect("id");
    let (status, body) = delete_json!(app, &format!("/api/library/device_types/{}", custom_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], custom_id);

    let (_, after) = get_json!(app, "/api/library/device_types").await;
    let after_ids: Vec<i64> = after
        .as_array()
        .expect("array")
        .iter()
        .map(|i| i["id"].as_i64().expect("id"))
        .collect();
    let before_ids: Vec<i64> = before.iter().map(|i| i["id"].as_i64().expect("id")).collect();
    assert_eq!(after_ids, before_ids);

    let (status, _) = delete_json!(app, "/api/library/device_types/99999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn system_role_delete_is_refused() {
    let state = test_state();
    let app = init_app!(state);

    let (_, roles) = get_json!(app, "/api/rbac/roles").await;
    let admin = roles
        .as_array()
        .expect("array")
        .iter()
        .find(|r| r["is_system_role"] == true)
        .expect("system role")
        .clone();

    let (status, _) = delete_json!(app, &format!("/api/rbac/roles/{}", admin["id"])).await;
    assert!(!status.is_success());
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send_json!(
        app,
        test::TestRequest::put().uri(&format!("/api/rbac/roles/{}", admin["id"])),
        json!({ "name": "Renamed" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, roles_after) = get_json!(app, "/api/rbac/roles").await;
    assert_eq!(roles_after, roles);
}

#[actix_web::test]
async fn duplicate_role_names_conflict() {
    let state = test_state();
    let app = init_app!(state);

    let (status, _) = send_json!(
        app,
        test::TestRequest::post().uri("/api/rbac/roles"),
        json!({ "name": "Viewer" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn use_cases_always_carry_arrays() {
    let state = test_state();
    let app = init_app!(state);

    let (status, created) = send_json!(
        app,
        test::TestRequest::post().uri("/api/use-cases"),
        json!({ "title": "Contractor onboarding", "category": "Guest Access" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["is_custom"], true);

    let (status, use_cases) = get_json!(app, "/api/use-cases").await;
    assert_eq!(status, StatusCode::OK);
    let without_tests: Vec<&Value> = use_cases
        .as_array()
        .expect("array")
        .iter()
        .filter(|u| u["test_cases"] == json!([]))
        .collect();
    assert!(without_tests.len() >= 2);
    for use_case in use_cases.as_array().expect("array") {
        for key in ["test_cases", "documentation_links", "success_criteria", "requirements"] {
            assert!(use_case[key].is_array(), "{} must be an array", key);
        }
    }

    let id = created["id"].as_i64().expect("id");
    let (status, _) = send_json!(
        app,
        test::TestRequest::post().uri(&format!("/api/use-cases/{}/documentation-links", id)),
        json!({ "title": "Runbook", "url": "https://example.com/runbook" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, detail) = get_json!(app, &format!("/api/use-cases/{}", id)).await;
    assert_eq!(detail["documentation_links"][0]["title"], "Runbook");
}

#[actix_web::test]
async fn policies_reference_existing_sites() {
    let state = test_state();
    let app = init_app!(state);

    let (status, _) = send_json!(
        app,
        test::TestRequest::post().uri("/api/policies"),
        json!({ "name": "Scoped", "site_id": "missing" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, policy) = send_json!(
        app,
        test::TestRequest::post().uri("/api/policies"),
        json!({ "name": "Guest isolation", "policy_type": "guest" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(policy["enabled"], true);

    let (_, summary) = get_json!(app, "/api/analytics/summary").await;
    assert_eq!(summary["total_policies"], 1);
    assert_eq!(summary["enabled_policies"], 1);
}

#[actix_web::test]
async fn demo_load_then_clear_restores_the_store() {
    let state = test_state();
    let app = init_app!(state);

    let (_, summary_before) = get_json!(app, "/api/analytics/summary").await;
    let (_, scenarios) = get_json!(app, "/api/demo/scenarios").await;
    assert_eq!(scenarios.as_array().expect("array").len(), 7);

    let (status, body) = send_json!(
        app,
        test::TestRequest::post().uri("/api/demo/load"),
        json!({ "scenario": "healthcare" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let job_id = body["job_id"].as_str().expect("job id").to_string();

    let mut status_body = Value::Null;
    for _ in 0..500 {
        let (_, current) = get_json!(app, &format!("/api/demo/status/{}", job_id)).await;
        status_body = current;
        if status_body.get("Completed").is_some() || status_body.get("Failed").is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(status_body.get("Completed").is_some(), "job did not complete: {}", status_body);

    let (_, summary_loaded) = get_json!(app, "/api/analytics/summary").await;
    assert_eq!(summary_loaded["total_sites"], 8);
    assert_eq!(summary_loaded["total_accounts"], 180);

    let (status, _) = send_json!(app, test::TestRequest::post().uri("/api/demo/clear"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    let (_, summary_after) = get_json!(app, "/api/analytics/summary").await;
    assert_eq!(summary_after, summary_before);

    let (status, _) = get_json!(app, "/api/demo/status/unknown-job").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn unknown_scenario_is_rejected_as_json() {
    let state = test_state();
    let app = init_app!(state);

    let (status, body) = send_json!(
        app,
        test::TestRequest::post().uri("/api/demo/load"),
        json!({ "scenario": "casino" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn library_references_must_exist_and_survive_parent_delete() {
    let state = test_state();
    let app = init_app!(state);

    let (status, body) = send_json!(
        app,
        test::TestRequest::post().uri("/api/library/test_cases"),
        json!({ "name": "Orphan", "expected_outcome": "ok", "use_case_id": 987654 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error").contains("use_case_id"));

    let (status, use_case) = send_json!(
        app,
        test::TestRequest::post().uri("/api/library/use_cases"),
        json!({ "title": "Contractor access" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let use_case_id = use_case["id"].as_i64().expect("id");

    let (status, test_case) = send_json!(
        app,
        test::TestRequest::post().uri("/api/library/test_cases"),
        json!({ "name": "Contractor joins", "expected_outcome": "Limited VLAN", "use_case_id": use_case_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let test_case_id = test_case["id"].as_i64().expect("id");

    let (status, _) = delete_json!(app, &format!("/api/library/use_cases/{}", use_case_id)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, test_cases) = get_json!(app, "/api/library/test_cases").await;
    let kept = test_cases
        .as_array()
        .expect("array")
        .iter()
        .find(|t| t["id"] == test_case_id)
        .expect("test case kept");
    assert!(kept["use_case_id"].is_null());
}
