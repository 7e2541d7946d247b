//! HTTP surface tests: envelope shape, middleware enforcement, role gates

use crate::common::{test_auth_config, test_storage};
use actix_web::{test, web, App};
use hms_backend::auth::AuthService;
use hms_backend::server::middleware::AuthMiddleware;
use hms_backend::server::routes;
use hms_backend::server::server::json_config;
use hms_backend::server::AppState;
use hms_backend::Config;
use serde_json::json;
use std::sync::Arc;

async fn test_state() -> AppState {
    let storage = test_storage().await;
    let auth = AuthService::new(&test_auth_config(), Arc::clone(&storage));
    AppState::new(Config::default(), auth, storage)
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(json_config())
                .wrap(AuthMiddleware)
                .configure(routes::configure_all),
        )
        .await
    };
}

fn register_body(email: &str, role: &str) -> serde_json::Value {
    json!({
        "email": email,
        "password": "secret1",
        "firstName": "Test",
        "lastName": "Person",
        "role": role,
    })
}

#[actix_web::test]
async fn test_register_returns_envelope_with_token() {
    let app = test_app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_body("a@x.com", "doctor"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["user"]["email"], "a@x.com");
    assert_eq!(body["data"]["user"]["role"], "doctor");
    assert_eq!(body["data"]["expires_in"], 3600);
    assert!(body["data"]["access_token"].as_str().unwrap().len() > 20);
    assert!(body["data"]["user"].get("password_hash").is_none());
}

#[actix_web::test]
async fn test_register_duplicate_email_conflicts() {
    let app = test_app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_body("a@x.com", "doctor"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_body("A@X.com", "nurse"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "User already exists with this email");
}

#[actix_web::test]
async fn test_register_rejects_unknown_fields() {
    let app = test_app!(test_state().await);

    let mut body = register_body("a@x.com", "doctor");
    body["isAdmin"] = json!(true);

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
}

#[actix_web::test]
async fn test_login_flow_and_bad_credentials() {
    let app = test_app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_body("a@x.com", "doctor"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "a@x.com", "password": "wrong"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid credentials");

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "a@x.com", "password": "secret1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert!(body["data"]["user"]["lastLoginAt"].is_string());
}

#[actix_web::test]
async fn test_protected_route_requires_bearer_token() {
    let app = test_app!(test_state().await);

    let req = test::TestRequest::get().uri("/auth/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Missing bearer token");

    let req = test::TestRequest::get()
        .uri("/auth/profile")
        .insert_header(("Authorization", "Bearer not-a-real-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid or expired token");
}

#[actix_web::test]
async fn test_verify_token_echoes_claims() {
    let app = test_app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_body("a@x.com", "receptionist"))
        .to_request();
    let body: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/auth/verify-token")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["valid"], true);
    assert_eq!(body["data"]["user"]["email"], "a@x.com");
    assert_eq!(body["data"]["user"]["role"], "receptionist");
}

#[actix_web::test]
async fn test_admin_gate_on_user_management() {
    let app = test_app!(test_state().await);

    // A patient-role token must not reach the admin surface
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_body("p@x.com", "patient"))
        .to_request();
    let body: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    let patient_token = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/users")
        .insert_header(("Authorization", format!("Bearer {}", patient_token)))
        .set_json(register_body("n@x.com", "nurse"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    // An admin token passes
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_body("root@x.com", "admin"))
        .to_request();
    let body: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    let admin_token = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/users")
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .set_json(register_body("n@x.com", "nurse"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let req = test::TestRequest::get()
        .uri("/users?page=1&limit=10")
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["pagination"]["total"], 3);
}

#[actix_web::test]
async fn test_patient_lifecycle_over_http() {
    let app = test_app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_body("doc@x.com", "doctor"))
        .to_request();
    let body: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    let staff_token = body["data"]["access_token"].as_str().unwrap().to_string();
    let doctor_id = body["data"]["user"]["id"].as_str().unwrap().to_string();

    // Create a patient (account + clinical record)
    let req = test::TestRequest::post()
        .uri("/patients")
        .insert_header(("Authorization", format!("Bearer {}", staff_token)))
        .set_json(json!({
            "email": "pat@x.com",
            "password": "secret1",
            "firstName": "Pat",
            "lastName": "Ient",
            "dateOfBirth": "1990-04-02",
            "bloodType": "O+",
            "allergies": ["penicillin"],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["user"]["role"], "patient");
    let mrn = body["data"]["patient"]["medicalRecordNumber"]
        .as_str()
        .unwrap();
    assert!(mrn.starts_with("MR"));
    let patient_id = body["data"]["patient"]["id"].as_str().unwrap().to_string();

    // Update the record
    let req = test::TestRequest::put()
        .uri(&format!("/patients/{}", patient_id))
        .insert_header(("Authorization", format!("Bearer {}", staff_token)))
        .set_json(json!({"phone": "555-0303"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["phone"], "555-0303");

    // Book an appointment and list it back
    let req = test::TestRequest::post()
        .uri("/appointments")
        .insert_header(("Authorization", format!("Bearer {}", staff_token)))
        .set_json(json!({
            "patientId": patient_id,
            "doctorId": doctor_id,
            "appointmentDate": "2026-09-01T10:00:00Z",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "scheduled");

    let req = test::TestRequest::get()
        .uri(&format!("/patients/{}/appointments", patient_id))
        .insert_header(("Authorization", format!("Bearer {}", staff_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // The patient may list their own appointments but not read the record
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "pat@x.com", "password": "secret1"}))
        .to_request();
    let body: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    let patient_token = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/patients/{}/appointments", patient_id))
        .insert_header(("Authorization", format!("Bearer {}", patient_token)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get()
        .uri(&format!("/patients/{}", patient_id))
        .insert_header(("Authorization", format!("Bearer {}", patient_token)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 403);
}

#[actix_web::test]
async fn test_public_diagnostics() {
    let app = test_app!(test_state().await);

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["service"], "HMS Backend");
    assert_eq!(body["status"], "running");

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "OK");

    let req = test::TestRequest::get().uri("/health/detailed").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["database"], true);
}
