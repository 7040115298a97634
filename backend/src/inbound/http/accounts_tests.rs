//! Tests for account handlers.

use actix_web::http::StatusCode;
use actix_web::{App, test};
use chrono::Utc;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::{AccountId, DisplayName, PurchaseCount, Role};
use crate::inbound::http::error::json_config;
use crate::inbound::http::test_utils::{
    MockPorts, login_as, session_cookie, test_identity, test_login, test_session_middleware,
};

macro_rules! accounts_app {
    ($ports:expr) => {
        App::new()
            .app_data($ports.into_state())
            .app_data(json_config())
            .wrap(test_session_middleware())
            .service(test_login)
            .service(
                web::scope("/api/v1")
                    .service(register)
                    .service(login)
                    .service(logout)
                    .service(current_account),
            )
    };
}

fn profile(name: &str, role: Role) -> AccountProfile {
    AccountProfile {
        id: AccountId::new(5).expect("valid id"),
        display_name: DisplayName::new(name).expect("valid name"),
        role,
        purchase_count: PurchaseCount::ZERO,
        created_at: Utc::now(),
    }
}

#[actix_web::test]
async fn register_returns_created_profile() {
    let mut ports = MockPorts::default();
    ports
        .registration
        .expect_register()
        .withf(|request| request.display_name().as_str() == "Ana" && request.password() == "tacos")
        .times(1)
        .return_once(|_| Ok(profile("Ana", Role::Customer)));
    let app = test::init_service(accounts_app!(ports)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(json!({"displayName": " Ana ", "password": "tacos", "accessCode": "C"}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["displayName"], "Ana");
    assert_eq!(body["role"], "customer");
    assert!(body.get("passwordHash").is_none());
}

#[rstest]
#[case(json!({"displayName": "Ana", "password": "abc", "accessCode": "C"}), "password")]
#[case(json!({"displayName": "  ", "password": "tacos", "accessCode": "C"}), "displayName")]
#[case(json!({"displayName": "Ana", "password": "tacos", "accessCode": " "}), "accessCode")]
#[actix_web::test]
async fn register_rejects_invalid_fields_without_calling_service(
    #[case] payload: Value,
    #[case] field: &str,
) {
    let app = test::init_service(accounts_app!(MockPorts::default())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "validation_failed");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["returnTo"], "/register");
}

#[actix_web::test]
async fn register_maps_duplicate_to_conflict() {
    let mut ports = MockPorts::default();
    ports
        .registration
        .expect_register()
        .return_once(|_| Err(ServiceError::duplicate_user("Ana")));
    let app = test::init_service(accounts_app!(ports)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(json!({"displayName": "Ana", "password": "tacos", "accessCode": "C"}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "duplicate_user");
}

#[actix_web::test]
async fn malformed_body_uses_error_envelope() {
    let app = test::init_service(accounts_app!(MockPorts::default())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(json!({"displayName": "Ana"}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "malformed_body");
}

#[actix_web::test]
async fn login_sets_session_and_returns_identity() {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_authenticate()
        .withf(|credentials| credentials.display_name() == "Ana")
        .return_once(|_| Ok(test_identity(5, Role::Customer)));
    ports
        .accounts
        .expect_current_account()
        .withf(|identity| identity.account_id.get() == 5)
        .return_once(|_| {
            Ok(AccountStatus {
                id: AccountId::new(5).expect("valid id"),
                display_name: DisplayName::new("Ana").expect("valid name"),
                role: Role::Customer,
                purchase_count: PurchaseCount::new(3),
                purchases_until_reward: 5,
                has_unclaimed_reward: false,
            })
        });
    let app = test::init_service(accounts_app!(ports)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"displayName": "Ana", "password": "tacos"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res).expect("session cookie");

    let me = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(me.status(), StatusCode::OK);
    let body: Value = test::read_body_json(me).await;
    assert_eq!(body["purchasesUntilReward"], 5);
}

#[rstest]
#[case(ServiceError::user_not_found(), "user_not_found")]
#[case(ServiceError::invalid_credentials(), "invalid_credentials")]
#[actix_web::test]
async fn failed_login_is_unauthorised_without_cookie(
    #[case] failure: ServiceError,
    #[case] tag: &str,
) {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_authenticate()
        .return_once(move |_| Err(failure));
    let app = test::init_service(accounts_app!(ports)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"displayName": "Ana", "password": "wrong"}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&res).is_none());
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], tag);
    assert_eq!(body["returnTo"], "/login");
}

#[actix_web::test]
async fn current_account_requires_login() {
    let app = test::init_service(accounts_app!(MockPorts::default())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/users/me").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn removed_account_ends_the_session() {
    let mut ports = MockPorts::default();
    ports
        .accounts
        .expect_current_account()
        .return_once(|_| Err(ServiceError::user_not_found()));
    let app = test::init_service(accounts_app!(ports)).await;
    let cookie = login_as!(&app, 4, "employee");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let removal = session_cookie(&res).expect("removal cookie");
    assert_eq!(removal.value(), "");
}

#[actix_web::test]
async fn logout_is_idempotent() {
    let app = test::init_service(accounts_app!(MockPorts::default())).await;

    for _ in 0..2 {
        let res = test::call_service(
            &app,
            test::TestRequest::post().uri("/api/v1/logout").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
