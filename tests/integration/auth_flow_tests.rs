//! Auth component flows against a real in-memory store

use crate::common::fixtures::AccountFactory;
use crate::common::test_auth_service;
use hms_backend::core::models::Role;
use hms_backend::HmsError;

/// Register succeeds for a fresh email; login with the same credentials
/// succeeds afterwards.
#[tokio::test]
async fn test_register_then_login() {
    let (auth, _storage) = test_auth_service().await;
    let input = AccountFactory::doctor();
    let email = input.email.clone();

    let (account, token) = auth.register(input).await.expect("register");
    assert_eq!(account.role, Role::Doctor);
    assert!(account.is_active);
    assert!(!token.is_empty());

    let (logged_in, token) = auth.login(&email, "secret1").await.expect("login");
    assert_eq!(logged_in.id, account.id);
    assert!(logged_in.last_login_at.is_some());
    assert!(!token.is_empty());
}

/// Reusing an email fails with Conflict and creates no second account,
/// regardless of case.
#[tokio::test]
async fn test_duplicate_email_conflict() {
    let (auth, storage) = test_auth_service().await;

    auth.register(AccountFactory::with_email("a@x.com"))
        .await
        .expect("first registration");

    let err = auth
        .register(AccountFactory::with_email("a@x.com"))
        .await
        .expect_err("duplicate must fail");
    assert!(matches!(err, HmsError::Conflict(_)));

    // Case-insensitive comparison
    let err = auth
        .register(AccountFactory::with_email("A@X.COM"))
        .await
        .expect_err("case-variant duplicate must fail");
    assert!(matches!(err, HmsError::Conflict(_)));

    let (accounts, total) = storage.db().list_accounts(0, 10).await.expect("list");
    assert_eq!(total, 1);
    assert_eq!(accounts.len(), 1);
}

/// A wrong password yields Unauthorized and does not touch last-login.
#[tokio::test]
async fn test_wrong_password_unauthorized() {
    let (auth, storage) = test_auth_service().await;

    let (account, _) = auth
        .register(AccountFactory::with_email("a@x.com"))
        .await
        .expect("register");

    let err = auth
        .login("a@x.com", "wrong")
        .await
        .expect_err("wrong password must fail");
    assert!(matches!(err, HmsError::Unauthorized(_)));

    let stored = storage
        .db()
        .find_account_by_id(account.id)
        .await
        .expect("lookup")
        .expect("account exists");
    assert!(stored.last_login_at.is_none());
}

/// Unknown email yields the same Unauthorized as a bad password.
#[tokio::test]
async fn test_unknown_email_unauthorized() {
    let (auth, _storage) = test_auth_service().await;

    let err = auth
        .login("nobody@x.com", "secret1")
        .await
        .expect_err("unknown email must fail");
    assert!(matches!(err, HmsError::Unauthorized(_)));
}

/// A deactivated account is excluded from future logins.
#[tokio::test]
async fn test_inactive_account_cannot_login() {
    let (auth, storage) = test_auth_service().await;

    let (account, _) = auth
        .register(AccountFactory::with_email("a@x.com"))
        .await
        .expect("register");

    storage
        .db()
        .set_account_active(account.id, false)
        .await
        .expect("deactivate");

    let err = auth
        .login("a@x.com", "secret1")
        .await
        .expect_err("inactive account must not log in");
    assert!(matches!(err, HmsError::Unauthorized(_)));

    // Reactivation restores access
    storage
        .db()
        .set_account_active(account.id, true)
        .await
        .expect("reactivate");
    auth.login("a@x.com", "secret1").await.expect("login again");
}

/// A token issued by register/login round-trips into matching claims.
#[tokio::test]
async fn test_token_round_trip() {
    let (auth, _storage) = test_auth_service().await;

    let mut input = AccountFactory::with_role(Role::Nurse);
    input.first_name = "Nina".to_string();
    input.last_name = "Okafor".to_string();
    let email = input.email.clone();

    let (account, token) = auth.register(input).await.expect("register");

    let claims = auth.validate_token(&token).expect("valid token");
    assert_eq!(claims.sub, account.id);
    assert_eq!(claims.email, email);
    assert_eq!(claims.role, "nurse");
    assert_eq!(claims.first_name, "Nina");
    assert_eq!(claims.last_name, "Okafor");
}

/// Garbage tokens are rejected as Unauthorized.
#[tokio::test]
async fn test_malformed_token_rejected() {
    let (auth, _storage) = test_auth_service().await;

    for token in ["", "garbage", "a.b.c", "Bearer abc"] {
        let err = auth.validate_token(token).expect_err("must fail");
        assert!(matches!(err, HmsError::Unauthorized(_)));
    }
}

/// Validation failures are caught before any store call.
#[tokio::test]
async fn test_register_input_validation() {
    let (auth, storage) = test_auth_service().await;

    let mut bad_email = AccountFactory::doctor();
    bad_email.email = "not-an-email".to_string();
    assert!(matches!(
        auth.register(bad_email).await,
        Err(HmsError::Validation(_))
    ));

    let mut short_password = AccountFactory::doctor();
    short_password.password = "five5".to_string();
    assert!(matches!(
        auth.register(short_password).await,
        Err(HmsError::Validation(_))
    ));

    let mut empty_name = AccountFactory::doctor();
    empty_name.first_name = "  ".to_string();
    assert!(matches!(
        auth.register(empty_name).await,
        Err(HmsError::Validation(_))
    ));

    let (_, total) = storage.db().list_accounts(0, 10).await.expect("list");
    assert_eq!(total, 0, "no account may be created from invalid input");
}

/// Register, duplicate register, bad login, good login, end to end.
#[tokio::test]
async fn test_registration_login_scenario() {
    let (auth, _storage) = test_auth_service().await;

    let mut input = AccountFactory::with_email("a@x.com");
    input.password = "secret1".to_string();
    input.first_name = "A".to_string();
    input.last_name = "B".to_string();
    input.role = Role::Doctor;

    let (account, _) = auth.register(input).await.expect("register succeeds");
    assert_eq!(account.role, Role::Doctor);

    let dup = AccountFactory::with_email("a@x.com");
    assert!(matches!(
        auth.register(dup).await,
        Err(HmsError::Conflict(_))
    ));

    assert!(matches!(
        auth.login("a@x.com", "wrong").await,
        Err(HmsError::Unauthorized(_))
    ));

    let (_, token) = auth.login("a@x.com", "secret1").await.expect("login");
    assert!(!token.is_empty());
}
