//! Database operations against real in-memory SQLite

use crate::common::fixtures::{AccountFactory, AppointmentFactory, PatientFactory};
use crate::common::test_storage;
use hms_backend::core::models::{PatientUpdate, Role};
use hms_backend::HmsError;

#[tokio::test]
async fn test_health_check_after_migration() {
    let storage = test_storage().await;
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn test_find_missing_account() {
    let storage = test_storage().await;

    let by_email = storage
        .db()
        .find_account_by_email("nonexistent@example.com")
        .await
        .expect("query");
    assert!(by_email.is_none());

    let by_id = storage
        .db()
        .find_account_by_id(uuid::Uuid::new_v4())
        .await
        .expect("query");
    assert!(by_id.is_none());
}

#[tokio::test]
async fn test_create_and_find_account() {
    let storage = test_storage().await;

    let account = AccountFactory::detached_account(Role::Pharmacist);
    storage.db().create_account(&account).await.expect("create");

    let found = storage
        .db()
        .find_account_by_id(account.id)
        .await
        .expect("query")
        .expect("present");
    assert_eq!(found.email, account.email);
    assert_eq!(found.role, Role::Pharmacist);
    assert_eq!(found.password_hash, "unused-hash");

    let found = storage
        .db()
        .find_account_by_email(&account.email)
        .await
        .expect("query")
        .expect("present");
    assert_eq!(found.id, account.id);
}

/// The unique email column backstops the lookup-then-insert race.
#[tokio::test]
async fn test_unique_email_enforced_at_store() {
    let storage = test_storage().await;

    let first = AccountFactory::detached_account(Role::Doctor);
    let mut second = AccountFactory::detached_account(Role::Nurse);
    second.email = first.email.clone();

    storage.db().create_account(&first).await.expect("first insert");

    let err = storage
        .db()
        .create_account(&second)
        .await
        .expect_err("duplicate insert must fail");
    assert!(matches!(err, HmsError::Conflict(_)));
}

#[tokio::test]
async fn test_update_last_login() {
    let storage = test_storage().await;

    let account = AccountFactory::detached_account(Role::Doctor);
    storage.db().create_account(&account).await.expect("create");
    assert!(account.last_login_at.is_none());

    storage
        .db()
        .update_last_login(account.id)
        .await
        .expect("update");

    let found = storage
        .db()
        .find_account_by_id(account.id)
        .await
        .expect("query")
        .expect("present");
    assert!(found.last_login_at.is_some());
    assert!(found.updated_at >= account.updated_at);
}

#[tokio::test]
async fn test_set_account_active() {
    let storage = test_storage().await;

    let account = AccountFactory::detached_account(Role::Receptionist);
    storage.db().create_account(&account).await.expect("create");

    let updated = storage
        .db()
        .set_account_active(account.id, false)
        .await
        .expect("deactivate");
    assert!(!updated.is_active);

    let updated = storage
        .db()
        .set_account_active(account.id, true)
        .await
        .expect("reactivate");
    assert!(updated.is_active);

    let missing = storage
        .db()
        .set_account_active(uuid::Uuid::new_v4(), false)
        .await;
    assert!(matches!(missing, Err(HmsError::NotFound(_))));
}

#[tokio::test]
async fn test_list_accounts_pagination() {
    let storage = test_storage().await;

    for _ in 0..5 {
        let account = AccountFactory::detached_account(Role::Nurse);
        storage.db().create_account(&account).await.expect("create");
    }

    let (page, total) = storage.db().list_accounts(0, 2).await.expect("list");
    assert_eq!(total, 5);
    assert_eq!(page.len(), 2);

    let (page, _) = storage.db().list_accounts(4, 2).await.expect("list");
    assert_eq!(page.len(), 1);
}

#[tokio::test]
async fn test_patient_create_find_update() {
    let storage = test_storage().await;

    let account = AccountFactory::detached_account(Role::Patient);
    storage.db().create_account(&account).await.expect("create account");

    let patient = PatientFactory::for_account(account.id);
    storage.db().create_patient(&patient).await.expect("create patient");

    let (found, owner) = storage
        .db()
        .find_patient_by_id(patient.id)
        .await
        .expect("query")
        .expect("present");
    assert_eq!(found.account_id, account.id);
    assert_eq!(found.allergies, vec!["latex"]);
    assert_eq!(owner.expect("joined account").id, account.id);

    let updated = storage
        .db()
        .update_patient(
            patient.id,
            &PatientUpdate {
                phone: Some("555-0202".to_string()),
                allergies: Some(vec!["latex".to_string(), "aspirin".to_string()]),
                ..Default::default()
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.phone.as_deref(), Some("555-0202"));
    assert_eq!(updated.allergies.len(), 2);
    // Untouched fields survive a partial update
    assert_eq!(updated.blood_type.as_deref(), Some("A-"));

    let missing = storage
        .db()
        .update_patient(uuid::Uuid::new_v4(), &PatientUpdate::default())
        .await;
    assert!(matches!(missing, Err(HmsError::NotFound(_))));
}

#[tokio::test]
async fn test_appointments_listed_by_date_ascending() {
    let storage = test_storage().await;

    let doctor = AccountFactory::detached_account(Role::Doctor);
    let patient_account = AccountFactory::detached_account(Role::Patient);
    storage.db().create_account(&doctor).await.expect("doctor");
    storage
        .db()
        .create_account(&patient_account)
        .await
        .expect("patient account");

    let patient = PatientFactory::for_account(patient_account.id);
    storage.db().create_patient(&patient).await.expect("patient");

    // Inserted out of order on purpose
    let late = AppointmentFactory::at(patient.id, doctor.id, 2026, 11, 20);
    let early = AppointmentFactory::at(patient.id, doctor.id, 2026, 9, 1);
    storage.db().create_appointment(&late).await.expect("late");
    storage.db().create_appointment(&early).await.expect("early");

    let listed = storage
        .db()
        .list_appointments_for_patient(patient.id)
        .await
        .expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, early.id);
    assert_eq!(listed[1].id, late.id);
    assert!(listed[0].appointment_date < listed[1].appointment_date);

    // Another patient sees nothing
    let none = storage
        .db()
        .list_appointments_for_patient(uuid::Uuid::new_v4())
        .await
        .expect("list");
    assert!(none.is_empty());
}
