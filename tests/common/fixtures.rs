//! Test fixtures and data factories

use chrono::{TimeZone, Utc};
use hms_backend::core::models::{
    Account, Appointment, NewAccount, NewAppointment, NewPatient, Patient, Role,
};
use uuid::Uuid;

/// Factory for registration inputs
pub struct AccountFactory;

impl AccountFactory {
    /// A doctor with a unique email
    pub fn doctor() -> NewAccount {
        Self::with_role(Role::Doctor)
    }

    /// An admin with a unique email
    pub fn admin() -> NewAccount {
        Self::with_role(Role::Admin)
    }

    /// A patient with a unique email
    pub fn patient() -> NewAccount {
        Self::with_role(Role::Patient)
    }

    /// Any role with a unique email
    pub fn with_role(role: Role) -> NewAccount {
        NewAccount {
            email: format!("test-{}@example.com", &Uuid::new_v4().to_string()[..8]),
            password: "secret1".to_string(),
            first_name: "Test".to_string(),
            last_name: "Person".to_string(),
            role,
        }
    }

    /// Fixed email, for conflict tests
    pub fn with_email(email: &str) -> NewAccount {
        let mut input = Self::doctor();
        input.email = email.to_string();
        input
    }

    /// A persisted-shape account (not written to any store)
    pub fn detached_account(role: Role) -> Account {
        Account::new(&Self::with_role(role), "unused-hash".to_string())
    }
}

/// Factory for patient records
pub struct PatientFactory;

impl PatientFactory {
    /// A patient record owned by the given account
    pub fn for_account(account_id: Uuid) -> Patient {
        Patient::new(NewPatient {
            account_id,
            date_of_birth: chrono::NaiveDate::from_ymd_opt(1985, 6, 15),
            phone: Some("555-0101".to_string()),
            address: Some("12 Ward Lane".to_string()),
            blood_type: Some("A-".to_string()),
            allergies: vec!["latex".to_string()],
        })
    }
}

/// Factory for appointments
pub struct AppointmentFactory;

impl AppointmentFactory {
    /// An appointment at a fixed instant
    pub fn at(
        patient_id: Uuid,
        doctor_id: Uuid,
        year: i32,
        month: u32,
        day: u32,
    ) -> Appointment {
        Appointment::new(NewAppointment {
            patient_id,
            doctor_id,
            appointment_date: Utc
                .with_ymd_and_hms(year, month, day, 10, 0, 0)
                .single()
                .expect("valid date"),
            notes: None,
        })
    }
}
