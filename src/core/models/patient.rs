//! Patient types
//!
//! A patient record is linked 1:1 to an account with the `patient` role and
//! carries the clinical attributes the dashboard displays.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Clinical record linked to a patient account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    /// Patient ID
    pub id: Uuid,
    /// Owning account ID
    pub account_id: Uuid,
    /// Generated medical record number
    pub medical_record_number: String,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Contact phone
    pub phone: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Blood type (e.g. "O+")
    pub blood_type: Option<String>,
    /// Known allergies
    pub allergies: Vec<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a patient record
#[derive(Debug, Clone)]
pub struct NewPatient {
    /// Owning account ID
    pub account_id: Uuid,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Contact phone
    pub phone: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Blood type
    pub blood_type: Option<String>,
    /// Known allergies
    pub allergies: Vec<String>,
}

/// Mutable patient fields for updates
#[derive(Debug, Clone, Default)]
pub struct PatientUpdate {
    /// Contact phone
    pub phone: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Blood type
    pub blood_type: Option<String>,
    /// Known allergies; `None` leaves the stored list unchanged
    pub allergies: Option<Vec<String>>,
}

impl Patient {
    /// Create a new patient record with a generated medical record number
    pub fn new(input: NewPatient) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            account_id: input.account_id,
            medical_record_number: generate_mrn(),
            date_of_birth: input.date_of_birth,
            phone: input.phone,
            address: input.address,
            blood_type: input.blood_type,
            allergies: input.allergies,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Generate a medical record number from the current timestamp
fn generate_mrn() -> String {
    format!("MR{}", Utc::now().timestamp_millis())
}
