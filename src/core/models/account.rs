//! Account types
//!
//! An account is a registered principal: hospital staff or a patient.
//! The password hash never leaves the process; serialization skips it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered principal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Account ID (opaque, immutable once created)
    pub id: Uuid,
    /// Email address (unique, stored lowercase)
    pub email: String,
    /// Password hash
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Access role
    pub role: Role,
    /// Whether the account may log in
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Last successful login, if any
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Access role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Administrator
    Admin,
    /// Doctor
    Doctor,
    /// Patient
    Patient,
    /// Nurse
    Nurse,
    /// Receptionist
    Receptionist,
    /// Laboratory technician
    LabTechnician,
    /// Pharmacist
    Pharmacist,
}

impl Role {
    /// Roles allowed to manage patient records
    pub const STAFF: &'static [Role] = &[
        Role::Admin,
        Role::Doctor,
        Role::Nurse,
        Role::Receptionist,
    ];

    /// Administrator-only
    pub const ADMIN_ONLY: &'static [Role] = &[Role::Admin];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Doctor => write!(f, "doctor"),
            Role::Patient => write!(f, "patient"),
            Role::Nurse => write!(f, "nurse"),
            Role::Receptionist => write!(f, "receptionist"),
            Role::LabTechnician => write!(f, "lab_technician"),
            Role::Pharmacist => write!(f, "pharmacist"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "doctor" => Ok(Role::Doctor),
            "patient" => Ok(Role::Patient),
            "nurse" => Ok(Role::Nurse),
            "receptionist" => Ok(Role::Receptionist),
            "lab_technician" => Ok(Role::LabTechnician),
            "pharmacist" => Ok(Role::Pharmacist),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Input for creating an account, validated before any store call
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Email address (normalized by the auth component)
    pub email: String,
    /// Plaintext password; hashed before storage
    pub password: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Access role
    pub role: Role,
}

impl Account {
    /// Create a new active account from validated input and a password hash
    pub fn new(input: &NewAccount, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: input.email.clone(),
            password_hash,
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            role: input.role,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether this account is a doctor
    pub fn is_doctor(&self) -> bool {
        self.role == Role::Doctor
    }

    /// Whether this account is a patient
    pub fn is_patient(&self) -> bool {
        self.role == Role::Patient
    }
}
