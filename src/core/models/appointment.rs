//! Appointment types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled visit between a patient and a doctor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    /// Appointment ID
    pub id: Uuid,
    /// Patient the appointment belongs to
    pub patient_id: Uuid,
    /// Doctor account ID
    pub doctor_id: Uuid,
    /// Scheduled date and time
    pub appointment_date: DateTime<Utc>,
    /// Current status
    pub status: AppointmentStatus,
    /// Free-form notes
    pub notes: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Appointment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Booked and upcoming
    Scheduled,
    /// Visit took place
    Completed,
    /// Called off before the visit
    Cancelled,
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            _ => Err(format!("Invalid appointment status: {}", s)),
        }
    }
}

/// Input for booking an appointment
#[derive(Debug, Clone)]
pub struct NewAppointment {
    /// Patient the appointment belongs to
    pub patient_id: Uuid,
    /// Doctor account ID
    pub doctor_id: Uuid,
    /// Scheduled date and time
    pub appointment_date: DateTime<Utc>,
    /// Free-form notes
    pub notes: Option<String>,
}

impl Appointment {
    /// Create a new appointment in the `scheduled` state
    pub fn new(input: NewAppointment) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            patient_id: input.patient_id,
            doctor_id: input.doctor_id,
            appointment_date: input.appointment_date,
            status: AppointmentStatus::Scheduled,
            notes: input.notes.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}
