use sea_orm::entity::prelude::*;
use sea_orm::Set;
use std::str::FromStr;

use crate::core::models::{Appointment, AppointmentStatus};

/// Appointment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    /// Appointment ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Patient the appointment belongs to
    pub patient_id: Uuid,

    /// Doctor account ID
    pub doctor_id: Uuid,

    /// Scheduled date and time
    pub appointment_date: DateTimeWithTimeZone,

    /// Lifecycle status
    pub status: String,

    /// Free-form notes
    pub notes: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Appointment entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Patient the appointment belongs to
    #[sea_orm(
        belongs_to = "super::patient::Entity",
        from = "Column::PatientId",
        to = "super::patient::Column::Id"
    )]
    Patient,

    /// Doctor account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::DoctorId",
        to = "super::account::Column::Id"
    )]
    Doctor,
}

impl Related<super::patient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Patient.def()
    }
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Doctor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert the SeaORM model to the domain appointment
    pub fn to_domain(&self) -> Appointment {
        Appointment {
            id: self.id,
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
            appointment_date: self.appointment_date.with_timezone(&chrono::Utc),
            status: AppointmentStatus::from_str(&self.status)
                .unwrap_or(AppointmentStatus::Scheduled),
            notes: self.notes.clone(),
            created_at: self.created_at.with_timezone(&chrono::Utc),
            updated_at: self.updated_at.with_timezone(&chrono::Utc),
        }
    }

    /// Convert the domain appointment to a SeaORM active model
    pub fn from_domain(appointment: &Appointment) -> ActiveModel {
        ActiveModel {
            id: Set(appointment.id),
            patient_id: Set(appointment.patient_id),
            doctor_id: Set(appointment.doctor_id),
            appointment_date: Set(appointment.appointment_date.into()),
            status: Set(appointment.status.to_string()),
            notes: Set(appointment.notes.clone()),
            created_at: Set(appointment.created_at.into()),
            updated_at: Set(appointment.updated_at.into()),
        }
    }
}
