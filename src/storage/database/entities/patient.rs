use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::core::models::Patient;

/// Patient database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "patients")]
pub struct Model {
    /// Patient ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning account ID
    pub account_id: Uuid,

    /// Generated medical record number
    #[sea_orm(unique)]
    pub medical_record_number: String,

    /// Date of birth
    pub date_of_birth: Option<Date>,

    /// Contact phone
    pub phone: Option<String>,

    /// Postal address
    pub address: Option<String>,

    /// Blood type
    pub blood_type: Option<String>,

    /// Known allergies, JSON-encoded list
    pub allergies: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Patient entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id"
    )]
    Account,

    /// Appointments for this patient
    #[sea_orm(has_many = "super::appointment::Entity")]
    Appointments,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::appointment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert the SeaORM model to the domain patient
    pub fn to_domain(&self) -> Patient {
        Patient {
            id: self.id,
            account_id: self.account_id,
            medical_record_number: self.medical_record_number.clone(),
            date_of_birth: self.date_of_birth,
            phone: self.phone.clone(),
            address: self.address.clone(),
            blood_type: self.blood_type.clone(),
            allergies: serde_json::from_str(&self.allergies).unwrap_or_default(),
            created_at: self.created_at.with_timezone(&chrono::Utc),
            updated_at: self.updated_at.with_timezone(&chrono::Utc),
        }
    }

    /// Convert the domain patient to a SeaORM active model
    pub fn from_domain(patient: &Patient) -> ActiveModel {
        ActiveModel {
            id: Set(patient.id),
            account_id: Set(patient.account_id),
            medical_record_number: Set(patient.medical_record_number.clone()),
            date_of_birth: Set(patient.date_of_birth),
            phone: Set(patient.phone.clone()),
            address: Set(patient.address.clone()),
            blood_type: Set(patient.blood_type.clone()),
            allergies: Set(serde_json::to_string(&patient.allergies).unwrap_or_else(|_| "[]".to_string())),
            created_at: Set(patient.created_at.into()),
            updated_at: Set(patient.updated_at.into()),
        }
    }
}
