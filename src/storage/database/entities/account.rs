use sea_orm::entity::prelude::*;
use sea_orm::Set;
use std::str::FromStr;

use crate::core::models::{Account, Role};

/// Account database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Account ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Email address (unique, stored lowercase)
    #[sea_orm(unique)]
    pub email: String,

    /// Password hash
    pub password_hash: String,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Access role
    pub role: String,

    /// Whether the account may log in
    pub is_active: bool,

    /// Last successful login
    pub last_login_at: Option<DateTimeWithTimeZone>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Account entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Patient records owned by this account
    #[sea_orm(has_many = "super::patient::Entity")]
    Patients,

    /// Appointments where this account is the doctor
    #[sea_orm(has_many = "super::appointment::Entity")]
    Appointments,
}

impl Related<super::patient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Patients.def()
    }
}

impl Related<super::appointment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// Conversion methods between the SeaORM model and the domain model
impl Model {
    /// Convert the SeaORM model to the domain account
    pub fn to_domain(&self) -> Account {
        Account {
            id: self.id,
            email: self.email.clone(),
            password_hash: self.password_hash.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: Role::from_str(&self.role).unwrap_or(Role::Patient),
            is_active: self.is_active,
            created_at: self.created_at.with_timezone(&chrono::Utc),
            updated_at: self.updated_at.with_timezone(&chrono::Utc),
            last_login_at: self.last_login_at.map(|dt| dt.with_timezone(&chrono::Utc)),
        }
    }

    /// Convert the domain account to a SeaORM active model
    pub fn from_domain(account: &Account) -> ActiveModel {
        ActiveModel {
            id: Set(account.id),
            email: Set(account.email.clone()),
            password_hash: Set(account.password_hash.clone()),
            first_name: Set(account.first_name.clone()),
            last_name: Set(account.last_name.clone()),
            role: Set(account.role.to_string()),
            is_active: Set(account.is_active),
            last_login_at: Set(account.last_login_at.map(|dt| dt.into())),
            created_at: Set(account.created_at.into()),
            updated_at: Set(account.updated_at.into()),
        }
    }
}
