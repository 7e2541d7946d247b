use crate::config::DatabaseConfig;
use crate::core::models::{Account, Appointment, Patient, PatientUpdate};
use crate::utils::error::{HmsError, Result};
use sea_orm::*;
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{debug, info};

use super::entities::{account, appointment, patient};
use super::migration::Migrator;

/// SeaORM-based database implementation
#[derive(Debug)]
pub struct SeaOrmDatabase {
    db: DatabaseConnection,
}

impl SeaOrmDatabase {
    /// Create a new database connection
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let mut opt = ConnectOptions::new(config.url.clone());
        opt.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging(false);

        let db = Database::connect(opt).await.map_err(HmsError::Database)?;

        info!("Database connection established");
        Ok(Self { db })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        Migrator::up(&self.db, None)
            .await
            .map_err(HmsError::Database)?;
        Ok(())
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        debug!("Performing database health check");

        let _ = account::Entity::find()
            .limit(1)
            .all(&self.db)
            .await
            .map_err(HmsError::Database)?;

        Ok(())
    }

    // ----- accounts -----

    /// Find an account by ID
    pub async fn find_account_by_id(&self, account_id: uuid::Uuid) -> Result<Option<Account>> {
        debug!("Finding account by ID: {}", account_id);

        let model = account::Entity::find_by_id(account_id)
            .one(&self.db)
            .await
            .map_err(HmsError::Database)?;

        Ok(model.map(|m| m.to_domain()))
    }

    /// Find an account by (normalized) email
    pub async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        debug!("Finding account by email");

        let model = account::Entity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(HmsError::Database)?;

        Ok(model.map(|m| m.to_domain()))
    }

    /// Create a new account.
    ///
    /// The unique email column is the backstop for the lookup-then-insert
    /// race between concurrent registrations; a constraint violation here
    /// surfaces as `Conflict`.
    pub async fn create_account(&self, account: &Account) -> Result<Account> {
        debug!("Creating account: {}", account.id);

        let active_model = account::Model::from_domain(account);

        account::Entity::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    HmsError::conflict("User already exists with this email")
                }
                _ => HmsError::Database(e),
            })?;

        Ok(account.clone())
    }

    /// Update account last login
    pub async fn update_last_login(&self, account_id: uuid::Uuid) -> Result<()> {
        debug!("Updating last login for account: {}", account_id);

        let model = account::Entity::find_by_id(account_id)
            .one(&self.db)
            .await
            .map_err(HmsError::Database)?
            .ok_or_else(|| HmsError::not_found("Account not found"))?;

        let now = chrono::Utc::now();
        let mut active_model: account::ActiveModel = model.into();
        active_model.last_login_at = Set(Some(now.into()));
        active_model.updated_at = Set(now.into());

        active_model
            .update(&self.db)
            .await
            .map_err(HmsError::Database)?;

        Ok(())
    }

    /// Toggle the account active flag
    pub async fn set_account_active(&self, account_id: uuid::Uuid, active: bool) -> Result<Account> {
        debug!("Setting account {} active = {}", account_id, active);

        let model = account::Entity::find_by_id(account_id)
            .one(&self.db)
            .await
            .map_err(HmsError::Database)?
            .ok_or_else(|| HmsError::not_found("Account not found"))?;

        let mut active_model: account::ActiveModel = model.into();
        active_model.is_active = Set(active);
        active_model.updated_at = Set(chrono::Utc::now().into());

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(HmsError::Database)?;

        Ok(updated.to_domain())
    }

    /// List accounts, newest first
    pub async fn list_accounts(&self, offset: u64, limit: u64) -> Result<(Vec<Account>, u64)> {
        debug!("Listing accounts offset={} limit={}", offset, limit);

        let total = account::Entity::find()
            .count(&self.db)
            .await
            .map_err(HmsError::Database)?;

        let models = account::Entity::find()
            .order_by_desc(account::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(HmsError::Database)?;

        Ok((models.iter().map(|m| m.to_domain()).collect(), total))
    }

    // ----- patients -----

    /// Create a new patient record
    pub async fn create_patient(&self, patient: &Patient) -> Result<Patient> {
        debug!("Creating patient: {}", patient.id);

        let active_model = patient::Model::from_domain(patient);

        patient::Entity::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(HmsError::Database)?;

        Ok(patient.clone())
    }

    /// Find a patient with its owning account
    pub async fn find_patient_by_id(
        &self,
        patient_id: uuid::Uuid,
    ) -> Result<Option<(Patient, Option<Account>)>> {
        debug!("Finding patient by ID: {}", patient_id);

        let result = patient::Entity::find_by_id(patient_id)
            .find_also_related(account::Entity)
            .one(&self.db)
            .await
            .map_err(HmsError::Database)?;

        Ok(result.map(|(p, a)| (p.to_domain(), a.map(|m| m.to_domain()))))
    }

    /// Update mutable patient fields
    pub async fn update_patient(
        &self,
        patient_id: uuid::Uuid,
        update: &PatientUpdate,
    ) -> Result<Patient> {
        debug!("Updating patient: {}", patient_id);

        let model = patient::Entity::find_by_id(patient_id)
            .one(&self.db)
            .await
            .map_err(HmsError::Database)?
            .ok_or_else(|| HmsError::not_found("Patient not found"))?;

        let mut active_model: patient::ActiveModel = model.into();
        if let Some(phone) = &update.phone {
            active_model.phone = Set(Some(phone.clone()));
        }
        if let Some(address) = &update.address {
            active_model.address = Set(Some(address.clone()));
        }
        if let Some(blood_type) = &update.blood_type {
            active_model.blood_type = Set(Some(blood_type.clone()));
        }
        if let Some(allergies) = &update.allergies {
            active_model.allergies =
                Set(serde_json::to_string(allergies).unwrap_or_else(|_| "[]".to_string()));
        }
        active_model.updated_at = Set(chrono::Utc::now().into());

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(HmsError::Database)?;

        Ok(updated.to_domain())
    }

    // ----- appointments -----

    /// Create a new appointment
    pub async fn create_appointment(&self, appointment: &Appointment) -> Result<Appointment> {
        debug!("Creating appointment: {}", appointment.id);

        let active_model = appointment::Model::from_domain(appointment);

        appointment::Entity::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(HmsError::Database)?;

        Ok(appointment.clone())
    }

    /// List a patient's appointments, soonest first
    pub async fn list_appointments_for_patient(
        &self,
        patient_id: uuid::Uuid,
    ) -> Result<Vec<Appointment>> {
        debug!("Listing appointments for patient: {}", patient_id);

        let models = appointment::Entity::find()
            .filter(appointment::Column::PatientId.eq(patient_id))
            .order_by_asc(appointment::Column::AppointmentDate)
            .all(&self.db)
            .await
            .map_err(HmsError::Database)?;

        Ok(models.iter().map(|m| m.to_domain()).collect())
    }

    /// Get the underlying database connection
    #[allow(dead_code)]
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}
