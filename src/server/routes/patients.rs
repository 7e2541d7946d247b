//! Patient and appointment endpoints
//!
//! Patient records are reachable by staff roles; a patient may additionally
//! list their own appointments. Creating a patient writes two rows: the
//! `patient`-role account and the clinical record linked to it.

use crate::core::models::{
    NewAccount, NewAppointment, NewPatient, Patient, PatientUpdate, Role,
};
use crate::server::middleware::helpers::{claims_from_request, require_role};
use crate::server::routes::auth::AccountResponse;
use crate::server::routes::ApiResponse;
use crate::server::AppState;
use crate::utils::error::HmsError;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result as ActixResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info};

/// Configure patient and appointment routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/patients")
            .route("", web::post().to(create_patient))
            .route("/{id}", web::get().to(get_patient))
            .route("/{id}", web::put().to(update_patient))
            .route("/{id}/appointments", web::get().to(list_appointments)),
    )
    .service(web::scope("/appointments").route("", web::post().to(create_appointment)));
}

/// Patient creation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePatientRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

/// Patient update request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdatePatientRequest {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub allergies: Option<Vec<String>>,
}

/// Appointment creation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateAppointmentRequest {
    pub patient_id: uuid::Uuid,
    pub doctor_id: uuid::Uuid,
    pub appointment_date: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Patient payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientResponse {
    pub id: uuid::Uuid,
    pub account_id: uuid::Uuid,
    pub medical_record_number: String,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AccountResponse>,
}

impl PatientResponse {
    fn from_parts(patient: Patient, user: Option<AccountResponse>) -> Self {
        Self {
            id: patient.id,
            account_id: patient.account_id,
            medical_record_number: patient.medical_record_number,
            date_of_birth: patient.date_of_birth,
            phone: patient.phone,
            address: patient.address,
            blood_type: patient.blood_type,
            allergies: patient.allergies,
            created_at: patient.created_at,
            user,
        }
    }
}

/// Combined payload for patient creation
#[derive(Debug, Serialize)]
pub struct CreatedPatientData {
    pub user: AccountResponse,
    pub patient: PatientResponse,
}

/// Appointment payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub id: uuid::Uuid,
    pub patient_id: uuid::Uuid,
    pub doctor_id: uuid::Uuid,
    pub appointment_date: chrono::DateTime<chrono::Utc>,
    pub status: crate::core::models::AppointmentStatus,
    pub notes: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<crate::core::models::Appointment> for AppointmentResponse {
    fn from(appointment: crate::core::models::Appointment) -> Self {
        Self {
            id: appointment.id,
            patient_id: appointment.patient_id,
            doctor_id: appointment.doctor_id,
            appointment_date: appointment.appointment_date,
            status: appointment.status,
            notes: appointment.notes,
            created_at: appointment.created_at,
        }
    }
}

/// Create a patient: account row plus clinical record (staff only)
async fn create_patient(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<CreatePatientRequest>,
) -> ActixResult<HttpResponse> {
    if let Err(e) = require_role(&req, Role::STAFF) {
        return Ok(e.error_response());
    }

    info!("Patient creation requested");

    let request = request.into_inner();
    let input = NewAccount {
        email: request.email,
        password: request.password,
        first_name: request.first_name,
        last_name: request.last_name,
        role: Role::Patient,
    };

    let account = match state.auth.create_account(input).await {
        Ok(account) => account,
        Err(e) => return Ok(e.error_response()),
    };

    let patient = Patient::new(NewPatient {
        account_id: account.id,
        date_of_birth: request.date_of_birth,
        phone: request.phone,
        address: request.address,
        blood_type: request.blood_type,
        allergies: request.allergies,
    });

    match state.storage.db().create_patient(&patient).await {
        Ok(patient) => {
            let data = CreatedPatientData {
                user: AccountResponse::from(account),
                patient: PatientResponse::from_parts(patient, None),
            };
            Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
                data,
                "Patient created successfully",
            )))
        }
        Err(e) => Ok(e.error_response()),
    }
}

/// Get a patient with its account details (staff only)
async fn get_patient(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<uuid::Uuid>,
) -> ActixResult<HttpResponse> {
    if let Err(e) = require_role(&req, Role::STAFF) {
        return Ok(e.error_response());
    }

    let patient_id = path.into_inner();
    debug!("Fetching patient: {}", patient_id);

    match state.storage.db().find_patient_by_id(patient_id).await {
        Ok(Some((patient, account))) => {
            let data =
                PatientResponse::from_parts(patient, account.map(AccountResponse::from));
            Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
                data,
                "Patient retrieved successfully",
            )))
        }
        Ok(None) => Ok(HmsError::not_found("Patient not found").error_response()),
        Err(e) => Ok(e.error_response()),
    }
}

/// Update mutable patient fields (staff only)
async fn update_patient(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<uuid::Uuid>,
    request: web::Json<UpdatePatientRequest>,
) -> ActixResult<HttpResponse> {
    if let Err(e) = require_role(&req, Role::STAFF) {
        return Ok(e.error_response());
    }

    let patient_id = path.into_inner();
    info!("Updating patient: {}", patient_id);

    let request = request.into_inner();
    let update = PatientUpdate {
        phone: request.phone,
        address: request.address,
        blood_type: request.blood_type,
        allergies: request.allergies,
    };

    match state.storage.db().update_patient(patient_id, &update).await {
        Ok(patient) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            PatientResponse::from_parts(patient, None),
            "Patient updated successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

/// Book an appointment (staff only)
async fn create_appointment(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<CreateAppointmentRequest>,
) -> ActixResult<HttpResponse> {
    if let Err(e) = require_role(&req, Role::STAFF) {
        return Ok(e.error_response());
    }

    info!("Appointment creation requested");

    let request = request.into_inner();

    // Resolve both ends up front so a dangling reference surfaces as a
    // client error instead of a foreign-key failure.
    match state.storage.db().find_patient_by_id(request.patient_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(HmsError::not_found("Patient not found").error_response()),
        Err(e) => return Ok(e.error_response()),
    }

    match state.storage.db().find_account_by_id(request.doctor_id).await {
        Ok(Some(account)) if account.is_doctor() => {}
        Ok(Some(_)) => {
            return Ok(
                HmsError::validation("doctorId does not refer to a doctor").error_response()
            )
        }
        Ok(None) => return Ok(HmsError::not_found("Doctor not found").error_response()),
        Err(e) => return Ok(e.error_response()),
    }

    let appointment = crate::core::models::Appointment::new(NewAppointment {
        patient_id: request.patient_id,
        doctor_id: request.doctor_id,
        appointment_date: request.appointment_date,
        notes: request.notes,
    });

    match state.storage.db().create_appointment(&appointment).await {
        Ok(appointment) => Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
            AppointmentResponse::from(appointment),
            "Appointment created successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

/// List a patient's appointments, soonest first (staff, or the patient)
async fn list_appointments(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<uuid::Uuid>,
) -> ActixResult<HttpResponse> {
    let claims = match claims_from_request(&req) {
        Ok(claims) => claims,
        Err(e) => return Ok(e.error_response()),
    };

    let patient_id = path.into_inner();
    debug!("Listing appointments for patient: {}", patient_id);

    let is_staff = Role::from_str(&claims.role)
        .map(|role| Role::STAFF.contains(&role))
        .unwrap_or(false);

    if !is_staff {
        // A patient may read their own appointments and nothing else.
        match state.storage.db().find_patient_by_id(patient_id).await {
            Ok(Some((patient, _))) if patient.account_id == claims.sub => {}
            Ok(Some(_)) | Ok(None) => {
                return Ok(HmsError::forbidden(
                    "You do not have permission to access this resource",
                )
                .error_response())
            }
            Err(e) => return Ok(e.error_response()),
        }
    }

    match state
        .storage
        .db()
        .list_appointments_for_patient(patient_id)
        .await
    {
        Ok(appointments) => {
            let items: Vec<AppointmentResponse> = appointments
                .into_iter()
                .map(AppointmentResponse::from)
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
                items,
                "Appointments retrieved successfully",
            )))
        }
        Err(e) => Ok(e.error_response()),
    }
}
