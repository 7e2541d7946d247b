//! Domain models

pub mod account;
pub mod appointment;
pub mod patient;

pub use account::{Account, NewAccount, Role};
pub use appointment::{Appointment, AppointmentStatus, NewAppointment};
pub use patient::{NewPatient, Patient, PatientUpdate};
