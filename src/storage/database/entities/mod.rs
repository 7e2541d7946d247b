//! SeaORM entity definitions

pub mod account;
pub mod appointment;
pub mod patient;
