//! # MediScribe Core
//!
//! Core business logic for the MediScribe prescription reminder system.
//!
//! This crate contains pure data operations and file-backed storage:
//! - Dosage-schedule interpretation and calendar reminder derivation
//! - Medicine and prescription records (the upstream extraction contract)
//! - Prescription listing, retrieval, and deletion
//!
//! **No API concerns**: HTTP endpoints and CLI surfaces belong in `api-rest`
//! and `cli`.

pub mod config;
pub mod medicine;
pub mod prescription;
pub mod schedule;
pub mod store;

mod error;

pub use config::CoreConfig;
pub use error::{StoreError, StoreResult};
pub use medicine::{Medicine, MedicineType};
pub use prescription::Prescription;
pub use store::{FileStore, PrescriptionStore};
