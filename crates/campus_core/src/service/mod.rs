//! Core use-case services, one per app flow.
//!
//! # Responsibility
//! - Orchestrate store loads, query filters and saves into use-case APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod auth_service;
pub mod document_service;
pub mod enrollment_service;
pub mod session_service;
pub mod wellbeing_service;
