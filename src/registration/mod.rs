//! Registration flow: pending sessions, OTP verification and account
//! materialization.

pub mod materializer;
pub mod otp;
pub mod session_store;

pub use materializer::{finalize, next_application_id};
pub use session_store::NewRegistration;
