//! Domain models for the OTP mail node

pub mod email;
pub mod identity;
pub mod session;

pub use email::*;
pub use identity::*;
pub use session::*;
