//! Infrastructure layer - Signing, clock and process plumbing

pub mod clock;
pub mod logging;
pub mod services;
pub mod token;
