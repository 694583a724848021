//! Request handlers, one module per API area.

pub mod calculate;
pub mod export;
pub mod scale;
pub mod session;
pub mod system;
pub mod upload;
