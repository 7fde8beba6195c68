pub mod analysis;
pub mod classifier;
pub mod session;
pub mod session_manager;
pub mod upload;
