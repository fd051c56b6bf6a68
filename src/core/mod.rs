pub mod extract;
pub mod log;
pub mod reconcile;
pub mod report;
pub mod session;
