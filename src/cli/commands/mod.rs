pub mod config;
pub mod extract;
pub mod init;
pub mod log;
pub mod reconcile;
pub mod scrape;
pub mod sync;
