pub mod export_service;
pub mod process_service;
