// Application layer - Use cases and ports
pub mod dashboard_service;
pub mod sheet_source;
