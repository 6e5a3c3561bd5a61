// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod google_sheets_repository;
pub mod http_response;
pub mod sheet_url;
pub mod svg_chart;
