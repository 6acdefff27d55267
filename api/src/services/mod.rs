pub mod catalog_service;
pub mod cors_fairing;
pub mod order_lifecycle;
pub mod report_service;
pub mod table_service;
