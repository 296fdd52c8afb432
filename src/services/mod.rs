pub mod auth_service;
pub mod document_service;
pub mod invoice_service;
pub mod pricing;
pub mod product_service;
pub mod sale_service;
