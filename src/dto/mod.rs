pub mod auth;
pub mod documents;
pub mod invoices;
pub mod products;
pub mod sales;
