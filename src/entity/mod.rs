pub mod audit_logs;
pub mod invoice_items;
pub mod invoices;
pub mod products;
pub mod sales;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use invoice_items::Entity as InvoiceItems;
pub use invoices::Entity as Invoices;
pub use products::Entity as Products;
pub use sales::Entity as Sales;
pub use users::Entity as Users;
