//! Domain models for invoicing-service.

mod business_profile;
mod catalog_item;
mod invoice;
mod line_item;

pub use business_profile::{BusinessProfile, UpsertBusinessProfile};
pub use catalog_item::{CatalogItem, CreateCatalogItem, UpdateCatalogItem};
pub use invoice::{
    ClientSnapshot, CreateInvoice, Currency, Invoice, InvoiceStatus, InvoiceSummary, StatusFilter,
};
pub use line_item::{DraftLineItem, LineItem};
