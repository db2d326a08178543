pub mod ai;
pub mod documents;
pub mod health;
pub mod items;
pub mod profile;

pub use ai::{generate_reminder, rewrite_items};
pub use documents::{
    create_document, create_document_pdf, download_document_pdf, get_document, list_documents,
    set_document_status,
};
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use items::{create_item, delete_item, get_item, list_items, update_item};
pub use profile::{get_profile, profile_exists, upsert_profile};
