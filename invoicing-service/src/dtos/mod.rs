pub mod ai;
pub mod documents;
pub mod items;
pub mod profile;

pub use ai::{RewriteItemsRequest, RewriteItemsResponse};
pub use documents::{
    CreateInvoiceRequest, DocumentListResponse, DocumentResponse, InvoiceResponse,
    LineItemResponse, ListDocumentsParams, SetStatusRequest, SummaryResponse,
};
pub use items::{
    CatalogItemResponse, CreateItemRequest, ItemDeletedResponse, ItemListResponse, ItemResponse,
    UpdateItemRequest,
};
pub use profile::{BusinessProfileResponse, ExistsResponse, ProfileResponse, UpsertProfileRequest};

use validator::ValidationError;

/// Build a `ValidationError` whose rendered text is the given message
/// rather than the bare code.
pub(crate) fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}
