//! Shared plumbing for the gateway workspace: errors, masking-aware PII
//! types, the outgoing request model, amount units and event records.

pub mod consts;
pub mod errors;
pub mod events;
pub mod ext_traits;
pub mod id_type;
pub mod pii;
pub mod request;
pub mod types;

// Re-export commonly used items
pub use errors::{CustomResult, ParsingError, ValidationError};
pub use hyperswitch_masking::{ExposeInterface, Maskable, PeekInterface, Secret, StrongSecret};
pub use id_type::{CustomerId, MerchantId};
pub use pii::{Email, SecretSerdeValue};
pub use request::{Method, Request, RequestContent};
pub use types::{AmountConvertor, MinorUnit, StringMajorUnit, StringMajorUnitForConnector};

/// Generate a time-ordered (time-sortable) unique identifier using the
/// current time.
#[inline]
pub fn generate_time_ordered_id(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::now_v7().as_simple())
}
