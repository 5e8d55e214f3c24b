//! Request and response schemas with validation at construction
//!
//! All client input is validated when building these types.
//! Invalid input returns ValidationError, not panic.

pub mod amount;
pub mod patch;
pub mod record;
pub mod text;
pub mod timestamp;
pub mod validation;

pub use amount::Amount;
pub use patch::Patch;
pub use record::{RecordCreate, RecordRead, RecordUpdate, Schema};
pub use text::{Description, Title};
pub use timestamp::parse_timestamp;
pub use validation::{FieldError, FieldErrorKind, Location, ValidationError};
