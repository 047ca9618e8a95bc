//! Data model of a query session.

pub mod passage;
pub mod snapshot;
pub mod status;

pub use passage::{ResultPassage, UNKNOWN_SOURCE};
pub use snapshot::{DEFAULT_TRUST_RATING, MAX_STARS, SessionSnapshot};
pub use status::{ActiveTab, RequestStatus};
