//! Value objects - immutable types that represent domain concepts

mod entity_kind;
mod record_id;
mod status;

pub use entity_kind::EntityKind;
pub use record_id::RecordId;
pub use status::{ContentStatus, EventStatus, Lifecycle, NoticeStatus};
