mod draft;
mod ids;
mod record;

pub use draft::{ChildDraftItem, DraftMode, EntityDraft};
pub use ids::{DraftId, RecordId};
pub use record::EntityRecord;
