pub mod types;
pub mod view;

pub use types::{
    DateSort, DraftError, FilterCriteria, Intent, JobDraft, JobPatch, JobRecord, JobStatus,
    ParseSortError, ParseStatusError,
};
pub use view::{derive_view, relative_day, StatusCounts};
