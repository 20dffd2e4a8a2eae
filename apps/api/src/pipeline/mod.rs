// Recruiter pipeline: client-side working set of leads, optimistic mutations,
// detail editing and the derived read models (ordering, board, metrics).
// All persistence goes through the LeadGateway held by the store.

pub mod editor;
pub mod handlers;
pub mod metrics;
pub mod store;
pub mod view;

pub use editor::DetailEditor;
pub use store::{BatchOutcome, FailedItem, MutationOutcome, PipelineStore};
