//! Review composition.
//!
//! Transient, per-detail-view state for writing a new review. Submitting a
//! valid draft hands back a `ReviewSubmission`; nothing is written into the
//! catalog, whose reviews stay fixed for the session.

pub mod draft;

pub use draft::{DraftField, DraftState, ReviewDraft, ReviewDraftController, ReviewSubmission};
