#![deny(unsafe_code)]
//! # kolmo-condenser
//!
//! Removes exact and near-duplicate texts. One engine, [`Condenser`], is
//! driven by a [`CondenseStrategy`] that picks the canonical-selection
//! policy (first-seen or longest-wins), the Jaccard threshold and the
//! bucketing mode. Two front ends use it:
//!
//! - [`corpus`]: JSONL chunk indexes, swapped in place atomically.
//! - [`lessons`]: single-file artifacts, duplicates moved to an archive
//!   directory with a merge manifest.

pub mod condenser;
pub mod corpus;
pub mod error;
pub mod lessons;
pub mod strategy;

pub use condenser::{ArchiveReason, Archived, Condensable, CondenseOutcome, Condenser, Kept};
pub use corpus::{condense_index, condense_packs, CondenseReport, CondenseSummary};
pub use error::{CondenseError, CondenseResult};
pub use lessons::{compact_lessons, LessonManifest, LessonReport, MergeEntry};
pub use strategy::{Bucketing, CanonicalPolicy, CondenseStrategy};
