//! Studying a collection: filtering by recorded status, cursor persistence and grading.

pub mod deck;
pub mod filter;
pub mod summary;

pub use deck::{CardFace, Deck};
pub use filter::{filter_cards, select, Selection};
pub use summary::ProgressSummary;
