//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod phrase;
pub mod vote;
pub mod listing;

pub use validation::ValidationError;
pub use phrase::{CategoryName, LanguageCode, NewPhrase, PhraseText};
pub use vote::VoteValue;
pub use listing::{ListParams, PhraseFilter, DEFAULT_LIMIT};
