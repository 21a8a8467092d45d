//! Records exchanged between the audit, the translator and the patcher.

mod missing;
mod translation;

pub use missing::MissingMessage;
pub use translation::{
    TranslationFailure,
    TranslationResult,
};
