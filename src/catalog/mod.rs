//! Catalog store: message trees, their files and how they are written back.

mod error;
mod store;
mod style;
mod tree;

pub use error::CatalogError;
pub use store::{
    Catalog,
    CatalogStore,
    PersistReport,
};
pub use style::{
    DocumentStyle,
    LineEnding,
};
pub use tree::{
    MessageTree,
    TreeError,
};
