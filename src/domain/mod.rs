//! Domain logic - pure business rules independent of git operations

pub mod author;
pub mod branch;
pub mod tag;
pub mod version;

pub use author::AuthorInfo;
pub use branch::BranchContext;
pub use tag::TagScheme;
pub use version::{bump, parse_tolerant, VersionBump};
