//! Repository layer for user-created templates.
//!
//! Repositories handle data the user CREATES; static part data is handled by
//! oracles, and the research and gold ledgers live in [`crate::ledger`].

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileTemplateRepository;
pub use memory::InMemoryTemplateRepo;
pub use traits::{TemplateRepository, normalize_name};
