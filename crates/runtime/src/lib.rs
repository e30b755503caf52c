//! Runtime services for the mech builder.
//!
//! This crate wires the static oracles, the template repositories and the
//! research and gold ledgers into a [`Workshop`] session. Front-ends embed a
//! workshop to attach parts, read live stats and save or restore templates.
//!
//! Modules are organized by responsibility:
//! - [`workshop`] hosts the session object and its builder
//! - [`oracle`] adapts loaded content to the `mech-core` oracle traits
//! - [`repository`] persists named templates
//! - [`ledger`] tracks unlocked parts and gold
pub mod error;
pub mod ledger;
pub mod oracle;
pub mod repository;
pub mod workshop;

pub use error::{Result, RuntimeError};
pub use ledger::{LedgerError, ResearchLedger, ResourceLedger};
pub use oracle::{ActionOracleImpl, OracleManager, PartOracleImpl, TagOracleImpl};
pub use repository::{
    FileTemplateRepository, InMemoryTemplateRepo, RepositoryError, TemplateRepository,
};
pub use workshop::{Workshop, WorkshopBuilder};
