//! In-memory resource storage shared by the user and item resources.
//!
//! A [`ResourceStore`] owns every record of one type behind a single async mutex. The building
//! blocks are kept in small submodules:
//!
//! - [`ids`] – per-store identifier allocation.
//! - [`patch`] – the explicit present/absent marker used by partial updates.
//! - [`page`] – offset/limit slicing with a pre-slice total.
//! - [`resource`] – the generic store and the [`Record`] trait each resource implements.

mod error;
pub mod ids;
pub mod page;
pub mod patch;
mod resource;

pub use error::StoreError;
pub use ids::IdAllocator;
pub use page::{Page, paginate};
pub use patch::Patch;
pub use resource::{Record, ResourceStore};
