//! Repositories over the item store.

mod labor_line_repo;

pub use labor_line_repo::LaborLineRepo;
