//! Operations offered to the request layer. Each service is generic over the
//! repository traits it needs so it can run against the diesel store or
//! against mocks.

pub use crate::errors::{CatalogError, CatalogResult};

pub mod ingredients;
pub mod recipes;
pub mod relations;
pub mod shopping_list;
pub mod tags;
pub mod users;

/// Log storage failures before handing the error back to the caller.
pub(crate) fn report(err: CatalogError) -> CatalogError {
    if err.is_storage_failure() {
        log::error!("{err}");
    }
    err
}
