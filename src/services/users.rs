use crate::domain::user::{NewUser, User};
use crate::errors::CatalogError;
use crate::repository::{UserReader, UserWriter};
use crate::services::{CatalogResult, report};

/// Registers a user. Email and username must be unused.
pub fn create_user<R>(repo: &R, new_user: NewUser) -> CatalogResult<User>
where
    R: UserWriter + ?Sized,
{
    let user = repo.create_user(&new_user).map_err(report)?;
    log::info!("User {} `{}` created", user.id, user.username);
    Ok(user)
}

/// Loads a user, failing with `UserNotFound` when absent.
pub fn get_user<R>(repo: &R, user_id: i32) -> CatalogResult<User>
where
    R: UserReader + ?Sized,
{
    repo.get_user_by_id(user_id)
        .map_err(report)?
        .ok_or(CatalogError::UserNotFound(user_id))
}
