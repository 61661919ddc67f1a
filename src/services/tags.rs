use crate::domain::tag::Tag;
use crate::errors::CatalogError;
use crate::forms::tags::AddTagForm;
use crate::repository::{TagReader, TagWriter};
use crate::services::{CatalogResult, report};

/// Lists every tag ordered by name.
pub fn list_tags<R>(repo: &R) -> CatalogResult<Vec<Tag>>
where
    R: TagReader + ?Sized,
{
    repo.list_tags().map_err(report)
}

/// Loads a tag, failing with `TagNotFound` when absent.
pub fn get_tag<R>(repo: &R, tag_id: i32) -> CatalogResult<Tag>
where
    R: TagReader + ?Sized,
{
    repo.get_tag_by_id(tag_id)
        .map_err(report)?
        .ok_or(CatalogError::TagNotFound(tag_id))
}

/// Creates a new tag. Name, color and slug must all be unused.
pub fn create_tag<R>(repo: &R, form: AddTagForm) -> CatalogResult<Tag>
where
    R: TagWriter + ?Sized,
{
    let new_tag = form.into_new_tag()?;

    let tag = repo.create_tag(&new_tag).map_err(report)?;
    log::info!("Tag {} `{}` created", tag.id, tag.slug);
    Ok(tag)
}
