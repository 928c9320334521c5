use crate::domain::person::NewPerson;
use crate::domain::types::PersonName;
use crate::forms::lend::AddPersonForm;
use crate::repository::PersonWriter;
use crate::services::{ServiceError, ServiceResult};

/// Validates the inline add-person form and creates the person.
///
/// Returns the normalized name so the lend page can select it right away.
pub async fn add_person<R>(repo: &R, form: AddPersonForm) -> ServiceResult<PersonName>
where
    R: PersonWriter + ?Sized,
{
    let new_person = NewPerson::try_from(form).map_err(|err| {
        log::error!("Failed to validate person form: {err}");
        ServiceError::from(err)
    })?;

    repo.create_person(&new_person).await.map_err(|err| {
        log::error!("Failed to add person {}: {err}", new_person.name);
        err
    })?;

    Ok(new_person.name)
}
