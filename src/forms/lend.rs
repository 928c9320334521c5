//! Lend form: searchable person picker, inline add-person form and the
//! submission guard.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::person::{NewPerson, Person};
use crate::domain::types::{PersonId, PersonName};
use crate::forms::FormError;

/// Body posted to `/lend/<id>`. The server resolves (or creates) the person by name.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LendForm {
    pub person: PersonName,
}

#[derive(Debug, Default, Deserialize, Validate)]
/// Inline form creating a person without leaving the lend page.
pub struct AddPersonForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub contact_info: String,
}

impl TryFrom<AddPersonForm> for NewPerson {
    type Error = FormError;

    fn try_from(form: AddPersonForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let name = PersonName::new(form.name).map_err(|_| FormError::InvalidName)?;
        Ok(NewPerson::new(name, Some(form.contact_info)))
    }
}

/// State of the person picker on the lend page.
///
/// Typing filters the known people by name; picking one fills the search box
/// and hides the result list. Any further typing drops the selection again.
#[derive(Debug, Default)]
pub struct PersonPicker {
    people: Vec<Person>,
    search: String,
    matches: Vec<usize>,
    selected: Option<PersonName>,
    add_form_open: bool,
}

impl PersonPicker {
    pub fn new(people: Vec<Person>) -> Self {
        Self {
            people,
            ..Self::default()
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub fn selected(&self) -> Option<&PersonName> {
        self.selected.as_ref()
    }

    pub fn is_add_form_open(&self) -> bool {
        self.add_form_open
    }

    /// People matching the current search text, in directory order.
    pub fn results(&self) -> impl Iterator<Item = &Person> {
        self.matches.iter().filter_map(|&idx| self.people.get(idx))
    }

    pub fn results_visible(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Applies a keystroke in the search box.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.selected = None;
        self.matches.clear();

        if self.search.is_empty() {
            return;
        }

        let term = self.search.to_lowercase();
        self.matches = self
            .people
            .iter()
            .enumerate()
            .filter(|(_, p)| p.name.to_lowercase().contains(&term))
            .map(|(idx, _)| idx)
            .collect();
    }

    /// Picks a person from the directory.
    pub fn select(&mut self, id: PersonId) -> Result<&PersonName, FormError> {
        let person = self
            .people
            .iter()
            .find(|p| p.id == id)
            .ok_or(FormError::UnknownPerson)?;

        self.search = person.name.to_string();
        self.matches.clear();
        Ok(self.selected.insert(person.name.clone()))
    }

    pub fn toggle_add_form(&mut self) {
        self.add_form_open = !self.add_form_open;
    }

    /// Records a person created through the inline form and selects them.
    pub fn added(&mut self, name: PersonName) {
        self.search = name.to_string();
        self.matches.clear();
        self.add_form_open = false;
        self.selected = Some(name);
    }

    /// Submission guard: a lend can only be posted once a person is chosen.
    pub fn submission(&self) -> Result<LendForm, FormError> {
        self.selected
            .clone()
            .map(|person| LendForm { person })
            .ok_or(FormError::PersonNotSelected)
    }
}
