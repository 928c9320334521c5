use serde::Deserialize;
use validator::Validate;

use crate::domain::tool::NewTool;
use crate::domain::types::ToolName;
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize, Validate)]
/// Single-field form used to add a tool from the list view.
pub struct QuickAddForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

impl QuickAddForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl TryFrom<QuickAddForm> for NewTool {
    type Error = FormError;

    fn try_from(form: QuickAddForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let name = ToolName::new(form.name).map_err(|_| FormError::InvalidName)?;
        Ok(NewTool::new(name))
    }
}
