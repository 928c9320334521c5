use chrono::Local;

use crate::domain::tool::{NewTool, Tool};
use crate::forms::lend::LendForm;
use crate::forms::tool::QuickAddForm;
use crate::repository::ToolWriter;
use crate::services::{ServiceError, ServiceResult};

/// Validates the quick-add form and creates the tool.
pub async fn quick_add_tool<R>(repo: &R, form: QuickAddForm) -> ServiceResult<Tool>
where
    R: ToolWriter + ?Sized,
{
    let new_tool = NewTool::try_from(form).map_err(|err| {
        log::error!("Failed to validate quick-add form: {err}");
        ServiceError::from(err)
    })?;

    let tool = repo.create_tool(&new_tool).await.map_err(|err| {
        log::error!("Failed to create tool: {err}");
        err
    })?;

    Ok(tool)
}

/// Lends the tool and returns the locally updated copy.
pub async fn lend_tool<R>(repo: &R, tool: &Tool, form: LendForm) -> ServiceResult<Tool>
where
    R: ToolWriter + ?Sized,
{
    if tool.is_lent() {
        return Err(ServiceError::Form("Tool already lent out".to_string()));
    }

    repo.lend_tool(tool.id, &form).await.map_err(|err| {
        log::error!("Failed to lend tool {}: {err}", tool.id);
        err
    })?;

    Ok(tool.lent_to(form.person, Local::now().date_naive()))
}

/// Clears the current loan. Returning an available tool is a no-op on the server.
pub async fn return_tool<R>(repo: &R, tool: &Tool) -> ServiceResult<Tool>
where
    R: ToolWriter + ?Sized,
{
    repo.return_tool(tool.id).await.map_err(|err| {
        log::error!("Failed to return tool {}: {err}", tool.id);
        err
    })?;

    Ok(tool.returned())
}

pub async fn delete_tool<R>(repo: &R, tool: &Tool) -> ServiceResult<()>
where
    R: ToolWriter + ?Sized,
{
    if tool.is_lent() {
        return Err(ServiceError::Form(
            "Cannot delete tool: it is currently lent out".to_string(),
        ));
    }

    repo.delete_tool(tool.id).await.map_err(|err| {
        log::error!("Failed to delete tool {}: {err}", tool.id);
        err
    })?;

    Ok(())
}
