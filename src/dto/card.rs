use serde::Serialize;

use crate::domain::brand::{BrandBadge, brand_badge};
use crate::domain::tool::Tool;

/// Primary action offered on a tool card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "href", rename_all = "snake_case")]
pub enum CardAction {
    /// Form post clearing the current loan.
    Return(String),
    /// Link to the lend form.
    Lend(String),
}

/// Data needed to render one tool card.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ToolCard {
    pub title: String,
    pub value_label: Option<String>,
    pub status: String,
    pub image_url: Option<String>,
    pub edit_href: String,
    pub action: CardAction,
    pub badge: Option<BrandBadge>,
}

impl From<&Tool> for ToolCard {
    fn from(tool: &Tool) -> Self {
        let id = tool.id;

        let status = match (&tool.borrower, tool.lent_on) {
            (Some(borrower), Some(date)) => format!("Lent to {borrower} on {date}"),
            (Some(borrower), None) => format!("Lent to {borrower}"),
            (None, _) => "Available".to_string(),
        };

        let action = if tool.is_lent() {
            CardAction::Return(format!("/return/{id}"))
        } else {
            CardAction::Lend(format!("/lend/{id}"))
        };

        Self {
            title: tool.name.to_string(),
            value_label: tool.value.map(|v| format!("${:.2}", v.round_dp(2))),
            status,
            image_url: tool
                .image_path
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(|p| format!("/static/{p}")),
            edit_href: format!("/edit/{id}"),
            action,
            badge: brand_badge(tool.brand.as_deref()),
        }
    }
}
