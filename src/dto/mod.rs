//! DTO modules bridging the JSON API with the presentation layer.

pub mod api;
pub mod card;
