//! Client-side core of the tool tracker: typed domain records, the JSON API
//! client and the synchronization runtime behind the searchable, filterable,
//! infinitely scrolling tool list.

pub mod domain;
pub mod dto;
mod error_conversions;
pub mod forms;
pub mod pagination;

#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod repository;
#[cfg(feature = "client")]
pub mod services;
#[cfg(feature = "client")]
pub mod sync;
