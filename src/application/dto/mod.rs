//! Data transfer objects.

mod trigger_dto;

pub use trigger_dto::{TriggerRequest, TriggerResponse};
