//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Stateless pipeline helpers.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{TriggerRequest, TriggerResponse};
pub use use_cases::{AcquireImageUseCase, DeliverImageUseCase, HandleTriggerUseCase};
