//! Use case implementations.

mod acquire_image_use_case;
mod deliver_image_use_case;
mod handle_trigger_use_case;

pub use acquire_image_use_case::{AcquireImageUseCase, RETRIEVAL_FAILED_TEXT};
pub use deliver_image_use_case::{DeliverImageUseCase, DeliveryPolicy, fallback_link_text};
pub use handle_trigger_use_case::HandleTriggerUseCase;
