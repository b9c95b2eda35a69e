//! Transient storage adapters.

pub mod transient_store;

pub use transient_store::TransientImageStore;
