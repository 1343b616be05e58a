//! Binds [`crate::domain::Order`] to the generic resource actor.

pub mod entity;
