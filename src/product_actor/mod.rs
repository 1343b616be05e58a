//! Binds [`crate::domain::Product`] to the generic resource actor.

pub mod entity;
