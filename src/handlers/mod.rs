//! Request handlers for the intake service.

pub mod cards;
