//! Value Object Module

pub mod phone;
pub mod role;
pub mod token;
