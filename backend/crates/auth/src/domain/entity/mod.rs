//! Entity Module

pub mod access_token;
pub mod customer;
pub mod manager;
