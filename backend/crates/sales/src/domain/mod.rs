//! Domain Layer
//!
//! Entities, stock rules, and repository traits for the catalog and sales.

pub mod entity;
pub mod repository;
pub mod services;

pub use entity::{
    product::{Product, ProductDraft},
    purchase::{NewPurchase, Purchase},
    sale::{NewSale, PositionRequest, Sale, SalePosition},
};
pub use repository::{CatalogRepository, PurchaseRepository, SaleRepository, SalesRepository};
