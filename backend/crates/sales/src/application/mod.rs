//! Application Layer
//!
//! Use cases and application services.

pub mod catalog;
pub mod config;
pub mod make_sale;
pub mod purchases;
pub mod sales_summary;

// Re-exports
pub use catalog::{CatalogUseCase, SaveProductInput};
pub use config::SalesConfig;
pub use make_sale::{MakeSaleInput, MakeSaleUseCase};
pub use purchases::{MakePurchaseInput, PurchasesUseCase};
pub use sales_summary::SalesSummaryUseCase;
