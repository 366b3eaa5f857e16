pub mod product;
pub mod purchase;
pub mod sale;
