//! # Repository Module
//!
//! Repository implementations over the SQLite pool. SQL lives here and
//! nowhere else; services go through a repository (or the store contract in
//! [`crate::contract`]) rather than writing queries.
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product CRUD and stock access
//! - [`category::CategoryRepository`] - Category reference data
//! - [`sale::SaleRepository`] - Sale headers and lines
//! - [`profile::ProfileRepository`] - User profiles and roles

pub mod category;
pub mod product;
pub mod profile;
pub mod sale;
