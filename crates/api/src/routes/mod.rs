//! Route Handlers

pub mod pages;
pub mod rows;
pub mod summary;
