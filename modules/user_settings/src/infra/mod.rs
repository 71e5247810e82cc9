//! Infrastructure layer - adapters behind the domain ports

pub mod cache;
pub mod storage;
pub mod templates;
