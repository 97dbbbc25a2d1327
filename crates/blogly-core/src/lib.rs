//! # Blogly Core
//!
//! The domain layer of Blogly: users, posts, tags and the links between them.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::{BlogService, DEFAULT_RECENT_POSTS};
