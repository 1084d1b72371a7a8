//! Service layer for business logic
//!
//! This module contains service abstractions that separate business logic
//! from HTTP handlers, making the code more modular and testable.

pub mod items;
pub mod pictures;

pub use items::ItemService;
pub use pictures::PictureStore;
