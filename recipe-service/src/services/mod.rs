//! Business logic and the seams to PostgreSQL and the upstream APIs.

pub mod activity;
pub mod ai;
pub mod auth;
mod database;
pub mod error;
pub mod image_search;
mod jwt;
pub mod memory;
pub mod metrics;
pub mod providers;
pub mod recipes;
pub mod store;

pub use activity::ActivityService;
pub use ai::AiService;
pub use auth::AuthService;
pub use database::Database;
pub use error::{ServiceError, StoreError};
pub use image_search::{ImageSearch, MockImageSearch, OpenverseClient};
pub use jwt::{AccessTokenClaims, JwtService};
pub use memory::InMemoryStore;
pub use providers::{GeminiTextProvider, MockTextProvider, ProviderError, TextProvider};
pub use recipes::RecipeService;
pub use store::RecipeStore;
