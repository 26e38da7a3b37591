pub mod ai;
pub mod auth;
pub mod favorites;
pub mod grocery;
pub mod history;
pub mod metrics;
pub mod recipes;
pub mod user;
