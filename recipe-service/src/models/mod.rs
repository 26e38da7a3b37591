pub mod activity;
pub mod recipe;
pub mod user;

pub use activity::{Favorite, GroceryItem, GroceryItemChanges, UserRecipeInteraction, VoiceQuery};
pub use recipe::Recipe;
pub use user::{User, UserResponse};
