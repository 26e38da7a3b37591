use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::GroceryItemChanges;

#[derive(Debug, Deserialize, ToSchema)]
pub struct FavoriteRequest {
    pub recipe_id: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGroceryItemRequest {
    #[validate(length(min = 1, max = 100, message = "Item name must be 1-100 characters"))]
    #[schema(example = "Chickpeas")]
    pub item_name: String,

    #[validate(length(max = 50))]
    #[schema(example = "2 cans")]
    pub quantity: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateGroceryItemRequest {
    #[validate(length(min = 1, max = 100))]
    pub item_name: Option<String>,

    #[validate(length(max = 50))]
    pub quantity: Option<String>,

    pub is_checked: Option<bool>,
}

impl From<UpdateGroceryItemRequest> for GroceryItemChanges {
    fn from(req: UpdateGroceryItemRequest) -> Self {
        Self {
            item_name: req.item_name,
            quantity: req.quantity,
            is_checked: req.is_checked,
        }
    }
}
