//! Recipes, both user-submitted and cached from AI lookups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub image_url: Option<String>,
    /// Free text, one ingredient per line for AI-cached rows.
    pub ingredients: String,
    /// Free text, one step per line for AI-cached rows.
    pub steps: String,
    pub reference: Option<String>,
    pub tags: Vec<String>,
    pub difficulty: Option<String>,
    pub estimated_time: Option<i32>,
    /// `None` for rows cached from AI lookups.
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    pub fn new(title: String, ingredients: String, steps: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            image_url: None,
            ingredients,
            steps,
            reference: None,
            tags: Vec::new(),
            difficulty: None,
            estimated_time: None,
            created_by: None,
            created_at: Utc::now(),
        }
    }

    /// A cached entry only counts as a hit when both lists have content.
    pub fn has_details(&self) -> bool {
        !self.ingredients.trim().is_empty() && !self.steps.trim().is_empty()
    }

    pub fn ingredient_lines(&self) -> Vec<String> {
        split_lines(&self.ingredients)
    }

    pub fn step_lines(&self) -> Vec<String> {
        split_lines(&self.steps)
    }

    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|t| tags.contains(t))
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_steps_are_not_details() {
        let recipe = Recipe::new("Soup".into(), "water\nsalt".into(), "  \n".into());
        assert!(!recipe.has_details());
    }

    #[test]
    fn lines_skip_blanks() {
        let recipe = Recipe::new("Soup".into(), "water\n\n  salt  \n".into(), "boil".into());
        assert_eq!(recipe.ingredient_lines(), vec!["water", "salt"]);
        assert_eq!(recipe.step_lines(), vec!["boil"]);
    }

    #[test]
    fn tag_overlap() {
        let mut recipe = Recipe::new("Salad".into(), "greens".into(), "toss".into());
        recipe.tags = vec!["vegan".into(), "quick".into()];
        assert!(recipe.has_any_tag(&["vegan".to_string()]));
        assert!(!recipe.has_any_tag(&["keto".to_string()]));
        assert!(!recipe.has_any_tag(&[]));
    }
}
