//! Prompt templates. Each one asks the model for the layout the matching
//! parser in [`super::parser`] understands.

#[derive(Debug, Clone, Copy)]
pub enum PromptIntent<'a> {
    DishList { category: &'a str },
    DishDetails { dish: &'a str },
    Conversation { user_input: &'a str },
    /// Sent to the model verbatim.
    Suggest { prompt: &'a str },
}

pub fn build_prompt(intent: PromptIntent<'_>) -> String {
    match intent {
        PromptIntent::DishList { category } => format!(
            "List up to 20 popular {category} dishes.\n\
             Reply with a numbered list, one dish name per line, like:\n\
             1. Dish name\n\
             2. Dish name\n\
             Do not add descriptions or any other text."
        ),
        PromptIntent::DishDetails { dish } => format!(
            "Give me a recipe for {dish}.\n\
             Use exactly these sections:\n\
             Ingredients:\n\
             - one ingredient per line, starting with a dash\n\
             Steps:\n\
             1. one step per line, numbered\n\
             Reference: a single URL to a well-known recipe website or video for {dish}"
        ),
        PromptIntent::Conversation { user_input } => format!(
            "A home cook says: \"{user_input}\"\n\
             Suggest up to 3 dishes that fit. For each dish use this layout:\n\
             Dish 1: <name>\n\
             Name: <name>\n\
             Description: <one sentence>\n\
             Ingredients: <comma separated list>\n\
             Time: <total time>\n\
             Difficulty: <Easy, Medium or Hard>\n\
             Instructions: <short instructions on one line>"
        ),
        PromptIntent::Suggest { prompt } => prompt.to_string(),
    }
}
