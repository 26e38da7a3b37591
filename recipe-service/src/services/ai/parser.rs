//! Best-effort parsers for free-form model output.
//!
//! None of these functions fail. Text that does not have the expected shape
//! yields empty or incomplete values with `partial` set, so callers can tell
//! "nothing parsed" apart from "upstream call failed".

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Hosts preferred when a reference line offers several links. Subdomains
/// match too (`www.`, `cooking.`).
pub const REFERENCE_ALLOW_LIST: &[&str] = &[
    "allrecipes.com",
    "foodnetwork.com",
    "bbcgoodfood.com",
    "seriouseats.com",
    "epicurious.com",
    "bonappetit.com",
    "simplyrecipes.com",
    "food.com",
    "delish.com",
    "tasty.co",
    "nytimes.com",
    "youtube.com",
    "youtu.be",
];

/// Parser output plus whether the expected shape was only partly found.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub partial: bool,
}

impl<T> Parsed<T> {
    fn new(value: T, partial: bool) -> Self {
        Self { value, partial }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DishDetails {
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub reference: Option<String>,
}

/// One record of a multi-dish suggestion answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DishSuggestion {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub time: Option<String>,
    pub difficulty: Option<String>,
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    None,
    Ingredients,
    Steps,
    Reference,
}

static ORDINAL_OR_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d+\s*[.):]|[-*•])\s*").expect("valid regex"));

static SECTION_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^#*\s*(?:\*\*)?\s*(ingredients|steps|references?)\s*(?:\*\*)?\s*(?::(.*))?$",
    )
    .expect("valid regex")
});

static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s<>()\[\]"']+"#).expect("valid regex"));

static DISH_DELIMITER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^#*\s*(?:\*\*)?\s*dish\b\s*(?:#?\d+)?\s*(?:\*\*)?\s*(?::(.*))?$")
        .expect("valid regex")
});

static DISH_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^[-*]?\s*(?:\*\*)?\s*(name|description|ingredients|time|difficulty|instructions)\s*(?:\*\*)?\s*:(.*)$",
    )
    .expect("valid regex")
});

/// Strip Markdown bold markers and surrounding whitespace.
fn clean(text: &str) -> String {
    text.replace("**", "").trim().to_string()
}

/// Remove a single leading ordinal (`1.`, `2)`, `3:`) or bullet marker.
fn strip_marker(line: &str) -> &str {
    match ORDINAL_OR_BULLET.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// Numbered or bulleted dish names, in order.
///
/// A line qualifies when its first non-space character is a digit or `-`.
/// With no qualifying line, every non-blank line is taken as a name and the
/// result is marked partial.
pub fn parse_dish_list(text: &str) -> Parsed<Vec<String>> {
    let qualifying: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| l.starts_with(|c: char| c.is_ascii_digit() || c == '-'))
        .collect();

    if qualifying.is_empty() {
        let names: Vec<String> = text
            .lines()
            .map(clean)
            .filter(|l| !l.is_empty())
            .collect();
        return Parsed::new(names, true);
    }

    let names: Vec<String> = qualifying
        .into_iter()
        .map(|l| clean(strip_marker(l)))
        .filter(|n| !n.is_empty())
        .collect();
    let partial = names.is_empty();
    Parsed::new(names, partial)
}

/// Ingredients, steps and a single reference from sectioned text.
pub fn parse_dish_details(text: &str) -> Parsed<DishDetails> {
    let mut details = DishDetails::default();
    let mut section = Section::None;

    for raw in text.lines() {
        let line = raw.trim();

        if let Some(caps) = SECTION_HEADER.captures(line) {
            let name = caps[1].to_lowercase();
            section = if name.starts_with("ingredients") {
                Section::Ingredients
            } else if name.starts_with("steps") {
                Section::Steps
            } else {
                Section::Reference
            };

            if section == Section::Reference && details.reference.is_none() {
                let inline = caps.get(2).map(|m| clean(m.as_str())).unwrap_or_default();
                if !inline.is_empty() {
                    details.reference = Some(extract_reference(&inline));
                }
            }
            continue;
        }

        if line.is_empty() {
            continue;
        }

        match section {
            Section::Ingredients | Section::Steps => {
                if !line.starts_with(|c: char| c == '-' || c == '*' || c.is_ascii_digit()) {
                    continue;
                }
                let item = clean(strip_marker(line.strip_prefix("**").unwrap_or(line)));
                if item.is_empty() {
                    continue;
                }
                if section == Section::Ingredients {
                    details.ingredients.push(item);
                } else {
                    details.steps.push(item);
                }
            }
            Section::Reference => {
                if details.reference.is_none() {
                    details.reference = Some(extract_reference(&clean(strip_marker(line))));
                }
            }
            Section::None => {}
        }
    }

    let partial =
        details.ingredients.is_empty() || details.steps.is_empty() || details.reference.is_none();
    Parsed::new(details, partial)
}

/// Allow-listed URL, else first URL, else text after the first colon, else
/// the line itself.
fn extract_reference(line: &str) -> String {
    let urls: Vec<&str> = URL
        .find_iter(line)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', '!', '?', '*']))
        .collect();

    if let Some(url) = urls.iter().find(|u| is_allow_listed(u)) {
        return url.to_string();
    }
    if let Some(url) = urls.first() {
        return url.to_string();
    }
    match line.split_once(':') {
        Some((_, rest)) if !rest.trim().is_empty() => rest.trim().to_string(),
        _ => line.trim().to_string(),
    }
}

pub fn is_allow_listed(link: &str) -> bool {
    let Some(host) = url::Url::parse(link)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
    else {
        return false;
    };

    REFERENCE_ALLOW_LIST
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
}

/// `Dish N:` blocks with `Key: value` lines.
///
/// Lines before the first delimiter are ignored. A record is emitted when
/// the next delimiter or the end of input is reached.
pub fn parse_dish_suggestions(text: &str) -> Parsed<Vec<DishSuggestion>> {
    let mut dishes = Vec::new();
    let mut current: Option<DishSuggestion> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = DISH_DELIMITER.captures(line) {
            if let Some(done) = current.take() {
                dishes.push(done);
            }
            let name = caps
                .get(1)
                .map(|m| clean(m.as_str()))
                .filter(|n| !n.is_empty());
            current = Some(DishSuggestion {
                name,
                ..Default::default()
            });
            continue;
        }

        let Some(dish) = current.as_mut() else {
            continue;
        };
        let Some(caps) = DISH_FIELD.captures(line) else {
            continue;
        };

        let value = Some(clean(&caps[2])).filter(|v| !v.is_empty());
        match caps[1].to_lowercase().as_str() {
            "name" => dish.name = value,
            "description" => dish.description = value,
            "ingredients" => dish.ingredients = value,
            "time" => dish.time = value,
            "difficulty" => dish.difficulty = value,
            "instructions" => dish.instructions = value,
            _ => {}
        }
    }

    if let Some(done) = current {
        dishes.push(done);
    }

    let partial = dishes.is_empty() || dishes.iter().any(|d| d.name.is_none());
    Parsed::new(dishes, partial)
}
