//! Database models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Placeholder image used when a recipe has no uploaded image.
/// The image store never deletes it.
pub const DEFAULT_IMAGE: &str = "default-recipe.svg";

/// Recipe aggregate root, with its steps in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub ingredients: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub preparation_time: i64,
    pub image: String,
    pub steps: Vec<Step>,
}

impl Recipe {
    /// Public URL of the recipe image
    pub fn image_url(&self) -> String {
        format!("/uploads/{}", self.image)
    }

    pub fn has_default_image(&self) -> bool {
        self.image == DEFAULT_IMAGE
    }
}

/// Preparation step owned by exactly one recipe
///
/// `order` is assigned once at creation and never renumbered, so gaps
/// appear after deletions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub order: i64,
}

/// Editable part of a step, echoed back after an update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepContent {
    pub name: String,
    pub description: String,
}

/// Error for an unrecognized category or difficulty tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag(pub String);

impl fmt::Display for UnknownTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tag: {}", self.0)
    }
}

impl std::error::Error for UnknownTag {}

/// Recipe category, used as an exact-match listing filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Entrante,
    Principal,
    Postre,
    Vegano,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Entrante,
        Category::Principal,
        Category::Postre,
        Category::Vegano,
    ];

    /// Tag stored in the database and used in query strings
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Entrante => "entrante",
            Category::Principal => "principal",
            Category::Postre => "postre",
            Category::Vegano => "vegano",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            Category::Entrante => "Entrantes",
            Category::Principal => "Principales",
            Category::Postre => "Postres",
            Category::Vegano => "Veganos",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recipe difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Facil,
    Media,
    Dificil,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Facil, Difficulty::Media, Difficulty::Dificil];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Facil => "facil",
            Difficulty::Media => "media",
            Difficulty::Dificil => "dificil",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Facil => "Fácil",
            Difficulty::Media => "Media",
            Difficulty::Dificil => "Difícil",
        }
    }
}

impl FromStr for Difficulty {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert!("Postre".parse::<Category>().is_err());
    }

    #[test]
    fn test_recipe_serializes_camel_case() {
        let recipe = Recipe {
            id: Uuid::nil(),
            name: "Tarta".to_string(),
            description: "X".repeat(25),
            ingredients: "eggs".to_string(),
            category: Category::Postre,
            difficulty: Difficulty::Facil,
            preparation_time: 30,
            image: DEFAULT_IMAGE.to_string(),
            steps: vec![],
        };
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["preparationTime"], 30);
        assert_eq!(json["category"], "postre");
        assert_eq!(json["difficulty"], "facil");
        assert_eq!(json["image"], DEFAULT_IMAGE);
        assert!(json["steps"].as_array().unwrap().is_empty());
    }
}
