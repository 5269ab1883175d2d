use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// One catalog entry, as published by the HowToCook JSON export.
///
/// `title` and `category` are required; the free-text fields default to
/// empty and the list fields stay `None` when the export omits them or
/// sends `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub image: Option<Vec<String>>,
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub calculations: Option<Vec<String>>,
    #[serde(default)]
    pub steps: Option<Vec<String>>,
    #[serde(default)]
    pub notes: String,
}

impl Recipe {
    /// The known category this recipe belongs to, if any.
    pub fn category(&self) -> Option<Category> {
        Category::parse(&self.category)
    }

    /// First image reference, skipping an empty list.
    pub fn cover_image(&self) -> Option<&str> {
        self.image
            .as_ref()
            .and_then(|images| images.first())
            .map(String::as_str)
    }
}

/// Parse a JSON array of recipes.
pub fn parse_recipes(bytes: &[u8]) -> Result<Vec<Recipe>, CatalogError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Aquatic,
    Breakfast,
    Condiment,
    Dessert,
    Drink,
    MeatDish,
    SemiFinished,
    Soup,
    Staple,
    VegetableDish,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Aquatic,
        Category::Breakfast,
        Category::Condiment,
        Category::Dessert,
        Category::Drink,
        Category::MeatDish,
        Category::SemiFinished,
        Category::Soup,
        Category::Staple,
        Category::VegetableDish,
    ];

    /// Categories that make up "main food", in concatenation order.
    pub const MAIN_FOOD: [Category; 6] = [
        Category::Staple,
        Category::SemiFinished,
        Category::MeatDish,
        Category::VegetableDish,
        Category::Aquatic,
        Category::Soup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Aquatic => "aquatic",
            Category::Breakfast => "breakfast",
            Category::Condiment => "condiment",
            Category::Dessert => "dessert",
            Category::Drink => "drink",
            Category::MeatDish => "meat_dish",
            Category::SemiFinished => "semi-finished",
            Category::Soup => "soup",
            Category::Staple => "staple",
            Category::VegetableDish => "vegetable_dish",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// Position in [`Category::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A suggestion pool: one category subset or the main-food union.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Category(Category),
    MainFood,
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pool::Category(c) => c.fmt(f),
            Pool::MainFood => f.write_str("main_food"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_recipe() {
        let json = r#"[{
            "title": "西红柿炒鸡蛋",
            "category": "vegetable_dish",
            "image": ["https://example.com/egg.jpg"],
            "introduction": "家常菜",
            "difficulty": "★",
            "ingredients": ["西红柿", "鸡蛋"],
            "calculations": ["西红柿 1 个", "鸡蛋 2 个"],
            "steps": ["打蛋", "翻炒"],
            "notes": "少放糖"
        }]"#;
        let recipes = parse_recipes(json.as_bytes()).unwrap();
        assert_eq!(recipes.len(), 1);
        let r = &recipes[0];
        assert_eq!(r.category(), Some(Category::VegetableDish));
        assert_eq!(r.cover_image(), Some("https://example.com/egg.jpg"));
        assert_eq!(r.steps.as_deref(), Some(&["打蛋".to_string(), "翻炒".to_string()][..]));
    }

    #[test]
    fn null_and_missing_optionals() {
        let json = r#"[{
            "title": "白粥",
            "category": "soup",
            "image": null,
            "ingredients": null,
            "steps": null
        }]"#;
        let recipes = parse_recipes(json.as_bytes()).unwrap();
        let r = &recipes[0];
        assert!(r.image.is_none());
        assert!(r.ingredients.is_none());
        assert!(r.calculations.is_none());
        assert!(r.steps.is_none());
        assert_eq!(r.introduction, "");
        assert_eq!(r.notes, "");
    }

    #[test]
    fn missing_title_is_a_parse_error() {
        let json = r#"[{"category": "soup"}]"#;
        let err = parse_recipes(json.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn non_array_is_a_parse_error() {
        let err = parse_recipes(br#"{"title": "x"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn unknown_category_is_kept() {
        let recipes =
            parse_recipes(br#"[{"title": "x", "category": "snack"}]"#).unwrap();
        assert_eq!(recipes[0].category, "snack");
        assert_eq!(recipes[0].category(), None);
    }

    #[test]
    fn empty_image_list_has_no_cover() {
        let recipes =
            parse_recipes(br#"[{"title": "x", "category": "soup", "image": []}]"#).unwrap();
        assert_eq!(recipes[0].cover_image(), None);
    }

    #[test]
    fn category_round_trip_names() {
        for c in Category::ALL {
            assert_eq!(Category::parse(c.as_str()), Some(c));
            assert_eq!(Category::ALL[c.index()], c);
        }
        assert_eq!(Category::parse("semi_finished"), None);
    }
}
