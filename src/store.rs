use std::sync::{Arc, PoisonError, RwLock};

use crate::recipe::{Category, Pool, Recipe};

/// An immutable catalog together with its category partitions.
///
/// Partitions hold indices into `recipes`, in catalog order.
#[derive(Debug, Default)]
pub struct Catalog {
    recipes: Vec<Recipe>,
    by_category: [Vec<usize>; 10],
    main_food: Vec<usize>,
}

impl Catalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        let mut by_category: [Vec<usize>; 10] = Default::default();
        for (i, recipe) in recipes.iter().enumerate() {
            if let Some(category) = recipe.category() {
                by_category[category.index()].push(i);
            }
        }
        let main_food = Category::MAIN_FOOD
            .iter()
            .flat_map(|c| by_category[c.index()].iter().copied())
            .collect();
        Self {
            recipes,
            by_category,
            main_food,
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// First recipe whose title matches exactly.
    pub fn find(&self, title: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.title == title)
    }

    /// Recipes in a pool, in catalog (or main-food concatenation) order.
    pub fn subset(&self, pool: Pool) -> Vec<&Recipe> {
        self.indices(pool).iter().map(|&i| &self.recipes[i]).collect()
    }

    pub fn subset_len(&self, pool: Pool) -> usize {
        self.indices(pool).len()
    }

    fn indices(&self, pool: Pool) -> &[usize] {
        match pool {
            Pool::Category(c) => &self.by_category[c.index()],
            Pool::MainFood => &self.main_food,
        }
    }
}

/// Holds the current catalog. Writers build a complete [`Catalog`] and
/// publish it with one pointer swap; readers keep whichever snapshot they
/// took.
#[derive(Debug, Default)]
pub struct RecipeStore {
    current: RwLock<Arc<Catalog>>,
}

impl RecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the startup catalog.
    pub fn load(&self, initial: Vec<Recipe>) {
        self.publish(Catalog::new(initial));
    }

    /// Swap in a replacement catalog.
    pub fn replace(&self, next: Vec<Recipe>) {
        self.publish(Catalog::new(next));
    }

    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn publish(&self, catalog: Catalog) {
        let catalog = Arc::new(catalog);
        tracing::debug!(
            recipes = catalog.len(),
            main_food = catalog.subset_len(Pool::MainFood),
            "publishing catalog"
        );
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = catalog;
    }
}

#[cfg(test)]
pub(crate) fn recipe(title: &str, category: &str) -> Recipe {
    Recipe {
        title: title.to_string(),
        category: category.to_string(),
        image: None,
        introduction: String::new(),
        difficulty: String::new(),
        ingredients: None,
        calculations: None,
        steps: None,
        notes: String::new(),
    }
}
