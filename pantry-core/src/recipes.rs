//! Recipe book and ingredient selection.

use std::collections::BTreeSet;

use uuid::Uuid;

use crate::error::RecipeError;
use crate::inventory::Inventory;
use crate::types::Recipe;

struct SeedRecipe {
    id: &'static str,
    name: &'static str,
    tags: &'static [&'static str],
    image: &'static str,
}

const STARTER_RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        id: "1",
        name: "Scrambled Eggs",
        tags: &["15 min", "High protein"],
        image: "https://images.unsplash.com/photo-1588166524941-3bf61a9c41db?w=400&h=300&fit=crop",
    },
    SeedRecipe {
        id: "2",
        name: "Chicken Stir Fry",
        tags: &["30 min", "High protein"],
        image: "https://images.unsplash.com/photo-1603133872878-684f208fb84b?w=400&h=300&fit=crop",
    },
    SeedRecipe {
        id: "3",
        name: "Tomato Pasta",
        tags: &["20 min", "Vegetarian"],
        image: "https://images.unsplash.com/photo-1621996346565-e3dbc646d9a9?w=400&h=300&fit=crop",
    },
];

const CATALOG_RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        id: "4",
        name: "Fried Rice",
        tags: &["25 min", "Quick"],
        image: "https://images.unsplash.com/photo-1603133872878-684f208fb84b?w=400&h=300&fit=crop",
    },
    SeedRecipe {
        id: "5",
        name: "Chicken Salad",
        tags: &["15 min", "Healthy"],
        image: "https://images.unsplash.com/photo-1546069901-ba9599a7e63c?w=400&h=300&fit=crop",
    },
    SeedRecipe {
        id: "6",
        name: "Omelette",
        tags: &["10 min", "High protein"],
        image: "https://images.unsplash.com/photo-1612929633736-8c8b2f8c8c8c?w=400&h=300&fit=crop",
    },
    SeedRecipe {
        id: "7",
        name: "Pasta Carbonara",
        tags: &["30 min", "Comfort food"],
        image: "https://images.unsplash.com/photo-1621996346565-e3dbc646d9a9?w=400&h=300&fit=crop",
    },
    SeedRecipe {
        id: "8",
        name: "Grilled Salmon",
        tags: &["20 min", "High protein", "Healthy"],
        image: "https://images.unsplash.com/photo-1467003909585-2f8a72700288?w=400&h=300&fit=crop",
    },
    SeedRecipe {
        id: "9",
        name: "Vegetable Soup",
        tags: &["35 min", "Vegetarian", "Comfort food"],
        image: "https://images.unsplash.com/photo-1547592166-23ac45744acd?w=400&h=300&fit=crop",
    },
    SeedRecipe {
        id: "11",
        name: "Caesar Salad",
        tags: &["15 min", "Vegetarian", "Quick"],
        image: "https://images.unsplash.com/photo-1546793665-c74683f339c1?w=400&h=300&fit=crop",
    },
];

impl SeedRecipe {
    fn to_recipe(&self) -> Recipe {
        Recipe {
            id: self.id.to_string(),
            name: self.name.to_string(),
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            image: Some(self.image.to_string()),
        }
    }
}

/// The user's recipes plus the catalog of recipes they can still add.
#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
    catalog: Vec<Recipe>,
}

impl RecipeBook {
    pub fn new(recipes: Vec<Recipe>, catalog: Vec<Recipe>) -> Self {
        Self { recipes, catalog }
    }

    pub fn seeded() -> Self {
        Self::new(
            STARTER_RECIPES.iter().map(SeedRecipe::to_recipe).collect(),
            CATALOG_RECIPES.iter().map(SeedRecipe::to_recipe).collect(),
        )
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Catalog recipes not yet added to the book.
    pub fn available(&self) -> &[Recipe] {
        &self.catalog
    }

    /// Move a catalog recipe into the book under a new id.
    pub fn add_from_catalog(&mut self, catalog_id: &str) -> Result<&Recipe, RecipeError> {
        let position = self
            .catalog
            .iter()
            .position(|r| r.id == catalog_id)
            .ok_or_else(|| RecipeError::NotInCatalog(catalog_id.to_string()))?;

        let recipe = self.catalog.remove(position);
        let index = self.recipes.len();
        self.recipes.push(Recipe {
            id: Uuid::new_v4().to_string(),
            ..recipe
        });
        Ok(&self.recipes[index])
    }
}

/// Which inventory items feed recipe suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IngredientSelection {
    #[default]
    All,
    Manual(BTreeSet<String>),
}

impl IngredientSelection {
    /// Toggle one ingredient, switching to manual selection if needed.
    pub fn toggle(&mut self, name: &str) {
        if let IngredientSelection::All = self {
            *self = IngredientSelection::Manual(BTreeSet::new());
        }
        if let IngredientSelection::Manual(selected) = self {
            if !selected.remove(name) {
                selected.insert(name.to_string());
            }
        }
    }

    pub fn is_selected(&self, name: &str) -> bool {
        match self {
            IngredientSelection::All => true,
            IngredientSelection::Manual(selected) => selected.contains(name),
        }
    }

    /// Names of the selected inventory items, in inventory order.
    pub fn ingredients(&self, inventory: &Inventory) -> Vec<String> {
        inventory
            .items()
            .iter()
            .filter(|item| self.is_selected(&item.name))
            .map(|item| item.name.clone())
            .collect()
    }
}
