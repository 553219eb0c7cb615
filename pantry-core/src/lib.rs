pub mod add_item;
pub mod ai;
pub mod error;
pub mod expiry;
pub mod inventory;
pub mod normalize;
pub mod recipes;
pub mod types;

pub use add_item::{AddItemForm, FormStatus, InputMode, MAX_IMAGE_BYTES};
pub use error::{ExpiryError, FormError, NormalizationError, RecipeError};
pub use expiry::{
    classify, classify_at, classify_iso, parse_expiry, Bucket, ExpiryClassification,
    URGENT_WINDOW_DAYS,
};
pub use inventory::Inventory;
pub use normalize::{normalize, normalize_with_strategy, strip_code_fence, ParseStrategy};
pub use recipes::{IngredientSelection, RecipeBook};
pub use types::{InventoryItem, NewInventoryItem, Recipe, RecognizedItem};
