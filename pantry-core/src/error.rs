use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("Could not parse AI response as JSON")]
    Unparseable,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpiryError {
    #[error("Invalid expiration date: {0:?}")]
    InvalidDate(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0}")]
    MissingName(&'static str),

    #[error("Invalid expiration date: {0:?}")]
    InvalidExpiry(String),

    #[error("Image is too large. Please use an image smaller than 20MB.")]
    ImageTooLarge { size: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecipeError {
    #[error("Recipe not in catalog: {0}")]
    NotInCatalog(String),
}

impl From<ExpiryError> for FormError {
    fn from(err: ExpiryError) -> Self {
        match err {
            ExpiryError::InvalidDate(text) => FormError::InvalidExpiry(text),
        }
    }
}
