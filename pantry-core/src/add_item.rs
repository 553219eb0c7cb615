//! Add-item form state.
//!
//! The form collects a name, quantity and expiry either by hand or pre-filled
//! from a recognition result. Recognition runs outside the form; the caller
//! reports its progress through `begin_recognition`, `apply_recognized` and
//! `fail`.

use crate::error::FormError;
use crate::expiry::parse_expiry;
use crate::types::{NewInventoryItem, RecognizedItem};

/// Largest image accepted for recognition.
pub const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Text,
    Image,
    Speech,
}

impl InputMode {
    fn missing_name_message(&self) -> &'static str {
        match self {
            InputMode::Text => "Please enter a name",
            InputMode::Image => "Please wait for image recognition to complete",
            InputMode::Speech => "Please speak to add an item",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Processing,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct AddItemForm {
    mode: InputMode,
    pub name: String,
    pub quantity: String,
    pub expires: String,
    status: FormStatus,
}

impl AddItemForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FormStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_processing(&self) -> bool {
        self.status == FormStatus::Processing
    }

    /// Switch input mode. Any error from the previous mode is cleared.
    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
        if matches!(self.status, FormStatus::Failed(_)) {
            self.status = FormStatus::Idle;
        }
    }

    /// Reject images the recognition service will not accept.
    pub fn check_image_size(&mut self, size: usize) -> Result<(), FormError> {
        if size > MAX_IMAGE_BYTES {
            let err = FormError::ImageTooLarge { size };
            self.status = FormStatus::Failed(err.to_string());
            return Err(err);
        }
        Ok(())
    }

    pub fn begin_recognition(&mut self) {
        self.status = FormStatus::Processing;
    }

    /// Pre-fill the fields from a recognition result.
    pub fn apply_recognized(&mut self, item: RecognizedItem) {
        self.name = item.name;
        self.quantity = item.quantity;
        self.expires = item.expires.unwrap_or_default();
        self.status = FormStatus::Ready;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = FormStatus::Failed(message.into());
    }

    /// Validate and commit the form, resetting it on success.
    ///
    /// The mode is kept across the reset.
    pub fn submit(&mut self) -> Result<NewInventoryItem, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName(self.mode.missing_name_message()));
        }

        let expires = match self.expires.trim() {
            "" => None,
            text => Some(parse_expiry(text)?),
        };

        let item = NewInventoryItem {
            name: name.to_string(),
            quantity: self.quantity.trim().to_string(),
            expires,
        };

        *self = Self {
            mode: self.mode,
            ..Self::default()
        };

        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn recognized(expires: Option<&str>) -> RecognizedItem {
        RecognizedItem {
            name: "Eggs".to_string(),
            quantity: "12".to_string(),
            expires: expires.map(str::to_string),
            confidence: Some(0.9),
        }
    }

    #[test]
    fn test_text_submit() {
        let mut form = AddItemForm::new();
        form.name = "Milk".to_string();
        form.quantity = "1 carton".to_string();
        form.expires = "2024-06-12".to_string();

        let item = form.submit().unwrap();
        assert_eq!(item.name, "Milk");
        assert_eq!(item.quantity, "1 carton");
        assert_eq!(item.expires, NaiveDate::from_ymd_opt(2024, 6, 12));

        assert!(form.name.is_empty());
        assert!(form.expires.is_empty());
    }

    #[test]
    fn test_missing_name_message_depends_on_mode() {
        let mut form = AddItemForm::new();
        assert_eq!(
            form.submit(),
            Err(FormError::MissingName("Please enter a name"))
        );

        form.set_mode(InputMode::Image);
        assert_eq!(
            form.submit(),
            Err(FormError::MissingName(
                "Please wait for image recognition to complete"
            ))
        );

        form.set_mode(InputMode::Speech);
        form.name = "   ".to_string();
        assert_eq!(
            form.submit(),
            Err(FormError::MissingName("Please speak to add an item"))
        );
    }

    #[test]
    fn test_recognition_flow() {
        let mut form = AddItemForm::new();
        form.set_mode(InputMode::Image);
        form.begin_recognition();
        assert!(form.is_processing());

        form.apply_recognized(recognized(Some("2024-06-15")));
        assert_eq!(form.status(), &FormStatus::Ready);
        assert_eq!(form.name, "Eggs");

        let item = form.submit().unwrap();
        assert_eq!(item.expires, NaiveDate::from_ymd_opt(2024, 6, 15));
        assert_eq!(form.mode(), InputMode::Image);
        assert_eq!(form.status(), &FormStatus::Idle);
    }

    #[test]
    fn test_recognized_without_expiry_leaves_field_blank() {
        let mut form = AddItemForm::new();
        form.apply_recognized(recognized(None));
        assert_eq!(form.expires, "");
        assert_eq!(form.submit().unwrap().expires, None);
    }

    #[test]
    fn test_hallucinated_date_is_rejected() {
        let mut form = AddItemForm::new();
        form.apply_recognized(recognized(Some("best before the weekend")));

        assert_eq!(
            form.submit(),
            Err(FormError::InvalidExpiry("best before the weekend".to_string()))
        );
        assert_eq!(form.name, "Eggs");
    }

    #[test]
    fn test_switching_mode_clears_error() {
        let mut form = AddItemForm::new();
        form.fail("Recognition failed: boom");
        assert_eq!(form.error(), Some("Recognition failed: boom"));

        form.set_mode(InputMode::Speech);
        assert_eq!(form.error(), None);
    }

    #[test]
    fn test_image_size_limit() {
        let mut form = AddItemForm::new();
        assert!(form.check_image_size(MAX_IMAGE_BYTES).is_ok());

        let err = form.check_image_size(MAX_IMAGE_BYTES + 1).unwrap_err();
        assert!(matches!(err, FormError::ImageTooLarge { .. }));
        assert_eq!(
            form.error(),
            Some("Image is too large. Please use an image smaller than 20MB.")
        );
    }
}
