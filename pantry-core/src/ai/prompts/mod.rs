//! AI prompt templates.

pub mod image_recognize;
pub mod speech_parse;

pub use image_recognize::render_image_recognize_prompt;
pub use speech_parse::{render_speech_parse_system_prompt, render_speech_parse_user_prompt};
