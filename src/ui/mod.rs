//! UI module
//!
//! Rendering, layout, the response fragment pipeline, and the model
//! selector modal.

pub mod fragment;
pub mod layout;
pub mod markdown;
pub mod model_selector;
pub mod render;
pub mod scroll;

pub use fragment::{split_response, ParsedResponse, RenderedFragment, ResponseRenderer};
pub use layout::{get_layout, AppLayout};
pub use markdown::MarkdownRenderer;
pub use model_selector::ModelSelector;
pub use render::render;
