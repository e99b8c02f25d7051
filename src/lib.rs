//! Soap Film Widgets Library
//!
//! Physics models behind three interactive soap bubble widgets:
//! - Laplace pressure and airflow between two connected bubbles
//! - Minimal Steiner soap-film network on a square
//! - Thin-film interference color banding

pub mod config;
pub mod export;
pub mod physics;
pub mod widgets;

pub use config::WidgetConfig;
pub use widgets::ArticleState;
