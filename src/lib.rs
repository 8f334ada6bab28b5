#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod compositor;
pub mod config;
pub mod document;
pub mod effects;
pub mod error;
pub mod file_handler;
pub mod geometry;
pub mod id_generator;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod shape;
pub mod state;
pub mod tools;
pub mod widgets;

pub use app::RegionBlurApp;
pub use command::{Command, CommandHistory};
pub use config::EditorConfig;
pub use document::Document;
pub use error::{EditorError, EditorResult};
pub use input::InputEvent;
pub use renderer::Renderer;
pub use shape::{Bounds, Effect, Shape, ShapeId, ShapeKind};
pub use state::EditorSession;
pub use tools::{RegionTool, Tool, ToolOption, ToolOptions};
