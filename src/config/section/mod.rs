//! Configuration section definitions.

mod image;
mod markup;
mod paths;
mod script;
mod serve;
mod style;

pub use image::ImageConfig;
pub use markup::MarkupConfig;
pub use paths::PathsConfig;
pub use script::ScriptConfig;
pub use serve::ServeConfig;
pub use style::StyleConfig;
