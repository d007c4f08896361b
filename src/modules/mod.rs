pub mod base;
pub mod text_image;

pub use base::{BackgroundColor, BaseModuleSettings, ModuleSettings, Padding};
pub use text_image::{ImagePosition, TextImageSettings, DEFAULT_IMAGE_URL};
