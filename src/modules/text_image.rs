use serde::{Deserialize, Serialize};

use super::base::{BackgroundColor, BaseModuleSettings, ModuleSettings, Padding};

pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1638368593249-7cadb261e8b3?q=80&w=700";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImagePosition {
    Left,
    #[default]
    Right,
}

/// Headline and body text next to an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextImageSettings {
    #[serde(flatten)]
    pub base: BaseModuleSettings,
    pub image_position: ImagePosition,
    pub headline: String,
    pub text: String,
    pub image_url: String,
}

impl Default for TextImageSettings {
    fn default() -> Self {
        Self {
            base: BaseModuleSettings {
                background_color: BackgroundColor::White,
                padding_top: Some(Padding::Medium),
                padding_bottom: Some(Padding::Medium),
            },
            image_position: ImagePosition::Right,
            headline: "Your headline here".to_string(),
            text: "Your text here. This is an example of how text and an image can be \
                   combined in one module."
                .to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
        }
    }
}

impl TextImageSettings {
    /// A copy showing `url` instead of the current image.
    pub fn with_image_url(&self, url: impl Into<String>) -> Self {
        Self {
            image_url: url.into(),
            ..self.clone()
        }
    }
}

impl ModuleSettings for TextImageSettings {
    fn kind(&self) -> &'static str {
        "text-image"
    }

    fn base(&self) -> &BaseModuleSettings {
        &self.base
    }
}
