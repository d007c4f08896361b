use serde::{Deserialize, Serialize};

/// Background colors every module can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundColor {
    #[default]
    White,
    LightGray,
    Gray,
    DarkGray,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Padding {
    None,
    Small,
    Medium,
    Large,
}

/// Settings shared by all modules.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseModuleSettings {
    pub background_color: BackgroundColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<Padding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<Padding>,
}

/// Implemented by every module's settings type.
pub trait ModuleSettings {
    /// Stable identifier the rendering layer registers the module under.
    fn kind(&self) -> &'static str;

    fn base(&self) -> &BaseModuleSettings;
}
