use crate::error::PagebuilderError;
use crate::modules::{ModuleSettings, TextImageSettings};

use super::output::print_json;

/// Default text+image settings, optionally showing a different image.
pub fn text_image_json(image_url: Option<&str>) -> Result<serde_json::Value, PagebuilderError> {
    let mut settings = TextImageSettings::default();
    if let Some(url) = image_url {
        settings = settings.with_image_url(url);
    }
    let value = serde_json::to_value(&settings)
        .map_err(|e| PagebuilderError::ProtocolError(format!("Failed to serialize settings: {e}")))?;
    Ok(serde_json::json!({
        "kind": settings.kind(),
        "settings": value,
    }))
}

/// Run `module text-image`.
pub fn run_text_image(image_url: Option<&str>) -> Result<(), PagebuilderError> {
    print_json(&text_image_json(image_url)?);
    Ok(())
}
