use reqwest::Url;

use crate::error::PagebuilderError;

/// Sends the user agent to the authorization endpoint.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &Url) -> Result<(), PagebuilderError>;
}

/// Opens the system browser, falling back to printing the URL.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &Url) -> Result<(), PagebuilderError> {
        if webbrowser::open(url.as_str()).is_err() {
            tracing::warn!("Could not open browser automatically. Please visit:\n{url}");
            eprintln!("Open this URL to authorize:\n{url}");
        }
        Ok(())
    }
}

/// Prints the URL to stdout for the user to open manually.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&self, url: &Url) -> Result<(), PagebuilderError> {
        println!("Open this URL to authorize:\n{url}");
        Ok(())
    }
}
