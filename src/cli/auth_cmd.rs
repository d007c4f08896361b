use std::time::Duration;

use crate::auth::{listen_for_callback, loopback_port, BrowserNavigator, Navigator, PrintNavigator};
use crate::error::PagebuilderError;
use crate::toolkit::Toolkit;

use super::output::{print_json, OutputMode};

/// Default wait for the browser redirect with `login --listen`.
pub const DEFAULT_LOGIN_TIMEOUT_MS: u64 = 120_000;

#[derive(Debug, Clone, Copy)]
pub struct LoginOptions {
    pub open_browser: bool,
    pub listen: bool,
    pub timeout: Duration,
}

/// Run the login command.
pub async fn run_login(toolkit: &Toolkit, opts: LoginOptions) -> Result<(), PagebuilderError> {
    if !toolkit.settings().oauth_enabled {
        return Err(PagebuilderError::MissingConfig(
            "OAuth login is disabled; set unsplash.oauthEnabled to true".into(),
        ));
    }

    let navigator: &dyn Navigator = if opts.open_browser {
        &BrowserNavigator
    } else {
        &PrintNavigator
    };

    if !opts.listen {
        toolkit.auth().initiate_login(navigator)?;
        println!("After authorizing, finish with: pagebuilder callback '<redirect URL>'");
        return Ok(());
    }

    let redirect_uri = toolkit
        .settings()
        .redirect_uri
        .as_deref()
        .ok_or_else(|| PagebuilderError::MissingConfig("unsplash.redirectUri is not set".into()))?;
    let port = loopback_port(redirect_uri).ok_or_else(|| {
        PagebuilderError::MissingConfig(format!(
            "--listen needs a localhost redirectUri, got '{redirect_uri}'"
        ))
    })?;

    // listen before navigating so a fast redirect is not missed
    let listener = tokio::spawn(listen_for_callback(port, opts.timeout));
    if let Err(e) = toolkit.auth().initiate_login(navigator) {
        listener.abort();
        return Err(e);
    }
    let target = listener
        .await
        .map_err(|e| PagebuilderError::TransportError(Box::new(e)))??;

    finish_login(toolkit, &target, OutputMode::Pretty).await
}

/// Run the callback command with a redirect URL pasted by the user.
pub async fn run_callback(
    toolkit: &Toolkit,
    callback_url: &str,
    mode: OutputMode,
) -> Result<(), PagebuilderError> {
    finish_login(toolkit, callback_url, mode).await
}

async fn finish_login(
    toolkit: &Toolkit,
    callback_url: &str,
    mode: OutputMode,
) -> Result<(), PagebuilderError> {
    toolkit.auth().handle_callback(callback_url).await?;
    // the next search must pick up the new token
    toolkit.photos().invalidate();
    match mode {
        OutputMode::Json => print_json(&serde_json::json!({ "success": true })),
        OutputMode::Pretty => println!("Logged in to Unsplash"),
    }
    Ok(())
}

/// Run the logout command.
pub fn run_logout(toolkit: &Toolkit) -> Result<(), PagebuilderError> {
    toolkit.logout()?;
    println!("Logged out");
    Ok(())
}

/// Snapshot of what the toolkit would do right now.
pub fn status_json(toolkit: &Toolkit) -> serde_json::Value {
    let settings = toolkit.settings();
    let (mode, mode_error) = match toolkit.photos().mode() {
        Ok(mode) => (Some(mode.name()), None),
        Err(e) => (None, Some(e.to_string())),
    };
    serde_json::json!({
        "mode": mode,
        "modeError": mode_error,
        "authenticated": toolkit.auth().is_authenticated(),
        "oauthEnabled": settings.oauth_enabled,
        "dummyMode": settings.dummy_mode,
        "apiUrl": settings.api_url,
        "sessionFile": settings.session_file.as_ref().map(|p| p.display().to_string()),
    })
}

/// Run the status command.
pub fn run_status(toolkit: &Toolkit, mode: OutputMode) -> Result<(), PagebuilderError> {
    let status = status_json(toolkit);
    match mode {
        OutputMode::Json => print_json(&status),
        OutputMode::Pretty => {
            match toolkit.photos().mode() {
                Ok(m) => println!("Mode:          {m}"),
                Err(e) => println!("Mode:          unavailable ({e})"),
            }
            let yes_no = |b: bool| if b { "yes" } else { "no" };
            println!("Authenticated: {}", yes_no(toolkit.auth().is_authenticated()));
            println!("OAuth enabled: {}", yes_no(toolkit.settings().oauth_enabled));
            println!("API URL:       {}", toolkit.settings().api_url);
        }
    }
    Ok(())
}
