pub mod http_mock;

use std::path::PathBuf;
use std::sync::Mutex;

use pagebuilder_tools::auth::Navigator;
use pagebuilder_tools::config::Settings;
use pagebuilder_tools::PagebuilderError;
use reqwest::Url;

pub const CLIENT_ID: &str = "test-client-id";
pub const REDIRECT_URI: &str = "http://localhost:8976/callback";

/// Records every URL instead of opening a browser.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingNavigator {
    pub visited: Mutex<Vec<Url>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &Url) -> Result<(), PagebuilderError> {
        self.visited.lock().unwrap().push(url.clone());
        Ok(())
    }
}

#[allow(dead_code)]
impl RecordingNavigator {
    /// Value of `key` in the last visited URL's query.
    pub fn last_param(&self, key: &str) -> Option<String> {
        let visited = self.visited.lock().unwrap();
        let url = visited.last()?;
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

/// Live (non-dummy) settings whose endpoints point at `server_uri`.
#[allow(dead_code)]
pub fn live_settings(server_uri: &str) -> Settings {
    Settings {
        dummy_mode: false,
        access_key: Some(CLIENT_ID.into()),
        redirect_uri: Some(REDIRECT_URI.into()),
        oauth_enabled: true,
        api_url: server_uri.to_string(),
        oauth_url: server_uri.to_string(),
        ..Settings::default()
    }
}

/// Create a temp directory with a pagebuilder.json config file. The session
/// file is kept in the same directory.
#[allow(dead_code)]
pub fn temp_config_dir(config: &serde_json::Value) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config.clone();
    config["sessionFile"] = dir
        .path()
        .join("session.json")
        .to_string_lossy()
        .into_owned()
        .into();
    let json = serde_json::to_string_pretty(&config).unwrap();
    std::fs::write(config_path(&dir), json).unwrap();
    dir
}

#[allow(dead_code)]
pub fn config_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("pagebuilder.json")
}
