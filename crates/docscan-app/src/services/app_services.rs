// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — loads settings, wires the capabilities into the
// session manager, and hands both to the Dioxus UI.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use docscan_bridge::{ChannelNotifier, platform_capture};
use docscan_core::ScannerConfig;
use docscan_core::error::Result;
use docscan_core::human_errors::humanize_error;
use docscan_document::ImagePdfCompositor;
use docscan_session::SessionManager;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

use super::data_dir;

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
///
/// All fields are cheaply cloneable (Arc-wrapped) so that the struct can be
/// passed into closures and async blocks without lifetime issues.
#[derive(Clone)]
pub struct AppServices {
    session: Arc<SessionManager>,
    /// Toast messages from the notifier; taken once by the UI.
    toasts: Arc<Mutex<Option<UnboundedReceiver<String>>>>,
    data_dir: PathBuf,
}

impl AppServices {
    /// Initialise all services.  Call once at app startup.
    pub fn init() -> Self {
        Self::with_data_dir(data_dir::data_dir())
    }

    /// Initialise services with settings stored under `dir`.
    ///
    /// A missing settings file is created with defaults; an unreadable one is
    /// left alone and defaults are used for this run.
    pub fn with_data_dir(dir: PathBuf) -> Self {
        info!(path = %dir.display(), "initialising app services");

        let config = match load_config(&dir) {
            Ok(Some(config)) => config,
            Ok(None) => {
                let config = ScannerConfig::default();
                if let Err(e) = persist_config(&dir, &config) {
                    warn!(error = %e, "could not write default settings");
                }
                config
            }
            Err(e) => {
                let human = humanize_error(&e);
                warn!(error = %e, "{}", human.message);
                ScannerConfig::default()
            }
        };
        info!(
            output_dir = %config.resolved_output_dir().display(),
            quality = config.effective_quality(),
            "scanner settings loaded"
        );

        let (notifier, toasts) = ChannelNotifier::new();
        let session = SessionManager::new(
            Arc::from(platform_capture()),
            Arc::new(ImagePdfCompositor::new()),
            Arc::new(notifier),
            config,
        );

        Self {
            session: Arc::new(session),
            toasts: Arc::new(Mutex::new(Some(toasts))),
            data_dir: dir,
        }
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Take the toast receiver. Returns `None` after the first call.
    pub fn take_toasts(&self) -> Option<UnboundedReceiver<String>> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Path to the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

// -- Config file persistence -------------------------------------------------

const CONFIG_FILE: &str = "config.json";

fn load_config(data_dir: &Path) -> Result<Option<ScannerConfig>> {
    let path = data_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let data = std::fs::read_to_string(&path)?;
    Ok(Some(serde_json::from_str(&data)?))
}

fn persist_config(data_dir: &Path, config: &ScannerConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docscan_core::error::DocscanError;
    use tempfile::TempDir;

    #[test]
    fn missing_config_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(load_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn config_round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let config = ScannerConfig {
            output_dir: Some(dir.path().join("pdfs")),
            quality: 0.7,
            ..Default::default()
        };
        persist_config(dir.path(), &config).unwrap();
        assert_eq!(load_config(dir.path()).unwrap(), Some(config));
    }

    #[test]
    fn corrupt_config_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        assert!(matches!(
            load_config(dir.path()),
            Err(DocscanError::Serialization(_))
        ));
    }

    #[test]
    fn first_run_writes_default_settings() {
        let dir = TempDir::new().unwrap();
        let svc = AppServices::with_data_dir(dir.path().to_path_buf());

        assert_eq!(
            load_config(dir.path()).unwrap(),
            Some(ScannerConfig::default())
        );
        assert!(svc.session().is_empty());
        assert!(svc.take_toasts().is_some());
        assert!(svc.take_toasts().is_none());
    }
}
