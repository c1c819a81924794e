// SPDX-License-Identifier: MPL-2.0
//! Session state kept between runs in `state.cbor`.
//!
//! Unlike `settings.toml`, this file is written by the application on every
//! relevant change and is not meant to be edited by hand. Failures never
//! abort: loading falls back to defaults and both directions report an i18n
//! warning key for the UI.

use super::paths;
use crate::catalog::SortSpec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

const STATE_FILE: &str = "state.cbor";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    /// Turntable subject shown when the application closed.
    #[serde(default)]
    pub last_subject: Option<String>,

    /// Magnifier toggle. `None` defers to `[magnifier] enabled`.
    #[serde(default)]
    pub magnifier_enabled: Option<bool>,

    /// Catalog sort selection.
    #[serde(default)]
    pub last_sort: Option<SortSpec>,
}

impl AppState {
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    /// Loads from `base_dir`, or the resolved data directory.
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = state_file_path(base_dir) else {
            return (Self::default(), None);
        };
        if !path.exists() {
            return (Self::default(), None);
        }

        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "cannot open state file");
                return (
                    Self::default(),
                    Some("notification-state-read-error".to_string()),
                );
            }
        };

        match ciborium::from_reader(BufReader::new(file)) {
            Ok(state) => (state, None),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "cannot parse state file");
                (
                    Self::default(),
                    Some("notification-state-parse-error".to_string()),
                )
            }
        }
    }

    pub fn save(&self) -> Option<String> {
        self.save_to(None)
    }

    /// Writes to `base_dir`, or the resolved data directory. Returns a
    /// warning key on failure.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = state_file_path(base_dir) else {
            return Some("notification-state-path-error".to_string());
        };

        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return Some("notification-state-dir-error".to_string());
            }
        }

        let file = match fs::File::create(&path) {
            Ok(file) => file,
            Err(_) => return Some("notification-state-create-error".to_string()),
        };
        if let Err(err) = ciborium::into_writer(self, BufWriter::new(file)) {
            tracing::warn!(path = %path.display(), %err, "cannot write state file");
            return Some("notification-state-write-error".to_string());
        }

        tracing::debug!(path = %path.display(), "state saved");
        None
    }
}

fn state_file_path(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_data_dir_with_override(base_dir).map(|dir| dir.join(STATE_FILE))
}
