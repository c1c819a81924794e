// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the catalog and the
//! turntable.
//!
//! The `App` struct wires together the components, localization and the
//! persisted session state, and translates component effects into side
//! effects such as state persistence or frame loading.

mod message;
pub mod paths;
pub mod persisted_state;
mod persistence;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::catalog::Catalog;
use crate::config::{self, Config};
use crate::error::{CatalogError, Error};
use crate::i18n::I18n;
use crate::ui::notifications::{self, Notification};
use crate::ui::theming::ThemeMode;
use crate::ui::{catalog, turntable};
use iced::{window, Subscription, Task, Theme};
use persisted_state::AppState;
use std::fmt;
use std::path::PathBuf;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    theme_mode: ThemeMode,
    catalog: catalog::State,
    turntable: turntable::State,
    app_state: AppState,
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("theme_mode", &self.theme_mode)
            .field("subject", &self.turntable.turntable().subject())
            .field("phase", &self.turntable.turntable().phase())
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_WIDTH: u32 = 1280;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const MIN_WINDOW_WIDTH: u32 = 960;
pub const MIN_WINDOW_HEIGHT: u32 = 600;

#[allow(clippy::cast_precision_loss)]
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires `Fn` for boot; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads configuration, catalog and session state, then starts loading
    /// the initial turntable subject.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let (app_state, state_warning) = AppState::load();
        let mut app = Self::from_parts(&flags, &config, app_state);

        for key in [config_warning, state_warning].into_iter().flatten() {
            app.notifications.push(Notification::warning(key));
        }

        let task = app
            .initial_subject(flags.subject.as_deref())
            .map_or_else(Task::none, |subject| {
                app.turntable.select_subject(&subject).map(Message::Turntable)
            });

        tracing::info!(
            locale = %app.i18n.current_locale(),
            subjects = app.turntable.subjects().len(),
            "application started"
        );
        (app, task)
    }

    fn from_parts(flags: &Flags, config: &Config, app_state: AppState) -> Self {
        let i18n = I18n::new(flags.lang.clone(), config);
        let mut notifications = notifications::Manager::new();

        let catalog_path = flags
            .catalog
            .as_ref()
            .map(PathBuf::from)
            .or_else(|| config.catalog.path.clone());
        let catalog = load_catalog(catalog_path, &mut notifications);

        let subjects = config.resolved_subjects(paths::get_app_data_dir().as_deref());
        let magnifier_enabled = app_state
            .magnifier_enabled
            .unwrap_or_else(|| config.magnifier.enabled());

        Self {
            i18n,
            theme_mode: config.general.theme_mode,
            catalog: catalog::State::new(catalog, app_state.last_sort),
            turntable: turntable::State::new(config, subjects, magnifier_enabled),
            app_state,
            notifications,
        }
    }

    /// CLI flag, then the last session, then the first configured subject.
    fn initial_subject(&self, requested: Option<&str>) -> Option<String> {
        if let Some(id) = requested {
            if self.turntable.has_subject(id) {
                return Some(id.to_string());
            }
            tracing::warn!(subject = id, "requested subject is not configured");
        }

        self.app_state
            .last_subject
            .as_deref()
            .filter(|id| self.turntable.has_subject(id))
            .map(str::to_string)
            .or_else(|| self.turntable.subjects().first().map(|s| s.id.clone()))
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create(&self.turntable, &self.notifications)
    }
}

/// Loads the configured dataset, falling back to the bundled one.
fn load_catalog(path: Option<PathBuf>, notifications: &mut notifications::Manager) -> Catalog {
    if path.is_some() {
        match Catalog::load(path.as_deref()) {
            Ok(catalog) => return catalog,
            Err(err) => {
                tracing::warn!(%err, "catalog file rejected, using bundled catalog");
                notifications.push(match &err {
                    Error::Catalog(catalog_err) => catalog_notification(catalog_err),
                    other => Notification::warning("notification-catalog-load-error")
                        .with_arg("reason", other.to_string()),
                });
            }
        }
    }

    Catalog::embedded().unwrap_or_else(|err| {
        tracing::error!(%err, "bundled catalog is invalid");
        notifications.push(Notification::error("notification-catalog-embedded-error"));
        Catalog::default()
    })
}

/// Warning toast naming the offending record of a rejected dataset.
fn catalog_notification(err: &CatalogError) -> Notification {
    let notification = Notification::warning(err.i18n_key());
    match err {
        CatalogError::Parse(reason) => notification.with_arg("reason", reason.clone()),
        CatalogError::Empty => notification,
        CatalogError::MetricOutOfRange {
            variant,
            metric,
            value,
            max,
        } => notification
            .with_arg("variant", variant.clone())
            .with_arg("metric", *metric)
            .with_arg("value", value.to_string())
            .with_arg("max", max.to_string()),
        CatalogError::UnnamedVariant { index } => {
            notification.with_arg("index", (index + 1).to_string())
        }
        CatalogError::InvalidColor { variant, hex } => notification
            .with_arg("variant", variant.clone())
            .with_arg("hex", hex.clone()),
        CatalogError::DuplicateName { variant, index } => notification
            .with_arg("variant", variant.clone())
            .with_arg("index", (index + 1).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turntable::Phase;
    use std::fs;
    use tempfile::tempdir;

    fn app_with(flags: Flags, app_state: AppState) -> App {
        App::from_parts(&flags, &Config::default(), app_state)
    }

    #[test]
    fn initial_subject_prefers_flag_then_state() {
        let app = app_with(
            Flags::default(),
            AppState {
                last_subject: Some("jobs".into()),
                ..AppState::default()
            },
        );
        assert_eq!(app.initial_subject(Some("porsche")).as_deref(), Some("porsche"));
        assert_eq!(app.initial_subject(None).as_deref(), Some("jobs"));
        assert_eq!(app.initial_subject(Some("ghost")).as_deref(), Some("jobs"));
    }

    #[test]
    fn unknown_last_subject_falls_back_to_first() {
        let app = app_with(
            Flags::default(),
            AppState {
                last_subject: Some("retired".into()),
                ..AppState::default()
            },
        );
        assert_eq!(app.initial_subject(None).as_deref(), Some("porsche"));
    }

    #[test]
    fn stored_magnifier_choice_overrides_config() {
        let app = app_with(
            Flags::default(),
            AppState {
                magnifier_enabled: Some(false),
                ..AppState::default()
            },
        );
        assert!(!app.turntable.magnifier().is_enabled());
    }

    #[test]
    fn broken_catalog_file_falls_back_with_warning() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("broken.toml");
        fs::write(&path, "not = [valid").expect("write catalog");

        let mut manager = notifications::Manager::new();
        let catalog = load_catalog(Some(path), &mut manager);

        assert!(!catalog.is_empty());
        assert!(manager.has_notifications());
    }

    #[test]
    fn catalog_errors_map_to_their_keys() {
        let err = CatalogError::InvalidColor {
            variant: "Red Foil".into(),
            hex: "red".into(),
        };
        assert_eq!(catalog_notification(&err).message_key(), "error-catalog-color");
        assert_eq!(
            catalog_notification(&CatalogError::Empty).message_key(),
            "error-catalog-empty"
        );
        let duplicate = CatalogError::DuplicateName {
            variant: "Aurora".into(),
            index: 4,
        };
        assert_eq!(
            catalog_notification(&duplicate).message_key(),
            "error-catalog-duplicate"
        );
    }

    #[test]
    fn selecting_variant_subject_switches_turntable() {
        let mut app = app_with(Flags::default(), AppState::default());
        let _ = app.update(Message::Catalog(catalog::Message::SelectVariant(
            "Rainbow Hologram".into(),
        )));
        assert_eq!(app.turntable.turntable().subject(), Some("jobs"));
        assert_eq!(app.turntable.turntable().phase(), Phase::Loading);
        assert_eq!(app.app_state.last_subject.as_deref(), Some("jobs"));
    }
}
