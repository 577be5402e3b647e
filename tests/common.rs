#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use figment::{
    providers::{Format, Yaml},
    Figment,
};
use sessiongate::config::{Config, ConfigV1};
use sessiongate::navigation::{Navigator, Notice, Notifier};
use sessiongate::routes::RedirectTarget;
use sessiongate::startup::build;
use sessiongate::state::AppState;

/// Navigator that sits on a fixed location and records every redirect.
pub struct RecordingNavigator {
    location: Mutex<String>,
    pub redirects: Mutex<Vec<RedirectTarget>>,
}

impl RecordingNavigator {
    pub fn at(location: &str) -> Arc<Self> {
        Arc::new(RecordingNavigator {
            location: Mutex::new(location.to_string()),
            redirects: Mutex::new(Vec::new()),
        })
    }

    pub fn set_location(&self, location: &str) {
        *self.location.lock().unwrap() = location.to_string();
    }

    pub fn redirects(&self) -> Vec<RedirectTarget> {
        self.redirects.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_location(&self) -> String {
        self.location.lock().unwrap().clone()
    }

    fn navigate(&self, target: RedirectTarget) {
        self.redirects.lock().unwrap().push(target);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

pub fn config_for(base_url: &str) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
api:
  base_url: "{base_url}"
routes:
  login_view: "/login"
  register_view: "/register"
  landing_view: "/dashboard"
  return_to_param: "redirect"
logging:
  level: "debug"
  format: "json"
"#
    );
    let config: Config = Figment::new()
        .merge(Yaml::string(&yaml))
        .extract()
        .expect("Failed to parse test config YAML");

    match config {
        Config::ConfigV1(cfg) => cfg,
    }
}

pub struct TestApp {
    pub state: AppState,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn build_app(base_url: &str, location: &str) -> TestApp {
    let navigator = RecordingNavigator::at(location);
    let notifier = RecordingNotifier::new();
    let state = build(config_for(base_url), navigator.clone(), notifier.clone())
        .expect("app state should build");
    TestApp {
        state,
        navigator,
        notifier,
    }
}
