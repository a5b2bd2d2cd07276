//! Switches for the debug-time checks, and where to find shader files.

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Per-context configuration.
///
/// Debug builds check everything by default; release builds check nothing.
/// `Config` is `Deserialize`, so applications can keep it in their own
/// settings files; missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Call `glGetError` after every forwarded call and report any error.
    pub error_check: bool,

    /// Check that an object is bound before calling an entry point that acts
    /// on whatever is bound, and bind it if it isn't.
    pub bind_check: bool,

    /// Directory relative shader file names are resolved against.
    pub shader_path: PathBuf,

    /// Panic once this many diagnostics have been reported.
    pub max_errors: Option<usize>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            error_check: cfg!(debug_assertions),
            bind_check: cfg!(debug_assertions),
            shader_path: PathBuf::new(),
            max_errors: None,
        }
    }
}

impl Config {
    /// Every check on.
    pub fn debug() -> Config {
        Config {
            error_check: true,
            bind_check: true,
            ..Config::default()
        }
    }

    /// Every check off: calls go straight to the driver.
    pub fn release() -> Config {
        Config {
            error_check: false,
            bind_check: false,
            ..Config::default()
        }
    }

    /// The default configuration, with fields overridden by the environment
    /// variables `OGLWRAP_DEBUG`, `OGLWRAP_BINDCHECK`, `OGLWRAP_SHADER_PATH`,
    /// and `OGLWRAP_MAX_ERRORS`. Unparseable values are ignored.
    pub fn from_env() -> Config {
        Config::default().with_overrides(|name| env::var(name).ok())
    }

    fn with_overrides<F: Fn(&str) -> Option<String>>(mut self, var: F) -> Config {
        if let Some(on) = var("OGLWRAP_DEBUG").and_then(|v| parse_flag(&v)) {
            self.error_check = on;
            // The bind check follows the error check unless set separately.
            self.bind_check = on;
        }
        if let Some(on) = var("OGLWRAP_BINDCHECK").and_then(|v| parse_flag(&v)) {
            self.bind_check = on;
        }
        if let Some(path) = var("OGLWRAP_SHADER_PATH") {
            self.shader_path = PathBuf::from(path);
        }
        if let Some(max) = var("OGLWRAP_MAX_ERRORS").and_then(|v| v.trim().parse().ok()) {
            self.max_errors = if max == 0 { None } else { Some(max) };
        }
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[test]
fn test_overrides() {
    fn check(vars: &[(&str, &str)], expected: Config) {
        let config = Config::release().with_overrides(|name| {
            vars.iter().find(|(k, _)| *k == name).map(|(_, v)| v.to_string())
        });
        assert_eq!(config, expected);
    }

    check(&[], Config::release());
    check(&[("OGLWRAP_DEBUG", "1")], Config::debug());
    check(&[("OGLWRAP_DEBUG", "1"), ("OGLWRAP_BINDCHECK", "off")],
          Config { bind_check: false, ..Config::debug() });
    check(&[("OGLWRAP_DEBUG", "maybe")], Config::release());
    check(&[("OGLWRAP_SHADER_PATH", "shaders/"), ("OGLWRAP_MAX_ERRORS", "3")],
          Config { shader_path: PathBuf::from("shaders/"), max_errors: Some(3), ..Config::release() });
}

#[test]
fn test_deserialize_partial() {
    use serde::de::value::{Error, MapDeserializer};

    // Fields missing from the settings take their defaults.
    let settings = vec![("error_check", true)];
    let config = Config::deserialize(MapDeserializer::<_, Error>::new(settings.into_iter()))
        .unwrap();
    assert_eq!(config, Config { error_check: true, ..Config::default() });
}
