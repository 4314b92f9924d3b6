/// Configuration system for salesboard.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults** — [`schema::SalesboardConfig::default()`]
/// 2. **User global config** — `~/.salesboard/config.toml`
/// 3. **Project local config** — `.salesboard.toml` in the current directory
/// 4. **Environment variables** — `SALESBOARD_*` overrides (highest precedence)
///
/// Each file only overrides the keys it sets. A file that is malformed TOML,
/// or that gives a key the wrong type, is ignored as a whole.
///
/// # Usage
///
/// ```rust,ignore
/// use salesboard::config;
///
/// let cfg = config::load();
/// let client = ServiceClient::from_config(&cfg.service);
/// ```
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::SalesboardConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
///
/// Merges defaults → global TOML → project TOML → env vars.
pub fn load() -> SalesboardConfig {
    let layers = [global_config_path(), project_config_path()]
        .into_iter()
        .flatten()
        .filter_map(|path| fs::read_to_string(path).ok());

    let mut config = resolve_layers(layers);
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    config
}

/// Overlay TOML documents, in order, on top of the built-in defaults.
fn resolve_layers(layers: impl IntoIterator<Item = String>) -> SalesboardConfig {
    let mut config = SalesboardConfig::default();
    let Ok(mut merged) = toml::Value::try_from(&config) else {
        return config;
    };

    for content in layers {
        let Ok(overlay) = toml::from_str::<toml::Value>(&content) else {
            continue;
        };
        let mut candidate = merged.clone();
        merge_toml(&mut candidate, overlay);
        if let Ok(resolved) = candidate.clone().try_into::<SalesboardConfig>() {
            merged = candidate;
            config = resolved;
        }
    }

    config
}

/// Recursively copy `overlay` into `base`; tables merge, everything else
/// replaces.
fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".salesboard").join("config.toml"))
}

fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".salesboard.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &str) -> Option<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None if path == "~" => dirs::home_dir(),
        None => Some(PathBuf::from(path)),
    }
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `SALESBOARD_SERVICE_URL` — prediction service base URL
/// - `SALESBOARD_TIMEOUT_MS` — request timeout (`0` = transport default)
/// - `SALESBOARD_WEB_ADDR` — dashboard listen address
/// - `SALESBOARD_LOGGING` — event log on/off (`1`/`true`/`yes`/`on`)
///
/// `lookup` abstracts `std::env::var` so tests never touch the process
/// environment.
fn apply_env_overrides(config: &mut SalesboardConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("SALESBOARD_SERVICE_URL")
        && !val.is_empty()
    {
        config.service.base_url = val;
    }
    if let Some(val) = lookup("SALESBOARD_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.service.timeout_ms = ms;
    }
    if let Some(val) = lookup("SALESBOARD_WEB_ADDR")
        && !val.is_empty()
    {
        config.web.addr = val;
    }
    if let Some(val) = lookup("SALESBOARD_LOGGING") {
        config.logging.enabled = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.salesboard/config.toml`.
///
/// Fails if the file already exists unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.salesboard/ directory")?;
    }

    fs::write(&path, SalesboardConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single dotted key (e.g. `service.base_url`) in the global config.
///
/// Starts from the existing file, or from serialized defaults when there is
/// none, and writes the updated table back.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&SalesboardConfig::default())
            .context("failed to serialize default config")?
    };

    let mut root: toml::Value =
        toml::from_str(&content).context("failed to parse config as TOML value")?;
    set_toml_value(&mut root, key, value)?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
///
/// The new value takes the type of the value it replaces; unknown leaves
/// are stored as strings.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let (section_path, leaf) = match key.rsplit_once('.') {
        Some((sections, leaf)) => (Some(sections), leaf),
        None => (None, key),
    };
    if leaf.is_empty() {
        anyhow::bail!("empty config key");
    }

    let mut current = root;
    for part in section_path.into_iter().flat_map(|s| s.split('.')) {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table at '{}'", section_path.unwrap_or("")))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        _ => toml::Value::String(raw_value.to_string()),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
