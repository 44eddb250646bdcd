/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! TOML configuration: default open mode, per-view overrides and the menu.
//!
//! ```toml
//! [navigation]
//! default_open_mode = "non_modal"
//!
//! [views.detail]
//! caption = "Order Detail"
//!
//! [[menu]]
//! caption = "Orders"
//! [[menu.children]]
//! caption = "Detail"
//! view = "detail"
//! parameters = [42]
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parameters::Parameters;
use crate::registries::OpenMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkConfig {
    pub navigation: NavigationConfig,
    pub views: HashMap<String, ViewOverride>,
    pub menu: Vec<MenuItemConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub default_open_mode: OpenMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOverride {
    pub caption: Option<String>,
    pub open_mode: Option<OpenMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuItemConfig {
    pub caption: String,
    pub view: Option<String>,
    pub parameters: Vec<toml::Value>,
    pub children: Vec<MenuItemConfig>,
}

impl MenuItemConfig {
    /// Integers, floats, strings and booleans become `i64`, `f64`, `String`
    /// and `bool`; anything else is passed through as a `toml::Value`.
    pub fn navigation_parameters(&self) -> Parameters {
        self.parameters
            .iter()
            .fold(Parameters::new(), |parameters, value| match value {
                toml::Value::Integer(value) => parameters.with(*value),
                toml::Value::Float(value) => parameters.with(*value),
                toml::Value::String(value) => parameters.with(value.clone()),
                toml::Value::Boolean(value) => parameters.with(*value),
                other => parameters.with(other.clone()),
            })
    }
}

impl FrameworkConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        log::debug!(
            "config: loaded {} ({} view overrides, {} menu groups)",
            path.display(),
            config.views.len(),
            config.menu.len()
        );
        Ok(config)
    }
}
