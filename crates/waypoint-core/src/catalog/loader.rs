//! Builder for locating and loading the action catalog.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use super::Catalog;
use crate::error::{AdvisorError, Result};

/// The catalog document bundled with the crate.
pub const BUILTIN_CATALOG: &str = include_str!("../../catalog/default.json");

const CONFIG_PREFIX: &str = "waypoint";
const CATALOG_FILE: &str = "catalog.json";

/// Builder for loading a validated [`Catalog`].
///
/// Resolution order: an explicit path, then
/// `$XDG_CONFIG_HOME/waypoint/catalog.json` when that file exists, then the
/// built-in catalog.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    catalog_path: Option<PathBuf>,
    use_user_config: bool,
}

impl CatalogLoader {
    /// Creates a new loader with default settings.
    pub fn new() -> Self {
        Self {
            catalog_path: None,
            use_user_config: true,
        }
    }

    /// Sets an explicit catalog file path.
    pub fn with_catalog_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.catalog_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Skips the XDG config lookup.
    pub fn without_user_config(mut self) -> Self {
        self.use_user_config = false;
        self
    }

    /// Loads and validates the catalog.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::FileSystem` if the catalog file cannot be read
    /// Returns `AdvisorError::Configuration` if the catalog is malformed or
    /// fails validation
    pub fn load(self) -> Result<Catalog> {
        let path = match self.catalog_path {
            Some(path) => Some(path),
            None if self.use_user_config => Self::user_catalog_path(),
            None => None,
        };

        match path {
            Some(path) => {
                info!("Loading catalog from {}", path.display());
                let document = fs::read_to_string(&path).map_err(|e| AdvisorError::FileSystem {
                    path: path.clone(),
                    source: e,
                })?;
                Catalog::from_json(&document).map_err(|e| match e {
                    AdvisorError::Configuration { message } => AdvisorError::Configuration {
                        message: format!("{}: {message}", path.display()),
                    },
                    other => other,
                })
            }
            None => {
                debug!("Using built-in catalog");
                Catalog::builtin()
            }
        }
    }

    /// Writes the built-in catalog to `path`, or to the XDG config location,
    /// so it can be customised. Refuses to overwrite an existing file.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::XdgDirectory` if the config directory cannot be
    /// prepared, `AdvisorError::InvalidInput` if the target already exists,
    /// and `AdvisorError::FileSystem` if writing fails.
    pub fn write_builtin(path: Option<&Path>) -> Result<PathBuf> {
        let target = match path {
            Some(path) => path.to_path_buf(),
            None => xdg::BaseDirectories::with_prefix(CONFIG_PREFIX)
                .place_config_file(CATALOG_FILE)
                .map_err(|e| AdvisorError::XdgDirectory(e.to_string()))?,
        };

        if target.exists() {
            return Err(AdvisorError::invalid_input("path").with_reason(format!(
                "'{}' already exists",
                target.display()
            )));
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| AdvisorError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(&target, BUILTIN_CATALOG).map_err(|e| AdvisorError::FileSystem {
            path: target.clone(),
            source: e,
        })?;
        info!("Wrote catalog to {}", target.display());
        Ok(target)
    }

    fn user_catalog_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix(CONFIG_PREFIX).find_config_file(CATALOG_FILE)
    }
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new()
    }
}
