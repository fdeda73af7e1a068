//! # Resource Loader
//!
//! Loads data tables from a resource directory, once, at startup.
//!
//! Tables are registered under a name. Without an explicit path the file is
//! looked up as `<root>/<name>.toml`, then `<root>/<name>.json`. The file
//! extension decides the format: `.json` is parsed as JSON, everything else
//! as TOML.

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EconomyError, EconomyResult};
use crate::tables::PriceSources;

/// Default resource directory.
pub const DEFAULT_RESOURCE_DIR: &str = "res";

/// Register name of the vendor table.
pub const VENDOR_TABLE: &str = "Vendor";

/// Register name of the conversion table.
pub const CONVERSION_TABLE: &str = "Conversions";

/// Register name of the market price table.
pub const PRICE_TABLE: &str = "Prices";

/// Serialization format of a data file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataFormat {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl DataFormat {
    /// Extensions probed, in order, when resolving a default path.
    pub const PROBE_ORDER: [Self; 2] = [Self::Toml, Self::Json];

    /// Picks the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }

    /// File extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }

    /// Parses a document.
    ///
    /// # Errors
    ///
    /// Returns the parser message if the document is malformed or does not
    /// match `T`.
    pub fn parse<T: DeserializeOwned>(self, text: &str) -> Result<T, String> {
        match self {
            Self::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        }
    }
}

/// Reads and parses a single table file.
///
/// # Errors
///
/// `Io` if the file cannot be read, `Parse` if it is malformed.
pub fn load_table<T: DeserializeOwned>(path: impl AsRef<Path>) -> EconomyResult<T> {
    let path = path.as_ref();
    let text = read(path)?;
    DataFormat::from_path(path)
        .parse(&text)
        .map_err(|reason| EconomyError::Parse {
            path: path.display().to_string(),
            reason,
        })
}

fn read(path: &Path) -> EconomyResult<String> {
    fs::read_to_string(path).map_err(|e| EconomyError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// A loaded document kept for later retrieval.
#[derive(Clone, Debug)]
struct Register {
    path: PathBuf,
    format: DataFormat,
    text: String,
}

/// Registry of named tables loaded from a resource directory.
#[derive(Debug)]
pub struct ResourceDir {
    root: PathBuf,
    registers: HashMap<String, Register>,
}

impl Default for ResourceDir {
    fn default() -> Self {
        Self::new(DEFAULT_RESOURCE_DIR)
    }
}

impl ResourceDir {
    /// Creates a registry rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            registers: HashMap::new(),
        }
    }

    /// Root directory of the registry.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Default location of a named table: the first existing
    /// `<root>/<name>.<ext>`, or the TOML path if none exists.
    #[must_use]
    pub fn default_path(&self, name: &str) -> PathBuf {
        DataFormat::PROBE_ORDER
            .iter()
            .map(|format| self.root.join(format!("{name}.{}", format.extension())))
            .find(|path| path.is_file())
            .unwrap_or_else(|| self.root.join(format!("{name}.{}", DataFormat::Toml.extension())))
    }

    /// Loads a table and registers it under `name`.
    ///
    /// `path` overrides the default location.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, `Parse` if it is malformed.
    pub fn register<T: DeserializeOwned>(
        &mut self,
        name: &str,
        path: Option<&Path>,
    ) -> EconomyResult<T> {
        let path = path.map_or_else(|| self.default_path(name), Path::to_path_buf);
        let format = DataFormat::from_path(&path);
        let text = read(&path)?;
        let table = format.parse(&text).map_err(|reason| EconomyError::Parse {
            path: path.display().to_string(),
            reason,
        })?;

        tracing::info!("registered '{}' from {}", name, path.display());
        self.registers
            .insert(name.to_string(), Register { path, format, text });
        Ok(table)
    }

    /// Retrieves a registered table.
    ///
    /// # Errors
    ///
    /// `UnknownRegister` if nothing was registered under `name`.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> EconomyResult<T> {
        let register = self
            .registers
            .get(name)
            .ok_or_else(|| EconomyError::UnknownRegister(name.to_string()))?;
        register
            .format
            .parse(&register.text)
            .map_err(|reason| EconomyError::Parse {
                path: register.path.display().to_string(),
                reason,
            })
    }

    /// Loads vendor and conversion tables from their default locations and
    /// the market prices from `prices`, or its default location when `None`.
    ///
    /// # Errors
    ///
    /// `Io` or `Parse` for the first table that fails to load.
    pub fn price_sources(&mut self, prices: Option<&Path>) -> EconomyResult<PriceSources> {
        Ok(PriceSources {
            vendor: self.register(VENDOR_TABLE, None)?,
            conversions: self.register(CONVERSION_TABLE, None)?,
            prices: self.register(PRICE_TABLE, prices)?,
        })
    }

    /// Returns true if a table is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.registers.contains_key(name)
    }
}
