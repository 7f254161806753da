//! Configuration data for Histopatch

use std::path::Path;

use crate::errors::PatchResult;

/// Name of the configuration directory and file stem
const APPLICATION: &str = "histopatch";

/// Config file root structure
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Dataset root, used when none is given on the command line (optional)
    pub root: Option<String>,
    /// Decode every sample after describing the dataset (optional, default: false)
    pub verify: Option<bool>,
    /// Stop verifying at the first sample that fails to decode (optional, default: false)
    pub fail_fast: Option<bool>,
}

impl Settings {
    /// Read settings from an explicit file, with `HISTOPATCH_*` environment
    /// variables taking precedence.
    pub fn from_path<P: AsRef<Path>>(path: P) -> PatchResult<Self> {
        let mut settings = ::config::Config::default();
        settings.merge(::config::File::from(path.as_ref()))?;
        settings.merge(::config::Environment::with_prefix(APPLICATION))?;
        Ok(settings.try_into()?)
    }

    /// Read settings from the XDG configuration directory if a file exists
    /// there, otherwise from the environment alone.
    pub fn load() -> PatchResult<Self> {
        let dirs = xdg::BaseDirectories::with_prefix(APPLICATION)?;
        match dirs.find_config_file(format!("{}.toml", APPLICATION)) {
            Some(path) => {
                debug!("Reading configuration from {:?}", path);
                Self::from_path(path)
            }
            None => {
                let mut settings = ::config::Config::default();
                settings.merge(::config::Environment::with_prefix(APPLICATION))?;
                Ok(settings.try_into()?)
            }
        }
    }

    /// Apply command-line values, which take precedence over anything read
    /// from a file or the environment. Flags only ever switch options on.
    pub fn with_overrides(mut self, root: Option<&str>, verify: bool, fail_fast: bool) -> Self {
        if let Some(root) = root {
            self.root = Some(root.to_owned());
        }
        if verify {
            self.verify = Some(true);
        }
        if fail_fast {
            self.fail_fast = Some(true);
        }
        self
    }

    pub fn verify(&self) -> bool {
        self.verify.unwrap_or(false)
    }

    pub fn fail_fast(&self) -> bool {
        self.fail_fast.unwrap_or(false)
    }
}
