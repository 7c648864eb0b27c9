//! Command implementations

use std::convert::Infallible;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use clap::ValueEnum;
use escfw_params::{Parameter, ParameterStore, StoreConfig};
use tracing::info;

use crate::error::CliError;
use crate::image_file::ImageFile;
use crate::output;

/// Parameter selector: a numeric index or a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKey {
    Index(u8),
    Name(String),
}

impl FromStr for ParamKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<u8>() {
            Ok(index) => Self::Index(index),
            Err(_) => Self::Name(s.to_owned()),
        })
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Typed view selectable with `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    Motor,
    Control,
    Pwm,
    Bus,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            Self::Motor => "motor",
            Self::Control => "control",
            Self::Pwm => "pwm",
            Self::Bus => "bus",
        }
    }
}

/// Opened image plus the store loaded from it.
pub struct Session {
    image: ImageFile,
    config: StoreConfig,
    store: ParameterStore,
}

impl Session {
    pub fn open(path: &Path, config: StoreConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| CliError::Storage(e.to_string()))?;
        let mut image = ImageFile::open(path)?;
        let store = image.load(&config);
        Ok(Self {
            image,
            config,
            store,
        })
    }

    fn lookup(&self, key: &ParamKey) -> Result<&Parameter, CliError> {
        let param = match key {
            ParamKey::Index(index) => self.store.get_by_index(*index)?,
            ParamKey::Name(name) => self.store.get_by_name(name)?,
        };
        Ok(param)
    }

    fn save(&mut self) -> Result<(), CliError> {
        self.image.persist(&self.store, &self.config)
    }
}

pub fn list(session: &Session, json: bool) -> Result<()> {
    output::print_param_list(&session.store, json)
}

pub fn get(session: &Session, key: &ParamKey, json: bool) -> Result<()> {
    let param = session.lookup(key)?;
    output::print_param(param, json)
}

/// Validate and apply `value`, then persist. A rejected value leaves the
/// image file untouched.
pub fn set(session: &mut Session, key: &ParamKey, value: f32, json: bool) -> Result<()> {
    match key {
        ParamKey::Index(index) => session.store.set_by_index(*index, value),
        ParamKey::Name(name) => session.store.set_by_name(name, value),
    }
    .map_err(CliError::from)?;
    session.save()?;

    let param = session.lookup(key)?;
    info!(name = param.name(), value, path = %session.image.path().display(), "Parameter set");
    output::print_param(param, json)
}

/// Restore one parameter, or the whole table when no key is given.
pub fn reset(session: &mut Session, key: Option<&ParamKey>, json: bool) -> Result<()> {
    match key {
        Some(ParamKey::Index(index)) => session.store.reset_by_index(*index),
        Some(ParamKey::Name(name)) => session.store.reset_by_name(name),
        None => {
            session.store.reset_to_defaults();
            Ok(())
        }
    }
    .map_err(CliError::from)?;
    session.save()?;

    match key {
        Some(key) => output::print_param(session.lookup(key)?, json),
        None => output::print_param_list(&session.store, json),
    }
}

pub fn show(session: &Session, view: View, json: bool) -> Result<()> {
    let store = &session.store;
    let value = match view {
        View::Motor => serde_json::to_value(store.read_motor_params()),
        View::Control => serde_json::to_value(store.read_control_params()),
        View::Pwm => serde_json::to_value(store.read_pwm_params()),
        View::Bus => serde_json::to_value(store.read_bus_params()),
    }
    .map_err(CliError::from)?;
    output::print_view(view.name(), &value, json)
}

/// Print the encoded parameter image of the loaded table.
pub fn dump(session: &Session, json: bool) -> Result<()> {
    output::print_dump(&session.store.encode(), json)
}
