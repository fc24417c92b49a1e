use anyhow::{Context, Result};
use ledgerlift_ingest::ExtractionMethod;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_ledgerlift_home, ledgerlift_home};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub categories: CategoriesSection,
    pub tabula: TabulaSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoriesSection {
    /// CSV with one column per category, keywords below each header
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabulaSection {
    /// tabula-java "jar-with-dependencies" build
    pub jar_path: PathBuf,
    pub method: ExtractionMethod,
    pub guess: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub dir: PathBuf,
}

impl Default for CategoriesSection {
    fn default() -> Self {
        Self {
            path: home_file("categories.csv"),
        }
    }
}

impl Default for TabulaSection {
    fn default() -> Self {
        Self {
            jar_path: home_file("tabula-1.0.5-jar-with-dependencies.jar"),
            method: ExtractionMethod::Decide,
            guess: true,
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

fn home_file(name: &str) -> PathBuf {
    ledgerlift_home()
        .map(|home| home.join(name))
        .unwrap_or_else(|_| PathBuf::from(name))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ledgerlift_home()?.join("config.toml"))
}

/// Load `path`, or the default config location. A missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !p.exists() {
        tracing::debug!(path = %p.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    let p = ensure_ledgerlift_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let written = save_config(&Config::default())?;
    println!("Wrote {}", written.display());
    Ok(())
}
