//! Configuration for the justified layout engine.
//!
//! Options can be read from a KDL document:
//!
//! ```kdl
//! layout {
//!     container-width 1060
//!     container-padding 10
//!     box-spacing 10 {
//!         vertical 4
//!     }
//!     target-row-height 320
//!     widow-layout-style "justify"
//! }
//! ```
//!
//! or deserialized with serde from a JSON-shaped record ([`LayoutPart`]) and merged onto the
//! defaults with [`MergeWith`].

use std::ffi::OsStr;
use std::path::Path;

use miette::{Context, IntoDiagnostic};
use tracing::debug;

pub mod layout;
pub mod utils;

pub use crate::layout::*;
pub use crate::utils::{FloatOrInt, MergeWith};

#[derive(knuffel::Decode, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub layout: LayoutConfig,
}

impl Config {
    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        let _span = tracing::debug_span!("Config::parse").entered();
        knuffel::parse(filename, text)
    }

    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let filename = path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("config.kdl");
        let config = Self::parse(filename, &contents).context("error parsing")?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }
}
