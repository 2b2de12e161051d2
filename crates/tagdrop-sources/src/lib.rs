//! tagdrop-sources: tag-document source implementations.
//!
//! HTTP, local-file, and in-memory implementations of the core `TagSource`
//! trait, plus application configuration.

pub mod config;
pub mod file;
pub mod http;
pub mod memory;

use anyhow::Result;

use tagdrop_core::traits::TagSource;

use crate::config::FetchConfig;
use crate::file::FileSource;
use crate::http::HttpSource;

/// Create a source from a URL or filesystem path.
///
/// Anything starting with `http://` or `https://` is fetched over HTTP;
/// everything else is treated as a local path.
pub fn source_for(spec: &str, fetch: &FetchConfig) -> Result<Box<dyn TagSource>> {
    if spec.starts_with("http://") || spec.starts_with("https://") {
        Ok(Box::new(HttpSource::new(spec, fetch)))
    } else {
        Ok(Box::new(FileSource::new(spec)))
    }
}
