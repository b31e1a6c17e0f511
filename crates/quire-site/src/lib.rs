//! Page rendering orchestration for Quire.
//!
//! This crate provides:
//! - [`Site`]: Load, hash, cache and render documents by language and identifier
//! - [`RenderedArtifact`]: The cached HTML and metadata for one document
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use quire_cache::MemoryCache;
//! use quire_site::{RenderedArtifact, Site, SiteConfig};
//! use quire_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("content")));
//! let cache = Arc::new(MemoryCache::<RenderedArtifact>::new());
//! let site = Site::new(storage, cache, SiteConfig::default());
//!
//! let page = site.render("en", "about")?;
//! println!("{}", page.artifact.html);
//! # Ok(())
//! # }
//! ```

mod artifact;
mod site;

pub use artifact::RenderedArtifact;
pub use site::{DEFAULT_LANGUAGE, PageRenderResult, RenderError, Site, SiteConfig};
