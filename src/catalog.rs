use crate::domain::constants::CATALOG_EXTENSION;
use crate::domain::models::EndpointDescriptor;
use crate::error::SmokeError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

type Environments = BTreeMap<String, Vec<EndpointDescriptor>>;

/// The `{"endpoints": {...}}` wrapper used by CI pipelines.
#[derive(Debug, Deserialize)]
struct WrappedCatalog {
    endpoints: Environments,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    source: PathBuf,
    found: bool,
    environments: Environments,
}

impl Catalog {
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn environments(&self) -> impl Iterator<Item = &str> {
        self.environments.keys().map(String::as_str)
    }

    /// Endpoints for `env`, in catalog order.
    pub fn environment(&self, env: &str) -> Result<&[EndpointDescriptor], SmokeError> {
        if !self.found {
            return Err(SmokeError::Config(format!(
                "catalog not found: {}",
                self.source.display()
            )));
        }
        self.environments
            .get(env)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                SmokeError::Config(format!(
                    "environment '{}' not defined in {} (available: {})",
                    env,
                    self.source.display(),
                    self.environments().collect::<Vec<_>>().join(", ")
                ))
            })
    }
}

pub fn catalog_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, CATALOG_EXTENSION))
}

/// Load `<dir>/<name>.json`.
///
/// A missing file is only logged here; the error surfaces once an
/// environment is looked up. Unreadable or malformed files fail immediately.
pub fn load_catalog(dir: &Path, name: &str) -> Result<Catalog, SmokeError> {
    let source = catalog_path(dir, name);
    if !source.exists() {
        tracing::warn!(path = %source.display(), "catalog file not found");
        return Ok(Catalog {
            source,
            found: false,
            environments: BTreeMap::new(),
        });
    }

    let raw = std::fs::read_to_string(&source)
        .map_err(|e| SmokeError::Config(format!("read {}: {}", source.display(), e)))?;
    let environments = parse_catalog(&raw)
        .map_err(|e| SmokeError::Config(format!("parse {}: {}", source.display(), e)))?;
    tracing::debug!(
        path = %source.display(),
        environments = environments.len(),
        "catalog loaded"
    );

    Ok(Catalog {
        source,
        found: true,
        environments,
    })
}

/// Wrapped layout first, then a document keyed directly by environment
/// name. When neither fits, the wrapped layout's error is reported.
fn parse_catalog(raw: &str) -> Result<Environments, serde_json::Error> {
    let wrapped_err = match serde_json::from_str::<WrappedCatalog>(raw) {
        Ok(doc) => return Ok(doc.endpoints),
        Err(err) => err,
    };
    serde_json::from_str::<Environments>(raw).map_err(|_| wrapped_err)
}
