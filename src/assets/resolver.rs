//! Branding asset resolution.
//!
//! Logos are looked up once per batch through a fixed fallback chain:
//!
//! ```text
//! <assets_dir>/<entity>.png  →  <assets_dir>/default.png  →  bundled default  →  none
//! ```
//!
//! A missing file simply moves on to the next tier; any other I/O failure
//! aborts the batch.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};

/// The logo compiled into the binary, used when no file is found.
pub const BUNDLED_DEFAULT: &[u8] = include_bytes!("../../assets/default.png");

/// File name of the batch-default logo inside the assets directory.
pub const DEFAULT_ASSET_FILE: &str = "default.png";

/// Which fallback tier an asset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetTier {
    /// `<assets_dir>/<entity>.png`
    EntitySpecific,
    /// `<assets_dir>/<default file>`
    BatchDefault,
    /// The logo compiled into the binary.
    Bundled,
}

/// Raw image bytes for a company logo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandingAsset {
    bytes: Vec<u8>,
    tier: AssetTier,
}

impl BrandingAsset {
    /// Wraps `bytes` found at `tier`.
    pub fn new(bytes: Vec<u8>, tier: AssetTier) -> Self {
        Self { bytes, tier }
    }

    /// The undecoded image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Where the asset was found.
    pub fn tier(&self) -> AssetTier {
        self.tier
    }
}

/// Resolves the branding asset for an entity.
pub trait AssetSource {
    /// Returns the logo for `entity`, or `None` when every tier is empty.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AssetUnavailable`] if a file exists but
    /// cannot be read.
    fn resolve(&self, entity: &str) -> EngineResult<Option<BrandingAsset>>;
}

/// Filesystem-backed [`AssetSource`].
///
/// # Example
///
/// ```no_run
/// use paystub_engine::assets::{AssetResolver, AssetSource};
///
/// let resolver = AssetResolver::new("./logos");
/// let asset = resolver.resolve("Acme")?;
/// assert!(asset.is_some()); // the bundled default at worst
/// # Ok::<(), paystub_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AssetResolver {
    assets_dir: Option<PathBuf>,
    default_file: String,
    bundled: Option<&'static [u8]>,
}

impl AssetResolver {
    /// Creates a resolver reading from `assets_dir`, with the bundled
    /// default enabled.
    pub fn new<P: AsRef<Path>>(assets_dir: P) -> Self {
        Self {
            assets_dir: Some(assets_dir.as_ref().to_path_buf()),
            default_file: DEFAULT_ASSET_FILE.to_string(),
            bundled: Some(BUNDLED_DEFAULT),
        }
    }

    /// Creates a resolver with no directory and no bundled default; it
    /// always resolves to `None`.
    pub fn empty() -> Self {
        Self {
            assets_dir: None,
            default_file: DEFAULT_ASSET_FILE.to_string(),
            bundled: None,
        }
    }

    /// Overrides the batch-default file name.
    pub fn with_default_file(mut self, name: impl Into<String>) -> Self {
        self.default_file = name.into();
        self
    }

    /// Replaces the bundled default; `None` disables the tier.
    pub fn with_bundled(mut self, bundled: Option<&'static [u8]>) -> Self {
        self.bundled = bundled;
        self
    }

    fn read_if_present(path: &Path) -> EngineResult<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EngineError::AssetUnavailable {
                path: path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }
}

/// Returns true if `entity` can safely name a file inside the assets
/// directory.
fn is_plain_file_stem(entity: &str) -> bool {
    !entity.is_empty()
        && entity != "."
        && entity != ".."
        && !entity.contains(['/', '\\', '\0'])
}

impl AssetSource for AssetResolver {
    fn resolve(&self, entity: &str) -> EngineResult<Option<BrandingAsset>> {
        if let Some(dir) = &self.assets_dir {
            if is_plain_file_stem(entity) {
                let path = dir.join(format!("{}.png", entity));
                if let Some(bytes) = Self::read_if_present(&path)? {
                    debug!(entity, path = %path.display(), "Using entity logo");
                    return Ok(Some(BrandingAsset::new(bytes, AssetTier::EntitySpecific)));
                }
            } else {
                warn!(entity, "Entity name is not a plain file name, skipping entity logo");
            }

            let path = dir.join(&self.default_file);
            if let Some(bytes) = Self::read_if_present(&path)? {
                debug!(entity, path = %path.display(), "Using default logo");
                return Ok(Some(BrandingAsset::new(bytes, AssetTier::BatchDefault)));
            }
        }

        if let Some(bytes) = self.bundled {
            debug!(entity, "Using bundled logo");
            return Ok(Some(BrandingAsset::new(bytes.to_vec(), AssetTier::Bundled)));
        }

        debug!(entity, "No logo available, paystubs will show the entity name");
        Ok(None)
    }
}
