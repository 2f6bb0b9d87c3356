//! Branding assets (company logos) for paystub headers.

mod resolver;

pub use resolver::{
    AssetResolver, AssetSource, AssetTier, BUNDLED_DEFAULT, BrandingAsset, DEFAULT_ASSET_FILE,
};
