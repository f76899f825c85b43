pub mod errors;
pub mod http_client;
pub mod manifest;
pub mod loader;
pub mod style;
pub mod asset_cache;
pub mod assets;

pub use errors::*;
pub use manifest::{FontCatalog, VariantMap, ITALIC_SUFFIX, is_italic_variant, has_italic_variant};
pub use loader::{CatalogLoader, CatalogEvent, MANIFEST_PATH, manifest_url};
pub use style::{FontFaceRule, FontFormat, derive_font_face, font_family_css};
pub use asset_cache::{AssetCacheConfig, FontAssetCache};
pub use assets::{AssetEvent, FontAssetLoader};
