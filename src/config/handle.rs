//! Global config with atomic swap support.
//!
//! Uses `arc-swap` for lock-free reads from request threads and actors.

use crate::config::StudioConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
static CONFIG: LazyLock<ArcSwap<StudioConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(StudioConfig::default()));

#[inline]
pub fn cfg() -> Arc<StudioConfig> {
    CONFIG.load_full()
}

#[inline]
pub fn init_config(config: StudioConfig) -> Arc<StudioConfig> {
    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}
