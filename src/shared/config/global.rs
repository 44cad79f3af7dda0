use once_cell::sync::Lazy;
use std::sync::Arc;

use super::model::{Settings, load_settings};

/// Process-wide settings, loaded on first access.
pub static CONFIG: Lazy<Arc<Settings>> =
    Lazy::new(|| Arc::new(load_settings().expect("Failed to load snel_stream configuration")));
