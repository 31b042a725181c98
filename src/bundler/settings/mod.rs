//! Configuration structures for bundling operations.
//!
//! This module provides the build inputs for one bundle assembly, the naming
//! layout shared across pipeline steps, and a builder for constructing them.

mod builder;
mod core;
mod layout;
mod package;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use self::core::Settings;
pub use layout::{
    ARCHIVE_EXTENSION, BundleLayout, EXECUTABLE_EXTENSION, LIB_DIR_NAME, STAGING_DIR_NAME,
    TRANSIENT_BUILD_DIRS,
};
pub use package::PackageSettings;
