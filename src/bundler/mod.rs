//! Bundle assembly: executable archive, staged dependencies, distributable zip.
//!
//! # Example
//!
//! ```no_run
//! use bootjar_bundler::bundler::{PackageSettings, SettingsBuilder, assemble_bundle};
//!
//! # async fn example() -> bootjar_bundler::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .package_settings(PackageSettings {
//!         artifact_id: "demo".into(),
//!         version: "1.0.0".into(),
//!         main_class: "com.example.App".into(),
//!     })
//!     .compiled_output_dir("target/classes")
//!     .output_dir("target")
//!     .dependency("libs/a-1.0.jar")
//!     .dependency("libs/b-2.0.jar")
//!     .build()?;
//!
//! let artifact = assemble_bundle(settings).await?;
//! assert_eq!(artifact.manifest.class_path_value(), "lib/a-1.0.jar lib/b-2.0.jar");
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod builder;
pub mod error;
pub mod manifest;
pub mod settings;
pub mod stage;
pub mod utils;

pub use builder::{BundledArtifact, Bundler, CleanupReport, assemble_bundle};
pub use error::{AssemblyStep, Error, Result};
pub use manifest::{LaunchManifest, build_manifest};
pub use settings::{BundleLayout, PackageSettings, Settings, SettingsBuilder};
