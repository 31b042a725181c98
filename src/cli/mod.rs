//! Command line interface for the bundler.
//!
//! Binds flags and the optional project descriptor to the bundler's build
//! inputs, runs the assembly, and reports the result.

mod args;
mod output;
mod report;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;
pub use report::{BundleReport, write_report};

use crate::bundler::{Bundler, PackageSettings, Settings, SettingsBuilder};
use crate::error::{BundlerError, CliError, Result};
use crate::metadata::{ProjectDescriptor, absolute};
use std::path::PathBuf;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    execute(Args::parse_args()).await
}

/// Runs the bundler for already-parsed arguments.
///
/// Returns exit code 0 only when the distributable archive exists.
pub async fn execute(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = RuntimeConfig::from(&args);
    let settings = resolve_settings(&args)?;

    config.section(&format!("Bundling {}", settings.bundle_base_name()))?;
    config.progress(&format!(
        "Packing {} with main class {}",
        settings.compiled_output_dir().display(),
        settings.main_class()
    ))?;
    config.verbose_println(&format!(
        "{} dependency file(s), output directory {}",
        settings.dependency_files().len(),
        settings.output_dir().display()
    ))?;

    let artifact = Bundler::new(settings).bundle().await?;

    config.success(&format!("Created {}", artifact.path.display()))?;
    config.indent(&format!("Size:   {} bytes", artifact.size))?;
    config.indent(&format!("SHA256: {}", artifact.checksum))?;
    for path in &artifact.cleanup.removed {
        config.verbose_println(&format!("Removed {}", path.display()))?;
    }
    for failure in &artifact.cleanup.failures {
        config.warn(&format!(
            "Could not remove {}: {}",
            failure.path.display(),
            failure.error
        ))?;
    }

    if let Some(report_path) = &args.report {
        write_report(&artifact, report_path)?;
        config.verbose_println(&format!("Report written to {}", report_path.display()))?;
    }

    Ok(0)
}

/// Merges flags over the descriptor into build inputs.
///
/// Precedence per value: flag, then descriptor, then the conventional
/// default (`<base>/target`, `<output>/classes`). The base directory defaults
/// to the descriptor's directory when `--config` is given and to the current
/// directory otherwise.
pub fn resolve_settings(args: &Args) -> Result<Settings> {
    let descriptor = match &args.config {
        Some(path) => ProjectDescriptor::load(path)?,
        None => ProjectDescriptor::default(),
    };
    let cwd = std::env::current_dir()?;
    let from_cwd = |path: &PathBuf| absolute(path, &cwd);

    let project = descriptor.project;
    let bundle = descriptor.bundle;

    let main_class = required(args.main_class.clone().or(project.main_class), "main-class")?;
    let artifact_id = required(args.artifact_id.clone().or(project.artifact_id), "artifact-id")?;
    let version = required(
        args.version_string.clone().or(project.version),
        "version-string",
    )?;

    let base_dir = match &args.base_dir {
        Some(dir) => from_cwd(dir)?,
        None => bundle.base_dir.unwrap_or_else(|| cwd.clone()),
    };
    let output_dir = match &args.output_dir {
        Some(dir) => from_cwd(dir)?,
        None => bundle
            .output_dir
            .unwrap_or_else(|| base_dir.join("target")),
    };
    let classes_dir = match &args.classes_dir {
        Some(dir) => from_cwd(dir)?,
        None => bundle
            .classes_dir
            .unwrap_or_else(|| output_dir.join("classes")),
    };

    let cli_dependencies = args.dependency_files();
    let dependency_files = if cli_dependencies.is_empty() {
        bundle.dependencies
    } else {
        cli_dependencies
            .iter()
            .map(from_cwd)
            .collect::<Result<Vec<_>>>()?
    };

    let keep_compiled_output = !args.remove_classes && bundle.keep_compiled_output.unwrap_or(true);

    let mut builder = SettingsBuilder::new()
        .package_settings(PackageSettings {
            artifact_id,
            version,
            main_class,
        })
        .compiled_output_dir(classes_dir)
        .output_dir(output_dir)
        .dependency_files(dependency_files)
        .keep_compiled_output(keep_compiled_output)
        .layout(bundle.layout.unwrap_or_default());

    if let Some(name) = args.bundle_name.clone().or(bundle.bundle_name) {
        builder = builder.bundle_base_name(name);
    }

    Ok(builder.build()?)
}

fn required(value: Option<String>, argument: &str) -> Result<String> {
    value.ok_or_else(|| {
        BundlerError::Cli(CliError::MissingArgument {
            argument: argument.to_string(),
        })
    })
}
