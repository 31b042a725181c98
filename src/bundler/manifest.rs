//! Launch manifest construction and parsing.
//!
//! The manifest is the `META-INF/MANIFEST.MF` entry of the executable archive.
//! It names the entry point and lists every staged dependency as a class-path
//! token relative to the archive, e.g. `lib/a-1.0.jar`.
//!
//! Rendering follows the jar manifest line format: `key: value` lines ending
//! in CRLF, no line longer than 72 bytes (longer values continue on lines that
//! start with one space), and a blank line closing the main section.

use crate::bundler::{Error, Result, settings::BundleLayout};
use std::path::PathBuf;

/// Entry name of the manifest inside the executable archive.
pub const MANIFEST_ENTRY_NAME: &str = "META-INF/MANIFEST.MF";

/// Manifest format version written to every manifest.
pub const MANIFEST_VERSION: &str = "1.0";

const MANIFEST_VERSION_KEY: &str = "manifest-version";
const MAIN_CLASS_KEY: &str = "main-class";
const CLASS_PATH_KEY: &str = "class-path";

/// Maximum bytes per manifest line, excluding the line terminator.
const MAX_LINE_BYTES: usize = 72;

/// In-memory launch manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchManifest {
    /// Manifest format version, always [`MANIFEST_VERSION`] when built here.
    pub manifest_version: String,
    /// Fully qualified entry point class.
    pub main_class: String,
    /// Class-path tokens in dependency order.
    pub class_path: Vec<String>,
}

/// Builds the launch manifest for `main_class` and `dependency_files`.
///
/// Each dependency contributes one `<lib_dir>/<file name>` token, in input
/// order. Duplicated file names produce duplicated tokens.
pub fn build_manifest(
    main_class: &str,
    dependency_files: &[PathBuf],
    layout: &BundleLayout,
) -> LaunchManifest {
    let class_path = dependency_files
        .iter()
        .map(|file| {
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            layout.class_path_token(&name)
        })
        .collect();

    LaunchManifest {
        manifest_version: MANIFEST_VERSION.to_string(),
        main_class: main_class.to_string(),
        class_path,
    }
}

impl LaunchManifest {
    /// The `class-path` attribute value: tokens joined by single spaces.
    pub fn class_path_value(&self) -> String {
        self.class_path.join(" ")
    }

    /// Ordered `(key, value)` attributes as written to the manifest.
    pub fn attributes(&self) -> [(&'static str, String); 3] {
        [
            (MANIFEST_VERSION_KEY, self.manifest_version.clone()),
            (MAIN_CLASS_KEY, self.main_class.clone()),
            (CLASS_PATH_KEY, self.class_path_value()),
        ]
    }

    /// Renders the manifest in jar manifest line format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.attributes() {
            write_wrapped(&mut out, &format!("{key}: {value}"));
        }
        out.push_str("\r\n");
        out
    }

    /// Renders the manifest as bytes ready to be stored in an archive.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.render().into_bytes()
    }

    /// Parses a rendered manifest.
    ///
    /// Keys are matched case-insensitively and continuation lines are joined.
    /// Unknown attributes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GenericError`] when a line is not a `key: value` pair
    /// or `main-class` is absent.
    pub fn parse(text: &str) -> Result<Self> {
        let mut logical: Vec<String> = Vec::new();
        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                // End of the main section.
                break;
            }
            match line.strip_prefix(' ') {
                Some(rest) => match logical.last_mut() {
                    Some(last) => last.push_str(rest),
                    None => {
                        return Err(Error::GenericError(
                            "manifest starts with a continuation line".into(),
                        ));
                    }
                },
                None => logical.push(line.to_string()),
            }
        }

        let mut manifest_version = None;
        let mut main_class = None;
        let mut class_path = None;
        for line in &logical {
            let (key, value) = line.split_once(": ").ok_or_else(|| {
                Error::GenericError(format!("malformed manifest line: {line:?}"))
            })?;
            match key.to_ascii_lowercase().as_str() {
                MANIFEST_VERSION_KEY => manifest_version = Some(value.to_string()),
                MAIN_CLASS_KEY => main_class = Some(value.to_string()),
                CLASS_PATH_KEY => {
                    class_path = Some(value.split_whitespace().map(String::from).collect())
                }
                _ => {}
            }
        }

        Ok(Self {
            manifest_version: manifest_version.unwrap_or_else(|| MANIFEST_VERSION.to_string()),
            main_class: main_class
                .ok_or_else(|| Error::GenericError("manifest has no main-class".into()))?,
            class_path: class_path.unwrap_or_default(),
        })
    }
}

/// Appends `line` to `out`, splitting it into 72-byte physical lines.
///
/// Splits never fall inside a UTF-8 sequence.
fn write_wrapped(out: &mut String, line: &str) {
    let mut rest = line;
    let mut limit = MAX_LINE_BYTES;
    loop {
        if rest.len() <= limit {
            out.push_str(rest);
            out.push_str("\r\n");
            return;
        }
        let mut cut = limit;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        out.push_str(&rest[..cut]);
        out.push_str("\r\n ");
        rest = &rest[cut..];
        // Continuation lines spend one byte on the leading space.
        limit = MAX_LINE_BYTES - 1;
    }
}
