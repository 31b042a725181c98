//! bootjar - post-compile bundler for launchable jar distributions.
//!
//! This binary packs compiled classes into an executable jar, stages its
//! dependencies and zips both into a single distributable archive.

use bootjar_bundler::cli::OutputManager;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match bootjar_bundler::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            let output = OutputManager::new(false, false);
            let _ = output.error(&format!("Error: {}", e));
            for suggestion in e.recovery_suggestions() {
                let _ = output.hint(&suggestion);
            }
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
