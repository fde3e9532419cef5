// src/core/workdir.rs

use std::env;
use std::io;

/// Runs `f` with the process working directory set to a fresh, empty
/// temporary directory, then restores the previous working directory.
///
/// Restoration happens in a guard, so it also runs when `f` returns early or
/// panics. The scratch directory is removed afterwards.
pub fn in_scratch_dir<T, E, F>(f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: From<io::Error>,
{
    let scratch = tempfile::Builder::new().prefix("venv-notary-").tempdir()?;
    let original = env::current_dir()?;
    env::set_current_dir(scratch.path())?;
    log::debug!("Working directory switched to {}", scratch.path().display());

    // Declared after `scratch`, so it drops first: the old directory is back
    // before the scratch directory is deleted.
    let _restore = scopeguard::guard(original, |dir| {
        if let Err(e) = env::set_current_dir(&dir) {
            log::error!(
                "Failed to restore working directory to '{}': {}",
                dir.display(),
                e
            );
        } else {
            log::debug!("Working directory restored to {}", dir.display());
        }
    });

    f()
}
