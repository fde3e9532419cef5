// src/core/notary.rs

//! The registry of environments.
//!
//! The index is never persisted: it is rebuilt from a scan of the `global`
//! and `local` directories every time the registry is constructed or
//! refreshed, and kept in step with every successful create and delete made
//! through the registry afterwards. An environment is registered exactly when
//! its directory exists and passes [`Venv::exists`].

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{ACTIVE_ENV_VAR, DEFAULT_PYTHON, VERSION_PREFIX};
use crate::core::naming::{self, NamingError};
use crate::core::paths::{self, PathError};
use crate::core::sorting::semantic_versioning_sort;
use crate::core::venv::{Venv, VenvError};
use crate::core::workdir;
use crate::models::Location;
use crate::system::shell::Shell;

/// Represents errors that can occur during registry operations.
#[derive(Error, Debug)]
pub enum NotaryError {
    /// A filesystem I/O error occurred.
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    #[error(transparent)]
    Naming(#[from] NamingError),
    #[error(transparent)]
    Venv(#[from] VenvError),
    /// The exact versioned environment is already in the index.
    #[error("Environment '{name}' is already registered with Python {version}.")]
    AlreadyRegistered { name: String, version: String },
    /// Resolution found nothing. Kept distinct so callers can offer to create it.
    #[error("{}", describe_not_registered(.location, .name, .version.as_deref()))]
    NotRegistered {
        location: Location,
        name: String,
        version: Option<String>,
    },
    /// Several versions are registered under the key and none was picked.
    #[error(
        "Multiple Python versions associated with environment '{name}': {}. Select one Python version.",
        .candidates.join(", ")
    )]
    AmbiguousVersion {
        name: String,
        /// `py<version>` suffixes, lowest first.
        candidates: Vec<String>,
    },
    #[error("No active registered virtual environments.")]
    NoActiveEnv,
}

fn describe_not_registered(location: &Location, name: &str, version: Option<&str>) -> String {
    let subject = match location {
        Location::Global => format!("No environment with name '{}' is registered", name),
        Location::Local => "No environment is registered for the current directory".to_string(),
    };
    match version {
        Some(v) => format!("{} with Python version {}.", subject, v),
        None => format!("{}.", subject),
    }
}

type NotaryResult<T> = Result<T, NotaryError>;

/// The outcome of [`Notary::clean`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub deleted: Vec<PathBuf>,
    /// Matching environments left alone because they are active.
    pub skipped_active: Vec<PathBuf>,
    /// Matching environments whose deletion failed, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

/// Owns the in-memory index of every registered environment.
#[derive(Debug)]
pub struct Notary {
    root: PathBuf,
    venvs: HashMap<PathBuf, Location>,
}

impl Notary {
    /// Opens the registry under the user's data home.
    pub fn new() -> NotaryResult<Self> {
        Self::open(paths::get_notary_dir()?)
    }

    /// Opens (creating if needed) the registry rooted at `root` and scans it.
    ///
    /// A relative `root` is anchored at the current directory, since
    /// environments are created from a scratch directory.
    pub fn open(root: impl Into<PathBuf>) -> NotaryResult<Self> {
        let mut notary = Self {
            root: std::path::absolute(root.into())?,
            venvs: HashMap::new(),
        };
        notary.set_up()?;
        notary.refresh()?;
        Ok(notary)
    }

    fn set_up(&self) -> NotaryResult<()> {
        paths::ensure_dir(&self.global_dir())?;
        paths::ensure_dir(&self.local_dir())?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir_for(&self, location: Location) -> PathBuf {
        self.root.join(location.dir_name())
    }

    pub fn global_dir(&self) -> PathBuf {
        self.dir_for(Location::Global)
    }

    pub fn local_dir(&self) -> PathBuf {
        self.dir_for(Location::Local)
    }

    /// Rebuilds the index from disk.
    ///
    /// The new index replaces the old one only once both directories have
    /// been scanned; on error the previous index is kept.
    pub fn refresh(&mut self) -> NotaryResult<()> {
        let mut venvs = HashMap::new();
        for location in [Location::Global, Location::Local] {
            for entry in fs::read_dir(self.dir_for(location))? {
                let venv = Venv::new(entry?.path());
                if !venv.exists() {
                    log::debug!("Skipping '{}': not a python environment", venv.path.display());
                    continue;
                }
                venvs.insert(venv.path, location);
            }
        }
        log::debug!("Registry scan found {} environments", venvs.len());
        self.venvs = venvs;
        Ok(())
    }

    pub fn is_registered(&self, venv: &Venv) -> bool {
        self.venvs.contains_key(&venv.path)
    }

    /// All registered paths of `location`, unordered.
    pub fn list(&self, location: Location) -> Vec<PathBuf> {
        self.venvs
            .iter()
            .filter(|(_, loc)| **loc == location)
            .map(|(path, _)| path.clone())
            .collect()
    }

    pub fn list_global(&self) -> Vec<PathBuf> {
        self.list(Location::Global)
    }

    pub fn list_local(&self) -> Vec<PathBuf> {
        self.list(Location::Local)
    }

    /// The logical key of the local environment for the current directory.
    pub fn local_key(&self) -> NotaryResult<String> {
        Ok(naming::local_key(&paths::current_dir()?)?)
    }

    /// Registered paths of `location` whose logical key is `key`, in no order.
    pub fn registered_versions(&self, key: &str, location: Location) -> Vec<PathBuf> {
        self.venvs
            .iter()
            .filter(|(_, loc)| **loc == location)
            .filter(|(path, _)| key_of(path).is_some_and(|(k, _)| k == key))
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// The registered variant of `key` with the highest interpreter version.
    pub fn highest_registered_version(&self, key: &str, location: Location) -> Option<Venv> {
        self.registered_versions(key, location)
            .into_iter()
            .filter_map(|path| {
                let version = key_of(&path)?.1;
                let number = version.strip_prefix(VERSION_PREFIX)?.to_string();
                Some((number, path))
            })
            .max_by(|(a, _), (b, _)| semantic_versioning_sort(a, b))
            .map(|(_, path)| Venv::new(path))
    }

    /// Maps a key and an optional `py<version>` to one registered environment.
    ///
    /// With a version, the exact versioned path must be registered. Without
    /// one, a single registered variant is picked; none yields
    /// [`NotaryError::NotRegistered`] and several yield
    /// [`NotaryError::AmbiguousVersion`].
    fn resolve(
        &self,
        key: &str,
        display_name: &str,
        location: Location,
        version: Option<&str>,
    ) -> NotaryResult<Venv> {
        let not_registered = || NotaryError::NotRegistered {
            location,
            name: display_name.to_string(),
            version: version.map(str::to_string),
        };

        if let Some(version) = version {
            let venv = Venv::new(self.dir_for(location).join(naming::versioned_name(key, version)));
            return if self.is_registered(&venv) {
                Ok(venv)
            } else {
                Err(not_registered())
            };
        }

        let mut candidates = self.registered_versions(key, location);
        match candidates.len() {
            0 => Err(not_registered()),
            1 => Ok(Venv::new(candidates.remove(0))),
            _ => {
                let mut versions: Vec<String> = candidates
                    .iter()
                    .filter_map(|p| key_of(p).map(|(_, v)| v))
                    .collect();
                versions.sort_by(|a, b| {
                    semantic_versioning_sort(
                        a.strip_prefix(VERSION_PREFIX).unwrap_or(a),
                        b.strip_prefix(VERSION_PREFIX).unwrap_or(b),
                    )
                });
                log::debug!("'{}' is ambiguous between {:?}", display_name, versions);
                Err(NotaryError::AmbiguousVersion {
                    name: display_name.to_string(),
                    candidates: versions,
                })
            }
        }
    }

    /// Resolves a named environment. `name` is normalized first.
    pub fn resolve_global(&self, name: &str, version: Option<&str>) -> NotaryResult<Venv> {
        let key = naming::normalize_non_empty(name)?;
        self.resolve(&key, &key, Location::Global, version)
    }

    /// Resolves the environment bound to the current directory.
    pub fn resolve_local(&self, version: Option<&str>) -> NotaryResult<Venv> {
        let key = self.local_key()?;
        self.resolve(&key, naming::strip_content_hash(&key), Location::Local, version)
    }

    fn create(
        &mut self,
        key: &str,
        prompt: &str,
        location: Location,
        python: Option<OsString>,
    ) -> NotaryResult<Venv> {
        let interpreter = python.unwrap_or_else(|| DEFAULT_PYTHON.into());
        let version = naming::python_version(&interpreter)?;
        let venv = Venv::new(self.dir_for(location).join(naming::versioned_name(key, &version)))
            .with_prompt(naming::versioned_name(prompt, &version))
            .with_python(Some(interpreter));

        if self.is_registered(&venv) {
            return Err(NotaryError::AlreadyRegistered {
                name: prompt.to_string(),
                version,
            });
        }

        // The venv tool must not pick up modules from the user's directory.
        workdir::in_scratch_dir(|| venv.create().map_err(NotaryError::from))?;
        self.venvs.insert(venv.path.clone(), location);
        Ok(venv)
    }

    /// Creates a named environment with `python` (or the default interpreter).
    pub fn create_global(&mut self, name: &str, python: Option<OsString>) -> NotaryResult<Venv> {
        let key = naming::normalize_non_empty(name)?;
        self.create(&key, &key, Location::Global, python)
    }

    /// Creates the environment bound to the current directory.
    pub fn create_local(&mut self, python: Option<OsString>) -> NotaryResult<Venv> {
        let key = self.local_key()?;
        let prompt = naming::strip_content_hash(&key).to_string();
        self.create(&key, &prompt, Location::Local, python)
    }

    fn remove(&mut self, venv: &Venv, active: Option<&OsStr>) -> NotaryResult<()> {
        venv.delete_with(active)?;
        self.venvs.remove(&venv.path);
        Ok(())
    }

    /// Deletes a named environment; see [`Notary::resolve_global`].
    pub fn delete_global(&mut self, name: &str, version: Option<&str>) -> NotaryResult<Venv> {
        let venv = self.resolve_global(name, version)?;
        self.remove(&venv, std::env::var_os(ACTIVE_ENV_VAR).as_deref())?;
        Ok(venv)
    }

    /// Deletes the current directory's environment; see [`Notary::resolve_local`].
    pub fn delete_local(&mut self, version: Option<&str>) -> NotaryResult<Venv> {
        let venv = self.resolve_local(version)?;
        self.remove(&venv, std::env::var_os(ACTIVE_ENV_VAR).as_deref())?;
        Ok(venv)
    }

    /// Activates a named environment in `shell`. Blocks until the shell exits.
    pub fn activate_global(&self, name: &str, version: Option<&str>, shell: &Shell) -> NotaryResult<()> {
        let venv = self.resolve_global(name, version)?;
        Ok(venv.activate(shell)?)
    }

    /// Activates the current directory's environment in `shell`.
    pub fn activate_local(&self, version: Option<&str>, shell: &Shell) -> NotaryResult<()> {
        let venv = self.resolve_local(version)?;
        Ok(venv.activate(shell)?)
    }

    /// The registered environment named by the activation marker variable.
    pub fn get_active_env(&self) -> NotaryResult<Venv> {
        self.active_env_from(std::env::var_os(ACTIVE_ENV_VAR).as_deref())
    }

    /// The registered environment at `active`, if any.
    pub fn active_env_from(&self, active: Option<&OsStr>) -> NotaryResult<Venv> {
        let active = active
            .filter(|a| !a.is_empty())
            .ok_or(NotaryError::NoActiveEnv)?;
        let venv = Venv::new(active);
        if self.is_registered(&venv) {
            Ok(venv)
        } else {
            Err(NotaryError::NoActiveEnv)
        }
    }

    /// Deletes every environment of `location` matching the optional
    /// `py<version>` and display-name substring. Active environments are
    /// skipped, and a failed deletion does not stop the rest; both end up
    /// in the report.
    pub fn clean(
        &mut self,
        location: Location,
        version: Option<&str>,
        pattern: Option<&str>,
    ) -> CleanReport {
        let active = std::env::var_os(ACTIVE_ENV_VAR);
        self.clean_with(location, version, pattern, active.as_deref())
    }

    /// [`Notary::clean`] against an explicit activation marker.
    pub fn clean_with(
        &mut self,
        location: Location,
        version: Option<&str>,
        pattern: Option<&str>,
        active: Option<&OsStr>,
    ) -> CleanReport {
        let mut report = CleanReport::default();
        let mut targets = self.list(location);
        targets.sort();
        for path in targets {
            let Some((key, venv_version)) = key_of(&path) else {
                continue;
            };
            if version.is_some_and(|v| v != venv_version) {
                continue;
            }
            let display = match location {
                Location::Global => key.as_str(),
                Location::Local => naming::strip_content_hash(&key),
            };
            if pattern.is_some_and(|p| !display.contains(p)) {
                continue;
            }
            let venv = Venv::new(path);
            if venv.is_active_with(active) {
                log::warn!("Skipping active environment '{}'", venv.path.display());
                report.skipped_active.push(venv.path);
                continue;
            }
            match self.remove(&venv, active) {
                Ok(()) => report.deleted.push(venv.path),
                Err(e) => {
                    log::warn!("Could not delete '{}': {}", venv.path.display(), e);
                    report.failed.push((venv.path, e.to_string()));
                }
            }
        }
        report
    }
}

/// Splits the directory name of a registered path into `(key, "py<version>")`.
pub fn key_of(path: &Path) -> Option<(String, String)> {
    let name = path.file_name()?.to_str()?;
    let (key, version) = naming::split_version_suffix(name);
    Some((key.to_string(), version.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{VENV_ACTIVATE, VENV_EXEC_DIR};
    use crate::core::venv::test_support::*;
    use serial_test::serial;
    use std::env;
    use tempfile::{TempDir, tempdir};

    fn registry() -> (TempDir, Notary) {
        let dir = tempdir().unwrap();
        let notary = Notary::open(dir.path().join("venv-notary")).unwrap();
        (dir, notary)
    }

    /// Lays out a fake environment and rescans.
    fn plant(notary: &mut Notary, location: Location, dir_name: &str) -> PathBuf {
        let path = notary.dir_for(location).join(dir_name);
        fake_venv(&path);
        notary.refresh().unwrap();
        path
    }

    /// Changes into a fresh project directory for the duration of a test.
    struct InProject {
        previous: PathBuf,
        _dir: TempDir,
        path: PathBuf,
    }

    impl InProject {
        fn new(name: &str) -> Self {
            let dir = tempdir().unwrap();
            let path = dir.path().join(name);
            fs::create_dir(&path).unwrap();
            let previous = env::current_dir().unwrap();
            env::set_current_dir(&path).unwrap();
            Self {
                previous,
                path: paths::current_dir().unwrap(),
                _dir: dir,
            }
        }
    }

    impl Drop for InProject {
        fn drop(&mut self) {
            let _ = env::set_current_dir(&self.previous);
        }
    }

    #[test]
    fn test_open_creates_layout() {
        let (_dir, notary) = registry();
        assert!(notary.global_dir().is_dir());
        assert!(notary.local_dir().is_dir());
        assert!(notary.list_global().is_empty());
        assert!(notary.list_local().is_empty());
    }

    #[test]
    fn test_refresh_indexes_only_valid_environments() {
        let (_dir, mut notary) = registry();
        let good = plant(&mut notary, Location::Global, "app-py3.11");
        fs::create_dir_all(notary.global_dir().join("half-py3.11/bin")).unwrap();
        fs::write(notary.global_dir().join("stray.txt"), "").unwrap();
        let local = plant(&mut notary, Location::Local, "proj-abc-py3.12");

        assert_eq!(notary.list_global(), vec![good.clone()]);
        assert_eq!(notary.list_local(), vec![local]);
        assert!(notary.is_registered(&Venv::new(good)));
    }

    #[test]
    fn test_refresh_forgets_environments_removed_from_disk() {
        let (_dir, mut notary) = registry();
        let path = plant(&mut notary, Location::Global, "gone-py3.11");
        fs::remove_dir_all(&path).unwrap();
        assert!(notary.is_registered(&Venv::new(&path)));
        notary.refresh().unwrap();
        assert!(!notary.is_registered(&Venv::new(&path)));
    }

    #[test]
    fn test_refresh_error_keeps_previous_index() {
        let (_dir, mut notary) = registry();
        let path = plant(&mut notary, Location::Global, "keep-py3.11");
        fs::remove_dir_all(notary.local_dir()).unwrap();
        assert!(notary.refresh().is_err());
        assert!(notary.is_registered(&Venv::new(path)));
    }

    #[test]
    fn test_resolve_global_normalizes_and_picks_single_version() {
        let (_dir, mut notary) = registry();
        let path = plant(&mut notary, Location::Global, "my_project-py3.11");
        let venv = notary.resolve_global("My Project!", None).unwrap();
        assert_eq!(venv.path, path);
        let venv = notary.resolve_global("my_project", Some("py3.11")).unwrap();
        assert_eq!(venv.path, path);
    }

    #[test]
    fn test_resolve_global_rejects_empty_name() {
        let (_dir, notary) = registry();
        assert!(matches!(
            notary.resolve_global("!!!", None),
            Err(NotaryError::Naming(NamingError::InvalidName(_)))
        ));
    }

    #[test]
    fn test_resolve_not_registered() {
        let (_dir, mut notary) = registry();
        plant(&mut notary, Location::Global, "app-py3.11");
        assert!(matches!(
            notary.resolve_global("other", None),
            Err(NotaryError::NotRegistered { .. })
        ));
        assert!(matches!(
            notary.resolve_global("app", Some("py3.12")),
            Err(NotaryError::NotRegistered { .. })
        ));
    }

    #[test]
    fn test_resolve_ambiguous_lists_every_candidate() {
        let (_dir, mut notary) = registry();
        plant(&mut notary, Location::Global, "app-py3.11");
        plant(&mut notary, Location::Global, "app-py3.9");
        let other = plant(&mut notary, Location::Global, "app-py3.10");
        plant(&mut notary, Location::Global, "application-py3.12");

        match notary.resolve_global("app", None) {
            Err(NotaryError::AmbiguousVersion { candidates, .. }) => {
                assert_eq!(candidates, ["py3.9", "py3.10", "py3.11"]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
        assert_eq!(notary.resolve_global("app", Some("py3.10")).unwrap().path, other);
    }

    #[test]
    fn test_names_containing_the_separator() {
        let (_dir, mut notary) = registry();
        let path = plant(&mut notary, Location::Global, "my-python-tools-py3.11");
        assert_eq!(notary.resolve_global("my-python-tools", None).unwrap().path, path);
        assert!(notary.resolve_global("my", None).is_err());
    }

    #[test]
    fn test_locations_do_not_mix() {
        let (_dir, mut notary) = registry();
        plant(&mut notary, Location::Local, "app-py3.11");
        assert!(notary.registered_versions("app", Location::Global).is_empty());
        assert_eq!(notary.registered_versions("app", Location::Local).len(), 1);
    }

    #[test]
    fn test_highest_registered_version() {
        let (_dir, mut notary) = registry();
        plant(&mut notary, Location::Global, "app-py3.9");
        let highest = plant(&mut notary, Location::Global, "app-py3.10");
        assert_eq!(
            notary.highest_registered_version("app", Location::Global).unwrap().path,
            highest
        );
        assert!(notary.highest_registered_version("none", Location::Global).is_none());
    }

    #[test]
    fn test_delete_global_evicts_from_index() {
        let (_dir, mut notary) = registry();
        let path = plant(&mut notary, Location::Global, "app-py3.11");
        notary.delete_global("app", None).unwrap();
        assert!(!path.exists());
        assert!(notary.list_global().is_empty());
        assert!(matches!(
            notary.delete_global("app", None),
            Err(NotaryError::NotRegistered { .. })
        ));
    }

    #[test]
    fn test_delete_ambiguous_keeps_everything() {
        let (_dir, mut notary) = registry();
        plant(&mut notary, Location::Global, "app-py3.9");
        plant(&mut notary, Location::Global, "app-py3.11");
        assert!(matches!(
            notary.delete_global("app", None),
            Err(NotaryError::AmbiguousVersion { .. })
        ));
        assert_eq!(notary.list_global().len(), 2);
        notary.delete_global("app", Some("py3.9")).unwrap();
        assert_eq!(notary.resolve_global("app", None).unwrap().path.file_name().unwrap(), "app-py3.11");
    }

    #[test]
    fn test_clean_filters_by_version_and_name() {
        let (_dir, mut notary) = registry();
        plant(&mut notary, Location::Global, "web-py3.11");
        plant(&mut notary, Location::Global, "web-py3.12");
        plant(&mut notary, Location::Global, "data-py3.11");

        let report = notary.clean_with(Location::Global, Some("py3.11"), Some("we"), None);
        assert_eq!(report.deleted.len(), 1);
        assert!(report.deleted[0].ends_with("web-py3.11"));

        let report = notary.clean_with(Location::Global, None, None, None);
        assert_eq!(report.deleted.len(), 2);
        assert!(notary.list_global().is_empty());
    }

    #[test]
    fn test_clean_skips_active_environment() {
        let (_dir, mut notary) = registry();
        let active = plant(&mut notary, Location::Global, "web-py3.11");
        let other = plant(&mut notary, Location::Global, "web-py3.12");

        let marker = active.clone().into_os_string();
        let report = notary.clean_with(Location::Global, None, None, Some(marker.as_os_str()));
        assert_eq!(report.skipped_active, vec![active.clone()]);
        assert_eq!(report.deleted, vec![other]);
        assert!(report.failed.is_empty());
        assert!(active.exists());
        assert_eq!(notary.list_global(), vec![active]);
    }

    #[test]
    fn test_clean_continues_past_failed_deletion() {
        let (_dir, mut notary) = registry();
        let broken = plant(&mut notary, Location::Global, "alpha-py3.11");
        let fine = plant(&mut notary, Location::Global, "beta-py3.11");
        // Still indexed, but no longer a valid environment on disk.
        fs::remove_file(broken.join(VENV_EXEC_DIR).join(VENV_ACTIVATE)).unwrap();

        let report = notary.clean_with(Location::Global, None, None, None);
        assert_eq!(report.deleted, vec![fine]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, broken);
        assert!(report.failed[0].1.contains("not a python environment"));
        assert!(notary.is_registered(&Venv::new(&broken)));
    }

    #[test]
    fn test_active_env_from_marker() {
        let (_dir, mut notary) = registry();
        let path = plant(&mut notary, Location::Local, "proj-abc-py3.12");

        let marker = path.clone().into_os_string();
        assert_eq!(notary.active_env_from(Some(marker.as_os_str())).unwrap().path, path);
        assert!(matches!(notary.active_env_from(None), Err(NotaryError::NoActiveEnv)));
        assert!(matches!(
            notary.active_env_from(Some(OsStr::new(""))),
            Err(NotaryError::NoActiveEnv)
        ));
        let unregistered = notary.global_dir().join("ghost-py3.11").into_os_string();
        assert!(matches!(
            notary.active_env_from(Some(unregistered.as_os_str())),
            Err(NotaryError::NoActiveEnv)
        ));
    }

    #[test]
    #[serial]
    fn test_resolve_local_uses_current_directory() {
        let (_dir, mut notary) = registry();
        let project = InProject::new("Web App");
        let key = naming::local_key(&project.path).unwrap();
        assert!(key.starts_with("web_app-"));

        let path = plant(&mut notary, Location::Local, &naming::versioned_name(&key, "py3.11"));
        assert_eq!(notary.resolve_local(None).unwrap().path, path);
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_create_then_delete_global_restores_state() {
        let (dir, mut notary) = registry();
        let python = fake_python(dir.path(), "python3.11", "3.11.7");
        let before = env::current_dir().unwrap();

        let venv = notary
            .create_global("My Project!", Some(python.clone().into_os_string()))
            .unwrap();
        assert_eq!(venv.path, notary.global_dir().join("my_project-py3.11"));
        assert_eq!(venv.prompt.as_deref(), Some("my_project-py3.11"));
        assert!(venv.exists());
        assert!(notary.is_registered(&venv));
        assert_eq!(env::current_dir().unwrap(), before);

        let err = notary
            .create_global("my project", Some(python.into_os_string()))
            .unwrap_err();
        assert!(matches!(err, NotaryError::AlreadyRegistered { .. }));

        notary.delete_global("My Project!", Some("py3.11")).unwrap();
        assert!(!venv.path.exists());
        assert!(notary.list_global().is_empty());
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_relative_root_is_anchored_at_open() {
        let dir = tempdir().unwrap();
        let python = fake_python(dir.path(), "python3.11", "3.11.7");
        let project = InProject::new("workspace");

        let mut notary = Notary::open("data/venv-notary").unwrap();
        assert!(notary.root().is_absolute());
        assert_eq!(notary.root(), project.path.join("data/venv-notary"));

        let venv = notary
            .create_global("app", Some(python.into_os_string()))
            .unwrap();
        assert!(venv.path.is_absolute());
        assert!(venv.exists());
        notary.refresh().unwrap();
        assert!(notary.is_registered(&venv));
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_failed_create_leaves_registry_untouched() {
        let (dir, mut notary) = registry();
        let python = broken_python(dir.path(), "python3", "3.12.0");
        let before = env::current_dir().unwrap();

        let err = notary
            .create_global("app", Some(python.into_os_string()))
            .unwrap_err();
        assert!(matches!(err, NotaryError::Venv(VenvError::Creation { .. })));
        assert!(notary.list_global().is_empty());
        assert!(!notary.global_dir().join("app-py3.12").exists());
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_two_local_versions_are_ambiguous() {
        let (dir, mut notary) = registry();
        let py39 = fake_python(dir.path(), "python3.9", "3.9.18");
        let py311 = fake_python(dir.path(), "python3.11", "3.11.7");
        let _project = InProject::new("service");

        notary.create_local(Some(py39.into_os_string())).unwrap();
        notary.create_local(Some(py311.into_os_string())).unwrap();
        assert_eq!(notary.list_local().len(), 2);

        match notary.delete_local(None) {
            Err(NotaryError::AmbiguousVersion { name, candidates }) => {
                assert_eq!(name, "service");
                assert_eq!(candidates, ["py3.9", "py3.11"]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }

        let removed = notary.delete_local(Some("py3.9")).unwrap();
        assert!(!removed.path.exists());
        assert_eq!(notary.list_local().len(), 1);
        notary.delete_local(None).unwrap();
        assert!(notary.list_local().is_empty());
    }
}
