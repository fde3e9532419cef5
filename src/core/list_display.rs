// src/core/list_display.rs

use colored::*;
use std::cmp::Ordering;
use std::ffi::OsStr;
use std::path::PathBuf;

use crate::constants::{DISPLAY_HASH_LEN, VERSION_PREFIX};
use crate::core::naming;
use crate::core::notary::key_of;
use crate::core::sorting::{alphanumeric_sort, semantic_versioning_sort};
use crate::core::venv::Venv;
use crate::models::{Location, VenvSummary};

/// The name shown to the user for a logical key.
///
/// Local keys lose their content hash except for a short prefix, so two
/// projects with the same directory name stay distinguishable.
pub fn display_name(key: &str, location: Location) -> String {
    match location {
        Location::Global => key.to_string(),
        Location::Local => {
            let name = naming::strip_content_hash(key);
            if name.len() == key.len() {
                return name.to_string();
            }
            let hash = key
                .get(name.len() + 1..name.len() + 1 + DISPLAY_HASH_LEN)
                .unwrap_or_default();
            format!("{}-{}", name, hash)
        }
    }
}

/// Turns registered paths into sorted summaries: names byte-wise, then
/// versions numerically.
pub fn summarize(paths: &[PathBuf], location: Location, active: Option<&OsStr>) -> Vec<VenvSummary> {
    let mut summaries: Vec<VenvSummary> = paths
        .iter()
        .filter_map(|path| {
            let (key, version) = key_of(path)?;
            Some(VenvSummary {
                name: display_name(&key, location),
                location,
                version: version.strip_prefix(VERSION_PREFIX).unwrap_or(&version).to_string(),
                path: path.clone(),
                active: Venv::new(path).is_active_with(active),
            })
        })
        .collect();
    summaries.sort_by(compare_summaries);
    summaries
}

fn compare_summaries(a: &VenvSummary, b: &VenvSummary) -> Ordering {
    alphanumeric_sort(&a.name, &b.name).then_with(|| semantic_versioning_sort(&a.version, &b.version))
}

/// Renders one location's summaries, one line per logical name with all of
/// its versions. The active version is highlighted.
pub fn render(summaries: &[VenvSummary], location: Location) -> String {
    let header = match location {
        Location::Global => t!("list.header.global"),
        Location::Local => t!("list.header.local"),
    };
    let mut out = format!("{}\n", header.yellow().bold());

    let entries: Vec<&VenvSummary> = summaries.iter().filter(|s| s.location == location).collect();
    if entries.is_empty() {
        out.push_str(&format!("  {}\n", t!("list.info.empty").dimmed()));
        return out;
    }

    let width = entries.iter().map(|s| s.name.len()).max().unwrap_or(0);
    let mut groups: Vec<(&str, Vec<&VenvSummary>)> = Vec::new();
    for summary in entries {
        match groups.last_mut() {
            Some((name, members)) if *name == summary.name => members.push(summary),
            _ => groups.push((summary.name.as_str(), vec![summary])),
        }
    }

    for (name, members) in groups {
        let any_active = members.iter().any(|s| s.active);
        let marker = if any_active { "*".green().bold() } else { " ".normal() };
        let versions: Vec<String> = members
            .iter()
            .map(|s| {
                let label = format!("{}{}", VERSION_PREFIX, s.version);
                if s.active {
                    label.green().bold().to_string()
                } else {
                    label.cyan().to_string()
                }
            })
            .collect();
        let padded = format!("{:<width$}", name, width = width);
        let name = if any_active { padded.bold() } else { padded.normal() };
        out.push_str(&format!(" {} {}  {}\n", marker, name, versions.join("  ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const HASH: &str = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";

    fn local(dir: &str) -> PathBuf {
        Path::new("/data/venv-notary/local").join(dir)
    }

    fn global(dir: &str) -> PathBuf {
        Path::new("/data/venv-notary/global").join(dir)
    }

    #[test]
    fn test_display_name_keeps_short_hash_for_local() {
        let key = format!("web_app-{}", HASH);
        assert_eq!(display_name(&key, Location::Local), "web_app-9f86");
        assert_eq!(display_name("web_app", Location::Local), "web_app");
        assert_eq!(display_name(&key, Location::Global), key);
    }

    #[test]
    fn test_summaries_are_sorted_by_name_then_version() {
        let paths = vec![
            global("zeta-py3.10"),
            global("alpha-py3.10"),
            global("alpha-py3.9"),
            global("Alpha-py3.12"),
        ];
        let summaries = summarize(&paths, Location::Global, None);
        let order: Vec<(&str, &str)> = summaries
            .iter()
            .map(|s| (s.name.as_str(), s.version.as_str()))
            .collect();
        assert_eq!(
            order,
            [("Alpha", "3.12"), ("alpha", "3.9"), ("alpha", "3.10"), ("zeta", "3.10")]
        );
    }

    #[test]
    fn test_summaries_mark_active_environment() {
        let path = local(&format!("api-{}-py3.11", HASH));
        let active = path.clone().into_os_string();
        let summaries = summarize(&[path], Location::Local, Some(active.as_os_str()));
        assert_eq!(summaries.len(), 1);
        assert!(summaries[0].active);
        assert_eq!(summaries[0].name, "api-9f86");
        assert_eq!(summaries[0].version, "3.11");
    }

    #[test]
    fn test_unversioned_directory_has_empty_version() {
        let summaries = summarize(&[global("no_suffix")], Location::Global, None);
        assert_eq!(summaries[0].name, "no_suffix");
        assert_eq!(summaries[0].version, "");
    }

    #[test]
    fn test_render_groups_versions_under_one_name() {
        let paths = vec![global("app-py3.9"), global("app-py3.11"), global("tools-py3.12")];
        let summaries = summarize(&paths, Location::Global, None);
        let out = render(&summaries, Location::Global);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("app"));
        assert!(lines[1].contains("py3.9"));
        assert!(lines[1].contains("py3.11"));
        assert!(lines[2].contains("tools"));
    }

    #[test]
    fn test_render_empty_location() {
        let out = render(&[], Location::Local);
        assert_eq!(out.lines().count(), 2);
    }
}
