//! Output formatting for CLI display.

use std::fmt::Write;

use crate::config::SourceConfig;
use crate::model::{Contributor, MergedEvent};

/// One line per entry: label, text, link.
pub(super) fn format_timeline(entries: &[MergedEvent]) -> String {
    let width = entries
        .iter()
        .map(|e| e.timestamp_label.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for e in entries {
        let _ = writeln!(
            out,
            "{:<width$}  {}  {}",
            e.timestamp_label, e.display_text, e.url
        );
    }
    out
}

pub(super) fn format_contributors(contributors: &[Contributor]) -> String {
    let mut out = String::new();
    for c in contributors {
        let _ = writeln!(out, "{}  {}", c.name, c.url);
    }
    out
}

pub(super) fn format_sources(sources: &[SourceConfig]) -> String {
    if sources.is_empty() {
        return "No sources\n".to_string();
    }
    let mut out = String::new();
    for s in sources {
        let _ = writeln!(out, "{}  {}", s.name, s.repo);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str, text: &str, url: &str) -> MergedEvent {
        MergedEvent {
            actor_name: String::new(),
            url: url.into(),
            timestamp_label: label.into(),
            source_name: String::new(),
            display_text: text.into(),
            created_at: None,
        }
    }

    #[test]
    fn aligns_labels() {
        let out = format_timeline(&[
            entry("NOW", "Make this your contribution!", "https://github.com/BUGS-NYU"),
            entry("10/5/2020 2:07 PM", "alice merged a Pull Request into Schedge!", "u"),
        ]);
        assert_eq!(
            out,
            "NOW                Make this your contribution!  https://github.com/BUGS-NYU\n\
             10/5/2020 2:07 PM  alice merged a Pull Request into Schedge!  u\n"
        );
    }

    #[test]
    fn empty_timeline_prints_nothing() {
        assert_eq!(format_timeline(&[]), "");
    }

    #[test]
    fn no_sources() {
        assert_eq!(format_sources(&[]), "No sources\n");
    }
}
