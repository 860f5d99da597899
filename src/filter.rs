//! Filter rules: which events make it onto the timeline.

use std::fmt;

use crate::model::Event;

/// The denylist token used when none is configured.
pub const DEFAULT_BOT_TOKEN: &str = "dependabot";

/// Why an event was left off the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The pull request was closed without being merged.
    NotMerged,

    /// The pull request was opened by an automated account.
    Bot,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotMerged => f.write_str("not merged"),
            Self::Bot => f.write_str("bot account"),
        }
    }
}

/// The rules applied to every event the merge extracts.
///
/// Rules run in a fixed order and the first failing rule decides the
/// rejection reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRules {
    /// Lowercased, non-empty.
    bot_tokens: Vec<String>,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self::new([DEFAULT_BOT_TOKEN])
    }
}

impl FilterRules {
    /// Rules with the given bot denylist tokens.
    ///
    /// Tokens match case-insensitively anywhere in a login. Empty tokens
    /// are ignored, since they would match every account.
    pub fn new<I, S>(bot_tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let bot_tokens = bot_tokens
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { bot_tokens }
    }

    /// Accept the event, or say why it is rejected.
    pub fn check(&self, event: &Event) -> Result<(), Rejection> {
        if !event.is_merged() {
            return Err(Rejection::NotMerged);
        }
        if self.is_bot(&event.actor) {
            return Err(Rejection::Bot);
        }
        Ok(())
    }

    /// Whether a login belongs to an automated account.
    pub fn is_bot(&self, login: &str) -> bool {
        let login = login.to_lowercase();
        self.bot_tokens.iter().any(|t| login.contains(t.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    fn event(actor: &str, merged: bool) -> Event {
        let created_at = Timestamp::from_second(1_600_000_000).unwrap();
        Event {
            actor: actor.into(),
            url: "https://github.com/o/r/pull/1".into(),
            created_at,
            merged_at: merged.then_some(created_at),
            source: "r".into(),
        }
    }

    #[test]
    fn accepts_merged_human() {
        assert_eq!(FilterRules::default().check(&event("dave", true)), Ok(()));
    }

    #[test]
    fn rejects_unmerged() {
        let rules = FilterRules::default();
        assert_eq!(rules.check(&event("carol", false)), Err(Rejection::NotMerged));
    }

    #[test]
    fn rejects_bot_case_insensitively() {
        let rules = FilterRules::default();
        assert_eq!(rules.check(&event("dependabot[bot]", true)), Err(Rejection::Bot));
        assert_eq!(rules.check(&event("Dependabot-Preview", true)), Err(Rejection::Bot));
    }

    #[test]
    fn unmerged_wins_over_bot() {
        let rules = FilterRules::default();
        assert_eq!(
            rules.check(&event("dependabot[bot]", false)),
            Err(Rejection::NotMerged)
        );
    }

    #[test]
    fn empty_tokens_are_ignored() {
        let rules = FilterRules::new(["", "  "]);
        assert!(!rules.is_bot("alice"));
    }

    #[test]
    fn custom_tokens_replace_default() {
        let rules = FilterRules::new(["Renovate"]);
        assert!(rules.is_bot("renovate[bot]"));
        assert!(!rules.is_bot("dependabot[bot]"));
    }
}
