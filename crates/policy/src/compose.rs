//! Notification issue composition.

use crate::{NewIssue, Outcome, PolicyConfig, RepositoryEvent, UserLogin};

/// Appends the mention lines to an issue body template.
///
/// The sender is always mentioned. `cc_list` adds a second `/cc` line, copied
/// verbatim, only when it contains something other than whitespace.
pub fn compose_body(template: &str, sender: &UserLogin, cc_list: &str) -> String {
    let mut body = format!("{template}\n\n/cc @{sender}");
    if !cc_list.trim().is_empty() {
        body.push_str("\n/cc ");
        body.push_str(cc_list);
    }
    body
}

/// Builds the issue to open for `outcome`, or `None` when nothing is opened.
pub fn compose_issue(
    outcome: Outcome,
    config: &PolicyConfig,
    event: &RepositoryEvent,
) -> Option<NewIssue> {
    let (title, template) = match outcome {
        Outcome::Skip(_) => return None,
        Outcome::Warn => (&config.monitor_issue_title, &config.monitor_issue_body),
        Outcome::Enforce => (&config.privatized_issue_title, &config.privatized_issue_body),
    };

    Some(NewIssue {
        title: title.clone(),
        body: compose_body(template, &event.sender, &config.cc_list),
    })
}

#[cfg(test)]
#[path = "compose_tests.rs"]
mod tests;
