//! Online member roster
//!
//! Merges the viewing human with the simulated members currently online.
//! The human always comes first; simulated members keep feed order.

use crate::identity::Identity;
use serde::Serialize;

pub const HUMAN_ROLE: &str = "Human Researcher";
pub const SIMULATED_SECTION_TITLE: &str = "Founding Members (AI)";

/// Persona previews are clamped to this many characters for display
pub const PERSONA_PREVIEW_CHARS: usize = 96;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RosterEntry {
    Human {
        identity: Identity,
        /// "{name} (You)"
        label: String,
        role: &'static str,
    },
    /// Heads the simulated members; only present when there are any
    SectionMarker { title: &'static str },
    Simulated {
        identity: Identity,
        /// Display-only clamp of the persona summary. The full summary stays
        /// on `identity`.
        persona_preview: String,
    },
}

/// Build the display-ordered roster. Pure; recomputed on every feed change.
#[must_use]
pub fn merge(human: &Identity, simulated: &[Identity]) -> Vec<RosterEntry> {
    let mut entries = Vec::with_capacity(simulated.len() + 2);
    entries.push(RosterEntry::Human {
        identity: human.clone(),
        label: format!("{} (You)", human.name),
        role: HUMAN_ROLE,
    });

    if simulated.is_empty() {
        return entries;
    }

    entries.push(RosterEntry::SectionMarker {
        title: SIMULATED_SECTION_TITLE,
    });
    entries.extend(simulated.iter().map(|member| RosterEntry::Simulated {
        identity: member.clone(),
        persona_preview: clamp_for_display(
            member.persona_summary().unwrap_or_default(),
            PERSONA_PREVIEW_CHARS,
        ),
    }));
    entries
}

/// Clamp text to `max_chars` characters, appending an ellipsis when cut
#[must_use]
pub fn clamp_for_display(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let clamped: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}…", clamped.trim_end())
    } else {
        clamped
    }
}
