//! Dismissal cooldown tracking
//!
//! Decides whether a dismissed prompt may reappear. The caller always
//! supplies `now`; nothing in this module reads the clock.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::preferences::{DismissalRecord, LearningPromptPreferences};

/// Whether a prompt with this dismissal history may be shown again
///
/// An explicit `show_again_after` replaces the day-count cooldown: the
/// prompt is eligible from that instant on, however recent the dismissal.
/// Without it, the prompt is eligible once the whole days elapsed since
/// dismissal reach the user's cooldown. No record means eligible.
pub fn is_eligible(
    record: Option<&DismissalRecord>,
    preferences: &LearningPromptPreferences,
    now: DateTime<Utc>,
) -> bool {
    let Some(record) = record else {
        return true;
    };

    if let Some(show_again_after) = record.show_again_after {
        return now >= show_again_after;
    }

    let elapsed_days = (now - record.dismissed_at).num_days();
    elapsed_days >= i64::from(preferences.show_after_dismiss_days)
}

/// Whether the prompt with this id is currently eligible for the user
pub fn is_prompt_eligible(
    prompt_id: &str,
    preferences: &LearningPromptPreferences,
    now: DateTime<Utc>,
) -> bool {
    is_eligible(preferences.dismissal_for(prompt_id), preferences, now)
}

/// Drop dismissal records whose cooldown has fully elapsed
pub fn prune_expired(
    preferences: LearningPromptPreferences,
    now: DateTime<Utc>,
) -> LearningPromptPreferences {
    let before = preferences.dismissals.len();
    let kept: Vec<DismissalRecord> = preferences
        .dismissals
        .iter()
        .filter(|record| !is_eligible(Some(record), &preferences, now))
        .cloned()
        .collect();

    if kept.len() != before {
        debug!("Pruned {} expired dismissal records", before - kept.len());
    }

    LearningPromptPreferences {
        dismissals: kept,
        ..preferences
    }
}
