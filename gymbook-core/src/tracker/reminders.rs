use chrono::NaiveDateTime;

use super::{Tracker, delegate_crud};
use crate::models::Reminder;

impl Tracker {
    delegate_crud!(reminders: Reminder, add_reminder, update_reminder, delete_reminder);

    pub fn due_reminders(&self, now: NaiveDateTime) -> Vec<&Reminder> {
        self.reminders.due(now)
    }

    pub fn mark_reminder_seen(&mut self, id: &str) -> bool {
        self.reminders.mark_seen(id)
    }

    /// Clears the seen flag on recurring reminders so they fire again on
    /// their next day.
    pub fn reset_recurring_reminders(&mut self) -> usize {
        let ids: Vec<String> = self
            .reminders
            .filter(|r| r.seen && !r.days.is_empty())
            .into_iter()
            .map(|r| r.id.clone())
            .collect();
        for id in &ids {
            self.reminders.modify(id, |r| r.seen = false);
        }
        ids.len()
    }
}
