//! Supplements, their intake logs, and cycles with their compounds.

use chrono::NaiveDate;
use log::info;

use super::{Tracker, delegate_crud};
use crate::errors::{GymbookError, Result};
use crate::models::{Compound, Entity, SteroidCycle, Supplement, SupplementLog};
use crate::store::EntityStore;

impl Tracker {
    delegate_crud!(
        supplement_logs: SupplementLog,
        add_supplement_log,
        update_supplement_log,
        delete_supplement_log
    );

    pub fn supplements(&self) -> &EntityStore<Supplement> {
        &self.supplements
    }

    pub fn add_supplement(&mut self, supplement: Supplement) -> String {
        self.supplements.add(supplement)
    }

    pub fn update_supplement(&mut self, supplement: Supplement) -> bool {
        self.supplements.update(supplement)
    }

    /// Removes the supplement only. Its logs keep their id and resolve to no
    /// name from then on.
    pub fn delete_supplement(&mut self, id: &str) -> bool {
        self.supplements.delete(id)
    }

    /// Records whether a known supplement was taken on `date`, replacing an
    /// earlier entry for the same day.
    pub fn log_supplement(
        &mut self,
        supplement_id: &str,
        date: NaiveDate,
        taken: bool,
    ) -> Result<String> {
        if !self.supplements.contains(supplement_id) {
            return Err(GymbookError::not_found(Supplement::KIND, supplement_id));
        }
        let existing = self
            .supplement_logs
            .all()
            .iter()
            .find(|l| l.supplement_id == supplement_id && l.date == date)
            .map(|l| l.id.clone());
        match existing {
            Some(id) => {
                self.supplement_logs.modify(&id, |l| l.taken = taken);
                Ok(id)
            }
            None => Ok(self
                .supplement_logs
                .add(SupplementLog::new(supplement_id, date, taken))),
        }
    }

    pub fn supplement_name_for_log(&self, log: &SupplementLog) -> Option<&str> {
        self.supplements
            .get(&log.supplement_id)
            .map(|s| s.name.as_str())
    }

    /// Share of logged days on which the supplement was taken.
    pub fn supplement_adherence(&self, supplement_id: &str) -> Option<f64> {
        let logs = self.supplement_logs.for_supplement(supplement_id);
        if logs.is_empty() {
            return None;
        }
        let taken = logs.iter().filter(|l| l.taken).count();
        Some(taken as f64 / logs.len() as f64)
    }

    // Cycles

    pub fn cycles(&self) -> &EntityStore<SteroidCycle> {
        &self.cycles
    }

    pub fn compounds(&self) -> &EntityStore<Compound> {
        &self.compounds
    }

    pub fn add_cycle(&mut self, cycle: SteroidCycle) -> String {
        self.cycles.add(cycle)
    }

    pub fn update_cycle(&mut self, cycle: SteroidCycle) -> bool {
        self.cycles.update(cycle)
    }

    /// Deletes a cycle together with its compounds.
    pub fn delete_cycle(&mut self, id: &str) -> bool {
        if !self.cycles.delete(id) {
            return false;
        }
        let removed = self.compounds.delete_where(|c| c.cycle_id == id);
        info!("Deleted cycle {} and {} compounds", id, removed);
        true
    }

    pub fn add_compound(&mut self, compound: Compound) -> Result<String> {
        if !self.cycles.contains(&compound.cycle_id) {
            return Err(GymbookError::not_found(SteroidCycle::KIND, compound.cycle_id));
        }
        Ok(self.compounds.add(compound))
    }

    pub fn update_compound(&mut self, compound: Compound) -> bool {
        self.compounds.update(compound)
    }

    pub fn delete_compound(&mut self, id: &str) -> bool {
        self.compounds.delete(id)
    }

    pub fn compounds_for_cycle(&self, cycle_id: &str) -> Vec<&Compound> {
        self.compounds.by_cycle_id(cycle_id)
    }
}
