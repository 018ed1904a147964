//! Factory registry
//!
//! Owns every [`Machine`], keyed by id. Iteration follows first-seen order so
//! reports are deterministic. The registry is not synchronized: callers run
//! one ingestion at a time against it.

use std::collections::HashMap;

use crate::machine::Machine;
use crate::sensor::SensorReading;

/// All machines on the floor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactoryRegistry {
    machines: Vec<Machine>,
    index: HashMap<String, usize>,
}

impl FactoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reading to a machine, creating the machine on first sight
    pub fn add_reading(&mut self, machine_id: &str, reading: SensorReading) {
        self.machine_mut(machine_id).add_reading(reading);
    }

    /// Get a machine, creating it if absent
    pub fn machine_mut(&mut self, machine_id: &str) -> &mut Machine {
        let slot = match self.index.get(machine_id).copied() {
            Some(slot) => slot,
            None => {
                let slot = self.machines.len();
                self.machines.push(Machine::new(machine_id));
                self.index.insert(machine_id.to_string(), slot);
                slot
            }
        };
        &mut self.machines[slot]
    }

    /// Look up a machine by id
    pub fn get(&self, machine_id: &str) -> Option<&Machine> {
        self.index.get(machine_id).map(|&slot| &self.machines[slot])
    }

    /// Whether a machine id is known
    pub fn contains(&self, machine_id: &str) -> bool {
        self.index.contains_key(machine_id)
    }

    /// Machines in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &Machine> {
        self.machines.iter()
    }

    /// Number of machines
    pub fn len(&self) -> usize {
        self.machines.len()
    }

    /// Whether the registry holds no machine
    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// Total readings across all machines
    pub fn reading_count(&self) -> usize {
        self.machines.iter().map(Machine::sensor_count).sum()
    }

    /// Drop every machine
    pub fn clear(&mut self) {
        self.machines.clear();
        self.index.clear();
    }

    /// Commit a staged registry into this one
    ///
    /// Readings are appended in the staged order; machines new to this
    /// registry are added after the existing ones.
    pub fn absorb(&mut self, staged: FactoryRegistry) {
        for machine in staged.machines {
            let target = self.machine_mut(machine.id());
            for reading in machine.into_readings() {
                target.add_reading(reading);
            }
        }
    }
}

impl<'a> IntoIterator for &'a FactoryRegistry {
    type Item = &'a Machine;
    type IntoIter = std::slice::Iter<'a, Machine>;

    fn into_iter(self) -> Self::IntoIter {
        self.machines.iter()
    }
}
