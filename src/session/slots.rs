//! Slot values captured during a dialogue flow.

use std::collections::HashMap;
use std::fmt;

/// A named piece of information a flow must collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    OrderId,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::OrderId => "order_id",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Captured slot values for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slots {
    values: HashMap<Slot, String>,
}

impl Slots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.values.get(&slot).map(|s| s.as_str())
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.values.contains_key(&slot)
    }

    pub fn set(&mut self, slot: Slot, value: impl Into<String>) {
        self.values.insert(slot, value.into());
    }

    pub fn remove(&mut self, slot: Slot) -> Option<String> {
        self.values.remove(&slot)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate as `(name, value)` pairs, e.g. `("order_id", "ORD1001")`.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
