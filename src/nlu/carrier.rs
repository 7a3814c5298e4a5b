//! Carrier status normalization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical shipment status derived from free-text carrier events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarrierStatus {
    Created,
    PickedUp,
    InTransit,
    OutForDelivery,
    Delivered,
    Exception,
}

impl CarrierStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarrierStatus::Created => "created",
            CarrierStatus::PickedUp => "picked_up",
            CarrierStatus::InTransit => "in_transit",
            CarrierStatus::OutForDelivery => "out_for_delivery",
            CarrierStatus::Delivered => "delivered",
            CarrierStatus::Exception => "exception",
        }
    }

    /// Human form with spaces, e.g. "out for delivery".
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for CarrierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a raw carrier status string onto [`CarrierStatus`].
///
/// Rules are checked in order; anything unrecognized counts as in transit.
pub fn normalize_carrier_status(raw: &str) -> CarrierStatus {
    if raw.is_empty() {
        return CarrierStatus::Created;
    }
    let raw = raw.to_lowercase();
    if raw.contains("pick") {
        CarrierStatus::PickedUp
    } else if raw.contains("transit") {
        CarrierStatus::InTransit
    } else if raw.contains("out for") {
        CarrierStatus::OutForDelivery
    } else if raw.contains("deliver") {
        CarrierStatus::Delivered
    } else if raw.contains("exception") || raw.contains("delay") {
        CarrierStatus::Exception
    } else {
        CarrierStatus::InTransit
    }
}
