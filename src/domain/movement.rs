use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Record;
use crate::domain::lookup::{NamedRef, Unit};
use crate::domain::types::RecordId;

/// `(code, label)` pairs for the movement kind.
pub const MOVEMENT_KINDS: &[(i32, &str)] = &[
    (0, "Transfer"),
    (1, "Loan"),
    (2, "Return"),
    (3, "Write-off"),
];

/// Display label of a movement kind code.
pub fn kind_label(kind: i32) -> &'static str {
    MOVEMENT_KINDS
        .iter()
        .find(|(code, _)| *code == kind)
        .map(|(_, label)| *label)
        .unwrap_or("Other")
}

/// Equipment summary embedded in a movement.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovementEquipment {
    pub id: RecordId,
    pub tipping_number: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub brand: NamedRef,
    #[serde(rename = "type", default)]
    pub equipment_type: NamedRef,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Transfer of one or more pieces of equipment to a workstation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: RecordId,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Movement kind code as defined by the backend.
    #[serde(rename = "type", default)]
    pub kind: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub in_charge_name: String,
    #[serde(default)]
    pub in_charge_role: String,
    #[serde(default)]
    pub chief_name: String,
    #[serde(default)]
    pub chief_role: String,
    #[serde(default)]
    pub destination: Unit,
    #[serde(default)]
    pub equipments: Vec<MovementEquipment>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Movement {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

/// Payload for `equipment/createMovement`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMovement {
    pub equipments: Vec<RecordId>,
    pub destination_id: String,
    #[serde(rename = "type")]
    pub kind: i32,
    pub in_charge_name: String,
    pub in_charge_role: String,
    pub chief_name: String,
    pub chief_role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
