use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Record;
use crate::domain::lookup::{NamedRef, Unit};
use crate::domain::types::{RecordId, TippingNumber};

/// `(value, label)` pairs for the ticket status.
pub const STATUSES: &[(&str, &str)] = &[
    ("MAINTENANCE", "In maintenance"),
    ("WARRANTY", "Under warranty"),
    ("CONCLUDED", "Concluded"),
];

/// Equipment summary embedded in an order service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServicedEquipment {
    pub id: RecordId,
    pub tipping_number: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand: NamedRef,
    #[serde(rename = "type", default)]
    pub equipment_type: NamedRef,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub unit: Option<Unit>,
}

/// Maintenance ticket for a piece of equipment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderService {
    pub id: RecordId,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub sender_functional_number: String,
    #[serde(default)]
    pub withdrawal_name: String,
    #[serde(default)]
    pub withdrawal_document: String,
    #[serde(default)]
    pub technician_id: Option<String>,
    #[serde(default)]
    pub technician_name: String,
    #[serde(default)]
    pub sei_process: String,
    #[serde(default)]
    pub status: String,
    pub equipment: ServicedEquipment,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finish_date: Option<DateTime<Utc>>,
}

impl Record for OrderService {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

/// Payload for `order-service/createOrderService`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderService {
    pub tipping_number: TippingNumber,
    pub sender_name: String,
    pub sender_functional_number: String,
    pub withdrawal_name: String,
    pub withdrawal_document: String,
    pub technician_name: String,
    pub sei_process: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for `order-service/updateOrderService`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderService {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: NewOrderService,
}
