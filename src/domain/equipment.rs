use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Record;
use crate::domain::lookup::{NamedRef, Unit};
use crate::domain::types::{RecordId, TippingNumber};

/// Equipment types whose hardware fields are tracked.
pub const TYPE_CPU: &str = "CPU";
pub const TYPE_MONITOR: &str = "Monitor";
pub const POWERED_TYPES: &[&str] = &["Estabilizador", "Nobreak"];

/// `(value, label)` pairs offered by the register form.
pub const SITUATIONS: &[(&str, &str)] = &[
    ("Disponível", "Available"),
    ("Em uso", "In use"),
    ("Em manutenção", "In maintenance"),
    ("Desativado", "Decommissioned"),
];
pub const CONDITIONS: &[(&str, &str)] = &[
    ("Novo", "New"),
    ("Bom", "Good"),
    ("Regular", "Fair"),
    ("Inservível", "Unusable"),
];
pub const STORAGE_TYPES: &[(&str, &str)] = &[("HD", "HD"), ("SSD", "SSD")];
pub const SCREEN_TYPES: &[(&str, &str)] = &[("LCD", "LCD"), ("LED", "LED")];

/// Inventory item as returned by the backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: RecordId,
    pub tipping_number: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(rename = "type", default)]
    pub equipment_type: NamedRef,
    /// Administrative situation (in use, available, ...).
    #[serde(rename = "situacao", default)]
    pub situation: String,
    /// Physical condition.
    #[serde(rename = "estado", default)]
    pub condition: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub acquisition_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub screen_size: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub screen_type: Option<String>,
    #[serde(default)]
    pub processor: Option<String>,
    #[serde(default)]
    pub storage_type: Option<String>,
    #[serde(default)]
    pub storage_amount: Option<String>,
    #[serde(rename = "ram_size", default)]
    pub ram_size: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub brand: NamedRef,
    #[serde(default)]
    pub acquisition: NamedRef,
    #[serde(default)]
    pub unit: Option<Unit>,
}

impl Record for Equipment {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

/// Payload for `equipment/createEquipment`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewEquipment {
    pub tipping_number: TippingNumber,
    pub serial_number: String,
    pub invoice_number: String,
    #[serde(rename = "type")]
    pub equipment_type: String,
    #[serde(rename = "situacao")]
    pub situation: String,
    #[serde(rename = "estado")]
    pub condition: String,
    pub model: String,
    pub brand_name: String,
    pub acquisition_name: String,
    /// Year the equipment was first put to use.
    pub initial_use_date: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquisition_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_amount: Option<String>,
    #[serde(rename = "ram_size", skip_serializing_if = "Option::is_none")]
    pub ram_size: Option<String>,
}

/// Payload for `equipment/updateEquipment`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipment {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: NewEquipment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_payload_with_missing_optionals() {
        let json = r#"{
            "id": "e1",
            "tippingNumber": "1001",
            "serialNumber": "SN-1",
            "type": { "name": "Monitor" },
            "situacao": "Em uso",
            "estado": "Novo",
            "model": "P2422H",
            "ram_size": null,
            "updatedAt": "2024-02-01T12:00:00.000Z",
            "brand": { "name": "Dell" },
            "acquisition": { "name": "Compra" },
            "unit": { "name": "Lab", "localization": "Block A" }
        }"#;

        let equipment: Equipment = serde_json::from_str(json).unwrap();

        assert_eq!(equipment.record_id().as_str(), "e1");
        assert_eq!(equipment.equipment_type.name, "Monitor");
        assert_eq!(equipment.situation, "Em uso");
        assert_eq!(equipment.ram_size, None);
        assert!(equipment.updated_at.is_some());
        assert_eq!(equipment.unit.unwrap().localization, "Block A");
    }

    #[test]
    fn update_payload_flattens_fields_next_to_id() {
        let payload = UpdateEquipment {
            id: RecordId::new("e1").unwrap(),
            fields: NewEquipment {
                tipping_number: TippingNumber::new("1001").unwrap(),
                serial_number: "SN-1".into(),
                invoice_number: "77".into(),
                equipment_type: "Monitor".into(),
                situation: "Em uso".into(),
                condition: "Novo".into(),
                model: "P2422H".into(),
                brand_name: "Dell".into(),
                acquisition_name: "Compra".into(),
                initial_use_date: 2022,
                acquisition_date: NaiveDate::from_ymd_opt(2022, 3, 1),
                unit_id: None,
                description: None,
                screen_size: Some("24".into()),
                power: None,
                screen_type: None,
                processor: None,
                storage_type: None,
                storage_amount: None,
                ram_size: None,
            },
        };

        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["id"], "e1");
        assert_eq!(value["tippingNumber"], "1001");
        assert_eq!(value["type"], "Monitor");
        assert_eq!(value["screenSize"], "24");
        assert_eq!(value["acquisitionDate"], "2022-03-01");
        assert!(value.get("power").is_none());
    }
}
