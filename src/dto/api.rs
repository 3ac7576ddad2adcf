//! DTOs exposed by the JSON API endpoints.

use serde::Serialize;

use crate::domain::equipment::Equipment;
use crate::domain::types::RecordId;

/// Equipment suggestion returned by `/api/equipment/lookup`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EquipmentLookupItem {
    pub id: RecordId,
    pub tipping_number: String,
    pub serial_number: String,
    pub equipment_type: String,
    pub brand: String,
    pub model: String,
    pub situation: String,
    /// Workstation localization, empty when the equipment is not installed.
    pub unit: String,
}

impl From<Equipment> for EquipmentLookupItem {
    fn from(equipment: Equipment) -> Self {
        Self {
            id: equipment.id,
            tipping_number: equipment.tipping_number,
            serial_number: equipment.serial_number,
            equipment_type: equipment.equipment_type.name,
            brand: equipment.brand.name,
            model: equipment.model,
            situation: equipment.situation,
            unit: equipment
                .unit
                .map(|unit| unit.localization)
                .unwrap_or_default(),
        }
    }
}
