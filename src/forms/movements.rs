use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::movement::NewMovement;
use crate::domain::types::RecordId;
use crate::forms::{FormError, clean_text, optional_text};

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
/// Batch movement of the selected equipment to a workstation.
pub struct MovementForm {
    #[validate(length(min = 1, message = "Select a destination."))]
    pub destination_id: String,
    #[serde(default)]
    #[validate(range(min = 0, max = 3, message = "Select a movement type."))]
    pub kind: i32,
    #[validate(length(min = 1, max = 100, message = "Required, at most 100 characters."))]
    pub in_charge_name: String,
    #[validate(length(min = 1, max = 100, message = "Required, at most 100 characters."))]
    pub in_charge_role: String,
    #[validate(length(min = 1, max = 100, message = "Required, at most 100 characters."))]
    pub chief_name: String,
    #[validate(length(min = 1, max = 100, message = "Required, at most 100 characters."))]
    pub chief_role: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "At most 255 characters."))]
    pub description: String,
}

impl MovementForm {
    /// Validates the form and attaches the equipment being moved.
    pub fn into_new_movement(self, equipments: Vec<RecordId>) -> Result<NewMovement, FormError> {
        self.validate()?;

        Ok(NewMovement {
            equipments,
            destination_id: self.destination_id.trim().to_string(),
            kind: self.kind,
            in_charge_name: clean_text(&self.in_charge_name),
            in_charge_role: clean_text(&self.in_charge_role),
            chief_name: clean_text(&self.chief_name),
            chief_role: clean_text(&self.chief_role),
            description: optional_text(&self.description),
        })
    }
}
