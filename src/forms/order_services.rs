use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::order_service::{NewOrderService, OrderService, STATUSES, UpdateOrderService};
use crate::domain::types::{RecordId, TippingNumber};
use crate::forms::{FormError, clean_text, digits_only, optional_text};

fn known_status(value: &str) -> Result<(), ValidationError> {
    if STATUSES.iter().any(|(status, _)| *status == value) {
        Ok(())
    } else {
        Err(ValidationError::new("status").with_message("Select a status.".into()))
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
/// Register and edit form for an order service.
pub struct OrderServiceForm {
    /// Tipping number of the serviced equipment, picked through the lookup.
    #[validate(
        length(min = 1, message = "Select the equipment."),
        custom(function = "digits_only")
    )]
    pub tipping_number: String,
    #[validate(length(min = 1, max = 100, message = "Required, at most 100 characters."))]
    pub sender_name: String,
    #[validate(
        length(min = 1, max = 20, message = "Required, at most 20 characters."),
        custom(function = "digits_only")
    )]
    pub sender_functional_number: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "At most 100 characters."))]
    pub withdrawal_name: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "At most 50 characters."))]
    pub withdrawal_document: String,
    #[validate(length(min = 1, max = 100, message = "Required, at most 100 characters."))]
    pub technician_name: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "At most 50 characters."))]
    pub sei_process: String,
    #[validate(custom(function = "known_status"))]
    pub status: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "At most 255 characters."))]
    pub description: String,
}

impl OrderServiceForm {
    pub fn into_new_order_service(self) -> Result<NewOrderService, FormError> {
        self.validate()?;

        let tipping_number = TippingNumber::new(self.tipping_number.as_str())
            .map_err(|_| FormError::InvalidTippingNumber)?;

        Ok(NewOrderService {
            tipping_number,
            sender_name: clean_text(&self.sender_name),
            sender_functional_number: self.sender_functional_number.trim().to_string(),
            withdrawal_name: clean_text(&self.withdrawal_name),
            withdrawal_document: clean_text(&self.withdrawal_document),
            technician_name: clean_text(&self.technician_name),
            sei_process: clean_text(&self.sei_process),
            status: self.status,
            description: optional_text(&self.description),
        })
    }

    pub fn into_update_order_service(
        self,
        id: RecordId,
    ) -> Result<UpdateOrderService, FormError> {
        Ok(UpdateOrderService {
            id,
            fields: self.into_new_order_service()?,
        })
    }
}

impl From<&OrderService> for OrderServiceForm {
    fn from(ticket: &OrderService) -> Self {
        Self {
            tipping_number: ticket.equipment.tipping_number.clone(),
            sender_name: ticket.sender_name.clone(),
            sender_functional_number: ticket.sender_functional_number.clone(),
            withdrawal_name: ticket.withdrawal_name.clone(),
            withdrawal_document: ticket.withdrawal_document.clone(),
            technician_name: ticket.technician_name.clone(),
            sei_process: ticket.sei_process.clone(),
            status: ticket.status.clone(),
            description: ticket.description.clone().unwrap_or_default(),
        }
    }
}
