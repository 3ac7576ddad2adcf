use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::equipment::{
    Equipment, NewEquipment, POWERED_TYPES, TYPE_CPU, TYPE_MONITOR, UpdateEquipment,
};
use crate::domain::types::{RecordId, TippingNumber};
use crate::forms::{FormError, clean_text, digits_only, optional_text, required_error};
use crate::listing::filter::INPUT_DATE_FORMAT;

const MIN_ACQUISITION_YEAR: i32 = 1970;
const MAX_ACQUISITION_YEAR: i32 = 2100;

const CPU_FIELDS: &[&str] = &["ram_size", "storage_type", "storage_amount", "processor"];
const MONITOR_FIELDS: &[&str] = &["screen_type", "screen_size"];
const POWER_FIELDS: &[&str] = &["power"];

fn acquisition_year(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<i32>() {
        Ok(year) if (MIN_ACQUISITION_YEAR..=MAX_ACQUISITION_YEAR).contains(&year) => Ok(()),
        _ => Err(ValidationError::new("year").with_message("Select a valid year.".into())),
    }
}

fn input_date(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || NaiveDate::parse_from_str(value, INPUT_DATE_FORMAT).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("date").with_message("Invalid date.".into()))
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
/// Register and edit form for a piece of equipment.
///
/// Hardware fields only apply to some equipment types; they are required
/// for those types and discarded for the rest.
pub struct EquipmentForm {
    #[validate(
        length(min = 1, message = "Required field."),
        custom(function = "digits_only")
    )]
    pub tipping_number: String,
    #[validate(
        length(min = 1, message = "Required field."),
        custom(function = "digits_only")
    )]
    pub serial_number: String,
    #[validate(
        length(min = 1, max = 50, message = "Required, at most 50 characters."),
        custom(function = "digits_only")
    )]
    pub invoice_number: String,
    #[validate(length(min = 1, message = "Required field."))]
    pub equipment_type: String,
    #[validate(length(min = 1, message = "Required field."))]
    pub situation: String,
    #[validate(length(min = 1, message = "Required field."))]
    pub condition: String,
    #[validate(length(min = 1, max = 50, message = "Required, at most 50 characters."))]
    pub model: String,
    #[validate(length(min = 1, max = 50, message = "Required, at most 50 characters."))]
    pub brand_name: String,
    #[validate(length(min = 1, max = 50, message = "Required, at most 50 characters."))]
    pub acquisition_name: String,
    #[validate(custom(function = "acquisition_year"))]
    pub initial_use_date: String,
    #[serde(default)]
    #[validate(custom(function = "input_date"))]
    pub acquisition_date: String,
    #[serde(default)]
    pub unit_id: String,
    #[serde(default)]
    #[validate(custom(function = "digits_only"))]
    pub ram_size: String,
    #[serde(default)]
    pub storage_type: String,
    #[serde(default)]
    #[validate(custom(function = "digits_only"))]
    pub storage_amount: String,
    #[serde(default)]
    pub processor: String,
    #[serde(default)]
    pub screen_type: String,
    #[serde(default)]
    pub screen_size: String,
    #[serde(default)]
    #[validate(custom(function = "digits_only"))]
    pub power: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "At most 255 characters."))]
    pub description: String,
}

impl EquipmentForm {
    /// Hardware fields the selected type requires.
    fn type_fields(&self) -> &'static [&'static str] {
        let equipment_type = self.equipment_type.trim();
        if equipment_type == TYPE_CPU {
            CPU_FIELDS
        } else if equipment_type == TYPE_MONITOR {
            MONITOR_FIELDS
        } else if POWERED_TYPES.contains(&equipment_type) {
            POWER_FIELDS
        } else {
            &[]
        }
    }

    fn type_field(&self, name: &str) -> &str {
        match name {
            "ram_size" => &self.ram_size,
            "storage_type" => &self.storage_type,
            "storage_amount" => &self.storage_amount,
            "processor" => &self.processor,
            "screen_type" => &self.screen_type,
            "screen_size" => &self.screen_size,
            "power" => &self.power,
            _ => "",
        }
    }

    /// Runs the field validators plus the per-type required fields.
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);
        for &field in self.type_fields() {
            if self.type_field(field).trim().is_empty() {
                errors.add(field, required_error());
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Value of a hardware field when the type uses it.
    fn hardware(&self, name: &str) -> Option<String> {
        if self.type_fields().contains(&name) {
            optional_text(self.type_field(name))
        } else {
            None
        }
    }

    /// Validates the form and builds the create payload.
    pub fn into_new_equipment(self) -> Result<NewEquipment, FormError> {
        self.check()?;

        let tipping_number = TippingNumber::new(self.tipping_number.as_str())
            .map_err(|_| FormError::InvalidTippingNumber)?;
        let initial_use_date = self
            .initial_use_date
            .trim()
            .parse::<i32>()
            .map_err(|_| FormError::InvalidYear)?;
        let acquisition_date =
            NaiveDate::parse_from_str(self.acquisition_date.trim(), INPUT_DATE_FORMAT).ok();

        Ok(NewEquipment {
            tipping_number,
            serial_number: self.serial_number.trim().to_string(),
            invoice_number: self.invoice_number.trim().to_string(),
            equipment_type: clean_text(&self.equipment_type),
            situation: clean_text(&self.situation),
            condition: clean_text(&self.condition),
            model: clean_text(&self.model),
            brand_name: clean_text(&self.brand_name),
            acquisition_name: clean_text(&self.acquisition_name),
            initial_use_date,
            acquisition_date,
            unit_id: optional_text(&self.unit_id),
            description: optional_text(&self.description),
            screen_size: self.hardware("screen_size"),
            power: self.hardware("power"),
            screen_type: self.hardware("screen_type"),
            processor: self.hardware("processor"),
            storage_type: self.hardware("storage_type"),
            storage_amount: self.hardware("storage_amount"),
            ram_size: self.hardware("ram_size"),
        })
    }

    pub fn into_update_equipment(self, id: RecordId) -> Result<UpdateEquipment, FormError> {
        Ok(UpdateEquipment {
            id,
            fields: self.into_new_equipment()?,
        })
    }
}

impl From<&Equipment> for EquipmentForm {
    /// Pre-fills the edit form from a stored record.
    fn from(equipment: &Equipment) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let acquired = equipment.acquisition_date.map(|date| date.date_naive());

        Self {
            tipping_number: equipment.tipping_number.clone(),
            serial_number: equipment.serial_number.clone(),
            invoice_number: text(&equipment.invoice_number),
            equipment_type: equipment.equipment_type.name.clone(),
            situation: equipment.situation.clone(),
            condition: equipment.condition.clone(),
            model: equipment.model.clone(),
            brand_name: equipment.brand.name.clone(),
            acquisition_name: equipment.acquisition.name.clone(),
            initial_use_date: acquired
                .map(|date| date.year().to_string())
                .unwrap_or_default(),
            acquisition_date: acquired
                .map(|date| date.format(INPUT_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            unit_id: String::new(),
            ram_size: text(&equipment.ram_size),
            storage_type: text(&equipment.storage_type),
            storage_amount: text(&equipment.storage_amount),
            processor: text(&equipment.processor),
            screen_type: text(&equipment.screen_type),
            screen_size: text(&equipment.screen_size),
            power: text(&equipment.power),
            description: text(&equipment.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor_form() -> EquipmentForm {
        EquipmentForm {
            tipping_number: "1001".into(),
            serial_number: "555".into(),
            invoice_number: "77".into(),
            equipment_type: "Monitor".into(),
            situation: "Em uso".into(),
            condition: "Novo".into(),
            model: "P2422H".into(),
            brand_name: "Dell".into(),
            acquisition_name: "Compra".into(),
            initial_use_date: "2022".into(),
            acquisition_date: "2022-03-01".into(),
            screen_type: "LED".into(),
            screen_size: "24".into(),
            ram_size: "16".into(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_form_builds_payload_and_drops_foreign_hardware_fields() {
        let payload = monitor_form().into_new_equipment().unwrap();

        assert_eq!(payload.tipping_number.as_str(), "1001");
        assert_eq!(payload.initial_use_date, 2022);
        assert_eq!(payload.acquisition_date, NaiveDate::from_ymd_opt(2022, 3, 1));
        assert_eq!(payload.screen_size.as_deref(), Some("24"));
        assert_eq!(payload.ram_size, None);
        assert_eq!(payload.description, None);
    }

    #[test]
    fn non_digit_numbers_are_rejected_per_field() {
        let mut form = monitor_form();
        form.tipping_number = "10A1".into();
        form.serial_number = String::new();

        let err = form.into_new_equipment().unwrap_err();
        let fields = err.field_errors();

        assert_eq!(
            fields.get("tipping_number").map(String::as_str),
            Some("Only digits are allowed.")
        );
        assert_eq!(
            fields.get("serial_number").map(String::as_str),
            Some("Required field.")
        );
    }

    #[test]
    fn cpu_requires_its_hardware_fields() {
        let mut form = monitor_form();
        form.equipment_type = "CPU".into();
        form.ram_size = "16".into();

        let errors = form.check().unwrap_err();
        let fields = crate::forms::field_errors(&errors);

        assert!(fields.contains_key("processor"));
        assert!(fields.contains_key("storage_type"));
        assert!(fields.contains_key("storage_amount"));
        assert!(!fields.contains_key("ram_size"));
    }

    #[test]
    fn year_outside_range_is_rejected() {
        let mut form = monitor_form();
        form.initial_use_date = "1800".into();

        assert!(form.check().unwrap_err().field_errors().contains_key("initial_use_date"));
    }

    #[test]
    fn description_is_sanitized() {
        let mut form = monitor_form();
        form.description = "<b>bright</b><script>x</script>".into();

        let payload = form.into_new_equipment().unwrap();

        assert_eq!(payload.description.as_deref(), Some("<b>bright</b>"));
    }
}
