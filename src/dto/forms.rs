//! DTOs shaped for the register and edit templates.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::types::SelectOption;

/// Select options offered by the equipment form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EquipmentFormOptions {
    pub types: Vec<SelectOption>,
    pub brands: Vec<SelectOption>,
    pub workstations: Vec<SelectOption>,
    pub situations: Vec<SelectOption>,
    pub conditions: Vec<SelectOption>,
    pub storage_types: Vec<SelectOption>,
    pub screen_types: Vec<SelectOption>,
    pub years: Vec<SelectOption>,
}

/// Select options offered by the movement form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MovementFormOptions {
    pub destinations: Vec<SelectOption>,
    pub kinds: Vec<SelectOption>,
}

/// Select options offered by the order-service form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderServiceFormOptions {
    pub statuses: Vec<SelectOption>,
}

/// A form page: the submitted or stored values, their errors and options.
#[derive(Debug, Serialize)]
pub struct FormPage<F, O> {
    pub form: F,
    pub errors: BTreeMap<String, String>,
    pub options: O,
}

impl<F, O> FormPage<F, O> {
    pub fn new(form: F, options: O) -> Self {
        Self {
            form,
            errors: BTreeMap::new(),
            options,
        }
    }

    pub fn with_errors(mut self, errors: BTreeMap<String, String>) -> Self {
        self.errors = errors;
        self
    }
}
