use chrono::{Datelike, Utc};

use crate::domain::equipment::{CONDITIONS, Equipment, SCREEN_TYPES, SITUATIONS, STORAGE_TYPES};
use crate::domain::lookup::{
    brand_options, distinct_options, type_names, type_options, workstation_ids, workstation_names,
};
use crate::domain::types::{RecordId, SelectOption};
use crate::dto::forms::EquipmentFormOptions;
use crate::dto::listing::FilterOptions;
use crate::forms::equipment::EquipmentForm;
use crate::listing::query::EncodedQuery;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ListQuery, LookupReader, RecordReader, RecordWriter};
use crate::resources::Equipments;
use crate::services::ServiceResult;

/// Years offered by the acquisition year select, newest first.
const ACQUISITION_YEARS: i32 = 30;

/// Logs a failed lookup and falls back to an empty list.
fn or_empty<T>(result: RepositoryResult<Vec<T>>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|err| {
        log::warn!("Failed to load {what} options: {err}");
        Vec::new()
    })
}

fn distinct_by(
    equipment: &[Equipment],
    pick: fn(&Equipment) -> Option<&str>,
) -> Vec<SelectOption> {
    distinct_options(equipment.iter().map(pick))
}

fn acquisition_years() -> Vec<SelectOption> {
    let current = Utc::now().year();
    (current - ACQUISITION_YEARS..=current)
        .rev()
        .map(|year| SelectOption::same(year.to_string()))
        .collect()
}

/// Builds the select options of the equipment filter form.
///
/// Value lists come from the whole inventory; lookups that fail leave their
/// select empty instead of failing the page.
pub async fn load_filter_options<B>(backend: &B) -> FilterOptions
where
    B: RecordReader + LookupReader + ?Sized,
{
    let all = ListQuery::unpaged(EncodedQuery::default());
    let (equipment, brands, types, workstations) = tokio::join!(
        backend.list_records::<Equipments>(&all),
        backend.list_brands(),
        backend.list_equipment_types(),
        backend.list_workstations(),
    );
    let equipment = or_empty(equipment, "equipment");

    let mut options = FilterOptions::new();
    options.insert("type", type_options(&or_empty(types, "type")));
    options.insert("situation", SelectOption::from_pairs(SITUATIONS));
    options.insert("unit", workstation_names(&or_empty(workstations, "workstation")));
    options.insert("model", distinct_by(&equipment, |e| Some(e.model.as_str())));
    options.insert("brand", brand_options(&or_empty(brands, "brand")));
    options.insert("ram_size", distinct_by(&equipment, |e| e.ram_size.as_deref()));
    options.insert("processor", distinct_by(&equipment, |e| e.processor.as_deref()));
    options.insert("power", distinct_by(&equipment, |e| e.power.as_deref()));
    options.insert("storageType", distinct_by(&equipment, |e| e.storage_type.as_deref()));
    options.insert("screenSize", distinct_by(&equipment, |e| e.screen_size.as_deref()));
    options.insert("screenType", distinct_by(&equipment, |e| e.screen_type.as_deref()));
    options.insert("acquisitionYear", acquisition_years());
    options.insert(
        "acquisition",
        distinct_by(&equipment, |e| Some(e.acquisition.name.as_str())),
    );
    options
}

/// Loads the select options of the register and edit forms.
pub async fn load_form_options<B>(backend: &B) -> ServiceResult<EquipmentFormOptions>
where
    B: LookupReader + ?Sized,
{
    let (brands, types, workstations) = tokio::join!(
        backend.list_brands(),
        backend.list_equipment_types(),
        backend.list_workstations(),
    );
    let log_err = |err: RepositoryError| {
        log::error!("Failed to load equipment form options: {err}");
        err
    };

    Ok(EquipmentFormOptions {
        types: type_names(&types.map_err(log_err)?),
        brands: brands
            .map_err(log_err)?
            .into_iter()
            .map(|brand| SelectOption::same(brand.name))
            .collect(),
        workstations: workstation_ids(&workstations.map_err(log_err)?),
        situations: SelectOption::from_pairs(SITUATIONS),
        conditions: SelectOption::from_pairs(CONDITIONS),
        storage_types: SelectOption::from_pairs(STORAGE_TYPES),
        screen_types: SelectOption::from_pairs(SCREEN_TYPES),
        years: acquisition_years(),
    })
}

/// Validates the form and registers the equipment.
pub async fn create_equipment<B>(backend: &B, form: EquipmentForm) -> ServiceResult<()>
where
    B: RecordWriter + ?Sized,
{
    let payload = form.into_new_equipment()?;
    backend
        .create_record::<Equipments>(&payload)
        .await
        .map_err(|err| {
            log::error!("Failed to create equipment {}: {err}", payload.tipping_number);
            err
        })?;
    Ok(())
}

/// Validates the form and saves it over equipment `id`.
pub async fn update_equipment<B>(
    backend: &B,
    id: RecordId,
    form: EquipmentForm,
) -> ServiceResult<()>
where
    B: RecordWriter + ?Sized,
{
    let payload = form.into_update_equipment(id)?;
    backend
        .update_record::<Equipments>(&payload)
        .await
        .map_err(|err| {
            log::error!("Failed to update equipment {}: {err}", payload.id);
            err
        })?;
    Ok(())
}
