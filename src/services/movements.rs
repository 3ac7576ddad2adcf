use crate::domain::lookup::{type_names, workstation_ids};
use crate::domain::movement::MOVEMENT_KINDS;
use crate::domain::types::{RecordId, SelectOption};
use crate::dto::forms::MovementFormOptions;
use crate::dto::listing::FilterOptions;
use crate::forms::movements::MovementForm;
use crate::listing::selection::Selection;
use crate::repository::{LookupReader, RecordWriter};
use crate::resources::Movements;
use crate::services::ServiceResult;

fn kind_options() -> Vec<SelectOption> {
    MOVEMENT_KINDS
        .iter()
        .map(|(code, label)| SelectOption::new(*label, code.to_string()))
        .collect()
}

/// Select options of the movement filter form: equipment types by name and
/// destinations by id.
pub async fn load_filter_options<B>(backend: &B) -> FilterOptions
where
    B: LookupReader + ?Sized,
{
    let (types, workstations) = tokio::join!(backend.list_equipment_types(), backend.list_workstations());

    let mut options = FilterOptions::new();
    match types {
        Ok(types) => {
            options.insert("type", type_names(&types));
        }
        Err(err) => log::warn!("Failed to load type options: {err}"),
    }
    match workstations {
        Ok(workstations) => {
            options.insert("destinationId", workstation_ids(&workstations));
        }
        Err(err) => log::warn!("Failed to load destination options: {err}"),
    }
    options
}

pub async fn load_form_options<B>(backend: &B) -> ServiceResult<MovementFormOptions>
where
    B: LookupReader + ?Sized,
{
    let workstations = backend.list_workstations().await.map_err(|err| {
        log::error!("Failed to load movement destinations: {err}");
        err
    })?;

    Ok(MovementFormOptions {
        destinations: workstation_ids(&workstations),
        kinds: kind_options(),
    })
}

/// Moves every selected piece of equipment in one request.
///
/// Refuses an empty selection before validating or sending anything.
pub async fn create_movement<B>(
    backend: &B,
    selection: &Selection,
    form: MovementForm,
) -> ServiceResult<()>
where
    B: RecordWriter + ?Sized,
{
    let equipments = selection.require_non_empty()?;
    let payload = form.into_new_movement(equipments)?;

    backend
        .create_record::<Movements>(&payload)
        .await
        .map_err(|err| {
            log::error!(
                "Failed to move {} equipment to {}: {err}",
                payload.equipments.len(),
                payload.destination_id
            );
            err
        })?;
    Ok(())
}

pub async fn delete_movement<B>(backend: &B, id: &RecordId) -> ServiceResult<()>
where
    B: RecordWriter + ?Sized,
{
    backend.delete_record::<Movements>(id).await.map_err(|err| {
        log::error!("Failed to delete movement {id}: {err}");
        err
    })?;
    Ok(())
}
