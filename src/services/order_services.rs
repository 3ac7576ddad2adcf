use crate::domain::lookup::{brand_options, distinct_options, type_options, workstation_names};
use crate::domain::order_service::{OrderService, STATUSES};
use crate::domain::types::{RecordId, SelectOption};
use crate::dto::api::EquipmentLookupItem;
use crate::dto::forms::OrderServiceFormOptions;
use crate::dto::listing::FilterOptions;
use crate::forms::order_services::OrderServiceForm;
use crate::listing::query::EncodedQuery;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ListQuery, LookupReader, RecordReader, RecordWriter};
use crate::resources::OrderServices;
use crate::services::ServiceResult;

/// Suggestions returned per equipment lookup.
pub const LOOKUP_LIMIT: usize = 5;

fn or_empty<T>(result: RepositoryResult<Vec<T>>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|err| {
        log::warn!("Failed to load {what} options: {err}");
        Vec::new()
    })
}

fn distinct_by(tickets: &[OrderService], pick: fn(&OrderService) -> &str) -> Vec<SelectOption> {
    distinct_options(tickets.iter().map(|ticket| Some(pick(ticket))))
}

/// Select options of the order-service filter form.
///
/// People and models are the distinct values found across every ticket.
pub async fn load_filter_options<B>(backend: &B) -> FilterOptions
where
    B: RecordReader + LookupReader + ?Sized,
{
    let all = ListQuery::unpaged(EncodedQuery::default());
    let (tickets, brands, types, workstations) = tokio::join!(
        backend.list_records::<OrderServices>(&all),
        backend.list_brands(),
        backend.list_equipment_types(),
        backend.list_workstations(),
    );
    let tickets = or_empty(tickets, "order service");

    let mut options = FilterOptions::new();
    options.insert("type", type_options(&or_empty(types, "type")));
    options.insert("status", SelectOption::from_pairs(STATUSES));
    options.insert("unit", workstation_names(&or_empty(workstations, "workstation")));
    options.insert("brand", brand_options(&or_empty(brands, "brand")));
    options.insert("model", distinct_by(&tickets, |t| t.equipment.model.as_str()));
    options.insert(
        "technicianName",
        distinct_by(&tickets, |t| t.technician_name.as_str()),
    );
    options.insert("senderName", distinct_by(&tickets, |t| t.sender_name.as_str()));
    options.insert(
        "withdrawalName",
        distinct_by(&tickets, |t| t.withdrawal_name.as_str()),
    );
    options
}

pub fn load_form_options() -> OrderServiceFormOptions {
    OrderServiceFormOptions {
        statuses: SelectOption::from_pairs(STATUSES),
    }
}

/// Equipment whose tipping number matches what was typed so far.
///
/// Blank input returns nothing without asking the backend.
pub async fn lookup_equipment<B>(backend: &B, term: &str) -> ServiceResult<Vec<EquipmentLookupItem>>
where
    B: LookupReader + ?Sized,
{
    let term = term.trim();
    if term.is_empty() {
        return Ok(Vec::new());
    }

    let found = backend
        .find_equipment_by_tipping(term, LOOKUP_LIMIT)
        .await
        .map_err(|err| {
            log::error!("Equipment lookup for {term} failed: {err}");
            err
        })?;

    Ok(found.into_iter().map(EquipmentLookupItem::from).collect())
}

pub async fn create_order_service<B>(backend: &B, form: OrderServiceForm) -> ServiceResult<()>
where
    B: RecordWriter + ?Sized,
{
    let payload = form.into_new_order_service()?;
    backend
        .create_record::<OrderServices>(&payload)
        .await
        .map_err(|err| {
            log::error!(
                "Failed to open order service for {}: {err}",
                payload.tipping_number
            );
            err
        })?;
    Ok(())
}

pub async fn update_order_service<B>(
    backend: &B,
    id: RecordId,
    form: OrderServiceForm,
) -> ServiceResult<()>
where
    B: RecordWriter + ?Sized,
{
    let payload = form.into_update_order_service(id)?;
    backend
        .update_record::<OrderServices>(&payload)
        .await
        .map_err(|err| {
            log::error!("Failed to update order service {}: {err}", payload.id);
            err
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::repository::test::InMemoryBackend;
    use crate::services::ServiceError;

    fn ticket(id: &str, sender: &str, technician: &str, model: &str) -> serde_json::Value {
        json!({
            "id": id,
            "senderName": sender,
            "technicianName": technician,
            "equipment": { "id": format!("e-{id}"), "tippingNumber": "1", "model": model }
        })
    }

    #[tokio::test]
    async fn filter_options_collect_people_and_models() {
        let backend = InMemoryBackend::default();
        backend.seed(
            "equipment/listOrderService",
            [
                ticket("os1", "Carla", "Leo", "T14"),
                ticket("os2", "Carla", "Bia", "T14"),
                ticket("os3", "Davi", "", "X1"),
            ],
        );

        let options = load_filter_options(&backend).await;
        let values = |name: &str| -> Vec<String> {
            options[name].iter().map(|o| o.value.clone()).collect()
        };

        assert_eq!(values("senderName"), vec!["Carla", "Davi"]);
        assert_eq!(values("technicianName"), vec!["Leo", "Bia"]);
        assert_eq!(values("model"), vec!["T14", "X1"]);
        assert!(values("withdrawalName").is_empty());
        assert_eq!(values("status").len(), STATUSES.len());
    }

    #[tokio::test]
    async fn lookup_skips_blank_terms_and_caps_results() {
        let backend = InMemoryBackend::default();
        backend.seed(
            "equipment/find",
            (0..8).map(|n| json!({ "id": format!("e{n}"), "tippingNumber": format!("10{n}") })),
        );

        assert!(lookup_equipment(&backend, "  ").await.unwrap().is_empty());

        let found = lookup_equipment(&backend, "10").await.unwrap();
        assert_eq!(found.len(), LOOKUP_LIMIT);
        assert_eq!(found[0].tipping_number, "100");
    }

    #[tokio::test]
    async fn failed_create_is_a_repository_error() {
        let backend = InMemoryBackend::default();
        backend.set_failing(true);
        let form = OrderServiceForm {
            tipping_number: "1001".into(),
            sender_name: "Carla".into(),
            sender_functional_number: "4411".into(),
            technician_name: "Leo".into(),
            status: "MAINTENANCE".into(),
            ..Default::default()
        };

        let result = create_order_service(&backend, form).await;

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }
}
