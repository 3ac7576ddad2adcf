//! Binds each record type to its backend endpoints, filter schema and row
//! actions.

use crate::domain::equipment::{Equipment, NewEquipment, UpdateEquipment};
use crate::domain::movement::{Movement, NewMovement};
use crate::domain::order_service::{NewOrderService, OrderService, UpdateOrderService};
use crate::listing::Resource;
use crate::listing::filter::FilterField;
use crate::listing::pager::PagingStyle;
use crate::listing::view::RowAction;
use crate::repository::{Creatable, Deletable, Updatable};

/// Equipment inventory.
pub struct Equipments;

impl Resource for Equipments {
    type Record = Equipment;

    const NAME: &'static str = "equipment";
    const LIST_ENDPOINT: &'static str = "equipment/find";
    const EXPORT_ENDPOINT: &'static str = "equipment/report";
    const PAGING: PagingStyle = PagingStyle::TAKE_SKIP;
    const SEARCH_FIELD: &'static str = "search";
    const FILTERS: &'static [FilterField] = &[
        FilterField::text("search", "Search"),
        FilterField::select("type", "Type"),
        FilterField::date("updatedAt", "Last modified"),
        FilterField::select("situation", "Situation"),
        FilterField::select("unit", "Workstation"),
        FilterField::select("model", "Model"),
        FilterField::select("brand", "Brand"),
        FilterField::select("ram_size", "RAM"),
        FilterField::select("processor", "Processor"),
        FilterField::select("power", "Power"),
        FilterField::select("storageType", "Storage type"),
        FilterField::date("initialDate", "Acquired from"),
        FilterField::date("finalDate", "Acquired until"),
        FilterField::select("screenSize", "Screen size"),
        FilterField::select("screenType", "Screen type"),
        FilterField::select("acquisitionYear", "Acquisition year"),
        FilterField::select("acquisition", "Acquisition"),
    ];
    const ROW_ACTIONS: &'static [RowAction] = &[
        RowAction::ToggleSelection,
        RowAction::View,
        RowAction::Edit,
    ];
    const FETCH_FAILED: &'static str = "No equipment found.";
}

impl Creatable for Equipments {
    type New = NewEquipment;
    const CREATE_ENDPOINT: &'static str = "equipment/createEquipment";
}

impl Updatable for Equipments {
    type Update = UpdateEquipment;
    const UPDATE_ENDPOINT: &'static str = "equipment/updateEquipment";
}

/// Equipment movements between workstations.
pub struct Movements;

impl Resource for Movements {
    type Record = Movement;

    const NAME: &'static str = "movements";
    const LIST_ENDPOINT: &'static str = "equipment/findMovements";
    const EXPORT_ENDPOINT: &'static str = "equipment/movementReport";
    const PAGING: PagingStyle = PagingStyle::RESULT_QUANTITY;
    const SEARCH_FIELD: &'static str = "searchTerm";
    const FILTERS: &'static [FilterField] = &[
        FilterField::text("searchTerm", "Search"),
        FilterField::select("type", "Type"),
        FilterField::text("inChargeName", "Person in charge"),
        FilterField::select("destinationId", "Destination"),
        FilterField::text("equipmentId", "Equipment"),
        FilterField::date("lowerDate", "From"),
        FilterField::date("higherDate", "Until"),
    ];
    const ROW_ACTIONS: &'static [RowAction] =
        &[RowAction::View, RowAction::Print, RowAction::Delete];
    const FETCH_FAILED: &'static str = "Could not load movements.";
}

impl Creatable for Movements {
    type New = NewMovement;
    const CREATE_ENDPOINT: &'static str = "equipment/createMovement";
}

impl Deletable for Movements {
    const DELETE_ENDPOINT: &'static str = "equipment/deleteMovement";
}

/// Maintenance order services.
pub struct OrderServices;

impl Resource for OrderServices {
    type Record = OrderService;

    const NAME: &'static str = "order-services";
    const LIST_ENDPOINT: &'static str = "equipment/listOrderService";
    const EXPORT_ENDPOINT: &'static str = "order-service/report";
    const PAGING: PagingStyle = PagingStyle::TAKE_SKIP;
    const SEARCH_FIELD: &'static str = "search";
    const FILTERS: &'static [FilterField] = &[
        FilterField::text("search", "Search"),
        FilterField::select("type", "Type"),
        FilterField::date("createdAt", "Created"),
        FilterField::date("updatedAt", "Updated"),
        FilterField::date("finishDate", "Finished"),
        FilterField::select("status", "Status"),
        FilterField::select("unit", "Workstation"),
        FilterField::select("brand", "Brand"),
        FilterField::select("model", "Model"),
        FilterField::select("technicianName", "Technician"),
        FilterField::select("senderName", "Sender"),
        FilterField::select("withdrawalName", "Withdrawn by"),
    ];
    const ROW_ACTIONS: &'static [RowAction] = &[RowAction::Edit, RowAction::Print];
    const FETCH_FAILED: &'static str = "No order service found.";
}

impl Creatable for OrderServices {
    type New = NewOrderService;
    const CREATE_ENDPOINT: &'static str = "order-service/createOrderService";
}

impl Updatable for OrderServices {
    type Update = UpdateOrderService;
    const UPDATE_ENDPOINT: &'static str = "order-service/updateOrderService";
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn assert_unique_filters<R: Resource>() {
        let names: HashSet<_> = R::FILTERS.iter().map(|f| f.name).collect();
        assert_eq!(names.len(), R::FILTERS.len(), "{} has duplicate filters", R::NAME);
        assert!(
            names.contains(R::SEARCH_FIELD),
            "{} search field missing from schema",
            R::NAME
        );
    }

    #[test]
    fn schemas_are_consistent() {
        assert_unique_filters::<Equipments>();
        assert_unique_filters::<Movements>();
        assert_unique_filters::<OrderServices>();
    }
}
