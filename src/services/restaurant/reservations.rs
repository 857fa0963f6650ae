use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{info, warn};

use super::{RestaurantService, bad_request, table_not_found};
use crate::models::{
    ApiResponse, ErrorCode,
    restaurant::{
        CreateReservationRequest, DiningTable, ReservationListQuery, ReservationStatus,
        TableStatus, UpdateReservationRequest,
    },
};
use crate::services::Caller;
use crate::storage::Storage;

fn reservation_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ReservationNotFound,
        "Reservation not found",
    ))
}

fn validate_party(party_size: i32, table: Option<&DiningTable>) -> Result<(), &'static str> {
    if party_size < 1 {
        return Err("Party size must be at least 1");
    }
    if table.is_some_and(|t| party_size > t.capacity) {
        return Err("Party size exceeds table capacity");
    }
    Ok(())
}

fn trim_opt(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableChange {
    /// 预留中的餐桌放回可用
    Release(i64),
    /// 空闲餐桌改为预留
    Reserve(i64),
    Occupy(i64),
}

/// 预订修改后餐桌需要的状态变化：换桌时先释放原餐桌
fn table_changes(
    previous: Option<i64>,
    next: Option<i64>,
    status: ReservationStatus,
) -> Vec<TableChange> {
    let mut changes = Vec::new();
    let moved = previous != next;
    if moved && let Some(old) = previous {
        changes.push(TableChange::Release(old));
    }
    if let Some(table_id) = next {
        match status {
            ReservationStatus::Seated => changes.push(TableChange::Occupy(table_id)),
            ReservationStatus::Cancelled | ReservationStatus::NoShow => {
                changes.push(TableChange::Release(table_id))
            }
            ReservationStatus::Booked if moved => changes.push(TableChange::Reserve(table_id)),
            ReservationStatus::Booked => {}
        }
    }
    changes
}

async fn apply_table_change(storage: &Arc<dyn Storage>, business_id: i64, change: TableChange) {
    let (table_id, from, to) = match change {
        TableChange::Release(id) => (id, Some(TableStatus::Reserved), TableStatus::Available),
        TableChange::Reserve(id) => (id, Some(TableStatus::Available), TableStatus::Reserved),
        TableChange::Occupy(id) => (id, None, TableStatus::Occupied),
    };
    match storage.get_table(business_id, table_id).await {
        Ok(Some(table)) if table.status != to && from.is_none_or(|s| s == table.status) => {
            if let Err(e) = storage.set_table_status(business_id, table_id, to).await {
                warn!("Failed to set table {} to {}: {}", table_id, to, e);
            }
        }
        Ok(_) => {}
        Err(e) => warn!("Failed to load table {}: {}", table_id, e),
    }
}

pub async fn create_reservation(
    service: &RestaurantService,
    mut req: CreateReservationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    req.customer_name = req.customer_name.trim().to_string();
    if req.customer_name.is_empty() {
        return Ok(bad_request("Customer name must not be empty"));
    }
    req.phone = trim_opt(req.phone);
    req.notes = trim_opt(req.notes);

    let storage = service.get_storage(request)?;
    let table = match req.table_id {
        Some(table_id) => match storage.get_table(caller.business_id, table_id).await? {
            Some(table) => Some(table),
            None => return Ok(table_not_found()),
        },
        None => None,
    };
    if let Err(msg) = validate_party(req.party_size, table.as_ref()) {
        return Ok(bad_request(msg));
    }

    let reservation = storage.create_reservation(caller.business_id, req).await?;
    if let Some(table) = table
        && table.status == TableStatus::Available
    {
        storage
            .set_table_status(caller.business_id, table.id, TableStatus::Reserved)
            .await?;
    }

    info!(
        "Reservation {} for {} ({} guests) created",
        reservation.id, reservation.customer_name, reservation.party_size
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        reservation,
        "Reservation created successfully",
    )))
}

pub async fn list_reservations(
    service: &RestaurantService,
    query: ReservationListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let response = storage
        .list_reservations_with_pagination(caller.business_id, query)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Reservation list retrieved successfully",
    )))
}

pub async fn update_reservation(
    service: &RestaurantService,
    id: i64,
    mut req: UpdateReservationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let Some(current) = storage.get_reservation(caller.business_id, id).await? else {
        return Ok(reservation_not_found());
    };
    if matches!(
        current.status,
        ReservationStatus::Cancelled | ReservationStatus::NoShow
    ) {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::Conflict,
            format!("Reservation is {}", current.status),
        )));
    }

    if let Some(name) = req.customer_name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Ok(bad_request("Customer name must not be empty"));
        }
    }
    req.phone = trim_opt(req.phone);
    req.notes = trim_opt(req.notes);

    let table_id = req.table_id.or(current.table_id);
    let table = match table_id {
        Some(table_id) => match storage.get_table(caller.business_id, table_id).await? {
            Some(table) => Some(table),
            None => return Ok(table_not_found()),
        },
        None => None,
    };
    if let Err(msg) = validate_party(req.party_size.unwrap_or(current.party_size), table.as_ref())
    {
        return Ok(bad_request(msg));
    }
    if req.status == Some(ReservationStatus::Seated) && table.is_none() {
        return Ok(bad_request("A table is required to seat a reservation"));
    }

    let new_status = req.status;
    let Some(reservation) = storage
        .update_reservation(caller.business_id, id, req)
        .await?
    else {
        return Ok(reservation_not_found());
    };

    let status_changed = new_status.is_some_and(|s| s != current.status);
    if status_changed || reservation.table_id != current.table_id {
        for change in table_changes(current.table_id, reservation.table_id, reservation.status) {
            apply_table_change(&storage, caller.business_id, change).await;
        }
    }

    info!(
        "Reservation {} updated ({}) by user {}",
        reservation.id, reservation.status, caller.user_id
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        reservation,
        "Reservation updated successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::HttpMessage;
    use chrono::Utc;

    fn table(capacity: i32) -> DiningTable {
        DiningTable {
            id: 1,
            business_id: 1,
            name: "T1".to_string(),
            capacity,
            status: TableStatus::Available,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_party() {
        assert!(validate_party(4, None).is_ok());
        assert!(validate_party(4, Some(&table(4))).is_ok());
        assert!(validate_party(5, Some(&table(4))).is_err());
        assert!(validate_party(0, None).is_err());
    }

    #[test]
    fn test_table_changes() {
        use ReservationStatus::*;
        use TableChange::*;

        assert_eq!(table_changes(Some(1), Some(1), Booked), vec![]);
        assert_eq!(
            table_changes(Some(1), Some(2), Booked),
            vec![Release(1), Reserve(2)]
        );
        assert_eq!(table_changes(None, Some(2), Booked), vec![Reserve(2)]);
        assert_eq!(table_changes(Some(1), Some(1), Seated), vec![Occupy(1)]);
        assert_eq!(
            table_changes(Some(1), Some(3), Seated),
            vec![Release(1), Occupy(3)]
        );
        assert_eq!(table_changes(Some(1), Some(1), NoShow), vec![Release(1)]);
        assert_eq!(table_changes(Some(1), None, Cancelled), vec![Release(1)]);
    }

    #[actix_web::test]
    async fn test_moving_and_seating_update_tables() {
        use crate::models::businesses::{BusinessType, CreateBusinessRequest};
        use crate::models::restaurant::CreateTableRequest;
        use crate::models::users::{CreateUserRequest, UserRole};
        use crate::storage::sea_orm_storage::SeaOrmStorage;
        use actix_web::test::TestRequest;

        let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory database");
        let (_, owner) = storage
            .create_business_with_owner(
                CreateBusinessRequest {
                    name: "Bistro".to_string(),
                    business_type: BusinessType::Restaurant,
                    currency: "USD".to_string(),
                },
                CreateUserRequest {
                    username: "bistro_owner".to_string(),
                    email: "owner@bistro.test".to_string(),
                    password: "hashed".to_string(),
                    role: UserRole::Owner,
                    display_name: None,
                },
            )
            .await
            .expect("register business");
        let bid = owner.business_id;
        let storage: Arc<dyn Storage> = Arc::new(storage);

        let window = storage
            .create_table(
                bid,
                CreateTableRequest {
                    name: "Window".to_string(),
                    capacity: 4,
                },
            )
            .await
            .unwrap();
        let patio = storage
            .create_table(
                bid,
                CreateTableRequest {
                    name: "Patio".to_string(),
                    capacity: 6,
                },
            )
            .await
            .unwrap();
        storage
            .set_table_status(bid, window.id, TableStatus::Reserved)
            .await
            .unwrap();
        let reservation = storage
            .create_reservation(
                bid,
                CreateReservationRequest {
                    table_id: Some(window.id),
                    customer_name: "Lee".to_string(),
                    phone: None,
                    party_size: 3,
                    reserved_for: Utc::now(),
                    notes: None,
                },
            )
            .await
            .unwrap();

        let service = RestaurantService::with_storage(storage.clone());
        let request = TestRequest::default().to_http_request();
        request.extensions_mut().insert(owner.clone());
        let status_of = |id: i64| {
            let storage = storage.clone();
            async move { storage.get_table(bid, id).await.unwrap().unwrap().status }
        };

        let resp = service
            .update_reservation(
                reservation.id,
                UpdateReservationRequest {
                    table_id: Some(patio.id),
                    ..Default::default()
                },
                &request,
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        assert_eq!(status_of(window.id).await, TableStatus::Available);
        assert_eq!(status_of(patio.id).await, TableStatus::Reserved);

        let resp = service
            .update_reservation(
                reservation.id,
                UpdateReservationRequest {
                    status: Some(ReservationStatus::Seated),
                    ..Default::default()
                },
                &request,
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        assert_eq!(status_of(patio.id).await, TableStatus::Occupied);
    }
}
