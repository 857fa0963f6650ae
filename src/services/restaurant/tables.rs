use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::{RestaurantService, bad_request, table_not_found};
use crate::models::{
    ApiResponse, ErrorCode,
    restaurant::{CreateTableRequest, TableStatus, UpdateTableRequest},
};
use crate::services::Caller;
use crate::storage::Storage;

fn validate_table(name: Option<&str>, capacity: Option<i32>) -> Result<(), &'static str> {
    if name.is_some_and(|n| n.is_empty()) {
        return Err("Table name must not be empty");
    }
    if capacity.is_some_and(|c| c < 1) {
        return Err("Capacity must be at least 1");
    }
    Ok(())
}

/// 同一商户内餐桌名称不区分大小写唯一
async fn name_taken(
    storage: &Arc<dyn Storage>,
    business_id: i64,
    name: &str,
    exclude_id: Option<i64>,
) -> ActixResult<bool> {
    let tables = storage.list_tables(business_id).await?;
    Ok(tables
        .iter()
        .any(|t| Some(t.id) != exclude_id && t.name.eq_ignore_ascii_case(name)))
}

fn name_conflict() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::TableNameAlreadyExists,
        "Table name already exists",
    ))
}

pub async fn list_tables(
    service: &RestaurantService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let tables = storage.list_tables(caller.business_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        tables,
        "Table list retrieved successfully",
    )))
}

pub async fn create_table(
    service: &RestaurantService,
    mut req: CreateTableRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    req.name = req.name.trim().to_string();
    if let Err(msg) = validate_table(Some(&req.name), Some(req.capacity)) {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request)?;
    if name_taken(&storage, caller.business_id, &req.name, None).await? {
        return Ok(name_conflict());
    }

    match storage.create_table(caller.business_id, req).await {
        Ok(table) => {
            info!("Table {} ({}) created", table.id, table.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                table,
                "Table created successfully",
            )))
        }
        Err(e) if e.is_unique_violation() => Ok(name_conflict()),
        Err(e) => Err(e.into()),
    }
}

pub async fn update_table(
    service: &RestaurantService,
    id: i64,
    mut req: UpdateTableRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    req.name = req.name.map(|n| n.trim().to_string());
    if let Err(msg) = validate_table(req.name.as_deref(), req.capacity) {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request)?;
    if let Some(name) = req.name.as_deref()
        && name_taken(&storage, caller.business_id, name, Some(id)).await?
    {
        return Ok(name_conflict());
    }

    match storage.update_table(caller.business_id, id, req).await {
        Ok(Some(table)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            table,
            "Table updated successfully",
        ))),
        Ok(None) => Ok(table_not_found()),
        Err(e) if e.is_unique_violation() => Ok(name_conflict()),
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_table(
    service: &RestaurantService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let Some(table) = storage.get_table(caller.business_id, id).await? else {
        return Ok(table_not_found());
    };
    if table.status == TableStatus::Occupied {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::Conflict,
            "Occupied tables cannot be deleted",
        )));
    }

    if storage.delete_table(caller.business_id, id).await? {
        info!("Table {} deleted by user {}", id, caller.user_id);
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Table deleted successfully")))
    } else {
        Ok(table_not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_table() {
        assert!(validate_table(Some("T1"), Some(4)).is_ok());
        assert!(validate_table(None, None).is_ok());
        assert!(validate_table(Some(""), Some(4)).is_err());
        assert!(validate_table(Some("T1"), Some(0)).is_err());
    }
}
