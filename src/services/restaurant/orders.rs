//! 订单：开单、加菜、删菜、结账、取消
//!
//! 只有 `open` 状态的订单可以修改；结账或取消后释放餐桌。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{RestaurantService, bad_request, order_not_found, table_not_found};
use crate::models::{
    ApiResponse, ErrorCode,
    restaurant::{
        CreateOrderRequest, OrderDetail, OrderItemInput, OrderListQuery, OrderStatus,
        PayOrderRequest,
    },
};
use crate::services::Caller;
use crate::utils::validate::validate_non_negative_amount;

fn normalize_items(items: &mut [OrderItemInput]) -> Result<(), &'static str> {
    for item in items.iter_mut() {
        item.name = item.name.trim().to_string();
        if item.name.is_empty() {
            return Err("Item name must not be empty");
        }
        if item.quantity < 1 {
            return Err("Item quantity must be at least 1");
        }
        validate_non_negative_amount(item.unit_price)?;
        item.note = item
            .note
            .take()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
    }
    Ok(())
}

fn order_not_open(status: OrderStatus) -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::OrderNotOpen,
        format!("Order is {status}"),
    ))
}

/// 读取订单并确认仍可修改
async fn open_order(
    service: &RestaurantService,
    caller: &Caller,
    order_id: i64,
    request: &HttpRequest,
) -> ActixResult<Result<OrderDetail, HttpResponse>> {
    let storage = service.get_storage(request)?;
    let Some(detail) = storage.get_order_detail(caller.business_id, order_id).await? else {
        return Ok(Err(order_not_found()));
    };
    if detail.order.status != OrderStatus::Open {
        return Ok(Err(order_not_open(detail.order.status)));
    }
    Ok(Ok(detail))
}

pub async fn create_order(
    service: &RestaurantService,
    mut req: CreateOrderRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    if let Err(msg) = normalize_items(&mut req.items) {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request)?;
    if let Some(table_id) = req.table_id
        && storage.get_table(caller.business_id, table_id).await?.is_none()
    {
        return Ok(table_not_found());
    }

    let detail = storage
        .create_order(caller.business_id, caller.user_id, req)
        .await?;
    info!(
        "Order {} opened by user {} ({} item(s))",
        detail.order.id,
        caller.user_id,
        detail.items.len()
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        detail,
        "Order created successfully",
    )))
}

pub async fn get_order(
    service: &RestaurantService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    match storage.get_order_detail(caller.business_id, id).await? {
        Some(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Order retrieved successfully",
        ))),
        None => Ok(order_not_found()),
    }
}

pub async fn list_orders(
    service: &RestaurantService,
    query: OrderListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let response = storage
        .list_orders_with_pagination(caller.business_id, query)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Order list retrieved successfully",
    )))
}

pub async fn add_items(
    service: &RestaurantService,
    order_id: i64,
    mut items: Vec<OrderItemInput>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    if items.is_empty() {
        return Ok(bad_request("At least one item is required"));
    }
    if let Err(msg) = normalize_items(&mut items) {
        return Ok(bad_request(msg));
    }

    if let Err(resp) = open_order(service, &caller, order_id, request).await? {
        return Ok(resp);
    }

    let storage = service.get_storage(request)?;
    match storage
        .add_order_items(caller.business_id, order_id, items)
        .await?
    {
        Some(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Items added successfully",
        ))),
        None => Ok(order_not_found()),
    }
}

pub async fn remove_item(
    service: &RestaurantService,
    order_id: i64,
    item_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    if let Err(resp) = open_order(service, &caller, order_id, request).await? {
        return Ok(resp);
    }

    let storage = service.get_storage(request)?;
    match storage
        .remove_order_item(caller.business_id, order_id, item_id)
        .await?
    {
        Some(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Item removed successfully",
        ))),
        None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::OrderItemNotFound,
            "Order item not found",
        ))),
    }
}

pub async fn pay_order(
    service: &RestaurantService,
    order_id: i64,
    req: PayOrderRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let tip = req.tip.unwrap_or(0.0);
    if let Err(msg) = validate_non_negative_amount(tip) {
        return Ok(bad_request(msg));
    }

    let detail = match open_order(service, &caller, order_id, request).await? {
        Ok(detail) => detail,
        Err(resp) => return Ok(resp),
    };
    if detail.items.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::OrderEmpty,
            "Order has no items",
        )));
    }

    let storage = service.get_storage(request)?;
    let Some(order) = storage
        .close_order(
            caller.business_id,
            order_id,
            OrderStatus::Paid,
            Some(req.payment_method),
            tip,
        )
        .await?
    else {
        return Ok(order_not_found());
    };

    info!(
        "Order {} paid ({:.2}, {}) by user {}",
        order.id, order.total, req.payment_method, caller.user_id
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(order, "Order paid successfully")))
}

pub async fn cancel_order(
    service: &RestaurantService,
    order_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    if let Err(resp) = open_order(service, &caller, order_id, request).await? {
        return Ok(resp);
    }

    let storage = service.get_storage(request)?;
    let Some(order) = storage
        .close_order(caller.business_id, order_id, OrderStatus::Cancelled, None, 0.0)
        .await?
    else {
        return Ok(order_not_found());
    };

    info!("Order {} cancelled by user {}", order.id, caller.user_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        order,
        "Order cancelled successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, price: f64, quantity: i32) -> OrderItemInput {
        OrderItemInput {
            name: name.to_string(),
            unit_price: price,
            quantity,
            note: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_normalize_items() {
        let mut items = vec![item("  Soup ", 4.5, 2)];
        assert!(normalize_items(&mut items).is_ok());
        assert_eq!(items[0].name, "Soup");
        assert_eq!(items[0].note, None);

        assert!(normalize_items(&mut [item(" ", 1.0, 1)]).is_err());
        assert!(normalize_items(&mut [item("Tea", 1.0, 0)]).is_err());
        assert!(normalize_items(&mut [item("Tea", -1.0, 1)]).is_err());
    }
}
