use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BusinessService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::Caller;

pub async fn get_business(
    service: &BusinessService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    match storage.get_business(caller.business_id).await? {
        Some(business) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            business,
            "Business retrieved successfully",
        ))),
        None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BusinessNotFound,
            "Business not found",
        ))),
    }
}
