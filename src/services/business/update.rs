use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::BusinessService;
use crate::models::{ApiResponse, ErrorCode, businesses::UpdateBusinessRequest};
use crate::services::Caller;
use crate::utils::validate::{validate_currency, validate_percentage};

fn validate_update(update: &mut UpdateBusinessRequest) -> Result<(), &'static str> {
    if let Some(name) = update.name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Err("Business name cannot be empty");
        }
    }
    if let Some(currency) = update.currency.as_mut() {
        *currency = currency.trim().to_uppercase();
        validate_currency(currency)?;
    }
    if let Some(p) = update.expense_reserve_percentage {
        validate_percentage(p)?;
    }
    if let Some(p) = update.benefits_reserve_percentage {
        validate_percentage(p)?;
    }
    Ok(())
}

pub async fn update_business(
    service: &BusinessService,
    mut update: UpdateBusinessRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;

    if let Err(msg) = validate_update(&mut update) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request)?;
    match storage.update_business(caller.business_id, update).await? {
        Some(business) => {
            info!(
                "Business {} settings updated by user {}",
                business.id, caller.user_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                business,
                "Business updated successfully",
            )))
        }
        None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BusinessNotFound,
            "Business not found",
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_update_normalizes_and_checks() {
        let mut update = UpdateBusinessRequest {
            name: Some("  Sunrise Academy ".to_string()),
            currency: Some("usd".to_string()),
            expense_reserve_percentage: Some(10.0),
            ..Default::default()
        };
        assert!(validate_update(&mut update).is_ok());
        assert_eq!(update.name.as_deref(), Some("Sunrise Academy"));
        assert_eq!(update.currency.as_deref(), Some("USD"));

        let mut bad = UpdateBusinessRequest {
            benefits_reserve_percentage: Some(120.0),
            ..Default::default()
        };
        assert!(validate_update(&mut bad).is_err());

        let mut blank = UpdateBusinessRequest {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(validate_update(&mut blank).is_err());
    }
}
