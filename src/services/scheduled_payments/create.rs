use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ScheduledPaymentService, bad_request, validate_day_of_month};
use crate::models::{
    ApiResponse,
    scheduled_payments::{CreateScheduledPaymentRequest, PaymentTarget},
};
use crate::services::Caller;
use crate::services::employees::employee_not_found;
use crate::services::schedules::course_not_found;
use crate::services::students::student_not_found;
use crate::utils::validate::validate_positive_amount;

/// 对象字段必须与 `target` 一致
fn validate_target(req: &CreateScheduledPaymentRequest) -> Result<(), &'static str> {
    match req.target {
        PaymentTarget::StudentFee => {
            if req.student_id.is_none() {
                return Err("student_id is required for student_fee schedules");
            }
            if req.employee_id.is_some() {
                return Err("employee_id is not allowed for student_fee schedules");
            }
        }
        PaymentTarget::EmployeeSalary => {
            if req.employee_id.is_none() {
                return Err("employee_id is required for employee_salary schedules");
            }
            if req.student_id.is_some() || req.course_id.is_some() {
                return Err("student_id and course_id are not allowed for employee_salary schedules");
            }
        }
    }
    Ok(())
}

fn validate_create(req: &mut CreateScheduledPaymentRequest) -> Result<(), &'static str> {
    req.description = req.description.trim().to_string();
    if req.description.is_empty() {
        return Err("Description is required");
    }
    validate_positive_amount(req.amount)?;
    validate_day_of_month(req.day_of_month)?;
    if req.end_date.is_some_and(|end| end < req.start_date) {
        return Err("End date cannot be before start date");
    }
    validate_target(req)
}

pub async fn create_scheduled_payment(
    service: &ScheduledPaymentService,
    mut req: CreateScheduledPaymentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;

    if let Err(msg) = validate_create(&mut req) {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request)?;
    if let Some(student_id) = req.student_id
        && storage.get_student(caller.business_id, student_id).await?.is_none()
    {
        return Ok(student_not_found());
    }
    if let Some(course_id) = req.course_id
        && storage.get_course(caller.business_id, course_id).await?.is_none()
    {
        return Ok(course_not_found());
    }
    if let Some(employee_id) = req.employee_id
        && storage
            .get_employee(caller.business_id, employee_id)
            .await?
            .is_none()
    {
        return Ok(employee_not_found());
    }

    let scheduled = storage
        .create_scheduled_payment(caller.business_id, req)
        .await?;
    info!(
        "Scheduled payment {} ({} {}) created, first run {}",
        scheduled.id, scheduled.target, scheduled.recurrence, scheduled.next_run_date
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        scheduled,
        "Scheduled payment created successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scheduled_payments::Recurrence;
    use chrono::NaiveDate;

    fn request(target: PaymentTarget) -> CreateScheduledPaymentRequest {
        CreateScheduledPaymentRequest {
            target,
            student_id: None,
            employee_id: None,
            course_id: None,
            description: " Monthly tuition ".to_string(),
            amount: 150.0,
            recurrence: Recurrence::Monthly,
            day_of_month: Some(1),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: None,
        }
    }

    #[test]
    fn test_target_id_must_match() {
        let mut req = request(PaymentTarget::StudentFee);
        assert!(validate_create(&mut req).is_err());
        req.student_id = Some(4);
        assert!(validate_create(&mut req).is_ok());
        assert_eq!(req.description, "Monthly tuition");

        let mut salary = request(PaymentTarget::EmployeeSalary);
        salary.employee_id = Some(2);
        assert!(validate_create(&mut salary).is_ok());
        salary.course_id = Some(1);
        assert!(validate_create(&mut salary).is_err());
    }

    #[test]
    fn test_rejects_bad_dates_and_amounts() {
        let mut req = request(PaymentTarget::StudentFee);
        req.student_id = Some(1);
        req.end_date = NaiveDate::from_ymd_opt(2024, 12, 31);
        assert!(validate_create(&mut req).is_err());

        let mut req = request(PaymentTarget::StudentFee);
        req.student_id = Some(1);
        req.day_of_month = Some(32);
        assert!(validate_create(&mut req).is_err());

        let mut req = request(PaymentTarget::StudentFee);
        req.student_id = Some(1);
        req.amount = 0.0;
        assert!(validate_create(&mut req).is_err());
    }
}
