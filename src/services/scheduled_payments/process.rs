//! 定期付款执行
//!
//! 对每条到期规则反复生成记录直到 `next_run_date > as_of`，
//! 单条规则最多补跑 `business.max_catch_up_runs` 次。
//! 每条规则在自己的事务中落库，一条失败不影响其他规则。

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use tracing::{info, warn};

use super::ScheduledPaymentService;
use super::recurrence::{is_finished, next_run_date};
use crate::config::AppConfig;
use crate::models::{
    ApiResponse,
    employee_payments::{EmployeePaymentKind, NewEmployeePayment},
    fees::NewStudentFee,
    notifications::NotificationType,
    scheduled_payments::{
        PaymentTarget, ProcessScheduledPaymentsRequest, ProcessScheduledPaymentsResponse,
        ScheduleRunResult, ScheduledPayment, ScheduledPaymentRun,
    },
    users::UserRole,
};
use crate::services::Caller;
use crate::services::notifications::{notify_roles, notify_user};
use crate::storage::Storage;

/// 计算一条规则在 `as_of` 之前（含）应生成的记录及执行后的状态
pub fn plan_run(scheduled: &ScheduledPayment, as_of: NaiveDate, max_runs: u32) -> ScheduledPaymentRun {
    let mut run = ScheduledPaymentRun {
        scheduled_payment_id: scheduled.id,
        expected_next_run_date: scheduled.next_run_date,
        fees: Vec::new(),
        employee_payments: Vec::new(),
        last_run_date: scheduled.last_run_date,
        next_run_date: scheduled.next_run_date,
        is_active: scheduled.is_active,
    };

    let mut runs = 0;
    loop {
        if is_finished(run.next_run_date, scheduled.end_date) {
            run.is_active = false;
            break;
        }
        if run.next_run_date > as_of || runs >= max_runs {
            break;
        }

        let date = run.next_run_date;
        match scheduled.target {
            PaymentTarget::StudentFee => {
                if let Some(student_id) = scheduled.student_id {
                    run.fees.push(NewStudentFee {
                        student_id,
                        course_id: scheduled.course_id,
                        scheduled_payment_id: Some(scheduled.id),
                        description: scheduled.description.clone(),
                        amount: scheduled.amount,
                        due_date: date,
                    });
                }
            }
            PaymentTarget::EmployeeSalary => {
                if let Some(employee_id) = scheduled.employee_id {
                    run.employee_payments.push(NewEmployeePayment {
                        employee_id,
                        scheduled_payment_id: Some(scheduled.id),
                        kind: EmployeePaymentKind::Salary,
                        description: scheduled.description.clone(),
                        amount: scheduled.amount,
                        payment_date: date,
                    });
                }
            }
        }

        run.last_run_date = Some(date);
        run.next_run_date = next_run_date(date, scheduled.recurrence, scheduled.day_of_month);
        runs += 1;
    }

    run
}

pub async fn process_due(
    service: &ScheduledPaymentService,
    req: ProcessScheduledPaymentsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;
    let max_runs = AppConfig::get().business.max_catch_up_runs;

    let as_of = req
        .as_of
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let due = storage
        .list_due_scheduled_payments(caller.business_id, as_of)
        .await?;

    let mut results = Vec::with_capacity(due.len());
    let mut total_generated = 0;

    for scheduled in due {
        let run = plan_run(&scheduled, as_of, max_runs);
        let (next_run_date, is_active) = (run.next_run_date, run.is_active);

        match storage
            .apply_scheduled_payment_run(caller.business_id, run)
            .await
        {
            Ok(generated) => {
                total_generated += generated;
                if generated > 0 {
                    notify_generated(&storage, caller.business_id, &scheduled, generated).await;
                }
                results.push(ScheduleRunResult {
                    scheduled_payment_id: scheduled.id,
                    generated,
                    next_run_date,
                    is_active,
                    error: None,
                });
            }
            Err(e) => {
                warn!("Scheduled payment {} run failed: {}", scheduled.id, e);
                results.push(ScheduleRunResult {
                    scheduled_payment_id: scheduled.id,
                    generated: 0,
                    next_run_date: scheduled.next_run_date,
                    is_active: scheduled.is_active,
                    error: Some(e.message().to_string()),
                });
            }
        }
    }

    info!(
        "Processed {} scheduled payment(s) as of {} in business {}: {} record(s) generated",
        results.len(),
        as_of,
        caller.business_id,
        total_generated
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ProcessScheduledPaymentsResponse {
            as_of,
            total_generated,
            results,
        },
        "Scheduled payments processed",
    )))
}

async fn notify_generated(
    storage: &Arc<dyn Storage>,
    business_id: i64,
    scheduled: &ScheduledPayment,
    generated: u32,
) {
    let content = Some(format!(
        "{} x {} ({:.2})",
        generated, scheduled.description, scheduled.amount
    ));
    match scheduled.target {
        PaymentTarget::StudentFee => {
            notify_roles(
                storage,
                business_id,
                &[UserRole::Owner, UserRole::Admin],
                NotificationType::FeeGenerated,
                "New fees generated",
                content,
            )
            .await;
        }
        PaymentTarget::EmployeeSalary => {
            let Some(employee_id) = scheduled.employee_id else {
                return;
            };
            match storage.get_employee(business_id, employee_id).await {
                Ok(Some(employee)) => {
                    if let Some(user_id) = employee.user_id {
                        notify_user(
                            storage,
                            business_id,
                            user_id,
                            NotificationType::SalaryGenerated,
                            "Salary payment generated",
                            content,
                        )
                        .await;
                    }
                }
                Ok(None) => {}
                Err(e) => warn!(
                    "Failed to load employee {} for salary notification: {}",
                    employee_id, e
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scheduled_payments::Recurrence;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scheduled(target: PaymentTarget, recurrence: Recurrence, next: NaiveDate) -> ScheduledPayment {
        ScheduledPayment {
            id: 9,
            business_id: 1,
            target,
            student_id: Some(3),
            employee_id: Some(4),
            course_id: None,
            description: "Tuition".to_string(),
            amount: 120.0,
            recurrence,
            day_of_month: None,
            next_run_date: next,
            end_date: None,
            last_run_date: None,
            is_active: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_catch_up_generates_every_missed_run() {
        let sp = scheduled(PaymentTarget::StudentFee, Recurrence::Weekly, date(2025, 1, 1));
        let run = plan_run(&sp, date(2025, 1, 22), 366);
        let due: Vec<_> = run.fees.iter().map(|f| f.due_date).collect();
        assert_eq!(
            due,
            vec![date(2025, 1, 1), date(2025, 1, 8), date(2025, 1, 15), date(2025, 1, 22)]
        );
        assert_eq!(run.last_run_date, Some(date(2025, 1, 22)));
        assert_eq!(run.next_run_date, date(2025, 1, 29));
        assert_eq!(run.expected_next_run_date, date(2025, 1, 1));
        assert!(run.is_active);
        assert!(run.employee_payments.is_empty());
    }

    #[test]
    fn test_end_date_deactivates() {
        let mut sp = scheduled(PaymentTarget::EmployeeSalary, Recurrence::Monthly, date(2025, 1, 31));
        sp.end_date = Some(date(2025, 3, 15));
        let run = plan_run(&sp, date(2025, 12, 31), 366);
        let dates: Vec<_> = run.employee_payments.iter().map(|p| p.payment_date).collect();
        assert_eq!(dates, vec![date(2025, 1, 31), date(2025, 2, 28)]);
        assert!(!run.is_active);
        assert!(run.employee_payments.iter().all(|p| p.kind == EmployeePaymentKind::Salary));
    }

    #[test]
    fn test_catch_up_is_capped() {
        let sp = scheduled(PaymentTarget::StudentFee, Recurrence::Daily, date(2020, 1, 1));
        let run = plan_run(&sp, date(2025, 1, 1), 10);
        assert_eq!(run.fees.len(), 10);
        assert_eq!(run.next_run_date, date(2020, 1, 11));
        assert!(run.is_active);
    }

    #[test]
    fn test_not_yet_due_generates_nothing() {
        let sp = scheduled(PaymentTarget::StudentFee, Recurrence::Daily, date(2025, 6, 1));
        let run = plan_run(&sp, date(2025, 5, 31), 366);
        assert!(run.fees.is_empty());
        assert_eq!(run.last_run_date, None);
        assert_eq!(run.next_run_date, date(2025, 6, 1));
    }
}
