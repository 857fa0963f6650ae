//! 工资与佣金计算
//!
//! 纯函数，输入为已查询出的员工、课程、排课和已付学费。金额用 `Decimal` 计算，
//! 输出保留两位小数。

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::courses::{ClassSchedule, Course, CourseStatus};
use crate::models::employees::{Employee, PaymentModel};
use crate::models::fees::{FeeStatus, StudentFee};
use crate::models::payroll::{PayrollTotals, TeacherPayroll};
use crate::utils::money;
use crate::utils::validate::parse_clock_time;

pub struct PayrollInput<'a> {
    /// 闭区间
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub expense_reserve_percentage: f64,
    pub benefits_reserve_percentage: f64,
    pub employees: &'a [Employee],
    pub courses: &'a [Course],
    pub schedules: &'a [ClassSchedule],
    pub paid_fees: &'a [StudentFee],
}

/// 佣金计算明细
#[derive(Debug, Clone, PartialEq)]
pub struct CommissionBreakdown {
    pub base: Decimal,
    pub gross: Decimal,
    pub expense_reserve: Decimal,
    pub benefits_reserve: Decimal,
    pub net: Decimal,
    pub fee_ids: Vec<i64>,
}

/// 区间内每个星期几出现的次数，下标 0 = 周日
fn weekday_occurrences(start: NaiveDate, end: NaiveDate) -> [u32; 7] {
    let mut counts = [0u32; 7];
    for date in start.iter_days().take_while(|d| *d <= end) {
        counts[date.weekday().num_days_from_sunday() as usize] += 1;
    }
    counts
}

fn duration_hours(schedule: &ClassSchedule) -> Decimal {
    match (
        parse_clock_time(&schedule.start_time),
        parse_clock_time(&schedule.end_time),
    ) {
        (Some(start), Some(end)) if end > start => {
            Decimal::from(end - start) / Decimal::from(60)
        }
        _ => Decimal::ZERO,
    }
}

fn paid_within(fee: &StudentFee, start: NaiveDate, end: NaiveDate) -> bool {
    fee.status == FeeStatus::Paid
        && fee
            .paid_at
            .map(|ts| ts.date_naive())
            .is_some_and(|day| day >= start && day <= end)
}

fn taught_courses(employee_id: i64, courses: &[Course]) -> HashSet<i64> {
    courses
        .iter()
        .filter(|c| c.teacher_id == Some(employee_id))
        .map(|c| c.id)
        .collect()
}

/// 计算某位员工在区间内按课时计算的总时长
pub fn scheduled_hours(
    employee_id: i64,
    start: NaiveDate,
    end: NaiveDate,
    courses: &[Course],
    schedules: &[ClassSchedule],
) -> Decimal {
    // 归档课程不再上课，不计课时
    let taught: HashSet<i64> = courses
        .iter()
        .filter(|c| c.teacher_id == Some(employee_id) && c.status == CourseStatus::Active)
        .map(|c| c.id)
        .collect();
    let occurrences = weekday_occurrences(start, end);
    schedules
        .iter()
        .filter(|s| taught.contains(&s.course_id))
        .filter_map(|s| {
            let day = usize::try_from(s.day_of_week).ok().filter(|d| *d < 7)?;
            Some(duration_hours(s) * Decimal::from(occurrences[day]))
        })
        .sum()
}

/// 计算佣金：已付学费总额 × 佣金比例，再扣除费用与福利预留
pub fn commission_breakdown(
    employee: &Employee,
    start: NaiveDate,
    end: NaiveDate,
    expense_reserve_percentage: f64,
    benefits_reserve_percentage: f64,
    courses: &[Course],
    paid_fees: &[StudentFee],
) -> CommissionBreakdown {
    let taught = taught_courses(employee.id, courses);
    let fees: Vec<&StudentFee> = paid_fees
        .iter()
        .filter(|f| f.course_id.is_some_and(|c| taught.contains(&c)))
        .filter(|f| paid_within(f, start, end))
        .collect();

    let base = money::sum(fees.iter().map(|f| f.amount));
    let gross = money::round(money::percentage_of(base, employee.commission_percentage));
    let expense_reserve = money::round(money::percentage_of(gross, expense_reserve_percentage));
    let benefits_reserve =
        money::round(money::percentage_of(gross, benefits_reserve_percentage));

    CommissionBreakdown {
        base,
        gross,
        expense_reserve,
        benefits_reserve,
        net: gross - expense_reserve - benefits_reserve,
        fee_ids: fees.iter().map(|f| f.id).collect(),
    }
}

/// 计算区间内所有员工的工资
pub fn calculate_payroll(input: &PayrollInput<'_>) -> Vec<TeacherPayroll> {
    input
        .employees
        .iter()
        .map(|employee| match employee.payment_model {
            PaymentModel::Hourly => {
                let hours = scheduled_hours(
                    employee.id,
                    input.start,
                    input.end,
                    input.courses,
                    input.schedules,
                );
                let gross = hours * money::to_decimal(employee.hourly_rate);
                TeacherPayroll {
                    employee_id: employee.id,
                    name: employee.name.clone(),
                    payment_model: employee.payment_model,
                    hours: money::to_f64(hours),
                    hourly_rate: employee.hourly_rate,
                    commission_base: 0.0,
                    commission_percentage: 0.0,
                    gross_pay: money::to_f64(gross),
                    expense_reserve: 0.0,
                    benefits_reserve: 0.0,
                    total_pay: money::to_f64(gross),
                }
            }
            PaymentModel::Commission => {
                let breakdown = commission_breakdown(
                    employee,
                    input.start,
                    input.end,
                    input.expense_reserve_percentage,
                    input.benefits_reserve_percentage,
                    input.courses,
                    input.paid_fees,
                );
                TeacherPayroll {
                    employee_id: employee.id,
                    name: employee.name.clone(),
                    payment_model: employee.payment_model,
                    hours: 0.0,
                    hourly_rate: 0.0,
                    commission_base: money::to_f64(breakdown.base),
                    commission_percentage: employee.commission_percentage,
                    gross_pay: money::to_f64(breakdown.gross),
                    expense_reserve: money::to_f64(breakdown.expense_reserve),
                    benefits_reserve: money::to_f64(breakdown.benefits_reserve),
                    total_pay: money::to_f64(breakdown.net),
                }
            }
        })
        .collect()
}

pub fn payroll_totals(items: &[TeacherPayroll]) -> PayrollTotals {
    let total = |f: fn(&TeacherPayroll) -> f64| money::to_f64(money::sum(items.iter().map(f)));
    PayrollTotals {
        gross_pay: total(|p| p.gross_pay),
        expense_reserve: total(|p| p.expense_reserve),
        benefits_reserve: total(|p| p.benefits_reserve),
        total_pay: total(|p| p.total_pay),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employees::EmployeeStatus;
    use chrono::{TimeZone, Utc};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn employee(id: i64, model: PaymentModel, rate: f64, pct: f64) -> Employee {
        Employee {
            id,
            business_id: 1,
            user_id: None,
            name: format!("Teacher {id}"),
            email: None,
            position: None,
            payment_model: model,
            hourly_rate: rate,
            commission_percentage: pct,
            status: EmployeeStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn course(id: i64, teacher_id: i64) -> Course {
        Course {
            id,
            business_id: 1,
            teacher_id: Some(teacher_id),
            name: format!("Course {id}"),
            description: None,
            monthly_fee: 100.0,
            capacity: None,
            status: CourseStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn schedule(id: i64, course_id: i64, day: i32, start: &str, end: &str) -> ClassSchedule {
        ClassSchedule {
            id,
            business_id: 1,
            course_id,
            day_of_week: day,
            start_time: start.to_string(),
            end_time: end.to_string(),
            room: None,
            created_at: Utc::now(),
        }
    }

    fn paid_fee(id: i64, course_id: i64, amount: f64, paid: NaiveDate) -> StudentFee {
        StudentFee {
            id,
            business_id: 1,
            student_id: 1,
            course_id: Some(course_id),
            scheduled_payment_id: None,
            settlement_id: None,
            description: "Tuition".to_string(),
            amount,
            due_date: paid,
            status: FeeStatus::Paid,
            paid_at: Some(Utc.from_utc_datetime(&paid.and_hms_opt(10, 0, 0).unwrap())),
            payment_method: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_hourly_teacher() {
        let employees = [employee(1, PaymentModel::Hourly, 200.0, 0.0)];
        let courses = [course(10, 1)];
        let schedules = [
            schedule(1, 10, 1, "09:00", "10:00"),
            schedule(2, 10, 3, "14:00", "15:00"),
        ];
        let result = calculate_payroll(&PayrollInput {
            start: d(2025, 3, 3),
            end: d(2025, 3, 9),
            expense_reserve_percentage: 10.0,
            benefits_reserve_percentage: 5.0,
            employees: &employees,
            courses: &courses,
            schedules: &schedules,
            paid_fees: &[],
        });

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].hours, 2.0);
        assert_eq!(result[0].gross_pay, 400.0);
        assert_eq!(result[0].total_pay, result[0].gross_pay);
        assert_eq!(result[0].expense_reserve, 0.0);
    }

    #[test]
    fn test_archived_course_earns_no_hours() {
        let employees = [employee(1, PaymentModel::Hourly, 200.0, 0.0)];
        let mut archived = course(10, 1);
        archived.status = CourseStatus::Archived;
        let courses = [archived];
        let schedules = [schedule(1, 10, 1, "09:00", "10:00")];
        let result = calculate_payroll(&PayrollInput {
            start: d(2025, 3, 3),
            end: d(2025, 3, 9),
            expense_reserve_percentage: 0.0,
            benefits_reserve_percentage: 0.0,
            employees: &employees,
            courses: &courses,
            schedules: &schedules,
            paid_fees: &[],
        });

        assert_eq!(result[0].hours, 0.0);
        assert_eq!(result[0].gross_pay, 0.0);
    }

    #[test]
    fn test_commission_teacher() {
        let employees = [employee(2, PaymentModel::Commission, 0.0, 40.0)];
        let courses = [course(20, 2), course(21, 99)];
        let fees = [
            paid_fee(1, 20, 600.0, d(2025, 3, 2)),
            paid_fee(2, 20, 400.0, d(2025, 3, 31)),
            // 其他教师的课程和区间外的学费不计入
            paid_fee(3, 21, 500.0, d(2025, 3, 5)),
            paid_fee(4, 20, 300.0, d(2025, 4, 1)),
        ];
        let result = calculate_payroll(&PayrollInput {
            start: d(2025, 3, 1),
            end: d(2025, 3, 31),
            expense_reserve_percentage: 10.0,
            benefits_reserve_percentage: 5.0,
            employees: &employees,
            courses: &courses,
            schedules: &[],
            paid_fees: &fees,
        });

        let payroll = &result[0];
        assert_eq!(payroll.commission_base, 1000.0);
        assert_eq!(payroll.gross_pay, 400.0);
        assert_eq!(payroll.expense_reserve, 40.0);
        assert_eq!(payroll.benefits_reserve, 20.0);
        assert_eq!(payroll.total_pay, 340.0);

        let totals = payroll_totals(&result);
        assert_eq!(totals.total_pay, 340.0);
    }

    #[test]
    fn test_commission_breakdown_lists_fee_ids() {
        let teacher = employee(2, PaymentModel::Commission, 0.0, 33.3);
        let courses = [course(20, 2)];
        let fees = [
            paid_fee(7, 20, 10.0, d(2025, 1, 10)),
            paid_fee(8, 20, 10.01, d(2025, 1, 11)),
        ];
        let breakdown =
            commission_breakdown(&teacher, d(2025, 1, 1), d(2025, 1, 31), 0.0, 0.0, &courses, &fees);
        assert_eq!(breakdown.fee_ids, vec![7, 8]);
        assert_eq!(money::to_f64(breakdown.gross), 6.66);
        assert_eq!(breakdown.net, breakdown.gross);
    }

    #[test]
    fn test_weekday_occurrences() {
        // 2025-03-01 是周六
        let counts = weekday_occurrences(d(2025, 3, 1), d(2025, 3, 31));
        assert_eq!(counts.iter().sum::<u32>(), 31);
        assert_eq!(counts[6], 5);
        assert_eq!(counts[0], 5);
        assert_eq!(counts[1], 5);
        assert_eq!(counts[2], 4);
    }
}
