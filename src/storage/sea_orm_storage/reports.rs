use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{
    courses, employees, enrollments, notifications, orders, reservations, student_fees, students,
};
use crate::errors::{BizDeskError, Result};
use crate::models::{
    courses::CourseStatus, employees::EmployeeStatus, enrollments::EnrollmentStatus,
    fees::FeeStatus, reports::DashboardSummary, restaurant::OrderStatus,
    restaurant::ReservationStatus, students::StudentStatus,
};
use crate::utils::money;
use chrono::NaiveDate;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Select};

/// 区间 [start, end] 的 UTC 时间戳边界，end 取次日零点（开区间）
fn timestamp_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> (i64, i64) {
    let from = start
        .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc().timestamp())
        .unwrap_or(i64::MIN);
    let to = end
        .and_then(|d| d.succ_opt())
        .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc().timestamp())
        .unwrap_or(i64::MAX);
    (from, to)
}

impl SeaOrmStorage {
    async fn count_rows<E: EntityTrait>(&self, select: Select<E>, label: &str) -> Result<i64>
    where
        E::Model: Sync + 'static,
    {
        let count = select
            .count(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("统计{label}失败: {e}")))?;
        Ok(count as i64)
    }

    async fn sum_column<E: EntityTrait>(
        &self,
        select: Select<E>,
        column: E::Column,
        label: &str,
    ) -> Result<f64> {
        let values: Vec<f64> = select
            .select_only()
            .column(column)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("汇总{label}失败: {e}")))?;
        Ok(money::to_f64(money::sum(values)))
    }

    /// 仪表盘统计
    pub async fn get_dashboard_summary_impl(
        &self,
        business_id: i64,
        user_id: i64,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<DashboardSummary> {
        let (from_ts, to_ts) = timestamp_bounds(start, end);
        let now = chrono::Utc::now().timestamp();

        let pending_fees = StudentFees::find()
            .filter(student_fees::Column::BusinessId.eq(business_id))
            .filter(student_fees::Column::Status.eq(FeeStatus::Pending.to_string()));
        let paid_fees = StudentFees::find()
            .filter(student_fees::Column::BusinessId.eq(business_id))
            .filter(student_fees::Column::Status.eq(FeeStatus::Paid.to_string()))
            .filter(student_fees::Column::PaidAt.gte(from_ts))
            .filter(student_fees::Column::PaidAt.lt(to_ts));
        let paid_orders = Orders::find()
            .filter(orders::Column::BusinessId.eq(business_id))
            .filter(orders::Column::Status.eq(OrderStatus::Paid.to_string()))
            .filter(orders::Column::ClosedAt.gte(from_ts))
            .filter(orders::Column::ClosedAt.lt(to_ts));

        let (
            active_students,
            active_courses,
            active_employees,
            active_enrollments,
            pending_fees_count,
            pending_fees_amount,
            overdue_fees_count,
            collected_amount,
        ) = futures_util::try_join!(
            self.count_rows(
                Students::find()
                    .filter(students::Column::BusinessId.eq(business_id))
                    .filter(students::Column::Status.eq(StudentStatus::Active.to_string())),
                "学员",
            ),
            self.count_rows(
                Courses::find()
                    .filter(courses::Column::BusinessId.eq(business_id))
                    .filter(courses::Column::Status.eq(CourseStatus::Active.to_string())),
                "课程",
            ),
            self.count_rows(
                Employees::find()
                    .filter(employees::Column::BusinessId.eq(business_id))
                    .filter(employees::Column::Status.eq(EmployeeStatus::Active.to_string())),
                "员工",
            ),
            self.count_rows(
                Enrollments::find()
                    .filter(enrollments::Column::BusinessId.eq(business_id))
                    .filter(
                        enrollments::Column::Status.eq(EnrollmentStatus::Active.to_string()),
                    ),
                "报名",
            ),
            self.count_rows(pending_fees.clone(), "待缴学费"),
            self.sum_column(pending_fees, student_fees::Column::Amount, "待缴学费"),
            self.count_rows(
                StudentFees::find()
                    .filter(student_fees::Column::BusinessId.eq(business_id))
                    .filter(student_fees::Column::Status.eq(FeeStatus::Overdue.to_string())),
                "逾期学费",
            ),
            self.sum_column(paid_fees, student_fees::Column::Amount, "已收学费"),
        )?;

        let (open_orders, order_revenue, upcoming_reservations, unread_notifications) =
            futures_util::try_join!(
                self.count_rows(
                    Orders::find()
                        .filter(orders::Column::BusinessId.eq(business_id))
                        .filter(orders::Column::Status.eq(OrderStatus::Open.to_string())),
                    "未结订单",
                ),
                self.sum_column(paid_orders, orders::Column::Total, "订单营收"),
                self.count_rows(
                    Reservations::find()
                        .filter(reservations::Column::BusinessId.eq(business_id))
                        .filter(
                            reservations::Column::Status
                                .eq(ReservationStatus::Booked.to_string()),
                        )
                        .filter(reservations::Column::ReservedFor.gte(now)),
                    "预订",
                ),
                self.count_rows(
                    Notifications::find()
                        .filter(notifications::Column::UserId.eq(user_id))
                        .filter(notifications::Column::IsRead.eq(false)),
                    "未读通知",
                ),
            )?;

        Ok(DashboardSummary {
            start,
            end,
            active_students,
            active_courses,
            active_employees,
            active_enrollments,
            pending_fees_count,
            pending_fees_amount,
            overdue_fees_count,
            collected_amount,
            open_orders,
            order_revenue,
            upcoming_reservations,
            unread_notifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_bounds() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let (from, to) = timestamp_bounds(Some(d), Some(d));
        assert_eq!(to - from, 86_400);
        assert_eq!(timestamp_bounds(None, None), (i64::MIN, i64::MAX));
    }
}
