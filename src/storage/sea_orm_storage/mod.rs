//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod attendance;
mod businesses;
mod courses;
mod employee_payments;
mod employees;
mod enrollments;
mod fees;
mod grades;
mod notifications;
mod reports;
mod restaurant;
mod scheduled_payments;
mod schedules;
mod settlements;
mod students;
mod users;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{BizDeskError, Result};
use crate::models::common::{PaginationInfo, normalize_page};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait, Select,
};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 连接数据库并执行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        // 内存库每个连接互相独立，只能使用单连接且不能回收
        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| BizDeskError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");
        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
        }

        let mut pool_options = SqlitePoolOptions::new()
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout));
        pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options
                .max_connections(pool_size)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .connect_with(opt)
            .await
            .map_err(|e| BizDeskError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(5.min(pool_size))
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| BizDeskError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(BizDeskError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 分页查询，`label` 用于错误信息
    pub(crate) async fn fetch_page<E>(
        &self,
        select: Select<E>,
        page: Option<i64>,
        size: Option<i64>,
        label: &str,
    ) -> Result<(Vec<E::Model>, PaginationInfo)>
    where
        E: EntityTrait,
        E::Model: Sync + 'static,
    {
        let (page, size) = normalize_page(page, size);
        let paginator = select.paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询{label}总数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询{label}列表失败: {e}")))?;

        Ok((
            items,
            PaginationInfo::new(page, size, total, total.div_ceil(size)),
        ))
    }
}

// Storage trait 实现
use crate::models::{
    attendance::{Attendance, AttendanceExportQuery, AttendanceListQuery, AttendanceListResponse,
        RecordAttendanceRequest},
    businesses::{Business, CreateBusinessRequest, UpdateBusinessRequest},
    courses::{
        ClassSchedule, Course, CourseListQuery, CourseListResponse, CreateCourseRequest,
        ScheduleInput, ScheduleListItem, ScheduleListQuery, UpdateCourseRequest,
    },
    employee_payments::{EmployeePayment, EmployeePaymentListQuery, EmployeePaymentListResponse},
    employees::{
        CreateEmployeeRequest, Employee, EmployeeListQuery, EmployeeListResponse,
        UpdateEmployeeRequest,
    },
    enrollments::{
        CreateEnrollmentRequest, Enrollment, EnrollmentListQuery, EnrollmentListResponse,
        EnrollmentStatus,
    },
    fees::{
        FeeExportQuery, FeeListQuery, FeeListResponse, NewStudentFee, PaymentMethod, StudentFee,
        UpdateFeeRequest,
    },
    grades::{CreateGradeRequest, Grade, GradeListQuery, GradeListResponse, UpdateGradeRequest},
    notifications::{NewNotification, Notification, NotificationListQuery, NotificationListResponse},
    payroll::{CommissionSettlement, NewSettlement, SettlementListQuery, SettlementListResponse},
    reports::DashboardSummary,
    restaurant::{
        CreateOrderRequest, CreateReservationRequest, CreateTableRequest, DiningTable, Order,
        OrderDetail, OrderItemInput, OrderListQuery, OrderListResponse, OrderStatus, Reservation,
        ReservationListQuery, ReservationListResponse, TableStatus, UpdateReservationRequest,
        UpdateTableRequest,
    },
    scheduled_payments::{
        CreateScheduledPaymentRequest, ScheduledPayment, ScheduledPaymentListQuery,
        ScheduledPaymentListResponse, ScheduledPaymentRun, UpdateScheduledPaymentRequest,
    },
    students::{
        CreateStudentRequest, Student, StudentListQuery, StudentListResponse, StudentStatus,
        UpdateStudentRequest,
    },
    users::{CreateUserRequest, UpdateUserRequest, User, UserListQuery, UserListResponse, UserRole},
};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 商户模块
    async fn create_business_with_owner(
        &self,
        business: CreateBusinessRequest,
        owner: CreateUserRequest,
    ) -> Result<(Business, User)> {
        self.create_business_with_owner_impl(business, owner).await
    }

    async fn get_business(&self, business_id: i64) -> Result<Option<Business>> {
        self.get_business_impl(business_id).await
    }

    async fn update_business(
        &self,
        business_id: i64,
        update: UpdateBusinessRequest,
    ) -> Result<Option<Business>> {
        self.update_business_impl(business_id, update).await
    }

    // 用户模块
    async fn create_user(&self, business_id: i64, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(business_id, user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user(&self, business_id: i64, id: i64) -> Result<Option<User>> {
        self.get_user_impl(business_id, id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(
        &self,
        business_id: i64,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(business_id, query).await
    }

    async fn list_users_by_roles(
        &self,
        business_id: i64,
        roles: &[UserRole],
    ) -> Result<Vec<User>> {
        self.list_users_by_roles_impl(business_id, roles).await
    }

    async fn update_user(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        self.update_user_impl(business_id, id, update).await
    }

    async fn delete_user(&self, business_id: i64, id: i64) -> Result<bool> {
        self.delete_user_impl(business_id, id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 员工模块
    async fn create_employee(
        &self,
        business_id: i64,
        req: CreateEmployeeRequest,
    ) -> Result<Employee> {
        self.create_employee_impl(business_id, req).await
    }

    async fn get_employee(&self, business_id: i64, id: i64) -> Result<Option<Employee>> {
        self.get_employee_impl(business_id, id).await
    }

    async fn list_employees_with_pagination(
        &self,
        business_id: i64,
        query: EmployeeListQuery,
    ) -> Result<EmployeeListResponse> {
        self.list_employees_with_pagination_impl(business_id, query)
            .await
    }

    async fn list_active_employees(&self, business_id: i64) -> Result<Vec<Employee>> {
        self.list_active_employees_impl(business_id).await
    }

    async fn update_employee(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateEmployeeRequest,
    ) -> Result<Option<Employee>> {
        self.update_employee_impl(business_id, id, update).await
    }

    async fn delete_employee(&self, business_id: i64, id: i64) -> Result<bool> {
        self.delete_employee_impl(business_id, id).await
    }

    // 学员模块
    async fn create_student(
        &self,
        business_id: i64,
        req: CreateStudentRequest,
    ) -> Result<Student> {
        self.create_student_impl(business_id, req).await
    }

    async fn get_student(&self, business_id: i64, id: i64) -> Result<Option<Student>> {
        self.get_student_impl(business_id, id).await
    }

    async fn list_students_with_pagination(
        &self,
        business_id: i64,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(business_id, query)
            .await
    }

    async fn list_students_for_export(
        &self,
        business_id: i64,
        status: Option<StudentStatus>,
        limit: u64,
    ) -> Result<Vec<Student>> {
        self.list_students_for_export_impl(business_id, status, limit)
            .await
    }

    async fn update_student(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(business_id, id, update).await
    }

    async fn delete_student(&self, business_id: i64, id: i64) -> Result<bool> {
        self.delete_student_impl(business_id, id).await
    }

    // 课程模块
    async fn create_course_with_schedules(
        &self,
        business_id: i64,
        req: CreateCourseRequest,
    ) -> Result<(Course, Vec<ClassSchedule>)> {
        self.create_course_with_schedules_impl(business_id, req)
            .await
    }

    async fn get_course(&self, business_id: i64, id: i64) -> Result<Option<Course>> {
        self.get_course_impl(business_id, id).await
    }

    async fn list_courses_with_pagination(
        &self,
        business_id: i64,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(business_id, query)
            .await
    }

    async fn list_all_courses(&self, business_id: i64) -> Result<Vec<Course>> {
        self.list_all_courses_impl(business_id).await
    }

    async fn update_course(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(business_id, id, update).await
    }

    async fn delete_course(&self, business_id: i64, id: i64) -> Result<bool> {
        self.delete_course_impl(business_id, id).await
    }

    // 排课模块
    async fn list_schedules(
        &self,
        business_id: i64,
        query: ScheduleListQuery,
    ) -> Result<Vec<ScheduleListItem>> {
        self.list_schedules_impl(business_id, query).await
    }

    async fn list_course_schedules(
        &self,
        business_id: i64,
        course_id: i64,
    ) -> Result<Vec<ClassSchedule>> {
        self.list_course_schedules_impl(business_id, course_id)
            .await
    }

    async fn create_schedules(
        &self,
        business_id: i64,
        course_id: i64,
        schedules: Vec<ScheduleInput>,
    ) -> Result<Vec<ClassSchedule>> {
        self.create_schedules_impl(business_id, course_id, schedules)
            .await
    }

    async fn get_schedule(&self, business_id: i64, id: i64) -> Result<Option<ClassSchedule>> {
        self.get_schedule_impl(business_id, id).await
    }

    async fn update_schedule(
        &self,
        business_id: i64,
        id: i64,
        schedule: ScheduleInput,
    ) -> Result<Option<ClassSchedule>> {
        self.update_schedule_impl(business_id, id, schedule).await
    }

    async fn delete_schedule(&self, business_id: i64, id: i64) -> Result<bool> {
        self.delete_schedule_impl(business_id, id).await
    }

    // 报名模块
    async fn create_enrollment(
        &self,
        business_id: i64,
        req: CreateEnrollmentRequest,
    ) -> Result<Enrollment> {
        self.create_enrollment_impl(business_id, req).await
    }

    async fn get_enrollment(&self, business_id: i64, id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(business_id, id).await
    }

    async fn find_enrollment(
        &self,
        business_id: i64,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        self.find_enrollment_impl(business_id, student_id, course_id)
            .await
    }

    async fn count_active_enrollments(&self, business_id: i64, course_id: i64) -> Result<u64> {
        self.count_active_enrollments_impl(business_id, course_id)
            .await
    }

    async fn list_enrollments_with_pagination(
        &self,
        business_id: i64,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse> {
        self.list_enrollments_with_pagination_impl(business_id, query)
            .await
    }

    async fn update_enrollment_status(
        &self,
        business_id: i64,
        id: i64,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>> {
        self.update_enrollment_status_impl(business_id, id, status)
            .await
    }

    async fn delete_enrollment(&self, business_id: i64, id: i64) -> Result<bool> {
        self.delete_enrollment_impl(business_id, id).await
    }

    // 考勤模块
    async fn upsert_attendance(
        &self,
        business_id: i64,
        recorded_by: i64,
        req: RecordAttendanceRequest,
    ) -> Result<Vec<Attendance>> {
        self.upsert_attendance_impl(business_id, recorded_by, req)
            .await
    }

    async fn list_attendance_with_pagination(
        &self,
        business_id: i64,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        self.list_attendance_with_pagination_impl(business_id, query)
            .await
    }

    async fn list_attendance_for_export(
        &self,
        business_id: i64,
        query: AttendanceExportQuery,
        limit: u64,
    ) -> Result<Vec<Attendance>> {
        self.list_attendance_for_export_impl(business_id, query, limit)
            .await
    }

    // 成绩模块
    async fn create_grade(
        &self,
        business_id: i64,
        graded_by: i64,
        req: CreateGradeRequest,
    ) -> Result<Grade> {
        self.create_grade_impl(business_id, graded_by, req).await
    }

    async fn get_grade(&self, business_id: i64, id: i64) -> Result<Option<Grade>> {
        self.get_grade_impl(business_id, id).await
    }

    async fn list_grades_with_pagination(
        &self,
        business_id: i64,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        self.list_grades_with_pagination_impl(business_id, query)
            .await
    }

    async fn update_grade(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateGradeRequest,
    ) -> Result<Option<Grade>> {
        self.update_grade_impl(business_id, id, update).await
    }

    async fn delete_grade(&self, business_id: i64, id: i64) -> Result<bool> {
        self.delete_grade_impl(business_id, id).await
    }

    // 学费模块
    async fn create_fee(&self, business_id: i64, fee: NewStudentFee) -> Result<StudentFee> {
        self.create_fee_impl(business_id, fee).await
    }

    async fn get_fee(&self, business_id: i64, id: i64) -> Result<Option<StudentFee>> {
        self.get_fee_impl(business_id, id).await
    }

    async fn list_fees_with_pagination(
        &self,
        business_id: i64,
        query: FeeListQuery,
    ) -> Result<FeeListResponse> {
        self.list_fees_with_pagination_impl(business_id, query)
            .await
    }

    async fn list_fees_for_export(
        &self,
        business_id: i64,
        query: FeeExportQuery,
        limit: u64,
    ) -> Result<Vec<StudentFee>> {
        self.list_fees_for_export_impl(business_id, query, limit)
            .await
    }

    async fn list_paid_fees(
        &self,
        business_id: i64,
        from_ts: i64,
        to_ts: i64,
        unsettled_only: bool,
    ) -> Result<Vec<StudentFee>> {
        self.list_paid_fees_impl(business_id, from_ts, to_ts, unsettled_only)
            .await
    }

    async fn update_fee(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateFeeRequest,
    ) -> Result<Option<StudentFee>> {
        self.update_fee_impl(business_id, id, update).await
    }

    async fn pay_fee(
        &self,
        business_id: i64,
        id: i64,
        method: PaymentMethod,
        paid_at: i64,
    ) -> Result<Option<StudentFee>> {
        self.pay_fee_impl(business_id, id, method, paid_at).await
    }

    async fn delete_fee(&self, business_id: i64, id: i64) -> Result<bool> {
        self.delete_fee_impl(business_id, id).await
    }

    async fn mark_overdue_fees(&self, business_id: i64, today: NaiveDate) -> Result<u64> {
        self.mark_overdue_fees_impl(business_id, today).await
    }

    // 定期付款模块
    async fn create_scheduled_payment(
        &self,
        business_id: i64,
        req: CreateScheduledPaymentRequest,
    ) -> Result<ScheduledPayment> {
        self.create_scheduled_payment_impl(business_id, req).await
    }

    async fn get_scheduled_payment(
        &self,
        business_id: i64,
        id: i64,
    ) -> Result<Option<ScheduledPayment>> {
        self.get_scheduled_payment_impl(business_id, id).await
    }

    async fn list_scheduled_payments_with_pagination(
        &self,
        business_id: i64,
        query: ScheduledPaymentListQuery,
    ) -> Result<ScheduledPaymentListResponse> {
        self.list_scheduled_payments_with_pagination_impl(business_id, query)
            .await
    }

    async fn list_due_scheduled_payments(
        &self,
        business_id: i64,
        as_of: NaiveDate,
    ) -> Result<Vec<ScheduledPayment>> {
        self.list_due_scheduled_payments_impl(business_id, as_of)
            .await
    }

    async fn update_scheduled_payment(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateScheduledPaymentRequest,
    ) -> Result<Option<ScheduledPayment>> {
        self.update_scheduled_payment_impl(business_id, id, update)
            .await
    }

    async fn delete_scheduled_payment(&self, business_id: i64, id: i64) -> Result<bool> {
        self.delete_scheduled_payment_impl(business_id, id).await
    }

    async fn apply_scheduled_payment_run(
        &self,
        business_id: i64,
        run: ScheduledPaymentRun,
    ) -> Result<u32> {
        self.apply_scheduled_payment_run_impl(business_id, run)
            .await
    }

    // 员工付款模块
    async fn get_employee_payment(
        &self,
        business_id: i64,
        id: i64,
    ) -> Result<Option<EmployeePayment>> {
        self.get_employee_payment_impl(business_id, id).await
    }

    async fn list_employee_payments_with_pagination(
        &self,
        business_id: i64,
        query: EmployeePaymentListQuery,
    ) -> Result<EmployeePaymentListResponse> {
        self.list_employee_payments_with_pagination_impl(business_id, query)
            .await
    }

    async fn pay_employee_payment(
        &self,
        business_id: i64,
        id: i64,
    ) -> Result<Option<EmployeePayment>> {
        self.pay_employee_payment_impl(business_id, id).await
    }

    // 佣金结算模块
    async fn create_settlement(
        &self,
        business_id: i64,
        settlement: NewSettlement,
    ) -> Result<CommissionSettlement> {
        self.create_settlement_impl(business_id, settlement).await
    }

    async fn list_settlements_with_pagination(
        &self,
        business_id: i64,
        query: SettlementListQuery,
    ) -> Result<SettlementListResponse> {
        self.list_settlements_with_pagination_impl(business_id, query)
            .await
    }

    // 通知模块
    async fn create_notification(
        &self,
        business_id: i64,
        notification: NewNotification,
    ) -> Result<Notification> {
        self.create_notification_impl(business_id, notification)
            .await
    }

    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_with_pagination_impl(user_id, query)
            .await
    }

    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64> {
        self.get_unread_notification_count_impl(user_id).await
    }

    async fn mark_notification_as_read(&self, user_id: i64, id: i64) -> Result<bool> {
        self.mark_notification_as_read_impl(user_id, id).await
    }

    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<i64> {
        self.mark_all_notifications_as_read_impl(user_id).await
    }

    // 餐桌模块
    async fn create_table(
        &self,
        business_id: i64,
        req: CreateTableRequest,
    ) -> Result<DiningTable> {
        self.create_table_impl(business_id, req).await
    }

    async fn get_table(&self, business_id: i64, id: i64) -> Result<Option<DiningTable>> {
        self.get_table_impl(business_id, id).await
    }

    async fn list_tables(&self, business_id: i64) -> Result<Vec<DiningTable>> {
        self.list_tables_impl(business_id).await
    }

    async fn update_table(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateTableRequest,
    ) -> Result<Option<DiningTable>> {
        self.update_table_impl(business_id, id, update).await
    }

    async fn set_table_status(
        &self,
        business_id: i64,
        id: i64,
        status: TableStatus,
    ) -> Result<bool> {
        self.set_table_status_impl(business_id, id, status).await
    }

    async fn delete_table(&self, business_id: i64, id: i64) -> Result<bool> {
        self.delete_table_impl(business_id, id).await
    }

    // 订单模块
    async fn create_order(
        &self,
        business_id: i64,
        created_by: i64,
        req: CreateOrderRequest,
    ) -> Result<OrderDetail> {
        self.create_order_impl(business_id, created_by, req).await
    }

    async fn get_order_detail(&self, business_id: i64, id: i64) -> Result<Option<OrderDetail>> {
        self.get_order_detail_impl(business_id, id).await
    }

    async fn list_orders_with_pagination(
        &self,
        business_id: i64,
        query: OrderListQuery,
    ) -> Result<OrderListResponse> {
        self.list_orders_with_pagination_impl(business_id, query)
            .await
    }

    async fn add_order_items(
        &self,
        business_id: i64,
        order_id: i64,
        items: Vec<OrderItemInput>,
    ) -> Result<Option<OrderDetail>> {
        self.add_order_items_impl(business_id, order_id, items)
            .await
    }

    async fn remove_order_item(
        &self,
        business_id: i64,
        order_id: i64,
        item_id: i64,
    ) -> Result<Option<OrderDetail>> {
        self.remove_order_item_impl(business_id, order_id, item_id)
            .await
    }

    async fn close_order(
        &self,
        business_id: i64,
        order_id: i64,
        status: OrderStatus,
        payment_method: Option<PaymentMethod>,
        tip: f64,
    ) -> Result<Option<Order>> {
        self.close_order_impl(business_id, order_id, status, payment_method, tip)
            .await
    }

    // 预订模块
    async fn create_reservation(
        &self,
        business_id: i64,
        req: CreateReservationRequest,
    ) -> Result<Reservation> {
        self.create_reservation_impl(business_id, req).await
    }

    async fn get_reservation(&self, business_id: i64, id: i64) -> Result<Option<Reservation>> {
        self.get_reservation_impl(business_id, id).await
    }

    async fn list_reservations_with_pagination(
        &self,
        business_id: i64,
        query: ReservationListQuery,
    ) -> Result<ReservationListResponse> {
        self.list_reservations_with_pagination_impl(business_id, query)
            .await
    }

    async fn update_reservation(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateReservationRequest,
    ) -> Result<Option<Reservation>> {
        self.update_reservation_impl(business_id, id, update).await
    }

    // 报表模块
    async fn get_dashboard_summary(
        &self,
        business_id: i64,
        user_id: i64,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<DashboardSummary> {
        self.get_dashboard_summary_impl(business_id, user_id, start, end)
            .await
    }
}
