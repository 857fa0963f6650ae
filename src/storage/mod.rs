//! 存储层
//!
//! 所有查询都以调用者的 `business_id` 作为租户范围，
//! 其他商户的数据与不存在的数据表现一致。

use std::sync::Arc;

use chrono::NaiveDate;

use crate::errors::Result;
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

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 商户管理方法
    // 注册：在同一事务中创建商户和所有者账号（密码已哈希）
    async fn create_business_with_owner(
        &self,
        business: CreateBusinessRequest,
        owner: CreateUserRequest,
    ) -> Result<(Business, User)>;
    async fn get_business(&self, business_id: i64) -> Result<Option<Business>>;
    async fn update_business(
        &self,
        business_id: i64,
        update: UpdateBusinessRequest,
    ) -> Result<Option<Business>>;

    /// 用户管理方法
    // 创建用户（密码已哈希）
    async fn create_user(&self, business_id: i64, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息，不限租户，仅供认证使用
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user(&self, business_id: i64, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    async fn list_users_with_pagination(
        &self,
        business_id: i64,
        query: UserListQuery,
    ) -> Result<UserListResponse>;
    // 列出指定角色的活跃用户（通知收件人）
    async fn list_users_by_roles(&self, business_id: i64, roles: &[UserRole])
    -> Result<Vec<User>>;
    async fn update_user(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>>;
    async fn delete_user(&self, business_id: i64, id: i64) -> Result<bool>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;

    /// 员工管理方法
    async fn create_employee(
        &self,
        business_id: i64,
        req: CreateEmployeeRequest,
    ) -> Result<Employee>;
    async fn get_employee(&self, business_id: i64, id: i64) -> Result<Option<Employee>>;
    async fn list_employees_with_pagination(
        &self,
        business_id: i64,
        query: EmployeeListQuery,
    ) -> Result<EmployeeListResponse>;
    async fn list_active_employees(&self, business_id: i64) -> Result<Vec<Employee>>;
    async fn update_employee(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateEmployeeRequest,
    ) -> Result<Option<Employee>>;
    async fn delete_employee(&self, business_id: i64, id: i64) -> Result<bool>;

    /// 学员管理方法
    async fn create_student(&self, business_id: i64, req: CreateStudentRequest)
    -> Result<Student>;
    async fn get_student(&self, business_id: i64, id: i64) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        business_id: i64,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn list_students_for_export(
        &self,
        business_id: i64,
        status: Option<StudentStatus>,
        limit: u64,
    ) -> Result<Vec<Student>>;
    async fn update_student(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, business_id: i64, id: i64) -> Result<bool>;

    /// 课程管理方法
    // 在同一事务中创建课程及其排课
    async fn create_course_with_schedules(
        &self,
        business_id: i64,
        req: CreateCourseRequest,
    ) -> Result<(Course, Vec<ClassSchedule>)>;
    async fn get_course(&self, business_id: i64, id: i64) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        business_id: i64,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    async fn list_all_courses(&self, business_id: i64) -> Result<Vec<Course>>;
    async fn update_course(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    async fn delete_course(&self, business_id: i64, id: i64) -> Result<bool>;

    /// 排课管理方法
    async fn list_schedules(
        &self,
        business_id: i64,
        query: ScheduleListQuery,
    ) -> Result<Vec<ScheduleListItem>>;
    async fn list_course_schedules(
        &self,
        business_id: i64,
        course_id: i64,
    ) -> Result<Vec<ClassSchedule>>;
    async fn create_schedules(
        &self,
        business_id: i64,
        course_id: i64,
        schedules: Vec<ScheduleInput>,
    ) -> Result<Vec<ClassSchedule>>;
    async fn get_schedule(&self, business_id: i64, id: i64) -> Result<Option<ClassSchedule>>;
    async fn update_schedule(
        &self,
        business_id: i64,
        id: i64,
        schedule: ScheduleInput,
    ) -> Result<Option<ClassSchedule>>;
    async fn delete_schedule(&self, business_id: i64, id: i64) -> Result<bool>;

    /// 报名管理方法
    async fn create_enrollment(
        &self,
        business_id: i64,
        req: CreateEnrollmentRequest,
    ) -> Result<Enrollment>;
    async fn get_enrollment(&self, business_id: i64, id: i64) -> Result<Option<Enrollment>>;
    async fn find_enrollment(
        &self,
        business_id: i64,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>>;
    async fn count_active_enrollments(&self, business_id: i64, course_id: i64) -> Result<u64>;
    async fn list_enrollments_with_pagination(
        &self,
        business_id: i64,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse>;
    async fn update_enrollment_status(
        &self,
        business_id: i64,
        id: i64,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>>;
    async fn delete_enrollment(&self, business_id: i64, id: i64) -> Result<bool>;

    /// 考勤管理方法
    // 按 (学员, 课程, 日期) 覆盖写入
    async fn upsert_attendance(
        &self,
        business_id: i64,
        recorded_by: i64,
        req: RecordAttendanceRequest,
    ) -> Result<Vec<Attendance>>;
    async fn list_attendance_with_pagination(
        &self,
        business_id: i64,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse>;
    async fn list_attendance_for_export(
        &self,
        business_id: i64,
        query: AttendanceExportQuery,
        limit: u64,
    ) -> Result<Vec<Attendance>>;

    /// 成绩管理方法
    async fn create_grade(
        &self,
        business_id: i64,
        graded_by: i64,
        req: CreateGradeRequest,
    ) -> Result<Grade>;
    async fn get_grade(&self, business_id: i64, id: i64) -> Result<Option<Grade>>;
    async fn list_grades_with_pagination(
        &self,
        business_id: i64,
        query: GradeListQuery,
    ) -> Result<GradeListResponse>;
    async fn update_grade(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateGradeRequest,
    ) -> Result<Option<Grade>>;
    async fn delete_grade(&self, business_id: i64, id: i64) -> Result<bool>;

    /// 学费管理方法
    async fn create_fee(&self, business_id: i64, fee: NewStudentFee) -> Result<StudentFee>;
    async fn get_fee(&self, business_id: i64, id: i64) -> Result<Option<StudentFee>>;
    async fn list_fees_with_pagination(
        &self,
        business_id: i64,
        query: FeeListQuery,
    ) -> Result<FeeListResponse>;
    async fn list_fees_for_export(
        &self,
        business_id: i64,
        query: FeeExportQuery,
        limit: u64,
    ) -> Result<Vec<StudentFee>>;
    // 已付学费，paid_at 在 [from_ts, to_ts) 内
    async fn list_paid_fees(
        &self,
        business_id: i64,
        from_ts: i64,
        to_ts: i64,
        unsettled_only: bool,
    ) -> Result<Vec<StudentFee>>;
    async fn update_fee(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateFeeRequest,
    ) -> Result<Option<StudentFee>>;
    async fn pay_fee(
        &self,
        business_id: i64,
        id: i64,
        method: PaymentMethod,
        paid_at: i64,
    ) -> Result<Option<StudentFee>>;
    async fn delete_fee(&self, business_id: i64, id: i64) -> Result<bool>;
    // 将到期未付的学费标记为逾期，返回更新条数
    async fn mark_overdue_fees(&self, business_id: i64, today: NaiveDate) -> Result<u64>;

    /// 定期付款方法
    async fn create_scheduled_payment(
        &self,
        business_id: i64,
        req: CreateScheduledPaymentRequest,
    ) -> Result<ScheduledPayment>;
    async fn get_scheduled_payment(
        &self,
        business_id: i64,
        id: i64,
    ) -> Result<Option<ScheduledPayment>>;
    async fn list_scheduled_payments_with_pagination(
        &self,
        business_id: i64,
        query: ScheduledPaymentListQuery,
    ) -> Result<ScheduledPaymentListResponse>;
    async fn list_due_scheduled_payments(
        &self,
        business_id: i64,
        as_of: NaiveDate,
    ) -> Result<Vec<ScheduledPayment>>;
    async fn update_scheduled_payment(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateScheduledPaymentRequest,
    ) -> Result<Option<ScheduledPayment>>;
    async fn delete_scheduled_payment(&self, business_id: i64, id: i64) -> Result<bool>;
    // 在一个事务内写入生成的记录并推进规则，返回生成条数
    async fn apply_scheduled_payment_run(
        &self,
        business_id: i64,
        run: ScheduledPaymentRun,
    ) -> Result<u32>;

    /// 员工付款方法
    async fn get_employee_payment(
        &self,
        business_id: i64,
        id: i64,
    ) -> Result<Option<EmployeePayment>>;
    async fn list_employee_payments_with_pagination(
        &self,
        business_id: i64,
        query: EmployeePaymentListQuery,
    ) -> Result<EmployeePaymentListResponse>;
    async fn pay_employee_payment(
        &self,
        business_id: i64,
        id: i64,
    ) -> Result<Option<EmployeePayment>>;

    /// 佣金结算方法
    // 在一个事务内创建已付的佣金付款、结算记录，并标记学费
    async fn create_settlement(
        &self,
        business_id: i64,
        settlement: NewSettlement,
    ) -> Result<CommissionSettlement>;
    async fn list_settlements_with_pagination(
        &self,
        business_id: i64,
        query: SettlementListQuery,
    ) -> Result<SettlementListResponse>;

    /// 通知方法
    async fn create_notification(
        &self,
        business_id: i64,
        notification: NewNotification,
    ) -> Result<Notification>;
    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse>;
    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64>;
    async fn mark_notification_as_read(&self, user_id: i64, id: i64) -> Result<bool>;
    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<i64>;

    /// 餐饮：餐桌
    async fn create_table(&self, business_id: i64, req: CreateTableRequest)
    -> Result<DiningTable>;
    async fn get_table(&self, business_id: i64, id: i64) -> Result<Option<DiningTable>>;
    async fn list_tables(&self, business_id: i64) -> Result<Vec<DiningTable>>;
    async fn update_table(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateTableRequest,
    ) -> Result<Option<DiningTable>>;
    async fn set_table_status(
        &self,
        business_id: i64,
        id: i64,
        status: TableStatus,
    ) -> Result<bool>;
    async fn delete_table(&self, business_id: i64, id: i64) -> Result<bool>;

    /// 餐饮：订单
    async fn create_order(
        &self,
        business_id: i64,
        created_by: i64,
        req: CreateOrderRequest,
    ) -> Result<OrderDetail>;
    async fn get_order_detail(&self, business_id: i64, id: i64) -> Result<Option<OrderDetail>>;
    async fn list_orders_with_pagination(
        &self,
        business_id: i64,
        query: OrderListQuery,
    ) -> Result<OrderListResponse>;
    async fn add_order_items(
        &self,
        business_id: i64,
        order_id: i64,
        items: Vec<OrderItemInput>,
    ) -> Result<Option<OrderDetail>>;
    async fn remove_order_item(
        &self,
        business_id: i64,
        order_id: i64,
        item_id: i64,
    ) -> Result<Option<OrderDetail>>;
    // 结账或取消，释放餐桌
    async fn close_order(
        &self,
        business_id: i64,
        order_id: i64,
        status: OrderStatus,
        payment_method: Option<PaymentMethod>,
        tip: f64,
    ) -> Result<Option<Order>>;

    /// 餐饮：预订
    async fn create_reservation(
        &self,
        business_id: i64,
        req: CreateReservationRequest,
    ) -> Result<Reservation>;
    async fn get_reservation(&self, business_id: i64, id: i64) -> Result<Option<Reservation>>;
    async fn list_reservations_with_pagination(
        &self,
        business_id: i64,
        query: ReservationListQuery,
    ) -> Result<ReservationListResponse>;
    async fn update_reservation(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateReservationRequest,
    ) -> Result<Option<Reservation>>;

    /// 报表
    async fn get_dashboard_summary(
        &self,
        business_id: i64,
        user_id: i64,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<DashboardSummary>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
