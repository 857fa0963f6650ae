use super::SeaOrmStorage;
use crate::models::{
    attendance::{AttendanceEntry, AttendanceListQuery, AttendanceStatus, RecordAttendanceRequest},
    businesses::{Business, BusinessType, CreateBusinessRequest},
    courses::{
        CourseStatus, CreateCourseRequest, ScheduleInput, ScheduleListQuery, UpdateCourseRequest,
    },
    employee_payments::{EmployeePaymentKind, NewEmployeePayment},
    employees::{CreateEmployeeRequest, PaymentModel},
    fees::{FeeListQuery, FeeStatus, NewStudentFee, PaymentMethod},
    payroll::NewSettlement,
    restaurant::{CreateOrderRequest, CreateTableRequest, OrderItemInput, OrderStatus, TableStatus},
    scheduled_payments::{
        CreateScheduledPaymentRequest, PaymentTarget, Recurrence, ScheduledPaymentRun,
    },
    students::{CreateStudentRequest, StudentListQuery},
    users::{CreateUserRequest, User, UserRole},
};
use crate::storage::Storage;
use chrono::NaiveDate;

async fn storage() -> SeaOrmStorage {
    SeaOrmStorage::connect("sqlite::memory:", 1, 5)
        .await
        .expect("in-memory database")
}

async fn register(storage: &SeaOrmStorage, name: &str) -> (Business, User) {
    storage
        .create_business_with_owner(
            CreateBusinessRequest {
                name: name.to_string(),
                business_type: BusinessType::School,
                currency: "USD".to_string(),
            },
            CreateUserRequest {
                username: format!("{}_owner", name.to_lowercase()),
                email: format!("owner@{}.test", name.to_lowercase()),
                password: "hashed".to_string(),
                role: UserRole::Owner,
                display_name: None,
            },
        )
        .await
        .expect("register business")
}

async fn student(storage: &SeaOrmStorage, business_id: i64, name: &str) -> i64 {
    storage
        .create_student(
            business_id,
            CreateStudentRequest {
                name: name.to_string(),
                email: None,
                phone: None,
                guardian_name: None,
            },
        )
        .await
        .expect("create student")
        .id
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fee(student_id: i64, course_id: Option<i64>, amount: f64, due: NaiveDate) -> NewStudentFee {
    NewStudentFee {
        student_id,
        course_id,
        scheduled_payment_id: None,
        description: "Tuition".to_string(),
        amount,
        due_date: due,
    }
}

#[tokio::test]
async fn test_register_creates_business_and_owner() {
    let storage = storage().await;
    let (business, owner) = register(&storage, "Acme").await;

    assert_eq!(owner.business_id, business.id);
    assert_eq!(owner.role, UserRole::Owner);
    assert_eq!(storage.count_users().await.unwrap(), 1);
    assert!(
        storage
            .get_user_by_username_or_email("owner@acme.test")
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_duplicate_username_is_unique_violation() {
    let storage = storage().await;
    let (business, _) = register(&storage, "Acme").await;

    let err = storage
        .create_user(
            business.id,
            CreateUserRequest {
                username: "acme_owner".to_string(),
                email: "other@acme.test".to_string(),
                password: "hashed".to_string(),
                role: UserRole::Staff,
                display_name: None,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_unique_violation());
}

#[tokio::test]
async fn test_tenant_isolation() {
    let storage = storage().await;
    let (a, _) = register(&storage, "Alpha").await;
    let (b, _) = register(&storage, "Beta").await;

    let id = student(&storage, a.id, "Ana").await;

    assert!(storage.get_student(a.id, id).await.unwrap().is_some());
    assert!(storage.get_student(b.id, id).await.unwrap().is_none());
    assert!(!storage.delete_student(b.id, id).await.unwrap());

    let listed = storage
        .list_students_with_pagination(b.id, StudentListQuery::default())
        .await
        .unwrap();
    assert_eq!(listed.pagination.total, 0);
}

#[tokio::test]
async fn test_attendance_upsert_keeps_one_row() {
    let storage = storage().await;
    let (business, owner) = register(&storage, "Acme").await;
    let student_id = student(&storage, business.id, "Ana").await;
    let (course, _) = storage
        .create_course_with_schedules(
            business.id,
            CreateCourseRequest {
                teacher_id: None,
                name: "Piano".to_string(),
                description: None,
                monthly_fee: 100.0,
                capacity: None,
                schedules: vec![],
                force_create: false,
            },
        )
        .await
        .unwrap();

    for status in [AttendanceStatus::Absent, AttendanceStatus::Late] {
        storage
            .upsert_attendance(
                business.id,
                owner.id,
                RecordAttendanceRequest {
                    course_id: course.id,
                    date: date(2025, 3, 3),
                    records: vec![AttendanceEntry {
                        student_id,
                        status,
                        notes: None,
                    }],
                },
            )
            .await
            .unwrap();
    }

    let list = storage
        .list_attendance_with_pagination(business.id, AttendanceListQuery::default())
        .await
        .unwrap();
    assert_eq!(list.pagination.total, 1);
    assert_eq!(list.items[0].status, AttendanceStatus::Late);
}

#[tokio::test]
async fn test_course_with_schedules_and_room_filter() {
    let storage = storage().await;
    let (business, _) = register(&storage, "Acme").await;

    let (course, schedules) = storage
        .create_course_with_schedules(
            business.id,
            CreateCourseRequest {
                teacher_id: None,
                name: "Guitar".to_string(),
                description: None,
                monthly_fee: 80.0,
                capacity: Some(10),
                schedules: vec![
                    ScheduleInput {
                        day_of_week: 1,
                        start_time: "09:00".to_string(),
                        end_time: "10:00".to_string(),
                        room: Some("Room A".to_string()),
                    },
                    ScheduleInput {
                        day_of_week: 3,
                        start_time: "09:00".to_string(),
                        end_time: "10:00".to_string(),
                        room: None,
                    },
                ],
                force_create: false,
            },
        )
        .await
        .unwrap();
    assert_eq!(schedules.len(), 2);

    let in_room = storage
        .list_schedules(
            business.id,
            ScheduleListQuery {
                room: Some(" room a ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(in_room.len(), 1);
    assert_eq!(in_room[0].course_name, "Guitar");
    assert_eq!(in_room[0].schedule.course_id, course.id);
}

#[tokio::test]
async fn test_archived_course_schedules_leave_active_listing() {
    let storage = storage().await;
    let (business, _) = register(&storage, "Acme").await;

    let (course, _) = storage
        .create_course_with_schedules(
            business.id,
            CreateCourseRequest {
                teacher_id: None,
                name: "Violin".to_string(),
                description: None,
                monthly_fee: 60.0,
                capacity: None,
                schedules: vec![ScheduleInput {
                    day_of_week: 2,
                    start_time: "14:00".to_string(),
                    end_time: "15:00".to_string(),
                    room: Some("Studio".to_string()),
                }],
                force_create: false,
            },
        )
        .await
        .unwrap();

    let active = storage
        .list_schedules(business.id, ScheduleListQuery::active())
        .await
        .unwrap();
    assert_eq!(active.len(), 1);

    storage
        .update_course(
            business.id,
            course.id,
            UpdateCourseRequest {
                teacher_id: None,
                name: None,
                description: None,
                monthly_fee: None,
                capacity: None,
                status: Some(CourseStatus::Archived),
            },
        )
        .await
        .unwrap()
        .expect("course exists");

    let active = storage
        .list_schedules(business.id, ScheduleListQuery::active())
        .await
        .unwrap();
    assert!(active.is_empty());

    let all = storage
        .list_schedules(business.id, ScheduleListQuery::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_scheduled_payment_run_rejects_stale_state() {
    let storage = storage().await;
    let (business, _) = register(&storage, "Acme").await;
    let student_id = student(&storage, business.id, "Ana").await;

    let schedule = storage
        .create_scheduled_payment(
            business.id,
            CreateScheduledPaymentRequest {
                target: PaymentTarget::StudentFee,
                student_id: Some(student_id),
                employee_id: None,
                course_id: None,
                description: "Monthly tuition".to_string(),
                amount: 120.0,
                recurrence: Recurrence::Monthly,
                day_of_month: None,
                start_date: date(2025, 1, 1),
                end_date: None,
            },
        )
        .await
        .unwrap();

    let run = ScheduledPaymentRun {
        scheduled_payment_id: schedule.id,
        expected_next_run_date: date(2025, 1, 1),
        fees: vec![NewStudentFee {
            scheduled_payment_id: Some(schedule.id),
            ..fee(student_id, None, 120.0, date(2025, 1, 1))
        }],
        employee_payments: vec![],
        last_run_date: Some(date(2025, 1, 1)),
        next_run_date: date(2025, 2, 1),
        is_active: true,
    };

    assert_eq!(
        storage
            .apply_scheduled_payment_run(business.id, run.clone())
            .await
            .unwrap(),
        1
    );
    let updated = storage
        .get_scheduled_payment(business.id, schedule.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.next_run_date, date(2025, 2, 1));
    assert_eq!(updated.last_run_date, Some(date(2025, 1, 1)));

    // 同一执行重放必须失败且不产生学费
    assert!(
        storage
            .apply_scheduled_payment_run(business.id, run)
            .await
            .is_err()
    );
    let fees = storage
        .list_fees_with_pagination(business.id, FeeListQuery::default())
        .await
        .unwrap();
    assert_eq!(fees.pagination.total, 1);
}

#[tokio::test]
async fn test_settlement_stamps_fees_once() {
    let storage = storage().await;
    let (business, owner) = register(&storage, "Acme").await;
    let student_id = student(&storage, business.id, "Ana").await;
    let teacher = storage
        .create_employee(
            business.id,
            CreateEmployeeRequest {
                user_id: None,
                name: "Tess".to_string(),
                email: None,
                position: None,
                payment_model: PaymentModel::Commission,
                hourly_rate: 0.0,
                commission_percentage: 40.0,
            },
        )
        .await
        .unwrap();

    let created = storage
        .create_fee(business.id, fee(student_id, None, 1000.0, date(2025, 3, 1)))
        .await
        .unwrap();
    let paid_at = date(2025, 3, 5).and_hms_opt(12, 0, 0).unwrap().and_utc().timestamp();
    storage
        .pay_fee(business.id, created.id, PaymentMethod::Cash, paid_at)
        .await
        .unwrap();

    let settlement = NewSettlement {
        employee_id: teacher.id,
        period_start: date(2025, 3, 1),
        period_end: date(2025, 3, 31),
        fee_ids: vec![created.id],
        gross_amount: 400.0,
        expense_reserve: 40.0,
        benefits_reserve: 20.0,
        net_amount: 340.0,
        created_by: owner.id,
    };
    let record = storage
        .create_settlement(business.id, settlement.clone())
        .await
        .unwrap();
    assert_eq!(record.fee_count, 1);
    assert!(record.employee_payment_id.is_some());

    let unsettled = storage
        .list_paid_fees(business.id, 0, i64::MAX, true)
        .await
        .unwrap();
    assert!(unsettled.is_empty());

    assert!(
        storage
            .create_settlement(business.id, settlement)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_employee_payment_insert_and_pay() {
    let storage = storage().await;
    let (business, _) = register(&storage, "Acme").await;
    let employee = storage
        .create_employee(
            business.id,
            CreateEmployeeRequest {
                user_id: None,
                name: "Sam".to_string(),
                email: None,
                position: None,
                payment_model: PaymentModel::Hourly,
                hourly_rate: 20.0,
                commission_percentage: 0.0,
            },
        )
        .await
        .unwrap();
    let schedule = storage
        .create_scheduled_payment(
            business.id,
            CreateScheduledPaymentRequest {
                target: PaymentTarget::EmployeeSalary,
                student_id: None,
                employee_id: Some(employee.id),
                course_id: None,
                description: "Salary".to_string(),
                amount: 900.0,
                recurrence: Recurrence::Biweekly,
                day_of_month: None,
                start_date: date(2025, 1, 3),
                end_date: Some(date(2025, 1, 10)),
            },
        )
        .await
        .unwrap();

    storage
        .apply_scheduled_payment_run(
            business.id,
            ScheduledPaymentRun {
                scheduled_payment_id: schedule.id,
                expected_next_run_date: date(2025, 1, 3),
                fees: vec![],
                employee_payments: vec![NewEmployeePayment {
                    employee_id: employee.id,
                    scheduled_payment_id: Some(schedule.id),
                    kind: EmployeePaymentKind::Salary,
                    description: "Salary".to_string(),
                    amount: 900.0,
                    payment_date: date(2025, 1, 3),
                }],
                last_run_date: Some(date(2025, 1, 3)),
                next_run_date: date(2025, 1, 17),
                is_active: false,
            },
        )
        .await
        .unwrap();

    let due = storage
        .list_due_scheduled_payments(business.id, date(2025, 12, 31))
        .await
        .unwrap();
    assert!(due.is_empty());

    let payments = storage
        .list_employee_payments_with_pagination(business.id, Default::default())
        .await
        .unwrap();
    assert_eq!(payments.items.len(), 1);
    let paid = storage
        .pay_employee_payment(business.id, payments.items[0].id)
        .await
        .unwrap()
        .unwrap();
    assert!(paid.paid_at.is_some());
}

#[tokio::test]
async fn test_mark_overdue_only_touches_past_pending() {
    let storage = storage().await;
    let (business, _) = register(&storage, "Acme").await;
    let student_id = student(&storage, business.id, "Ana").await;

    let past = storage
        .create_fee(business.id, fee(student_id, None, 50.0, date(2025, 1, 1)))
        .await
        .unwrap();
    let future = storage
        .create_fee(business.id, fee(student_id, None, 50.0, date(2025, 6, 1)))
        .await
        .unwrap();

    let marked = storage
        .mark_overdue_fees(business.id, date(2025, 3, 1))
        .await
        .unwrap();
    assert_eq!(marked, 1);

    let past = storage.get_fee(business.id, past.id).await.unwrap().unwrap();
    let future = storage.get_fee(business.id, future.id).await.unwrap().unwrap();
    assert_eq!(past.status, FeeStatus::Overdue);
    assert_eq!(future.status, FeeStatus::Pending);
}

#[tokio::test]
async fn test_order_lifecycle_updates_table_and_totals() {
    let storage = storage().await;
    let (business, owner) = register(&storage, "Bistro").await;
    let table = storage
        .create_table(
            business.id,
            CreateTableRequest {
                name: "T1".to_string(),
                capacity: 4,
            },
        )
        .await
        .unwrap();

    let order = storage
        .create_order(
            business.id,
            owner.id,
            CreateOrderRequest {
                table_id: Some(table.id),
                items: vec![OrderItemInput {
                    name: "Soup".to_string(),
                    unit_price: 4.5,
                    quantity: 2,
                    note: None,
                }],
            },
        )
        .await
        .unwrap();
    assert_eq!(order.order.subtotal, 9.0);
    let occupied = storage.get_table(business.id, table.id).await.unwrap().unwrap();
    assert_eq!(occupied.status, TableStatus::Occupied);

    let detail = storage
        .add_order_items(
            business.id,
            order.order.id,
            vec![OrderItemInput {
                name: "Tea".to_string(),
                unit_price: 1.1,
                quantity: 3,
                note: None,
            }],
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.items.len(), 2);
    assert_eq!(detail.order.subtotal, 12.3);

    let closed = storage
        .close_order(
            business.id,
            order.order.id,
            OrderStatus::Paid,
            Some(PaymentMethod::Card),
            1.7,
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(closed.total, 14.0);
    assert!(closed.closed_at.is_some());
    let freed = storage.get_table(business.id, table.id).await.unwrap().unwrap();
    assert_eq!(freed.status, TableStatus::Available);
}

#[tokio::test]
async fn test_dashboard_summary_counts() {
    let storage = storage().await;
    let (business, owner) = register(&storage, "Acme").await;
    let student_id = student(&storage, business.id, "Ana").await;
    student(&storage, business.id, "Ben").await;
    storage
        .create_fee(business.id, fee(student_id, None, 30.0, date(2030, 1, 1)))
        .await
        .unwrap();
    storage
        .create_fee(business.id, fee(student_id, None, 20.5, date(2030, 2, 1)))
        .await
        .unwrap();

    let summary = storage
        .get_dashboard_summary(business.id, owner.id, None, None)
        .await
        .unwrap();
    assert_eq!(summary.active_students, 2);
    assert_eq!(summary.pending_fees_count, 2);
    assert_eq!(summary.pending_fees_amount, 50.5);
    assert_eq!(summary.collected_amount, 0.0);
    assert_eq!(summary.unread_notifications, 0);
}
