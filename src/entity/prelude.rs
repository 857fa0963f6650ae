//! 预导入模块，方便使用

pub use super::attendance::{Entity as Attendance, Model as AttendanceModel};
pub use super::businesses::{Entity as Businesses, Model as BusinessModel};
pub use super::class_schedules::{Entity as ClassSchedules, Model as ClassScheduleModel};
pub use super::commission_settlements::{
    Entity as CommissionSettlements, Model as CommissionSettlementModel,
};
pub use super::courses::{Entity as Courses, Model as CourseModel};
pub use super::dining_tables::{Entity as DiningTables, Model as DiningTableModel};
pub use super::employee_payments::{Entity as EmployeePayments, Model as EmployeePaymentModel};
pub use super::employees::{Entity as Employees, Model as EmployeeModel};
pub use super::enrollments::{Entity as Enrollments, Model as EnrollmentModel};
pub use super::grades::{Entity as Grades, Model as GradeModel};
pub use super::notifications::{Entity as Notifications, Model as NotificationModel};
pub use super::order_items::{Entity as OrderItems, Model as OrderItemModel};
pub use super::orders::{Entity as Orders, Model as OrderModel};
pub use super::reservations::{Entity as Reservations, Model as ReservationModel};
pub use super::scheduled_payments::{
    Entity as ScheduledPayments, Model as ScheduledPaymentModel,
};
pub use super::student_fees::{Entity as StudentFees, Model as StudentFeeModel};
pub use super::students::{Entity as Students, Model as StudentModel};
pub use super::users::{Entity as Users, Model as UserModel};
