use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_core_tables::{Businesses, Courses, Employees, Students, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建定期付款规则表
        manager
            .create_table(
                Table::create()
                    .table(ScheduledPayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScheduledPayments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ScheduledPayments::BusinessId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduledPayments::Target)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduledPayments::StudentId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ScheduledPayments::EmployeeId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ScheduledPayments::CourseId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ScheduledPayments::Description)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduledPayments::Amount)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduledPayments::Recurrence)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduledPayments::DayOfMonth)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ScheduledPayments::NextRunDate)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScheduledPayments::EndDate).string().null())
                    .col(
                        ColumnDef::new(ScheduledPayments::LastRunDate)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ScheduledPayments::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ScheduledPayments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduledPayments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ScheduledPayments::Table, ScheduledPayments::BusinessId)
                            .to(Businesses::Table, Businesses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ScheduledPayments::Table, ScheduledPayments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ScheduledPayments::Table, ScheduledPayments::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建佣金结算表
        manager
            .create_table(
                Table::create()
                    .table(CommissionSettlements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommissionSettlements::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CommissionSettlements::BusinessId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommissionSettlements::EmployeeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommissionSettlements::PeriodStart)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommissionSettlements::PeriodEnd)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommissionSettlements::FeeCount)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommissionSettlements::GrossAmount)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommissionSettlements::ExpenseReserve)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommissionSettlements::BenefitsReserve)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommissionSettlements::NetAmount)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommissionSettlements::EmployeePaymentId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CommissionSettlements::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommissionSettlements::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                CommissionSettlements::Table,
                                CommissionSettlements::EmployeeId,
                            )
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学生费用表
        manager
            .create_table(
                Table::create()
                    .table(StudentFees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentFees::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentFees::BusinessId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentFees::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentFees::CourseId).big_integer().null())
                    .col(
                        ColumnDef::new(StudentFees::ScheduledPaymentId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentFees::SettlementId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentFees::Description)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentFees::Amount).double().not_null())
                    .col(ColumnDef::new(StudentFees::DueDate).string().not_null())
                    .col(ColumnDef::new(StudentFees::Status).string().not_null())
                    .col(ColumnDef::new(StudentFees::PaidAt).big_integer().null())
                    .col(ColumnDef::new(StudentFees::PaymentMethod).string().null())
                    .col(
                        ColumnDef::new(StudentFees::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentFees::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentFees::Table, StudentFees::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentFees::Table, StudentFees::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentFees::Table, StudentFees::ScheduledPaymentId)
                            .to(ScheduledPayments::Table, ScheduledPayments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentFees::Table, StudentFees::SettlementId)
                            .to(CommissionSettlements::Table, CommissionSettlements::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建员工付款表
        manager
            .create_table(
                Table::create()
                    .table(EmployeePayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmployeePayments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EmployeePayments::BusinessId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmployeePayments::EmployeeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmployeePayments::ScheduledPaymentId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EmployeePayments::SettlementId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(EmployeePayments::Kind).string().not_null())
                    .col(
                        ColumnDef::new(EmployeePayments::Description)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EmployeePayments::Amount).double().not_null())
                    .col(
                        ColumnDef::new(EmployeePayments::PaymentDate)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EmployeePayments::Status).string().not_null())
                    .col(
                        ColumnDef::new(EmployeePayments::PaidAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EmployeePayments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EmployeePayments::Table, EmployeePayments::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                EmployeePayments::Table,
                                EmployeePayments::ScheduledPaymentId,
                            )
                            .to(ScheduledPayments::Table, ScheduledPayments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建通知表
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Notifications::BusinessId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::NotificationType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Content).text().null())
                    .col(
                        ColumnDef::new(Notifications::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notifications::Table, Notifications::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_fees_business_status")
                    .table(StudentFees::Table)
                    .col(StudentFees::BusinessId)
                    .col(StudentFees::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_fees_student_id")
                    .table(StudentFees::Table)
                    .col(StudentFees::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scheduled_payments_due")
                    .table(ScheduledPayments::Table)
                    .col(ScheduledPayments::BusinessId)
                    .col(ScheduledPayments::IsActive)
                    .col(ScheduledPayments::NextRunDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employee_payments_employee_id")
                    .table(EmployeePayments::Table)
                    .col(EmployeePayments::EmployeeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notifications_user_read")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .col(Notifications::IsRead)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EmployeePayments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentFees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CommissionSettlements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ScheduledPayments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum ScheduledPayments {
    #[sea_orm(iden = "scheduled_payments")]
    Table,
    Id,
    BusinessId,
    Target,
    StudentId,
    EmployeeId,
    CourseId,
    Description,
    Amount,
    Recurrence,
    DayOfMonth,
    NextRunDate,
    EndDate,
    LastRunDate,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CommissionSettlements {
    #[sea_orm(iden = "commission_settlements")]
    Table,
    Id,
    BusinessId,
    EmployeeId,
    PeriodStart,
    PeriodEnd,
    FeeCount,
    GrossAmount,
    ExpenseReserve,
    BenefitsReserve,
    NetAmount,
    EmployeePaymentId,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum StudentFees {
    #[sea_orm(iden = "student_fees")]
    Table,
    Id,
    BusinessId,
    StudentId,
    CourseId,
    ScheduledPaymentId,
    SettlementId,
    Description,
    Amount,
    DueDate,
    Status,
    PaidAt,
    PaymentMethod,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EmployeePayments {
    #[sea_orm(iden = "employee_payments")]
    Table,
    Id,
    BusinessId,
    EmployeeId,
    ScheduledPaymentId,
    SettlementId,
    Kind,
    Description,
    Amount,
    PaymentDate,
    Status,
    PaidAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    #[sea_orm(iden = "notifications")]
    Table,
    Id,
    BusinessId,
    UserId,
    NotificationType,
    Title,
    Content,
    IsRead,
    CreatedAt,
}
