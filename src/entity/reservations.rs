//! 预订实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub business_id: i64,
    pub table_id: Option<i64>,
    pub customer_name: String,
    pub phone: Option<String>,
    pub party_size: i32,
    pub reserved_for: i64,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_reservation(self) -> crate::models::restaurant::Reservation {
        use crate::models::restaurant::{Reservation, ReservationStatus};

        Reservation {
            id: self.id,
            business_id: self.business_id,
            table_id: self.table_id,
            customer_name: self.customer_name,
            phone: self.phone,
            party_size: self.party_size,
            reserved_for: super::to_datetime(self.reserved_for),
            status: self
                .status
                .parse::<ReservationStatus>()
                .unwrap_or(ReservationStatus::Booked),
            notes: self.notes,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
