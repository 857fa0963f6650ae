//! 餐饮：餐桌、订单、预订

use super::SeaOrmStorage;
use crate::entity::dining_tables::{
    ActiveModel as TableActiveModel, Column as TableColumn, Entity as DiningTables,
};
use crate::entity::order_items::{
    ActiveModel as ItemActiveModel, Column as ItemColumn, Entity as OrderItems,
};
use crate::entity::orders::{ActiveModel as OrderActiveModel, Column as OrderColumn, Entity as Orders};
use crate::entity::reservations::{
    ActiveModel as ReservationActiveModel, Column as ReservationColumn, Entity as Reservations,
};
use crate::errors::{BizDeskError, Result};
use crate::models::fees::PaymentMethod;
use crate::models::restaurant::{
    CreateOrderRequest, CreateReservationRequest, CreateTableRequest, DiningTable, Order,
    OrderDetail, OrderItemInput, OrderListQuery, OrderListResponse, OrderStatus, Reservation,
    ReservationListQuery, ReservationListResponse, ReservationStatus, TableStatus,
    UpdateReservationRequest, UpdateTableRequest,
};
use crate::utils::money;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

/// 在给定连接（可为事务）上设置餐桌状态
async fn update_table_status<C: ConnectionTrait>(
    conn: &C,
    business_id: i64,
    table_id: i64,
    status: TableStatus,
) -> Result<bool> {
    let result = DiningTables::update_many()
        .col_expr(
            TableColumn::Status,
            sea_orm::sea_query::Expr::value(status.to_string()),
        )
        .col_expr(
            TableColumn::UpdatedAt,
            sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
        )
        .filter(TableColumn::Id.eq(table_id))
        .filter(TableColumn::BusinessId.eq(business_id))
        .exec(conn)
        .await
        .map_err(|e| BizDeskError::database_operation(format!("更新餐桌状态失败: {e}")))?;

    Ok(result.rows_affected > 0)
}

/// 插入订单明细
async fn insert_items<C: ConnectionTrait>(
    conn: &C,
    order_id: i64,
    items: Vec<OrderItemInput>,
    now: i64,
) -> Result<()> {
    for item in items {
        ItemActiveModel {
            order_id: Set(order_id),
            name: Set(item.name),
            unit_price: Set(item.unit_price),
            quantity: Set(item.quantity),
            note: Set(item.note),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| BizDeskError::database_operation(format!("添加订单明细失败: {e}")))?;
    }
    Ok(())
}

/// 按现有明细重算小计，未结订单的总额等于小计
async fn recalculate_order<C: ConnectionTrait>(conn: &C, order_id: i64, now: i64) -> Result<()> {
    let items = OrderItems::find()
        .filter(ItemColumn::OrderId.eq(order_id))
        .all(conn)
        .await
        .map_err(|e| BizDeskError::database_operation(format!("查询订单明细失败: {e}")))?;

    let subtotal = money::to_f64(
        items
            .iter()
            .map(|item| money::line_total(item.unit_price, item.quantity))
            .sum(),
    );

    Orders::update_many()
        .col_expr(OrderColumn::Subtotal, sea_orm::sea_query::Expr::value(subtotal))
        .col_expr(OrderColumn::Total, sea_orm::sea_query::Expr::value(subtotal))
        .col_expr(OrderColumn::UpdatedAt, sea_orm::sea_query::Expr::value(now))
        .filter(OrderColumn::Id.eq(order_id))
        .exec(conn)
        .await
        .map_err(|e| BizDeskError::database_operation(format!("更新订单金额失败: {e}")))?;

    Ok(())
}

impl SeaOrmStorage {
    /// 创建餐桌
    pub async fn create_table_impl(
        &self,
        business_id: i64,
        req: CreateTableRequest,
    ) -> Result<DiningTable> {
        let now = chrono::Utc::now().timestamp();

        let model = TableActiveModel {
            business_id: Set(business_id),
            name: Set(req.name),
            capacity: Set(req.capacity),
            status: Set(TableStatus::Available.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("创建餐桌失败: {e}")))?;

        Ok(result.into_table())
    }

    /// 获取餐桌
    pub async fn get_table_impl(&self, business_id: i64, id: i64) -> Result<Option<DiningTable>> {
        let result = DiningTables::find_by_id(id)
            .filter(TableColumn::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询餐桌失败: {e}")))?;

        Ok(result.map(|m| m.into_table()))
    }

    /// 列出餐桌
    pub async fn list_tables_impl(&self, business_id: i64) -> Result<Vec<DiningTable>> {
        let tables = DiningTables::find()
            .filter(TableColumn::BusinessId.eq(business_id))
            .order_by_asc(TableColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询餐桌列表失败: {e}")))?;

        Ok(tables.into_iter().map(|m| m.into_table()).collect())
    }

    /// 更新餐桌
    pub async fn update_table_impl(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateTableRequest,
    ) -> Result<Option<DiningTable>> {
        let Some(existing) = DiningTables::find_by_id(id)
            .filter(TableColumn::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询餐桌失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: TableActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(capacity) = update.capacity {
            model.capacity = Set(capacity);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("更新餐桌失败: {e}")))?;

        Ok(Some(updated.into_table()))
    }

    /// 设置餐桌状态
    pub async fn set_table_status_impl(
        &self,
        business_id: i64,
        id: i64,
        status: TableStatus,
    ) -> Result<bool> {
        update_table_status(&self.db, business_id, id, status).await
    }

    /// 删除餐桌
    pub async fn delete_table_impl(&self, business_id: i64, id: i64) -> Result<bool> {
        let result = DiningTables::delete_many()
            .filter(TableColumn::Id.eq(id))
            .filter(TableColumn::BusinessId.eq(business_id))
            .exec(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("删除餐桌失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 开单：写入订单与明细，占用餐桌
    pub async fn create_order_impl(
        &self,
        business_id: i64,
        created_by: i64,
        req: CreateOrderRequest,
    ) -> Result<OrderDetail> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("开启事务失败: {e}")))?;

        let order = OrderActiveModel {
            business_id: Set(business_id),
            table_id: Set(req.table_id),
            status: Set(OrderStatus::Open.to_string()),
            subtotal: Set(0.0),
            total: Set(0.0),
            payment_method: Set(None),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            closed_at: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| BizDeskError::database_operation(format!("创建订单失败: {e}")))?;

        insert_items(&txn, order.id, req.items, now).await?;
        recalculate_order(&txn, order.id, now).await?;

        if let Some(table_id) = req.table_id {
            update_table_status(&txn, business_id, table_id, TableStatus::Occupied).await?;
        }

        txn.commit()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_order_detail_impl(business_id, order.id)
            .await?
            .ok_or_else(|| BizDeskError::database_operation("订单创建后无法读取"))
    }

    /// 获取订单及明细
    pub async fn get_order_detail_impl(
        &self,
        business_id: i64,
        id: i64,
    ) -> Result<Option<OrderDetail>> {
        let result = Orders::find_by_id(id)
            .filter(OrderColumn::BusinessId.eq(business_id))
            .find_with_related(OrderItems)
            .all(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询订单失败: {e}")))?;

        Ok(result.into_iter().next().map(|(order, mut items)| {
            items.sort_by_key(|item| item.id);
            OrderDetail {
                order: order.into_order(),
                items: items.into_iter().map(|m| m.into_order_item()).collect(),
            }
        }))
    }

    /// 分页列出订单
    pub async fn list_orders_with_pagination_impl(
        &self,
        business_id: i64,
        query: OrderListQuery,
    ) -> Result<OrderListResponse> {
        let mut select = Orders::find().filter(OrderColumn::BusinessId.eq(business_id));

        if let Some(status) = query.status {
            select = select.filter(OrderColumn::Status.eq(status.to_string()));
        }
        if let Some(table_id) = query.table_id {
            select = select.filter(OrderColumn::TableId.eq(table_id));
        }

        select = select.order_by_desc(OrderColumn::CreatedAt);

        let (orders, pagination) = self
            .fetch_page(select, query.page, query.size, "订单")
            .await?;

        Ok(OrderListResponse {
            items: orders.into_iter().map(|m| m.into_order()).collect(),
            pagination,
        })
    }

    /// 加菜
    pub async fn add_order_items_impl(
        &self,
        business_id: i64,
        order_id: i64,
        items: Vec<OrderItemInput>,
    ) -> Result<Option<OrderDetail>> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("开启事务失败: {e}")))?;

        let exists = Orders::find_by_id(order_id)
            .filter(OrderColumn::BusinessId.eq(business_id))
            .one(&txn)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询订单失败: {e}")))?
            .is_some();
        if !exists {
            return Ok(None);
        }

        insert_items(&txn, order_id, items, now).await?;
        recalculate_order(&txn, order_id, now).await?;

        txn.commit()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_order_detail_impl(business_id, order_id).await
    }

    /// 删除一条明细，明细不属于该订单时返回 None
    pub async fn remove_order_item_impl(
        &self,
        business_id: i64,
        order_id: i64,
        item_id: i64,
    ) -> Result<Option<OrderDetail>> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("开启事务失败: {e}")))?;

        let exists = Orders::find_by_id(order_id)
            .filter(OrderColumn::BusinessId.eq(business_id))
            .one(&txn)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询订单失败: {e}")))?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let deleted = OrderItems::delete_many()
            .filter(ItemColumn::Id.eq(item_id))
            .filter(ItemColumn::OrderId.eq(order_id))
            .exec(&txn)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("删除订单明细失败: {e}")))?;
        if deleted.rows_affected == 0 {
            return Ok(None);
        }

        recalculate_order(&txn, order_id, now).await?;

        txn.commit()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_order_detail_impl(business_id, order_id).await
    }

    /// 结账或取消订单并释放餐桌；总额 = 小计 + 小费
    pub async fn close_order_impl(
        &self,
        business_id: i64,
        order_id: i64,
        status: OrderStatus,
        payment_method: Option<PaymentMethod>,
        tip: f64,
    ) -> Result<Option<Order>> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(existing) = Orders::find_by_id(order_id)
            .filter(OrderColumn::BusinessId.eq(business_id))
            .one(&txn)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询订单失败: {e}")))?
        else {
            return Ok(None);
        };

        let table_id = existing.table_id;
        let total = money::to_f64(money::to_decimal(existing.subtotal) + money::to_decimal(tip));

        let mut model: OrderActiveModel = existing.into();
        model.status = Set(status.to_string());
        model.payment_method = Set(payment_method.map(|m| m.to_string()));
        model.total = Set(total);
        model.closed_at = Set(Some(now));
        model.updated_at = Set(now);

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("更新订单失败: {e}")))?;

        if let Some(table_id) = table_id {
            update_table_status(&txn, business_id, table_id, TableStatus::Available).await?;
        }

        txn.commit()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(updated.into_order()))
    }

    /// 创建预订
    pub async fn create_reservation_impl(
        &self,
        business_id: i64,
        req: CreateReservationRequest,
    ) -> Result<Reservation> {
        let now = chrono::Utc::now().timestamp();

        let model = ReservationActiveModel {
            business_id: Set(business_id),
            table_id: Set(req.table_id),
            customer_name: Set(req.customer_name),
            phone: Set(req.phone),
            party_size: Set(req.party_size),
            reserved_for: Set(req.reserved_for.timestamp()),
            status: Set(ReservationStatus::Booked.to_string()),
            notes: Set(req.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("创建预订失败: {e}")))?;

        Ok(result.into_reservation())
    }

    /// 获取预订
    pub async fn get_reservation_impl(
        &self,
        business_id: i64,
        id: i64,
    ) -> Result<Option<Reservation>> {
        let result = Reservations::find_by_id(id)
            .filter(ReservationColumn::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询预订失败: {e}")))?;

        Ok(result.map(|m| m.into_reservation()))
    }

    /// 分页列出预订，`date` 按 UTC 自然日筛选
    pub async fn list_reservations_with_pagination_impl(
        &self,
        business_id: i64,
        query: ReservationListQuery,
    ) -> Result<ReservationListResponse> {
        let mut select =
            Reservations::find().filter(ReservationColumn::BusinessId.eq(business_id));

        if let Some(status) = query.status {
            select = select.filter(ReservationColumn::Status.eq(status.to_string()));
        }
        if let Some(date) = query.date {
            let start = date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
            select = select
                .filter(ReservationColumn::ReservedFor.gte(start))
                .filter(ReservationColumn::ReservedFor.lt(start + 86_400));
        }

        select = select.order_by_asc(ReservationColumn::ReservedFor);

        let (items, pagination) = self
            .fetch_page(select, query.page, query.size, "预订")
            .await?;

        Ok(ReservationListResponse {
            items: items.into_iter().map(|m| m.into_reservation()).collect(),
            pagination,
        })
    }

    /// 更新预订；入座时占用餐桌
    pub async fn update_reservation_impl(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateReservationRequest,
    ) -> Result<Option<Reservation>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(existing) = Reservations::find_by_id(id)
            .filter(ReservationColumn::BusinessId.eq(business_id))
            .one(&txn)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询预订失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ReservationActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(table_id) = update.table_id {
            model.table_id = Set(Some(table_id));
        }
        if let Some(customer_name) = update.customer_name {
            model.customer_name = Set(customer_name);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(party_size) = update.party_size {
            model.party_size = Set(party_size);
        }
        if let Some(reserved_for) = update.reserved_for {
            model.reserved_for = Set(reserved_for.timestamp());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(notes) = update.notes {
            model.notes = Set(Some(notes));
        }

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("更新预订失败: {e}")))?;

        if update.status == Some(ReservationStatus::Seated)
            && let Some(table_id) = updated.table_id
        {
            update_table_status(&txn, business_id, table_id, TableStatus::Occupied).await?;
        }

        txn.commit()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(updated.into_reservation()))
    }
}
