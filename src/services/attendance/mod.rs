pub mod export;
pub mod list;
pub mod record;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::{AttendanceExportQuery, AttendanceListQuery, RecordAttendanceRequest};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl_storage_service!(AttendanceService);

impl AttendanceService {
    pub async fn list_attendance(
        &self,
        query: AttendanceListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_attendance(self, query, request).await
    }

    // 按课程和日期批量记录考勤
    pub async fn record_attendance(
        &self,
        req: RecordAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        record::record_attendance(self, req, request).await
    }

    pub async fn export_attendance(
        &self,
        query: AttendanceExportQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::export_attendance(self, query, request).await
    }
}
