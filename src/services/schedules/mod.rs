pub mod check;
pub mod conflict;
pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::{
    CreateSchedulesRequest, ScheduleCheckRequest, ScheduleCheckResponse, ScheduleInput,
    ScheduleListQuery, UpdateScheduleRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::{validate_day_of_week, validate_time_range};

pub struct ScheduleService {
    storage: Option<Arc<dyn Storage>>,
}

impl_storage_service!(ScheduleService);

impl ScheduleService {
    pub async fn list_schedules(
        &self,
        query: ScheduleListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_schedules(self, query, request).await
    }

    // 为已有课程添加排课
    pub async fn create_schedules(
        &self,
        course_id: i64,
        req: CreateSchedulesRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_schedules(self, course_id, req, request).await
    }

    pub async fn update_schedule(
        &self,
        id: i64,
        req: UpdateScheduleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_schedule(self, id, req, request).await
    }

    pub async fn delete_schedule(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_schedule(self, id, request).await
    }

    // 只检查冲突，不写入
    pub async fn check_schedules(
        &self,
        req: ScheduleCheckRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        check::check_schedules(self, req, request).await
    }
}

/// 校验并规范化排课输入：星期、时间段，空教室名视为无教室
pub(crate) fn normalize_schedule_inputs(inputs: &mut [ScheduleInput]) -> Result<(), &'static str> {
    for input in inputs.iter_mut() {
        validate_day_of_week(input.day_of_week)?;
        input.start_time = input.start_time.trim().to_string();
        input.end_time = input.end_time.trim().to_string();
        validate_time_range(&input.start_time, &input.end_time)?;
        input.room = input
            .room
            .take()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
    }
    Ok(())
}

pub(crate) fn invalid_schedule(msg: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::InvalidTimeRange, msg))
}

/// 有冲突时生成 409 响应；同课程重复优先于教室冲突
pub(crate) fn conflict_response(check: ScheduleCheckResponse) -> Option<HttpResponse> {
    if !check.duplicates.is_empty() {
        return Some(HttpResponse::Conflict().json(ApiResponse::error(
            ErrorCode::ScheduleDuplicate,
            check.duplicates,
            "The course already has a class at this time",
        )));
    }
    if !check.room_conflicts.is_empty() {
        return Some(HttpResponse::Conflict().json(ApiResponse::error(
            ErrorCode::RoomConflict,
            check.room_conflicts,
            "The room is already booked at this time",
        )));
    }
    None
}

pub(crate) fn schedule_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ScheduleNotFound,
        "Schedule not found",
    ))
}

pub(crate) fn course_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::CourseNotFound,
        "Course not found",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::HttpMessage;
    use crate::models::businesses::{BusinessType, CreateBusinessRequest};
    use crate::models::courses::{CreateCourseRequest, ScheduleConflict};
    use crate::models::users::{CreateUserRequest, User, UserRole};
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    async fn json_body(resp: HttpResponse) -> serde_json::Value {
        let bytes = actix_web::body::to_bytes(resp.into_body())
            .await
            .expect("response body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    async fn owner_storage() -> (Arc<dyn Storage>, User) {
        let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory database");
        let (_, owner) = storage
            .create_business_with_owner(
                CreateBusinessRequest {
                    name: "Acme".to_string(),
                    business_type: BusinessType::School,
                    currency: "USD".to_string(),
                },
                CreateUserRequest {
                    username: "acme_owner".to_string(),
                    email: "owner@acme.test".to_string(),
                    password: "hashed".to_string(),
                    role: UserRole::Owner,
                    display_name: None,
                },
            )
            .await
            .expect("register business");
        (Arc::new(storage), owner)
    }

    fn request_as(user: &User) -> HttpRequest {
        let request = TestRequest::default().to_http_request();
        request.extensions_mut().insert(user.clone());
        request
    }

    fn input(day: i32, start: &str, end: &str, room: Option<&str>) -> ScheduleInput {
        ScheduleInput {
            day_of_week: day,
            start_time: start.to_string(),
            end_time: end.to_string(),
            room: room.map(str::to_string),
        }
    }

    #[test]
    fn test_normalize_schedule_inputs() {
        let mut inputs = vec![input(1, " 09:00", "10:30 ", Some("  "))];
        assert!(normalize_schedule_inputs(&mut inputs).is_ok());
        assert_eq!(inputs[0].start_time, "09:00");
        assert_eq!(inputs[0].room, None);

        assert!(normalize_schedule_inputs(&mut [input(7, "09:00", "10:00", None)]).is_err());
        assert!(normalize_schedule_inputs(&mut [input(2, "10:00", "09:00", None)]).is_err());
    }

    #[actix_web::test]
    async fn test_conflict_response_prefers_duplicates() {
        let conflict = ScheduleConflict {
            course_id: 3,
            course_name: "Piano".to_string(),
            day_of_week: 1,
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            room: Some("A".to_string()),
        };
        let check = ScheduleCheckResponse {
            has_conflicts: true,
            duplicates: vec![conflict.clone()],
            room_conflicts: vec![conflict],
        };
        let resp = conflict_response(check).expect("conflict expected");
        assert_eq!(resp.status(), actix_web::http::StatusCode::CONFLICT);
        let body = json_body(resp).await;
        assert_eq!(body["error"], "schedule_duplicate");
        assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

        let clean = ScheduleCheckResponse {
            has_conflicts: false,
            duplicates: vec![],
            room_conflicts: vec![],
        };
        assert!(conflict_response(clean).is_none());
    }

    #[actix_web::test]
    async fn test_create_schedules_reports_conflicts_unless_forced() {
        let (storage, owner) = owner_storage().await;
        let course = |name: &str, schedules: Vec<ScheduleInput>| CreateCourseRequest {
            teacher_id: None,
            name: name.to_string(),
            description: None,
            monthly_fee: 50.0,
            capacity: None,
            schedules,
            force_create: false,
        };
        let (piano, _) = storage
            .create_course_with_schedules(
                owner.business_id,
                course("Piano", vec![input(1, "09:00", "10:00", Some("Room A"))]),
            )
            .await
            .expect("piano course");
        let (drums, _) = storage
            .create_course_with_schedules(owner.business_id, course("Drums", vec![]))
            .await
            .expect("drums course");

        let service = ScheduleService::with_storage(storage.clone());
        let request = request_as(&owner);

        // 其他课程占用同一教室
        let clashing = CreateSchedulesRequest {
            schedules: vec![input(1, "09:30", "10:30", Some(" room a "))],
            force_create: false,
        };
        let resp = service
            .create_schedules(drums.id, clashing.clone(), &request)
            .await
            .expect("handler result");
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = json_body(resp).await;
        assert_eq!(body["error"], "room_conflict");
        let conflicts = body["data"].as_array().expect("conflict list");
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0]["course_name"], "Piano");
        assert_eq!(conflicts[0]["start_time"], "09:00");
        assert_eq!(conflicts[0]["end_time"], "10:00");
        assert_eq!(conflicts[0]["room"], "Room A");

        // 同一课程时间重叠
        let duplicate = CreateSchedulesRequest {
            schedules: vec![input(1, "09:30", "10:00", None)],
            force_create: false,
        };
        let resp = service
            .create_schedules(piano.id, duplicate, &request)
            .await
            .expect("handler result");
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(json_body(resp).await["error"], "schedule_duplicate");

        let forced = CreateSchedulesRequest {
            force_create: true,
            ..clashing
        };
        let resp = service
            .create_schedules(drums.id, forced, &request)
            .await
            .expect("handler result");
        assert_eq!(resp.status(), StatusCode::CREATED);

        let written = storage
            .list_course_schedules(owner.business_id, drums.id)
            .await
            .expect("course schedules");
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].room.as_deref(), Some("room a"));
    }
}
