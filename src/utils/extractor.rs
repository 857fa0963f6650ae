//! 路径参数提取器
//!
//! 解析失败时直接返回 400 JSON 响应，而不是 actix 默认的纯文本错误。

use std::future::{Ready, ready};

use actix_web::{Error, FromRequest, HttpRequest, HttpResponse, dev::Payload, error};

use crate::models::{ApiResponse, ErrorCode};

fn bad_path_param(name: &str) -> Error {
    error::InternalError::from_response(
        format!("invalid path parameter `{name}`"),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("Invalid path parameter: {name}"),
        )),
    )
    .into()
}

/// 正整数 ID
fn parse_positive_id(req: &HttpRequest, name: &str) -> Result<i64, Error> {
    req.match_info()
        .get(name)
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| bad_path_param(name))
}

macro_rules! define_safe_id {
    ($(#[$meta:meta])* $name:ident, $param:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(parse_positive_id(req, $param).map($name))
            }
        }
    };
}

define_safe_id!(
    /// `{id}` 路径参数
    SafeIDI64,
    "id"
);
define_safe_id!(
    /// `{item_id}` 路径参数
    SafeItemIdI64,
    "item_id"
);

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_parses_positive_id() {
        let req = TestRequest::default().param("id", "42").to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id, SafeIDI64(42));
    }

    #[actix_web::test]
    async fn test_rejects_invalid_id() {
        for raw in ["0", "-3", "abc"] {
            let req = TestRequest::default().param("id", raw).to_http_request();
            assert!(SafeIDI64::extract(&req).await.is_err());
        }
        let req = TestRequest::default().to_http_request();
        assert!(SafeItemIdI64::extract(&req).await.is_err());
    }
}
