//! 会话 cookie
//!
//! 请求没有携带有效的 `assessor_session` cookie 时分配新的会话 id，
//! 响应中通过 `Set-Cookie` 下发。

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{self, HeaderName};
use axum::http::request::Parts;

use crate::orchestrator::SessionStore;

pub const COOKIE_NAME: &str = "assessor_session";

/// 会话 id 的最大长度
const MAX_ID_LEN: usize = 64;

/// 从 cookie 中取出的会话 id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId {
    pub id: String,
    /// 本次请求新分配的 id，需要下发 cookie
    pub is_new: bool,
}

impl SessionId {
    /// 需要追加到响应上的 `Set-Cookie` 头
    pub fn set_cookie(&self) -> Option<(HeaderName, String)> {
        self.is_new.then(|| {
            (
                header::SET_COOKIE,
                format!("{}={}; Path=/; HttpOnly; SameSite=Lax", COOKIE_NAME, self.id),
            )
        })
    }
}

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let existing = parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == COOKIE_NAME)
            .map(|(_, value)| value.trim())
            .filter(|value| is_valid_id(value))
            .map(str::to_string);

        Ok(match existing {
            Some(id) => SessionId { id, is_new: false },
            None => SessionId {
                id: SessionStore::new_id(),
                is_new: true,
            },
        })
    }
}

fn is_valid_id(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_ID_LEN
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(cookie: Option<&str>) -> SessionId {
        let mut builder = Request::builder().uri("/");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        SessionId::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn reads_existing_cookie() {
        let session = extract(Some("theme=dark; assessor_session=abc-123")).await;
        assert_eq!(session, SessionId { id: "abc-123".into(), is_new: false });
        assert!(session.set_cookie().is_none());
    }

    #[tokio::test]
    async fn assigns_new_id_when_missing_or_invalid() {
        let fresh = extract(None).await;
        assert!(fresh.is_new);
        let (_, value) = fresh.set_cookie().unwrap();
        assert!(value.starts_with("assessor_session="));

        let tampered = extract(Some("assessor_session=<script>")).await;
        assert!(tampered.is_new);
    }
}
