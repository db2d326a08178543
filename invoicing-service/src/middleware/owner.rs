use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use service_core::error::AppError;
use uuid::Uuid;

/// Owner identity extractor.
///
/// Reads the `X-User-ID` header stamped by the gateway in front of this
/// service. Every resource here is scoped to that id; requests without a
/// parseable one are rejected before the handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for OwnerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get("X-User-ID")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::AuthError(anyhow::anyhow!("Missing X-User-ID header")))?;

        let owner_id = Uuid::parse_str(raw).map_err(|_| {
            AppError::AuthError(anyhow::anyhow!("X-User-ID header must be a UUID"))
        })?;

        // Surface the owner on the request span for log correlation
        tracing::Span::current().record("owner_id", raw);

        Ok(OwnerId(owner_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<OwnerId, AppError> {
        let mut builder = Request::builder().uri("/api/documents");
        if let Some(value) = header {
            builder = builder.header("X-User-ID", value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        OwnerId::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn extracts_a_valid_uuid() {
        let id = Uuid::new_v4();
        let owner = extract(Some(&id.to_string())).await.unwrap();
        assert_eq!(owner.0, id);
    }

    #[tokio::test]
    async fn rejects_missing_header() {
        let err = extract(None).await.unwrap_err();
        assert!(matches!(err, AppError::AuthError(_)));
    }

    #[tokio::test]
    async fn rejects_non_uuid_value() {
        let err = extract(Some("user-42")).await.unwrap_err();
        assert!(matches!(err, AppError::AuthError(_)));
    }
}
