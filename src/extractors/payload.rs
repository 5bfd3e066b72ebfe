//! Request body extractor accepting JSON or url-encoded forms.

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Typed request body. JSON and `application/x-www-form-urlencoded` bodies are
/// decoded; a request without either content type carries no fields, so every
/// column of the payload is absent.
#[derive(Clone, Debug)]
pub struct Payload<T>(pub T);

#[derive(Debug, PartialEq)]
enum BodyKind {
    Json,
    Form,
    Ignored,
}

fn body_kind(req: &Request) -> BodyKind {
    let Some(ct) = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return BodyKind::Ignored;
    };
    let essence = ct.split(';').next().unwrap_or_default().trim();
    if essence.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
        BodyKind::Form
    } else if essence.eq_ignore_ascii_case("application/json") || essence.ends_with("+json") {
        BodyKind::Json
    } else {
        BodyKind::Ignored
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            BodyKind::Form => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                Ok(Payload(value))
            }
            BodyKind::Json => {
                let Json(value) = Json::<T>::from_request(req, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                Ok(Payload(value))
            }
            BodyKind::Ignored => serde_json::from_value(Value::Object(Map::new()))
                .map(Payload)
                .map_err(|e| {
                    tracing::debug!(error = %e, "payload requires a body");
                    StatusCode::UNPROCESSABLE_ENTITY.into_response()
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn with_type(ct: Option<&str>) -> Request {
        let builder = Request::builder().method("POST").uri("/");
        let builder = match ct {
            Some(ct) => builder.header(header::CONTENT_TYPE, ct),
            None => builder,
        };
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn content_type_selects_the_decoder() {
        assert_eq!(body_kind(&with_type(Some("application/json"))), BodyKind::Json);
        assert_eq!(
            body_kind(&with_type(Some("application/json; charset=utf-8"))),
            BodyKind::Json
        );
        assert_eq!(
            body_kind(&with_type(Some("application/x-www-form-urlencoded"))),
            BodyKind::Form
        );
        assert_eq!(body_kind(&with_type(Some("text/plain"))), BodyKind::Ignored);
        assert_eq!(body_kind(&with_type(None)), BodyKind::Ignored);
    }
}
