use super::*;
use crate::ID;
use crate::gameroom::*;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::ResponseError;
use actix_web::cookie::Cookie;
use actix_web::cookie::time::Duration;
use actix_web::http::StatusCode;
use actix_web::web;
use serde::Deserialize;

pub const CLIENT_ID_COOKIE: &str = "battlelineClientId";
pub const CLIENT_KEY_COOKIE: &str = "battlelineClientKey";

/// Optional body of create and join.
#[derive(Debug, Default, Deserialize)]
pub struct Nickname {
    pub nickname: Option<String>,
}

/// Credentials for clients that cannot send cookies with a websocket upgrade.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialQuery {
    pub client_id: Option<String>,
    pub client_key: Option<String>,
}

impl ResponseError for SessionError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::NotAuthorized => StatusCode::UNAUTHORIZED,
            Self::SessionFull => StatusCode::CONFLICT,
            Self::Busy => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::BAD_REQUEST,
        }
    }
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::from(self))
    }
}

pub async fn create(
    registry: web::Data<Registry>,
    config: web::Data<Config>,
    body: Option<web::Json<Nickname>>,
) -> Result<HttpResponse, actix_web::Error> {
    let nickname = body.and_then(|b| b.into_inner().nickname);
    let (session, credentials) = registry.create(nickname.as_deref()).await;
    Ok(seated(&config, &credentials, session.snapshot().await))
}

pub async fn join(
    req: HttpRequest,
    path: web::Path<String>,
    registry: web::Data<Registry>,
    config: web::Data<Config>,
    body: Option<web::Json<Nickname>>,
) -> Result<HttpResponse, actix_web::Error> {
    let session = lookup(&registry, &path).await?;
    if let Some((client, key)) = credentials(&req, None) {
        if session.authenticate(client, &key).await.is_ok() {
            return Ok(HttpResponse::NoContent().finish());
        }
    }
    let nickname = body.and_then(|b| b.into_inner().nickname);
    let credentials = session.add_client(nickname.as_deref()).await?;
    Ok(seated(&config, &credentials, session.snapshot().await))
}

pub async fn snapshot(
    req: HttpRequest,
    path: web::Path<String>,
    registry: web::Data<Registry>,
) -> Result<HttpResponse, actix_web::Error> {
    let session = lookup(&registry, &path).await?;
    let (client, key) = credentials(&req, None).ok_or(SessionError::NotAuthorized)?;
    session.authenticate(client, &key).await?;
    Ok(HttpResponse::Ok().json(session.snapshot().await))
}

pub async fn connect(
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<CredentialQuery>,
    registry: web::Data<Registry>,
    body: web::Payload,
) -> Result<HttpResponse, actix_web::Error> {
    let session = lookup(&registry, &path).await?;
    let (client, key) = credentials(&req, Some(&*query)).ok_or(SessionError::NotAuthorized)?;
    let seat = session.authenticate(client, &key).await?;
    let (response, socket, stream) = actix_ws::handle(&req, body)?;
    Bridge::spawn(session, seat, socket, stream).await?;
    Ok(response)
}

async fn lookup(registry: &Registry, id: &str) -> Result<Session, SessionError> {
    let id = ID::try_from(id).map_err(|_| SessionError::NotFound)?;
    registry.get(id).await
}

/// Cookies first, then query parameters.
fn credentials(req: &HttpRequest, query: Option<&CredentialQuery>) -> Option<(ID<Client>, String)> {
    let cookies = req
        .cookie(CLIENT_ID_COOKIE)
        .zip(req.cookie(CLIENT_KEY_COOKIE))
        .map(|(id, key)| (id.value().to_string(), key.value().to_string()));
    let queried = query.and_then(|q| q.client_id.clone().zip(q.client_key.clone()));
    cookies
        .or(queried)
        .and_then(|(id, key)| ID::try_from(id.as_str()).ok().map(|id| (id, key)))
}

fn seated(config: &Config, credentials: &Credentials, snapshot: Snapshot) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(cookie(config, CLIENT_ID_COOKIE, credentials.client.to_string()))
        .cookie(cookie(config, CLIENT_KEY_COOKIE, credentials.key.clone()))
        .json(serde_json::json!({
            "sessionId": credentials.session,
            "clientId": credentials.client,
            "clientIndex": credentials.seat,
            "session": snapshot,
        }))
}

fn cookie(config: &Config, name: &'static str, value: String) -> Cookie<'static> {
    let builder = Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .max_age(Duration::hours(config.cookie_hours));
    match config.cookie_domain.clone() {
        Some(domain) => builder.domain(domain).finish(),
        None => builder.finish(),
    }
}
