use actix_web::http::header::AUTHORIZATION;
use actix_web::{get, post, HttpRequest, HttpResponse, Result};
use anyhow::anyhow;
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::cache::SESSION_USER_CACHE;
use crate::db::tokens::Database as TokenDatabase;
use crate::db::users::Database as UserDatabase;
use crate::error::ApiError;
use crate::models::{SessionResponse, SessionUser};
use crate::secrets::SECRETS;

use crate::error_response;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    pub exp: usize,
    pub jti: String,
}

pub struct TokenHandler {
    secret_key: Vec<u8>,
    db: TokenDatabase,
}

impl TokenHandler {
    fn get_secret_key() -> Vec<u8> {
        SECRETS
            .get("SECRET_KEY")
            .expect("SECRET_KEY not found")
            .as_bytes()
            .to_vec()
    }

    pub async fn new() -> anyhow::Result<Self> {
        let db = TokenDatabase::new().await?;
        db.create_table().await?;
        Ok(TokenHandler {
            secret_key: Self::get_secret_key(),
            db,
        })
    }

    pub async fn generate_token(&self, user_id: i64) -> anyhow::Result<String> {
        let expiration = Utc::now() + ChronoDuration::days(365);

        let claims = Claims {
            user_id: user_id.to_string(),
            exp: expiration.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };

        self.db.insert(user_id, &claims.jti, expiration).await?;

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.secret_key),
        )?;

        Ok(token)
    }

    pub async fn verify_token(&self, token: &str) -> anyhow::Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);

        match decode::<Claims>(token, &DecodingKey::from_secret(&self.secret_key), &validation) {
            Ok(token_data) => {
                let claims = token_data.claims;

                let uid: i64 = claims
                    .user_id
                    .parse()
                    .map_err(|_| anyhow!("Invalid user ID in claims"))?;

                let jtis = self.db.read_by_uid(uid).await?;

                if claims.exp < Utc::now().timestamp() as usize {
                    return Err(anyhow!("your token is expired"));
                }

                if jtis.iter().any(|jti| *jti == claims.jti) {
                    Ok(claims)
                } else {
                    Err(anyhow!("No valid jti found for this token"))
                }
            }
            Err(_e) => Err(anyhow!("Failed to validate token")),
        }
    }

    pub async fn destroy_all_tokens(&self, user_id: i64) -> anyhow::Result<()> {
        self.db.delete_by_uid(user_id).await?;
        Ok(())
    }
}

pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get(AUTHORIZATION)?;
    let value = header.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value);
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn no_session() -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse { user: None })
}

/// Read-only view of the current session. Answers `{"user": null}` for
/// missing, malformed, expired, and revoked tokens alike; the caller
/// only ever sees two states.
#[get("/session")]
pub async fn session(req: HttpRequest) -> HttpResponse {
    let token = match bearer_token(&req) {
        Some(token) => token,
        None => return no_session(),
    };

    let token_handler = match TokenHandler::new().await {
        Ok(handler) => handler,
        Err(e) => return error_response!(500, e.to_string()),
    };

    let claims = match token_handler.verify_token(&token).await {
        Ok(claims) => claims,
        Err(_) => return no_session(),
    };

    let uid: i64 = match claims.user_id.parse() {
        Ok(uid) => uid,
        Err(_) => return no_session(),
    };

    if let Some(user) = SESSION_USER_CACHE.get(&uid) {
        return HttpResponse::Ok().json(SessionResponse { user: Some(user) });
    }

    let user_db = match UserDatabase::new().await {
        Ok(db) => db,
        Err(e) => return error_response!(500, e.to_string()),
    };

    match user_db.create_table().await {
        Ok(()) => (),
        Err(e) => return error_response!(500, e.to_string()),
    }

    match user_db.read_by_uid(uid).await {
        Ok(Some(user)) => {
            let session_user = SessionUser {
                username: Some(user.username),
                email: Some(user.email),
            };
            SESSION_USER_CACHE.insert(uid, session_user.clone());
            HttpResponse::Ok().json(SessionResponse {
                user: Some(session_user),
            })
        }
        Ok(None) => no_session(),
        Err(e) => error_response!(500, e.to_string()),
    }
}

#[post("/sign-out")]
pub async fn sign_out(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let token = bearer_token(&req)
        .ok_or_else(|| ApiError::Unauthorized(String::from("Authorization header missing")))?;

    let token_handler = TokenHandler::new()
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    let claims = token_handler
        .verify_token(&token)
        .await
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    let uid: i64 = claims
        .user_id
        .parse()
        .map_err(|_| ApiError::Unauthorized(String::from("Invalid user ID in claims")))?;

    token_handler
        .destroy_all_tokens(uid)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    SESSION_USER_CACHE.remove(&uid);

    Ok(HttpResponse::Ok().json(json!({"message": "Signed out"})))
}
