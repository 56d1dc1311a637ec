use actix_web::{get, post, web, HttpResponse, Result};

use bcrypt::{hash, verify, DEFAULT_COST};
use rand::Rng;
use serde::Deserialize;
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

pub mod session;

use crate::db::users::Database;
use crate::error::ApiError;
use crate::models::{Availability, CheckOutcome, SignUpData};
use crate::validation::{validate_sign_up, validate_username, EMAIL_REGEX};

use crate::error_response;

use session::TokenHandler;

pub fn generate_uid() -> i64 {
    let epoch = 1_704_037_200_000;
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_millis();
    let timestamp = now - epoch;

    let timestamp_part = (timestamp & 0x3FFFFFFFFFF) << 22;

    let machine_id = rand::thread_rng().gen_range(0..1024);
    let machine_id_part = (machine_id & 0x3FF) << 12;

    let sequence = rand::thread_rng().gen_range(0..4096);

    let uid = timestamp_part | machine_id_part | sequence;
    uid as i64
}

#[derive(Debug)]
pub enum UsernameOrEmail {
    Email(String),
    Username(String),
}

impl UsernameOrEmail {
    pub fn parse(input: &str) -> Self {
        if EMAIL_REGEX.is_match(input) {
            UsernameOrEmail::Email(input.to_string())
        } else {
            UsernameOrEmail::Username(input.to_string())
        }
    }
}

#[post("/register")]
pub async fn register(req_body: String) -> HttpResponse {
    let json_content: SignUpData = match serde_json::from_str(&req_body) {
        Ok(json) => json,
        Err(e) => return error_response!(400, e.to_string()),
    };

    if let Err(errors) = validate_sign_up(&json_content) {
        return HttpResponse::BadRequest().json(json!({
            "message": "Invalid sign-up details",
            "errors": errors,
        }));
    }

    let user_db = match Database::new().await {
        Ok(db) => db,
        Err(e) => return error_response!(500, e.to_string()),
    };

    match user_db.create_table().await {
        Ok(()) => (),
        Err(e) => return error_response!(500, e.to_string()),
    }

    if let Some(user) = match user_db.read_by_email(&json_content.email).await {
        Ok(user) => user,
        Err(e) => return error_response!(500, e.to_string()),
    } {
        return error_response!(
            409,
            format!("email '{}' is already registered, try to sign in instead!", user.email)
        );
    };

    if let Some(_user) = match user_db.read_by_username(&json_content.username).await {
        Ok(user) => user,
        Err(e) => return error_response!(500, e.to_string()),
    } {
        return error_response!(409, "Username is already taken");
    }

    let hashed = match hash(&json_content.password, DEFAULT_COST) {
        Ok(hashed) => hashed,
        Err(e) => return error_response!(500, e.to_string()),
    };

    let uid = generate_uid();

    match user_db
        .insert(uid, &json_content.username, &hashed, &json_content.email)
        .await
    {
        Ok(()) => (),
        Err(e) => return error_response!(500, e.to_string()),
    }

    HttpResponse::Ok().json(json!({"message": "User registered"}))
}

#[derive(Debug, Deserialize)]
pub struct CheckUsernameQuery {
    username: String,
}

#[get("/check-username")]
pub async fn check_username(query: web::Query<CheckUsernameQuery>) -> HttpResponse {
    if let Err(message) = validate_username(&query.username) {
        return HttpResponse::Ok().json(CheckOutcome {
            status: Availability::Invalid,
            message,
        });
    }

    let user_db = match Database::new().await {
        Ok(db) => db,
        Err(e) => return error_response!(500, e.to_string()),
    };

    match user_db.create_table().await {
        Ok(()) => (),
        Err(e) => return error_response!(500, e.to_string()),
    }

    match user_db.read_by_username(&query.username).await {
        Ok(Some(_)) => HttpResponse::Ok().json(CheckOutcome {
            status: Availability::Taken,
            message: String::from("Username is already taken"),
        }),
        Ok(None) => HttpResponse::Ok().json(CheckOutcome {
            status: Availability::Available,
            message: String::from("Username is unique"),
        }),
        Err(e) => error_response!(500, e.to_string()),
    }
}

#[post("/login")]
pub async fn login(req_body: String) -> Result<HttpResponse, ApiError> {
    #[derive(Debug, Deserialize)]
    struct LoginRequest {
        username_or_email: String,
        password: String,
    }

    let json_content: LoginRequest =
        serde_json::from_str(&req_body).map_err(|e| ApiError::JsonError(e.to_string()))?;

    let user_db = Database::new()
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    user_db
        .create_table()
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    let user = match UsernameOrEmail::parse(&json_content.username_or_email) {
        UsernameOrEmail::Email(email) => user_db
            .read_by_email(&email)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?,
        UsernameOrEmail::Username(username) => user_db
            .read_by_username(&username)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?,
    };

    if let Some(user) = user {
        let verified = verify(&json_content.password, &user.password_hash)
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        if verified {
            let token_handler = TokenHandler::new()
                .await
                .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
            let token = token_handler
                .generate_token(user.uid)
                .await
                .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
            return Ok(HttpResponse::Ok().json(json!({"token": token})));
        }
    }

    Ok(HttpResponse::Unauthorized().json(json!({"message": "password or username is wrong"})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uid_generation_is_positive_and_unique_enough() {
        let a = generate_uid();
        let b = generate_uid();
        assert!(a > 0);
        assert!(b > 0);
        // same millisecond collisions are possible but the random parts
        // make two consecutive calls matching vanishingly unlikely
        assert_ne!(a, b);
    }

    #[test]
    fn login_identifier_parse_distinguishes_emails() {
        assert!(matches!(
            UsernameOrEmail::parse("alice@example.com"),
            UsernameOrEmail::Email(_)
        ));
        assert!(matches!(
            UsernameOrEmail::parse("alice"),
            UsernameOrEmail::Username(_)
        ));
    }
}
