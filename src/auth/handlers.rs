#![allow(dead_code)]
//! The REST façade a client hits before it has a WebSocket connection:
//! register, then log in to trade a password for a session token.

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::cosmos_db::database_abstractions::UserDbTrait;
use crate::full_info;
use crate::gateway::state::AppState;

use super::session::issue_token;
use super::users::PersistUser;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub identifier: String,
    pub display_name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user_id: String,
    pub display_name: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

pub async fn register(state: web::Data<Arc<AppState>>, body: web::Json<RegisterRequest>) -> HttpResponse {
    let db = &state.db;
    if db.as_user_db().find_user_by_identifier(&body.identifier).await.ok().flatten().is_some() {
        return HttpResponse::Conflict().json(ErrorBody { message: "identifier already registered".into() });
    }
    let user = match PersistUser::new(&body.identifier, &body.display_name, &body.password) {
        Ok(u) => u,
        Err(e) => return HttpResponse::InternalServerError().json(ErrorBody { message: e.to_string() }),
    };
    if let Err(e) = db.as_user_db().create_user(&user).await {
        return HttpResponse::InternalServerError().json(ErrorBody { message: e.to_string() });
    }
    let (token, expires_at) = match issue_token(&user.id) {
        Ok(t) => t,
        Err(e) => return HttpResponse::InternalServerError().json(ErrorBody { message: e.to_string() }),
    };
    let _ = db.as_user_db().store_session(&user.id, &token, expires_at).await;
    full_info!("registered user {}", user.id);
    HttpResponse::Ok().json(AuthResponse { user_id: user.id, display_name: user.display_name, token })
}

pub async fn login(state: web::Data<Arc<AppState>>, body: web::Json<LoginRequest>) -> HttpResponse {
    let db = &state.db;
    let user = match db.as_user_db().find_user_by_identifier(&body.identifier).await {
        Ok(Some(u)) => u,
        _ => return HttpResponse::Unauthorized().json(ErrorBody { message: "invalid credentials".into() }),
    };
    if !user.verify_password(&body.password) {
        return HttpResponse::Unauthorized().json(ErrorBody { message: "invalid credentials".into() });
    }
    let (token, expires_at) = match issue_token(&user.id) {
        Ok(t) => t,
        Err(e) => return HttpResponse::InternalServerError().json(ErrorBody { message: e.to_string() }),
    };
    let _ = db.as_user_db().store_session(&user.id, &token, expires_at).await;
    full_info!("logged in user {}", user.id);
    HttpResponse::Ok().json(AuthResponse { user_id: user.id, display_name: user.display_name, token })
}

pub async fn version() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "name": "settlers-core", "version": env!("CARGO_PKG_VERSION") }))
}
