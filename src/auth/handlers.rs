use axum::{
    extract::{FromRef, State},
    response::{Html, Redirect},
    routing::get,
    Form, Router,
};
use axum_extra::extract::CookieJar;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginForm, RegisterForm},
        password::{hash_password, verify_password},
        repo::{Role, User},
        session::{removal_cookie, session_cookie, SessionKeys},
    },
    error::AppError,
    pages,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
}

pub async fn register_page() -> Html<String> {
    pages::register_page()
}

#[instrument(skip(state, form))]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect, AppError> {
    // The first user ever registered becomes the admin.
    let role = if User::count(&state.db).await? == 0 {
        Role::Admin
    } else {
        Role::User
    };

    if User::find_by_username(&state.db, &form.username)
        .await?
        .is_some()
    {
        warn!(username = %form.username, "registration with taken username");
        return Err(AppError::DuplicateUsername);
    }

    let hash = hash_password(&form.password)?;

    let user = match User::create(&state.db, &form.username, &hash, role).await {
        Ok(user) => user,
        // A concurrent registration can slip past the pre-check; the UNIQUE
        // constraint reports it here.
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            warn!(username = %form.username, "registration lost unique race");
            return Err(AppError::DuplicateUsername);
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = user.id, username = %user.username, role = %user.role, "user registered");
    Ok(Redirect::to("/login"))
}

pub async fn login_page() -> Html<String> {
    pages::login_page()
}

#[instrument(skip(state, jar, form))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    // Unknown username and wrong password deliberately collapse into the
    // same failure.
    let user = match User::find_by_username(&state.db, &form.username).await? {
        Some(user) => user,
        None => {
            warn!(username = %form.username, "login failed");
            return Err(AppError::InvalidCredentials);
        }
    };

    if !verify_password(&form.password, &user.password_hash)? {
        warn!(username = %form.username, "login failed");
        return Err(AppError::InvalidCredentials);
    }

    let token = SessionKeys::from_ref(&state).sign(&user)?;
    let target = match user.role {
        Role::Admin => "/admin",
        Role::User => "/",
    };

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok((jar.add(session_cookie(token)), Redirect::to(target)))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.remove(removal_cookie()), Redirect::to("/login"))
}
