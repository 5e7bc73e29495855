// src/handlers/auth.rs

use validator::Validate;

use crate::{
    error::AppError,
    models::{SignInRequest, SignUpRequest, User},
    reducer::Action,
    state::AppState,
    storage::Persistence,
    store::Store,
    utils::{
        hash::{hash_password, verify_password},
        ids::new_id,
    },
};

/// Registers a new user and signs them in.
///
/// Hashes the password using Argon2 before storing it.
pub fn sign_up<P: Persistence>(
    store: &mut Store<P>,
    payload: SignUpRequest,
) -> Result<User, AppError> {
    payload.validate()?;

    if store.state().user_by_email(&payload.email).is_some() {
        return Err(AppError::Conflict(format!(
            "User with email '{}' already exists",
            payload.email
        )));
    }

    let user = User {
        id: new_id(),
        email: payload.email,
        password: Some(hash_password(&payload.password)?),
    };

    store.dispatch(Action::AddUser(user.clone()))?;
    store.dispatch(Action::SetCurrentUser(Some(user.clone())))?;
    tracing::info!("Registered user {}", user.id);

    Ok(user)
}

/// Signs in an existing user.
///
/// Users without a stored hash are let in on email alone.
pub fn sign_in<P: Persistence>(
    store: &mut Store<P>,
    payload: SignInRequest,
) -> Result<User, AppError> {
    payload.validate()?;

    let user = store
        .state()
        .user_by_email(&payload.email)
        .cloned()
        .ok_or(AppError::AuthError("User not found".to_string()))?;

    if let Some(hash) = &user.password {
        if !verify_password(&payload.password, hash)? {
            return Err(AppError::AuthError("Invalid password".to_string()));
        }
    }

    store.dispatch(Action::SetCurrentUser(Some(user.clone())))?;
    Ok(user)
}

pub fn sign_out<P: Persistence>(store: &mut Store<P>) -> Result<(), AppError> {
    store.dispatch(Action::SetCurrentUser(None))
}

pub fn current_user(state: &AppState) -> Option<&User> {
    state.current_user.as_ref()
}
