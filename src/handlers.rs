pub mod admin;
pub mod auth;
pub mod cliente;
pub mod corretor;
pub mod gerente;
pub mod imobiliaria;
pub mod publico;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{User, UserStatus},
};

// Status é reconferido no banco nos painéis e mutações sensíveis: um token
// ainda válido não atravessa uma suspensão aplicada depois do login.
pub(crate) async fn exigir_usuario_ativo(
    app_state: &AppState,
    user_id: Uuid,
) -> Result<User, AppError> {
    let user = app_state
        .user_repo
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::InvalidToken)?;

    match user.status {
        UserStatus::Ativo => Ok(user),
        UserStatus::Pendente => Err(AppError::ContaPendente),
        UserStatus::Inativo | UserStatus::Suspenso => Err(AppError::ContaInativa),
    }
}
