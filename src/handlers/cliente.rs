// src/handlers/cliente.rs
//
// Painel do cliente: preferências de busca, campanhas vigentes, os próprios
// leads e o histórico de compras.

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::exigir_usuario_ativo,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{RequireRole, RoleCliente},
    },
    models::{dashboard::ClienteDashboard, perfil::ClienteProfile},
};

async fn perfil_do_cliente(
    app_state: &AppState,
    user_id: Uuid,
) -> Result<ClienteProfile, AppError> {
    app_state
        .perfil_repo
        .find_cliente_by_user(user_id)
        .await?
        .ok_or(AppError::NaoEncontrado)
}

// GET /api/cliente/dashboard
#[utoipa::path(
    get,
    path = "/api/cliente/dashboard",
    tag = "Cliente",
    responses((status = 200, description = "Painel do cliente", body = ClienteDashboard)),
    security(("api_jwt" = []))
)]
pub async fn dashboard(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireRole<RoleCliente>,
) -> Result<Json<ClienteDashboard>, AppError> {
    exigir_usuario_ativo(&app_state, user.id).await?;
    let perfil = perfil_do_cliente(&app_state, user.id).await?;

    let imoveis_compativeis = app_state
        .imovel_repo
        .count_compativeis(perfil.faixa_preco_min, perfil.faixa_preco_max)
        .await?;
    let campanhas_vigentes = app_state.campanha_repo.list_vigentes().await?;
    let meus_leads = app_state.lead_repo.list_por_email(&user.email).await?;
    let minhas_compras = app_state.venda_repo.list_do_cliente(perfil.id).await?;

    Ok(Json(ClienteDashboard {
        imoveis_compativeis,
        campanhas_vigentes,
        meus_leads,
        minhas_compras,
    }))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarPerfilPayload {
    pub tipo_imovel_interesse: Option<Vec<String>>,
    pub regioes_interesse: Option<Vec<String>>,
    pub faixa_preco_min: Option<Decimal>,
    pub faixa_preco_max: Option<Decimal>,
    pub profissao: Option<String>,
}

// PUT /api/cliente/perfil — campos ausentes preservam o valor atual.
#[utoipa::path(
    put,
    path = "/api/cliente/perfil",
    tag = "Cliente",
    request_body = AtualizarPerfilPayload,
    responses((status = 200, description = "Preferências atualizadas", body = ClienteProfile)),
    security(("api_jwt" = []))
)]
pub async fn atualizar_perfil(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireRole<RoleCliente>,
    Json(payload): Json<AtualizarPerfilPayload>,
) -> Result<Json<ClienteProfile>, AppError> {
    let perfil = perfil_do_cliente(&app_state, user.id).await?;

    let atualizado = app_state
        .perfil_repo
        .update_cliente_preferencias(
            &app_state.db_pool,
            perfil.id,
            payload.tipo_imovel_interesse,
            payload.regioes_interesse,
            payload.faixa_preco_min,
            payload.faixa_preco_max,
            payload.profissao,
        )
        .await?;

    Ok(Json(atualizado))
}
