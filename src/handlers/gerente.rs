// src/handlers/gerente.rs
//
// Painel do gerente: só enxerga e administra os corretores da própria equipe.
// A cota de corretores é da imobiliária dona, não do gerente.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::exigir_usuario_ativo,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{RequireRole, RoleGerente},
    },
    models::{
        dashboard::GerenteDashboard,
        perfil::{CorretorProfile, CorretorResumo, Gerente},
    },
};

async fn perfil_do_gerente(app_state: &AppState, user_id: Uuid) -> Result<Gerente, AppError> {
    app_state
        .perfil_repo
        .find_gerente_by_user(user_id)
        .await?
        .ok_or(AppError::NaoEncontrado)
}

// GET /api/gerente/dashboard
#[utoipa::path(
    get,
    path = "/api/gerente/dashboard",
    tag = "Gerente",
    responses((status = 200, description = "Números da equipe do gerente", body = GerenteDashboard)),
    security(("api_jwt" = []))
)]
pub async fn dashboard(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireRole<RoleGerente>,
) -> Result<Json<GerenteDashboard>, AppError> {
    exigir_usuario_ativo(&app_state, user.id).await?;
    let gerente = perfil_do_gerente(&app_state, user.id).await?;

    let (total_corretores, corretores_ativos, total_clientes) = app_state
        .dashboard_repo
        .contagens_do_gerente(gerente.id)
        .await?;
    let total_leads = app_state.lead_repo.count_do_gerente(gerente.id).await?;
    let (vendas_concluidas, valor_total_vendas) = app_state
        .venda_repo
        .agregados_do_gerente(gerente.id)
        .await?;

    Ok(Json(GerenteDashboard {
        total_corretores,
        corretores_ativos,
        total_clientes,
        total_leads,
        vendas_concluidas,
        valor_total_vendas,
    }))
}

// GET /api/gerente/corretores
#[utoipa::path(
    get,
    path = "/api/gerente/corretores",
    tag = "Gerente",
    responses((status = 200, description = "Corretores da equipe", body = Vec<CorretorResumo>)),
    security(("api_jwt" = []))
)]
pub async fn list_corretores(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireRole<RoleGerente>,
) -> Result<Json<Vec<CorretorResumo>>, AppError> {
    let gerente = perfil_do_gerente(&app_state, user.id).await?;
    let corretores = app_state
        .perfil_repo
        .list_corretores_do_gerente(gerente.id)
        .await?;
    Ok(Json(corretores))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarCorretorPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub nome: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    pub telefone: Option<String>,

    #[schema(example = "529.982.247-25")]
    pub cpf: String,

    #[validate(length(min = 3, message = "O CRECI é obrigatório."))]
    pub creci: String,

    pub senha: String,
}

// POST /api/gerente/corretores — já entra aprovado e ativo para leads.
#[utoipa::path(
    post,
    path = "/api/gerente/corretores",
    tag = "Gerente",
    request_body = CriarCorretorPayload,
    responses(
        (status = 201, description = "Corretor criado", body = CorretorProfile),
        (status = 422, description = "Limite de corretores do plano atingido"),
        (status = 409, description = "E-mail, CPF ou CRECI já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar_corretor(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireRole<RoleGerente>,
    Json(payload): Json<CriarCorretorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    exigir_usuario_ativo(&app_state, user.id).await?;
    let gerente = perfil_do_gerente(&app_state, user.id).await?;

    let imobiliaria = app_state
        .perfil_repo
        .find_imobiliaria_by_id(gerente.imobiliaria_id)
        .await?
        .ok_or(AppError::NaoEncontrado)?;

    let corretor = app_state
        .hierarquia_service
        .criar_corretor(
            &gerente,
            &imobiliaria,
            &payload.nome,
            &payload.email,
            payload.telefone.as_deref(),
            &payload.cpf,
            &payload.creci,
            &payload.senha,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(corretor)))
}
