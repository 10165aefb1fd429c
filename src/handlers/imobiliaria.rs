// src/handlers/imobiliaria.rs
//
// Painel da imobiliária: visão da equipe inteira (gerentes e corretores),
// gestão de gerentes e leitura agregada dos números do time.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::exigir_usuario_ativo,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{RequireRole, RoleImobiliaria},
    },
    models::{
        auth::MensagemResponse,
        dashboard::ImobiliariaDashboard,
        perfil::{CorretorProfile, CorretorResumo, Gerente, ImobiliariaProfile},
    },
};

async fn perfil_da_imobiliaria(
    app_state: &AppState,
    user_id: Uuid,
) -> Result<ImobiliariaProfile, AppError> {
    app_state
        .perfil_repo
        .find_imobiliaria_by_user(user_id)
        .await?
        .ok_or(AppError::NaoEncontrado)
}

// GET /api/imobiliaria/dashboard
#[utoipa::path(
    get,
    path = "/api/imobiliaria/dashboard",
    tag = "Imobiliária",
    responses((status = 200, description = "Números da equipe", body = ImobiliariaDashboard)),
    security(("api_jwt" = []))
)]
pub async fn dashboard(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireRole<RoleImobiliaria>,
) -> Result<Json<ImobiliariaDashboard>, AppError> {
    exigir_usuario_ativo(&app_state, user.id).await?;
    let imobiliaria = perfil_da_imobiliaria(&app_state, user.id).await?;

    let (total_gerentes, gerentes_ativos, total_corretores, corretores_ativos) = app_state
        .dashboard_repo
        .contagens_da_imobiliaria(imobiliaria.id)
        .await?;
    let total_imoveis = app_state
        .imovel_repo
        .count_da_imobiliaria(imobiliaria.id)
        .await?;
    let total_leads = app_state
        .lead_repo
        .count_da_imobiliaria(imobiliaria.id)
        .await?;
    let vendas_mes = app_state
        .venda_repo
        .vendas_concluidas_mes_da_imobiliaria(imobiliaria.id)
        .await?;
    let top_corretores = app_state
        .dashboard_repo
        .top_corretores_da_imobiliaria(imobiliaria.id, 5)
        .await?;

    let uso_limite_corretores = if imobiliaria.limite_corretores > 0 {
        (total_corretores as f64 / imobiliaria.limite_corretores as f64) * 100.0
    } else {
        0.0
    };

    Ok(Json(ImobiliariaDashboard {
        total_gerentes,
        gerentes_ativos,
        total_corretores,
        corretores_ativos,
        total_imoveis,
        total_leads,
        vendas_mes,
        plano_ativo: imobiliaria.plano_ativo,
        limite_corretores: imobiliaria.limite_corretores,
        limite_imoveis: imobiliaria.limite_imoveis,
        uso_limite_corretores,
        top_corretores,
    }))
}

// =============================================================================
//  GERENTES
// =============================================================================

// GET /api/imobiliaria/gerentes
#[utoipa::path(
    get,
    path = "/api/imobiliaria/gerentes",
    tag = "Imobiliária",
    responses((status = 200, description = "Gerentes da imobiliária", body = Vec<Gerente>)),
    security(("api_jwt" = []))
)]
pub async fn list_gerentes(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireRole<RoleImobiliaria>,
) -> Result<Json<Vec<Gerente>>, AppError> {
    let imobiliaria = perfil_da_imobiliaria(&app_state, user.id).await?;
    let gerentes = app_state.perfil_repo.list_gerentes(imobiliaria.id).await?;
    Ok(Json(gerentes))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarGerentePayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub nome: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    pub telefone: Option<String>,

    #[validate(length(min = 3, message = "O CRECI é obrigatório."))]
    pub creci: String,

    // Com senha, o gerente ganha login próprio no painel.
    pub senha: Option<String>,
}

// POST /api/imobiliaria/gerentes
#[utoipa::path(
    post,
    path = "/api/imobiliaria/gerentes",
    tag = "Imobiliária",
    request_body = CriarGerentePayload,
    responses(
        (status = 201, description = "Gerente criado", body = Gerente),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar_gerente(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireRole<RoleImobiliaria>,
    Json(payload): Json<CriarGerentePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    exigir_usuario_ativo(&app_state, user.id).await?;
    let imobiliaria = perfil_da_imobiliaria(&app_state, user.id).await?;

    let gerente = app_state
        .hierarquia_service
        .criar_gerente(
            &imobiliaria,
            &payload.nome,
            &payload.email,
            payload.telefone.as_deref(),
            &payload.creci,
            payload.senha.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(gerente)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarGerentePayload {
    pub nome: Option<String>,
    pub telefone: Option<String>,
    pub ativo: Option<bool>,
}

// PUT /api/imobiliaria/gerentes/{id}
#[utoipa::path(
    put,
    path = "/api/imobiliaria/gerentes/{id}",
    tag = "Imobiliária",
    params(("id" = Uuid, Path, description = "ID do gerente")),
    request_body = AtualizarGerentePayload,
    responses(
        (status = 200, description = "Gerente atualizado", body = Gerente),
        (status = 403, description = "Gerente de outra imobiliária")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar_gerente(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireRole<RoleImobiliaria>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarGerentePayload>,
) -> Result<Json<Gerente>, AppError> {
    let imobiliaria = perfil_da_imobiliaria(&app_state, user.id).await?;

    let gerente = app_state
        .perfil_repo
        .find_gerente_by_id(id)
        .await?
        .ok_or(AppError::NaoEncontrado)?;
    if gerente.imobiliaria_id != imobiliaria.id {
        return Err(AppError::AcessoNegado(
            "Este gerente pertence a outra imobiliária.".to_string(),
        ));
    }

    let atualizado = app_state
        .perfil_repo
        .update_gerente(
            &app_state.db_pool,
            id,
            payload.nome.as_deref(),
            payload.telefone.as_deref(),
            payload.ativo,
        )
        .await?;

    Ok(Json(atualizado))
}

// DELETE /api/imobiliaria/gerentes/{id} — derruba os corretores do gerente junto.
#[utoipa::path(
    delete,
    path = "/api/imobiliaria/gerentes/{id}",
    tag = "Imobiliária",
    params(("id" = Uuid, Path, description = "ID do gerente")),
    responses(
        (status = 200, description = "Gerente excluído", body = MensagemResponse),
        (status = 403, description = "Gerente de outra imobiliária")
    ),
    security(("api_jwt" = []))
)]
pub async fn excluir_gerente(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireRole<RoleImobiliaria>,
    Path(id): Path<Uuid>,
) -> Result<Json<MensagemResponse>, AppError> {
    let imobiliaria = perfil_da_imobiliaria(&app_state, user.id).await?;

    app_state
        .hierarquia_service
        .excluir_gerente(id, &imobiliaria)
        .await?;

    Ok(Json(MensagemResponse {
        message: "Gerente e corretores vinculados foram excluídos.".to_string(),
    }))
}

// =============================================================================
//  CORRETORES DA EQUIPE
// =============================================================================

// GET /api/imobiliaria/corretores
#[utoipa::path(
    get,
    path = "/api/imobiliaria/corretores",
    tag = "Imobiliária",
    responses((status = 200, description = "Equipe completa de corretores", body = Vec<CorretorResumo>)),
    security(("api_jwt" = []))
)]
pub async fn list_corretores(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireRole<RoleImobiliaria>,
) -> Result<Json<Vec<CorretorResumo>>, AppError> {
    let imobiliaria = perfil_da_imobiliaria(&app_state, user.id).await?;
    let corretores = app_state
        .perfil_repo
        .list_corretores_da_imobiliaria(imobiliaria.id)
        .await?;
    Ok(Json(corretores))
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CorretorDetailResponse {
    pub corretor: CorretorProfile,
    pub total_imoveis: i64,
    pub total_leads: i64,
    pub vendas_em_andamento: i64,
    pub vendas_concluidas: i64,
}

// GET /api/imobiliaria/corretores/{id}
#[utoipa::path(
    get,
    path = "/api/imobiliaria/corretores/{id}",
    tag = "Imobiliária",
    params(("id" = Uuid, Path, description = "ID do perfil de corretor")),
    responses(
        (status = 200, description = "Detalhe do corretor com métricas", body = CorretorDetailResponse),
        (status = 403, description = "Corretor de outra imobiliária")
    ),
    security(("api_jwt" = []))
)]
pub async fn corretor_detail(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireRole<RoleImobiliaria>,
    Path(id): Path<Uuid>,
) -> Result<Json<CorretorDetailResponse>, AppError> {
    let imobiliaria = perfil_da_imobiliaria(&app_state, user.id).await?;

    let corretor = app_state
        .perfil_repo
        .find_corretor_by_id(id)
        .await?
        .ok_or(AppError::NaoEncontrado)?;

    // O corretor precisa estar pendurado num gerente desta imobiliária.
    let gerente_id = corretor.gerente_id.ok_or(AppError::AcessoNegado(
        "Este corretor não pertence à sua equipe.".to_string(),
    ))?;
    let gerente = app_state
        .perfil_repo
        .find_gerente_by_id(gerente_id)
        .await?
        .ok_or(AppError::NaoEncontrado)?;
    if gerente.imobiliaria_id != imobiliaria.id {
        return Err(AppError::AcessoNegado(
            "Este corretor não pertence à sua equipe.".to_string(),
        ));
    }

    let total_imoveis = app_state.imovel_repo.count_do_corretor(corretor.id).await?;
    let leads = app_state.lead_repo.contagem_por_status(corretor.id).await?;
    let (vendas_em_andamento, vendas_concluidas) = app_state
        .venda_repo
        .contagens_do_corretor(corretor.id)
        .await?;

    Ok(Json(CorretorDetailResponse {
        corretor,
        total_imoveis,
        total_leads: leads.novos + leads.contactados + leads.interessados + leads.nao_interessados,
        vendas_em_andamento,
        vendas_concluidas,
    }))
}
