// src/handlers/publico.rs
//
// Vitrine pública: anúncios, campanhas vigentes, entrada de leads e os
// contadores exibidos na home. Nenhuma rota daqui exige autenticação.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        campanha::Campanha,
        configuracao::ConfiguracaoPublica,
        dashboard::PublicStats,
        imovel::{Property, PropertyStatus, PropertyTipo},
        lead::Lead,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct FiltroImoveis {
    pub tipo: Option<PropertyTipo>,
    pub status: Option<PropertyStatus>,
}

// GET /api/imoveis
#[utoipa::path(
    get,
    path = "/api/imoveis",
    tag = "Público",
    params(FiltroImoveis),
    responses((status = 200, description = "Anúncios ativos", body = Vec<Property>))
)]
pub async fn list_imoveis(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroImoveis>,
) -> Result<Json<Vec<Property>>, AppError> {
    let imoveis = app_state
        .imovel_repo
        .list_publicos(filtro.tipo, filtro.status)
        .await?;
    Ok(Json(imoveis))
}

// GET /api/imoveis/{id}
#[utoipa::path(
    get,
    path = "/api/imoveis/{id}",
    tag = "Público",
    params(("id" = Uuid, Path, description = "ID do imóvel")),
    responses(
        (status = 200, description = "Detalhe do anúncio", body = Property),
        (status = 404, description = "Imóvel não encontrado")
    )
)]
pub async fn get_imovel(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Property>, AppError> {
    let imovel = app_state
        .imovel_repo
        .find_by_id(id)
        .await?
        .filter(|i| i.ativo)
        .ok_or(AppError::NaoEncontrado)?;
    Ok(Json(imovel))
}

// GET /api/campanhas
#[utoipa::path(
    get,
    path = "/api/campanhas",
    tag = "Público",
    responses((status = 200, description = "Campanhas vigentes", body = Vec<Campanha>))
)]
pub async fn list_campanhas(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Campanha>>, AppError> {
    let campanhas = app_state.campanha_repo.list_vigentes().await?;
    Ok(Json(campanhas))
}

// GET /api/campanhas/{id}
#[utoipa::path(
    get,
    path = "/api/campanhas/{id}",
    tag = "Público",
    params(("id" = Uuid, Path, description = "ID da campanha")),
    responses(
        (status = 200, description = "Detalhe da campanha", body = Campanha),
        (status = 404, description = "Campanha não encontrada ou fora de vigência")
    )
)]
pub async fn get_campanha(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Campanha>, AppError> {
    let campanha = app_state
        .campanha_repo
        .find_by_id(id)
        .await?
        .filter(|c| c.esta_vigente(chrono::Utc::now()))
        .ok_or(AppError::NaoEncontrado)?;
    Ok(Json(campanha))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarLeadPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Carlos Pereira")]
    pub nome: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "carlos@email.com")]
    pub email: Option<String>,

    #[schema(example = "(11) 98888-7777")]
    pub telefone: Option<String>,

    #[schema(example = "Tenho interesse neste apartamento.")]
    pub mensagem: Option<String>,

    pub property_id: Option<Uuid>,

    #[schema(example = "linktree")]
    pub origem: Option<String>,
}

// POST /api/leads — entrada de interesse; nasce com status "novo".
#[utoipa::path(
    post,
    path = "/api/leads",
    tag = "Público",
    request_body = CriarLeadPayload,
    responses(
        (status = 201, description = "Lead registrado", body = Lead),
        (status = 404, description = "Imóvel informado não existe")
    )
)]
pub async fn criar_lead(
    State(app_state): State<AppState>,
    Json(payload): Json<CriarLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let lead = app_state
        .lead_service
        .criar_publico(
            &payload.nome,
            payload.email.as_deref(),
            payload.telefone.as_deref(),
            payload.mensagem.as_deref(),
            payload.property_id,
            payload.origem.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(lead)))
}

// GET /api/stats — contadores nomeados em JSON plano.
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "Público",
    responses((status = 200, description = "Estatísticas públicas", body = PublicStats))
)]
pub async fn stats(State(app_state): State<AppState>) -> Result<Json<PublicStats>, AppError> {
    let stats = app_state.dashboard_repo.public_stats().await?;
    Ok(Json(stats))
}

// GET /api/configuracao/publica — contatos, WhatsApp e identidade visual.
#[utoipa::path(
    get,
    path = "/api/configuracao/publica",
    tag = "Público",
    responses((status = 200, description = "Configuração pública do site", body = ConfiguracaoPublica))
)]
pub async fn configuracao_publica(
    State(app_state): State<AppState>,
) -> Result<Json<ConfiguracaoPublica>, AppError> {
    let config = app_state.configuracao_repo.get().await?;
    Ok(Json(ConfiguracaoPublica::from(config)))
}
