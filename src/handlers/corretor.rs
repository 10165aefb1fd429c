// src/handlers/corretor.rs
//
// Painel do corretor: carteira de clientes, anúncios próprios, leads e
// vendas. Cada rota usa a guarda de permissão correspondente; tudo aqui é
// escopado ao perfil do corretor logado.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        validacao::{normalizar_documento, validar_cpf},
    },
    config::AppState,
    handlers::exigir_usuario_ativo,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{
            PermCreateContracts, PermManageClients, PermViewCommissions, PermViewProperties,
            RequirePermission, RequireRole, RoleCorretor,
        },
    },
    models::{
        dashboard::CorretorDashboard,
        imovel::{Property, PropertyStatus, PropertyTipo},
        lead::{Lead, LeadStatus},
        perfil::{ClienteProfile, CorretorProfile},
        venda::{Venda, VendaStatus},
    },
};

async fn perfil_do_corretor(
    app_state: &AppState,
    user_id: Uuid,
) -> Result<CorretorProfile, AppError> {
    app_state
        .perfil_repo
        .find_corretor_by_user(user_id)
        .await?
        .ok_or(AppError::NaoEncontrado)
}

// GET /api/corretor/dashboard
#[utoipa::path(
    get,
    path = "/api/corretor/dashboard",
    tag = "Corretor",
    responses((status = 200, description = "Números do corretor", body = CorretorDashboard)),
    security(("api_jwt" = []))
)]
pub async fn dashboard(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequireRole<RoleCorretor>,
) -> Result<Json<CorretorDashboard>, AppError> {
    exigir_usuario_ativo(&app_state, user.id).await?;
    let corretor = perfil_do_corretor(&app_state, user.id).await?;

    let total_clientes = app_state
        .perfil_repo
        .list_clientes_do_corretor(corretor.id)
        .await?
        .len() as i64;
    let total_imoveis = app_state.imovel_repo.count_do_corretor(corretor.id).await?;
    let leads = app_state.lead_repo.contagem_por_status(corretor.id).await?;
    let (vendas_em_andamento, vendas_concluidas) = app_state
        .venda_repo
        .contagens_do_corretor(corretor.id)
        .await?;
    let comissao_total = app_state.venda_repo.comissao_total(corretor.id).await?;
    let vendas_mes_valor = app_state
        .venda_repo
        .valor_vendido_no_mes(corretor.id)
        .await?;
    let leads_recentes = app_state
        .lead_repo
        .list_recentes_do_corretor(corretor.id, 5)
        .await?;

    // Percentual da meta: só quando há meta cadastrada e maior que zero.
    let percentual_meta = corretor.meta_vendas_mes.and_then(|meta| {
        if meta > Decimal::ZERO {
            (vendas_mes_valor / meta * Decimal::from(100)).to_f64()
        } else {
            None
        }
    });

    Ok(Json(CorretorDashboard {
        total_clientes,
        total_imoveis,
        leads,
        vendas_em_andamento,
        vendas_concluidas,
        comissao_total,
        vendas_mes_valor,
        meta_vendas_mes: corretor.meta_vendas_mes,
        percentual_meta,
        leads_recentes,
    }))
}

// =============================================================================
//  CARTEIRA DE CLIENTES
// =============================================================================

// GET /api/corretor/clientes
#[utoipa::path(
    get,
    path = "/api/corretor/clientes",
    tag = "Corretor",
    responses((status = 200, description = "Clientes da carteira", body = Vec<ClienteProfile>)),
    security(("api_jwt" = []))
)]
pub async fn list_clientes(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _perm: RequirePermission<PermManageClients>,
) -> Result<Json<Vec<ClienteProfile>>, AppError> {
    let corretor = perfil_do_corretor(&app_state, user.id).await?;
    let clientes = app_state
        .perfil_repo
        .list_clientes_do_corretor(corretor.id)
        .await?;
    Ok(Json(clientes))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarClientePayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub nome: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    pub telefone: Option<String>,

    // Contato de carteira pode não ter CPF em mãos; quando vem, é validado.
    pub cpf: Option<String>,
}

// POST /api/corretor/clientes — contato da carteira, sem login próprio.
#[utoipa::path(
    post,
    path = "/api/corretor/clientes",
    tag = "Corretor",
    request_body = CriarClientePayload,
    responses(
        (status = 201, description = "Cliente adicionado à carteira", body = ClienteProfile),
        (status = 400, description = "CPF inválido"),
        (status = 409, description = "CPF já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar_cliente(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _perm: RequirePermission<PermManageClients>,
    Json(payload): Json<CriarClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    exigir_usuario_ativo(&app_state, user.id).await?;
    let corretor = perfil_do_corretor(&app_state, user.id).await?;

    let cpf = payload
        .cpf
        .as_deref()
        .map(normalizar_documento)
        .filter(|c| !c.is_empty());
    if let Some(cpf) = &cpf {
        if !validar_cpf(cpf) {
            return Err(AppError::CpfInvalido);
        }
    }

    let cliente = app_state
        .perfil_repo
        .create_cliente(
            &app_state.db_pool,
            None,
            payload.nome.trim(),
            payload.email.as_deref(),
            payload.telefone.as_deref(),
            cpf.as_deref(),
            Some(corretor.id),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(cliente)))
}

// =============================================================================
//  ANÚNCIOS
// =============================================================================

// GET /api/corretor/imoveis
#[utoipa::path(
    get,
    path = "/api/corretor/imoveis",
    tag = "Corretor",
    responses((status = 200, description = "Anúncios do corretor", body = Vec<Property>)),
    security(("api_jwt" = []))
)]
pub async fn list_imoveis(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _perm: RequirePermission<PermViewProperties>,
) -> Result<Json<Vec<Property>>, AppError> {
    let corretor = perfil_do_corretor(&app_state, user.id).await?;
    let imoveis = app_state.imovel_repo.list_do_corretor(corretor.id).await?;
    Ok(Json(imoveis))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarImovelPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Apartamento Jardim Europa")]
    pub nome: String,

    pub tipo: PropertyTipo,

    #[schema(example = 350000.0)]
    pub preco: Decimal,

    #[schema(example = "Suzano, SP")]
    pub localizacao: Option<String>,
    pub quartos: Option<i32>,
    pub banheiros: Option<i32>,

    #[schema(example = "72m²")]
    pub area: Option<String>,
    pub descricao: Option<String>,

    #[serde(default)]
    pub destaque: bool,
}

// POST /api/corretor/imoveis
#[utoipa::path(
    post,
    path = "/api/corretor/imoveis",
    tag = "Corretor",
    request_body = CriarImovelPayload,
    responses((status = 201, description = "Anúncio criado", body = Property)),
    security(("api_jwt" = []))
)]
pub async fn criar_imovel(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _perm: RequirePermission<PermViewProperties>,
    Json(payload): Json<CriarImovelPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    exigir_usuario_ativo(&app_state, user.id).await?;
    let corretor = perfil_do_corretor(&app_state, user.id).await?;

    let imovel = app_state
        .imovel_repo
        .create(
            &app_state.db_pool,
            Some(corretor.id),
            payload.nome.trim(),
            payload.tipo,
            payload.preco,
            payload.localizacao.as_deref(),
            payload.quartos,
            payload.banheiros,
            payload.area.as_deref(),
            payload.descricao.as_deref(),
            payload.destaque,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(imovel)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarImovelPayload {
    pub nome: Option<String>,
    pub preco: Option<Decimal>,
    pub localizacao: Option<String>,
    pub descricao: Option<String>,
    pub destaque: Option<bool>,
    pub ativo: Option<bool>,
}

// PUT /api/corretor/imoveis/{id}
#[utoipa::path(
    put,
    path = "/api/corretor/imoveis/{id}",
    tag = "Corretor",
    params(("id" = Uuid, Path, description = "ID do imóvel")),
    request_body = AtualizarImovelPayload,
    responses(
        (status = 200, description = "Anúncio atualizado", body = Property),
        (status = 403, description = "Anúncio de outro corretor")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar_imovel(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _perm: RequirePermission<PermViewProperties>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarImovelPayload>,
) -> Result<Json<Property>, AppError> {
    let corretor = perfil_do_corretor(&app_state, user.id).await?;

    let imovel = app_state
        .imovel_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NaoEncontrado)?;
    if imovel.corretor_id != Some(corretor.id) {
        return Err(AppError::AcessoNegado(
            "Este anúncio pertence a outro corretor.".to_string(),
        ));
    }

    let atualizado = app_state
        .imovel_repo
        .update(
            &app_state.db_pool,
            id,
            payload.nome.as_deref(),
            payload.preco,
            payload.localizacao.as_deref(),
            payload.descricao.as_deref(),
            payload.destaque,
            payload.ativo,
        )
        .await?;

    Ok(Json(atualizado))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AtualizarStatusImovelPayload {
    pub status: PropertyStatus,
}

// PUT /api/corretor/imoveis/{id}/status — vendido/alugado não volta atrás.
#[utoipa::path(
    put,
    path = "/api/corretor/imoveis/{id}/status",
    tag = "Corretor",
    params(("id" = Uuid, Path, description = "ID do imóvel")),
    request_body = AtualizarStatusImovelPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Property),
        (status = 403, description = "Anúncio de outro corretor"),
        (status = 422, description = "Imóvel em estado terminal")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar_status_imovel(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _perm: RequirePermission<PermViewProperties>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarStatusImovelPayload>,
) -> Result<Json<Property>, AppError> {
    let corretor = perfil_do_corretor(&app_state, user.id).await?;

    let imovel = app_state
        .imovel_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NaoEncontrado)?;

    if imovel.corretor_id != Some(corretor.id) {
        return Err(AppError::AcessoNegado(
            "Este anúncio pertence a outro corretor.".to_string(),
        ));
    }
    if imovel.status.terminal() {
        return Err(AppError::TransicaoInvalida(
            "Este imóvel já foi vendido ou alugado.".to_string(),
        ));
    }

    let atualizado = app_state
        .imovel_repo
        .update_status(&app_state.db_pool, id, payload.status)
        .await?;

    Ok(Json(atualizado))
}

// =============================================================================
//  LEADS
// =============================================================================

// GET /api/corretor/leads
#[utoipa::path(
    get,
    path = "/api/corretor/leads",
    tag = "Corretor",
    responses((status = 200, description = "Leads do corretor", body = Vec<Lead>)),
    security(("api_jwt" = []))
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _perm: RequirePermission<PermManageClients>,
) -> Result<Json<Vec<Lead>>, AppError> {
    let corretor = perfil_do_corretor(&app_state, user.id).await?;
    let leads = app_state.lead_repo.list_do_corretor(corretor.id).await?;
    Ok(Json(leads))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AtualizarStatusLeadPayload {
    pub status: LeadStatus,
}

// PUT /api/corretor/leads/{id}/status — só anda para a frente.
#[utoipa::path(
    put,
    path = "/api/corretor/leads/{id}/status",
    tag = "Corretor",
    params(("id" = Uuid, Path, description = "ID do lead")),
    request_body = AtualizarStatusLeadPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Lead),
        (status = 422, description = "Transição para trás")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar_status_lead(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _perm: RequirePermission<PermManageClients>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarStatusLeadPayload>,
) -> Result<Json<Lead>, AppError> {
    let corretor = perfil_do_corretor(&app_state, user.id).await?;

    let lead = app_state
        .lead_service
        .transicionar(id, payload.status, Some(corretor.id))
        .await?;

    Ok(Json(lead))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReatribuirLeadPayload {
    pub novo_corretor_id: Uuid,
}

// PUT /api/corretor/leads/{id}/reatribuir
#[utoipa::path(
    put,
    path = "/api/corretor/leads/{id}/reatribuir",
    tag = "Corretor",
    params(("id" = Uuid, Path, description = "ID do lead")),
    request_body = ReatribuirLeadPayload,
    responses(
        (status = 200, description = "Lead reatribuído", body = Lead),
        (status = 422, description = "Corretor de destino indisponível")
    ),
    security(("api_jwt" = []))
)]
pub async fn reatribuir_lead(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _perm: RequirePermission<PermManageClients>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReatribuirLeadPayload>,
) -> Result<Json<Lead>, AppError> {
    let corretor = perfil_do_corretor(&app_state, user.id).await?;

    let lead = app_state
        .lead_service
        .reatribuir(id, payload.novo_corretor_id, Some(corretor.id))
        .await?;

    Ok(Json(lead))
}

// =============================================================================
//  VENDAS
// =============================================================================

// GET /api/corretor/vendas — valores e comissões das próprias vendas.
#[utoipa::path(
    get,
    path = "/api/corretor/vendas",
    tag = "Corretor",
    responses((status = 200, description = "Vendas do corretor", body = Vec<Venda>)),
    security(("api_jwt" = []))
)]
pub async fn list_vendas(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _perm: RequirePermission<PermViewCommissions>,
) -> Result<Json<Vec<Venda>>, AppError> {
    let corretor = perfil_do_corretor(&app_state, user.id).await?;
    let vendas = app_state.venda_repo.list_do_corretor(corretor.id).await?;
    Ok(Json(vendas))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarVendaPayload {
    pub cliente_id: Uuid,
    pub property_id: Uuid,

    #[schema(example = 350000.0)]
    pub valor: Decimal,

    #[schema(example = "Financiado")]
    pub forma_pagamento: Option<String>,
    pub observacoes: Option<String>,
}

// POST /api/corretor/vendas — comissão capturada no ato.
#[utoipa::path(
    post,
    path = "/api/corretor/vendas",
    tag = "Corretor",
    request_body = CriarVendaPayload,
    responses(
        (status = 201, description = "Venda aberta em negociação", body = Venda),
        (status = 422, description = "Imóvel já vendido ou alugado")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar_venda(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _perm: RequirePermission<PermCreateContracts>,
    Json(payload): Json<CriarVendaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    exigir_usuario_ativo(&app_state, user.id).await?;
    let corretor = perfil_do_corretor(&app_state, user.id).await?;

    let venda = app_state
        .venda_service
        .criar(
            corretor.id,
            payload.cliente_id,
            payload.property_id,
            payload.valor,
            payload.forma_pagamento.as_deref(),
            payload.observacoes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(venda)))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AtualizarStatusVendaPayload {
    pub status: VendaStatus,
}

// PUT /api/corretor/vendas/{id}/status
#[utoipa::path(
    put,
    path = "/api/corretor/vendas/{id}/status",
    tag = "Corretor",
    params(("id" = Uuid, Path, description = "ID da venda")),
    request_body = AtualizarStatusVendaPayload,
    responses(
        (status = 200, description = "Venda atualizada", body = Venda),
        (status = 422, description = "Transição inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar_status_venda(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _perm: RequirePermission<PermCreateContracts>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarStatusVendaPayload>,
) -> Result<Json<Venda>, AppError> {
    let corretor = perfil_do_corretor(&app_state, user.id).await?;

    let venda = app_state
        .venda_service
        .transicionar(id, payload.status, Some(corretor.id))
        .await?;

    Ok(Json(venda))
}
