// src/handlers/admin.rs
//
// Painel do administrador: gestão de usuários (aprovação, suspensão,
// exclusão em cascata), campanhas, moderação de anúncios, configuração
// global e exportações CSV. Tudo atrás de RequireRole<RoleAdmin>.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        validacao::{normalizar_documento, validar_cpf},
    },
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{RequireRole, RoleAdmin},
    },
    models::{
        auth::{MensagemResponse, User, UserRole, UserStatus},
        campanha::Campanha,
        configuracao::{Configuracao, UpdateConfiguracaoPayload},
        dashboard::AdminStats,
        imovel::{Property, PropertyStatus},
    },
    services::export_service,
};

fn erro_de_campo(campo: &str, mensagem: &str) -> AppError {
    AppError::CampoInvalido(format!("{campo}: {mensagem}"))
}

// =============================================================================
//  DASHBOARD E ESTATÍSTICAS
// =============================================================================

// GET /api/admin/stats
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "Admin",
    responses((status = 200, description = "Estatísticas gerais", body = AdminStats)),
    security(("api_jwt" = []))
)]
pub async fn stats(
    State(app_state): State<AppState>,
    _admin: RequireRole<RoleAdmin>,
) -> Result<Json<AdminStats>, AppError> {
    let stats = app_state.dashboard_repo.admin_stats(&app_state.db_pool).await?;
    Ok(Json(stats))
}

#[derive(Debug, serde::Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardResponse {
    pub stats: AdminStats,
    pub usuarios_recentes: Vec<User>,
    pub configuracao: Configuracao,
}

// GET /api/admin/dashboard
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = "Admin",
    responses((status = 200, description = "Visão geral do painel", body = AdminDashboardResponse)),
    security(("api_jwt" = []))
)]
pub async fn dashboard(
    State(app_state): State<AppState>,
    _admin: RequireRole<RoleAdmin>,
) -> Result<Json<AdminDashboardResponse>, AppError> {
    let stats = app_state.dashboard_repo.admin_stats(&app_state.db_pool).await?;
    let usuarios_recentes = app_state.user_repo.list_recent(10).await?;
    let configuracao = app_state.configuracao_repo.get().await?;

    Ok(Json(AdminDashboardResponse {
        stats,
        usuarios_recentes,
        configuracao,
    }))
}

// =============================================================================
//  GESTÃO DE USUÁRIOS
// =============================================================================

#[derive(Debug, Deserialize, IntoParams)]
pub struct FiltroUsuarios {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub page: Option<i64>,
}

// GET /api/admin/usuarios
#[utoipa::path(
    get,
    path = "/api/admin/usuarios",
    tag = "Admin",
    params(FiltroUsuarios),
    responses((status = 200, description = "Usuários filtrados", body = Vec<User>)),
    security(("api_jwt" = []))
)]
pub async fn list_usuarios(
    State(app_state): State<AppState>,
    _admin: RequireRole<RoleAdmin>,
    Query(filtro): Query<FiltroUsuarios>,
) -> Result<Json<Vec<User>>, AppError> {
    const POR_PAGINA: i64 = 20;
    let pagina = filtro.page.unwrap_or(1).max(1);

    let usuarios = app_state
        .user_repo
        .list_users(
            filtro.search.as_deref(),
            filtro.role,
            filtro.status,
            POR_PAGINA,
            (pagina - 1) * POR_PAGINA,
        )
        .await?;

    Ok(Json(usuarios))
}

// GET /api/admin/usuarios/{id}
#[utoipa::path(
    get,
    path = "/api/admin/usuarios/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Detalhe do usuário", body = User),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_usuario(
    State(app_state): State<AppState>,
    _admin: RequireRole<RoleAdmin>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = app_state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NaoEncontrado)?;
    Ok(Json(user))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminCriarUsuarioPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub nome: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    pub telefone: Option<String>,
    pub senha: String,

    // Apenas cliente e corretor: os demais papéis têm fluxo próprio.
    pub role: UserRole,

    pub cpf: Option<String>,
    pub creci: Option<String>,
}

// POST /api/admin/usuarios — usuário já aprovado, com perfil na mesma transação.
#[utoipa::path(
    post,
    path = "/api/admin/usuarios",
    tag = "Admin",
    request_body = AdminCriarUsuarioPayload,
    responses(
        (status = 201, description = "Usuário criado e aprovado", body = User),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar_usuario(
    State(app_state): State<AppState>,
    _admin: RequireRole<RoleAdmin>,
    Json(payload): Json<AdminCriarUsuarioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let cpf = payload
        .cpf
        .as_deref()
        .map(normalizar_documento)
        .filter(|c| !c.is_empty());

    match payload.role {
        UserRole::Cliente | UserRole::Corretor => {}
        _ => {
            return Err(erro_de_campo(
                "role",
                "Pelo painel, apenas clientes e corretores; imobiliárias e gerentes têm cadastro próprio.",
            ));
        }
    }

    let cpf = cpf.ok_or_else(|| erro_de_campo("cpf", "O CPF é obrigatório."))?;
    if !validar_cpf(&cpf) {
        return Err(AppError::CpfInvalido);
    }

    let mut tx = app_state.db_pool.begin().await?;

    let user = app_state
        .auth_service
        .criar_usuario_aprovado(
            &mut *tx,
            &payload.email,
            &payload.senha,
            &payload.nome,
            payload.telefone.as_deref(),
            payload.role,
        )
        .await?;

    match payload.role {
        UserRole::Cliente => {
            app_state
                .perfil_repo
                .create_cliente(
                    &mut *tx,
                    Some(user.id),
                    &user.nome,
                    Some(&user.email),
                    user.telefone.as_deref(),
                    Some(&cpf),
                    None,
                )
                .await?;
        }
        UserRole::Corretor => {
            let creci = payload
                .creci
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .ok_or_else(|| erro_de_campo("creci", "O CRECI é obrigatório para corretores."))?;
            app_state
                .perfil_repo
                .create_corretor(&mut *tx, user.id, &cpf, creci, None, true)
                .await?;
        }
        _ => unreachable!(),
    }

    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(user)))
}

// POST /api/admin/usuarios/{id}/aprovar
#[utoipa::path(
    post,
    path = "/api/admin/usuarios/{id}/aprovar",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário aprovado", body = User),
        (status = 422, description = "Usuário não está pendente")
    ),
    security(("api_jwt" = []))
)]
pub async fn aprovar_usuario(
    State(app_state): State<AppState>,
    _admin: RequireRole<RoleAdmin>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = app_state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NaoEncontrado)?;

    if user.status != UserStatus::Pendente {
        return Err(AppError::TransicaoInvalida(
            "Usuário não está pendente de aprovação.".to_string(),
        ));
    }

    let mut tx = app_state.db_pool.begin().await?;

    let aprovado = app_state
        .user_repo
        .update_status(&mut *tx, id, UserStatus::Ativo)
        .await?;

    // Corretor aprovado volta a receber leads.
    if user.role == UserRole::Corretor {
        app_state
            .perfil_repo
            .ativar_corretor_para_leads(&mut *tx, id, true)
            .await?;
    }

    tx.commit().await?;

    Ok(Json(aprovado))
}

// POST /api/admin/usuarios/{id}/suspender
#[utoipa::path(
    post,
    path = "/api/admin/usuarios/{id}/suspender",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário suspenso", body = User),
        (status = 403, description = "Administradores e a própria conta são protegidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn suspender_usuario(
    State(app_state): State<AppState>,
    AuthenticatedUser(admin): AuthenticatedUser,
    _guard: RequireRole<RoleAdmin>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    if id == admin.id {
        return Err(AppError::AcessoNegado(
            "Você não pode suspender sua própria conta.".to_string(),
        ));
    }

    let user = app_state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NaoEncontrado)?;

    if user.role == UserRole::Admin {
        return Err(AppError::AdminProtegido);
    }

    let suspenso = app_state
        .user_repo
        .update_status(&app_state.db_pool, id, UserStatus::Suspenso)
        .await?;

    Ok(Json(suspenso))
}

// POST /api/admin/usuarios/{id}/ativar
#[utoipa::path(
    post,
    path = "/api/admin/usuarios/{id}/ativar",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses((status = 200, description = "Usuário ativado", body = User)),
    security(("api_jwt" = []))
)]
pub async fn ativar_usuario(
    State(app_state): State<AppState>,
    _admin: RequireRole<RoleAdmin>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let ativado = app_state
        .user_repo
        .update_status(&app_state.db_pool, id, UserStatus::Ativo)
        .await?;
    Ok(Json(ativado))
}

// DELETE /api/admin/usuarios/{id} — cascata de posse; vendas ficam.
#[utoipa::path(
    delete,
    path = "/api/admin/usuarios/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário excluído", body = MensagemResponse),
        (status = 403, description = "Administradores não podem ser excluídos")
    ),
    security(("api_jwt" = []))
)]
pub async fn excluir_usuario(
    State(app_state): State<AppState>,
    AuthenticatedUser(admin): AuthenticatedUser,
    _guard: RequireRole<RoleAdmin>,
    Path(id): Path<Uuid>,
) -> Result<Json<MensagemResponse>, AppError> {
    if id == admin.id {
        return Err(AppError::AcessoNegado(
            "Você não pode excluir sua própria conta.".to_string(),
        ));
    }

    let user = app_state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NaoEncontrado)?;

    app_state.hierarquia_service.excluir_usuario(&user).await?;

    Ok(Json(MensagemResponse {
        message: format!("Usuário {} excluído com sucesso.", user.nome),
    }))
}

// =============================================================================
//  CAMPANHAS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarCampanhaPayload {
    #[validate(length(min = 2, message = "O título deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Feirão de Imóveis")]
    pub titulo: String,

    pub subtitulo: Option<String>,

    #[schema(example = "10% OFF + Brinde")]
    pub desconto: Option<String>,

    #[schema(example = "FGTS aceito;Financiamento até 35 anos")]
    pub beneficios: Option<String>,

    #[schema(example = "Região leste")]
    pub condicoes: Option<String>,

    pub cor_fundo: Option<String>,
    pub cor_texto: Option<String>,

    #[serde(default)]
    pub destaque: bool,

    pub data_inicio: Option<DateTime<Utc>>,
    pub data_fim: Option<DateTime<Utc>>,
}

// POST /api/admin/campanhas
#[utoipa::path(
    post,
    path = "/api/admin/campanhas",
    tag = "Admin",
    request_body = CriarCampanhaPayload,
    responses((status = 201, description = "Campanha criada", body = Campanha)),
    security(("api_jwt" = []))
)]
pub async fn criar_campanha(
    State(app_state): State<AppState>,
    _admin: RequireRole<RoleAdmin>,
    Json(payload): Json<CriarCampanhaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let campanha = app_state
        .campanha_repo
        .create(
            &app_state.db_pool,
            payload.titulo.trim(),
            payload.subtitulo.as_deref(),
            payload.desconto.as_deref(),
            payload.beneficios.as_deref(),
            payload.condicoes.as_deref(),
            payload.cor_fundo.as_deref(),
            payload.cor_texto.as_deref(),
            payload.destaque,
            payload.data_inicio,
            payload.data_fim,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(campanha)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarCampanhaPayload {
    pub titulo: Option<String>,
    pub subtitulo: Option<String>,
    pub desconto: Option<String>,
    pub beneficios: Option<String>,
    pub condicoes: Option<String>,
    pub destaque: Option<bool>,
    pub ativo: Option<bool>,
    pub data_inicio: Option<DateTime<Utc>>,
    pub data_fim: Option<DateTime<Utc>>,
}

// PUT /api/admin/campanhas/{id}
#[utoipa::path(
    put,
    path = "/api/admin/campanhas/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID da campanha")),
    request_body = AtualizarCampanhaPayload,
    responses(
        (status = 200, description = "Campanha atualizada", body = Campanha),
        (status = 404, description = "Campanha não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar_campanha(
    State(app_state): State<AppState>,
    _admin: RequireRole<RoleAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarCampanhaPayload>,
) -> Result<Json<Campanha>, AppError> {
    let campanha = app_state
        .campanha_repo
        .update(
            &app_state.db_pool,
            id,
            payload.titulo.as_deref(),
            payload.subtitulo.as_deref(),
            payload.desconto.as_deref(),
            payload.beneficios.as_deref(),
            payload.condicoes.as_deref(),
            payload.destaque,
            payload.ativo,
            payload.data_inicio,
            payload.data_fim,
        )
        .await?;

    Ok(Json(campanha))
}

// DELETE /api/admin/campanhas/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/campanhas/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID da campanha")),
    responses((status = 200, description = "Campanha excluída", body = MensagemResponse)),
    security(("api_jwt" = []))
)]
pub async fn excluir_campanha(
    State(app_state): State<AppState>,
    _admin: RequireRole<RoleAdmin>,
    Path(id): Path<Uuid>,
) -> Result<Json<MensagemResponse>, AppError> {
    app_state.campanha_repo.delete(&app_state.db_pool, id).await?;
    Ok(Json(MensagemResponse {
        message: "Campanha excluída com sucesso.".to_string(),
    }))
}

// =============================================================================
//  MODERAÇÃO DE ANÚNCIOS
// =============================================================================

#[derive(Debug, Deserialize, ToSchema)]
pub struct AtualizarStatusImovelPayload {
    pub status: PropertyStatus,
}

// PUT /api/admin/imoveis/{id}/status — estado terminal não volta atrás.
#[utoipa::path(
    put,
    path = "/api/admin/imoveis/{id}/status",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do imóvel")),
    request_body = AtualizarStatusImovelPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Property),
        (status = 422, description = "Imóvel já vendido ou alugado")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar_status_imovel(
    State(app_state): State<AppState>,
    _admin: RequireRole<RoleAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarStatusImovelPayload>,
) -> Result<Json<Property>, AppError> {
    let imovel = app_state
        .imovel_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NaoEncontrado)?;

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
//  CONFIGURAÇÃO GLOBAL
// =============================================================================

// GET /api/admin/configuracao
#[utoipa::path(
    get,
    path = "/api/admin/configuracao",
    tag = "Admin",
    responses((status = 200, description = "Configuração completa", body = Configuracao)),
    security(("api_jwt" = []))
)]
pub async fn get_configuracao(
    State(app_state): State<AppState>,
    _admin: RequireRole<RoleAdmin>,
) -> Result<Json<Configuracao>, AppError> {
    let config = app_state.configuracao_repo.get().await?;
    Ok(Json(config))
}

// PUT /api/admin/configuracao — compare-and-swap na versão.
#[utoipa::path(
    put,
    path = "/api/admin/configuracao",
    tag = "Admin",
    request_body = UpdateConfiguracaoPayload,
    responses(
        (status = 200, description = "Configuração salva", body = Configuracao),
        (status = 409, description = "Outra atualização chegou primeiro")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_configuracao(
    State(app_state): State<AppState>,
    _admin: RequireRole<RoleAdmin>,
    Json(payload): Json<UpdateConfiguracaoPayload>,
) -> Result<Json<Configuracao>, AppError> {
    let atualizada = app_state
        .configuracao_repo
        .update_cas(&app_state.db_pool, payload)
        .await?;
    Ok(Json(atualizada))
}

// =============================================================================
//  EXPORTAÇÃO CSV
// =============================================================================

fn resposta_csv(nome_arquivo: &str, conteudo: String) -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{nome_arquivo}\""),
            ),
        ],
        conteudo,
    )
}

// GET /api/admin/export/membros
#[utoipa::path(
    get,
    path = "/api/admin/export/membros",
    tag = "Admin",
    responses((status = 200, description = "CSV de membros", content_type = "text/csv")),
    security(("api_jwt" = []))
)]
pub async fn export_membros(
    State(app_state): State<AppState>,
    _admin: RequireRole<RoleAdmin>,
) -> Result<impl IntoResponse, AppError> {
    let usuarios = app_state
        .user_repo
        .list_users(None, None, None, i64::MAX, 0)
        .await?;
    let csv = export_service::exportar_membros(&usuarios)?;
    Ok(resposta_csv("membros.csv", csv))
}

// GET /api/admin/export/imoveis
#[utoipa::path(
    get,
    path = "/api/admin/export/imoveis",
    tag = "Admin",
    responses((status = 200, description = "CSV de imóveis", content_type = "text/csv")),
    security(("api_jwt" = []))
)]
pub async fn export_imoveis(
    State(app_state): State<AppState>,
    _admin: RequireRole<RoleAdmin>,
) -> Result<impl IntoResponse, AppError> {
    let imoveis = app_state.imovel_repo.list_todos().await?;
    let csv = export_service::exportar_imoveis(&imoveis)?;
    Ok(resposta_csv("imoveis.csv", csv))
}

// GET /api/admin/export/campanhas
#[utoipa::path(
    get,
    path = "/api/admin/export/campanhas",
    tag = "Admin",
    responses((status = 200, description = "CSV de campanhas", content_type = "text/csv")),
    security(("api_jwt" = []))
)]
pub async fn export_campanhas(
    State(app_state): State<AppState>,
    _admin: RequireRole<RoleAdmin>,
) -> Result<impl IntoResponse, AppError> {
    let campanhas = app_state.campanha_repo.list_all().await?;
    let csv = export_service::exportar_campanhas(&campanhas)?;
    Ok(resposta_csv("campanhas.csv", csv))
}
