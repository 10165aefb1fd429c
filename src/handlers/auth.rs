// src/handlers/auth.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        validacao::{normalizar_documento, validar_cnpj, validar_cpf, validar_email},
    },
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{
        AuthResponse, CheckEmailPayload, DisponibilidadeResponse, ForgotPasswordPayload,
        LoginUserPayload, MensagemResponse, RegisterClientePayload, RegisterCorretorPayload,
        RegisterImobiliariaPayload, RegistroPendenteResponse, ResetPasswordPayload, TipoDocumento,
        User, ValidacaoDocumentoResponse, ValidateDocumentPayload,
    },
};

// POST /api/auth/register/cliente
#[utoipa::path(
    post,
    path = "/api/auth/register/cliente",
    tag = "Auth",
    request_body = RegisterClientePayload,
    responses(
        (status = 201, description = "Cliente cadastrado e autenticado", body = AuthResponse),
        (status = 400, description = "Dados inválidos (senha fraca, CPF inválido)"),
        (status = 409, description = "E-mail ou CPF já cadastrado")
    )
)]
pub async fn register_cliente(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let resposta = app_state.auth_service.register_cliente(payload).await?;

    Ok((StatusCode::CREATED, Json(resposta)))
}

// POST /api/auth/register/corretor
#[utoipa::path(
    post,
    path = "/api/auth/register/corretor",
    tag = "Auth",
    request_body = RegisterCorretorPayload,
    responses(
        (status = 201, description = "Cadastro enviado para análise", body = RegistroPendenteResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail, CPF ou CRECI já cadastrado")
    )
)]
pub async fn register_corretor(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterCorretorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let user = app_state.auth_service.register_corretor(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistroPendenteResponse {
            user,
            message: "Cadastro enviado com sucesso! Sua conta será analisada e você receberá um e-mail de confirmação.".to_string(),
        }),
    ))
}

// POST /api/auth/register/imobiliaria
#[utoipa::path(
    post,
    path = "/api/auth/register/imobiliaria",
    tag = "Auth",
    request_body = RegisterImobiliariaPayload,
    responses(
        (status = 201, description = "Cadastro enviado para análise", body = RegistroPendenteResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail ou CNPJ já cadastrado")
    )
)]
pub async fn register_imobiliaria(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterImobiliariaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let user = app_state.auth_service.register_imobiliaria(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistroPendenteResponse {
            user,
            message: "Cadastro enviado com sucesso! Sua conta será analisada e você receberá um e-mail de confirmação.".to_string(),
        }),
    ))
}

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Sessão criada", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas"),
        (status = 403, description = "Conta pendente ou desativada")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let resposta = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok(Json(resposta))
}

// GET /api/auth/me — dados frescos do banco, não as claims do token.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Usuário autenticado", body = User),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<User>, AppError> {
    let user = app_state.auth_service.me(user.id).await?;
    Ok(Json(user))
}

// GET /api/auth/confirm-email/{token}
#[utoipa::path(
    get,
    path = "/api/auth/confirm-email/{token}",
    tag = "Auth",
    params(("token" = String, Path, description = "Token de confirmação")),
    responses(
        (status = 200, description = "E-mail confirmado", body = MensagemResponse),
        (status = 400, description = "Token inválido ou expirado")
    )
)]
pub async fn confirm_email(
    State(app_state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<MensagemResponse>, AppError> {
    app_state.auth_service.confirm_email(&token).await?;

    Ok(Json(MensagemResponse {
        message: "E-mail confirmado com sucesso!".to_string(),
    }))
}

// POST /api/auth/forgot-password — resposta idêntica exista ou não a conta.
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    tag = "Auth",
    request_body = ForgotPasswordPayload,
    responses(
        (status = 200, description = "Instruções enviadas se o e-mail existir", body = MensagemResponse)
    )
)]
pub async fn forgot_password(
    State(app_state): State<AppState>,
    Json(payload): Json<ForgotPasswordPayload>,
) -> Result<Json<MensagemResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    app_state.auth_service.forgot_password(&payload.email).await?;

    Ok(Json(MensagemResponse {
        message: "Se o e-mail estiver cadastrado, enviaremos instruções para redefinir a senha."
            .to_string(),
    }))
}

// POST /api/auth/reset-password
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    tag = "Auth",
    request_body = ResetPasswordPayload,
    responses(
        (status = 200, description = "Senha redefinida", body = MensagemResponse),
        (status = 400, description = "Token inválido/expirado ou senha fraca")
    )
)]
pub async fn reset_password(
    State(app_state): State<AppState>,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<Json<MensagemResponse>, AppError> {
    app_state
        .auth_service
        .reset_password(&payload.token, &payload.password)
        .await?;

    Ok(Json(MensagemResponse {
        message: "Senha redefinida com sucesso!".to_string(),
    }))
}

// POST /api/auth/check-email — consumido pelo formulário de cadastro.
#[utoipa::path(
    post,
    path = "/api/auth/check-email",
    tag = "Auth",
    request_body = CheckEmailPayload,
    responses((status = 200, description = "Disponibilidade do e-mail", body = DisponibilidadeResponse))
)]
pub async fn check_email(
    State(app_state): State<AppState>,
    Json(payload): Json<CheckEmailPayload>,
) -> Result<Json<DisponibilidadeResponse>, AppError> {
    let email = payload.email.trim().to_lowercase();

    if email.is_empty() {
        return Ok(Json(DisponibilidadeResponse {
            available: false,
            message: "E-mail é obrigatório.".to_string(),
        }));
    }

    if !validar_email(&email) {
        return Ok(Json(DisponibilidadeResponse {
            available: false,
            message: "Formato de e-mail inválido.".to_string(),
        }));
    }

    if app_state.user_repo.email_em_uso(&email).await? {
        return Ok(Json(DisponibilidadeResponse {
            available: false,
            message: "Este e-mail já está cadastrado.".to_string(),
        }));
    }

    Ok(Json(DisponibilidadeResponse {
        available: true,
        message: "E-mail disponível.".to_string(),
    }))
}

// POST /api/auth/validate-document — dígito verificador antes de qualquer
// consulta; só então a unicidade.
#[utoipa::path(
    post,
    path = "/api/auth/validate-document",
    tag = "Auth",
    request_body = ValidateDocumentPayload,
    responses((status = 200, description = "Validade do documento", body = ValidacaoDocumentoResponse))
)]
pub async fn validate_document(
    State(app_state): State<AppState>,
    Json(payload): Json<ValidateDocumentPayload>,
) -> Result<Json<ValidacaoDocumentoResponse>, AppError> {
    let documento = normalizar_documento(&payload.document);

    if documento.is_empty() {
        return Ok(Json(ValidacaoDocumentoResponse {
            valid: false,
            message: "Documento é obrigatório.".to_string(),
        }));
    }

    let resposta = match payload.tipo {
        TipoDocumento::Cpf => {
            if !validar_cpf(&documento) {
                ValidacaoDocumentoResponse {
                    valid: false,
                    message: "CPF inválido.".to_string(),
                }
            } else if app_state.perfil_repo.cpf_em_uso(&documento).await? {
                ValidacaoDocumentoResponse {
                    valid: false,
                    message: "Este CPF já está cadastrado.".to_string(),
                }
            } else {
                ValidacaoDocumentoResponse {
                    valid: true,
                    message: "CPF válido.".to_string(),
                }
            }
        }
        TipoDocumento::Cnpj => {
            if !validar_cnpj(&documento) {
                ValidacaoDocumentoResponse {
                    valid: false,
                    message: "CNPJ inválido.".to_string(),
                }
            } else if app_state.perfil_repo.cnpj_em_uso(&documento).await? {
                ValidacaoDocumentoResponse {
                    valid: false,
                    message: "Este CNPJ já está cadastrado.".to_string(),
                }
            } else {
                ValidacaoDocumentoResponse {
                    valid: true,
                    message: "CNPJ válido.".to_string(),
                }
            }
        }
    };

    Ok(Json(resposta))
}
