use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Senha fraca")]
    SenhaFraca(Vec<&'static str>),

    #[error("CPF inválido")]
    CpfInvalido,

    #[error("CNPJ inválido")]
    CnpjInvalido,

    #[error("E-mail inválido")]
    EmailInvalido,

    #[error("Campo inválido: {0}")]
    CampoInvalido(String),

    #[error("E-mail já existe")]
    EmailJaCadastrado,

    #[error("Documento já existe")]
    DocumentoJaCadastrado,

    #[error("CRECI já existe")]
    CreciJaCadastrado,

    #[error("Credenciais inválidas")]
    CredenciaisInvalidas,

    #[error("Conta pendente de aprovação")]
    ContaPendente,

    #[error("Conta desativada")]
    ContaInativa,

    #[error("Token inválido")]
    InvalidToken,

    // Tokens de confirmação/reset: assinatura, finalidade e expiração
    // colapsam num único resultado para não vazar qual checagem falhou.
    #[error("Token de conta inválido ou expirado")]
    TokenConta,

    #[error("Acesso negado")]
    AcessoNegado(String),

    #[error("Registro não encontrado")]
    NaoEncontrado,

    #[error("Operação protegida")]
    AdminProtegido,

    #[error("Conflito de versão da configuração")]
    ConflitoVersaoConfiguracao,

    #[error("Limite de corretores do plano atingido")]
    LimiteCorretores,

    #[error("Transição de status inválida: {0}")]
    TransicaoInvalida(String),

    #[error("Violação de chave única: {0}")]
    UniqueConstraintViolation(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::SenhaFraca(erros) => {
                let body = Json(json!({
                    "error": "A senha não atende à política de segurança.",
                    "details": erros,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::CpfInvalido => (StatusCode::BAD_REQUEST, "CPF inválido.".to_string()),
            AppError::CnpjInvalido => (StatusCode::BAD_REQUEST, "CNPJ inválido.".to_string()),
            AppError::EmailInvalido => {
                (StatusCode::BAD_REQUEST, "Formato de e-mail inválido.".to_string())
            }
            AppError::CampoInvalido(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::EmailJaCadastrado => {
                (StatusCode::CONFLICT, "Este e-mail já está cadastrado.".to_string())
            }
            AppError::DocumentoJaCadastrado => {
                (StatusCode::CONFLICT, "Este documento já está cadastrado.".to_string())
            }
            AppError::CreciJaCadastrado => {
                (StatusCode::CONFLICT, "Este CRECI já está cadastrado.".to_string())
            }
            AppError::CredenciaisInvalidas => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string())
            }
            AppError::ContaPendente => (
                StatusCode::FORBIDDEN,
                "Sua conta ainda está pendente de aprovação.".to_string(),
            ),
            AppError::ContaInativa => {
                (StatusCode::FORBIDDEN, "Sua conta está desativada.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::TokenConta => {
                (StatusCode::BAD_REQUEST, "Token inválido ou expirado.".to_string())
            }
            AppError::AcessoNegado(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NaoEncontrado => {
                (StatusCode::NOT_FOUND, "Registro não encontrado.".to_string())
            }
            AppError::AdminProtegido => (
                StatusCode::FORBIDDEN,
                "Contas de administrador não podem ser suspensas ou excluídas.".to_string(),
            ),
            AppError::ConflitoVersaoConfiguracao => (
                StatusCode::CONFLICT,
                "A configuração foi alterada por outro administrador. Recarregue e tente novamente."
                    .to_string(),
            ),
            AppError::LimiteCorretores => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "O limite de corretores do plano atual foi atingido.".to_string(),
            ),
            AppError::TransicaoInvalida(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::UniqueConstraintViolation(constraint) => (
                StatusCode::CONFLICT,
                format!("Registro duplicado ({constraint})."),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O detalhe fica apenas no log do servidor.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
