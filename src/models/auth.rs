// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Papel canônico do usuário. Enum único para todo o sistema — o papel
// gravado no banco, o embutido no token e o usado nas guardas são o mesmo tipo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Imobiliaria,
    Gerente,
    Corretor,
    Cliente,
}

impl UserRole {
    pub fn descricao(&self) -> &'static str {
        match self {
            UserRole::Admin => "Administrador",
            UserRole::Imobiliaria => "Imobiliária",
            UserRole::Gerente => "Gerente",
            UserRole::Corretor => "Corretor de Imóveis",
            UserRole::Cliente => "Cliente",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Ativo,
    Inativo,
    Pendente,
    Suspenso,
}

impl UserStatus {
    pub fn descricao(&self) -> &'static str {
        match self {
            UserStatus::Ativo => "Ativo",
            UserStatus::Inativo => "Inativo",
            UserStatus::Pendente => "Pendente",
            UserStatus::Suspenso => "Suspenso",
        }
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub nome: String,
    pub telefone: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    pub email_verified: bool,
    pub phone_verified: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

// Estrutura de dados ("claims") dentro do JWT de sessão.
// Identidade tipada: id, e-mail, papel e nome de exibição viajam juntos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub nome: String,
    pub role: UserRole,
    pub exp: usize,
    pub iat: usize,
}

// --- Payloads de cadastro ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterClientePayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Maria Santos")]
    pub nome: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "maria@teste.com.br")]
    pub email: String,

    #[schema(example = "(11) 91234-5678")]
    pub telefone: Option<String>,

    #[schema(example = "Cliente@123")]
    pub password: String,

    #[schema(example = "529.982.247-25")]
    pub cpf: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCorretorPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    #[schema(example = "João Silva")]
    pub nome: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "corretor@lumiar.com.br")]
    pub email: String,

    pub telefone: Option<String>,

    #[schema(example = "Corretor@123")]
    pub password: String,

    #[schema(example = "529.982.247-25")]
    pub cpf: String,

    #[validate(length(min = 3, message = "O CRECI é obrigatório."))]
    #[schema(example = "12345-F")]
    pub creci: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterImobiliariaPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "contato@imobiliaria.com.br")]
    pub email: String,

    pub telefone: Option<String>,

    pub password: String,

    #[validate(length(min = 2, message = "A razão social é obrigatória."))]
    #[schema(example = "Imobiliária Horizonte Ltda")]
    pub razao_social: String,

    #[schema(example = "Horizonte Imóveis")]
    pub nome_fantasia: Option<String>,

    #[schema(example = "11.444.777/0001-61")]
    pub cnpj: String,

    #[schema(example = "98765-J")]
    pub creci_empresa: Option<String>,

    #[validate(length(min = 2, message = "O nome do responsável é obrigatório."))]
    pub responsavel_nome: String,

    #[schema(example = "529.982.247-25")]
    pub responsavel_cpf: String,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "admin@lumiar.com.br")]
    pub email: String,

    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: String,
}

// Resposta de autenticação com o token e os dados do usuário
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// Cadastros que aguardam aprovação respondem sem token de sessão.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegistroPendenteResponse {
    pub user: User,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MensagemResponse {
    pub message: String,
}

// --- Fluxos de conta (confirmação de e-mail / recuperação de senha) ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResetPasswordPayload {
    pub token: String,
    pub password: String,
}

// --- Endpoints de disponibilidade/validação consumidos pelo frontend ---

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckEmailPayload {
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DisponibilidadeResponse {
    pub available: bool,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TipoDocumento {
    Cpf,
    Cnpj,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDocumentPayload {
    #[schema(example = "529.982.247-25")]
    pub document: String,

    #[serde(rename = "type")]
    pub tipo: TipoDocumento,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidacaoDocumentoResponse {
    pub valid: bool,
    pub message: String,
}
