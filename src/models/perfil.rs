// src/models/perfil.rs
//
// Perfis por papel: exatamente um perfil por usuário, do papel correspondente.
// A hierarquia de posse é imobiliária -> gerentes -> corretores -> clientes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Cliente pode ser só um contato da carteira do corretor (sem login);
// user_id aponta para a conta quando ele se cadastra.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClienteProfile {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub corretor_id: Option<Uuid>,

    pub nome: String,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub cpf: Option<String>,

    // Preferências de busca
    pub tipo_imovel_interesse: Option<Vec<String>>,
    pub regioes_interesse: Option<Vec<String>>,
    pub faixa_preco_min: Option<Decimal>,
    pub faixa_preco_max: Option<Decimal>,

    pub profissao: Option<String>,
    pub renda_mensal: Option<Decimal>,

    // Preferências de contato
    pub prefere_whatsapp: bool,
    pub prefere_email: bool,
    pub prefere_ligacao: bool,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CorretorProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub gerente_id: Option<Uuid>,

    pub cpf: String,
    pub creci: String,

    pub biografia: Option<String>,
    pub especializacoes: Option<Vec<String>>,
    pub regioes_atuacao: Option<Vec<String>>,
    pub anos_experiencia: Option<i32>,

    // Percentual aplicado no momento do fechamento da venda.
    pub comissao_percentual: Decimal,
    pub meta_vendas_mes: Option<Decimal>,

    pub ativo_para_leads: bool,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImobiliariaProfile {
    pub id: Uuid,
    pub user_id: Uuid,

    pub razao_social: String,
    pub nome_fantasia: Option<String>,
    pub cnpj: String,
    pub creci_empresa: Option<String>,

    pub responsavel_nome: String,
    pub responsavel_cpf: String,

    // Plano e limites de uso
    pub plano_ativo: String,
    pub limite_corretores: i32,
    pub limite_imoveis: i32,

    pub created_at: DateTime<Utc>,
}

// Linha de listagem de equipe: perfil de corretor + dados do usuário dono.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CorretorResumo {
    pub id: Uuid,
    pub user_id: Uuid,
    pub nome: String,
    pub email: String,
    pub status: crate::models::auth::UserStatus,
    pub creci: String,
    pub comissao_percentual: Decimal,
    pub ativo_para_leads: bool,
    pub gerente_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Gerente {
    pub id: Uuid,
    pub imobiliaria_id: Uuid,
    pub user_id: Option<Uuid>,

    pub nome: String,
    pub email: String,
    pub telefone: Option<String>,
    pub creci: String,

    pub ativo: bool,
    pub created_at: DateTime<Utc>,
}
