// src/models/configuracao.rs
//
// Configuração global do site: linha única, lida por todas as páginas
// públicas e alterada apenas pelo admin. A atualização usa compare-and-swap
// sobre o campo `version` em vez de sobrescrever o documento inteiro.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Configuracao {
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub id: i16,

    pub version: i32,

    pub email_principal: String,
    pub email_vendas: String,
    pub email_rh: String,
    pub email_suporte: String,

    pub smtp_server: String,
    pub smtp_port: i32,
    pub smtp_user: String,

    pub facebook_url: String,
    pub instagram_url: String,
    pub linkedin_url: String,
    pub youtube_url: String,

    pub whatsapp_vendas: String,
    pub whatsapp_gerente: String,
    pub mensagem_vendas: String,
    pub mensagem_contato: String,

    pub company_name: String,
    pub company_cnpj: String,
    pub company_phone: String,
    pub company_address: String,
    pub business_hours: String,

    pub primary_color: String,
    pub secondary_color: String,

    pub updated_at: DateTime<Utc>,
}

// Subconjunto exposto nas páginas públicas (sem SMTP nem e-mails internos).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfiguracaoPublica {
    pub company_name: String,
    pub company_phone: String,
    pub company_address: String,
    pub business_hours: String,
    pub whatsapp_vendas: String,
    pub whatsapp_gerente: String,
    pub mensagem_vendas: String,
    pub mensagem_contato: String,
    pub facebook_url: String,
    pub instagram_url: String,
    pub linkedin_url: String,
    pub youtube_url: String,
    pub primary_color: String,
    pub secondary_color: String,
}

impl From<Configuracao> for ConfiguracaoPublica {
    fn from(c: Configuracao) -> Self {
        Self {
            company_name: c.company_name,
            company_phone: c.company_phone,
            company_address: c.company_address,
            business_hours: c.business_hours,
            whatsapp_vendas: c.whatsapp_vendas,
            whatsapp_gerente: c.whatsapp_gerente,
            mensagem_vendas: c.mensagem_vendas,
            mensagem_contato: c.mensagem_contato,
            facebook_url: c.facebook_url,
            instagram_url: c.instagram_url,
            linkedin_url: c.linkedin_url,
            youtube_url: c.youtube_url,
            primary_color: c.primary_color,
            secondary_color: c.secondary_color,
        }
    }
}

// Payload de atualização: campos ausentes preservam o valor atual;
// `expected_version` é obrigatório e protege contra sobrescrita concorrente.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfiguracaoPayload {
    pub expected_version: i32,

    pub email_principal: Option<String>,
    pub email_vendas: Option<String>,
    pub email_rh: Option<String>,
    pub email_suporte: Option<String>,

    pub smtp_server: Option<String>,
    pub smtp_port: Option<i32>,
    pub smtp_user: Option<String>,

    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub youtube_url: Option<String>,

    pub whatsapp_vendas: Option<String>,
    pub whatsapp_gerente: Option<String>,
    pub mensagem_vendas: Option<String>,
    pub mensagem_contato: Option<String>,

    pub company_name: Option<String>,
    pub company_cnpj: Option<String>,
    pub company_phone: Option<String>,
    pub company_address: Option<String>,
    pub business_hours: Option<String>,

    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
}
