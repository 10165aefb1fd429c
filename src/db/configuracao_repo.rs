// src/db/configuracao_repo.rs
//
// Linha única de configuração. A atualização é um compare-and-swap sobre o
// campo `version`: se outro admin salvou antes, a query não afeta linha
// nenhuma e devolvemos conflito em vez de sobrescrever em silêncio.

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::configuracao::{Configuracao, UpdateConfiguracaoPayload},
};

#[derive(Clone)]
pub struct ConfiguracaoRepository {
    pool: PgPool,
}

impl ConfiguracaoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self) -> Result<Configuracao, AppError> {
        let config =
            sqlx::query_as::<_, Configuracao>("SELECT * FROM configuracoes WHERE id = 1")
                .fetch_one(&self.pool)
                .await?;
        Ok(config)
    }

    pub async fn update_cas<'e, E>(
        &self,
        executor: E,
        input: UpdateConfiguracaoPayload,
    ) -> Result<Configuracao, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let atualizada = sqlx::query_as::<_, Configuracao>(
            "UPDATE configuracoes SET \
                version = version + 1, \
                email_principal = COALESCE($2, email_principal), \
                email_vendas = COALESCE($3, email_vendas), \
                email_rh = COALESCE($4, email_rh), \
                email_suporte = COALESCE($5, email_suporte), \
                smtp_server = COALESCE($6, smtp_server), \
                smtp_port = COALESCE($7, smtp_port), \
                smtp_user = COALESCE($8, smtp_user), \
                facebook_url = COALESCE($9, facebook_url), \
                instagram_url = COALESCE($10, instagram_url), \
                linkedin_url = COALESCE($11, linkedin_url), \
                youtube_url = COALESCE($12, youtube_url), \
                whatsapp_vendas = COALESCE($13, whatsapp_vendas), \
                whatsapp_gerente = COALESCE($14, whatsapp_gerente), \
                mensagem_vendas = COALESCE($15, mensagem_vendas), \
                mensagem_contato = COALESCE($16, mensagem_contato), \
                company_name = COALESCE($17, company_name), \
                company_cnpj = COALESCE($18, company_cnpj), \
                company_phone = COALESCE($19, company_phone), \
                company_address = COALESCE($20, company_address), \
                business_hours = COALESCE($21, business_hours), \
                primary_color = COALESCE($22, primary_color), \
                secondary_color = COALESCE($23, secondary_color), \
                updated_at = NOW() \
             WHERE id = 1 AND version = $1 \
             RETURNING *",
        )
        .bind(input.expected_version)
        .bind(input.email_principal)
        .bind(input.email_vendas)
        .bind(input.email_rh)
        .bind(input.email_suporte)
        .bind(input.smtp_server)
        .bind(input.smtp_port)
        .bind(input.smtp_user)
        .bind(input.facebook_url)
        .bind(input.instagram_url)
        .bind(input.linkedin_url)
        .bind(input.youtube_url)
        .bind(input.whatsapp_vendas)
        .bind(input.whatsapp_gerente)
        .bind(input.mensagem_vendas)
        .bind(input.mensagem_contato)
        .bind(input.company_name)
        .bind(input.company_cnpj)
        .bind(input.company_phone)
        .bind(input.company_address)
        .bind(input.business_hours)
        .bind(input.primary_color)
        .bind(input.secondary_color)
        .fetch_optional(executor)
        .await?;

        atualizada.ok_or(AppError::ConflitoVersaoConfiguracao)
    }
}
