// src/db/lead_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        dashboard::LeadsPorStatus,
        lead::{Lead, LeadStatus},
    },
};

#[derive(Clone)]
pub struct LeadRepository {
    pool: PgPool,
}

impl LeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        nome: &str,
        email: Option<&str>,
        telefone: Option<&str>,
        mensagem: Option<&str>,
        property_id: Option<Uuid>,
        corretor_id: Option<Uuid>,
        origem: Option<&str>,
    ) -> Result<Lead, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lead = sqlx::query_as::<_, Lead>(
            "INSERT INTO leads (nome, email, telefone, mensagem, property_id, corretor_id, origem) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(nome)
        .bind(email)
        .bind(telefone)
        .bind(mensagem)
        .bind(property_id)
        .bind(corretor_id)
        .bind(origem)
        .fetch_one(executor)
        .await?;
        Ok(lead)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Lead>, AppError> {
        let lead = sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(lead)
    }

    pub async fn list_do_corretor(&self, corretor_id: Uuid) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>(
            "SELECT * FROM leads WHERE corretor_id = $1 ORDER BY created_at DESC",
        )
        .bind(corretor_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(leads)
    }

    pub async fn list_recentes_do_corretor(
        &self,
        corretor_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>(
            "SELECT * FROM leads WHERE corretor_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(corretor_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(leads)
    }

    // Leads que o próprio cliente abriu (vinculados pelo e-mail de contato).
    pub async fn list_por_email(&self, email: &str) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>(
            "SELECT * FROM leads WHERE email = $1 ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(leads)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: LeadStatus,
    ) -> Result<Lead, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Lead>(
            "UPDATE leads SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NaoEncontrado)
    }

    // Reatribuição não mexe no status — apenas troca o dono.
    pub async fn reatribuir<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        novo_corretor_id: Uuid,
    ) -> Result<Lead, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Lead>(
            "UPDATE leads SET corretor_id = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(novo_corretor_id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NaoEncontrado)
    }

    pub async fn contagem_por_status(&self, corretor_id: Uuid) -> Result<LeadsPorStatus, AppError> {
        let (novos, contactados, interessados, nao_interessados) =
            sqlx::query_as::<_, (i64, i64, i64, i64)>(
                "SELECT \
                    COUNT(*) FILTER (WHERE status = 'novo'), \
                    COUNT(*) FILTER (WHERE status = 'contactado'), \
                    COUNT(*) FILTER (WHERE status = 'interessado'), \
                    COUNT(*) FILTER (WHERE status = 'nao_interessado') \
                 FROM leads WHERE corretor_id = $1",
            )
            .bind(corretor_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(LeadsPorStatus {
            novos,
            contactados,
            interessados,
            nao_interessados,
        })
    }

    pub async fn count_da_imobiliaria(&self, imobiliaria_id: Uuid) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM leads l \
             JOIN corretor_profiles c ON c.id = l.corretor_id \
             JOIN gerentes g ON g.id = c.gerente_id \
             WHERE g.imobiliaria_id = $1",
        )
        .bind(imobiliaria_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn count_do_gerente(&self, gerente_id: Uuid) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM leads l \
             JOIN corretor_profiles c ON c.id = l.corretor_id \
             WHERE c.gerente_id = $1",
        )
        .bind(gerente_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }
}
