// src/db/campanha_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::campanha::Campanha};

#[derive(Clone)]
pub struct CampanhaRepository {
    pool: PgPool,
}

impl CampanhaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        titulo: &str,
        subtitulo: Option<&str>,
        desconto: Option<&str>,
        beneficios: Option<&str>,
        condicoes: Option<&str>,
        cor_fundo: Option<&str>,
        cor_texto: Option<&str>,
        destaque: bool,
        data_inicio: Option<DateTime<Utc>>,
        data_fim: Option<DateTime<Utc>>,
    ) -> Result<Campanha, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let campanha = sqlx::query_as::<_, Campanha>(
            "INSERT INTO campanhas \
                (titulo, subtitulo, desconto, beneficios, condicoes, cor_fundo, cor_texto, \
                 destaque, data_inicio, data_fim) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(titulo)
        .bind(subtitulo)
        .bind(desconto)
        .bind(beneficios)
        .bind(condicoes)
        .bind(cor_fundo)
        .bind(cor_texto)
        .bind(destaque)
        .bind(data_inicio)
        .bind(data_fim)
        .fetch_one(executor)
        .await?;
        Ok(campanha)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Campanha>, AppError> {
        let campanha = sqlx::query_as::<_, Campanha>("SELECT * FROM campanhas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(campanha)
    }

    pub async fn list_all(&self) -> Result<Vec<Campanha>, AppError> {
        let campanhas =
            sqlx::query_as::<_, Campanha>("SELECT * FROM campanhas ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(campanhas)
    }

    // Campanhas vigentes para o site público: ativas e dentro do intervalo.
    pub async fn list_vigentes(&self) -> Result<Vec<Campanha>, AppError> {
        let campanhas = sqlx::query_as::<_, Campanha>(
            "SELECT * FROM campanhas \
             WHERE ativo = TRUE \
               AND (data_inicio IS NULL OR data_inicio <= NOW()) \
               AND (data_fim IS NULL OR data_fim >= NOW()) \
             ORDER BY destaque DESC, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(campanhas)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        titulo: Option<&str>,
        subtitulo: Option<&str>,
        desconto: Option<&str>,
        beneficios: Option<&str>,
        condicoes: Option<&str>,
        destaque: Option<bool>,
        ativo: Option<bool>,
        data_inicio: Option<DateTime<Utc>>,
        data_fim: Option<DateTime<Utc>>,
    ) -> Result<Campanha, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Campanha>(
            "UPDATE campanhas SET \
                titulo = COALESCE($2, titulo), \
                subtitulo = COALESCE($3, subtitulo), \
                desconto = COALESCE($4, desconto), \
                beneficios = COALESCE($5, beneficios), \
                condicoes = COALESCE($6, condicoes), \
                destaque = COALESCE($7, destaque), \
                ativo = COALESCE($8, ativo), \
                data_inicio = COALESCE($9, data_inicio), \
                data_fim = COALESCE($10, data_fim), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(titulo)
        .bind(subtitulo)
        .bind(desconto)
        .bind(beneficios)
        .bind(condicoes)
        .bind(destaque)
        .bind(ativo)
        .bind(data_inicio)
        .bind(data_fim)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NaoEncontrado)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM campanhas WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if resultado.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado);
        }
        Ok(())
    }
}
