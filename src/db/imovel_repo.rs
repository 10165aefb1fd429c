// src/db/imovel_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::imovel::{Property, PropertyStatus, PropertyTipo},
};

#[derive(Clone)]
pub struct ImovelRepository {
    pool: PgPool,
}

impl ImovelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        corretor_id: Option<Uuid>,
        nome: &str,
        tipo: PropertyTipo,
        preco: Decimal,
        localizacao: Option<&str>,
        quartos: Option<i32>,
        banheiros: Option<i32>,
        area: Option<&str>,
        descricao: Option<&str>,
        destaque: bool,
    ) -> Result<Property, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let imovel = sqlx::query_as::<_, Property>(
            "INSERT INTO properties \
                (corretor_id, nome, tipo, preco, localizacao, quartos, banheiros, area, descricao, destaque) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING *",
        )
        .bind(corretor_id)
        .bind(nome)
        .bind(tipo)
        .bind(preco)
        .bind(localizacao)
        .bind(quartos)
        .bind(banheiros)
        .bind(area)
        .bind(descricao)
        .bind(destaque)
        .fetch_one(executor)
        .await?;
        Ok(imovel)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, AppError> {
        let imovel = sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(imovel)
    }

    // Vitrine pública: somente anúncios ativos, destaque primeiro.
    pub async fn list_publicos(
        &self,
        tipo: Option<PropertyTipo>,
        status: Option<PropertyStatus>,
    ) -> Result<Vec<Property>, AppError> {
        let imoveis = sqlx::query_as::<_, Property>(
            "SELECT * FROM properties \
             WHERE ativo = TRUE \
               AND ($1::property_tipo IS NULL OR tipo = $1) \
               AND ($2::property_status IS NULL OR status = $2) \
             ORDER BY destaque DESC, created_at DESC",
        )
        .bind(tipo)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(imoveis)
    }

    pub async fn list_do_corretor(&self, corretor_id: Uuid) -> Result<Vec<Property>, AppError> {
        let imoveis = sqlx::query_as::<_, Property>(
            "SELECT * FROM properties WHERE corretor_id = $1 ORDER BY created_at DESC",
        )
        .bind(corretor_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(imoveis)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        nome: Option<&str>,
        preco: Option<Decimal>,
        localizacao: Option<&str>,
        descricao: Option<&str>,
        destaque: Option<bool>,
        ativo: Option<bool>,
    ) -> Result<Property, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Property>(
            "UPDATE properties SET \
                nome = COALESCE($2, nome), \
                preco = COALESCE($3, preco), \
                localizacao = COALESCE($4, localizacao), \
                descricao = COALESCE($5, descricao), \
                destaque = COALESCE($6, destaque), \
                ativo = COALESCE($7, ativo), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(nome)
        .bind(preco)
        .bind(localizacao)
        .bind(descricao)
        .bind(destaque)
        .bind(ativo)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NaoEncontrado)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: PropertyStatus,
    ) -> Result<Property, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Property>(
            "UPDATE properties SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NaoEncontrado)
    }

    pub async fn count_do_corretor(&self, corretor_id: Uuid) -> Result<i64, AppError> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM properties WHERE corretor_id = $1")
                .bind(corretor_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(total)
    }

    pub async fn count_da_imobiliaria(&self, imobiliaria_id: Uuid) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM properties p \
             JOIN corretor_profiles c ON c.id = p.corretor_id \
             JOIN gerentes g ON g.id = c.gerente_id \
             WHERE g.imobiliaria_id = $1",
        )
        .bind(imobiliaria_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    // Imóveis ativos dentro da faixa de preço de interesse do cliente.
    pub async fn count_compativeis(
        &self,
        preco_min: Option<Decimal>,
        preco_max: Option<Decimal>,
    ) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM properties \
             WHERE ativo = TRUE AND status = 'disponivel' \
               AND ($1::numeric IS NULL OR preco >= $1) \
               AND ($2::numeric IS NULL OR preco <= $2)",
        )
        .bind(preco_min)
        .bind(preco_max)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    // Listagem completa para exportação, com o CRECI do corretor responsável.
    pub async fn list_todos(&self) -> Result<Vec<Property>, AppError> {
        let imoveis =
            sqlx::query_as::<_, Property>("SELECT * FROM properties ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(imoveis)
    }
}
