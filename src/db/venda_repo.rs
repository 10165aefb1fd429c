// src/db/venda_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::venda::{Venda, VendaStatus},
};

#[derive(Clone)]
pub struct VendaRepository {
    pool: PgPool,
}

impl VendaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        cliente_id: Uuid,
        corretor_id: Uuid,
        property_id: Uuid,
        valor: Decimal,
        valor_comissao: Decimal,
        forma_pagamento: Option<&str>,
        observacoes: Option<&str>,
    ) -> Result<Venda, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let venda = sqlx::query_as::<_, Venda>(
            "INSERT INTO vendas \
                (cliente_id, corretor_id, property_id, valor, valor_comissao, forma_pagamento, observacoes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(cliente_id)
        .bind(corretor_id)
        .bind(property_id)
        .bind(valor)
        .bind(valor_comissao)
        .bind(forma_pagamento)
        .bind(observacoes)
        .fetch_one(executor)
        .await?;
        Ok(venda)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Venda>, AppError> {
        let venda = sqlx::query_as::<_, Venda>("SELECT * FROM vendas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(venda)
    }

    pub async fn list_do_corretor(&self, corretor_id: Uuid) -> Result<Vec<Venda>, AppError> {
        let vendas = sqlx::query_as::<_, Venda>(
            "SELECT * FROM vendas WHERE corretor_id = $1 ORDER BY data_proposta DESC",
        )
        .bind(corretor_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(vendas)
    }

    pub async fn list_do_cliente(&self, cliente_id: Uuid) -> Result<Vec<Venda>, AppError> {
        let vendas = sqlx::query_as::<_, Venda>(
            "SELECT * FROM vendas WHERE cliente_id = $1 ORDER BY data_proposta DESC",
        )
        .bind(cliente_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(vendas)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: VendaStatus,
        concluir: bool,
    ) -> Result<Venda, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Venda>(
            "UPDATE vendas SET status = $2, \
                data_conclusao = CASE WHEN $3 THEN NOW() ELSE data_conclusao END \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(concluir)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NaoEncontrado)
    }

    // Soma das comissões de vendas concluídas do corretor.
    pub async fn comissao_total(&self, corretor_id: Uuid) -> Result<Decimal, AppError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(valor_comissao), 0) FROM vendas \
             WHERE corretor_id = $1 AND status = 'concluida'",
        )
        .bind(corretor_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    // Valor vendido no mês corrente (para o percentual de meta).
    pub async fn valor_vendido_no_mes(&self, corretor_id: Uuid) -> Result<Decimal, AppError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(valor), 0) FROM vendas \
             WHERE corretor_id = $1 AND status = 'concluida' \
               AND date_trunc('month', data_conclusao) = date_trunc('month', NOW())",
        )
        .bind(corretor_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn contagens_do_corretor(&self, corretor_id: Uuid) -> Result<(i64, i64), AppError> {
        let (em_andamento, concluidas) = sqlx::query_as::<_, (i64, i64)>(
            "SELECT \
                COUNT(*) FILTER (WHERE status IN ('em_negociacao', 'proposta_enviada')), \
                COUNT(*) FILTER (WHERE status = 'concluida') \
             FROM vendas WHERE corretor_id = $1",
        )
        .bind(corretor_id)
        .fetch_one(&self.pool)
        .await?;
        Ok((em_andamento, concluidas))
    }

    pub async fn vendas_concluidas_mes_da_imobiliaria(
        &self,
        imobiliaria_id: Uuid,
    ) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM vendas v \
             JOIN corretor_profiles c ON c.id = v.corretor_id \
             JOIN gerentes g ON g.id = c.gerente_id \
             WHERE g.imobiliaria_id = $1 AND v.status = 'concluida' \
               AND date_trunc('month', v.data_conclusao) = date_trunc('month', NOW())",
        )
        .bind(imobiliaria_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn agregados_do_gerente(
        &self,
        gerente_id: Uuid,
    ) -> Result<(i64, Decimal), AppError> {
        let (concluidas, valor_total) = sqlx::query_as::<_, (i64, Decimal)>(
            "SELECT \
                COUNT(*) FILTER (WHERE v.status = 'concluida'), \
                COALESCE(SUM(v.valor) FILTER (WHERE v.status = 'concluida'), 0) \
             FROM vendas v \
             JOIN corretor_profiles c ON c.id = v.corretor_id \
             WHERE c.gerente_id = $1",
        )
        .bind(gerente_id)
        .fetch_one(&self.pool)
        .await?;
        Ok((concluidas, valor_total))
    }
}
