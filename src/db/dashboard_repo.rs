// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::dashboard::{AdminStats, PublicStats, TopCorretorEntry},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Resumo geral do painel admin. Uma transação para um snapshot consistente.
    pub async fn admin_stats<'e, E>(&self, executor: E) -> Result<AdminStats, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let (total_usuarios, clientes, corretores, imobiliarias, gerentes, ativos, pendentes) =
            sqlx::query_as::<_, (i64, i64, i64, i64, i64, i64, i64)>(
                "SELECT \
                    COUNT(*), \
                    COUNT(*) FILTER (WHERE role = 'cliente'), \
                    COUNT(*) FILTER (WHERE role = 'corretor'), \
                    COUNT(*) FILTER (WHERE role = 'imobiliaria'), \
                    COUNT(*) FILTER (WHERE role = 'gerente'), \
                    COUNT(*) FILTER (WHERE status = 'ativo'), \
                    COUNT(*) FILTER (WHERE status = 'pendente') \
                 FROM users",
            )
            .fetch_one(&mut *tx)
            .await?;

        let total_imoveis = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM properties")
            .fetch_one(&mut *tx)
            .await?;

        let total_leads = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM leads")
            .fetch_one(&mut *tx)
            .await?;

        let (total_vendas, concluidas, em_andamento, valor_total, comissoes) =
            sqlx::query_as::<_, (i64, i64, i64, Decimal, Decimal)>(
                "SELECT \
                    COUNT(*), \
                    COUNT(*) FILTER (WHERE status = 'concluida'), \
                    COUNT(*) FILTER (WHERE status IN ('em_negociacao', 'proposta_enviada')), \
                    COALESCE(SUM(valor) FILTER (WHERE status = 'concluida'), 0), \
                    COALESCE(SUM(valor_comissao) FILTER (WHERE status = 'concluida'), 0) \
                 FROM vendas",
            )
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(AdminStats {
            total_usuarios,
            clientes,
            corretores,
            imobiliarias,
            gerentes,
            usuarios_ativos: ativos,
            usuarios_pendentes: pendentes,
            total_imoveis,
            total_leads,
            total_vendas,
            vendas_concluidas: concluidas,
            vendas_em_andamento: em_andamento,
            valor_total_vendas: valor_total,
            valor_total_comissoes: comissoes,
        })
    }

    // Contadores exibidos na página pública.
    pub async fn public_stats(&self) -> Result<PublicStats, AppError> {
        let (imoveis, corretores, campanhas, vendas) = sqlx::query_as::<_, (i64, i64, i64, i64)>(
            "SELECT \
                (SELECT COUNT(*) FROM properties WHERE ativo AND status = 'disponivel'), \
                (SELECT COUNT(*) FROM users WHERE role = 'corretor' AND status = 'ativo'), \
                (SELECT COUNT(*) FROM campanhas WHERE ativo \
                    AND (data_inicio IS NULL OR data_inicio <= NOW()) \
                    AND (data_fim IS NULL OR data_fim >= NOW())), \
                (SELECT COUNT(*) FROM vendas WHERE status = 'concluida')",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(PublicStats {
            imoveis_disponiveis: imoveis,
            corretores_ativos: corretores,
            campanhas_vigentes: campanhas,
            vendas_concluidas: vendas,
        })
    }

    // Top corretores da imobiliária por vendas concluídas.
    pub async fn top_corretores_da_imobiliaria(
        &self,
        imobiliaria_id: Uuid,
        limit: i64,
    ) -> Result<Vec<TopCorretorEntry>, AppError> {
        let top = sqlx::query_as::<_, TopCorretorEntry>(
            "SELECT c.id AS corretor_id, u.nome, c.creci, \
                    COUNT(v.id) FILTER (WHERE v.status = 'concluida') AS vendas_concluidas, \
                    COALESCE(SUM(v.valor) FILTER (WHERE v.status = 'concluida'), 0) AS valor_vendido \
             FROM corretor_profiles c \
             JOIN users u ON u.id = c.user_id \
             JOIN gerentes g ON g.id = c.gerente_id \
             LEFT JOIN vendas v ON v.corretor_id = c.id \
             WHERE g.imobiliaria_id = $1 \
             GROUP BY c.id, u.nome, c.creci \
             ORDER BY valor_vendido DESC \
             LIMIT $2",
        )
        .bind(imobiliaria_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(top)
    }

    // Contagens de gerentes e corretores da imobiliária (total / ativos).
    pub async fn contagens_da_imobiliaria(
        &self,
        imobiliaria_id: Uuid,
    ) -> Result<(i64, i64, i64, i64), AppError> {
        let contagens = sqlx::query_as::<_, (i64, i64, i64, i64)>(
            "SELECT \
                (SELECT COUNT(*) FROM gerentes WHERE imobiliaria_id = $1), \
                (SELECT COUNT(*) FROM gerentes WHERE imobiliaria_id = $1 AND ativo), \
                (SELECT COUNT(*) FROM corretor_profiles c \
                    JOIN gerentes g ON g.id = c.gerente_id \
                    WHERE g.imobiliaria_id = $1), \
                (SELECT COUNT(*) FROM corretor_profiles c \
                    JOIN gerentes g ON g.id = c.gerente_id \
                    JOIN users u ON u.id = c.user_id \
                    WHERE g.imobiliaria_id = $1 AND u.status = 'ativo')",
        )
        .bind(imobiliaria_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(contagens)
    }

    pub async fn contagens_do_gerente(
        &self,
        gerente_id: Uuid,
    ) -> Result<(i64, i64, i64), AppError> {
        let contagens = sqlx::query_as::<_, (i64, i64, i64)>(
            "SELECT \
                (SELECT COUNT(*) FROM corretor_profiles WHERE gerente_id = $1), \
                (SELECT COUNT(*) FROM corretor_profiles c \
                    JOIN users u ON u.id = c.user_id \
                    WHERE c.gerente_id = $1 AND u.status = 'ativo'), \
                (SELECT COUNT(*) FROM cliente_profiles cl \
                    JOIN corretor_profiles c ON c.id = cl.corretor_id \
                    WHERE c.gerente_id = $1)",
        )
        .bind(gerente_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(contagens)
    }
}
