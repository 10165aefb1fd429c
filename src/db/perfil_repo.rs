// src/db/perfil_repo.rs
//
// Perfis por papel e a hierarquia de posse completa:
// imobiliária -> gerentes -> corretores -> clientes.

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::perfil::{
        ClienteProfile, CorretorProfile, CorretorResumo, Gerente, ImobiliariaProfile,
    },
};

#[derive(Clone)]
pub struct PerfilRepository {
    pool: PgPool,
}

fn mapear_unicidade(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    "cliente_profiles_cpf_key" | "corretor_profiles_cpf_key"
                    | "imobiliaria_profiles_cnpj_key" => AppError::DocumentoJaCadastrado,
                    "corretor_profiles_creci_key" => AppError::CreciJaCadastrado,
                    _ => AppError::UniqueConstraintViolation(constraint.to_string()),
                };
            }
        }
    }
    e.into()
}

impl PerfilRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CLIENTES
    // =========================================================================

    pub async fn create_cliente<'e, E>(
        &self,
        executor: E,
        user_id: Option<Uuid>,
        nome: &str,
        email: Option<&str>,
        telefone: Option<&str>,
        cpf: Option<&str>,
        corretor_id: Option<Uuid>,
    ) -> Result<ClienteProfile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, ClienteProfile>(
            "INSERT INTO cliente_profiles (user_id, nome, email, telefone, cpf, corretor_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(user_id)
        .bind(nome)
        .bind(email)
        .bind(telefone)
        .bind(cpf)
        .bind(corretor_id)
        .fetch_one(executor)
        .await
        .map_err(mapear_unicidade)
    }

    pub async fn find_cliente_by_user(&self, user_id: Uuid) -> Result<Option<ClienteProfile>, AppError> {
        let perfil = sqlx::query_as::<_, ClienteProfile>(
            "SELECT * FROM cliente_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(perfil)
    }

    pub async fn find_cliente_by_id(&self, id: Uuid) -> Result<Option<ClienteProfile>, AppError> {
        let perfil =
            sqlx::query_as::<_, ClienteProfile>("SELECT * FROM cliente_profiles WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(perfil)
    }

    pub async fn list_clientes_do_corretor(
        &self,
        corretor_id: Uuid,
    ) -> Result<Vec<ClienteProfile>, AppError> {
        let clientes = sqlx::query_as::<_, ClienteProfile>(
            "SELECT * FROM cliente_profiles WHERE corretor_id = $1 ORDER BY created_at DESC",
        )
        .bind(corretor_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(clientes)
    }

    pub async fn update_cliente_preferencias<'e, E>(
        &self,
        executor: E,
        cliente_id: Uuid,
        tipo_imovel_interesse: Option<Vec<String>>,
        regioes_interesse: Option<Vec<String>>,
        faixa_preco_min: Option<Decimal>,
        faixa_preco_max: Option<Decimal>,
        profissao: Option<String>,
    ) -> Result<ClienteProfile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, ClienteProfile>(
            "UPDATE cliente_profiles SET \
                tipo_imovel_interesse = COALESCE($2, tipo_imovel_interesse), \
                regioes_interesse = COALESCE($3, regioes_interesse), \
                faixa_preco_min = COALESCE($4, faixa_preco_min), \
                faixa_preco_max = COALESCE($5, faixa_preco_max), \
                profissao = COALESCE($6, profissao) \
             WHERE id = $1 RETURNING *",
        )
        .bind(cliente_id)
        .bind(tipo_imovel_interesse)
        .bind(regioes_interesse)
        .bind(faixa_preco_min)
        .bind(faixa_preco_max)
        .bind(profissao)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NaoEncontrado)
    }

    // =========================================================================
    //  CORRETORES
    // =========================================================================

    pub async fn create_corretor<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        cpf: &str,
        creci: &str,
        gerente_id: Option<Uuid>,
        ativo_para_leads: bool,
    ) -> Result<CorretorProfile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, CorretorProfile>(
            "INSERT INTO corretor_profiles (user_id, cpf, creci, gerente_id, ativo_para_leads) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(user_id)
        .bind(cpf)
        .bind(creci)
        .bind(gerente_id)
        .bind(ativo_para_leads)
        .fetch_one(executor)
        .await
        .map_err(mapear_unicidade)
    }

    pub async fn find_corretor_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<CorretorProfile>, AppError> {
        let perfil = sqlx::query_as::<_, CorretorProfile>(
            "SELECT * FROM corretor_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(perfil)
    }

    pub async fn find_corretor_by_id(&self, id: Uuid) -> Result<Option<CorretorProfile>, AppError> {
        let perfil =
            sqlx::query_as::<_, CorretorProfile>("SELECT * FROM corretor_profiles WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(perfil)
    }

    pub async fn ativar_corretor_para_leads<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        ativo: bool,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE corretor_profiles SET ativo_para_leads = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(ativo)
            .execute(executor)
            .await?;
        Ok(())
    }

    // Resumo com dados do usuário, para as listagens de equipe.
    pub async fn list_corretores_do_gerente(
        &self,
        gerente_id: Uuid,
    ) -> Result<Vec<CorretorResumo>, AppError> {
        let corretores = sqlx::query_as::<_, CorretorResumo>(
            "SELECT c.id, c.user_id, u.nome, u.email, u.status, c.creci, \
                    c.comissao_percentual, c.ativo_para_leads, c.gerente_id \
             FROM corretor_profiles c \
             JOIN users u ON u.id = c.user_id \
             WHERE c.gerente_id = $1 \
             ORDER BY u.nome ASC",
        )
        .bind(gerente_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(corretores)
    }

    pub async fn list_corretores_da_imobiliaria(
        &self,
        imobiliaria_id: Uuid,
    ) -> Result<Vec<CorretorResumo>, AppError> {
        let corretores = sqlx::query_as::<_, CorretorResumo>(
            "SELECT c.id, c.user_id, u.nome, u.email, u.status, c.creci, \
                    c.comissao_percentual, c.ativo_para_leads, c.gerente_id \
             FROM corretor_profiles c \
             JOIN users u ON u.id = c.user_id \
             JOIN gerentes g ON g.id = c.gerente_id \
             WHERE g.imobiliaria_id = $1 \
             ORDER BY u.nome ASC",
        )
        .bind(imobiliaria_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(corretores)
    }

    pub async fn count_corretores_da_imobiliaria(
        &self,
        imobiliaria_id: Uuid,
    ) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM corretor_profiles c \
             JOIN gerentes g ON g.id = c.gerente_id \
             WHERE g.imobiliaria_id = $1",
        )
        .bind(imobiliaria_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    // Corretor ativo para receber leads reatribuídos.
    pub async fn corretor_aceita_leads(&self, corretor_id: Uuid) -> Result<bool, AppError> {
        let aceita = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS ( \
                SELECT 1 FROM corretor_profiles c \
                JOIN users u ON u.id = c.user_id \
                WHERE c.id = $1 AND c.ativo_para_leads AND u.status = 'ativo' \
             )",
        )
        .bind(corretor_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(aceita)
    }

    // =========================================================================
    //  IMOBILIÁRIAS
    // =========================================================================

    pub async fn create_imobiliaria<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        razao_social: &str,
        nome_fantasia: Option<&str>,
        cnpj: &str,
        creci_empresa: Option<&str>,
        responsavel_nome: &str,
        responsavel_cpf: &str,
    ) -> Result<ImobiliariaProfile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, ImobiliariaProfile>(
            "INSERT INTO imobiliaria_profiles \
                (user_id, razao_social, nome_fantasia, cnpj, creci_empresa, \
                 responsavel_nome, responsavel_cpf) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(user_id)
        .bind(razao_social)
        .bind(nome_fantasia)
        .bind(cnpj)
        .bind(creci_empresa)
        .bind(responsavel_nome)
        .bind(responsavel_cpf)
        .fetch_one(executor)
        .await
        .map_err(mapear_unicidade)
    }

    pub async fn find_imobiliaria_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ImobiliariaProfile>, AppError> {
        let perfil = sqlx::query_as::<_, ImobiliariaProfile>(
            "SELECT * FROM imobiliaria_profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(perfil)
    }

    pub async fn find_imobiliaria_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ImobiliariaProfile>, AppError> {
        let perfil = sqlx::query_as::<_, ImobiliariaProfile>(
            "SELECT * FROM imobiliaria_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(perfil)
    }

    // =========================================================================
    //  GERENTES
    // =========================================================================

    pub async fn create_gerente<'e, E>(
        &self,
        executor: E,
        imobiliaria_id: Uuid,
        user_id: Option<Uuid>,
        nome: &str,
        email: &str,
        telefone: Option<&str>,
        creci: &str,
    ) -> Result<Gerente, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let gerente = sqlx::query_as::<_, Gerente>(
            "INSERT INTO gerentes (imobiliaria_id, user_id, nome, email, telefone, creci) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(imobiliaria_id)
        .bind(user_id)
        .bind(nome)
        .bind(email)
        .bind(telefone)
        .bind(creci)
        .fetch_one(executor)
        .await?;
        Ok(gerente)
    }

    pub async fn find_gerente_by_id(&self, id: Uuid) -> Result<Option<Gerente>, AppError> {
        let gerente = sqlx::query_as::<_, Gerente>("SELECT * FROM gerentes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(gerente)
    }

    pub async fn find_gerente_by_user(&self, user_id: Uuid) -> Result<Option<Gerente>, AppError> {
        let gerente = sqlx::query_as::<_, Gerente>("SELECT * FROM gerentes WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(gerente)
    }

    pub async fn list_gerentes(&self, imobiliaria_id: Uuid) -> Result<Vec<Gerente>, AppError> {
        let gerentes = sqlx::query_as::<_, Gerente>(
            "SELECT * FROM gerentes WHERE imobiliaria_id = $1 ORDER BY nome ASC",
        )
        .bind(imobiliaria_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(gerentes)
    }

    pub async fn update_gerente<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        nome: Option<&str>,
        telefone: Option<&str>,
        ativo: Option<bool>,
    ) -> Result<Gerente, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Gerente>(
            "UPDATE gerentes SET \
                nome = COALESCE($2, nome), \
                telefone = COALESCE($3, telefone), \
                ativo = COALESCE($4, ativo) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(nome)
        .bind(telefone)
        .bind(ativo)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NaoEncontrado)
    }

    pub async fn delete_gerente<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM gerentes WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if resultado.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado);
        }
        Ok(())
    }

    // =========================================================================
    //  CASCATA DE EXCLUSÃO
    // =========================================================================

    // Usuários vinculados à equipe de uma imobiliária (gerentes + corretores).
    // A exclusão da imobiliária apaga esses usuários na mesma transação; o FK
    // dos perfis cuida do resto.
    pub async fn user_ids_da_equipe<'e, E>(
        &self,
        executor: E,
        imobiliaria_id: Uuid,
    ) -> Result<Vec<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT u.id FROM users u \
             WHERE u.id IN ( \
                SELECT g.user_id FROM gerentes g \
                WHERE g.imobiliaria_id = $1 AND g.user_id IS NOT NULL \
                UNION \
                SELECT c.user_id FROM corretor_profiles c \
                JOIN gerentes g ON g.id = c.gerente_id \
                WHERE g.imobiliaria_id = $1 \
             )",
        )
        .bind(imobiliaria_id)
        .fetch_all(executor)
        .await?;
        Ok(ids)
    }

    pub async fn user_ids_dos_corretores_do_gerente<'e, E>(
        &self,
        executor: E,
        gerente_id: Uuid,
    ) -> Result<Vec<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT user_id FROM corretor_profiles WHERE gerente_id = $1",
        )
        .bind(gerente_id)
        .fetch_all(executor)
        .await?;
        Ok(ids)
    }

    // =========================================================================
    //  DISPONIBILIDADE DE DOCUMENTOS
    // =========================================================================

    pub async fn cpf_em_uso(&self, cpf: &str) -> Result<bool, AppError> {
        let existe = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM cliente_profiles WHERE cpf = $1) \
                 OR EXISTS (SELECT 1 FROM corretor_profiles WHERE cpf = $1)",
        )
        .bind(cpf)
        .fetch_one(&self.pool)
        .await?;
        Ok(existe)
    }

    pub async fn cnpj_em_uso(&self, cnpj: &str) -> Result<bool, AppError> {
        let existe = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM imobiliaria_profiles WHERE cnpj = $1)",
        )
        .bind(cnpj)
        .fetch_one(&self.pool)
        .await?;
        Ok(existe)
    }

}
