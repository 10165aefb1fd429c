// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{User, UserRole, UserStatus},
};

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

const COLUNAS: &str = "id, email, password_hash, nome, telefone, role, status, \
                       email_verified, phone_verified, created_at, updated_at, last_login";

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM users WHERE email = $1");
        let maybe_user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM users WHERE id = $1");
        let maybe_user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    pub async fn email_em_uso(&self, email: &str) -> Result<bool, AppError> {
        let existe = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(existe)
    }

    // Cria um novo usuário, com tratamento específico para e-mail duplicado.
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        email: &str,
        password_hash: &str,
        nome: &str,
        telefone: Option<&str>,
        role: UserRole,
        status: UserStatus,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "INSERT INTO users (email, password_hash, nome, telefone, role, status) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUNAS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .bind(password_hash)
            .bind(nome)
            .bind(telefone)
            .bind(role)
            .bind(status)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        if let Some(constraint) = db_err.constraint() {
                            return match constraint {
                                "users_email_key" => AppError::EmailJaCadastrado,
                                _ => AppError::UniqueConstraintViolation(constraint.to_string()),
                            };
                        }
                    }
                }
                e.into()
            })?;

        Ok(user)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: UserStatus,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "UPDATE users SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUNAS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(status)
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::NaoEncontrado)
    }

    pub async fn marcar_email_verificado<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE users SET email_verified = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn registrar_login(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn update_password<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn delete_user<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if resultado.rows_affected() == 0 {
            return Err(AppError::NaoEncontrado);
        }
        Ok(())
    }

    // Listagem do painel admin: busca textual + filtros de papel e status.
    pub async fn list_users(
        &self,
        busca: Option<&str>,
        role: Option<UserRole>,
        status: Option<UserStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, AppError> {
        let sql = format!(
            "SELECT {COLUNAS} FROM users \
             WHERE ($1::text IS NULL OR nome ILIKE '%' || $1 || '%' OR email ILIKE '%' || $1 || '%') \
               AND ($2::user_role IS NULL OR role = $2) \
               AND ($3::user_status IS NULL OR status = $3) \
             ORDER BY created_at DESC \
             LIMIT $4 OFFSET $5"
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(busca)
            .bind(role)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn list_recent(&self, limit: i64) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM users ORDER BY created_at DESC LIMIT $1");
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }
}
