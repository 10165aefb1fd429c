// src/db/token_repo.rs
//
// Registro de uso único dos tokens de redefinição de senha. O token só é
// aceito se o jti nunca foi consumido; o consumo acontece na mesma transação
// da troca de senha.

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;

#[derive(Clone)]
pub struct TokenRepository {
    pool: PgPool,
}

impl TokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn jti_consumido(&self, jti: Uuid) -> Result<bool, AppError> {
        let consumido = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM tokens_consumidos WHERE jti = $1)",
        )
        .bind(jti)
        .fetch_one(&self.pool)
        .await?;
        Ok(consumido)
    }

    pub async fn consumir<'e, E>(
        &self,
        executor: E,
        jti: Uuid,
        user_id: Uuid,
        finalidade: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "INSERT INTO tokens_consumidos (jti, user_id, finalidade) VALUES ($1, $2, $3) \
             ON CONFLICT (jti) DO NOTHING",
        )
        .bind(jti)
        .bind(user_id)
        .bind(finalidade)
        .execute(executor)
        .await?;
        Ok(())
    }
}
