// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        validacao::{normalizar_documento, validar_cnpj, validar_cpf, validar_senha},
    },
    db::{PerfilRepository, TokenRepository, UserRepository},
    models::auth::{
        AuthResponse, Claims, RegisterClientePayload, RegisterCorretorPayload,
        RegisterImobiliariaPayload, User, UserRole, UserStatus,
    },
    services::{
        account_token::{AccountTokenService, Finalidade},
        mailer::Mailer,
    },
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    perfil_repo: PerfilRepository,
    token_repo: TokenRepository,
    token_service: AccountTokenService,
    mailer: Mailer,
    jwt_secret: String,
    pool: PgPool,
}

pub(crate) async fn hash_senha(senha: &str) -> Result<String, AppError> {
    let senha = senha.to_owned();
    // bcrypt é caro de propósito; sai do executor async.
    let hashed = tokio::task::spawn_blocking(move || hash(&senha, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        perfil_repo: PerfilRepository,
        token_repo: TokenRepository,
        token_service: AccountTokenService,
        mailer: Mailer,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            perfil_repo,
            token_repo,
            token_service,
            mailer,
            jwt_secret,
            pool,
        }
    }

    // =========================================================================
    //  CADASTRO
    // =========================================================================

    // Cliente entra direto como Ativo e já sai logado.
    pub async fn register_cliente(
        &self,
        payload: RegisterClientePayload,
    ) -> Result<AuthResponse, AppError> {
        let validacao = validar_senha(&payload.password);
        if !validacao.valida {
            return Err(AppError::SenhaFraca(validacao.erros));
        }

        // Dígitos verificadores antes de qualquer consulta ao banco.
        let cpf = normalizar_documento(&payload.cpf);
        if !validar_cpf(&cpf) {
            return Err(AppError::CpfInvalido);
        }

        let email = payload.email.trim().to_lowercase();
        let hashed = hash_senha(&payload.password).await?;

        let mut tx = self.pool.begin().await?;

        let user = self
            .user_repo
            .create_user(
                &mut *tx,
                &email,
                &hashed,
                payload.nome.trim(),
                payload.telefone.as_deref(),
                UserRole::Cliente,
                UserStatus::Ativo,
            )
            .await?;

        self.perfil_repo
            .create_cliente(
                &mut *tx,
                Some(user.id),
                user.nome.as_str(),
                Some(user.email.as_str()),
                user.telefone.as_deref(),
                Some(&cpf),
                None,
            )
            .await?;

        tx.commit().await?;

        self.enviar_confirmacao_email(&user);

        let token = self.create_session_token(&user)?;
        Ok(AuthResponse { token, user })
    }

    // Corretor entra como Pendente e aguarda aprovação do admin.
    pub async fn register_corretor(
        &self,
        payload: RegisterCorretorPayload,
    ) -> Result<User, AppError> {
        let validacao = validar_senha(&payload.password);
        if !validacao.valida {
            return Err(AppError::SenhaFraca(validacao.erros));
        }

        let cpf = normalizar_documento(&payload.cpf);
        if !validar_cpf(&cpf) {
            return Err(AppError::CpfInvalido);
        }

        let email = payload.email.trim().to_lowercase();
        let hashed = hash_senha(&payload.password).await?;

        let mut tx = self.pool.begin().await?;

        let user = self
            .user_repo
            .create_user(
                &mut *tx,
                &email,
                &hashed,
                payload.nome.trim(),
                payload.telefone.as_deref(),
                UserRole::Corretor,
                UserStatus::Pendente,
            )
            .await?;

        // Só recebe leads depois de aprovado.
        self.perfil_repo
            .create_corretor(&mut *tx, user.id, &cpf, payload.creci.trim(), None, false)
            .await?;

        tx.commit().await?;

        self.enviar_confirmacao_email(&user);

        Ok(user)
    }

    pub async fn register_imobiliaria(
        &self,
        payload: RegisterImobiliariaPayload,
    ) -> Result<User, AppError> {
        let validacao = validar_senha(&payload.password);
        if !validacao.valida {
            return Err(AppError::SenhaFraca(validacao.erros));
        }

        let cnpj = normalizar_documento(&payload.cnpj);
        if !validar_cnpj(&cnpj) {
            return Err(AppError::CnpjInvalido);
        }

        let responsavel_cpf = normalizar_documento(&payload.responsavel_cpf);
        if !validar_cpf(&responsavel_cpf) {
            return Err(AppError::CpfInvalido);
        }

        let email = payload.email.trim().to_lowercase();
        let nome_exibicao = payload
            .nome_fantasia
            .clone()
            .unwrap_or_else(|| payload.razao_social.clone());
        let hashed = hash_senha(&payload.password).await?;

        let mut tx = self.pool.begin().await?;

        let user = self
            .user_repo
            .create_user(
                &mut *tx,
                &email,
                &hashed,
                nome_exibicao.trim(),
                payload.telefone.as_deref(),
                UserRole::Imobiliaria,
                UserStatus::Pendente,
            )
            .await?;

        self.perfil_repo
            .create_imobiliaria(
                &mut *tx,
                user.id,
                payload.razao_social.trim(),
                payload.nome_fantasia.as_deref(),
                &cnpj,
                payload.creci_empresa.as_deref(),
                payload.responsavel_nome.trim(),
                &responsavel_cpf,
            )
            .await?;

        tx.commit().await?;

        self.enviar_confirmacao_email(&user);

        Ok(user)
    }

    // Usado pelo admin e pela hierarquia: cria um usuário já aprovado.
    pub async fn criar_usuario_aprovado<'e, E>(
        &self,
        executor: E,
        email: &str,
        senha: &str,
        nome: &str,
        telefone: Option<&str>,
        role: UserRole,
    ) -> Result<User, AppError>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let validacao = validar_senha(senha);
        if !validacao.valida {
            return Err(AppError::SenhaFraca(validacao.erros));
        }

        let hashed = hash_senha(senha).await?;
        self.user_repo
            .create_user(
                executor,
                &email.trim().to_lowercase(),
                &hashed,
                nome.trim(),
                telefone,
                role,
                UserStatus::Ativo,
            )
            .await
    }

    // =========================================================================
    //  LOGIN / SESSÃO
    // =========================================================================

    pub async fn login_user(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self
            .user_repo
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or(AppError::CredenciaisInvalidas)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let senha_confere =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !senha_confere {
            return Err(AppError::CredenciaisInvalidas);
        }

        match user.status {
            UserStatus::Ativo => {}
            UserStatus::Pendente => return Err(AppError::ContaPendente),
            UserStatus::Inativo | UserStatus::Suspenso => return Err(AppError::ContaInativa),
        }

        self.user_repo.registrar_login(user.id).await?;

        let token = self.create_session_token(&user)?;
        Ok(AuthResponse { token, user })
    }

    pub async fn me(&self, user_id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NaoEncontrado)
    }

    pub fn decode_session(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }

    fn create_session_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            nome: user.nome.clone(),
            role: user.role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }

    // =========================================================================
    //  FLUXOS DE CONTA (confirmação / recuperação)
    // =========================================================================

    fn enviar_confirmacao_email(&self, user: &User) {
        match self.token_service.emitir(user.id, Finalidade::ConfirmacaoEmail) {
            Ok(token) => self.mailer.enviar_confirmacao(user, &token),
            Err(e) => tracing::warn!("Falha ao emitir token de confirmação: {}", e),
        }
    }

    // Reenvio idempotente: confirmar duas vezes não muda nada.
    pub async fn confirm_email(&self, token: &str) -> Result<(), AppError> {
        let verificado = self
            .token_service
            .verificar(token, Finalidade::ConfirmacaoEmail)?;

        let user = self
            .user_repo
            .find_by_id(verificado.user_id)
            .await?
            .ok_or(AppError::TokenConta)?;

        if !user.email_verified {
            self.user_repo
                .marcar_email_verificado(&self.pool, user.id)
                .await?;
        }

        Ok(())
    }

    // Resposta idêntica exista ou não o e-mail — sem oráculo de cadastro.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AppError> {
        let maybe_user = self
            .user_repo
            .find_by_email(&email.trim().to_lowercase())
            .await?;

        if let Some(user) = maybe_user {
            match self
                .token_service
                .emitir(user.id, Finalidade::RedefinicaoSenha)
            {
                Ok(token) => self.mailer.enviar_reset(&user, &token),
                Err(e) => tracing::warn!("Falha ao emitir token de redefinição: {}", e),
            }
        }

        Ok(())
    }

    // Uso único explícito: o jti é consumido na mesma transação da troca.
    pub async fn reset_password(&self, token: &str, nova_senha: &str) -> Result<(), AppError> {
        let verificado = self
            .token_service
            .verificar(token, Finalidade::RedefinicaoSenha)?;

        if self.token_repo.jti_consumido(verificado.jti).await? {
            return Err(AppError::TokenConta);
        }

        let validacao = validar_senha(nova_senha);
        if !validacao.valida {
            return Err(AppError::SenhaFraca(validacao.erros));
        }

        let user = self
            .user_repo
            .find_by_id(verificado.user_id)
            .await?
            .ok_or(AppError::TokenConta)?;

        let hashed = hash_senha(nova_senha).await?;

        let mut tx = self.pool.begin().await?;

        self.user_repo
            .update_password(&mut *tx, user.id, &hashed)
            .await?;
        self.token_repo
            .consumir(
                &mut *tx,
                verificado.jti,
                user.id,
                Finalidade::RedefinicaoSenha.as_str(),
            )
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
