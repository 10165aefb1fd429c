// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        CampanhaRepository, ConfiguracaoRepository, DashboardRepository, ImovelRepository,
        LeadRepository, PerfilRepository, TokenRepository, UserRepository, VendaRepository,
    },
    services::{
        account_token::AccountTokenService, auth::AuthService,
        hierarquia_service::HierarquiaService, lead_service::LeadService, mailer::Mailer,
        venda_service::VendaService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,

    pub user_repo: UserRepository,
    pub perfil_repo: PerfilRepository,
    pub imovel_repo: ImovelRepository,
    pub lead_repo: LeadRepository,
    pub venda_repo: VendaRepository,
    pub campanha_repo: CampanhaRepository,
    pub configuracao_repo: ConfiguracaoRepository,
    pub dashboard_repo: DashboardRepository,

    pub auth_service: AuthService,
    pub venda_service: VendaService,
    pub lead_service: LeadService,
    pub hierarquia_service: HierarquiaService,
}

impl AppState {
    // Carrega as configurações do ambiente e conecta ao banco.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL deve ser definida"))?;
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET deve ser definido"))?;
        let base_url =
            env::var("APP_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_parts(db_pool, jwt_secret, base_url))
    }

    // Montagem a partir de peças prontas (reusada pelos testes de rota).
    pub fn from_parts(db_pool: PgPool, jwt_secret: String, base_url: String) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let perfil_repo = PerfilRepository::new(db_pool.clone());
        let imovel_repo = ImovelRepository::new(db_pool.clone());
        let lead_repo = LeadRepository::new(db_pool.clone());
        let venda_repo = VendaRepository::new(db_pool.clone());
        let campanha_repo = CampanhaRepository::new(db_pool.clone());
        let configuracao_repo = ConfiguracaoRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());
        let token_repo = TokenRepository::new(db_pool.clone());

        let token_service = AccountTokenService::new(jwt_secret.clone());
        let mailer = Mailer::new(base_url);

        let auth_service = AuthService::new(
            user_repo.clone(),
            perfil_repo.clone(),
            token_repo,
            token_service,
            mailer,
            jwt_secret,
            db_pool.clone(),
        );
        let venda_service = VendaService::new(
            venda_repo.clone(),
            imovel_repo.clone(),
            perfil_repo.clone(),
            db_pool.clone(),
        );
        let lead_service = LeadService::new(
            lead_repo.clone(),
            imovel_repo.clone(),
            perfil_repo.clone(),
            db_pool.clone(),
        );
        let hierarquia_service =
            HierarquiaService::new(user_repo.clone(), perfil_repo.clone(), db_pool.clone());

        Self {
            db_pool,
            user_repo,
            perfil_repo,
            imovel_repo,
            lead_repo,
            venda_repo,
            campanha_repo,
            configuracao_repo,
            dashboard_repo,
            auth_service,
            venda_service,
            lead_service,
            hierarquia_service,
        }
    }
}
