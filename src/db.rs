pub mod user_repo;
pub use user_repo::UserRepository;
pub mod perfil_repo;
pub use perfil_repo::PerfilRepository;
pub mod imovel_repo;
pub use imovel_repo::ImovelRepository;
pub mod lead_repo;
pub use lead_repo::LeadRepository;
pub mod venda_repo;
pub use venda_repo::VendaRepository;
pub mod campanha_repo;
pub use campanha_repo::CampanhaRepository;
pub mod configuracao_repo;
pub use configuracao_repo::ConfiguracaoRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod token_repo;
pub use token_repo::TokenRepository;
