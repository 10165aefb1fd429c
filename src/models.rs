pub mod auth;
pub mod campanha;
pub mod configuracao;
pub mod dashboard;
pub mod imovel;
pub mod lead;
pub mod perfil;
pub mod venda;
