pub mod account_token;
pub mod auth;
pub mod export_service;
pub mod hierarquia_service;
pub mod lead_service;
pub mod mailer;
pub mod venda_service;
