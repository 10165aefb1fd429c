// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register_cliente,
        handlers::auth::register_corretor,
        handlers::auth::register_imobiliaria,
        handlers::auth::login,
        handlers::auth::get_me,
        handlers::auth::confirm_email,
        handlers::auth::forgot_password,
        handlers::auth::reset_password,
        handlers::auth::check_email,
        handlers::auth::validate_document,

        // --- Público ---
        handlers::publico::list_imoveis,
        handlers::publico::get_imovel,
        handlers::publico::list_campanhas,
        handlers::publico::get_campanha,
        handlers::publico::criar_lead,
        handlers::publico::stats,
        handlers::publico::configuracao_publica,

        // --- Admin ---
        handlers::admin::dashboard,
        handlers::admin::stats,
        handlers::admin::list_usuarios,
        handlers::admin::criar_usuario,
        handlers::admin::get_usuario,
        handlers::admin::aprovar_usuario,
        handlers::admin::suspender_usuario,
        handlers::admin::ativar_usuario,
        handlers::admin::excluir_usuario,
        handlers::admin::criar_campanha,
        handlers::admin::atualizar_campanha,
        handlers::admin::excluir_campanha,
        handlers::admin::atualizar_status_imovel,
        handlers::admin::get_configuracao,
        handlers::admin::update_configuracao,
        handlers::admin::export_membros,
        handlers::admin::export_imoveis,
        handlers::admin::export_campanhas,

        // --- Imobiliária ---
        handlers::imobiliaria::dashboard,
        handlers::imobiliaria::list_gerentes,
        handlers::imobiliaria::criar_gerente,
        handlers::imobiliaria::atualizar_gerente,
        handlers::imobiliaria::excluir_gerente,
        handlers::imobiliaria::list_corretores,
        handlers::imobiliaria::corretor_detail,

        // --- Gerente ---
        handlers::gerente::dashboard,
        handlers::gerente::list_corretores,
        handlers::gerente::criar_corretor,

        // --- Corretor ---
        handlers::corretor::dashboard,
        handlers::corretor::list_clientes,
        handlers::corretor::criar_cliente,
        handlers::corretor::list_imoveis,
        handlers::corretor::criar_imovel,
        handlers::corretor::atualizar_imovel,
        handlers::corretor::atualizar_status_imovel,
        handlers::corretor::list_leads,
        handlers::corretor::atualizar_status_lead,
        handlers::corretor::reatribuir_lead,
        handlers::corretor::list_vendas,
        handlers::corretor::criar_venda,
        handlers::corretor::atualizar_status_venda,

        // --- Cliente ---
        handlers::cliente::dashboard,
        handlers::cliente::atualizar_perfil,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::UserStatus,
            models::auth::User,
            models::auth::RegisterClientePayload,
            models::auth::RegisterCorretorPayload,
            models::auth::RegisterImobiliariaPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::RegistroPendenteResponse,
            models::auth::MensagemResponse,
            models::auth::ForgotPasswordPayload,
            models::auth::ResetPasswordPayload,
            models::auth::CheckEmailPayload,
            models::auth::DisponibilidadeResponse,
            models::auth::TipoDocumento,
            models::auth::ValidateDocumentPayload,
            models::auth::ValidacaoDocumentoResponse,

            // --- Perfis ---
            models::perfil::ClienteProfile,
            models::perfil::CorretorProfile,
            models::perfil::CorretorResumo,
            models::perfil::ImobiliariaProfile,
            models::perfil::Gerente,

            // --- Imóveis ---
            models::imovel::PropertyTipo,
            models::imovel::PropertyStatus,
            models::imovel::Property,

            // --- Leads e Vendas ---
            models::lead::LeadStatus,
            models::lead::Lead,
            models::venda::VendaStatus,
            models::venda::Venda,

            // --- Campanhas e Configuração ---
            models::campanha::Campanha,
            models::configuracao::Configuracao,
            models::configuracao::ConfiguracaoPublica,
            models::configuracao::UpdateConfiguracaoPayload,

            // --- Dashboards ---
            models::dashboard::AdminStats,
            models::dashboard::PublicStats,
            models::dashboard::TopCorretorEntry,
            models::dashboard::ImobiliariaDashboard,
            models::dashboard::GerenteDashboard,
            models::dashboard::LeadsPorStatus,
            models::dashboard::CorretorDashboard,
            models::dashboard::ClienteDashboard,

            // --- Payloads dos handlers ---
            handlers::publico::CriarLeadPayload,
            handlers::admin::AdminDashboardResponse,
            handlers::admin::AdminCriarUsuarioPayload,
            handlers::admin::CriarCampanhaPayload,
            handlers::admin::AtualizarCampanhaPayload,
            handlers::admin::AtualizarStatusImovelPayload,
            handlers::imobiliaria::CriarGerentePayload,
            handlers::imobiliaria::AtualizarGerentePayload,
            handlers::imobiliaria::CorretorDetailResponse,
            handlers::gerente::CriarCorretorPayload,
            handlers::corretor::CriarClientePayload,
            handlers::corretor::CriarImovelPayload,
            handlers::corretor::AtualizarImovelPayload,
            handlers::corretor::AtualizarStatusLeadPayload,
            handlers::corretor::ReatribuirLeadPayload,
            handlers::corretor::CriarVendaPayload,
            handlers::corretor::AtualizarStatusVendaPayload,
            handlers::cliente::AtualizarPerfilPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação, cadastro e fluxos de conta"),
        (name = "Público", description = "Vitrine de imóveis, campanhas e leads"),
        (name = "Admin", description = "Gestão de usuários, campanhas e configuração"),
        (name = "Imobiliária", description = "Equipe de gerentes e corretores"),
        (name = "Gerente", description = "Equipe de corretores do gerente"),
        (name = "Corretor", description = "Carteira, anúncios, leads e vendas"),
        (name = "Cliente", description = "Painel do cliente")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
