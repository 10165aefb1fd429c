// Plataforma Lumiar — backend da vitrine pública e dos painéis por papel.

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

// Monta o router completo. As rotas públicas ficam soltas; cada painel é um
// sub-router atrás do auth_guard, e as guardas de papel/permissão são os
// extratores tipados de cada handler.
pub fn app(app_state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register/cliente", post(handlers::auth::register_cliente))
        .route("/register/corretor", post(handlers::auth::register_corretor))
        .route(
            "/register/imobiliaria",
            post(handlers::auth::register_imobiliaria),
        )
        .route("/login", post(handlers::auth::login))
        .route("/confirm-email/{token}", get(handlers::auth::confirm_email))
        .route("/forgot-password", post(handlers::auth::forgot_password))
        .route("/reset-password", post(handlers::auth::reset_password))
        .route("/check-email", post(handlers::auth::check_email))
        .route("/validate-document", post(handlers::auth::validate_document))
        .route(
            "/me",
            get(handlers::auth::get_me).layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth_guard,
            )),
        );

    let publico_routes = Router::new()
        .route("/api/imoveis", get(handlers::publico::list_imoveis))
        .route("/api/imoveis/{id}", get(handlers::publico::get_imovel))
        .route("/api/campanhas", get(handlers::publico::list_campanhas))
        .route("/api/campanhas/{id}", get(handlers::publico::get_campanha))
        .route("/api/leads", post(handlers::publico::criar_lead))
        .route("/api/stats", get(handlers::publico::stats))
        .route(
            "/api/configuracao/publica",
            get(handlers::publico::configuracao_publica),
        );

    let admin_routes = Router::new()
        .route("/dashboard", get(handlers::admin::dashboard))
        .route("/stats", get(handlers::admin::stats))
        .route(
            "/usuarios",
            get(handlers::admin::list_usuarios).post(handlers::admin::criar_usuario),
        )
        .route(
            "/usuarios/{id}",
            get(handlers::admin::get_usuario).delete(handlers::admin::excluir_usuario),
        )
        .route("/usuarios/{id}/aprovar", post(handlers::admin::aprovar_usuario))
        .route(
            "/usuarios/{id}/suspender",
            post(handlers::admin::suspender_usuario),
        )
        .route("/usuarios/{id}/ativar", post(handlers::admin::ativar_usuario))
        .route("/campanhas", post(handlers::admin::criar_campanha))
        .route(
            "/campanhas/{id}",
            put(handlers::admin::atualizar_campanha).delete(handlers::admin::excluir_campanha),
        )
        .route(
            "/imoveis/{id}/status",
            put(handlers::admin::atualizar_status_imovel),
        )
        .route(
            "/configuracao",
            get(handlers::admin::get_configuracao).put(handlers::admin::update_configuracao),
        )
        .route("/export/membros", get(handlers::admin::export_membros))
        .route("/export/imoveis", get(handlers::admin::export_imoveis))
        .route("/export/campanhas", get(handlers::admin::export_campanhas))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let imobiliaria_routes = Router::new()
        .route("/dashboard", get(handlers::imobiliaria::dashboard))
        .route(
            "/gerentes",
            get(handlers::imobiliaria::list_gerentes).post(handlers::imobiliaria::criar_gerente),
        )
        .route(
            "/gerentes/{id}",
            put(handlers::imobiliaria::atualizar_gerente)
                .delete(handlers::imobiliaria::excluir_gerente),
        )
        .route("/corretores", get(handlers::imobiliaria::list_corretores))
        .route(
            "/corretores/{id}",
            get(handlers::imobiliaria::corretor_detail),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let gerente_routes = Router::new()
        .route("/dashboard", get(handlers::gerente::dashboard))
        .route(
            "/corretores",
            get(handlers::gerente::list_corretores).post(handlers::gerente::criar_corretor),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let corretor_routes = Router::new()
        .route("/dashboard", get(handlers::corretor::dashboard))
        .route(
            "/clientes",
            get(handlers::corretor::list_clientes).post(handlers::corretor::criar_cliente),
        )
        .route(
            "/imoveis",
            get(handlers::corretor::list_imoveis).post(handlers::corretor::criar_imovel),
        )
        .route("/imoveis/{id}", put(handlers::corretor::atualizar_imovel))
        .route(
            "/imoveis/{id}/status",
            put(handlers::corretor::atualizar_status_imovel),
        )
        .route("/leads", get(handlers::corretor::list_leads))
        .route(
            "/leads/{id}/status",
            put(handlers::corretor::atualizar_status_lead),
        )
        .route(
            "/leads/{id}/reatribuir",
            put(handlers::corretor::reatribuir_lead),
        )
        .route(
            "/vendas",
            get(handlers::corretor::list_vendas).post(handlers::corretor::criar_venda),
        )
        .route(
            "/vendas/{id}/status",
            put(handlers::corretor::atualizar_status_venda),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let cliente_routes = Router::new()
        .route("/dashboard", get(handlers::cliente::dashboard))
        .route("/perfil", put(handlers::cliente::atualizar_perfil))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(publico_routes)
        .nest("/api/auth", auth_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/imobiliaria", imobiliaria_routes)
        .nest("/api/gerente", gerente_routes)
        .nest("/api/corretor", corretor_routes)
        .nest("/api/cliente", cliente_routes)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state)
}
