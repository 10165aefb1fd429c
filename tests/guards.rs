// Testes das guardas de rota: autenticação antes de autorização, 401 para
// requisição anônima e 403 para papel insuficiente. Nenhum caso aqui toca o
// banco — o pool é preguiçoso e as guardas rejeitam antes de qualquer query.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use tower::ServiceExt;
use uuid::Uuid;

use lumiar_backend::{
    app,
    config::AppState,
    models::auth::{Claims, UserRole},
};

const SEGREDO: &str = "segredo-de-teste";

fn estado_de_teste() -> AppState {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://localhost/lumiar_teste")
        .expect("URL de teste válida");
    AppState::from_parts(pool, SEGREDO.to_string(), "http://localhost:3000".to_string())
}

fn token_para(role: UserRole) -> String {
    let agora = Utc::now();
    let claims = Claims {
        sub: Uuid::new_v4(),
        email: "teste@lumiar.com.br".to_string(),
        nome: "Usuário de Teste".to_string(),
        role,
        exp: (agora + chrono::Duration::hours(1)).timestamp() as usize,
        iat: agora.timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SEGREDO.as_ref()),
    )
    .expect("token de teste")
}

fn token_expirado(role: UserRole) -> String {
    let agora = Utc::now();
    let claims = Claims {
        sub: Uuid::new_v4(),
        email: "teste@lumiar.com.br".to_string(),
        nome: "Usuário de Teste".to_string(),
        role,
        exp: (agora - chrono::Duration::hours(2)).timestamp() as usize,
        iat: (agora - chrono::Duration::hours(3)).timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SEGREDO.as_ref()),
    )
    .expect("token de teste")
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request de teste")
}

#[tokio::test]
async fn health_responde_ok() {
    let resposta = app(estado_de_teste())
        .oneshot(get("/api/health", None))
        .await
        .unwrap();
    assert_eq!(resposta.status(), StatusCode::OK);
}

#[tokio::test]
async fn rota_protegida_sem_token_responde_401() {
    for uri in [
        "/api/admin/stats",
        "/api/corretor/dashboard",
        "/api/imobiliaria/dashboard",
        "/api/cliente/dashboard",
        "/api/auth/me",
    ] {
        let resposta = app(estado_de_teste()).oneshot(get(uri, None)).await.unwrap();
        assert_eq!(
            resposta.status(),
            StatusCode::UNAUTHORIZED,
            "{uri} deveria exigir autenticação"
        );
    }
}

#[tokio::test]
async fn token_expirado_responde_401() {
    let token = token_expirado(UserRole::Admin);
    let resposta = app(estado_de_teste())
        .oneshot(get("/api/admin/stats", Some(&token)))
        .await
        .unwrap();
    assert_eq!(resposta.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cliente_recebe_403_em_rotas_de_admin() {
    let token = token_para(UserRole::Cliente);
    for uri in [
        "/api/admin/stats",
        "/api/admin/dashboard",
        "/api/admin/usuarios",
        "/api/admin/configuracao",
        "/api/admin/export/membros",
    ] {
        let resposta = app(estado_de_teste())
            .oneshot(get(uri, Some(&token)))
            .await
            .unwrap();
        assert_eq!(
            resposta.status(),
            StatusCode::FORBIDDEN,
            "cliente não deveria acessar {uri}"
        );
    }
}

#[tokio::test]
async fn cliente_recebe_403_em_rotas_de_corretor() {
    let token = token_para(UserRole::Cliente);
    for uri in [
        "/api/corretor/dashboard",
        "/api/corretor/clientes",
        "/api/corretor/leads",
        "/api/corretor/vendas",
    ] {
        let resposta = app(estado_de_teste())
            .oneshot(get(uri, Some(&token)))
            .await
            .unwrap();
        assert_eq!(
            resposta.status(),
            StatusCode::FORBIDDEN,
            "cliente não deveria acessar {uri}"
        );
    }
}

#[tokio::test]
async fn corretor_recebe_403_no_painel_da_imobiliaria() {
    let token = token_para(UserRole::Corretor);
    let resposta = app(estado_de_teste())
        .oneshot(get("/api/imobiliaria/gerentes", Some(&token)))
        .await
        .unwrap();
    assert_eq!(resposta.status(), StatusCode::FORBIDDEN);
}
