// src/middleware/rbac.rs
//
// Autorização: cada papel carrega um conjunto fixo de permissões;
// "full_access" é curinga e satisfaz qualquer verificação. As guardas são
// extratores tipados — a autenticação é sempre verificada antes da
// autorização, então requisição sem principal responde 401, nunca 403.

use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::AppError,
    middleware::auth::AuthUser,
    models::auth::UserRole,
};

pub const FULL_ACCESS: &str = "full_access";

/// Conjunto fixo de permissões de cada papel.
pub fn permissoes_do_papel(role: UserRole) -> &'static [&'static str] {
    match role {
        UserRole::Admin => &[FULL_ACCESS],
        UserRole::Imobiliaria => &[
            "manage_brokers",
            "view_all_properties",
            "financial_reports",
            "admin_panel",
        ],
        UserRole::Gerente => &["manage_brokers", "view_properties", "view_commissions"],
        UserRole::Corretor => &[
            "view_properties",
            "manage_clients",
            "create_contracts",
            "view_commissions",
        ],
        UserRole::Cliente => &["view_properties", "save_favorites", "contact_brokers"],
    }
}

pub fn papel_tem_permissao(role: UserRole, permissao: &str) -> bool {
    let permissoes = permissoes_do_papel(role);
    permissoes.contains(&FULL_ACCESS) || permissoes.contains(&permissao)
}

/// 1. O Trait que define o que é uma Permissão
pub trait PermissionDef: Send + Sync + 'static {
    fn slug() -> &'static str;
}

/// 2. O Extractor (Guardião) por permissão
pub struct RequirePermission<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A. Autenticação primeiro
        let user = parts
            .extensions
            .get::<AuthUser>()
            .ok_or(AppError::InvalidToken)?;

        // B. Depois a permissão
        let exigida = T::slug();
        if !papel_tem_permissao(user.role, exigida) {
            return Err(AppError::AcessoNegado(format!(
                "Você precisa da permissão '{exigida}' para realizar esta ação."
            )));
        }

        Ok(RequirePermission(PhantomData))
    }
}

/// 3. O Trait e o Extractor por papel. Admin passa em qualquer guarda.
pub trait RoleDef: Send + Sync + 'static {
    fn role() -> UserRole;
}

pub struct RequireRole<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthUser>()
            .ok_or(AppError::InvalidToken)?;

        if user.role != T::role() && user.role != UserRole::Admin {
            return Err(AppError::AcessoNegado(format!(
                "Acesso restrito ao perfil {}.",
                T::role().descricao()
            )));
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES E PAPÉIS (TIPOS)
// ---

pub struct PermManageBrokers;
impl PermissionDef for PermManageBrokers {
    fn slug() -> &'static str {
        "manage_brokers"
    }
}

pub struct PermManageClients;
impl PermissionDef for PermManageClients {
    fn slug() -> &'static str {
        "manage_clients"
    }
}

pub struct PermCreateContracts;
impl PermissionDef for PermCreateContracts {
    fn slug() -> &'static str {
        "create_contracts"
    }
}

pub struct PermViewCommissions;
impl PermissionDef for PermViewCommissions {
    fn slug() -> &'static str {
        "view_commissions"
    }
}

pub struct PermViewProperties;
impl PermissionDef for PermViewProperties {
    fn slug() -> &'static str {
        "view_properties"
    }
}

pub struct RoleAdmin;
impl RoleDef for RoleAdmin {
    fn role() -> UserRole {
        UserRole::Admin
    }
}

pub struct RoleImobiliaria;
impl RoleDef for RoleImobiliaria {
    fn role() -> UserRole {
        UserRole::Imobiliaria
    }
}

pub struct RoleGerente;
impl RoleDef for RoleGerente {
    fn role() -> UserRole {
        UserRole::Gerente
    }
}

pub struct RoleCorretor;
impl RoleDef for RoleCorretor {
    fn role() -> UserRole {
        UserRole::Corretor
    }
}

pub struct RoleCliente;
impl RoleDef for RoleCliente {
    fn role() -> UserRole {
        UserRole::Cliente
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_tem_curinga_para_tudo() {
        for perm in [
            "manage_brokers",
            "view_properties",
            "create_contracts",
            "qualquer_coisa_futura",
        ] {
            assert!(papel_tem_permissao(UserRole::Admin, perm));
        }
    }

    #[test]
    fn cliente_nao_escala_para_permissoes_de_corretor_ou_admin() {
        for perm in [
            "manage_clients",
            "create_contracts",
            "view_commissions",
            "manage_brokers",
            "admin_panel",
            FULL_ACCESS,
        ] {
            assert!(
                !papel_tem_permissao(UserRole::Cliente, perm),
                "cliente não deveria ter '{perm}'"
            );
        }
    }

    #[test]
    fn conjuntos_fixos_por_papel() {
        assert!(papel_tem_permissao(UserRole::Corretor, "manage_clients"));
        assert!(papel_tem_permissao(UserRole::Corretor, "view_commissions"));
        assert!(!papel_tem_permissao(UserRole::Corretor, "manage_brokers"));

        assert!(papel_tem_permissao(UserRole::Imobiliaria, "manage_brokers"));
        assert!(!papel_tem_permissao(UserRole::Imobiliaria, "manage_clients"));

        assert!(papel_tem_permissao(UserRole::Gerente, "manage_brokers"));
        assert!(papel_tem_permissao(UserRole::Cliente, "save_favorites"));
    }
}
