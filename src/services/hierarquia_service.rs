// src/services/hierarquia_service.rs
//
// Operações sobre a cadeia de posse imobiliária -> gerente -> corretor.
// Criações que envolvem usuário + vínculo acontecem numa única transação;
// exclusões derrubam a subárvore inteira (inclusive os usuários vinculados),
// mas nunca os registros históricos de venda.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        validacao::{normalizar_documento, validar_cpf, validar_senha},
    },
    db::{PerfilRepository, UserRepository},
    models::{
        auth::{User, UserRole, UserStatus},
        perfil::{CorretorProfile, Gerente, ImobiliariaProfile},
    },
    services::auth::hash_senha,
};

#[derive(Clone)]
pub struct HierarquiaService {
    user_repo: UserRepository,
    perfil_repo: PerfilRepository,
    pool: PgPool,
}

impl HierarquiaService {
    pub fn new(user_repo: UserRepository, perfil_repo: PerfilRepository, pool: PgPool) -> Self {
        Self {
            user_repo,
            perfil_repo,
            pool,
        }
    }

    // =========================================================================
    //  GERENTES
    // =========================================================================

    // Com senha, o gerente ganha acesso próprio ao painel; sem senha, fica
    // apenas como registro de contato da equipe.
    pub async fn criar_gerente(
        &self,
        imobiliaria: &ImobiliariaProfile,
        nome: &str,
        email: &str,
        telefone: Option<&str>,
        creci: &str,
        senha: Option<&str>,
    ) -> Result<Gerente, AppError> {
        let email = email.trim().to_lowercase();

        let mut tx = self.pool.begin().await?;

        let user_id = match senha {
            Some(senha) => {
                let validacao = validar_senha(senha);
                if !validacao.valida {
                    return Err(AppError::SenhaFraca(validacao.erros));
                }
                let hashed = hash_senha(senha).await?;
                let user = self
                    .user_repo
                    .create_user(
                        &mut *tx,
                        &email,
                        &hashed,
                        nome.trim(),
                        telefone,
                        UserRole::Gerente,
                        UserStatus::Ativo,
                    )
                    .await?;
                Some(user.id)
            }
            None => None,
        };

        let gerente = self
            .perfil_repo
            .create_gerente(
                &mut *tx,
                imobiliaria.id,
                user_id,
                nome.trim(),
                &email,
                telefone,
                creci.trim(),
            )
            .await?;

        tx.commit().await?;

        Ok(gerente)
    }

    pub async fn excluir_gerente(
        &self,
        gerente_id: Uuid,
        imobiliaria: &ImobiliariaProfile,
    ) -> Result<(), AppError> {
        let gerente = self
            .perfil_repo
            .find_gerente_by_id(gerente_id)
            .await?
            .ok_or(AppError::NaoEncontrado)?;

        if gerente.imobiliaria_id != imobiliaria.id {
            return Err(AppError::AcessoNegado(
                "Este gerente pertence a outra imobiliária.".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        // Usuários dos corretores primeiro; o FK derruba os perfis junto.
        let corretores = self
            .perfil_repo
            .user_ids_dos_corretores_do_gerente(&mut *tx, gerente_id)
            .await?;
        for user_id in corretores {
            self.user_repo.delete_user(&mut *tx, user_id).await?;
        }

        self.perfil_repo.delete_gerente(&mut *tx, gerente_id).await?;

        if let Some(user_id) = gerente.user_id {
            self.user_repo.delete_user(&mut *tx, user_id).await?;
        }

        tx.commit().await?;

        Ok(())
    }

    // =========================================================================
    //  CORRETORES
    // =========================================================================

    pub async fn criar_corretor(
        &self,
        gerente: &Gerente,
        imobiliaria: &ImobiliariaProfile,
        nome: &str,
        email: &str,
        telefone: Option<&str>,
        cpf: &str,
        creci: &str,
        senha: &str,
    ) -> Result<CorretorProfile, AppError> {
        // Limite do plano vale para a imobiliária inteira.
        let atuais = self
            .perfil_repo
            .count_corretores_da_imobiliaria(imobiliaria.id)
            .await?;
        if atuais >= imobiliaria.limite_corretores as i64 {
            return Err(AppError::LimiteCorretores);
        }

        let validacao = validar_senha(senha);
        if !validacao.valida {
            return Err(AppError::SenhaFraca(validacao.erros));
        }

        let cpf = normalizar_documento(cpf);
        if !validar_cpf(&cpf) {
            return Err(AppError::CpfInvalido);
        }

        let hashed = hash_senha(senha).await?;

        let mut tx = self.pool.begin().await?;

        let user = self
            .user_repo
            .create_user(
                &mut *tx,
                &email.trim().to_lowercase(),
                &hashed,
                nome.trim(),
                telefone,
                UserRole::Corretor,
                UserStatus::Ativo,
            )
            .await?;

        let corretor = self
            .perfil_repo
            .create_corretor(&mut *tx, user.id, &cpf, creci.trim(), Some(gerente.id), true)
            .await?;

        tx.commit().await?;

        Ok(corretor)
    }

    // =========================================================================
    //  EXCLUSÃO DE USUÁRIOS (cascata de posse)
    // =========================================================================

    // Exclusão pelo admin. Imobiliária leva a equipe inteira junto; os demais
    // papéis derrubam apenas o próprio usuário (e o perfil, por FK). Vendas e
    // leads ficam para trás com o dono anulado.
    pub async fn excluir_usuario(&self, user: &User) -> Result<(), AppError> {
        if user.role == UserRole::Admin {
            return Err(AppError::AdminProtegido);
        }

        let mut tx = self.pool.begin().await?;

        if user.role == UserRole::Imobiliaria {
            if let Some(imobiliaria) = self.perfil_repo.find_imobiliaria_by_user(user.id).await? {
                let equipe = self
                    .perfil_repo
                    .user_ids_da_equipe(&mut *tx, imobiliaria.id)
                    .await?;
                for membro in equipe {
                    self.user_repo.delete_user(&mut *tx, membro).await?;
                }
            }
        }

        self.user_repo.delete_user(&mut *tx, user.id).await?;

        tx.commit().await?;

        Ok(())
    }
}
