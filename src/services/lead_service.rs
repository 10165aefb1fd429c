// src/services/lead_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ImovelRepository, LeadRepository, PerfilRepository},
    models::lead::{Lead, LeadStatus},
};

#[derive(Clone)]
pub struct LeadService {
    lead_repo: LeadRepository,
    imovel_repo: ImovelRepository,
    perfil_repo: PerfilRepository,
    pool: PgPool,
}

impl LeadService {
    pub fn new(
        lead_repo: LeadRepository,
        imovel_repo: ImovelRepository,
        perfil_repo: PerfilRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            lead_repo,
            imovel_repo,
            perfil_repo,
            pool,
        }
    }

    // Entrada pública de interesse: se o imóvel tem corretor, o lead nasce
    // atribuído a ele.
    pub async fn criar_publico(
        &self,
        nome: &str,
        email: Option<&str>,
        telefone: Option<&str>,
        mensagem: Option<&str>,
        property_id: Option<Uuid>,
        origem: Option<&str>,
    ) -> Result<Lead, AppError> {
        let corretor_id = match property_id {
            Some(id) => {
                let imovel = self
                    .imovel_repo
                    .find_by_id(id)
                    .await?
                    .ok_or(AppError::NaoEncontrado)?;
                imovel.corretor_id
            }
            None => None,
        };

        let lead = self
            .lead_repo
            .create(
                &self.pool,
                nome.trim(),
                email,
                telefone,
                mensagem,
                property_id,
                corretor_id,
                origem.or(Some("site")),
            )
            .await?;

        Ok(lead)
    }

    // Status só anda para a frente (novo -> contactado -> desfecho).
    pub async fn transicionar(
        &self,
        lead_id: Uuid,
        novo_status: LeadStatus,
        dono: Option<Uuid>,
    ) -> Result<Lead, AppError> {
        let lead = self
            .lead_repo
            .find_by_id(lead_id)
            .await?
            .ok_or(AppError::NaoEncontrado)?;

        if let Some(corretor_id) = dono {
            if lead.corretor_id != Some(corretor_id) {
                return Err(AppError::AcessoNegado(
                    "Este lead pertence a outro corretor.".to_string(),
                ));
            }
        }

        if !lead.status.pode_avancar_para(novo_status) {
            return Err(AppError::TransicaoInvalida(format!(
                "Lead não pode voltar de {:?} para {:?}.",
                lead.status, novo_status
            )));
        }

        self.lead_repo
            .update_status(&self.pool, lead_id, novo_status)
            .await
    }

    // Reatribuição troca o dono sem tocar no status.
    pub async fn reatribuir(
        &self,
        lead_id: Uuid,
        novo_corretor_id: Uuid,
        dono: Option<Uuid>,
    ) -> Result<Lead, AppError> {
        let lead = self
            .lead_repo
            .find_by_id(lead_id)
            .await?
            .ok_or(AppError::NaoEncontrado)?;

        if let Some(corretor_id) = dono {
            if lead.corretor_id != Some(corretor_id) {
                return Err(AppError::AcessoNegado(
                    "Este lead pertence a outro corretor.".to_string(),
                ));
            }
        }

        if !self
            .perfil_repo
            .corretor_aceita_leads(novo_corretor_id)
            .await?
        {
            return Err(AppError::TransicaoInvalida(
                "O corretor de destino não está ativo para receber leads.".to_string(),
            ));
        }

        self.lead_repo
            .reatribuir(&self.pool, lead_id, novo_corretor_id)
            .await
    }
}
