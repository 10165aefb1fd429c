// src/models/lead.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "lead_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    Novo,
    Contactado,
    Interessado,
    NaoInteressado,
}

impl LeadStatus {
    fn ordem(&self) -> u8 {
        match self {
            LeadStatus::Novo => 0,
            LeadStatus::Contactado => 1,
            // Interessado e NaoInteressado são desfechos alternativos no
            // mesmo degrau: nenhum avança para o outro.
            LeadStatus::Interessado | LeadStatus::NaoInteressado => 2,
        }
    }

    /// Transições andam apenas para a frente. Reatribuir o lead a outro
    /// corretor não passa por aqui — não é mudança de status.
    pub fn pode_avancar_para(&self, novo: LeadStatus) -> bool {
        novo.ordem() > self.ordem()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,

    pub nome: String,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub mensagem: Option<String>,

    pub property_id: Option<Uuid>,
    pub corretor_id: Option<Uuid>,

    pub status: LeadStatus,
    pub origem: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transicoes_avancam_somente_para_frente() {
        assert!(LeadStatus::Novo.pode_avancar_para(LeadStatus::Contactado));
        assert!(LeadStatus::Novo.pode_avancar_para(LeadStatus::Interessado));
        assert!(LeadStatus::Contactado.pode_avancar_para(LeadStatus::NaoInteressado));

        assert!(!LeadStatus::Contactado.pode_avancar_para(LeadStatus::Novo));
        assert!(!LeadStatus::Interessado.pode_avancar_para(LeadStatus::Contactado));
        assert!(!LeadStatus::Novo.pode_avancar_para(LeadStatus::Novo));
    }

    #[test]
    fn desfechos_nao_se_alternam() {
        assert!(!LeadStatus::Interessado.pode_avancar_para(LeadStatus::NaoInteressado));
        assert!(!LeadStatus::NaoInteressado.pode_avancar_para(LeadStatus::Interessado));
    }
}
