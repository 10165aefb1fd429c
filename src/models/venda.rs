// src/models/venda.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "venda_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VendaStatus {
    EmNegociacao,
    PropostaEnviada,
    Concluida,
    Cancelada,
}

impl VendaStatus {
    pub fn terminal(&self) -> bool {
        matches!(self, VendaStatus::Concluida | VendaStatus::Cancelada)
    }

    /// Em Negociação -> Proposta Enviada -> {Concluída | Cancelada}.
    /// Cancelar (ou concluir uma venda direta) vale desde a negociação.
    pub fn pode_transicionar_para(&self, novo: VendaStatus) -> bool {
        match (self, novo) {
            (VendaStatus::EmNegociacao, VendaStatus::PropostaEnviada)
            | (VendaStatus::EmNegociacao, VendaStatus::Concluida)
            | (VendaStatus::EmNegociacao, VendaStatus::Cancelada)
            | (VendaStatus::PropostaEnviada, VendaStatus::Concluida)
            | (VendaStatus::PropostaEnviada, VendaStatus::Cancelada) => true,
            _ => false,
        }
    }
}

/// Comissão capturada no fechamento: valor × percentual vigente do corretor.
/// Mudanças posteriores no percentual não recalculam vendas antigas.
pub fn calcular_comissao(valor: Decimal, percentual: Decimal) -> Decimal {
    (valor * percentual / Decimal::from(100)).round_dp(2)
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Venda {
    pub id: Uuid,

    pub cliente_id: Option<Uuid>,
    pub corretor_id: Option<Uuid>,
    pub property_id: Option<Uuid>,

    pub valor: Decimal,
    pub valor_comissao: Decimal,

    pub status: VendaStatus,
    pub forma_pagamento: Option<String>,
    pub observacoes: Option<String>,

    pub data_proposta: DateTime<Utc>,
    pub data_conclusao: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn comissao_e_percentual_do_valor() {
        let valor = Decimal::from_str("350000.00").unwrap();
        let percentual = Decimal::from_str("3.0").unwrap();
        assert_eq!(
            calcular_comissao(valor, percentual),
            Decimal::from_str("10500.00").unwrap()
        );

        let seis = Decimal::from_str("6.5").unwrap();
        assert_eq!(
            calcular_comissao(Decimal::from_str("199999.99").unwrap(), seis),
            Decimal::from_str("13000.00").unwrap()
        );
    }

    #[test]
    fn fluxo_de_status_permitido() {
        use VendaStatus::*;

        assert!(EmNegociacao.pode_transicionar_para(PropostaEnviada));
        assert!(EmNegociacao.pode_transicionar_para(Cancelada));
        assert!(EmNegociacao.pode_transicionar_para(Concluida));
        assert!(PropostaEnviada.pode_transicionar_para(Concluida));
        assert!(PropostaEnviada.pode_transicionar_para(Cancelada));
    }

    #[test]
    fn estados_terminais_nao_transicionam() {
        use VendaStatus::*;

        for terminal in [Concluida, Cancelada] {
            assert!(terminal.terminal());
            for destino in [EmNegociacao, PropostaEnviada, Concluida, Cancelada] {
                assert!(!terminal.pode_transicionar_para(destino));
            }
        }
        assert!(!PropostaEnviada.pode_transicionar_para(EmNegociacao));
    }
}
