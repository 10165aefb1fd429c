// src/models/imovel.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "property_tipo", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PropertyTipo {
    Apartamento,
    Casa,
    Terreno,
    Comercial,
    Rural,
    Galpao,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "property_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Disponivel,
    Vendido,
    Alugado,
    Reservado,
    Inativo,
}

impl PropertyStatus {
    // Vendido e Alugado encerram o ciclo de vida do anúncio.
    pub fn terminal(&self) -> bool {
        matches!(self, PropertyStatus::Vendido | PropertyStatus::Alugado)
    }

    pub fn descricao(&self) -> &'static str {
        match self {
            PropertyStatus::Disponivel => "Disponível",
            PropertyStatus::Vendido => "Vendido",
            PropertyStatus::Alugado => "Alugado",
            PropertyStatus::Reservado => "Reservado",
            PropertyStatus::Inativo => "Inativo",
        }
    }
}

impl PropertyTipo {
    pub fn descricao(&self) -> &'static str {
        match self {
            PropertyTipo::Apartamento => "Apartamento",
            PropertyTipo::Casa => "Casa",
            PropertyTipo::Terreno => "Terreno",
            PropertyTipo::Comercial => "Comercial",
            PropertyTipo::Rural => "Rural",
            PropertyTipo::Galpao => "Galpão",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Uuid,
    pub corretor_id: Option<Uuid>,

    pub nome: String,
    pub tipo: PropertyTipo,
    pub status: PropertyStatus,

    pub preco: Decimal,
    pub localizacao: Option<String>,
    pub quartos: Option<i32>,
    pub banheiros: Option<i32>,
    pub area: Option<String>,
    pub descricao: Option<String>,

    pub destaque: bool,
    pub ativo: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn somente_vendido_e_alugado_sao_terminais() {
        assert!(PropertyStatus::Vendido.terminal());
        assert!(PropertyStatus::Alugado.terminal());
        assert!(!PropertyStatus::Disponivel.terminal());
        assert!(!PropertyStatus::Reservado.terminal());
        assert!(!PropertyStatus::Inativo.terminal());
    }
}
