// src/models/dashboard.rs
//
// Agregados de leitura por papel. Somente contagens, somas e percentuais
// derivados sobre o que o principal logado possui (direta ou transitivamente).

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{campanha::Campanha, lead::Lead, venda::Venda};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_usuarios: i64,
    pub clientes: i64,
    pub corretores: i64,
    pub imobiliarias: i64,
    pub gerentes: i64,
    pub usuarios_ativos: i64,
    pub usuarios_pendentes: i64,
    pub total_imoveis: i64,
    pub total_leads: i64,
    pub total_vendas: i64,
    pub vendas_concluidas: i64,
    pub vendas_em_andamento: i64,
    pub valor_total_vendas: Decimal,
    pub valor_total_comissoes: Decimal,
}

// Contadores públicos exibidos na home (JSON plano de contagens nomeadas).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicStats {
    pub imoveis_disponiveis: i64,
    pub corretores_ativos: i64,
    pub campanhas_vigentes: i64,
    pub vendas_concluidas: i64,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopCorretorEntry {
    pub corretor_id: Uuid,
    pub nome: String,
    pub creci: String,
    pub vendas_concluidas: i64,
    pub valor_vendido: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImobiliariaDashboard {
    pub total_gerentes: i64,
    pub gerentes_ativos: i64,
    pub total_corretores: i64,
    pub corretores_ativos: i64,
    pub total_imoveis: i64,
    pub total_leads: i64,
    pub vendas_mes: i64,

    pub plano_ativo: String,
    pub limite_corretores: i32,
    pub limite_imoveis: i32,
    // Percentual de uso do plano (corretores cadastrados / limite).
    pub uso_limite_corretores: f64,

    pub top_corretores: Vec<TopCorretorEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GerenteDashboard {
    pub total_corretores: i64,
    pub corretores_ativos: i64,
    pub total_clientes: i64,
    pub total_leads: i64,
    pub vendas_concluidas: i64,
    pub valor_total_vendas: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadsPorStatus {
    pub novos: i64,
    pub contactados: i64,
    pub interessados: i64,
    pub nao_interessados: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CorretorDashboard {
    pub total_clientes: i64,
    pub total_imoveis: i64,
    pub leads: LeadsPorStatus,

    pub vendas_em_andamento: i64,
    pub vendas_concluidas: i64,
    pub comissao_total: Decimal,

    pub vendas_mes_valor: Decimal,
    pub meta_vendas_mes: Option<Decimal>,
    // Percentual da meta mensal atingido (None quando não há meta).
    pub percentual_meta: Option<f64>,

    pub leads_recentes: Vec<Lead>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClienteDashboard {
    pub imoveis_compativeis: i64,
    pub campanhas_vigentes: Vec<Campanha>,
    pub meus_leads: Vec<Lead>,
    pub minhas_compras: Vec<Venda>,
}
