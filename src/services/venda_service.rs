// src/services/venda_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ImovelRepository, PerfilRepository, VendaRepository},
    models::{
        imovel::PropertyStatus,
        venda::{calcular_comissao, Venda, VendaStatus},
    },
};

#[derive(Clone)]
pub struct VendaService {
    venda_repo: VendaRepository,
    imovel_repo: ImovelRepository,
    perfil_repo: PerfilRepository,
    pool: PgPool,
}

impl VendaService {
    pub fn new(
        venda_repo: VendaRepository,
        imovel_repo: ImovelRepository,
        perfil_repo: PerfilRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            venda_repo,
            imovel_repo,
            perfil_repo,
            pool,
        }
    }

    // A comissão é capturada aqui, com o percentual vigente do corretor.
    // Reajustes futuros do percentual não tocam vendas já abertas.
    pub async fn criar(
        &self,
        corretor_id: Uuid,
        cliente_id: Uuid,
        property_id: Uuid,
        valor: Decimal,
        forma_pagamento: Option<&str>,
        observacoes: Option<&str>,
    ) -> Result<Venda, AppError> {
        let corretor = self
            .perfil_repo
            .find_corretor_by_id(corretor_id)
            .await?
            .ok_or(AppError::NaoEncontrado)?;

        let cliente = self
            .perfil_repo
            .find_cliente_by_id(cliente_id)
            .await?
            .ok_or(AppError::NaoEncontrado)?;

        // Cliente da carteira de outro corretor não entra em venda deste.
        if cliente.corretor_id.is_some_and(|dono| dono != corretor.id) {
            return Err(AppError::AcessoNegado(
                "Este cliente pertence à carteira de outro corretor.".to_string(),
            ));
        }

        let imovel = self
            .imovel_repo
            .find_by_id(property_id)
            .await?
            .ok_or(AppError::NaoEncontrado)?;

        if imovel.status.terminal() {
            return Err(AppError::TransicaoInvalida(
                "Este imóvel já foi vendido ou alugado.".to_string(),
            ));
        }

        let comissao = calcular_comissao(valor, corretor.comissao_percentual);

        let mut tx = self.pool.begin().await?;
        let venda = self
            .venda_repo
            .create(
                &mut *tx,
                cliente_id,
                corretor.id,
                property_id,
                valor,
                comissao,
                forma_pagamento,
                observacoes,
            )
            .await?;
        tx.commit().await?;

        Ok(venda)
    }

    // Transição de status com os efeitos colaterais na mesma transação:
    // concluir uma venda marca o imóvel como vendido.
    pub async fn transicionar(
        &self,
        venda_id: Uuid,
        novo_status: VendaStatus,
        dono: Option<Uuid>,
    ) -> Result<Venda, AppError> {
        let venda = self
            .venda_repo
            .find_by_id(venda_id)
            .await?
            .ok_or(AppError::NaoEncontrado)?;

        // Corretor só mexe nas próprias vendas; admin passa sem filtro.
        if let Some(corretor_id) = dono {
            if venda.corretor_id != Some(corretor_id) {
                return Err(AppError::AcessoNegado(
                    "Esta venda pertence a outro corretor.".to_string(),
                ));
            }
        }

        if !venda.status.pode_transicionar_para(novo_status) {
            return Err(AppError::TransicaoInvalida(format!(
                "Venda não pode sair de {:?} para {:?}.",
                venda.status, novo_status
            )));
        }

        let concluir = novo_status == VendaStatus::Concluida;

        let mut tx = self.pool.begin().await?;

        let atualizada = self
            .venda_repo
            .update_status(&mut *tx, venda_id, novo_status, concluir)
            .await?;

        if concluir {
            if let Some(property_id) = venda.property_id {
                if let Some(imovel) = self.imovel_repo.find_by_id(property_id).await? {
                    if !imovel.status.terminal() {
                        self.imovel_repo
                            .update_status(&mut *tx, property_id, PropertyStatus::Vendido)
                            .await?;
                    }
                }
            }
        }

        tx.commit().await?;

        Ok(atualizada)
    }
}
