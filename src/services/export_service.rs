// src/services/export_service.rs
//
// Exportação CSV do painel administrativo. Cabeçalho e ordem de colunas são
// fixos por entidade; valores saem como texto de exibição (moeda em
// "R$ 1.234,56", booleanos "Sim"/"Não", datas "dd/mm/aaaa").

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::{auth::User, campanha::Campanha, imovel::Property},
};

pub fn formatar_brl(valor: Decimal) -> String {
    let arredondado = valor.round_dp(2);
    let negativo = arredondado.is_sign_negative();
    let texto = format!("{:.2}", arredondado.abs());
    let (inteiro, centavos) = texto.split_once('.').unwrap_or((texto.as_str(), "00"));

    // Agrupa os milhares com ponto, da direita para a esquerda.
    let digitos: Vec<char> = inteiro.chars().collect();
    let mut agrupado = String::with_capacity(digitos.len() + digitos.len() / 3);
    for (i, c) in digitos.iter().enumerate() {
        if i > 0 && (digitos.len() - i) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(*c);
    }

    let sinal = if negativo { "-" } else { "" };
    format!("{sinal}R$ {agrupado},{centavos}")
}

pub fn formatar_sim_nao(valor: bool) -> &'static str {
    if valor { "Sim" } else { "Não" }
}

pub fn formatar_data(data: DateTime<Utc>) -> String {
    data.format("%d/%m/%Y").to_string()
}

fn escrever_csv(cabecalho: &[&str], linhas: Vec<Vec<String>>) -> Result<String, AppError> {
    let mut escritor = csv::Writer::from_writer(Vec::new());

    escritor
        .write_record(cabecalho)
        .map_err(anyhow::Error::new)?;
    for linha in linhas {
        escritor.write_record(&linha).map_err(anyhow::Error::new)?;
    }

    let bytes = escritor
        .into_inner()
        .map_err(|e| anyhow::anyhow!("falha ao finalizar CSV: {e}"))?;
    String::from_utf8(bytes).map_err(anyhow::Error::new).map_err(AppError::from)
}

pub fn exportar_membros(usuarios: &[User]) -> Result<String, AppError> {
    let cabecalho = [
        "Nome",
        "Email",
        "Tipo",
        "Status",
        "Telefone",
        "Email Verificado",
        "Data de Cadastro",
    ];
    let linhas = usuarios
        .iter()
        .map(|u| {
            vec![
                u.nome.clone(),
                u.email.clone(),
                u.role.descricao().to_string(),
                u.status.descricao().to_string(),
                u.telefone.clone().unwrap_or_default(),
                formatar_sim_nao(u.email_verified).to_string(),
                formatar_data(u.created_at),
            ]
        })
        .collect();
    escrever_csv(&cabecalho, linhas)
}

pub fn exportar_imoveis(imoveis: &[Property]) -> Result<String, AppError> {
    let cabecalho = [
        "Nome",
        "Tipo",
        "Status",
        "Preço",
        "Localização",
        "Quartos",
        "Banheiros",
        "Área",
        "Destaque",
        "Ativo",
        "Data de Cadastro",
    ];
    let linhas = imoveis
        .iter()
        .map(|p| {
            vec![
                p.nome.clone(),
                p.tipo.descricao().to_string(),
                p.status.descricao().to_string(),
                formatar_brl(p.preco),
                p.localizacao.clone().unwrap_or_default(),
                p.quartos.map(|q| q.to_string()).unwrap_or_default(),
                p.banheiros.map(|b| b.to_string()).unwrap_or_default(),
                p.area.clone().unwrap_or_default(),
                formatar_sim_nao(p.destaque).to_string(),
                formatar_sim_nao(p.ativo).to_string(),
                formatar_data(p.created_at),
            ]
        })
        .collect();
    escrever_csv(&cabecalho, linhas)
}

pub fn exportar_campanhas(campanhas: &[Campanha]) -> Result<String, AppError> {
    let cabecalho = [
        "Título",
        "Subtítulo",
        "Desconto",
        "Benefícios",
        "Condições",
        "Destaque",
        "Ativo",
        "Início",
        "Fim",
        "Data de Cadastro",
    ];
    let linhas = campanhas
        .iter()
        .map(|c| {
            vec![
                c.titulo.clone(),
                c.subtitulo.clone().unwrap_or_default(),
                c.desconto.clone().unwrap_or_default(),
                c.beneficios.clone().unwrap_or_default(),
                c.condicoes.clone().unwrap_or_default(),
                formatar_sim_nao(c.destaque).to_string(),
                formatar_sim_nao(c.ativo).to_string(),
                c.data_inicio.map(formatar_data).unwrap_or_default(),
                c.data_fim.map(formatar_data).unwrap_or_default(),
                formatar_data(c.created_at),
            ]
        })
        .collect();
    escrever_csv(&cabecalho, linhas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::{UserRole, UserStatus};
    use std::str::FromStr;
    use uuid::Uuid;

    #[test]
    fn moeda_no_formato_brasileiro() {
        let casos = [
            ("1234.56", "R$ 1.234,56"),
            ("0.5", "R$ 0,50"),
            ("1000000", "R$ 1.000.000,00"),
            ("999.99", "R$ 999,99"),
            ("350000", "R$ 350.000,00"),
        ];
        for (entrada, esperado) in casos {
            assert_eq!(formatar_brl(Decimal::from_str(entrada).unwrap()), esperado);
        }
    }

    #[test]
    fn booleano_vira_sim_nao() {
        assert_eq!(formatar_sim_nao(true), "Sim");
        assert_eq!(formatar_sim_nao(false), "Não");
    }

    #[test]
    fn data_no_formato_dia_mes_ano() {
        let data = DateTime::parse_from_rfc3339("2025-03-09T15:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(formatar_data(data), "09/03/2025");
    }

    #[test]
    fn membros_saem_com_cabecalho_fixo() {
        let agora = Utc::now();
        let usuario = User {
            id: Uuid::new_v4(),
            email: "maria@teste.com.br".into(),
            password_hash: "<hash>".into(),
            nome: "Maria Santos".into(),
            telefone: None,
            role: UserRole::Cliente,
            status: UserStatus::Ativo,
            email_verified: true,
            phone_verified: false,
            created_at: agora,
            updated_at: agora,
            last_login: None,
        };

        let csv = exportar_membros(&[usuario]).unwrap();
        let mut linhas = csv.lines();
        assert_eq!(
            linhas.next().unwrap(),
            "Nome,Email,Tipo,Status,Telefone,Email Verificado,Data de Cadastro"
        );
        let linha = linhas.next().unwrap();
        assert!(linha.starts_with("Maria Santos,maria@teste.com.br,Cliente,Ativo,,Sim,"));
    }
}
