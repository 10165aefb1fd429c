// src/models/campanha.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Sobreposição promocional sobre os anúncios. Ciclo de vida independente da
// hierarquia de posse.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Campanha {
    pub id: Uuid,

    pub titulo: String,
    pub subtitulo: Option<String>,

    #[schema(example = "10% OFF + Brinde")]
    pub desconto: Option<String>,

    // Lista separada por ';' (ex.: "FGTS aceito;Financiamento até 35 anos")
    pub beneficios: Option<String>,
    pub condicoes: Option<String>,

    pub cor_fundo: Option<String>,
    pub cor_texto: Option<String>,

    pub destaque: bool,
    pub ativo: bool,

    pub data_inicio: Option<DateTime<Utc>>,
    pub data_fim: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campanha {
    pub fn beneficios_lista(&self) -> Vec<&str> {
        self.beneficios
            .as_deref()
            .map(|b| b.split(';').filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    /// Vigente: ativa e dentro do intervalo de datas (extremos abertos contam).
    pub fn esta_vigente(&self, agora: DateTime<Utc>) -> bool {
        if !self.ativo {
            return false;
        }
        if let Some(inicio) = self.data_inicio {
            if agora < inicio {
                return false;
            }
        }
        if let Some(fim) = self.data_fim {
            if agora > fim {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn campanha(ativo: bool, inicio: Option<i64>, fim: Option<i64>) -> Campanha {
        let agora = Utc::now();
        Campanha {
            id: Uuid::new_v4(),
            titulo: "Feirão".into(),
            subtitulo: None,
            desconto: Some("10% OFF".into()),
            beneficios: Some("FGTS aceito;Financiamento até 35 anos".into()),
            condicoes: None,
            cor_fundo: None,
            cor_texto: None,
            destaque: false,
            ativo,
            data_inicio: inicio.map(|d| agora + Duration::days(d)),
            data_fim: fim.map(|d| agora + Duration::days(d)),
            created_at: agora,
            updated_at: agora,
        }
    }

    #[test]
    fn vigencia_respeita_flag_e_intervalo() {
        let agora = Utc::now();

        assert!(campanha(true, Some(-1), Some(1)).esta_vigente(agora));
        assert!(campanha(true, None, None).esta_vigente(agora));
        assert!(!campanha(false, Some(-1), Some(1)).esta_vigente(agora));
        assert!(!campanha(true, Some(1), Some(2)).esta_vigente(agora));
        assert!(!campanha(true, Some(-2), Some(-1)).esta_vigente(agora));
    }

    #[test]
    fn beneficios_viram_lista() {
        let c = campanha(true, None, None);
        assert_eq!(
            c.beneficios_lista(),
            vec!["FGTS aceito", "Financiamento até 35 anos"]
        );
    }
}
