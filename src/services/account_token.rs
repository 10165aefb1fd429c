// src/services/account_token.rs
//
// Tokens assinados de fluxo de conta: confirmação de e-mail e redefinição de
// senha. Cada token amarra o usuário, uma finalidade e um jti. As duas
// finalidades nunca se aceitam mutuamente, e toda falha de verificação
// (assinatura, finalidade, expiração) colapsa no mesmo erro.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finalidade {
    ConfirmacaoEmail,
    RedefinicaoSenha,
}

impl Finalidade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Finalidade::ConfirmacaoEmail => "email-confirm",
            Finalidade::RedefinicaoSenha => "password-reset",
        }
    }

    // Constantes de política: 24h para confirmar e-mail, 1h para redefinir senha.
    fn validade(&self) -> Duration {
        match self {
            Finalidade::ConfirmacaoEmail => Duration::hours(24),
            Finalidade::RedefinicaoSenha => Duration::hours(1),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    sub: Uuid,
    finalidade: String,
    jti: Uuid,
    iat: usize,
    exp: usize,
}

#[derive(Debug)]
pub struct TokenVerificado {
    pub user_id: Uuid,
    pub jti: Uuid,
}

#[derive(Clone)]
pub struct AccountTokenService {
    secret: String,
}

impl AccountTokenService {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    pub fn emitir(&self, user_id: Uuid, finalidade: Finalidade) -> Result<String, AppError> {
        self.emitir_com_validade(user_id, finalidade, finalidade.validade())
    }

    fn emitir_com_validade(
        &self,
        user_id: Uuid,
        finalidade: Finalidade,
        validade: Duration,
    ) -> Result<String, AppError> {
        let agora = Utc::now();
        let claims = TokenClaims {
            sub: user_id,
            finalidade: finalidade.as_str().to_string(),
            jti: Uuid::new_v4(),
            iat: agora.timestamp() as usize,
            exp: (agora + validade).timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )?)
    }

    /// Verifica assinatura, expiração e finalidade. Nenhuma das falhas é
    /// distinguível para o chamador.
    pub fn verificar(
        &self,
        token: &str,
        esperada: Finalidade,
    ) -> Result<TokenVerificado, AppError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let dados = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::TokenConta)?;

        if dados.claims.finalidade != esperada.as_str() {
            return Err(AppError::TokenConta);
        }

        Ok(TokenVerificado {
            user_id: dados.claims.sub,
            jti: dados.claims.jti,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn servico() -> AccountTokenService {
        AccountTokenService::new("segredo-de-teste".to_string())
    }

    #[test]
    fn ida_e_volta_devolve_o_usuario() {
        let svc = servico();
        let user_id = Uuid::new_v4();

        let token = svc.emitir(user_id, Finalidade::ConfirmacaoEmail).unwrap();
        let verificado = svc
            .verificar(&token, Finalidade::ConfirmacaoEmail)
            .unwrap();

        assert_eq!(verificado.user_id, user_id);
    }

    #[test]
    fn finalidade_errada_e_invalida() {
        let svc = servico();
        let token = svc
            .emitir(Uuid::new_v4(), Finalidade::ConfirmacaoEmail)
            .unwrap();

        let erro = svc.verificar(&token, Finalidade::RedefinicaoSenha);
        assert!(matches!(erro, Err(AppError::TokenConta)));
    }

    #[test]
    fn token_expirado_e_invalido() {
        let svc = servico();
        let token = svc
            .emitir_com_validade(
                Uuid::new_v4(),
                Finalidade::RedefinicaoSenha,
                Duration::hours(-2),
            )
            .unwrap();

        let erro = svc.verificar(&token, Finalidade::RedefinicaoSenha);
        assert!(matches!(erro, Err(AppError::TokenConta)));
    }

    #[test]
    fn assinatura_de_outro_segredo_e_invalida() {
        let svc = servico();
        let outro = AccountTokenService::new("outro-segredo".to_string());

        let token = outro
            .emitir(Uuid::new_v4(), Finalidade::RedefinicaoSenha)
            .unwrap();

        let erro = svc.verificar(&token, Finalidade::RedefinicaoSenha);
        assert!(matches!(erro, Err(AppError::TokenConta)));
    }

    #[test]
    fn jtis_sao_unicos_por_emissao() {
        let svc = servico();
        let user_id = Uuid::new_v4();

        let a = svc.emitir(user_id, Finalidade::RedefinicaoSenha).unwrap();
        let b = svc.emitir(user_id, Finalidade::RedefinicaoSenha).unwrap();

        let va = svc.verificar(&a, Finalidade::RedefinicaoSenha).unwrap();
        let vb = svc.verificar(&b, Finalidade::RedefinicaoSenha).unwrap();
        assert_ne!(va.jti, vb.jti);
    }
}
