// src/common/validacao.rs
//
// Validações puras de cadastro: CPF, CNPJ, formato de e-mail e política de
// senha. Nenhuma função aqui toca banco ou rede.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Local-part, '@', domínio e TLD com pelo menos 2 letras.
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("regex de e-mail")
});

pub const SENHA_TAMANHO_MINIMO: usize = 8;

const CARACTERES_ESPECIAIS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Força da senha, derivada por pontuação. Apenas informativa, nunca barra cadastro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ForcaSenha {
    Fraca,
    Media,
    Forte,
}

#[derive(Debug, Serialize)]
pub struct ValidacaoSenha {
    pub valida: bool,
    pub erros: Vec<&'static str>,
    pub forca: ForcaSenha,
}

fn apenas_digitos(entrada: &str) -> Vec<u32> {
    entrada.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// Remove a máscara de um CPF/CNPJ ("529.982.247-25" -> "52998224725").
/// Documentos são armazenados e comparados sempre nessa forma.
pub fn normalizar_documento(entrada: &str) -> String {
    entrada.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn digito_verificador(soma: u32) -> u32 {
    let resto = soma % 11;
    if resto < 2 { 0 } else { 11 - resto }
}

/// Valida um CPF brasileiro (11 dígitos, dois verificadores por soma
/// ponderada módulo 11). Aceita entrada formatada ("529.982.247-25").
pub fn validar_cpf(cpf: &str) -> bool {
    let digitos = apenas_digitos(cpf);

    if digitos.len() != 11 {
        return false;
    }
    // Sequências de um único dígito repetido passam no cálculo, mas são inválidas.
    if digitos.iter().all(|&d| d == digitos[0]) {
        return false;
    }

    let primeiro = digito_verificador(
        digitos[..9]
            .iter()
            .zip((2..=10).rev())
            .map(|(d, peso)| d * peso)
            .sum(),
    );
    let segundo = digito_verificador(
        digitos[..10]
            .iter()
            .zip((2..=11).rev())
            .map(|(d, peso)| d * peso)
            .sum(),
    );

    digitos[9] == primeiro && digitos[10] == segundo
}

/// Valida um CNPJ brasileiro (14 dígitos, dois verificadores).
pub fn validar_cnpj(cnpj: &str) -> bool {
    const PESOS_1: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    const PESOS_2: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

    let digitos = apenas_digitos(cnpj);

    if digitos.len() != 14 {
        return false;
    }
    if digitos.iter().all(|&d| d == digitos[0]) {
        return false;
    }

    let primeiro = digito_verificador(
        digitos[..12]
            .iter()
            .zip(PESOS_1)
            .map(|(d, peso)| d * peso)
            .sum(),
    );
    let segundo = digito_verificador(
        digitos[..13]
            .iter()
            .zip(PESOS_2)
            .map(|(d, peso)| d * peso)
            .sum(),
    );

    digitos[12] == primeiro && digitos[13] == segundo
}

/// Valida o formato do e-mail. Falha fechado: qualquer desvio rejeita.
pub fn validar_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Aplica a política de senha: tamanho mínimo e as quatro classes de
/// caracteres. Cada critério ausente gera sua própria mensagem estável.
pub fn validar_senha(senha: &str) -> ValidacaoSenha {
    let mut erros = Vec::new();

    if senha.chars().count() < SENHA_TAMANHO_MINIMO {
        erros.push("A senha deve ter pelo menos 8 caracteres");
    }
    if !senha.chars().any(|c| c.is_ascii_uppercase()) {
        erros.push("A senha deve conter pelo menos uma letra maiúscula");
    }
    if !senha.chars().any(|c| c.is_ascii_lowercase()) {
        erros.push("A senha deve conter pelo menos uma letra minúscula");
    }
    if !senha.chars().any(|c| c.is_ascii_digit()) {
        erros.push("A senha deve conter pelo menos um número");
    }
    if !senha.chars().any(|c| CARACTERES_ESPECIAIS.contains(c)) {
        erros.push("A senha deve conter pelo menos um caractere especial");
    }

    ValidacaoSenha {
        valida: erros.is_empty(),
        forca: calcular_forca(senha),
        erros,
    }
}

fn calcular_forca(senha: &str) -> ForcaSenha {
    let tamanho = senha.chars().count();
    let mut pontos = 0;

    if tamanho >= 8 {
        pontos += 1;
    }
    if tamanho >= 12 {
        pontos += 1;
    }
    if senha.chars().any(|c| c.is_ascii_uppercase()) {
        pontos += 1;
    }
    if senha.chars().any(|c| c.is_ascii_lowercase()) {
        pontos += 1;
    }
    if senha.chars().any(|c| c.is_ascii_digit()) {
        pontos += 1;
    }
    if senha.chars().any(|c| CARACTERES_ESPECIAIS.contains(c)) {
        pontos += 1;
    }

    match pontos {
        0..=2 => ForcaSenha::Fraca,
        3..=4 => ForcaSenha::Media,
        _ => ForcaSenha::Forte,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpf_valido_formatado_e_cru() {
        assert!(validar_cpf("529.982.247-25"));
        assert!(validar_cpf("52998224725"));
    }

    #[test]
    fn cpf_com_digito_verificador_alterado_e_invalido() {
        // Cada mutação de um dígito verificador derruba a validação.
        assert!(!validar_cpf("529.982.247-35"));
        assert!(!validar_cpf("529.982.247-26"));
    }

    #[test]
    fn cpf_de_digitos_repetidos_e_invalido() {
        for d in 0..=9 {
            let repetido: String = std::iter::repeat(char::from(b'0' + d)).take(11).collect();
            assert!(!validar_cpf(&repetido), "CPF {repetido} deveria ser inválido");
        }
    }

    #[test]
    fn cpf_com_tamanho_errado_e_invalido() {
        assert!(!validar_cpf("5299822472"));
        assert!(!validar_cpf("529982247250"));
        assert!(!validar_cpf(""));
    }

    #[test]
    fn cnpj_valido() {
        assert!(validar_cnpj("11.444.777/0001-61"));
        assert!(validar_cnpj("11444777000161"));
    }

    #[test]
    fn cnpj_com_digito_alterado_e_invalido() {
        assert!(!validar_cnpj("11.444.777/0001-71"));
        assert!(!validar_cnpj("11.444.777/0001-62"));
    }

    #[test]
    fn cnpj_repetido_ou_curto_e_invalido() {
        assert!(!validar_cnpj("11111111111111"));
        assert!(!validar_cnpj("1144477700016"));
    }

    #[test]
    fn email_aceita_formatos_comuns() {
        assert!(validar_email("a@b.com"));
        assert!(validar_email("maria.silva+imoveis@lumiar.com.br"));
    }

    #[test]
    fn email_rejeita_desvios() {
        assert!(!validar_email("sem-arroba.com"));
        assert!(!validar_email("a@b"));
        assert!(!validar_email("a@b.c"));
        assert!(!validar_email("a b@c.com"));
        assert!(!validar_email("@dominio.com"));
    }

    #[test]
    fn senha_completa_e_valida_e_forte() {
        let resultado = validar_senha("Corretor@123");
        assert!(resultado.valida);
        assert!(resultado.erros.is_empty());
        assert_eq!(resultado.forca, ForcaSenha::Forte);
    }

    #[test]
    fn cada_classe_ausente_gera_erro_especifico() {
        let sem_maiuscula = validar_senha("corretor@123");
        assert!(!sem_maiuscula.valida);
        assert!(sem_maiuscula
            .erros
            .contains(&"A senha deve conter pelo menos uma letra maiúscula"));

        let sem_minuscula = validar_senha("CORRETOR@123");
        assert!(sem_minuscula
            .erros
            .contains(&"A senha deve conter pelo menos uma letra minúscula"));

        let sem_numero = validar_senha("Corretor@abc");
        assert!(sem_numero
            .erros
            .contains(&"A senha deve conter pelo menos um número"));

        let sem_especial = validar_senha("Corretor123");
        assert!(sem_especial
            .erros
            .contains(&"A senha deve conter pelo menos um caractere especial"));

        let curta = validar_senha("Ab@1");
        assert!(curta
            .erros
            .contains(&"A senha deve ter pelo menos 8 caracteres"));
    }

    #[test]
    fn forca_e_apenas_informativa() {
        let fraca = validar_senha("abc");
        assert_eq!(fraca.forca, ForcaSenha::Fraca);

        // Média: cumpre classes mas falha na política não derruba a força.
        let media = validar_senha("abcdefg1");
        assert_eq!(media.forca, ForcaSenha::Media);
        assert!(!media.valida);
    }
}
