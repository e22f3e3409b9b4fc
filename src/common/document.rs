use validator::ValidationError;

// Validação de CPF (11 dígitos) e CNPJ (14 dígitos) pelos dígitos
// verificadores. O documento deve vir sem pontuação, como é armazenado.

pub fn is_valid_document(document: &str) -> bool {
    match document.len() {
        11 => is_valid_cpf(document),
        14 => is_valid_cnpj(document),
        _ => false,
    }
}

pub fn is_valid_cpf(document: &str) -> bool {
    let Some(digits) = digit_values(document) else {
        return false;
    };

    // Sequências de um único dígito repetido têm verificadores válidos,
    // mas não são documentos reais.
    if all_same(&digits) {
        return false;
    }

    let dv1 = cpf_check_digit(&digits[..9]);
    let dv2 = cpf_check_digit(&digits[..10]);
    digits[9] == dv1 && digits[10] == dv2
}

pub fn is_valid_cnpj(document: &str) -> bool {
    let Some(digits) = digit_values(document) else {
        return false;
    };

    if all_same(&digits) {
        return false;
    }

    const FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    const SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

    let dv1 = cnpj_check_digit(&digits[..12], &FIRST_WEIGHTS);
    let dv2 = cnpj_check_digit(&digits[..13], &SECOND_WEIGHTS);
    digits[12] == dv1 && digits[13] == dv2
}

// Função usada pelo derive do `validator` nos payloads.
pub fn validate_document(document: &str) -> Result<(), ValidationError> {
    if is_valid_document(document) {
        return Ok(());
    }

    let mut err = ValidationError::new("document");
    err.message = Some("Documento deve ser um CPF (11 dígitos) ou CNPJ (14 dígitos) válido.".into());
    Err(err)
}

fn digit_values(document: &str) -> Option<Vec<u32>> {
    document.chars().map(|c| c.to_digit(10)).collect()
}

fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|pair| pair[0] == pair[1])
}

fn cpf_check_digit(digits: &[u32]) -> u32 {
    let len = digits.len() as u32;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (len + 1 - i as u32))
        .sum();
    let rest = (sum * 10) % 11;
    if rest == 10 { 0 } else { rest }
}

fn cnpj_check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        0 | 1 => 0,
        rest => 11 - rest,
    }
}
