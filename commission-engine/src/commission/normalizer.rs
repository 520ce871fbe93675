//! Product Name Normalizer
//!
//! Maps free-text product labels typed into lead forms to the canonical
//! keys used by the rule configuration.

use std::collections::HashMap;

/// Canonical keys for the broker products most rule sets configure
pub const PRODUCT_PIX_CARTAO: &str = "CREDITO PIX/CARTAO";
pub const PRODUCT_FGTS: &str = "ANTECIPACAO FGTS";
pub const PRODUCT_INSS: &str = "CONSIGNADO INSS";
pub const PRODUCT_CLT: &str = "CONSIGNADO CLT";
pub const PRODUCT_PORTABILIDADE: &str = "PORTABILIDADE";
pub const PRODUCT_REFINANCIAMENTO: &str = "REFINANCIAMENTO";

const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("PIX", PRODUCT_PIX_CARTAO),
    ("CARTAO", PRODUCT_PIX_CARTAO),
    ("CREDITO PIX", PRODUCT_PIX_CARTAO),
    ("CREDITO CARTAO", PRODUCT_PIX_CARTAO),
    ("PIX/CARTAO", PRODUCT_PIX_CARTAO),
    ("FGTS", PRODUCT_FGTS),
    ("SAQUE ANIVERSARIO", PRODUCT_FGTS),
    ("SAQUE ANIVERSARIO FGTS", PRODUCT_FGTS),
    ("INSS", PRODUCT_INSS),
    ("CONSIGNADO", PRODUCT_INSS),
    ("CLT", PRODUCT_CLT),
    ("CONSIGNADO PRIVADO", PRODUCT_CLT),
    ("PORT", PRODUCT_PORTABILIDADE),
    ("REFIN", PRODUCT_REFINANCIAMENTO),
];

/// Free-text label -> canonical product key
#[derive(Debug, Clone)]
pub struct ProductNormalizer {
    aliases: HashMap<String, String>,
}

impl Default for ProductNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductNormalizer {
    /// Normalizer with the built-in alias table
    pub fn new() -> Self {
        let aliases = BUILTIN_ALIASES
            .iter()
            .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
            .collect();
        Self { aliases }
    }

    /// Built-in aliases extended (or overridden) by `extra`
    pub fn with_aliases<I, K, V>(extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut normalizer = Self::new();
        for (alias, canonical) in extra {
            let (Some(alias), Some(canonical)) =
                (clean(alias.as_ref()), clean(canonical.as_ref()))
            else {
                tracing::warn!(alias = alias.as_ref(), "Ignoring empty product alias");
                continue;
            };
            // An alias may point at another alias ("REFIN"); store the final key
            let canonical = normalizer.aliases.get(&canonical).cloned().unwrap_or(canonical);
            normalizer.aliases.insert(alias, canonical);
        }
        normalizer
    }

    /// Canonical key for `label`, or `None` when the label is blank.
    ///
    /// Unknown labels pass through in cleaned form.
    pub fn normalize(&self, label: &str) -> Option<String> {
        let cleaned = clean(label)?;
        Some(self.aliases.get(&cleaned).cloned().unwrap_or(cleaned))
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }
}

/// Uppercase, strip diacritics, collapse whitespace, tighten slashes
fn clean(label: &str) -> Option<String> {
    let folded: String = label.chars().map(fold_char).collect();
    let collapsed = folded.split_whitespace().collect::<Vec<_>>().join(" ");
    let tightened = collapsed.replace(" /", "/").replace("/ ", "/");
    (!tightened.is_empty()).then_some(tightened)
}

fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' | 'Ç' => 'C',
        'ñ' | 'Ñ' => 'N',
        '_' | '-' => ' ',
        other => other.to_ascii_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_accents_and_case() {
        let n = ProductNormalizer::new();
        assert_eq!(
            n.normalize("  Crédito  Pix / Cartão ").as_deref(),
            Some(PRODUCT_PIX_CARTAO)
        );
        assert_eq!(n.normalize("consignado inss").as_deref(), Some(PRODUCT_INSS));
    }

    #[test]
    fn test_aliases_map_to_canonical() {
        let n = ProductNormalizer::new();
        assert_eq!(n.normalize("pix").as_deref(), Some(PRODUCT_PIX_CARTAO));
        assert_eq!(
            n.normalize("Saque-Aniversário").as_deref(),
            Some(PRODUCT_FGTS)
        );
    }

    #[test]
    fn test_unknown_label_passes_through_cleaned() {
        let n = ProductNormalizer::new();
        assert_eq!(
            n.normalize("seguro   prestamista").as_deref(),
            Some("SEGURO PRESTAMISTA")
        );
    }

    #[test]
    fn test_blank_label_is_none() {
        let n = ProductNormalizer::new();
        assert_eq!(n.normalize(""), None);
        assert_eq!(n.normalize("   \t"), None);
    }

    #[test]
    fn test_custom_aliases_override_builtin() {
        let n = ProductNormalizer::with_aliases([("pix", "pix avulso"), ("", "x")]);
        assert_eq!(n.normalize("PIX").as_deref(), Some("PIX AVULSO"));
        assert_eq!(n.alias_count(), BUILTIN_ALIASES.len());
    }

    #[test]
    fn test_custom_alias_follows_builtin_alias() {
        let n = ProductNormalizer::with_aliases([("Refinanciamento de veículo", "refin")]);
        assert_eq!(
            n.normalize("refinanciamento de veiculo").as_deref(),
            Some(PRODUCT_REFINANCIAMENTO)
        );
    }
}
