//! Output formatting for the enriched catalog (table, JSON, markdown, CSV).

use crate::catalog::models::{EnrichedCatalog, EnrichedListing};
use crate::config::OutputFormat;

/// Formats the enriched catalog for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the catalog header plus its listings. `live_quote` is the
    /// LLM-sourced rate; it is displayed alongside the catalog's own
    /// reference quote, never merged with it.
    pub fn format_catalog(&self, catalog: &EnrichedCatalog, live_quote: Option<f64>) -> String {
        if self.format == OutputFormat::Json {
            // JSON carries the full downstream contract in one document
            let doc = serde_json::json!({
                "catalog": catalog,
                "liveQuote": live_quote,
            });
            return serde_json::to_string_pretty(&doc).unwrap_or_else(|_| "{}".to_string());
        }

        let mut out = self.header(catalog, live_quote);
        out.push_str("\n\n");
        out.push_str(&self.format_products(&catalog.produtos));
        out
    }

    /// Formats listings only.
    pub fn format_products(&self, products: &[EnrichedListing]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "Nenhum produto encontrado".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_products(products),
            OutputFormat::Table => self.table_products(products),
            OutputFormat::Markdown => self.markdown_products(products),
            OutputFormat::Csv => self.csv_products(products),
        }
    }

    fn header(&self, catalog: &EnrichedCatalog, live_quote: Option<f64>) -> String {
        let live = live_quote.map(format_brl).unwrap_or_else(|| "---".to_string());
        let reference = if catalog.cotacao_dolar > 0.0 {
            format_brl(catalog.cotacao_dolar)
        } else {
            "---".to_string()
        };

        let mut lines = Vec::new();
        if !catalog.atualizado_em.is_empty() {
            lines.push(format!("Última atualização: {}", catalog.atualizado_em));
        }
        lines.push(format!("Dólar Comercial:    {}", live));
        lines.push(format!("Dólar Referência:   {}", reference));

        match self.format {
            OutputFormat::Markdown => lines
                .iter()
                .map(|l| format!("**{}**", l))
                .collect::<Vec<_>>()
                .join("  \n"),
            _ => lines.join("\n"),
        }
    }

    // JSON formatting

    fn json_products(&self, products: &[EnrichedListing]) -> String {
        serde_json::to_string_pretty(products).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_products(&self, products: &[EnrichedListing]) -> String {
        let loja_width = 16;
        let usd_width = 10;
        let brl_width = 13;
        let margin_width = 7;
        let color_width = 7;
        let title_width = 46;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<loja_width$}  {:>usd_width$}  {:>brl_width$}  {:>brl_width$}  {:>brl_width$}  {:>margin_width$}  {:<color_width$}  {}",
            "Loja", "USD", "Custo", "Venda", "Lucro", "Margem", "Cor", "Anúncio"
        ));
        lines.push(format!(
            "{:-<loja_width$}  {:-<usd_width$}  {:-<brl_width$}  {:-<brl_width$}  {:-<brl_width$}  {:-<margin_width$}  {:-<color_width$}  {:-<title_width$}",
            "", "", "", "", "", "", "", ""
        ));

        for product in products {
            lines.push(format!(
                "{:<loja_width$}  {:>usd_width$}  {:>brl_width$}  {:>brl_width$}  {:>brl_width$}  {:>margin_width$}  {:<color_width$}  {}",
                truncate(&product.loja, loja_width),
                format_usd(product.valor_dolar),
                format_brl(product.preco_custo),
                format_brl(product.preco_venda),
                format_brl(product.gross_profit()),
                format!("{:.1}%", product.margin_percent()),
                product.cor_hex,
                truncate(&product.anuncio, title_width),
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} produtos", products.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_products(&self, products: &[EnrichedListing]) -> String {
        let mut lines = Vec::new();

        lines.push("| Loja | Anúncio | USD | Custo | Venda | Lucro | Margem | Cor |".to_string());
        lines.push("|------|---------|-----|-------|-------|-------|--------|-----|".to_string());

        for product in products {
            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} | {:.1}% | `{}` |",
                product.loja,
                truncate(&product.anuncio, 40),
                format_usd(product.valor_dolar),
                format_brl(product.preco_custo),
                format_brl(product.preco_venda),
                format_brl(product.gross_profit()),
                product.margin_percent(),
                product.cor_hex,
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} produtos*", products.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "anuncio,loja,valorDolar,precoCusto,precoVenda,corHex".to_string()
    }

    fn csv_products(&self, products: &[EnrichedListing]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for product in products {
            lines.push(format!(
                "{},{},{},{},{},{}",
                Self::csv_escape(&product.anuncio),
                Self::csv_escape(&product.loja),
                product.valor_dolar,
                product.preco_custo,
                product.preco_venda,
                product.cor_hex,
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

/// Formats a value as pt-BR currency: `R$ 1.234,56`.
pub fn format_brl(value: f64) -> String {
    format_currency(value, "R$ ", '.', ',')
}

/// Formats a value as en-US currency: `$1,234.56`.
pub fn format_usd(value: f64) -> String {
    format_currency(value, "$", ',', '.')
}

fn format_currency(value: f64, symbol: &str, thousands: char, decimal: char) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let digits = (cents / 100).to_string();

    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(thousands);
        }
        grouped.push(ch);
    }

    let formatted = format!("{}{}{}{:02}", symbol, grouped, decimal, cents % 100);
    if negative {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_product() -> EnrichedListing {
        EnrichedListing {
            anuncio: "Apple iPhone 13 128GB Midnight".to_string(),
            loja: "Loja A".to_string(),
            valor_dolar: 450.0,
            preco_custo: 2500.0,
            preco_venda: 3200.0,
            cor_hex: "#2B2B2B".to_string(),
        }
    }

    fn make_test_catalog() -> EnrichedCatalog {
        EnrichedCatalog {
            atualizado_em: "2025-11-30T12:00:00Z".to_string(),
            cotacao_dolar: 5.32,
            total_produtos: 1,
            produtos: vec![make_test_product()],
        }
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(5.87), "R$ 5,87");
        assert_eq!(format_brl(1234.56), "R$ 1.234,56");
        assert_eq!(format_brl(1_234_567.8), "R$ 1.234.567,80");
        assert_eq!(format_brl(-700.0), "-R$ 700,00");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(450.0), "$450.00");
        assert_eq!(format_usd(1234.56), "$1,234.56");
        assert_eq!(format_usd(-12.5), "-$12.50");
    }

    #[test]
    fn test_table_output() {
        let formatter = Formatter::new(OutputFormat::Table);
        let out = formatter.format_products(&[make_test_product()]);

        assert!(out.contains("Loja A"));
        assert!(out.contains("Apple iPhone 13 128GB Midnight"));
        assert!(out.contains("$450.00"));
        assert!(out.contains("R$ 2.500,00"));
        assert!(out.contains("R$ 3.200,00"));
        assert!(out.contains("R$ 700,00"));
        assert!(out.contains("28.0%"));
        assert!(out.contains("#2B2B2B"));
        assert!(out.contains("Total: 1 produtos"));
    }

    #[test]
    fn test_table_empty() {
        let formatter = Formatter::new(OutputFormat::Table);
        assert_eq!(formatter.format_products(&[]), "Nenhum produto encontrado");
    }

    #[test]
    fn test_json_products_roundtrip() {
        let formatter = Formatter::new(OutputFormat::Json);
        let out = formatter.format_products(&[make_test_product()]);

        let parsed: Vec<EnrichedListing> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].cor_hex, "#2B2B2B");
    }

    #[test]
    fn test_json_empty() {
        let formatter = Formatter::new(OutputFormat::Json);
        assert_eq!(formatter.format_products(&[]), "[]");
    }

    #[test]
    fn test_csv_output() {
        let formatter = Formatter::new(OutputFormat::Csv);
        let out = formatter.format_products(&[make_test_product()]);

        let mut lines = out.lines();
        assert_eq!(lines.next().unwrap(), "anuncio,loja,valorDolar,precoCusto,precoVenda,corHex");
        let row = lines.next().unwrap();
        assert!(row.starts_with("Apple iPhone 13 128GB Midnight,Loja A,450,"));
        assert!(row.ends_with("#2B2B2B"));
    }

    #[test]
    fn test_csv_empty_is_header_only() {
        let formatter = Formatter::new(OutputFormat::Csv);
        assert_eq!(formatter.format_products(&[]), formatter.csv_header());
    }

    #[test]
    fn test_csv_escaping() {
        let mut product = make_test_product();
        product.anuncio = "iPhone 13, \"novo\"".to_string();

        let formatter = Formatter::new(OutputFormat::Csv);
        let out = formatter.format_products(&[product]);
        assert!(out.contains("\"iPhone 13, \"\"novo\"\"\""));
    }

    #[test]
    fn test_markdown_output() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let out = formatter.format_products(&[make_test_product()]);

        assert!(out.starts_with("| Loja | Anúncio |"));
        assert!(out.contains("| Loja A |"));
        assert!(out.contains("`#2B2B2B`"));
        assert!(out.contains("*1 produtos*"));
    }

    #[test]
    fn test_catalog_header_with_both_quotes() {
        let formatter = Formatter::new(OutputFormat::Table);
        let out = formatter.format_catalog(&make_test_catalog(), Some(5.87));

        assert!(out.contains("Última atualização: 2025-11-30T12:00:00Z"));
        assert!(out.contains("Dólar Comercial:    R$ 5,87"));
        assert!(out.contains("Dólar Referência:   R$ 5,32"));
    }

    #[test]
    fn test_catalog_header_absent_live_quote() {
        let formatter = Formatter::new(OutputFormat::Table);
        let out = formatter.format_catalog(&make_test_catalog(), None);
        assert!(out.contains("Dólar Comercial:    ---"));
    }

    #[test]
    fn test_catalog_json_contract() {
        let formatter = Formatter::new(OutputFormat::Json);
        let out = formatter.format_catalog(&make_test_catalog(), Some(5.87));

        let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(doc["liveQuote"], 5.87);
        assert_eq!(doc["catalog"]["cotacaoDolar"], 5.32);
        assert_eq!(doc["catalog"]["produtos"][0]["corHex"], "#2B2B2B");
    }

    #[test]
    fn test_truncate_char_safe() {
        let long = "ó".repeat(60);
        let out = truncate(&long, 10);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 10);
    }
}
