//! Deterministic local enrichment of the fetched catalog.
//!
//! A previous revision delegated this to the LLM; the local pass is preferred
//! for predictability and cost.

pub mod color;
pub mod title;

pub use color::{classify, DEFAULT_HEX};
pub use title::normalize;

use crate::catalog::models::{Catalog, EnrichedCatalog, EnrichedListing, Listing};

/// Enriches every listing with a canonical title and a palette swatch.
/// Order and cardinality are preserved exactly. The classifier reads the
/// original title, not the normalized one: normalization can drop color
/// words (the " - " rule keeps a single token) that the palette still knows.
pub fn enrich(catalog: Catalog) -> EnrichedCatalog {
    EnrichedCatalog {
        atualizado_em: catalog.atualizado_em,
        cotacao_dolar: catalog.cotacao_dolar,
        total_produtos: catalog.total_produtos,
        produtos: catalog.produtos.into_iter().map(enrich_listing).collect(),
    }
}

fn enrich_listing(listing: Listing) -> EnrichedListing {
    let cor_hex = color::classify(&listing.anuncio).to_string();

    EnrichedListing {
        anuncio: title::normalize(&listing.anuncio),
        loja: listing.loja,
        valor_dolar: listing.valor_dolar,
        preco_custo: listing.preco_custo,
        preco_venda: listing.preco_venda,
        cor_hex,
    }
}
