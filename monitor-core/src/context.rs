//! Per-cycle fetch context derived from the symbol universe

use serde::{Deserialize, Serialize};

/// What a single fetch cycle queries.
///
/// Built once per cycle from the ordered symbol list; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchContext {
    /// Keywords for the keyword-search adapter, in symbol order
    pub keywords: Vec<String>,
    /// Exchange-suffixed tickers for the symbol adapter, in symbol order
    pub symbols: Vec<String>,
    /// RSS/Atom feed URLs
    pub feeds: Vec<String>,
}

impl FetchContext {
    /// Derive the working sets from an ordered symbol list.
    ///
    /// Keywords are the first `keyword_limit` symbols; tickers are the first
    /// `symbol_limit` symbols with `exchange_suffix` appended (unless already
    /// present). Blank symbols are skipped.
    pub fn from_symbols(
        symbols: &[String],
        keyword_limit: usize,
        symbol_limit: usize,
        exchange_suffix: &str,
        feeds: &[String],
    ) -> Self {
        let cleaned: Vec<&str> = symbols
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        let keywords = cleaned
            .iter()
            .take(keyword_limit)
            .map(|s| s.to_string())
            .collect();

        let symbols = cleaned
            .iter()
            .take(symbol_limit)
            .map(|s| {
                if exchange_suffix.is_empty() || s.ends_with(exchange_suffix) {
                    s.to_string()
                } else {
                    format!("{}{}", s, exchange_suffix)
                }
            })
            .collect();

        Self {
            keywords,
            symbols,
            feeds: feeds.to_vec(),
        }
    }

    /// Company tag shared by every article of the symbol batch
    pub fn joined_symbols(&self) -> String {
        self.symbols.join(", ")
    }

    /// True when there are no companies to query (feeds may still be fetched)
    pub fn has_companies(&self) -> bool {
        !self.keywords.is_empty() || !self.symbols.is_empty()
    }
}
