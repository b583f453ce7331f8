//! Process-wide, elastic parser pool.
//!
//! Parsers are expensive to construct (they allocate internal tree-sitter
//! state per language) but cheap to reset, so the pool keeps a free list
//! per [`Language`] rather than constructing a fresh parser per document.
//! Analyzer tasks `acquire` a parser, use it, and `release` it back; the
//! pool never blocks a caller on a parser that already exists, and grows
//! on demand when the free list is empty.

use parking_lot::Mutex;
use tree_sitter::Parser;

use crate::error::ParseError;

/// The two languages this workspace's documents can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// HTML documents, and the host language for embedded module scripts.
    Html,
    /// TypeScript/JavaScript documents, and the language module scripts are
    /// additionally parsed as.
    TypeScript,
    /// TSX/JSX documents.
    Tsx,
}

fn new_parser_for(language: Language) -> Result<Parser, ParseError> {
    let mut parser = Parser::new();
    let ts_language: tree_sitter::Language = match language {
        Language::Html => tree_sitter_html::LANGUAGE.into(),
        Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
    };
    parser
        .set_language(&ts_language)
        .map_err(|_| ParseError::LanguageInit)?;
    Ok(parser)
}

/// A free list of ready-to-use parsers for one [`Language`].
#[derive(Default)]
struct FreeList {
    html: Mutex<Vec<Parser>>,
    typescript: Mutex<Vec<Parser>>,
    tsx: Mutex<Vec<Parser>>,
}

impl FreeList {
    fn lane(&self, language: Language) -> &Mutex<Vec<Parser>> {
        match language {
            Language::Html => &self.html,
            Language::TypeScript => &self.typescript,
            Language::Tsx => &self.tsx,
        }
    }
}

/// Process-wide pool of tree-sitter parsers, one free list per language.
///
/// # Examples
///
/// ```
/// use cem_parser::pool::{Language, ParserPool};
///
/// let pool = ParserPool::new();
/// let parser = pool.acquire(Language::TypeScript).unwrap();
/// pool.release(Language::TypeScript, parser);
/// assert_eq!(pool.idle_count(Language::TypeScript), 1);
/// ```
pub struct ParserPool {
    free: FreeList,
}

impl Default for ParserPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserPool {
    /// Creates an empty pool. Parsers are constructed lazily on first
    /// `acquire` for each language.
    #[must_use]
    pub fn new() -> Self {
        Self {
            free: FreeList::default(),
        }
    }

    /// Pre-warms the pool with `count` parsers per language, matching
    /// [`cem_core::EngineConfig::parser_pool_initial_capacity`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::LanguageInit`] if a parser cannot be
    /// constructed for one of the pool's languages.
    pub fn warm(&self, count: usize) -> Result<(), ParseError> {
        for language in [Language::Html, Language::TypeScript, Language::Tsx] {
            let mut lane = self.free.lane(language).lock();
            for _ in 0..count {
                lane.push(new_parser_for(language)?);
            }
        }
        Ok(())
    }

    /// Acquires a parser configured for `language`, taking one from the
    /// free list if available or constructing a new one otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::LanguageInit`] if a new parser must be
    /// constructed and the language cannot be set on it.
    pub fn acquire(&self, language: Language) -> Result<Parser, ParseError> {
        if let Some(parser) = self.free.lane(language).lock().pop() {
            return Ok(parser);
        }
        new_parser_for(language)
    }

    /// Returns a parser to the free list for `language`.
    pub fn release(&self, language: Language, parser: Parser) {
        self.free.lane(language).lock().push(parser);
    }

    /// Drops all idle parsers for every language. The pool remains usable;
    /// callers under memory pressure may call this between publish cycles.
    pub fn shrink(&self) {
        for language in [Language::Html, Language::TypeScript, Language::Tsx] {
            self.free.lane(language).lock().clear();
        }
    }

    /// The number of idle parsers currently held for `language`. Exposed
    /// for tests and diagnostics, not part of the pool's steady-state
    /// contract.
    #[must_use]
    pub fn idle_count(&self, language: Language) -> usize {
        self.free.lane(language).lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_constructs_when_empty() {
        let pool = ParserPool::new();
        assert_eq!(pool.idle_count(Language::Html), 0);
        let parser = pool.acquire(Language::Html).unwrap();
        pool.release(Language::Html, parser);
        assert_eq!(pool.idle_count(Language::Html), 1);
    }

    #[test]
    fn test_acquire_reuses_released_parser() {
        let pool = ParserPool::new();
        let parser = pool.acquire(Language::TypeScript).unwrap();
        pool.release(Language::TypeScript, parser);
        assert_eq!(pool.idle_count(Language::TypeScript), 1);
        let _reused = pool.acquire(Language::TypeScript).unwrap();
        assert_eq!(pool.idle_count(Language::TypeScript), 0);
    }

    #[test]
    fn test_warm_populates_free_list() {
        let pool = ParserPool::new();
        pool.warm(2).unwrap();
        assert_eq!(pool.idle_count(Language::Html), 2);
        assert_eq!(pool.idle_count(Language::TypeScript), 2);
        assert_eq!(pool.idle_count(Language::Tsx), 2);
    }

    #[test]
    fn test_shrink_drops_idle_parsers() {
        let pool = ParserPool::new();
        pool.warm(3).unwrap();
        pool.shrink();
        assert_eq!(pool.idle_count(Language::TypeScript), 0);
    }

    #[test]
    fn test_languages_are_independent_lanes() {
        let pool = ParserPool::new();
        let html_parser = pool.acquire(Language::Html).unwrap();
        pool.release(Language::Html, html_parser);
        assert_eq!(pool.idle_count(Language::Html), 1);
        assert_eq!(pool.idle_count(Language::TypeScript), 0);
    }
}
