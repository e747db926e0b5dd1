//! Element selectors
//!
//! A small subset of CSS selectors, enough to address page sections:
//! type (`h2`), id (`#hero`), classes (`.card.active`), compounds of those
//! (`span.word`) and the descendant combinator (`#reveal-text .word span`).

use smallvec::SmallVec;

use crate::error::{DomError, Result};

/// One compound selector (no combinators)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: SmallVec<[String; 2]>,
}

impl Compound {
    /// Check whether an element with the given identity matches
    pub fn matches(&self, tag: &str, id: Option<&str>, classes: &[String]) -> bool {
        if let Some(t) = &self.tag {
            if !t.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(wanted) = &self.id {
            if id != Some(wanted.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| classes.iter().any(|have| have == c))
    }

    fn parse(text: &str, full: &str) -> Result<Self> {
        let invalid = |reason: &str| DomError::InvalidSelector {
            selector: full.to_string(),
            reason: reason.to_string(),
        };

        let mut compound = Compound::default();
        let mut rest = text;

        // Leading type selector
        let tag_len = rest.find(['#', '.']).unwrap_or(rest.len());
        if tag_len > 0 {
            let tag = &rest[..tag_len];
            if !tag.chars().all(is_ident_char) {
                return Err(invalid("unsupported characters in type selector"));
            }
            compound.tag = Some(tag.to_string());
            rest = &rest[tag_len..];
        }

        while let Some(marker) = rest.chars().next() {
            rest = &rest[1..];
            let len = rest.find(['#', '.']).unwrap_or(rest.len());
            let name = &rest[..len];
            if name.is_empty() || !name.chars().all(is_ident_char) {
                return Err(invalid("expected a name after `#` or `.`"));
            }
            match marker {
                '#' if compound.id.is_some() => return Err(invalid("more than one id")),
                '#' => compound.id = Some(name.to_string()),
                _ => compound.classes.push(name.to_string()),
            }
            rest = &rest[len..];
        }

        Ok(compound)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// A parsed selector: compounds joined by descendant combinators
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    /// Outermost ancestor first, subject last
    parts: Vec<Compound>,
}

impl Selector {
    pub fn parse(text: &str) -> Result<Self> {
        let parts = text
            .split_whitespace()
            .map(|part| Compound::parse(part, text))
            .collect::<Result<Vec<_>>>()?;

        if parts.is_empty() {
            return Err(DomError::InvalidSelector {
                selector: text.to_string(),
                reason: "empty selector".to_string(),
            });
        }

        Ok(Self { parts })
    }

    /// The compound the matched element itself must satisfy
    pub fn subject(&self) -> &Compound {
        // parse() guarantees at least one part
        &self.parts[self.parts.len() - 1]
    }

    /// Ancestor compounds, nearest ancestor first
    pub fn ancestors(&self) -> impl Iterator<Item = &Compound> {
        self.parts.iter().rev().skip(1)
    }
}

impl std::str::FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self> {
        Selector::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compound() {
        let sel = Selector::parse("span.word.visible").unwrap();
        let subject = sel.subject();
        assert_eq!(subject.tag.as_deref(), Some("span"));
        assert_eq!(subject.classes.as_slice(), ["word", "visible"]);
        assert!(subject.id.is_none());
    }

    #[test]
    fn test_parse_descendant_chain() {
        let sel = Selector::parse("#reveal-text  .word span").unwrap();
        assert_eq!(sel.subject().tag.as_deref(), Some("span"));
        let ancestors: Vec<_> = sel.ancestors().collect();
        assert_eq!(ancestors.len(), 2);
        assert_eq!(ancestors[0].classes.as_slice(), ["word"]);
        assert_eq!(ancestors[1].id.as_deref(), Some("reveal-text"));
    }

    #[test]
    fn test_invalid_selectors() {
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse("   ").is_err());
        assert!(Selector::parse("div > p").is_err());
        assert!(Selector::parse("#a#b").is_err());
        assert!(Selector::parse(".").is_err());
    }

    #[test]
    fn test_compound_matching() {
        let sel = Selector::parse("div.card").unwrap();
        let classes = vec!["card".to_string(), "wide".to_string()];
        assert!(sel.subject().matches("DIV", None, &classes));
        assert!(!sel.subject().matches("span", None, &classes));
        assert!(!sel.subject().matches("div", None, &[]));
    }
}
