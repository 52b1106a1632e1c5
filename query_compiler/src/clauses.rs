//! Clause assembly for the map-modifier query
//!
//! Each clause is one quoted segment of the final string. Clauses are joined
//! in a fixed order: exclusion, inclusion, quantity, pack size, rarity, bonus.

use crate::range::{simplify_classes, NumericSetting};
use crate::settings::{MapSettings, RaritySettings};
use search_common::{FragmentSource, ModifierCatalog, Result};

pub const QUANTITY_PREFIX: &str = "m q.*";
pub const PACK_SIZE_PREFIX: &str = "iz.*";

const DENY_ALL_RARITIES: &str = r#""!y: (n|m|r)""#;

/// Builds query strings against a pair of modifier catalogs
pub struct ClauseBuilder<'a> {
    map_mods: &'a ModifierCatalog,
    bonus_mods: &'a ModifierCatalog,
}

impl<'a> ClauseBuilder<'a> {
    pub fn new(map_mods: &'a ModifierCatalog, bonus_mods: &'a ModifierCatalog) -> Self {
        Self {
            map_mods,
            bonus_mods,
        }
    }

    /// Compile the complete query for `settings`.
    ///
    /// Fails only when a selected modifier key is missing from its catalog.
    pub fn build(&self, settings: &MapSettings) -> Result<String> {
        let clauses = [
            self.exclusion_clause(&settings.bad_mods)?,
            self.inclusion_clause(&settings.good_mods, settings.all_good_mods)?,
            numeric_clause(QUANTITY_PREFIX, &settings.quantity),
            numeric_clause(PACK_SIZE_PREFIX, &settings.packsize),
            rarity_clause(&settings.rarity),
            self.bonus_clause(&settings.bonus_mods)?,
        ];

        let query = simplify_classes(&collapse_whitespace(&clauses.join(" ")));
        log::debug!("Compiled query ({} chars): {}", query.chars().count(), query);
        Ok(query)
    }

    /// `"!a|b|c"` for the modifiers that must not appear
    pub fn exclusion_clause(&self, keys: &[String]) -> Result<String> {
        if keys.is_empty() {
            return Ok(String::new());
        }
        let fragments = lookup(self.map_mods, keys)?;
        Ok(format!("\"!{}\"", fragments.join("|")))
    }

    /// Either one OR clause `"a|b"`, or with `require_all` a space separated
    /// list of tokens, each quoted only if it contains whitespace
    pub fn inclusion_clause(&self, keys: &[String], require_all: bool) -> Result<String> {
        if keys.is_empty() {
            return Ok(String::new());
        }
        let fragments = lookup(self.map_mods, keys)?;

        if require_all {
            let tokens: Vec<String> = fragments
                .iter()
                .map(|fragment| {
                    if fragment.contains(char::is_whitespace) {
                        format!("\"{fragment}\"")
                    } else {
                        fragment.to_string()
                    }
                })
                .collect();
            Ok(tokens.join(" "))
        } else {
            Ok(format!("\"{}\"", fragments.join("|")))
        }
    }

    /// `"(a|b).*ici"` for the selected bonus modifiers
    pub fn bonus_clause(&self, keys: &[String]) -> Result<String> {
        if keys.is_empty() {
            return Ok(String::new());
        }
        let fragments = lookup(self.bonus_mods, keys)?;
        Ok(format!("\"({}).*ici\"", fragments.join("|")))
    }
}

fn lookup<'c, S: FragmentSource>(catalog: &'c S, keys: &[String]) -> Result<Vec<&'c str>> {
    keys.iter().map(|key| catalog.fragment(key)).collect()
}

/// `"<prefix><pattern>%"`, or nothing when the setting is unconstrained
pub fn numeric_clause(prefix: &str, setting: &NumericSetting) -> String {
    let pattern = setting.pattern();
    if pattern.is_empty() {
        return String::new();
    }
    format!("\"{prefix}{pattern}%\"")
}

/// Rarity clause from the three flags and the allow/deny switch
pub fn rarity_clause(rarity: &RaritySettings) -> String {
    if rarity.normal && rarity.magic && rarity.rare {
        return if rarity.include {
            String::new()
        } else {
            DENY_ALL_RARITIES.to_string()
        };
    }

    let codes: Vec<&str> = [(rarity.normal, "n"), (rarity.magic, "m"), (rarity.rare, "r")]
        .into_iter()
        .filter_map(|(selected, code)| selected.then_some(code))
        .collect();
    let negate = if rarity.include { "" } else { "!" };

    match codes.as_slice() {
        [] => String::new(),
        [code] => format!("\"{negate}y: {code}\""),
        _ => format!("\"{negate}y: ({})\"", codes.join("|")),
    }
}

/// Trim, and replace every run of two or more whitespace characters with one space
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = String::new();

    for c in text.trim().chars() {
        if c.is_whitespace() {
            run.push(c);
            continue;
        }
        if run.chars().count() > 1 {
            out.push(' ');
        } else {
            out.push_str(&run);
        }
        run.clear();
        out.push(c);
    }

    out
}

#[cfg(test)]
#[path = "clauses_tests.rs"]
mod tests;
