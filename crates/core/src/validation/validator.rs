//! The legality validator — pure logic, no database access.
//!
//! Every rule runs on every call; all violations are collected rather than
//! short-circuiting on the first, so the UI can render the full error list.
//! Rules that key on the presence of a card (Assist, Cataclysm, reserve,
//! usability) stay silent on an empty deck; the count rules still report.

use std::collections::BTreeSet;

use regex::Regex;

use crate::cards::{CardCatalog, CardType, PowerType};
use crate::deck::{DeckComposition, MAX_MISSIONS};
use super::rules::{RuleViolation, ValidationReport};

/// Character cards a standard deck must field.
const REQUIRED_CHARACTERS: i32 = 4;

/// Maximum combined threat of the deck's characters.
const MAX_THREAT: i32 = 76;

/// Minimum total deck size.
const MIN_DECK_SIZE: i32 = 51;

/// Minimum total deck size when the deck plays event cards.
const MIN_DECK_SIZE_WITH_EVENTS: i32 = 56;

/// Validate a composition against the full Overpower rule set.
///
/// Non-mutating and deterministic: the same composition and catalog always
/// produce the same report.
pub fn validate(deck: &DeckComposition, catalog: &CardCatalog) -> ValidationReport {
    let mut errors = Vec::new();

    check_character_count(deck, &mut errors);
    check_mission_count_and_set(deck, catalog, &mut errors);
    check_location_count(deck, &mut errors);

    let total_threat = compute_threat(deck, catalog);
    if total_threat > MAX_THREAT {
        errors.push(RuleViolation::new(
            "threat_level",
            format!("Deck threat level must be {MAX_THREAT} or less (found {total_threat})"),
        ));
    }

    check_deck_size(deck, &mut errors);
    check_flagged_specials(deck, catalog, &mut errors);
    check_one_per_deck(deck, catalog, &mut errors);
    check_reserve_character(deck, &mut errors);
    check_special_usability(deck, catalog, &mut errors);
    check_event_mission_sets(deck, catalog, &mut errors);
    check_power_usability(deck, catalog, &mut errors);
    check_universe_usability(deck, catalog, &mut errors);

    ValidationReport {
        is_legal: errors.is_empty(),
        total_threat,
        errors,
    }
}

/// Total threat: every character contributes its base threat, except the
/// reserve character, which contributes base + its reserve bonus.
fn compute_threat(deck: &DeckComposition, catalog: &CardCatalog) -> i32 {
    deck.entries()
        .iter()
        .filter(|e| e.card_type == CardType::Character)
        .filter_map(|e| {
            let card = catalog.character(e.card_id)?;
            let mut threat = card.threat_level;
            if deck.reserve_character() == Some(e.card_id) {
                threat += card.reserve_threat_bonus;
            }
            Some(threat * e.quantity)
        })
        .sum()
}

fn check_character_count(deck: &DeckComposition, errors: &mut Vec<RuleViolation>) {
    let count = deck.quantity_total(CardType::Character);
    if count != REQUIRED_CHARACTERS {
        errors.push(RuleViolation::new(
            "character_count",
            format!("Deck must have exactly {REQUIRED_CHARACTERS} characters (found {count})"),
        ));
    }
}

fn check_mission_count_and_set(
    deck: &DeckComposition,
    catalog: &CardCatalog,
    errors: &mut Vec<RuleViolation>,
) {
    let count = deck.quantity_total(CardType::Mission);
    if count != MAX_MISSIONS {
        errors.push(RuleViolation::new(
            "mission_count",
            format!("Deck must have exactly {MAX_MISSIONS} mission cards (found {count})"),
        ));
        return;
    }

    // Only meaningful once the count is right: all 7 must share one set.
    let sets = mission_sets(deck, catalog);
    if sets.len() > 1 {
        let found = sets.into_iter().collect::<Vec<_>>().join(", ");
        errors.push(RuleViolation::new(
            "mission_set",
            format!("All mission cards must be from the same mission set (found: {found})"),
        ));
    }
}

/// The distinct mission sets represented in the deck, sorted for stable output.
fn mission_sets(deck: &DeckComposition, catalog: &CardCatalog) -> BTreeSet<String> {
    deck.entries()
        .iter()
        .filter(|e| e.card_type == CardType::Mission)
        .filter_map(|e| catalog.mission(e.card_id))
        .map(|m| m.mission_set.clone())
        .collect()
}

fn check_location_count(deck: &DeckComposition, errors: &mut Vec<RuleViolation>) {
    let count = deck.quantity_total(CardType::Location);
    if count > 1 {
        errors.push(RuleViolation::new(
            "location_count",
            format!("Deck may have at most 1 location (found {count})"),
        ));
    }
}

fn check_deck_size(deck: &DeckComposition, errors: &mut Vec<RuleViolation>) {
    let plays_events = deck.quantity_total(CardType::Event) > 0;
    let required = if plays_events {
        MIN_DECK_SIZE_WITH_EVENTS
    } else {
        MIN_DECK_SIZE
    };
    let total = deck.total_cards();
    if total < required {
        errors.push(RuleViolation::new(
            "deck_size",
            format!("Deck must have at least {required} cards (found {total})"),
        ));
    }
}

/// At most one distinct Assist, Cataclysm, and Ambush special, and one
/// Fortification aspect. Counting is by distinct card, mirroring the add
/// guard: extra copies of the same card are governed by one_per_deck.
fn check_flagged_specials(
    deck: &DeckComposition,
    catalog: &CardCatalog,
    errors: &mut Vec<RuleViolation>,
) {
    let mut assists = 0;
    let mut cataclysms = 0;
    let mut ambushes = 0;
    for entry in deck.entries().iter().filter(|e| e.card_type == CardType::Special) {
        if let Some(card) = catalog.special(entry.card_id) {
            if card.is_assist {
                assists += 1;
            }
            if card.is_cataclysm {
                cataclysms += 1;
            }
            if card.is_ambush {
                ambushes += 1;
            }
        }
    }
    if assists > 1 {
        errors.push(RuleViolation::new(
            "assist_limit",
            "Cannot add more than 1 Assist to a deck",
        ));
    }
    if cataclysms > 1 {
        errors.push(RuleViolation::new(
            "cataclysm_limit",
            "Cannot add more than 1 Cataclysm to a deck",
        ));
    }
    if ambushes > 1 {
        errors.push(RuleViolation::new(
            "ambush_limit",
            "Cannot add more than 1 Ambush to a deck",
        ));
    }

    let fortifications = deck
        .entries()
        .iter()
        .filter(|e| e.card_type == CardType::Aspect)
        .filter(|e| catalog.aspect(e.card_id).is_some_and(|a| a.is_fortification))
        .count();
    if fortifications > 1 {
        errors.push(RuleViolation::new(
            "fortification_limit",
            "Cannot add more than 1 Fortification to a deck",
        ));
    }
}

fn check_one_per_deck(
    deck: &DeckComposition,
    catalog: &CardCatalog,
    errors: &mut Vec<RuleViolation>,
) {
    for entry in deck.entries() {
        if entry.quantity > 1 {
            if let Some(name) = catalog.one_per_deck(entry.card_type, entry.card_id) {
                errors.push(RuleViolation::new(
                    "one_per_deck",
                    format!(
                        "\"{name}\" is limited to one per deck (found {})",
                        entry.quantity
                    ),
                ));
            }
        }
    }
}

fn check_reserve_character(deck: &DeckComposition, errors: &mut Vec<RuleViolation>) {
    if let Some(id) = deck.reserve_character() {
        if deck.quantity_of(CardType::Character, id) < 1 {
            errors.push(RuleViolation::new(
                "reserve_character",
                "Reserve character must be a character in the deck",
            ));
        }
    }
}

/// Character-bound specials require their character on the team.
fn check_special_usability(
    deck: &DeckComposition,
    catalog: &CardCatalog,
    errors: &mut Vec<RuleViolation>,
) {
    let team: Vec<&str> = deck
        .entries()
        .iter()
        .filter(|e| e.card_type == CardType::Character)
        .filter_map(|e| catalog.character(e.card_id))
        .map(|c| c.name.as_str())
        .collect();

    for entry in deck.entries().iter().filter(|e| e.card_type == CardType::Special) {
        let Some(card) = catalog.special(entry.card_id) else {
            continue;
        };
        if let Some(owner) = card.character_name.as_deref() {
            if !team.contains(&owner) {
                errors.push(RuleViolation::new(
                    "unusable_special",
                    format!("\"{}\" requires character \"{owner}\" in your team", card.name),
                ));
            }
        }
    }
}

/// Set-bound events require a matching mission set in the deck.
fn check_event_mission_sets(
    deck: &DeckComposition,
    catalog: &CardCatalog,
    errors: &mut Vec<RuleViolation>,
) {
    let sets = mission_sets(deck, catalog);
    for entry in deck.entries().iter().filter(|e| e.card_type == CardType::Event) {
        let Some(card) = catalog.event(entry.card_id) else {
            continue;
        };
        if let Some(required) = card.mission_set.as_deref() {
            if !sets.is_empty() && !sets.contains(required) {
                errors.push(RuleViolation::new(
                    "unusable_event",
                    format!("\"{}\" requires mission set \"{required}\" in your deck", card.name),
                ));
            }
        }
    }
}

/// Whether any team character meets a stat requirement.
fn team_can_use(
    deck: &DeckComposition,
    catalog: &CardCatalog,
    power_type: PowerType,
    value: i32,
) -> bool {
    deck.entries()
        .iter()
        .filter(|e| e.card_type == CardType::Character)
        .filter_map(|e| catalog.character(e.card_id))
        .any(|c| c.stat(power_type) >= value)
}

fn check_power_usability(
    deck: &DeckComposition,
    catalog: &CardCatalog,
    errors: &mut Vec<RuleViolation>,
) {
    for entry in deck.entries().iter().filter(|e| e.card_type == CardType::Power) {
        let Some(card) = catalog.power(entry.card_id) else {
            continue;
        };
        if !team_can_use(deck, catalog, card.power_type, card.value) {
            errors.push(RuleViolation::new(
                "unusable_power",
                format!(
                    "\"{}\" (Power Card) requires a character with {}+ {}",
                    card.name, card.value, card.power_type
                ),
            ));
        }
    }
}

fn check_universe_usability(
    deck: &DeckComposition,
    catalog: &CardCatalog,
    errors: &mut Vec<RuleViolation>,
) {
    // Printed requirements look like "5 Energy" or "6 Any-Power".
    let Ok(requirement) = Regex::new(r"(\d+)\s+(Energy|Combat|Brute Force|Intelligence|Any-Power)")
    else {
        return;
    };

    for entry in deck.entries().iter().filter(|e| e.card_type.is_universe()) {
        let Some(card) = catalog.universe_card(entry.card_type, entry.card_id) else {
            continue;
        };
        let Some(to_use) = card.to_use.as_deref() else {
            continue;
        };
        let Some(caps) = requirement.captures(to_use) else {
            continue;
        };
        let value: i32 = caps[1].parse().unwrap_or(0);
        let Ok(power_type) = caps[2].parse::<PowerType>() else {
            continue;
        };
        if !team_can_use(deck, catalog, power_type, value) {
            errors.push(RuleViolation::new(
                "unusable_universe",
                format!(
                    "\"{}\" (Universe Card) requires a character with {value}+ {power_type}",
                    card.name
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{
        AspectCard, CharacterCard, EventCard, LocationCard, MissionCard, PowerCard, SpecialCard,
        UniverseCard,
    };
    use crate::types::DbId;

    fn character(id: DbId, name: &str, threat: i32, bonus: i32) -> CharacterCard {
        CharacterCard {
            id,
            name: name.to_string(),
            energy: 3,
            combat: 7,
            brute_force: 6,
            intelligence: 5,
            threat_level: threat,
            reserve_threat_bonus: bonus,
        }
    }

    fn special(id: DbId, name: &str) -> SpecialCard {
        SpecialCard {
            id,
            name: name.to_string(),
            character_name: None,
            is_assist: false,
            is_cataclysm: false,
            is_ambush: false,
            one_per_deck: false,
        }
    }

    /// Catalog with the observed reserve-bonus profiles:
    /// Carson of Venus 18 (+1), Morgan le Fay 19 (+1), Victory Harben 18 (+2).
    fn test_catalog() -> CardCatalog {
        let mut catalog = CardCatalog::new();
        catalog.insert_character(character(1, "Carson of Venus", 18, 1));
        catalog.insert_character(character(2, "Morgan le Fay", 19, 1));
        catalog.insert_character(character(3, "Victory Harben", 18, 2));
        catalog.insert_character(character(4, "Tarzan", 18, 0));
        catalog.insert_special(SpecialCard {
            is_assist: true,
            ..special(10, "Mighty Rescue")
        });
        catalog.insert_special(SpecialCard {
            is_assist: true,
            ..special(11, "Timely Aid")
        });
        catalog.insert_special(SpecialCard {
            is_cataclysm: true,
            ..special(12, "Earthquake at Opar")
        });
        catalog.insert_special(SpecialCard {
            is_cataclysm: true,
            ..special(13, "Flood of the Iss")
        });
        catalog.insert_special(SpecialCard {
            character_name: Some("Tarzan".to_string()),
            ..special(14, "King of the Apes")
        });
        catalog.insert_special(special(15, "Vine Swing"));
        for id in 20..27 {
            catalog.insert_mission(MissionCard {
                id,
                name: format!("Barsoom {}", id - 19),
                mission_set: "Barsoom".to_string(),
            });
        }
        catalog.insert_mission(MissionCard {
            id: 27,
            name: "Pellucidar 1".to_string(),
            mission_set: "Pellucidar".to_string(),
        });
        catalog.insert_event(EventCard {
            id: 30,
            name: "Invasion of Helium".to_string(),
            mission_set: Some("Barsoom".to_string()),
        });
        catalog.insert_event(EventCard {
            id: 31,
            name: "Inner-World Eruption".to_string(),
            mission_set: Some("Pellucidar".to_string()),
        });
        catalog.insert_location(LocationCard {
            id: 40,
            name: "Opar".to_string(),
            threat_level: 2,
            one_per_deck: false,
        });
        catalog.insert_power(PowerCard {
            id: 50,
            name: "Power 8 Combat".to_string(),
            power_type: PowerType::Combat,
            value: 8,
        });
        catalog.insert_power(PowerCard {
            id: 51,
            name: "Power 5 Combat".to_string(),
            power_type: PowerType::Combat,
            value: 5,
        });
        catalog.insert_aspect(AspectCard {
            id: 60,
            name: "Walled City".to_string(),
            is_fortification: true,
            one_per_deck: false,
        });
        catalog.insert_universe(UniverseCard {
            id: 70,
            name: "Banth Pack".to_string(),
            kind: CardType::AllyUniverse,
            to_use: Some("6 Combat".to_string()),
            one_per_deck: false,
        });
        catalog.insert_universe(UniverseCard {
            id: 71,
            name: "Flier Squadron".to_string(),
            kind: CardType::AllyUniverse,
            to_use: Some("8 Energy".to_string()),
            one_per_deck: false,
        });
        catalog
    }

    fn deck_with(
        catalog: &CardCatalog,
        cards: &[(CardType, DbId, i32)],
    ) -> DeckComposition {
        let mut deck = DeckComposition::new();
        for &(card_type, card_id, quantity) in cards {
            deck.add_card(catalog, card_type, card_id, quantity).unwrap();
        }
        deck
    }

    /// Four characters, seven same-set missions, padded to legal size.
    fn legal_skeleton(catalog: &CardCatalog) -> DeckComposition {
        let mut cards = vec![
            (CardType::Character, 1, 1),
            (CardType::Character, 2, 1),
            (CardType::Character, 3, 1),
            (CardType::Character, 4, 1),
        ];
        for id in 20..27 {
            cards.push((CardType::Mission, id, 1));
        }
        // Pad with a plain special to reach the 51-card minimum.
        cards.push((CardType::Special, 15, 40));
        deck_with(catalog, &cards)
    }

    #[test]
    fn legal_deck_has_no_errors() {
        let catalog = test_catalog();
        let deck = legal_skeleton(&catalog);
        let report = validate(&deck, &catalog);
        assert!(report.is_legal, "unexpected errors: {:?}", report.errors);
        assert_eq!(report.total_threat, 73);
    }

    #[test]
    fn empty_deck_reports_counts_but_never_presence_rules() {
        let catalog = test_catalog();
        let deck = DeckComposition::new();
        let report = validate(&deck, &catalog);

        assert!(!report.is_legal);
        assert!(report.has_rule("character_count"));
        assert!(report.has_rule("mission_count"));
        assert!(report.has_rule("deck_size"));
        assert!(!report.has_rule("assist_limit"));
        assert!(!report.has_rule("cataclysm_limit"));
        assert!(!report.has_rule("reserve_character"));
        assert_eq!(report.total_threat, 0);
    }

    #[test]
    fn all_violations_are_collected_in_one_call() {
        let catalog = test_catalog();
        // Two assists and two cataclysms, no characters or missions.
        let deck = DeckComposition::from_parts(
            vec![
                crate::deck::DeckEntry { card_type: CardType::Special, card_id: 10, quantity: 1 },
                crate::deck::DeckEntry { card_type: CardType::Special, card_id: 11, quantity: 1 },
                crate::deck::DeckEntry { card_type: CardType::Special, card_id: 12, quantity: 1 },
                crate::deck::DeckEntry { card_type: CardType::Special, card_id: 13, quantity: 1 },
            ],
            None,
            false,
        );
        let report = validate(&deck, &catalog);
        assert!(report.has_rule("character_count"));
        assert!(report.has_rule("mission_count"));
        assert!(report.has_rule("assist_limit"));
        assert!(report.has_rule("cataclysm_limit"));

        let assist = report.errors.iter().find(|e| e.rule == "assist_limit").unwrap();
        assert_eq!(assist.message, "Cannot add more than 1 Assist to a deck");
        let cataclysm = report
            .errors
            .iter()
            .find(|e| e.rule == "cataclysm_limit")
            .unwrap();
        assert_eq!(cataclysm.message, "Cannot add more than 1 Cataclysm to a deck");
    }

    #[test]
    fn mixed_mission_sets_are_rejected() {
        let catalog = test_catalog();
        let mut deck = DeckComposition::new();
        for id in 20..26 {
            deck.add_card(&catalog, CardType::Mission, id, 1).unwrap();
        }
        deck.add_card(&catalog, CardType::Mission, 27, 1).unwrap();
        let report = validate(&deck, &catalog);
        assert!(report.has_rule("mission_set"));
        let violation = report.errors.iter().find(|e| e.rule == "mission_set").unwrap();
        assert!(violation.message.contains("Barsoom"));
        assert!(violation.message.contains("Pellucidar"));
    }

    #[test]
    fn mission_set_not_checked_when_count_is_wrong() {
        let catalog = test_catalog();
        let deck = deck_with(
            &catalog,
            &[(CardType::Mission, 20, 1), (CardType::Mission, 27, 1)],
        );
        let report = validate(&deck, &catalog);
        assert!(report.has_rule("mission_count"));
        assert!(!report.has_rule("mission_set"));
    }

    #[test]
    fn threat_cap_is_enforced() {
        let catalog = test_catalog();
        let mut deck = legal_skeleton(&catalog);
        // 73 base threat; Victory Harben as reserve adds 2 -> 75, still legal.
        deck.set_reserve_character(Some(3)).unwrap();
        let report = validate(&deck, &catalog);
        assert_eq!(report.total_threat, 75);
        assert!(!report.has_rule("threat_level"));

        // A second catalog with a heavier team breaches the cap.
        let mut heavy = CardCatalog::new();
        for id in 1..=4 {
            heavy.insert_character(character(id, &format!("C{id}"), 20, 0));
        }
        let team = deck_with(
            &heavy,
            &[
                (CardType::Character, 1, 1),
                (CardType::Character, 2, 1),
                (CardType::Character, 3, 1),
                (CardType::Character, 4, 1),
            ],
        );
        let report = validate(&team, &heavy);
        assert_eq!(report.total_threat, 80);
        assert!(report.has_rule("threat_level"));
    }

    #[test]
    fn deck_size_minimum_rises_with_events() {
        let catalog = test_catalog();
        let mut deck = legal_skeleton(&catalog);
        assert!(validate(&deck, &catalog).is_legal);

        // 51 cards + 1 event = 52, below the 56 minimum for event decks.
        deck.add_card(&catalog, CardType::Event, 30, 1).unwrap();
        let report = validate(&deck, &catalog);
        assert!(report.has_rule("deck_size"));
        let violation = report.errors.iter().find(|e| e.rule == "deck_size").unwrap();
        assert!(violation.message.contains("56"));
    }

    #[test]
    fn character_bound_special_needs_its_character() {
        let catalog = test_catalog();
        let deck = deck_with(&catalog, &[(CardType::Special, 14, 1)]);
        let report = validate(&deck, &catalog);
        assert!(report.has_rule("unusable_special"));
        let violation = report
            .errors
            .iter()
            .find(|e| e.rule == "unusable_special")
            .unwrap();
        assert_eq!(
            violation.message,
            "\"King of the Apes\" requires character \"Tarzan\" in your team"
        );

        let mut with_tarzan = deck.clone();
        with_tarzan
            .add_card(&catalog, CardType::Character, 4, 1)
            .unwrap();
        assert!(!validate(&with_tarzan, &catalog).has_rule("unusable_special"));
    }

    #[test]
    fn event_from_wrong_mission_set_is_flagged() {
        let catalog = test_catalog();
        let mut deck = legal_skeleton(&catalog);
        deck.add_card(&catalog, CardType::Event, 31, 1).unwrap();
        let report = validate(&deck, &catalog);
        assert!(report.has_rule("unusable_event"));
    }

    #[test]
    fn power_card_above_every_stat_is_flagged() {
        let catalog = test_catalog();
        let mut deck = legal_skeleton(&catalog);
        deck.add_card(&catalog, CardType::Power, 51, 1).unwrap();
        assert!(!validate(&deck, &catalog).has_rule("unusable_power"));

        deck.add_card(&catalog, CardType::Power, 50, 1).unwrap();
        let report = validate(&deck, &catalog);
        assert!(report.has_rule("unusable_power"));
        let violation = report.errors.iter().find(|e| e.rule == "unusable_power").unwrap();
        assert_eq!(
            violation.message,
            "\"Power 8 Combat\" (Power Card) requires a character with 8+ Combat"
        );
    }

    #[test]
    fn universe_card_to_use_requirement_is_parsed() {
        let catalog = test_catalog();
        let mut deck = legal_skeleton(&catalog);
        deck.add_card(&catalog, CardType::AllyUniverse, 70, 1).unwrap();
        assert!(!validate(&deck, &catalog).has_rule("unusable_universe"));

        deck.add_card(&catalog, CardType::AllyUniverse, 71, 1).unwrap();
        let report = validate(&deck, &catalog);
        assert!(report.has_rule("unusable_universe"));
    }

    // -- Spec scenarios ---------------------------------------------------

    #[test]
    fn scenario_reserve_bonus_applies_only_while_selected() {
        // Threats 18,19,18,18 with Carson of Venus carrying +1 reserve bonus.
        let catalog = test_catalog();
        let mut deck = deck_with(
            &catalog,
            &[
                (CardType::Character, 1, 1),
                (CardType::Character, 2, 1),
                (CardType::Character, 3, 1),
                (CardType::Character, 4, 1),
            ],
        );
        assert_eq!(validate(&deck, &catalog).total_threat, 73);

        deck.set_reserve_character(Some(1)).unwrap();
        assert_eq!(validate(&deck, &catalog).total_threat, 74);
    }

    #[test]
    fn scenario_switching_reserve_moves_the_bonus() {
        // A=Carson(18,+1), B=Morgan(19,+1), C=Victory(18,+2); reserve A -> 56.
        let catalog = test_catalog();
        let mut deck = deck_with(
            &catalog,
            &[
                (CardType::Character, 1, 1),
                (CardType::Character, 2, 1),
                (CardType::Character, 3, 1),
            ],
        );
        deck.set_reserve_character(Some(1)).unwrap();
        assert_eq!(validate(&deck, &catalog).total_threat, 56);

        // Switch reserve to C: 18 + 19 + 20 = 57.
        deck.set_reserve_character(Some(3)).unwrap();
        assert_eq!(validate(&deck, &catalog).total_threat, 57);
    }

    #[test]
    fn validation_is_idempotent_and_non_mutating() {
        let catalog = test_catalog();
        let mut deck = legal_skeleton(&catalog);
        deck.set_reserve_character(Some(3)).unwrap();
        let before = deck.entries().to_vec();

        let first = validate(&deck, &catalog);
        let second = validate(&deck, &catalog);
        assert_eq!(first.total_threat, second.total_threat);
        assert_eq!(first.errors, second.errors);
        assert_eq!(deck.entries(), before.as_slice());
        assert_eq!(deck.reserve_character(), Some(3));
    }

    #[test]
    fn stale_reserve_after_from_parts_is_reported() {
        // Persisted state can carry a reserve id whose character is gone.
        let catalog = test_catalog();
        let deck = DeckComposition::from_parts(Vec::new(), Some(1), false);
        let report = validate(&deck, &catalog);
        assert!(report.has_rule("reserve_character"));
    }

    #[test]
    fn limited_flag_does_not_relax_counting_rules() {
        let catalog = test_catalog();
        let mut deck = DeckComposition::new();
        deck.set_limited(true);
        let report = validate(&deck, &catalog);
        assert!(report.has_rule("character_count"));
        assert!(report.has_rule("mission_count"));
    }
}
