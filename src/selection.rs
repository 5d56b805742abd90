//! Selection resolution and fallback.
//!
//! Validates externally supplied (card, mixer) pairs against the enumerated
//! set and falls back to safe defaults, collecting recoverable warnings along
//! the way. Only a system with no usable control anywhere is fatal.

use crate::mixer::{Card, Selection};
use thiserror::Error;

/// Fatal resolution failures. Each maps to a stable exit code in `cli`.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("No sound card found")]
    NoCard,

    #[error("No usable mixer for card 'hw:{card}'")]
    NoUsableMixer { card: u32 },
}

/// True iff `index` names an enumerated card.
pub fn validate_card(cards: &[Card], index: u32) -> bool {
    cards.iter().any(|c| c.index == index)
}

/// True iff `name` is a usable control of the given card.
pub fn validate_mixer(cards: &[Card], index: u32, name: &str) -> bool {
    cards
        .iter()
        .find(|c| c.index == index)
        .is_some_and(|c| c.control(name).is_some())
}

/// First card (in enumeration order) with at least one usable control.
pub fn default_card(cards: &[Card]) -> Result<&Card, SelectionError> {
    if cards.is_empty() {
        return Err(SelectionError::NoCard);
    }
    cards
        .iter()
        .find(|c| c.has_usable_control())
        .ok_or(SelectionError::NoUsableMixer {
            card: cards[0].index,
        })
}

/// Default control of a card: "Master", else "PCM", else the first usable one.
pub fn default_mixer(card: &Card) -> Result<&str, SelectionError> {
    for preferred in ["Master", "PCM"] {
        if card.control(preferred).is_some() {
            return Ok(preferred);
        }
    }
    card.controls
        .first()
        .map(|c| c.name.as_str())
        .ok_or(SelectionError::NoUsableMixer { card: card.index })
}

/// Resolve a requested (card, mixer) pair into a valid selection.
///
/// Invalid requests degrade with a warning: an unknown or control-less card
/// falls back to the default card, an unknown mixer to the card's default
/// control. Warnings are returned so the caller decides how to surface them.
pub fn resolve(
    cards: &[Card],
    requested_card: Option<u32>,
    requested_mixer: Option<&str>,
) -> Result<(Selection, Vec<String>), SelectionError> {
    let mut warnings = Vec::new();

    let card = match requested_card {
        Some(index) if validate_card(cards, index) => {
            let card = cards.iter().find(|c| c.index == index).unwrap();
            if card.has_usable_control() {
                card
            } else {
                let fallback = default_card(cards)?;
                warnings.push(format!(
                    "No usable mixer for card 'hw:{}', using 'hw:{}' instead",
                    index, fallback.index
                ));
                fallback
            }
        }
        Some(index) => {
            let fallback = default_card(cards)?;
            warnings.push(format!(
                "Unknown card 'hw:{}', using 'hw:{}' instead",
                index, fallback.index
            ));
            fallback
        }
        None => default_card(cards)?,
    };

    let mixer = match requested_mixer {
        Some(name) if card.control(name).is_some() => name.to_string(),
        Some(name) => {
            let fallback = default_mixer(card)?;
            warnings.push(format!(
                "Unknown or unusable mixer '{}' for card 'hw:{}', using '{}' instead",
                name, card.index, fallback
            ));
            fallback.to_string()
        }
        None => default_mixer(card)?.to_string(),
    };

    Ok((Selection::new(card.index, mixer), warnings))
}

/// Resolve a `--card=<name>` argument to a card index.
pub fn card_index_by_name(cards: &[Card], name: &str) -> Option<u32> {
    cards.iter().find(|c| c.name == name).map(|c| c.index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixer::MixerControl;

    fn control(name: &str) -> MixerControl {
        MixerControl {
            name: name.to_string(),
        }
    }

    fn fixture() -> Vec<Card> {
        vec![
            Card {
                index: 0,
                name: "HDA Intel".to_string(),
                controls: vec![control("Master"), control("PCM"), control("Headphone")],
            },
            Card {
                index: 1,
                name: "HDMI".to_string(),
                controls: Vec::new(),
            },
            Card {
                index: 2,
                name: "USB Audio".to_string(),
                controls: vec![control("Speaker")],
            },
        ]
    }

    #[test]
    fn validates_cards_by_real_index() {
        let cards = fixture();
        assert!(validate_card(&cards, 0));
        assert!(validate_card(&cards, 2));
        assert!(!validate_card(&cards, 9));
    }

    #[test]
    fn validates_mixers_per_card() {
        let cards = fixture();
        assert!(validate_mixer(&cards, 0, "PCM"));
        assert!(!validate_mixer(&cards, 0, "Speaker"));
        assert!(!validate_mixer(&cards, 1, "Master"));
    }

    #[test]
    fn default_mixer_prefers_master_then_pcm_then_first() {
        let cards = fixture();
        assert_eq!(default_mixer(&cards[0]).unwrap(), "Master");
        assert_eq!(default_mixer(&cards[2]).unwrap(), "Speaker");

        let pcm_only = Card {
            index: 5,
            name: "x".to_string(),
            controls: vec![control("Headphone"), control("PCM")],
        };
        assert_eq!(default_mixer(&pcm_only).unwrap(), "PCM");
    }

    #[test]
    fn out_of_range_card_falls_back_with_warning() {
        let cards = fixture();
        let (sel, warnings) = resolve(&cards, Some(9), None).unwrap();
        assert_eq!(sel, Selection::new(0, "Master"));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Unknown card"));
    }

    #[test]
    fn card_without_controls_falls_back_with_warning() {
        let cards = fixture();
        let (sel, warnings) = resolve(&cards, Some(1), None).unwrap();
        assert_eq!(sel.card, 0);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("No usable mixer"));
    }

    #[test]
    fn unknown_mixer_falls_back_to_default_control() {
        let cards = fixture();
        let (sel, warnings) = resolve(&cards, Some(0), Some("Nonexistent")).unwrap();
        assert_eq!(sel, Selection::new(0, "Master"));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn valid_request_resolves_without_warnings() {
        let cards = fixture();
        let (sel, warnings) = resolve(&cards, Some(2), Some("Speaker")).unwrap();
        assert_eq!(sel, Selection::new(2, "Speaker"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn empty_card_list_is_fatal() {
        assert!(matches!(resolve(&[], None, None), Err(SelectionError::NoCard)));
    }

    #[test]
    fn all_cards_unusable_is_fatal() {
        let cards = vec![Card {
            index: 0,
            name: "dead".to_string(),
            controls: Vec::new(),
        }];
        assert!(matches!(
            resolve(&cards, None, None),
            Err(SelectionError::NoUsableMixer { card: 0 })
        ));
    }

    #[test]
    fn resolves_card_by_name() {
        let cards = fixture();
        assert_eq!(card_index_by_name(&cards, "USB Audio"), Some(2));
        assert_eq!(card_index_by_name(&cards, "nope"), None);
    }
}
