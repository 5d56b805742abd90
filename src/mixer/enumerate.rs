//! Sound card and mixer control discovery.
//!
//! Enumerates ALSA cards once at startup and keeps, per card, only the
//! controls that expose both playback volume and a playback mute switch and
//! answered a volume and a mute query without error.

use super::card::{Card, MixerControl, MixerError};
use alsa::mixer::{Mixer, Selem, SelemChannelId};
use tracing::debug;

/// Enumerate all cards with their usable mixer controls.
///
/// An empty result means the audio subsystem genuinely reported no cards;
/// callers treat that as fatal. Cards whose mixer device cannot be opened
/// are kept with an empty control list so their index stays visible in
/// `--card-list` output.
pub fn enumerate_cards() -> Result<Vec<Card>, MixerError> {
    let mut cards = Vec::new();

    for card in alsa::card::Iter::new() {
        let card = card.map_err(MixerError::Unavailable)?;
        let index = card.get_index() as u32;
        let name = card
            .get_name()
            .unwrap_or_else(|_| format!("card{}", index));

        let controls = match usable_controls(index) {
            Ok(controls) => controls,
            Err(e) => {
                debug!(card = index, error = %e, "skipping unreadable mixer device");
                Vec::new()
            }
        };

        cards.push(Card {
            index,
            name,
            controls,
        });
    }

    Ok(cards)
}

/// Collect the usable simple elements of one card, in enumeration order.
fn usable_controls(card_index: u32) -> Result<Vec<MixerControl>, MixerError> {
    let mixer = Mixer::new(&format!("hw:{}", card_index), false)?;
    let mut controls = Vec::new();

    for elem in mixer.iter() {
        let Some(selem) = Selem::new(elem) else {
            continue;
        };
        if !selem.has_playback_volume() || !selem.has_playback_switch() {
            continue;
        }
        // Both axes must actually answer, not just advertise the capability
        if selem.get_playback_volume(SelemChannelId::FrontLeft).is_err()
            || selem.get_playback_switch(SelemChannelId::FrontLeft).is_err()
        {
            continue;
        }
        let name = match selem.get_id().get_name() {
            Ok(name) => name.to_string(),
            Err(_) => continue,
        };
        controls.push(MixerControl { name });
    }

    Ok(controls)
}
