//! Command line grammar and exit codes.
//!
//! Arguments are scanned left to right into an `Options` value; later flags
//! override earlier ones. The grammar follows the traditional form: a bare
//! `0..100` sets the volume, `+N`/`-N` adjust it, `mute`/`+mute`/`-mute`
//! toggle or force the mute switch, and `+flag`/`-flag` pairs switch
//! features on and off.

use crate::mixer::{MuteOp, VolumeOp};
use thiserror::Error;

/// Stable process exit codes, one per failure condition.
pub mod exit_code {
    /// Success, `--help`, and the list commands.
    pub const OK: i32 = 0;
    /// Unrecognized command line option.
    pub const USAGE: i32 = 1;
    /// ALSA unavailable, or a device read/write failed during a CLI action.
    pub const NO_ALSA: i32 = 2;
    /// Explicitly named mixer does not exist (list context).
    pub const UNKNOWN_MIXER: i32 = 3;
    /// Explicitly named card does not exist.
    pub const UNKNOWN_CARD: i32 = 4;
    /// The GUI toolkit could not be initialized.
    pub const NO_GUI: i32 = 5;
    /// The selected card has no usable mixer control.
    pub const UNUSABLE_MIXER: i32 = 6;
    /// The system reported no sound card at all.
    pub const NO_CARD: i32 = 7;
}

/// A `--card=` argument before resolution against the enumerated cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardArg {
    /// `--card=2`, `--card=hw:2`, `--card=hw2`
    Index(u32),

    /// `--card=<name>`: resolved (or rejected) against card names
    Name(String),
}

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub volume: Option<VolumeOp>,
    pub mute: Option<MuteOp>,
    pub mixer: Option<String>,
    pub card: Option<CardArg>,

    /// `Some(true)` forces the tray after a CLI action, `Some(false)`
    /// suppresses it; `None` means tray only when no action was given.
    pub tray: Option<bool>,

    /// One-shot notification override for this invocation.
    pub notify: Option<bool>,

    pub debug: bool,
    pub list_mixers: bool,
    pub list_cards: bool,
    pub help: bool,
}

impl Options {
    /// True when a volume or mute operand was given; the process then
    /// performs one read-modify-write cycle instead of defaulting to the GUI.
    pub fn has_cli_action(&self) -> bool {
        self.volume.is_some() || self.mute.is_some()
    }

    /// Whether to run the GUI for this invocation.
    pub fn wants_gui(&self) -> bool {
        self.tray.unwrap_or(!self.has_cli_action())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("Invalid option '{0}'")]
    InvalidOption(String),
}

/// Parse the arguments (without the program name).
pub fn parse<I, S>(args: I) -> Result<Options, CliError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut opts = Options::default();

    for arg in args {
        let arg = arg.as_ref();
        match arg {
            "+tray" | "--tray" => opts.tray = Some(true),
            "-tray" => opts.tray = Some(false),
            "+debug" | "--debug" => opts.debug = true,
            "-debug" => opts.debug = false,
            "+notify" | "--notify" => opts.notify = Some(true),
            "-notify" => opts.notify = Some(false),
            "mute" => opts.mute = Some(MuteOp::Toggle),
            "+mute" => opts.mute = Some(MuteOp::Mute),
            "-mute" => opts.mute = Some(MuteOp::Unmute),
            "--mixer-list" | "--mixers-list" | "--list-mixer" | "--list-mixers" => {
                opts.list_mixers = true
            }
            "--card-list" | "--cards-list" | "--list-card" | "--list-cards" => {
                opts.list_cards = true
            }
            "-h" | "--help" | "-?" => opts.help = true,
            _ => {
                if let Some(op) = parse_volume(arg) {
                    opts.volume = Some(op);
                } else if let Some(value) = arg.strip_prefix("--mixer=") {
                    if !value.is_empty() && value.chars().all(|c| c.is_alphanumeric()) {
                        opts.mixer = Some(value.to_string());
                    } else {
                        return Err(CliError::InvalidOption(arg.to_string()));
                    }
                } else if let Some(value) = arg.strip_prefix("--card=") {
                    match parse_card(value) {
                        Some(card) => opts.card = Some(card),
                        None => return Err(CliError::InvalidOption(arg.to_string())),
                    }
                } else {
                    return Err(CliError::InvalidOption(arg.to_string()));
                }
            }
        }
    }

    Ok(opts)
}

/// `N`, `+N` or `-N` with `N` in `0..=100`.
fn parse_volume(arg: &str) -> Option<VolumeOp> {
    let (sign, digits) = match arg.as_bytes().first()? {
        b'+' => (Some(1), &arg[1..]),
        b'-' => (Some(-1), &arg[1..]),
        _ => (None, arg),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: i32 = digits.parse().ok()?;
    if value > 100 {
        return None;
    }
    match sign {
        Some(s) => Some(VolumeOp::Relative(s * value)),
        None => Some(VolumeOp::Absolute(value)),
    }
}

/// The value of a `--card=` argument.
fn parse_card(value: &str) -> Option<CardArg> {
    if value.is_empty() {
        return None;
    }
    if let Ok(index) = value.parse::<u32>() {
        return Some(CardArg::Index(index));
    }
    let lower = value.to_ascii_lowercase();
    for prefix in ["hw:", "hw"] {
        if let Some(rest) = lower.strip_prefix(prefix) {
            if let Ok(index) = rest.parse::<u32>() {
                return Some(CardArg::Index(index));
            }
        }
    }
    if value.chars().all(|c| c.is_alphanumeric()) {
        return Some(CardArg::Name(value.to_string()));
    }
    None
}

/// Usage text for `--help` and usage errors.
pub const USAGE: &str = "\
alsa-tray - tray icon and CLI for ALSA mixer volume

SYNOPSIS:
    alsa-tray [options]
    alsa-tray [options] [+|-]<value>
    alsa-tray [options] [+|-]mute

VOLUME:
    <value>          set the volume (0..100)
    +<value>         increase the volume
    -<value>         decrease the volume

MUTE:
    mute             toggle mute
    +mute            mute
    -mute            unmute

OPTIONS:
    --card=<card>    select a card by index (N or hw:N) or by name
    --mixer=<name>   select a mixer by name
    --card-list      list the available cards
    --mixer-list     list the usable mixers of the selected card
    +tray, --tray    run in the systray (also after a CLI action)
    -tray            do not run in the systray
    +notify, --notify
                     show a desktop notification for this invocation
    -notify          never show a notification
    +debug, --debug  print diagnostic information
    -h, --help, -?   show this help
";

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(args: &[&str]) -> Options {
        parse(args.iter().copied()).unwrap()
    }

    #[test]
    fn bare_integer_is_an_absolute_set() {
        let opts = parse_ok(&["42"]);
        assert_eq!(opts.volume, Some(VolumeOp::Absolute(42)));
        assert!(opts.has_cli_action());
        assert!(!opts.wants_gui());
    }

    #[test]
    fn signed_integers_are_relative() {
        assert_eq!(parse_ok(&["+5"]).volume, Some(VolumeOp::Relative(5)));
        assert_eq!(parse_ok(&["-10"]).volume, Some(VolumeOp::Relative(-10)));
        assert_eq!(parse_ok(&["+100"]).volume, Some(VolumeOp::Relative(100)));
    }

    #[test]
    fn out_of_range_volume_is_rejected() {
        assert!(parse(["101"]).is_err());
        assert!(parse(["+101"]).is_err());
        assert!(parse(["1000"]).is_err());
    }

    #[test]
    fn mute_variants() {
        assert_eq!(parse_ok(&["mute"]).mute, Some(MuteOp::Toggle));
        assert_eq!(parse_ok(&["+mute"]).mute, Some(MuteOp::Mute));
        assert_eq!(parse_ok(&["-mute"]).mute, Some(MuteOp::Unmute));
    }

    #[test]
    fn mixer_and_card_selection() {
        let opts = parse_ok(&["--mixer=PCM", "--card=hw:1"]);
        assert_eq!(opts.mixer.as_deref(), Some("PCM"));
        assert_eq!(opts.card, Some(CardArg::Index(1)));

        assert_eq!(parse_ok(&["--card=2"]).card, Some(CardArg::Index(2)));
        assert_eq!(
            parse_ok(&["--card=Intel"]).card,
            Some(CardArg::Name("Intel".to_string()))
        );
    }

    #[test]
    fn later_flags_win() {
        let opts = parse_ok(&["+notify", "-notify", "-tray", "+tray", "10", "50"]);
        assert_eq!(opts.notify, Some(false));
        assert_eq!(opts.tray, Some(true));
        assert_eq!(opts.volume, Some(VolumeOp::Absolute(50)));
    }

    #[test]
    fn bare_invocation_defaults_to_gui() {
        let opts = parse_ok(&[]);
        assert!(!opts.has_cli_action());
        assert!(opts.wants_gui());
    }

    #[test]
    fn forced_tray_after_cli_action() {
        let opts = parse_ok(&["+tray", "+mute", "80"]);
        assert!(opts.has_cli_action());
        assert!(opts.wants_gui());
    }

    #[test]
    fn list_and_help_flags() {
        assert!(parse_ok(&["--mixer-list"]).list_mixers);
        assert!(parse_ok(&["--list-cards"]).list_cards);
        assert!(parse_ok(&["-?"]).help);
        assert!(parse_ok(&["--help"]).help);
    }

    #[test]
    fn debug_can_be_switched_back_off() {
        assert!(parse_ok(&["+debug"]).debug);
        assert!(!parse_ok(&["+debug", "-debug"]).debug);
    }

    #[test]
    fn unknown_options_are_errors() {
        assert_eq!(
            parse(["--frobnicate"]),
            Err(CliError::InvalidOption("--frobnicate".to_string()))
        );
        assert!(parse(["--mixer=has space"]).is_err());
        assert!(parse(["--card="]).is_err());
    }
}
