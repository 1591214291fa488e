//! FLHook constant tables
//!
//! Numeric enumerations shared with the host. The discriminants are part of
//! the host ABI and must never be renumbered.

use std::fmt;

/// FLHook error codes (`HK_ERROR`)
///
/// Returned by host helper functions. `Ok` is the only success value.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HkError {
    Ok = 0,
    PlayerNotLoggedIn = 1,
    CharDoesNotExist = 2,
    CouldNotDecodeCharfile = 3,
    CouldNotEncodeCharfile = 4,
    InvalidBasename = 5,
    UnknownError = 6,
    InvalidClientId = 7,
    InvalidGroupId = 8,
    InvalidIdString = 9,
    InvalidSystem = 10,
    PlayerNotInSpace = 11,
    PlayerNotDocked = 12,
    PlayerNoAdmin = 13,
    WrongXmlSyntax = 14,
    InvalidGood = 15,
    NoCharSelected = 16,
    CharnameAlreadyExists = 17,
    CharnameTooLong = 18,
    CharnameTooShort = 19,
    AmbiguousShortcut = 20,
    NoMatchingPlayer = 21,
    InvalidShortcutString = 22,
    MpNewCharacterFileNotFoundOrInvalid = 23,
    InvalidRepGroup = 24,
    CouldNotGetPath = 25,
    NoTaskkill = 26,
    SystemNoMatch = 27,
    ObjectNoDock = 28,
    CargoWontFit = 29,
    NameNotMatchRestriction = 30,
}

impl HkError {
    /// Every error code in discriminant order
    pub const ALL: [HkError; 31] = [
        Self::Ok,
        Self::PlayerNotLoggedIn,
        Self::CharDoesNotExist,
        Self::CouldNotDecodeCharfile,
        Self::CouldNotEncodeCharfile,
        Self::InvalidBasename,
        Self::UnknownError,
        Self::InvalidClientId,
        Self::InvalidGroupId,
        Self::InvalidIdString,
        Self::InvalidSystem,
        Self::PlayerNotInSpace,
        Self::PlayerNotDocked,
        Self::PlayerNoAdmin,
        Self::WrongXmlSyntax,
        Self::InvalidGood,
        Self::NoCharSelected,
        Self::CharnameAlreadyExists,
        Self::CharnameTooLong,
        Self::CharnameTooShort,
        Self::AmbiguousShortcut,
        Self::NoMatchingPlayer,
        Self::InvalidShortcutString,
        Self::MpNewCharacterFileNotFoundOrInvalid,
        Self::InvalidRepGroup,
        Self::CouldNotGetPath,
        Self::NoTaskkill,
        Self::SystemNoMatch,
        Self::ObjectNoDock,
        Self::CargoWontFit,
        Self::NameNotMatchRestriction,
    ];

    /// Convert a raw host code, returning None for codes the host never issues
    pub fn from_raw(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Turn a raw host return value into a `Result`
    ///
    /// `HKE_OK` maps to `Ok(())`; every other known code is returned as the
    /// error. Unknown codes are reported as [`HkError::UnknownError`].
    pub fn check(code: u32) -> Result<(), HkError> {
        match Self::from_raw(code) {
            Some(Self::Ok) => Ok(()),
            Some(err) => Err(err),
            None => Err(Self::UnknownError),
        }
    }

    /// The host's constant name, e.g. `HKE_INVALID_CLIENT_ID`
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ok => "HKE_OK",
            Self::PlayerNotLoggedIn => "HKE_PLAYER_NOT_LOGGED_IN",
            Self::CharDoesNotExist => "HKE_CHAR_DOES_NOT_EXIST",
            Self::CouldNotDecodeCharfile => "HKE_COULD_NOT_DECODE_CHARFILE",
            Self::CouldNotEncodeCharfile => "HKE_COULD_NOT_ENCODE_CHARFILE",
            Self::InvalidBasename => "HKE_INVALID_BASENAME",
            Self::UnknownError => "HKE_UNKNOWN_ERROR",
            Self::InvalidClientId => "HKE_INVALID_CLIENT_ID",
            Self::InvalidGroupId => "HKE_INVALID_GROUP_ID",
            Self::InvalidIdString => "HKE_INVALID_ID_STRING",
            Self::InvalidSystem => "HKE_INVALID_SYSTEM",
            Self::PlayerNotInSpace => "HKE_PLAYER_NOT_IN_SPACE",
            Self::PlayerNotDocked => "HKE_PLAYER_NOT_DOCKED",
            Self::PlayerNoAdmin => "HKE_PLAYER_NO_ADMIN",
            Self::WrongXmlSyntax => "HKE_WRONG_XML_SYNTAX",
            Self::InvalidGood => "HKE_INVALID_GOOD",
            Self::NoCharSelected => "HKE_NO_CHAR_SELECTED",
            Self::CharnameAlreadyExists => "HKE_CHARNAME_ALREADY_EXISTS",
            Self::CharnameTooLong => "HKE_CHARNAME_TOO_LONG",
            Self::CharnameTooShort => "HKE_CHARNAME_TOO_SHORT",
            Self::AmbiguousShortcut => "HKE_AMBIGUOUS_SHORTCUT",
            Self::NoMatchingPlayer => "HKE_NO_MATCHING_PLAYER",
            Self::InvalidShortcutString => "HKE_INVALID_SHORTCUT_STRING",
            Self::MpNewCharacterFileNotFoundOrInvalid => {
                "HKE_MPNEWCHARACTERFILE_NOT_FOUND_OR_INVALID"
            }
            Self::InvalidRepGroup => "HKE_INVALID_REP_GROUP",
            Self::CouldNotGetPath => "HKE_COULD_NOT_GET_PATH",
            Self::NoTaskkill => "HKE_NO_TASKKILL",
            Self::SystemNoMatch => "HKE_SYSTEM_NO_MATCH",
            Self::ObjectNoDock => "HKE_OBJECT_NO_DOCK",
            Self::CargoWontFit => "HKE_CARGO_WONT_FIT",
            Self::NameNotMatchRestriction => "HKE_NAME_NOT_MATCH_RESTRICTION",
        }
    }
}

impl fmt::Display for HkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), *self as u32)
    }
}

impl std::error::Error for HkError {}

/// Plugin return codes (`PLUGIN_RETURNCODE`)
///
/// Tells the host how to continue after a plugin handler returns.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PluginReturnCode {
    /// No special handling, call other plugins and the original function
    #[default]
    Default = 0,

    /// Skip the remaining plugins
    SkipPlugins = 1,

    /// Skip the remaining plugins and suppress the original call
    SkipPluginsNoFunctionCall = 2,

    /// Suppress the original call only
    NoFunctionCall = 3,
}

impl PluginReturnCode {
    /// Map a handler's integer result to a return code
    ///
    /// Anything outside 1..=3 means "no special handling".
    pub const fn from_raw(code: u32) -> Self {
        match code {
            1 => Self::SkipPlugins,
            2 => Self::SkipPluginsNoFunctionCall,
            3 => Self::NoFunctionCall,
            _ => Self::Default,
        }
    }

    /// Raw value as passed back to the host
    pub const fn raw(self) -> u32 {
        self as u32
    }
}

/// Ship engine state (`ENGINE_STATE`)
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    Cruise = 0,
    Thruster = 1,
    Engine = 2,
    Killed = 3,
    Tradelane = 4,
}

impl EngineState {
    pub fn from_raw(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Cruise),
            1 => Some(Self::Thruster),
            2 => Some(Self::Engine),
            3 => Some(Self::Killed),
            4 => Some(Self::Tradelane),
            _ => None,
        }
    }
}

/// Equipment type (`EQ_TYPE`)
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipmentType {
    Gun = 0,
    Torpedo = 1,
    /// Cruise disruptor
    Cd = 2,
    Missile = 3,
    Mine = 4,
    /// Countermeasure
    Cm = 5,
    ShieldGen = 6,
    Thruster = 7,
    ShieldBat = 8,
    Nanobot = 9,
    Munition = 10,
    Engine = 11,
    Other = 12,
    Scanner = 13,
    Tractor = 14,
    Light = 15,
}

impl EquipmentType {
    pub fn from_raw(code: u32) -> Option<Self> {
        let ty = match code {
            0 => Self::Gun,
            1 => Self::Torpedo,
            2 => Self::Cd,
            3 => Self::Missile,
            4 => Self::Mine,
            5 => Self::Cm,
            6 => Self::ShieldGen,
            7 => Self::Thruster,
            8 => Self::ShieldBat,
            9 => Self::Nanobot,
            10 => Self::Munition,
            11 => Self::Engine,
            12 => Self::Other,
            13 => Self::Scanner,
            14 => Self::Tractor,
            15 => Self::Light,
            _ => return None,
        };
        Some(ty)
    }
}
