//! Host commands callable from handlers
//!
//! Each wrapper packs its arguments into a positional tuple, runs the host
//! command of the same name and turns the `HK_ERROR` status the host returns
//! into an error. Commands are bound at load time when the host has them; a
//! missing one only fails when it is called.
//!
//! # Example
//!
//! ```ignore
//! use flhook_core::commands;
//!
//! let cash = commands::hk_get_cash("Trent")?;
//! commands::hk_msg("Trent", &format!("You have {} credits", cash))?;
//! ```

use flhook_sdk::{Handle, HkError, Record, Value};

use crate::convert::{convert_record, ConvertError};
use crate::proxy::{ClientInfo, HostClass};
use crate::records::CARGO_INFO;

/// Host command errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    /// The host ran the command and reported an error code
    #[error("{0}")]
    Host(#[from] HkError),

    /// The host never supplied the command
    #[error("Host command {0} is not bound")]
    Unbound(&'static str),

    /// The command succeeded but its reply has the wrong type
    #[error("Host command {command} replied with {got}, expected {expected}")]
    BadReply {
        command: &'static str,
        expected: &'static str,
        got: &'static str,
    },

    /// The reply could not be converted to a record or proxy
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Result type for host commands
pub type CommandResult<T> = Result<T, CommandError>;

/// Run a host command by name
///
/// Returns the host's reply when the status code is `HKE_OK`.
pub fn call(command: &'static str, args: Vec<Value>) -> CommandResult<Value> {
    let function = flhook_engine::try_host()
        .and_then(|host| host.command(command))
        .ok_or(CommandError::Unbound(command))?;

    let (code, reply) = function(Value::Tuple(args));
    if let Err(e) = HkError::check(code) {
        tracing::debug!("{} failed: {}", command, e);
        return Err(e.into());
    }

    tracing::trace!("{} -> {}", command, reply.repr());
    Ok(reply)
}

/// Conversion from a host reply to a typed result
trait FromReply: Sized {
    const EXPECTED: &'static str;

    fn from_reply(reply: Value) -> Option<Self>;
}

impl FromReply for () {
    const EXPECTED: &'static str = "None";

    fn from_reply(_: Value) -> Option<Self> {
        Some(())
    }
}

impl FromReply for i64 {
    const EXPECTED: &'static str = "int";

    fn from_reply(reply: Value) -> Option<Self> {
        reply.as_int()
    }
}

impl FromReply for u32 {
    const EXPECTED: &'static str = "int";

    fn from_reply(reply: Value) -> Option<Self> {
        reply.as_int().and_then(|v| u32::try_from(v).ok())
    }
}

impl FromReply for f64 {
    const EXPECTED: &'static str = "float";

    fn from_reply(reply: Value) -> Option<Self> {
        reply.as_float()
    }
}

impl FromReply for bool {
    const EXPECTED: &'static str = "bool";

    fn from_reply(reply: Value) -> Option<Self> {
        reply.as_bool()
    }
}

impl FromReply for String {
    const EXPECTED: &'static str = "str";

    fn from_reply(reply: Value) -> Option<Self> {
        match reply {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl FromReply for Option<String> {
    const EXPECTED: &'static str = "str or None";

    fn from_reply(reply: Value) -> Option<Self> {
        match reply {
            Value::None => Some(None),
            Value::Str(s) => Some(Some(s)),
            _ => None,
        }
    }
}

impl FromReply for (f64, f64) {
    const EXPECTED: &'static str = "(float, float)";

    fn from_reply(reply: Value) -> Option<Self> {
        match reply.as_tuple()? {
            [a, b] => Some((a.as_float()?, b.as_float()?)),
            _ => None,
        }
    }
}

fn expect_reply<T: FromReply>(command: &'static str, reply: Value) -> CommandResult<T> {
    let got = reply.kind();
    T::from_reply(reply).ok_or(CommandError::BadReply {
        command,
        expected: T::EXPECTED,
        got,
    })
}

macro_rules! host_commands {
    ($(
        $(#[$meta:meta])*
        $name:literal => fn $func:ident($($arg:ident: $ty:ty),* $(,)?) -> $ret:ty;
    )*) => {
        /// Names of the plain host commands, bound at load time
        const PLAIN_COMMANDS: &[&str] = &[$($name),*];

        $(
            $(#[$meta])*
            pub fn $func($($arg: $ty),*) -> CommandResult<$ret> {
                let reply = call($name, vec![$(Value::from($arg)),*])?;
                expect_reply($name, reply)
            }
        )*
    };
}

host_commands! {
    /// Print a line in a player's chat window
    "PrintUserCmdText" => fn print_user_cmd_text(client_id: u32, text: &str) -> ();

    // Messaging
    /// Message one player
    "HkMsg" => fn hk_msg(charname: &str, text: &str) -> ();
    /// Message every player in a system
    "HkMsgS" => fn hk_msg_s(system: &str, text: &str) -> ();
    /// Message every player
    "HkMsgU" => fn hk_msg_u(text: &str) -> ();
    /// Message one player with formatted XML text
    "HkFMsg" => fn hk_fmsg(charname: &str, xml: &str) -> ();
    /// Formatted message to every player in a system
    "HkFMsgS" => fn hk_fmsg_s(system: &str, xml: &str) -> ();
    /// Formatted message to every player
    "HkFMsgU" => fn hk_fmsg_u(xml: &str) -> ();

    // Admin and server
    "HkGetPlayerIP" => fn hk_get_player_ip(client_id: u32) -> String;
    "HkSetAdmin" => fn hk_set_admin(charname: &str, rights: &str) -> ();
    "HkGetAdmin" => fn hk_get_admin(charname: &str) -> String;
    "HkDelAdmin" => fn hk_del_admin(charname: &str) -> ();
    "HkChangeNPCSpawn" => fn hk_change_npc_spawn(disable: bool) -> ();
    /// `(health, max_health)` of a base
    "HkGetBaseStatus" => fn hk_get_base_status(basename: &str) -> (f64, f64);

    // Players
    "HkGetCash" => fn hk_get_cash(charname: &str) -> i64;
    "HkAddCash" => fn hk_add_cash(charname: &str, amount: i32) -> ();
    "HkKick" => fn hk_kick(charname: &str) -> ();
    "HkKickReason" => fn hk_kick_reason(charname: &str, reason: &str) -> ();
    "HkBan" => fn hk_ban(charname: &str, ban: bool) -> ();
    "HkBeam" => fn hk_beam(charname: &str, basename: &str) -> ();
    "HkSaveChar" => fn hk_save_char(charname: &str) -> ();
    "HkRemoveCargo" => fn hk_remove_cargo(charname: &str, id: u32, count: i32) -> ();
    "HkAddCargo" => fn hk_add_cargo(charname: &str, good: &str, count: i32, mission: bool) -> ();
    "HkRename" => fn hk_rename(charname: &str, new_name: &str, delete_only: bool) -> ();
    /// Show `reason` and kick after `interval` milliseconds
    "HkMsgAndKick" => fn hk_msg_and_kick(client_id: u32, reason: &str, interval: u32) -> ();
    "HkKill" => fn hk_kill(charname: &str) -> ();
    "HkSetRep" => fn hk_set_rep(charname: &str, faction: &str, value: f32) -> ();
    "HkGetRep" => fn hk_get_rep(charname: &str, faction: &str) -> f64;

    // Lookups
    "HkGetClientIdFromCharname" => fn hk_get_client_id_from_charname(charname: &str) -> u32;
    "HkIsInCharSelectMenu" => fn hk_is_in_char_select_menu(client_id: u32) -> bool;
    "HkIsValidClientID" => fn hk_is_valid_client_id(client_id: u32) -> bool;
    "HkGetClientIDByShip" => fn hk_get_client_id_by_ship(ship_id: u32) -> u32;
    "HkGetAccountDirName" => fn hk_get_account_dir_name(charname: &str) -> String;
    "HkGetCharFileName" => fn hk_get_char_file_name(charname: &str) -> String;
    "HkGetBaseNickByID" => fn hk_get_base_nick_by_id(base_id: u32) -> String;
    "HkGetSystemNickByID" => fn hk_get_system_nick_by_id(system_id: u32) -> String;
    "HkGetPlayerSystem" => fn hk_get_player_system(client_id: u32) -> String;
    /// `None` while the client has no character selected
    "HkGetCharnameFromClientId" => fn hk_get_charname_from_client_id(client_id: u32) -> Option<String>;
}

impl FromReply for Handle {
    const EXPECTED: &'static str = "handle";

    fn from_reply(reply: Value) -> Option<Self> {
        reply.as_handle()
    }
}

/// Live view of a client's `CLIENT_INFO` slot
///
/// The host replies with a handle to its own struct.
pub fn get_client_info(client_id: u32) -> CommandResult<ClientInfo> {
    const COMMAND: &str = "GetClientInfo";

    let reply = call(COMMAND, vec![Value::from(client_id)])?;
    let handle: Handle = expect_reply(COMMAND, reply)?;
    if handle.is_null() {
        return Err(ConvertError::NullHandle(ClientInfo::CLASS_NAME).into());
    }
    Ok(ClientInfo::from_handle(handle))
}

/// Cargo held by a character, as `CARGO_INFO` records
///
/// Items may arrive as field tuples or as ready-made records.
pub fn hk_enum_cargo(charname: &str) -> CommandResult<Vec<Record>> {
    const COMMAND: &str = "HkEnumCargo";

    let reply = call(COMMAND, vec![Value::from(charname)])?;
    let Value::Tuple(items) = reply else {
        return Err(CommandError::BadReply {
            command: COMMAND,
            expected: "tuple",
            got: reply.kind(),
        });
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Record(record) if record.name() == CARGO_INFO.name() => Ok(record),
            Value::Tuple(fields) => Ok(convert_record(CARGO_INFO.name(), fields)?),
            other => Err(CommandError::BadReply {
                command: COMMAND,
                expected: CARGO_INFO.name(),
                got: other.kind(),
            }),
        })
        .collect()
}

/// Every host command the wrappers call
pub fn command_names() -> Vec<&'static str> {
    let mut names = vec!["GetClientInfo", "HkEnumCargo"];
    names.extend_from_slice(PLAIN_COMMANDS);
    names
}
