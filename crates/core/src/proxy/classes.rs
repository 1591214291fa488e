//! Registered proxy types
//!
//! Field order in each struct is the index order the host functions expect.

use std::marker::PhantomData;

use flhook_macros::HostClass;
use flhook_sdk::{AttributeError, Handle, Value};

/// 3D vector owned by the host
#[derive(Debug, Clone, Copy, HostClass)]
#[host(class = "Vector", get = "Vector_GetAttr", set = "Vector_SetAttr")]
pub struct Vector {
    handle: Handle,
    x: PhantomData<f32>,
    y: PhantomData<f32>,
    z: PhantomData<f32>,
}

/// Rotation quaternion owned by the host
#[derive(Debug, Clone, Copy, HostClass)]
#[host(class = "Quaternion", get = "Quaternion_GetAttr", set = "Quaternion_SetAttr")]
pub struct Quaternion {
    handle: Handle,
    w: PhantomData<f32>,
    x: PhantomData<f32>,
    y: PhantomData<f32>,
    z: PhantomData<f32>,
}

/// Damage being applied to a ship
///
/// Fields are read-only; state changes go through the methods below.
#[derive(Debug, Clone, Copy, HostClass)]
#[host(class = "DamageList", get = "DamageList_GetAttr", call = "DamageList_Functions")]
pub struct DamageList {
    handle: Handle,
    #[host(field = "iDunno1")]
    dunno1: PhantomData<u32>,
    #[host(field = "damageentries")]
    damage_entries: PhantomData<Vec<Value>>,
    #[host(field = "bDestroyed")]
    destroyed: PhantomData<bool>,
    #[host(field = "iDunno2")]
    dunno2: PhantomData<u32>,
    #[host(field = "iInflictorID")]
    inflictor_id: PhantomData<u32>,
    #[host(field = "iInflictorPlayerID")]
    inflictor_player_id: PhantomData<u32>,
}

/// Method ids understood by `DamageList_Functions`
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageListMethod {
    DmgCauseToString = 1,
    AddDamageEntry = 2,
    GetCause = 3,
    GetHitPtsLeft = 4,
    GetInflictorId = 5,
    GetInflictorOwnerPlayer = 6,
    IsDestroyed = 7,
    IsInflictorAPlayer = 8,
    SetCause = 9,
    SetDestroyed = 10,
    SetInflictorId = 11,
    SetInflictorOwnerPlayer = 12,
}

impl DamageListMethod {
    #[inline]
    pub const fn id(self) -> u32 {
        self as u32
    }
}

impl DamageList {
    fn invoke(&self, method: DamageListMethod, args: Value) -> Result<Value, AttributeError> {
        self.call(method.id(), args)
    }

    /// `static char const* DmgCauseToString(DamageCause)`
    pub fn dmg_cause_to_string(&self) -> Result<Value, AttributeError> {
        self.invoke(DamageListMethod::DmgCauseToString, Value::placeholder())
    }

    /// `void add_damage_entry(unsigned short, float, DamageEntry::SubObjFate)`
    pub fn add_damage_entry(
        &self,
        subobj: impl Into<Value>,
        health: impl Into<Value>,
        fate: impl Into<Value>,
    ) -> Result<Value, AttributeError> {
        let args = Value::Tuple(vec![subobj.into(), health.into(), fate.into()]);
        self.invoke(DamageListMethod::AddDamageEntry, args)
    }

    pub fn get_cause(&self) -> Result<Value, AttributeError> {
        self.invoke(DamageListMethod::GetCause, Value::placeholder())
    }

    /// `float get_hit_pts_left(unsigned short) const`
    pub fn get_hit_pts_left(&self, subobj: impl Into<Value>) -> Result<Value, AttributeError> {
        self.invoke(DamageListMethod::GetHitPtsLeft, Value::Tuple(vec![subobj.into()]))
    }

    pub fn get_inflictor_id(&self) -> Result<Value, AttributeError> {
        self.invoke(DamageListMethod::GetInflictorId, Value::placeholder())
    }

    pub fn get_inflictor_owner_player(&self) -> Result<Value, AttributeError> {
        self.invoke(DamageListMethod::GetInflictorOwnerPlayer, Value::placeholder())
    }

    pub fn is_destroyed(&self) -> Result<Value, AttributeError> {
        self.invoke(DamageListMethod::IsDestroyed, Value::placeholder())
    }

    pub fn is_inflictor_a_player(&self) -> Result<Value, AttributeError> {
        self.invoke(DamageListMethod::IsInflictorAPlayer, Value::placeholder())
    }

    pub fn set_cause(&self, cause: impl Into<Value>) -> Result<Value, AttributeError> {
        self.invoke(DamageListMethod::SetCause, Value::Tuple(vec![cause.into()]))
    }

    pub fn set_destroyed(&self, destroyed: impl Into<Value>) -> Result<Value, AttributeError> {
        self.invoke(DamageListMethod::SetDestroyed, Value::Tuple(vec![destroyed.into()]))
    }

    pub fn set_inflictor_id(&self, obj_id: impl Into<Value>) -> Result<Value, AttributeError> {
        self.invoke(DamageListMethod::SetInflictorId, Value::Tuple(vec![obj_id.into()]))
    }

    pub fn set_inflictor_owner_player(
        &self,
        client_id: impl Into<Value>,
    ) -> Result<Value, AttributeError> {
        self.invoke(
            DamageListMethod::SetInflictorOwnerPlayer,
            Value::Tuple(vec![client_id.into()]),
        )
    }
}

/// Per-client session state kept by FLHook
#[derive(Debug, Clone, Copy, HostClass)]
#[host(class = "ClientInfo", get = "ClientInfo_GetAttr")]
pub struct ClientInfo {
    handle: Handle,
    #[host(field = "iShip")]
    ship: PhantomData<u32>,
    #[host(field = "iShipOld")]
    ship_old: PhantomData<u32>,
    #[host(field = "tmSpawnTime")]
    spawn_time: PhantomData<i64>,
    #[host(field = "dmgLast")]
    dmg_last: PhantomData<DamageList>,
    #[host(field = "lstMoneyFix")]
    money_fix: PhantomData<Vec<Value>>,
    #[host(field = "iTradePartner")]
    trade_partner: PhantomData<u32>,
    #[host(field = "bCruiseActivated")]
    cruise_activated: PhantomData<bool>,
    #[host(field = "bThrusterActivated")]
    thruster_activated: PhantomData<bool>,
    #[host(field = "bEngineKilled")]
    engine_killed: PhantomData<bool>,
    #[host(field = "bTradelane")]
    tradelane: PhantomData<bool>,
    #[host(field = "iBaseEnterTime")]
    base_enter_time: PhantomData<u32>,
    #[host(field = "iCharMenuEnterTime")]
    char_menu_enter_time: PhantomData<u32>,
    #[host(field = "tmKickTime")]
    kick_time: PhantomData<i64>,
    #[host(field = "iLastExitedBaseID")]
    last_exited_base_id: PhantomData<u32>,
    #[host(field = "bDisconnected")]
    disconnected: PhantomData<bool>,
    #[host(field = "bCharSelected")]
    char_selected: PhantomData<bool>,
    #[host(field = "tmF1Time")]
    f1_time: PhantomData<i64>,
    #[host(field = "tmF1TimeDisconnect")]
    f1_time_disconnect: PhantomData<i64>,
    #[host(field = "lstIgnore")]
    ignore: PhantomData<Vec<Value>>,
    #[host(field = "dieMsg")]
    die_msg: PhantomData<u32>,
    #[host(field = "dieMsgSize")]
    die_msg_size: PhantomData<u32>,
    #[host(field = "dieMsgStyle")]
    die_msg_style: PhantomData<u32>,
    #[host(field = "chatSize")]
    chat_size: PhantomData<u32>,
    #[host(field = "chatStyle")]
    chat_style: PhantomData<u32>,
    #[host(field = "bAutoBuyMissiles")]
    auto_buy_missiles: PhantomData<bool>,
    #[host(field = "bAutoBuyMines")]
    auto_buy_mines: PhantomData<bool>,
    #[host(field = "bAutoBuyTorps")]
    auto_buy_torps: PhantomData<bool>,
    #[host(field = "bAutoBuyCD")]
    auto_buy_cd: PhantomData<bool>,
    #[host(field = "bAutoBuyCM")]
    auto_buy_cm: PhantomData<bool>,
    #[host(field = "bAutoBuyReload")]
    auto_buy_reload: PhantomData<bool>,
    #[host(field = "iKillsInARow")]
    kills_in_a_row: PhantomData<u32>,
    #[host(field = "iConnects")]
    connects: PhantomData<u32>,
    #[host(field = "wscHostname")]
    hostname: PhantomData<String>,
    #[host(field = "bSpawnProtected")]
    spawn_protected: PhantomData<bool>,
    #[host(field = "bUseServersideHitDetection")]
    use_serverside_hit_detection: PhantomData<bool>,
    unused_data: PhantomData<()>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::testing::{self, Call};
    use crate::proxy::HostClass;
    use flhook_sdk::ScriptObject;

    fn all_types(handle: Handle) -> Vec<Box<dyn ScriptObject>> {
        vec![
            Box::new(Vector::from_handle(handle)),
            Box::new(Quaternion::from_handle(handle)),
            Box::new(DamageList::from_handle(handle)),
            Box::new(ClientInfo::from_handle(handle)),
        ]
    }

    #[test]
    fn test_field_order() {
        assert_eq!(Vector::FIELDS, &["x", "y", "z"]);
        assert_eq!(Quaternion::FIELDS, &["w", "x", "y", "z"]);
        assert_eq!(
            DamageList::FIELDS,
            &[
                "iDunno1",
                "damageentries",
                "bDestroyed",
                "iDunno2",
                "iInflictorID",
                "iInflictorPlayerID"
            ]
        );
        assert_eq!(ClientInfo::FIELDS.len(), 36);
        assert_eq!(ClientInfo::SHIP_INDEX, 0);
        assert_eq!(ClientInfo::HOSTNAME_FIELD, "wscHostname");
        assert_eq!(ClientInfo::HOSTNAME_INDEX, 32);
        assert_eq!(ClientInfo::FIELDS[35], "unused_data");
    }

    #[test]
    fn test_schema_wiring() {
        assert!(Vector::schema().is_writable());
        assert!(Quaternion::schema().is_writable());
        assert!(!DamageList::schema().is_writable());
        assert!(!ClientInfo::schema().is_writable());
        assert_eq!(
            DamageList::schema().call_function,
            Some("DamageList_Functions")
        );
        assert_eq!(ClientInfo::schema().call_function, None);
    }

    #[test]
    fn test_write_then_read_every_field() {
        testing::install();

        for proxy in [
            Box::new(Vector::from_handle(testing::fresh_handle())) as Box<dyn ScriptObject>,
            Box::new(Quaternion::from_handle(testing::fresh_handle())),
        ] {
            let fields = match proxy.class_name() {
                "Vector" => Vector::FIELDS,
                _ => Quaternion::FIELDS,
            };
            let set_fn = format!("{}_SetAttr", proxy.class_name());
            let get_fn = format!("{}_GetAttr", proxy.class_name());

            for (i, field) in fields.iter().enumerate() {
                let value = Value::Float(i as f64 + 0.5);
                proxy.set_attr(field, value.clone()).unwrap();
                assert_eq!(proxy.get_attr(field).unwrap(), value);

                let calls = testing::calls(proxy.handle());
                let [.., set, get] = calls.as_slice() else {
                    panic!("expected a set and a get call");
                };
                assert_eq!(set.function, set_fn);
                assert_eq!(set.index, i as u32);
                assert_eq!(set.args, Value::Tuple(vec![value]));
                assert_eq!(get.function, get_fn);
                assert_eq!(get.handle, proxy.handle());
                assert_eq!(get.index, i as u32);
            }
        }
    }

    #[test]
    fn test_typed_accessors() {
        testing::install();
        let v = Vector::from_handle(testing::fresh_handle());

        v.set_y(4.25f32).unwrap();
        assert_eq!(v.y().unwrap(), Value::Float(4.25));
        assert!(v.x().unwrap().is_none());
    }

    #[test]
    fn test_unknown_names_fail_for_every_type() {
        testing::install();

        for proxy in all_types(testing::fresh_handle()) {
            let class = proxy.class_name();
            let expected = format!("'{}' object has no attribute 'nope'", class);

            assert_eq!(proxy.get_attr("nope").unwrap_err().to_string(), expected);
            assert_eq!(
                proxy.set_attr("nope", Value::Int(1)).unwrap_err().to_string(),
                expected
            );
            assert!(matches!(
                proxy.del_attr("nope"),
                Err(AttributeError::Delete { .. })
            ));
        }
    }

    #[test]
    fn test_delete_fails_for_member_names() {
        for proxy in all_types(Handle::from_raw(0x20)) {
            let expected = format!("'{}' attributes can not be deleted.", proxy.class_name());
            for name in ["x", "iShip", "bDestroyed", "w"] {
                assert_eq!(proxy.del_attr(name).unwrap_err().to_string(), expected);
            }
        }
    }

    #[test]
    fn test_read_only_types_reject_every_field() {
        testing::install();
        let handle = testing::fresh_handle();

        let info = ClientInfo::from_handle(handle);
        for field in ClientInfo::FIELDS {
            let err = info.set_attr(field, Value::Int(1)).unwrap_err();
            assert_eq!(
                err.to_string(),
                "'ClientInfo' object has no 'set' method (C++ const?)"
            );
        }

        let damage = DamageList::from_handle(handle);
        for field in DamageList::FIELDS {
            let err = damage.set_attr(field, Value::Int(1)).unwrap_err();
            assert!(matches!(err, AttributeError::ReadOnly { class: "DamageList", .. }));
        }

        // Nothing reached the host
        assert!(testing::calls(handle).is_empty());
    }

    #[test]
    fn test_read_forwards_placeholder() {
        testing::install();
        let handle = testing::fresh_handle();
        testing::seed(handle, ClientInfo::CONNECTS_INDEX, Value::Int(3));

        let info = ClientInfo::from_handle(handle);
        assert_eq!(info.get_attr("iConnects").unwrap(), Value::Int(3));
        assert_eq!(
            testing::calls(handle),
            vec![Call::new(
                "ClientInfo_GetAttr",
                handle,
                ClientInfo::CONNECTS_INDEX,
                Value::placeholder()
            )]
        );
    }

    #[test]
    fn test_every_field_read_forwards_placeholder() {
        testing::install();

        for schema in crate::proxy::proxy_types() {
            let handle = testing::fresh_handle();
            let proxy = crate::convert_proxy(schema.class_name, handle).unwrap();
            let get_fn = schema.get_function.unwrap();

            for (i, field) in schema.fields.iter().enumerate() {
                testing::seed(handle, i as u32, Value::Int(i as i64));
                assert_eq!(proxy.get_attr(field).unwrap(), Value::Int(i as i64));
                assert_eq!(
                    testing::calls(handle).last(),
                    Some(&Call::new(get_fn, handle, i as u32, Value::placeholder()))
                );
            }
            assert_eq!(testing::calls(handle).len(), schema.fields.len());
        }
    }

    #[test]
    fn test_damage_list_methods() {
        testing::install();
        let handle = testing::fresh_handle();
        let damage = DamageList::from_handle(handle);

        damage.dmg_cause_to_string().unwrap();
        damage.add_damage_entry(2u16, 0.5f32, 1).unwrap();
        damage.get_cause().unwrap();
        damage.get_hit_pts_left(2u16).unwrap();
        damage.get_inflictor_id().unwrap();
        damage.get_inflictor_owner_player().unwrap();
        damage.is_destroyed().unwrap();
        damage.is_inflictor_a_player().unwrap();
        damage.set_cause(5).unwrap();
        damage.set_destroyed(true).unwrap();
        damage.set_inflictor_id(77u32).unwrap();
        let echoed = damage.set_inflictor_owner_player(3u32).unwrap();
        assert_eq!(echoed, Value::Tuple(vec![Value::Int(12), Value::tuple([3])]));

        let calls = testing::calls(handle);
        let ids: Vec<u32> = calls.iter().map(|c| c.index).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<u32>>());
        assert!(calls.iter().all(|c| c.function == "DamageList_Functions"));

        assert_eq!(calls[0].args, Value::placeholder());
        assert_eq!(
            calls[1].args,
            Value::Tuple(vec![Value::Int(2), Value::Float(0.5), Value::Int(1)])
        );
        assert_eq!(calls[3].args, Value::tuple([2]));
        assert_eq!(calls[9].args, Value::tuple([true]));
    }

    #[test]
    fn test_reserved_names_for_every_type() {
        for proxy in all_types(Handle::from_raw(0x30)) {
            for name in crate::proxy::RESERVED_NAMES {
                let err = proxy.set_attr(name, Value::None).unwrap_err();
                assert_eq!(
                    err.to_string(),
                    format!("{}.{} attribute can not be changed.", proxy.class_name(), name)
                );
            }
            assert_eq!(
                proxy.get_attr("_cname").unwrap(),
                Value::from(proxy.class_name())
            );
        }
    }
}
