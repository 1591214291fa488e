//! Value record shapes
//!
//! Host structs that are passed to scripts by value become immutable
//! [`Record`](flhook_sdk::Record)s. Each shape lists the struct's fields in
//! the order the host supplies them.

use std::collections::HashMap;
use std::sync::LazyLock;

use flhook_sdk::RecordShape;

macro_rules! record_shapes {
    ($($ident:ident => $name:literal [$($field:literal),* $(,)?];)*) => {
        $(
            #[doc = concat!("`", $name, "` record shape")]
            pub static $ident: RecordShape = RecordShape::new($name, &[$($field),*]);
        )*

        /// Every registered record shape
        pub static ALL_SHAPES: &[&RecordShape] = &[$(&$ident),*];
    };
}

record_shapes! {
    VECTOR => "Vector" ["x", "y", "z"];
    QUATERNION => "Quaternion" ["w", "x", "y", "z"];
    SSP_OBJ_UPDATE_INFO => "SSPObjUpdateInfo" [
        "iShip", "vDir", "vPos", "fTimestamp", "fDunno", "throttle", "cState",
    ];
    SSP_OBJ_COLLISION_INFO => "SSPObjCollisionInfo" [
        "iColliderObjectID", "iColliderSubObjID", "iDamagedObjectID", "iDamagedSubObjID", "fDamage",
    ];
    S_LOGIN_INFO => "SLoginInfo" ["wszAccount"];
    S_STARTUP_INFO => "SStartupInfo" ["iDunno", "iMaxPlayers"];
    S_CREATE_CHARACTER_INFO => "SCreateCharacterInfo" [
        "wszCharname", "iNickName", "iBase", "iPackage", "iPilot", "iDunno",
    ];
    X_FIRE_WEAPON_INFO => "XFireWeaponInfo" [
        "iDunno1", "vDirection", "iDunno2", "sArray1", "sArray2", "s3",
    ];
    X_ACTIVATE_EQUIP => "XActivateEquip" ["iSpaceID", "sID", "bActivate"];
    X_ACTIVATE_CRUISE => "XActivateCruise" ["iShip", "bActivate"];
    X_ACTIVATE_THRUSTERS => "XActivateThrusters" ["iShip", "bActivate"];
    X_SET_TARGET => "XSetTarget" ["iShip", "iSlot", "iSpaceID", "iSubObjID"];
    X_GO_TRADELANE => "XGoTradelane" ["iShip", "iTradelaneSpaceObj1", "iTradelaneSpaceObj2"];
    X_JETTISON_CARGO => "XJettisonCargo" ["iShip", "iSlot", "iCount"];
    X_SET_MANEUVER => "XSetManeuver" ["iShipFrom", "IShipTo", "iFlag"];
    SGF_GOOD_SELL_INFO => "SGFGoodSellInfo" ["l1", "iArchID", "iCount"];
    SGF_GOOD_BUY_INFO => "SGFGoodBuyInfo" ["iBaseID", "lNull", "iGoodID", "iCount"];
    SSP_MUNITION_COLLISION_INFO => "SSPMunitionCollisionInfo" [
        "iProjectileArchID", "dw2", "dwTargetShip", "s1",
    ];
    EQUIP_DESC => "EquipDesc" [
        "iDunno", "sID", "iArchID", "bMounted", "fHealth", "iCount", "bMission", "iOwner",
    ];
    CHARACTER_ID => "CHARACTER_ID" ["szCharFilename"];
    CARGO_INFO => "CARGO_INFO" ["iID", "iCount", "iArchID", "fStatus", "bMission", "bMounted"];
    MONEY_FIX => "MONEY_FIX" ["wscCharname", "iAmount"];
    IGNORE_INFO => "IGNORE_INFO" ["wscCharname", "wscFlags"];
    RESOLVE_IP => "RESOLVE_IP" ["iClientID", "iConnects", "wscIP", "wscHostname"];
    CLIENT_INFO => "CLIENT_INFO" [
        "iShip", "iShipOld", "iTradePartner", "bCruiseActivated", "bThrusterActivated",
        "bEngineKilled", "bTradelane", "iBaseEnterTime", "iCharMenuEnterTime",
        "iLastExitedBaseID", "bDisconnected", "bCharSelected", "bAutoBuyMissiles",
        "bAutoBuyMines", "bAutoBuyTorps", "bAutoBuyCD", "bAutoBuyCM", "bAutoBuyReload",
        "iKillsInARow", "iConnects", "wscHostname", "bSpawnProtected",
        "bUseServersideHitDetection",
    ];
    HK_PLAYER_INFO => "HKPLAYERINFO" [
        "iClientID", "wscCharname", "wscBase", "wscSystem", "iSystem", "iShip", "wscIP",
        "wscHostname",
    ];
    DAMAGE_ENTRY => "DamageEntry" ["subobj", "health", "fate"];
    DAMAGE_LIST => "DamageList" [
        "iDunno1", "damageentries", "bDestroyed", "iDunno2", "iInflictorID", "iInflictorPlayerID",
    ];
    SSP_USE_ITEM => "SSPUseItem" ["object", "hpid", "quantity"];
}

static REGISTRY: LazyLock<HashMap<&'static str, &'static RecordShape>> =
    LazyLock::new(|| ALL_SHAPES.iter().map(|shape| (shape.name(), *shape)).collect());

/// Look up a record shape by type name
pub fn lookup_shape(type_name: &str) -> Option<&'static RecordShape> {
    REGISTRY.get(type_name).copied()
}
