//! Proxy type registry
//!
//! Maps a type name to the constructor that wraps a handle in the matching
//! proxy. The table is built once and never changes.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use flhook_sdk::{Handle, ScriptObject};

use super::classes::{ClientInfo, DamageList, Quaternion, Vector};
use super::{ClassSchema, HostClass};

/// Wraps a handle in a concrete proxy
pub type ProxyConstructor = fn(Handle) -> Arc<dyn ScriptObject>;

fn construct<T: HostClass>(handle: Handle) -> Arc<dyn ScriptObject> {
    Arc::new(T::from_handle(handle))
}

fn entry<T: HostClass>() -> (&'static str, (ProxyConstructor, &'static ClassSchema)) {
    let schema = T::schema();
    (schema.class_name, (construct::<T> as ProxyConstructor, schema))
}

static PROXIES: LazyLock<HashMap<&'static str, (ProxyConstructor, &'static ClassSchema)>> =
    LazyLock::new(|| {
        HashMap::from([
            entry::<Vector>(),
            entry::<Quaternion>(),
            entry::<DamageList>(),
            entry::<ClientInfo>(),
        ])
    });

/// Look up the constructor for a registered proxy type
pub fn lookup_proxy(type_name: &str) -> Option<ProxyConstructor> {
    PROXIES.get(type_name).map(|(ctor, _)| *ctor)
}

/// Look up the schema of a registered proxy type
pub fn lookup_schema(type_name: &str) -> Option<&'static ClassSchema> {
    PROXIES.get(type_name).map(|(_, schema)| *schema)
}

/// Schemas of every registered proxy type, sorted by name
pub fn proxy_types() -> Vec<&'static ClassSchema> {
    let mut schemas: Vec<_> = PROXIES.values().map(|(_, schema)| *schema).collect();
    schemas.sort_by_key(|s| s.class_name);
    schemas
}

/// Every host function a registered proxy type is wired to
///
/// The host must supply all of these at load time.
pub fn required_host_functions() -> Vec<&'static str> {
    let mut names: Vec<_> = proxy_types()
        .into_iter()
        .flat_map(ClassSchema::host_functions)
        .collect();
    names.dedup();
    names
}
