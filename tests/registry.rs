use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use keywire::{Container, ContainerErrorKind, EntryKind, InstantiateErrorKind, RegistryErrorKind, ResolveErrorKind, Value};

#[derive(Debug)]
struct Connection {
    dsn: &'static str,
    sequence: u32,
}

fn register(container: &Container, key: &str, kind: EntryKind) -> Result<(), RegistryErrorKind> {
    match kind {
        EntryKind::Singleton => container.add_singleton(key, |_: &Container, _: &[Value]| {
            Ok::<_, InstantiateErrorKind>(Connection { dsn: "pg", sequence: 0 })
        }),
        EntryKind::Factory => container.add(key, |_: &Container, _: &[Value]| {
            Ok::<_, InstantiateErrorKind>(Connection { dsn: "pg", sequence: 0 })
        }),
        EntryKind::Instance => container.add_instance_with_key(key, Connection { dsn: "pg", sequence: 0 }),
    }
}

const KINDS: [EntryKind; 3] = [EntryKind::Singleton, EntryKind::Factory, EntryKind::Instance];

#[test]
fn test_has_follows_add_and_remove() {
    let container = Container::new();

    for (index, kind) in KINDS.into_iter().enumerate() {
        let key = format!("app::db::Connection{index}");

        assert!(!container.has(&key));
        register(&container, &key, kind).unwrap();
        assert!(container.has(&key));
        assert_eq!(container.kind(&key), Some(kind));
        assert!(container.remove(&key));
        assert!(!container.has(&key));
        assert!(!container.remove(&key));
    }
}

#[test]
fn test_duplicate_registration_across_kinds() {
    for first in KINDS {
        for second in KINDS {
            let container = Container::new();
            register(&container, "app::Connection", first).unwrap();

            assert_eq!(
                register(&container, "app::Connection", second),
                Err(RegistryErrorKind::KeyExists {
                    key: "app::Connection".to_owned()
                })
            );
            assert_eq!(container.kind("app::Connection"), Some(first));

            assert!(container.remove("app::Connection"));
            register(&container, "app::Connection", second).unwrap();
            assert_eq!(container.kind("app::Connection"), Some(second));
        }
    }
}

#[test]
fn test_invalid_keys_rejected() {
    let container = Container::new();

    for key in ["", "::app", "app::", "app::::db", "9app", "app.db"] {
        for kind in KINDS {
            assert_eq!(
                register(&container, key, kind),
                Err(RegistryErrorKind::InvalidKey { key: key.to_owned() }),
                "{key} {kind:?}"
            );
        }
        assert!(!container.has(key));
    }
}

#[test]
fn test_singleton_and_factory_identity() {
    let sequence = Arc::new(AtomicU32::new(0));

    let container = Container::new();
    container
        .add_singleton("app::Shared", {
            let sequence = sequence.clone();
            move |_: &Container, _: &[Value]| {
                Ok::<_, InstantiateErrorKind>(Connection {
                    dsn: "pg",
                    sequence: sequence.fetch_add(1, Ordering::SeqCst),
                })
            }
        })
        .unwrap();
    container
        .add("app::Fresh", {
            let sequence = sequence.clone();
            move |_: &Container, _: &[Value]| {
                Ok::<_, InstantiateErrorKind>(Connection {
                    dsn: "pg",
                    sequence: sequence.fetch_add(1, Ordering::SeqCst),
                })
            }
        })
        .unwrap();

    let shared_1 = container.get::<Connection>("app::Shared").unwrap();
    let shared_2 = container.get::<Connection>("app::Shared").unwrap();
    let fresh_1 = container.get::<Connection>("app::Fresh").unwrap();
    let fresh_2 = container.get::<Connection>("app::Fresh").unwrap();

    assert!(Arc::ptr_eq(&shared_1, &shared_2));
    assert!(!Arc::ptr_eq(&fresh_1, &fresh_2));
    assert_eq!(fresh_1.dsn, fresh_2.dsn);
    assert_ne!(fresh_1.sequence, fresh_2.sequence);
    assert_eq!(sequence.load(Ordering::SeqCst), 3);
}

#[test]
fn test_instance_never_rebuilt() {
    let connection = Arc::new(Connection { dsn: "pg", sequence: 7 });

    let container = Container::new();
    container.add_instance_rc("app::Connection", connection.clone()).unwrap();

    for _ in 0..3 {
        let got = container.get::<Connection>("app::Connection").unwrap();
        assert!(Arc::ptr_eq(&got, &connection));
    }
}

#[test]
fn test_instance_keyed_by_type() {
    let container = Container::new();
    container.add_instance(Connection { dsn: "pg", sequence: 1 }).unwrap();

    let key = std::any::type_name::<Connection>();

    assert!(container.has(key));
    assert!(container.has_type::<Connection>());
    assert!(matches!(
        container.add_instance(Connection { dsn: "pg", sequence: 2 }),
        Err(RegistryErrorKind::KeyExists { .. })
    ));
    assert_eq!(container.get::<Connection>(key).unwrap().sequence, 1);
}

#[test]
fn test_aliases() {
    let container = Container::new();
    register(&container, "app::PgConnection", EntryKind::Singleton).unwrap();
    container.alias("app::PgConnection", "app::Connection");
    container.alias("app::PgConnection", "app::Db");

    let by_alias = container.get::<Connection>("app::Connection").unwrap();
    let by_other_alias = container.get::<Connection>("app::Db").unwrap();
    let by_key = container.get::<Connection>("app::PgConnection").unwrap();

    assert!(Arc::ptr_eq(&by_alias, &by_key));
    assert!(Arc::ptr_eq(&by_other_alias, &by_key));

    // Removing the entry leaves the aliases dangling
    assert!(container.remove("app::PgConnection"));
    assert!(!container.has("app::Connection"));
    assert!(matches!(
        container.get_value("app::Connection", &[]),
        Err(ResolveErrorKind::NotFound { key }) if key == "app::Connection"
    ));

    // Re-registering the target revives them
    register(&container, "app::PgConnection", EntryKind::Factory).unwrap();
    assert!(container.has("app::Db"));

    assert!(container.remove_alias("app::Db"));
    assert!(!container.remove_alias("app::Db"));
    assert!(!container.has("app::Db"));
    assert!(container.has("app::Connection"));
}

#[test]
fn test_alias_overwrite() {
    let container = Container::new();
    container.add_instance_with_key("app::Primary", Connection { dsn: "primary", sequence: 0 }).unwrap();
    container.add_instance_with_key("app::Replica", Connection { dsn: "replica", sequence: 0 }).unwrap();

    container.alias("app::Primary", "app::Connection");
    container.alias("app::Replica", "app::Connection");

    assert_eq!(container.get::<Connection>("app::Connection").unwrap().dsn, "replica");
}

#[test]
fn test_multi_hop_alias_unsupported() {
    let container = Container::new();
    register(&container, "app::PgConnection", EntryKind::Instance).unwrap();
    container.alias("app::PgConnection", "app::Connection");
    container.alias("app::Connection", "app::Db");

    assert!(container.has("app::Connection"));
    assert!(!container.has("app::Db"));
}

#[test]
fn test_get_errors() {
    let container = Container::new();
    container
        .add("app::Broken", |_: &Container, _: &[Value]| {
            Err::<Connection, _>(anyhow::anyhow!("connection refused"))
        })
        .unwrap();

    assert!(matches!(
        container.get_value("", &[]),
        Err(ResolveErrorKind::Container(ContainerErrorKind::EmptyKey))
    ));
    assert!(matches!(
        container.get_value("app::Missing", &[]),
        Err(ResolveErrorKind::NotFound { .. })
    ));

    let err = container.get_value("app::Broken", &[]).unwrap_err();
    assert!(matches!(
        &err,
        ResolveErrorKind::Instantiate {
            key,
            source: InstantiateErrorKind::Custom(_),
        } if key == "app::Broken"
    ));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn test_failed_singleton_not_cached() {
    let attempts = Arc::new(AtomicU32::new(0));

    let container = Container::new();
    container
        .add_singleton("app::Flaky", {
            let attempts = attempts.clone();
            move |_: &Container, _: &[Value]| {
                if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                    return Err(InstantiateErrorKind::Custom(anyhow::anyhow!("first attempt fails")));
                }
                Ok(Connection { dsn: "pg", sequence: 1 })
            }
        })
        .unwrap();

    assert!(container.get::<Connection>("app::Flaky").is_err());
    let first = container.get::<Connection>("app::Flaky").unwrap();
    let second = container.get::<Connection>("app::Flaky").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_extra_args_reach_singleton_once() {
    let container = Container::new();
    container
        .add_singleton("app::Connection", |_: &Container, args: &[Value]| {
            let dsn = args
                .first()
                .and_then(|arg| arg.downcast_ref::<&'static str>())
                .copied()
                .unwrap_or("default");
            Ok::<_, InstantiateErrorKind>(Connection { dsn, sequence: 0 })
        })
        .unwrap();

    let first = container
        .get_with_args::<Connection>("app::Connection", &[keywire::value("custom")])
        .unwrap();
    // Cached object wins over new arguments
    let second = container
        .get_with_args::<Connection>("app::Connection", &[keywire::value("ignored")])
        .unwrap();

    assert_eq!(first.dsn, "custom");
    assert!(Arc::ptr_eq(&first, &second));
}
