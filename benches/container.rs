#![allow(dead_code)]

use criterion::{criterion_group, criterion_main, Criterion};
use keywire::{Arguments, Container, Injectable, InstantiateErrorKind, Method, NamedArgs, Parameter, Target, TypeInfo, Value};
use std::sync::Arc;

struct A(Arc<B>, Arc<C>);
struct B(i32);
struct C(Arc<CA>);
struct CA(Arc<CAA>);
struct CAA(Arc<CAAA>);
struct CAAA;

macro_rules! injectable {
    ($ty:ident($($name:literal: $dep:ident),*) => $build:expr) => {
        impl Injectable for $ty {
            fn parameters() -> Vec<Parameter> {
                vec![$(Parameter::class::<$dep>($name)),*]
            }

            #[allow(unused_variables)]
            fn construct(args: &Arguments) -> Result<Self, InstantiateErrorKind> {
                let build: fn(&Arguments) -> Result<Self, InstantiateErrorKind> = $build;
                build(args)
            }
        }
    };
}

injectable!(CAAA() => |_| Ok(CAAA));
injectable!(CAA("caaa": CAAA) => |args| Ok(CAA(args.get("caaa")?)));
injectable!(CA("caa": CAA) => |args| Ok(CA(args.get("caa")?)));
injectable!(C("ca": CA) => |args| Ok(C(args.get("ca")?)));

impl Injectable for B {
    fn parameters() -> Vec<Parameter> {
        vec![Parameter::scalar("value").with_default(2_i32)]
    }

    fn construct(args: &Arguments) -> Result<Self, InstantiateErrorKind> {
        Ok(Self(args.cloned("value")?))
    }

    fn methods() -> Vec<Method<Self>> {
        vec![Method::instance("scaled", vec![Parameter::scalar("factor").with_default(3_i32)], |b: &Self, args| {
            Ok::<_, InstantiateErrorKind>(b.0 * args.cloned::<i32>("factor")?)
        })]
    }
}

injectable!(A("b": B, "c": C) => |args| Ok(A(args.get("b")?, args.get("c")?)));

#[inline]
fn container_new_with_entries() -> Container {
    let container = Container::new();
    container
        .add_singleton("app::Runtime", |_: &Container, _: &[Value]| Ok::<_, InstantiateErrorKind>(()))
        .unwrap();
    container
        .add("app::Request", |_: &Container, _: &[Value]| Ok::<_, InstantiateErrorKind>(((), ())))
        .unwrap();
    container.add_instance_with_key("app::Settings", ((), (), ())).unwrap();
    container.alias("app::Request", "app::Action");
    container
}

#[inline]
fn container_get(container: &Container, key: &str) {
    let _ = container.get_value(key, &[]).unwrap();
}

#[inline]
fn container_resolve(container: &Container) {
    let _ = container.resolve_as::<A>(&NamedArgs::new()).unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    let container_1 = container_new_with_entries();

    let container_2 = Container::new();
    container_2
        .declare::<CAAA>()
        .declare::<CAA>()
        .declare::<CA>()
        .declare::<C>()
        .declare::<B>()
        .declare::<A>();

    let container_3 = Container::new();
    container_3.declare::<B>().declare::<A>();
    container_3
        .add_singleton(TypeInfo::of::<C>().key(), |_: &Container, _: &[Value]| {
            Ok::<_, InstantiateErrorKind>(C(Arc::new(CA(Arc::new(CAA(Arc::new(CAAA)))))))
        })
        .unwrap();

    c.bench_function("container_new_with_entries", |b| b.iter(|| container_new_with_entries()))
        .bench_function("container_get_singleton", |b| {
            b.iter(|| container_get(&container_1, "app::Runtime"))
        })
        .bench_function("container_get_factory", |b| b.iter(|| container_get(&container_1, "app::Request")))
        .bench_function("container_get_alias", |b| b.iter(|| container_get(&container_1, "app::Action")))
        .bench_function("container_get_instance", |b| b.iter(|| container_get(&container_1, "app::Settings")))
        .bench_function("container_resolve", |b| b.iter(|| container_resolve(&container_2)))
        .bench_function("container_resolve_with_registry", |b| b.iter(|| container_resolve(&container_3)))
        .bench_function("container_resolve_method", |b| {
            let receiver = Target::instance(Arc::new(B(2)));
            b.iter(|| {
                let _ = container_2.resolve_method(receiver.clone(), "scaled", &NamedArgs::new()).unwrap();
            })
        });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
