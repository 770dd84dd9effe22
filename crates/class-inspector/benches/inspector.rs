use class_inspector::{
    create_instance_of, get_all_declared_methods, get_annotated_fields, ClassBuilder, ClassRef,
    ConstructorDefinition, FieldDefinition, MethodDefinition, TypeInfo, Value,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn wide_class(members: usize) -> (ClassRef, ClassRef) {
    let marker = ClassBuilder::annotation("bench.Marker").build().unwrap();
    let iface = ClassBuilder::interface("bench.Iface")
        .method(MethodDefinition::new("run").as_abstract())
        .build()
        .unwrap();

    let mut builder = ClassBuilder::class("bench.Wide").implements(&iface);
    for i in 0..members {
        let field = FieldDefinition::new(format!("f{}", i), TypeInfo::int());
        builder = builder.field(if i % 2 == 0 { field.annotated(&marker) } else { field });
        builder = builder.method(MethodDefinition::new(format!("m{}", i % (members / 2 + 1))));
    }
    for arity in 0..4 {
        let mut ctor = ConstructorDefinition::new(|_| Ok(())).private();
        for p in 0..arity {
            ctor = ctor.param(format!("p{}", p), TypeInfo::String);
        }
        builder = builder.constructor(ctor);
    }

    (builder.build().unwrap(), marker)
}

fn bench_lookups(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookups");

    for members in [8usize, 64, 512] {
        let (class, marker) = wide_class(members);

        group.bench_with_input(
            BenchmarkId::new("annotated_fields", members),
            &class,
            |b, class| b.iter(|| get_annotated_fields(black_box(class), &marker)),
        );

        group.bench_with_input(
            BenchmarkId::new("declared_methods", members),
            &class,
            |b, class| b.iter(|| get_all_declared_methods(black_box(class))),
        );
    }

    group.finish();
}

fn bench_create_instance(c: &mut Criterion) {
    let (class, _) = wide_class(8);
    let args: Vec<Value> = vec!["a".into(), "b".into(), "c".into()];

    c.bench_function("create_instance_last_ctor", |b| {
        b.iter(|| create_instance_of(black_box(&class), black_box(&args)).unwrap());
    });

    c.bench_function("create_instance_no_match", |b| {
        b.iter(|| create_instance_of(black_box(&class), &[Value::Int(1)]).is_err());
    });
}

criterion_group!(benches, bench_lookups, bench_create_instance);
criterion_main!(benches);
