use criterion::{criterion_group, criterion_main, Criterion};
use jpack_codec::{encode, Codec};
use jpack_core::Value;
use jpack_operators::Registry;

fn make_values(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| match i % 3 {
            0 => Value::Integer((i * 7 % 101) as i64),
            1 => Value::text(format!("item-{}", i % 50)),
            _ => Value::Real(i as f64 / 4.0),
        })
        .collect()
}

fn bench_codec(c: &mut Criterion) {
    let values = make_values(1024);
    let pack: Value = encode(&values).into();
    let codec = Codec::default();

    c.bench_function("encode_1024", |b| {
        b.iter(|| {
            let _ = encode(&values);
        })
    });
    c.bench_function("decode_flat_1024", |b| {
        b.iter(|| {
            let _ = codec.decode_flat(std::slice::from_ref(&pack)).unwrap();
        })
    });
}

fn bench_algebra(c: &mut Criterion) {
    let codec = Codec::default();
    let left: Value = encode(&make_values(512)).into();
    let right: Value = encode(&make_values(768)).into();
    let args = vec![left, right];

    c.bench_function("jset_1280", |b| {
        b.iter(|| {
            let _ = codec.setify(&args).unwrap();
        })
    });
    c.bench_function("jsort_1280", |b| {
        b.iter(|| {
            let _ = codec.sortify(&args).unwrap();
        })
    });
}

fn bench_split_stream(c: &mut Criterion) {
    let registry = Registry::new();
    let pack: Value = encode(&make_values(1024)).into();

    c.bench_function("jsplitv_stream_1024", |b| {
        b.iter(|| {
            let stream = registry
                .open_table("jsplitv", std::slice::from_ref(&pack))
                .unwrap();
            let _ = stream.count();
        })
    });
}

criterion_group!(packs, bench_codec, bench_algebra, bench_split_stream);
criterion_main!(packs);
