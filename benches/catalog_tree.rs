use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tokio::runtime::Runtime;

fn bench_catalog_reads(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let db = rt.block_on(async {
        let db = atlas::db::spawn("sqlite::memory:")
            .await
            .expect("spawn in-memory store");
        atlas::seed::seed_sample_data(&db)
            .await
            .expect("seed sample data");
        db
    });

    let fr24_id = rt
        .block_on(db.list_providers(Some("FR24")))
        .expect("list providers")
        .first()
        .map(|p| p.provider.id.clone())
        .expect("FR24 seeded");

    c.bench_function("get_provider_tree", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(db.get_provider(&fr24_id).await.unwrap()) });
    });

    c.bench_function("list_providers", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(db.list_providers(None).await.unwrap()) });
    });

    c.bench_function("search_flight", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(db.search("flight").await.unwrap()) });
    });

    c.bench_function("export_snapshot", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(db.export().await.unwrap()) });
    });
}

criterion_group!(benches, bench_catalog_reads);
criterion_main!(benches);
