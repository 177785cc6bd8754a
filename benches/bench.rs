// Criterion benchmarks for Kin Algo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kin_algo::models::{MatchThresholds, ScoringWeights};
use kin_algo::{normalize_person, score_pair, ComparablePerson, FamilyMember, RawPerson, TreeMatcher};

fn raw_member(id: usize) -> RawPerson {
    RawPerson::Member(FamilyMember {
        id: format!("member-{}", id),
        owner_id: Some("owner".to_string()),
        name: Some(format!("Person{} Sharma", id % 40)),
        alias_name: if id % 3 == 0 {
            Some(format!("Alias{}", id % 40))
        } else {
            None
        },
        dob: Some(format!("{}-06-{:02}", 1920 + (id % 80), 1 + (id % 28))),
        gender: None,
        is_deceased: Some(id % 4 == 0),
        born_place: Some("Chennai, India".to_string()),
        current_place: Some("Mumbai, India".to_string()),
        religion: Some("Hindu".to_string()),
        caste: Some("Iyer".to_string()),
        relationship: None,
        father_id: None,
        mother_id: None,
        spouse_ids: vec![],
    })
}

fn tree(offset: usize, size: usize) -> Vec<ComparablePerson> {
    (0..size)
        .map(|i| normalize_person(&raw_member(offset + i)))
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let raw = raw_member(7);
    c.bench_function("normalize_person", |b| {
        b.iter(|| normalize_person(black_box(&raw)));
    });
}

fn bench_score_pair(c: &mut Criterion) {
    let weights = ScoringWeights::default();
    let thresholds = MatchThresholds::default();
    let a = normalize_person(&raw_member(3));
    let b_person = normalize_person(&raw_member(43));

    c.bench_function("score_pair", |b| {
        b.iter(|| {
            score_pair(
                black_box(&a),
                black_box(&b_person),
                black_box(&weights),
                black_box(&thresholds),
            )
        });
    });
}

fn bench_tree_compare(c: &mut Criterion) {
    let matcher = TreeMatcher::with_defaults();

    let mut group = c.benchmark_group("tree_compare");

    for tree_size in [5, 10, 25, 50].iter() {
        let tree_a = tree(0, *tree_size);
        let tree_b = tree(20, *tree_size);

        group.bench_with_input(
            BenchmarkId::new("compare", tree_size),
            tree_size,
            |b, _| {
                b.iter(|| matcher.compare(black_box(&tree_a), black_box(&tree_b)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_score_pair, bench_tree_compare);

criterion_main!(benches);
