use criterion::{Criterion, criterion_group, criterion_main};
use geocode_fields::{AddressComponent, ValueForm, classify, extract};
use std::hint::black_box;

fn sequence(count: usize, suffix_marked: bool) -> Vec<AddressComponent> {
    (0..count)
        .map(|i| {
            let tag = if suffix_marked && i + 1 == count {
                "postal_code_suffix"
            } else {
                "political"
            };
            AddressComponent::new(format!("component {i}"), [tag])
        })
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let five = sequence(5, false);
    let nine = sequence(9, true);
    let short = sequence(3, false);

    c.bench_function("classify_five_components", |b| {
        b.iter(|| classify(black_box(&five)))
    });

    c.bench_function("classify_nine_with_suffix", |b| {
        b.iter(|| classify(black_box(&nine)))
    });

    c.bench_function("classify_too_short", |b| {
        b.iter(|| classify(black_box(&short)))
    });
}

fn bench_extract(c: &mut Criterion) {
    let body = r#"{
        "results": [{ "address_components": [
            { "long_name": "100", "short_name": "100", "types": ["street_number"] },
            { "long_name": "Main Street", "short_name": "Main St", "types": ["route"] },
            { "long_name": "Springfield", "short_name": "Springfield", "types": ["locality", "political"] },
            { "long_name": "Sangamon County", "short_name": "Sangamon County", "types": ["administrative_area_level_2", "political"] },
            { "long_name": "Illinois", "short_name": "IL", "types": ["administrative_area_level_1", "political"] },
            { "long_name": "United States", "short_name": "US", "types": ["country", "political"] },
            { "long_name": "62701", "short_name": "62701", "types": ["postal_code"] }
        ] }],
        "status": "OK"
    }"#;

    c.bench_function("extract_seven_components", |b| {
        b.iter(|| extract(black_box(body), ValueForm::Long))
    });
}

criterion_group!(benches, bench_classify, bench_extract);
criterion_main!(benches);
