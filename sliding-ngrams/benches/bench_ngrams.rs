use std::time::Duration;

use criterion::{
    criterion_group, criterion_main, measurement::WallTime, BenchmarkGroup, Criterion, SamplingMode,
};
use rand::{Rng, SeedableRng};

use sliding_ngrams::NgramIterator;

const SAMPLE_SIZE: usize = 10;
const WARM_UP_TIME: Duration = Duration::from_secs(3);
const MEASURE_TIME: Duration = Duration::from_secs(10);

const SEED: u64 = 42;
const NUM_WORDS: usize = 200_000;
const VOCAB_SIZE: usize = 5000;
const MAX_NS: [usize; 3] = [3, 4, 5];

fn criterion_words(c: &mut Criterion) {
    let mut group = c.benchmark_group("words");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP_TIME);
    group.measurement_time(MEASURE_TIME);
    group.sampling_mode(SamplingMode::Flat);

    add_ngram_benches(&mut group, &synthetic_text());
}

/// Generates a text of random lowercase words, separated by spaces and occasional newlines.
fn synthetic_text() -> String {
    let mut rng = rand_xoshiro::SplitMix64::seed_from_u64(SEED);
    let vocab: Vec<String> = (0..VOCAB_SIZE)
        .map(|_| {
            let len = rng.gen_range(1..=10);
            (0..len).map(|_| rng.gen_range('a'..='z')).collect()
        })
        .collect();
    let mut text = String::new();
    for i in 0..NUM_WORDS {
        text.push_str(&vocab[rng.gen_range(0..VOCAB_SIZE)]);
        text.push(if (i + 1) % 20 == 0 { '\n' } else { ' ' });
    }
    text
}

fn add_ngram_benches(group: &mut BenchmarkGroup<WallTime>, text: &str) {
    for &max_n in &MAX_NS {
        group.bench_function(format!("ngrams/1/{max_n}"), |b| {
            b.iter(|| {
                let mut iter = NgramIterator::from_reader(text.as_bytes(), 1, max_n);
                let mut total_len = 0;
                let num_grams = iter
                    .try_for_each_gram(|gram| total_len += gram.len())
                    .unwrap();
                if num_grams == usize::MAX || total_len == usize::MAX {
                    panic!();
                }
            });
        });
    }
}

criterion_group!(benches, criterion_words);
criterion_main!(benches);
