criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .sample_size(50)
        .measurement_time(std::time::Duration::from_secs(2));
    targets =
        matching_one_group,
        scanning_a_board,
        scanning_past_the_bound,
}

use set_engine::{contains_set, generate_deck, is_set, Card, CardIdAllocator, GameRng, RulesConfig};

fn board(size: usize) -> Vec<Card> {
    let config = RulesConfig::classic();
    let mut alloc = CardIdAllocator::new();
    let mut rng = GameRng::new(42);
    let mut deck = generate_deck(&config, &mut alloc, &mut rng);
    deck.truncate(size);
    deck
}

fn matching_one_group(c: &mut criterion::Criterion) {
    let group = board(3);
    c.bench_function("judge one 3-card group", |b| {
        b.iter(|| is_set(&group, 4))
    });
}

fn scanning_a_board(c: &mut criterion::Criterion) {
    let config = RulesConfig::classic();
    let cards = board(12);
    c.bench_function("scan a 12-card board for a set", |b| {
        b.iter(|| contains_set(&cards, &config))
    });
}

fn scanning_past_the_bound(c: &mut criterion::Criterion) {
    let config = RulesConfig::classic();
    let cards = board(24);
    c.bench_function("scan a 24-card board (short-circuit)", |b| {
        b.iter(|| contains_set(&cards, &config))
    });
}
