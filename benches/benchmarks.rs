criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        classifying_formation,
        shuffling_troop_deck,
        searching_open_side,
        searching_empty_side,
        refreshing_claimable_lanes,
}

fn classifying_formation(c: &mut criterion::Criterion) {
    let ref mut rng = SmallRng::seed_from_u64(0);
    let deck = Deck::new().shuffle_with(rng);
    let triples = deck.cards().chunks(3).map(|w| w.to_vec()).collect::<Vec<_>>();
    c.bench_function("classify 20 three-card Formations", |b| {
        b.iter(|| {
            triples
                .iter()
                .map(|t| Formation::strength(t))
                .max()
        })
    });
}

fn shuffling_troop_deck(c: &mut criterion::Criterion) {
    c.bench_function("shuffle the 60-card troop Deck", |b| {
        b.iter(|| Deck::new().shuffle())
    });
}

fn searching_open_side(c: &mut criterion::Criterion) {
    let ref mut rng = SmallRng::seed_from_u64(1);
    let deck = Deck::new().shuffle_with(rng);
    let (side, pool) = deck.cards().split_at(1);
    c.bench_function("best completion of a 1-card side over 59 cards", |b| {
        b.iter(|| Lookahead::best(side, pool))
    });
}

fn searching_empty_side(c: &mut criterion::Criterion) {
    let ref mut rng = SmallRng::seed_from_u64(2);
    let deck = Deck::new().shuffle_with(rng);
    let pool = &deck.cards()[..40];
    c.bench_function("best completion of an empty side over 40 cards", |b| {
        b.iter(|| Lookahead::best(&[], pool))
    });
}

fn refreshing_claimable_lanes(c: &mut criterion::Criterion) {
    let card = |s: &str| Card::try_from(s).expect("card");
    let mut game = Game::deal(Deck::new(), 0);
    for (seat, placed) in [(0, "O10"), (1, "O9"), (0, "O8"), (1, "O7")] {
        game.apply(seat, Move::Place(card(placed), 0)).expect("placement");
        game.apply(seat, Move::Draw).expect("draw");
    }
    game.apply(0, Move::Place(card("O6"), 0)).expect("placement");
    let unplayed = game.unplayed();
    let look = Lookahead::from(unplayed.cards());
    c.bench_function("claimability of all 9 Lanes against an open side", |b| {
        b.iter(|| {
            game.lanes()
                .iter()
                .filter(|lane| look.claimable(lane, 0))
                .count()
        })
    });
}

use battleline::cards::*;
use battleline::gameplay::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
