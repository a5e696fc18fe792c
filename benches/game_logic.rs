use criterion::{black_box, criterion_group, criterion_main, Criterion};
use memory_match::core::{DeckRng, EngineConfig, MemoryGame, Session, SessionConfig};
use memory_match::term::{BoardState, GameView, Viewport};
use memory_match::types::{WordImagePair, TICK_MS};

fn pairs(n: u32) -> Vec<WordImagePair> {
    (0..n)
        .map(|i| WordImagePair {
            word: format!("word{}", i),
            image_url: format!("https://cdn/{}.jpg", i),
            pair_id: i,
            image_credit: None,
        })
        .collect()
}

fn bench_deal(c: &mut Criterion) {
    let pairs = pairs(10);
    let mut game = MemoryGame::new(EngineConfig::default(), 12345);

    c.bench_function("deal_10_pairs", |b| {
        b.iter(|| {
            game.initialize(black_box(&pairs));
        })
    });
}

fn bench_shuffle(c: &mut Criterion) {
    let mut rng = DeckRng::new(12345);
    let mut ids: Vec<u32> = (0..20).collect();

    c.bench_function("shuffle_20_cards", |b| {
        b.iter(|| {
            rng.shuffle(black_box(&mut ids));
        })
    });
}

fn bench_click_match(c: &mut Criterion) {
    let pairs = pairs(10);
    let mut game = MemoryGame::new(EngineConfig::default(), 12345);

    c.bench_function("solve_10_pairs", |b| {
        b.iter(|| {
            game.initialize(&pairs);
            for pair_id in 0..10 {
                if let Some(cards) = game.cards_of_pair(pair_id) {
                    game.handle_click(cards.word);
                    game.handle_click(cards.image);
                }
            }
            black_box(game.completed());
        })
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut game = MemoryGame::new(EngineConfig::default(), 12345);
    game.initialize(&pairs(10));

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            game.tick(black_box(TICK_MS));
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let session = Session::new(SessionConfig {
        seed: Some(1),
        ..SessionConfig::default()
    });
    let mut game = MemoryGame::new(EngineConfig::default(), 12345);
    game.initialize(&pairs(10));
    let mut snap = session.snapshot();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            game.snapshot_into(black_box(&mut snap));
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut game = MemoryGame::new(EngineConfig::default(), 12345);
    game.initialize(&pairs(10));
    let snap = game.snapshot();
    let view = GameView::default();
    let state = BoardState {
        cursor: 0,
        columns: 5,
        regenerating: &[],
    };

    c.bench_function("render_board_20_cards", |b| {
        b.iter(|| {
            black_box(view.render(&snap, &state, Viewport::new(100, 40)));
        })
    });
}

criterion_group!(
    benches,
    bench_deal,
    bench_shuffle,
    bench_click_match,
    bench_tick,
    bench_snapshot,
    bench_render
);
criterion_main!(benches);
