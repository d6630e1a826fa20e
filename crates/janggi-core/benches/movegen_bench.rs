use criterion::{black_box, criterion_group, criterion_main, Criterion};
use janggi_core::{attacked_squares, destinations, Board, Janggi, Owner, Snapshot};

const MIDGAME: [&str; 10] = [
    "r hg geh ",
    "    k   r",
    " ce   hc ",
    "s   s s s",
    "  s      ",
    "      S  ",
    "S   S   S",
    " C  E  C ",
    "   RK  H ",
    " EHG G  R",
];

fn movegen_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");
    group.sample_size(100);

    let opening = Board::opening();
    let midgame = Board::from_snapshot(&Snapshot::parse(&MIDGAME).expect("parse"));

    group.bench_function("opening_all_destinations", |b| {
        b.iter(|| {
            black_box(&opening)
                .occupants()
                .map(|placed| destinations(&opening, placed.square).len())
                .sum::<usize>()
        })
    });

    group.bench_function("midgame_attacked_squares", |b| {
        b.iter(|| attacked_squares(black_box(&midgame), Owner::Second))
    });

    group.bench_function("opening_legal_destinations", |b| {
        let game = Janggi::new();
        b.iter(|| game.legal_destinations(black_box("c10")))
    });

    group.finish();
}

criterion_group!(benches, movegen_benchmarks);
criterion_main!(benches);
