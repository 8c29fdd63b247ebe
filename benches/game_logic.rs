use criterion::{black_box, criterion_group, criterion_main, Criterion};
use match_drop::core::{cascade, detect, Engine, GameConfig, Grid, KindPicker, Layout, PieceStore};
use match_drop::types::{GridPos, Intent, Location, Mode, PieceKind, Point};

const BOARD: [&str; 6] = ["gpgpgp", "pgpgpg", "gpgpgp", "bbpgpg", "gpgpgp", "pgpgpg"];

fn engine() -> Engine {
    let layout = Layout::parse(&BOARD, "bgp").unwrap();
    Engine::with_layout(GameConfig::default().with_size(6, 6), layout).unwrap()
}

fn bench_detect(c: &mut Criterion) {
    let engine = engine();
    let lookup = |pos: GridPos| engine.kind_at(pos);

    c.bench_function("detect_hypothetical_drop", |b| {
        b.iter(|| {
            detect(
                6,
                6,
                black_box(GridPos::new(3, 2)),
                PieceKind::Blue,
                3,
                lookup,
            )
        })
    });
}

fn bench_cascade(c: &mut Criterion) {
    c.bench_function("cascade_full_column", |b| {
        b.iter(|| {
            let mut grid = Grid::new(12, 12, 128.0);
            let mut pieces = PieceStore::new();
            let mut picker = KindPicker::new(Mode::Normal, 12345);
            for row in 0..12 {
                let pos = GridPos::new(row, 5);
                let id = pieces.spawn(PieceKind::Green, Location::OnBoard(pos), Point::default());
                grid.place(id, pos).unwrap();
            }
            let bottom: Vec<GridPos> = (9..12).map(|row| GridPos::new(row, 5)).collect();
            cascade::resolve(&mut grid, &mut pieces, &mut picker, black_box(&bottom))
        })
    });
}

fn bench_commit(c: &mut Criterion) {
    let base = engine();
    let piece = base.supply().get(0).unwrap();
    let position = base.cell_center(GridPos::new(3, 2));

    c.bench_function("drag_commit_and_drain", |b| {
        b.iter(|| {
            let mut engine = base.clone();
            engine.dispatch(Intent::DragStart { piece });
            engine.dispatch(Intent::DragEnd { piece, position });
            black_box(engine.drain_events())
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let engine = engine();

    c.bench_function("snapshot", |b| b.iter(|| black_box(engine.snapshot())));
}

criterion_group!(
    benches,
    bench_detect,
    bench_cascade,
    bench_commit,
    bench_snapshot
);
criterion_main!(benches);
