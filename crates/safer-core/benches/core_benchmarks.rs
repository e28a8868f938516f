use criterion::{Criterion, black_box, criterion_group, criterion_main};
use safer_core::{ReconcileOptions, reconcile, snapshot};
use safer_fs::PathFilter;
use std::fs;
use tempfile::tempdir;

fn populate(root: &std::path::Path, dirs: usize, files_per_dir: usize) {
    for d in 0..dirs {
        let dir = root.join(format!("dir{d}"));
        fs::create_dir_all(&dir).unwrap();
        for f in 0..files_per_dir {
            fs::write(dir.join(format!("file{f}.md")), format!("# note {d}/{f}\n")).unwrap();
        }
    }
}

fn snapshot_benchmark(c: &mut Criterion) {
    c.bench_function("snapshot (10 dirs x 50 files)", |b| {
        let source = tempdir().unwrap();
        populate(source.path(), 10, 50);
        let filter = PathFilter::default();

        b.iter(|| {
            let workspace = tempdir().unwrap();
            snapshot(black_box(source.path()), workspace.path(), &filter).unwrap();
        })
    });
}

fn reconcile_benchmark(c: &mut Criterion) {
    c.bench_function("reconcile unchanged (10 dirs x 50 files)", |b| {
        let source = tempdir().unwrap();
        populate(source.path(), 10, 50);
        let workspace = tempdir().unwrap();
        let filter = PathFilter::default();
        let manifest = snapshot(source.path(), workspace.path(), &filter).unwrap();

        b.iter(|| {
            reconcile(
                black_box(workspace.path()),
                source.path(),
                &manifest,
                &filter,
                ReconcileOptions::default(),
            )
        })
    });
}

criterion_group!(benches, snapshot_benchmark, reconcile_benchmark);
criterion_main!(benches);
