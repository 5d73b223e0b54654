use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use circlist::{CircularList, Position};

const DATA: [i32; 1024] = [0; 1024];

fn from_slice(c: &mut Criterion) {
    c.bench_function("from_slice", |b| b.iter(|| CircularList::from_slice(&DATA)));
}

fn push_back(c: &mut Criterion) {
    c.bench_function("push_back", |b| {
        b.iter(|| {
            let mut clist = CircularList::with_capacity(DATA.len());
            DATA.iter().for_each(|t| clist.push_back(*t));
            clist
        })
    });
}

fn push_front(c: &mut Criterion) {
    c.bench_function("push_front", |b| {
        b.iter(|| {
            let mut clist = CircularList::with_capacity(DATA.len());
            DATA.iter().for_each(|t| clist.push_front(*t));
            clist
        })
    });
}

fn erase_all(c: &mut Criterion) {
    c.bench_function("erase_all", |b| {
        let clist = CircularList::from_slice(&DATA);
        b.iter_batched(
            || clist.clone(),
            |mut clist| {
                let mut pos = clist.first_position();
                while pos != Position::END {
                    pos = clist.erase(pos).unwrap();
                }
                clist
            },
            BatchSize::SmallInput,
        )
    });
}

fn try_clone(c: &mut Criterion) {
    c.bench_function("try_clone", |b| {
        let clist = CircularList::from_slice(&DATA);
        b.iter(|| clist.try_clone())
    });
}

fn iter(c: &mut Criterion) {
    c.bench_function("iter", |b| {
        let clist = CircularList::from_slice(&DATA);
        b.iter(|| clist.iter().sum::<i32>())
    });
}

criterion_group!(
    clist,
    from_slice,
    push_back,
    push_front,
    erase_all,
    try_clone,
    iter,
);

criterion_main!(clist);
