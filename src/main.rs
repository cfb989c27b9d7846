use std::time::{Duration, Instant};

use tournament_sort::{
    ListArena, min_and_second_min, min_and_second_min_scan, min_and_second_min_stable, sort_list,
};

fn benchmark(name: &str, repeats: usize, mut f: impl FnMut()) {
    // Warmup.
    for _ in 0..repeats {
        f();
    }
    let start = Instant::now();
    for _ in 0..repeats {
        f();
    }
    let duration = start.elapsed();
    println!("  {}: {}", name, human_time(repeats, duration));
}

fn human_time(repeats: usize, duration: Duration) -> String {
    let mut duration = duration.as_nanos() as f64 / repeats as f64;
    if duration < 1000.0 {
        return format!("{:.1}ns", duration);
    }
    duration /= 1000.0;
    if duration < 1000.0 {
        return format!("{:.1}us", duration);
    }
    duration /= 1000.0;
    if duration < 1000.0 {
        return format!("{:.1}ms", duration);
    }
    duration /= 1000.0;
    format!("{:.1}s", duration)
}

fn human_size(size: usize) -> String {
    if size < 1024 {
        return format!("{}B", size);
    }
    let mut size = size as f64;
    size /= 1024.0;
    if size < 1024.0 {
        return format!("{}KiB", size);
    }
    size /= 1024.0;
    if size < 1024.0 {
        return format!("{}MiB", size);
    }
    size /= 1024.0;
    format!("{}GiB", size)
}

fn ceil_lg(n: usize) -> usize {
    n.next_power_of_two().trailing_zeros() as usize
}

fn main() {
    let mut rng = fastrand::Rng::with_seed(0);
    for lg_size in [10, 14, 18, 20] {
        let n = 1usize << lg_size;
        let mut data = vec![0u64; n];
        // Mask down to lg_size bits so there is a small but nonzero number of
        // duplicates and tie handling actually gets exercised.
        let mask = (1u64 << lg_size) - 1;
        for d in &mut data {
            *d = rng.u64(..) & mask;
        }
        let repeats = 1usize << 22usize.saturating_sub(lg_size);
        println!(
            "size: {} ({} elements)",
            human_size(std::mem::size_of::<u64>() * data.len()),
            data.len()
        );

        // One counted pass per variant, against the worst-case bound.
        let bound = n + ceil_lg(n) - 2;
        let mut comparisons = 0usize;
        let (min, second) = min_and_second_min(&data, |a, b| {
            comparisons += 1;
            a < b
        })
        .unwrap();
        println!(
            "  tournament comparisons: {} (bound {}), found {} then {}",
            comparisons, bound, data[min], data[second]
        );
        let mut comparisons = 0usize;
        let _ = min_and_second_min_stable(&data, |a, b| {
            comparisons += 1;
            a < b
        });
        println!("  stable tournament comparisons: {} (bound {})", comparisons, bound);
        let mut comparisons = 0usize;
        let _ = min_and_second_min_scan(&data, |a, b| {
            comparisons += 1;
            a < b
        });
        println!("  scan comparisons: {}", comparisons);

        benchmark("min + second min (tournament)", repeats, || {
            let _ = min_and_second_min(&data, |a, b| a < b);
        });
        benchmark("min + second min (scan)", repeats, || {
            let _ = min_and_second_min_scan(&data, |a, b| a < b);
        });

        // Sorting a full list per iteration is much heavier than one selection pass.
        let sort_repeats = (repeats / 8).max(1);
        benchmark("sort_list (build + sort)", sort_repeats, || {
            let mut arena = ListArena::with_capacity(data.len());
            let head = arena.list_from_iter(data.iter().copied());
            sort_list(&mut arena, head, |a, b| a < b);
        });
        benchmark("Vec::sort (clone + sort)", sort_repeats, || {
            let mut copy = data.clone();
            copy.sort();
        });
    }
}
