#[macro_use]
extern crate criterion;

use criterion::Criterion;

use hello_core::alloc::HeapAllocator;
use hello_core::clock::VirtualClock;
use hello_core::notice::MemorySink;
use hello_core::ActivationManager;

fn bench_activate_deactivate(c: &mut Criterion) {
    let mut group = c.benchmark_group("activation_cycle");

    for count in [1u32, 4, 10] {
        group.throughput(criterion::Throughput::Elements(u64::from(count))); // Records per cycle
        group.bench_function(format!("count_{}", count), |b| {
            let mut manager = ActivationManager::with_parts(
                HeapAllocator::new(),
                VirtualClock::new(0).with_step(1),
                MemorySink::new(),
            );
            b.iter(|| {
                manager.activate(count).unwrap();
                manager.deactivate();
                manager.sink_mut().clear();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_activate_deactivate);
criterion_main!(benches);
