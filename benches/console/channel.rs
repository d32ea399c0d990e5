use criterion::{Criterion, Throughput};
use std::hint::black_box;
use uartcon::console::ReceiveChannel;

pub fn bench_push_pop(c: &mut Criterion) {
    let mut channel: ReceiveChannel = ReceiveChannel::new();
    let (mut producer, mut consumer) = channel.split();

    let mut group = c.benchmark_group("channel");
    group.throughput(Throughput::Bytes(1));
    group.bench_function("push_pop", |b| {
        b.iter(|| {
            producer.push(black_box(b'x'));
            black_box(consumer.pop())
        })
    });
    group.finish();
}

pub fn bench_burst(c: &mut Criterion) {
    const BURST: usize = 1024;
    let mut channel: ReceiveChannel = ReceiveChannel::new();
    let (mut producer, mut consumer) = channel.split();

    let mut group = c.benchmark_group("channel");
    group.throughput(Throughput::Bytes(BURST as u64));
    group.bench_function("burst_1k", |b| {
        b.iter(|| {
            for i in 0..BURST {
                producer.push(i as u8);
            }
            let mut sum = 0u32;
            while let Some(byte) = consumer.pop() {
                sum = sum.wrapping_add(u32::from(byte));
            }
            black_box(sum)
        })
    });
    group.finish();
}
