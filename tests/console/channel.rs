use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use uartcon::console::ReceiveChannel;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_interleaving_preserves_order() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut channel: ReceiveChannel<64> = ReceiveChannel::new();
        let (mut producer, mut consumer) = channel.split();

        let mut next_push = 0u32;
        let mut next_pop = 0u32;
        for _ in 0..10_000 {
            let backlog = next_push - next_pop;
            if backlog < 64 && rng.gen_bool(0.5) {
                producer.push(next_push as u8);
                next_push += 1;
            } else if let Some(byte) = consumer.pop() {
                assert_eq!(byte, next_pop as u8);
                next_pop += 1;
            }
        }

        while let Some(byte) = consumer.pop() {
            assert_eq!(byte, next_pop as u8);
            next_pop += 1;
        }
        assert_eq!(next_pop, next_push);
    }

    #[test]
    fn test_saturation_loses_only_the_oldest() {
        const CAPACITY: usize = 32;
        let mut channel: ReceiveChannel<CAPACITY> = ReceiveChannel::new();
        let (mut producer, mut consumer) = channel.split();

        for byte in 0..=CAPACITY as u8 {
            producer.push(byte);
        }

        let drained: Vec<u8> = consumer.by_ref().collect();
        let expected: Vec<u8> = (1..=CAPACITY as u8).collect();
        assert_eq!(drained, expected);
    }

    #[test]
    fn test_heavy_overrun_keeps_last_window() {
        let mut channel: ReceiveChannel<16> = ReceiveChannel::new();
        let (mut producer, mut consumer) = channel.split();

        for byte in 0..200u8 {
            producer.push(byte);
        }

        let drained: Vec<u8> = consumer.by_ref().collect();
        let expected: Vec<u8> = (184..200u8).collect();
        assert_eq!(drained, expected);
    }

    #[test]
    fn test_threaded_producer_consumer() {
        const TOTAL: usize = 100_000;
        const CAPACITY: usize = 1024;
        let mut channel: ReceiveChannel<CAPACITY> = ReceiveChannel::new();
        channel.reset();
        let (mut producer, mut consumer) = channel.split();
        let consumed = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            let receiver = scope.spawn(|| {
                let mut received = Vec::with_capacity(TOTAL);
                while received.len() < TOTAL {
                    match consumer.pop() {
                        Some(byte) => {
                            received.push(byte);
                            consumed.store(received.len(), Ordering::Release);
                        }
                        None => std::hint::spin_loop(),
                    }
                }
                received
            });

            scope.spawn(|| {
                for sent in 0..TOTAL {
                    // Throttle so the ring never overruns.
                    while sent - consumed.load(Ordering::Acquire) >= CAPACITY {
                        std::hint::spin_loop();
                    }
                    producer.push((sent % 251) as u8);
                }
            });

            let received = receiver.join().unwrap();
            assert_eq!(received.len(), TOTAL);
            for (i, byte) in received.into_iter().enumerate() {
                assert_eq!(byte, (i % 251) as u8, "byte {} out of order", i);
            }
        });
    }

    #[test]
    fn test_threaded_overrun_reads_only_written_bytes() {
        const TOTAL: u8 = 200;
        let mut channel: ReceiveChannel<16> = ReceiveChannel::new();
        let (mut producer, mut consumer) = channel.split();
        let done = AtomicBool::new(false);

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for byte in 0..TOTAL {
                    producer.push(byte);
                }
                done.store(true, Ordering::Release);
            });

            let mut received = Vec::new();
            loop {
                match consumer.pop() {
                    Some(byte) => received.push(byte),
                    None if done.load(Ordering::Acquire) => {
                        received.extend(consumer.by_ref());
                        break;
                    }
                    None => std::hint::spin_loop(),
                }
            }

            assert!(!received.is_empty());
            assert!(received.len() <= TOTAL as usize);
            assert!(received.iter().all(|&byte| byte < TOTAL));
            assert_eq!(received.last(), Some(&(TOTAL - 1)));
        });
    }
}
