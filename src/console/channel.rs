//! Lock-free receive channel between the UART interrupt and the console loop.
//!
//! A fixed-capacity circular byte buffer with one writer per cursor:
//!
//! ```text
//!   interrupt context              foreground loop
//!  ┌───────────────┐             ┌───────────────┐
//!  │   Producer    │── head ──▶  │   Consumer    │
//!  │ (writes head) │  ◀── tail ──│ (writes tail) │
//!  └───────────────┘             └───────────────┘
//!            \                        /
//!             ▼                      ▼
//!           ┌──────────────────────────┐
//!           │   buffer[N], N = 2^k     │
//!           └──────────────────────────┘
//! ```
//!
//! Both cursors are free-running counters; the slot index is the counter
//! masked by `N - 1`. The channel is empty when `head == tail`.
//!
//! There is no backpressure. A producer that gets more than `N` bytes ahead
//! overwrites the oldest unread bytes. The consumer notices on its next pop
//! and skips forward so that the newest `N` bytes still come out in order.
//!
//! # Usage
//!
//! ```rust
//! use uartcon::console::channel::ReceiveChannel;
//!
//! let mut channel: ReceiveChannel<16> = ReceiveChannel::new();
//! channel.reset();
//! let (mut producer, mut consumer) = channel.split();
//!
//! producer.push(b'o');
//! producer.push(b'k');
//! assert_eq!(consumer.pop(), Some(b'o'));
//! assert_eq!(consumer.pop(), Some(b'k'));
//! assert_eq!(consumer.pop(), None);
//! ```
//!
//! For an interrupt handler the channel normally lives in a `static` cell and
//! the [`Producer`] half is moved into the handler once at start-up.

use core::fmt;
use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use super::io::RxSource;

/// Default receive capacity in bytes.
pub const RX_CAPACITY: usize = 4096;

/// Fixed-capacity single-producer/single-consumer byte ring.
///
/// `N` must be a power of two; other sizes fail to compile when
/// [`ReceiveChannel::new`] is instantiated.
pub struct ReceiveChannel<const N: usize = RX_CAPACITY> {
    /// Slots are atomic so an overrunning producer and a reader of the same
    /// slot never race; the byte read is then stale, not undefined.
    buffer: [AtomicU8; N],
    /// Next slot to write. Stored only by the producer.
    head: AtomicUsize,
    /// Next slot to read. Stored only by the consumer.
    tail: AtomicUsize,
}

impl<const N: usize> ReceiveChannel<N> {
    const MASK: usize = {
        assert!(N.is_power_of_two(), "receive capacity must be a power of two");
        N - 1
    };

    /// Create an empty channel.
    pub const fn new() -> Self {
        let _ = Self::MASK;
        Self {
            buffer: [const { AtomicU8::new(0) }; N],
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
        }
    }

    /// Capacity in bytes.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Zero both cursors, discarding anything unread.
    ///
    /// Call once before the console loop starts; the exclusive borrow
    /// guarantees neither half is live.
    pub fn reset(&mut self) {
        *self.head.get_mut() = 0;
        *self.tail.get_mut() = 0;
        trace!("rx channel reset");
    }

    /// Split into the producer and consumer halves.
    ///
    /// The halves borrow the channel exclusively, so at most one pair is
    /// live at a time. Splitting again after both are dropped yields a new
    /// pair over the same cursors; unread bytes are kept until
    /// [`reset`](Self::reset).
    ///
    /// ```compile_fail
    /// use uartcon::console::channel::ReceiveChannel;
    ///
    /// let mut channel: ReceiveChannel<8> = ReceiveChannel::new();
    /// let (mut producer, _) = channel.split();
    /// let (_, mut consumer) = channel.split();
    /// producer.push(1);
    /// consumer.pop();
    /// ```
    pub fn split(&mut self) -> (Producer<'_, N>, Consumer<'_, N>) {
        let channel: &Self = self;
        (Producer { channel }, Consumer { channel })
    }

    fn slot(&self, counter: usize) -> &AtomicU8 {
        &self.buffer[counter & Self::MASK]
    }

    fn pending(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        head.wrapping_sub(tail).min(N)
    }
}

impl<const N: usize> Default for ReceiveChannel<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for ReceiveChannel<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiveChannel")
            .field("capacity", &N)
            .field("head", &self.head.load(Ordering::Relaxed))
            .field("tail", &self.tail.load(Ordering::Relaxed))
            .finish()
    }
}

/// Writing half, owned by the interrupt context.
pub struct Producer<'a, const N: usize = RX_CAPACITY> {
    channel: &'a ReceiveChannel<N>,
}

impl<const N: usize> Producer<'_, N> {
    /// Store one byte. Never blocks and never fails; when the ring is full
    /// the oldest unread byte is overwritten.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        let head = self.channel.head.load(Ordering::Relaxed);
        // Published to the consumer by the release store below.
        self.channel.slot(head).store(byte, Ordering::Relaxed);
        self.channel
            .head
            .store(head.wrapping_add(1), Ordering::Release);
    }

    /// Move every byte the transport has pending into the channel.
    ///
    /// Returns the number of bytes moved.
    pub fn service<S: RxSource + ?Sized>(&mut self, source: &mut S) -> usize {
        let mut moved = 0;
        while let Some(byte) = source.read_byte() {
            self.push(byte);
            moved += 1;
        }
        moved
    }
}

impl<const N: usize> fmt::Debug for Producer<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("channel", self.channel)
            .finish()
    }
}

/// Reading half, owned by the foreground console loop.
pub struct Consumer<'a, const N: usize = RX_CAPACITY> {
    channel: &'a ReceiveChannel<N>,
}

impl<const N: usize> Consumer<'_, N> {
    /// Take the oldest unread byte, or `None` when the channel is empty.
    pub fn pop(&mut self) -> Option<u8> {
        let head = self.channel.head.load(Ordering::Acquire);
        let mut tail = self.channel.tail.load(Ordering::Relaxed);
        if head == tail {
            return None;
        }

        let pending = head.wrapping_sub(tail);
        if pending > N {
            warn!("rx overrun, {} bytes lost", pending - N);
            tail = head.wrapping_sub(N);
        }

        // `tail` lies in the published window `[head - N, head)`. An
        // overrunning producer may already be rewriting this slot.
        let byte = self.channel.slot(tail).load(Ordering::Relaxed);
        self.channel
            .tail
            .store(tail.wrapping_add(1), Ordering::Release);
        Some(byte)
    }

    /// Number of unread bytes, at most `N`.
    pub fn len(&self) -> usize {
        self.channel.pending()
    }

    /// True when nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const N: usize> Iterator for Consumer<'_, N> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        self.pop()
    }
}

impl<const N: usize> fmt::Debug for Consumer<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer")
            .field("channel", self.channel)
            .finish()
    }
}
