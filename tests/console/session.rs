use std::collections::VecDeque;
use std::sync::{Arc, Mutex, OnceLock};

use uartcon::console::handlers::{NativeKernel, NibbleDecoder, NoFileSystem, Services};
use uartcon::console::io::FnOutput;
use uartcon::console::{Console, ConsoleConfig, ErrorCode, ReceiveChannel, RxSource, SerialOutput};

/// Thread-safe capture for the callback-based output
static CALLBACK_OUTPUT: OnceLock<Arc<Mutex<VecDeque<String>>>> = OnceLock::new();

fn get_callback_buffer() -> &'static Arc<Mutex<VecDeque<String>>> {
    CALLBACK_OUTPUT.get_or_init(|| Arc::new(Mutex::new(VecDeque::new())))
}

fn callback_output_fn(text: &str) {
    get_callback_buffer()
        .lock()
        .unwrap()
        .push_back(text.to_string());
}

fn take_callback_output() -> String {
    let mut buf = get_callback_buffer().lock().unwrap();
    buf.drain(..).collect::<Vec<_>>().join("")
}

/// Receive FIFO of a simulated UART.
struct MockUart {
    pending: VecDeque<u8>,
}

impl MockUart {
    fn new(input: &[u8]) -> Self {
        Self {
            pending: input.iter().copied().collect(),
        }
    }
}

impl RxSource for MockUart {
    fn read_byte(&mut self) -> Option<u8> {
        self.pending.pop_front()
    }
}

#[derive(Default)]
struct Transcript(String);

impl SerialOutput for Transcript {
    fn put_byte(&mut self, byte: u8) {
        self.0.push(byte as char);
    }
}

/// Run `input` through the interrupt path and the console loop, returning
/// the per-line results and everything printed.
fn run_session(input: &[u8], config: ConsoleConfig) -> (Vec<ErrorCode>, String) {
    let mut channel: ReceiveChannel<256> = ReceiveChannel::new();
    channel.reset();
    let (mut producer, consumer) = channel.split();

    let mut uart = MockUart::new(input);
    assert_eq!(producer.service(&mut uart), input.len());

    let mut transcript = Transcript::default();
    let mut kernel = NativeKernel;
    let mut files = NoFileSystem;
    let mut services = Services {
        output: &mut transcript,
        hex: &NibbleDecoder,
        kernel: &mut kernel,
        files: &mut files,
    };

    let mut console = Console::new(consumer, config);
    let mut results = Vec::new();
    for _ in 0..input.len() {
        if let Some(code) = console.poll(&mut services) {
            results.push(code);
        }
    }
    assert!(console.poll(&mut services).is_none());

    (results, transcript.0)
}

fn quiet() -> ConsoleConfig {
    ConsoleConfig {
        echo: false,
        ..ConsoleConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_command_lines() {
        let lines: [&[u8]; 11] = [
            b"  hex          313233  ",
            b"hex qqqq",
            b"hex ",
            b" type  ",
            b"  fmul  41520000    41520000      ",
            b"fadd 41520000  41520000",
            b"fenc  FFFFFFF3  20000000",
            b"fmul 1234568     7654321",
            b"frob",
            b"",
            b"    ",
        ];
        let input: Vec<u8> = lines
            .iter()
            .flat_map(|line| line.iter().copied().chain([b'\r']))
            .collect();
        let (results, output) = run_session(&input, quiet());

        assert_eq!(
            results,
            vec![
                ErrorCode::Ok,
                ErrorCode::InvalidHex,
                ErrorCode::TooFewArgs,
                ErrorCode::TooFewArgs,
                ErrorCode::Ok,
                ErrorCode::Ok,
                ErrorCode::Ok,
                ErrorCode::InvalidArgSize,
                ErrorCode::UnknownCommand,
                ErrorCode::Ok,
                ErrorCode::Ok,
            ]
        );
        assert_eq!(
            output,
            concat!(
                "The string: 123\n\r",
                "Invalid Hex Argument\n\r",
                "Too Few Arguments.\n\r",
                "Too Few Arguments.\n\r",
                "432C4400 \n\r",
                "41D20000 \n\r",
                "C1520000 \n\r",
                "Invalid Argument Size.\n\r",
                "Syntax Error\n\r",
            )
        );
    }

    #[test]
    fn test_backspace_edits_before_dispatch() {
        let (results, output) = run_session(b"hexx\x08 3132\x7f\x7f32\r", quiet());
        assert_eq!(results, vec![ErrorCode::Ok]);
        assert_eq!(output, "The string: 12\n\r");
    }

    #[test]
    fn test_echo_includes_line_feed() {
        let (results, output) = run_session(b"frob\r", ConsoleConfig::default());
        assert_eq!(results, vec![ErrorCode::UnknownCommand]);
        assert_eq!(output, "frob\r\nSyntax Error\n\r");
    }

    #[test]
    fn test_overlong_line_does_not_leak_into_next() {
        let mut input = vec![b'x'; 300];
        input.extend_from_slice(b"\rhex 4142\r");

        let mut channel: ReceiveChannel<512> = ReceiveChannel::new();
        let (mut producer, consumer) = channel.split();
        producer.service(&mut MockUart::new(&input));

        let mut transcript = Transcript::default();
        let mut kernel = NativeKernel;
        let mut files = NoFileSystem;
        let mut services = Services {
            output: &mut transcript,
            hex: &NibbleDecoder,
            kernel: &mut kernel,
            files: &mut files,
        };
        let mut console = Console::new(consumer, quiet());

        assert_eq!(console.drain(&mut services), 2);
        assert_eq!(transcript.0, "Syntax Error\n\rThe string: AB\n\r");
    }

    #[test]
    fn test_custom_terminator() {
        let config = ConsoleConfig::from_json(r#"{"echo":false,"terminator":10}"#).unwrap();
        let (results, output) = run_session(b"hex 41\nhex 42\r", config);
        assert_eq!(results, vec![ErrorCode::Ok]);
        assert_eq!(output, "The string: A\n\r");
    }

    #[test]
    fn test_callback_output() {
        let mut channel: ReceiveChannel<64> = ReceiveChannel::new();
        let (mut producer, consumer) = channel.split();
        producer.service(&mut MockUart::new(b"hex 414243\r"));

        let mut output = FnOutput(callback_output_fn);
        let mut kernel = NativeKernel;
        let mut files = NoFileSystem;
        let mut services = Services {
            output: &mut output,
            hex: &NibbleDecoder,
            kernel: &mut kernel,
            files: &mut files,
        };
        let mut console = Console::new(consumer, ConsoleConfig::default());

        take_callback_output();
        assert_eq!(console.drain(&mut services), 1);
        assert_eq!(take_callback_output(), "hex 414243\r\nThe string: ABC\n\r");
    }
}
