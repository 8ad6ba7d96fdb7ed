use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use aquatag_core::notifier::FlagLines;

/// Read flag patterns from stdin and feed them to the notifier.
///
/// Each line is a sample of the three flag lines, e.g. `101` or `1 0 1`.
/// A line stands in for one rising edge on the interrupt pin; the flag
/// values are whatever was on the wire at that moment.
pub async fn run_stdin(tx: mpsc::Sender<FlagLines>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match parse_flags(&line) {
            Some(flags) => {
                if tx.send(flags).await.is_err() {
                    break;
                }
            },
            None => tracing::debug!(line, "Ignored malformed stimulus line"),
        }
    }
}

/// Parse a stimulus line into a flag sample. Separators (spaces, commas)
/// are ignored; exactly three binary digits must remain.
pub fn parse_flags(line: &str) -> Option<FlagLines> {
    let mut bits = [false; 3];
    let mut n = 0;
    for c in line.chars() {
        match c {
            '0' | '1' => {
                if n == 3 {
                    return None;
                }
                bits[n] = c == '1';
                n += 1;
            },
            ' ' | ',' | '\t' => {},
            _ => return None,
        }
    }
    if n == 3 {
        Some(FlagLines::new(bits[0], bits[1], bits[2]))
    } else {
        None
    }
}
