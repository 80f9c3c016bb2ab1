use std::io::{self, Stdin};

use reqwest::blocking::Body;

/// Where the payload for the webhook comes from.
pub enum ScanResults {
    /// Piped in by the caller; streamed to the webhook as it is read.
    Stdin(Stdin),
    /// Combined output of a scanner run.
    Captured(Vec<u8>),
}

impl ScanResults {
    pub fn stdin() -> ScanResults {
        ScanResults::Stdin(io::stdin())
    }

    /// No scanner arguments at all, or a lone "-", means the results are
    /// being piped in instead.
    pub fn reads_stdin(args: &[String]) -> bool {
        match args {
            [] => true,
            [arg] => arg == "-",
            _ => false,
        }
    }
}

impl From<ScanResults> for Body {
    fn from(results: ScanResults) -> Body {
        match results {
            ScanResults::Stdin(stdin) => Body::new(stdin),
            ScanResults::Captured(output) => Body::from(output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn test_reads_stdin() {
        assert!(ScanResults::reads_stdin(&[]));
        assert!(ScanResults::reads_stdin(&strings(&["-"])));

        assert!(!ScanResults::reads_stdin(&strings(&["image"])));
        assert!(!ScanResults::reads_stdin(&strings(&["-", "image"])));
        assert!(!ScanResults::reads_stdin(&strings(&["image", "alpine:3.10"])));
    }

    #[test]
    fn test_captured_body_is_buffered() {
        let body = Body::from(ScanResults::Captured(b"{\"Results\":[]}".to_vec()));
        assert_eq!(body.as_bytes(), Some(&b"{\"Results\":[]}"[..]));
    }
}
