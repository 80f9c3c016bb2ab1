/// Everything after the first one of these is handed to the scanner.
pub const SEPARATOR: &str = "--";

/// A flag appended to the scanner's arguments unless the caller already set
/// something like it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultFlag {
    name: &'static str,
    arg: String,
}

impl DefaultFlag {
    /// `--name`
    pub fn switch(name: &'static str) -> DefaultFlag {
        DefaultFlag {
            name,
            arg: format!("--{name}"),
        }
    }

    /// `--name=value`
    pub fn value(name: &'static str, value: &str) -> DefaultFlag {
        DefaultFlag {
            name,
            arg: format!("--{name}={value}"),
        }
    }

    // Loose on purpose: any argument containing the name counts, so
    // "--skip-dirs=timeouts" suppresses the timeout default.
    fn is_present(&self, args: &[String]) -> bool {
        args.iter().any(|arg| arg.contains(self.name))
    }
}

/// Returns the index of the first scanner argument, or `None` when there is
/// no separator or nothing follows it.
pub fn find_separator(args: &[String]) -> Option<usize> {
    let sep = args.iter().position(|arg| arg == SEPARATOR)?;

    if sep + 1 < args.len() {
        Some(sep + 1)
    } else {
        None
    }
}

pub fn inject_defaults(mut args: Vec<String>, defaults: &[DefaultFlag]) -> Vec<String> {
    for flag in defaults {
        if !flag.is_present(&args) {
            args.push(flag.arg.clone());
        }
    }

    args
}
