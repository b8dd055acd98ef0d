use clicklock::supervisor;
use log::error;
use std::env;
use std::ffi::OsString;
use std::process;

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    Version,
    Usage,
    Lock { companion: Option<Vec<OsString>> },
}

/// Only `-v`/`-h` as the sole argument are flags; any other argv is the
/// companion command to run once the lock is in place.
fn parse_invocation(args: &[OsString]) -> Invocation {
    match args {
        [] => Invocation::Lock { companion: None },
        [flag] if flag == "-v" || flag == "--version" => Invocation::Version,
        [flag] if flag == "-h" || flag == "--help" => Invocation::Usage,
        command => Invocation::Lock {
            companion: Some(command.to_vec()),
        },
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<OsString> = env::args_os().skip(1).collect();
    let status = match parse_invocation(&args) {
        Invocation::Version => {
            eprintln!("clicklock {}", env!("CARGO_PKG_VERSION"));
            1
        }
        Invocation::Usage => {
            eprintln!("usage: clicklock [-v|-h|CMD [ARG...]]");
            1
        }
        Invocation::Lock { companion } => match supervisor::run(companion.as_deref()) {
            Ok(()) => 0,
            Err(err) => {
                error!("{err}");
                1
            }
        },
    };
    process::exit(status);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_no_arguments_locks_without_companion() {
        assert_eq!(
            parse_invocation(&args(&[])),
            Invocation::Lock { companion: None }
        );
    }

    #[test]
    fn test_lone_flags_are_recognized() {
        assert_eq!(parse_invocation(&args(&["-v"])), Invocation::Version);
        assert_eq!(parse_invocation(&args(&["--version"])), Invocation::Version);
        assert_eq!(parse_invocation(&args(&["-h"])), Invocation::Usage);
        assert_eq!(parse_invocation(&args(&["--help"])), Invocation::Usage);
    }

    #[test]
    fn test_anything_else_becomes_the_companion_command() {
        assert_eq!(
            parse_invocation(&args(&["xclock", "-digital"])),
            Invocation::Lock {
                companion: Some(args(&["xclock", "-digital"])),
            }
        );
    }

    #[test]
    fn test_flags_with_extra_arguments_are_a_command() {
        // `-v more` is not a version request; it is a command named `-v`.
        assert_eq!(
            parse_invocation(&args(&["-v", "more"])),
            Invocation::Lock {
                companion: Some(args(&["-v", "more"])),
            }
        );
    }
}
