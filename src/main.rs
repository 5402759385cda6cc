use std::{
    io::{self, Write},
    process,
};

use clap::{builder::PossibleValuesParser, command, Parser};
use log::{debug, error, LevelFilter};
use serde::{ser::SerializeSeq, Serializer};

use uuid4::{
    config::{Config, Output},
    error::Result,
    rand::{OsRandom, SecureRandom},
    Uuid,
};

/// Profile to display when not built in release mode.
#[cfg(debug_assertions)]
const BUILD_PROFILE: &str = "debug";
/// Profile to display when built in release mode.
#[cfg(not(debug_assertions))]
const BUILD_PROFILE: &str = "release";

/// Group name for mutually exclusive logging options.
const ARGS_GROUP_LOGGING: &str = "logging";

/// Command line arguments as parsed by `clap`.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of identifiers to generate
    #[arg(short = 'n', long, value_name = "N", default_value_t = 1)]
    count: usize,

    /// Output format
    ///
    /// `canonical` prints one identifier per line, `bytes` prints the raw
    /// layout of each identifier and `json` prints a single array.
    #[arg(
        short,
        long,
        value_name = "FORMAT",
        default_value = "canonical",
        value_parser = PossibleValuesParser::new(Output::VARIANTS),
    )]
    format: String,

    /// Suppresses all output except warnings and errors.
    #[arg(short, long, default_value_t = false, group = ARGS_GROUP_LOGGING)]
    quiet: bool,

    /// Enable verbose logging
    ///
    /// Specify twice for trace logging.
    #[arg(short, long, action = clap::ArgAction::Count, group = ARGS_GROUP_LOGGING)]
    verbose: u8,
}

/// Initializes the logger facade.
///
/// The logging level is determined as follows, in order of precedence from
/// highest to lowest:
/// 1. Command line arguments
/// 2. `RUST_LOG` environment variable
/// 3. Hard coded default
///
/// # Panics
///
/// Panics when a logger facade is already initialized.
fn init_logger(config: &Args) {
    let mut logger = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    if config.quiet || config.verbose > 0 {
        let level = match config.verbose {
            // Quiet and verbose are mutually exclusive, so this is quiet mode.
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        // Both the binary and the library log under the crate name.
        logger.filter_module(module_path!(), level);
    }

    logger.init();
}

/// Writes the raw layout of `uuid`: byte count, version nibble and variant
/// bits, in decimal.
fn write_layout(out: &mut impl Write, uuid: &Uuid) -> io::Result<()> {
    writeln!(out, "uuid v4 bytes: {}", uuid.len())?;
    writeln!(out, "version nibble: {}", uuid.version_num())?;
    writeln!(out, "variant bits  : {}", (uuid[8] & 0xc0) >> 6)
}

/// Generates `config.count` identifiers from `rng` and writes each one to
/// `out` as soon as it is drawn.
///
/// Stops at the first entropy failure; nothing is retried. Whatever was
/// written before the failure stays written.
fn run<R: SecureRandom>(config: &Config, mut rng: R, out: &mut impl Write) -> Result<()> {
    let count = config.count.get();

    match config.output {
        Output::Canonical => {
            for _ in 0..count {
                let id = Uuid::new_v4_from(&mut rng)?;
                writeln!(out, "{id}")?;
            }
        }
        Output::Bytes => {
            for _ in 0..count {
                let id = Uuid::new_v4_from(&mut rng)?;
                write_layout(out, &id)?;
            }
        }
        Output::Json => {
            let mut serializer = serde_json::Serializer::new(&mut *out);
            let mut seq = serializer.serialize_seq(Some(count))?;
            for _ in 0..count {
                let id = Uuid::new_v4_from(&mut rng)?;
                seq.serialize_element(&id)?;
            }
            seq.end()?;
            writeln!(out)?;
        }
    }
    debug!("generated {count} identifiers");

    out.flush()?;
    Ok(())
}

/// Main entry point of the application.
fn main() {
    let args = Args::parse();
    init_logger(&args);

    debug!("Command {:#?}", args);

    let cmd = command!();
    let name = cmd.get_name().to_string();
    let version = cmd.get_version().unwrap_or("UNKNOWN").to_string();
    debug!("starting {name}/{version}; {BUILD_PROFILE}");

    let result = Config::new(args.count, &args.format)
        .and_then(|config| run(&config, OsRandom, &mut io::stdout().lock()));

    if let Err(e) = result {
        error!("{e}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid4::error::{Error, ErrorKind};

    fn render(count: usize, format: &str) -> String {
        let config = Config::new(count, format).unwrap();
        let mut out = Vec::new();
        run(&config, OsRandom, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    /// Delivers `remaining` draws of a fixed byte, then runs dry.
    struct Draining {
        remaining: usize,
    }

    impl SecureRandom for Draining {
        fn fill_random(&mut self, dest: &mut [u8]) -> Result<()> {
            if self.remaining == 0 {
                return Err(Error::unavailable("entropy pool empty"));
            }
            self.remaining -= 1;
            dest.fill(0x11);
            Ok(())
        }
    }

    fn render_until_dry(count: usize, format: &str, draws: usize) -> (ErrorKind, String) {
        let config = Config::new(count, format).unwrap();
        let mut out = Vec::new();
        let err = run(&config, Draining { remaining: draws }, &mut out).unwrap_err();
        (err.kind, String::from_utf8(out).unwrap())
    }

    #[test]
    fn canonical_writes_each_id_before_the_next_draw() {
        let (kind, text) = render_until_dry(1_000, "canonical", 2);
        assert_eq!(kind, ErrorKind::Unavailable);
        assert_eq!(
            text,
            "11111111-1111-4111-9111-111111111111\n\
             11111111-1111-4111-9111-111111111111\n"
        );
    }

    #[test]
    fn bytes_writes_each_layout_before_the_next_draw() {
        let (kind, text) = render_until_dry(1_000, "bytes", 1);
        assert_eq!(kind, ErrorKind::Unavailable);
        assert_eq!(
            text,
            "uuid v4 bytes: 16\nversion nibble: 4\nvariant bits  : 2\n"
        );
    }

    #[test]
    fn json_streams_elements_before_the_next_draw() {
        let (kind, text) = render_until_dry(1_000, "json", 2);
        assert_eq!(kind, ErrorKind::Unavailable);
        assert_eq!(
            text,
            "[\"11111111-1111-4111-9111-111111111111\",\"11111111-1111-4111-9111-111111111111\""
        );
    }

    #[test]
    fn canonical_prints_one_per_line() {
        let text = render(5, "canonical");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        for line in lines {
            assert_eq!(line.len(), uuid4::CANONICAL_LEN);
            assert_eq!(&line[14..15], "4");
        }
    }

    #[test]
    fn bytes_prints_layout() {
        let text = render(1, "bytes");
        assert_eq!(
            text,
            "uuid v4 bytes: 16\nversion nibble: 4\nvariant bits  : 2\n"
        );
    }

    #[test]
    fn json_prints_array() {
        let text = render(3, "json");
        let ids: Vec<String> = serde_json::from_str(&text).unwrap();
        assert_eq!(ids.len(), 3);
        assert!(ids.iter().all(|id| id.len() == uuid4::CANONICAL_LEN));
    }

    #[test]
    fn args_parse_short_flags() {
        let args = Args::try_parse_from(["uuid4", "-n", "2", "-f", "bytes", "-vv"]).unwrap();
        assert_eq!(args.count, 2);
        assert_eq!(args.format, "bytes");
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn args_reject_quiet_with_verbose() {
        assert!(Args::try_parse_from(["uuid4", "-q", "-v"]).is_err());
    }

    #[test]
    fn args_reject_unknown_format() {
        assert!(Args::try_parse_from(["uuid4", "--format", "urn"]).is_err());
    }
}
