use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use radix_steps::{Conversion, Converter, ConverterConfig, SubnormalMode};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Print only the result, without the explanation
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Maximum number of cached conversions (0 disables the cache)
    #[arg(long, default_value_t = 1024, global = true)]
    cache: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect the smallest base (2, 8, 10 or 16) that accepts a digit string
    Detect { digits: String },

    /// Convert a digit string between bases 2, 8, 10 and 16
    Base {
        digits: String,
        /// Source base; detected from the digits when omitted
        #[arg(long)]
        from: Option<u32>,
        #[arg(long)]
        to: u32,
    },

    /// Convert a digit string to every other supported base
    All {
        digits: String,
        #[arg(long)]
        from: Option<u32>,
    },

    /// Two's complement representation of a decimal integer
    Signed {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(long, default_value_t = 8)]
        bits: u32,
    },

    /// Binary expansion of a real number
    Float {
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Maximum number of fractional bits
        #[arg(long, default_value_t = 10)]
        precision: i32,
    },

    /// Encode a real number as an IEEE 754 bit string
    Encode {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(long, default_value_t = 32)]
        bits: u32,
    },

    /// Decode a 32 or 64 character IEEE 754 bit string
    Decode {
        bits: String,
        /// Reconstruct subnormal values instead of flushing them to zero
        #[arg(long)]
        gradual: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn print_conversion<T: std::fmt::Display>(conversion: &Conversion<T>, quiet: bool) {
    if !quiet {
        println!("{}", conversion.explanation);
        println!();
    }
    println!("{}", conversion.value);
}

fn source_base(converter: &Converter, digits: &str, from: Option<u32>) -> Result<u32> {
    match from {
        Some(base) => Ok(base),
        None => {
            let base = converter
                .detect_base(digits)
                .with_context(|| format!("cannot detect the base of {digits:?}"))?;
            log::info!("detected base {base} for {digits:?}");
            Ok(base.radix())
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let subnormals = match &args.command {
        Command::Decode { gradual: true, .. } => SubnormalMode::Gradual,
        _ => SubnormalMode::FlushToZero,
    };
    let converter = Converter::new(ConverterConfig {
        cache_capacity: args.cache,
        subnormals,
        ..ConverterConfig::default()
    });

    match &args.command {
        Command::Detect { digits } => {
            let base = converter.detect_base(digits)?;
            println!("{base}");
        }
        Command::Base { digits, from, to } => {
            let from = source_base(&converter, digits, *from)?;
            let conversion = converter
                .convert_base(digits, from, *to)
                .with_context(|| format!("converting {digits} from base {from} to base {to}"))?;
            print_conversion(&conversion, args.quiet);
        }
        Command::All { digits, from } => {
            let from = source_base(&converter, digits, *from)?;
            for (base, value) in converter.convert_to_all_bases(digits, from)? {
                if args.quiet {
                    println!("{value}");
                } else {
                    println!("base {base}: {value}");
                }
            }
        }
        Command::Signed { value, bits } => {
            let conversion = converter.convert_to_signed_binary(value, *bits)?;
            print_conversion(&conversion, args.quiet);
        }
        Command::Float { value, precision } => {
            let conversion = converter.convert_float_to_binary(value, *precision)?;
            print_conversion(&conversion, args.quiet);
        }
        Command::Encode { value, bits } => {
            let number: f64 = value
                .trim()
                .parse()
                .with_context(|| format!("{value:?} is not a real number"))?;
            let conversion = converter.decimal_to_ieee754(number, *bits)?;
            print_conversion(&conversion, args.quiet);
        }
        Command::Decode { bits, .. } => {
            let conversion = converter.ieee754_to_decimal(bits)?;
            print_conversion(&conversion, args.quiet);
        }
    }

    log::debug!("cache: {:?}", converter.stats());
    Ok(())
}
