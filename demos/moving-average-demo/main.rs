use log::LevelFilter;
use movavg::{CircularQueueMovingAverageCalculator, MovingAverageCalculator, NumericEnumeration};
use simplelog::{ConfigBuilder, SimpleLogger};

const DEFAULT_CAPACITY: usize = 3;

/// Feeds every numeric argument to a calculator and logs the moving average as it goes.
///
/// `cargo run --example moving-average-demo -- --capacity 3 2 4 6 8 10`
pub fn main() -> Result<(), movavg::Error> {
    let _ = SimpleLogger::init(
        LevelFilter::Trace,
        ConfigBuilder::new().set_time_level(LevelFilter::Off).build(),
    );

    let (capacity, samples) = parse_args(std::env::args().skip(1));

    let mut calculator = CircularQueueMovingAverageCalculator::new(capacity)?;
    for sample in samples {
        calculator.add(sample);
        log::info!("Added {}, moving average is {}", sample, calculator.moving_average());
    }

    let mut window = Vec::with_capacity(calculator.len());
    let mut samples = calculator.iterator();
    while samples.has_more_elements()? {
        window.push(samples.next_element()?);
    }
    log::info!("Retained samples, oldest first: {:?}", window);

    // any modification invalidates the enumeration above
    calculator.add(0.0);
    if let Err(e) = samples.has_more_elements() {
        log::warn!("{}", e);
    }

    Ok(())
}

/// Reads an optional leading `--capacity N`, then samples. Anything that does not parse is
/// logged and skipped.
fn parse_args(args: impl Iterator<Item = String>) -> (usize, Vec<f64>) {
    let mut args = args.peekable();
    let capacity = match args.peek().map(String::as_str) {
        Some("--capacity") => {
            args.next();
            match args.next() {
                Some(arg) => arg.parse::<usize>().unwrap_or_else(|e| {
                    log::warn!(
                        "Ignoring capacity {:?} ({}), using {}",
                        arg,
                        e,
                        DEFAULT_CAPACITY
                    );
                    DEFAULT_CAPACITY
                }),
                None => {
                    log::warn!("--capacity needs a value, using {}", DEFAULT_CAPACITY);
                    DEFAULT_CAPACITY
                }
            }
        }
        _ => DEFAULT_CAPACITY,
    };
    let samples = args
        .filter_map(|arg| match arg.parse::<f64>() {
            Ok(sample) => Some(sample),
            Err(e) => {
                log::warn!("Skipping {:?}, not a sample ({})", arg, e);
                None
            }
        })
        .collect();
    (capacity, samples)
}
