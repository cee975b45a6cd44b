use super::ConfigArgs;
use crate::config::{Config, Format};
use anyhow::{Context, Result, bail};
use clap::Args;
use maccel_core::{
    AccelParams, Accelerator, Displacement, Fixed32, Fixed64, FixedError, FixedPoint, SpeedEcho,
    speed::EuclideanSpeed,
    trace::{Trace, TracingTrace},
};
use std::{
    fmt::Write as _,
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
    str::FromStr,
};

#[derive(Args)]
pub struct SimulateArgs {
    /// Samples to replay, one `dx dy interval_ms` per line. Reads stdin when omitted.
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Totals over one replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub samples: usize,
    pub input: (i64, i64),
    pub output: (i64, i64),
}

impl SimulateArgs {
    pub fn run(&self) -> Result<()> {
        let config = self.config.load()?;
        let input: Box<dyn BufRead> = match &self.input {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open samples {}", path.display()))?;
                Box::new(BufReader::new(file))
            }
            None => Box::new(io::stdin().lock()),
        };
        let out = io::stdout().lock();

        let summary = match config.format {
            Format::Q16_16 => replay::<Fixed32, _, _>(&config, input, out)?,
            Format::Q32_32 => replay::<Fixed64, _, _>(&config, input, out)?,
        };
        tracing::info!(
            samples = summary.samples,
            "replayed input ({}, {}) -> output ({}, {})",
            summary.input.0,
            summary.input.1,
            summary.output.0,
            summary.output.1,
        );
        Ok(())
    }
}

/// Feed every sample in `input` through one accelerator and write a line per
/// sample to `out`: `<in_x> <in_y> -> <out_x> <out_y> speed=<speed> echo=<hex>`.
pub fn replay<F, R, W>(config: &Config, input: R, out: W) -> Result<Summary>
where
    F: FixedPoint + FromStr<Err = FixedError>,
    R: BufRead,
    W: Write,
{
    let params = config.accel_params::<F>()?;
    let echo = SpeedEcho::<F>::new();
    let accel = Accelerator::<F>::new(config.arith()).with_echo(echo.clone());

    if config.trace {
        if !tracing::enabled!(target: "maccel", tracing::Level::DEBUG) {
            tracing::warn!("trace is enabled but debug logging is off; run with --verbose");
        }
        drive(accel.with_trace(TracingTrace), &params, &echo, input, out)
    } else {
        drive(accel, &params, &echo, input, out)
    }
}

fn drive<F, T, R, W>(
    mut accel: Accelerator<F, EuclideanSpeed, T>,
    params: &AccelParams<F>,
    echo: &SpeedEcho<F>,
    input: R,
    mut out: W,
) -> Result<Summary>
where
    F: FixedPoint + FromStr<Err = FixedError>,
    T: Trace<F>,
    R: BufRead,
    W: Write,
{
    let mut summary = Summary::default();

    for (idx, line) in input.lines().enumerate() {
        let lineno = idx + 1;
        let line = line.with_context(|| format!("failed to read line {lineno}"))?;
        let Some((delta, interval)) =
            parse_sample::<F>(&line).with_context(|| format!("line {lineno}"))?
        else {
            continue;
        };

        let before = delta;
        let mut delta = delta;
        let sample = accel
            .accelerate(params, &mut delta, interval)
            .with_context(|| format!("line {lineno}: acceleration failed"))?;

        writeln!(
            out,
            "{} {} -> {} {} speed={} echo={}",
            before.x,
            before.y,
            delta.x,
            delta.y,
            sample.speed,
            hex(echo.snapshot().as_ref()),
        )?;

        summary.samples += 1;
        summary.input.0 += i64::from(before.x);
        summary.input.1 += i64::from(before.y);
        summary.output.0 += i64::from(delta.x);
        summary.output.1 += i64::from(delta.y);
    }

    out.flush()?;
    Ok(summary)
}

/// `None` for blank lines and `#` comments.
fn parse_sample<F>(line: &str) -> Result<Option<(Displacement, F)>>
where
    F: FixedPoint + FromStr<Err = FixedError>,
{
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[dx, dy, interval] = fields.as_slice() else {
        bail!("expected `dx dy interval_ms`, got {} fields", fields.len());
    };

    let dx: i32 = dx.parse().with_context(|| format!("invalid dx '{dx}'"))?;
    let dy: i32 = dy.parse().with_context(|| format!("invalid dy '{dy}'"))?;
    let interval: F = interval
        .parse()
        .with_context(|| format!("invalid interval '{interval}'"))?;

    Ok(Some((Displacement::new(dx, dy), interval)))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        let _ = write!(s, "{b:02x}");
        s
    })
}
