//! PassiveCalc CLI - passive component calculations from the command line.

use clap::{Args, Parser, Subcommand, ValueEnum};
use passivecalc::glossary;
use passivecalc::montecarlo::{histogram, preview, SampleStats, SimulationRun, MAX_BINS};
use passivecalc::network::NetworkElement;
use passivecalc::preset::{load_preset, save_preset, ColorDecodePreset};
use passivecalc::units::{format_ohms, format_value};
use passivecalc::wire::{self, AWG_TABLE};
use passivecalc::{
    parse_value, CalcError, CalcOptions, CatalogSource, CustomValueList, NetworkSpec,
    PassiveCalc, Topology,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "passivecalc")]
#[command(about = "Resistor, capacitor and small-circuit calculator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human", global = true)]
    format: OutputFormat,

    /// JSON file with calculation options
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log search and designer details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a 4- or 5-band resistor color code
    Decode {
        /// Band colors in reading order, e.g. yellow violet red gold
        #[arg(value_name = "BAND")]
        bands: Vec<String>,

        /// Read the bands from a saved preset instead
        #[arg(long, value_name = "FILE", conflicts_with = "bands")]
        load: Option<PathBuf>,

        /// Save the bands as a preset
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,
    },

    /// Find the nearest standard value and its color bands
    Encode {
        /// Resistance, e.g. 4k7 or 2200
        #[arg(value_parser = parse_magnitude)]
        value: f64,

        /// Restrict to one series (default: best of E3 to E192)
        #[arg(long)]
        series: Option<String>,
    },

    /// Decode an SMD resistor marking (103, 4702, 4R7, 01C)
    Smd {
        code: String,
    },

    /// Series/parallel equivalent of a resistor network
    Network {
        /// Elements as VALUE or VALUE:TOLERANCE%, e.g. 1k:5 2k2:1
        #[arg(value_name = "ELEMENT", required = true)]
        elements: Vec<String>,

        #[arg(short, long, value_enum, default_value = "series")]
        topology: TopologyArg,

        /// Also replace every element by its nearest commercial value
        #[arg(long)]
        optimize: bool,

        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// Monte Carlo spread of a voltage divider output
    MonteCarlo {
        #[arg(long, value_parser = parse_magnitude)]
        vin: f64,

        #[arg(long, value_parser = parse_magnitude)]
        r1: f64,

        /// R1 tolerance in percent
        #[arg(long, default_value_t = 5.0)]
        r1_tol: f64,

        #[arg(long, value_parser = parse_magnitude)]
        r2: f64,

        /// R2 tolerance in percent
        #[arg(long, default_value_t = 5.0)]
        r2_tol: f64,

        #[arg(long, default_value_t = 1000)]
        trials: usize,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = 50)]
        bins: usize,
    },

    /// Power from any two of V, I, R and package safety margin
    Power {
        #[arg(long, value_parser = parse_magnitude, default_value = "0")]
        voltage: f64,

        #[arg(long, value_parser = parse_magnitude, default_value = "0")]
        current: f64,

        #[arg(long, value_parser = parse_magnitude, default_value = "0")]
        resistance: f64,

        /// Package to check, e.g. 0805
        #[arg(long)]
        package: Option<String>,

        /// Ambient temperature in °C
        #[arg(long, default_value_t = 25.0)]
        ambient: f64,
    },

    /// Best resistor pairs for a voltage divider
    Divider {
        #[arg(long, value_parser = parse_magnitude)]
        vin: f64,

        #[arg(long, value_parser = parse_magnitude)]
        vout: f64,

        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// Best R/C pairs for a first-order low-pass filter
    RcFilter {
        /// Cutoff frequency in Hz, e.g. 1k
        #[arg(long, value_parser = parse_magnitude)]
        fc: f64,

        /// Capacitor series
        #[arg(long, default_value = "E12")]
        cap_series: String,

        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// LED series resistor and package
    Led {
        #[arg(long, value_parser = parse_magnitude)]
        supply: f64,

        /// LED forward voltage
        #[arg(long, value_parser = parse_magnitude)]
        vf: f64,

        /// LED current in mA
        #[arg(long)]
        current_ma: f64,

        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// Feedback resistors for an adjustable regulator
    Regulator {
        /// Regulator name, e.g. LM317
        name: String,

        #[arg(long, allow_hyphen_values = true)]
        vout: f64,

        /// Directory of extra regulator JSON files
        #[arg(long, value_name = "DIR")]
        regulator_dir: Option<PathBuf>,

        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// AWG wire table, lookup and voltage drop
    Awg {
        gauge: Option<u8>,

        /// Current in amps
        #[arg(long)]
        amps: Option<f64>,

        /// Wire length in metres
        #[arg(long)]
        length: Option<f64>,
    },

    /// Search the glossary
    Glossary {
        query: Option<String>,
    },

    /// List the values of an E-series
    Series {
        #[arg(default_value = "E24")]
        name: String,
    },
}

#[derive(Args)]
struct CatalogArgs {
    /// E-series to pick resistors from
    #[arg(long, default_value = "E24")]
    series: String,

    /// Parts list file to pick resistors from instead of a series
    #[arg(long, value_name = "FILE")]
    bom: Option<PathBuf>,
}

impl CatalogArgs {
    fn source(&self) -> Result<CatalogSource, CalcError> {
        match &self.bom {
            Some(path) => Ok(CatalogSource::Custom(CustomValueList::from_file(path)?)),
            None => Ok(CatalogSource::series(self.series.as_str())),
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum TopologyArg {
    Series,
    Parallel,
}

impl From<TopologyArg> for Topology {
    fn from(arg: TopologyArg) -> Self {
        match arg {
            TopologyArg::Series => Topology::Series,
            TopologyArg::Parallel => Topology::Parallel,
        }
    }
}

fn parse_magnitude(text: &str) -> Result<f64, String> {
    parse_value(text).ok_or_else(|| format!("'{}' is not a number", text))
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}

fn load_options(path: Option<&Path>) -> Result<CalcOptions, CalcError> {
    match path {
        Some(path) => {
            tracing::debug!("loading options from {}", path.display());
            CalcOptions::from_json_file(path)
        }
        None => Ok(CalcOptions::default()),
    }
}

fn run(cli: Cli) -> Result<(), CalcError> {
    let options = load_options(cli.config.as_deref())?;
    let mut calc = PassiveCalc::new(options)?;
    let format = cli.format;

    match cli.command {
        Commands::Decode { bands, load, save } => {
            handle_decode(&calc, &format, bands, load, save)
        }
        Commands::Encode { value, series } => {
            let found = calc.color_match(value, series.as_deref())?;
            output(&format, &found, |f| {
                println!("Target:     {}", format_ohms(f.result.target));
                println!("Nearest:    {} ({})", format_ohms(f.result.value), f.series);
                println!("Error:      {:.2}%", f.result.error_percent);
                if let Some(ref bands) = f.result.bands {
                    println!("Bands:      {}", bands);
                }
            })
        }
        Commands::Smd { code } => {
            let decoded = calc.decode_smd(&code)?;
            output(&format, &decoded, |d| {
                println!("Code:       {} ({})", d.code, d.format.label());
                println!("Value:      {}", format_ohms(d.value));
                println!("Tolerance:  ±{}%", d.tolerance_percent);
            })
        }
        Commands::Network {
            elements,
            topology,
            optimize,
            catalog,
        } => handle_network(&calc, &format, &elements, topology.into(), optimize, &catalog),
        Commands::MonteCarlo {
            vin,
            r1,
            r1_tol,
            r2,
            r2_tol,
            trials,
            seed,
            bins,
        } => {
            let run = SimulationRun {
                trials,
                v_in: vin,
                r1_nominal: r1,
                r1_tolerance: r1_tol / 100.0,
                r2_nominal: r2,
                r2_tolerance: r2_tol / 100.0,
            };
            handle_monte_carlo(&calc, &format, &run, seed, bins)
        }
        Commands::Power {
            voltage,
            current,
            resistance,
            package,
            ambient,
        } => handle_power(&calc, &format, voltage, current, resistance, package, ambient),
        Commands::Divider { vin, vout, catalog } => {
            let pairs = calc.divider(vin, vout, &catalog.source()?)?;
            output(&format, &pairs, |pairs| {
                println!("Divider {} V -> {} V", vin, vout);
                for (i, p) in pairs.iter().enumerate() {
                    println!(
                        "  {:>2}. R1 = {:>12}  R2 = {:>12}  Vout = {:.4} V  I = {}  error = {:.3}%",
                        i + 1,
                        format_ohms(p.r1),
                        format_ohms(p.r2),
                        p.vout,
                        format_value(p.current_a, "A"),
                        p.error_percent
                    );
                }
            })
        }
        Commands::RcFilter {
            fc,
            cap_series,
            catalog,
        } => {
            let caps = CatalogSource::series(cap_series);
            let pairs = calc.rc_filter(fc, &catalog.source()?, &caps)?;
            output(&format, &pairs, |pairs| {
                println!("RC low-pass, fc = {}", format_value(fc, "Hz"));
                for (i, p) in pairs.iter().enumerate() {
                    println!(
                        "  {:>2}. R = {:>12}  C = {:>12}  fc = {:>14}  error = {:.3}%",
                        i + 1,
                        format_ohms(p.r),
                        format_value(p.c, "F"),
                        format_value(p.fc, "Hz"),
                        p.error_percent
                    );
                }
            })
        }
        Commands::Led {
            supply,
            vf,
            current_ma,
            catalog,
        } => {
            let design = calc.led(supply, vf, current_ma, &catalog.source()?)?;
            output(&format, &design, |d| {
                println!("Ideal R:    {}", format_ohms(d.r_ideal));
                println!("Resistor:   {} ({:.2}% off)", format_ohms(d.r), d.r_error_percent);
                println!("Current:    {:.2} mA", d.current_ma);
                println!("Power:      {}", format_value(d.power_w, "W"));
                match d.package {
                    Some(ref p) => println!(
                        "Package:    {} ({} W rated, needs {})",
                        p.name,
                        p.power_w,
                        format_value(d.required_w, "W")
                    ),
                    None => println!("Package:    no suitable package"),
                }
            })
        }
        Commands::Regulator {
            name,
            vout,
            regulator_dir,
            catalog,
        } => {
            if let Some(dir) = regulator_dir {
                for error in calc.load_regulator_dir(&dir) {
                    eprintln!("Warning: {}", error);
                }
            }
            let (spec, candidates) = calc.regulator(&name, vout, &catalog.source()?)?;
            let report = serde_json::json!({ "regulator": spec, "candidates": candidates });
            output(&format, &report, |_| {
                println!(
                    "{}: Vref = {} V, Iadj = {} µA, Vout target = {} V",
                    spec.name, spec.vref, spec.iadj_ua, vout
                );
                for (i, c) in candidates.iter().enumerate() {
                    println!(
                        "  {}. R1 = {:>10}  R2 = {:>12} (ideal {})  Vout = {:.4} V  error = {:.3}%",
                        i + 1,
                        format_ohms(c.r1),
                        format_ohms(c.r2),
                        format_ohms(c.r2_ideal),
                        c.vout,
                        c.error_percent
                    );
                }
            })
        }
        Commands::Awg {
            gauge,
            amps,
            length,
        } => handle_awg(&format, gauge, amps, length),
        Commands::Glossary { query } => {
            let entries = glossary::search(query.as_deref().unwrap_or(""));
            output(&format, &entries, |entries| {
                if entries.is_empty() {
                    println!("No matching terms");
                }
                for e in entries {
                    println!("{}\n    {}", e.term, e.definition);
                }
            })
        }
        Commands::Series { name } => {
            let values = calc.expand(&name)?;
            let tolerance = passivecalc::catalog::series(&name)?.tolerance_percent();
            output(&format, &values, |values| {
                println!("{} (±{}%), {} values", name.to_uppercase(), tolerance, values.len());
                for v in values {
                    println!("{}", format_ohms(*v));
                }
            })
        }
    }
}

/// Print `value` as pretty JSON, or through `human`.
fn output<T: Serialize>(
    format: &OutputFormat,
    value: &T,
    human: impl FnOnce(&T),
) -> Result<(), CalcError> {
    match format {
        OutputFormat::Human => human(value),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

fn handle_decode(
    calc: &PassiveCalc,
    format: &OutputFormat,
    bands: Vec<String>,
    load: Option<PathBuf>,
    save: Option<PathBuf>,
) -> Result<(), CalcError> {
    let (code, decoded) = match load {
        Some(path) => {
            let code = load_preset(&path)?.to_code()?;
            let decoded = code.decode()?;
            (code, decoded)
        }
        None => calc.decode_colors(&bands)?,
    };

    if let Some(path) = save {
        save_preset(&path, &ColorDecodePreset::from_code(&code))?;
        tracing::info!("preset saved to {}", path.display());
    }

    let colors: Vec<_> = code
        .bands()
        .iter()
        .map(|b| serde_json::json!({ "name": b.name(), "hex": b.hex() }))
        .collect();
    let report = serde_json::json!({ "bands": code, "colors": colors, "decoded": decoded });
    output(format, &report, |_| {
        println!("Bands:      {}", code);
        println!("Value:      {}", format_ohms(decoded.value));
        println!("Tolerance:  ±{}%", decoded.tolerance_percent);
        println!(
            "Range:      {} to {}",
            format_ohms(decoded.min),
            format_ohms(decoded.max)
        );
    })
}

fn parse_element(text: &str) -> Result<NetworkElement, CalcError> {
    let (value, tolerance) = match text.split_once(':') {
        Some((value, tolerance)) => (value, Some(tolerance)),
        None => (text, None),
    };
    let value = parse_value(value).ok_or_else(|| {
        CalcError::InvalidParameter(format!("cannot parse component value '{}'", value))
    })?;
    let tolerance_percent = match tolerance {
        Some(t) => t.trim_end_matches('%').parse().map_err(|_| {
            CalcError::InvalidParameter(format!("cannot parse tolerance '{}'", t))
        })?,
        None => 5.0,
    };
    Ok(NetworkElement {
        value,
        tolerance_percent,
    })
}

fn handle_network(
    calc: &PassiveCalc,
    format: &OutputFormat,
    elements: &[String],
    topology: Topology,
    optimize: bool,
    catalog: &CatalogArgs,
) -> Result<(), CalcError> {
    let elements = elements
        .iter()
        .map(|e| parse_element(e))
        .collect::<Result<Vec<_>, _>>()?;
    let spec = NetworkSpec::new(elements, topology);
    let analysis = calc.analyze_network(&spec)?;

    let optimization = if optimize {
        Some(calc.optimize_network(&spec.magnitudes(), topology, &catalog.source()?)?)
    } else {
        None
    };

    let report = serde_json::json!({ "analysis": analysis, "optimization": optimization });
    output(format, &report, |_| {
        println!("Topology:    {}", analysis.topology);
        println!("Equivalent:  {}", format_ohms(analysis.equivalent));
        println!(
            "Range:       {} to {} (±{:.2}% mean tolerance)",
            format_ohms(analysis.min),
            format_ohms(analysis.max),
            analysis.mean_tolerance_percent
        );
        for (element, share) in spec.elements.iter().zip(&analysis.contributions) {
            println!("  {:>12}  {:>5.1}%", format_ohms(element.value), share);
        }
        if let Some(ref opt) = optimization {
            println!("\nCommercial values:");
            for m in &opt.matches {
                println!(
                    "  {:>12} -> {:>12} ({:.2}%)",
                    format_ohms(m.target),
                    format_ohms(m.value),
                    m.error_percent
                );
            }
            println!(
                "Equivalent:  {} ({:.3}% off)",
                format_ohms(opt.optimized_equivalent),
                opt.error_percent
            );
        }
    })
}

fn handle_monte_carlo(
    calc: &PassiveCalc,
    format: &OutputFormat,
    run: &SimulationRun,
    seed: Option<u64>,
    bins: usize,
) -> Result<(), CalcError> {
    if bins == 0 || bins > MAX_BINS {
        return Err(CalcError::InvalidParameter(format!(
            "bin count must be in 1..={}, got {}",
            MAX_BINS, bins
        )));
    }
    let result = calc.monte_carlo(run, seed)?;
    let stats = SampleStats::from_samples(&result.samples);
    let hist = histogram(&result.samples, bins);

    let report = serde_json::json!({
        "theoretical": result.theoretical,
        "stats": stats,
        "histogram": hist,
        "preview": preview(&result.samples, 100),
    });
    output(format, &report, |_| {
        println!("Trials:       {}", run.trials);
        println!("Theoretical:  {:.4} V", result.theoretical);
        if let Some(s) = stats {
            println!("Mean:         {:.4} V", s.mean);
            println!("Std dev:      {:.4} V", s.std_dev);
            println!("Min / max:    {:.4} V / {:.4} V", s.min, s.max);
        }
    })
}

fn handle_power(
    calc: &PassiveCalc,
    format: &OutputFormat,
    voltage: f64,
    current: f64,
    resistance: f64,
    package: Option<String>,
    ambient: f64,
) -> Result<(), CalcError> {
    let estimate = calc.power_estimate(voltage, current, resistance)?;
    let assessment = match package {
        Some(name) => Some(calc.assess_package(estimate.average_w, &name, ambient)?),
        None => None,
    };

    let report = serde_json::json!({ "estimate": estimate, "assessment": assessment });
    output(format, &report, |_| {
        for (formula, watts) in &estimate.formulas {
            println!("  {:<6} = {}", formula.label(), format_value(*watts, "W"));
        }
        println!("Power:        {}", format_value(estimate.average_w, "W"));
        if let Some(ref a) = assessment {
            println!("Package:      {} ({} W at 25 °C)", a.package, a.rated_w);
            println!("Derated:      {} at {} °C", format_value(a.derated_w, "W"), ambient);
            println!("Safety:       {} (x{:.2}), {}", a.class, a.safety_factor, a.class.advice());
            if let Some(t) = a.body_temperature_c {
                println!("Body temp:    {:.1} °C", t);
            }
        }
    })
}

fn handle_awg(
    format: &OutputFormat,
    gauge: Option<u8>,
    amps: Option<f64>,
    length: Option<f64>,
) -> Result<(), CalcError> {
    let row = match (gauge, amps) {
        (Some(g), _) => Some(*wire::wire_gauge(g)?),
        (None, Some(a)) => Some(*wire::smallest_gauge_for(a).ok_or_else(|| {
            CalcError::InvalidParameter(format!("no gauge in the table carries {} A", a))
        })?),
        (None, None) => None,
    };

    let Some(row) = row else {
        return output(format, &AWG_TABLE.as_slice(), |table| {
            println!("AWG  diameter  area      Ω/km     max A");
            for g in table.iter() {
                println!(
                    "{:>3}  {:>6.3} mm  {:>6.3} mm²  {:>7.2}  {:>5}",
                    g.awg, g.diameter_mm, g.area_mm2, g.ohm_per_km, g.max_amps
                );
            }
        });
    };

    let drop = match (amps, length) {
        (Some(a), Some(l)) => Some(row.voltage_drop(a, l)),
        _ => None,
    };
    let report = serde_json::json!({ "gauge": row, "voltage_drop": drop });
    output(format, &report, |_| {
        println!(
            "AWG {}: {} mm, {} mm², {} Ω/km, {} A max",
            row.awg, row.diameter_mm, row.area_mm2, row.ohm_per_km, row.max_amps
        );
        if let (Some(d), Some(l)) = (drop, length) {
            println!("Voltage drop over {} m: {:.3} V", l, d);
        }
    })
}
