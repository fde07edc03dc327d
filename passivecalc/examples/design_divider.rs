//! Divider example: pick E24 resistors for a 12 V to 3.3 V divider.

use passivecalc::prelude::*;
use passivecalc::units::format_ohms;

fn main() -> Result<(), CalcError> {
    let mut args = std::env::args().skip(1);
    let vin: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(12.0);
    let vout: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3.3);
    let series = args.next().unwrap_or_else(|| "E24".to_string());

    let calc = PassiveCalc::new(CalcOptions::default())?;
    let pairs = calc.divider(vin, vout, &CatalogSource::series(series.as_str()))?;

    println!("{} V -> {} V using {}", vin, vout, series);
    println!();
    for (rank, pair) in pairs.iter().enumerate() {
        println!(
            "{:>2}. R1 = {:>12}  R2 = {:>12}  Vout = {:.4} V  error = {:.3}%",
            rank + 1,
            format_ohms(pair.r1),
            format_ohms(pair.r2),
            pair.vout,
            pair.error_percent
        );
    }

    Ok(())
}
