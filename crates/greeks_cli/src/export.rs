//! Surface export.
//!
//! - JSON: metadata, both axes and one row-major 2-D list per metric.
//!   Non-finite cells are written as `null`.
//! - CSV: long format, one row per cell with both axis values and every
//!   metric.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use greeks_models::analytical::OptionType;
use greeks_models::surface::{Axis, GreeksSurface, Metric};

use crate::config::OutputFormat;
use crate::display::display_surface;
use crate::{CliError, Result};

#[derive(Serialize)]
struct SurfaceDocument<'a> {
    option_type: OptionType,
    units: &'static str,
    shape: [usize; 2],
    axis1: &'a Axis,
    axis2: &'a Axis,
    fixed: BTreeMap<&'static str, f64>,
    metrics: BTreeMap<Metric, Vec<Vec<Option<f64>>>>,
}

fn units_label(display_units: bool) -> &'static str {
    if display_units {
        "display"
    } else {
        "raw"
    }
}

/// Metric values of every cell, row-major, optionally in display units.
fn metric_rows(surface: &GreeksSurface, metric: Metric, display_units: bool) -> Vec<Vec<f64>> {
    let values = if display_units {
        display_surface(surface, metric)
    } else {
        surface.metric(metric).to_owned()
    };
    values.outer_iter().map(|row| row.to_vec()).collect()
}

/// Writes the surface as a JSON document.
pub fn write_json<W: Write>(
    surface: &GreeksSurface,
    display_units: bool,
    mut writer: W,
) -> Result<()> {
    let (rows, cols) = surface.shape();
    let base = surface.grid().base();

    let fixed: BTreeMap<&'static str, f64> = surface
        .grid()
        .fixed_parameters()
        .into_iter()
        .map(|parameter| (parameter.name(), parameter.get(base)))
        .collect();

    let metrics: BTreeMap<Metric, Vec<Vec<Option<f64>>>> = Metric::ALL
        .into_iter()
        .map(|metric| {
            let rows = metric_rows(surface, metric, display_units)
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|v| v.is_finite().then_some(v))
                        .collect()
                })
                .collect();
            (metric, rows)
        })
        .collect();

    let document = SurfaceDocument {
        option_type: surface.option_type(),
        units: units_label(display_units),
        shape: [rows, cols],
        axis1: surface.axis1(),
        axis2: surface.axis2(),
        fixed,
        metrics,
    };

    serde_json::to_writer_pretty(&mut writer, &document)?;
    writer.flush()?;
    Ok(())
}

/// Writes the surface as long-format CSV.
pub fn write_csv<W: Write>(surface: &GreeksSurface, display_units: bool, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    let axis1 = surface.axis1();
    let axis2 = surface.axis2();

    let mut header = vec![axis1.parameter().name(), axis2.parameter().name()];
    header.extend(Metric::ALL.iter().map(|m| m.name()));
    csv.write_record(&header)?;

    let columns: Vec<Vec<Vec<f64>>> = Metric::ALL
        .iter()
        .map(|&metric| metric_rows(surface, metric, display_units))
        .collect();

    for (row, &y) in axis2.values().iter().enumerate() {
        for (col, &x) in axis1.values().iter().enumerate() {
            let mut record = vec![x.to_string(), y.to_string()];
            record.extend(columns.iter().map(|values| values[row][col].to_string()));
            csv.write_record(&record)?;
        }
    }

    csv.flush()?;
    Ok(())
}

/// Default file name for a surface export, e.g. `call_spot_volatility.json`.
pub fn default_file_name(surface: &GreeksSurface, format: OutputFormat) -> Option<String> {
    format.extension().map(|ext| {
        format!(
            "{}_{}_{}.{}",
            surface.option_type().as_str(),
            surface.axis1().parameter().name(),
            surface.axis2().parameter().name(),
            ext
        )
    })
}

/// Writes the surface to `path` in a file-backed format.
pub fn write_surface_file(
    surface: &GreeksSurface,
    format: OutputFormat,
    display_units: bool,
    path: &Path,
) -> Result<()> {
    if format == OutputFormat::Table {
        return Err(CliError::InvalidArgument(
            "table output cannot be written to a file".to_string(),
        ));
    }

    let writer = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Json => write_json(surface, display_units, writer)?,
        _ => write_csv(surface, display_units, writer)?,
    }

    info!(
        path = %path.display(),
        format = %format,
        cells = surface.grid().len(),
        "Surface written to file"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use greeks_models::analytical::MarketParams;
    use greeks_models::surface::{AxisParameter, EvaluationMode, SurfaceGrid};

    fn surface() -> GreeksSurface {
        let spots = Axis::linspace(AxisParameter::Spot, 30.0, 50.0, 3).unwrap();
        let vols = Axis::linspace(AxisParameter::Volatility, 0.2, 0.4, 2).unwrap();
        let base = MarketParams::new(34.03, 40.0, 0.0412, 30.0 / 365.0, 0.35);
        SurfaceGrid::spot_volatility(spots, vols, base)
            .unwrap()
            .evaluate(OptionType::Call, EvaluationMode::Vectorized)
    }

    // ==========================================================
    // JSON tests
    // ==========================================================

    #[test]
    fn test_json_layout() {
        let surface = surface();
        let mut buf = Vec::new();
        write_json(&surface, false, &mut buf).unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(doc["option_type"], "call");
        assert_eq!(doc["units"], "raw");
        assert_eq!(doc["shape"], serde_json::json!([2, 3]));
        assert_eq!(doc["axis1"]["parameter"], "spot");
        assert_eq!(doc["axis2"]["parameter"], "volatility");
        assert_eq!(doc["fixed"]["strike"], 40.0);
        assert!(doc["fixed"].get("spot").is_none());

        let gamma = &doc["metrics"]["gamma"];
        assert_eq!(gamma.as_array().unwrap().len(), 2);
        assert_eq!(gamma[0].as_array().unwrap().len(), 3);
        assert_relative_eq!(
            gamma[1][2].as_f64().unwrap(),
            surface.metric(Metric::Gamma)[[1, 2]],
            epsilon = 1e-12
        );

        let names: Vec<&String> = doc["metrics"].as_object().unwrap().keys().collect();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn test_json_display_units() {
        let surface = surface();
        let mut buf = Vec::new();
        write_json(&surface, true, &mut buf).unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(doc["units"], "display");
        assert_relative_eq!(
            doc["metrics"]["vega"][0][0].as_f64().unwrap(),
            surface.metric(Metric::Vega)[[0, 0]] / 100.0,
            epsilon = 1e-12
        );
    }

    /// Writer whose every write and flush fails
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_json_reports_buffered_write_failure() {
        let surface = surface();
        let result = write_json(&surface, false, BufWriter::new(BrokenPipe));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_csv_reports_buffered_write_failure() {
        let surface = surface();
        assert!(write_csv(&surface, false, BufWriter::new(BrokenPipe)).is_err());
    }

    // ==========================================================
    // CSV tests
    // ==========================================================

    #[test]
    fn test_csv_long_format() {
        let surface = surface();
        let mut buf = Vec::new();
        write_csv(&surface, false, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "spot,volatility,price,delta,gamma,vega,theta,rho");
        assert_eq!(lines.len(), 1 + 6);

        // Second data row: spot 40, volatility 0.2
        let fields: Vec<&str> = lines[2].split(',').collect();
        assert_eq!(fields[0], "40");
        assert_eq!(fields[1], "0.2");
        let price: f64 = fields[2].parse().unwrap();
        assert_relative_eq!(price, surface.metric(Metric::Price)[[0, 1]], epsilon = 1e-12);
    }

    #[test]
    fn test_default_file_name() {
        let surface = surface();
        assert_eq!(
            default_file_name(&surface, OutputFormat::Json).as_deref(),
            Some("call_spot_volatility.json")
        );
        assert_eq!(default_file_name(&surface, OutputFormat::Table), None);
    }
}
