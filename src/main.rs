// Group consecutive integer runs and unstack correlation matrices into
// long-form pair tables.

use std::{
    collections::HashMap,
    env,
    error::Error,
    fs::File,
    io::{BufRead, Read},
    path::Path,
    str::FromStr,
};

use csv::{ReaderBuilder, WriterBuilder};
use flate2::read::{GzDecoder, MultiGzDecoder};
use ndarray::{Array1, Array2};
use strum_macros::{Display, EnumString};
use tar::Archive;
use tracing_subscriber::filter::LevelFilter;

use runcorr::{
    consecutive_groups, consecutive_intervals, logging::init_logging, timing::ScopedTimer,
    unstack_corr, CorrMatrix, EdgeTable,
};

const USAGE: &str = "Usage: runcorr <input_file> <operation> [options]\n\
Operations: unstack, intervals\n\
Options:\n\
  --ascending            sort correlations in ascending order (default: descending)\n\
  --col1 NAME            first label column name (default: col_1)\n\
  --col2 NAME            second label column name (default: col_2)\n\
  --out PATH             output file for the pair table (default: <input>_corr_pairs.tsv)\n\
  --precomputed          input file already holds a correlation matrix\n\
  --values               intervals: print grouped values instead of index pairs\n\
  --time                 enable phase timing output\n\
  --log-level LVL        console log level (default: info)\n\
  --log-file PATH        also write log messages to PATH\n\
  --file-log-level LVL   file log level (default: info)";

#[derive(EnumString, Display)]
#[strum(ascii_case_insensitive)]
enum Operation {
    #[strum(serialize = "Unstack")]
    Unstack,
    #[strum(serialize = "Intervals", serialize = "Group", to_string = "Intervals")]
    Intervals,
}

struct Config {
    input: String,
    operation: Operation,
    ascending: bool,
    col_1: String,
    col_2: String,
    out_file: Option<String>,
    values: bool,
    precomputed: bool,
    time_tracking: bool,
    console_level: LevelFilter,
    file_level: LevelFilter,
    log_file: Option<String>,
}

fn next_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<String, Box<dyn Error>> {
    iter.next()
        .cloned()
        .ok_or_else(|| format!("Missing value for {}", flag).into())
}

fn parse_args() -> Result<Config, Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return Err(USAGE.into());
    }

    let mut config = Config {
        input: args[1].clone(),
        operation: args[2].parse()?,
        ascending: false,
        col_1: "col_1".to_string(),
        col_2: "col_2".to_string(),
        out_file: None,
        values: false,
        precomputed: false,
        time_tracking: false,
        console_level: LevelFilter::INFO,
        file_level: LevelFilter::INFO,
        log_file: None,
    };

    let mut iter = args.iter().skip(3);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--ascending" => config.ascending = true,
            "--values" => config.values = true,
            "--precomputed" => config.precomputed = true,
            "--time" => config.time_tracking = true,
            "--col1" => config.col_1 = next_value(&mut iter, "--col1")?,
            "--col2" => config.col_2 = next_value(&mut iter, "--col2")?,
            "--out" => config.out_file = Some(next_value(&mut iter, "--out")?),
            "--log-file" => config.log_file = Some(next_value(&mut iter, "--log-file")?),
            "--log-level" => {
                config.console_level = LevelFilter::from_str(&next_value(&mut iter, "--log-level")?)?
            }
            "--file-log-level" => {
                config.file_level =
                    LevelFilter::from_str(&next_value(&mut iter, "--file-log-level")?)?
            }
            other => return Err(format!("Unknown argument: {}", other).into()),
        }
    }

    Ok(config)
}

/// Read the input file fully into memory, transparently decompressing
/// `.gz` and `.tar.gz` inputs (first file entry of the archive).
fn read_input_bytes(path: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut buf = Vec::new();
    if path.ends_with(".tar.gz") {
        let file = File::open(path)?;
        let gz = GzDecoder::new(file);
        let mut archive = Archive::new(gz);
        for entry in archive.entries()? {
            let mut entry = entry?;
            if entry.header().entry_type().is_file() {
                entry.read_to_end(&mut buf)?;
                return Ok(buf);
            }
        }
        Err("No readable file found in tar archive".into())
    } else if path.ends_with(".gz") {
        let file = File::open(path)?;
        MultiGzDecoder::new(file).read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        File::open(path)?.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

fn read_matrix_data(input: &[u8]) -> Result<HashMap<String, Array1<f64>>, Box<dyn Error>> {
    let mut row_data = HashMap::new();
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(input);

    // Row ID column plus at least two observation columns
    if rdr.headers()?.len() < 3 {
        return Err(
            "Input file must contain a row ID column and at least two observation columns".into(),
        );
    }

    for (idx, record) in rdr.records().enumerate() {
        let record = record?;

        let row_id = record.get(0).unwrap_or("").trim();
        if row_id.is_empty() {
            return Err(format!(
                "Empty row ID encountered on line {}",
                idx + 2 /* header offset */
            )
            .into());
        }
        if row_data.contains_key(row_id) {
            return Err(format!("Duplicate row ID '{}' encountered on line {}", row_id, idx + 2).into());
        }

        let observations: Array1<f64> = record
            .iter()
            .skip(1)
            .map(|s| s.parse().unwrap_or(f64::NAN))
            .collect::<Vec<_>>()
            .into();

        row_data.insert(row_id.to_string(), observations);
    }
    Ok(row_data)
}

/// Parse an already-computed correlation matrix: header of variable labels,
/// one row per variable with its label in the first field.
fn read_corr_matrix(input: &[u8]) -> Result<CorrMatrix, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(input);

    let labels: Vec<String> = rdr
        .headers()?
        .iter()
        .skip(1)
        .map(|s| s.trim().to_string())
        .collect();
    let n = labels.len();

    let mut values = Array2::<f64>::from_elem((n, n), f64::NAN);
    let mut row_count = 0;
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        if idx >= n {
            return Err(format!(
                "Correlation matrix is not square: more than {} rows for {} columns",
                n, n
            )
            .into());
        }

        let row_label = record.get(0).unwrap_or("").trim();
        if row_label != labels[idx] {
            return Err(format!(
                "Row label '{}' on line {} does not match column label '{}'",
                row_label,
                idx + 2,
                labels[idx]
            )
            .into());
        }

        for (j, field) in record.iter().skip(1).enumerate() {
            values[[idx, j]] = field.trim().parse().unwrap_or(f64::NAN);
        }
        row_count += 1;
    }
    if row_count != n {
        return Err(format!(
            "Correlation matrix is not square: {} rows for {} columns",
            row_count, n
        )
        .into());
    }

    Ok(CorrMatrix::new(labels, values))
}

fn read_int_sequence(input: &[u8]) -> Result<Vec<i64>, Box<dyn Error>> {
    let mut values = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value: i64 = trimmed
            .parse()
            .map_err(|_| format!("Invalid integer '{}' on line {}", trimmed, idx + 1))?;
        values.push(value);
    }
    Ok(values)
}

fn build_data_matrix(row_ids: &[String], row_data: &HashMap<String, Array1<f64>>) -> Array2<f64> {
    let n_cols = row_data.values().next().map(|v| v.len()).unwrap_or(0);

    let mut matrix = Array2::<f64>::zeros((row_ids.len(), n_cols));
    for (i, row_id) in row_ids.iter().enumerate() {
        if let Some(values) = row_data.get(row_id) {
            matrix.row_mut(i).assign(values);
        }
    }
    matrix
}

fn input_basename(path: &str) -> String {
    let stem = Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("data");
    // .tar.gz inputs stem to "<name>.tar"
    stem.strip_suffix(".tar").unwrap_or(stem).to_string()
}

fn write_edge_table(table: &EdgeTable, path: &str) -> Result<(), Box<dyn Error>> {
    let mut wtr = WriterBuilder::new().delimiter(b'\t').from_path(path)?;

    wtr.write_record([table.first_col.as_str(), table.second_col.as_str(), "corr"])?;
    for pair in &table.pairs {
        let corr = pair.corr.to_string();
        wtr.write_record([pair.first.as_str(), pair.second.as_str(), corr.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

fn run_unstack(config: &Config) -> Result<(), Box<dyn Error>> {
    let corr = {
        let _timer = config.time_tracking.then(|| ScopedTimer::new("load"));
        let input = read_input_bytes(&config.input)?;
        if config.precomputed {
            read_corr_matrix(&input)?
        } else {
            let row_data = read_matrix_data(&input)?;
            let mut row_ids: Vec<String> = row_data.keys().cloned().collect();
            row_ids.sort();

            tracing::info!(
                "matrix dimensions: {} rows x {} columns",
                row_ids.len(),
                row_data.values().next().map(|v| v.len()).unwrap_or(0)
            );
            let data = build_data_matrix(&row_ids, &row_data);
            CorrMatrix::from_data(row_ids, &data)
        }
    };

    let table = {
        let _timer = config.time_tracking.then(|| ScopedTimer::new("unstack"));
        unstack_corr(&corr, config.ascending, &config.col_1, &config.col_2)
    };
    tracing::info!("{} label pairs from {} variables", table.pairs.len(), corr.len());

    let out_path = match &config.out_file {
        Some(path) => path.clone(),
        None => format!("{}_corr_pairs.tsv", input_basename(&config.input)),
    };
    {
        let _timer = config.time_tracking.then(|| ScopedTimer::new("write"));
        write_edge_table(&table, &out_path)?;
    }
    tracing::info!("pair table written to {}", out_path);

    Ok(())
}

fn run_intervals(config: &Config) -> Result<(), Box<dyn Error>> {
    let input = read_input_bytes(&config.input)?;
    let sequence = read_int_sequence(&input)?;
    tracing::info!("{} values loaded from {}", sequence.len(), config.input);

    let _timer = config.time_tracking.then(|| ScopedTimer::new("group"));
    if config.values {
        for group in consecutive_groups(&sequence) {
            let fields: Vec<String> = group.iter().map(|v| v.to_string()).collect();
            println!("{}", fields.join("\t"));
        }
    } else {
        for (start, end) in consecutive_intervals(&sequence) {
            println!("{}\t{}", start, end);
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = parse_args()?;

    init_logging(
        config.console_level,
        config
            .log_file
            .as_deref()
            .map(|p| (config.file_level, Path::new(p))),
    )?;
    tracing::info!("running {} on {}", config.operation, config.input);

    match config.operation {
        Operation::Unstack => run_unstack(&config),
        Operation::Intervals => run_intervals(&config),
    }
}
