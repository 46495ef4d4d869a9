use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;

#[derive(Parser, Debug)]
pub struct Args {
    /// Path to a directory containing TSPLIB instances, or a base path for instance files
    #[arg(short, long)]
    prefix: Option<String>,

    /// Path to one or more TSPLIB .tsp files
    #[arg(short, long)]
    file: Option<Vec<String>>,

    /// Directory to write parquet instrumentation to
    #[arg(short, long)]
    pub metrics: Option<String>,
}

/// Resolves the instance files named by `--file` and/or `--prefix`.
/// A bare `--prefix` enumerates every `.tsp` file in the directory.
pub fn enumerate_input_files(args: &Args) -> io::Result<Vec<PathBuf>> {
    if let Some(files) = &args.file {
        if let Some(prefix) = &args.prefix {
            Ok(files.iter().map(|f| Path::new(prefix).join(f)).collect())
        } else {
            Ok(files.iter().map(PathBuf::from).collect())
        }
    } else if let Some(prefix) = &args.prefix {
        let mut files: Vec<PathBuf> = std::fs::read_dir(prefix)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file() && path.extension().map(|e| e == "tsp").unwrap_or(false)
            })
            .collect();
        files.sort_by_key(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(natural_key)
                .unwrap_or_default()
        });
        Ok(files)
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Either --file and/or --prefix must be provided",
        ))
    }
}

/// Splits a file name into digit runs and text runs so that numeric
/// parts compare by value: `eil51` sorts before `eil101`. Underscores
/// compare as spaces and case is ignored.
fn natural_key(name: &str) -> Vec<Result<u64, String>> {
    let mut parts = Vec::new();
    let mut buf = String::new();
    let mut is_digit = None;

    for c in name.chars() {
        let c = if c == '_' { ' ' } else { c.to_ascii_lowercase() };
        let current_is_digit = c.is_ascii_digit();

        match is_digit {
            Some(prev) if prev != current_is_digit => {
                if prev {
                    parts.push(buf.parse::<u64>().map_err(|_| buf.clone()));
                } else {
                    parts.push(Err(buf.clone()));
                }
                buf.clear();
            }
            _ => {}
        }
        buf.push(c);
        is_digit = Some(current_is_digit);
    }

    if !buf.is_empty() {
        if is_digit == Some(true) {
            parts.push(buf.parse::<u64>().map_err(|_| buf.clone()));
        } else {
            parts.push(Err(buf));
        }
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_orders_numeric_parts_by_value() {
        let mut names = vec![
            "eil101.tsp",
            "st70.tsp",
            "eil51.tsp",
            "berlin52.tsp",
            "eil76.tsp",
        ];
        names.sort_by_key(|name| natural_key(name));
        assert_eq!(
            names,
            vec![
                "berlin52.tsp",
                "eil51.tsp",
                "eil76.tsp",
                "eil101.tsp",
                "st70.tsp"
            ]
        );
    }

    #[test]
    fn listing_ignores_case_and_underscores() {
        assert_eq!(natural_key("KroA100.tsp"), natural_key("kroa100.tsp"));
        assert_eq!(natural_key("kro_a100.tsp"), natural_key("kro a100.tsp"));
        assert!(natural_key("a2") < natural_key("a10"));
    }
}
