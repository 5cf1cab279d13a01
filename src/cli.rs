use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use wtr::data::{self, validate, LicenceCollection};
use wtr::query::LicenceQuery;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "wtr")]
#[command(version, about = "Filter the Ofcom Wireless Telegraphy Register", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the licences matching a selection as CSV
    Filter {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep licences held by this company (repeatable)
        #[arg(long = "company", value_name = "NAME")]
        companies: Vec<String>,

        /// Keep licences with this product code (repeatable)
        #[arg(long = "product-code", value_name = "CODE")]
        product_codes: Vec<String>,

        /// Keep only point-to-point fixed links
        #[arg(long)]
        point_to_point: bool,
    },

    /// List licencee companies, one per line
    Companies {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Check product codes and descriptions
    Validate {
        #[command(flatten)]
        input: InputArgs,

        /// Also require every known product code to appear
        #[arg(long)]
        strict: bool,
    },

    /// Row counts per product code
    Summary {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Register CSV file
    #[arg(value_name = "INPUT", env = "WTR_INPUT")]
    pub input: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Filter {
            input,
            output,
            companies,
            product_codes,
            point_to_point,
        } => {
            let query = LicenceQuery {
                companies: companies.into_iter().collect(),
                product_codes: product_codes.into_iter().collect(),
                point_to_point,
            };
            filter(&input.input, output.as_deref(), &query)
        }
        Command::Companies { input } => {
            let register = load(&input.input)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for company in register.companies() {
                writeln!(out, "{company}")?;
            }
            Ok(())
        }
        Command::Validate { input, strict } => check(&input.input, strict),
        Command::Summary { input, format } => {
            let summary = load(&input.input)?.summary();
            match format {
                Format::Text => print!("{summary}"),
                Format::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&summary).context("serializing summary")?
                ),
            }
            Ok(())
        }
    }
}

fn load(path: &Path) -> Result<LicenceCollection> {
    data::load_file(path).with_context(|| format!("loading {}", path.display()))
}

fn filter(input: &Path, output: Option<&Path>, query: &LicenceQuery) -> Result<()> {
    let mut register = load(input)?;
    let total = register.len();
    query.apply_in_place(&mut register);
    log::info!("{} of {total} licences selected", register.len());

    match output {
        Some(path) => data::write_csv_file(&register, path)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            register.write_csv(&mut out).context("writing to stdout")?;
            out.flush()?;
        }
    }
    Ok(())
}

fn check(input: &Path, strict: bool) -> Result<()> {
    let register = load(input)?;
    validate::validate_rows(&register).context("row validation failed")?;
    if strict {
        validate::validate_coverage(&register).context("coverage validation failed")?;
    }
    println!("ok: {} licences", register.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wtr::data::{LicenceRow, FILTER_POINT_TO_POINT};

    fn row(licence: &str, company: &str, code: &str) -> LicenceRow {
        LicenceRow {
            licence_number: licence.to_string(),
            licencee_company: company.to_string(),
            product_code: code.to_string(),
            product_description: data::product_codes::describe(code)
                .unwrap_or_default()
                .to_string(),
            ..Default::default()
        }
    }

    fn fixture(dir: &Path) -> PathBuf {
        let path = dir.join("WTR.csv");
        let register = LicenceCollection::with_wtr_header(vec![
            row("1", "MBNL", "301010"),
            row("2", "Vodafone Ltd", "301010"),
            row("3", "MBNL", "306010"),
        ]);
        data::write_csv_file(&register, &path).unwrap();
        path
    }

    #[test]
    fn parses_repeatable_filter_flags() {
        let cli = Cli::try_parse_from([
            "wtr",
            "filter",
            "WTR.csv",
            "--company",
            "MBNL",
            "--company",
            "Vodafone Ltd",
            "--product-code",
            "301010",
            "--point-to-point",
            "-o",
            "out.csv",
        ])
        .unwrap();

        match cli.command {
            Command::Filter {
                input,
                output,
                companies,
                product_codes,
                point_to_point,
            } => {
                assert_eq!(input.input, PathBuf::from("WTR.csv"));
                assert_eq!(output, Some(PathBuf::from("out.csv")));
                assert_eq!(companies, vec!["MBNL", "Vodafone Ltd"]);
                assert_eq!(product_codes, vec!["301010"]);
                assert!(point_to_point);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_summary_format() {
        let cli = Cli::try_parse_from(["wtr", "-v", "summary", "WTR.csv", "--format", "json"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Command::Summary {
                format: Format::Json,
                ..
            }
        ));
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["wtr", "summary", "WTR.csv", "--format", "xml"]).is_err());
    }

    #[test]
    fn filter_writes_selection_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = fixture(dir.path());
        let output = dir.path().join("p2p.csv");

        let query = LicenceQuery::new().only_point_to_point();
        filter(&input, Some(&output), &query).unwrap();

        let written = data::load_file(&output).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written.filter(&FILTER_POINT_TO_POINT).len(), 2);
        assert_eq!(written.header().len(), 46);
    }

    #[test]
    fn validate_passes_rows_but_strict_fails_coverage() {
        let dir = tempfile::tempdir().unwrap();
        let input = fixture(dir.path());

        check(&input, false).unwrap();
        let err = check(&input, true).unwrap_err();
        assert!(format!("{err:#}").contains("does not appear in the data"));
    }

    #[test]
    fn missing_input_reports_path() {
        let err = load(Path::new("/no/such/WTR.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("/no/such/WTR.csv"));
    }
}
